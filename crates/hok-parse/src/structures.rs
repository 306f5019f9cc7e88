//! Tower push states and threatening minion waves.

use crate::fields::{coordinate, coordinate_pair, number_match, percent_match};
use hok_state::{MinionWave, Position, Side, Tower, TowerTier, WaveKind};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::debug;

static TOWER_PUSH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(我方|敌方)([^防御塔]+)防御塔被推到([^，；]*)").expect("tower push pattern")
});
static TOWER_HP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"剩余血量([0-9]+)%").expect("tower hp pattern"));
static WAVE_KIND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^，]*)").expect("wave kind pattern"));
static WAVE_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"数量([0-9]+)").expect("wave count pattern"));
static WAVE_HP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"血量([0-9]+)%").expect("wave hp pattern"));
static ATLAS_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(蓝方|红方)([^防御塔0-9]+)(一塔|二塔|高地塔)[（(]\s*([-0-9.]+)\s*[,，]\s*([-0-9.]+)\s*[）)]")
        .expect("atlas pattern")
});

const WAVE_MARKER: &str = "最近的威胁兵线为";

/// Static tower coordinates harvested from the map-info section
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TowerAtlas {
    positions: HashMap<(Side, String, TowerTier), Position>,
}

impl TowerAtlas {
    pub fn get(&self, side: Side, lane: &str, tier: TowerTier) -> Option<Position> {
        self.positions.get(&(side, lane.to_string(), tier)).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Harvest every `蓝方上路一塔(x, y)` entry in a map-info line
    pub fn absorb_line(&mut self, line: &str) {
        for caps in ATLAS_ENTRY.captures_iter(line) {
            let side = if &caps[1] == "蓝方" { Side::Ally } else { Side::Enemy };
            let Some(tier) = TowerTier::find_in(&caps[3]) else {
                continue;
            };
            let Some(pos) = coordinate_pair(&caps[4], &caps[5]) else {
                continue;
            };
            self.positions
                .insert((side, caps[2].trim().to_string(), tier), pos);
        }
    }
}

/// Everything recovered from one lane line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaneReport {
    pub towers: Vec<Tower>,
    pub waves: Vec<MinionWave>,
}

/// Parse one `上路：...；...` line of the structures section
pub fn parse_lane_line(line: &str, atlas: &TowerAtlas) -> LaneReport {
    let lane = line
        .split_once('：')
        .map(|(lane, _)| lane.trim())
        .unwrap_or_default();

    let mut report = LaneReport::default();
    for segment in line.split('；') {
        let (tower_part, wave_part) = match segment.split_once(WAVE_MARKER) {
            Some((tower, wave)) => (tower, Some(wave)),
            None => (segment, None),
        };

        let owner = tower_owner(tower_part);
        if let Some(tower) = tower(tower_part, atlas) {
            report.towers.push(tower);
        }
        if let Some(wave_part) = wave_part {
            // A wave threatening a tower belongs to that tower's opponent
            let side = owner.map_or(Side::Enemy, Side::opponent);
            if let Some(wave) = wave(wave_part, side, lane) {
                report.waves.push(wave);
            }
        }
    }
    report
}

fn side_from_word(word: &str) -> Side {
    if word == "我方" {
        Side::Ally
    } else {
        Side::Enemy
    }
}

/// Side owning the tower described in this segment, if any
fn tower_owner(text: &str) -> Option<Side> {
    let caps = TOWER_PUSH.captures(text)?;
    Some(side_from_word(caps.get(1)?.as_str()))
}

/// The frontier tower named by a `被推到` phrase; only that tier is emitted
fn tower(text: &str, atlas: &TowerAtlas) -> Option<Tower> {
    let caps = TOWER_PUSH.captures(text)?;
    let side = side_from_word(caps.get(1)?.as_str());
    let lane = caps.get(2)?.as_str().trim().to_string();
    let target = caps.get(3)?.as_str();

    let Some(tier) = TowerTier::find_in(target) else {
        debug!("Push target '{}' is not a tower tier, no tower emitted", target);
        return None;
    };

    let rest = &text[caps.get(0)?.end()..];
    let position = coordinate(rest).or_else(|| atlas.get(side, &lane, tier))?;
    let hp = percent_match(&TOWER_HP, rest).unwrap_or(1.0);

    Some(Tower {
        side,
        lane,
        tier,
        hp,
        position,
        destroyed: false,
    })
}

fn wave(text: &str, side: Side, lane: &str) -> Option<MinionWave> {
    let kind = WAVE_KIND.captures(text)?.get(1)?.as_str();
    let position = coordinate(text)?;
    let count = number_match(&WAVE_COUNT, text)?;
    let hp = percent_match(&WAVE_HP, text)?;
    Some(MinionWave {
        side,
        lane: lane.to_string(),
        position,
        count,
        hp,
        kind: WaveKind::from_label(kind),
    })
}
