use crate::fields::{coordinate, number_match, percent_match};
use crate::section::HeroRoster;
use hok_state::{Hero, Side};
use regex::Regex;
use std::sync::LazyLock;

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^<([^>]+)>").expect("tag pattern"));
static ROLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"是(?:我方|敌方)([^，]+)").expect("role pattern"));
static LEVEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)级").expect("level pattern"));
static RESPAWN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"还有([0-9]+)秒复活").expect("respawn pattern"));
static HP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"血量.*?[（(]([0-9]+)%[）)]").expect("hp pattern"));
static MANA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"蓝量([0-9]+)%").expect("mana pattern"));
static KDA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"击杀：([0-9]+)，助攻：([0-9]+)，死亡：([0-9]+)").expect("kda pattern")
});
static GOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"当前经济：([0-9]+)").expect("gold pattern"));

const ALLY_TAG: &str = "我方";
const DEAD_MARKER: &str = "已阵亡";
const NO_ULTIMATE: &str = "没有大招";
const HIDDEN_MARKER: &str = "视野不可见";
const ITEMS_LABEL: &str = "已出装备：";

/// Buff keyword in the line → label stored on the hero
const BUFF_KEYWORDS: [(&str, &str); 4] = [
    ("暴君buff", "暴君"),
    ("风暴龙王buff", "风暴龙王"),
    ("蓝buff", "蓝buff"),
    ("红buff", "红buff"),
];

/// Identity parsed from a `<side-player-...-hero>` tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroTag {
    pub side: Side,
    pub player: String,
    pub name: String,
}

pub fn parse_tag(line: &str) -> Option<HeroTag> {
    let tag = TAG.captures(line)?.get(1)?.as_str();
    let parts: Vec<&str> = tag.split('-').map(str::trim).collect();
    let name = parts.last().copied().unwrap_or_default();
    if name.is_empty() {
        return None;
    }
    let side = if parts[0] == ALLY_TAG {
        Side::Ally
    } else {
        Side::Enemy
    };
    Some(HeroTag {
        side,
        player: parts.get(1).copied().unwrap_or_default().to_string(),
        name: name.to_string(),
    })
}

/// Parse one hero line. Lines that do not start with a hero tag yield `None`.
pub fn parse_hero_line(line: &str, roster: HeroRoster) -> Option<Hero> {
    let tag = parse_tag(line)?;
    let mut hero = Hero::new(tag.name, tag.player, tag.side);

    if let Some(role) = role(line) {
        hero.role = role;
    }
    if let Some(level) = number_match(&LEVEL, line) {
        hero.level = level.max(1);
    }

    if line.contains(DEAD_MARKER) {
        hero.alive = false;
        hero.hp = 0.0;
        hero.respawn_secs = number_match(&RESPAWN, line);
    } else {
        if let Some(hp) = percent_match(&HP, line) {
            hero.hp = hp;
        }
        if let Some(mana) = percent_match(&MANA, line) {
            hero.mana = mana;
        }
    }

    hero.position = coordinate(line);
    if let Some(kda) = kda(line) {
        hero.kda = kda;
    }
    if let Some(gold) = number_match(&GOLD, line) {
        hero.gold = gold;
    }
    hero.items = items(line);
    hero.buffs = buffs(line);
    hero.has_ultimate = !line.contains(NO_ULTIMATE);
    hero.visible = roster != HeroRoster::HiddenEnemies && !line.contains(HIDDEN_MARKER);

    Some(hero)
}

fn role(line: &str) -> Option<String> {
    if !(line.contains('是') && line.contains('路')) {
        return None;
    }
    let role = ROLE.captures(line)?.get(1)?.as_str().trim();
    (!role.is_empty()).then(|| role.to_string())
}

/// Source order is kills, assists, deaths; stored as kills, deaths, assists
fn kda(line: &str) -> Option<(u32, u32, u32)> {
    let caps = KDA.captures(line)?;
    let kills = caps.get(1)?.as_str().parse().ok()?;
    let assists = caps.get(2)?.as_str().parse().ok()?;
    let deaths = caps.get(3)?.as_str().parse().ok()?;
    Some((kills, deaths, assists))
}

fn items(line: &str) -> Vec<String> {
    let Some((_, tail)) = line.split_once(ITEMS_LABEL) else {
        return Vec::new();
    };
    let run = tail.split(['，', '。']).next().unwrap_or_default();
    run.split(['、', '·'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn buffs(line: &str) -> Vec<String> {
    BUFF_KEYWORDS
        .iter()
        .filter(|(keyword, _)| line.contains(keyword))
        .map(|(_, label)| label.to_string())
        .collect()
}
