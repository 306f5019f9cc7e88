use crate::fields::{coordinate, number_match, percent_match};
use hok_state::{NeutralObjective, ObjectiveKind, Position};
use regex::Regex;
use std::sync::LazyLock;

static RESPAWN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)秒后刷新").expect("respawn pattern"));
static HP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"血量([0-9]+)%").expect("hp pattern"));

const ABSENT: &str = "不存在";
const PRESENT: &str = "存在";
const HP_WORD: &str = "血量";

/// Parse one line of the neutral-objective section into zero or more objectives
pub fn parse_objective_line(line: &str) -> Vec<NeutralObjective> {
    line.split('；').filter_map(parse_segment).collect()
}

fn parse_segment(segment: &str) -> Option<NeutralObjective> {
    let segment = segment.trim().trim_matches('。').trim();
    if segment.is_empty() {
        return None;
    }
    let kind = ObjectiveKind::find_in(segment)?;

    // Segments that say nothing about the objective's state are dropped
    let (exists, respawn_secs) = if segment.contains(ABSENT) {
        (false, number_match(&RESPAWN, segment))
    } else if segment.contains(PRESENT) || segment.contains(HP_WORD) {
        (true, None)
    } else {
        return None;
    };

    let hp = match percent_match(&HP, segment) {
        Some(hp) => hp,
        None if exists => 1.0,
        None => 0.0,
    };

    let position = coordinate(segment);
    Some(NeutralObjective {
        kind,
        position: position.unwrap_or(Position::ORIGIN),
        located: position.is_some(),
        hp,
        exists,
        respawn_secs,
        description: segment.to_string(),
    })
}
