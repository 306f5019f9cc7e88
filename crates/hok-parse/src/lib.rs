//! Turns a sectioned, natural-language match report into a [`MatchState`].
//!
//! Parsing is best effort: unknown sections, malformed lines and missing
//! fields are skipped and leave defaults in place. [`parse`] never fails.

pub mod fields;
pub mod hero;
pub mod objectives;
pub mod section;
pub mod structures;
pub mod totals;

pub use section::{HeroRoster, LineToken, Section, SectionLine, SectionReader};
pub use structures::{LaneReport, TowerAtlas};

use hok_state::MatchState;
use tracing::debug;

/// Collect static tower coordinates from the map-info section.
///
/// Runs over the whole text before the main pass.
pub fn parse_tower_atlas(text: &str) -> TowerAtlas {
    let mut atlas = TowerAtlas::default();
    for line in SectionReader::new(text) {
        if line.section == Some(Section::MapInfo) {
            atlas.absorb_line(line.text);
        }
    }
    atlas
}

/// Parse a full report
pub fn parse(text: &str) -> MatchState {
    let atlas = parse_tower_atlas(text);
    let mut state = MatchState::new();

    for line in SectionReader::new(text) {
        let Some(section) = line.section else {
            continue;
        };
        match section {
            Section::Overview => totals::apply_overview_line(line.text, &mut state),
            Section::Totals => totals::apply_totals_line(line.text, &mut state),
            Section::Heroes(roster) => {
                if line.text.starts_with('<') {
                    if let Some(hero) = hero::parse_hero_line(line.text, roster) {
                        state.heroes.push(hero);
                    }
                }
            }
            Section::Structures => {
                let report = structures::parse_lane_line(line.text, &atlas);
                state.towers.extend(report.towers);
                state.minion_waves.extend(report.waves);
            }
            Section::Objectives => {
                state
                    .objectives
                    .extend(objectives::parse_objective_line(line.text));
            }
            Section::MapInfo | Section::Other(_) => {}
        }
    }

    debug!(
        "Parsed report at {}: {} heroes, {} towers, {} waves, {} objectives ({} atlas towers)",
        state.clock,
        state.heroes.len(),
        state.towers.len(),
        state.minion_waves.len(),
        state.objectives.len(),
        atlas.len()
    );
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let state = parse("");
        assert_eq!(state, MatchState::new());
    }

    #[test]
    fn test_lines_outside_sections_ignored() {
        let state = parse("我方人头数：5\n<我方-玩家-廉颇>14级");
        assert_eq!(state.ally_kills, 0);
        assert!(state.heroes.is_empty());
    }

    #[test]
    fn test_atlas_only_reads_map_info() {
        let text = "[防御塔与兵线状态]\n蓝方上路一塔(-52.4, 28.7)\n[地图信息]\n红方中路二塔(20.0, 20.0)";
        let atlas = parse_tower_atlas(text);
        assert_eq!(atlas.len(), 1);
    }
}
