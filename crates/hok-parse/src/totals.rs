use crate::fields::{clock, number_after_colon};
use hok_state::MatchState;

/// Clock line of the overview section
pub fn apply_overview_line(line: &str, state: &mut MatchState) {
    if !line.contains("游戏阶段") {
        return;
    }
    if let Some(clock) = clock(line) {
        state.clock = clock;
    }
}

/// Kill and gold totals, written as `我方人头数：5，敌方人头数：3`
pub fn apply_totals_line(line: &str, state: &mut MatchState) {
    for clause in line.split('，') {
        let slot = if clause.contains("我方人头数") {
            &mut state.ally_kills
        } else if clause.contains("敌方人头数") {
            &mut state.enemy_kills
        } else if clause.contains("我方总经济") {
            &mut state.ally_gold
        } else if clause.contains("敌方总经济") {
            &mut state.enemy_gold
        } else {
            continue;
        };
        if let Some(value) = number_after_colon(clause) {
            *slot = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kills_and_gold() {
        let mut state = MatchState::new();
        apply_totals_line("我方人头数：5，敌方人头数：3", &mut state);
        apply_totals_line("我方总经济：35210，敌方总经济：33870，经济差：1340", &mut state);
        assert_eq!(state.ally_kills, 5);
        assert_eq!(state.enemy_kills, 3);
        assert_eq!(state.ally_gold, 35210);
        assert_eq!(state.enemy_gold, 33870);
    }

    #[test]
    fn test_malformed_totals_keep_defaults() {
        let mut state = MatchState::new();
        apply_totals_line("我方人头数5，敌方人头数：很多", &mut state);
        assert_eq!(state.ally_kills, 0);
        assert_eq!(state.enemy_kills, 0);
    }

    #[test]
    fn test_clock_requires_context_word() {
        let mut state = MatchState::new();
        apply_overview_line("主宰将在1分20秒后刷新", &mut state);
        assert_eq!(state.clock, "00:00");
        apply_overview_line("游戏阶段：中期，当前时间13分4秒", &mut state);
        assert_eq!(state.clock, "13:04");
        apply_overview_line("复活时间：还剩0分9秒", &mut state);
        assert_eq!(state.clock, "13:04");
    }
}
