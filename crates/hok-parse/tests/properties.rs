use hok_parse::hero::parse_hero_line;
use hok_parse::fields::percent;
use hok_parse::section::HeroRoster;
use hok_parse::structures::{parse_lane_line, TowerAtlas};
use hok_state::{Side, TowerTier};
use proptest::prelude::*;

proptest! {
    #[test]
    fn percent_is_n_over_100(n in 0u32..=100) {
        prop_assert_eq!(percent(&n.to_string()), Some(f64::from(n) / 100.0));
    }

    #[test]
    fn kda_is_reordered(k in 0u32..1000, a in 0u32..1000, d in 0u32..1000) {
        let line = format!("<我方-a-b>击杀：{}，助攻：{}，死亡：{}", k, a, d);
        let hero = parse_hero_line(&line, HeroRoster::Allies).unwrap();
        prop_assert_eq!(hero.kda, (k, d, a));
    }

    #[test]
    fn ultimate_defaults_to_ready(prefix in "[a-z0-9，。 ]{0,12}", suffix in "[a-z0-9，。 ]{0,12}", negated in any::<bool>()) {
        let body = if negated {
            format!("{}没有大招{}", prefix, suffix)
        } else {
            format!("{}{}", prefix, suffix)
        };
        let hero = parse_hero_line(&format!("<敌方-a-b>{}", body), HeroRoster::VisibleEnemies).unwrap();
        prop_assert_eq!(hero.has_ultimate, !negated);
    }

    #[test]
    fn single_frontier_tower(tier_idx in 0usize..4, ally in any::<bool>(), hp in 0u32..=100) {
        let owner = if ally { "我方" } else { "敌方" };
        let target = ["上路一塔", "上路二塔", "上路高地塔", "水晶"][tier_idx];
        let line = format!("上路：{}上路防御塔被推到{}，坐标（-10.0，5.0），剩余血量{}%", owner, target, hp);
        let report = parse_lane_line(&line, &TowerAtlas::default());
        if tier_idx < 3 {
            prop_assert_eq!(report.towers.len(), 1);
            prop_assert_eq!(report.towers[0].tier, TowerTier::ALL[tier_idx]);
            prop_assert_eq!(report.towers[0].side, if ally { Side::Ally } else { Side::Enemy });
        } else {
            prop_assert!(report.towers.is_empty());
        }
    }

    #[test]
    fn wave_owner_is_tower_opponent(ally in any::<bool>(), count in 0u32..20) {
        let owner = if ally { "我方" } else { "敌方" };
        let line = format!(
            "中路：{}中路防御塔被推到中路一塔，坐标（0.0，0.0），剩余血量50%，最近的威胁兵线为普通小兵，坐标（1.0，1.0），数量{}，血量50%",
            owner, count
        );
        let report = parse_lane_line(&line, &TowerAtlas::default());
        prop_assert_eq!(report.waves.len(), 1);
        prop_assert_eq!(report.waves[0].side, if ally { Side::Enemy } else { Side::Ally });
        prop_assert_eq!(report.waves[0].count, count);
    }

    #[test]
    fn parse_is_total(text in "\\PC{0,200}") {
        let _ = hok_parse::parse(&text);
    }
}
