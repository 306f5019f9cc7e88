use hok_data::AssetLibrary;
use hok_render::palette;
use hok_render::scene::{DrawCommand, Layer};
use hok_render::{build_scene, RenderError};
use hok_state::{Hero, MatchState, NeutralObjective, ObjectiveKind, Position, Side, Tower, TowerTier};

fn hero(name: &str, player: &str, side: Side, at: Option<(f64, f64)>) -> Hero {
    let mut hero = Hero::new(name, player, side);
    hero.position = at.map(|(x, y)| Position::new(x, y));
    hero
}

fn objective(kind: ObjectiveKind, at: Option<(f64, f64)>, exists: bool) -> NeutralObjective {
    NeutralObjective {
        kind,
        position: at.map_or(Position::ORIGIN, |(x, y)| Position::new(x, y)),
        located: at.is_some(),
        hp: if exists { 0.5 } else { 0.0 },
        exists,
        respawn_secs: None,
        description: String::new(),
    }
}

fn scene(state: &MatchState) -> hok_render::Scene {
    build_scene(state, &AssetLibrary::empty(), 1.0).unwrap()
}

#[test]
fn test_scene_dimensions_follow_scale() {
    let state = MatchState::new();
    let one = build_scene(&state, &AssetLibrary::empty(), 1.0).unwrap();
    let two = build_scene(&state, &AssetLibrary::empty(), 2.0).unwrap();
    assert_eq!((one.width(), one.height()), (1360, 1180));
    assert_eq!((two.width(), two.height()), (2720, 2360));
}

#[test]
fn test_invalid_scale_is_rejected() {
    let state = MatchState::new();
    for scale in [0.0, -1.0, f32::INFINITY] {
        assert!(matches!(
            build_scene(&state, &AssetLibrary::empty(), scale),
            Err(RenderError::InvalidScale(_))
        ));
    }
}

#[test]
fn test_paint_order_follows_layers() {
    let mut state = MatchState::new();
    state.heroes.push(hero("貂蝉", "队友1", Side::Ally, Some((0.0, 0.0))));
    state.objectives.push(objective(ObjectiveKind::Tyrant, Some((18.2, -23.7)), true));
    let scene = scene(&state);

    let layers: Vec<Layer> = scene.ordered().into_iter().map(|(l, _)| l).collect();
    assert!(layers.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(layers.first(), Some(&Layer::Background));
    assert_eq!(layers.last(), Some(&Layer::BottomStrip));
}

#[test]
fn test_placeholder_map_without_art() {
    let scene = scene(&MatchState::new());
    assert!(scene.layer(Layer::Background).any(|c| matches!(
        c,
        DrawCommand::FillRect { color, .. } if *color == palette::MAP_FLOOR
    )));
    assert!(!scene
        .layer(Layer::Background)
        .any(|c| matches!(c, DrawCommand::Image { .. })));
}

#[test]
fn test_connectors_only_for_crowded_heroes() {
    let mut state = MatchState::new();
    state.heroes.push(hero("廉颇", "玩家", Side::Ally, Some((0.0, 0.0))));
    state.heroes.push(hero("后羿", "路人1", Side::Enemy, Some((1.0, 1.0))));
    state.heroes.push(hero("貂蝉", "队友1", Side::Ally, Some((-40.0, 40.0))));
    let scene = scene(&state);

    let connectors = scene.connectors(Layer::SidePanels);
    assert_eq!(connectors.len(), 2);

    // Ally card edge faces right, enemy card edge faces left
    let (ally_from, ally_to) = connectors[0];
    assert_eq!(ally_from.x, 20.0 + 240.0);
    assert_eq!(ally_from.y, 150.0 + 60.0);
    assert_eq!((ally_to.x, ally_to.y), (680.0, 550.0));
    let (enemy_from, _) = connectors[1];
    assert_eq!(enemy_from.x, 1360.0 - 280.0 + 20.0);
}

#[test]
fn test_no_connectors_when_spread_out() {
    let mut state = MatchState::new();
    state.heroes.push(hero("廉颇", "玩家", Side::Ally, Some((-20.0, 0.0))));
    state.heroes.push(hero("后羿", "路人1", Side::Enemy, Some((20.0, 0.0))));
    let scene = scene(&state);
    assert!(scene.connectors(Layer::SidePanels).is_empty());
    assert!(scene.connectors(Layer::BottomStrip).is_empty());
}

#[test]
fn test_objective_connector_when_hero_overlaps() {
    let mut state = MatchState::new();
    state.heroes.push(hero("后羿", "路人1", Side::Enemy, Some((10.5, -10.0))));
    state.objectives.push(objective(ObjectiveKind::Tyrant, Some((10.0, -10.0)), true));
    state.objectives.push(objective(ObjectiveKind::Overlord, Some((-40.0, 40.0)), true));
    let scene = scene(&state);

    let connectors = scene.connectors(Layer::BottomStrip);
    assert_eq!(connectors.len(), 1);
    let (from, to) = connectors[0];
    let slot = 1360.0 / 7.0;
    assert!((from.x - (4.0 * slot + slot / 2.0)).abs() < 1e-3);
    assert!((from.y - 1050.0).abs() < 1e-3);
    assert!((to.x - (280.0 + 70.0 * 800.0 / 120.0)).abs() < 1e-3);
}

#[test]
fn test_absent_objective_gets_no_connector_or_marker() {
    let mut state = MatchState::new();
    state.heroes.push(hero("后羿", "路人1", Side::Enemy, Some((10.0, -10.0))));
    let mut overlord = objective(ObjectiveKind::Overlord, Some((10.0, -10.0)), false);
    overlord.respawn_secs = Some(29);
    state.objectives.push(overlord);
    let scene = scene(&state);

    assert!(scene.connectors(Layer::BottomStrip).is_empty());
    assert_eq!(scene.layer(Layer::Objectives).count(), 0);
    assert!(scene.texts(Layer::BottomStrip).contains(&"29s后刷新"));
}

#[test]
fn test_bottom_strip_statuses() {
    let mut state = MatchState::new();
    state.objectives.push(objective(ObjectiveKind::Tyrant, None, true));
    state.objectives.push(objective(ObjectiveKind::StormDragon, None, false));
    let scene = scene(&state);
    let texts = scene.texts(Layer::BottomStrip);

    assert!(texts.contains(&"HP: 50%"));
    assert!(texts.contains(&"不存在"));
    assert_eq!(texts.iter().filter(|t| **t == "未知").count(), 5);
    assert_eq!(texts.iter().filter(|t| **t == "蓝Buff").count(), 2);
    // Unlocated objectives only appear in the strip
    assert_eq!(scene.layer(Layer::Objectives).count(), 0);
}

#[test]
fn test_top_bar_texts() {
    let mut state = MatchState::new();
    state.clock = "13:04".to_string();
    state.ally_kills = 5;
    state.enemy_kills = 3;
    state.ally_gold = 35210;
    let mut lianpo = hero("廉颇", "玩家", Side::Ally, None);
    lianpo.alive = false;
    let mut sunbin = hero("孙膑", "路人3", Side::Enemy, None);
    sunbin.alive = false;
    state.heroes.push(lianpo);
    state.heroes.push(sunbin);
    let scene = scene(&state);
    let texts = scene.texts(Layer::TopBar);

    for expected in ["13:04", "5", "3", "经济 35210", "经济 0", "阵亡: 廉颇(玩家)", "阵亡: 孙膑"] {
        assert!(texts.contains(&expected), "missing {:?} in {:?}", expected, texts);
    }
}

#[test]
fn test_cards_stack_per_side() {
    let mut state = MatchState::new();
    let mut lianpo = hero("廉颇", "玩家", Side::Ally, None);
    lianpo.hp = 0.64;
    lianpo.mana = 0.4;
    lianpo.gold = 8650;
    lianpo.kda = (3, 2, 7);
    lianpo.has_ultimate = false;
    lianpo.buffs = vec!["蓝buff".to_string()];
    lianpo.items = vec!["红莲斗篷".to_string(), "霸者重装".to_string()];
    state.heroes.push(lianpo);
    state.heroes.push(hero("貂蝉", "队友1", Side::Ally, None));
    let scene = scene(&state);
    let texts = scene.texts(Layer::SidePanels);

    assert!(texts.contains(&"廉颇 (玩家)"));
    assert!(texts.contains(&"HP: 64%   MP: 40%"));
    assert!(texts.contains(&"Gold: 8650  KDA: 3/2/7"));
    assert!(texts.contains(&"蓝"));
    // Missing item icons fall back to initials
    assert!(texts.contains(&"红"));
    assert!(texts.contains(&"霸"));

    let panels: Vec<_> = scene
        .layer(Layer::SidePanels)
        .filter_map(|c| match c {
            DrawCommand::FillRect { bounds, color } if *color == palette::PANEL => Some(*bounds),
            _ => None,
        })
        .collect();
    assert_eq!(panels.len(), 2);
    assert_eq!(panels[1].y - panels[0].y, 150.0);
    assert_eq!(panels[0].h, 120.0);
}

#[test]
fn test_hidden_hero_is_shrouded() {
    let mut state = MatchState::new();
    let mut lanlingwang = hero("兰陵王", "路人2", Side::Enemy, None);
    lanlingwang.visible = false;
    state.heroes.push(lanlingwang);
    let scene = scene(&state);

    assert!(scene.layer(Layer::SidePanels).any(|c| matches!(
        c,
        DrawCommand::FillRect { color, .. } if *color == palette::SHROUD
    )));
    assert_eq!(scene.layer(Layer::Heroes).count(), 0);
}

#[test]
fn test_destroyed_towers_are_skipped() {
    let mut state = MatchState::new();
    for (destroyed, x) in [(false, -30.0), (true, 30.0)] {
        state.towers.push(Tower {
            side: Side::Ally,
            lane: "上路".to_string(),
            tier: TowerTier::Outer,
            hp: 0.4,
            position: Position::new(x, 10.0),
            destroyed,
        });
    }
    let scene = scene(&state);
    let circles = scene
        .layer(Layer::Towers)
        .filter(|c| matches!(c, DrawCommand::Circle { .. }))
        .count();
    assert_eq!(circles, 1);
}
