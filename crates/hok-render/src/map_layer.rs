//! Mini-map: background, towers, objectives, heroes and minion waves.

use std::collections::HashMap;

use hok_state::{Hero, MatchState, ObjectiveKind};

use crate::layout::{overlaps, MapProjection};
use crate::palette;
use crate::scene::{Anchor, Bounds, Clip, DrawCommand, Layer, Outline, Point, Rgba, Scene};
use crate::SceneContext;

/// Pixel centres of everything drawn on the map that a panel may point at.
///
/// Keys are hero names and objective kinds; a repeated key keeps the last entry.
#[derive(Debug, Clone, Default)]
pub struct MapPlacements {
    heroes: HashMap<String, Point>,
    objectives: HashMap<ObjectiveKind, Point>,
}

impl MapPlacements {
    pub fn locate(state: &MatchState, projection: &MapProjection) -> Self {
        let mut placements = Self::default();
        for hero in &state.heroes {
            if let Some(pos) = hero.position {
                placements
                    .heroes
                    .insert(hero.name.clone(), projection.to_point(pos));
            }
        }
        for objective in &state.objectives {
            if objective.exists && objective.located {
                placements
                    .objectives
                    .insert(objective.kind, projection.to_point(objective.position));
            }
        }
        placements
    }

    pub fn hero(&self, name: &str) -> Option<Point> {
        self.heroes.get(name).copied()
    }

    pub fn objective(&self, kind: ObjectiveKind) -> Option<Point> {
        self.objectives.get(&kind).copied()
    }

    /// Whether the named hero's icon touches any other hero's icon
    pub fn hero_crowded(&self, name: &str, radius: f32) -> bool {
        let Some(at) = self.hero(name) else {
            return false;
        };
        self.heroes
            .iter()
            .any(|(other, p)| other != name && overlaps(at, *p, radius))
    }

    /// Whether an objective marker touches any hero icon
    pub fn objective_crowded(&self, kind: ObjectiveKind, radius: f32) -> bool {
        let Some(at) = self.objective(kind) else {
            return false;
        };
        self.heroes.values().any(|p| overlaps(at, *p, radius))
    }
}

pub fn draw_background(scene: &mut Scene, ctx: &SceneContext) {
    let layout = ctx.layout;
    scene.push(
        Layer::Background,
        DrawCommand::FillRect {
            bounds: Bounds::new(0.0, 0.0, layout.width as f32, layout.height as f32),
            color: palette::CANVAS,
        },
    );

    let map = layout.map;
    if let Some(path) = &ctx.assets.map_art {
        scene.push(
            Layer::Background,
            DrawCommand::Image {
                path: path.clone(),
                bounds: map,
                clip: Clip::Square,
                grayscale: false,
                opacity: 1.0,
                fallback: Some(palette::MAP_FLOOR),
            },
        );
        return;
    }

    scene.push(
        Layer::Background,
        DrawCommand::FillRect {
            bounds: map,
            color: palette::MAP_FLOOR,
        },
    );
    scene.push(
        Layer::Background,
        DrawCommand::StrokeRect {
            bounds: map,
            outline: Outline {
                color: palette::MAP_BORDER,
                width: layout.s(1.0).max(1.0),
            },
        },
    );

    let (left, top) = (map.x, map.y);
    let (right, bottom) = (map.x + map.w, map.y + map.h);
    let river = Outline {
        color: palette::RIVER,
        width: layout.s(40.0),
    };
    scene.push(
        Layer::Background,
        DrawCommand::Line {
            from: Point::new(left, top),
            to: Point::new(right, bottom),
            outline: river,
        },
    );

    let lane = Outline {
        color: palette::LANE,
        width: layout.s(10.0),
    };
    let lanes = [
        // Top and left edges, bottom and right edges, then the middle diagonal
        (Point::new(left, bottom), Point::new(left, top)),
        (Point::new(left, top), Point::new(right, top)),
        (Point::new(left, bottom), Point::new(right, bottom)),
        (Point::new(right, bottom), Point::new(right, top)),
        (Point::new(left, bottom), Point::new(right, top)),
    ];
    for (from, to) in lanes {
        scene.push(
            Layer::Background,
            DrawCommand::Line {
                from,
                to,
                outline: lane,
            },
        );
    }
}

pub fn draw_towers(scene: &mut Scene, ctx: &SceneContext, state: &MatchState) {
    let layout = ctx.layout;
    let projection = layout.projection();
    for tower in state.towers.iter().filter(|t| !t.destroyed) {
        let center = projection.to_point(tower.position);
        let color = palette::tower(tower.side);
        scene.push(
            Layer::Towers,
            DrawCommand::Circle {
                center,
                radius: layout.s(12.0),
                fill: Some(color),
                outline: Some(Outline {
                    color: palette::WHITE,
                    width: layout.s(1.0),
                }),
            },
        );
        bar(
            scene,
            Layer::Towers,
            Bounds::new(
                center.x - layout.s(15.0),
                center.y - layout.s(20.0),
                layout.s(30.0),
                layout.s(4.0),
            ),
            tower.hp,
            color,
        );
    }
}

pub fn draw_objectives(scene: &mut Scene, ctx: &SceneContext, state: &MatchState) {
    let layout = ctx.layout;
    let projection = layout.projection();
    for objective in state.objectives.iter().filter(|o| o.exists && o.located) {
        let center = projection.to_point(objective.position);
        scene.push(
            Layer::Objectives,
            DrawCommand::Circle {
                center,
                radius: layout.s(12.0),
                fill: Some(palette::objective(objective.kind)),
                outline: Some(Outline {
                    color: palette::WHITE,
                    width: layout.s(2.0),
                }),
            },
        );
        scene.push(
            Layer::Objectives,
            DrawCommand::text(
                objective.kind.glyph(),
                center,
                layout.s(14.0),
                palette::WHITE,
                Anchor::Center,
            ),
        );
        bar(
            scene,
            Layer::Objectives,
            Bounds::new(
                center.x - layout.s(12.0),
                center.y - layout.s(18.0),
                layout.s(24.0),
                layout.s(4.0),
            ),
            objective.hp,
            palette::HP,
        );
    }
}

pub fn draw_heroes(scene: &mut Scene, ctx: &SceneContext, state: &MatchState) {
    let layout = ctx.layout;
    let projection = layout.projection();
    for hero in &state.heroes {
        let Some(pos) = hero.position else {
            continue;
        };
        let center = projection.to_point(pos);
        let ring = if hero.is_subject() {
            palette::SUBJECT
        } else {
            palette::tower(hero.side)
        };

        if ctx.assets.hero_icon(&hero.name).is_some() {
            scene.push(
                Layer::Heroes,
                DrawCommand::Circle {
                    center,
                    radius: layout.s(24.0) + layout.s(3.0),
                    fill: Some(ring),
                    outline: None,
                },
            );
            hero_avatar(
                scene,
                Layer::Heroes,
                ctx,
                hero,
                Bounds::centered(center, layout.s(48.0)),
                Clip::Circle,
            );
        } else {
            scene.push(
                Layer::Heroes,
                DrawCommand::Circle {
                    center,
                    radius: layout.s(15.0),
                    fill: Some(palette::PLACEHOLDER),
                    outline: Some(Outline {
                        color: ring,
                        width: layout.s(2.0),
                    }),
                },
            );
            if !hero.visible {
                let disc = Bounds::centered(center, layout.s(30.0));
                shroud(scene, Layer::Heroes, ctx, disc, Clip::Circle);
            }
        }

        bar(
            scene,
            Layer::Heroes,
            Bounds::new(
                center.x - layout.s(15.0),
                center.y + layout.s(28.0),
                layout.s(30.0),
                layout.s(4.0),
            ),
            hero.hp,
            palette::HP,
        );
        bar(
            scene,
            Layer::Heroes,
            Bounds::new(
                center.x - layout.s(15.0),
                center.y + layout.s(32.0),
                layout.s(30.0),
                layout.s(2.0),
            ),
            hero.mana,
            palette::MANA,
        );

        if !hero.player.is_empty() {
            scene.push(
                Layer::Heroes,
                DrawCommand::outlined_text(
                    hero.player.clone(),
                    Point::new(center.x, center.y - layout.s(32.0)),
                    layout.s(18.0),
                    palette::WHITE,
                    Anchor::BottomCenter,
                    Outline {
                        color: palette::BLACK,
                        width: layout.s(1.0),
                    },
                ),
            );
        }
    }
}

pub fn draw_minions(scene: &mut Scene, ctx: &SceneContext, state: &MatchState) {
    let layout = ctx.layout;
    let projection = layout.projection();
    for wave in &state.minion_waves {
        let center = projection.to_point(wave.position);
        scene.push(
            Layer::Minions,
            DrawCommand::Circle {
                center,
                radius: layout.s(6.0),
                fill: Some(palette::minion(wave.side)),
                outline: None,
            },
        );
        scene.push(
            Layer::Minions,
            DrawCommand::outlined_text(
                format!("{} | {}%", wave.count, percent(wave.hp)),
                Point::new(center.x, center.y - layout.s(10.0)),
                layout.s(12.0),
                palette::WHITE,
                Anchor::BottomCenter,
                Outline {
                    color: palette::BLACK,
                    width: layout.s(1.0),
                },
            ),
        );
    }
}

/// Hero portrait clipped to `clip`, greyed when dead and shrouded when unseen
pub(crate) fn hero_avatar(
    scene: &mut Scene,
    layer: Layer,
    ctx: &SceneContext,
    hero: &Hero,
    bounds: Bounds,
    clip: Clip,
) {
    match ctx.assets.hero_icon(&hero.name) {
        Some(path) => scene.push(
            layer,
            DrawCommand::Image {
                path,
                bounds,
                clip,
                grayscale: !hero.alive,
                opacity: 1.0,
                fallback: Some(palette::PLACEHOLDER),
            },
        ),
        None => {
            scene.push(
                layer,
                DrawCommand::FillRect {
                    bounds,
                    color: palette::PLACEHOLDER,
                },
            );
            if let Some(initial) = hero.name.chars().next() {
                scene.push(
                    layer,
                    DrawCommand::text(
                        initial.to_string(),
                        bounds.center(),
                        bounds.h * 0.45,
                        palette::WHITE,
                        Anchor::Center,
                    ),
                );
            }
        }
    }
    if !hero.visible {
        shroud(scene, layer, ctx, bounds, clip);
    }
}

/// 80% invisibility overlay, or a translucent dark disc when the overlay asset is missing
fn shroud(scene: &mut Scene, layer: Layer, ctx: &SceneContext, bounds: Bounds, clip: Clip) {
    match &ctx.assets.invisible_overlay {
        Some(path) => scene.push(
            layer,
            DrawCommand::Image {
                path: path.clone(),
                bounds,
                clip,
                grayscale: false,
                opacity: 0.8,
                fallback: Some(palette::SHROUD),
            },
        ),
        None => match clip {
            Clip::Circle => scene.push(
                layer,
                DrawCommand::Circle {
                    center: bounds.center(),
                    radius: bounds.w / 2.0,
                    fill: Some(palette::SHROUD),
                    outline: None,
                },
            ),
            Clip::Square => scene.push(
                layer,
                DrawCommand::FillRect {
                    bounds,
                    color: palette::SHROUD,
                },
            ),
        },
    }
}

/// Track plus a fill proportional to `fraction`
fn bar(scene: &mut Scene, layer: Layer, bounds: Bounds, fraction: f64, color: Rgba) {
    scene.push(
        layer,
        DrawCommand::FillRect {
            bounds,
            color: palette::BAR_TRACK,
        },
    );
    let fraction = fraction.clamp(0.0, 1.0) as f32;
    if fraction > 0.0 {
        scene.push(
            layer,
            DrawCommand::FillRect {
                bounds: Bounds::new(bounds.x, bounds.y, bounds.w * fraction, bounds.h),
                color,
            },
        );
    }
}

/// Whole percent for display
pub(crate) fn percent(fraction: f64) -> i64 {
    (fraction * 100.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Layout;
    use hok_state::{NeutralObjective, Position, Side};

    fn hero_at(name: &str, x: f64, y: f64) -> Hero {
        let mut hero = Hero::new(name, "", Side::Ally);
        hero.position = Some(Position::new(x, y));
        hero
    }

    #[test]
    fn test_hero_crowding_ignores_self() {
        let projection = Layout::new(1.0).unwrap().projection();
        let mut state = MatchState::new();
        state.heroes.push(hero_at("孙尚香", 0.0, 0.0));
        state.heroes.push(hero_at("妲己", 30.0, 30.0));
        let placements = MapPlacements::locate(&state, &projection);
        assert!(!placements.hero_crowded("孙尚香", 24.0));

        state.heroes.push(hero_at("亚瑟", 1.0, 1.0));
        let placements = MapPlacements::locate(&state, &projection);
        assert!(placements.hero_crowded("孙尚香", 24.0));
        assert!(placements.hero_crowded("亚瑟", 24.0));
        assert!(!placements.hero_crowded("妲己", 24.0));
        assert!(!placements.hero_crowded("不存在", 24.0));
    }

    #[test]
    fn test_unlocated_objectives_are_not_placed() {
        let projection = Layout::new(1.0).unwrap().projection();
        let mut state = MatchState::new();
        state.objectives.push(NeutralObjective {
            kind: ObjectiveKind::Tyrant,
            position: Position::ORIGIN,
            located: false,
            hp: 1.0,
            exists: true,
            respawn_secs: None,
            description: String::new(),
        });
        let placements = MapPlacements::locate(&state, &projection);
        assert_eq!(placements.objective(ObjectiveKind::Tyrant), None);
        assert!(!placements.objective_crowded(ObjectiveKind::Tyrant, 31.0));
    }

    #[test]
    fn test_percent_rounds() {
        assert_eq!(percent(0.29), 29);
        assert_eq!(percent(1.0), 100);
        assert_eq!(percent(0.0), 0);
    }
}
