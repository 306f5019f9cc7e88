//! Score bar above the map and the objective status strip below it.

use std::collections::HashMap;

use hok_state::{Hero, MatchState, NeutralObjective, ObjectiveKind, Side};

use crate::map_layer::percent;
use crate::palette;
use crate::scene::{Anchor, DrawCommand, Layer, Outline, Point, Rgba, Scene};
use crate::SceneContext;

pub fn draw_top_bar(scene: &mut Scene, ctx: &SceneContext, state: &MatchState) {
    let layout = ctx.layout;
    let s = |v: f32| layout.s(v);
    let cx = layout.width as f32 / 2.0;

    scene.push(
        Layer::TopBar,
        DrawCommand::text(
            state.clock.clone(),
            Point::new(cx, s(40.0)),
            s(32.0),
            palette::WHITE,
            Anchor::Center,
        ),
    );

    for (side, dx) in [(Side::Ally, -150.0), (Side::Enemy, 150.0)] {
        let x = cx + s(dx);
        let color = palette::tower(side);
        scene.push(
            Layer::TopBar,
            DrawCommand::text(
                state.kills(side).to_string(),
                Point::new(x, s(40.0)),
                s(40.0),
                color,
                Anchor::Center,
            ),
        );
        scene.push(
            Layer::TopBar,
            DrawCommand::text(
                format!("经济 {}", state.gold(side)),
                Point::new(x, s(80.0)),
                s(20.0),
                palette::GOLD,
                Anchor::Center,
            ),
        );

        let fallen: Vec<String> = state
            .heroes_on(side)
            .filter(|h| !h.alive)
            .map(fallen_label)
            .collect();
        if !fallen.is_empty() {
            scene.push(
                Layer::TopBar,
                DrawCommand::text(
                    format!("阵亡: {}", fallen.join(" ")),
                    Point::new(x, s(110.0)),
                    s(16.0),
                    palette::FALLEN,
                    Anchor::Center,
                ),
            );
        }
    }
}

fn fallen_label(hero: &Hero) -> String {
    if hero.is_subject() {
        format!("{}({})", hero.name, hero.player)
    } else {
        hero.name.clone()
    }
}

pub fn draw_bottom_strip(scene: &mut Scene, ctx: &SceneContext, state: &MatchState) {
    let layout = ctx.layout;
    let s = |v: f32| layout.s(v);

    let strip_height = s(180.0);
    let strip_top = layout.height as f32 - strip_height;
    let slot_width = layout.width as f32 / ObjectiveKind::STRIP_ORDER.len() as f32;
    let cy = strip_top + strip_height / 2.0;
    let radius = s(20.0);

    let statuses: HashMap<ObjectiveKind, &NeutralObjective> =
        state.objectives.iter().map(|o| (o.kind, o)).collect();

    for (index, kind) in ObjectiveKind::STRIP_ORDER.into_iter().enumerate() {
        let cx = index as f32 * slot_width + slot_width / 2.0;
        let badge = Point::new(cx, cy - s(20.0));
        let title = kind.title();
        let initial = title.chars().next().map(String::from).unwrap_or_default();

        let (fill, ring, glyph, title_color, status, status_color) = match statuses.get(&kind) {
            Some(objective) if objective.exists => (
                Some(palette::objective_badge(kind)),
                palette::WHITE,
                initial,
                palette::WHITE,
                format!("HP: {}%", percent(objective.hp)),
                palette::LABEL,
            ),
            Some(objective) => (
                Some(palette::ABSENT),
                palette::WHITE,
                initial,
                palette::WHITE,
                absent_status(objective),
                palette::LABEL,
            ),
            None => (
                None,
                palette::UNKNOWN_RING,
                "?".to_string(),
                palette::ABSENT,
                "未知".to_string(),
                palette::ABSENT,
            ),
        };

        scene.push(
            Layer::BottomStrip,
            DrawCommand::Circle {
                center: badge,
                radius,
                fill,
                outline: Some(Outline {
                    color: ring,
                    width: s(2.0),
                }),
            },
        );
        let glyph_color: Rgba = if fill.is_some() {
            palette::WHITE
        } else {
            palette::ABSENT
        };
        scene.push(
            Layer::BottomStrip,
            DrawCommand::text(glyph, badge, s(16.0), glyph_color, Anchor::Center),
        );
        scene.push(
            Layer::BottomStrip,
            DrawCommand::text(
                title,
                Point::new(cx, cy + s(20.0)),
                s(16.0),
                title_color,
                Anchor::Center,
            ),
        );
        scene.push(
            Layer::BottomStrip,
            DrawCommand::text(
                status,
                Point::new(cx, cy + s(45.0)),
                s(14.0),
                status_color,
                Anchor::Center,
            ),
        );

        let present = statuses.get(&kind).is_some_and(|o| o.exists);
        if present && ctx.placements.objective_crowded(kind, s(15.0) + s(16.0)) {
            if let Some(target) = ctx.placements.objective(kind) {
                scene.push(
                    Layer::BottomStrip,
                    DrawCommand::DashedLine {
                        from: Point::new(cx, badge.y - radius),
                        to: target,
                        outline: Outline {
                            color: palette::CONNECTOR,
                            width: s(2.0),
                        },
                        dash: s(8.0),
                        gap: s(5.0),
                    },
                );
            }
        }
    }
}

fn absent_status(objective: &NeutralObjective) -> String {
    match objective.respawn_secs {
        Some(secs) => format!("{}s后刷新", secs),
        None => "不存在".to_string(),
    }
}
