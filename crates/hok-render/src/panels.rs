//! Hero cards in the left (ally) and right (enemy) columns.

use hok_state::{Hero, MatchState, Side};

use crate::map_layer::{hero_avatar, percent};
use crate::palette;
use crate::scene::{Anchor, Bounds, Clip, DrawCommand, Layer, Outline, Point, Rgba, Scene};
use crate::SceneContext;

const CARD_HEIGHT: f32 = 120.0;
const CARD_SPACING: f32 = 150.0;
const CARD_TOP: f32 = 150.0;
const AVATAR: f32 = 64.0;
const ITEM: f32 = 22.0;
const ITEM_STEP: f32 = 26.0;
const BUFF_STEP: f32 = 28.0;

pub fn draw(scene: &mut Scene, ctx: &SceneContext, state: &MatchState) {
    for side in [Side::Ally, Side::Enemy] {
        for (index, hero) in state.heroes_on(side).enumerate() {
            let card = card_bounds(ctx, side, index);
            draw_card(scene, ctx, hero, card);
        }
    }
}

/// Screen rectangle of the `index`-th card in a side's column
pub fn card_bounds(ctx: &SceneContext, side: Side, index: usize) -> Bounds {
    let layout = ctx.layout;
    let x = match side {
        Side::Ally => layout.s(20.0),
        Side::Enemy => layout.width as f32 - layout.panel_width + layout.s(20.0),
    };
    Bounds::new(
        x,
        layout.s(CARD_TOP) + index as f32 * layout.s(CARD_SPACING),
        layout.panel_width - layout.s(40.0),
        layout.s(CARD_HEIGHT),
    )
}

fn draw_card(scene: &mut Scene, ctx: &SceneContext, hero: &Hero, card: Bounds) {
    let layout = ctx.layout;
    let s = |v: f32| layout.s(v);

    scene.push(
        Layer::SidePanels,
        DrawCommand::FillRect {
            bounds: card,
            color: palette::PANEL,
        },
    );
    scene.push(
        Layer::SidePanels,
        DrawCommand::StrokeRect {
            bounds: card,
            outline: Outline {
                color: palette::PANEL_BORDER,
                width: s(1.0).max(1.0),
            },
        },
    );

    hero_avatar(
        scene,
        Layer::SidePanels,
        ctx,
        hero,
        Bounds::new(card.x + s(10.0), card.y + s(10.0), s(AVATAR), s(AVATAR)),
        Clip::Square,
    );

    let text_x = card.x + s(80.0);
    let lines = [
        (
            format!("{} ({})", hero.name, hero.player),
            s(10.0),
            s(16.0),
            palette::WHITE,
        ),
        (
            format!("HP: {}%   MP: {}%", percent(hero.hp), percent(hero.mana)),
            s(32.0),
            s(12.0),
            palette::LABEL,
        ),
        (
            format!(
                "Gold: {}  KDA: {}/{}/{}",
                hero.gold,
                hero.kills(),
                hero.deaths(),
                hero.assists()
            ),
            s(50.0),
            s(12.0),
            palette::LABEL_DIM,
        ),
    ];
    for (text, dy, size, color) in lines {
        scene.push(
            Layer::SidePanels,
            DrawCommand::text(
                text,
                Point::new(text_x, card.y + dy),
                size,
                color,
                Anchor::TopLeft,
            ),
        );
    }

    let status_y = card.y + s(68.0);
    let dot = s(10.0);
    let ult = if hero.has_ultimate {
        palette::ULT_READY
    } else {
        palette::ULT_SPENT
    };
    marker(scene, Point::new(text_x, status_y), dot, ult);
    scene.push(
        Layer::SidePanels,
        DrawCommand::text(
            "Ult",
            Point::new(text_x + dot + s(2.0), status_y - s(2.0)),
            s(12.0),
            palette::WHITE,
            Anchor::TopLeft,
        ),
    );

    let mut buff_x = text_x + s(35.0);
    for buff in &hero.buffs {
        let (label, color) = palette::buff(buff);
        marker(scene, Point::new(buff_x, status_y), dot, color);
        scene.push(
            Layer::SidePanels,
            DrawCommand::text(
                label,
                Point::new(buff_x + dot + s(4.0), status_y - s(2.0)),
                s(12.0),
                color,
                Anchor::TopLeft,
            ),
        );
        buff_x += s(BUFF_STEP);
    }

    let mut item_x = card.x + s(10.0);
    let item_y = card.y + s(80.0);
    for item in &hero.items {
        let slot = Bounds::new(item_x, item_y, s(ITEM), s(ITEM));
        match ctx.assets.item_icon(item) {
            Some(path) => scene.push(
                Layer::SidePanels,
                DrawCommand::Image {
                    path,
                    bounds: slot,
                    clip: Clip::Square,
                    grayscale: false,
                    opacity: 1.0,
                    fallback: Some(palette::SLOT),
                },
            ),
            None => {
                scene.push(
                    Layer::SidePanels,
                    DrawCommand::FillRect {
                        bounds: slot,
                        color: palette::SLOT,
                    },
                );
                if let Some(initial) = item.chars().next() {
                    scene.push(
                        Layer::SidePanels,
                        DrawCommand::text(
                            initial.to_string(),
                            slot.center(),
                            s(12.0),
                            palette::LABEL,
                            Anchor::Center,
                        ),
                    );
                }
            }
        }
        item_x += s(ITEM_STEP);
    }

    if ctx.placements.hero_crowded(&hero.name, s(24.0)) {
        if let Some(target) = ctx.placements.hero(&hero.name) {
            let color = if hero.is_subject() {
                palette::SUBJECT
            } else {
                palette::tower(hero.side)
            };
            scene.push(
                Layer::SidePanels,
                DrawCommand::DashedLine {
                    from: edge_anchor(card, hero.side),
                    to: target,
                    outline: Outline {
                        color,
                        width: s(1.5).max(1.0),
                    },
                    dash: s(10.0),
                    gap: s(8.0),
                },
            );
        }
    }
}

/// Middle of the card edge that faces the map
fn edge_anchor(card: Bounds, side: Side) -> Point {
    let y = card.y + card.h / 2.0;
    match side {
        Side::Ally => Point::new(card.x + card.w, y),
        Side::Enemy => Point::new(card.x, y),
    }
}

/// Small filled disc whose bounding box starts at `top_left`
fn marker(scene: &mut Scene, top_left: Point, size: f32, color: Rgba) {
    scene.push(
        Layer::SidePanels,
        DrawCommand::Circle {
            center: Point::new(top_left.x + size / 2.0, top_left.y + size / 2.0),
            radius: size / 2.0,
            fill: Some(color),
            outline: None,
        },
    );
}
