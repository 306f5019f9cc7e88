//! Glyph shaping and rasterization through cosmic-text.

use std::path::Path;

use cosmic_text::{fontdb, Attrs, Buffer, Color, Family, FontSystem, Metrics, Shaping, SwashCache};
use tiny_skia::{Paint, Pixmap, Rect, Transform};
use tracing::{debug, warn};

use crate::scene::Rgba;

/// Owns the font database and glyph cache shared by every render
pub struct TextPainter {
    font_system: FontSystem,
    swash_cache: SwashCache,
    /// Family of the bundled CJK font, preferred over system fonts
    family: Option<String>,
}

impl TextPainter {
    pub fn new(font_path: Option<&Path>, system_fonts: bool) -> Self {
        let mut db = fontdb::Database::new();
        let mut family = None;

        if let Some(path) = font_path {
            match db.load_font_file(path) {
                Ok(()) => {
                    family = db
                        .faces()
                        .next()
                        .and_then(|face| face.families.first())
                        .map(|(name, _)| name.clone());
                    debug!("Loaded font {} ({:?})", path.display(), family);
                }
                Err(e) => warn!("Failed to load font {}: {}", path.display(), e),
            }
        }
        if system_fonts {
            db.load_system_fonts();
        }
        if db.is_empty() {
            warn!("No fonts available, labels will be skipped");
        }

        Self {
            font_system: FontSystem::new_with_locale_and_db("zh-CN".to_string(), db),
            swash_cache: SwashCache::new(),
            family,
        }
    }

    /// A painter with no fonts; every draw is a no-op
    pub fn disabled() -> Self {
        Self::new(None, false)
    }

    pub fn has_fonts(&self) -> bool {
        !self.font_system.db().is_empty()
    }

    fn shape(&mut self, text: &str, size: f32) -> Buffer {
        let mut buffer = Buffer::new(&mut self.font_system, Metrics::new(size, size * 1.2));
        let attrs = match &self.family {
            Some(name) => Attrs::new().family(Family::Name(name.as_str())),
            None => Attrs::new(),
        };
        buffer.set_size(&mut self.font_system, None, None);
        buffer.set_text(&mut self.font_system, text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(&mut self.font_system, false);
        buffer
    }

    /// Width and height of `text` laid out on one line
    pub fn measure(&mut self, text: &str, size: f32) -> (f32, f32) {
        if !self.has_fonts() || text.is_empty() {
            return (0.0, 0.0);
        }
        let buffer = self.shape(text, size);
        buffer.layout_runs().fold((0.0f32, 0.0f32), |(w, h), run| {
            (w.max(run.line_w), h + run.line_height)
        })
    }

    /// Rasterize `text` with its layout box's top-left corner at (`x`, `y`)
    pub fn draw(&mut self, pixmap: &mut Pixmap, text: &str, x: f32, y: f32, size: f32, color: Rgba) {
        if !self.has_fonts() || text.is_empty() {
            return;
        }
        let buffer = self.shape(text, size);
        let [r, g, b, a] = color.0;
        buffer.draw(
            &mut self.font_system,
            &mut self.swash_cache,
            Color::rgba(r, g, b, a),
            |gx, gy, w, h, glyph| {
                if glyph.a() == 0 {
                    return;
                }
                let Some(rect) = Rect::from_xywh(x + gx as f32, y + gy as f32, w as f32, h as f32)
                else {
                    return;
                };
                let mut paint = Paint::default();
                paint.set_color_rgba8(glyph.r(), glyph.g(), glyph.b(), glyph.a());
                paint.anti_alias = false;
                pixmap.fill_rect(rect, &paint, Transform::identity(), None);
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE_FONT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/FiraMono-Medium.ttf");

    fn fixture_painter() -> TextPainter {
        TextPainter::new(Some(Path::new(FIXTURE_FONT)), false)
    }

    #[test]
    fn test_disabled_painter_is_inert() {
        let mut painter = TextPainter::disabled();
        assert!(!painter.has_fonts());
        assert_eq!(painter.measure("主宰", 16.0), (0.0, 0.0));

        let mut pixmap = Pixmap::new(8, 8).unwrap();
        painter.draw(&mut pixmap, "主宰", 0.0, 0.0, 16.0, Rgba::hex(0xffffff));
        assert!(pixmap.pixels().iter().all(|p| p.alpha() == 0));
    }

    #[test]
    fn test_unreadable_font_file_is_skipped() {
        let painter = TextPainter::new(Some(Path::new("/nonexistent/font.ttf")), false);
        assert!(!painter.has_fonts());
    }

    #[test]
    fn test_bundled_font_measures() {
        let mut painter = fixture_painter();
        assert!(painter.has_fonts());
        assert!(painter.family.is_some());

        let (w, h) = painter.measure("13:04", 32.0);
        assert!(w > 0.0 && h > 0.0);
        let (wider, _) = painter.measure("13:04 13:04", 32.0);
        assert!(wider > w);
        let (larger, _) = painter.measure("13:04", 64.0);
        assert!(larger > w);
    }

    #[test]
    fn test_bundled_font_draws_inside_layout_box() {
        let mut painter = fixture_painter();
        let mut pixmap = Pixmap::new(200, 80).unwrap();
        let (w, h) = painter.measure("Gold 8650", 20.0);
        painter.draw(&mut pixmap, "Gold 8650", 10.0, 10.0, 20.0, Rgba::hex(0xffffff));

        let painted: Vec<(u32, u32)> = pixmap
            .pixels()
            .iter()
            .enumerate()
            .filter(|(_, p)| p.alpha() > 0)
            .map(|(i, _)| (i as u32 % 200, i as u32 / 200))
            .collect();
        assert!(!painted.is_empty());
        for (x, y) in painted {
            assert!(x as f32 >= 8.0 && x as f32 <= 10.0 + w + 2.0, "x {} outside", x);
            assert!(y as f32 >= 8.0 && y as f32 <= 10.0 + h + 2.0, "y {} outside", y);
        }
    }
}
