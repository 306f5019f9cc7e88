//! Rasterizes a [`Scene`] onto a tiny-skia canvas.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::RgbaImage;
use tiny_skia::{
    ColorU8, FillRule, FilterQuality, LineCap, Paint, PathBuilder, Pattern, Pixmap, Rect,
    SpreadMode, Stroke, StrokeDash, Transform,
};
use tracing::warn;

use crate::error::{RenderError, Result};
use crate::scene::{Anchor, Bounds, Clip, DrawCommand, Outline, Point, Rgba, Scene};
use crate::text::TextPainter;

/// Offsets for an eight-way text halo
const HALO: [(f32, f32); 8] = [
    (-1.0, -1.0),
    (0.0, -1.0),
    (1.0, -1.0),
    (-1.0, 0.0),
    (1.0, 0.0),
    (-1.0, 1.0),
    (0.0, 1.0),
    (1.0, 1.0),
];

pub struct Compositor<'a> {
    canvas: Pixmap,
    text: &'a mut TextPainter,
    /// Decoded source images by path; `None` records a failed decode
    sources: HashMap<PathBuf, Option<RgbaImage>>,
}

impl<'a> Compositor<'a> {
    pub fn new(width: u32, height: u32, text: &'a mut TextPainter) -> Result<Self> {
        let canvas = Pixmap::new(width, height).ok_or(RenderError::Allocation(width, height))?;
        Ok(Self {
            canvas,
            text,
            sources: HashMap::new(),
        })
    }

    pub fn paint(mut self, scene: &Scene) -> RgbaImage {
        for (_, command) in scene.ordered() {
            self.execute(command);
        }
        to_image(&self.canvas)
    }

    fn execute(&mut self, command: &DrawCommand) {
        match command {
            DrawCommand::FillRect { bounds, color } => {
                if let Some(rect) = rect(bounds) {
                    self.canvas
                        .fill_rect(rect, &solid(*color), Transform::identity(), None);
                }
            }
            DrawCommand::StrokeRect { bounds, outline } => {
                if let Some(rect) = rect(bounds) {
                    let path = PathBuilder::from_rect(rect);
                    self.canvas.stroke_path(
                        &path,
                        &solid(outline.color),
                        &stroke(outline.width),
                        Transform::identity(),
                        None,
                    );
                }
            }
            DrawCommand::Circle {
                center,
                radius,
                fill,
                outline,
            } => self.circle(*center, *radius, *fill, *outline),
            DrawCommand::Line { from, to, outline } => {
                self.line(*from, *to, *outline, None);
            }
            DrawCommand::DashedLine {
                from,
                to,
                outline,
                dash,
                gap,
            } => self.line(*from, *to, *outline, StrokeDash::new(vec![*dash, *gap], 0.0)),
            DrawCommand::Text {
                text,
                at,
                size,
                color,
                anchor,
                halo,
            } => self.text(text, *at, *size, *color, *anchor, *halo),
            DrawCommand::Image {
                path,
                bounds,
                clip,
                grayscale,
                opacity,
                fallback,
            } => self.image(path, *bounds, *clip, *grayscale, *opacity, *fallback),
        }
    }

    fn circle(&mut self, center: Point, radius: f32, fill: Option<Rgba>, outline: Option<Outline>) {
        if let Some(color) = fill {
            if let Some(path) = PathBuilder::from_circle(center.x, center.y, radius) {
                self.canvas.fill_path(
                    &path,
                    &solid(color),
                    FillRule::Winding,
                    Transform::identity(),
                    None,
                );
            }
        }
        if let Some(outline) = outline {
            // Keep the ring inside the circle's footprint
            let inner = (radius - outline.width / 2.0).max(0.5);
            if let Some(path) = PathBuilder::from_circle(center.x, center.y, inner) {
                self.canvas.stroke_path(
                    &path,
                    &solid(outline.color),
                    &stroke(outline.width),
                    Transform::identity(),
                    None,
                );
            }
        }
    }

    fn line(&mut self, from: Point, to: Point, outline: Outline, dash: Option<StrokeDash>) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.x, from.y);
        pb.line_to(to.x, to.y);
        let Some(path) = pb.finish() else {
            return;
        };
        let mut stroke = stroke(outline.width);
        stroke.dash = dash;
        self.canvas.stroke_path(
            &path,
            &solid(outline.color),
            &stroke,
            Transform::identity(),
            None,
        );
    }

    fn text(
        &mut self,
        text: &str,
        at: Point,
        size: f32,
        color: Rgba,
        anchor: Anchor,
        halo: Option<Outline>,
    ) {
        if !self.text.has_fonts() || size <= 0.0 {
            return;
        }
        let (w, h) = self.text.measure(text, size);
        let (x, y) = match anchor {
            Anchor::TopLeft => (at.x, at.y),
            Anchor::Center => (at.x - w / 2.0, at.y - h / 2.0),
            Anchor::BottomCenter => (at.x - w / 2.0, at.y - h),
        };
        if let Some(halo) = halo {
            for (dx, dy) in HALO {
                self.text.draw(
                    &mut self.canvas,
                    text,
                    x + dx * halo.width,
                    y + dy * halo.width,
                    size,
                    halo.color,
                );
            }
        }
        self.text.draw(&mut self.canvas, text, x, y, size, color);
    }

    fn image(
        &mut self,
        path: &Path,
        bounds: Bounds,
        clip: Clip,
        grayscale: bool,
        opacity: f32,
        fallback: Option<Rgba>,
    ) {
        let x = bounds.x.round();
        let y = bounds.y.round();
        let w = bounds.w.round().max(1.0) as u32;
        let h = bounds.h.round().max(1.0) as u32;
        let clip_path = match clip {
            Clip::Square => Rect::from_xywh(x, y, w as f32, h as f32).map(PathBuilder::from_rect),
            Clip::Circle => {
                PathBuilder::from_circle(x + w as f32 / 2.0, y + h as f32 / 2.0, w.min(h) as f32 / 2.0)
            }
        };
        let Some(clip_path) = clip_path else {
            return;
        };

        let Some(icon) = self.icon(path, w, h, grayscale) else {
            if let Some(color) = fallback {
                self.canvas.fill_path(
                    &clip_path,
                    &solid(color),
                    FillRule::Winding,
                    Transform::identity(),
                    None,
                );
            }
            return;
        };

        let mut paint = Paint::default();
        paint.anti_alias = true;
        paint.shader = Pattern::new(
            icon.as_ref(),
            SpreadMode::Pad,
            FilterQuality::Nearest,
            opacity.clamp(0.0, 1.0),
            Transform::from_translate(x, y),
        );
        self.canvas.fill_path(
            &clip_path,
            &paint,
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    /// Decode (once per render), resize and optionally desaturate an icon
    fn icon(&mut self, path: &Path, w: u32, h: u32, grayscale: bool) -> Option<Pixmap> {
        let source = self
            .sources
            .entry(path.to_path_buf())
            .or_insert_with(|| match image::open(path) {
                Ok(img) => Some(img.to_rgba8()),
                Err(e) => {
                    warn!("Failed to decode {}: {}", path.display(), e);
                    None
                }
            })
            .as_ref()?;

        let mut resized = imageops::resize(source, w, h, FilterType::Lanczos3);
        if grayscale {
            desaturate(&mut resized);
        }
        to_pixmap(&resized)
    }
}

fn solid(color: Rgba) -> Paint<'static> {
    let [r, g, b, a] = color.0;
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

fn stroke(width: f32) -> Stroke {
    Stroke {
        width,
        line_cap: LineCap::Butt,
        ..Stroke::default()
    }
}

fn rect(bounds: &Bounds) -> Option<Rect> {
    Rect::from_xywh(bounds.x, bounds.y, bounds.w, bounds.h)
}

/// Luma conversion in place, alpha untouched
fn desaturate(img: &mut RgbaImage) {
    for pixel in img.pixels_mut() {
        let [r, g, b, _] = pixel.0;
        let luma = (0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b)).round() as u8;
        pixel.0[0] = luma;
        pixel.0[1] = luma;
        pixel.0[2] = luma;
    }
}

fn to_pixmap(img: &RgbaImage) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(img.width(), img.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(img.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Some(pixmap)
}

fn to_image(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    img
}
