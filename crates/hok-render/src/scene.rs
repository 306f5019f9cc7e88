//! Declarative draw list.
//!
//! Builders push commands tagged with a [`Layer`]; the compositor consumes
//! them in layer order, keeping push order within a layer.

use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const fn hex(rgb: u32) -> Self {
        Self([(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8, 255])
    }

    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self([self.0[0], self.0[1], self.0[2], alpha])
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Square of side `size` centred on `center`
    pub fn centered(center: Point, size: f32) -> Self {
        Self::new(center.x - size / 2.0, center.y - size / 2.0, size, size)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }
}

/// Paint order, back to front
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    Background,
    Towers,
    Objectives,
    Heroes,
    Minions,
    SidePanels,
    TopBar,
    BottomStrip,
}

/// Which point of a text block the `at` coordinate pins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    Center,
    BottomCenter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clip {
    Square,
    Circle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outline {
    pub color: Rgba,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        bounds: Bounds,
        color: Rgba,
    },
    StrokeRect {
        bounds: Bounds,
        outline: Outline,
    },
    Circle {
        center: Point,
        radius: f32,
        fill: Option<Rgba>,
        outline: Option<Outline>,
    },
    Line {
        from: Point,
        to: Point,
        outline: Outline,
    },
    DashedLine {
        from: Point,
        to: Point,
        outline: Outline,
        dash: f32,
        gap: f32,
    },
    Text {
        text: String,
        at: Point,
        size: f32,
        color: Rgba,
        anchor: Anchor,
        halo: Option<Outline>,
    },
    /// Image file resized into `bounds`; `fallback` fills the clip shape when decoding fails
    Image {
        path: PathBuf,
        bounds: Bounds,
        clip: Clip,
        grayscale: bool,
        opacity: f32,
        fallback: Option<Rgba>,
    },
}

impl DrawCommand {
    pub fn text(text: impl Into<String>, at: Point, size: f32, color: Rgba, anchor: Anchor) -> Self {
        DrawCommand::Text {
            text: text.into(),
            at,
            size,
            color,
            anchor,
            halo: None,
        }
    }

    /// Same as [`DrawCommand::text`] with a contrasting outline
    pub fn outlined_text(
        text: impl Into<String>,
        at: Point,
        size: f32,
        color: Rgba,
        anchor: Anchor,
        halo: Outline,
    ) -> Self {
        DrawCommand::Text {
            text: text.into(),
            at,
            size,
            color,
            anchor,
            halo: Some(halo),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            DrawCommand::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    width: u32,
    height: u32,
    commands: Vec<(Layer, DrawCommand)>,
}

impl Scene {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn push(&mut self, layer: Layer, command: DrawCommand) {
        self.commands.push((layer, command));
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Commands in paint order
    pub fn ordered(&self) -> Vec<(Layer, &DrawCommand)> {
        let mut ordered: Vec<_> = self.commands.iter().map(|(l, c)| (*l, c)).collect();
        ordered.sort_by_key(|(layer, _)| *layer);
        ordered
    }

    pub fn layer(&self, layer: Layer) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(move |(l, _)| *l == layer)
            .map(|(_, c)| c)
    }

    pub fn texts(&self, layer: Layer) -> Vec<&str> {
        self.layer(layer).filter_map(DrawCommand::as_text).collect()
    }

    pub fn connectors(&self, layer: Layer) -> Vec<(Point, Point)> {
        self.layer(layer)
            .filter_map(|c| match c {
                DrawCommand::DashedLine { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }
}
