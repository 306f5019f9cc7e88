//! Canvas geometry, the logical-to-pixel map transform and the overlap test.
//!
//! All base measurements are for scale 1.0 and grow linearly with the scale.

use crate::error::{RenderError, Result};
use crate::scene::{Bounds, Point};
use hok_state::Position;

pub const BASE_MAP_SIZE: f32 = 800.0;
pub const BASE_PANEL_WIDTH: f32 = 280.0;
pub const BASE_TOP_PADDING: f32 = 150.0;
pub const BASE_HEIGHT: f32 = 1180.0;
pub const BASE_BOTTOM_STRIP: f32 = 180.0;

/// Logical coordinates span `-LOGICAL_HALF_EXTENT..LOGICAL_HALF_EXTENT` on both axes
pub const LOGICAL_HALF_EXTENT: f64 = 60.0;
const SPAN: f64 = 2.0 * LOGICAL_HALF_EXTENT;

/// Pixel geometry of one render
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub scale: f32,
    pub width: u32,
    pub height: u32,
    /// Square mini-map region
    pub map: Bounds,
    /// Width of each side panel column
    pub panel_width: f32,
}

impl Layout {
    pub fn new(scale: f32) -> Result<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(RenderError::InvalidScale(scale));
        }
        let width = ((BASE_MAP_SIZE + 2.0 * BASE_PANEL_WIDTH) * scale) as u32;
        let height = (BASE_HEIGHT * scale) as u32;
        let map_size = (BASE_MAP_SIZE * scale) as u32;
        if width == 0 || height == 0 || map_size == 0 {
            return Err(RenderError::EmptyCanvas(scale));
        }

        let map_x = (width - map_size) / 2;
        Ok(Self {
            scale,
            width,
            height,
            map: Bounds::new(
                map_x as f32,
                BASE_TOP_PADDING * scale,
                map_size as f32,
                map_size as f32,
            ),
            panel_width: map_x as f32,
        })
    }

    /// Scale a base measurement
    pub fn s(&self, value: f32) -> f32 {
        value * self.scale
    }

    pub fn projection(&self) -> MapProjection {
        MapProjection::new(self.map)
    }
}

/// Affine map from logical game coordinates onto the mini-map square, y axis flipped
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapProjection {
    origin_x: f64,
    origin_y: f64,
    side: f64,
}

impl MapProjection {
    pub fn new(map: Bounds) -> Self {
        Self {
            origin_x: f64::from(map.x),
            origin_y: f64::from(map.y),
            side: f64::from(map.w),
        }
    }

    pub fn project(&self, pos: Position) -> (f64, f64) {
        (
            self.origin_x + (pos.x + LOGICAL_HALF_EXTENT) * self.side / SPAN,
            self.origin_y + (LOGICAL_HALF_EXTENT - pos.y) * self.side / SPAN,
        )
    }

    pub fn unproject(&self, px: f64, py: f64) -> Position {
        Position::new(
            (px - self.origin_x) * SPAN / self.side - LOGICAL_HALF_EXTENT,
            LOGICAL_HALF_EXTENT - (py - self.origin_y) * SPAN / self.side,
        )
    }

    pub fn to_point(&self, pos: Position) -> Point {
        let (x, y) = self.project(pos);
        Point::new(x as f32, y as f32)
    }
}

/// Whether two icons of `radius` centred at `a` and `b` touch
pub fn overlaps(a: Point, b: Point, radius: f32) -> bool {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt() < radius * 2.0
}
