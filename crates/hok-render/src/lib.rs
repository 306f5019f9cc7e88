//! Composes a match report image from a [`MatchState`].
//!
//! Rendering is split in two: [`build_scene`] turns the state into a layered
//! list of draw commands, and the compositor rasterizes that list. The scene
//! is plain data, so layout decisions can be checked without pixels.

pub mod compositor;
pub mod error;
pub mod hud;
pub mod layout;
pub mod map_layer;
pub mod palette;
pub mod panels;
pub mod scene;
pub mod text;

use std::path::Path;
use std::sync::Arc;

use hok_data::AssetLibrary;
use hok_state::MatchState;
use image::RgbaImage;

pub use error::{RenderError, Result};
pub use layout::{overlaps, Layout, MapProjection};
pub use map_layer::MapPlacements;
pub use scene::{DrawCommand, Layer, Scene};

use compositor::Compositor;
use text::TextPainter;

/// Preset output scales offered by the CLI
pub const SCALE_PRESETS: [f32; 3] = [1.0, 2.0, 3.0];

#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub scale: f32,
    /// Fall back to the system font database when the bundled font is missing
    pub system_fonts: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            scale: 2.0,
            system_fonts: true,
        }
    }
}

/// Everything a scene builder reads while laying out one frame
pub struct SceneContext<'a> {
    pub layout: &'a Layout,
    pub assets: &'a AssetLibrary,
    pub placements: MapPlacements,
}

/// Lay out every draw command for `state` at `scale`
pub fn build_scene(state: &MatchState, assets: &AssetLibrary, scale: f32) -> Result<Scene> {
    let layout = Layout::new(scale)?;
    let ctx = SceneContext {
        layout: &layout,
        assets,
        placements: MapPlacements::locate(state, &layout.projection()),
    };

    let mut scene = Scene::new(layout.width, layout.height);
    map_layer::draw_background(&mut scene, &ctx);
    map_layer::draw_towers(&mut scene, &ctx, state);
    map_layer::draw_objectives(&mut scene, &ctx, state);
    map_layer::draw_heroes(&mut scene, &ctx, state);
    map_layer::draw_minions(&mut scene, &ctx, state);
    panels::draw(&mut scene, &ctx, state);
    hud::draw_top_bar(&mut scene, &ctx, state);
    hud::draw_bottom_strip(&mut scene, &ctx, state);

    tracing::debug!(
        "Scene at {}x: {}x{} with {} commands",
        scale,
        scene.width(),
        scene.height(),
        scene.len()
    );
    Ok(scene)
}

/// Stateful renderer: holds the asset library and the font cache between frames
pub struct Renderer {
    assets: Arc<AssetLibrary>,
    text: TextPainter,
    options: RenderOptions,
}

impl Renderer {
    pub fn new(assets: Arc<AssetLibrary>, options: RenderOptions) -> Self {
        let text = TextPainter::new(assets.font_path.as_deref(), options.system_fonts);
        Self {
            assets,
            text,
            options,
        }
    }

    /// A renderer without any fonts: shapes and icons only
    pub fn without_text(assets: Arc<AssetLibrary>, scale: f32) -> Self {
        Self {
            assets,
            text: TextPainter::disabled(),
            options: RenderOptions {
                scale,
                system_fonts: false,
            },
        }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn assets(&self) -> &AssetLibrary {
        &self.assets
    }

    pub fn scene(&self, state: &MatchState, scale: f32) -> Result<Scene> {
        build_scene(state, &self.assets, scale)
    }

    pub fn render(&mut self, state: &MatchState, scale: f32) -> Result<RgbaImage> {
        let scene = build_scene(state, &self.assets, scale)?;
        let compositor = Compositor::new(scene.width(), scene.height(), &mut self.text)?;
        Ok(compositor.paint(&scene))
    }

    /// Render at the configured default scale
    pub fn render_default(&mut self, state: &MatchState) -> Result<RgbaImage> {
        let scale = self.options.scale;
        self.render(state, scale)
    }
}

/// Write `image` as PNG, creating parent directories as needed
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(image::ImageError::IoError)?;
    }
    image.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}
