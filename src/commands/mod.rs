mod batch;
mod render;

pub use batch::batch;
pub use render::render;

use std::path::{Path, PathBuf};

/// Resolve the assets directory: an explicit path wins, then `./assets`,
/// then an `assets` directory next to the executable's project root.
pub fn resolve_assets_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }
    let local = PathBuf::from("assets");
    if local.is_dir() {
        return local;
    }
    std::env::current_exe()
        .ok()
        .and_then(|exe| {
            exe.ancestors()
                .skip(1)
                .take(3)
                .map(|dir| dir.join("assets"))
                .find(|dir| dir.is_dir())
        })
        .unwrap_or(local)
}
