use std::path::Path;

use anyhow::Result;
use hok_render::RenderOptions;

use crate::pipeline::{BatchSummary, Pipeline};

pub fn batch(
    assets_dir: &Path,
    options: RenderOptions,
    input: &Path,
    output_dir: &Path,
) -> Result<BatchSummary> {
    tracing::info!("Assets directory: {}", assets_dir.display());
    let mut pipeline = Pipeline::new(assets_dir, options)?;
    pipeline.run_batch(input, output_dir)
}
