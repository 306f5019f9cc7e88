use std::path::{Path, PathBuf};

use anyhow::Result;
use hok_render::RenderOptions;

use crate::pipeline::{read_report, Pipeline};

/// Render one report file; the output defaults to the input path with a `.png` extension
pub fn render(
    assets_dir: &Path,
    options: RenderOptions,
    input: &Path,
    output: Option<&Path>,
) -> Result<PathBuf> {
    let report = read_report(input)?;
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| input.with_extension("png"));

    tracing::info!("Assets directory: {}", assets_dir.display());
    let mut pipeline = Pipeline::new(assets_dir, options)?;
    pipeline.process_to_file(&report, &output)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_defaults_output_next_to_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("match.txt");
        std::fs::write(&input, "[整体情况]\n游戏阶段：前期，当前对局进行到1分2秒\n").unwrap();
        let options = RenderOptions {
            scale: 1.0,
            system_fonts: false,
        };

        let written = render(&dir.path().join("no-assets"), options, &input, None).unwrap();
        assert_eq!(written, dir.path().join("match.png"));
        let image = image::open(&written).unwrap();
        assert_eq!((image.width(), image.height()), (1360, 1180));
    }

    #[test]
    fn test_broken_metadata_still_renders() {
        let dir = tempfile::tempdir().unwrap();
        let assets = dir.path().join("assets");
        std::fs::create_dir_all(&assets).unwrap();
        std::fs::write(assets.join("heroes.json"), "{ not json").unwrap();
        std::fs::write(assets.join("items.json"), r#"[{"item_name": "x"}]"#).unwrap();
        let input = dir.path().join("match.txt");
        std::fs::write(&input, "[玩家情况]\n<我方-玩家-廉颇>是我方上路，坐标（0，0）\n").unwrap();
        let output = dir.path().join("out.png");
        let options = RenderOptions {
            scale: 1.0,
            system_fonts: false,
        };

        let written = render(&assets, options, &input, Some(&output)).unwrap();
        assert!(written.is_file());
    }
}
