use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use image::RgbaImage;
use serde::Deserialize;
use tracing::{debug, info, warn};

use hok_data::AssetLibrary;
use hok_render::{save_png, RenderOptions, Renderer};

/// Record ids come as strings from some exports and as numbers from others
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Text(String),
    Number(i64),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Text(s) => f.write_str(s),
            RecordId::Number(n) => write!(f, "{}", n),
        }
    }
}

/// One line of a batch file
#[derive(Debug, Clone, Deserialize)]
pub struct BatchRecord {
    pub id: Option<RecordId>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub match_info: Option<String>,
}

impl BatchRecord {
    /// Report text: `content`, or `match_info` when `content` is missing or empty
    pub fn report(&self) -> Option<&str> {
        [&self.content, &self.match_info]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|s| !s.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    pub rendered: usize,
    pub skipped: usize,
    pub outputs: Vec<PathBuf>,
}

/// Text report → match state → image, with the asset library loaded once
pub struct Pipeline {
    renderer: Renderer,
    scale: f32,
}

impl Pipeline {
    pub fn new(assets_dir: &Path, options: RenderOptions) -> Result<Self> {
        let assets = AssetLibrary::load(assets_dir)
            .with_context(|| format!("Failed to load assets from {}", assets_dir.display()))?;
        let scale = options.scale;
        Ok(Self {
            renderer: Renderer::new(Arc::new(assets), options),
            scale,
        })
    }

    pub fn with_renderer(renderer: Renderer) -> Self {
        let scale = renderer.options().scale;
        Self { renderer, scale }
    }

    pub fn process(&mut self, report: &str) -> Result<RgbaImage> {
        let state = hok_parse::parse(report);
        debug!(
            "Parsed {} heroes, {} towers, {} waves, {} objectives at {}",
            state.heroes.len(),
            state.towers.len(),
            state.minion_waves.len(),
            state.objectives.len(),
            state.clock
        );
        let image = self
            .renderer
            .render(&state, self.scale)
            .with_context(|| format!("Failed to render at scale {}", self.scale))?;
        Ok(image)
    }

    pub fn process_to_file(&mut self, report: &str, output: &Path) -> Result<()> {
        let image = self.process(report)?;
        save_png(&image, output).with_context(|| format!("Failed to write {}", output.display()))?;
        info!("Wrote {}", output.display());
        Ok(())
    }

    /// Render every record of a JSON Lines file into `output_dir/<id>.png`.
    ///
    /// Bad records are logged and skipped; only I/O on the input or output
    /// directory aborts the run.
    pub fn run_batch(&mut self, input: &Path, output_dir: &Path) -> Result<BatchSummary> {
        let content = fs::read_to_string(input)
            .with_context(|| format!("Failed to read {}", input.display()))?;
        fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create {}", output_dir.display()))?;

        let mut summary = BatchSummary::default();
        for (index, line) in content.lines().enumerate() {
            let line_no = index + 1;
            if line.trim().is_empty() {
                continue;
            }

            let record: BatchRecord = match serde_json::from_str(line) {
                Ok(r) => r,
                Err(e) => {
                    warn!("Line {}: invalid record: {}", line_no, e);
                    summary.skipped += 1;
                    continue;
                }
            };
            let Some(id) = record.id.as_ref() else {
                warn!("Line {}: record has no id", line_no);
                summary.skipped += 1;
                continue;
            };
            let Some(report) = record.report() else {
                warn!("Line {}: record {} has no report text", line_no, id);
                summary.skipped += 1;
                continue;
            };

            let output = output_dir.join(format!("{}.png", file_stem(id)));
            match self.process_to_file(report, &output) {
                Ok(()) => {
                    summary.rendered += 1;
                    summary.outputs.push(output);
                }
                Err(e) => {
                    warn!("Line {}: record {} failed: {:#}", line_no, id, e);
                    summary.skipped += 1;
                }
            }
        }

        info!(
            "Batch done: {} rendered, {} skipped, output in {}",
            summary.rendered,
            summary.skipped,
            output_dir.display()
        );
        Ok(summary)
    }
}

/// Report text from a plain text file, or from the first usable record of a `.jsonl` file
pub fn read_report(input: &Path) -> Result<String> {
    let content = fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let is_jsonl = input
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jsonl"));
    if !is_jsonl {
        return Ok(content);
    }

    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| serde_json::from_str::<BatchRecord>(line).ok())
        .find_map(|record| record.report().map(str::to_string))
        .with_context(|| format!("No record with report text in {}", input.display()))
}

fn file_stem(id: &RecordId) -> String {
    id.to_string()
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = "[整体情况]\n游戏阶段：中期，当前对局进行到3分9秒\n\
        [玩家情况]\n<我方-玩家-廉颇>是我方上路，4级，血量（64%），坐标（-30.5，12.0）\n";

    fn pipeline() -> Pipeline {
        Pipeline::with_renderer(Renderer::without_text(Arc::new(AssetLibrary::empty()), 1.0))
    }

    fn record(id: &str, field: &str, text: &str) -> String {
        format!(
            "{{\"id\": {}, \"{}\": {}}}",
            id,
            field,
            serde_json::to_string(text).unwrap()
        )
    }

    #[test]
    fn test_record_report_fallback() {
        let record: BatchRecord =
            serde_json::from_str(r#"{"id": 7, "content": "", "match_info": "text"}"#).unwrap();
        assert_eq!(record.id, Some(RecordId::Number(7)));
        assert_eq!(record.report(), Some("text"));

        let record: BatchRecord = serde_json::from_str(r#"{"id": "a"}"#).unwrap();
        assert_eq!(record.report(), None);
    }

    #[test]
    fn test_batch_skips_bad_records() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("reports.jsonl");
        let lines = [
            record("\"a1\"", "content", REPORT),
            String::new(),
            record("42", "match_info", REPORT),
            "{ not json".to_string(),
            record("\"empty\"", "content", "  "),
            format!("{{\"content\": {}}}", serde_json::to_string(REPORT).unwrap()),
        ];
        fs::write(&input, lines.join("\n")).unwrap();

        let output_dir = dir.path().join("out");
        let summary = pipeline().run_batch(&input, &output_dir).unwrap();

        assert_eq!(summary.rendered, 2);
        assert_eq!(summary.skipped, 3);
        assert!(output_dir.join("a1.png").is_file());
        assert!(output_dir.join("42.png").is_file());
        assert!(!output_dir.join("empty.png").exists());
    }

    #[test]
    fn test_batch_missing_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = pipeline().run_batch(&dir.path().join("missing.jsonl"), dir.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_bad_scale_fails_record() {
        let dir = tempfile::tempdir().unwrap();
        let mut pipeline =
            Pipeline::with_renderer(Renderer::without_text(Arc::new(AssetLibrary::empty()), 0.0));
        assert!(pipeline.process(REPORT).is_err());

        let input = dir.path().join("one.jsonl");
        fs::write(&input, record("1", "content", REPORT)).unwrap();
        let summary = pipeline.run_batch(&input, dir.path()).unwrap();
        assert_eq!((summary.rendered, summary.skipped), (0, 1));
    }

    #[test]
    fn test_read_report_from_text_and_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let text = dir.path().join("report.txt");
        fs::write(&text, REPORT).unwrap();
        assert_eq!(read_report(&text).unwrap(), REPORT);

        let jsonl = dir.path().join("reports.JSONL");
        fs::write(
            &jsonl,
            format!("{{bad\n{}\n", record("1", "match_info", REPORT)),
        )
        .unwrap();
        assert_eq!(read_report(&jsonl).unwrap(), REPORT);

        let empty = dir.path().join("empty.jsonl");
        fs::write(&empty, "").unwrap();
        assert!(read_report(&empty).is_err());
    }

    #[test]
    fn test_file_stem_replaces_separators() {
        assert_eq!(file_stem(&RecordId::Text("a/b:c".into())), "a_b_c");
        assert_eq!(file_stem(&RecordId::Number(-3)), "-3");
    }
}
