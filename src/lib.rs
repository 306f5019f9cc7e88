mod commands;
pub mod pipeline;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use hok_render::{RenderOptions, SCALE_PRESETS};

pub use pipeline::{BatchRecord, BatchSummary, Pipeline, RecordId};

#[derive(Parser)]
#[command(version, about = "Render text match reports as annotated map images")]
struct Cli {
    /// Asset directory with heroes.json, items.json, icons, map art and fonts
    #[arg(long, global = true)]
    assets: Option<PathBuf>,

    /// Output scale; 1, 2 and 3 are the usual presets
    #[arg(long, global = true, default_value_t = 2.0)]
    scale: f32,

    /// Only use the bundled font, never the system font database
    #[arg(long, global = true)]
    no_system_fonts: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render every record of a JSON Lines file
    Batch {
        input: PathBuf,
        #[arg(short, long, default_value = "output")]
        output: PathBuf,
    },
    /// Render a single report (plain text, or the first record of a .jsonl file)
    Render {
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "hok_viz=info,hok_viz_lib=info,hok_render=info,hok_data=info,hok_parse=info".into()
            }),
        )
        .init();

    let cli = Cli::parse();
    if !SCALE_PRESETS.contains(&cli.scale) {
        tracing::debug!("Using non-preset scale {}", cli.scale);
    }
    let options = RenderOptions {
        scale: cli.scale,
        system_fonts: !cli.no_system_fonts,
    };
    let assets_dir = commands::resolve_assets_dir(cli.assets.as_deref());

    match cli.command {
        Commands::Batch { input, output } => {
            let summary = commands::batch(&assets_dir, options, &input, &output)?;
            println!(
                "{} rendered, {} skipped -> {}",
                summary.rendered,
                summary.skipped,
                output.display()
            );
        }
        Commands::Render { input, output } => {
            let written = commands::render(&assets_dir, options, &input, output.as_deref())?;
            println!("{}", written.display());
        }
    }
    Ok(())
}
