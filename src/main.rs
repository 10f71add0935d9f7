//! virtlist demo - scroll through a large virtualized list in the terminal

use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use virtlist::model::AppError;

/// Scroll a large virtualized list in the terminal
#[derive(Parser, Debug)]
#[command(name = "virtlist")]
#[command(version)]
#[command(about = "Terminal demo of a virtualized list window controller")]
pub struct Args {
    /// Number of demo items to generate
    #[arg(short = 'n', long, default_value_t = 10_000)]
    pub items: usize,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Scroll delta (rows) above which the window is rebuilt
    #[arg(long)]
    pub jump_threshold: Option<f64>,

    /// Prefetch margin below the viewport, in estimated items
    #[arg(long)]
    pub prefetch_items: Option<f64>,
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = virtlist::config::load_config_with_precedence(args.config.clone())?;
        let merged = virtlist::config::merge_config(config_file);
        let with_env = virtlist::config::apply_env_overrides(merged);
        virtlist::config::apply_cli_overrides(with_env, args.jump_threshold, args.prefetch_items)
            .validate()?
    };

    virtlist::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        items = args.items,
        "Configuration loaded and resolved"
    );

    virtlist::view::run(args.items, &config)?;

    Ok(())
}
