//! Folio - A paginated rich-text editor for the terminal.
//!
//! # Usage
//!
//! ```bash
//! folio
//! folio --data-dir ~/notes --page-height 900
//! folio --page-width 480 --save-defaults
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::prelude::*;

use folio::app::App;
use folio::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};
use folio::paginate::MAX_PAGE_WIDTH_PX;
use folio::perf;
use folio::storage::default_data_dir;

/// A paginated rich-text editor for the terminal
#[derive(Parser, Debug)]
#[command(name = "folio", version, about, long_about = None)]
struct Cli {
    /// Directory holding the saved pages record
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Page height budget in pixels (default 750)
    #[arg(long, value_name = "PX", value_parser = clap::value_parser!(u32).range(1..))]
    page_height: Option<u32>,

    /// Page content width in pixels (default 600)
    #[arg(
        long,
        value_name = "PX",
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_PAGE_WIDTH_PX))
    )]
    page_width: Option<u32>,

    /// Enable performance logging
    #[arg(long)]
    perf: bool,

    /// Write detailed event timings to a file
    #[arg(long, value_name = "PATH")]
    debug_log: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save_defaults: bool,

    /// Clear saved defaults
    #[arg(long)]
    reset_defaults: bool,
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.reset_defaults {
        clear_config_flags(&global_path)?;
    }
    if cli.save_defaults {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.reset_defaults {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    perf::set_enabled(effective.perf || cli.perf);
    let debug_log_path = effective
        .debug_log
        .clone()
        .or_else(|| std::env::var_os("FOLIO_DEBUG_LOG").map(PathBuf::from));
    let debug_layer = debug_log_path.as_deref().and_then(|path| {
        perf::debug_log_layer(path)
            .inspect_err(|err| {
                eprintln!("[warn] Failed to initialize debug log {}: {err}", path.display());
            })
            .ok()
    });

    // stderr keeps stdout free for the terminal UI.
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        );
    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(debug_layer)
        .init();
    tracing::debug!(?effective, "resolved flags");

    let data_dir = effective
        .data_dir
        .clone()
        .or_else(|| cli.data_dir.clone())
        .unwrap_or_else(default_data_dir);

    // Run the application
    let mut app = App::new(data_dir)
        .with_page_height(effective.page_height.or(cli.page_height))
        .with_page_width(effective.page_width.or(cli.page_width))
        .with_config_paths(
            Some(global_path.clone()),
            if local_path.exists() {
                Some(local_path.clone())
            } else {
                None
            },
        );

    app.run().context("Application error")
}
