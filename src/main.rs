// SPDX-License-Identifier: GPL-3.0-only

use clap::{CommandFactory, Parser, Subcommand};
use depthshot::Config;
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "depthshot")]
#[command(about = "Depth camera viewer and threshold-filtered depth recorder")]
#[command(version = env!("GIT_VERSION"))]
#[command(subcommand_required = false)]
struct Cli {
    /// Config file (default: ~/.config/depthshot/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a raw depth file in the terminal
    View {
        /// Raw little-endian u16 depth file
        file: Option<PathBuf>,

        #[command(flatten)]
        size: cli::FrameSize,
    },

    /// Stream from a depth sensor and record filtered depth frames
    Capture {
        /// Directory the depth files are written to (created if missing)
        dir: Option<PathBuf>,

        /// Replay raw depth files from this directory instead of a sensor
        #[arg(short, long)]
        replay: Option<PathBuf>,

        /// Sensor index
        #[arg(short, long, default_value = "0")]
        device: usize,

        /// Grayscale strategy for the live view (binary or ramp)
        #[arg(short, long, default_value = "binary")]
        mapping: String,
    },

    /// Render a raw depth file to an image file
    Export {
        /// Raw little-endian u16 depth file
        file: Option<PathBuf>,

        /// Output image (format from extension, e.g. .png)
        output: Option<PathBuf>,

        /// Grayscale strategy (binary or ramp)
        #[arg(short, long, default_value = "ramp")]
        mapping: String,

        #[command(flatten)]
        size: cli::FrameSize,
    },

    /// Print statistics of a raw depth file
    Info {
        /// Raw little-endian u16 depth file
        file: Option<PathBuf>,

        #[command(flatten)]
        size: cli::FrameSize,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=depthshot=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref());

    // A missing positional argument is a request for usage, not an error
    match cli.command {
        None => print_usage(None),
        Some(Commands::View { file: None, .. }) => print_usage(Some("view")),
        Some(Commands::View {
            file: Some(file),
            size,
        }) => cli::view_file(&file, size.resolve(&config), &config),
        Some(Commands::Capture { dir: None, .. }) => print_usage(Some("capture")),
        Some(Commands::Capture {
            dir: Some(dir),
            replay,
            device,
            mapping,
        }) => cli::capture(&dir, replay.as_deref(), device, &mapping, &config),
        Some(Commands::Export {
            file: Some(file),
            output: Some(output),
            mapping,
            size,
        }) => cli::export_image(&file, &output, &mapping, size.resolve(&config), &config),
        Some(Commands::Export { .. }) => print_usage(Some("export")),
        Some(Commands::Info { file: None, .. }) => print_usage(Some("info")),
        Some(Commands::Info {
            file: Some(file),
            size,
        }) => cli::print_info(&file, size.resolve(&config)),
    }
}

fn print_usage(subcommand: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let mut command = Cli::command();
    match subcommand.and_then(|name| command.find_subcommand_mut(name)) {
        Some(sub) => sub.print_help()?,
        None => command.print_help()?,
    }
    println!();
    Ok(())
}
