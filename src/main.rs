// SPDX-License-Identifier: GPL-3.0-only

use clap::{Args, Parser, Subcommand};
use scan_overlay::config::ScannerConfig;
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "scan-overlay")]
#[command(about = "Barcode scan-area overlay and detection filtering")]
#[command(version)]
struct Cli {
    /// Config file (default: <config dir>/scan-overlay/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Copy)]
struct ViewArgs {
    /// Overlay view width in pixels (default: image width)
    #[arg(long, requires = "view_height")]
    view_width: Option<u32>,

    /// Overlay view height in pixels (default: image height)
    #[arg(long, requires = "view_width")]
    view_height: Option<u32>,

    /// Mirror the preview horizontally (front camera)
    #[arg(long)]
    flip: bool,

    /// Report every detection, ignoring the scan area
    #[arg(long)]
    no_roi: bool,
}

impl From<ViewArgs> for cli::ViewOptions {
    fn from(args: ViewArgs) -> Self {
        Self {
            view_size: args.view_width.zip(args.view_height),
            flip: args.flip,
            no_roi: args.no_roi,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the scan region for a viewport
    Region {
        #[arg(long)]
        width: f32,

        #[arg(long)]
        height: f32,
    },

    /// Detect QR codes in images and print those inside the scan area
    Scan {
        /// Images to scan
        #[arg(required = true)]
        images: Vec<PathBuf>,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Draw the scan overlay and accepted detections onto an image
    Render {
        image: PathBuf,

        /// Output PNG path
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        view: ViewArgs,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=scan_overlay=trace, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();
    let config = ScannerConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Region { width, height } => cli::print_region(width, height, &config)?,
        Commands::Scan { images, view } => {
            cli::scan_images(images, view.into(), &config).await?
        }
        Commands::Render {
            image,
            output,
            view,
        } => cli::render_image(&image, &output, view.into(), &config).await?,
    }

    Ok(())
}
