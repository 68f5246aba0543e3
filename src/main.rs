use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use concentric_face::config::Configuration;
use concentric_face::{events, render};

#[derive(Debug, Parser)]
#[command(name = "concentric-face", version, about = "concentric watch face")]
struct Args {
    /// Path to YAML config
    #[arg(value_name = "CONFIG", default_value = "config.yaml")]
    config: PathBuf,
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("concentric_face={level},wgpu=warn,winit=warn"))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let cfg = if args.config.exists() {
        Configuration::from_yaml_file(&args.config)?
    } else {
        info!(path = %args.config.display(), "no configuration file; using defaults");
        Configuration::default()
    };
    cfg.validate().context("invalid configuration")?;

    let (style_tx, style_rx) = events::style_channel(cfg.initial_style());
    let cancel = CancellationToken::new();

    #[cfg(unix)]
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            use tokio::signal::unix::{signal, SignalKind};
            let mut term = match signal(SignalKind::terminate()) {
                Ok(term) => term,
                Err(_) => return,
            };
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = term.recv() => {}
            }
            cancel.cancel();
        });
    }

    render::viewer::run(cfg, cancel.clone(), style_tx, style_rx)?;
    cancel.cancel();
    Ok(())
}
