use anyhow::Result;
use clap::Parser;
use gtk4::{prelude::*, Application};
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use talk_meter::config::{self, Config};
use talk_meter::ui;

const APP_ID: &str = "ua.talk.meter";

/// Per-participant speaking-time tracker for meetings
#[derive(Parser)]
#[command(name = "talk-meter")]
#[command(about = "Tracks who spoke how long in a meeting", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file path (default: ~/.config/talk-meter/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    gtk4::init()?;

    let config = match &cli.config {
        Some(path) => config::load_config_from(path),
        None => config::load_config(),
    }
    .unwrap_or_else(|e| {
        warn!("Помилка завантаження конфігу: {e:#}. Використовую значення за замовчуванням.");
        Config::default()
    });

    let app = Application::builder().application_id(APP_ID).build();

    let config_for_app = config.clone();
    app.connect_activate(move |app| {
        ui::build_ui(app, &config_for_app);
    });

    // Arguments were consumed by clap; GTK gets an empty argv.
    app.run_with_args::<&str>(&[]);

    Ok(())
}
