mod app;
mod classifier;
mod cli;
mod config;
mod controller;
mod domain;
mod infrastructure;
mod session;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use infrastructure::{directories, logging, shutdown};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = cli::Cli::parse();

    let config = config::load_config()?;
    let paths = directories::ensure_directories(&config.directories)?;
    logging::init_tracing(&config, &paths)?;

    let shutdown = shutdown::Shutdown::new();
    shutdown::install_signal_handlers(shutdown.clone());

    let app = app::MailSenseApp::initialize(config, paths, shutdown)?;
    app.run(cli).await
}
