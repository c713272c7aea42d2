//! sleeplog library root.
//! Exposes the CLI parser, the high-level run() function, and the session
//! store and controller used by any front end.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod logging;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub async fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => commands::init::handle(cli),
        Commands::Start => commands::start::handle(cfg).await,
        Commands::Stop => commands::stop::handle(cfg).await,
        Commands::Rate { quality, night } => commands::rate::handle(cfg, *quality, *night).await,
        Commands::Status => commands::status::handle(cfg).await,
        Commands::List { limit } => commands::list::handle(cfg, *limit).await,
        Commands::Clear { yes } => commands::clear::handle(cfg, *yes).await,
        Commands::Export {
            format,
            file,
            force,
        } => commands::export::handle(cfg, *format, file, *force).await,
        Commands::Backup {
            file,
            compress,
            force,
        } => commands::backup::handle(cfg, file, *compress, *force),
        Commands::Config {
            print_config,
            edit_config,
            editor,
        } => commands::config::handle(cfg, *print_config, *edit_config, editor),
        Commands::Db {
            migrate,
            check,
            vacuum,
            info,
        } => commands::db::handle(cfg, *migrate, *check, *vacuum, *info),
        Commands::Log { print } => commands::log::handle(cfg, *print),
    }
}

/// Entry point used by main.rs
pub async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // load config once
    let mut cfg = Config::load();

    // database override from the command line
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    logging::init_with_level(&cfg.log_level);
    tracing::debug!(database = %cfg.database, "configuration loaded");

    dispatch(&cli, &cfg).await
}
