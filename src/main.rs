mod api;
mod app;
mod calendar;
mod cli;
mod config;
mod content;
mod error;
mod http;
mod models;
mod prayer_times;
mod quran;
mod utils;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;

use api::Router;
use app::Services;
use cli::args::{Cli, Commands, LocationArgs};
use cli::handlers;
use config::AppConfig;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref()).context("Loading config")?;

    // No subcommand → today's times
    let command = cli.command.unwrap_or(Commands::Times {
        location: LocationArgs::default(),
    });

    if let Commands::Config = command {
        return handlers::handle_config(&config);
    }

    let router = Router::new(Services::from_config(&config)?);
    let services = router.services();
    let now = Local::now().naive_local();

    match command {
        Commands::Times { location } => {
            let location = handlers::resolve_location(&location, &config)?;
            handlers::handle_times(services, &location, now)?;
        }
        Commands::Month {
            year,
            month,
            location,
        } => {
            let location = handlers::resolve_location(&location, &config)?;
            handlers::handle_month(services, year, month, &location, now.date())?;
        }
        Commands::Hijri { date } => {
            handlers::handle_hijri(services, date.as_deref(), now.date())?;
        }
        Commands::Request { path } => {
            handlers::handle_request(&router, &path, now)?;
        }
        Commands::Config => unreachable!(),
    }

    Ok(())
}
