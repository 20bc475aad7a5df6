use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "muslim-daily",
    version,
    author,
    about = "Prayer schedules, Hijri dates, Quran, duas and stories from the terminal"
)]
pub struct Cli {
    /// Path to a config.toml to use instead of the per-user one
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Location flags; when none are given the `[location]` config section is used.
#[derive(Args, Debug, Default, Clone)]
pub struct LocationArgs {
    /// City name, e.g. Bandung
    #[arg(long, conflicts_with_all = ["lat", "lon"])]
    pub city: Option<String>,
    /// Latitude in decimal degrees
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,
    /// Longitude in decimal degrees
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,
}

impl LocationArgs {
    pub fn is_empty(&self) -> bool {
        self.city.is_none() && self.lat.is_none() && self.lon.is_none()
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show today's prayer times, sunnah windows and the active prayer
    Times {
        #[command(flatten)]
        location: LocationArgs,
    },
    /// Show the schedule for a whole month
    Month {
        year: i32,
        /// Month number, 1-12
        month: u32,
        #[command(flatten)]
        location: LocationArgs,
    },
    /// Convert a Gregorian date (YYYY-MM-DD, default today) to Hijri
    Hijri { date: Option<String> },
    /// Dispatch a GET request through the API router and print the JSON
    Request {
        /// Request target, e.g. /api/schedule/now?city=Bandung
        path: String,
    },
    /// Print the effective configuration as TOML
    Config,
}
