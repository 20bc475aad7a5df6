use anyhow::{anyhow, Context, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::api::Router;
use crate::app::Services;
use crate::cli::args::LocationArgs;
use crate::config::AppConfig;
use crate::models::{DailySchedule, Location};
use crate::utils::format::format_time;

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GOLD: &str = "\x1b[38;2;196;160;68m";

/// Flags win; otherwise fall back to the `[location]` section.
pub fn resolve_location(args: &LocationArgs, config: &AppConfig) -> Result<Location> {
    let location = if args.is_empty() {
        let loc = &config.location;
        Location::from_parts(loc.city.as_deref(), loc.latitude, loc.longitude)
            .context("No usable [location] in config; pass --city or --lat/--lon")?
    } else {
        Location::from_parts(args.city.as_deref(), args.lat, args.lon)?
    };
    Ok(location)
}

// ─── Times ───────────────────────────────────────────────────────────────────

pub fn handle_times(services: &Services, location: &Location, now: NaiveDateTime) -> Result<()> {
    let today = now.date();
    let days = services
        .prayer
        .get_monthly_schedule(today.year(), today.month(), location)?;
    let schedule = days
        .iter()
        .find(|d| d.date() == today)
        .ok_or_else(|| anyhow!("No schedule for {} in {}", today, location))?;
    let hijri = services.calendar.hijri_today(today).ok();

    println!();
    println_colored!(
        GOLD,
        "  Prayer Times — {} ({})",
        location,
        today.format("%Y-%m-%d")
    );
    if let Some(hijri) = hijri {
        println_colored!(DIM, "  {}, {}", hijri.day_name, hijri.formatted());
    }
    println!();

    let times = schedule.times();
    let rows = [
        ("Imsak", times.imsak),
        ("Fajr", times.fajr),
        ("Sunrise", times.sunrise),
        ("Dhuhr", times.dhuhr),
        ("Asr", times.asr),
        ("Maghrib", times.maghrib),
        ("Isha", times.isha),
    ];
    for (name, time) in &rows {
        let color = if *time < now.time() { DIM } else { BOLD };
        println_colored!(color, "  {:<10}  {}", name, format_time(*time));
    }
    print_sunnah(schedule);

    match services.prayer.get_current_prayer_info(location, now) {
        Ok(info) => {
            println!();
            println_colored!(
                GREEN,
                "  Now: {} (since {})",
                info.current_prayer_name,
                format_time(info.current_prayer_time)
            );
            println_colored!(
                AMBER,
                "  Next: {} at {} in {}",
                info.next_prayer_name,
                format_time(info.next_prayer_time),
                info.countdown_to_next
            );
        }
        Err(e) => {
            println!();
            println_colored!(RED, "  Active prayer unavailable: {}", e);
        }
    }
    println!();
    Ok(())
}

fn print_sunnah(schedule: &DailySchedule) {
    if let Some(tahajjud) = schedule.tahajjud() {
        println_colored!(DIM, "  {:<10}  {}", "Tahajjud", tahajjud);
    }
    if let Some(dhuha) = schedule.dhuha() {
        println_colored!(DIM, "  {:<10}  {}", "Dhuha", dhuha);
    }
}

// ─── Month ───────────────────────────────────────────────────────────────────

pub fn handle_month(
    services: &Services,
    year: i32,
    month: u32,
    location: &Location,
    today: NaiveDate,
) -> Result<()> {
    let days = services.prayer.get_monthly_schedule(year, month, location)?;

    println!();
    println_colored!(GOLD, "  {}-{:02} — {}", year, month, location);
    println!();
    println_colored!(
        BOLD,
        "  {:<10}  {:<5}  {:<7}  {:<7}  {:<7}  {:<7}  {:<7}  {:<7}",
        "Date",
        "Imsak",
        "Fajr",
        "Sunrise",
        "Dhuhr",
        "Asr",
        "Maghrib",
        "Isha"
    );

    for day in &days {
        let t = day.times();
        let line = format!(
            "  {}  {:<5}  {:<7}  {:<7}  {:<7}  {:<7}  {:<7}  {:<7}",
            day.date().format("%Y-%m-%d"),
            format_time(t.imsak),
            format_time(t.fajr),
            format_time(t.sunrise),
            format_time(t.dhuhr),
            format_time(t.asr),
            format_time(t.maghrib),
            format_time(t.isha),
        );
        if day.date() == today {
            println_colored!(AMBER, "{}", line);
        } else {
            println!("{}", line);
        }
    }
    println!();
    Ok(())
}

// ─── Hijri ───────────────────────────────────────────────────────────────────

pub fn handle_hijri(services: &Services, date: Option<&str>, today: NaiveDate) -> Result<()> {
    let date = match date {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .with_context(|| format!("Expected YYYY-MM-DD, got '{}'", raw))?,
        None => today,
    };
    let hijri = services
        .calendar
        .hijri_for_gregorian(date.year(), date.month(), date.day())?;
    println_colored!(
        GOLD,
        "  {} → {}, {}",
        date.format("%Y-%m-%d"),
        hijri.day_name,
        hijri.formatted()
    );
    Ok(())
}

// ─── Request ─────────────────────────────────────────────────────────────────

pub fn handle_request(router: &Router, target: &str, now: NaiveDateTime) -> Result<()> {
    let response = router.handle(target, now);
    println!("{}", serde_json::to_string_pretty(&response.body)?);
    if response.is_error() {
        return Err(anyhow!("{} answered HTTP {}", target, response.status));
    }
    Ok(())
}

// ─── Config ──────────────────────────────────────────────────────────────────

pub fn handle_config(config: &AppConfig) -> Result<()> {
    if let Ok(path) = AppConfig::config_path() {
        println_colored!(DIM, "# default location: {}", path.display());
    }
    print!("{}", config.to_toml()?);
    Ok(())
}
