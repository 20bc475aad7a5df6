use chrono::{NaiveDate, NaiveTime, Timelike};
use log::{info, warn};

use crate::error::{ServiceError, ServiceResult};
use crate::models::{CanonicalTimes, DailySchedule, Location};
use crate::prayer_times::source::{RawDay, TimeTableSource};
use crate::utils::format::parse_clock;

/// Normalizes time-table source output into [`DailySchedule`] values.
///
/// No range validation and no retries happen here; a single bad day fails the
/// whole call.
pub struct ScheduleRepository {
    source: Box<dyn TimeTableSource>,
}

impl ScheduleRepository {
    pub fn new(source: Box<dyn TimeTableSource>) -> Self {
        Self { source }
    }

    pub fn get_daily_schedule(
        &self,
        date: NaiveDate,
        latitude: f64,
        longitude: f64,
    ) -> ServiceResult<DailySchedule> {
        let raw = self.source.day_by_coordinates(date, latitude, longitude)?;
        normalize(&raw)
    }

    pub fn get_monthly_schedule(
        &self,
        year: i32,
        month: u32,
        location: &Location,
    ) -> ServiceResult<Vec<DailySchedule>> {
        let raw = match location {
            Location::ByCity(city) => self.source.month_by_city(year, month, city)?,
            Location::ByCoordinates {
                latitude,
                longitude,
            } => self
                .source
                .month_by_coordinates(year, month, *latitude, *longitude)?,
        };

        let schedules = raw
            .iter()
            .map(normalize)
            .collect::<ServiceResult<Vec<_>>>()
            .inspect_err(|e| warn!("Dropping {}-{} for {}: {}", year, month, location, e))?;

        info!(
            "Loaded {} daily schedules for {} ({}-{})",
            schedules.len(),
            location,
            year,
            month
        );
        Ok(schedules)
    }
}

fn normalize(raw: &RawDay) -> ServiceResult<DailySchedule> {
    let field = |name: &str, value: &Option<String>| -> ServiceResult<NaiveTime> {
        let value = value.as_deref().ok_or_else(|| {
            ServiceError::upstream(format!("Missing '{}' for {}", name, raw.date))
        })?;
        // Schedules carry minute resolution.
        parse_clock(value)
            .map(|t| t.with_second(0).unwrap_or(t))
            .map_err(|e| ServiceError::upstream(format!("{} on {}: {}", name, raw.date, e)))
    };

    let t = &raw.timings;
    let times = CanonicalTimes {
        imsak: field("Imsak", &t.imsak)?,
        fajr: field("Fajr", &t.fajr)?,
        sunrise: field("Sunrise", &t.sunrise)?,
        dhuhr: field("Dhuhr", &t.dhuhr)?,
        asr: field("Asr", &t.asr)?,
        maghrib: field("Maghrib", &t.maghrib)?,
        isha: field("Isha", &t.isha)?,
    };
    Ok(DailySchedule::new(raw.date, times))
}
