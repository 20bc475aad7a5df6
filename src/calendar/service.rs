use chrono::NaiveDate;
use log::warn;

use crate::error::{ServiceError, ServiceResult};
use crate::models::HijriDay;
use crate::utils::hijri::to_hijri;

/// Gregorian to Hijri conversion with a fixed moon-sighting offset.
pub struct CalendarService {
    offset_days: i32,
}

impl CalendarService {
    pub fn new(offset_days: i32) -> Self {
        Self { offset_days }
    }

    pub fn hijri_for_gregorian(&self, year: i32, month: u32, day: u32) -> ServiceResult<HijriDay> {
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            ServiceError::invalid(format!("Invalid date {}-{}-{}", year, month, day))
        })?;
        self.convert(date)
    }

    pub fn hijri_today(&self, today: NaiveDate) -> ServiceResult<HijriDay> {
        self.convert(today)
    }

    fn convert(&self, date: NaiveDate) -> ServiceResult<HijriDay> {
        to_hijri(date, self.offset_days).map_err(|e| {
            warn!("Hijri conversion failed for {}: {}", date, e);
            ServiceError::not_found(format!("No Hijri date for {}", date))
        })
    }
}
