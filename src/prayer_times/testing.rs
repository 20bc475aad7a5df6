//! In-memory time-table source for tests.

use chrono::{Datelike, NaiveDate};

use crate::error::{ServiceError, ServiceResult};
use crate::prayer_times::source::{days_in_month, RawDay, RawTimings, TimeTableSource};

/// imsak 04:20, fajr 04:30, sunrise 05:45, dhuhr 12:00, asr 15:15,
/// maghrib 18:00, isha 19:15
pub fn full_timings() -> RawTimings {
    RawTimings {
        imsak: Some("04:20".into()),
        fajr: Some("04:30 (WIB)".into()),
        sunrise: Some("05:45 (WIB)".into()),
        dhuhr: Some("12:00 (WIB)".into()),
        asr: Some("15:15 (WIB)".into()),
        maghrib: Some("18:00 (WIB)".into()),
        isha: Some("19:15 (WIB)".into()),
    }
}

pub struct FakeSource {
    days: Vec<RawDay>,
    failing: bool,
}

impl FakeSource {
    pub fn months(months: &[(i32, u32)]) -> Self {
        let days = months
            .iter()
            .flat_map(|&(y, m)| days_in_month(y, m).unwrap())
            .map(|date| RawDay {
                date,
                timings: full_timings(),
            })
            .collect();
        Self {
            days,
            failing: false,
        }
    }

    pub fn month(year: i32, month: u32) -> Self {
        Self::months(&[(year, month)])
    }

    pub fn failing() -> Self {
        Self {
            days: Vec::new(),
            failing: true,
        }
    }

    pub fn with_timings(mut self, date: NaiveDate, timings: RawTimings) -> Self {
        if let Some(day) = self.days.iter_mut().find(|d| d.date == date) {
            day.timings = timings;
        }
        self
    }

    pub fn with_broken_day(self, date: NaiveDate) -> Self {
        self.with_timings(
            date,
            RawTimings {
                fajr: None,
                ..full_timings()
            },
        )
    }

    pub fn without_day(mut self, date: NaiveDate) -> Self {
        self.days.retain(|d| d.date != date);
        self
    }

    fn month_days(&self, year: i32, month: u32) -> ServiceResult<Vec<RawDay>> {
        if self.failing {
            return Err(ServiceError::upstream("fake source is down"));
        }
        let days: Vec<RawDay> = self
            .days
            .iter()
            .filter(|d| d.date.year() == year && d.date.month() == month)
            .cloned()
            .collect();
        if days.is_empty() {
            return Err(ServiceError::upstream("Upstream returned no data"));
        }
        Ok(days)
    }
}

impl TimeTableSource for FakeSource {
    fn day_by_coordinates(&self, date: NaiveDate, _: f64, _: f64) -> ServiceResult<RawDay> {
        if self.failing {
            return Err(ServiceError::upstream("fake source is down"));
        }
        self.days
            .iter()
            .find(|d| d.date == date)
            .cloned()
            .ok_or_else(|| ServiceError::upstream("Upstream returned no data"))
    }

    fn month_by_city(&self, year: i32, month: u32, _: &str) -> ServiceResult<Vec<RawDay>> {
        self.month_days(year, month)
    }

    fn month_by_coordinates(
        &self,
        year: i32,
        month: u32,
        _: f64,
        _: f64,
    ) -> ServiceResult<Vec<RawDay>> {
        self.month_days(year, month)
    }
}
