use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{ServiceError, ServiceResult};

/// Clock values exactly as a time-table source reports them.
///
/// Values may carry seconds or a zone label ("04:31 (WIB)"); normalizing them
/// is the repository's job. A `None` field means the source left it out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTimings {
    #[serde(rename = "Imsak", default)]
    pub imsak: Option<String>,
    #[serde(rename = "Fajr", default)]
    pub fajr: Option<String>,
    #[serde(rename = "Sunrise", default)]
    pub sunrise: Option<String>,
    #[serde(rename = "Dhuhr", default)]
    pub dhuhr: Option<String>,
    #[serde(rename = "Asr", default)]
    pub asr: Option<String>,
    #[serde(rename = "Maghrib", default)]
    pub maghrib: Option<String>,
    #[serde(rename = "Isha", default)]
    pub isha: Option<String>,
}

/// One civil day of raw source output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDay {
    pub date: NaiveDate,
    pub timings: RawTimings,
}

/// An oracle for named prayer clock times.
///
/// Implementations either return every requested day or fail; they never
/// hand back a partial month.
pub trait TimeTableSource: Send + Sync {
    fn day_by_coordinates(
        &self,
        date: NaiveDate,
        latitude: f64,
        longitude: f64,
    ) -> ServiceResult<RawDay>;

    fn month_by_city(&self, year: i32, month: u32, city: &str) -> ServiceResult<Vec<RawDay>>;

    fn month_by_coordinates(
        &self,
        year: i32,
        month: u32,
        latitude: f64,
        longitude: f64,
    ) -> ServiceResult<Vec<RawDay>>;
}

/// Every date of a Gregorian month, in order.
pub fn days_in_month(year: i32, month: u32) -> ServiceResult<Vec<NaiveDate>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| ServiceError::invalid(format!("Invalid month {}-{}", year, month)))?;
    Ok(first
        .iter_days()
        .take_while(|d| d.month() == month)
        .collect())
}
