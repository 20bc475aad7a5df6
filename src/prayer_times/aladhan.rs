use anyhow::Result;
use chrono::NaiveDate;
use log::info;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::config::PrayerConfig;
use crate::error::{ServiceError, ServiceResult};
use crate::http::{build_client, get_envelope};
use crate::prayer_times::source::{RawDay, RawTimings, TimeTableSource};
use crate::utils::format::title_case;

#[derive(Debug, Deserialize)]
struct AladhanDay {
    timings: RawTimings,
    date: AladhanDate,
}

#[derive(Debug, Deserialize)]
struct AladhanDate {
    gregorian: GregorianDate,
}

#[derive(Debug, Deserialize)]
struct GregorianDate {
    /// "DD-MM-YYYY"
    date: String,
}

impl AladhanDay {
    fn into_raw(self) -> ServiceResult<RawDay> {
        let date = NaiveDate::parse_from_str(&self.date.gregorian.date, "%d-%m-%Y").map_err(|e| {
            ServiceError::upstream(format!(
                "Bad Gregorian date '{}': {}",
                self.date.gregorian.date, e
            ))
        })?;
        Ok(RawDay {
            date,
            timings: self.timings,
        })
    }
}

/// Time-table source backed by the public Aladhan API.
pub struct AladhanSource {
    client: Client,
    base_url: String,
    country: String,
    method: u8,
}

impl AladhanSource {
    pub fn new(config: &PrayerConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config.timeout_secs)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            country: config.country.clone(),
            method: config.method,
        })
    }

    /// By-city lookups let Aladhan pick the method for the country.
    fn city_query(&self, year: i32, month: u32, city: &str) -> Vec<(&'static str, String)> {
        vec![
            ("city", title_case(city)),
            ("country", self.country.clone()),
            ("month", month.to_string()),
            ("year", year.to_string()),
        ]
    }

    fn coordinates_query(
        &self,
        year: i32,
        month: u32,
        latitude: f64,
        longitude: f64,
    ) -> Vec<(&'static str, String)> {
        vec![
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("month", month.to_string()),
            ("year", year.to_string()),
            ("method", self.method.to_string()),
        ]
    }

    fn fetch_month(&self, endpoint: &str, query: &[(&str, String)]) -> ServiceResult<Vec<RawDay>> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let days: Vec<AladhanDay> = get_envelope(&self.client, &url, query)?;
        days.into_iter().map(AladhanDay::into_raw).collect()
    }
}

impl TimeTableSource for AladhanSource {
    fn day_by_coordinates(
        &self,
        date: NaiveDate,
        latitude: f64,
        longitude: f64,
    ) -> ServiceResult<RawDay> {
        info!("Aladhan: timings for {} at {}, {}", date, latitude, longitude);
        let url = format!("{}/timings/{}", self.base_url, date.format("%d-%m-%Y"));
        let query = [
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("method", self.method.to_string()),
        ];
        let day: AladhanDay = get_envelope(&self.client, &url, &query)?;
        day.into_raw()
    }

    fn month_by_city(&self, year: i32, month: u32, city: &str) -> ServiceResult<Vec<RawDay>> {
        info!("Aladhan: calendar for city {} ({}-{})", city, year, month);
        let days = self.fetch_month("calendarByCity", &self.city_query(year, month, city))?;
        info!("Aladhan: received {} days", days.len());
        Ok(days)
    }

    fn month_by_coordinates(
        &self,
        year: i32,
        month: u32,
        latitude: f64,
        longitude: f64,
    ) -> ServiceResult<Vec<RawDay>> {
        info!(
            "Aladhan: calendar for {}, {} ({}-{})",
            latitude, longitude, year, month
        );
        let query = self.coordinates_query(year, month, latitude, longitude);
        let days = self.fetch_month("calendar", &query)?;
        info!("Aladhan: received {} days", days.len());
        Ok(days)
    }
}
