use anyhow::{anyhow, Result};
use chrono::{Duration, FixedOffset, NaiveDate, NaiveTime};
use log::info;
use salah::prelude::*;
use std::collections::BTreeMap;

use crate::config::{CityCoordinates, LocalConfig};
use crate::error::{ServiceError, ServiceResult};
use crate::prayer_times::source::{days_in_month, RawDay, RawTimings, TimeTableSource};

/// Offline time-table source computing times with the `salah` crate.
///
/// City lookups go through the configured city table, since there is no
/// geocoder offline.
pub struct LocalSource {
    method: Method,
    madhab: Madhab,
    offset: FixedOffset,
    imsak_minutes: i64,
    cities: BTreeMap<String, CityCoordinates>,
}

impl LocalSource {
    pub fn new(config: &LocalConfig) -> Result<Self> {
        let offset = FixedOffset::east_opt(config.timezone_offset * 60)
            .ok_or_else(|| anyhow!("Invalid timezone offset: {}", config.timezone_offset))?;
        Ok(Self {
            method: parse_method(&config.calc_method)?,
            madhab: parse_madhab(&config.madhab)?,
            offset,
            imsak_minutes: config.imsak_minutes,
            cities: config.cities.clone(),
        })
    }

    fn compute_times(&self, date: NaiveDate, lat: f64, lng: f64) -> ServiceResult<RawDay> {
        let coords = Coordinates::new(lat, lng);
        let params = Configuration::with(self.method, self.madhab);

        let times = PrayerSchedule::new()
            .on(date)
            .for_location(coords)
            .with_configuration(params)
            .calculate()
            .map_err(|e| ServiceError::upstream(format!("Prayer calculation failed: {}", e)))?;

        let to_local = |utc: chrono::DateTime<chrono::Utc>| -> NaiveTime {
            utc.with_timezone(&self.offset).time()
        };
        let clock = |t: NaiveTime| Some(t.format("%H:%M").to_string());

        let fajr = to_local(times.time(Prayer::Fajr));
        let imsak = fajr - Duration::minutes(self.imsak_minutes);

        Ok(RawDay {
            date,
            timings: RawTimings {
                imsak: clock(imsak),
                fajr: clock(fajr),
                sunrise: clock(to_local(times.time(Prayer::Sunrise))),
                dhuhr: clock(to_local(times.time(Prayer::Dhuhr))),
                asr: clock(to_local(times.time(Prayer::Asr))),
                maghrib: clock(to_local(times.time(Prayer::Maghrib))),
                isha: clock(to_local(times.time(Prayer::Isha))),
            },
        })
    }

    fn find_city(&self, city: &str) -> ServiceResult<CityCoordinates> {
        let wanted = city.trim().to_lowercase();
        self.cities
            .iter()
            .find(|(name, _)| name.to_lowercase() == wanted)
            .map(|(_, coords)| *coords)
            .ok_or_else(|| ServiceError::not_found(format!("Unknown city '{}'", city)))
    }
}

impl TimeTableSource for LocalSource {
    fn day_by_coordinates(
        &self,
        date: NaiveDate,
        latitude: f64,
        longitude: f64,
    ) -> ServiceResult<RawDay> {
        self.compute_times(date, latitude, longitude)
    }

    fn month_by_city(&self, year: i32, month: u32, city: &str) -> ServiceResult<Vec<RawDay>> {
        let coords = self.find_city(city)?;
        info!("Local: computing {}-{} for city {}", year, month, city);
        self.month_by_coordinates(year, month, coords.latitude, coords.longitude)
    }

    fn month_by_coordinates(
        &self,
        year: i32,
        month: u32,
        latitude: f64,
        longitude: f64,
    ) -> ServiceResult<Vec<RawDay>> {
        days_in_month(year, month)?
            .into_iter()
            .map(|date| self.compute_times(date, latitude, longitude))
            .collect()
    }
}

fn parse_method(s: &str) -> Result<Method> {
    match s {
        "MuslimWorldLeague" => Ok(Method::MuslimWorldLeague),
        "Egyptian" => Ok(Method::Egyptian),
        "Karachi" => Ok(Method::Karachi),
        "UmmAlQura" => Ok(Method::UmmAlQura),
        "Dubai" => Ok(Method::Dubai),
        "MoonsightingCommittee" => Ok(Method::MoonsightingCommittee),
        "NorthAmerica" => Ok(Method::NorthAmerica),
        "Kuwait" => Ok(Method::Kuwait),
        "Qatar" => Ok(Method::Qatar),
        "Singapore" => Ok(Method::Singapore),
        "Tehran" => Ok(Method::Tehran),
        "Turkey" => Ok(Method::Turkey),
        "Other" => Ok(Method::Other),
        _ => Err(anyhow!("Unknown calculation method: '{}'", s)),
    }
}

fn parse_madhab(s: &str) -> Result<Madhab> {
    match s {
        "Hanafi" => Ok(Madhab::Hanafi),
        "Shafi" | "Shafi'i" => Ok(Madhab::Shafi),
        _ => Err(anyhow!("Unknown madhab: '{}'", s)),
    }
}
