use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{ServiceError, ServiceResult};

/// The five obligatory prayers that take part in the active/next rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrayerName {
    Fajr,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl PrayerName {
    pub fn all() -> [PrayerName; 5] {
        [
            PrayerName::Fajr,
            PrayerName::Dhuhr,
            PrayerName::Asr,
            PrayerName::Maghrib,
            PrayerName::Isha,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PrayerName::Fajr => "Fajr",
            PrayerName::Dhuhr => "Dhuhr",
            PrayerName::Asr => "Asr",
            PrayerName::Maghrib => "Maghrib",
            PrayerName::Isha => "Isha",
        }
    }
}

impl std::fmt::Display for PrayerName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// The seven clock times a time-table source reports for one civil day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalTimes {
    #[serde(with = "hhmm")]
    pub imsak: NaiveTime,
    #[serde(with = "hhmm")]
    pub fajr: NaiveTime,
    #[serde(with = "hhmm")]
    pub sunrise: NaiveTime,
    #[serde(with = "hhmm")]
    pub dhuhr: NaiveTime,
    #[serde(with = "hhmm")]
    pub asr: NaiveTime,
    #[serde(with = "hhmm")]
    pub maghrib: NaiveTime,
    #[serde(with = "hhmm")]
    pub isha: NaiveTime,
}

impl CanonicalTimes {
    pub fn time_of(&self, prayer: PrayerName) -> NaiveTime {
        match prayer {
            PrayerName::Fajr => self.fajr,
            PrayerName::Dhuhr => self.dhuhr,
            PrayerName::Asr => self.asr,
            PrayerName::Maghrib => self.maghrib,
            PrayerName::Isha => self.isha,
        }
    }
}

/// One civil day's prayer times.
///
/// There are no setters: the sunnah windows are attached with
/// [`DailySchedule::with_sunnah`], which returns a new value and leaves the
/// original untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySchedule {
    date: NaiveDate,
    #[serde(flatten)]
    times: CanonicalTimes,
    #[serde(default)]
    tahajjud: Option<String>,
    #[serde(default)]
    dhuha: Option<String>,
}

impl DailySchedule {
    pub fn new(date: NaiveDate, times: CanonicalTimes) -> Self {
        Self {
            date,
            times,
            tahajjud: None,
            dhuha: None,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn times(&self) -> &CanonicalTimes {
        &self.times
    }

    pub fn tahajjud(&self) -> Option<&str> {
        self.tahajjud.as_deref()
    }

    pub fn dhuha(&self) -> Option<&str> {
        self.dhuha.as_deref()
    }

    /// Copy every canonical field into a new schedule carrying the given windows.
    pub fn with_sunnah(&self, tahajjud: String, dhuha: String) -> Self {
        Self {
            date: self.date,
            times: self.times,
            tahajjud: Some(tahajjud),
            dhuha: Some(dhuha),
        }
    }
}

/// The "now" view: which prayer period is active and how long until the next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentPrayerInfo {
    pub date: NaiveDate,
    pub current_prayer_name: PrayerName,
    #[serde(with = "hhmm")]
    pub current_prayer_time: NaiveTime,
    pub next_prayer_name: PrayerName,
    #[serde(with = "hhmm")]
    pub next_prayer_time: NaiveTime,
    pub countdown_to_next: String,
}

/// Where a schedule is requested for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Location {
    ByCity(String),
    ByCoordinates { latitude: f64, longitude: f64 },
}

impl Location {
    /// Build a location from the optional query parameters an API caller sends.
    ///
    /// Exactly one of "a city" or "both coordinates" must be present.
    pub fn from_parts(
        city: Option<&str>,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> ServiceResult<Self> {
        let city = city.map(str::trim).filter(|c| !c.is_empty());
        match (city, latitude, longitude) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => Err(ServiceError::invalid(
                "Provide either 'city' or 'latitude' and 'longitude', not both",
            )),
            (Some(name), None, None) => Ok(Location::ByCity(name.to_string())),
            (None, Some(latitude), Some(longitude)) => Ok(Location::ByCoordinates {
                latitude,
                longitude,
            }),
            _ => Err(ServiceError::invalid(
                "Provide either 'city' or both 'latitude' and 'longitude'",
            )),
        }
    }

    /// Range and emptiness checks done at the service boundary.
    pub fn validate(&self) -> ServiceResult<()> {
        match self {
            Location::ByCity(name) if name.trim().is_empty() => {
                Err(ServiceError::invalid("City name must not be empty"))
            }
            Location::ByCity(_) => Ok(()),
            Location::ByCoordinates {
                latitude,
                longitude,
            } => validate_coordinates(*latitude, *longitude),
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::ByCity(name) => write!(f, "{}", name),
            Location::ByCoordinates {
                latitude,
                longitude,
            } => write!(f, "{:.4}, {:.4}", latitude, longitude),
        }
    }
}

pub fn validate_coordinates(latitude: f64, longitude: f64) -> ServiceResult<()> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ServiceError::invalid(format!(
            "Latitude {} is outside [-90, 90]",
            latitude
        )));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ServiceError::invalid(format!(
            "Longitude {} is outside [-180, 180]",
            longitude
        )));
    }
    Ok(())
}

/// Serde adapter rendering a `NaiveTime` as zero-padded `HH:MM`.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, "%H:%M").map_err(serde::de::Error::custom)
    }
}
