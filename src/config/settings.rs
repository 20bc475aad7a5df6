use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

fn default_aladhan_url() -> String {
    "http://api.aladhan.com/v1".to_string()
}
fn default_country() -> String {
    "Indonesia".to_string()
}
fn default_aladhan_method() -> u8 {
    // Kementerian Agama Republik Indonesia
    11
}
fn default_prayer_timeout() -> u64 {
    20
}
fn default_calc_method() -> String {
    "Singapore".to_string()
}
fn default_madhab() -> String {
    "Shafi".to_string()
}
fn default_timezone_offset() -> i32 {
    420
}
fn default_imsak_minutes() -> i64 {
    10
}
fn default_quran_url() -> String {
    "https://equran.id/api/v2".to_string()
}
fn default_quran_timeout() -> u64 {
    30
}
fn default_city() -> Option<String> {
    Some("Bandung".to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Aladhan,
    Local,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrayerConfig {
    #[serde(default)]
    pub source: SourceKind,
    #[serde(default = "default_aladhan_url")]
    pub base_url: String,
    /// Country sent with by-city lookups.
    #[serde(default = "default_country")]
    pub country: String,
    /// Aladhan calculation method id.
    #[serde(default = "default_aladhan_method")]
    pub method: u8,
    #[serde(default = "default_prayer_timeout")]
    pub timeout_secs: u64,
}

impl Default for PrayerConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::default(),
            base_url: default_aladhan_url(),
            country: default_country(),
            method: default_aladhan_method(),
            timeout_secs: default_prayer_timeout(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CityCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

fn default_cities() -> BTreeMap<String, CityCoordinates> {
    [
        ("Bandung", -6.9175, 107.6191),
        ("Jakarta", -6.2088, 106.8456),
        ("Surabaya", -7.2575, 112.7521),
        ("Yogyakarta", -7.7956, 110.3695),
        ("Medan", 3.5952, 98.6722),
        ("Makassar", -5.1477, 119.4327),
    ]
    .into_iter()
    .map(|(name, latitude, longitude)| {
        (
            name.to_string(),
            CityCoordinates {
                latitude,
                longitude,
            },
        )
    })
    .collect()
}

/// Settings for the offline `salah` source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalConfig {
    #[serde(default = "default_calc_method")]
    pub calc_method: String,
    #[serde(default = "default_madhab")]
    pub madhab: String,
    #[serde(default = "default_timezone_offset")]
    pub timezone_offset: i32, // minutes from UTC
    #[serde(default = "default_imsak_minutes")]
    pub imsak_minutes: i64,
    #[serde(default = "default_cities")]
    pub cities: BTreeMap<String, CityCoordinates>,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            calc_method: default_calc_method(),
            madhab: default_madhab(),
            timezone_offset: default_timezone_offset(),
            imsak_minutes: default_imsak_minutes(),
            cities: default_cities(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Days to add/subtract from Hijri date for local moon sighting.
    /// 0 = default (Saudi), -1 = one day behind (e.g. some Indian regions), +1 = one day ahead
    #[serde(default)]
    pub hijri_offset: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuranConfig {
    #[serde(default = "default_quran_url")]
    pub base_url: String,
    #[serde(default = "default_quran_timeout")]
    pub timeout_secs: u64,
}

impl Default for QuranConfig {
    fn default() -> Self {
        Self {
            base_url: default_quran_url(),
            timeout_secs: default_quran_timeout(),
        }
    }
}

/// A JSON content catalog; the bundled copy is used when no path is set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub data_path: Option<PathBuf>,
}

/// Location used by the CLI when no location flags are given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    #[serde(default = "default_city")]
    pub city: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            city: default_city(),
            latitude: None,
            longitude: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub prayer: PrayerConfig,
    #[serde(default)]
    pub local: LocalConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub quran: QuranConfig,
    #[serde(default)]
    pub dua: CatalogConfig,
    #[serde(default)]
    pub story: CatalogConfig,
    #[serde(default)]
    pub location: LocationConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "muslim-daily")
            .context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load from `path`, or from the per-user config file when `path` is `None`.
    /// A missing per-user file yields the defaults; a missing explicit path is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::config_path()?;
                if !path.exists() {
                    return Ok(Self::default());
                }
                Self::load_from(&path)
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
        let config: AppConfig = toml::from_str(&content).context("Parsing config.toml")?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Serializing config")
    }
}
