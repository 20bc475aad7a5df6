pub mod settings;

pub use settings::{
    AppConfig, CityCoordinates, LocalConfig, PrayerConfig, QuranConfig, SourceKind,
};
