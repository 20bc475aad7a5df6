pub mod calendar;
pub mod content;
pub mod prayer;
pub mod quran;

pub use calendar::HijriDay;
pub use content::{Dua, DuaDetail, Story, StoryDetail};
pub use prayer::{CanonicalTimes, CurrentPrayerInfo, DailySchedule, Location, PrayerName};
pub use quran::{Ayah, Surah, SurahDetail, Tafsir, TafsirDetail};
