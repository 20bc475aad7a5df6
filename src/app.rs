use anyhow::{Context, Result};
use log::info;

use crate::calendar::CalendarService;
use crate::config::{AppConfig, SourceKind};
use crate::content::{DuaService, JsonDuaRepository, JsonStoryRepository, StoryService};
use crate::prayer_times::{
    AladhanSource, LocalSource, PrayerTimeService, ScheduleRepository, TimeTableSource,
};
use crate::quran::{EQuranSource, QuranService};

/// Every service the API and CLI dispatch to, wired from one config.
pub struct Services {
    pub prayer: PrayerTimeService,
    pub calendar: CalendarService,
    pub quran: QuranService,
    pub duas: DuaService,
    pub stories: StoryService,
}

impl Services {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let source: Box<dyn TimeTableSource> = match config.prayer.source {
            SourceKind::Aladhan => Box::new(
                AladhanSource::new(&config.prayer).context("Building Aladhan client")?,
            ),
            SourceKind::Local => Box::new(
                LocalSource::new(&config.local).context("Configuring local calculator")?,
            ),
        };
        info!("Prayer times from {:?} source", config.prayer.source);

        let quran = EQuranSource::new(&config.quran).context("Building equran.id client")?;

        Ok(Self {
            prayer: PrayerTimeService::new(ScheduleRepository::new(source)),
            calendar: CalendarService::new(config.calendar.hijri_offset),
            quran: QuranService::new(Box::new(quran)),
            duas: DuaService::new(Box::new(JsonDuaRepository::from_path(
                config.dua.data_path.as_ref(),
            ))),
            stories: StoryService::new(Box::new(JsonStoryRepository::from_path(
                config.story.data_path.as_ref(),
            ))),
        })
    }
}
