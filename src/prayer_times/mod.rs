pub mod aladhan;
pub mod calculator;
pub mod repository;
pub mod resolver;
pub mod service;
pub mod source;
pub mod sunnah;

#[cfg(test)]
pub mod testing;

pub use aladhan::AladhanSource;
pub use calculator::LocalSource;
pub use repository::ScheduleRepository;
pub use service::PrayerTimeService;
pub use source::TimeTableSource;
