use chrono::{Duration, NaiveTime};

use crate::models::DailySchedule;
use crate::utils::format::format_window;

/// Tahajjud is anchored to a fixed start of night rather than sunset.
const TAHAJJUD_START_HOUR: u32 = 2;
const DHUHA_AFTER_SUNRISE_MINUTES: i64 = 15;
const DHUHA_BEFORE_DHUHR_MINUTES: i64 = 10;

/// Attach the tahajjud and dhuha windows to a schedule.
///
/// Canonical times are copied unchanged. On a pathologically short morning
/// the dhuha window may come out inverted; it is emitted as computed.
pub fn augment(schedule: &DailySchedule) -> DailySchedule {
    let times = schedule.times();
    let night_start = NaiveTime::from_hms_opt(TAHAJJUD_START_HOUR, 0, 0).unwrap_or(NaiveTime::MIN);

    let tahajjud = format_window(night_start, times.fajr);
    let dhuha = format_window(
        times.sunrise + Duration::minutes(DHUHA_AFTER_SUNRISE_MINUTES),
        times.dhuhr - Duration::minutes(DHUHA_BEFORE_DHUHR_MINUTES),
    );

    schedule.with_sunnah(tahajjud, dhuha)
}
