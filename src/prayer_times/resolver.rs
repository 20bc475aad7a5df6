use chrono::NaiveDateTime;
use log::debug;

use crate::error::{ServiceError, ServiceResult};
use crate::models::{CurrentPrayerInfo, DailySchedule, PrayerName};
use crate::utils::format::format_countdown;

/// A slot in the rotation. Tomorrow's Fajr is kept apart from today's so both
/// can sit in one sorted list; it is reported to callers as plain `Fajr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Today(PrayerName),
    NextFajr,
}

impl Slot {
    fn name(self) -> PrayerName {
        match self {
            Slot::Today(name) => name,
            Slot::NextFajr => PrayerName::Fajr,
        }
    }
}

/// Work out the active prayer period at `now` and the countdown to the next one.
///
/// Only the five obligatory prayers of `today` plus `tomorrow`'s Fajr take
/// part; sunrise and imsak never become "current". A prayer whose instant
/// equals `now` has not passed yet: it is "next", with a zero countdown.
///
/// Before today's Fajr the current prayer is reported as Isha without looking
/// at yesterday's schedule; its time is taken from today's Isha.
pub fn resolve(
    today: Option<&DailySchedule>,
    tomorrow: Option<&DailySchedule>,
    now: NaiveDateTime,
) -> ServiceResult<CurrentPrayerInfo> {
    let (today, tomorrow) = match (today, tomorrow) {
        (Some(today), Some(tomorrow)) => (today, tomorrow),
        _ => {
            return Err(ServiceError::not_found(format!(
                "No prayer info available for {}",
                now.date()
            )));
        }
    };

    let mut slots: Vec<(Slot, NaiveDateTime)> = PrayerName::all()
        .into_iter()
        .map(|name| {
            let at = today.date().and_time(today.times().time_of(name));
            (Slot::Today(name), at)
        })
        .collect();
    slots.push((
        Slot::NextFajr,
        tomorrow.date().and_time(tomorrow.times().fajr),
    ));
    slots.sort_by_key(|&(_, at)| at);

    let next_idx = slots
        .iter()
        .position(|&(_, at)| now <= at)
        .ok_or_else(|| {
            ServiceError::ContractViolation(format!(
                "No prayer after {} (tomorrow's Fajr is {})",
                now,
                tomorrow.date().and_time(tomorrow.times().fajr)
            ))
        })?;

    let (next_slot, next_at) = slots[next_idx];
    let (current_name, current_time) = match next_idx.checked_sub(1) {
        Some(prev) => (slots[prev].0.name(), slots[prev].1.time()),
        None => (PrayerName::Isha, today.times().isha),
    };

    let remaining = (next_at - now).num_seconds();
    debug!(
        "At {}: current {}, next {:?} at {} ({}s)",
        now, current_name, next_slot, next_at, remaining
    );

    Ok(CurrentPrayerInfo {
        date: today.date(),
        current_prayer_name: current_name,
        current_prayer_time: current_time,
        next_prayer_name: next_slot.name(),
        next_prayer_time: next_at.time(),
        countdown_to_next: format_countdown(remaining),
    })
}
