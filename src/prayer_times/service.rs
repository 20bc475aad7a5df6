use chrono::{Datelike, NaiveDate, NaiveDateTime};
use log::info;

use crate::error::{ServiceError, ServiceResult};
use crate::models::prayer::validate_coordinates;
use crate::models::{CurrentPrayerInfo, DailySchedule, Location};
use crate::prayer_times::repository::ScheduleRepository;
use crate::prayer_times::resolver::resolve;
use crate::prayer_times::sunnah::augment;

/// Application service for prayer schedules: input validation, sunnah
/// enrichment and month-boundary stitching around the repository.
pub struct PrayerTimeService {
    repository: ScheduleRepository,
}

impl PrayerTimeService {
    pub fn new(repository: ScheduleRepository) -> Self {
        Self { repository }
    }

    /// Whole-month schedule, every day enriched with tahajjud and dhuha.
    pub fn get_monthly_schedule(
        &self,
        year: i32,
        month: u32,
        location: &Location,
    ) -> ServiceResult<Vec<DailySchedule>> {
        validate_year_month(year, month)?;
        location.validate()?;

        let days: Vec<DailySchedule> = self
            .repository
            .get_monthly_schedule(year, month, location)?
            .iter()
            .map(augment)
            .collect();

        if days.is_empty() {
            return Err(ServiceError::not_found(format!(
                "No schedule for {} in {}-{:02}",
                location, year, month
            )));
        }
        Ok(days)
    }

    /// Single-day schedule by coordinates, enriched.
    pub fn get_schedule_for_date(
        &self,
        year: i32,
        month: u32,
        day: u32,
        latitude: f64,
        longitude: f64,
    ) -> ServiceResult<DailySchedule> {
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            ServiceError::invalid(format!("Invalid date {}-{}-{}", year, month, day))
        })?;
        validate_coordinates(latitude, longitude)?;

        let schedule = self
            .repository
            .get_daily_schedule(date, latitude, longitude)?;
        Ok(augment(&schedule))
    }

    /// The active prayer period at `now` for `location`.
    ///
    /// When tomorrow falls in the next month, that month is fetched too and
    /// appended before today and tomorrow are looked up.
    pub fn get_current_prayer_info(
        &self,
        location: &Location,
        now: NaiveDateTime,
    ) -> ServiceResult<CurrentPrayerInfo> {
        location.validate()?;

        let today = now.date();
        let tomorrow = today
            .succ_opt()
            .ok_or_else(|| ServiceError::invalid(format!("No day after {}", today)))?;

        let mut days = self
            .repository
            .get_monthly_schedule(today.year(), today.month(), location)?;

        if tomorrow.month() != today.month() {
            info!(
                "{} is the last day of the month, fetching {}-{:02} as well",
                today,
                tomorrow.year(),
                tomorrow.month()
            );
            days.extend(self.repository.get_monthly_schedule(
                tomorrow.year(),
                tomorrow.month(),
                location,
            )?);
        }

        let find = |date: NaiveDate| days.iter().find(|d| d.date() == date);
        resolve(find(today), find(tomorrow), now)
    }
}

fn validate_year_month(year: i32, month: u32) -> ServiceResult<()> {
    if year <= 0 {
        return Err(ServiceError::invalid(format!("Invalid year {}", year)));
    }
    if !(1..=12).contains(&month) {
        return Err(ServiceError::invalid(format!("Invalid month {}", month)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PrayerName;
    use crate::prayer_times::source::RawTimings;
    use crate::prayer_times::testing::{full_timings, FakeSource};

    fn service(source: FakeSource) -> PrayerTimeService {
        PrayerTimeService::new(ScheduleRepository::new(Box::new(source)))
    }

    fn bandung() -> Location {
        Location::ByCity("Bandung".into())
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn thirty_day_month_is_fully_enriched() {
        let days = service(FakeSource::month(2025, 9))
            .get_monthly_schedule(2025, 9, &bandung())
            .unwrap();
        assert_eq!(days.len(), 30);
        for day in &days {
            assert_eq!(day.tahajjud(), Some("02:00 - 04:30"));
            assert_eq!(day.dhuha(), Some("06:00 - 11:50"));
        }
    }

    #[test]
    fn invalid_month_or_location_is_rejected_before_fetching() {
        let svc = service(FakeSource::failing());
        assert!(matches!(
            svc.get_monthly_schedule(2025, 13, &bandung()),
            Err(ServiceError::InvalidInput(_))
        ));
        assert!(matches!(
            svc.get_monthly_schedule(0, 9, &bandung()),
            Err(ServiceError::InvalidInput(_))
        ));
        assert!(matches!(
            svc.get_monthly_schedule(2025, 9, &Location::ByCity(String::new())),
            Err(ServiceError::InvalidInput(_))
        ));
        let far_north = Location::ByCoordinates {
            latitude: 95.0,
            longitude: 0.0,
        };
        assert!(matches!(
            svc.get_monthly_schedule(2025, 9, &far_north),
            Err(ServiceError::InvalidInput(_))
        ));
    }

    #[test]
    fn upstream_failure_surfaces_as_error() {
        assert!(matches!(
            service(FakeSource::failing()).get_monthly_schedule(2025, 9, &bandung()),
            Err(ServiceError::UpstreamUnavailable(_))
        ));
    }

    #[test]
    fn daily_schedule_validates_date() {
        let svc = service(FakeSource::month(2025, 2));
        assert!(matches!(
            svc.get_schedule_for_date(2025, 2, 30, -6.9, 107.6),
            Err(ServiceError::InvalidInput(_))
        ));
        let day = svc.get_schedule_for_date(2025, 2, 28, -6.9, 107.6).unwrap();
        assert_eq!(day.date(), date(2025, 2, 28));
        assert!(day.dhuha().is_some());
    }

    #[test]
    fn current_info_mid_month() {
        let now = date(2025, 9, 10).and_hms_opt(12, 30, 0).unwrap();
        let info = service(FakeSource::month(2025, 9))
            .get_current_prayer_info(&bandung(), now)
            .unwrap();
        assert_eq!(info.current_prayer_name, PrayerName::Dhuhr);
        assert_eq!(info.next_prayer_name, PrayerName::Asr);
        assert_eq!(info.countdown_to_next, "02:45:00");
    }

    #[test]
    fn current_info_at_exact_maghrib_keeps_asr_current() {
        let now = date(2025, 9, 10).and_hms_opt(18, 0, 0).unwrap();
        let info = service(FakeSource::month(2025, 9))
            .get_current_prayer_info(&bandung(), now)
            .unwrap();
        assert_eq!(info.current_prayer_name, PrayerName::Asr);
        assert_eq!(info.next_prayer_name, PrayerName::Maghrib);
        assert_eq!(info.countdown_to_next, "00:00:00");
    }

    #[test]
    fn current_info_at_exact_fajr_keeps_isha_current() {
        let now = date(2025, 9, 10).and_hms_opt(4, 30, 0).unwrap();
        let info = service(FakeSource::month(2025, 9))
            .get_current_prayer_info(&bandung(), now)
            .unwrap();
        assert_eq!(info.current_prayer_name, PrayerName::Isha);
        assert_eq!(info.next_prayer_name, PrayerName::Fajr);
        assert_eq!(info.countdown_to_next, "00:00:00");
    }

    #[test]
    fn current_info_stitches_next_month_on_last_day() {
        let source = FakeSource::months(&[(2025, 9), (2025, 10)]).with_timings(
            date(2025, 10, 1),
            RawTimings {
                fajr: Some("04:31".into()),
                ..full_timings()
            },
        );
        let now = date(2025, 9, 30).and_hms_opt(21, 0, 0).unwrap();
        let info = service(source)
            .get_current_prayer_info(&bandung(), now)
            .unwrap();
        assert_eq!(info.current_prayer_name, PrayerName::Isha);
        assert_eq!(info.next_prayer_name, PrayerName::Fajr);
        assert_eq!(info.countdown_to_next, "07:31:00");
    }

    #[test]
    fn current_info_stitches_across_year_end() {
        let now = date(2025, 12, 31).and_hms_opt(23, 0, 0).unwrap();
        let info = service(FakeSource::months(&[(2025, 12), (2026, 1)]))
            .get_current_prayer_info(&bandung(), now)
            .unwrap();
        assert_eq!(info.next_prayer_name, PrayerName::Fajr);
        assert_eq!(info.countdown_to_next, "05:30:00");
    }

    #[test]
    fn next_month_unavailable_means_no_info() {
        let now = date(2025, 9, 30).and_hms_opt(21, 0, 0).unwrap();
        let res = service(FakeSource::month(2025, 9)).get_current_prayer_info(&bandung(), now);
        assert!(res.is_err());
    }

    #[test]
    fn gap_in_source_means_no_info() {
        let source = FakeSource::month(2025, 9).without_day(date(2025, 9, 11));
        let now = date(2025, 9, 10).and_hms_opt(12, 0, 0).unwrap();
        assert!(matches!(
            service(source).get_current_prayer_info(&bandung(), now),
            Err(ServiceError::NotFound(_))
        ));
    }
}
