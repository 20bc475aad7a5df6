//! Framework-agnostic request dispatcher.
//!
//! Takes a GET target (`/api/...?query`), routes it to the matching service and
//! renders the result as JSON. Failures come back as `{"detail": "..."}` with the
//! status from [`ServiceError::status`], except the monthly schedule routes,
//! which answer every failure with 404.

use chrono::NaiveDateTime;
use log::{debug, warn};
use reqwest::Url;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::str::FromStr;

use crate::app::Services;
use crate::error::{ServiceError, ServiceResult};
use crate::models::{CurrentPrayerInfo, DailySchedule, HijriDay, Location};

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    fn ok<T: Serialize>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(body) => Self { status: 200, body },
            Err(e) => Self::detail(500, format!("Cannot render response: {}", e)),
        }
    }

    fn detail(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "detail": message.into() }),
        }
    }

    fn from_error(err: &ServiceError) -> Self {
        Self::detail(err.status(), err.to_string())
    }

    fn from_result<T: Serialize>(result: ServiceResult<T>) -> Self {
        match result {
            Ok(value) => Self::ok(&value),
            Err(e) => Self::from_error(&e),
        }
    }

    pub fn is_error(&self) -> bool {
        self.status >= 400
    }
}

/// A parsed request target: decoded path segments plus query parameters.
struct Request {
    segments: Vec<String>,
    query: HashMap<String, String>,
}

impl Request {
    fn parse(target: &str) -> ServiceResult<Self> {
        let url = Url::parse("http://localhost/")
            .and_then(|base| base.join(target))
            .map_err(|e| ServiceError::invalid(format!("Bad request target '{}': {}", target, e)))?;

        let segments = url
            .path_segments()
            .map(|parts| {
                parts
                    .filter(|s| !s.is_empty())
                    .map(decode_segment)
                    .collect()
            })
            .unwrap_or_default();
        let query = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        Ok(Self { segments, query })
    }

    fn text(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    fn param<T: FromStr>(&self, name: &str) -> ServiceResult<Option<T>> {
        match self.query.get(name) {
            None => Ok(None),
            Some(raw) => raw.trim().parse().map(Some).map_err(|_| {
                ServiceError::invalid(format!("Query parameter '{}' is invalid: '{}'", name, raw))
            }),
        }
    }

    fn required<T: FromStr>(&self, name: &str) -> ServiceResult<T> {
        self.param(name)?
            .ok_or_else(|| ServiceError::invalid(format!("Missing query parameter '{}'", name)))
    }
}

/// Percent-decode one path segment by routing it through a query string.
fn decode_segment(raw: &str) -> String {
    let escaped = raw.replace('&', "%26").replace('+', "%2B");
    Url::parse(&format!("http://localhost/?v={}", escaped))
        .ok()
        .and_then(|url| url.query_pairs().next().map(|(_, v)| v.into_owned()))
        .unwrap_or_else(|| raw.to_string())
}

fn path_param<T: FromStr>(name: &str, raw: &str) -> ServiceResult<T> {
    raw.parse()
        .map_err(|_| ServiceError::invalid(format!("Path parameter '{}' is invalid: '{}'", name, raw)))
}

fn year_month(year: &str, month: &str) -> ServiceResult<(i32, u32)> {
    Ok((path_param("year", year)?, path_param("month", month)?))
}

/// Monthly schedule routes answer any failure with 404.
fn schedule_or_not_found(result: ServiceResult<Vec<DailySchedule>>, what: String) -> ApiResponse {
    match result {
        Ok(days) => ApiResponse::ok(&days),
        Err(e) => {
            warn!("{}: {}", what, e);
            ApiResponse::detail(404, format!("{} ({})", what, e))
        }
    }
}

pub struct Router {
    services: Services,
}

impl Router {
    pub fn new(services: Services) -> Self {
        Self { services }
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    /// Dispatch a GET `target` evaluated at wall-clock `now`.
    pub fn handle(&self, target: &str, now: NaiveDateTime) -> ApiResponse {
        let request = match Request::parse(target) {
            Ok(request) => request,
            Err(e) => return ApiResponse::from_error(&e),
        };
        let segments: Vec<&str> = request.segments.iter().map(String::as_str).collect();
        debug!("GET /{}", segments.join("/"));

        let s = &self.services;
        match segments.as_slice() {
            [] => ApiResponse::ok(&json!({
                "message": "API is running.",
                "api_docs": "/docs"
            })),

            ["api", "schedule", "now"] => {
                ApiResponse::from_result(self.current_prayer(&request, now))
            }
            ["api", "schedule", "by-coordinates", year, month] => {
                let result = year_month(year, month).and_then(|(y, m)| {
                    let location = Location::ByCoordinates {
                        latitude: request.required("latitude")?,
                        longitude: request.required("longitude")?,
                    };
                    s.prayer.get_monthly_schedule(y, m, &location)
                });
                schedule_or_not_found(
                    result,
                    format!(
                        "Schedule not found for coordinates lat {:?}, lon {:?}",
                        request.text("latitude").unwrap_or_default(),
                        request.text("longitude").unwrap_or_default()
                    ),
                )
            }
            ["api", "schedule", "daily", year, month, day] => {
                ApiResponse::from_result(self.daily_schedule(&request, year, month, day))
            }
            ["api", "schedule", city, year, month] => {
                let result = year_month(year, month).and_then(|(y, m)| {
                    s.prayer
                        .get_monthly_schedule(y, m, &Location::ByCity(city.to_string()))
                });
                schedule_or_not_found(
                    result,
                    format!(
                        "Schedule not found. Check that city '{}' and the date are valid",
                        city
                    ),
                )
            }

            ["api", "convert", "today"] => {
                ApiResponse::from_result(s.calendar.hijri_today(now.date()))
            }
            ["api", "convert", year, month, day] => {
                ApiResponse::from_result(self.convert(year, month, day))
            }

            ["api", "quran", "surahs"] => ApiResponse::from_result(s.quran.surahs()),
            ["api", "quran", "surahs", n] => ApiResponse::from_result(
                path_param("surah_number", n).and_then(|n| s.quran.surah(n)),
            ),
            ["api", "quran", "surahs", n, "ayahs", k] => ApiResponse::from_result(
                path_param::<u32>("surah_number", n)
                    .and_then(|n| Ok((n, path_param::<u32>("ayah_number", k)?)))
                    .and_then(|(n, k)| s.quran.ayah(n, k)),
            ),
            ["api", "quran", "tafsir", n] => ApiResponse::from_result(
                path_param("surah_number", n).and_then(|n| s.quran.tafsir(n)),
            ),

            ["api", "dua", "duas"] => ApiResponse::from_result(s.duas.all()),
            ["api", "dua", "duas", "category", name] => {
                ApiResponse::from_result(s.duas.by_category(name))
            }
            ["api", "dua", "duas", id] => ApiResponse::from_result(
                path_param("dua_id", id).and_then(|id| s.duas.detail(id)),
            ),

            ["api", "story", "stories"] => ApiResponse::from_result(s.stories.all()),
            ["api", "story", "stories", "kitab", name] => {
                ApiResponse::from_result(s.stories.by_kitab(name))
            }
            ["api", "story", "stories", "category", name] => {
                ApiResponse::from_result(s.stories.by_category(name))
            }
            ["api", "story", "stories", id] => ApiResponse::from_result(
                path_param("story_id", id).and_then(|id| s.stories.detail(id)),
            ),

            _ => ApiResponse::detail(404, "Not Found"),
        }
    }

    fn current_prayer(&self, request: &Request, now: NaiveDateTime) -> ServiceResult<CurrentPrayerInfo> {
        let location = Location::from_parts(
            request.text("city"),
            request.param("latitude")?,
            request.param("longitude")?,
        )?;
        self.services.prayer.get_current_prayer_info(&location, now)
    }

    fn daily_schedule(
        &self,
        request: &Request,
        year: &str,
        month: &str,
        day: &str,
    ) -> ServiceResult<DailySchedule> {
        let (year, month) = year_month(year, month)?;
        self.services.prayer.get_schedule_for_date(
            year,
            month,
            path_param("day", day)?,
            request.required("latitude")?,
            request.required("longitude")?,
        )
    }

    fn convert(&self, year: &str, month: &str, day: &str) -> ServiceResult<HijriDay> {
        let (year, month) = year_month(year, month)?;
        self.services
            .calendar
            .hijri_for_gregorian(year, month, path_param("day", day)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::CalendarService;
    use crate::content::{DuaService, JsonDuaRepository, JsonStoryRepository, StoryService};
    use crate::prayer_times::testing::FakeSource;
    use crate::prayer_times::{PrayerTimeService, ScheduleRepository};
    use crate::quran::service::testing::FakeQuran;
    use crate::quran::QuranService;
    use chrono::NaiveDate;

    fn router_with(source: FakeSource) -> Router {
        Router::new(Services {
            prayer: PrayerTimeService::new(ScheduleRepository::new(Box::new(source))),
            calendar: CalendarService::new(0),
            quran: QuranService::new(Box::new(FakeQuran)),
            duas: DuaService::new(Box::new(JsonDuaRepository::from_path(None))),
            stories: StoryService::new(Box::new(JsonStoryRepository::from_path(None))),
        })
    }

    fn router() -> Router {
        router_with(FakeSource::months(&[(2025, 9), (2025, 10)]))
    }

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 9, 10)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap()
    }

    fn get(target: &str) -> ApiResponse {
        router().handle(target, noon())
    }

    #[test]
    fn root_reports_running() {
        let res = get("/");
        assert_eq!(res.status, 200);
        assert_eq!(res.body["message"], "API is running.");
        assert_eq!(res.body["api_docs"], "/docs");
    }

    #[test]
    fn monthly_by_city_renders_enriched_days() {
        let res = get("/api/schedule/bandung/2025/9");
        assert_eq!(res.status, 200);
        let days = res.body.as_array().unwrap();
        assert_eq!(days.len(), 30);
        assert_eq!(days[0]["date"], "2025-09-01");
        assert_eq!(days[0]["fajr"], "04:30");
        assert_eq!(days[0]["tahajjud"], "02:00 - 04:30");
        assert_eq!(days[0]["dhuha"], "06:00 - 11:50");
    }

    #[test]
    fn city_with_spaces_is_decoded() {
        let res = get("/api/schedule/Kota%20Bandung/2025/9");
        assert_eq!(res.status, 200);
    }

    #[test]
    fn monthly_failures_are_all_404() {
        assert_eq!(get("/api/schedule/bandung/2025/13").status, 404);
        assert_eq!(get("/api/schedule/bandung/2025/11").status, 404);
        assert_eq!(get("/api/schedule/bandung/year/9").status, 404);
        let res = get("/api/schedule/by-coordinates/2025/9?latitude=95&longitude=107");
        assert_eq!(res.status, 404);
        assert!(res.body["detail"].as_str().is_some());
    }

    #[test]
    fn monthly_by_coordinates() {
        let res = get("/api/schedule/by-coordinates/2025/10?latitude=-6.9175&longitude=107.6191");
        assert_eq!(res.status, 200);
        assert_eq!(res.body.as_array().unwrap().len(), 31);
    }

    #[test]
    fn now_by_city() {
        let res = get("/api/schedule/now?city=Bandung");
        assert_eq!(res.status, 200);
        assert_eq!(res.body["current_prayer_name"], "Dhuhr");
        assert_eq!(res.body["current_prayer_time"], "12:00");
        assert_eq!(res.body["next_prayer_name"], "Asr");
        assert_eq!(res.body["next_prayer_time"], "15:15");
        assert_eq!(res.body["countdown_to_next"], "02:45:00");
    }

    #[test]
    fn now_at_exact_maghrib_reports_maghrib_next() {
        let maghrib = NaiveDate::from_ymd_opt(2025, 9, 10)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap();
        let res = router().handle("/api/schedule/now?city=Bandung", maghrib);
        assert_eq!(res.status, 200);
        assert_eq!(res.body["current_prayer_name"], "Asr");
        assert_eq!(res.body["next_prayer_name"], "Maghrib");
        assert_eq!(res.body["next_prayer_time"], "18:00");
        assert_eq!(res.body["countdown_to_next"], "00:00:00");
    }

    #[test]
    fn now_by_coordinates() {
        let res = get("/api/schedule/now?latitude=-6.9&longitude=107.6");
        assert_eq!(res.status, 200);
    }

    #[test]
    fn now_rejects_ambiguous_or_missing_location() {
        assert_eq!(get("/api/schedule/now").status, 400);
        assert_eq!(get("/api/schedule/now?latitude=-6.9").status, 400);
        assert_eq!(
            get("/api/schedule/now?city=Bandung&latitude=-6.9&longitude=107.6").status,
            400
        );
        assert_eq!(get("/api/schedule/now?latitude=north&longitude=107.6").status, 400);
    }

    #[test]
    fn now_without_data_is_404() {
        let res = router_with(FakeSource::failing()).handle("/api/schedule/now?city=Bandung", noon());
        assert_eq!(res.status, 404);
    }

    #[test]
    fn daily_schedule_route() {
        let res = get("/api/schedule/daily/2025/9/10?latitude=-6.9&longitude=107.6");
        assert_eq!(res.status, 200);
        assert_eq!(res.body["date"], "2025-09-10");
        assert_eq!(get("/api/schedule/daily/2025/9/31?latitude=-6.9&longitude=107.6").status, 400);
        assert_eq!(get("/api/schedule/daily/2025/9/10").status, 400);
    }

    #[test]
    fn hijri_conversion_routes() {
        let res = get("/api/convert/2024/3/11");
        assert_eq!(res.status, 200);
        assert_eq!(res.body["year"], 1445);
        assert_eq!(get("/api/convert/2024/2/30").status, 400);
        assert_eq!(get("/api/convert/today").status, 200);
    }

    #[test]
    fn quran_routes() {
        assert_eq!(get("/api/quran/surahs").status, 200);
        assert_eq!(get("/api/quran/surahs/112").body["latin_name"], "Al-Ikhlas");
        assert_eq!(get("/api/quran/surahs/112/ayahs/4").body["number_in_surah"], 4);
        assert_eq!(get("/api/quran/surahs/112/ayahs/9").status, 404);
        assert_eq!(get("/api/quran/surahs/115").status, 400);
        assert_eq!(get("/api/quran/surahs/abc").status, 400);
        assert_eq!(get("/api/quran/tafsir/112").status, 200);
    }

    #[test]
    fn dua_and_story_routes() {
        assert_eq!(get("/api/dua/duas").status, 200);
        assert_eq!(get("/api/dua/duas/1").body["id"], 1);
        assert_eq!(get("/api/dua/duas/category/adab").status, 200);
        assert_eq!(get("/api/dua/duas/category/unknown").status, 404);
        assert_eq!(get("/api/dua/duas/9999").status, 404);

        assert_eq!(get("/api/story/stories").status, 200);
        assert_eq!(get("/api/story/stories/kitab/qazwini").status, 200);
        assert_eq!(get("/api/story/stories/category/Misteri%20Laut").status, 200);
        assert_eq!(get("/api/story/stories/1").body["kitab"], "Qazwini");
    }

    #[test]
    fn unknown_route_is_404() {
        let res = get("/api/nothing/here");
        assert_eq!(res.status, 404);
        assert_eq!(res.body["detail"], "Not Found");
        assert!(res.is_error());
    }
}
