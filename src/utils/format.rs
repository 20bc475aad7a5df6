use anyhow::{anyhow, Result};
use chrono::NaiveTime;

/// Format a countdown as zero-padded "HH:MM:SS".
///
/// Hours are not wrapped at 24, so a countdown spanning days stays readable.
/// Negative input clamps to zero.
pub fn format_countdown(secs: i64) -> String {
    let secs = secs.max(0);
    format!(
        "{:02}:{:02}:{:02}",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}

/// Format a NaiveTime to "HH:MM"
pub fn format_time(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

/// Format a window as "HH:MM - HH:MM"
pub fn format_window(start: NaiveTime, end: NaiveTime) -> String {
    format!("{} - {}", format_time(start), format_time(end))
}

/// Parse a time-table clock value such as "04:31", "04:31:12" or "04:31 (WIB)".
///
/// Anything after the first whitespace is a zone label and is dropped.
pub fn parse_clock(raw: &str) -> Result<NaiveTime> {
    let clean = raw
        .split_whitespace()
        .next()
        .ok_or_else(|| anyhow!("Empty time value"))?;
    NaiveTime::parse_from_str(clean, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(clean, "%H:%M"))
        .map_err(|e| anyhow!("Bad time '{}': {}", raw, e))
}

/// Title-case every word: "kota bandung" -> "Kota Bandung".
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_is_zero_padded_and_unwrapped() {
        assert_eq!(format_countdown(0), "00:00:00");
        assert_eq!(format_countdown(9_900), "02:45:00");
        assert_eq!(format_countdown(27_061), "07:31:01");
        assert_eq!(format_countdown(90_000), "25:00:00");
        assert_eq!(format_countdown(-5), "00:00:00");
    }

    #[test]
    fn parse_clock_strips_zone_suffix() {
        let expected = NaiveTime::from_hms_opt(4, 31, 0).unwrap();
        assert_eq!(parse_clock("04:31").unwrap(), expected);
        assert_eq!(parse_clock("04:31 (WIB)").unwrap(), expected);
        assert_eq!(parse_clock("  04:31 (+07)").unwrap(), expected);
        assert_eq!(
            parse_clock("04:31:12").unwrap(),
            NaiveTime::from_hms_opt(4, 31, 12).unwrap()
        );
    }

    #[test]
    fn parse_clock_rejects_garbage() {
        assert!(parse_clock("").is_err());
        assert!(parse_clock("dawn").is_err());
        assert!(parse_clock("25:00").is_err());
    }

    #[test]
    fn title_case_normalizes_city_names() {
        assert_eq!(title_case("bandung"), "Bandung");
        assert_eq!(title_case("KOTA  bandung"), "Kota Bandung");
    }
}
