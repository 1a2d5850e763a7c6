//! Conversion between spreadsheet date strings and UTC instants.
//!
//! The spreadsheet shows times as `YYYY-MM-DD HH:MM ZZ`, where `ZZ` is a US
//! zone abbreviation with the Standard/Daylight letter removed (`PT`, `ET`).
//! People editing the sheet then never have to think about which half of the
//! year a date falls in. On import the letter is put back as `S`, the string is
//! parsed as standard time, and one hour is taken off when the date falls in
//! daylight saving time.
//!
//! Daylight saving is always decided against the US Eastern calendar, whatever
//! zone the row names. Dates inside the few hours where Eastern and the named
//! zone disagree come out an hour off. Commit targets expect this convention,
//! so it is kept as is.

use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, TimeZone, Utc};
use chrono_tz::{OffsetComponents, Tz};

use crate::validation::ValidationError;

/// Zone every exported time is shown in. Pacific is the latest US zone, so an
/// end-of-day cutoff there is still the same date everywhere else.
pub const DISPLAY_ZONE: Tz = chrono_tz::America::Los_Angeles;

/// Zone whose daylight saving calendar decides the import correction.
pub const DST_REFERENCE_ZONE: Tz = chrono_tz::America::New_York;

const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Parse a spreadsheet date string into a UTC instant.
///
/// Blank input means "no value" and yields `Ok(None)`. `row` is the visible
/// spreadsheet row, reported back in [`ValidationError::BadDate`].
pub fn to_utc(local: &str, row: usize) -> Result<Option<DateTime<Utc>>, ValidationError> {
    let trimmed = local.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let bad_date = || ValidationError::BadDate {
        row,
        value: trimmed.to_string(),
    };

    let standard = insert_standard_letter(trimmed);
    let (date_time, zone) = standard.rsplit_once(' ').ok_or_else(bad_date)?;
    let offset = standard_offset(zone).ok_or_else(bad_date)?;
    let naive =
        NaiveDateTime::parse_from_str(date_time.trim(), DATE_TIME_FORMAT).map_err(|_| bad_date())?;
    let parsed = offset
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(bad_date)?
        .with_timezone(&Utc);

    if observes_dst(&parsed) {
        Ok(Some(parsed - Duration::hours(1)))
    } else {
        Ok(Some(parsed))
    }
}

/// Render a UTC instant the way the spreadsheet shows it.
///
/// `None` renders as an empty cell.
pub fn to_local(instant: Option<DateTime<Utc>>) -> String {
    let Some(instant) = instant else {
        return String::new();
    };

    let local = instant.with_timezone(&DISPLAY_ZONE);
    let abbreviation = local.format("%Z").to_string();

    format!(
        "{} {}",
        local.format(DATE_TIME_FORMAT),
        strip_season_letter(&abbreviation)
    )
}

fn observes_dst(instant: &DateTime<Utc>) -> bool {
    let reference = instant.with_timezone(&DST_REFERENCE_ZONE);
    reference.offset().dst_offset() != Duration::zero()
}

/// `2015-12-25 09:00 ET` -> `2015-12-25 09:00 EST`
fn insert_standard_letter(s: &str) -> String {
    match s.char_indices().last() {
        Some((idx, _)) => format!("{}S{}", &s[..idx], &s[idx..]),
        None => String::new(),
    }
}

/// `PST` -> `PT`, `PDT` -> `PT`
fn strip_season_letter(abbreviation: &str) -> String {
    let chars: Vec<char> = abbreviation.chars().collect();
    match chars.len().checked_sub(2) {
        Some(idx) if idx > 0 && matches!(chars[idx], 'S' | 'D') => chars
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != idx)
            .map(|(_, c)| c)
            .collect(),
        _ => abbreviation.to_string(),
    }
}

/// UTC offset of a US standard-time zone abbreviation.
fn standard_offset(abbreviation: &str) -> Option<FixedOffset> {
    let hours = match abbreviation.to_ascii_uppercase().as_str() {
        "AST" => -4,
        "EST" => -5,
        "CST" => -6,
        "MST" => -7,
        "PST" => -8,
        "AKST" => -9,
        "HST" => -10,
        _ => return None,
    };
    FixedOffset::east_opt(hours * 3600)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_winter_eastern_time() {
        let parsed = to_utc("2015-12-25 09:00 ET", 2).unwrap();
        assert_eq!(parsed, Some(utc(2015, 12, 25, 14, 0)));
    }

    #[test]
    fn test_summer_date_is_corrected_by_one_hour() {
        let naive_standard = utc(2015, 7, 4, 17, 0);
        let parsed = to_utc("2015-07-04 12:00 ET", 2).unwrap().unwrap();

        assert_eq!(parsed, naive_standard - Duration::hours(1));
        assert_eq!(parsed, utc(2015, 7, 4, 16, 0));
    }

    #[test]
    fn test_pacific_summer_date() {
        let parsed = to_utc("2015-07-04 09:00 PT", 2).unwrap();
        assert_eq!(parsed, Some(utc(2015, 7, 4, 16, 0)));
    }

    #[test]
    fn test_surrounding_whitespace_and_lowercase_zone() {
        let parsed = to_utc("  2015-12-25 09:00 et \t", 2).unwrap();
        assert_eq!(parsed, Some(utc(2015, 12, 25, 14, 0)));
    }

    #[test]
    fn test_blank_passes_through() {
        assert_eq!(to_utc("", 2).unwrap(), None);
        assert_eq!(to_utc("   ", 2).unwrap(), None);
        assert_eq!(to_local(None), "");
    }

    #[test]
    fn test_bad_dates_report_row_and_value() {
        for bad in [
            "2015-13-01 09:00 ET",
            "2015-02-30 09:00 ET",
            "tomorrow",
            "2015-12-25 09:00 XT",
            "2015-12-25 09:00 PDT",
            "2015-12-25 09:00",
            "12/25/2015 09:00 ET",
        ] {
            let err = to_utc(bad, 7).unwrap_err();
            assert_eq!(
                err,
                ValidationError::BadDate {
                    row: 7,
                    value: bad.to_string()
                },
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_to_local_strips_season_letter() {
        assert_eq!(to_local(Some(utc(2015, 12, 25, 14, 0))), "2015-12-25 06:00 PT");
        assert_eq!(to_local(Some(utc(2015, 7, 4, 16, 0))), "2015-07-04 09:00 PT");
    }

    #[test]
    fn test_to_local_crosses_date_line_into_previous_day() {
        assert_eq!(to_local(Some(utc(2016, 1, 1, 3, 30))), "2015-12-31 19:30 PT");
    }

    #[test]
    fn test_round_trip_through_the_year() {
        for month in 1..=12 {
            for (hour, minute) in [(3, 30), (17, 0), (22, 45)] {
                let instant = utc(2015, month, 15, hour, minute);
                let local = to_local(Some(instant));
                let back = to_utc(&local, 2).unwrap();
                assert_eq!(back, Some(instant), "round trip of {instant} via {local:?}");
            }
        }
    }

    #[test]
    fn test_round_trip_drops_seconds() {
        let instant = Utc.with_ymd_and_hms(2015, 10, 1, 18, 5, 42).unwrap();
        let back = to_utc(&to_local(Some(instant)), 2).unwrap().unwrap();

        assert_eq!(back.second(), 0);
        assert_eq!((back.day(), back.hour(), back.minute()), (1, 18, 5));
    }

    #[test]
    fn test_dst_decided_by_eastern_calendar_for_every_zone() {
        // 08:30 UTC on 2015-03-08 is already daylight time in New York but
        // still standard time in Los Angeles.
        let parsed = to_utc("2015-03-08 00:30 PT", 2).unwrap();
        assert_eq!(parsed, Some(utc(2015, 3, 8, 7, 30)));
    }

    #[test]
    fn test_season_letter_helpers() {
        assert_eq!(insert_standard_letter("PT"), "PST");
        assert_eq!(insert_standard_letter("AKT"), "AKST");
        assert_eq!(strip_season_letter("PDT"), "PT");
        assert_eq!(strip_season_letter("AKST"), "AKT");
        assert_eq!(strip_season_letter("UTC"), "UTC");
    }
}
