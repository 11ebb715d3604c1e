//! Day-serial conversion
//!
//! A day-serial counts days since 1899-12-30 (not the 31st). Pure dates are
//! whole numbers; a time of day contributes a fraction of a day. Pure times
//! have no date part and serialize to a fraction in `[0, 1)`.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::schema::DataType;

/// Microseconds in one day
const MICROS_PER_DAY: f64 = 86_400_000_000.0;

/// Seconds in one day
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Tolerance for serial equality, well under one second
pub const SERIAL_EPSILON: f64 = 1e-9;

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";
pub const DEFAULT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M:%S";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%y %H:%M:%S%.f",
];

// Two-digit years are tried first: "%Y" would read "18" as year 18.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%y", "%m/%d/%Y", "%b %d %y", "%b %d %Y"];

const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M", "%I:%M %p", "%I:%M:%S %p"];

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::default())
}

/// Serial zero
fn epoch_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or_default()
}

/// Anchor for rendering pure times
fn time_reference() -> NaiveDateTime {
    midnight(NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or_default())
}

/// Whole days between the epoch and `date`
pub fn date_to_serial(date: NaiveDate) -> f64 {
    (date - epoch_date()).num_days() as f64
}

/// Days plus fractional day between the epoch and `at`
pub fn datetime_to_serial(at: NaiveDateTime) -> f64 {
    let delta = at - midnight(epoch_date());
    match delta.num_microseconds() {
        Some(micros) => micros as f64 / MICROS_PER_DAY,
        None => delta.num_seconds() as f64 / SECONDS_PER_DAY,
    }
}

/// Fraction of a day elapsed at `time`
pub fn time_to_serial(time: NaiveTime) -> f64 {
    let seconds = time.num_seconds_from_midnight() as f64 + time.nanosecond() as f64 / 1e9;
    seconds / SECONDS_PER_DAY
}

/// Calendar date and time for a serial, anchored at the epoch
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() {
        return None;
    }
    let micros = (serial * MICROS_PER_DAY).round();
    if micros.abs() >= i64::MAX as f64 {
        return None;
    }
    midnight(epoch_date()).checked_add_signed(Duration::microseconds(micros as i64))
}

/// Time-of-day for a serial, anchored at the time reference date
pub fn serial_to_time(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() {
        return None;
    }
    let micros = (serial.rem_euclid(1.0) * MICROS_PER_DAY).round() as i64;
    time_reference().checked_add_signed(Duration::microseconds(micros))
}

/// Parses calendar text into the serial form of `data_type`.
///
/// Dates truncate to whole days; date-times keep the fractional day;
/// times keep only the fraction.
pub fn parse_serial(text: &str, data_type: DataType) -> Option<f64> {
    let text = text.trim();
    match data_type {
        DataType::Date => parse_date(text)
            .or_else(|| parse_datetime(text).map(|at| at.date()))
            .map(date_to_serial),
        DataType::DateTime => parse_datetime(text)
            .or_else(|| parse_date(text).map(midnight))
            .map(datetime_to_serial),
        DataType::Time => parse_time(text).map(time_to_serial),
        _ => None,
    }
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}

fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
}

fn parse_time(text: &str) -> Option<NaiveTime> {
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(text, format).ok())
}

/// Default display format for a temporal type
pub fn default_format(data_type: DataType) -> &'static str {
    match data_type {
        DataType::Time => DEFAULT_TIME_FORMAT,
        DataType::DateTime => DEFAULT_DATETIME_FORMAT,
        _ => DEFAULT_DATE_FORMAT,
    }
}

/// Renders a serial for textual comparison.
///
/// The result is lowercased so month names and meridiems compare against
/// lowercase query tokens. A format chrono cannot render falls back to the
/// type's default.
pub fn render_serial(serial: f64, data_type: DataType, format: Option<&str>) -> Option<String> {
    let at = match data_type {
        DataType::Time => serial_to_time(serial)?,
        DataType::Date | DataType::DateTime => serial_to_datetime(serial)?,
        _ => return None,
    };

    format
        .and_then(|f| format_with(&at, f))
        .or_else(|| format_with(&at, default_format(data_type)))
        .map(|s| s.to_lowercase())
}

fn format_with(at: &NaiveDateTime, format: &str) -> Option<String> {
    let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return None;
    }
    let mut out = String::new();
    write!(out, "{}", at.format_with_items(items.iter())).ok()?;
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_epoch_is_zero() {
        assert_eq!(date_to_serial(date(1899, 12, 30)), 0.0);
        assert_eq!(date_to_serial(date(1899, 12, 31)), 1.0);
    }

    #[test]
    fn test_known_serial() {
        assert_eq!(date_to_serial(date(2018, 3, 9)), 43168.0);
        assert_eq!(date_to_serial(date(2014, 1, 1)), 41640.0);
    }

    #[test]
    fn test_date_round_trip() {
        for d in [date(2018, 3, 9), date(1899, 12, 30), date(2000, 2, 29)] {
            let serial = date_to_serial(d);
            assert_eq!(serial_to_datetime(serial).unwrap().date(), d);
        }
    }

    #[test]
    fn test_datetime_round_trip() {
        let at = date(2014, 1, 1).and_hms_opt(1, 2, 3).unwrap();
        let serial = datetime_to_serial(at);
        assert!(serial > 41640.0 && serial < 41641.0);
        let back = serial_to_datetime(serial).unwrap();
        assert!((back - at).num_milliseconds().abs() < 1000);
    }

    #[test]
    fn test_time_serial_is_fraction() {
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        assert!((time_to_serial(noon) - 0.5).abs() < SERIAL_EPSILON);
        let back = serial_to_time(0.5).unwrap();
        assert_eq!(back.time(), noon);
        assert_eq!(back.date(), date(1900, 1, 1));
    }

    #[test]
    fn test_parse_date_forms() {
        assert_eq!(parse_serial("3/9/18", DataType::Date), Some(43168.0));
        assert_eq!(parse_serial("03/09/2018", DataType::Date), Some(43168.0));
        assert_eq!(parse_serial("2018-03-09", DataType::Date), Some(43168.0));
        assert_eq!(parse_serial("mar 9 2018", DataType::Date), Some(43168.0));
        assert_eq!(parse_serial("Mar 9 18", DataType::Date), Some(43168.0));
        assert_eq!(parse_serial("buy 12 2014", DataType::Date), None);
    }

    #[test]
    fn test_parse_date_truncates_time() {
        assert_eq!(parse_serial("2014-01-01 01:02:03", DataType::Date), Some(41640.0));
    }

    #[test]
    fn test_parse_datetime_keeps_fraction() {
        let serial = parse_serial("2014-01-01 01:02:03", DataType::DateTime).unwrap();
        let expected = 41640.0 + (3723.0 / 86400.0);
        assert!((serial - expected).abs() < SERIAL_EPSILON);

        let fractional = parse_serial("2014-01-01 01:02:03.5", DataType::DateTime).unwrap();
        assert!(fractional > serial);
    }

    #[test]
    fn test_parse_time() {
        let serial = parse_serial("01:02:03", DataType::Time).unwrap();
        assert!((serial - 3723.0 / 86400.0).abs() < SERIAL_EPSILON);
        assert!(parse_serial("25:99:00", DataType::Time).is_none());
    }

    #[test]
    fn test_non_temporal_type_never_parses() {
        assert!(parse_serial("2018-03-09", DataType::String).is_none());
    }

    #[test]
    fn test_render_lowercases() {
        let rendered = render_serial(43168.0, DataType::Date, Some("%b %d %Y")).unwrap();
        assert_eq!(rendered, "mar 09 2018");
    }

    #[test]
    fn test_render_defaults() {
        assert_eq!(render_serial(43168.0, DataType::Date, None).unwrap(), "2018-03-09");
        let serial = parse_serial("2014-01-01 01:02:03", DataType::DateTime).unwrap();
        assert_eq!(
            render_serial(serial, DataType::DateTime, None).unwrap(),
            "2014-01-01 01:02:03"
        );
        let time = parse_serial("13:30:00", DataType::Time).unwrap();
        assert_eq!(render_serial(time, DataType::Time, Some("%I:%M %p")).unwrap(), "01:30 pm");
    }

    #[test]
    fn test_render_bad_format_falls_back() {
        let rendered = render_serial(43168.0, DataType::Date, Some("%Q")).unwrap();
        assert_eq!(rendered, "2018-03-09");
    }

    #[test]
    fn test_render_non_finite() {
        assert!(render_serial(f64::NAN, DataType::Date, None).is_none());
        assert!(render_serial(1.0, DataType::Integer, None).is_none());
    }
}
