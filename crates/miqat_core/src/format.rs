//! Rendering raw fractional hours in the supported output formats.

use chrono::{NaiveDate, NaiveTime, TimeDelta};

use crate::output::TimeValue;
use crate::timezone::format_utc_offset;
use crate::types::TimeFormat;
use miqat_math::fix_hour;

/// Placeholder for a time with no astronomical solution.
pub const INVALID_TIME: &str = "-----";

/// Render `hours` (local fractional hours from midnight of `date`).
///
/// `Float` passes the value through untouched, NaN included. Clock formats
/// round to the nearest minute and wrap into a single day. `Iso8601` keeps
/// the day overflow, so times past midnight land on the next date.
pub fn format_time(hours: f64, format: TimeFormat, date: NaiveDate, offset_hours: f64) -> TimeValue {
    if format == TimeFormat::Float {
        return TimeValue::Hours(hours);
    }
    if !hours.is_finite() {
        return TimeValue::Text(INVALID_TIME.to_string());
    }
    let text = match format {
        TimeFormat::Iso8601 => iso8601(hours, date, offset_hours),
        clock => clock_time(hours, clock),
    };
    TimeValue::Text(text)
}

fn clock_time(hours: f64, format: TimeFormat) -> String {
    let t = fix_hour(hours + 0.5 / 60.0);
    let h = t.floor();
    let m = ((t - h) * 60.0).floor() as u32;
    let h = h as u32 % 24;
    let h12 = (h + 11) % 12 + 1;
    match format {
        TimeFormat::H12 => {
            let suffix = if h < 12 { "am" } else { "pm" };
            format!("{h12}:{m:02} {suffix}")
        }
        TimeFormat::H12NoSuffix => format!("{h12}:{m:02}"),
        _ => format!("{h:02}:{m:02}"),
    }
}

fn iso8601(hours: f64, date: NaiveDate, offset_hours: f64) -> String {
    let minutes = (hours * 60.0 + 0.5).floor() as i64;
    TimeDelta::try_minutes(minutes)
        .and_then(|delta| date.and_time(NaiveTime::default()).checked_add_signed(delta))
        .map(|stamp| {
            format!(
                "{}{}",
                stamp.format("%Y-%m-%dT%H:%M:00"),
                format_utc_offset(offset_hours)
            )
        })
        .unwrap_or_else(|| INVALID_TIME.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2014, 4, 24).unwrap()
    }

    fn text(hours: f64, format: TimeFormat) -> String {
        format_time(hours, format, day(), 1.0)
            .as_text()
            .map(str::to_string)
            .unwrap_or_default()
    }

    #[test]
    fn clock_rounds_to_nearest_minute() {
        assert_eq!(text(3.9466, TimeFormat::H24), "03:57");
        assert_eq!(text(12.0 + 29.6 / 60.0, TimeFormat::H24), "12:30");
        assert_eq!(text(12.0 + 29.4 / 60.0, TimeFormat::H24), "12:29");
    }

    #[test]
    fn clock_wraps_past_midnight() {
        assert_eq!(text(24.985, TimeFormat::H24), "00:59");
        assert_eq!(text(-0.5, TimeFormat::H24), "23:30");
        assert_eq!(text(23.999, TimeFormat::H24), "00:00");
    }

    #[test]
    fn twelve_hour_clock() {
        assert_eq!(text(3.9466, TimeFormat::H12), "3:57 am");
        assert_eq!(text(0.5, TimeFormat::H12), "12:30 am");
        assert_eq!(text(12.5, TimeFormat::H12), "12:30 pm");
        assert_eq!(text(16.92, TimeFormat::H12), "4:55 pm");
        assert_eq!(text(16.92, TimeFormat::H12NoSuffix), "4:55");
    }

    #[test]
    fn float_passes_through() {
        assert_eq!(
            format_time(24.985, TimeFormat::Float, day(), 1.0).as_hours(),
            Some(24.985)
        );
        let nan = format_time(f64::NAN, TimeFormat::Float, day(), 1.0);
        assert!(nan.as_hours().is_some_and(f64::is_nan));
    }

    #[test]
    fn nan_renders_placeholder() {
        for f in [
            TimeFormat::H24,
            TimeFormat::H12,
            TimeFormat::H12NoSuffix,
            TimeFormat::Iso8601,
        ] {
            assert_eq!(text(f64::NAN, f), INVALID_TIME, "{}", f.code());
        }
    }

    #[test]
    fn iso_rolls_date() {
        assert_eq!(text(3.25, TimeFormat::Iso8601), "2014-04-24T03:15:00+01:00");
        assert_eq!(text(24.07, TimeFormat::Iso8601), "2014-04-25T00:04:00+01:00");
        assert_eq!(
            text(-5.0 / 60.0, TimeFormat::Iso8601),
            "2014-04-23T23:55:00+01:00"
        );
    }

    #[test]
    fn iso_negative_offset() {
        let v = format_time(6.5, TimeFormat::Iso8601, day(), -4.0);
        assert_eq!(v.as_text(), Some("2014-04-24T06:30:00-04:00"));
    }
}
