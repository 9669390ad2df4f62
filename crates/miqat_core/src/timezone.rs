//! UTC offset resolution against the IANA timezone database.

use chrono::{Local, NaiveDateTime, Offset, TimeZone};
use chrono_tz::Tz;

use crate::error::MiqatError;

/// A timezone pinned to one local instant: its reported name and the UTC
/// offset in effect there.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedZone {
    pub name: String,
    /// Hours east of UTC, e.g. `1.0` for BST, `3.5` for IRST.
    pub offset_hours: f64,
}

impl ResolvedZone {
    /// Resolve `zone` (or the system zone when `None`) at the wall-clock
    /// instant `local`.
    ///
    /// Offsets are DST-aware. A local time skipped by a spring-forward
    /// transition falls back to reading `local` as UTC.
    pub fn resolve(local: NaiveDateTime, zone: Option<&str>) -> Result<Self, MiqatError> {
        match zone {
            Some(name) => {
                let tz: Tz = name
                    .parse()
                    .map_err(|_| MiqatError::UnknownTimezone(name.to_string()))?;
                Ok(Self {
                    name: tz.name().to_string(),
                    offset_hours: offset_hours_at(&tz, local),
                })
            }
            None => Ok(Self {
                name: system_zone_name(),
                offset_hours: offset_hours_at(&Local, local),
            }),
        }
    }
}

fn offset_hours_at<Z: TimeZone>(zone: &Z, local: NaiveDateTime) -> f64 {
    let seconds = zone
        .offset_from_local_datetime(&local)
        .earliest()
        .unwrap_or_else(|| zone.offset_from_utc_datetime(&local))
        .fix()
        .local_minus_utc();
    f64::from(seconds) / 3600.0
}

/// IANA name of the host's zone, `"UTC"` when it cannot be determined.
pub fn system_zone_name() -> String {
    iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string())
}

/// `+HH:MM` / `-HH:MM` for an offset in hours. Minutes round to nearest.
pub fn format_utc_offset(offset_hours: f64) -> String {
    let sign = if offset_hours >= 0.0 { '+' } else { '-' };
    let abs = offset_hours.abs();
    let hours = abs.floor();
    let minutes = ((abs - hours) * 60.0 + 0.5).floor();
    format!("{sign}{:02}:{:02}", hours as i64, minutes as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn london_summer_time() {
        let z = ResolvedZone::resolve(midnight(2014, 4, 24), Some("Europe/London")).unwrap();
        assert_eq!(z.name, "Europe/London");
        assert_eq!(z.offset_hours, 1.0);
    }

    #[test]
    fn london_winter_time() {
        let z = ResolvedZone::resolve(midnight(2014, 1, 15), Some("Europe/London")).unwrap();
        assert_eq!(z.offset_hours, 0.0);
    }

    #[test]
    fn half_hour_zone() {
        let z = ResolvedZone::resolve(midnight(2014, 1, 15), Some("Asia/Tehran")).unwrap();
        assert_eq!(z.offset_hours, 3.5);
    }

    #[test]
    fn negative_zone() {
        let z = ResolvedZone::resolve(midnight(2014, 1, 15), Some("America/New_York")).unwrap();
        assert_eq!(z.offset_hours, -5.0);
    }

    #[test]
    fn unknown_zone_is_an_error() {
        let err = ResolvedZone::resolve(midnight(2014, 1, 15), Some("Mars/Olympus")).unwrap_err();
        assert_eq!(err, MiqatError::UnknownTimezone("Mars/Olympus".into()));
    }

    #[test]
    fn system_zone_resolves() {
        let z = ResolvedZone::resolve(midnight(2014, 1, 15), None).unwrap();
        assert!(!z.name.is_empty());
        assert!(z.offset_hours.abs() <= 14.0);
    }

    #[test]
    fn offset_strings() {
        assert_eq!(format_utc_offset(1.0), "+01:00");
        assert_eq!(format_utc_offset(0.0), "+00:00");
        assert_eq!(format_utc_offset(-5.0), "-05:00");
        assert_eq!(format_utc_offset(5.75), "+05:45");
        assert_eq!(format_utc_offset(-3.5), "-03:30");
    }
}
