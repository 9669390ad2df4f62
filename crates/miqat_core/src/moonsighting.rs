//! Moonsighting Committee Worldwide seasonal model.
//!
//! Fajr and Isha are fixed minute offsets from sunrise and sunset that vary
//! through the year along a six-segment piecewise-linear curve. The curve's
//! control points grow linearly with `|latitude|`.

use chrono::{Datelike, NaiveDate};

use crate::types::Shafaq;

/// Latitude scale of the control-point slopes.
const LATITUDE_DIVISOR: f64 = 55.0;

/// Control points of one seasonal curve: `a` at the winter solstice, `d` at
/// the summer solstice, `b` and `c` in between.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonalCoefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl SeasonalCoefficients {
    /// `base + slope / 55 * |lat|` for each of the four control points.
    fn scaled(base: f64, slopes: [f64; 4], abs_lat: f64) -> Self {
        let at = |slope: f64| base + slope / LATITUDE_DIVISOR * abs_lat;
        Self {
            a: at(slopes[0]),
            b: at(slopes[1]),
            c: at(slopes[2]),
            d: at(slopes[3]),
        }
    }

    fn fajr(abs_lat: f64) -> Self {
        Self::scaled(75.0, [28.65, 19.44, 32.74, 48.1], abs_lat)
    }

    fn isha(shafaq: Shafaq, abs_lat: f64) -> Self {
        match shafaq {
            Shafaq::General => Self::scaled(75.0, [25.6, 2.05, -9.21, 6.14], abs_lat),
            Shafaq::Ahmer => Self::scaled(62.0, [17.4, -7.16, 5.12, 19.44], abs_lat),
            Shafaq::Abyad => Self::scaled(75.0, [25.6, 7.16, 36.84, 81.84], abs_lat),
        }
    }
}

/// Days since the local winter solstice reference (Dec 21 in the north,
/// Jun 21 otherwise) of the same calendar year.
///
/// Dates after the reference count one day short; dates on or before it
/// wrap by 365. The published tables are built that way and the
/// off-by-one is kept so results match them.
pub fn compute_dyy(date: NaiveDate, latitude_deg: f64) -> i64 {
    let month = if latitude_deg > 0.0 { 12 } else { 6 };
    let diff = NaiveDate::from_ymd_opt(date.year(), month, 21)
        .map(|reference| date.signed_duration_since(reference).num_days())
        .unwrap_or(0);
    if diff > 0 { diff - 1 } else { 365 + diff }
}

/// Piecewise-linear seasonal curve `a -> b -> c -> d -> c -> b -> a` with
/// breakpoints at days 91, 137, 183, 229 and 275.
pub fn interpolate_minutes(dyy: i64, coeffs: SeasonalCoefficients) -> f64 {
    let SeasonalCoefficients { a, b, c, d } = coeffs;
    let day = dyy as f64;
    match dyy {
        ..91 => a + (b - a) / 91.0 * day,
        91..137 => b + (c - b) / 46.0 * (day - 91.0),
        137..183 => c + (d - c) / 46.0 * (day - 137.0),
        183..229 => d + (c - d) / 46.0 * (day - 183.0),
        229..275 => c + (b - c) / 46.0 * (day - 229.0),
        _ => b + (a - b) / 91.0 * (day - 275.0),
    }
}

/// Round half up, the way the published tables round.
fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Minutes from Fajr to sunrise.
pub fn minutes_before_sunrise(date: NaiveDate, latitude_deg: f64) -> f64 {
    let coeffs = SeasonalCoefficients::fajr(latitude_deg.abs());
    round_half_up(interpolate_minutes(compute_dyy(date, latitude_deg), coeffs))
}

/// Minutes from sunset to Isha for the given twilight colour.
pub fn minutes_after_sunset(date: NaiveDate, latitude_deg: f64, shafaq: Shafaq) -> f64 {
    let coeffs = SeasonalCoefficients::isha(shafaq, latitude_deg.abs());
    round_half_up(interpolate_minutes(compute_dyy(date, latitude_deg), coeffs))
}
