//! Low-precision solar position: declination and equation of time.
//!
//! Mean anomaly and mean longitude are linear in days since J2000.0; the
//! ecliptic longitude adds the two leading equation-of-centre harmonics and
//! the obliquity drifts linearly. Accuracy is about a minute of arc over a
//! couple of centuries, which is well below a minute of clock time for
//! twilight events.

use crate::dmath::{arcsin, arctan2, cos, fix_angle, fix_hour, sin};
use crate::julian::J2000_JD;

/// Sun's declination and the equation of time at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunPosition {
    /// Apparent declination in degrees.
    pub declination_deg: f64,
    /// Equation of time in hours (mean minus apparent solar time).
    pub equation_of_time_h: f64,
}

/// Solar position at a Julian Date.
pub fn sun_position(jd: f64) -> SunPosition {
    let d = jd - J2000_JD;

    let g = fix_angle(357.529 + 0.985_600_28 * d);
    let q = fix_angle(280.459 + 0.985_647_36 * d);
    let l = fix_angle(q + 1.915 * sin(g) + 0.020 * sin(2.0 * g));
    let e = 23.439 - 0.000_000_36 * d;

    let ra_h = arctan2(cos(e) * sin(l), cos(l)) / 15.0;

    SunPosition {
        declination_deg: arcsin(sin(e) * sin(l)),
        equation_of_time_h: q / 15.0 - fix_hour(ra_h),
    }
}
