//! Math primitives for prayer-time computation.
//!
//! This crate provides:
//! - Degree-domain trigonometry with clamped inverses (`dmath`)
//! - Gregorian calendar to Julian Date (`julian`)
//! - Sun declination and equation of time (`solar`)
//!
//! No external dependencies.

pub mod dmath;
pub mod julian;
pub mod solar;

pub use dmath::{fix, fix_angle, fix_hour};
pub use julian::{J2000_JD, calendar_to_jd};
pub use solar::{SunPosition, sun_position};
