//! Islamic prayer-time engine.
//!
//! This crate provides:
//! - A catalog of 24 calculation methods plus user-defined ones
//! - The Moonsighting Committee seasonal Fajr/Isha model
//! - A staged computation pipeline with high-latitude fallbacks
//! - Timezone-aware formatting (24h, 12h, 12hNS, Float, ISO 8601)
//!
//! Configuration is an immutable [`CalculationConfig`]; each call to
//! [`compute`] takes a [`PrayerRequest`] and returns a fresh
//! [`Computation`].

pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod method;
pub mod moonsighting;
pub mod output;
pub mod timezone;
pub mod types;

pub use config::{CalculationConfig, CalculationSettings, TuneOffsets};
pub use engine::{PrayerRequest, RawTimes, compute, compute_raw};
pub use error::MiqatError;
pub use format::{INVALID_TIME, format_time};
pub use method::{
    CalculationMethod, CustomMethod, Method, MethodParams, ReferenceLocation, list_method_codes,
    list_methods,
};
pub use moonsighting::{
    compute_dyy, interpolate_minutes, minutes_after_sunset, minutes_before_sunrise,
};
pub use output::{CalculationMeta, Computation, PrayerTimes, TimeValue};
pub use timezone::{ResolvedZone, format_utc_offset};
pub use types::{
    GeoLocation, LatitudeAdjustment, MidnightMode, PRAYER_COUNT, Param, PrayerName, School, Shafaq,
    TimeFormat,
};
