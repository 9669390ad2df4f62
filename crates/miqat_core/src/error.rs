//! Error types for prayer-time calculations.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from configuring or running a prayer-time computation.
///
/// Geometry that has no solution (polar day/night) is not an error: the
/// affected prayers come back as the invalid-time sentinel.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum MiqatError {
    /// Latitude, longitude or elevation is not a usable number.
    InvalidLocation(&'static str),
    /// IANA zone name not present in the timezone database.
    UnknownTimezone(String),
    /// A string code did not name any known variant.
    UnknownCode { kind: &'static str, value: String },
    /// A method parameter literal is neither `"<N>"` nor `"<N> min"`.
    InvalidParam(String),
}

impl Display for MiqatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLocation(msg) => write!(f, "invalid location: {msg}"),
            Self::UnknownTimezone(name) => write!(f, "unknown timezone: {name}"),
            Self::UnknownCode { kind, value } => write!(f, "unknown {kind}: {value}"),
            Self::InvalidParam(msg) => write!(f, "invalid method parameter: {msg}"),
        }
    }
}

impl Error for MiqatError {}
