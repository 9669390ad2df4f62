//! Prayer names, calculation options, and location types.
//!
//! Every option enum carries a wire code (`code()`) matching the strings an
//! HTTP or CLI front end accepts, and parses back from it case-insensitively.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::MiqatError;

/// Number of entries in [`PrayerName::all`].
pub const PRAYER_COUNT: usize = 11;

/// Find the variant whose code matches `value`, ignoring ASCII case.
pub(crate) fn parse_code<T: Copy>(
    kind: &'static str,
    all: &[T],
    code: fn(T) -> &'static str,
    value: &str,
) -> Result<T, MiqatError> {
    let value = value.trim();
    all.iter()
        .copied()
        .find(|v| code(*v).eq_ignore_ascii_case(value))
        .ok_or_else(|| MiqatError::UnknownCode {
            kind,
            value: value.to_string(),
        })
}

/// The eleven reported times, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum PrayerName {
    Imsak,
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Sunset,
    Maghrib,
    Isha,
    Midnight,
    /// End of the first third of the night.
    #[serde(rename = "Firstthird")]
    FirstThird,
    /// Start of the last third of the night.
    #[serde(rename = "Lastthird")]
    LastThird,
}

const ALL_PRAYERS: [PrayerName; PRAYER_COUNT] = [
    PrayerName::Imsak,
    PrayerName::Fajr,
    PrayerName::Sunrise,
    PrayerName::Dhuhr,
    PrayerName::Asr,
    PrayerName::Sunset,
    PrayerName::Maghrib,
    PrayerName::Isha,
    PrayerName::Midnight,
    PrayerName::FirstThird,
    PrayerName::LastThird,
];

impl PrayerName {
    /// All prayer names in display order.
    pub const fn all() -> &'static [PrayerName; PRAYER_COUNT] {
        &ALL_PRAYERS
    }

    /// Position in display order, usable as an array index.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Display name, as used for result keys.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Imsak => "Imsak",
            Self::Fajr => "Fajr",
            Self::Sunrise => "Sunrise",
            Self::Dhuhr => "Dhuhr",
            Self::Asr => "Asr",
            Self::Sunset => "Sunset",
            Self::Maghrib => "Maghrib",
            Self::Isha => "Isha",
            Self::Midnight => "Midnight",
            Self::FirstThird => "Firstthird",
            Self::LastThird => "Lastthird",
        }
    }
}

impl Display for PrayerName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PrayerName {
    type Err = MiqatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_code("prayer", &ALL_PRAYERS, Self::name, s)
    }
}

/// Juristic school, selecting the Asr shadow factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum School {
    /// Shadow equals object length plus noon shadow (factor 1).
    #[default]
    Standard,
    /// Shadow equals twice the object length plus noon shadow (factor 2).
    Hanafi,
}

impl School {
    pub const fn code(self) -> &'static str {
        match self {
            Self::Standard => "STANDARD",
            Self::Hanafi => "HANAFI",
        }
    }

    /// Asr shadow factor for this school.
    pub const fn shadow_factor(self) -> f64 {
        match self {
            Self::Standard => 1.0,
            Self::Hanafi => 2.0,
        }
    }
}

impl FromStr for School {
    type Err = MiqatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_code("school", &[Self::Standard, Self::Hanafi], Self::code, s)
    }
}

/// Which morning event closes the night for Midnight and the night thirds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MidnightMode {
    /// Night runs from Sunset to Sunrise.
    #[default]
    Standard,
    /// Night runs from Sunset to Fajr.
    Jafari,
}

impl MidnightMode {
    pub const fn code(self) -> &'static str {
        match self {
            Self::Standard => "STANDARD",
            Self::Jafari => "JAFARI",
        }
    }
}

impl FromStr for MidnightMode {
    type Err = MiqatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_code("midnight mode", &[Self::Standard, Self::Jafari], Self::code, s)
    }
}

/// Fallback for Fajr/Isha when twilight is long or never ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LatitudeAdjustment {
    /// Bound by half the night.
    MiddleOfTheNight,
    /// Bound by `angle / 60` of the night.
    #[default]
    AngleBased,
    /// Bound by a seventh of the night.
    OneSeventh,
    /// No bounding.
    None,
}

const ALL_ADJUSTMENTS: [LatitudeAdjustment; 4] = [
    LatitudeAdjustment::MiddleOfTheNight,
    LatitudeAdjustment::AngleBased,
    LatitudeAdjustment::OneSeventh,
    LatitudeAdjustment::None,
];

impl LatitudeAdjustment {
    pub const fn code(self) -> &'static str {
        match self {
            Self::MiddleOfTheNight => "MIDDLE_OF_THE_NIGHT",
            Self::AngleBased => "ANGLE_BASED",
            Self::OneSeventh => "ONE_SEVENTH",
            Self::None => "NONE",
        }
    }

    /// Largest allowed distance (hours) from the base event, for a twilight
    /// `angle` and a night of `night_h` hours. `None` never bounds.
    pub fn night_portion(self, angle_deg: f64, night_h: f64) -> f64 {
        let fraction = match self {
            Self::AngleBased => angle_deg / 60.0,
            Self::OneSeventh => 1.0 / 7.0,
            Self::MiddleOfTheNight | Self::None => 0.5,
        };
        fraction * night_h
    }
}

impl FromStr for LatitudeAdjustment {
    type Err = MiqatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_code("latitude adjustment", &ALL_ADJUSTMENTS, Self::code, s)
    }
}

/// Output format for each prayer time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum TimeFormat {
    /// `"HH:MM"`
    #[default]
    #[serde(rename = "24h")]
    H24,
    /// `"h:MM am"` / `"h:MM pm"`
    #[serde(rename = "12h")]
    H12,
    /// `"h:MM"`, 12-hour clock without suffix.
    #[serde(rename = "12hNS")]
    H12NoSuffix,
    /// Raw fractional hour as a number.
    Float,
    /// `"YYYY-MM-DDTHH:MM:00+HH:MM"`
    #[serde(rename = "iso8601")]
    Iso8601,
}

const ALL_FORMATS: [TimeFormat; 5] = [
    TimeFormat::H24,
    TimeFormat::H12,
    TimeFormat::H12NoSuffix,
    TimeFormat::Float,
    TimeFormat::Iso8601,
];

impl TimeFormat {
    pub const fn code(self) -> &'static str {
        match self {
            Self::H24 => "24h",
            Self::H12 => "12h",
            Self::H12NoSuffix => "12hNS",
            Self::Float => "Float",
            Self::Iso8601 => "iso8601",
        }
    }
}

impl FromStr for TimeFormat {
    type Err = MiqatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_code("time format", &ALL_FORMATS, Self::code, s)
    }
}

/// Twilight colour selecting the moonsighting Isha curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Shafaq {
    #[default]
    General,
    /// Red twilight.
    Ahmer,
    /// White twilight.
    Abyad,
}

impl Shafaq {
    pub const fn code(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Ahmer => "ahmer",
            Self::Abyad => "abyad",
        }
    }
}

impl FromStr for Shafaq {
    type Err = MiqatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_code("shafaq", &[Self::General, Self::Ahmer, Self::Abyad], Self::code, s)
    }
}

/// A method parameter: either a sun depression angle or a fixed minute
/// offset from the neighbouring event (`"<N> min"`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Param {
    /// Degrees below the horizon.
    Angle(f64),
    /// Minutes after (or before, for Imsak) the neighbouring event.
    Minutes(f64),
}

impl Param {
    /// Angle used for the sun-angle solve. Minute offsets solve at 0 deg and
    /// are replaced afterwards.
    pub const fn angle_deg(self) -> f64 {
        match self {
            Self::Angle(a) => a,
            Self::Minutes(_) => 0.0,
        }
    }

    /// The minute offset, if this is a minute parameter.
    pub const fn minutes(self) -> Option<f64> {
        match self {
            Self::Angle(_) => None,
            Self::Minutes(m) => Some(m),
        }
    }

    /// The bare number regardless of kind.
    pub const fn value(self) -> f64 {
        match self {
            Self::Angle(v) | Self::Minutes(v) => v,
        }
    }
}

impl Display for Param {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Angle(a) => write!(f, "{a}"),
            Self::Minutes(m) => write!(f, "{m} min"),
        }
    }
}

impl FromStr for Param {
    type Err = MiqatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parse = |num: &str| -> Result<f64, MiqatError> {
            num.trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| MiqatError::InvalidParam(s.to_string()))
        };
        match s.strip_suffix("min") {
            Some(num) => Ok(Self::Minutes(parse(num)?)),
            None => Ok(Self::Angle(parse(s)?)),
        }
    }
}

impl Serialize for Param {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Angle(a) => serializer.serialize_f64(*a),
            Self::Minutes(_) => serializer.collect_str(self),
        }
    }
}

/// Observer location on Earth's surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoLocation {
    /// Latitude in degrees, north positive.
    pub latitude_deg: f64,
    /// Longitude in degrees, east positive.
    pub longitude_deg: f64,
    /// Height above sea level in meters.
    pub elevation_m: f64,
}

impl GeoLocation {
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
            elevation_m: 0.0,
        }
    }

    pub fn with_elevation(mut self, elevation_m: f64) -> Self {
        self.elevation_m = elevation_m;
        self
    }

    /// Sun depression at sunrise/sunset in degrees.
    ///
    /// `0.833 + 0.0347 * sqrt(h)`: refraction plus semidiameter, and the
    /// horizon dip for an observer `h` meters up. Below sea level there is
    /// no dip, so negative heights use the sea-level angle.
    pub fn rise_set_angle_deg(&self) -> f64 {
        0.833 + 0.0347 * self.elevation_m.max(0.0).sqrt()
    }

    /// Reject coordinates the solar geometry cannot use.
    pub fn validate(&self) -> Result<(), MiqatError> {
        if !self.latitude_deg.is_finite() {
            return Err(MiqatError::InvalidLocation("latitude is not finite"));
        }
        if !self.longitude_deg.is_finite() {
            return Err(MiqatError::InvalidLocation("longitude is not finite"));
        }
        if !self.elevation_m.is_finite() {
            return Err(MiqatError::InvalidLocation("elevation is not finite"));
        }
        Ok(())
    }
}
