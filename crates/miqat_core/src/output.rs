//! Result and metadata types returned by [`crate::engine::compute`].

use std::fmt::{Display, Formatter};
use std::ops::Index;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::config::TuneOffsets;
use crate::method::Method;
use crate::types::{LatitudeAdjustment, MidnightMode, PRAYER_COUNT, PrayerName, School};

/// One formatted time: a string for clock formats, a number for `Float`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TimeValue {
    Text(String),
    /// Fractional hours from local midnight; `NaN` when unresolvable.
    Hours(f64),
}

impl TimeValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Hours(_) => None,
        }
    }

    pub fn as_hours(&self) -> Option<f64> {
        match self {
            Self::Text(_) => None,
            Self::Hours(h) => Some(*h),
        }
    }
}

impl Display for TimeValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Hours(h) => write!(f, "{h}"),
        }
    }
}

/// Formatted times for all eleven prayers.
///
/// Serializes as a map in display order: `{"Imsak": ..., "Lastthird": ...}`.
#[derive(Debug, Clone, PartialEq)]
pub struct PrayerTimes([TimeValue; PRAYER_COUNT]);

impl PrayerTimes {
    pub(crate) fn new(values: [TimeValue; PRAYER_COUNT]) -> Self {
        Self(values)
    }

    pub fn get(&self, prayer: PrayerName) -> &TimeValue {
        &self.0[prayer.index()]
    }

    /// `(name, value)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (PrayerName, &TimeValue)> + '_ {
        PrayerName::all().iter().copied().zip(self.0.iter())
    }
}

impl Index<PrayerName> for PrayerTimes {
    type Output = TimeValue;

    fn index(&self, prayer: PrayerName) -> &TimeValue {
        self.get(prayer)
    }
}

impl Serialize for PrayerTimes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(PRAYER_COUNT))?;
        for (prayer, value) in self.iter() {
            map.serialize_entry(prayer.name(), value)?;
        }
        map.end()
    }
}

/// Echo of the resolved inputs of one computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationMeta {
    pub latitude: f64,
    pub longitude: f64,
    /// Requested zone name, or the system zone when none was given.
    pub timezone: String,
    pub method: Method,
    /// Always `NONE` for MOONSIGHTING, whose Fajr and Isha ignore it.
    pub latitude_adjustment_method: LatitudeAdjustment,
    pub midnight_mode: MidnightMode,
    pub school: School,
    pub offset: TuneOffsets,
}

/// Times plus the metadata describing how they were computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Computation {
    pub times: PrayerTimes,
    pub meta: CalculationMeta,
}
