//! Frozen calculation configuration.
//!
//! A [`CalculationConfig`] is built once per method/school choice and never
//! changes afterwards; the `with_*` methods consume it and return a new one.
//! Per-call inputs live in [`crate::engine::PrayerRequest`].

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::Serialize;

use crate::error::MiqatError;
use crate::method::{CalculationMethod, CustomMethod, Method, MethodParams};
use crate::types::{MidnightMode, Param, PrayerName, School, Shafaq};

/// Method parameters with engine defaults filled in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculationSettings {
    pub imsak: Param,
    pub fajr: Param,
    pub dhuhr: Param,
    pub maghrib: Param,
    pub isha: Param,
    /// Night definition implied by the method.
    pub midnight: MidnightMode,
}

impl CalculationSettings {
    /// Imsak 10 min before Fajr, Fajr and Isha at 0 deg, Maghrib at sunset,
    /// no Dhuhr delay.
    pub fn from_params(params: &MethodParams) -> Self {
        Self {
            imsak: params.imsak.unwrap_or(Param::Minutes(10.0)),
            fajr: params.fajr.unwrap_or(Param::Angle(0.0)),
            dhuhr: params.dhuhr.unwrap_or(Param::Minutes(0.0)),
            maghrib: params.maghrib.unwrap_or(Param::Minutes(0.0)),
            isha: params.isha.unwrap_or(Param::Angle(0.0)),
            midnight: params.midnight.unwrap_or_default(),
        }
    }
}

/// Per-prayer minute offsets added after all other stages.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TuneOffsets(BTreeMap<PrayerName, f64>);

impl TuneOffsets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the offset for `prayer`, replacing any previous value.
    pub fn with(mut self, prayer: PrayerName, minutes: f64) -> Self {
        self.0.insert(prayer, minutes);
        self
    }

    /// Minutes for `prayer`, `0.0` when untuned.
    pub fn minutes(&self, prayer: PrayerName) -> f64 {
        self.0.get(&prayer).copied().unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PrayerName, f64)> + '_ {
        self.0.iter().map(|(&p, &m)| (p, m))
    }
}

impl FromIterator<(PrayerName, f64)> for TuneOffsets {
    fn from_iter<I: IntoIterator<Item = (PrayerName, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Parses `"Fajr=2,Isha=-3"`. Empty input gives no offsets.
impl FromStr for TuneOffsets {
    type Err = MiqatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                let (name, minutes) =
                    entry
                        .split_once('=')
                        .ok_or_else(|| MiqatError::UnknownCode {
                            kind: "tune entry",
                            value: entry.to_string(),
                        })?;
                let prayer: PrayerName = name.parse()?;
                let minutes: f64 = minutes
                    .trim()
                    .parse()
                    .ok()
                    .filter(|m: &f64| m.is_finite())
                    .ok_or_else(|| MiqatError::UnknownCode {
                        kind: "tune minutes",
                        value: minutes.trim().to_string(),
                    })?;
                Ok((prayer, minutes))
            })
            .collect()
    }
}

/// Method, school and tuning for a series of computations.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationConfig {
    method: CalculationMethod,
    definition: Method,
    settings: CalculationSettings,
    school: School,
    asr_shadow_factor: Option<f64>,
    shafaq: Shafaq,
    tune: TuneOffsets,
}

impl CalculationConfig {
    /// `asr_shadow_factor` overrides the school's factor when given.
    pub fn new(method: CalculationMethod, school: School, asr_shadow_factor: Option<f64>) -> Self {
        let definition = method.definition();
        Self {
            method,
            settings: CalculationSettings::from_params(&definition.params),
            definition,
            school,
            asr_shadow_factor,
            shafaq: Shafaq::default(),
            tune: TuneOffsets::default(),
        }
    }

    /// Twilight colour for the moonsighting Isha curve.
    pub fn with_shafaq(mut self, shafaq: Shafaq) -> Self {
        self.shafaq = shafaq;
        self
    }

    /// Switch to CUSTOM with the given parameters. Settings are rebuilt
    /// from `custom` alone; nothing carries over from the previous method.
    pub fn with_custom_method(mut self, custom: CustomMethod) -> Self {
        self.method = CalculationMethod::Custom;
        self.definition = custom.into_method();
        self.settings = CalculationSettings::from_params(&self.definition.params);
        self
    }

    /// Replace the tuning offsets.
    pub fn with_tune(mut self, tune: TuneOffsets) -> Self {
        self.tune = tune;
        self
    }

    pub fn method(&self) -> CalculationMethod {
        self.method
    }

    /// Catalog entry (or custom definition) in effect.
    pub fn definition(&self) -> &Method {
        &self.definition
    }

    pub fn settings(&self) -> &CalculationSettings {
        &self.settings
    }

    pub fn school(&self) -> School {
        self.school
    }

    pub fn shafaq(&self) -> Shafaq {
        self.shafaq
    }

    pub fn tune(&self) -> &TuneOffsets {
        &self.tune
    }

    /// Explicit factor if set, otherwise the school's.
    pub fn asr_shadow_factor(&self) -> f64 {
        self.asr_shadow_factor
            .unwrap_or_else(|| self.school.shadow_factor())
    }
}

impl Default for CalculationConfig {
    fn default() -> Self {
        Self::new(CalculationMethod::default(), School::default(), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_params() {
        let s = CalculationSettings::from_params(&CalculationMethod::Isna.params());
        assert_eq!(s.imsak, Param::Minutes(10.0));
        assert_eq!(s.fajr, Param::Angle(15.0));
        assert_eq!(s.dhuhr, Param::Minutes(0.0));
        assert_eq!(s.maghrib, Param::Minutes(0.0));
        assert_eq!(s.isha, Param::Angle(15.0));
        assert_eq!(s.midnight, MidnightMode::Standard);
    }

    #[test]
    fn jafari_marker_sets_midnight_mode() {
        let c = CalculationConfig::new(CalculationMethod::Tehran, School::Standard, None);
        assert_eq!(c.settings().midnight, MidnightMode::Jafari);
        assert_eq!(c.settings().maghrib, Param::Angle(4.5));
    }

    #[test]
    fn custom_method_rebuilds_settings() {
        let c = CalculationConfig::new(CalculationMethod::Tehran, School::Standard, None)
            .with_custom_method(CustomMethod::new("Mine").fajr_angle(17.0));
        assert_eq!(c.method(), CalculationMethod::Custom);
        assert_eq!(c.definition().id, 99);
        assert_eq!(c.definition().name, "Mine");
        assert_eq!(c.settings().fajr, Param::Angle(17.0));
        // Tehran's Maghrib angle and night mode do not leak.
        assert_eq!(c.settings().maghrib, Param::Minutes(0.0));
        assert_eq!(c.settings().midnight, MidnightMode::Standard);
    }

    #[test]
    fn shadow_factor_override() {
        let c = CalculationConfig::new(CalculationMethod::Mwl, School::Hanafi, None);
        assert_eq!(c.asr_shadow_factor(), 2.0);
        let c = CalculationConfig::new(CalculationMethod::Mwl, School::Hanafi, Some(1.5));
        assert_eq!(c.asr_shadow_factor(), 1.5);
    }

    #[test]
    fn default_is_mwl_standard() {
        let c = CalculationConfig::default();
        assert_eq!(c.method(), CalculationMethod::Mwl);
        assert_eq!(c.school(), School::Standard);
        assert_eq!(c.shafaq(), Shafaq::General);
        assert!(c.tune().is_empty());
    }

    #[test]
    fn parse_tune_list() {
        let t: TuneOffsets = "Fajr=2, Isha=-3,midnight=1.5".parse().unwrap();
        assert_eq!(t.minutes(PrayerName::Fajr), 2.0);
        assert_eq!(t.minutes(PrayerName::Isha), -3.0);
        assert_eq!(t.minutes(PrayerName::Midnight), 1.5);
        assert_eq!(t.minutes(PrayerName::Asr), 0.0);
    }

    #[test]
    fn parse_tune_rejects_garbage() {
        assert!("Fajr".parse::<TuneOffsets>().is_err());
        assert!("Fajr=abc".parse::<TuneOffsets>().is_err());
        assert!("Tahajjud=2".parse::<TuneOffsets>().is_err());
        assert!("".parse::<TuneOffsets>().unwrap().is_empty());
    }
}
