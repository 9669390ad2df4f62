//! Prayer-time computation pipeline.
//!
//! A computation runs these stages in a fixed order, each one reading the
//! output of the previous:
//!
//! 1. sun-angle solve from fixed seed hours
//! 2. timezone and longitude correction
//! 3. high-latitude bounding of Imsak, Fajr, Maghrib and Isha
//! 4. minute-offset substitution and the Dhuhr delay
//! 5. Midnight and the night thirds
//! 6. moonsighting Fajr/Isha (MOONSIGHTING only)
//! 7. tuning, then formatting
//!
//! The order matters: the night times are taken before the moonsighting
//! override, and tuning sees the final values.

use std::ops::{Index, IndexMut};

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

use crate::config::{CalculationConfig, CalculationSettings};
use crate::error::MiqatError;
use crate::format::format_time;
use crate::method::CalculationMethod;
use crate::moonsighting;
use crate::output::{CalculationMeta, Computation, PrayerTimes};
use crate::timezone::ResolvedZone;
use crate::types::{
    GeoLocation, LatitudeAdjustment, MidnightMode, PRAYER_COUNT, Param, PrayerName, TimeFormat,
};
use miqat_math::{calendar_to_jd, dmath, fix_hour, sun_position};

/// Seed hour of each solved prayer. Only locates the right part of the day
/// for the slowly varying solar terms; no iteration follows.
const SEED_HOURS: [(PrayerName, f64); 8] = [
    (PrayerName::Imsak, 5.0),
    (PrayerName::Fajr, 5.0),
    (PrayerName::Sunrise, 6.0),
    (PrayerName::Dhuhr, 12.0),
    (PrayerName::Asr, 13.0),
    (PrayerName::Sunset, 18.0),
    (PrayerName::Maghrib, 18.0),
    (PrayerName::Isha, 18.0),
];

/// Inputs for one computation.
#[derive(Debug, Clone, PartialEq)]
pub struct PrayerRequest {
    pub date: NaiveDate,
    /// Local clock time attached to `date`. Feeds the Asr declination and
    /// the instant at which the UTC offset is read.
    pub time_of_day: NaiveTime,
    pub location: GeoLocation,
    pub latitude_adjustment: LatitudeAdjustment,
    /// Overrides the method's night definition when set.
    pub midnight_mode: Option<MidnightMode>,
    pub format: TimeFormat,
    /// IANA zone name; the system zone when `None`.
    pub timezone: Option<String>,
}

impl PrayerRequest {
    /// Midnight of `date`, angle-based adjustment, 24h output, system zone.
    pub fn new(date: NaiveDate, location: GeoLocation) -> Self {
        Self {
            date,
            time_of_day: NaiveTime::default(),
            location,
            latitude_adjustment: LatitudeAdjustment::default(),
            midnight_mode: None,
            format: TimeFormat::default(),
            timezone: None,
        }
    }

    pub fn with_time_of_day(mut self, time: NaiveTime) -> Self {
        self.time_of_day = time;
        self
    }

    pub fn with_latitude_adjustment(mut self, adjustment: LatitudeAdjustment) -> Self {
        self.latitude_adjustment = adjustment;
        self
    }

    pub fn with_midnight_mode(mut self, mode: MidnightMode) -> Self {
        self.midnight_mode = Some(mode);
        self
    }

    pub fn with_format(mut self, format: TimeFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_timezone(mut self, zone: impl Into<String>) -> Self {
        self.timezone = Some(zone.into());
        self
    }
}

/// Unformatted times in local fractional hours; `NaN` where the sun never
/// reaches the required angle. Values may fall outside `[0, 24)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawTimes([f64; PRAYER_COUNT]);

impl RawTimes {
    /// `(name, hours)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (PrayerName, f64)> + '_ {
        PrayerName::all().iter().copied().zip(self.0.iter().copied())
    }
}

impl Index<PrayerName> for RawTimes {
    type Output = f64;

    fn index(&self, prayer: PrayerName) -> &f64 {
        &self.0[prayer.index()]
    }
}

impl IndexMut<PrayerName> for RawTimes {
    fn index_mut(&mut self, prayer: PrayerName) -> &mut f64 {
        &mut self.0[prayer.index()]
    }
}

/// Compute and format all prayer times for `request`.
pub fn compute(
    config: &CalculationConfig,
    request: &PrayerRequest,
) -> Result<Computation, MiqatError> {
    let (raw, zone) = compute_with_zone(config, request)?;

    let values = PrayerName::all()
        .map(|prayer| format_time(raw[prayer], request.format, request.date, zone.offset_hours));

    let latitude_adjustment_method = if config.method() == CalculationMethod::Moonsighting {
        LatitudeAdjustment::None
    } else {
        request.latitude_adjustment
    };

    Ok(Computation {
        times: PrayerTimes::new(values),
        meta: CalculationMeta {
            latitude: request.location.latitude_deg,
            longitude: request.location.longitude_deg,
            timezone: request.timezone.clone().unwrap_or(zone.name),
            method: config.definition().clone(),
            latitude_adjustment_method,
            midnight_mode: midnight_mode(config, request),
            school: config.school(),
            offset: config.tune().clone(),
        },
    })
}

/// Run every stage except formatting.
pub fn compute_raw(
    config: &CalculationConfig,
    request: &PrayerRequest,
) -> Result<RawTimes, MiqatError> {
    compute_with_zone(config, request).map(|(raw, _)| raw)
}

fn midnight_mode(config: &CalculationConfig, request: &PrayerRequest) -> MidnightMode {
    request.midnight_mode.unwrap_or(config.settings().midnight)
}

fn compute_with_zone(
    config: &CalculationConfig,
    request: &PrayerRequest,
) -> Result<(RawTimes, ResolvedZone), MiqatError> {
    let location = &request.location;
    location.validate()?;

    let zone = ResolvedZone::resolve(
        request.date.and_time(request.time_of_day),
        request.timezone.as_deref(),
    )?;
    let settings = config.settings();

    tracing::debug!(
        method = config.method().code(),
        lat = location.latitude_deg,
        lon = location.longitude_deg,
        date = %request.date,
        zone = %zone.name,
        offset_h = zone.offset_hours,
        "computing prayer times"
    );

    let sky = SolarFrame::new(request.date, request.time_of_day, location);
    let mut times = sky.solve(settings, config.asr_shadow_factor());

    // Clock time: zone offset minus the longitude's mean-solar offset.
    let shift = zone.offset_hours - location.longitude_deg / 15.0;
    for (prayer, _) in SEED_HOURS {
        times[prayer] += shift;
    }

    if request.latitude_adjustment != LatitudeAdjustment::None {
        adjust_high_latitudes(&mut times, settings, request.latitude_adjustment);
    }

    apply_minute_offsets(&mut times, settings);
    times[PrayerName::Dhuhr] += settings.dhuhr.value() / 60.0;

    set_night_times(&mut times, midnight_mode(config, request));

    if config.method() == CalculationMethod::Moonsighting {
        let date = request.date;
        let lat = location.latitude_deg;
        times[PrayerName::Fajr] =
            times[PrayerName::Sunrise] - moonsighting::minutes_before_sunrise(date, lat) / 60.0;
        if let Some(minutes) = settings.imsak.minutes() {
            times[PrayerName::Imsak] = times[PrayerName::Fajr] - minutes / 60.0;
        }
        times[PrayerName::Isha] = times[PrayerName::Sunset]
            + moonsighting::minutes_after_sunset(date, lat, config.shafaq()) / 60.0;
    }

    for (prayer, minutes) in config.tune().iter() {
        times[prayer] += minutes / 60.0;
    }

    Ok((times, zone))
}

/// Solar geometry for one date and place.
struct SolarFrame {
    /// Julian date of the calendar day, shifted to local mean time.
    jdate: f64,
    /// Julian date carrying the request's clock time, for Asr.
    asr_jd: f64,
    latitude_deg: f64,
    rise_set_angle_deg: f64,
}

impl SolarFrame {
    fn new(date: NaiveDate, time_of_day: NaiveTime, location: &GeoLocation) -> Self {
        let jd = calendar_to_jd(date.year(), date.month(), f64::from(date.day()));

        let mut day_fraction = f64::from(time_of_day.hour()) / 24.0 - 0.5;
        if day_fraction < 0.0 {
            day_fraction += 1.0;
        }
        let minutes = f64::from(time_of_day.minute()) + f64::from(time_of_day.second()) / 60.0;

        Self {
            jdate: jd - location.longitude_deg / 360.0,
            asr_jd: jd + day_fraction + minutes / 1440.0,
            latitude_deg: location.latitude_deg,
            rise_set_angle_deg: location.rise_set_angle_deg(),
        }
    }

    /// Solar noon in hours, evaluated at day fraction `t`.
    fn mid_day(&self, t: f64) -> f64 {
        fix_hour(12.0 - sun_position(self.jdate + t).equation_of_time_h)
    }

    /// Time at which the sun is `angle_deg` below the horizon, before noon
    /// when `morning` is set and after it otherwise.
    fn sun_angle_time(&self, angle_deg: f64, t: f64, morning: bool) -> f64 {
        let decl = sun_position(self.jdate + t).declination_deg;
        let noon = self.mid_day(t);
        let lat = self.latitude_deg;

        let cos_h = ((-dmath::sin(angle_deg) - dmath::sin(decl) * dmath::sin(lat))
            / (dmath::cos(decl) * dmath::cos(lat)))
        .clamp(-1.0, 1.0);
        let h = dmath::arccos(cos_h) / 15.0;

        if morning { noon - h } else { noon + h }
    }

    fn asr_time(&self, factor: f64, t: f64) -> f64 {
        let decl = sun_position(self.asr_jd + t).declination_deg;
        let angle = -dmath::arccot(factor + dmath::tan((self.latitude_deg - decl).abs()));
        self.sun_angle_time(angle, t, false)
    }

    /// Stage 1: raw local-mean-time hours for the eight solved prayers.
    /// The night entries stay zero until [`set_night_times`].
    fn solve(&self, settings: &CalculationSettings, asr_factor: f64) -> RawTimes {
        let mut times = RawTimes([0.0; PRAYER_COUNT]);
        for (prayer, seed) in SEED_HOURS {
            let t = seed / 24.0;
            times[prayer] = match prayer {
                PrayerName::Imsak => self.sun_angle_time(settings.imsak.angle_deg(), t, true),
                PrayerName::Fajr => self.sun_angle_time(settings.fajr.angle_deg(), t, true),
                PrayerName::Sunrise => self.sun_angle_time(self.rise_set_angle_deg, t, true),
                PrayerName::Dhuhr => self.mid_day(t),
                PrayerName::Asr => self.asr_time(asr_factor, t),
                PrayerName::Sunset => self.sun_angle_time(self.rise_set_angle_deg, t, false),
                PrayerName::Maghrib => self.sun_angle_time(settings.maghrib.angle_deg(), t, false),
                _ => self.sun_angle_time(settings.isha.angle_deg(), t, false),
            };
        }
        times
    }
}

/// Stage 3: keep each twilight time within its allowed share of the night
/// from the sunrise (morning) or sunset (evening) it pairs with.
fn adjust_high_latitudes(
    times: &mut RawTimes,
    settings: &CalculationSettings,
    adjustment: LatitudeAdjustment,
) {
    let sunrise = times[PrayerName::Sunrise];
    let sunset = times[PrayerName::Sunset];
    let night = fix_hour(sunrise - sunset);

    let bounded = [
        (PrayerName::Imsak, settings.imsak, sunrise, true),
        (PrayerName::Fajr, settings.fajr, sunrise, true),
        (PrayerName::Isha, settings.isha, sunset, false),
        (PrayerName::Maghrib, settings.maghrib, sunset, false),
    ];
    for (prayer, param, base, morning) in bounded {
        let time = times[prayer];
        let portion = adjustment.night_portion(param.angle_deg(), night);
        let distance = if morning {
            fix_hour(base - time)
        } else {
            fix_hour(time - base)
        };
        if time.is_nan() || distance > portion {
            let clamped = if morning { base - portion } else { base + portion };
            tracing::trace!(prayer = prayer.name(), raw = time, clamped, "high-latitude bound");
            times[prayer] = clamped;
        }
    }
}

/// Stage 4: fixed-minute parameters replace the angle-based results.
fn apply_minute_offsets(times: &mut RawTimes, settings: &CalculationSettings) {
    if let Param::Minutes(m) = settings.imsak {
        times[PrayerName::Imsak] = times[PrayerName::Fajr] - m / 60.0;
    }
    if let Param::Minutes(m) = settings.maghrib {
        times[PrayerName::Maghrib] = times[PrayerName::Sunset] + m / 60.0;
    }
    if let Param::Minutes(m) = settings.isha {
        times[PrayerName::Isha] = times[PrayerName::Maghrib] + m / 60.0;
    }
}

/// Stage 5: split the night running from Sunset to Sunrise (or to Fajr
/// under the Jafari definition).
fn set_night_times(times: &mut RawTimes, mode: MidnightMode) {
    let sunset = times[PrayerName::Sunset];
    let end = match mode {
        MidnightMode::Jafari => times[PrayerName::Fajr],
        MidnightMode::Standard => times[PrayerName::Sunrise],
    };
    let night = fix_hour(end - sunset);

    times[PrayerName::Midnight] = sunset + night / 2.0;
    times[PrayerName::FirstThird] = sunset + night / 3.0;
    times[PrayerName::LastThird] = sunset + 2.0 * (night / 3.0);
}
