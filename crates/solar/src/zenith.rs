//! Cosine of the solar zenith angle: instantaneous, step-averaged or
//! step-integrated.

use std::f64::consts::{PI, TAU};

use helios_array::{Broadcast, DataArray};
use helios_calendar::{SECONDS_PER_DAY, TimeAxis};
use helios_units::{Unit, to_radians};
use ndarray::Zip;
use tracing::debug;

use crate::error::SolarError;
use crate::method::{IntervalAnchor, ZenithStat};
use crate::orbit;
use crate::radiation::along_time;

/// Options for [`cosine_of_solar_zenith_angle_with`].
///
/// # Examples
///
/// ```
/// use helios_solar::{IntervalAnchor, ZenithOptions, ZenithStat};
///
/// let opts = ZenithOptions::new()
///     .with_stat(ZenithStat::Average)
///     .with_sunlit(true)
///     .with_anchor(IntervalAnchor::Start);
/// assert!(opts.sunlit());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZenithOptions {
    stat: ZenithStat,
    sunlit: bool,
    anchor: IntervalAnchor,
    time_correction: bool,
}

impl ZenithOptions {
    /// Step average over the whole window, window ending at each timestamp,
    /// no equation-of-time correction.
    pub fn new() -> Self {
        Self {
            stat: ZenithStat::Average,
            sunlit: false,
            anchor: IntervalAnchor::End,
            time_correction: false,
        }
    }

    /// Sets the statistic.
    pub fn with_stat(mut self, stat: ZenithStat) -> Self {
        self.stat = stat;
        self
    }

    /// Restricts the statistic to the sunlit part of each window.
    pub fn with_sunlit(mut self, sunlit: bool) -> Self {
        self.sunlit = sunlit;
        self
    }

    /// Sets the window placement.
    pub fn with_anchor(mut self, anchor: IntervalAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Adds the equation-of-time correction to the hour angle.
    pub fn with_time_correction(mut self, enabled: bool) -> Self {
        self.time_correction = enabled;
        self
    }

    /// Returns the statistic.
    pub fn stat(&self) -> ZenithStat {
        self.stat
    }

    /// Returns whether only the sunlit part of each window counts.
    pub fn sunlit(&self) -> bool {
        self.sunlit
    }

    /// Returns the window placement.
    pub fn anchor(&self) -> IntervalAnchor {
        self.anchor
    }

    /// Returns whether the equation-of-time correction is applied.
    pub fn time_correction(&self) -> bool {
        self.time_correction
    }
}

impl Default for ZenithOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Hour-angle window covered by one time step.
#[derive(Debug, Clone, Copy)]
struct Window {
    /// Width in radians; `None` covers the whole day.
    width: Option<f64>,
    anchor: IntervalAnchor,
}

impl Window {
    fn of(time: &TimeAxis, anchor: IntervalAnchor) -> Self {
        let width = time
            .step_seconds()
            .filter(|&s| s > 0 && s < SECONDS_PER_DAY)
            .map(|s| TAU * s as f64 / SECONDS_PER_DAY as f64);
        Self { width, anchor }
    }

    fn width(&self) -> f64 {
        self.width.unwrap_or(TAU)
    }

    /// Window for the timestamp at `hour_angle`, split at the ±π seam.
    /// The second piece is empty when no split is needed.
    fn pieces(&self, hour_angle: f64) -> [(f64, f64); 2] {
        let Some(width) = self.width else {
            return [(-PI, PI), (PI, PI)];
        };
        let start = match self.anchor {
            IntervalAnchor::Start => hour_angle,
            IntervalAnchor::End => hour_angle - width,
        };
        let start = orbit::wrap_hour_angle(start);
        let end = start + width;
        if end > PI {
            [(start, PI), (-PI, end - TAU)]
        } else {
            [(start, end), (end, end)]
        }
    }

    fn evaluate(&self, hour_angle: f64, dec: f64, lat: f64, stat: ZenithStat, sunlit: bool) -> f64 {
        if stat == ZenithStat::Instant {
            let cos = orbit::zenith_cosine(dec, lat, orbit::wrap_hour_angle(hour_angle));
            return if sunlit { cos.max(0.0) } else { cos };
        }
        let pieces = self.pieces(hour_angle);
        if !sunlit {
            let integral: f64 = pieces
                .iter()
                .map(|&(a, b)| orbit::zenith_integral(dec, lat, a, b))
                .sum();
            return match stat {
                ZenithStat::Integral => integral,
                _ => integral / self.width(),
            };
        }
        let ws = orbit::sunset_hour_angle(dec, lat);
        let (integral, length) = pieces
            .iter()
            .map(|&(a, b)| (a.max(-ws), b.min(ws)))
            .filter(|(a, b)| b > a)
            .fold((0.0, 0.0), |(sum, len), (a, b)| {
                (sum + orbit::zenith_integral(dec, lat, a, b), len + (b - a))
            });
        match stat {
            ZenithStat::Integral => integral,
            _ if length > 0.0 => integral / length,
            _ => 0.0,
        }
    }
}

/// Cosine of the solar zenith angle with the default window placement.
///
/// See [`cosine_of_solar_zenith_angle_with`].
///
/// # Errors
///
/// Returns [`SolarError::Unit`] if an angle input lacks angle units.
pub fn cosine_of_solar_zenith_angle(
    time: &TimeAxis,
    declination: &DataArray,
    lat: &DataArray,
    lon: &DataArray,
    stat: ZenithStat,
    sunlit: bool,
) -> Result<DataArray, SolarError> {
    let opts = ZenithOptions::new().with_stat(stat).with_sunlit(sunlit);
    cosine_of_solar_zenith_angle_with(time, declination, lat, lon, &opts)
}

/// Cosine of the solar zenith angle over `time`.
///
/// The local hour angle of each timestamp is `15°·(hour − 12) + lon`, plus
/// the equation of time when enabled. `Average` and `Integral` integrate the
/// zenith cosine analytically over the hour angles of one time step, or the
/// whole day for daily (or single-sample) axes. With `sunlit`, only the part
/// of the window between sunrise and sunset counts and the average is taken
/// over that part; fully dark windows yield 0.
///
/// `declination`, `lat` and `lon` are angle arrays; they broadcast with the
/// time axis by dimension name.
///
/// # Errors
///
/// Returns [`SolarError::Unit`] if an angle input lacks angle units, or
/// [`SolarError::Array`] if the inputs do not broadcast.
#[tracing::instrument(skip_all, fields(n = time.len(), stat = %opts.stat, sunlit = opts.sunlit))]
pub fn cosine_of_solar_zenith_angle_with(
    time: &TimeAxis,
    declination: &DataArray,
    lat: &DataArray,
    lon: &DataArray,
    opts: &ZenithOptions,
) -> Result<DataArray, SolarError> {
    let dec = to_radians(declination)?;
    let lat = to_radians(lat)?;
    let lon = to_radians(lon)?;

    let day_angle = time.day_angle();
    let base: Vec<f64> = time
        .iter()
        .zip(day_angle)
        .map(|(t, theta)| {
            let correction = if opts.time_correction {
                orbit::equation_of_time(theta)
            } else {
                0.0
            };
            (15.0 * (t.hours_of_day() - 12.0)).to_radians() + correction
        })
        .collect();
    let base = along_time(time, base)?;

    let window = Window::of(time, opts.anchor);
    debug!(width = window.width(), anchor = %opts.anchor, "zenith window");

    let joint = Broadcast::new(&[&base, &dec, &lat, &lon])?;
    let v = joint.values();
    let (stat, sunlit) = (opts.stat, opts.sunlit);
    let out = Zip::from(&v[0])
        .and(&v[1])
        .and(&v[2])
        .and(&v[3])
        .map_collect(|&h, &d, &phi, &lambda| window.evaluate(h + lambda, d, phi, stat, sunlit));
    Ok(joint
        .finish(out)?
        .with_name("cosine_of_solar_zenith_angle")
        .with_units(Unit::Dimensionless.symbol()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn hourly(width_hours: f64) -> Window {
        Window {
            width: Some(TAU * width_hours / 24.0),
            anchor: IntervalAnchor::Start,
        }
    }

    #[test]
    fn defaults() {
        let o = ZenithOptions::default();
        assert_eq!(o.stat(), ZenithStat::Average);
        assert!(!o.sunlit());
        assert_eq!(o.anchor(), IntervalAnchor::End);
        assert!(!o.time_correction());
    }

    #[test]
    fn builder_chaining() {
        let o = ZenithOptions::new()
            .with_stat(ZenithStat::Integral)
            .with_sunlit(true)
            .with_anchor(IntervalAnchor::Start)
            .with_time_correction(true);
        assert_eq!(o.stat(), ZenithStat::Integral);
        assert!(o.sunlit());
        assert_eq!(o.anchor(), IntervalAnchor::Start);
        assert!(o.time_correction());
    }

    #[test]
    fn window_splits_at_seam() {
        let w = hourly(2.0);
        let [(a, b), (c, d)] = w.pieces(PI - 0.1);
        assert_abs_diff_eq!(a, PI - 0.1, epsilon = 1e-12);
        assert_abs_diff_eq!(b, PI, epsilon = 1e-12);
        assert_abs_diff_eq!(c, -PI, epsilon = 1e-12);
        assert_abs_diff_eq!((b - a) + (d - c), TAU / 12.0, epsilon = 1e-12);
    }

    #[test]
    fn end_anchor_shifts_window_back() {
        let start = hourly(1.0);
        let end = Window {
            anchor: IntervalAnchor::End,
            ..start
        };
        let [(a, _), _] = end.pieces(0.5);
        let [(c, _), _] = start.pieces(0.5 - TAU / 24.0);
        assert_abs_diff_eq!(a, c, epsilon = 1e-12);
    }

    #[test]
    fn dark_window_averages_to_zero_when_sunlit() {
        // Equinox at the equator: sunset at π/2; a window around midnight.
        let w = hourly(1.0);
        let v = w.evaluate(PI - 0.3, 0.0, 0.0, ZenithStat::Average, true);
        assert_abs_diff_eq!(v, 0.0);
        let night = w.evaluate(PI - 0.3, 0.0, 0.0, ZenithStat::Average, false);
        assert!(night < 0.0);
    }

    #[test]
    fn whole_day_average_matches_daily_integral() {
        let w = Window {
            width: None,
            anchor: IntervalAnchor::End,
        };
        let (dec, lat) = (0.3, 0.8);
        let avg = w.evaluate(1.0, dec, lat, ZenithStat::Average, false);
        assert_abs_diff_eq!(avg, lat.sin() * dec.sin(), epsilon = 1e-12);
        let sunlit = w.evaluate(1.0, dec, lat, ZenithStat::Integral, true);
        assert_abs_diff_eq!(sunlit, orbit::daily_sunlit_integral(dec, lat), epsilon = 1e-12);
    }

    #[test]
    fn instant_sunlit_clips() {
        let w = hourly(1.0);
        assert_abs_diff_eq!(w.evaluate(PI - 0.1, 0.0, 0.0, ZenithStat::Instant, true), 0.0);
        assert_abs_diff_eq!(
            w.evaluate(0.0, 0.0, 0.0, ZenithStat::Instant, false),
            1.0,
            epsilon = 1e-12
        );
    }
}
