//! Diurnal temperature curve from daily extremes and day length.

use std::f64::consts::PI;

use helios_array::{ArrayError, Broadcast, Chunks, DataArray};
use helios_calendar::{CalendarDateTime, SECONDS_PER_DAY, TimeAxis};
use helios_solar::day_lengths;
use helios_units::{Dimension, convert_like, ensure_dimension, gather_coord};
use ndarray::{ArrayD, ArrayView1, ArrayViewMut1, Axis, IxDyn, Zip};
use tracing::debug;

use crate::config::SubdailyConfig;
use crate::error::SubdailyError;

/// Shortest night the curve allows, in hours.
const MIN_NIGHT_HOURS: f64 = 1.0;

/// Temperature `hour` hours after midnight.
///
/// Sinusoidal rise from `tmin` towards `tmax` while the sun is up, then a
/// logarithmic decay from the sunset temperature to `next_tmin`, reached
/// at the following midnight. Day lengths are capped at
/// `24 - MIN_NIGHT_HOURS` so that polar days still end on `next_tmin`.
pub fn diurnal_temperature(tmax: f64, tmin: f64, next_tmin: f64, day_length: f64, hour: f64) -> f64 {
    let day_length = day_length.min(24.0 - MIN_NIGHT_HOURS);
    let rise = |h: f64| tmin + (tmax - tmin) * (PI * h / (day_length + 4.0)).sin();
    if hour <= day_length {
        return rise(hour);
    }
    let sunset = rise(day_length);
    sunset - (sunset - next_tmin) * (hour - day_length + 1.0).ln() / (25.0 - day_length).ln()
}

fn fill_lane(
    tmax: ArrayView1<'_, f64>,
    tmin: ArrayView1<'_, f64>,
    day_length: ArrayView1<'_, f64>,
    mut out: ArrayViewMut1<'_, f64>,
    steps: usize,
) {
    let days = tmax.len();
    for d in 0..days {
        let next_tmin = if d + 1 < days { tmin[d + 1] } else { tmin[d] };
        for k in 0..steps {
            let hour = 24.0 * k as f64 / steps as f64;
            out[d * steps + k] = diurnal_temperature(tmax[d], tmin[d], next_tmin, day_length[d], hour);
        }
    }
}

fn input_name(array: &DataArray, fallback: &str) -> String {
    array.name().unwrap_or(fallback).to_string()
}

/// Interpolates daily `tasmax`/`tasmin` to the configured number of steps
/// per day, taking latitude from a `lat` coordinate on either input.
///
/// # Errors
///
/// Returns [`SubdailyError::Unit`] if neither input carries `lat`, and the
/// errors of [`make_subdaily_temperature`].
pub fn make_hourly_temperature(
    tasmax: &DataArray,
    tasmin: &DataArray,
    config: &SubdailyConfig,
) -> Result<DataArray, SubdailyError> {
    let lat = gather_coord(&[tasmax, tasmin], "lat")?;
    make_subdaily_temperature(tasmax, tasmin, &lat, config)
}

/// Interpolates daily `tasmax`/`tasmin` to `config.steps_per_day()` steps
/// per day at latitude `lat`.
///
/// The output keeps the units of `tasmax` (`tasmin` is converted to them),
/// every non-time dimension and the partitioning of the inputs; its time
/// axis starts at midnight of the first day. The last day decays towards
/// its own minimum.
///
/// Partitioned inputs are evaluated here rather than deferred. The result
/// holds the interpolated values with partition metadata stretched along
/// time, so downstream resampling still sees a partitioned array.
///
/// # Errors
///
/// Returns [`SubdailyError::InvalidConfig`] for an invalid configuration,
/// [`SubdailyError::MissingTimeCoordinate`] or [`SubdailyError::NotDaily`]
/// for unsuitable inputs, and unit errors for non-temperature inputs or a
/// non-angle latitude.
#[tracing::instrument(skip_all, fields(steps_per_day = config.steps_per_day()))]
pub fn make_subdaily_temperature(
    tasmax: &DataArray,
    tasmin: &DataArray,
    lat: &DataArray,
    config: &SubdailyConfig,
) -> Result<DataArray, SubdailyError> {
    config.validate()?;
    let (time_dim, axis) = tasmax
        .time()
        .ok_or_else(|| SubdailyError::MissingTimeCoordinate {
            name: input_name(tasmax, "tasmax"),
        })?;
    let time_dim = time_dim.to_string();
    if let Some(step) = axis.step_seconds()
        && step != SECONDS_PER_DAY
    {
        return Err(SubdailyError::NotDaily { step });
    }

    ensure_dimension(tasmax, Dimension::Temperature)?;
    let units = tasmax.units().unwrap_or_default().to_string();
    let tasmin_conv = convert_like(tasmin, tasmax)?;
    let day_length = day_lengths(axis, lat, config.method())?;

    let joint = Broadcast::new(&[tasmax, &tasmin_conv, &day_length])?;
    let t = joint
        .dims()
        .iter()
        .position(|d| *d == time_dim)
        .ok_or_else(|| ArrayError::DimensionNotFound {
            dim: time_dim.clone(),
        })?;

    let steps = config.steps_per_day() as usize;
    let mut shape = joint.shape().to_vec();
    shape[t] *= steps;
    debug!(days = axis.len(), steps, "interpolating daily extremes");

    let mut data = ArrayD::<f64>::zeros(IxDyn(&shape));
    let v = joint.values();
    Zip::from(v[0].lanes(Axis(t)))
        .and(v[1].lanes(Axis(t)))
        .and(v[2].lanes(Axis(t)))
        .and(data.lanes_mut(Axis(t)))
        .for_each(|tmax, tmin, dl, out| fill_lane(tmax, tmin, dl, out, steps));

    let hourly = subdaily_axis(axis, config)?;
    let mut out = DataArray::new(joint.dims().to_vec(), data)?
        .with_name("tas")
        .with_units(units)
        .with_time(time_dim.as_str(), hourly)?;
    for source in [tasmax, tasmin] {
        for (name, coord) in source.coords() {
            if coord.dim() != time_dim && out.coord(name).is_none() {
                out = out.with_coord(name, coord.clone())?;
            }
        }
    }

    let chunks = carried_chunks(&[tasmax, tasmin], joint.dims(), &shape, &time_dim, steps);
    Ok(out.with_chunks(chunks)?)
}

/// Time axis of the output: `steps` per day from midnight of the first day.
fn subdaily_axis(axis: &TimeAxis, config: &SubdailyConfig) -> Result<TimeAxis, SubdailyError> {
    let start = axis
        .get(0)
        .map(CalendarDateTime::date)
        .ok_or_else(|| SubdailyError::MissingTimeCoordinate {
            name: "tasmax".to_string(),
        })?;
    let n = axis.len() * config.steps_per_day() as usize;
    Ok(TimeAxis::regular(axis.calendar(), start, config.step_seconds(), n)?)
}

/// Partitioning of the inputs mapped onto the output shape, with time
/// blocks stretched by `steps`.
fn carried_chunks(
    inputs: &[&DataArray],
    dims: &[String],
    shape: &[usize],
    time_dim: &str,
    steps: usize,
) -> Option<Chunks> {
    if inputs.iter().all(|a| a.chunks().is_none()) {
        return None;
    }
    let sizes = dims
        .iter()
        .zip(shape)
        .map(|(d, &n)| match inputs.iter().find_map(|a| a.chunks_along(d)) {
            Some(blocks) if d == time_dim => blocks.iter().map(|b| b * steps).collect(),
            Some(blocks) => blocks.to_vec(),
            None => vec![n],
        })
        .collect();
    Chunks::from_sizes(shape, sizes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn curve_peaks_and_returns_to_next_minimum() {
        let l = 12.0;
        assert_abs_diff_eq!(diurnal_temperature(20.0, 0.0, 5.0, l, 0.0), 0.0);
        assert_abs_diff_eq!(diurnal_temperature(20.0, 0.0, 5.0, l, 8.0), 20.0, epsilon = 1e-12);
        assert_abs_diff_eq!(diurnal_temperature(20.0, 0.0, 5.0, l, 24.0), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn curve_is_continuous_at_sunset() {
        let l = 10.5;
        let before = diurnal_temperature(25.0, 10.0, 12.0, l, l);
        let after = diurnal_temperature(25.0, 10.0, 12.0, l, l + 1e-9);
        assert_abs_diff_eq!(before, after, epsilon = 1e-6);
    }

    #[test]
    fn polar_day_still_ends_on_next_minimum() {
        for l in [23.5, 24.0] {
            assert_abs_diff_eq!(diurnal_temperature(20.0, 0.0, 2.0, l, 24.0), 2.0, epsilon = 1e-12);
            let late = diurnal_temperature(20.0, 0.0, 2.0, l, 23.99);
            assert!((late - 2.0).abs() < 0.1, "{late}");
        }
        let capped = diurnal_temperature(20.0, 0.0, 2.0, 24.0, 12.0);
        assert_abs_diff_eq!(capped, 20.0 * (12.0 * PI / 27.0).sin(), epsilon = 1e-12);
    }

    #[test]
    fn polar_night_decays_from_minimum() {
        assert_abs_diff_eq!(diurnal_temperature(-5.0, -20.0, -25.0, 0.0, 0.0), -20.0);
        let late = diurnal_temperature(-5.0, -20.0, -25.0, 0.0, 23.0);
        assert!(late < -24.0 && late > -25.0);
    }

    #[test]
    fn chunks_stretch_along_time() {
        let a = DataArray::from_vec("time", vec![0.0; 4]).chunk("time", 2).unwrap();
        let dims = vec!["time".to_string(), "site".to_string()];
        let chunks = carried_chunks(&[&a], &dims, &[8, 3], "time", 2).unwrap();
        assert_eq!(chunks.blocks(0), &[4, 4]);
        assert_eq!(chunks.blocks(1), &[3]);
        assert!(carried_chunks(&[&DataArray::scalar(0.0)], &dims, &[8, 3], "time", 2).is_none());
    }
}
