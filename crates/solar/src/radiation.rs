//! Declination, orbital corrections, extraterrestrial radiation and day
//! length over a time axis.

use helios_array::{Broadcast, DataArray};
use helios_calendar::TimeAxis;
use helios_units::{Dimension, Quantity, Unit, to_radians};
use ndarray::Zip;
use tracing::debug;

use crate::error::SolarError;
use crate::method::SolarMethod;
use crate::orbit;

/// Name of the time dimension of arrays built from a [`TimeAxis`].
pub const TIME_DIM: &str = "time";

/// Default solar constant, in W m-2.
pub const SOLAR_CONSTANT: f64 = 1361.0;

/// The default solar constant as a quantity.
pub fn default_solar_constant() -> Quantity {
    Quantity::new(SOLAR_CONSTANT, Unit::WattPerSquareMetre)
}

/// Wraps per-timestamp values into a `[time]` array carrying `time`.
pub(crate) fn along_time(time: &TimeAxis, values: Vec<f64>) -> Result<DataArray, SolarError> {
    Ok(DataArray::from_vec(TIME_DIM, values).with_time(TIME_DIM, time.clone())?)
}

fn map_day_angle(time: &TimeAxis, f: impl Fn(f64) -> f64) -> Result<DataArray, SolarError> {
    along_time(time, time.day_angle().into_iter().map(f).collect())
}

/// Solar declination of each timestamp, in radians.
///
/// # Errors
///
/// Infallible for well-formed axes; errors are propagated from array
/// construction.
#[tracing::instrument(skip_all, fields(n = time.len(), method = %method))]
pub fn solar_declination(time: &TimeAxis, method: SolarMethod) -> Result<DataArray, SolarError> {
    Ok(map_day_angle(time, |theta| orbit::declination(theta, method))?
        .with_name("declination")
        .with_units(Unit::Radian.symbol()))
}

/// Orbital eccentricity correction factor of each timestamp.
///
/// # Errors
///
/// See [`solar_declination`].
pub fn eccentricity_correction_factor(
    time: &TimeAxis,
    method: SolarMethod,
) -> Result<DataArray, SolarError> {
    Ok(map_day_angle(time, |theta| orbit::eccentricity(theta, method))?
        .with_name("eccentricity_correction_factor")
        .with_units(Unit::Dimensionless.symbol()))
}

/// Equation-of-time correction to the hour angle of each timestamp, in
/// radians.
///
/// # Errors
///
/// See [`solar_declination`].
pub fn time_correction_for_solar_angle(time: &TimeAxis) -> Result<DataArray, SolarError> {
    Ok(map_day_angle(time, orbit::equation_of_time)?
        .with_name("time_correction")
        .with_units(Unit::Radian.symbol()))
}

/// Daily mean extraterrestrial solar radiation, in W m-2.
///
/// `time` and `lat` broadcast by dimension name; the result has the joint
/// dimensions and keeps the partitioning of `lat`. Polar night yields 0.
///
/// # Errors
///
/// Returns [`SolarError::Unit`] if `lat` is not an angle or
/// `solar_constant` is not an energy flux.
#[tracing::instrument(skip_all, fields(n = time.len(), method = %method))]
pub fn extraterrestrial_solar_radiation(
    time: &TimeAxis,
    lat: &DataArray,
    solar_constant: Quantity,
    method: SolarMethod,
) -> Result<DataArray, SolarError> {
    solar_constant.ensure_dimension("solar_constant", Dimension::EnergyFlux)?;
    let s0 = solar_constant.to(Unit::WattPerSquareMetre)?.value();
    let lat = to_radians(lat)?;
    let dec = solar_declination(time, method)?;
    let e0 = eccentricity_correction_factor(time, method)?;
    debug!(solar_constant = s0, "computing extraterrestrial radiation");

    let joint = Broadcast::new(&[&dec, &e0, &lat])?;
    let v = joint.values();
    let rad = Zip::from(&v[0]).and(&v[1]).and(&v[2]).map_collect(|&d, &e, &phi| {
        s0 * e * orbit::daily_sunlit_integral(d, phi) / std::f64::consts::TAU
    });
    Ok(joint
        .finish(rad)?
        .with_name("extraterrestrial_solar_radiation")
        .with_units(Unit::WattPerSquareMetre.symbol()))
}

/// Day length of each timestamp and latitude, in hours.
///
/// Saturates to 24 h in polar day and 0 h in polar night.
///
/// # Errors
///
/// Returns [`SolarError::Unit`] if `lat` is not an angle.
#[tracing::instrument(skip_all, fields(n = dates.len(), method = %method))]
pub fn day_lengths(
    dates: &TimeAxis,
    lat: &DataArray,
    method: SolarMethod,
) -> Result<DataArray, SolarError> {
    let lat = to_radians(lat)?;
    let dec = solar_declination(dates, method)?;
    let joint = Broadcast::new(&[&dec, &lat])?;
    let v = joint.values();
    let hours = Zip::from(&v[0])
        .and(&v[1])
        .map_collect(|&d, &phi| orbit::day_length_hours(d, phi));
    Ok(joint
        .finish(hours)?
        .with_name("day_length")
        .with_units(Unit::Hour.symbol()))
}
