//! Scalar orbital geometry.
//!
//! All angles are in radians. `theta` is the day angle, 2π times the
//! day-of-year fraction.

use std::f64::consts::{PI, TAU};

use crate::method::SolarMethod;

/// Solar declination for day angle `theta`.
pub fn declination(theta: f64, method: SolarMethod) -> f64 {
    match method {
        SolarMethod::Simple => 0.4091 * (theta - 1.39).sin(),
        SolarMethod::Spencer => {
            0.006918 - 0.399912 * theta.cos() + 0.070257 * theta.sin()
                - 0.006758 * (2.0 * theta).cos()
                + 0.000907 * (2.0 * theta).sin()
                - 0.002697 * (3.0 * theta).cos()
                + 0.001480 * (3.0 * theta).sin()
        }
    }
}

/// Ratio of the mean to the actual squared Earth-Sun distance.
pub fn eccentricity(theta: f64, method: SolarMethod) -> f64 {
    match method {
        SolarMethod::Simple => 1.0 + 0.033 * theta.cos(),
        SolarMethod::Spencer => {
            1.000110 + 0.034221 * theta.cos() + 0.001280 * theta.sin()
                + 0.000719 * (2.0 * theta).cos()
                + 0.000077 * (2.0 * theta).sin()
        }
    }
}

/// Equation of time as an hour-angle correction.
pub fn equation_of_time(theta: f64) -> f64 {
    let degrees = 0.004297 + 0.107029 * theta.cos()
        - 1.837877 * theta.sin()
        - 0.837378 * (2.0 * theta).cos()
        - 2.340475 * (2.0 * theta).sin();
    degrees.to_radians()
}

/// Hour angle of sunset, in [0, π].
///
/// The argument of `acos` is clamped, which saturates to π in polar day
/// and to 0 in polar night.
pub fn sunset_hour_angle(declination: f64, latitude: f64) -> f64 {
    (-latitude.tan() * declination.tan()).clamp(-1.0, 1.0).acos()
}

/// Hours between sunrise and sunset.
pub fn day_length_hours(declination: f64, latitude: f64) -> f64 {
    24.0 / PI * sunset_hour_angle(declination, latitude)
}

/// Integral of the zenith cosine over the hour angles `[start, end]`.
pub fn zenith_integral(declination: f64, latitude: f64, start: f64, end: f64) -> f64 {
    declination.sin() * latitude.sin() * (end - start)
        + declination.cos() * latitude.cos() * (end.sin() - start.sin())
}

/// Integral of the zenith cosine over the sunlit part of the day.
pub fn daily_sunlit_integral(declination: f64, latitude: f64) -> f64 {
    let ws = sunset_hour_angle(declination, latitude);
    zenith_integral(declination, latitude, -ws, ws)
}

/// Instantaneous zenith cosine at hour angle `hour_angle`.
pub fn zenith_cosine(declination: f64, latitude: f64, hour_angle: f64) -> f64 {
    latitude.sin() * declination.sin() + latitude.cos() * declination.cos() * hour_angle.cos()
}

/// Wraps an angle into [−π, π).
pub fn wrap_hour_angle(angle: f64) -> f64 {
    (angle + PI).rem_euclid(TAU) - PI
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn declination_bounds() {
        for i in 0..366 {
            let theta = TAU * f64::from(i) / 366.0;
            for method in [SolarMethod::Simple, SolarMethod::Spencer] {
                assert!(declination(theta, method).abs() <= 0.41);
            }
        }
    }

    #[test]
    fn declination_continuous_across_year_end() {
        for method in [SolarMethod::Simple, SolarMethod::Spencer] {
            assert_abs_diff_eq!(
                declination(0.0, method),
                declination(TAU, method),
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn eccentricity_near_unity() {
        for i in 0..365 {
            let theta = TAU * f64::from(i) / 365.0;
            let e = eccentricity(theta, SolarMethod::Spencer);
            assert!((0.96..=1.04).contains(&e), "e = {e}");
        }
        assert_abs_diff_eq!(eccentricity(0.0, SolarMethod::Simple), 1.033, epsilon = 1e-12);
    }

    #[test]
    fn equation_of_time_magnitude() {
        // Under 17 minutes of clock time, i.e. about 0.075 rad.
        for i in 0..365 {
            let theta = TAU * f64::from(i) / 365.0;
            assert!(equation_of_time(theta).abs() < 0.08);
        }
    }

    #[test]
    fn polar_day_and_night_saturate() {
        let dec = 0.4;
        assert_relative_eq!(sunset_hour_angle(dec, 1.5), PI);
        assert_relative_eq!(sunset_hour_angle(dec, -1.5), 0.0);
        assert_relative_eq!(day_length_hours(dec, 1.5), 24.0);
        assert_relative_eq!(day_length_hours(dec, -1.5), 0.0);
    }

    #[test]
    fn equator_is_twelve_hours_at_equinox() {
        assert_abs_diff_eq!(day_length_hours(0.0, 0.0), 12.0, epsilon = 1e-12);
        assert_abs_diff_eq!(sunset_hour_angle(0.0, 0.7), FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn integral_matches_instant_at_midpoint() {
        let (dec, lat) = (0.2, 0.6);
        let dh = 1e-4;
        let integral = zenith_integral(dec, lat, 0.3 - dh / 2.0, 0.3 + dh / 2.0);
        assert_relative_eq!(integral / dh, zenith_cosine(dec, lat, 0.3), epsilon = 1e-8);
    }

    #[test]
    fn daily_sunlit_integral_is_nonnegative() {
        for lat in [-1.4, -0.7, 0.0, 0.7, 1.4] {
            for dec in [-0.4, 0.0, 0.4] {
                assert!(daily_sunlit_integral(dec, lat) >= 0.0);
            }
        }
    }

    #[test]
    fn wrap_range() {
        assert_abs_diff_eq!(wrap_hour_angle(PI), -PI, epsilon = 1e-12);
        assert_abs_diff_eq!(wrap_hour_angle(-PI), -PI, epsilon = 1e-12);
        assert_abs_diff_eq!(wrap_hour_angle(3.0 * PI / 2.0), -FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!(wrap_hour_angle(0.25), 0.25, epsilon = 1e-12);
    }
}
