use approx::assert_abs_diff_eq;
use helios_array::DataArray;
use helios_calendar::{CalendarDateTime, CalendarSystem, TimeAxis};
use helios_solar::{
    IntervalAnchor, SolarMethod, ZenithOptions, ZenithStat, cosine_of_solar_zenith_angle,
    cosine_of_solar_zenith_angle_with, day_lengths, default_solar_constant,
    extraterrestrial_solar_radiation, solar_declination, time_correction_for_solar_angle,
};

fn axis(cal: CalendarSystem, y: i32, n: usize) -> TimeAxis {
    TimeAxis::daily(cal, CalendarDateTime::new(cal, y, 1, 1).unwrap(), n).unwrap()
}

fn lats() -> DataArray {
    DataArray::from_vec("lat", vec![-89.0, -66.0, -30.0, 0.0, 30.0, 66.0, 89.0])
        .with_units("degrees_north")
}

#[test]
fn declination_repeats_every_calendar_year() {
    for (cal, year_len) in [
        (CalendarSystem::NoLeap, 365),
        (CalendarSystem::AllLeap, 366),
        (CalendarSystem::Day360, 360),
    ] {
        let time = axis(cal, 2001, 2 * year_len);
        for method in [SolarMethod::Simple, SolarMethod::Spencer] {
            let dec = solar_declination(&time, method).unwrap();
            let v = dec.values().unwrap();
            for i in 0..year_len {
                assert_abs_diff_eq!(v[[i]], v[[i + year_len]], epsilon = 1e-12);
            }
        }
    }
}

#[test]
fn declination_is_bounded_and_continuous() {
    let time = axis(CalendarSystem::Standard, 2000, 3 * 365);
    for method in [SolarMethod::Simple, SolarMethod::Spencer] {
        let dec = solar_declination(&time, method).unwrap();
        let v = dec.values().unwrap();
        assert!(v.iter().all(|d| d.abs() <= 0.41));
        for w in v.as_slice().unwrap().windows(2) {
            assert!((w[1] - w[0]).abs() < 0.01, "jump of {}", w[1] - w[0]);
        }
    }
}

#[test]
fn equator_day_length_is_about_twelve_hours() {
    let time = axis(CalendarSystem::Standard, 2000, 366);
    let lat = DataArray::from_vec("lat", vec![0.0]).with_units("deg");
    let dl = day_lengths(&time, &lat, SolarMethod::Spencer).unwrap();
    for h in dl.values().unwrap() {
        assert_abs_diff_eq!(*h, 12.0, epsilon = 1e-9);
    }
}

#[test]
fn day_length_saturates_at_poles() {
    let time = axis(CalendarSystem::Standard, 2000, 366);
    let dl = day_lengths(&time, &lats(), SolarMethod::Spencer).unwrap();
    let v = dl.values().unwrap();
    assert!(v.iter().all(|h| (0.0..=24.0).contains(h)));
    // Mid-December: polar night in the north, polar day in the south.
    assert_abs_diff_eq!(v[[350, 6]], 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(v[[350, 0]], 24.0, epsilon = 1e-9);
}

#[test]
fn radiation_is_nonnegative() {
    let time = axis(CalendarSystem::NoLeap, 2001, 365);
    let rad = extraterrestrial_solar_radiation(
        &time,
        &lats(),
        default_solar_constant(),
        SolarMethod::Spencer,
    )
    .unwrap();
    assert!(rad.values().unwrap().iter().all(|r| *r >= 0.0));
}

#[test]
fn summer_pole_receives_more_radiation_than_winter_pole() {
    let cal = CalendarSystem::Standard;
    let time = TimeAxis::daily(cal, CalendarDateTime::new(cal, 2001, 6, 21).unwrap(), 1).unwrap();
    let poles = DataArray::from_vec("lat", vec![80.0, -80.0]).with_units("degrees_north");
    for method in [SolarMethod::Simple, SolarMethod::Spencer] {
        let rad =
            extraterrestrial_solar_radiation(&time, &poles, default_solar_constant(), method)
                .unwrap();
        let v = rad.values().unwrap();
        let (north, south) = (v[[0, 0]], v[[0, 1]]);
        assert!(north > south, "{method}: {north} <= {south}");
        assert!(north > 400.0, "{method}: {north}");
        assert_abs_diff_eq!(south, 0.0, epsilon = 1e-9);
    }
}

#[test]
fn sunlit_average_dominates_whole_window_average() {
    let start = CalendarDateTime::new(CalendarSystem::Standard, 2000, 6, 1).unwrap();
    let time = TimeAxis::regular(CalendarSystem::Standard, start, 3 * 3600, 16).unwrap();
    let dec = solar_declination(&time, SolarMethod::Spencer).unwrap();
    let lon = DataArray::scalar(10.0).with_units("degrees_east");

    let all = cosine_of_solar_zenith_angle(&time, &dec, &lats(), &lon, ZenithStat::Average, false)
        .unwrap();
    let lit = cosine_of_solar_zenith_angle(&time, &dec, &lats(), &lon, ZenithStat::Average, true)
        .unwrap();
    for (a, l) in all.values().unwrap().iter().zip(lit.values().unwrap()) {
        assert!(*l >= 0.0);
        assert!(*l >= *a - 1e-12);
        assert!((-1.0..=1.0).contains(a));
    }
}

#[test]
fn daily_axis_integrates_whole_day() {
    let time = axis(CalendarSystem::Standard, 2000, 10);
    let dec = solar_declination(&time, SolarMethod::Spencer).unwrap();
    let lat = DataArray::from_vec("lat", vec![40.0]).with_units("deg");
    let lon = DataArray::scalar(0.0).with_units("deg");
    let integral = ZenithOptions::new().with_stat(ZenithStat::Integral);
    let shifted = DataArray::scalar(120.0).with_units("deg");

    let a = cosine_of_solar_zenith_angle_with(&time, &dec, &lat, &lon, &integral).unwrap();
    let b = cosine_of_solar_zenith_angle_with(&time, &dec, &lat, &shifted, &integral).unwrap();
    for (x, y) in a.values().unwrap().iter().zip(b.values().unwrap()) {
        assert_abs_diff_eq!(*x, *y, epsilon = 1e-12);
    }
}

#[test]
fn instant_follows_hour_of_day() {
    let start = CalendarDateTime::with_hms(CalendarSystem::Standard, 2000, 3, 20, 0, 0, 0).unwrap();
    let time = TimeAxis::regular(CalendarSystem::Standard, start, 3600, 24).unwrap();
    let dec = solar_declination(&time, SolarMethod::Spencer).unwrap();
    let lat = DataArray::from_vec("lat", vec![0.0]).with_units("deg");
    let lon = DataArray::scalar(0.0).with_units("deg");
    let csza = cosine_of_solar_zenith_angle(&time, &dec, &lat, &lon, ZenithStat::Instant, true)
        .unwrap();
    let v = csza.values().unwrap();
    assert_abs_diff_eq!(v[[0, 0]], 0.0);
    assert!(v[[12, 0]] > 0.99);
    assert!((0..24).all(|i| v[[i, 0]] <= v[[12, 0]]));
}

#[test]
fn time_correction_shifts_hour_angle() {
    let start = CalendarDateTime::new(CalendarSystem::Standard, 2000, 11, 3).unwrap();
    let time = TimeAxis::regular(CalendarSystem::Standard, start, 3600, 24).unwrap();
    let tc = time_correction_for_solar_angle(&time).unwrap();
    assert_eq!(tc.units(), Some("rad"));
    // Early November: the sun runs about 16 minutes fast.
    assert!(tc.values().unwrap()[[0]] > 0.06);

    let dec = solar_declination(&time, SolarMethod::Spencer).unwrap();
    let lat = DataArray::from_vec("lat", vec![30.0]).with_units("deg");
    let lon = DataArray::scalar(0.0).with_units("deg");
    let plain = ZenithOptions::new()
        .with_stat(ZenithStat::Instant)
        .with_anchor(IntervalAnchor::Start);
    let corrected = plain.with_time_correction(true);
    let a = cosine_of_solar_zenith_angle_with(&time, &dec, &lat, &lon, &plain).unwrap();
    let b = cosine_of_solar_zenith_angle_with(&time, &dec, &lat, &lon, &corrected).unwrap();
    // Before solar noon the corrected sun is higher.
    assert!(b.values().unwrap()[[10, 0]] > a.values().unwrap()[[10, 0]]);
}
