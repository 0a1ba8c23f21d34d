use std::sync::Arc;

use approx::assert_abs_diff_eq;
use helios::config::HeliosConfig;
use helios::{
    CalendarDateTime, CalendarSystem, Coordinate, DataArray, NodeKind, Reduction, ResampleSpec,
    TimeAxis, make_hourly_temperature, resample_map,
};
use ndarray::Array2;

const STD: CalendarSystem = CalendarSystem::Standard;

fn daily(values: [[f64; 2]; 3]) -> DataArray {
    let start = CalendarDateTime::new(STD, 2010, 3, 20).unwrap();
    let data = Array2::from_shape_vec((3, 2), values.concat()).unwrap().into_dyn();
    DataArray::new(["time", "site"], data)
        .unwrap()
        .with_units("degC")
        .with_time("time", TimeAxis::daily(STD, start, 3).unwrap())
        .unwrap()
        .with_coord(
            "lat",
            Coordinate::new("site", vec![0.0, 0.0]).with_units("degrees_north"),
        )
        .unwrap()
}

#[test]
fn hourly_temperature_resampled_back_to_daily_extremes() {
    let config = HeliosConfig::from_toml_str(
        r#"
        [resample]
        map_blocks = true

        [subdaily]
        steps_per_day = 24
        "#,
    )
    .unwrap();

    let tasmax = daily([[20.0, 30.0], [22.0, 31.0], [24.0, 32.0]]);
    let tasmin = daily([[10.0, 15.0], [11.0, 16.0], [12.0, 17.0]]);
    let hourly = make_hourly_temperature(&tasmax, &tasmin, &config.subdaily_config().unwrap())
        .unwrap()
        .chunk("time", 24)
        .unwrap();
    assert_eq!(hourly.shape(), &[72, 2]);

    let max_spec = ResampleSpec::new("time", "D", Arc::new(Reduction::Max)).unwrap();
    let daily_max = resample_map(&hourly, &max_spec, &config.options()).unwrap();
    assert_eq!(daily_max.node().unwrap().kind(), NodeKind::MapBlocks);
    assert_eq!(daily_max.chunks_along("time"), Some(&[1, 1, 1][..]));

    let min_spec = ResampleSpec::new("time", "D", Arc::new(Reduction::Min)).unwrap();
    let daily_min = resample_map(&hourly, &min_spec, &config.options()).unwrap();

    // Equator: 12 h days, so the daytime peak falls on a whole hour.
    let max = daily_max.compute().unwrap();
    let min = daily_min.compute().unwrap();
    for (got, want) in max.values().unwrap().iter().zip(tasmax.values().unwrap()) {
        assert_abs_diff_eq!(*got, *want, epsilon = 1e-9);
    }
    for (got, want) in min.values().unwrap().iter().zip(tasmin.values().unwrap()) {
        assert_abs_diff_eq!(*got, *want, epsilon = 1e-9);
    }
    assert_eq!(max.units(), Some("degC"));
    assert_eq!(max.time(), tasmax.time());
}

#[test]
fn config_file_round_trip() {
    let path = std::env::temp_dir().join(format!("helios-config-{}.toml", std::process::id()));
    std::fs::write(&path, "[solar]\nmethod = \"simple\"\n").unwrap();
    let config = HeliosConfig::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(config.solar_method().unwrap(), helios::SolarMethod::Simple);
    assert_eq!(config.options().map_blocks(), None);
}
