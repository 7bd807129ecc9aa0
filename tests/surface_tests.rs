
use option_surface::{
    analyze_instrument, bs_call_price, bs_put_price, build_pricing_surface, default_configs,
    AnalyticsError, ForecastPoint, Quote, SurfaceConfig,
};
use test_utils::date;

/// 5 strikes x 5 expiries with no forecast.
#[test]
fn test_standard_grid_without_forecast() {
    let as_of = date(2024, 6, 3);
    let surface = build_pricing_surface(100.0, 0.3, None, as_of, &SurfaceConfig::standard())
        .expect("surface build failed");

    assert_eq!(surface.len(), 25);
    assert!(surface.rows().iter().all(|r| r.predicted_price.is_none()));
    assert!(surface.rows().iter().all(|r| r.underlying == 100.0));

    let strikes = surface.strikes();
    let expected = [80.0, 90.0, 100.0, 110.0, 120.0];
    assert_eq!(strikes.len(), 5);
    for (got, want) in strikes.iter().zip(expected.iter()) {
        assert!((got - want).abs() < 1e-9, "strike {} != {}", got, want);
    }
    assert_eq!(surface.expiries(), vec![30, 60, 90, 180, 360]);
}

/// Rows run strike-major: all expiries of the lowest strike first.
#[test]
fn test_row_ordering_is_strike_major() {
    let surface =
        build_pricing_surface(100.0, 0.3, None, date(2024, 6, 3), &SurfaceConfig::standard())
            .unwrap();
    let rows = surface.rows();

    let days: Vec<u32> = rows[..5].iter().map(|r| r.days_to_expiry).collect();
    assert_eq!(days, vec![30, 60, 90, 180, 360]);
    assert!(rows[..5].iter().all(|r| (r.strike - 80.0).abs() < 1e-9));
    assert!((rows[5].strike - 90.0).abs() < 1e-9);
    assert_eq!(rows[5].days_to_expiry, 30);

    let thirty_day = surface.slice_by_expiry(30);
    assert_eq!(thirty_day.len(), 5);
    assert!(thirty_day.windows(2).all(|w| w[0].strike < w[1].strike));
}

/// Each cell equals a direct call to the pricer.
#[test]
fn test_rows_match_pricer() {
    let surface =
        build_pricing_surface(250.0, 0.45, None, date(2024, 6, 3), &SurfaceConfig::standard())
            .unwrap();

    for row in surface.rows() {
        let t = row.days_to_expiry as f64 / 365.0;
        let call = bs_call_price(250.0, row.strike, t, 0.05, 0.45).unwrap();
        let put = bs_put_price(250.0, row.strike, t, 0.05, 0.45).unwrap();
        assert_eq!(row.call_price, call);
        assert_eq!(row.put_price, put);
        assert!(row.call_price >= 0.0 && row.put_price >= 0.0);
    }

    // Calls cheapen as the strike rises at a fixed expiry
    let slice = surface.slice_by_expiry(90);
    assert!(slice.windows(2).all(|w| w[0].call_price > w[1].call_price));
    assert!(slice.windows(2).all(|w| w[0].put_price < w[1].put_price));
}

/// Forecasts match expiries by exact calendar-day offset and blend spot 50/50.
#[test]
fn test_forecast_blending() {
    let as_of = date(2024, 1, 1);
    let forecast = vec![
        ForecastPoint::new(date(2024, 1, 31), 120.0), // +30 days
        ForecastPoint::new(date(2024, 3, 1), 80.0),   // +60 days (leap year)
        ForecastPoint::new(date(2024, 3, 31), 150.0), // +90 days
        ForecastPoint::new(date(2024, 4, 1), 999.0),  // +91 days, no expiry
    ];

    let config = SurfaceConfig::standard();
    let surface =
        build_pricing_surface(100.0, 0.3, Some(forecast.as_slice()), as_of, &config).unwrap();

    assert_eq!(surface.forecast_matches(), 15);

    let atm_30 = surface.get(100.0, 30).expect("missing ATM 30d row");
    assert_eq!(atm_30.predicted_price, Some(120.0));
    assert_eq!(atm_30.underlying, 110.0);
    let t = 30.0 / 365.0;
    assert_eq!(atm_30.call_price, bs_call_price(110.0, 100.0, t, 0.05, 0.3).unwrap());

    let atm_60 = surface.get(100.0, 60).unwrap();
    assert_eq!(atm_60.predicted_price, Some(80.0));
    assert_eq!(atm_60.underlying, 90.0);

    let atm_180 = surface.get(100.0, 180).unwrap();
    assert_eq!(atm_180.predicted_price, None);
    assert_eq!(atm_180.underlying, 100.0);

    // Strikes stay anchored to the unadjusted spot
    assert!((surface.get(120.0, 30).unwrap().strike - 120.0).abs() < 1e-9);
}

/// Forecast dates before `as_of` or off the ladder are ignored.
#[test]
fn test_forecast_without_matches() {
    let as_of = date(2024, 1, 1);
    let forecast = vec![
        ForecastPoint::new(date(2023, 12, 2), 120.0),
        ForecastPoint::new(date(2024, 1, 30), 120.0),
    ];
    let config = SurfaceConfig::standard();
    let with =
        build_pricing_surface(100.0, 0.3, Some(forecast.as_slice()), as_of, &config).unwrap();
    let without = build_pricing_surface(100.0, 0.3, None, as_of, &config).unwrap();

    assert_eq!(with.forecast_matches(), 0);
    assert_eq!(with.rows(), without.rows());
}

/// Degenerate spot or volatility is rejected instead of producing NaN rows.
#[test]
fn test_rejects_invalid_inputs() {
    let as_of = date(2024, 1, 1);
    let config = SurfaceConfig::standard();

    let cases = [
        (0.0, 0.3),
        (-5.0, 0.3),
        (100.0, 0.0),
        (100.0, -0.1),
        (f64::NAN, 0.3),
    ];
    for (spot, vol) in cases {
        match build_pricing_surface(spot, vol, None, as_of, &config) {
            Err(AnalyticsError::InvalidInput(_)) => {}
            other => panic!("spot={} vol={} => {:?}", spot, vol, other),
        }
    }

    let empty = SurfaceConfig::from_grid(vec![], vec![30]);
    assert!(build_pricing_surface(100.0, 0.3, None, as_of, &empty).is_err());
}

/// Same inputs, same surface.
#[test]
fn test_deterministic() {
    let as_of = date(2024, 1, 1);
    let forecast = vec![ForecastPoint::new(date(2024, 1, 31), 105.0)];
    let config = SurfaceConfig::dense();
    let a = build_pricing_surface(100.0, 0.3, Some(forecast.as_slice()), as_of, &config).unwrap();
    let b = build_pricing_surface(100.0, 0.3, Some(forecast.as_slice()), as_of, &config).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.len(), 13 * 5);
}

/// The instrument flow sanitizes a zero quote volatility before pricing.
#[test]
fn test_analyze_instrument_uses_fallback_volatility() {
    let config = default_configs::weekly();
    let as_of = date(2024, 1, 1);

    let quote = Quote::new("AMD", 150.0, 0.0);
    let surface = analyze_instrument(&quote, None, as_of, &config).unwrap();

    assert_eq!(surface.volatility, 0.3);
    assert_eq!(surface.len(), 20);
    assert_eq!(surface.expiries(), vec![7, 14, 21, 28]);

    let zero_price = Quote::new("AMD", 0.0, 0.3);
    assert!(analyze_instrument(&zero_price, None, as_of, &config).is_err());
}
