use option_surface::{bs_call_price, bs_price, bs_put_price, norm_cdf, AnalyticsError, OptionType};
use statrs::distribution::{ContinuousCDF, Normal};

/// Symmetry and centre of the CDF approximation over a wide range of inputs.
#[test]
fn test_norm_cdf_symmetry() {
    assert!((norm_cdf(0.0) - 0.5).abs() < 1e-6);

    let mut x = -8.0;
    while x <= 8.0 {
        let sum = norm_cdf(x) + norm_cdf(-x);
        assert!(
            (sum - 1.0).abs() < 1e-6,
            "cdf({}) + cdf({}) = {}",
            x,
            -x,
            sum
        );
        x += 0.05;
    }
}

/// The approximation stays within 1e-6 of the exact normal CDF.
#[test]
fn test_norm_cdf_accuracy_against_statrs() {
    let normal = Normal::new(0.0, 1.0).unwrap();

    let mut x = -6.0;
    while x <= 6.0 {
        let err = (norm_cdf(x) - normal.cdf(x)).abs();
        assert!(err < 1e-6, "error {} at x = {}", err, x);
        x += 0.01;
    }
}

/// Non-decreasing and bounded.
#[test]
fn test_norm_cdf_monotone_and_bounded() {
    let mut prev = norm_cdf(-10.0);
    let mut x = -10.0;
    while x <= 10.0 {
        let v = norm_cdf(x);
        assert!((0.0..=1.0).contains(&v));
        assert!(v >= prev, "cdf decreased at x = {}", x);
        prev = v;
        x += 0.001;
    }
}

/// Canonical at-the-money reference: S=K=100, t=1, r=5%, σ=20%.
#[test]
fn test_reference_prices() {
    let call = bs_call_price(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
    let put = bs_put_price(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();

    assert!((call - 10.45).abs() < 0.01, "call = {}", call);
    assert!((put - 5.57).abs() < 0.01, "put = {}", put);
}

/// C - P = S - K·e^(-rt) across a spread of moneyness, tenor and volatility.
#[test]
fn test_put_call_parity() {
    let spots = [50.0, 100.0, 250.0];
    let strike_ratios = [0.7, 0.9, 1.0, 1.1, 1.5];
    let times = [7.0 / 365.0, 0.25, 1.0, 3.0];
    let vols = [0.05, 0.2, 0.6];
    let rates = [0.0, 0.05, -0.01];

    for &s in &spots {
        for &ratio in &strike_ratios {
            let k = s * ratio;
            for &t in &times {
                for &sigma in &vols {
                    for &r in &rates {
                        let call = bs_price(OptionType::Call, s, k, t, r, sigma).unwrap();
                        let put = bs_price(OptionType::Put, s, k, t, r, sigma).unwrap();
                        let parity = s - k * (-r * t).exp();
                        assert!(
                            (call - put - parity).abs() < 1e-4 * s,
                            "parity violated: S={} K={} t={} r={} σ={} => {} vs {}",
                            s,
                            k,
                            t,
                            r,
                            sigma,
                            call - put,
                            parity
                        );
                    }
                }
            }
        }
    }
}

/// Calls rise with spot, puts fall with spot, both rise with volatility.
#[test]
fn test_price_monotonicity() {
    let low = bs_call_price(90.0, 100.0, 0.5, 0.05, 0.3).unwrap();
    let high = bs_call_price(110.0, 100.0, 0.5, 0.05, 0.3).unwrap();
    assert!(high > low);

    let low = bs_put_price(90.0, 100.0, 0.5, 0.05, 0.3).unwrap();
    let high = bs_put_price(110.0, 100.0, 0.5, 0.05, 0.3).unwrap();
    assert!(high < low);

    let calm = bs_call_price(100.0, 100.0, 0.5, 0.05, 0.1).unwrap();
    let wild = bs_call_price(100.0, 100.0, 0.5, 0.05, 0.5).unwrap();
    assert!(wild > calm);
}

/// Expired contracts and zero volatility are rejected, not priced as NaN.
#[test]
fn test_invalid_inputs_are_typed_errors() {
    match bs_call_price(100.0, 100.0, 0.0, 0.05, 0.2) {
        Err(AnalyticsError::InvalidInput(msg)) => assert!(msg.contains("time")),
        other => panic!("expected InvalidInput, got {:?}", other),
    }
    match bs_put_price(100.0, 100.0, 1.0, 0.05, 0.0) {
        Err(AnalyticsError::InvalidInput(msg)) => assert!(msg.contains("volatility")),
        other => panic!("expected InvalidInput, got {:?}", other),
    }
    assert!(bs_call_price(-1.0, 100.0, 1.0, 0.05, 0.2).is_err());
    assert!(bs_call_price(100.0, f64::INFINITY, 1.0, 0.05, 0.2).is_err());
}
