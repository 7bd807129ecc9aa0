//! Backtest performance metrics.
//!
//! Total and benchmark return, annualized Sharpe ratio and maximum drawdown
//! of a strategy's portfolio value series.

use statrs::statistics::Statistics;

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::models::utils::ensure_positive;

use super::types::{BacktestConfig, BacktestMetrics, BacktestPoint};

/// Compute performance metrics for a backtest series.
///
/// * `total_return = last.portfolio / first.portfolio - 1`
/// * `benchmark_return = last.benchmark / first.benchmark - 1`
/// * `sharpe_ratio = mean(ρ - rf/n) / stddev(ρ) * sqrt(n)` over the
///   per-period returns `ρ_i = v_i / v_{i-1} - 1`, `n = periods_per_year`,
///   using the sample (n - 1) standard deviation. Defined as 0 when there are
///   fewer than two returns or the returns do not vary.
/// * `max_drawdown = min_i(v_i / max(v_0..=v_i) - 1)`
///
/// # Errors
///
/// * `InsufficientData` if `series` is empty
/// * `InvalidInput` if any portfolio or benchmark value is not finite and positive
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use option_surface::{compute_backtest_metrics, BacktestConfig, BacktestPoint};
///
/// let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
/// let series = vec![
///     BacktestPoint::new(day(2), 100.0, 100.0),
///     BacktestPoint::new(day(3), 50.0, 101.0),
///     BacktestPoint::new(day(4), 100.0, 102.0),
/// ];
///
/// let metrics = compute_backtest_metrics(&series, &BacktestConfig::daily())?;
/// assert!((metrics.max_drawdown + 0.5).abs() < 1e-12);
/// # Ok::<(), option_surface::AnalyticsError>(())
/// ```
pub fn compute_backtest_metrics(
    series: &[BacktestPoint],
    config: &BacktestConfig,
) -> AnalyticsResult<BacktestMetrics> {
    let (first, last) = match (series.first(), series.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => {
            return Err(AnalyticsError::InsufficientData(
                "backtest series is empty".to_string(),
            ))
        }
    };
    config.validate()?;

    for point in series {
        ensure_positive("portfolio value", point.portfolio_value)?;
        ensure_positive("benchmark value", point.benchmark_value)?;
    }

    let values: Vec<f64> = series.iter().map(|p| p.portfolio_value).collect();
    let returns = period_returns(&values);

    let metrics = BacktestMetrics {
        total_return: last.portfolio_value / first.portfolio_value - 1.0,
        benchmark_return: last.benchmark_value / first.benchmark_value - 1.0,
        sharpe_ratio: sharpe_ratio(&returns, config),
        max_drawdown: max_drawdown(&values),
        periods: series.len(),
        forecast_hit_rate: forecast_hit_rate(series),
    };

    tracing::debug!(
        periods = metrics.periods,
        total_return = metrics.total_return,
        sharpe = metrics.sharpe_ratio,
        max_drawdown = metrics.max_drawdown,
        "computed backtest metrics"
    );

    Ok(metrics)
}

/// Simple returns between consecutive values.
pub fn period_returns(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| w[1] / w[0] - 1.0).collect()
}

/// Annualized Sharpe ratio of per-period returns; 0 when undefined.
pub fn sharpe_ratio(returns: &[f64], config: &BacktestConfig) -> f64 {
    if returns.len() < 2 {
        return 0.0;
    }

    let rf_per_period = config.risk_free_rate / config.periods_per_year;
    let excess: Vec<f64> = returns.iter().map(|r| r - rf_per_period).collect();

    let mean = excess.iter().mean();
    let std_dev = excess.iter().std_dev();

    if !std_dev.is_finite() || std_dev <= f64::EPSILON {
        return 0.0;
    }

    mean / std_dev * config.periods_per_year.sqrt()
}

/// Drawdown of every point from its running peak, each value <= 0.
pub fn drawdown_series(values: &[f64]) -> Vec<f64> {
    let mut peak = f64::NEG_INFINITY;
    values
        .iter()
        .map(|&v| {
            peak = peak.max(v);
            v / peak - 1.0
        })
        .collect()
}

/// Most negative entry of [`drawdown_series`], 0 for an empty or never-declining series.
pub fn max_drawdown(values: &[f64]) -> f64 {
    drawdown_series(values).into_iter().fold(0.0, f64::min)
}

/// Fraction of points carrying both returns whose signs agree (both up, both
/// down, or both flat). `None` when no point carries both.
pub fn forecast_hit_rate(series: &[BacktestPoint]) -> Option<f64> {
    let mut total = 0usize;
    let mut hits = 0usize;

    for point in series {
        if let (Some(predicted), Some(actual)) = (point.predicted_return, point.actual_return) {
            if !(predicted.is_finite() && actual.is_finite()) {
                continue;
            }
            total += 1;
            if direction(predicted) == direction(actual) {
                hits += 1;
            }
        }
    }

    if total == 0 {
        None
    } else {
        Some(hits as f64 / total as f64)
    }
}

fn direction(x: f64) -> i8 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_returns() {
        let r = period_returns(&[100.0, 110.0, 99.0]);
        assert_eq!(r.len(), 2);
        assert!((r[0] - 0.1).abs() < 1e-12);
        assert!((r[1] + 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_drawdown_series() {
        let dd = drawdown_series(&[100.0, 120.0, 90.0, 130.0]);
        assert_eq!(dd[0], 0.0);
        assert_eq!(dd[1], 0.0);
        assert!((dd[2] + 0.25).abs() < 1e-12);
        assert_eq!(dd[3], 0.0);
        assert!((max_drawdown(&[100.0, 120.0, 90.0, 130.0]) + 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_sharpe_undefined_cases() {
        let config = BacktestConfig::daily();
        assert_eq!(sharpe_ratio(&[], &config), 0.0);
        assert_eq!(sharpe_ratio(&[0.01], &config), 0.0);
        assert_eq!(sharpe_ratio(&[0.01, 0.01, 0.01], &config), 0.0);
    }

    #[test]
    fn test_sharpe_sample_std_dev() {
        let config = BacktestConfig::daily();
        let returns = [0.01, -0.01, 0.02, 0.0];
        // mean = 0.005, sample variance = 0.00016666...
        let mean = 0.005_f64;
        let sd = (0.0005_f64 / 3.0).sqrt();
        let expected = mean / sd * 252.0_f64.sqrt();
        assert!((sharpe_ratio(&returns, &config) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_direction() {
        assert_eq!(direction(0.3), 1);
        assert_eq!(direction(-0.3), -1);
        assert_eq!(direction(0.0), 0);
    }
}
