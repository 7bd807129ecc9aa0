use chrono::NaiveDate;

use crate::error::AnalyticsResult;
use crate::models::utils::{ensure_finite, ensure_positive};

/// One observation of the strategy and its buy-and-hold benchmark
///
/// Supplied by the external backtest engine, which names the value columns
/// `portfolio` and `benchmark`; both spellings are accepted.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BacktestPoint {
    pub date: NaiveDate,
    #[cfg_attr(feature = "serde", serde(alias = "portfolio"))]
    pub portfolio_value: f64,
    #[cfg_attr(feature = "serde", serde(alias = "benchmark"))]
    pub benchmark_value: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub predicted_return: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub actual_return: Option<f64>,
}

impl BacktestPoint {
    pub fn new(date: NaiveDate, portfolio_value: f64, benchmark_value: f64) -> Self {
        Self {
            date,
            portfolio_value,
            benchmark_value,
            predicted_return: None,
            actual_return: None,
        }
    }

    pub fn with_returns(mut self, predicted: f64, actual: f64) -> Self {
        self.predicted_return = Some(predicted);
        self.actual_return = Some(actual);
        self
    }
}

/// Summary statistics of a backtest, all returns as fractions (0.1 = 10%)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BacktestMetrics {
    pub total_return: f64,
    pub benchmark_return: f64,
    /// Annualized, from per-period portfolio returns
    pub sharpe_ratio: f64,
    /// Most negative peak-to-trough decline, always <= 0
    pub max_drawdown: f64,
    /// Number of observations in the series
    pub periods: usize,
    /// Share of points whose predicted and actual returns point the same way
    pub forecast_hit_rate: Option<f64>,
}

/// Sampling assumptions for the metrics calculator
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BacktestConfig {
    /// Observations per year; 252 for daily bars, 52 weekly, 12 monthly
    pub periods_per_year: f64,
    /// Annual risk-free rate subtracted from per-period returns in the Sharpe ratio
    pub risk_free_rate: f64,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self::daily()
    }
}

impl BacktestConfig {
    pub fn daily() -> Self {
        Self {
            periods_per_year: 252.0,
            risk_free_rate: 0.0,
        }
    }

    pub fn weekly() -> Self {
        Self {
            periods_per_year: 52.0,
            ..Self::daily()
        }
    }

    pub fn monthly() -> Self {
        Self {
            periods_per_year: 12.0,
            ..Self::daily()
        }
    }

    pub fn validate(&self) -> AnalyticsResult<()> {
        ensure_positive("periods per year", self.periods_per_year)?;
        ensure_finite("risk-free rate", self.risk_free_rate)?;
        Ok(())
    }
}
