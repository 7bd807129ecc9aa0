//! Historical volatility estimation
//!
//! Converts an ordered series of close prices into an annualized volatility
//! figure and decides which volatility a quote is priced with. Daily log
//! returns are assumed centred at zero, so the variance is the plain mean of
//! squared returns with no mean subtraction or small-sample correction.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Volatility used whenever the history cannot support an estimate (30%).
pub const DEFAULT_FALLBACK_VOLATILITY: f64 = 0.3;

/// Trading days per year used to annualize daily returns.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Range drawn from by [`VolatilitySource::Simulated`].
pub const SIMULATED_VOLATILITY_RANGE: std::ops::Range<f64> = 0.2..0.5;

/// Where a quote's volatility comes from.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum VolatilitySource {
    /// Estimate from the close-price history.
    #[default]
    Historical,
    /// Use a caller-supplied figure.
    Fixed { value: f64 },
    /// Placeholder figure drawn uniformly from [`SIMULATED_VOLATILITY_RANGE`].
    /// The same seed always yields the same value.
    Simulated { seed: u64 },
}

/// Configuration for volatility estimation
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VolatilityConfig {
    /// Volatility substituted when no usable estimate exists
    pub fallback: f64,
    /// Observations per year used for annualization
    pub trading_days: f64,
    /// Only use the most recent `n` closes (None = whole history)
    pub lookback: Option<usize>,
    /// Source of the figure handed to the pricer
    pub source: VolatilitySource,
}

impl Default for VolatilityConfig {
    fn default() -> Self {
        Self {
            fallback: DEFAULT_FALLBACK_VOLATILITY,
            trading_days: TRADING_DAYS_PER_YEAR,
            lookback: None,
            source: VolatilitySource::Historical,
        }
    }
}

impl VolatilityConfig {
    /// Estimate from the last `closes` observations only.
    pub fn with_lookback(closes: usize) -> Self {
        Self {
            lookback: Some(closes),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> crate::AnalyticsResult<()> {
        use crate::models::utils::ensure_positive;

        ensure_positive("fallback volatility", self.fallback)?;
        ensure_positive("trading days per year", self.trading_days)?;
        if let Some(n) = self.lookback {
            if n < 2 {
                return Err(crate::AnalyticsError::InvalidInput(format!(
                    "volatility lookback must cover at least 2 closes, got: {}",
                    n
                )));
            }
        }
        if let VolatilitySource::Fixed { value } = self.source {
            ensure_positive("fixed volatility", value)?;
        }
        Ok(())
    }
}

/// Annualized volatility of a close-price series with the default settings.
///
/// Returns [`DEFAULT_FALLBACK_VOLATILITY`] for fewer than two closes. A flat
/// series yields exactly `0.0`; use [`pricing_volatility`] before pricing.
///
/// # Example
///
/// ```rust
/// use option_surface::estimate_volatility;
///
/// assert_eq!(estimate_volatility(&[]), 0.3);
/// assert_eq!(estimate_volatility(&[100.0, 100.0, 100.0]), 0.0);
/// ```
pub fn estimate_volatility(closes: &[f64]) -> f64 {
    estimate_with_config(closes, &VolatilityConfig::default())
}

/// Annualized volatility `sqrt(trading_days * mean(r_i^2))` where
/// `r_i = ln(close_i / close_{i-1})`.
///
/// Falls back to `config.fallback` when fewer than two closes remain after
/// applying the lookback window, or when any close is non-positive or
/// non-finite.
pub fn estimate_with_config(closes: &[f64], config: &VolatilityConfig) -> f64 {
    let window = match config.lookback {
        Some(n) if n < closes.len() => &closes[closes.len() - n..],
        _ => closes,
    };

    if window.len() < 2 {
        tracing::debug!(
            closes = window.len(),
            fallback = config.fallback,
            "not enough closes for a volatility estimate, using fallback"
        );
        return config.fallback;
    }

    if let Some(idx) = window.iter().position(|c| !(c.is_finite() && *c > 0.0)) {
        tracing::warn!(
            index = idx,
            close = window[idx],
            fallback = config.fallback,
            "close price is not strictly positive, using fallback volatility"
        );
        return config.fallback;
    }

    let sum_sq: f64 = window
        .windows(2)
        .map(|pair| {
            let r = (pair[1] / pair[0]).ln();
            r * r
        })
        .sum();
    let mean_sq = sum_sq / (window.len() - 1) as f64;

    config.trading_days.sqrt() * mean_sq.sqrt()
}

/// Volatility safe to hand to the pricer: `estimate` when finite and
/// positive, otherwise `config.fallback`.
pub fn pricing_volatility(estimate: f64, config: &VolatilityConfig) -> f64 {
    if estimate.is_finite() && estimate > 0.0 {
        estimate
    } else {
        tracing::debug!(
            estimate,
            fallback = config.fallback,
            "degenerate volatility replaced by fallback"
        );
        config.fallback
    }
}

impl VolatilitySource {
    /// Resolve to a strictly positive volatility for pricing.
    pub fn resolve(&self, closes: &[f64], config: &VolatilityConfig) -> f64 {
        let raw = match *self {
            VolatilitySource::Historical => estimate_with_config(closes, config),
            VolatilitySource::Fixed { value } => value,
            VolatilitySource::Simulated { seed } => {
                let mut rng = StdRng::seed_from_u64(seed);
                rng.gen_range(SIMULATED_VOLATILITY_RANGE)
            }
        };
        pricing_volatility(raw, config)
    }
}
