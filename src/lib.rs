//! # Option-Surface: European Option Pricing Surfaces and Backtest Metrics
//!
//! `option-surface` is a small quantitative-analytics library. It prices European
//! options with the closed-form Black-Scholes model, estimates volatility from
//! historical closes, builds strike/expiry pricing grids that can fold in an
//! external price forecast, and summarises backtest results.
//!
//! ## Core Features
//!
//! - **Black-Scholes Pricing**: European calls and puts with a fixed-precision normal CDF
//! - **Historical Volatility**: Annualized zero-mean log-return volatility with a documented fallback
//! - **Pricing Surface**: Configurable strike multipliers x expiries, optionally forecast-adjusted
//! - **Backtest Metrics**: Total return, benchmark return, Sharpe ratio and maximum drawdown
//!
//! Every function is pure and deterministic; identical inputs give identical
//! outputs and all types are `Send + Sync`.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use option_surface::{analyze_instrument, AnalyticsConfig, ForecastPoint, PriceBar, Quote};
//!
//! let config = AnalyticsConfig::default();
//! let as_of = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//!
//! // History from the data provider, oldest first
//! let history: Vec<PriceBar> = [100.0, 101.5, 99.8, 102.3, 103.1]
//!     .iter()
//!     .enumerate()
//!     .map(|(i, &close)| PriceBar {
//!         date: as_of - chrono::Days::new(5 - i as u64),
//!         close,
//!     })
//!     .collect();
//! let quote = Quote::from_history("NVDA", 103.1, history, &config.volatility);
//!
//! // Optional forecast from an external model
//! let forecast = vec![ForecastPoint::new(as_of + chrono::Days::new(30), 110.0)];
//!
//! let surface = analyze_instrument(&quote, Some(forecast.as_slice()), as_of, &config)?;
//! assert_eq!(surface.len(), 25);
//! assert_eq!(surface.forecast_matches(), 5);
//! # Ok::<(), option_surface::AnalyticsError>(())
//! ```
//!
//! ## Configuration Presets
//!
//! The [`default_configs`] module provides ready-made configurations:
//! - `standard()`: 80%-120% strikes x 30/60/90/180/360 day expiries at 5%
//! - `weekly()`: the same strikes over a 7/14/21/28 day ladder
//! - `dense()`: 13 strikes from 70% to 130% of spot

// ================================================================================================
// MODULES
// ================================================================================================

pub mod backtest;
pub mod config;
pub mod error;
pub mod models;
pub mod surface;

// ================================================================================================
// IMPORTS
// ================================================================================================

use chrono::NaiveDate;

use models::volatility::pricing_volatility;

// ================================================================================================
// PUBLIC RE-EXPORTS
// ================================================================================================

// Errors and configuration
pub use config::AnalyticsConfig;
pub use error::{AnalyticsError, AnalyticsResult};

// Pricing model
pub use models::bs::{bs_call_price, bs_price, bs_put_price, norm_cdf, OptionType};

// Volatility estimation
pub use models::volatility::{
    estimate_volatility, estimate_with_config, VolatilityConfig, VolatilitySource,
    DEFAULT_FALLBACK_VOLATILITY, TRADING_DAYS_PER_YEAR,
};

// Pricing surface
pub use surface::{
    build_pricing_surface, ForecastPoint, PriceBar, PricingRow, PricingSurface, Quote,
    SurfaceConfig,
};

// Backtest metrics
pub use backtest::{
    compute_backtest_metrics, drawdown_series, BacktestConfig, BacktestMetrics, BacktestPoint,
};

// ================================================================================================
// DEFAULT CONFIGURATIONS
// ================================================================================================

/// Pre-configured analytics settings for common use cases.
///
/// # Available Configurations
///
/// - [`standard()`]: The classic 5 x 5 grid
/// - [`weekly()`]: Short-dated weekly expiries
/// - [`dense()`]: Finer strike spacing for smile-style charts
pub mod default_configs {
    use crate::config::AnalyticsConfig;
    use crate::surface::SurfaceConfig;

    /// Strike multipliers {0.8, 0.9, 1.0, 1.1, 1.2}, expiries {30, 60, 90, 180, 360}
    /// days, 5% risk-free rate, 30% fallback volatility, daily backtest sampling.
    ///
    /// # Example
    ///
    /// ```rust
    /// use option_surface::default_configs;
    ///
    /// let config = default_configs::standard();
    /// assert_eq!(config.surface.grid_size(), 25);
    /// ```
    pub fn standard() -> AnalyticsConfig {
        AnalyticsConfig::default()
    }

    /// Standard strikes over 7, 14, 21 and 28 day expiries.
    pub fn weekly() -> AnalyticsConfig {
        AnalyticsConfig {
            surface: SurfaceConfig::weekly(),
            ..AnalyticsConfig::default()
        }
    }

    /// 13 strikes from 70% to 130% of spot over the standard expiries.
    pub fn dense() -> AnalyticsConfig {
        AnalyticsConfig {
            surface: SurfaceConfig::dense(),
            ..AnalyticsConfig::default()
        }
    }
}

/// Price the configured surface for one instrument.
///
/// This is the per-selection flow: the quote's volatility is sanitized
/// (a zero or non-finite figure becomes `config.volatility.fallback`), then
/// [`build_pricing_surface`] runs over `config.surface` with the optional
/// forecast.
///
/// # Arguments
///
/// * `quote` - Instrument snapshot; `price` is used as spot
/// * `forecast` - Optional predicted prices, matched to expiries by calendar day
/// * `as_of` - The date expiries are counted from
/// * `config` - Grid, volatility and backtest settings
///
/// # Errors
///
/// * `InvalidInput` if the quote price is not positive or the surface
///   configuration is invalid
pub fn analyze_instrument(
    quote: &Quote,
    forecast: Option<&[ForecastPoint]>,
    as_of: NaiveDate,
    config: &AnalyticsConfig,
) -> AnalyticsResult<PricingSurface> {
    let volatility = pricing_volatility(quote.volatility, &config.volatility);

    tracing::debug!(
        symbol = %quote.symbol,
        price = quote.price,
        volatility,
        forecast_points = forecast.map_or(0, |f| f.len()),
        "analyzing instrument"
    );

    build_pricing_surface(quote.price, volatility, forecast, as_of, &config.surface)
}
