//! Error taxonomy shared by the pricer, the surface builder and the backtest
//! metrics calculator.
//!
//! A forecast that does not line up with an expiry is not an error: the
//! corresponding [`PricingRow::predicted_price`](crate::PricingRow) is simply
//! `None`. Likewise a short price history falls back to a fixed volatility
//! instead of failing.

/// Typed failures surfaced to callers. Rendering them is left to the caller.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalyticsError {
    /// Non-positive or non-finite spot, strike, time, volatility or portfolio
    /// value, or an unusable configuration.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Not enough observations to compute a result.
    #[error("insufficient data: {0}")]
    InsufficientData(String),
}

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
