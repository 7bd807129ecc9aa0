pub mod bs;
pub mod volatility;

/// Utility functions shared by the pricing models
pub mod utils {
    use crate::error::{AnalyticsError, AnalyticsResult};

    /// Return `value` if it is finite and strictly positive, otherwise an
    /// `InvalidInput` error naming the offending argument.
    pub fn ensure_positive(name: &str, value: f64) -> AnalyticsResult<f64> {
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(AnalyticsError::InvalidInput(format!(
                "{} must be finite and positive, got: {}",
                name, value
            )))
        }
    }

    /// Return `value` if it is finite, otherwise an `InvalidInput` error.
    pub fn ensure_finite(name: &str, value: f64) -> AnalyticsResult<f64> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(AnalyticsError::InvalidInput(format!(
                "{} must be finite, got: {}",
                name, value
            )))
        }
    }

    /// Convert calendar days to a year fraction using an ACT/`day_count` basis.
    pub fn year_fraction(days: u32, day_count: f64) -> f64 {
        f64::from(days) / day_count
    }

}
