use crate::error::{AnalyticsError, AnalyticsResult};
use crate::models::utils::{ensure_finite, ensure_positive};

/// Grid and market parameters for the pricing surface
///
/// Rows are produced strike-major: every expiry of the first multiplier, then
/// every expiry of the second, and so on, each list in the order given here.
///
/// # Example Usage
///
/// ```rust
/// # use option_surface::SurfaceConfig;
/// let config = SurfaceConfig {
///     expiry_days: vec![7, 14, 30],
///     ..SurfaceConfig::standard()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SurfaceConfig {
    /// Strikes as multiples of spot (e.g., [0.8, 0.9, 1.0, 1.1, 1.2])
    pub strike_multipliers: Vec<f64>,

    /// Expiries in calendar days
    pub expiry_days: Vec<u32>,

    /// Continuously compounded risk-free rate
    pub risk_free_rate: f64,

    /// Day-count denominator converting calendar days to years (ACT/365)
    pub day_count: f64,

    /// Weight given to a matching forecast when adjusting spot.
    ///
    /// The priced underlying is `(1 - w) * spot + w * predicted`; the default
    /// of 0.5 is an equal blend.
    pub forecast_weight: f64,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl SurfaceConfig {
    /// 5 strikes (80%-120% of spot) x 5 expiries (30d-360d) at a 5% rate.
    pub fn standard() -> Self {
        Self {
            strike_multipliers: vec![0.8, 0.9, 1.0, 1.1, 1.2],
            expiry_days: vec![30, 60, 90, 180, 360],
            risk_free_rate: 0.05,
            day_count: 365.0,
            forecast_weight: 0.5,
        }
    }

    /// Standard strikes over a weekly expiry ladder (7, 14, 21, 28 days).
    pub fn weekly() -> Self {
        Self::from_grid(vec![0.8, 0.9, 1.0, 1.1, 1.2], vec![7, 14, 21, 28])
    }

    /// 13 strikes from 70% to 130% of spot in 5% steps over the standard expiries.
    pub fn dense() -> Self {
        let strike_multipliers = (0..=12).map(|i| 0.7 + 0.05 * i as f64).collect();
        Self::from_grid(strike_multipliers, vec![30, 60, 90, 180, 360])
    }

    /// Custom grid with the standard rate, day count and forecast weight.
    pub fn from_grid(strike_multipliers: Vec<f64>, expiry_days: Vec<u32>) -> Self {
        Self {
            strike_multipliers,
            expiry_days,
            ..Self::standard()
        }
    }

    /// Number of rows a surface built with this configuration contains.
    pub fn grid_size(&self) -> usize {
        self.strike_multipliers.len() * self.expiry_days.len()
    }

    pub fn validate(&self) -> AnalyticsResult<()> {
        if self.strike_multipliers.is_empty() {
            return Err(AnalyticsError::InvalidInput(
                "surface needs at least one strike multiplier".to_string(),
            ));
        }
        if self.expiry_days.is_empty() {
            return Err(AnalyticsError::InvalidInput(
                "surface needs at least one expiry".to_string(),
            ));
        }
        for &m in &self.strike_multipliers {
            ensure_positive("strike multiplier", m)?;
        }
        if let Some(&days) = self.expiry_days.iter().find(|&&d| d == 0) {
            return Err(AnalyticsError::InvalidInput(format!(
                "expiry must be at least one day, got: {}",
                days
            )));
        }
        ensure_finite("risk-free rate", self.risk_free_rate)?;
        ensure_positive("day count", self.day_count)?;
        if !(0.0..=1.0).contains(&self.forecast_weight) {
            return Err(AnalyticsError::InvalidInput(format!(
                "forecast weight must lie in [0, 1], got: {}",
                self.forecast_weight
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        for config in [
            SurfaceConfig::standard(),
            SurfaceConfig::weekly(),
            SurfaceConfig::dense(),
        ] {
            assert!(config.validate().is_ok(), "{:?}", config);
        }
        assert_eq!(SurfaceConfig::standard().grid_size(), 25);
        assert_eq!(SurfaceConfig::dense().strike_multipliers.len(), 13);
    }

    #[test]
    fn test_invalid_grids() {
        assert!(SurfaceConfig::from_grid(vec![], vec![30]).validate().is_err());
        assert!(SurfaceConfig::from_grid(vec![1.0], vec![]).validate().is_err());
        assert!(SurfaceConfig::from_grid(vec![0.0], vec![30]).validate().is_err());
        assert!(SurfaceConfig::from_grid(vec![1.0], vec![0]).validate().is_err());

        let bad_weight = SurfaceConfig {
            forecast_weight: 1.5,
            ..SurfaceConfig::standard()
        };
        assert!(bad_weight.validate().is_err());
    }
}
