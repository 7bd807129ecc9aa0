//! Aggregate configuration handed to the analytics entry points.
//!
//! Every section has a default, and with the `serde` feature every field may
//! be omitted from a TOML file:
//!
//! ```toml
//! [surface]
//! strike_multipliers = [0.9, 1.0, 1.1]
//! expiry_days = [30, 90]
//! risk_free_rate = 0.04
//!
//! [volatility]
//! lookback = 60
//! source = { kind = "simulated", seed = 42 }
//!
//! [backtest]
//! periods_per_year = 252
//! ```

use crate::backtest::BacktestConfig;
use crate::error::AnalyticsResult;
use crate::models::volatility::VolatilityConfig;
use crate::surface::SurfaceConfig;

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnalyticsConfig {
    pub surface: SurfaceConfig,
    pub volatility: VolatilityConfig,
    pub backtest: BacktestConfig,
}

impl AnalyticsConfig {
    pub fn validate(&self) -> AnalyticsResult<()> {
        self.surface.validate()?;
        self.volatility.validate()?;
        self.backtest.validate()?;
        Ok(())
    }

    /// Parse and validate a TOML document.
    #[cfg(feature = "serde")]
    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        use anyhow::Context;

        let config: Self = toml::from_str(s).context("Failed to parse analytics config")?;
        config
            .validate()
            .context("Analytics config failed validation")?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    #[cfg(feature = "serde")]
    pub fn from_toml_file(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        use anyhow::Context;

        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }
}
