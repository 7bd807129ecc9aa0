use chrono::NaiveDate;

use crate::models::volatility::VolatilityConfig;

/// Daily close of the underlying
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriceBar {
    pub date: NaiveDate,
    /// Close price, strictly positive
    pub close: f64,
}

/// Externally produced price prediction for a future date
///
/// The provider emits `ds`/`yhat`/`yhat_lower`/`yhat_upper`; those names are
/// accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForecastPoint {
    #[cfg_attr(feature = "serde", serde(alias = "ds"))]
    pub date: NaiveDate,
    #[cfg_attr(feature = "serde", serde(alias = "yhat"))]
    pub predicted_price: f64,
    /// Lower bound of the forecast interval, if provided
    #[cfg_attr(feature = "serde", serde(default, alias = "yhat_lower"))]
    pub lower: Option<f64>,
    /// Upper bound of the forecast interval, if provided
    #[cfg_attr(feature = "serde", serde(default, alias = "yhat_upper"))]
    pub upper: Option<f64>,
}

impl ForecastPoint {
    pub fn new(date: NaiveDate, predicted_price: f64) -> Self {
        Self {
            date,
            predicted_price,
            lower: None,
            upper: None,
        }
    }
}

/// Snapshot of one instrument for a single load cycle
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quote {
    pub symbol: String,
    /// Last (or previous-close) price
    pub price: f64,
    /// Close minus open of the quoted session, when known
    #[cfg_attr(feature = "serde", serde(default))]
    pub change: Option<f64>,
    /// Annualized volatility the instrument is priced with
    pub volatility: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub history: Option<Vec<PriceBar>>,
}

impl Quote {
    /// Quote with an explicitly supplied volatility and no history.
    pub fn new(symbol: impl Into<String>, price: f64, volatility: f64) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            change: None,
            volatility,
            history: None,
        }
    }

    /// Quote whose volatility is resolved from `history` through
    /// `config.source`. The result is always strictly positive.
    pub fn from_history(
        symbol: impl Into<String>,
        price: f64,
        history: Vec<PriceBar>,
        config: &VolatilityConfig,
    ) -> Self {
        let symbol = symbol.into();
        let closes: Vec<f64> = history.iter().map(|bar| bar.close).collect();
        let volatility = config.source.resolve(&closes, config);
        tracing::debug!(
            symbol = %symbol,
            bars = closes.len(),
            volatility,
            "resolved quote volatility"
        );
        Self {
            symbol,
            price,
            change: None,
            volatility,
            history: Some(history),
        }
    }

    pub fn with_change(mut self, change: f64) -> Self {
        self.change = Some(change);
        self
    }

    /// Close prices of the attached history, oldest first.
    pub fn closes(&self) -> Vec<f64> {
        self.history
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|bar| bar.close)
            .collect()
    }
}

/// One priced (strike, expiry) cell of the surface
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingRow {
    pub strike: f64,
    pub days_to_expiry: u32,
    /// Underlying the row was priced at (spot, or spot blended with a forecast)
    pub underlying: f64,
    pub call_price: f64,
    pub put_price: f64,
    /// Forecast matched to this expiry date, if any
    pub predicted_price: Option<f64>,
}

/// Priced strike/expiry grid, rows in strike-major order
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingSurface {
    pub spot: f64,
    pub volatility: f64,
    pub as_of: NaiveDate,
    pub rows: Vec<PricingRow>,
}

impl PricingSurface {
    pub fn rows(&self) -> &[PricingRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<PricingRow> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows for a single expiry, ordered by strike as in the grid.
    pub fn slice_by_expiry(&self, days: u32) -> Vec<&PricingRow> {
        self.rows
            .iter()
            .filter(|row| row.days_to_expiry == days)
            .collect()
    }

    /// Distinct strikes in grid order.
    pub fn strikes(&self) -> Vec<f64> {
        let mut strikes: Vec<f64> = Vec::new();
        for row in &self.rows {
            if strikes.last() != Some(&row.strike) {
                strikes.push(row.strike);
            }
        }
        strikes
    }

    /// Distinct expiries in grid order.
    pub fn expiries(&self) -> Vec<u32> {
        let mut expiries: Vec<u32> = Vec::new();
        for row in &self.rows {
            if !expiries.contains(&row.days_to_expiry) {
                expiries.push(row.days_to_expiry);
            }
        }
        expiries
    }

    /// Row for an exact strike and expiry.
    pub fn get(&self, strike: f64, days: u32) -> Option<&PricingRow> {
        self.rows
            .iter()
            .find(|row| (row.strike - strike).abs() < 1e-9 && row.days_to_expiry == days)
    }

    /// Number of rows whose expiry matched a forecast point.
    pub fn forecast_matches(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| row.predicted_price.is_some())
            .count()
    }
}
