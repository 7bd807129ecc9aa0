// Closed-form Black-Scholes pricing for European calls and puts, no dividend
// yield. Greeks and implied-volatility solving are not provided.

use std::fmt;
use std::str::FromStr;

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::models::utils::{ensure_finite, ensure_positive};

/// European option kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    Call,
    Put,
}

impl FromStr for OptionType {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "call" => Ok(OptionType::Call),
            "put" => Ok(OptionType::Put),
            _ => Err(AnalyticsError::InvalidInput(format!(
                "Invalid option type: {}",
                s
            ))),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "call"),
            OptionType::Put => write!(f, "put"),
        }
    }
}

/// Standard normal cumulative distribution function.
///
/// Computed as `0.5 * (1 + erf(x / sqrt(2)))` with the Abramowitz-Stegun
/// approximation of `erf` below. Absolute error stays under 1e-6 and the
/// symmetry `norm_cdf(-x) == 1 - norm_cdf(x)` holds because `erf` is odd by
/// construction.
pub fn norm_cdf(x: f64) -> f64 {
    (0.5 * (1.0 + erf(x / std::f64::consts::SQRT_2))).clamp(0.0, 1.0)
}

/// Error function, Abramowitz & Stegun 7.1.26.
fn erf(x: f64) -> f64 {
    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;
    const P: f64 = 0.3275911;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let t = 1.0 / (1.0 + P * x);
    let y = 1.0 - (((((A5 * t + A4) * t) + A3) * t + A2) * t + A1) * t * (-x * x).exp();

    sign * y
}

/// Black-Scholes price of a European option.
///
/// `time_years` and `volatility` must be strictly positive (they divide `d1`),
/// as must `spot` and `strike`; `rate` must be finite. Violations return
/// [`AnalyticsError::InvalidInput`] instead of a NaN price.
///
/// ```text
/// d1   = (ln(S/K) + (r + σ²/2)·t) / (σ·√t)
/// d2   = d1 − σ·√t
/// call = S·Φ(d1) − K·e^(−rt)·Φ(d2)
/// put  = K·e^(−rt)·Φ(−d2) − S·Φ(−d1)
/// ```
///
/// # Example
///
/// ```rust
/// use option_surface::{bs_price, OptionType};
///
/// let call = bs_price(OptionType::Call, 100.0, 100.0, 1.0, 0.05, 0.2)?;
/// assert!((call - 10.45).abs() < 0.01);
/// # Ok::<(), option_surface::AnalyticsError>(())
/// ```
pub fn bs_price(
    option_type: OptionType,
    spot: f64,
    strike: f64,
    time_years: f64,
    rate: f64,
    volatility: f64,
) -> AnalyticsResult<f64> {
    let s = ensure_positive("spot", spot)?;
    let k = ensure_positive("strike", strike)?;
    let t = ensure_positive("time to expiry", time_years)?;
    let sigma = ensure_positive("volatility", volatility)?;
    let r = ensure_finite("risk-free rate", rate)?;

    let sigma_sqrt_t = sigma * t.sqrt();
    let d1 = ((s / k).ln() + (r + 0.5 * sigma * sigma) * t) / sigma_sqrt_t;
    let d2 = d1 - sigma_sqrt_t;
    let discounted_strike = k * (-r * t).exp();

    let price = match option_type {
        OptionType::Call => s * norm_cdf(d1) - discounted_strike * norm_cdf(d2),
        OptionType::Put => discounted_strike * norm_cdf(-d2) - s * norm_cdf(-d1),
    };

    // Deep out-of-the-money contracts can come out a hair below zero.
    Ok(price.max(0.0))
}

/// Price of a European call option under Black-Scholes assumptions.
pub fn bs_call_price(
    spot: f64,
    strike: f64,
    time_years: f64,
    rate: f64,
    volatility: f64,
) -> AnalyticsResult<f64> {
    bs_price(OptionType::Call, spot, strike, time_years, rate, volatility)
}

/// Price of a European put option under Black-Scholes assumptions.
pub fn bs_put_price(
    spot: f64,
    strike: f64,
    time_years: f64,
    rate: f64,
    volatility: f64,
) -> AnalyticsResult<f64> {
    bs_price(OptionType::Put, spot, strike, time_years, rate, volatility)
}
