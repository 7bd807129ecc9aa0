use std::collections::HashMap;

use chrono::NaiveDate;

use crate::error::AnalyticsResult;
use crate::models::bs::{bs_price, OptionType};
use crate::models::utils::{ensure_positive, year_fraction};

use super::config::SurfaceConfig;
use super::types::{ForecastPoint, PricingRow, PricingSurface};

/// Index forecast points by their calendar-day offset from `as_of`.
///
/// When several points share a date the first one wins. Points with a
/// non-finite prediction are dropped.
pub fn index_forecast(forecast: &[ForecastPoint], as_of: NaiveDate) -> HashMap<i64, f64> {
    let mut by_offset: HashMap<i64, f64> = HashMap::with_capacity(forecast.len());
    for point in forecast {
        if !point.predicted_price.is_finite() {
            tracing::warn!(date = %point.date, "skipping non-finite forecast point");
            continue;
        }
        let offset = point.date.signed_duration_since(as_of).num_days();
        by_offset.entry(offset).or_insert(point.predicted_price);
    }
    by_offset
}

/// Build the strike/expiry pricing surface.
///
/// For every strike multiplier `m` and expiry `d` in `config`, the strike is
/// `m * spot` and the contract is priced at `t = d / day_count` years. If
/// `forecast` holds a point dated exactly `as_of + d` days, the underlying is
/// blended with that prediction (an equal blend by default) and the
/// prediction is attached to the row; otherwise the row is priced at `spot`
/// and `predicted_price` is `None`.
///
/// # Errors
///
/// * `InvalidInput` if `spot` or `volatility` is not finite and positive
/// * `InvalidInput` if `config` fails [`SurfaceConfig::validate`]
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use option_surface::{build_pricing_surface, SurfaceConfig};
///
/// let as_of = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
/// let surface = build_pricing_surface(100.0, 0.3, None, as_of, &SurfaceConfig::standard())?;
///
/// assert_eq!(surface.len(), 25);
/// for row in surface.slice_by_expiry(30) {
///     println!("K={:.0} call={:.2} put={:.2}", row.strike, row.call_price, row.put_price);
/// }
/// # Ok::<(), option_surface::AnalyticsError>(())
/// ```
pub fn build_pricing_surface(
    spot: f64,
    volatility: f64,
    forecast: Option<&[ForecastPoint]>,
    as_of: NaiveDate,
    config: &SurfaceConfig,
) -> AnalyticsResult<PricingSurface> {
    let spot = ensure_positive("spot", spot)?;
    let volatility = ensure_positive("volatility", volatility)?;
    config.validate()?;

    let forecast_by_offset = forecast
        .map(|points| index_forecast(points, as_of))
        .unwrap_or_default();

    let mut rows = Vec::with_capacity(config.grid_size());

    for &multiplier in &config.strike_multipliers {
        let strike = multiplier * spot;

        for &days in &config.expiry_days {
            let t = year_fraction(days, config.day_count);
            let predicted = forecast_by_offset.get(&i64::from(days)).copied();
            let underlying = adjusted_spot(spot, predicted, config.forecast_weight);

            let call_price = bs_price(
                OptionType::Call,
                underlying,
                strike,
                t,
                config.risk_free_rate,
                volatility,
            )?;
            let put_price = bs_price(
                OptionType::Put,
                underlying,
                strike,
                t,
                config.risk_free_rate,
                volatility,
            )?;

            rows.push(PricingRow {
                strike,
                days_to_expiry: days,
                underlying,
                call_price,
                put_price,
                predicted_price: predicted,
            });
        }
    }

    let surface = PricingSurface {
        spot,
        volatility,
        as_of,
        rows,
    };

    tracing::debug!(
        rows = surface.len(),
        forecast_matches = surface.forecast_matches(),
        spot,
        volatility,
        "built pricing surface"
    );

    Ok(surface)
}

/// Blend spot with a matched prediction. A blend that is not positive cannot
/// be priced, so it is discarded in favour of plain spot.
fn adjusted_spot(spot: f64, predicted: Option<f64>, weight: f64) -> f64 {
    match predicted {
        Some(prediction) => {
            let blended = (1.0 - weight) * spot + weight * prediction;
            if blended.is_finite() && blended > 0.0 {
                blended
            } else {
                tracing::warn!(
                    spot,
                    prediction,
                    "forecast-adjusted spot is not positive, pricing at spot"
                );
                spot
            }
        }
        None => spot,
    }
}
