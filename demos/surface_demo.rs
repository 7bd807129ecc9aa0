// demos/surface_demo.rs
//
// Loads a daily close history, prices the standard surface with a toy forecast,
// prints the grid, charts the 30-day slice and summarises a backtest file.
//
// Usage:
//     cargo run --example surface_demo -- [history_csv] [backtest_csv]
//
// Defaults to the fixtures under tests/data/. Set RUST_LOG=debug to see the
// library's diagnostics. The chart is written to options_30d.svg.

use std::env;

use anyhow::{anyhow, Context, Result};
use chrono::{Days, NaiveDate};
use plotters::prelude::*;
use tracing_subscriber::EnvFilter;

use option_surface::{
    analyze_instrument, compute_backtest_metrics, default_configs, BacktestPoint, ForecastPoint,
    PriceBar, PricingRow, Quote,
};

#[derive(serde::Deserialize)]
struct HistoryRow {
    date: String,
    close: f64,
}

#[derive(serde::Deserialize)]
struct BacktestRow {
    date: String,
    portfolio: f64,
    benchmark: f64,
    predicted_return: Option<f64>,
    actual_return: Option<f64>,
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| format!("bad date {}", s))
}

fn load_history(path: &str) -> Result<Vec<PriceBar>> {
    let mut reader = csv::Reader::from_path(path).with_context(|| format!("open {}", path))?;
    reader
        .deserialize::<HistoryRow>()
        .map(|row| -> Result<PriceBar> {
            let row = row?;
            Ok(PriceBar {
                date: parse_date(&row.date)?,
                close: row.close,
            })
        })
        .collect()
}

fn load_backtest(path: &str) -> Result<Vec<BacktestPoint>> {
    let mut reader = csv::Reader::from_path(path).with_context(|| format!("open {}", path))?;
    reader
        .deserialize::<BacktestRow>()
        .map(|row| -> Result<BacktestPoint> {
            let row = row?;
            Ok(BacktestPoint {
                date: parse_date(&row.date)?,
                portfolio_value: row.portfolio,
                benchmark_value: row.benchmark,
                predicted_return: row.predicted_return,
                actual_return: row.actual_return,
            })
        })
        .collect()
}

fn plot_slice(rows: &[&PricingRow], path: &str) -> Result<()> {
    let min_strike = rows.first().map(|r| r.strike).unwrap_or(0.0);
    let max_strike = rows.last().map(|r| r.strike).unwrap_or(1.0);
    let max_price = rows
        .iter()
        .map(|r| r.call_price.max(r.put_price))
        .fold(0.0, f64::max);

    let root = SVGBackend::new(path, (1024, 640)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Price Analysis (30 Days): call red, put blue", ("sans-serif", 26))
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(min_strike..max_strike, 0.0..max_price * 1.1)?;

    chart
        .configure_mesh()
        .x_desc("Strike ($)")
        .y_desc("Option Price ($)")
        .draw()?;

    chart.draw_series(LineSeries::new(
        rows.iter().map(|r| (r.strike, r.call_price)),
        &RED,
    ))?;
    chart.draw_series(LineSeries::new(
        rows.iter().map(|r| (r.strike, r.put_price)),
        &BLUE,
    ))?;

    root.present()?;
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    let history_path = args
        .get(1)
        .map(String::as_str)
        .unwrap_or("tests/data/sample_history.csv");
    let backtest_path = args
        .get(2)
        .map(String::as_str)
        .unwrap_or("tests/data/sample_backtest.csv");

    let config = default_configs::standard();

    println!("Option Surface Demo");
    println!("===================");

    let history = load_history(history_path)?;
    let last = *history.last().ok_or_else(|| anyhow!("history is empty"))?;
    let quote = Quote::from_history("DEMO", last.close, history, &config.volatility);

    println!("Loaded {} closes, last {:.2} on {}", quote.closes().len(), quote.price, last.date);
    println!("Annualized volatility: {:.2}%", quote.volatility * 100.0);

    // Toy forecast: +1% per month of horizon on the 30 and 90 day expiries
    let as_of = last.date;
    let forecast: Vec<ForecastPoint> = [30u64, 90]
        .iter()
        .map(|&d| {
            ForecastPoint::new(as_of + Days::new(d), quote.price * (1.0 + 0.01 * d as f64 / 30.0))
        })
        .collect();

    let surface = analyze_instrument(&quote, Some(forecast.as_slice()), as_of, &config)?;

    println!("\nOptions Chain ({} rows)", surface.len());
    println!(
        "{:<10} {:<6} {:<12} {:<12} {:<10}",
        "Strike", "Days", "Call Price", "Put Price", "Forecast"
    );
    println!("{}", "-".repeat(54));
    for row in surface.rows() {
        let forecast = row
            .predicted_price
            .map(|p| format!("{:.2}", p))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<10.2} {:<6} {:<12.2} {:<12.2} {:<10}",
            row.strike, row.days_to_expiry, row.call_price, row.put_price, forecast
        );
    }

    plot_slice(&surface.slice_by_expiry(30), "options_30d.svg")?;
    println!("\nChart saved to options_30d.svg");

    let series = load_backtest(backtest_path)?;
    let metrics = compute_backtest_metrics(&series, &config.backtest)?;

    println!("\nBacktest Results");
    println!("  Strategy Return:  {:.2}%", metrics.total_return * 100.0);
    println!("  Benchmark Return: {:.2}%", metrics.benchmark_return * 100.0);
    println!("  Sharpe Ratio:     {:.2}", metrics.sharpe_ratio);
    println!("  Max Drawdown:     {:.2}%", metrics.max_drawdown * 100.0);
    if let Some(hit_rate) = metrics.forecast_hit_rate {
        println!("  Forecast Hit Rate: {:.1}%", hit_rate * 100.0);
    }

    Ok(())
}
