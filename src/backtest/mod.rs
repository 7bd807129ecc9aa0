//! Backtest metrics module
//!
//! Consumes the value series produced by an external backtest engine and
//! summarises it: strategy and benchmark returns, Sharpe ratio, drawdown and
//! how often the forecast called the direction correctly.

pub mod metrics;
pub mod types;

pub use metrics::*;
pub use types::*;
