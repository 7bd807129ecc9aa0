//! Pricing surface module
//!
//! Enumerates a strike x expiry grid around the current spot, prices a call
//! and a put in every cell, and optionally folds an external price forecast
//! into the underlying for expiries whose date the forecast covers.

pub mod builder;
pub mod config;
pub mod types;

pub use builder::*;
pub use config::*;
pub use types::*;
