//! Walk-forward cross-validation fold generation for per-customer monthly
//! billing-usage series.
//!
//! The engine normalizes loosely-formatted billing months, sequences each
//! customer's records, derives a fold plan from the available history, and
//! assembles per-fold training/validation/test splits for every target
//! customer and usage type, carrying similar-customer histories along as
//! static context.

pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod types;

pub use error::{FoldcastError, Result};
