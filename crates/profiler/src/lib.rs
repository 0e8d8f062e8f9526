//! Data Quality Profiler
//!
//! Read-only diagnostics used before and after cleaning: record count,
//! missing values, numeric ranges and titles carrying encoding artifacts.

mod profiler;
mod statistics;

pub use profiler::{ProfileReport, ProfileRequest, Profiler};
pub use statistics::NumericRange;
