//! # Curvestats Core Types
//!
//! Shared vocabulary for every other crate in the workspace: the immutable
//! `Series` container loaded by the caller, the closed set of
//! `MetricId`s, and the `RollingResult` shape produced by the analytics engine.
//!
//! This crate has no logic beyond construction-time validation.

pub mod enums;
pub mod error;
pub mod results;
pub mod series;

// Re-export the core types to provide a clean public API.
pub use enums::{MetricId, MetricKind};
pub use results::{RollingPoint, RollingResult};
pub use error::CoreError;
pub use series::{Series, SeriesView};

/// Trading days used for every annualization in the workspace.
pub const TRADING_DAYS_PER_YEAR: usize = 252;
