//! # Curvestats Analytics Engine
//!
//! This crate turns an equity curve (and optionally a comparison curve) into
//! risk/return statistics, either as one scalar over the whole curve or as a
//! rolling sequence over sliding windows.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of where
//!   the series came from or how results are shown. It depends only on
//!   `core-types` (Layer 0).
//! - **Closed Registry:** Metrics are looked up by identifier in a static table
//!   of function pointers (`registry`). Unknown identifiers fail before any work
//!   is done.
//! - **One Degenerate Policy:** Metrics report zero or undefined denominators as
//!   `stats::Degenerate`. Scalar mode turns that into
//!   `AnalyticsError::DegenerateScalar`; rolling mode turns it into NaN and keeps
//!   going.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: dispatcher with `compute`, `compute_rolling`,
//!   `compute_scalar`, `compute_all` and `summarize`.
//! - `MetricParams`: risk-free rate, target return and comparison series.
//! - `WindowSlicer`: the stride-1 windowing used by every rolling computation.
//! - `PerformanceReport`: whole-curve summary.
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod dual;
pub mod engine;
pub mod error;
pub mod params;
pub mod registry;
pub mod report;
pub mod single;
pub mod stats;
pub mod window;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{AnalyticsEngine, DEFAULT_PARALLEL_THRESHOLD};
pub use error::AnalyticsError;
pub use params::MetricParams;
pub use registry::{MetricEntry, Unit};
pub use report::PerformanceReport;
pub use window::{PairedWindows, WindowSlicer};
