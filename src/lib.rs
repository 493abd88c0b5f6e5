//! Compound Projection - month-by-month growth of a portfolio under compound
//! interest with recurring monthly contributions
//!
//! This library provides:
//! - The projection engine (annual to monthly rate conversion, compounding loop)
//! - Request preparation from user-entered values
//! - Summaries, annual snapshots and locale-aware currency formatting
//! - Parallel batch projection of scenario files

pub mod error;
pub mod config;
pub mod projection;
pub mod request;
pub mod report;
pub mod batch;

// Re-export commonly used types
pub use error::{BatchError, ConfigError, InvalidInputError};
pub use config::{ProjectionConfig, StartDatePolicy};
pub use projection::{project, Horizon, ProjectionEngine, ProjectionInput, ProjectionRow, ProjectionSeries};
pub use request::{ProjectionRequest, Readiness};
pub use report::{MoneyFormat, ProjectionSummary};
