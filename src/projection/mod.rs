//! Projection engine for month-by-month compound growth with contributions

mod input;
mod engine;
mod series;

pub use input::{first_of_month, Horizon, ProjectionInput};
pub use engine::{monthly_rate, project, ProjectionEngine};
pub use series::{ProjectionRow, ProjectionSeries};

/// Number of compounding periods in a year
pub const MONTHS_PER_YEAR: u32 = 12;

/// Longest horizon a request may ask for (100 years = 1200 monthly steps)
pub const MAX_HORIZON_YEARS: u32 = 100;
