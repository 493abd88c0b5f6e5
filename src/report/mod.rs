//! Presentation helpers: summaries, annual view, currency and tables

mod currency;
mod summary;
mod annual;
pub mod table;

pub use currency::{Locale, MoneyFormat};
pub use summary::{Composition, ProjectionSummary};
pub use annual::{annual_snapshots, AnnualSnapshot};
pub use table::{render_annual_table, render_series_table, write_series_csv};
