//! Calendar-year view of a projection

use crate::projection::{ProjectionRow, ProjectionSeries};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Last projected row of a calendar year
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnnualSnapshot {
    pub year: i32,
    /// Month the snapshot was taken from (December, or the last projected month)
    pub month: NaiveDate,
    pub invested_amount: f64,
    pub accumulated_value: f64,
    pub interest: f64,
}

impl From<&ProjectionRow> for AnnualSnapshot {
    fn from(row: &ProjectionRow) -> Self {
        Self {
            year: row.month.year(),
            month: row.month,
            invested_amount: row.invested_amount,
            accumulated_value: row.accumulated_value,
            interest: row.interest(),
        }
    }
}

/// One snapshot per calendar year touched by the series, ascending by year
pub fn annual_snapshots(series: &ProjectionSeries) -> Vec<AnnualSnapshot> {
    let rows = series.rows();
    let mut snapshots = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        let year_ends = rows
            .get(i + 1)
            .map_or(true, |next| next.month.year() != row.month.year());
        if year_ends {
            snapshots.push(AnnualSnapshot::from(row));
        }
    }

    snapshots
}
