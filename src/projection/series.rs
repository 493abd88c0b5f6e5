//! Projection output rows

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Snapshot of the portfolio at the end of one month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRow {
    /// First day of the month
    pub month: NaiveDate,
    /// Principal contributed so far, including the initial balance
    pub invested_amount: f64,
    /// Portfolio value after compounding
    pub accumulated_value: f64,
}

impl ProjectionRow {
    /// Interest earned to date
    pub fn interest(&self) -> f64 {
        self.accumulated_value - self.invested_amount
    }
}

/// Ordered monthly rows, opening row first.
///
/// Always holds at least the opening row plus one projected month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionSeries {
    monthly_rate: f64,
    rows: Vec<ProjectionRow>,
}

impl ProjectionSeries {
    pub(crate) fn new(monthly_rate: f64, rows: Vec<ProjectionRow>) -> Self {
        debug_assert!(!rows.is_empty());
        Self { monthly_rate, rows }
    }

    /// Monthly rate used for compounding
    pub fn monthly_rate(&self) -> f64 {
        self.monthly_rate
    }

    pub fn rows(&self) -> &[ProjectionRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProjectionRow> {
        self.rows.iter()
    }

    /// Month 0, before any compounding
    pub fn opening(&self) -> &ProjectionRow {
        &self.rows[0]
    }

    /// Last projected month
    pub fn closing(&self) -> &ProjectionRow {
        &self.rows[self.rows.len() - 1]
    }

    pub fn into_rows(self) -> Vec<ProjectionRow> {
        self.rows
    }
}

impl<'a> IntoIterator for &'a ProjectionSeries {
    type Item = &'a ProjectionRow;
    type IntoIter = std::slice::Iter<'a, ProjectionRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
