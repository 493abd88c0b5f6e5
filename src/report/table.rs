//! Tabular output of a projection series

use super::{AnnualSnapshot, MoneyFormat};
use crate::projection::ProjectionSeries;
use std::io::Write;

const SERIES_HEADER: [&str; 4] = ["month", "invested_amount", "accumulated_value", "interest"];

/// Write every row as CSV, ascending by month.
///
/// With a `MoneyFormat` the amounts are written as currency strings, otherwise
/// as unrounded numbers.
pub fn write_series_csv<W: Write>(
    series: &ProjectionSeries,
    writer: W,
    money: Option<&MoneyFormat>,
) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(SERIES_HEADER)?;

    let amount = |value: f64| match money {
        Some(money) => money.format(value),
        None => value.to_string(),
    };

    for row in series {
        wtr.write_record([
            row.month.format("%Y-%m").to_string(),
            amount(row.invested_amount),
            amount(row.accumulated_value),
            amount(row.interest()),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Fixed-width text table of the monthly rows
pub fn render_series_table(series: &ProjectionSeries, money: &MoneyFormat) -> String {
    let mut out = format!(
        "{:<8} {:>22} {:>22} {:>22}\n",
        "Month", "Invested", "Accumulated", "Interest"
    );
    for row in series {
        out.push_str(&format!(
            "{:<8} {:>22} {:>22} {:>22}\n",
            row.month.format("%Y-%m"),
            money.format(row.invested_amount),
            money.format(row.accumulated_value),
            money.format(row.interest()),
        ));
    }
    out
}

/// Fixed-width text table of the calendar-year snapshots
pub fn render_annual_table(snapshots: &[AnnualSnapshot], money: &MoneyFormat) -> String {
    let mut out = format!(
        "{:<6} {:>22} {:>22} {:>22}\n",
        "Year", "Invested", "Accumulated", "Interest"
    );
    for snapshot in snapshots {
        out.push_str(&format!(
            "{:<6} {:>22} {:>22} {:>22}\n",
            snapshot.year,
            money.format(snapshot.invested_amount),
            money.format(snapshot.accumulated_value),
            money.format(snapshot.interest),
        ));
    }
    out
}
