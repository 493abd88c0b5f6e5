//! End-of-horizon summary and invested/interest composition

use super::{Locale, MoneyFormat};
use crate::projection::{Horizon, ProjectionInput, ProjectionSeries};
use chrono::NaiveDate;
use serde::Serialize;

/// Headline figures for a finished projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectionSummary {
    pub initial_balance: f64,
    pub monthly_contribution: f64,
    pub annual_rate: f64,
    pub horizon: Horizon,
    pub start_month: NaiveDate,
    pub end_month: NaiveDate,
    /// Accumulated value of the last row
    pub final_value: f64,
    /// Invested amount of the last row
    pub total_invested: f64,
    /// `final_value - total_invested`
    pub total_interest: f64,
}

impl ProjectionSummary {
    pub fn new(input: &ProjectionInput, series: &ProjectionSeries) -> Self {
        let opening = series.opening();
        let closing = series.closing();
        Self {
            initial_balance: input.initial_balance,
            monthly_contribution: input.monthly_contribution,
            annual_rate: input.annual_rate,
            horizon: input.horizon,
            start_month: opening.month,
            end_month: closing.month,
            final_value: closing.accumulated_value,
            total_invested: closing.invested_amount,
            total_interest: closing.accumulated_value - closing.invested_amount,
        }
    }

    pub fn composition(&self) -> Composition {
        Composition::new(self.total_invested, self.total_interest)
    }

    /// One-sentence description of the result, worded for the formatter's locale
    pub fn narrative(&self, money: &MoneyFormat) -> String {
        let locale = money.locale();
        let rate = locale.format_percent(self.annual_rate);
        match locale {
            Locale::PtBr => {
                let period = match self.horizon {
                    Horizon::Years(1) => "1 ano".to_string(),
                    Horizon::Years(years) => format!("{} anos", years),
                    Horizon::Months(1) => "1 mês".to_string(),
                    Horizon::Months(months) => format!("{} meses", months),
                };
                format!(
                    "Considerando saldo inicial de {}, aplicações mensais de {} e taxa de juros de {} ao ano, \
                     em {} você terá {}, sendo que saiu do seu bolso como investimento apenas {} e {} são juros.",
                    money.format(self.initial_balance),
                    money.format(self.monthly_contribution),
                    rate,
                    period,
                    money.format(self.final_value),
                    money.format(self.total_invested),
                    money.format(self.total_interest),
                )
            }
            Locale::EnUs => {
                let period = match self.horizon {
                    Horizon::Years(1) => "1 year".to_string(),
                    Horizon::Years(years) => format!("{} years", years),
                    Horizon::Months(1) => "1 month".to_string(),
                    Horizon::Months(months) => format!("{} months", months),
                };
                format!(
                    "Starting with {}, contributing {} a month at {} a year, in {} you will have {}, \
                     of which {} came out of your pocket and {} is interest.",
                    money.format(self.initial_balance),
                    money.format(self.monthly_contribution),
                    rate,
                    period,
                    money.format(self.final_value),
                    money.format(self.total_invested),
                    money.format(self.total_interest),
                )
            }
        }
    }
}

/// Split of the final value between money put in and interest earned
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Composition {
    pub invested: f64,
    pub interest: f64,
    /// Share of the final value that was invested, 0.0 when the final value is zero
    pub invested_share: f64,
    pub interest_share: f64,
}

impl Composition {
    pub fn new(invested: f64, interest: f64) -> Self {
        let total = invested + interest;
        let (invested_share, interest_share) = if total.abs() < f64::EPSILON {
            (0.0, 0.0)
        } else {
            (invested / total, interest / total)
        };
        Self {
            invested,
            interest,
            invested_share,
            interest_share,
        }
    }
}
