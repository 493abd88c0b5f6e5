//! Locale-aware currency formatting with two decimal places

use serde::{Deserialize, Serialize};

/// Number formatting conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    /// `R$ 1.234,56`
    #[default]
    PtBr,
    /// `$1,234.56`
    EnUs,
}

impl Locale {
    pub fn grouping_separator(&self) -> char {
        match self {
            Locale::PtBr => '.',
            Locale::EnUs => ',',
        }
    }

    pub fn decimal_separator(&self) -> char {
        match self {
            Locale::PtBr => ',',
            Locale::EnUs => '.',
        }
    }

    fn space_after_symbol(&self) -> bool {
        matches!(self, Locale::PtBr)
    }

    /// Format `value` with digit grouping and a fixed number of decimals.
    /// The sign is returned separately so callers can place it before a symbol.
    fn format_unsigned(&self, value: f64, decimals: usize) -> (bool, String) {
        let fixed = format!("{:.*}", decimals, value.abs());
        let (int_part, frac_part) = match fixed.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (fixed.as_str(), None),
        };

        let mut out = group_digits(int_part, self.grouping_separator());
        if let Some(frac) = frac_part {
            out.push(self.decimal_separator());
            out.push_str(frac);
        }

        // -0.001 rounds to zero and is shown unsigned
        let negative = value < 0.0 && fixed.bytes().any(|b| matches!(b, b'1'..=b'9'));
        (negative, out)
    }

    /// Format a plain number, e.g. `1.234,5` for `PtBr` with one decimal
    pub fn format_number(&self, value: f64, decimals: usize) -> String {
        if !value.is_finite() {
            return value.to_string();
        }
        let (negative, body) = self.format_unsigned(value, decimals);
        if negative {
            format!("-{}", body)
        } else {
            body
        }
    }

    /// Format a fraction as a percentage with two decimals (0.125 -> `12,50%`)
    pub fn format_percent(&self, fraction: f64) -> String {
        format!("{}%", self.format_number(fraction * 100.0, 2))
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

/// Currency formatter for a single currency symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoneyFormat {
    symbol: String,
    locale: Locale,
}

impl MoneyFormat {
    pub fn new(symbol: impl Into<String>, locale: Locale) -> Self {
        Self {
            symbol: symbol.into(),
            locale,
        }
    }

    /// Brazilian real, `R$ 1.234,56`
    pub fn brl() -> Self {
        Self::new("R$", Locale::PtBr)
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Format an amount with exactly two decimals
    pub fn format(&self, amount: f64) -> String {
        if !amount.is_finite() {
            return format!("{} {}", self.symbol, amount);
        }
        let (negative, body) = self.locale.format_unsigned(amount, 2);
        let sign = if negative { "-" } else { "" };
        let space = if self.locale.space_after_symbol() { " " } else { "" };
        format!("{}{}{}{}", sign, self.symbol, space, body)
    }
}

impl Default for MoneyFormat {
    fn default() -> Self {
        Self::brl()
    }
}
