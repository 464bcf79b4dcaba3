use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use std::str::FromStr;

use crate::utils::error::{AppError, Result};

/// Parses shop price strings such as `"1.299,99 €"` into decimals.
///
/// The number convention is held by the tracker itself, so parsing never
/// depends on or changes process-wide locale state.
#[derive(Debug, Clone)]
pub struct PriceTracker {
    number_regex: Regex,
    decimal_separator: char,
    group_separator: char,
}

impl Default for PriceTracker {
    fn default() -> Self {
        Self::new(',')
    }
}

impl PriceTracker {
    /// `decimal_separator` is `,` for `19,99` style prices, anything else
    /// selects the `19.99` style.
    pub fn new(decimal_separator: char) -> Self {
        let (decimal_separator, group_separator) = if decimal_separator == ',' {
            (',', '.')
        } else {
            ('.', ',')
        };

        let group = regex::escape(&group_separator.to_string());
        let decimal = regex::escape(&decimal_separator.to_string());
        let pattern = format!(r"^(?:\d{{1,3}}(?:{group}\d{{3}})+|\d+)(?:{decimal}\d+)?$");

        PriceTracker {
            number_regex: Regex::new(&pattern).expect("price pattern is valid"),
            decimal_separator,
            group_separator,
        }
    }

    /// Returns `None` for anything that is not a single well-formed amount.
    pub fn parse(&self, text: &str) -> Option<Decimal> {
        // Currency notation and whitespace (NBSP included) on either side.
        let number = text.trim_matches(|c: char| !c.is_ascii_digit());
        if number.is_empty() || !self.number_regex.is_match(number) {
            return None;
        }

        let normalized: String = number
            .chars()
            .filter(|c| *c != self.group_separator)
            .map(|c| if c == self.decimal_separator { '.' } else { c })
            .collect();

        Decimal::from_str(&normalized).ok()
    }
}

/// Open interval `(lower, upper)` that gates notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceWindow {
    pub lower: Decimal,
    pub upper: Decimal,
}

impl PriceWindow {
    pub fn new(lower: Decimal, upper: Decimal) -> Self {
        PriceWindow { lower, upper }
    }

    pub fn from_bounds(lower: f64, upper: f64) -> Result<Self> {
        let convert = |name: &str, value: f64| {
            Decimal::from_f64(value).ok_or_else(|| {
                AppError::InvalidConfig(format!("Price bound {} is not representable: {}", name, value))
            })
        };
        Ok(PriceWindow::new(convert("lower", lower)?, convert("upper", upper)?))
    }

    /// Boundary values do not count as inside.
    pub fn contains(&self, amount: Decimal) -> bool {
        self.lower < amount && amount < self.upper
    }

    pub fn should_notify(&self, amount: Option<Decimal>) -> bool {
        amount.is_some_and(|amount| self.contains(amount))
    }
}
