//! Monetary amounts attached to escrow records
//!
//! Amounts are exact decimals paired with an open-ended currency symbol.
//! The dashboard keys its amount facet on the textual form of the value,
//! so this module also owns the number-to-string conversion used for that
//! key (see [`js_number_string`]).

use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// Value/currency pair carried by transactions and disputes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Amount {
    /// Exact decimal value (e.g. `1.5`, `500`)
    pub value: Decimal,

    /// Currency symbol (e.g. `ETH`, `USDC`, `BTC`); not a closed set
    pub currency: String,
}

impl Amount {
    /// Create a new amount
    pub fn new(value: Decimal, currency: impl Into<String>) -> Self {
        Amount {
            value,
            currency: currency.into(),
        }
    }

    /// The value as the amount filter sees it
    ///
    /// `1.50` becomes `"1.5"`, `100` becomes `"100"`, `2.0` becomes `"2"`.
    pub fn filter_key(&self) -> String {
        js_number_string(&self.value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.filter_key(), self.currency)
    }
}

/// Parse a decimal amount, accepting plain (`1.50`) and scientific (`1.5e-7`) notation
pub fn parse_decimal(input: &str) -> Option<Decimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Render a decimal the way a JavaScript runtime stringifies a number
///
/// The value is first rounded to the nearest `f64`, as JavaScript numbers
/// are doubles, then printed with the shortest digits that round-trip.
/// Trailing fractional zeros are dropped, and magnitudes outside
/// `[1e-6, 1e21)` switch to exponent notation (`1e+21`, `1.5e-7`).
pub fn js_number_string(value: &Decimal) -> String {
    // Decimal's plain form always parses; the parse is correctly rounded.
    let Ok(number) = value.to_string().parse::<f64>() else {
        return value.normalize().to_string();
    };
    if number == 0.0 {
        return "0".to_string();
    }

    // `{:e}` yields the shortest round-trip digits, e.g. `1.2345678901234568e-1`
    let scientific = format!("{:e}", number.abs());
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let exponent: i32 = exponent.parse().unwrap_or_default();

    // Position of the decimal point relative to the first digit
    let point = exponent + 1;
    let len = digits.len() as i32;

    let mut out = String::with_capacity(digits.len() + 8);
    if number.is_sign_negative() {
        out.push('-');
    }

    if len <= point && point <= 21 {
        out.push_str(&digits);
        out.extend(std::iter::repeat('0').take((point - len) as usize));
    } else if 0 < point && point <= 21 {
        let (int_part, frac_part) = digits.split_at(point as usize);
        out.push_str(int_part);
        out.push('.');
        out.push_str(frac_part);
    } else if -6 < point && point <= 0 {
        out.push_str("0.");
        out.extend(std::iter::repeat('0').take((-point) as usize));
        out.push_str(&digits);
    } else {
        let (head, tail) = digits.split_at(1);
        out.push_str(head);
        if !tail.is_empty() {
            out.push('.');
            out.push_str(tail);
        }
        out.push('e');
        out.push(if point - 1 >= 0 { '+' } else { '-' });
        out.push_str(&(point - 1).abs().to_string());
    }
    out
}
