//! Currency formatting for a single configured locale
//!
//! The default renders amounts the way the he-IL locale formats Israeli new
//! shekels: a right-to-left mark, comma grouping, two decimals and a trailing
//! shekel sign after a no-break space (`‏1,234.50 ₪`).

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;

/// Where the currency symbol sits relative to the number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolPosition {
    Before,
    After,
}

/// Currency display settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub decimals: usize,
    pub decimal_separator: String,
    pub group_separator: String,
    pub symbol_position: SymbolPosition,
    /// Text between number and symbol
    pub symbol_spacing: String,
    /// Bidi mark prefixed to every amount
    pub direction_mark: Option<String>,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::ils()
    }
}

impl CurrencyFormat {
    /// Israeli new shekel, he-IL conventions
    pub fn ils() -> Self {
        Self {
            symbol: "₪".to_string(),
            decimals: 2,
            decimal_separator: ".".to_string(),
            group_separator: ",".to_string(),
            symbol_position: SymbolPosition::After,
            symbol_spacing: "\u{a0}".to_string(),
            direction_mark: Some("\u{200f}".to_string()),
        }
    }

    /// Format an amount. Halves round away from zero on the amount's shortest
    /// decimal form, so `1.005` shows as `1.01`. A non-finite amount formats as
    /// an empty string, like a missing one.
    pub fn format(&self, amount: f64) -> String {
        if !amount.is_finite() {
            return String::new();
        }

        let digits = match round_decimal(amount, self.decimals) {
            Some(rounded) => format!("{:.*}", self.decimals, rounded.abs()),
            // Outside the decimal range, so no digits to round at this precision
            None => format!("{:.*}", self.decimals, amount.abs()),
        };
        let is_zero = digits.chars().all(|c| c == '0' || c == '.');

        let (int_part, frac_part) = match digits.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (digits.as_str(), None),
        };

        let mut number = group_digits(int_part, &self.group_separator);
        if let Some(frac) = frac_part {
            number.push_str(&self.decimal_separator);
            number.push_str(frac);
        }

        let sign = if amount < 0.0 && !is_zero { "-" } else { "" };
        let mark = self.direction_mark.as_deref().unwrap_or("");

        match self.symbol_position {
            SymbolPosition::After => {
                format!("{mark}{sign}{number}{}{}", self.symbol_spacing, self.symbol)
            }
            SymbolPosition::Before => {
                format!("{mark}{sign}{}{}{number}", self.symbol, self.symbol_spacing)
            }
        }
    }

    /// Format an optional amount; a missing amount is an empty string
    pub fn format_opt(&self, amount: Option<f64>) -> String {
        amount.map(|a| self.format(a)).unwrap_or_default()
    }
}

/// Round the shortest decimal text of `amount` to `decimals` places, or `None`
/// when it does not fit a [`Decimal`]
fn round_decimal(amount: f64, decimals: usize) -> Option<Decimal> {
    let exact: Decimal = amount.to_string().parse().ok()?;
    let places = u32::try_from(decimals).ok()?;
    Some(exact.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero))
}

/// Insert `separator` between every group of three integer digits
fn group_digits(digits: &str, separator: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * separator.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const RLM: &str = "\u{200f}";
    const NBSP: &str = "\u{a0}";

    #[test]
    fn test_ils_formatting() {
        let fmt = CurrencyFormat::ils();
        assert_eq!(fmt.format(100.0), format!("{RLM}100.00{NBSP}₪"));
        assert_eq!(fmt.format(1234.5), format!("{RLM}1,234.50{NBSP}₪"));
        assert_eq!(fmt.format(1_234_567.891), format!("{RLM}1,234,567.89{NBSP}₪"));
        assert_eq!(fmt.format(0.0), format!("{RLM}0.00{NBSP}₪"));
    }

    #[test]
    fn test_negative_amounts() {
        let fmt = CurrencyFormat::ils();
        assert_eq!(fmt.format(-20.0), format!("{RLM}-20.00{NBSP}₪"));
        assert_eq!(fmt.format(-0.001), format!("{RLM}0.00{NBSP}₪"));
    }

    #[test]
    fn test_half_rounds_away_from_zero() {
        let fmt = CurrencyFormat::ils();
        assert_eq!(fmt.format(0.125), format!("{RLM}0.13{NBSP}₪"));
        assert_eq!(fmt.format(1.005), format!("{RLM}1.01{NBSP}₪"));
        assert_eq!(fmt.format(0.285), format!("{RLM}0.29{NBSP}₪"));
        assert_eq!(fmt.format(-1.005), format!("{RLM}-1.01{NBSP}₪"));
        assert_eq!(fmt.format(1.004), format!("{RLM}1.00{NBSP}₪"));
    }

    #[test]
    fn test_huge_and_non_finite_amounts() {
        let fmt = CurrencyFormat::ils();
        let huge = fmt.format(-1e307);
        assert!(huge.starts_with(&format!("{RLM}-")));
        assert!(huge.ends_with(&format!(".00{NBSP}₪")));
        assert!(huge.len() > 300);
        assert!(!huge.contains("inf"));
        assert_eq!(fmt.format(f64::INFINITY), "");
        assert_eq!(fmt.format(f64::NAN), "");
    }

    #[test]
    fn test_missing_amount_is_empty() {
        assert_eq!(CurrencyFormat::ils().format_opt(None), "");
    }

    #[test]
    fn test_symbol_before_without_mark() {
        let fmt = CurrencyFormat {
            symbol: "$".to_string(),
            decimals: 0,
            decimal_separator: ".".to_string(),
            group_separator: " ".to_string(),
            symbol_position: SymbolPosition::Before,
            symbol_spacing: String::new(),
            direction_mark: None,
        };
        assert_eq!(fmt.format(1234567.4), "$1 234 567");
        assert_eq!(fmt.format(-999.6), "-$1 000");
    }

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits("1", ","), "1");
        assert_eq!(group_digits("123", ","), "123");
        assert_eq!(group_digits("1234", ","), "1,234");
        assert_eq!(group_digits("123456", ","), "123,456");
    }
}
