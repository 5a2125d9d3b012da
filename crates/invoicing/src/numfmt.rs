//! Display formatting and lenient parsing of numbers.
//!
//! Formatting is only ever applied at presentation boundaries; every sum in
//! this crate is taken over raw `f64` values.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use tallysheet_core::DomainError;

/// How the integer part of a formatted number is grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grouping {
    /// `12,87,509.50`: last three digits, then pairs (en-IN).
    #[default]
    Indian,
    /// `1,287,509.50`: groups of three.
    Western,
}

impl Grouping {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grouping::Indian => "indian",
            Grouping::Western => "western",
        }
    }
}

impl FromStr for Grouping {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "indian" | "en-in" => Ok(Grouping::Indian),
            "western" | "en-us" => Ok(Grouping::Western),
            other => Err(DomainError::validation(format!("unknown grouping: {other}"))),
        }
    }
}

/// The single fixed display convention for numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NumberFormat {
    grouping: Grouping,
}

impl NumberFormat {
    pub const fn new(grouping: Grouping) -> Self {
        Self { grouping }
    }

    pub fn grouping(&self) -> Grouping {
        self.grouping
    }

    /// Format `value` with exactly `decimal_places` fractional digits.
    ///
    /// NaN renders as zero. If the fixed-point rendering is not a plain
    /// digit string (infinities), it is returned ungrouped.
    pub fn format(&self, value: f64, decimal_places: usize) -> String {
        let value = if value.is_nan() || value == 0.0 { 0.0 } else { value };
        let plain = format!("{value:.decimal_places$}");
        self.group(&plain).unwrap_or(plain)
    }

    /// Like [`NumberFormat::format`], with an absent value rendering as zero.
    pub fn format_opt(&self, value: Option<f64>, decimal_places: usize) -> String {
        self.format(value.unwrap_or(0.0), decimal_places)
    }

    fn group(&self, plain: &str) -> Option<String> {
        let (sign, unsigned) = match plain.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", plain),
        };
        let (int_part, frac_part) = match unsigned.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (unsigned, None),
        };
        if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let grouped = match self.grouping {
            Grouping::Western => group_from_right(int_part, 3),
            Grouping::Indian if int_part.len() <= 3 => int_part.to_string(),
            Grouping::Indian => {
                let (head, tail) = int_part.split_at(int_part.len() - 3);
                format!("{},{tail}", group_from_right(head, 2))
            }
        };

        let mut out = String::with_capacity(plain.len() + grouped.len() / 2);
        out.push_str(sign);
        out.push_str(&grouped);
        if let Some(frac_part) = frac_part {
            out.push('.');
            out.push_str(frac_part);
        }
        Some(out)
    }
}

fn group_from_right(digits: &str, size: usize) -> String {
    let lead = match digits.len() % size {
        0 => size,
        n => n,
    };
    let mut out = String::with_capacity(digits.len() + digits.len() / size);
    let (first, mut rest) = digits.split_at(lead);
    out.push_str(first);
    while !rest.is_empty() {
        let (chunk, tail) = rest.split_at(size);
        out.push(',');
        out.push_str(chunk);
        rest = tail;
    }
    out
}

/// Format with the default convention. See [`NumberFormat::format`].
pub fn format(value: f64, decimal_places: usize) -> String {
    NumberFormat::default().format(value, decimal_places)
}

/// Format an optional value with the default convention; `None` renders as zero.
pub fn format_opt(value: Option<f64>, decimal_places: usize) -> String {
    NumberFormat::default().format_opt(value, decimal_places)
}

/// Parse user-entered text, ignoring grouping separators.
///
/// Empty, non-numeric and non-finite input all yield `0.0`.
pub fn parse(text: &str) -> f64 {
    let clean = text.replace(',', "");
    let clean = clean.trim();
    if clean.is_empty() {
        return 0.0;
    }
    match clean.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

/// [`parse`] for input that may be absent altogether.
pub fn parse_opt(text: Option<&str>) -> f64 {
    text.map_or(0.0, parse)
}

/// Short label for a percentage: `5`, `18.5`. NaN shows as `0`.
pub fn percent_label(percent: f64) -> String {
    if percent.is_nan() || percent == 0.0 {
        "0".to_string()
    } else {
        percent.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn formats_with_indian_grouping_by_default() {
        assert_eq!(format(1_287_509.5, 2), "12,87,509.50");
        assert_eq!(format(100_000.0, 0), "1,00,000");
        assert_eq!(format(999.0, 2), "999.00");
        assert_eq!(format(1_000.0, 2), "1,000.00");
    }

    #[test]
    fn formats_with_western_grouping() {
        let fmt = NumberFormat::new(Grouping::Western);
        assert_eq!(fmt.format(1_287_509.5, 2), "1,287,509.50");
        assert_eq!(fmt.format(123_456.0, 0), "123,456");
        assert_eq!(fmt.format(12.0, 1), "12.0");
    }

    #[test]
    fn negative_values_keep_sign_outside_grouping() {
        assert_eq!(format(-23_030.5, 2), "-23,030.50");
        assert_eq!(
            NumberFormat::new(Grouping::Western).format(-1_234_567.0, 0),
            "-1,234,567"
        );
    }

    #[test]
    fn nan_and_absent_render_as_zero() {
        assert_eq!(format(f64::NAN, 2), "0.00");
        assert_eq!(format_opt(None, 2), "0.00");
        assert_eq!(format_opt(None, 0), "0");
        assert_eq!(format(-0.0, 2), "0.00");
    }

    #[test]
    fn infinity_falls_back_to_plain_rendering() {
        assert_eq!(format(f64::INFINITY, 2), "inf");
        assert_eq!(format(f64::NEG_INFINITY, 2), "-inf");
    }

    #[test]
    fn parse_strips_grouping_and_coerces_garbage_to_zero() {
        assert_eq!(parse("12,87,509.50"), 1_287_509.5);
        assert_eq!(parse(" 42 "), 42.0);
        assert_eq!(parse(""), 0.0);
        assert_eq!(parse("   "), 0.0);
        assert_eq!(parse("abc"), 0.0);
        assert_eq!(parse("NaN"), 0.0);
        assert_eq!(parse("inf"), 0.0);
        assert_eq!(parse_opt(None), 0.0);
        assert_eq!(parse("-3.5"), -3.5);
    }

    #[test]
    fn grouping_names_parse() {
        assert_eq!("Indian".parse::<Grouping>().unwrap(), Grouping::Indian);
        assert_eq!("western".parse::<Grouping>().unwrap(), Grouping::Western);
        assert!("roman".parse::<Grouping>().is_err());
        for grouping in [Grouping::Indian, Grouping::Western] {
            assert_eq!(grouping.as_str().parse::<Grouping>().unwrap(), grouping);
        }
    }

    #[test]
    fn percent_label_drops_trailing_zeros() {
        assert_eq!(percent_label(5.0), "5");
        assert_eq!(percent_label(18.5), "18.5");
        assert_eq!(percent_label(f64::NAN), "0");
    }

    proptest! {
        /// Property: values already at two decimals survive format → parse.
        #[test]
        fn parse_recovers_two_decimal_values(cents in 0u64..10_000_000_000u64) {
            let x = cents as f64 / 100.0;
            prop_assert_eq!(parse(&format(x, 2)), x);
            let western = NumberFormat::new(Grouping::Western);
            prop_assert_eq!(parse(&western.format(x, 2)), x);
        }

        /// Property: the formatted string always has the requested precision.
        #[test]
        fn fractional_digits_match_precision(value in -1.0e12f64..1.0e12f64, dp in 0usize..5) {
            let text = format(value, dp);
            match text.split_once('.') {
                Some((_, frac)) => prop_assert_eq!(frac.len(), dp),
                None => prop_assert_eq!(dp, 0),
            }
        }
    }
}
