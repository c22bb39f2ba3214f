// Copyright 2025 the Rondo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value formatting for slice labels.
//!
//! This is intentionally a small fixed menu rather than a full format-spec language:
//! the formatted string is computed once per record by the normalizer and carried on
//! the slice, so downstream layers never re-derive it.

extern crate alloc;

use alloc::string::String;

/// How a record's numeric value is rendered into its `formatted_value`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueFormat {
    /// The shortest exact decimal rendition, e.g. `12.5`.
    #[default]
    Raw,
    /// Fixed number of fractional digits, e.g. `Fixed(2)` renders `12.50`.
    Fixed(u8),
    /// The value is a fraction of one, rendered as a percentage with the given
    /// number of fractional digits, e.g. `Percent(1)` renders `0.125` as `12.5%`.
    Percent(u8),
    /// Integer digits grouped in thousands, e.g. `1,234,567.5`.
    Grouped,
}

impl ValueFormat {
    /// Renders `value` according to this format.
    ///
    /// Non-finite values fall back to the raw numeric string rather than failing.
    pub fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return alloc::format!("{value}");
        }
        match self {
            Self::Raw => alloc::format!("{value}"),
            Self::Fixed(digits) => {
                alloc::format!("{value:.prec$}", prec = usize::from(*digits))
            }
            Self::Percent(digits) => {
                let scaled = value * 100.0;
                alloc::format!("{scaled:.prec$}%", prec = usize::from(*digits))
            }
            Self::Grouped => grouped(value),
        }
    }
}

fn grouped(value: f64) -> String {
    let raw = alloc::format!("{value}");
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };

    let mut out = String::with_capacity(raw.len() + int_part.len() / 3);
    out.push_str(sign);
    let len = int_part.len();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn raw_is_shortest_decimal() {
        assert_eq!(ValueFormat::Raw.format(12.5), "12.5");
        assert_eq!(ValueFormat::Raw.format(3.0), "3");
    }

    #[test]
    fn fixed_pads_fractional_digits() {
        assert_eq!(ValueFormat::Fixed(2).format(12.5), "12.50");
        assert_eq!(ValueFormat::Fixed(0).format(12.5), "12");
    }

    #[test]
    fn percent_scales_fractions() {
        assert_eq!(ValueFormat::Percent(1).format(0.125), "12.5%");
        assert_eq!(ValueFormat::Percent(0).format(1.0), "100%");
    }

    #[test]
    fn grouped_inserts_thousands_separators() {
        assert_eq!(ValueFormat::Grouped.format(1_234_567.5), "1,234,567.5");
        assert_eq!(ValueFormat::Grouped.format(-1000.0), "-1,000");
        assert_eq!(ValueFormat::Grouped.format(999.0), "999");
    }

    #[test]
    fn non_finite_falls_back_to_raw() {
        assert_eq!(ValueFormat::Fixed(2).format(f64::NAN), "NaN");
        assert_eq!(ValueFormat::Grouped.format(f64::INFINITY), "inf");
    }
}
