//! pt-BR number formatting for reports.

use brtax_core::calculations::common::round_half_up;
use rust_decimal::Decimal;

/// Formats an amount as Brazilian reais: `R$ 1.234,56`.
///
/// Rounds half-up to centavos first. Negative amounts get a leading `-`.
///
/// ```
/// use rust_decimal_macros::dec;
/// use brtax_cli::currency::format_brl;
///
/// assert_eq!(format_brl(dec!(2719.73112)), "R$ 2.719,73");
/// assert_eq!(format_brl(dec!(-0.5)), "-R$ 0,50");
/// ```
pub fn format_brl(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    format!("{sign}R$ {},{frac_part}", group_thousands(int_part))
}

/// Formats a rate as a percentage with a decimal comma: `0.0065` → `0,65%`.
pub fn format_rate(rate: Decimal) -> String {
    let percent = (rate * Decimal::ONE_HUNDRED).normalize();
    format!("{}%", percent.to_string().replace('.', ","))
}

fn group_thousands(int_part: &str) -> String {
    let len = int_part.len();
    let mut out = String::with_capacity(len + len / 3);

    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // format_brl tests
    // =========================================================================

    #[test]
    fn small_amounts_have_no_separator() {
        assert_eq!(format_brl(dec!(0)), "R$ 0,00");
        assert_eq!(format_brl(dec!(7.5)), "R$ 7,50");
        assert_eq!(format_brl(dec!(999.99)), "R$ 999,99");
    }

    #[test]
    fn thousands_are_grouped_with_dots() {
        assert_eq!(format_brl(dec!(1000)), "R$ 1.000,00");
        assert_eq!(format_brl(dec!(1234.56)), "R$ 1.234,56");
        assert_eq!(format_brl(dec!(1234567.8)), "R$ 1.234.567,80");
        assert_eq!(format_brl(dec!(100000)), "R$ 100.000,00");
    }

    #[test]
    fn rounds_half_up_to_centavos() {
        assert_eq!(format_brl(dec!(258.8196)), "R$ 258,82");
        assert_eq!(format_brl(dec!(21.44928)), "R$ 21,45");
        assert_eq!(format_brl(dec!(0.005)), "R$ 0,01");
        assert_eq!(format_brl(dec!(999.995)), "R$ 1.000,00");
    }

    #[test]
    fn negatives_get_leading_minus() {
        assert_eq!(format_brl(dec!(-1234.56)), "-R$ 1.234,56");
    }

    #[test]
    fn negative_rounding_to_zero_has_no_sign() {
        assert_eq!(format_brl(dec!(-0.001)), "R$ 0,00");
    }

    // =========================================================================
    // format_rate tests
    // =========================================================================

    #[test]
    fn rates_as_percentages() {
        assert_eq!(format_rate(dec!(0.06)), "6%");
        assert_eq!(format_rate(dec!(0.0065)), "0,65%");
        assert_eq!(format_rate(dec!(0.32)), "32%");
        assert_eq!(format_rate(dec!(0.075)), "7,5%");
    }
}
