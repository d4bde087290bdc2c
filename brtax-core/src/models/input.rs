//! Validation of raw user input.
//!
//! Every engine entry point validates before any bracket logic runs, so an
//! [`InvalidInput`] never carries partial results.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::warn;

/// The only error a calculation can report.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidInput {
    /// Gross salary was zero or negative.
    #[error("gross salary must be positive, got {0}")]
    NonPositiveGrossSalary(Decimal),

    /// Gross revenue was zero or negative.
    #[error("gross revenue must be positive, got {0}")]
    NonPositiveGrossRevenue(Decimal),

    /// Dependent count was below zero.
    #[error("dependent count must not be negative, got {0}")]
    NegativeDependentCount(i64),

    /// A field could not be read as a number.
    #[error("{field} is not a valid number: '{input}'")]
    NotANumber { field: &'static str, input: String },

    /// The regime name is not one of the supported regimes.
    #[error("unknown invoicing regime '{0}' (expected 'simplified' or 'presumed')")]
    UnknownRegime(String),
}

/// Rewrites user text into the plain `1234.56` form `Decimal` parses.
///
/// Both pt-BR (`1.234,56`) and `1,234.56` are accepted:
/// - with both `.` and `,`, whichever comes last is the decimal mark;
/// - a single `,` is a decimal comma (`3000,50`);
/// - a single `.` is a decimal point unless exactly three digits follow it,
///   in which case it groups thousands (`10.000`);
/// - a repeated separator groups thousands (`1.234.567`).
///
/// Grouped digits must come in threes after a leading group of one to
/// three, otherwise the text is rejected with `None`.
fn normalize(s: &str) -> Option<String> {
    let s = s.trim();
    let dots = s.matches('.').count();
    let commas = s.matches(',').count();

    let (int_part, frac_part, group) = match (s.rfind('.'), s.rfind(',')) {
        (Some(dot), Some(comma)) if comma > dot => {
            (&s[..comma], Some(&s[comma + 1..]), Some('.'))
        }
        (Some(dot), Some(_)) => (&s[..dot], Some(&s[dot + 1..]), Some(',')),
        (None, Some(comma)) if commas == 1 => (&s[..comma], Some(&s[comma + 1..]), None),
        (Some(dot), None) if dots == 1 && s.len() - dot - 1 != 3 => {
            (&s[..dot], Some(&s[dot + 1..]), None)
        }
        (None, Some(_)) => (s, None, Some(',')),
        (Some(_), None) => (s, None, Some('.')),
        (None, None) => (s, None, None),
    };

    let mut out = match group {
        Some(separator) => join_groups(int_part, separator)?,
        None => int_part.to_string(),
    };
    if let Some(frac) = frac_part {
        if frac.is_empty() || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        out.push('.');
        out.push_str(frac);
    }
    Some(out)
}

fn join_groups(
    int_part: &str,
    separator: char,
) -> Option<String> {
    let all_digits = |g: &str| g.bytes().all(|b| b.is_ascii_digit());
    let mut groups = int_part.split(separator);
    let first = groups.next()?;
    let lead = first.strip_prefix('-').unwrap_or(first);
    if lead.is_empty() || lead.len() > 3 || !all_digits(lead) {
        return None;
    }

    let mut out = first.to_string();
    for group in groups {
        if group.len() != 3 || !all_digits(group) {
            return None;
        }
        out.push_str(group);
    }
    Some(out)
}

fn not_a_number(
    field: &'static str,
    s: &str,
) -> InvalidInput {
    InvalidInput::NotANumber {
        field,
        input: s.to_string(),
    }
}

/// Parses a monetary amount. Empty input is zero.
pub(crate) fn parse_amount(
    field: &'static str,
    s: &str,
) -> Result<Decimal, InvalidInput> {
    let Some(normalized) = normalize(s) else {
        warn!(field, input = %s, "misplaced separators");
        return Err(not_a_number(field, s));
    };
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        warn!(field, input = %s, "invalid decimal: {}", e);
        not_a_number(field, s)
    })
}

/// Parses a non-negative count. Empty input is zero.
pub(crate) fn parse_count(
    field: &'static str,
    s: &str,
) -> Result<u32, InvalidInput> {
    let Some(normalized) = normalize(s) else {
        warn!(field, input = %s, "misplaced separators");
        return Err(not_a_number(field, s));
    };
    if normalized.is_empty() {
        return Ok(0);
    }
    let count: i64 = normalized.parse().map_err(|e| {
        warn!(field, input = %s, "invalid count: {}", e);
        not_a_number(field, s)
    })?;
    if count < 0 {
        return Err(InvalidInput::NegativeDependentCount(count));
    }
    u32::try_from(count).map_err(|_| not_a_number(field, s))
}
