use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::input::{InvalidInput, parse_amount, parse_count};

/// Input for a salaried (CLT) calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalariedInput {
    /// Monthly gross salary, must be positive.
    pub gross_salary: Decimal,
    /// Number of dependents declared for income-tax purposes.
    pub dependent_count: u32,
}

impl SalariedInput {
    /// Builds an input, rejecting a non-positive salary.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput::NonPositiveGrossSalary`] if `gross_salary <= 0`.
    pub fn new(
        gross_salary: Decimal,
        dependent_count: u32,
    ) -> Result<Self, InvalidInput> {
        if gross_salary <= Decimal::ZERO {
            return Err(InvalidInput::NonPositiveGrossSalary(gross_salary));
        }
        Ok(Self {
            gross_salary,
            dependent_count,
        })
    }

    /// Parses raw form text.
    ///
    /// An empty dependent field means no dependents; an empty salary is
    /// treated as zero and therefore rejected.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput`] when either field is not a number, the salary
    /// is not positive or the dependent count is negative.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use brtax_core::{InvalidInput, SalariedInput};
    ///
    /// let input = SalariedInput::parse("3,000.00", "").unwrap();
    /// assert_eq!(input.gross_salary, dec!(3000.00));
    /// assert_eq!(input.dependent_count, 0);
    ///
    /// assert_eq!(
    ///     SalariedInput::parse("3000", "-1"),
    ///     Err(InvalidInput::NegativeDependentCount(-1))
    /// );
    /// ```
    pub fn parse(
        gross_salary: &str,
        dependent_count: &str,
    ) -> Result<Self, InvalidInput> {
        let gross_salary = parse_amount("gross salary", gross_salary)?;
        let dependent_count = parse_count("dependent count", dependent_count)?;
        Self::new(gross_salary, dependent_count)
    }
}

/// Outcome of a salaried calculation.
///
/// `net_salary` is always exactly
/// `gross_salary - social_security_withheld - income_tax_withheld`;
/// `employer_deposit` is informational and not deducted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalariedResult {
    pub gross_salary: Decimal,
    pub employer_deposit: Decimal,
    pub social_security_withheld: Decimal,
    pub income_tax_withheld: Decimal,
    pub net_salary: Decimal,
}
