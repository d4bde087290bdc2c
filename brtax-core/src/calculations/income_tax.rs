//! Income-tax (IRRF) withholding.
//!
//! The taxable base is the gross salary less the social-security withholding
//! and a fixed allowance per dependent. Bases at or below the first row's
//! limit are exempt. Otherwise the first row covering the base supplies a
//! rate and a deduction, and the withholding is `base * rate - deduction`.
//! Each deduction already encodes the effect of the lower bands.
//!
//! | Base                  | Rate  | Deduction |
//! |-----------------------|-------|-----------|
//! | up to 2259.20         | 0     | 0         |
//! | 2259.21 to 2826.65    | 7.5%  | 169.92    |
//! | 2826.66 to 3751.05    | 15%   | 381.44    |
//! | 3751.06 to 4664.68    | 22.5% | 662.77    |
//! | above 4664.68         | 27.5% | 896.00    |
//!
//! The result is floored at zero: with the deductions above, a base a few
//! cents over the exempt limit would otherwise produce a negative amount.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use brtax_core::TaxTables;
//! use brtax_core::calculations::IncomeTaxCalculator;
//!
//! let tables = TaxTables::brazil_2024();
//! let calculator =
//!     IncomeTaxCalculator::new(&tables.income_tax, tables.per_dependent_allowance).unwrap();
//!
//! // base = 3000 - 258.8196 - 189.59 = 2551.5904
//! let withheld = calculator.compute(dec!(3000.00), dec!(258.8196), 1);
//! assert_eq!(withheld, dec!(2551.5904) * dec!(0.075) - dec!(169.92));
//! ```

use rust_decimal::Decimal;
use tracing::trace;

use crate::calculations::common::max;
use crate::{BracketRow, BracketTable, TableError};

/// Calculator for income-tax withholding on salary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomeTaxCalculator {
    /// Rows with a finite limit, ascending.
    bounded: Vec<BracketRow>,
    /// The open-ended row that applies above every finite limit.
    top: BracketRow,
    /// Bases at or below this are exempt.
    exempt_limit: Option<Decimal>,
    per_dependent_allowance: Decimal,
}

impl IncomeTaxCalculator {
    /// Creates a calculator from a table whose final row is unbounded.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::BoundedTopBracket`] if the final row has a finite
    /// limit, since bases above it would have no row to apply, and
    /// [`TableError::NegativeAmount`] for a negative allowance.
    pub fn new(
        table: &BracketTable,
        per_dependent_allowance: Decimal,
    ) -> Result<Self, TableError> {
        if per_dependent_allowance < Decimal::ZERO {
            return Err(TableError::NegativeAmount {
                name: "per_dependent_allowance".to_string(),
                value: per_dependent_allowance,
            });
        }
        let (bounded, top) = table.split_top()?;
        Ok(Self::from_parts(bounded.to_vec(), top, per_dependent_allowance))
    }

    /// Builds from finite rows already in ascending order and the open top row.
    pub(crate) fn from_parts(
        bounded: Vec<BracketRow>,
        top: BracketRow,
        per_dependent_allowance: Decimal,
    ) -> Self {
        let exempt_limit = bounded.first().and_then(|row| row.upper_limit);
        Self {
            bounded,
            top,
            exempt_limit,
            per_dependent_allowance,
        }
    }

    /// Returns the amount withheld.
    ///
    /// # Arguments
    ///
    /// * `gross_salary` - Monthly gross salary
    /// * `social_security_withheld` - Result of the social-security calculation
    /// * `dependent_count` - Declared dependents
    pub fn compute(
        &self,
        gross_salary: Decimal,
        social_security_withheld: Decimal,
        dependent_count: u32,
    ) -> Decimal {
        let base = self.taxable_base(gross_salary, social_security_withheld, dependent_count);

        if self.exempt_limit.is_some_and(|limit| base <= limit) {
            trace!(%base, "income tax base within exempt band");
            return Decimal::ZERO;
        }

        let row = self.row_for(base);
        let tax = max(base * row.rate - row.deduction, Decimal::ZERO);
        trace!(%base, rate = %row.rate, deduction = %row.deduction, %tax, "income tax");
        tax
    }

    /// Gross salary less social security and the dependent allowance.
    pub fn taxable_base(
        &self,
        gross_salary: Decimal,
        social_security_withheld: Decimal,
        dependent_count: u32,
    ) -> Decimal {
        let dependent_deduction = Decimal::from(dependent_count) * self.per_dependent_allowance;
        gross_salary - social_security_withheld - dependent_deduction
    }

    /// The first finite row covering `base`, else the open-ended top row.
    fn row_for(
        &self,
        base: Decimal,
    ) -> BracketRow {
        self.bounded
            .iter()
            .find(|row| row.covers(base))
            .copied()
            .unwrap_or(self.top)
    }
}
