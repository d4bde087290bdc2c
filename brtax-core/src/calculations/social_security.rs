//! Social-security (INSS) withholding.
//!
//! The withholding is accumulated band by band: each row taxes only the slice
//! of salary between the previous row's limit and its own, at its own rate.
//!
//! | Band                  | Rate  |
//! |-----------------------|-------|
//! | up to 1412.00         | 7.5%  |
//! | 1412.01 to 2666.68    | 9%    |
//! | 2666.69 to 4000.03    | 12%   |
//! | 4000.04 to 7786.02    | 14%   |
//!
//! Salary above the last row's limit is not taxed further, so the 2024 table
//! caps the withholding at 908.8618.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use brtax_core::TaxTables;
//! use brtax_core::calculations::SocialSecurityCalculator;
//!
//! let tables = TaxTables::brazil_2024();
//! let calculator = SocialSecurityCalculator::new(tables.social_security);
//!
//! // 1412 * 0.075 + (2666.68 - 1412) * 0.09 + (3000 - 2666.68) * 0.12
//! assert_eq!(calculator.compute(dec!(3000.00)), dec!(258.8196));
//! ```

use rust_decimal::Decimal;
use tracing::trace;

use crate::BracketTable;

/// Calculator for progressive social-security withholding.
#[derive(Debug, Clone)]
pub struct SocialSecurityCalculator {
    table: BracketTable,
}

impl SocialSecurityCalculator {
    pub fn new(table: BracketTable) -> Self {
        Self { table }
    }

    /// Returns the amount withheld from `gross_salary`.
    pub fn compute(
        &self,
        gross_salary: Decimal,
    ) -> Decimal {
        let mut previous_limit = Decimal::ZERO;
        let mut total = Decimal::ZERO;

        for row in self.table.rows() {
            let ceiling = row
                .upper_limit
                .map_or(gross_salary, |limit| gross_salary.min(limit));
            let slice = ceiling - previous_limit;
            if slice <= Decimal::ZERO {
                break;
            }
            total += slice * row.rate;
            trace!(%slice, rate = %row.rate, %total, "social security band");
            previous_limit = ceiling;
        }

        total
    }
}
