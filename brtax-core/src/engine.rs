//! Engine-level entry points consumed by presentation layers.
//!
//! [`TaxEngine`] owns one instance of each calculator, built from a validated
//! [`TaxTables`]. Every method validates its input first and returns
//! [`InvalidInput`] without computing anything when it fails.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use brtax_core::{Regime, TaxEngine};
//!
//! let engine = TaxEngine::default();
//!
//! let clt = engine.compute_salaried_breakdown(dec!(3000.00), 1).unwrap();
//! assert_eq!(clt.social_security_withheld, dec!(258.8196));
//! assert_eq!(
//!     clt.net_salary,
//!     clt.gross_salary - clt.social_security_withheld - clt.income_tax_withheld
//! );
//!
//! let pj = engine
//!     .compute_invoicing_breakdown(dec!(10000.00), Regime::SimplifiedTax)
//!     .unwrap();
//! assert_eq!(pj.total_tax, dec!(600.00));
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::{
    CorporateRegimeCalculator, EmployerDepositCalculator, IncomeTaxCalculator,
    NetSalaryCalculator, SocialSecurityCalculator,
};
use crate::models::income_tax_2024_parts;
use crate::{
    InvalidInput, InvoicingInput, InvoicingResult, Regime, SalariedInput, SalariedResult,
    TableError, TaxTables,
};

/// The complete calculation engine for one set of tables.
#[derive(Debug, Clone)]
pub struct TaxEngine {
    year: i32,
    social_security: SocialSecurityCalculator,
    income_tax: IncomeTaxCalculator,
    employer_deposit: EmployerDepositCalculator,
    net_salary: NetSalaryCalculator,
    corporate: CorporateRegimeCalculator,
}

impl TaxEngine {
    /// Validates `tables` and builds the calculators.
    ///
    /// # Errors
    ///
    /// Returns [`TableError`] if any rate is out of range, the allowance is
    /// negative or the income-tax table lacks an unbounded top row.
    pub fn new(tables: TaxTables) -> Result<Self, TableError> {
        tables.validate()?;
        let income_tax =
            IncomeTaxCalculator::new(&tables.income_tax, tables.per_dependent_allowance)?;
        debug!(year = tables.year, "tax engine ready");

        Ok(Self::assemble(tables, income_tax))
    }

    fn assemble(
        tables: TaxTables,
        income_tax: IncomeTaxCalculator,
    ) -> Self {
        Self {
            year: tables.year,
            social_security: SocialSecurityCalculator::new(tables.social_security),
            income_tax,
            employer_deposit: EmployerDepositCalculator::new(tables.employer_deposit_rate),
            net_salary: NetSalaryCalculator,
            corporate: CorporateRegimeCalculator::new(tables.corporate),
        }
    }

    /// Year of the tables in use.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The invoicing calculator, for callers that want its rates for display.
    pub fn corporate(&self) -> &CorporateRegimeCalculator {
        &self.corporate
    }

    /// Computes the salaried (CLT) breakdown.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput::NonPositiveGrossSalary`] if `gross_salary <= 0`.
    pub fn compute_salaried_breakdown(
        &self,
        gross_salary: Decimal,
        dependent_count: u32,
    ) -> Result<SalariedResult, InvalidInput> {
        let input = SalariedInput::new(gross_salary, dependent_count)?;
        Ok(self.salaried(&input))
    }

    /// Computes the invoicing (PJ) breakdown.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput::NonPositiveGrossRevenue`] if `gross_revenue <= 0`.
    pub fn compute_invoicing_breakdown(
        &self,
        gross_revenue: Decimal,
        regime: Regime,
    ) -> Result<InvoicingResult, InvalidInput> {
        let input = InvoicingInput::new(gross_revenue, regime)?;
        Ok(self.invoicing(&input))
    }

    /// Parses raw form text and computes the salaried breakdown.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput`] for non-numeric text, a non-positive salary
    /// or a negative dependent count.
    pub fn salaried_from_text(
        &self,
        gross_salary: &str,
        dependent_count: &str,
    ) -> Result<SalariedResult, InvalidInput> {
        let input = SalariedInput::parse(gross_salary, dependent_count)?;
        Ok(self.salaried(&input))
    }

    /// Parses raw form text and computes the invoicing breakdown.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput`] for non-numeric or non-positive revenue, or an
    /// unknown regime name.
    pub fn invoicing_from_text(
        &self,
        gross_revenue: &str,
        regime: &str,
    ) -> Result<InvoicingResult, InvalidInput> {
        let input = InvoicingInput::parse(gross_revenue, regime)?;
        Ok(self.invoicing(&input))
    }

    /// Runs the salaried calculators over already validated input.
    pub fn salaried(
        &self,
        input: &SalariedInput,
    ) -> SalariedResult {
        let gross_salary = input.gross_salary;
        let employer_deposit = self.employer_deposit.compute(gross_salary);
        let social_security_withheld = self.social_security.compute(gross_salary);
        let income_tax_withheld =
            self.income_tax
                .compute(gross_salary, social_security_withheld, input.dependent_count);
        let net_salary =
            self.net_salary
                .compute(gross_salary, social_security_withheld, income_tax_withheld);

        debug!(
            %gross_salary,
            dependents = input.dependent_count,
            %social_security_withheld,
            %income_tax_withheld,
            %net_salary,
            "salaried breakdown"
        );

        SalariedResult {
            gross_salary,
            employer_deposit,
            social_security_withheld,
            income_tax_withheld,
            net_salary,
        }
    }

    /// Runs the corporate calculator over already validated input.
    pub fn invoicing(
        &self,
        input: &InvoicingInput,
    ) -> InvoicingResult {
        let result = self.corporate.compute(input.gross_revenue, input.regime);
        debug!(
            gross_revenue = %result.gross_revenue,
            regime = %result.regime,
            total_tax = %result.total_tax,
            "invoicing breakdown"
        );
        result
    }
}

impl Default for TaxEngine {
    /// An engine over the 2024 tables.
    fn default() -> Self {
        let tables = TaxTables::brazil_2024();
        let (bounded, top) = income_tax_2024_parts();
        let income_tax =
            IncomeTaxCalculator::from_parts(bounded, top, tables.per_dependent_allowance);
        Self::assemble(tables, income_tax)
    }
}
