//! Calculators for salaried (CLT) withholdings and invoicing (PJ) taxes.
//!
//! Each calculator is built from the part of [`TaxTables`](crate::TaxTables)
//! it needs and is a pure function of its inputs afterwards.

pub mod common;
pub mod corporate_regime;
pub mod employer_deposit;
pub mod income_tax;
pub mod net_salary;
pub mod social_security;

pub use corporate_regime::CorporateRegimeCalculator;
pub use employer_deposit::EmployerDepositCalculator;
pub use income_tax::IncomeTaxCalculator;
pub use net_salary::NetSalaryCalculator;
pub use social_security::SocialSecurityCalculator;
