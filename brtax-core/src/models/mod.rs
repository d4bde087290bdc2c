mod bracket;
mod input;
mod invoicing;
mod salaried;
mod tax_tables;

pub use bracket::{BracketRow, BracketTable, TableError};
pub use input::InvalidInput;
pub use invoicing::{InvoicingInput, InvoicingResult, PresumedProfitBreakdown, Regime};
pub use salaried::{SalariedInput, SalariedResult};
pub use tax_tables::{CorporateRates, INCOME_TAX_TABLE, SOCIAL_SECURITY_TABLE, TaxTables};
pub(crate) use tax_tables::income_tax_2024_parts;
