use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::bracket::{BracketRow, BracketTable, TableError};

/// Table name used for the social-security (INSS) brackets.
pub const SOCIAL_SECURITY_TABLE: &str = "inss";

/// Table name used for the income-tax (IRRF) brackets.
pub const INCOME_TAX_TABLE: &str = "irrf";

/// Flat rates for the two invoicing regimes.
///
/// Every rate is a fraction of its base: the three revenue levies and the
/// simplified rate apply to gross revenue, `presumption_rate` turns revenue
/// into the presumed-profit base, and the two profit levies apply to that base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorporateRates {
    /// Simples Nacional (DAS) flat rate.
    pub simplified_rate: Decimal,
    pub pis_rate: Decimal,
    pub cofins_rate: Decimal,
    pub iss_rate: Decimal,
    /// Share of revenue presumed to be profit (32% for services).
    pub presumption_rate: Decimal,
    pub irpj_rate: Decimal,
    pub csll_rate: Decimal,
}

impl CorporateRates {
    /// Rates in force for 2024.
    pub fn brazil_2024() -> Self {
        Self {
            simplified_rate: Decimal::new(6, 2),
            pis_rate: Decimal::new(65, 4),
            cofins_rate: Decimal::new(3, 2),
            iss_rate: Decimal::new(5, 2),
            presumption_rate: Decimal::new(32, 2),
            irpj_rate: Decimal::new(15, 2),
            csll_rate: Decimal::new(9, 2),
        }
    }

    /// Named rates, in a stable order, for validation and display.
    pub fn named(&self) -> [(&'static str, Decimal); 7] {
        [
            ("simplified_rate", self.simplified_rate),
            ("pis_rate", self.pis_rate),
            ("cofins_rate", self.cofins_rate),
            ("iss_rate", self.iss_rate),
            ("presumption_rate", self.presumption_rate),
            ("irpj_rate", self.irpj_rate),
            ("csll_rate", self.csll_rate),
        ]
    }
}

impl Default for CorporateRates {
    fn default() -> Self {
        Self::brazil_2024()
    }
}

/// The complete set of tables and constants a calculation runs against.
///
/// Instances are immutable once built and are injected into the calculators,
/// so a different year (or a synthetic table in tests) never requires code
/// changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxTables {
    /// Year the tables apply to, informational only.
    pub year: i32,
    pub social_security: BracketTable,
    pub income_tax: BracketTable,
    /// Amount deducted from the income-tax base for each dependent.
    pub per_dependent_allowance: Decimal,
    /// Employer-side severance deposit (FGTS) rate.
    pub employer_deposit_rate: Decimal,
    pub corporate: CorporateRates,
}

impl TaxTables {
    /// The 2024 Brazilian tables.
    pub fn brazil_2024() -> Self {
        Self {
            year: 2024,
            social_security: social_security_2024(),
            income_tax: income_tax_2024(),
            per_dependent_allowance: Decimal::new(18959, 2),
            employer_deposit_rate: Decimal::new(8, 2),
            corporate: CorporateRates::brazil_2024(),
        }
    }

    /// Validates the scalar constants and the income-tax table shape.
    ///
    /// Bracket rows were already checked when each [`BracketTable`] was
    /// built.
    ///
    /// # Errors
    ///
    /// Returns [`TableError`] if:
    /// - a rate is outside [0, 1]
    /// - the per-dependent allowance is negative
    /// - the income-tax table does not end with an unbounded row
    pub fn validate(&self) -> Result<(), TableError> {
        check_rate("employer_deposit_rate", self.employer_deposit_rate)?;
        for (name, rate) in self.corporate.named() {
            check_rate(name, rate)?;
        }
        if self.per_dependent_allowance < Decimal::ZERO {
            return Err(TableError::NegativeAmount {
                name: "per_dependent_allowance".to_string(),
                value: self.per_dependent_allowance,
            });
        }
        if !self.income_tax.has_unbounded_top() {
            return Err(TableError::BoundedTopBracket(self.income_tax.name()));
        }
        Ok(())
    }
}

impl Default for TaxTables {
    fn default() -> Self {
        Self::brazil_2024()
    }
}

fn check_rate(
    name: &str,
    value: Decimal,
) -> Result<(), TableError> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(TableError::InvalidRate {
            name: name.to_string(),
            value,
        });
    }
    Ok(())
}

fn social_security_2024() -> BracketTable {
    BracketTable::trusted(
        SOCIAL_SECURITY_TABLE,
        vec![
            BracketRow::bounded(Decimal::new(141200, 2), Decimal::new(75, 3)),
            BracketRow::bounded(Decimal::new(266668, 2), Decimal::new(9, 2)),
            BracketRow::bounded(Decimal::new(400003, 2), Decimal::new(12, 2)),
            BracketRow::bounded(Decimal::new(778602, 2), Decimal::new(14, 2)),
        ],
    )
}

fn income_tax_2024() -> BracketTable {
    let (mut rows, top) = income_tax_2024_parts();
    rows.push(top);
    BracketTable::trusted(INCOME_TAX_TABLE, rows)
}

/// The 2024 income-tax rows split into the finite rows and the open top row.
pub(crate) fn income_tax_2024_parts() -> (Vec<BracketRow>, BracketRow) {
    let bounded = vec![
        BracketRow::bounded(Decimal::new(225920, 2), Decimal::ZERO),
        BracketRow::bounded(Decimal::new(282665, 2), Decimal::new(75, 3))
            .with_deduction(Decimal::new(16992, 2)),
        BracketRow::bounded(Decimal::new(375105, 2), Decimal::new(15, 2))
            .with_deduction(Decimal::new(38144, 2)),
        BracketRow::bounded(Decimal::new(466468, 2), Decimal::new(225, 3))
            .with_deduction(Decimal::new(66277, 2)),
    ];
    let top = BracketRow::unbounded(Decimal::new(275, 3), Decimal::new(89600, 2));
    (bounded, top)
}
