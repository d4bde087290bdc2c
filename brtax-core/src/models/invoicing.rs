use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::input::{InvalidInput, parse_amount};

/// Corporate tax regime for invoicing (PJ).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    /// Simples Nacional: one flat rate over revenue.
    SimplifiedTax,
    /// Lucro Presumido: five levies, two of them over a presumed profit base.
    PresumedProfit,
}

impl Regime {
    /// Canonical command-line name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SimplifiedTax => "simplified",
            Self::PresumedProfit => "presumed",
        }
    }

    /// Short label shown on reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::SimplifiedTax => "DAS",
            Self::PresumedProfit => "Presumido",
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Regime {
    type Err = InvalidInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simplified" | "simples" => Ok(Self::SimplifiedTax),
            "presumed" | "presumido" => Ok(Self::PresumedProfit),
            _ => Err(InvalidInput::UnknownRegime(s.to_string())),
        }
    }
}

/// Input for an invoicing (PJ) calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoicingInput {
    /// Gross revenue invoiced, must be positive.
    pub gross_revenue: Decimal,
    pub regime: Regime,
}

impl InvoicingInput {
    /// Builds an input, rejecting non-positive revenue.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput::NonPositiveGrossRevenue`] if `gross_revenue <= 0`.
    pub fn new(
        gross_revenue: Decimal,
        regime: Regime,
    ) -> Result<Self, InvalidInput> {
        if gross_revenue <= Decimal::ZERO {
            return Err(InvalidInput::NonPositiveGrossRevenue(gross_revenue));
        }
        Ok(Self {
            gross_revenue,
            regime,
        })
    }

    /// Parses raw form text for revenue and regime name.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput`] for a non-numeric or non-positive revenue, or
    /// an unrecognised regime.
    pub fn parse(
        gross_revenue: &str,
        regime: &str,
    ) -> Result<Self, InvalidInput> {
        let gross_revenue = parse_amount("gross revenue", gross_revenue)?;
        let regime = regime.parse()?;
        Self::new(gross_revenue, regime)
    }
}

/// The five presumed-profit levies, plus the presumed base two of them use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresumedProfitBreakdown {
    pub pis: Decimal,
    pub cofins: Decimal,
    pub iss: Decimal,
    /// Revenue times the presumption rate. Not a levy.
    pub presumed_base: Decimal,
    pub irpj: Decimal,
    pub csll: Decimal,
}

impl PresumedProfitBreakdown {
    /// The five levies in report order.
    pub fn levies(&self) -> [(&'static str, Decimal); 5] {
        [
            ("pis", self.pis),
            ("cofins", self.cofins),
            ("iss", self.iss),
            ("irpj", self.irpj),
            ("csll", self.csll),
        ]
    }

    /// Sum of the five levies.
    pub fn total(&self) -> Decimal {
        self.levies().iter().map(|(_, amount)| *amount).sum()
    }
}

/// Outcome of an invoicing calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoicingResult {
    pub gross_revenue: Decimal,
    pub regime: Regime,
    pub total_tax: Decimal,
    pub net_profit: Decimal,
    /// Present only for [`Regime::PresumedProfit`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<PresumedProfitBreakdown>,
}
