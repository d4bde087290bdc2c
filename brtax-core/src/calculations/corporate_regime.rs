//! Invoicing (PJ) taxes under the two simplified corporate regimes.
//!
//! # Simplified tax (Simples Nacional)
//!
//! A single flat rate over gross revenue, with no breakdown.
//!
//! # Presumed profit (Lucro Presumido)
//!
//! | Levy   | Base                        | 2024 rate |
//! |--------|-----------------------------|-----------|
//! | PIS    | gross revenue               | 0.65%     |
//! | COFINS | gross revenue               | 3%        |
//! | ISS    | gross revenue               | 5%        |
//! | IRPJ   | revenue × presumption (32%) | 15%       |
//! | CSLL   | revenue × presumption (32%) | 9%        |
//!
//! The profit levies apply to the presumed base, never to actual profit.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use brtax_core::{CorporateRates, Regime};
//! use brtax_core::calculations::CorporateRegimeCalculator;
//!
//! let calculator = CorporateRegimeCalculator::new(CorporateRates::brazil_2024());
//! let result = calculator.compute(dec!(10000.00), Regime::PresumedProfit);
//!
//! assert_eq!(result.total_tax, dec!(1633.00));
//! assert_eq!(result.net_profit, dec!(8367.00));
//! ```

use rust_decimal::Decimal;
use tracing::trace;

use crate::{CorporateRates, InvoicingResult, PresumedProfitBreakdown, Regime};

/// Calculator for both invoicing regimes.
#[derive(Debug, Clone, Copy)]
pub struct CorporateRegimeCalculator {
    rates: CorporateRates,
}

impl CorporateRegimeCalculator {
    pub fn new(rates: CorporateRates) -> Self {
        Self { rates }
    }

    /// Rates this calculator applies.
    pub fn rates(&self) -> &CorporateRates {
        &self.rates
    }

    /// Dispatches on `regime`.
    pub fn compute(
        &self,
        gross_revenue: Decimal,
        regime: Regime,
    ) -> InvoicingResult {
        match regime {
            Regime::SimplifiedTax => self.simplified(gross_revenue),
            Regime::PresumedProfit => self.presumed_profit(gross_revenue),
        }
    }

    /// Flat-rate tax over revenue.
    pub fn simplified(
        &self,
        gross_revenue: Decimal,
    ) -> InvoicingResult {
        let total_tax = gross_revenue * self.rates.simplified_rate;
        trace!(%gross_revenue, %total_tax, "simplified regime");

        InvoicingResult {
            gross_revenue,
            regime: Regime::SimplifiedTax,
            total_tax,
            net_profit: gross_revenue - total_tax,
            breakdown: None,
        }
    }

    /// Five levies, two of them over the presumed profit base.
    pub fn presumed_profit(
        &self,
        gross_revenue: Decimal,
    ) -> InvoicingResult {
        let breakdown = self.breakdown(gross_revenue);
        let total_tax = breakdown.total();
        trace!(%gross_revenue, %total_tax, ?breakdown, "presumed profit regime");

        InvoicingResult {
            gross_revenue,
            regime: Regime::PresumedProfit,
            total_tax,
            net_profit: gross_revenue - total_tax,
            breakdown: Some(breakdown),
        }
    }

    fn breakdown(
        &self,
        gross_revenue: Decimal,
    ) -> PresumedProfitBreakdown {
        let presumed_base = gross_revenue * self.rates.presumption_rate;

        PresumedProfitBreakdown {
            pis: gross_revenue * self.rates.pis_rate,
            cofins: gross_revenue * self.rates.cofins_rate,
            iss: gross_revenue * self.rates.iss_rate,
            presumed_base,
            irpj: presumed_base * self.rates.irpj_rate,
            csll: presumed_base * self.rates.csll_rate,
        }
    }
}
