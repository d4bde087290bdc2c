//! Application state for the calculator.
//!
//! The state holds the raw text of both forms, which form is active, and the
//! last report. It is passed explicitly to [`crate::report::render`]; nothing
//! here is global.

use brtax_core::{CorporateRates, InvalidInput, InvoicingResult, SalariedResult, TaxEngine};
use serde::Serialize;
use tracing::{debug, warn};

/// Which form is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// CLT employee.
    #[default]
    Salaried,
    /// PJ contractor.
    Invoicing,
}

/// The result shown for the active form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Report {
    Salaried(SalariedResult),
    Invoicing(InvoicingResult),
}

/// Raw text of the salaried form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalariedForm {
    pub gross_salary: String,
    /// Empty means no dependents.
    pub dependents: String,
}

/// Raw text of the invoicing form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoicingForm {
    pub gross_revenue: String,
    pub regime: String,
}

impl Default for InvoicingForm {
    fn default() -> Self {
        Self {
            gross_revenue: String::new(),
            regime: "simplified".to_string(),
        }
    }
}

/// Application-wide state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub mode: Mode,
    pub salaried: SalariedForm,
    pub invoicing: InvoicingForm,
    /// Rates in force, used to label the presumed-profit levies.
    pub rates: CorporateRates,
    /// Last successful calculation for the active form.
    pub report: Option<Report>,
}

impl AppState {
    /// Creates an empty state labelled with the given rates.
    pub fn new(rates: CorporateRates) -> Self {
        Self {
            rates,
            ..Default::default()
        }
    }

    /// Activates `mode` and clears the report.
    pub fn switch_mode(
        &mut self,
        mode: Mode,
    ) {
        debug!(from = ?self.mode, to = ?mode, "switching mode");
        self.mode = mode;
        self.report = None;
    }

    /// Check if a report is ready to show.
    pub fn has_report(&self) -> bool {
        self.report.is_some()
    }

    /// Computes the active form and stores the report.
    ///
    /// On invalid input the previous report is kept and the error returned.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput`] when the active form does not parse or fails
    /// validation.
    pub fn calculate(
        &mut self,
        engine: &TaxEngine,
    ) -> Result<&Report, InvalidInput> {
        let outcome = match self.mode {
            Mode::Salaried => engine
                .salaried_from_text(&self.salaried.gross_salary, &self.salaried.dependents)
                .map(Report::Salaried),
            Mode::Invoicing => engine
                .invoicing_from_text(&self.invoicing.gross_revenue, &self.invoicing.regime)
                .map(Report::Invoicing),
        };

        let report = outcome.inspect_err(|error| warn!(%error, "calculation rejected"))?;
        Ok(self.report.insert(report))
    }
}
