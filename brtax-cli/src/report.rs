//! Rendering [`AppState`] as text or JSON.

use std::fmt::Write;

use brtax_core::{CorporateRates, InvoicingResult, Regime, SalariedResult};
use clap::ValueEnum;

use crate::app::{AppState, Report};
use crate::currency::{format_brl, format_rate};

/// Shown while no report has been calculated.
pub const EMPTY_MESSAGE: &str = "Preencha os valores e clique em calcular.";

const LABEL_WIDTH: usize = 28;
const VALUE_WIDTH: usize = 18;

/// Output format for a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Renders the current report.
///
/// Text output uses pt-BR labels and currency; JSON serializes the unrounded
/// result record, or `null` when nothing has been calculated.
///
/// # Errors
///
/// Returns a [`serde_json::Error`] if JSON serialization fails.
pub fn render(
    state: &AppState,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(render_text(state)),
        OutputFormat::Json => serde_json::to_string_pretty(&state.report),
    }
}

fn render_text(state: &AppState) -> String {
    match &state.report {
        None => format!("{EMPTY_MESSAGE}\n"),
        Some(Report::Salaried(result)) => salaried_text(result),
        Some(Report::Invoicing(result)) => invoicing_text(result, &state.rates),
    }
}

fn salaried_text(result: &SalariedResult) -> String {
    let mut out = String::new();
    line(&mut out, "Salário Bruto", format_brl(result.gross_salary));
    line(&mut out, "FGTS (Pago pela empresa)", format_brl(result.employer_deposit));
    line(&mut out, "Desconto INSS", deduction(result.social_security_withheld));
    line(&mut out, "Desconto IRRF", deduction(result.income_tax_withheld));
    line(&mut out, "Salário Líquido", format_brl(result.net_salary));
    out
}

fn invoicing_text(
    result: &InvoicingResult,
    rates: &CorporateRates,
) -> String {
    let regime_label = match result.regime {
        Regime::SimplifiedTax => {
            format!("{} {}", result.regime.label(), format_rate(rates.simplified_rate))
        }
        Regime::PresumedProfit => result.regime.label().to_string(),
    };

    let mut out = String::new();
    line(&mut out, "Faturamento Bruto", format_brl(result.gross_revenue));
    line(
        &mut out,
        &format!("Total Impostos ({regime_label})"),
        deduction(result.total_tax),
    );

    if let Some(b) = &result.breakdown {
        let presumption = format_rate(rates.presumption_rate);
        let levies = [
            (format!("PIS ({})", format_rate(rates.pis_rate)), b.pis),
            (format!("COFINS ({})", format_rate(rates.cofins_rate)), b.cofins),
            (format!("ISS ({})", format_rate(rates.iss_rate)), b.iss),
            (
                format!("IRPJ ({} s/ {presumption})", format_rate(rates.irpj_rate)),
                b.irpj,
            ),
            (
                format!("CSLL ({} s/ {presumption})", format_rate(rates.csll_rate)),
                b.csll,
            ),
        ];
        for (label, amount) in levies {
            line(&mut out, &format!("  {label}"), deduction(amount));
        }
    }

    line(&mut out, "Lucro Líquido (PJ)", format_brl(result.net_profit));
    out
}

fn deduction(amount: rust_decimal::Decimal) -> String {
    format!("- {}", format_brl(amount))
}

fn line(
    out: &mut String,
    label: &str,
    value: String,
) {
    let label = format!("{label}:");
    // Writing to a String cannot fail.
    let _ = writeln!(out, "{label:<LABEL_WIDTH$}{value:>VALUE_WIDTH$}");
}
