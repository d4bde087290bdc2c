//! Command-line definition and the run loop behind it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use brtax_core::TaxEngine;
use brtax_data::load_tables;
use clap::{Parser, Subcommand};
use tracing::info;

use crate::app::{AppState, Mode};
use crate::report::{OutputFormat, render};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Brazilian take-home pay calculator.
///
/// Compares a CLT salary against PJ invoicing under Simples Nacional or
/// Lucro Presumido, using the 2024 tables unless overridden.
#[derive(Debug, Parser)]
#[command(name = "brtax", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// TOML file overriding rates and bracket tables.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// CSV file replacing the INSS and/or IRRF brackets.
    #[arg(long, global = true)]
    pub brackets: Option<PathBuf>,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Log level or filter directive; overrides `RUST_LOG`.
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Salaried employee (CLT): INSS, IRRF and FGTS.
    Clt {
        /// Monthly gross salary, e.g. `3000` or `3,000.00`.
        #[arg(long, allow_hyphen_values = true)]
        gross: String,

        /// Number of dependents.
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        dependents: String,
    },
    /// Contractor invoicing (PJ).
    Pj {
        /// Monthly gross revenue.
        #[arg(long, allow_hyphen_values = true)]
        revenue: String,

        /// `simplified` (Simples Nacional) or `presumed` (Lucro Presumido).
        #[arg(long, default_value = "simplified")]
        regime: String,
    },
}

// ─── run ─────────────────────────────────────────────────────────────────────

/// Builds the engine from the configured tables.
pub fn build_engine(cli: &Cli) -> Result<TaxEngine> {
    let tables = load_tables(cli.config.as_deref(), cli.brackets.as_deref())
        .context("failed to load tax tables")?;
    let year = tables.year;
    let engine = TaxEngine::new(tables).context("tax tables are not usable")?;
    info!(year, "engine ready");
    Ok(engine)
}

/// Fills the state from the command, calculates, and renders the report.
pub fn run(cli: &Cli) -> Result<String> {
    let engine = build_engine(cli)?;
    let mut state = AppState::new(*engine.corporate().rates());

    match &cli.command {
        Command::Clt { gross, dependents } => {
            state.switch_mode(Mode::Salaried);
            state.salaried.gross_salary.clone_from(gross);
            state.salaried.dependents.clone_from(dependents);
        }
        Command::Pj { revenue, regime } => {
            state.switch_mode(Mode::Invoicing);
            state.invoicing.gross_revenue.clone_from(revenue);
            state.invoicing.regime.clone_from(regime);
        }
    }

    state.calculate(&engine).context("invalid input")?;
    render(&state, cli.format).context("failed to render report")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_clt_with_defaults() {
        let cli = Cli::try_parse_from(["brtax", "clt", "--gross", "3000"]).unwrap();

        match cli.command {
            Command::Clt { gross, dependents } => {
                assert_eq!(gross, "3000");
                assert_eq!(dependents, "");
            }
            other => panic!("expected clt, got {other:?}"),
        }
        assert_eq!(cli.format, OutputFormat::Text);
        assert_eq!(cli.config, None);
    }

    #[test]
    fn parses_pj_with_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "brtax",
            "pj",
            "--revenue",
            "10000",
            "--regime",
            "presumed",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(cli.command, Command::Pj { ref regime, .. } if regime == "presumed"));
    }

    #[test]
    fn gross_is_required() {
        assert!(Cli::try_parse_from(["brtax", "clt"]).is_err());
    }

    #[test]
    fn negative_dependents_reach_validation() {
        let cli =
            Cli::try_parse_from(["brtax", "clt", "--gross", "3000", "--dependents", "-1"]).unwrap();

        let err = run(&cli).unwrap_err();

        assert!(format!("{err:#}").contains("dependent"));
    }

    #[test]
    fn run_renders_text_report() {
        let cli = Cli::try_parse_from(["brtax", "clt", "--gross", "3,000.00", "--dependents", "1"])
            .unwrap();

        let output = run(&cli).unwrap();

        assert!(output.contains("Salário Líquido:"));
        assert!(output.contains("R$ 2.719,73"));
    }

    #[test]
    fn run_accepts_brazilian_amounts() {
        let cli =
            Cli::try_parse_from(["brtax", "pj", "--revenue", "10.000,00", "--regime", "presumed"])
                .unwrap();

        let output = run(&cli).unwrap();

        assert!(output.contains("R$ 10.000,00"));
        assert!(output.contains("R$ 8.367,00"));
    }
}
