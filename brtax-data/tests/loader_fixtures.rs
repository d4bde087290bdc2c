//! Loading tables from on-disk fixtures and running them through the engine.

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

use brtax_core::{Regime, TableError, TaxEngine, TaxTables};
use brtax_data::{BracketLoader, LoaderError, load_tables};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn no_files_gives_builtin_tables() {
    let tables = load_tables(None, None).unwrap();

    assert_eq!(tables, TaxTables::brazil_2024());
}

#[test]
fn bracket_fixture_reproduces_builtin_tables() {
    let path = fixture("brackets_2024.csv");

    let tables = load_tables(None, Some(&path)).unwrap();

    assert_eq!(tables, TaxTables::brazil_2024());
}

#[test]
fn bracket_fixture_has_nine_rows() {
    let file = std::fs::File::open(fixture("brackets_2024.csv")).unwrap();

    let records = BracketLoader::parse(file).unwrap();

    assert_eq!(records.len(), 9);
    assert_eq!(records.iter().filter(|r| r.table == "inss").count(), 4);
    assert_eq!(records[8].upper_limit, None);
}

#[test]
fn toml_fixture_overrides_income_tax_and_rates() {
    let path = fixture("tables_2025.toml");

    let tables = load_tables(Some(&path), None).unwrap();

    assert_eq!(tables.year, 2025);
    assert_eq!(tables.income_tax.first_limit(), Some(dec!(2428.80)));
    assert_eq!(tables.corporate.iss_rate, dec!(0.02));
    assert_eq!(tables.social_security, TaxTables::brazil_2024().social_security);
}

#[test]
fn toml_fixture_drives_engine() {
    let tables = load_tables(Some(&fixture("tables_2025.toml")), None).unwrap();
    let engine = TaxEngine::new(tables).unwrap();

    let result = engine.compute_salaried_breakdown(dec!(3000.00), 1).unwrap();

    // base 2551.5904 * 0.075 - 182.16
    assert_eq!(result.social_security_withheld, dec!(258.8196));
    assert_eq!(result.income_tax_withheld, dec!(9.20928));

    let invoicing = engine
        .compute_invoicing_breakdown(dec!(10000.00), Regime::PresumedProfit)
        .unwrap();
    assert_eq!(invoicing.total_tax, dec!(1333.00));
}

#[test]
fn csv_is_applied_after_toml() {
    let config = fixture("tables_2025.toml");
    let brackets = fixture("brackets_2024.csv");

    let tables = load_tables(Some(&config), Some(&brackets)).unwrap();

    assert_eq!(tables.year, 2025);
    assert_eq!(tables.income_tax, TaxTables::brazil_2024().income_tax);
}

#[test]
fn bounded_income_tax_fixture_is_rejected() {
    let path = fixture("bounded_irrf.csv");

    let result = load_tables(None, Some(&path));

    assert!(matches!(
        result,
        Err(LoaderError::InvalidTable(TableError::BoundedTopBracket("irrf")))
    ));
}

#[test]
fn missing_bracket_file_is_an_io_error() {
    let path = fixture("does_not_exist.csv");

    let result = load_tables(None, Some(&path));

    assert!(matches!(result, Err(LoaderError::Io { .. })));
}
