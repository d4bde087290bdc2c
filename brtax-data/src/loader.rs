use std::collections::BTreeMap;
use std::io::Read;

use brtax_core::{
    BracketRow, BracketTable, INCOME_TAX_TABLE, SOCIAL_SECURITY_TABLE, TableError, TaxTables,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

/// Errors that can occur when loading bracket or rate data.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown bracket table '{0}' (expected 'inss' or 'irrf')")]
    UnknownTable(String),

    #[error("invalid table: {0}")]
    InvalidTable(#[from] TableError),
}

impl From<csv::Error> for LoaderError {
    fn from(err: csv::Error) -> Self {
        LoaderError::CsvParse(err.to_string())
    }
}

/// Maps a table name from the CSV to the engine's table name.
///
/// - `inss` / `social_security` → social-security brackets
/// - `irrf` / `income_tax` → income-tax brackets
fn table_name(table: &str) -> Result<&'static str, LoaderError> {
    match table.trim().to_ascii_lowercase().as_str() {
        "inss" | "social_security" => Ok(SOCIAL_SECURITY_TABLE),
        "irrf" | "income_tax" => Ok(INCOME_TAX_TABLE),
        _ => Err(LoaderError::UnknownTable(table.to_string())),
    }
}

/// A single record from a bracket CSV file.
///
/// - `table`: `inss` or `irrf`
/// - `upper_limit`: inclusive upper limit of the band (empty for unbounded)
/// - `rate`: the band's rate as a decimal (e.g. 0.075 for 7.5%)
/// - `deduction`: amount subtracted after applying the rate (empty for zero)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub table: String,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub upper_limit: Option<Decimal>,
    pub rate: Decimal,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub deduction: Option<Decimal>,
}

impl BracketRecord {
    fn to_row(&self) -> BracketRow {
        BracketRow {
            upper_limit: self.upper_limit,
            rate: self.rate,
            deduction: self.deduction.unwrap_or(Decimal::ZERO),
        }
    }
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for bracket tables from CSV files.
///
/// Rows are grouped by table name, kept in file order, and validated as a
/// [`BracketTable`] before they replace the corresponding table.
pub struct BracketLoader;

impl BracketLoader {
    /// Parse bracket records from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file or
    /// a byte slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketRecord>, LoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Replace the tables named in `records` and return how many were replaced.
    ///
    /// Each table listed in the records is rebuilt from its rows alone; a
    /// table not mentioned keeps its current rows.
    pub fn apply(
        tables: &mut TaxTables,
        records: &[BracketRecord],
    ) -> Result<usize, LoaderError> {
        let mut groups: BTreeMap<&'static str, Vec<BracketRow>> = BTreeMap::new();

        for record in records {
            groups
                .entry(table_name(&record.table)?)
                .or_default()
                .push(record.to_row());
        }

        let replaced = groups.len();
        for (name, rows) in groups {
            let count = rows.len();
            let table = BracketTable::new(name, rows)?;
            if name == SOCIAL_SECURITY_TABLE {
                tables.social_security = table;
            } else {
                tables.income_tax = table;
            }
            info!(table = name, rows = count, "loaded bracket table");
        }

        Ok(replaced)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const TEST_CSV: &str = r#"table,upper_limit,rate,deduction
inss,1412.00,0.075,
inss,2666.68,0.09,
inss,4000.03,0.12,
inss,7786.02,0.14,
irrf,2259.20,0,0
irrf,2826.65,0.075,169.92
irrf,3751.05,0.15,381.44
irrf,4664.68,0.225,662.77
irrf,,0.275,896.00
"#;

    #[test]
    fn test_parse_csv_single_bracket() {
        let csv = "table,upper_limit,rate,deduction\nirrf,2826.65,0.075,169.92";

        let records = BracketLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0],
            BracketRecord {
                table: "irrf".to_string(),
                upper_limit: Some(dec!(2826.65)),
                rate: dec!(0.075),
                deduction: Some(dec!(169.92)),
            }
        );
    }

    #[test]
    fn test_parse_csv_unbounded_upper_limit() {
        let csv = "table,upper_limit,rate,deduction\nirrf,,0.275,896.00";

        let records = BracketLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records[0].upper_limit, None);
        assert_eq!(records[0].to_row().deduction, dec!(896.00));
    }

    #[test]
    fn test_parse_csv_empty_deduction_is_zero() {
        let csv = "table,upper_limit,rate,deduction\ninss,1412.00,0.075,";

        let records = BracketLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records[0].deduction, None);
        assert_eq!(records[0].to_row(), BracketRow::bounded(dec!(1412.00), dec!(0.075)));
    }

    #[test]
    fn test_parse_invalid_csv_missing_column() {
        let csv = "table,upper_limit\ninss,1412.00";

        let result = BracketLoader::parse(csv.as_bytes());

        let err = result.expect_err("Should fail for missing column");
        let LoaderError::CsvParse(msg) = err else {
            panic!("Expected CsvParse error, got: {:?}", err);
        };
        assert!(
            msg.contains("missing field"),
            "Expected 'missing field' in error, got: {}",
            msg
        );
    }

    #[test]
    fn test_parse_invalid_csv_bad_decimal() {
        let csv = "table,upper_limit,rate,deduction\ninss,abc,0.075,";

        let err = BracketLoader::parse(csv.as_bytes()).expect_err("Should fail for bad decimal");

        assert!(matches!(err, LoaderError::CsvParse(_)));
    }

    #[test]
    fn test_parse_empty_csv() {
        let csv = "table,upper_limit,rate,deduction\n";

        let records = BracketLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert!(records.is_empty());
    }

    #[test]
    fn test_apply_builtin_rows_reproduces_builtin_tables() {
        let records = BracketLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");
        let mut tables = TaxTables::brazil_2024();

        let replaced = BracketLoader::apply(&mut tables, &records).expect("Failed to apply");

        assert_eq!(replaced, 2);
        assert_eq!(tables, TaxTables::brazil_2024());
    }

    #[test]
    fn test_apply_only_replaces_listed_tables() {
        let csv = "table,upper_limit,rate,deduction\ninss,1000,0.05,\ninss,5000,0.10,";
        let records = BracketLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");
        let mut tables = TaxTables::brazil_2024();

        BracketLoader::apply(&mut tables, &records).expect("Failed to apply");

        assert_eq!(tables.social_security.rows().len(), 2);
        assert_eq!(tables.income_tax, TaxTables::brazil_2024().income_tax);
    }

    #[test]
    fn test_apply_rejects_unknown_table() {
        let csv = "table,upper_limit,rate,deduction\nfgts,,0.08,";
        let records = BracketLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        let result = BracketLoader::apply(&mut TaxTables::brazil_2024(), &records);

        match result {
            Err(LoaderError::UnknownTable(ref name)) => assert_eq!(name, "fgts"),
            other => panic!("expected UnknownTable, got {other:?}"),
        }
    }

    #[test]
    fn test_apply_rejects_out_of_order_rows() {
        let csv = "table,upper_limit,rate,deduction\ninss,2000,0.05,\ninss,1000,0.10,";
        let records = BracketLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        let result = BracketLoader::apply(&mut TaxTables::brazil_2024(), &records);

        assert!(matches!(
            result,
            Err(LoaderError::InvalidTable(TableError::NotIncreasing { .. }))
        ));
    }

    #[test]
    fn test_apply_rejects_negative_limit() {
        let csv = "table,upper_limit,rate,deduction\ninss,-1412.00,0.075,";
        let records = BracketLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        let result = BracketLoader::apply(&mut TaxTables::brazil_2024(), &records);

        assert!(matches!(
            result,
            Err(LoaderError::InvalidTable(TableError::NegativeAmount { .. }))
        ));
    }

    #[test]
    fn test_table_name_aliases() {
        assert_eq!(table_name("INSS").unwrap(), SOCIAL_SECURITY_TABLE);
        assert_eq!(table_name("social_security").unwrap(), SOCIAL_SECURITY_TABLE);
        assert_eq!(table_name("irrf").unwrap(), INCOME_TAX_TABLE);
        assert_eq!(table_name("income_tax").unwrap(), INCOME_TAX_TABLE);
    }
}
