//! TOML overrides for the built-in tables.
//!
//! Every key is optional; anything left out keeps its built-in value.
//! Amounts are best written as strings so they parse as exact decimals.
//!
//! ```toml
//! year = 2025
//! per_dependent_allowance = "189.59"
//! employer_deposit_rate = "0.08"
//!
//! [corporate]
//! simplified_rate = "0.06"
//! iss_rate = "0.02"
//!
//! [[income_tax]]
//! upper_limit = "2259.20"
//! rate = "0"
//!
//! [[income_tax]]
//! rate = "0.275"
//! deduction = "896.00"
//! ```

use std::path::Path;

use brtax_core::{
    BracketRow, BracketTable, CorporateRates, INCOME_TAX_TABLE, SOCIAL_SECURITY_TABLE, TaxTables,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::loader::LoaderError;

/// Partial corporate rates; `None` keeps the current value.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CorporateRatesFile {
    pub simplified_rate: Option<Decimal>,
    pub pis_rate: Option<Decimal>,
    pub cofins_rate: Option<Decimal>,
    pub iss_rate: Option<Decimal>,
    pub presumption_rate: Option<Decimal>,
    pub irpj_rate: Option<Decimal>,
    pub csll_rate: Option<Decimal>,
}

impl CorporateRatesFile {
    fn apply(
        &self,
        rates: &mut CorporateRates,
    ) {
        let pairs = [
            (&mut rates.simplified_rate, self.simplified_rate),
            (&mut rates.pis_rate, self.pis_rate),
            (&mut rates.cofins_rate, self.cofins_rate),
            (&mut rates.iss_rate, self.iss_rate),
            (&mut rates.presumption_rate, self.presumption_rate),
            (&mut rates.irpj_rate, self.irpj_rate),
            (&mut rates.csll_rate, self.csll_rate),
        ];
        for (slot, value) in pairs {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

/// The on-disk shape of a tables file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TablesFile {
    pub year: Option<i32>,
    pub per_dependent_allowance: Option<Decimal>,
    pub employer_deposit_rate: Option<Decimal>,
    pub corporate: Option<CorporateRatesFile>,
    pub social_security: Option<Vec<BracketRow>>,
    pub income_tax: Option<Vec<BracketRow>>,
}

impl TablesFile {
    /// Parses TOML text.
    pub fn from_toml(input: &str) -> Result<Self, LoaderError> {
        Ok(toml::from_str(input)?)
    }

    /// Reads and parses a TOML file.
    pub fn from_path(path: &Path) -> Result<Self, LoaderError> {
        let contents = std::fs::read_to_string(path).map_err(|source| LoaderError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    /// Overlays this file onto `tables`.
    ///
    /// Bracket lists replace the whole table and are validated here; scalar
    /// rates are checked later by [`TaxTables::validate`].
    pub fn apply(
        self,
        mut tables: TaxTables,
    ) -> Result<TaxTables, LoaderError> {
        if let Some(year) = self.year {
            tables.year = year;
        }
        if let Some(allowance) = self.per_dependent_allowance {
            tables.per_dependent_allowance = allowance;
        }
        if let Some(rate) = self.employer_deposit_rate {
            tables.employer_deposit_rate = rate;
        }
        if let Some(corporate) = &self.corporate {
            corporate.apply(&mut tables.corporate);
        }
        if let Some(rows) = self.social_security {
            tables.social_security = BracketTable::new(SOCIAL_SECURITY_TABLE, rows)?;
        }
        if let Some(rows) = self.income_tax {
            tables.income_tax = BracketTable::new(INCOME_TAX_TABLE, rows)?;
        }
        debug!(year = tables.year, "applied tables file");
        Ok(tables)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn empty_file_keeps_builtin_tables() {
        let file = TablesFile::from_toml("").unwrap();

        let tables = file.apply(TaxTables::brazil_2024()).unwrap();

        assert_eq!(tables, TaxTables::brazil_2024());
    }

    #[test]
    fn scalar_overrides() {
        let file = TablesFile::from_toml(
            r#"
year = 2025
per_dependent_allowance = "200.00"
employer_deposit_rate = "0.02"

[corporate]
iss_rate = "0.02"
"#,
        )
        .unwrap();

        let tables = file.apply(TaxTables::brazil_2024()).unwrap();

        assert_eq!(tables.year, 2025);
        assert_eq!(tables.per_dependent_allowance, dec!(200.00));
        assert_eq!(tables.employer_deposit_rate, dec!(0.02));
        assert_eq!(tables.corporate.iss_rate, dec!(0.02));
        assert_eq!(tables.corporate.pis_rate, dec!(0.0065));
    }

    #[test]
    fn bracket_list_replaces_table() {
        let file = TablesFile::from_toml(
            r#"
[[income_tax]]
upper_limit = "3000.00"
rate = "0"

[[income_tax]]
rate = "0.20"
deduction = "600"
"#,
        )
        .unwrap();

        let tables = file.apply(TaxTables::brazil_2024()).unwrap();

        assert_eq!(
            tables.income_tax.rows(),
            &[
                BracketRow::bounded(dec!(3000.00), dec!(0)),
                BracketRow::unbounded(dec!(0.20), dec!(600)),
            ]
        );
        assert_eq!(tables.social_security, TaxTables::brazil_2024().social_security);
    }

    #[test]
    fn invalid_bracket_list_is_rejected() {
        let file = TablesFile::from_toml(
            r#"
[[social_security]]
rate = "0.075"

[[social_security]]
upper_limit = "1000"
rate = "0.09"
"#,
        )
        .unwrap();

        let result = file.apply(TaxTables::brazil_2024());

        assert!(matches!(result, Err(LoaderError::InvalidTable(_))));
    }

    #[test]
    fn unknown_key_is_rejected() {
        let result = TablesFile::from_toml("fgts = \"0.08\"");

        assert!(matches!(result, Err(LoaderError::TomlParse(_))));
    }

    #[test]
    fn missing_file_reports_path() {
        let result = TablesFile::from_path(Path::new("/this/path/does/not/exist.toml"));

        match result {
            Err(LoaderError::Io { path, .. }) => assert!(path.ends_with("exist.toml")),
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
