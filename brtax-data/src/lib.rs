//! Loading tax tables from disk.
//!
//! Tables start from the built-in 2024 set, are overlaid by an optional TOML
//! file, then by an optional bracket CSV, and are validated last.

pub mod config;
pub mod loader;

use std::fs::File;
use std::path::Path;

use brtax_core::TaxTables;
use tracing::info;

pub use config::{CorporateRatesFile, TablesFile};
pub use loader::{BracketLoader, BracketRecord, LoaderError};

/// Builds the tables a run should use.
///
/// # Errors
///
/// Returns [`LoaderError`] if either file cannot be read or parsed, or the
/// resulting tables fail validation.
pub fn load_tables(
    config: Option<&Path>,
    brackets: Option<&Path>,
) -> Result<TaxTables, LoaderError> {
    let mut tables = TaxTables::default();

    if let Some(path) = config {
        info!(path = %path.display(), "loading tables file");
        tables = TablesFile::from_path(path)?.apply(tables)?;
    }

    if let Some(path) = brackets {
        info!(path = %path.display(), "loading bracket CSV");
        let file = File::open(path).map_err(|source| LoaderError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let records = BracketLoader::parse(file)?;
        BracketLoader::apply(&mut tables, &records)?;
    }

    tables.validate()?;
    Ok(tables)
}
