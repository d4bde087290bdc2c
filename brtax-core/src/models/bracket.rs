//! Progressive bracket rows and the validated tables built from them.
//!
//! A [`BracketTable`] is an ordered list of [`BracketRow`]s with strictly
//! increasing upper limits. Only the final row may be unbounded
//! (`upper_limit == None`). Both withholding calculators consume tables of
//! this shape; the income-tax calculator additionally requires the final row
//! to be unbounded.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building or validating a bracket table or a
/// [`TaxTables`](crate::TaxTables) configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    /// The table has no rows.
    #[error("bracket table '{0}' has no rows")]
    Empty(&'static str),

    /// Upper limits must strictly increase from one row to the next.
    #[error("bracket table '{table}': limit {limit} at row {row} does not exceed the previous limit")]
    NotIncreasing {
        table: &'static str,
        row: usize,
        limit: Decimal,
    },

    /// An unbounded row appeared before the last position.
    #[error("bracket table '{table}': unbounded row {row} must be the last row")]
    UnboundedBeforeEnd { table: &'static str, row: usize },

    /// A rate is outside the closed interval [0, 1].
    #[error("{name} must be between 0 and 1, got {value}")]
    InvalidRate { name: String, value: Decimal },

    /// A deduction or allowance is negative.
    #[error("{name} must be non-negative, got {value}")]
    NegativeAmount { name: String, value: Decimal },

    /// The table's top row has a finite limit where an open-ended one is required.
    #[error("bracket table '{0}' must end with an unbounded row")]
    BoundedTopBracket(&'static str),
}

/// A single row of a progressive table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketRow {
    /// Inclusive upper limit of the band, `None` for "no upper bound".
    pub upper_limit: Option<Decimal>,

    /// Marginal rate as a fraction (e.g. `0.075` for 7.5%).
    pub rate: Decimal,

    /// Fixed amount subtracted after applying the rate to the whole base.
    ///
    /// Used by the income-tax deduction-subtraction method; social-security
    /// rows leave it at zero.
    #[serde(default)]
    pub deduction: Decimal,
}

impl BracketRow {
    /// A bounded row with no deduction.
    pub fn bounded(
        upper_limit: Decimal,
        rate: Decimal,
    ) -> Self {
        Self {
            upper_limit: Some(upper_limit),
            rate,
            deduction: Decimal::ZERO,
        }
    }

    /// Returns a copy of this row carrying `deduction`.
    pub fn with_deduction(
        mut self,
        deduction: Decimal,
    ) -> Self {
        self.deduction = deduction;
        self
    }

    /// An open-ended top row.
    pub fn unbounded(
        rate: Decimal,
        deduction: Decimal,
    ) -> Self {
        Self {
            upper_limit: None,
            rate,
            deduction,
        }
    }

    /// Whether `amount` falls at or below this row's upper limit.
    pub fn covers(
        &self,
        amount: Decimal,
    ) -> bool {
        self.upper_limit.is_none_or(|limit| amount <= limit)
    }
}

/// An immutable, validated progressive table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketTable {
    name: &'static str,
    rows: Vec<BracketRow>,
}

impl BracketTable {
    /// Builds a table named `name` (used only in error messages).
    ///
    /// # Errors
    ///
    /// Returns [`TableError`] if the table is empty, limits are not strictly
    /// increasing, an unbounded row is not last, a rate is outside [0, 1] or
    /// a limit or deduction is negative.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use brtax_core::{BracketRow, BracketTable, TableError};
    ///
    /// let result = BracketTable::new(
    ///     "synthetic",
    ///     vec![
    ///         BracketRow::bounded(dec!(2000), dec!(0.10)),
    ///         BracketRow::bounded(dec!(1000), dec!(0.20)),
    ///     ],
    /// );
    ///
    /// assert!(matches!(result, Err(TableError::NotIncreasing { row: 1, .. })));
    /// ```
    pub fn new(
        name: &'static str,
        rows: Vec<BracketRow>,
    ) -> Result<Self, TableError> {
        if rows.is_empty() {
            return Err(TableError::Empty(name));
        }

        let last = rows.len() - 1;
        let mut previous: Option<Decimal> = None;
        for (index, row) in rows.iter().enumerate() {
            if row.rate < Decimal::ZERO || row.rate > Decimal::ONE {
                return Err(TableError::InvalidRate {
                    name: format!("{name} row {index} rate"),
                    value: row.rate,
                });
            }
            if row.deduction < Decimal::ZERO {
                return Err(TableError::NegativeAmount {
                    name: format!("{name} row {index} deduction"),
                    value: row.deduction,
                });
            }
            match row.upper_limit {
                None if index != last => {
                    return Err(TableError::UnboundedBeforeEnd { table: name, row: index });
                }
                None => {}
                Some(limit) => {
                    if limit < Decimal::ZERO {
                        return Err(TableError::NegativeAmount {
                            name: format!("{name} row {index} upper limit"),
                            value: limit,
                        });
                    }
                    if previous.is_some_and(|prev| limit <= prev) {
                        return Err(TableError::NotIncreasing {
                            table: name,
                            row: index,
                            limit,
                        });
                    }
                    previous = Some(limit);
                }
            }
        }

        Ok(Self { name, rows })
    }

    /// Wraps rows that are known to be well formed (the built-in tables).
    pub(crate) fn trusted(
        name: &'static str,
        rows: Vec<BracketRow>,
    ) -> Self {
        Self { name, rows }
    }

    /// Name given at construction.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Rows in ascending limit order.
    pub fn rows(&self) -> &[BracketRow] {
        &self.rows
    }

    /// Upper limit of the first row, `None` when the first row is unbounded.
    pub fn first_limit(&self) -> Option<Decimal> {
        self.rows.first().and_then(|row| row.upper_limit)
    }

    /// Whether the final row is open-ended.
    pub fn has_unbounded_top(&self) -> bool {
        self.rows.last().is_some_and(|row| row.upper_limit.is_none())
    }

    /// Splits the table into its finite rows and the open-ended top row.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::BoundedTopBracket`] when the final row has a
    /// finite limit.
    pub fn split_top(&self) -> Result<(&[BracketRow], BracketRow), TableError> {
        match self.rows.split_last() {
            Some((top, bounded)) if top.upper_limit.is_none() => Ok((bounded, *top)),
            _ => Err(TableError::BoundedTopBracket(self.name)),
        }
    }
}
