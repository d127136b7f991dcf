//! Explicit column schema for worksheet reads.
//!
//! The store's header row is turned into one `SheetSchema` per fetch, and
//! every data row is mapped through it. This keeps the positional
//! index-to-name coupling in one place instead of scattering it across the
//! read path, and handles ragged rows deliberately: short rows simply omit
//! the missing columns; cells beyond the header width are dropped with a
//! warning rather than silently.

use std::collections::BTreeMap;

use tracing::warn;

use crate::error::PipelineError;

use super::Cell;

/// One worksheet row keyed by column name. BTreeMap for deterministic
/// serialization (summary prompts, test assertions).
pub type SheetRecord = BTreeMap<String, String>;

/// Column layout inferred from a worksheet's header row.
#[derive(Debug, Clone)]
pub struct SheetSchema {
    columns: Vec<String>,
}

impl SheetSchema {
    /// Build a schema from the header row's cells, in the order the store
    /// returned them. An empty header fails fast — a record set keyed by
    /// nothing is worse than no record set.
    pub fn from_header(cells: &[Cell]) -> Result<Self, PipelineError> {
        if cells.is_empty() {
            return Err(PipelineError::StoreShape("empty header row".to_string()));
        }
        Ok(Self {
            columns: cells.iter().map(|c| c.content.clone()).collect(),
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Map one data row's cells to column names by 1-based index.
    pub fn record_from_row(&self, cells: &[Cell]) -> SheetRecord {
        let mut record = SheetRecord::new();
        for cell in cells {
            match cell.column_index.checked_sub(1).and_then(|i| self.columns.get(i)) {
                Some(name) => {
                    record.insert(name.clone(), cell.content.clone());
                }
                None => {
                    warn!(
                        column_index = cell.column_index,
                        width = self.columns.len(),
                        "cell outside header width — dropped"
                    );
                }
            }
        }
        record
    }
}
