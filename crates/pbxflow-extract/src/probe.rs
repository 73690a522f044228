//! Schema probing.
//!
//! One `information_schema` query discovers every table and column visible
//! to the current credentials. The result is consumed by pure candidate
//! lookups, keeping all version-specific knowledge in small name tables
//! inside the sub-extractors instead of conditionals in query logic.

use pbxflow_core::errors::StoreError;
use pbxflow_core::types::collections::{FxHashMap, FxHashSet};

use crate::client::SqlRunner;

const PROBE_SQL: &str = "SELECT TABLE_NAME, COLUMN_NAME \
     FROM information_schema.COLUMNS WHERE TABLE_SCHEMA = DATABASE()";

/// Which tables and columns exist in the connected store.
///
/// Ephemeral: rebuilt at the start of every extraction run, never
/// persisted. Names are compared case-insensitively; MySQL table name
/// casing varies by host filesystem.
#[derive(Debug, Default)]
pub struct SchemaCapabilities {
    columns: FxHashMap<String, FxHashSet<String>>,
}

impl SchemaCapabilities {
    /// Probe the connected store.
    ///
    /// Any failure here means the store itself is unreachable or unreadable,
    /// which is fatal for the whole extraction run.
    pub fn probe(runner: &dyn SqlRunner) -> Result<Self, StoreError> {
        let rows = runner.run(PROBE_SQL).map_err(|e| StoreError::ConnectionFailed {
            message: e.to_string(),
        })?;

        let mut columns: FxHashMap<String, FxHashSet<String>> = FxHashMap::default();
        for row in rows {
            if row.len() < 2 {
                continue;
            }
            columns
                .entry(row[0].to_ascii_lowercase())
                .or_default()
                .insert(row[1].to_ascii_lowercase());
        }

        tracing::debug!(tables = columns.len(), "schema probe complete");
        Ok(Self { columns })
    }

    /// Build capabilities directly from (table, columns) pairs (for tests
    /// and fixtures).
    pub fn from_parts<'a, I, C>(parts: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, C)>,
        C: IntoIterator<Item = &'a str>,
    {
        let mut columns: FxHashMap<String, FxHashSet<String>> = FxHashMap::default();
        for (table, cols) in parts {
            columns.insert(
                table.to_ascii_lowercase(),
                cols.into_iter().map(|c| c.to_ascii_lowercase()).collect(),
            );
        }
        Self { columns }
    }

    /// All tables visible to the current credentials.
    pub fn tables(&self) -> FxHashSet<String> {
        self.columns.keys().cloned().collect()
    }

    pub fn has_table(&self, table: &str) -> bool {
        self.columns.contains_key(&table.to_ascii_lowercase())
    }

    pub fn has_column(&self, table: &str, column: &str) -> bool {
        self.columns
            .get(&table.to_ascii_lowercase())
            .is_some_and(|cols| cols.contains(&column.to_ascii_lowercase()))
    }

    /// Columns of one table. Empty set (not an error) when the table does
    /// not exist.
    pub fn columns_of(&self, table: &str) -> FxHashSet<String> {
        self.columns
            .get(&table.to_ascii_lowercase())
            .cloned()
            .unwrap_or_default()
    }

    pub fn table_count(&self) -> usize {
        self.columns.len()
    }

    /// First candidate table present in this installation.
    pub fn first_existing_table<'a>(&self, candidates: &[&'a str]) -> Option<&'a str> {
        candidates.iter().copied().find(|t| self.has_table(t))
    }

    /// First candidate column present on `table`.
    pub fn first_existing_column<'a>(
        &self,
        table: &str,
        candidates: &[&'a str],
    ) -> Option<&'a str> {
        candidates
            .iter()
            .copied()
            .find(|c| self.has_column(table, c))
    }
}
