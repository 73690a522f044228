//! Extraction warnings and the run report.
//!
//! Warnings are data, not errors: every recoverable irregularity degrades
//! locally and is surfaced here so operators can judge how complete a
//! snapshot is, while the run itself still succeeds.

use pbxflow_core::snapshot::Snapshot;

/// A recoverable irregularity observed during extraction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractWarning {
    /// No backing table for an entity kind in this installation.
    #[error("No table found for {entity} (tried: {candidates}); extracted as empty")]
    TableMissing {
        entity: &'static str,
        candidates: String,
    },

    /// A required column is absent in this schema revision.
    #[error("Table `{table}` has no `{column}` column in this revision; {effect}")]
    ColumnMissing {
        table: String,
        column: &'static str,
        /// What the extractor did about it ("field defaulted" or
        /// "collection extracted as empty").
        effect: &'static str,
    },

    /// A row did not have the expected shape and was dropped.
    #[error("Dropped malformed row from `{table}`: {detail}")]
    MalformedRow { table: String, detail: String },

    /// Secondary rows whose key matched no primary entity.
    #[error("Dropped {count} orphaned row(s) from `{table}`")]
    OrphanedRows { table: String, count: usize },

    /// The query for one entity kind timed out.
    #[error("Query against `{table}` timed out after {seconds}s; extracted as empty")]
    QueryTimeout { table: String, seconds: u64 },

    /// The query for one entity kind failed.
    #[error("Query against `{table}` failed ({message}); extracted as empty")]
    QueryFailed { table: String, message: String },
}

/// Result of one sub-extractor: rows plus the warnings it accumulated.
#[derive(Debug)]
pub struct Extraction<T> {
    pub rows: Vec<T>,
    pub warnings: Vec<ExtractWarning>,
}

impl<T> Default for Extraction<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

impl<T> Extraction<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self {
            rows,
            warnings: Vec::new(),
        }
    }

    /// An empty extraction carrying one warning. Used by sub-extractors
    /// degrading a whole collection.
    pub fn degraded(warning: ExtractWarning) -> Self {
        Self {
            rows: Vec::new(),
            warnings: vec![warning],
        }
    }

    /// Drain this extraction into output slots.
    pub fn into_parts(self) -> (Vec<T>, Vec<ExtractWarning>) {
        (self.rows, self.warnings)
    }
}

/// Result of a full extraction run.
#[derive(Debug)]
pub struct ExtractReport {
    pub snapshot: Snapshot,
    pub warnings: Vec<ExtractWarning>,
    pub duration_ms: u64,
}

impl ExtractReport {
    /// Returns true if extraction saw no irregularities.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }
}
