//! Per-collection sub-extractors.
//!
//! All sub-extractors follow one shared pattern:
//! 1. resolve the backing table among historically-used names
//! 2. resolve each field's column among historically-used names
//! 3. issue one query scoped to exactly the required columns
//! 4. map rows into typed entities with light normalization
//!
//! Composite entities add secondary queries merged by primary id, with
//! orphaned rows dropped and counted. Every failure degrades to an empty
//! result plus a warning; sub-extractors never raise. They are mutually
//! independent and safe to run on worker threads.

pub mod announcements;
pub mod extensions;
pub mod inbound_routes;
pub mod ivr;
pub mod meta;
pub mod outbound_routes;
pub mod queues;
pub mod recordings;
pub mod ring_groups;
pub mod time_conditions;
pub mod time_groups;
pub mod trunks;

pub use announcements::extract_announcements;
pub use extensions::extract_extensions;
pub use inbound_routes::extract_inbound_routes;
pub use ivr::extract_ivr;
pub use meta::extract_meta;
pub use outbound_routes::extract_outbound_routes;
pub use queues::extract_queues;
pub use recordings::extract_recordings;
pub use ring_groups::extract_ring_groups;
pub use time_conditions::extract_time_conditions;
pub use time_groups::extract_time_groups;
pub use trunks::extract_trunks;

use pbxflow_core::types::collections::FxHashSet;

use crate::client::{Row, SqlRunner};
use crate::probe::SchemaCapabilities;
use crate::report::ExtractWarning;

/// Run one query, degrading any failure to a warning plus no rows.
/// Only a probe-time connection failure aborts a run; by this point every
/// store hiccup is local to one entity kind.
pub(crate) fn query_or_degrade(
    runner: &dyn SqlRunner,
    table: &str,
    sql: &str,
    warnings: &mut Vec<ExtractWarning>,
) -> Vec<Row> {
    use pbxflow_core::errors::StoreError;

    match runner.run(sql) {
        Ok(rows) => rows,
        Err(StoreError::QueryTimeout { seconds, .. }) => {
            tracing::warn!(table, seconds, "query timed out; collection degraded to empty");
            warnings.push(ExtractWarning::QueryTimeout {
                table: table.to_string(),
                seconds,
            });
            Vec::new()
        }
        Err(e) => {
            tracing::warn!(table, error = %e, "query failed; collection degraded to empty");
            warnings.push(ExtractWarning::QueryFailed {
                table: table.to_string(),
                message: e.to_string(),
            });
            Vec::new()
        }
    }
}

/// Resolve a required column. `None` (with a warning) means the whole
/// collection degrades to empty for this revision.
pub(crate) fn required_column(
    caps: &SchemaCapabilities,
    table: &str,
    candidates: &[&'static str],
    warnings: &mut Vec<ExtractWarning>,
) -> Option<String> {
    match caps.first_existing_column(table, candidates) {
        Some(col) => Some(format!("`{col}`")),
        None => {
            warnings.push(ExtractWarning::ColumnMissing {
                table: table.to_string(),
                column: candidates[0],
                effect: "collection extracted as empty",
            });
            None
        }
    }
}

/// Resolve an optional column, selecting an empty literal when this
/// revision lacks it so the row shape stays fixed.
pub(crate) fn optional_column(
    caps: &SchemaCapabilities,
    table: &str,
    candidates: &[&'static str],
    warnings: &mut Vec<ExtractWarning>,
) -> String {
    match caps.first_existing_column(table, candidates) {
        Some(col) => format!("`{col}`"),
        None => {
            warnings.push(ExtractWarning::ColumnMissing {
                table: table.to_string(),
                column: candidates[0],
                effect: "field defaulted",
            });
            "''".to_string()
        }
    }
}

/// Accept a row only if it has the expected field count.
pub(crate) fn sized_row(
    table: &str,
    row: Row,
    expected: usize,
    warnings: &mut Vec<ExtractWarning>,
) -> Option<Row> {
    if row.len() == expected {
        Some(row)
    } else {
        warnings.push(ExtractWarning::MalformedRow {
            table: table.to_string(),
            detail: format!("expected {expected} fields, got {}", row.len()),
        });
        None
    }
}

/// Enforce key uniqueness within a collection, dropping later duplicates.
pub(crate) fn dedup_by_key<T>(
    table: &str,
    rows: Vec<T>,
    key: impl Fn(&T) -> &str,
    warnings: &mut Vec<ExtractWarning>,
) -> Vec<T> {
    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        if seen.insert(key(&row).to_string()) {
            out.push(row);
        } else {
            warnings.push(ExtractWarning::MalformedRow {
                table: table.to_string(),
                detail: format!("duplicate key `{}`", key(&row)),
            });
        }
    }
    out
}

/// Numeric coercion for inherently-numeric fields stored as text.
pub(crate) fn parse_u32(s: &str) -> u32 {
    s.trim().parse().unwrap_or(0)
}

/// Boolean coercion for flag columns (`on`/`off`, `true`, `1`, `yes`).
pub(crate) fn parse_flag(s: &str) -> bool {
    matches!(
        s.trim().to_ascii_lowercase().as_str(),
        "on" | "true" | "yes" | "1"
    )
}
