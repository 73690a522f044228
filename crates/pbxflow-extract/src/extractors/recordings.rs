//! System recording extraction.

use pbxflow_core::snapshot::Recording;

use super::{dedup_by_key, optional_column, query_or_degrade, required_column, sized_row};
use crate::client::SqlRunner;
use crate::probe::SchemaCapabilities;
use crate::report::{ExtractWarning, Extraction};

const TABLES: &[&str] = &["recordings", "systemrecordings"];

pub fn extract_recordings(
    runner: &dyn SqlRunner,
    caps: &SchemaCapabilities,
) -> Extraction<Recording> {
    let Some(table) = caps.first_existing_table(TABLES) else {
        return Extraction::degraded(ExtractWarning::TableMissing {
            entity: "recordings",
            candidates: TABLES.join(", "),
        });
    };

    let mut out = Extraction::default();
    let Some(id) = required_column(caps, table, &["id", "recording_id"], &mut out.warnings)
    else {
        return out;
    };
    let label = optional_column(caps, table, &["displayname", "description"], &mut out.warnings);
    let filename = optional_column(caps, table, &["filename"], &mut out.warnings);

    let sql = format!("SELECT {id}, {label}, {filename} FROM `{table}` ORDER BY {id}");
    for row in query_or_degrade(runner, table, &sql, &mut out.warnings) {
        let Some(row) = sized_row(table, row, 3, &mut out.warnings) else {
            continue;
        };
        out.rows.push(Recording {
            id: row[0].trim().to_string(),
            label: row[1].trim().to_string(),
            filename: row[2].trim().to_string(),
        });
    }

    out.rows = dedup_by_key(table, out.rows, |r| &r.id, &mut out.warnings);
    out
}
