//! Extension extraction.

use pbxflow_core::snapshot::Extension;

use super::{dedup_by_key, optional_column, query_or_degrade, required_column, sized_row};
use crate::client::SqlRunner;
use crate::probe::SchemaCapabilities;
use crate::report::{ExtractWarning, Extraction};

const TABLES: &[&str] = &["users", "extensions"];

pub fn extract_extensions(
    runner: &dyn SqlRunner,
    caps: &SchemaCapabilities,
) -> Extraction<Extension> {
    let Some(table) = caps.first_existing_table(TABLES) else {
        return Extraction::degraded(ExtractWarning::TableMissing {
            entity: "extensions",
            candidates: TABLES.join(", "),
        });
    };

    let mut out = Extraction::default();
    let Some(number) = required_column(caps, table, &["extension", "number"], &mut out.warnings)
    else {
        return out;
    };
    let label = optional_column(caps, table, &["name", "description"], &mut out.warnings);

    let sql = format!("SELECT {number}, {label} FROM `{table}` ORDER BY {number}");
    for row in query_or_degrade(runner, table, &sql, &mut out.warnings) {
        let Some(row) = sized_row(table, row, 2, &mut out.warnings) else {
            continue;
        };
        out.rows.push(Extension {
            number: row[0].trim().to_string(),
            label: row[1].trim().to_string(),
        });
    }

    out.rows = dedup_by_key(table, out.rows, |e| &e.number, &mut out.warnings);
    out
}
