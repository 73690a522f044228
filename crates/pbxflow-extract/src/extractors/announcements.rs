//! Announcement extraction.

use pbxflow_core::snapshot::Announcement;

use super::{dedup_by_key, optional_column, query_or_degrade, required_column, sized_row};
use crate::client::SqlRunner;
use crate::probe::SchemaCapabilities;
use crate::report::{ExtractWarning, Extraction};

const TABLES: &[&str] = &["announcement", "announcements"];

pub fn extract_announcements(
    runner: &dyn SqlRunner,
    caps: &SchemaCapabilities,
) -> Extraction<Announcement> {
    let Some(table) = caps.first_existing_table(TABLES) else {
        return Extraction::degraded(ExtractWarning::TableMissing {
            entity: "announcements",
            candidates: TABLES.join(", "),
        });
    };

    let mut out = Extraction::default();
    let Some(id) = required_column(caps, table, &["announcement_id", "id"], &mut out.warnings)
    else {
        return out;
    };
    let label = optional_column(caps, table, &["description"], &mut out.warnings);
    let post = optional_column(caps, table, &["post_dest", "dest"], &mut out.warnings);

    let sql = format!("SELECT {id}, {label}, {post} FROM `{table}` ORDER BY {id}");
    for row in query_or_degrade(runner, table, &sql, &mut out.warnings) {
        let Some(row) = sized_row(table, row, 3, &mut out.warnings) else {
            continue;
        };
        out.rows.push(Announcement {
            id: row[0].trim().to_string(),
            label: row[1].trim().to_string(),
            post_destination: row[2].trim().to_string(),
        });
    }

    out.rows = dedup_by_key(table, out.rows, |a| &a.id, &mut out.warnings);
    out
}
