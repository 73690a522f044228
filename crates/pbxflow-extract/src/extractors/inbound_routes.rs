//! Inbound route extraction.

use pbxflow_core::snapshot::InboundRoute;

use super::{dedup_by_key, optional_column, query_or_degrade, required_column, sized_row};
use crate::client::SqlRunner;
use crate::probe::SchemaCapabilities;
use crate::report::{ExtractWarning, Extraction};

/// Table names used for inbound routes across schema revisions.
const TABLES: &[&str] = &["incoming", "inbound_routes"];

pub fn extract_inbound_routes(
    runner: &dyn SqlRunner,
    caps: &SchemaCapabilities,
) -> Extraction<InboundRoute> {
    let Some(table) = caps.first_existing_table(TABLES) else {
        return Extraction::degraded(ExtractWarning::TableMissing {
            entity: "inbound routes",
            candidates: TABLES.join(", "),
        });
    };

    let mut out = Extraction::default();
    let Some(did) = required_column(caps, table, &["extension", "did"], &mut out.warnings)
    else {
        return out;
    };
    let Some(dest) =
        required_column(caps, table, &["destination", "goto"], &mut out.warnings)
    else {
        return out;
    };
    let cid = optional_column(caps, table, &["cidnum", "cid"], &mut out.warnings);
    let label = optional_column(caps, table, &["description", "descr"], &mut out.warnings);

    let sql = format!("SELECT {did}, {cid}, {dest}, {label} FROM `{table}` ORDER BY {did}");
    for row in query_or_degrade(runner, table, &sql, &mut out.warnings) {
        let Some(row) = sized_row(table, row, 4, &mut out.warnings) else {
            continue;
        };
        out.rows.push(InboundRoute {
            did: row[0].trim().to_string(),
            caller_id_filter: row[1].trim().to_string(),
            destination: row[2].trim().to_string(),
            label: row[3].trim().to_string(),
        });
    }

    // The DID is the route identity; on duplicates the first row wins.
    out.rows = dedup_by_key(table, out.rows, |r| &r.did, &mut out.warnings);
    out
}
