//! Ring group extraction.

use pbxflow_core::snapshot::RingGroup;

use super::{
    dedup_by_key, optional_column, parse_u32, query_or_degrade, required_column, sized_row,
};
use crate::client::SqlRunner;
use crate::probe::SchemaCapabilities;
use crate::report::{ExtractWarning, Extraction};

const TABLES: &[&str] = &["ringgroups", "ring_groups"];

pub fn extract_ring_groups(
    runner: &dyn SqlRunner,
    caps: &SchemaCapabilities,
) -> Extraction<RingGroup> {
    let Some(table) = caps.first_existing_table(TABLES) else {
        return Extraction::degraded(ExtractWarning::TableMissing {
            entity: "ring groups",
            candidates: TABLES.join(", "),
        });
    };

    let mut out = Extraction::default();
    let Some(id) = required_column(caps, table, &["grpnum", "group_id"], &mut out.warnings)
    else {
        return out;
    };
    let label = optional_column(caps, table, &["description", "descr"], &mut out.warnings);
    let members = optional_column(caps, table, &["grplist", "members"], &mut out.warnings);
    let strategy = optional_column(caps, table, &["strategy"], &mut out.warnings);
    let ring_time = optional_column(caps, table, &["grptime", "ringtime"], &mut out.warnings);
    // Older revisions have no fallback column at all; the branch then
    // simply has no edge in the graph.
    let dest = optional_column(caps, table, &["postdest", "dest"], &mut out.warnings);

    let sql = format!(
        "SELECT {id}, {label}, {members}, {strategy}, {ring_time}, {dest} \
         FROM `{table}` ORDER BY {id}"
    );
    for row in query_or_degrade(runner, table, &sql, &mut out.warnings) {
        let Some(row) = sized_row(table, row, 6, &mut out.warnings) else {
            continue;
        };
        out.rows.push(RingGroup {
            group_id: row[0].trim().to_string(),
            label: row[1].trim().to_string(),
            members: split_member_list(&row[2]),
            strategy: row[3].trim().to_string(),
            ring_seconds: parse_u32(&row[4]),
            destination: row[5].trim().to_string(),
        });
    }

    out.rows = dedup_by_key(table, out.rows, |r| &r.group_id, &mut out.warnings);
    out
}

/// Member lists are stored as one `-`-separated string (`4220-4221-4230`).
fn split_member_list(list: &str) -> Vec<String> {
    list.trim()
        .split('-')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}
