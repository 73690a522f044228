//! Time group extraction.
//!
//! Schedule rules are opaque to the engine; they ride along for the
//! renderer and for operators reading the snapshot directly.

use pbxflow_core::snapshot::TimeGroup;
use pbxflow_core::types::collections::FxHashMap;

use super::{dedup_by_key, query_or_degrade, required_column, sized_row};
use crate::client::SqlRunner;
use crate::probe::SchemaCapabilities;
use crate::report::{ExtractWarning, Extraction};

const GROUP_TABLES: &[&str] = &["timegroups_groups", "timegroups"];
const RULE_TABLES: &[&str] = &["timegroups_details", "timegroup_rules"];

pub fn extract_time_groups(
    runner: &dyn SqlRunner,
    caps: &SchemaCapabilities,
) -> Extraction<TimeGroup> {
    let Some(table) = caps.first_existing_table(GROUP_TABLES) else {
        return Extraction::degraded(ExtractWarning::TableMissing {
            entity: "time groups",
            candidates: GROUP_TABLES.join(", "),
        });
    };

    let mut out = Extraction::default();
    let Some(id) = required_column(caps, table, &["id", "timegroupid"], &mut out.warnings)
    else {
        return out;
    };

    let sql = format!("SELECT {id} FROM `{table}` ORDER BY {id}");
    for row in query_or_degrade(runner, table, &sql, &mut out.warnings) {
        let Some(row) = sized_row(table, row, 1, &mut out.warnings) else {
            continue;
        };
        out.rows.push(TimeGroup {
            id: row[0].trim().to_string(),
            rules: Vec::new(),
        });
    }
    out.rows = dedup_by_key(table, out.rows, |g| &g.id, &mut out.warnings);

    merge_rules(runner, caps, &mut out);
    out
}

fn merge_rules(runner: &dyn SqlRunner, caps: &SchemaCapabilities, out: &mut Extraction<TimeGroup>) {
    let Some(table) = caps.first_existing_table(RULE_TABLES) else {
        out.warnings.push(ExtractWarning::TableMissing {
            entity: "time group rules",
            candidates: RULE_TABLES.join(", "),
        });
        return;
    };
    let Some(id) = required_column(caps, table, &["timegroupid", "id"], &mut out.warnings)
    else {
        return;
    };
    let Some(rule) = required_column(caps, table, &["time", "rule"], &mut out.warnings) else {
        return;
    };

    let mut by_id: FxHashMap<String, &mut TimeGroup> = out
        .rows
        .iter_mut()
        .map(|g| (g.id.clone(), g))
        .collect();

    let sql = format!("SELECT {id}, {rule} FROM `{table}` ORDER BY {id}");
    let mut orphans = 0usize;
    for row in query_or_degrade(runner, table, &sql, &mut out.warnings) {
        let Some(row) = sized_row(table, row, 2, &mut out.warnings) else {
            continue;
        };
        match by_id.get_mut(row[0].trim()) {
            Some(group) => group.rules.push(row[1].trim().to_string()),
            None => orphans += 1,
        }
    }
    if orphans > 0 {
        out.warnings.push(ExtractWarning::OrphanedRows {
            table: table.to_string(),
            count: orphans,
        });
    }
}
