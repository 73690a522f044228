//! Queue extraction.
//!
//! Queues are split across tables in every revision: the primary table
//! holds identity and the fallback destination, a keyword/data detail
//! table holds strategy, timeout, and static agents, and dynamic agents
//! (when this installation tracks them in the store at all) live in their
//! own table. Both secondary lookups are merged by queue id; rows keyed
//! to a queue that does not exist are dropped and counted.

use pbxflow_core::snapshot::Queue;
use pbxflow_core::types::collections::FxHashMap;

use super::{
    dedup_by_key, optional_column, parse_u32, query_or_degrade, required_column, sized_row,
};
use crate::client::SqlRunner;
use crate::probe::SchemaCapabilities;
use crate::report::{ExtractWarning, Extraction};

const TABLES: &[&str] = &["queues_config", "queues"];
const DETAIL_TABLES: &[&str] = &["queues_details", "queue_details"];
const DYNAMIC_TABLES: &[&str] = &["queues_dynamic_members", "queue_agents"];

pub fn extract_queues(runner: &dyn SqlRunner, caps: &SchemaCapabilities) -> Extraction<Queue> {
    let Some(table) = caps.first_existing_table(TABLES) else {
        return Extraction::degraded(ExtractWarning::TableMissing {
            entity: "queues",
            candidates: TABLES.join(", "),
        });
    };

    let mut out = Extraction::default();
    let Some(id) = required_column(caps, table, &["extension", "queue_id"], &mut out.warnings)
    else {
        return out;
    };
    let label = optional_column(caps, table, &["descr", "description"], &mut out.warnings);
    let dest = optional_column(caps, table, &["dest", "destination"], &mut out.warnings);

    let sql = format!("SELECT {id}, {label}, {dest} FROM `{table}` ORDER BY {id}");
    for row in query_or_degrade(runner, table, &sql, &mut out.warnings) {
        let Some(row) = sized_row(table, row, 3, &mut out.warnings) else {
            continue;
        };
        out.rows.push(Queue {
            queue_id: row[0].trim().to_string(),
            label: row[1].trim().to_string(),
            strategy: String::new(),
            timeout_seconds: 0,
            static_members: Vec::new(),
            dynamic_members: Vec::new(),
            destination: row[2].trim().to_string(),
        });
    }
    out.rows = dedup_by_key(table, out.rows, |q| &q.queue_id, &mut out.warnings);

    merge_details(runner, caps, &mut out);
    merge_dynamic_members(runner, caps, &mut out);
    out
}

/// Fold the keyword/data detail rows into their queues.
fn merge_details(
    runner: &dyn SqlRunner,
    caps: &SchemaCapabilities,
    out: &mut Extraction<Queue>,
) {
    let Some(table) = caps.first_existing_table(DETAIL_TABLES) else {
        out.warnings.push(ExtractWarning::TableMissing {
            entity: "queue details",
            candidates: DETAIL_TABLES.join(", "),
        });
        return;
    };
    let Some(id) = required_column(caps, table, &["id", "queue_id"], &mut out.warnings) else {
        return;
    };
    let Some(keyword) = required_column(caps, table, &["keyword"], &mut out.warnings) else {
        return;
    };
    let Some(data) = required_column(caps, table, &["data"], &mut out.warnings) else {
        return;
    };

    let mut by_id: FxHashMap<String, &mut Queue> = out
        .rows
        .iter_mut()
        .map(|q| (q.queue_id.clone(), q))
        .collect();

    let sql = format!("SELECT {id}, {keyword}, {data} FROM `{table}` ORDER BY {id}");
    let mut orphans = 0usize;
    for row in query_or_degrade(runner, table, &sql, &mut out.warnings) {
        let Some(row) = sized_row(table, row, 3, &mut out.warnings) else {
            continue;
        };
        let Some(queue) = by_id.get_mut(row[0].trim()) else {
            orphans += 1;
            continue;
        };
        match row[1].trim() {
            "strategy" => queue.strategy = row[2].trim().to_string(),
            "timeout" => queue.timeout_seconds = parse_u32(&row[2]),
            "member" => queue.static_members.push(member_extension(&row[2])),
            _ => {}
        }
    }
    if orphans > 0 {
        out.warnings.push(ExtractWarning::OrphanedRows {
            table: table.to_string(),
            count: orphans,
        });
    }
}

/// Dynamic membership, resolved by key join rather than foreign key.
fn merge_dynamic_members(
    runner: &dyn SqlRunner,
    caps: &SchemaCapabilities,
    out: &mut Extraction<Queue>,
) {
    let Some(table) = caps.first_existing_table(DYNAMIC_TABLES) else {
        out.warnings.push(ExtractWarning::TableMissing {
            entity: "queue dynamic members",
            candidates: DYNAMIC_TABLES.join(", "),
        });
        return;
    };
    let Some(id) = required_column(caps, table, &["queue_id", "id"], &mut out.warnings) else {
        return;
    };
    let Some(member) = required_column(caps, table, &["member", "agent"], &mut out.warnings)
    else {
        return;
    };

    let mut by_id: FxHashMap<String, &mut Queue> = out
        .rows
        .iter_mut()
        .map(|q| (q.queue_id.clone(), q))
        .collect();

    let sql = format!("SELECT {id}, {member} FROM `{table}` ORDER BY {id}");
    let mut orphans = 0usize;
    for row in query_or_degrade(runner, table, &sql, &mut out.warnings) {
        let Some(row) = sized_row(table, row, 2, &mut out.warnings) else {
            continue;
        };
        match by_id.get_mut(row[0].trim()) {
            Some(queue) => queue.dynamic_members.push(row[1].trim().to_string()),
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

/// Static agents are stored as channel strings (`Local/4220@from-queue/n,0`);
/// reduce to the bare extension where the shape allows.
fn member_extension(data: &str) -> String {
    let data = data.trim();
    let Some(rest) = data.strip_prefix("Local/") else {
        return data.to_string();
    };
    match rest.split_once('@') {
        Some((ext, _)) if !ext.is_empty() => ext.to_string(),
        _ => data.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::member_extension;

    #[test]
    fn member_channel_reduces_to_extension() {
        assert_eq!(member_extension("Local/4220@from-queue/n,0"), "4220");
        assert_eq!(member_extension("SIP/carrier-out"), "SIP/carrier-out");
    }
}
