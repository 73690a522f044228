//! Outbound route extraction.
//!
//! Dial patterns and the trunk ordering are secondary lookups merged by
//! route id. The trunk sequence keeps its configured order via the
//! sequence column when the revision has one.

use pbxflow_core::snapshot::OutboundRoute;
use pbxflow_core::types::collections::FxHashMap;

use super::{dedup_by_key, optional_column, query_or_degrade, required_column, sized_row};
use crate::client::SqlRunner;
use crate::probe::SchemaCapabilities;
use crate::report::{ExtractWarning, Extraction};

const TABLES: &[&str] = &["outbound_routes", "outroutes"];
const PATTERN_TABLES: &[&str] = &["outbound_route_patterns", "outroute_patterns"];
const TRUNK_TABLES: &[&str] = &["outbound_route_trunks", "outroute_trunks"];

pub fn extract_outbound_routes(
    runner: &dyn SqlRunner,
    caps: &SchemaCapabilities,
) -> Extraction<OutboundRoute> {
    let Some(table) = caps.first_existing_table(TABLES) else {
        return Extraction::degraded(ExtractWarning::TableMissing {
            entity: "outbound routes",
            candidates: TABLES.join(", "),
        });
    };

    let mut out = Extraction::default();
    let Some(id) = required_column(caps, table, &["route_id", "id"], &mut out.warnings) else {
        return out;
    };
    let label = optional_column(caps, table, &["name", "description"], &mut out.warnings);

    let sql = format!("SELECT {id}, {label} FROM `{table}` ORDER BY {id}");
    for row in query_or_degrade(runner, table, &sql, &mut out.warnings) {
        let Some(row) = sized_row(table, row, 2, &mut out.warnings) else {
            continue;
        };
        out.rows.push(OutboundRoute {
            id: row[0].trim().to_string(),
            label: row[1].trim().to_string(),
            patterns: Vec::new(),
            trunk_sequence: Vec::new(),
        });
    }
    out.rows = dedup_by_key(table, out.rows, |r| &r.id, &mut out.warnings);

    merge_patterns(runner, caps, &mut out);
    merge_trunks(runner, caps, &mut out);
    out
}

fn merge_patterns(
    runner: &dyn SqlRunner,
    caps: &SchemaCapabilities,
    out: &mut Extraction<OutboundRoute>,
) {
    let Some(table) = caps.first_existing_table(PATTERN_TABLES) else {
        out.warnings.push(ExtractWarning::TableMissing {
            entity: "outbound route patterns",
            candidates: PATTERN_TABLES.join(", "),
        });
        return;
    };
    let Some(id) = required_column(caps, table, &["route_id"], &mut out.warnings) else {
        return;
    };
    let Some(pattern) =
        required_column(caps, table, &["match_pattern_pass", "pattern"], &mut out.warnings)
    else {
        return;
    };
    let prefix =
        optional_column(caps, table, &["match_pattern_prefix", "prefix"], &mut out.warnings);

    let mut by_id: FxHashMap<String, &mut OutboundRoute> = out
        .rows
        .iter_mut()
        .map(|r| (r.id.clone(), r))
        .collect();

    let sql = format!("SELECT {id}, {pattern}, {prefix} FROM `{table}` ORDER BY {id}");
    let mut orphans = 0usize;
    for row in query_or_degrade(runner, table, &sql, &mut out.warnings) {
        let Some(row) = sized_row(table, row, 3, &mut out.warnings) else {
            continue;
        };
        match by_id.get_mut(row[0].trim()) {
            Some(route) => route.patterns.push(display_pattern(&row[1], &row[2])),
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

fn merge_trunks(
    runner: &dyn SqlRunner,
    caps: &SchemaCapabilities,
    out: &mut Extraction<OutboundRoute>,
) {
    let Some(table) = caps.first_existing_table(TRUNK_TABLES) else {
        out.warnings.push(ExtractWarning::TableMissing {
            entity: "outbound route trunks",
            candidates: TRUNK_TABLES.join(", "),
        });
        return;
    };
    let Some(id) = required_column(caps, table, &["route_id"], &mut out.warnings) else {
        return;
    };
    let Some(trunk) = required_column(caps, table, &["trunk_id"], &mut out.warnings) else {
        return;
    };

    let order = match caps.first_existing_column(table, &["seq", "sequence"]) {
        Some(col) => format!("{id}, `{col}`"),
        None => id.clone(),
    };

    let mut by_id: FxHashMap<String, &mut OutboundRoute> = out
        .rows
        .iter_mut()
        .map(|r| (r.id.clone(), r))
        .collect();

    let sql = format!("SELECT {id}, {trunk} FROM `{table}` ORDER BY {order}");
    let mut orphans = 0usize;
    for row in query_or_degrade(runner, table, &sql, &mut out.warnings) {
        let Some(row) = sized_row(table, row, 2, &mut out.warnings) else {
            continue;
        };
        match by_id.get_mut(row[0].trim()) {
            Some(route) => route.trunk_sequence.push(row[1].trim().to_string()),
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

/// Render prefix and pass pattern the way dialplan docs write them:
/// `9|NXXNXXXXXX` strips the 9 before matching the rest.
fn display_pattern(pass: &str, prefix: &str) -> String {
    let pass = pass.trim();
    let prefix = prefix.trim();
    if prefix.is_empty() {
        pass.to_string()
    } else {
        format!("{prefix}|{pass}")
    }
}
