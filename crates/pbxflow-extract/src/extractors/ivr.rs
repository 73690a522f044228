//! IVR menu and option extraction.
//!
//! Menus and their caller selections are separate snapshot collections;
//! both come from this extractor because the option rows are keyed by
//! menu id and orphan detection needs the menu set.

use pbxflow_core::snapshot::{IvrMenu, IvrOption};
use pbxflow_core::types::collections::FxHashSet;

use super::{dedup_by_key, optional_column, query_or_degrade, required_column, sized_row};
use crate::client::SqlRunner;
use crate::probe::SchemaCapabilities;
use crate::report::{ExtractWarning, Extraction};

const MENU_TABLES: &[&str] = &["ivr_details", "ivr"];
const OPTION_TABLES: &[&str] = &["ivr_entries", "ivr_dests"];

pub fn extract_ivr(
    runner: &dyn SqlRunner,
    caps: &SchemaCapabilities,
) -> (Extraction<IvrMenu>, Extraction<IvrOption>) {
    let menus = extract_menus(runner, caps);
    let options = extract_options(runner, caps, &menus.rows);
    (menus, options)
}

fn extract_menus(runner: &dyn SqlRunner, caps: &SchemaCapabilities) -> Extraction<IvrMenu> {
    let Some(table) = caps.first_existing_table(MENU_TABLES) else {
        return Extraction::degraded(ExtractWarning::TableMissing {
            entity: "IVR menus",
            candidates: MENU_TABLES.join(", "),
        });
    };

    let mut out = Extraction::default();
    let Some(id) = required_column(caps, table, &["id", "ivr_id"], &mut out.warnings) else {
        return out;
    };
    let label = optional_column(caps, table, &["name", "displayname"], &mut out.warnings);
    let announcement =
        optional_column(caps, table, &["announcement", "announcement_id"], &mut out.warnings);

    let sql = format!("SELECT {id}, {label}, {announcement} FROM `{table}` ORDER BY {id}");
    for row in query_or_degrade(runner, table, &sql, &mut out.warnings) {
        let Some(row) = sized_row(table, row, 3, &mut out.warnings) else {
            continue;
        };
        out.rows.push(IvrMenu {
            ivr_id: row[0].trim().to_string(),
            label: row[1].trim().to_string(),
            announcement_id: row[2].trim().to_string(),
        });
    }

    out.rows = dedup_by_key(table, out.rows, |m| &m.ivr_id, &mut out.warnings);
    out
}

fn extract_options(
    runner: &dyn SqlRunner,
    caps: &SchemaCapabilities,
    menus: &[IvrMenu],
) -> Extraction<IvrOption> {
    let Some(table) = caps.first_existing_table(OPTION_TABLES) else {
        return Extraction::degraded(ExtractWarning::TableMissing {
            entity: "IVR options",
            candidates: OPTION_TABLES.join(", "),
        });
    };

    let mut out = Extraction::default();
    let Some(id) = required_column(caps, table, &["ivr_id"], &mut out.warnings) else {
        return out;
    };
    let Some(selection) =
        required_column(caps, table, &["selection", "ext"], &mut out.warnings)
    else {
        return out;
    };
    let Some(dest) = required_column(caps, table, &["dest", "destination"], &mut out.warnings)
    else {
        return out;
    };

    let known: FxHashSet<&str> = menus.iter().map(|m| m.ivr_id.as_str()).collect();

    let sql = format!("SELECT {id}, {selection}, {dest} FROM `{table}` ORDER BY {id}, {selection}");
    let mut orphans = 0usize;
    for row in query_or_degrade(runner, table, &sql, &mut out.warnings) {
        let Some(row) = sized_row(table, row, 3, &mut out.warnings) else {
            continue;
        };
        let ivr_id = row[0].trim();
        if !known.contains(ivr_id) {
            orphans += 1;
            continue;
        }
        out.rows.push(IvrOption {
            ivr_id: ivr_id.to_string(),
            selection: row[1].trim().to_string(),
            destination: row[2].trim().to_string(),
        });
    }
    if orphans > 0 {
        out.warnings.push(ExtractWarning::OrphanedRows {
            table: table.to_string(),
            count: orphans,
        });
    }
    out
}
