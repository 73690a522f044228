//! Time condition extraction.

use pbxflow_core::snapshot::TimeCondition;

use super::{dedup_by_key, optional_column, query_or_degrade, required_column, sized_row};
use crate::client::SqlRunner;
use crate::probe::SchemaCapabilities;
use crate::report::{ExtractWarning, Extraction};

const TABLES: &[&str] = &["timeconditions", "time_conditions"];

pub fn extract_time_conditions(
    runner: &dyn SqlRunner,
    caps: &SchemaCapabilities,
) -> Extraction<TimeCondition> {
    let Some(table) = caps.first_existing_table(TABLES) else {
        return Extraction::degraded(ExtractWarning::TableMissing {
            entity: "time conditions",
            candidates: TABLES.join(", "),
        });
    };

    let mut out = Extraction::default();
    let Some(id) = required_column(caps, table, &["timeconditions_id", "id"], &mut out.warnings)
    else {
        return out;
    };
    let Some(dest_true) =
        required_column(caps, table, &["truegoto", "destination_true"], &mut out.warnings)
    else {
        return out;
    };
    let Some(dest_false) =
        required_column(caps, table, &["falsegoto", "destination_false"], &mut out.warnings)
    else {
        return out;
    };
    let label = optional_column(caps, table, &["displayname", "description"], &mut out.warnings);
    let group = optional_column(caps, table, &["time", "timegroupid"], &mut out.warnings);

    let sql = format!(
        "SELECT {id}, {label}, {group}, {dest_true}, {dest_false} \
         FROM `{table}` ORDER BY {id}"
    );
    for row in query_or_degrade(runner, table, &sql, &mut out.warnings) {
        let Some(row) = sized_row(table, row, 5, &mut out.warnings) else {
            continue;
        };
        out.rows.push(TimeCondition {
            id: row[0].trim().to_string(),
            label: row[1].trim().to_string(),
            time_group_id: row[2].trim().to_string(),
            destination_true: row[3].trim().to_string(),
            destination_false: row[4].trim().to_string(),
        });
    }

    out.rows = dedup_by_key(table, out.rows, |t| &t.id, &mut out.warnings);
    out
}
