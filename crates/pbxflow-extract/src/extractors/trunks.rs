//! Trunk extraction.

use pbxflow_core::snapshot::Trunk;

use super::{
    dedup_by_key, optional_column, parse_flag, parse_u32, query_or_degrade, required_column,
    sized_row,
};
use crate::client::SqlRunner;
use crate::probe::SchemaCapabilities;
use crate::report::{ExtractWarning, Extraction};

const TABLES: &[&str] = &["trunks"];

pub fn extract_trunks(runner: &dyn SqlRunner, caps: &SchemaCapabilities) -> Extraction<Trunk> {
    let Some(table) = caps.first_existing_table(TABLES) else {
        return Extraction::degraded(ExtractWarning::TableMissing {
            entity: "trunks",
            candidates: TABLES.join(", "),
        });
    };

    let mut out = Extraction::default();
    let Some(id) = required_column(caps, table, &["trunkid", "trunk_id"], &mut out.warnings)
    else {
        return out;
    };
    let label = optional_column(caps, table, &["name", "description"], &mut out.warnings);
    let tech = optional_column(caps, table, &["tech", "technology"], &mut out.warnings);
    let channel = optional_column(caps, table, &["channelid", "channel_id"], &mut out.warnings);
    let maxchans = optional_column(caps, table, &["maxchans", "max_channels"], &mut out.warnings);
    let disabled = optional_column(caps, table, &["disabled"], &mut out.warnings);

    let sql = format!(
        "SELECT {id}, {label}, {tech}, {channel}, {maxchans}, {disabled} \
         FROM `{table}` ORDER BY {id}"
    );
    for row in query_or_degrade(runner, table, &sql, &mut out.warnings) {
        let Some(row) = sized_row(table, row, 6, &mut out.warnings) else {
            continue;
        };
        out.rows.push(Trunk {
            id: row[0].trim().to_string(),
            label: row[1].trim().to_string(),
            technology: row[2].trim().to_ascii_lowercase(),
            channel_id: row[3].trim().to_string(),
            max_channels: parse_u32(&row[4]),
            disabled: parse_flag(&row[5]),
        });
    }

    out.rows = dedup_by_key(table, out.rows, |t| &t.id, &mut out.warnings);
    out
}
