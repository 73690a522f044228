//! Run provenance.

use std::time::{SystemTime, UNIX_EPOCH};

use pbxflow_core::snapshot::Meta;

use crate::client::SqlRunner;
use crate::probe::SchemaCapabilities;
use crate::report::ExtractWarning;

/// Collect snapshot provenance. Every lookup degrades to an empty string;
/// provenance must never fail a run that already has data.
pub fn extract_meta(
    runner: &dyn SqlRunner,
    caps: &SchemaCapabilities,
    warnings: &mut Vec<ExtractWarning>,
) -> Meta {
    Meta {
        hostname: scalar(runner, "SELECT @@hostname"),
        store_version: scalar(runner, "SELECT VERSION()"),
        pbx_version: pbx_version(runner, caps, warnings),
        generated_at_utc: now_epoch_secs(),
    }
}

/// The PBX records its own version as a key/value row in the admin table.
fn pbx_version(
    runner: &dyn SqlRunner,
    caps: &SchemaCapabilities,
    warnings: &mut Vec<ExtractWarning>,
) -> String {
    if !caps.has_table("admin") {
        warnings.push(ExtractWarning::TableMissing {
            entity: "PBX version",
            candidates: "admin".to_string(),
        });
        return String::new();
    }
    scalar(runner, "SELECT `value` FROM `admin` WHERE `variable` = 'version'")
}

/// First field of the first row, or empty.
fn scalar(runner: &dyn SqlRunner, sql: &str) -> String {
    match runner.run(sql) {
        Ok(rows) => rows
            .first()
            .and_then(|r| r.first())
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
        Err(_) => String::new(),
    }
}

fn now_epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
