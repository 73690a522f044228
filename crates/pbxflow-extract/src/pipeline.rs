//! The extraction pipeline: probe, fan out sub-extractors, assemble.

use std::path::Path;
use std::time::Instant;

use pbxflow_core::config::FlowConfig;
use pbxflow_core::errors::{PipelineError, StoreError};
use pbxflow_core::snapshot::{self, Meta, Snapshot};

use crate::client::SqlRunner;
use crate::extractors::{
    extract_announcements, extract_extensions, extract_inbound_routes, extract_ivr,
    extract_meta, extract_outbound_routes, extract_queues, extract_recordings,
    extract_ring_groups, extract_time_conditions, extract_time_groups, extract_trunks,
};
use crate::probe::SchemaCapabilities;
use crate::report::{ExtractReport, Extraction};

/// Run a full extraction against the connected store.
///
/// The schema probe is the only fatal step; after it, every sub-extractor
/// degrades locally and the run always produces a snapshot. Sub-extractors
/// are independent and write into disjoint output slots, so they fan out
/// onto worker threads when `extract.parallel` is set.
pub fn extract_snapshot(
    runner: &dyn SqlRunner,
    config: &FlowConfig,
) -> Result<ExtractReport, StoreError> {
    let start = Instant::now();
    let caps = SchemaCapabilities::probe(runner)?;
    let parallel = config.extract.effective_parallel();
    tracing::info!(tables = caps.table_count(), parallel, "extraction run started");

    let mut inbound = Extraction::default();
    let mut ring_groups = Extraction::default();
    let mut queues = Extraction::default();
    let mut ivr = (Extraction::default(), Extraction::default());
    let mut time_conditions = Extraction::default();
    let mut time_groups = Extraction::default();
    let mut announcements = Extraction::default();
    let mut extensions = Extraction::default();
    let mut recordings = Extraction::default();
    let mut trunks = Extraction::default();
    let mut outbound = Extraction::default();

    if parallel {
        rayon::scope(|s| {
            s.spawn(|_| inbound = extract_inbound_routes(runner, &caps));
            s.spawn(|_| ring_groups = extract_ring_groups(runner, &caps));
            s.spawn(|_| queues = extract_queues(runner, &caps));
            s.spawn(|_| ivr = extract_ivr(runner, &caps));
            s.spawn(|_| time_conditions = extract_time_conditions(runner, &caps));
            s.spawn(|_| time_groups = extract_time_groups(runner, &caps));
            s.spawn(|_| announcements = extract_announcements(runner, &caps));
            s.spawn(|_| extensions = extract_extensions(runner, &caps));
            s.spawn(|_| recordings = extract_recordings(runner, &caps));
            s.spawn(|_| trunks = extract_trunks(runner, &caps));
            s.spawn(|_| outbound = extract_outbound_routes(runner, &caps));
        });
    } else {
        inbound = extract_inbound_routes(runner, &caps);
        ring_groups = extract_ring_groups(runner, &caps);
        queues = extract_queues(runner, &caps);
        ivr = extract_ivr(runner, &caps);
        time_conditions = extract_time_conditions(runner, &caps);
        time_groups = extract_time_groups(runner, &caps);
        announcements = extract_announcements(runner, &caps);
        extensions = extract_extensions(runner, &caps);
        recordings = extract_recordings(runner, &caps);
        trunks = extract_trunks(runner, &caps);
        outbound = extract_outbound_routes(runner, &caps);
    }

    let (ivr_menus, ivr_options) = ivr;
    let mut warnings = Vec::new();
    let mut snapshot = Snapshot::new(Meta::default());

    snapshot.inbound_routes = take(inbound, &mut warnings);
    snapshot.ring_groups = take(ring_groups, &mut warnings);
    snapshot.queues = take(queues, &mut warnings);
    snapshot.ivr_menus = take(ivr_menus, &mut warnings);
    snapshot.ivr_options = take(ivr_options, &mut warnings);
    snapshot.time_conditions = take(time_conditions, &mut warnings);
    snapshot.time_groups = take(time_groups, &mut warnings);
    snapshot.announcements = take(announcements, &mut warnings);
    snapshot.extensions = take(extensions, &mut warnings);
    snapshot.recordings = take(recordings, &mut warnings);
    snapshot.trunks = take(trunks, &mut warnings);
    snapshot.outbound_routes = take(outbound, &mut warnings);

    snapshot.meta = extract_meta(runner, &caps, &mut warnings);

    let duration_ms = start.elapsed().as_millis() as u64;
    tracing::info!(
        entities = snapshot.entity_count(),
        warnings = warnings.len(),
        duration_ms,
        "extraction run complete"
    );

    Ok(ExtractReport {
        snapshot,
        warnings,
        duration_ms,
    })
}

/// Move one sub-extractor's rows out, folding its warnings into the run.
fn take<T>(
    extraction: Extraction<T>,
    warnings: &mut Vec<crate::report::ExtractWarning>,
) -> Vec<T> {
    let (rows, mut w) = extraction.into_parts();
    warnings.append(&mut w);
    rows
}

/// Extract and persist the snapshot document in one step.
pub fn extract_to_path(
    runner: &dyn SqlRunner,
    config: &FlowConfig,
    path: &Path,
) -> Result<ExtractReport, PipelineError> {
    let report = extract_snapshot(runner, config)?;
    snapshot::save_to_path(&report.snapshot, path)?;
    tracing::info!(path = %path.display(), "snapshot written");
    Ok(report)
}
