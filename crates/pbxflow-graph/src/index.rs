//! Snapshot lookup index.
//!
//! Built once per graph build so destination resolution is a hash lookup
//! rather than a scan per traversal step.

use pbxflow_core::snapshot::{
    Announcement, Extension, InboundRoute, IvrMenu, IvrOption, OutboundRoute, Queue, RingGroup,
    Snapshot, TimeCondition, Trunk,
};
use pbxflow_core::types::collections::FxHashMap;

/// Borrowed views into one snapshot, keyed by entity id.
pub struct SnapshotIndex<'a> {
    routes_by_did: FxHashMap<&'a str, &'a InboundRoute>,
    ring_groups: FxHashMap<&'a str, &'a RingGroup>,
    queues: FxHashMap<&'a str, &'a Queue>,
    ivr_menus: FxHashMap<&'a str, &'a IvrMenu>,
    options_by_ivr: FxHashMap<&'a str, Vec<&'a IvrOption>>,
    time_conditions: FxHashMap<&'a str, &'a TimeCondition>,
    announcements: FxHashMap<&'a str, &'a Announcement>,
    extensions: FxHashMap<&'a str, &'a Extension>,
    trunks: FxHashMap<&'a str, &'a Trunk>,
    outbound_routes: FxHashMap<&'a str, &'a OutboundRoute>,
}

impl<'a> SnapshotIndex<'a> {
    pub fn build(snapshot: &'a Snapshot) -> Self {
        let mut options_by_ivr: FxHashMap<&str, Vec<&IvrOption>> = FxHashMap::default();
        for option in &snapshot.ivr_options {
            options_by_ivr
                .entry(option.ivr_id.as_str())
                .or_default()
                .push(option);
        }
        // Deterministic branch order: digits, then *, #, timeout, invalid.
        for options in options_by_ivr.values_mut() {
            options.sort_by_key(|o| selection_rank(&o.selection));
        }

        Self {
            routes_by_did: snapshot
                .inbound_routes
                .iter()
                .map(|r| (r.did.as_str(), r))
                .collect(),
            ring_groups: snapshot
                .ring_groups
                .iter()
                .map(|g| (g.group_id.as_str(), g))
                .collect(),
            queues: snapshot
                .queues
                .iter()
                .map(|q| (q.queue_id.as_str(), q))
                .collect(),
            ivr_menus: snapshot
                .ivr_menus
                .iter()
                .map(|m| (m.ivr_id.as_str(), m))
                .collect(),
            options_by_ivr,
            time_conditions: snapshot
                .time_conditions
                .iter()
                .map(|t| (t.id.as_str(), t))
                .collect(),
            announcements: snapshot
                .announcements
                .iter()
                .map(|a| (a.id.as_str(), a))
                .collect(),
            extensions: snapshot
                .extensions
                .iter()
                .map(|e| (e.number.as_str(), e))
                .collect(),
            trunks: snapshot.trunks.iter().map(|t| (t.id.as_str(), t)).collect(),
            outbound_routes: snapshot
                .outbound_routes
                .iter()
                .map(|r| (r.id.as_str(), r))
                .collect(),
        }
    }

    /// Entry-point match: exact DID first, then the catch-all route with an
    /// empty DID.
    pub fn route_for_did(&self, did: &str) -> Option<&'a InboundRoute> {
        self.routes_by_did
            .get(did)
            .or_else(|| self.routes_by_did.get(""))
            .copied()
    }

    pub fn ring_group(&self, id: &str) -> Option<&'a RingGroup> {
        self.ring_groups.get(id).copied()
    }

    pub fn queue(&self, id: &str) -> Option<&'a Queue> {
        self.queues.get(id).copied()
    }

    pub fn ivr_menu(&self, id: &str) -> Option<&'a IvrMenu> {
        self.ivr_menus.get(id).copied()
    }

    /// Options of one menu, in deterministic selection order.
    pub fn ivr_options(&self, ivr_id: &str) -> &[&'a IvrOption] {
        self.options_by_ivr
            .get(ivr_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn time_condition(&self, id: &str) -> Option<&'a TimeCondition> {
        self.time_conditions.get(id).copied()
    }

    pub fn announcement(&self, id: &str) -> Option<&'a Announcement> {
        self.announcements.get(id).copied()
    }

    pub fn extension(&self, number: &str) -> Option<&'a Extension> {
        self.extensions.get(number).copied()
    }

    pub fn trunk(&self, id: &str) -> Option<&'a Trunk> {
        self.trunks.get(id).copied()
    }

    pub fn outbound_route(&self, id: &str) -> Option<&'a OutboundRoute> {
        self.outbound_routes.get(id).copied()
    }
}

/// Sort rank for IVR selections: `0`-`9`, `*`, `#`, `t`, `i`, then
/// anything unexpected lexicographically last.
fn selection_rank(selection: &str) -> (u8, String) {
    let rank = match selection {
        s if s.len() == 1 && s.as_bytes()[0].is_ascii_digit() => s.as_bytes()[0] - b'0',
        "*" => 10,
        "#" => 11,
        "t" => 12,
        "i" => 13,
        _ => 14,
    };
    (rank, selection.to_string())
}

#[cfg(test)]
mod tests {
    use super::selection_rank;

    #[test]
    fn selections_order_digits_first() {
        let mut sels = vec!["t", "#", "2", "i", "*", "0"];
        sels.sort_by_key(|s| selection_rank(s));
        assert_eq!(sels, vec!["0", "2", "*", "#", "t", "i"]);
    }
}
