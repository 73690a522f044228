//! Snapshot document round-trip and compatibility tests.

use pbxflow_core::snapshot::{
    self, Announcement, Extension, InboundRoute, IvrMenu, IvrOption, Meta, OutboundRoute,
    Queue, Recording, RingGroup, Snapshot, TimeCondition, TimeGroup, Trunk, FORMAT_VERSION,
};

fn sample_snapshot() -> Snapshot {
    let mut s = Snapshot::new(Meta {
        hostname: "pbx01".to_string(),
        store_version: "5.5.68".to_string(),
        pbx_version: "2.11.0".to_string(),
        generated_at_utc: 1_754_500_000,
    });
    s.inbound_routes.push(InboundRoute {
        did: "2485551234".to_string(),
        caller_id_filter: String::new(),
        destination: "ivr-7,s,".to_string(),
        label: "Main line".to_string(),
    });
    s.ring_groups.push(RingGroup {
        group_id: "600".to_string(),
        label: "Support".to_string(),
        members: vec!["4220".to_string(), "4221".to_string()],
        strategy: "ringall".to_string(),
        ring_seconds: 20,
        destination: "ext-queues,300,1".to_string(),
    });
    s.queues.push(Queue {
        queue_id: "300".to_string(),
        label: "Support queue".to_string(),
        strategy: "leastrecent".to_string(),
        timeout_seconds: 120,
        static_members: vec!["4220".to_string()],
        dynamic_members: vec!["4230".to_string()],
        destination: "app-blackhole,hangup,1".to_string(),
    });
    s.ivr_menus.push(IvrMenu {
        ivr_id: "7".to_string(),
        label: "Day menu".to_string(),
        announcement_id: "2".to_string(),
    });
    s.ivr_options.push(IvrOption {
        ivr_id: "7".to_string(),
        selection: "1".to_string(),
        destination: "ext-local,4220,1".to_string(),
    });
    s.time_conditions.push(TimeCondition {
        id: "3".to_string(),
        label: "Office hours".to_string(),
        time_group_id: "1".to_string(),
        destination_true: "ext-group,600,".to_string(),
        destination_false: "app-blackhole,hangup,1".to_string(),
    });
    s.time_groups.push(TimeGroup {
        id: "1".to_string(),
        rules: vec!["09:00-17:00|mon-fri|*|*".to_string()],
    });
    s.announcements.push(Announcement {
        id: "2".to_string(),
        label: "Welcome".to_string(),
        post_destination: "ivr-7,s,".to_string(),
    });
    s.extensions.push(Extension {
        number: "4220".to_string(),
        label: "Front desk".to_string(),
    });
    s.recordings.push(Recording {
        id: "5".to_string(),
        label: "welcome-prompt".to_string(),
        filename: "custom/welcome".to_string(),
    });
    s.trunks.push(Trunk {
        id: "2".to_string(),
        label: "Carrier A".to_string(),
        technology: "sip".to_string(),
        channel_id: "carrier-a".to_string(),
        max_channels: 23,
        disabled: false,
    });
    s.outbound_routes.push(OutboundRoute {
        id: "1".to_string(),
        label: "Local calls".to_string(),
        patterns: vec!["NXXNXXXXXX".to_string()],
        trunk_sequence: vec!["2".to_string()],
    });
    s
}

#[test]
fn round_trip_is_structurally_equal() {
    let original = sample_snapshot();
    let bytes = snapshot::to_json_bytes(&original).unwrap();
    let loaded = snapshot::from_json_bytes(&bytes).unwrap();
    assert_eq!(original, loaded);
}

#[test]
fn save_and_load_through_the_filesystem() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("snapshot.json");

    let original = sample_snapshot();
    snapshot::save_to_path(&original, &path).unwrap();
    let loaded = snapshot::load_from_path(&path).unwrap();
    assert_eq!(original, loaded);
}

#[test]
fn unknown_fields_are_ignored_on_read() {
    // A document from a future build that added optional fields.
    let json = format!(
        r#"{{
            "format_version": {FORMAT_VERSION},
            "meta": {{ "hostname": "pbx01", "some_new_field": 42 }},
            "inbound_routes": [
                {{ "did": "100", "destination": "ext-local,4220,1", "novel": true }}
            ]
        }}"#
    );
    let snapshot = snapshot::from_json_bytes(json.as_bytes()).unwrap();
    assert_eq!(snapshot.meta.hostname, "pbx01");
    assert_eq!(snapshot.inbound_routes.len(), 1);
    assert_eq!(snapshot.inbound_routes[0].did, "100");
    // Collections the document omits default to empty.
    assert!(snapshot.queues.is_empty());
}

#[test]
fn newer_format_version_is_rejected() {
    let json = format!(r#"{{ "format_version": {} }}"#, FORMAT_VERSION + 1);
    let err = snapshot::from_json_bytes(json.as_bytes()).unwrap_err();
    assert!(matches!(
        err,
        pbxflow_core::SnapshotError::UnsupportedVersion { .. }
    ));
}

#[test]
fn garbage_bytes_are_a_decode_error() {
    let err = snapshot::from_json_bytes(b"not json at all").unwrap_err();
    assert!(matches!(
        err,
        pbxflow_core::SnapshotError::DecodeFailed { .. }
    ));
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = snapshot::load_from_path(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, pbxflow_core::SnapshotError::ReadFailed { .. }));
}
