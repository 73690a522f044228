//! Tests for the destination-string decoder.

use pbxflow_core::dest::{decode, TargetKind};

#[test]
fn decodes_every_known_kind_token() {
    let cases = [
        ("ext-group,600,1", TargetKind::RingGroup, "600"),
        ("ext-queues,300,1", TargetKind::Queue, "300"),
        ("ivr-7,s,1", TargetKind::Ivr, "7"),
        ("timeconditions,3,truestate", TargetKind::TimeCondition, "3"),
        ("app-announcement-12,s,1", TargetKind::Announcement, "12"),
        ("ext-local,4220,1", TargetKind::Extension, "4220"),
        ("from-did-direct,4220,1", TargetKind::Extension, "4220"),
        ("outrt-5,s,1", TargetKind::OutboundRoute, "5"),
        ("ext-trunk,2,1", TargetKind::Trunk, "2"),
        ("app-blackhole,hangup,1", TargetKind::Hangup, "hangup"),
    ];
    for (raw, kind, id) in cases {
        let dest = decode(raw);
        assert_eq!(dest.kind, kind, "kind for {raw}");
        assert_eq!(dest.target_id, id, "id for {raw}");
        assert_eq!(dest.raw, raw);
    }
}

#[test]
fn trailing_empty_extra_field_is_accepted() {
    let dest = decode("ivr-7,s,");
    assert_eq!(dest.kind, TargetKind::Ivr);
    assert_eq!(dest.target_id, "7");
    assert_eq!(dest.sub_selector.as_deref(), Some("s"));
}

#[test]
fn voicemail_boxes_decode_from_extension_context() {
    let unavailable = decode("ext-local,vmu4220,1");
    assert_eq!(unavailable.kind, TargetKind::Voicemail);
    assert_eq!(unavailable.target_id, "4220");
    assert_eq!(unavailable.sub_selector.as_deref(), Some("u"));

    let busy = decode("ext-local,vmb4220,1");
    assert_eq!(busy.kind, TargetKind::Voicemail);
    assert_eq!(busy.sub_selector.as_deref(), Some("b"));

    let silent = decode("from-did-direct,vms4220,1");
    assert_eq!(silent.kind, TargetKind::Voicemail);
    assert_eq!(silent.sub_selector.as_deref(), Some("s"));
}

#[test]
fn sub_selector_carries_the_priority_field() {
    let dest = decode("ext-group,600,1");
    assert_eq!(dest.sub_selector.as_deref(), Some("1"));

    let dest = decode("ext-group,600,");
    assert_eq!(dest.sub_selector, None);
}

#[test]
fn malformed_inputs_decode_to_unknown() {
    for raw in ["", "   ", "ext-group", "ivr-7", "no-such-token,5,1", "just text"] {
        let dest = decode(raw);
        assert_eq!(dest.kind, TargetKind::Unknown, "input {raw:?}");
        assert_eq!(dest.raw, raw, "raw preserved for {raw:?}");
    }
}

#[test]
fn whitespace_is_trimmed() {
    let dest = decode("  ext-group , 600 , 1 ");
    assert_eq!(dest.kind, TargetKind::RingGroup);
    assert_eq!(dest.target_id, "600");
}

mod totality {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any string at all decodes to some DestinationRef without
        /// panicking, and the raw text always survives.
        #[test]
        fn decode_never_panics(raw in ".*") {
            let dest = decode(&raw);
            prop_assert_eq!(dest.raw, raw);
        }

        /// Comma-heavy inputs shaped like real destinations still decode
        /// totally, and known kinds never produce an empty id.
        #[test]
        fn shaped_inputs_have_ids(token in "[a-z-]{1,20}", id in "[0-9]{1,6}", extra in "[a-z0-9]{0,4}") {
            let raw = format!("{token},{id},{extra}");
            let dest = decode(&raw);
            if dest.kind != TargetKind::Unknown {
                prop_assert!(!dest.target_id.is_empty());
            }
        }
    }
}
