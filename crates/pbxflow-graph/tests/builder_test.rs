//! Call-flow graph builder tests.

use pbxflow_core::errors::GraphError;
use pbxflow_core::snapshot::{
    Announcement, Extension, InboundRoute, IvrMenu, IvrOption, Meta, RingGroup, Snapshot,
    TimeCondition,
};
use pbxflow_graph::{build, NodeKey, NodeKind};

fn empty_snapshot() -> Snapshot {
    Snapshot::new(Meta::default())
}

fn route(did: &str, destination: &str) -> InboundRoute {
    InboundRoute {
        did: did.to_string(),
        caller_id_filter: String::new(),
        destination: destination.to_string(),
        label: String::new(),
    }
}

fn ring_group(id: &str, destination: &str) -> RingGroup {
    RingGroup {
        group_id: id.to_string(),
        label: String::new(),
        members: vec!["4220".to_string()],
        strategy: "ringall".to_string(),
        ring_seconds: 20,
        destination: destination.to_string(),
    }
}

#[test]
fn ivr_selection_reaches_the_extension() {
    let mut s = empty_snapshot();
    s.inbound_routes.push(route("2485551234", "ivr-7,s,"));
    s.ivr_menus.push(IvrMenu {
        ivr_id: "7".to_string(),
        label: String::new(),
        announcement_id: String::new(),
    });
    s.ivr_options.push(IvrOption {
        ivr_id: "7".to_string(),
        selection: "1".to_string(),
        destination: "ext-local,4220,1".to_string(),
    });
    s.extensions.push(Extension {
        number: "4220".to_string(),
        label: "Front desk".to_string(),
    });

    let graph = build(&s, "2485551234", 50).unwrap();

    assert_eq!(graph.node_count(), 3);
    assert!(graph.contains(&NodeKey::new(NodeKind::InboundRoute, "2485551234")));
    assert!(graph.contains(&NodeKey::new(NodeKind::Ivr, "7")));
    assert!(graph.contains(&NodeKey::new(NodeKind::Extension, "4220")));

    let edges = graph.edges();
    assert!(edges.iter().any(|e| {
        e.from == NodeKey::new(NodeKind::Ivr, "7")
            && e.to == NodeKey::new(NodeKind::Extension, "4220")
            && e.branch == "digit 1"
    }));
    assert!(!graph.is_truncated());
}

#[test]
fn time_condition_forks_into_true_and_false() {
    let mut s = empty_snapshot();
    s.inbound_routes.push(route("100", "timeconditions,3,1"));
    s.time_conditions.push(TimeCondition {
        id: "3".to_string(),
        label: String::new(),
        time_group_id: "1".to_string(),
        destination_true: "ext-group,10,".to_string(),
        destination_false: "app-blackhole,hangup,1".to_string(),
    });
    s.ring_groups.push(ring_group("10", ""));

    let graph = build(&s, "100", 50).unwrap();

    let tc_key = NodeKey::new(NodeKind::TimeCondition, "3");
    let outgoing: Vec<_> = graph
        .edges()
        .into_iter()
        .filter(|e| e.from == tc_key)
        .collect();
    assert_eq!(outgoing.len(), 2);

    let mut branches: Vec<&str> = outgoing.iter().map(|e| e.branch.as_str()).collect();
    branches.sort();
    assert_eq!(branches, vec!["false", "true"]);
    assert!(graph.contains(&NodeKey::new(NodeKind::RingGroup, "10")));
    assert!(graph.contains(&NodeKey::new(NodeKind::Hangup, "hangup")));
}

#[test]
fn mutual_cycle_terminates_with_one_node_each() {
    let mut s = empty_snapshot();
    s.inbound_routes.push(route("100", "ext-group,600,1"));
    s.ring_groups.push(ring_group("600", "ext-group,601,1"));
    s.ring_groups.push(ring_group("601", "ext-group,600,1"));

    let graph = build(&s, "100", 50).unwrap();

    // Entry plus the two cycling groups; the revisit becomes a plain edge.
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 3);
    assert!(!graph.is_truncated());

    let a = NodeKey::new(NodeKind::RingGroup, "600");
    let b = NodeKey::new(NodeKind::RingGroup, "601");
    let edges = graph.edges();
    assert!(edges.iter().any(|e| e.from == a && e.to == b));
    assert!(edges.iter().any(|e| e.from == b && e.to == a));
}

#[test]
fn self_referencing_destination_terminates() {
    let mut s = empty_snapshot();
    s.inbound_routes.push(route("100", "ext-group,600,1"));
    s.ring_groups.push(ring_group("600", "ext-group,600,1"));

    let graph = build(&s, "100", 50).unwrap();
    assert_eq!(graph.node_count(), 2);
    // always-edge in, plus the self loop
    assert_eq!(graph.edge_count(), 2);
}

#[test]
fn long_chain_truncates_at_the_depth_cap() {
    let mut s = empty_snapshot();
    s.inbound_routes.push(route("100", "app-announcement-1,s,1"));
    for i in 1..=10u32 {
        s.announcements.push(Announcement {
            id: i.to_string(),
            label: String::new(),
            post_destination: format!("app-announcement-{},s,1", i + 1),
        });
    }

    let graph = build(&s, "100", 3).unwrap();

    assert!(graph.is_truncated());
    // Strictly fewer nodes than the chain length.
    assert!(graph.node_count() < 10, "got {}", graph.node_count());
}

#[test]
fn deep_graph_within_the_cap_is_not_truncated() {
    let mut s = empty_snapshot();
    s.inbound_routes.push(route("100", "app-announcement-1,s,1"));
    for i in 1..=5u32 {
        s.announcements.push(Announcement {
            id: i.to_string(),
            label: String::new(),
            post_destination: if i < 5 {
                format!("app-announcement-{},s,1", i + 1)
            } else {
                String::new()
            },
        });
    }

    let graph = build(&s, "100", 50).unwrap();
    assert!(!graph.is_truncated());
    assert_eq!(graph.node_count(), 6);
}

#[test]
fn unmatched_did_is_not_found() {
    let mut s = empty_snapshot();
    s.inbound_routes.push(route("100", "ext-local,4220,1"));

    let err = build(&s, "999", 50).unwrap_err();
    assert!(matches!(
        err,
        GraphError::EntryPointNotFound { ref did } if did == "999"
    ));
}

#[test]
fn undecodable_destination_still_yields_a_two_node_graph() {
    let mut s = empty_snapshot();
    s.inbound_routes.push(route("100", "not a destination"));

    let graph = build(&s, "100", 50).unwrap();

    // Distinguishable from not-found: entry node plus an unresolved leaf.
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 1);
    let unknown = graph
        .node(&NodeKey::new(NodeKind::Unknown, "not a destination"))
        .unwrap();
    assert_eq!(unknown.metadata.get("raw").unwrap(), "not a destination");
}

#[test]
fn catch_all_route_matches_any_did() {
    let mut s = empty_snapshot();
    s.inbound_routes.push(route("", "ext-local,4220,1"));
    s.extensions.push(Extension {
        number: "4220".to_string(),
        label: String::new(),
    });

    let graph = build(&s, "5551234567", 50).unwrap();
    assert!(graph.contains(&NodeKey::new(NodeKind::InboundRoute, "any")));
    assert!(graph.contains(&NodeKey::new(NodeKind::Extension, "4220")));
}

#[test]
fn exact_did_wins_over_catch_all() {
    let mut s = empty_snapshot();
    s.inbound_routes.push(route("", "ext-local,4221,1"));
    s.inbound_routes.push(route("100", "ext-local,4220,1"));

    let graph = build(&s, "100", 50).unwrap();
    assert!(graph.contains(&NodeKey::new(NodeKind::Extension, "4220")));
    assert!(!graph.contains(&NodeKey::new(NodeKind::Extension, "4221")));
}

#[test]
fn absent_fallback_ends_the_branch_with_no_edge() {
    let mut s = empty_snapshot();
    s.inbound_routes.push(route("100", "ext-group,600,1"));
    s.ring_groups.push(ring_group("600", ""));

    let graph = build(&s, "100", 50).unwrap();

    let group_key = NodeKey::new(NodeKind::RingGroup, "600");
    assert!(graph.contains(&group_key));
    assert!(graph.edges().iter().all(|e| e.from != group_key));
}

#[test]
fn ivr_without_options_is_terminal() {
    let mut s = empty_snapshot();
    s.inbound_routes.push(route("100", "ivr-7,s,"));
    s.ivr_menus.push(IvrMenu {
        ivr_id: "7".to_string(),
        label: String::new(),
        announcement_id: String::new(),
    });

    let graph = build(&s, "100", 50).unwrap();
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn ivr_timeout_and_invalid_selections_get_semantic_labels() {
    let mut s = empty_snapshot();
    s.inbound_routes.push(route("100", "ivr-7,s,"));
    s.ivr_menus.push(IvrMenu {
        ivr_id: "7".to_string(),
        label: String::new(),
        announcement_id: String::new(),
    });
    for (selection, dest) in [("t", "ext-local,4220,1"), ("i", "app-blackhole,hangup,1")] {
        s.ivr_options.push(IvrOption {
            ivr_id: "7".to_string(),
            selection: selection.to_string(),
            destination: dest.to_string(),
        });
    }

    let graph = build(&s, "100", 50).unwrap();
    let branches: Vec<String> = graph
        .edges()
        .into_iter()
        .filter(|e| e.from == NodeKey::new(NodeKind::Ivr, "7"))
        .map(|e| e.branch)
        .collect();
    assert!(branches.contains(&"timeout".to_string()));
    assert!(branches.contains(&"invalid".to_string()));
}

#[test]
fn converging_branches_share_one_node() {
    let mut s = empty_snapshot();
    s.inbound_routes.push(route("100", "ivr-7,s,"));
    s.ivr_menus.push(IvrMenu {
        ivr_id: "7".to_string(),
        label: String::new(),
        announcement_id: String::new(),
    });
    for selection in ["1", "2"] {
        s.ivr_options.push(IvrOption {
            ivr_id: "7".to_string(),
            selection: selection.to_string(),
            destination: "ext-local,4220,1".to_string(),
        });
    }
    s.extensions.push(Extension {
        number: "4220".to_string(),
        label: String::new(),
    });

    let graph = build(&s, "100", 50).unwrap();
    // One extension node, reached by both digit edges.
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 3);
}

#[test]
fn destination_to_missing_entity_renders_a_flagged_leaf() {
    let mut s = empty_snapshot();
    s.inbound_routes.push(route("100", "ext-group,600,1"));
    // No ring group 600 in the snapshot.

    let graph = build(&s, "100", 50).unwrap();
    let node = graph
        .node(&NodeKey::new(NodeKind::RingGroup, "600"))
        .unwrap();
    assert_eq!(node.metadata.get("missing").map(String::as_str), Some("true"));
    assert!(node.label.contains("not in snapshot"));
}

#[test]
fn repeated_builds_are_deterministic() {
    let mut s = empty_snapshot();
    s.inbound_routes.push(route("100", "ivr-7,s,"));
    s.ivr_menus.push(IvrMenu {
        ivr_id: "7".to_string(),
        label: String::new(),
        announcement_id: String::new(),
    });
    for (selection, dest) in [
        ("3", "ext-group,600,1"),
        ("1", "ext-local,4220,1"),
        ("*", "app-blackhole,hangup,1"),
    ] {
        s.ivr_options.push(IvrOption {
            ivr_id: "7".to_string(),
            selection: selection.to_string(),
            destination: dest.to_string(),
        });
    }
    s.ring_groups.push(ring_group("600", "app-blackhole,hangup,1"));

    let first = build(&s, "100", 50).unwrap();
    let second = build(&s, "100", 50).unwrap();
    assert_eq!(first.nodes(), second.nodes());
    assert_eq!(first.edges(), second.edges());
}
