//! Export interface tests: stable enumeration for the renderer.

use pbxflow_core::snapshot::{Extension, InboundRoute, IvrMenu, IvrOption, Meta, Snapshot};
use pbxflow_graph::build;

fn sample() -> Snapshot {
    let mut s = Snapshot::new(Meta::default());
    s.inbound_routes.push(InboundRoute {
        did: "100".to_string(),
        caller_id_filter: String::new(),
        destination: "ivr-7,s,".to_string(),
        label: "Main".to_string(),
    });
    s.ivr_menus.push(IvrMenu {
        ivr_id: "7".to_string(),
        label: "Day menu".to_string(),
        announcement_id: String::new(),
    });
    for (selection, dest) in [("2", "app-blackhole,hangup,1"), ("1", "ext-local,4220,1")] {
        s.ivr_options.push(IvrOption {
            ivr_id: "7".to_string(),
            selection: selection.to_string(),
            destination: dest.to_string(),
        });
    }
    s.extensions.push(Extension {
        number: "4220".to_string(),
        label: "Front desk".to_string(),
    });
    s
}

#[test]
fn nodes_enumerate_sorted_by_kind_and_id() {
    let graph = build(&sample(), "100", 50).unwrap();
    let nodes = graph.nodes();

    let order: Vec<(&str, &str)> = nodes.iter().map(|n| (n.kind, n.id.as_str())).collect();
    let mut sorted = order.clone();
    sorted.sort();
    assert_eq!(order, sorted);
    assert_eq!(nodes.len(), 4);
}

#[test]
fn edges_enumerate_sorted_and_carry_branch_text() {
    let graph = build(&sample(), "100", 50).unwrap();
    let edges = graph.edges();

    assert_eq!(edges.len(), 3);
    let branches: Vec<&str> = edges.iter().map(|e| e.branch.as_str()).collect();
    assert!(branches.contains(&"always"));
    assert!(branches.contains(&"digit 1"));
    assert!(branches.contains(&"digit 2"));

    let mut sorted = edges.clone();
    sorted.sort();
    assert_eq!(edges, sorted);
}

#[test]
fn export_document_serializes_for_downstream_tools() {
    let graph = build(&sample(), "100", 50).unwrap();
    let export = graph.to_export();

    let json = serde_json::to_value(&export).unwrap();
    assert_eq!(json["entry_did"], "100");
    assert_eq!(json["truncated"], false);
    assert_eq!(json["nodes"].as_array().unwrap().len(), 4);
    assert_eq!(json["edges"].as_array().unwrap().len(), 3);

    // Kinds serialize in their stable kebab-case form.
    let kinds: Vec<&str> = json["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["kind"].as_str().unwrap())
        .collect();
    assert!(kinds.contains(&"inbound-route"));
    assert!(kinds.contains(&"ivr"));
    assert!(kinds.contains(&"extension"));
    assert!(kinds.contains(&"hangup"));

    // Edge endpoints are (kind, id) node keys.
    let edge = &json["edges"][0];
    assert!(edge["from"]["kind"].is_string());
    assert!(edge["from"]["id"].is_string());
    assert!(edge["branch"].is_string());
}

#[test]
fn node_labels_carry_entity_names() {
    let graph = build(&sample(), "100", 50).unwrap();
    let nodes = graph.nodes();

    let ivr = nodes.iter().find(|n| n.kind == "ivr").unwrap();
    assert_eq!(ivr.label, "IVR 7: Day menu");
    let ext = nodes.iter().find(|n| n.kind == "extension").unwrap();
    assert_eq!(ext.label, "Extension 4220: Front desk");
}
