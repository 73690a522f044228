//! Graph builder benchmarks: wide fan-out and deep chains.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use pbxflow_core::snapshot::{
    Announcement, Extension, InboundRoute, IvrMenu, IvrOption, Meta, Snapshot,
};
use pbxflow_graph::build;

/// A menu fanning out to many extensions, plus a long announcement chain.
fn synthetic_snapshot(extensions: u32, chain: u32) -> Snapshot {
    let mut s = Snapshot::new(Meta::default());
    s.inbound_routes.push(InboundRoute {
        did: "100".to_string(),
        caller_id_filter: String::new(),
        destination: "ivr-1,s,".to_string(),
        label: String::new(),
    });
    s.ivr_menus.push(IvrMenu {
        ivr_id: "1".to_string(),
        label: String::new(),
        announcement_id: String::new(),
    });
    for i in 0..extensions {
        let number = format!("4{i:03}");
        s.ivr_options.push(IvrOption {
            ivr_id: "1".to_string(),
            selection: (i % 10).to_string(),
            destination: format!("ext-local,{number},1"),
        });
        s.extensions.push(Extension {
            number,
            label: String::new(),
        });
    }
    s.ivr_options.push(IvrOption {
        ivr_id: "1".to_string(),
        selection: "t".to_string(),
        destination: "app-announcement-1,s,1".to_string(),
    });
    for i in 1..=chain {
        s.announcements.push(Announcement {
            id: i.to_string(),
            label: String::new(),
            post_destination: format!("app-announcement-{},s,1", i + 1),
        });
    }
    s
}

fn bench_build(c: &mut Criterion) {
    let wide = synthetic_snapshot(200, 0);
    c.bench_function("build_wide_fanout", |b| {
        b.iter(|| build(black_box(&wide), "100", 500).unwrap())
    });

    let deep = synthetic_snapshot(0, 400);
    c.bench_function("build_deep_chain", |b| {
        b.iter(|| build(black_box(&deep), "100", 500).unwrap())
    });
}

criterion_group!(benches, bench_build);
criterion_main!(benches);
