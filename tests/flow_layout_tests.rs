use vizkit::error::VizError;
use vizkit::layout::{FlowConfig, FlowLink, flow_layout};

fn names(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|l| (*l).to_owned()).collect()
}

fn config() -> FlowConfig {
    FlowConfig {
        width: 600.0,
        height: 400.0,
        node_width: 20.0,
        node_gap: 10.0,
    }
}

fn sample_links() -> Vec<FlowLink> {
    vec![
        FlowLink::new(0, 0, 30.0),
        FlowLink::new(0, 1, 10.0),
        FlowLink::new(1, 0, 20.0),
        FlowLink::new(1, 1, 40.0),
    ]
}

#[test]
fn node_heights_are_proportional_to_node_values() {
    let layout = flow_layout(
        &names(&["origin-a", "origin-b"]),
        &names(&["host-a", "host-b"]),
        &sample_links(),
        config(),
    )
    .expect("valid layout");

    assert_eq!(layout.sources.len(), 2);
    assert_eq!(layout.targets.len(), 2);

    // origin-a carries 40, origin-b carries 60.
    let ratio = layout.sources[1].height / layout.sources[0].height;
    assert!((ratio - 1.5).abs() <= 1e-9);

    // host-a carries 50, host-b carries 50.
    assert!((layout.targets[0].height - layout.targets[1].height).abs() <= 1e-9);
}

#[test]
fn columns_sit_at_opposite_edges() {
    let layout = flow_layout(
        &names(&["a"]),
        &names(&["b"]),
        &[FlowLink::new(0, 0, 5.0)],
        config(),
    )
    .expect("valid layout");

    assert_eq!(layout.sources[0].x, 0.0);
    assert_eq!(layout.targets[0].x, 600.0 - 20.0);
    // Links run between the two inner edges.
    assert_eq!(layout.links[0].source_x, 20.0);
    assert_eq!(layout.links[0].target_x, 580.0);
}

#[test]
fn links_consume_node_edges_without_overlap() {
    let layout = flow_layout(
        &names(&["origin-a", "origin-b"]),
        &names(&["host-a", "host-b"]),
        &sample_links(),
        config(),
    )
    .expect("valid layout");

    // Links 0 and 1 both leave origin-a: the second starts where the first ends.
    let first = layout.links[0];
    let second = layout.links[1];
    assert_eq!(first.source_top, layout.sources[0].top);
    assert!((second.source_top - first.source_bottom).abs() <= 1e-9);

    // Links 0 and 2 both enter host-a: the second starts where the first ends.
    let third = layout.links[2];
    assert!((third.target_top - first.target_bottom).abs() <= 1e-9);

    // Edge consumption never spills past the node.
    let origin_a = &layout.sources[0];
    assert!(second.source_bottom <= origin_a.top + origin_a.height + 1e-9);
}

#[test]
fn link_heights_match_on_both_sides() {
    let layout = flow_layout(
        &names(&["a", "b"]),
        &names(&["c", "d"]),
        &sample_links(),
        config(),
    )
    .expect("valid layout");

    for link in &layout.links {
        let source_height = link.source_bottom - link.source_top;
        let target_height = link.target_bottom - link.target_top;
        assert!((source_height - target_height).abs() <= 1e-9);
        assert!(source_height > 0.0);
    }
}

#[test]
fn column_fits_inside_the_configured_height() {
    let layout = flow_layout(
        &names(&["a", "b", "c"]),
        &names(&["d"]),
        &[
            FlowLink::new(0, 0, 10.0),
            FlowLink::new(1, 0, 20.0),
            FlowLink::new(2, 0, 30.0),
        ],
        config(),
    )
    .expect("valid layout");

    let last = layout.sources.last().expect("nodes");
    assert!(last.top + last.height <= 400.0 + 1e-9);
}

#[test]
fn empty_links_produce_empty_layout() {
    let layout = flow_layout(&names(&["a"]), &names(&["b"]), &[], config()).expect("empty");
    assert!(layout.sources.is_empty());
    assert!(layout.links.is_empty());
}

#[test]
fn out_of_range_link_is_rejected() {
    let err = flow_layout(
        &names(&["a"]),
        &names(&["b"]),
        &[FlowLink::new(0, 5, 1.0)],
        config(),
    )
    .expect_err("missing node must fail");
    assert!(matches!(err, VizError::InvalidData(_)));
}

#[test]
fn invalid_geometry_is_rejected() {
    let mut bad = config();
    bad.node_width = 0.0;
    let err = flow_layout(
        &names(&["a"]),
        &names(&["b"]),
        &[FlowLink::new(0, 0, 1.0)],
        bad,
    )
    .expect_err("zero node width must fail");
    assert!(matches!(err, VizError::InvalidConfig(_)));
}
