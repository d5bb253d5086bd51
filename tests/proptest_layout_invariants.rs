//! Property-based invariant tests for the Sankey layout engine.
//!
//! Verifies:
//! 1. Completeness: exactly one placement per input node
//! 2. Non-negativity of every coordinate and size
//! 3. Links point strictly rightwards in DAGs without fixed or pinned layers
//! 4. No column of computed nodes exceeds the inner drawing height
//! 5. Determinism: same graph + config gives identical output
//! 6. Pin precedence: explicit fields are copied verbatim
//! 7. Snapshot reload reproduces every coordinate
//! 8. Arbitrary (possibly cyclic) graphs always terminate with contiguous layers

use proptest::prelude::*;
use sankey_layout::{
    ColumnSpacing, LayoutConfig, LayoutSnapshot, SankeyGraph, SankeyNode, VerticalPacking,
    apply_snapshot, compute_sankey_layout,
};

// ── Strategy helpers ──────────────────────────────────────────────────

fn node_ids(count: usize) -> Vec<String> {
    (0..count).map(|idx| format!("n{idx}")).collect()
}

/// Links only go from lower to higher index, so the graph is acyclic. Values
/// stay positive so no link starts at a sink.
fn arb_dag() -> impl Strategy<Value = SankeyGraph> {
    (1usize..14).prop_flat_map(|count| {
        let links = prop::collection::vec((0..count, 0..count, 0.5f32..50.0), 0..(count * 2));
        links.prop_map(move |raw| {
            let mut graph = SankeyGraph::new();
            for id in node_ids(count) {
                graph.add_node(SankeyNode::new(id));
            }
            for (a, b, value) in raw {
                if a == b {
                    continue;
                }
                let (from, to) = if a < b { (a, b) } else { (b, a) };
                graph.add_link(&format!("n{from}"), &format!("n{to}"), value);
            }
            graph
        })
    })
}

fn arb_graph() -> impl Strategy<Value = SankeyGraph> {
    (1usize..12).prop_flat_map(|count| {
        let links = prop::collection::vec((0..count, 0..count + 1, 0.0f32..30.0), 0..(count * 3));
        links.prop_map(move |raw| {
            let mut graph = SankeyGraph::new();
            for id in node_ids(count) {
                graph.add_node(SankeyNode::new(id));
            }
            // Index `count` is an unknown id on purpose.
            for (from, to, value) in raw {
                graph.add_link(&format!("n{from}"), &format!("n{to}"), value);
            }
            graph
        })
    })
}

fn arb_config() -> impl Strategy<Value = LayoutConfig> {
    (
        200.0f32..1600.0,
        120.0f32..900.0,
        0.0f32..40.0,
        0.0f32..30.0,
        0.1f32..4.0,
        prop_oneof![Just(ColumnSpacing::Uniform), Just(ColumnSpacing::Capped)],
        prop_oneof![Just(VerticalPacking::Center), Just(VerticalPacking::Spread)],
        0usize..6,
    )
        .prop_map(
            |(width, height, padding, node_gap, scale, spacing, packing, passes)| LayoutConfig {
                width,
                height,
                padding,
                node_gap,
                link_width_scale: scale,
                column_spacing: spacing,
                vertical_packing: packing,
                order_passes: passes,
                ..LayoutConfig::default()
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn every_node_is_placed_once(graph in arb_graph(), config in arb_config()) {
        let layout = compute_sankey_layout(&graph, &config).unwrap();
        prop_assert_eq!(layout.placements.len(), graph.nodes.len());
        for node in &graph.nodes {
            prop_assert!(layout.placements.contains_key(&node.id));
        }
        let listed: usize = layout.layers.iter().map(Vec::len).sum();
        prop_assert_eq!(listed, graph.nodes.len());
    }

    #[test]
    fn coordinates_are_non_negative(graph in arb_graph(), config in arb_config()) {
        let layout = compute_sankey_layout(&graph, &config).unwrap();
        for (id, p) in &layout.placements {
            prop_assert!(p.x >= 0.0 && p.y >= 0.0, "{} at ({}, {})", id, p.x, p.y);
            prop_assert!(p.width >= 0.0 && p.height >= 0.0, "{} sized {}x{}", id, p.width, p.height);
            prop_assert!(p.right() <= config.width - config.padding + 1e-2, "{} past right edge", id);
        }
    }

    #[test]
    fn dag_links_point_rightwards(graph in arb_dag(), config in arb_config()) {
        let layout = compute_sankey_layout(&graph, &config).unwrap();
        for link in &graph.links {
            let source = layout.placements[&link.source].layer;
            let target = layout.placements[&link.target].layer;
            prop_assert!(target > source, "{} -> {}: {} -> {}", link.source, link.target, source, target);
        }
    }

    #[test]
    fn columns_fit_inner_height(graph in arb_graph(), config in arb_config()) {
        let layout = compute_sankey_layout(&graph, &config).unwrap();
        let available = config.height - 2.0 * config.padding;
        for nodes in &layout.layers {
            let placed: Vec<_> = nodes.iter().map(|id| layout.placements[id]).collect();
            let top = placed.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
            let bottom = placed.iter().map(|p| p.bottom()).fold(0.0, f32::max);
            prop_assert!(bottom - top <= available * (1.0 + 1e-4) + 1e-2);
            prop_assert!(top >= config.padding - 1e-3);
        }
    }

    #[test]
    fn layout_is_deterministic(graph in arb_graph(), config in arb_config()) {
        let first = compute_sankey_layout(&graph, &config).unwrap();
        let second = compute_sankey_layout(&graph, &config).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn pinned_fields_are_verbatim(
        graph in arb_graph(),
        config in arb_config(),
        x in 0.0f32..2000.0,
        y in 0.0f32..2000.0,
    ) {
        let mut graph = graph;
        let target = graph.nodes[0].id.clone();
        if let Some(node) = graph.node_mut(&target) {
            node.x = Some(x);
            node.y = Some(y);
        }
        let layout = compute_sankey_layout(&graph, &config).unwrap();
        prop_assert_eq!(layout.placements[&target].x, x);
        prop_assert_eq!(layout.placements[&target].y, y);
        prop_assert_eq!(layout.placements[&target].width, config.node_width);
    }

    #[test]
    fn snapshot_reload_reproduces_coordinates(graph in arb_graph(), config in arb_config()) {
        let first = compute_sankey_layout(&graph, &config).unwrap();
        let snapshot = LayoutSnapshot::from_layout(&first, &graph);
        let mut pinned = graph.clone();
        apply_snapshot(&mut pinned, &snapshot);
        let second = compute_sankey_layout(&pinned, &config).unwrap();
        prop_assert_eq!(LayoutSnapshot::from_layout(&second, &pinned), snapshot);
    }

    #[test]
    fn layers_are_contiguous(graph in arb_graph(), config in arb_config()) {
        let layout = compute_sankey_layout(&graph, &config).unwrap();
        prop_assert_eq!(layout.layers.len(), layout.layer_count);
        for (layer, nodes) in layout.layers.iter().enumerate() {
            prop_assert!(!nodes.is_empty());
            for id in nodes {
                prop_assert_eq!(layout.placements[id].layer, layer);
            }
        }
    }
}
