mod error;
mod geometry;
mod graph;
mod ordering;
mod ranking;
pub(crate) mod types;
pub use error::LayoutError;
pub use geometry::{HEIGHT_FACTOR, MIN_OVERFLOW_SCALE};
pub use types::*;

use geometry::{GeometryContext, apply_pins};
use graph::FlowGraph;
use ordering::order_layers;
use ranking::assign_layers;

use crate::config::LayoutConfig;
use crate::ir::SankeyGraph;
use std::collections::BTreeMap;

/// Lays out `graph` into `config.width` x `config.height`.
///
/// Pipeline: flow model, longest-path layering, barycenter ordering
/// interleaved with vertical packing, then a final packing pass. Explicit
/// coordinates on input nodes are copied over the result last. The call is
/// pure; identical inputs give identical output.
pub fn compute_sankey_layout(
    graph: &SankeyGraph,
    config: &LayoutConfig,
) -> Result<SankeyLayout, LayoutError> {
    validate_config(config)?;
    let model = FlowGraph::build(graph)?;

    let mut layering = assign_layers(&model, config);
    let mut geometry = GeometryContext::new(&model, layering.layers.len(), config);
    order_layers(&model, &mut layering.layers, &mut geometry, config);
    geometry.place_all(&layering.layers, config);

    let mut order = vec![0usize; model.len()];
    for nodes in &layering.layers {
        for (pos, &idx) in nodes.iter().enumerate() {
            order[idx] = pos;
        }
    }

    let mut placements = BTreeMap::new();
    for (idx, node) in graph.nodes.iter().enumerate() {
        let layer = layering.layer[idx];
        let computed = Placement {
            x: geometry.column_x[layer],
            y: geometry.y[idx],
            width: config.node_width,
            height: geometry.height[idx],
            layer,
            order: order[idx],
        };
        placements.insert(node.id.clone(), apply_pins(node, computed));
    }

    let diagnostics = if config.report_cycles {
        layering
            .violations
            .iter()
            .map(|&(from, to)| LayerViolation {
                source: model.ids[from].to_string(),
                target: model.ids[to].to_string(),
                source_layer: layering.layer[from],
                target_layer: layering.layer[to],
            })
            .collect()
    } else {
        Vec::new()
    };

    let layers = layering
        .layers
        .iter()
        .map(|nodes| nodes.iter().map(|&idx| model.ids[idx].to_string()).collect())
        .collect();

    Ok(SankeyLayout {
        width: config.width,
        height: config.height,
        layer_count: layering.layers.len(),
        layers,
        placements,
        diagnostics,
    })
}

fn validate_config(config: &LayoutConfig) -> Result<(), LayoutError> {
    for (field, value) in config.numeric_fields() {
        if !value.is_finite() {
            return Err(LayoutError::InvalidConfig {
                field,
                reason: format!("{value} is not finite"),
            });
        }
        if value < 0.0 {
            return Err(LayoutError::InvalidConfig {
                field,
                reason: format!("{value} is negative"),
            });
        }
    }
    Ok(())
}
