use crate::config::LayoutConfig;

use super::geometry::GeometryContext;
use super::graph::FlowGraph;

/// Two-sided barycenter sweeps. Every layer is re-packed right after it is
/// sorted so the next layer reads fresh centers.
pub(super) fn order_layers(
    model: &FlowGraph<'_>,
    layers: &mut [Vec<usize>],
    geometry: &mut GeometryContext,
    config: &LayoutConfig,
) {
    geometry.place_all(layers, config);
    if layers.len() <= 1 {
        return;
    }
    for _ in 0..config.order_passes {
        for layer in 1..layers.len() {
            if layers[layer].len() <= 1 {
                continue;
            }
            sort_by_barycenter(&mut layers[layer], &model.predecessors, &geometry.center);
            geometry.place_layer(&layers[layer], config);
        }
        for layer in (0..layers.len() - 1).rev() {
            if layers[layer].len() <= 1 {
                continue;
            }
            sort_by_barycenter(&mut layers[layer], &model.successors, &geometry.center);
            geometry.place_layer(&layers[layer], config);
        }
    }
    tracing::debug!(passes = config.order_passes, "ordering sweeps finished");
}

pub(super) fn barycenter(idx: usize, neighbors: &[Vec<(usize, f32)>], center: &[f32]) -> f32 {
    let mut weighted = 0.0f64;
    let mut total = 0.0f64;
    for &(neighbor, weight) in &neighbors[idx] {
        weighted += f64::from(center[neighbor]) * f64::from(weight);
        total += f64::from(weight);
    }
    if total > 0.0 {
        (weighted / total) as f32
    } else {
        center[idx]
    }
}

fn sort_by_barycenter(nodes: &mut Vec<usize>, neighbors: &[Vec<(usize, f32)>], center: &[f32]) {
    let mut keyed: Vec<(f32, usize)> = nodes
        .iter()
        .map(|&idx| (barycenter(idx, neighbors, center), idx))
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    nodes.clear();
    nodes.extend(keyed.into_iter().map(|(_, idx)| idx));
}
