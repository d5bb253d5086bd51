use std::collections::BTreeSet;

use crate::config::LayoutConfig;

use super::graph::FlowGraph;

#[derive(Debug, Clone)]
pub(super) struct Layering {
    /// Final layer per node index, contiguous from 0.
    pub layer: Vec<usize>,
    /// Node indices per layer, in input order.
    pub layers: Vec<Vec<usize>>,
    /// Links still pointing backwards or sideways after relaxation, as
    /// `(from, to)`. Only non-empty for cyclic input.
    pub violations: Vec<(usize, usize)>,
}

/// Upper bound on longest-path relaxation passes. Cyclic graphs never
/// converge, so the bound is what guarantees termination.
pub(super) fn relaxation_bound(node_count: usize) -> usize {
    3 * node_count.max(10)
}

pub(super) fn assign_layers(model: &FlowGraph<'_>, config: &LayoutConfig) -> Layering {
    let mut layer = vec![0usize; model.len()];
    let bound = relaxation_bound(model.len());
    let passes = relax_longest_path(model, &mut layer, bound);
    let violations = violated_edges(model, &layer);
    if violations.is_empty() {
        tracing::debug!(passes, "layer relaxation converged");
    } else {
        tracing::warn!(
            bound,
            violated = violations.len(),
            "layer relaxation hit its pass bound; graph contains cycles"
        );
    }

    for (id, value) in &config.fixed_layers {
        if let Some(&idx) = model.index.get(id.as_str()) {
            layer[idx] = fixed_layer(*value);
        }
    }

    normalize(&mut layer);
    if config.sink_push {
        push_sinks(model, &mut layer);
    }
    pin_right(model, &config.pin_right_ids, &mut layer);
    compact(&mut layer);

    let layer_count = layer.iter().copied().max().map_or(0, |max| max + 1);
    let mut layers: Vec<Vec<usize>> = vec![Vec::new(); layer_count];
    for (idx, &value) in layer.iter().enumerate() {
        layers[value].push(idx);
    }
    tracing::debug!(layers = layer_count, nodes = model.len(), "layers assigned");

    Layering {
        layer,
        layers,
        violations,
    }
}

/// Raises every link target to at least one past its source until nothing
/// changes or `bound` passes have run. Returns the number of passes.
fn relax_longest_path(model: &FlowGraph<'_>, layer: &mut [usize], bound: usize) -> usize {
    let mut passes = 0;
    while passes < bound {
        passes += 1;
        let mut changed = false;
        for edge in &model.edges {
            if edge.from == edge.to {
                continue;
            }
            let wanted = layer[edge.from] + 1;
            if layer[edge.to] < wanted {
                layer[edge.to] = wanted;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    passes
}

fn violated_edges(model: &FlowGraph<'_>, layer: &[usize]) -> Vec<(usize, usize)> {
    model
        .edges
        .iter()
        .filter(|edge| edge.from != edge.to && layer[edge.to] <= layer[edge.from])
        .map(|edge| (edge.from, edge.to))
        .collect()
}

fn fixed_layer(value: f32) -> usize {
    if !value.is_finite() {
        return 0;
    }
    value.floor().clamp(0.0, u32::MAX as f32) as usize
}

fn normalize(layer: &mut [usize]) {
    let Some(min) = layer.iter().copied().min() else {
        return;
    };
    for value in layer.iter_mut() {
        *value -= min;
    }
}

/// Sinks go one column past every non-sink node, so they all share the
/// rightmost column. Sink status comes from flow sums, which means a sink
/// listed in `fixed_layers` is moved as well.
fn push_sinks(model: &FlowGraph<'_>, layer: &mut [usize]) {
    let sinks: Vec<usize> = (0..model.len()).filter(|&idx| model.is_sink(idx)).collect();
    if sinks.is_empty() {
        return;
    }
    let max_non_sink = (0..model.len())
        .filter(|&idx| !model.is_sink(idx))
        .map(|idx| layer[idx])
        .max()
        .unwrap_or(0);
    for idx in sinks {
        layer[idx] = max_non_sink.saturating_add(1);
    }
}

fn pin_right(model: &FlowGraph<'_>, ids: &[String], layer: &mut [usize]) {
    let pinned: Vec<usize> = ids
        .iter()
        .filter_map(|id| model.index.get(id.as_str()).copied())
        .collect();
    if pinned.is_empty() {
        return;
    }
    let target = layer.iter().copied().max().unwrap_or(0).saturating_add(1);
    for idx in pinned {
        layer[idx] = target;
    }
}

/// Squeezes out unused layer values while keeping their relative order.
fn compact(layer: &mut [usize]) {
    let used: BTreeSet<usize> = layer.iter().copied().collect();
    if used.iter().copied().eq(0..used.len()) {
        return;
    }
    let dense: Vec<usize> = used.into_iter().collect();
    for value in layer.iter_mut() {
        if let Ok(rank) = dense.binary_search(value) {
            *value = rank;
        }
    }
}
