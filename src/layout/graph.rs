use std::collections::HashMap;

use crate::ir::SankeyGraph;

use super::LayoutError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct FlowEdge {
    pub from: usize,
    pub to: usize,
    pub value: f32,
}

/// Index-based view of a `SankeyGraph`. Node indices follow the input node
/// order; links with unknown endpoints are dropped here and never reach the
/// later stages.
#[derive(Debug, Clone)]
pub(super) struct FlowGraph<'a> {
    pub ids: Vec<&'a str>,
    pub index: HashMap<&'a str, usize>,
    pub edges: Vec<FlowEdge>,
    /// Accumulated in f64 so large finite values cannot overflow to infinity.
    pub in_sum: Vec<f64>,
    pub out_sum: Vec<f64>,
    /// `(neighbor, weight)` per node, self-loops excluded.
    pub predecessors: Vec<Vec<(usize, f32)>>,
    pub successors: Vec<Vec<(usize, f32)>>,
}

impl<'a> FlowGraph<'a> {
    pub fn build(graph: &'a SankeyGraph) -> Result<Self, LayoutError> {
        let node_count = graph.nodes.len();
        let mut problems = Vec::new();
        let mut ids = Vec::with_capacity(node_count);
        let mut index: HashMap<&str, usize> = HashMap::with_capacity(node_count);
        for (idx, node) in graph.nodes.iter().enumerate() {
            if let Some(first) = index.get(node.id.as_str()) {
                problems.push(format!(
                    "duplicate node id `{}` at positions {} and {}",
                    node.id, first, idx
                ));
                continue;
            }
            index.insert(node.id.as_str(), idx);
            ids.push(node.id.as_str());
        }
        for (idx, link) in graph.links.iter().enumerate() {
            if !link.value.is_finite() || link.value < 0.0 {
                problems.push(format!(
                    "link #{idx} `{}` -> `{}` has invalid value {}",
                    link.source, link.target, link.value
                ));
            }
        }
        LayoutError::malformed(problems)?;

        let mut edges = Vec::with_capacity(graph.links.len());
        let mut in_sum = vec![0.0f64; node_count];
        let mut out_sum = vec![0.0f64; node_count];
        let mut predecessors: Vec<Vec<(usize, f32)>> = vec![Vec::new(); node_count];
        let mut successors: Vec<Vec<(usize, f32)>> = vec![Vec::new(); node_count];

        for link in &graph.links {
            let (Some(&from), Some(&to)) = (
                index.get(link.source.as_str()),
                index.get(link.target.as_str()),
            ) else {
                tracing::debug!(
                    source = %link.source,
                    target = %link.target,
                    "skipping link with unknown endpoint"
                );
                continue;
            };
            out_sum[from] += f64::from(link.value);
            in_sum[to] += f64::from(link.value);
            edges.push(FlowEdge {
                from,
                to,
                value: link.value,
            });
            if from != to {
                successors[from].push((to, link.value));
                predecessors[to].push((from, link.value));
            }
        }

        Ok(Self {
            ids,
            index,
            edges,
            in_sum,
            out_sum,
            predecessors,
            successors,
        })
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_source(&self, idx: usize) -> bool {
        self.in_sum[idx] == 0.0 && self.out_sum[idx] > 0.0
    }

    pub fn is_sink(&self, idx: usize) -> bool {
        self.out_sum[idx] == 0.0 && self.in_sum[idx] > 0.0
    }

    pub fn total_flow(&self, idx: usize) -> f64 {
        self.in_sum[idx] + self.out_sum[idx]
    }
}
