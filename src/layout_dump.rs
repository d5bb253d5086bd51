use crate::ir::SankeyGraph;
use crate::layout::SankeyLayout;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Persistable `{id, x, y, width, height}` tuples of one layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    pub width: f32,
    pub height: f32,
    pub nodes: Vec<NodeSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub layer: usize,
}

impl LayoutSnapshot {
    /// Nodes come out in the graph's node order.
    pub fn from_layout(layout: &SankeyLayout, graph: &SankeyGraph) -> Self {
        let nodes = graph
            .nodes
            .iter()
            .filter_map(|node| {
                let placement = layout.placements.get(&node.id)?;
                Some(NodeSnapshot {
                    id: node.id.clone(),
                    x: placement.x,
                    y: placement.y,
                    width: placement.width,
                    height: placement.height,
                    layer: placement.layer,
                })
            })
            .collect();
        LayoutSnapshot {
            width: layout.width,
            height: layout.height,
            nodes,
        }
    }
}

/// Copies snapshot coordinates onto matching nodes as explicit pins.
/// Returns how many nodes were pinned; unknown ids are skipped.
pub fn apply_snapshot(graph: &mut SankeyGraph, snapshot: &LayoutSnapshot) -> usize {
    let mut applied = 0;
    for saved in &snapshot.nodes {
        let Some(node) = graph.node_mut(&saved.id) else {
            tracing::debug!(id = %saved.id, "snapshot node not in graph");
            continue;
        };
        node.x = Some(saved.x);
        node.y = Some(saved.y);
        node.width = Some(saved.width);
        node.height = Some(saved.height);
        applied += 1;
    }
    applied
}

pub fn write_layout_dump(
    path: &Path,
    layout: &SankeyLayout,
    graph: &SankeyGraph,
) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutSnapshot::from_layout(layout, graph);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}

pub fn read_layout_dump(path: &Path) -> anyhow::Result<LayoutSnapshot> {
    let file = File::open(path)?;
    let snapshot = serde_json::from_reader(BufReader::new(file))?;
    Ok(snapshot)
}
