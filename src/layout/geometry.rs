use crate::config::{ColumnSpacing, LayoutConfig, VerticalPacking};
use crate::ir::SankeyNode;

use super::Placement;
use super::graph::FlowGraph;

/// Pixels of node height per pixel of scaled flow.
pub const HEIGHT_FACTOR: f32 = 0.7;
/// Overflowing layers never shrink below this fraction of their natural
/// height while there is still gap to give away.
pub const MIN_OVERFLOW_SCALE: f32 = 0.35;

/// Per-node geometry shared between the ordering sweeps and the final pass.
/// `center` is what the barycenter keys read.
#[derive(Debug, Clone)]
pub(super) struct GeometryContext {
    pub column_x: Vec<f32>,
    pub natural_height: Vec<f32>,
    pub y: Vec<f32>,
    pub height: Vec<f32>,
    pub center: Vec<f32>,
}

impl GeometryContext {
    pub fn new(model: &FlowGraph<'_>, layer_count: usize, config: &LayoutConfig) -> Self {
        let natural_height = (0..model.len())
            .map(|idx| node_height(model.total_flow(idx), config))
            .collect();
        Self {
            column_x: column_positions(layer_count, config),
            natural_height,
            y: vec![0.0; model.len()],
            height: vec![0.0; model.len()],
            center: vec![0.0; model.len()],
        }
    }

    /// Packs one ordered layer and refreshes the centers of its nodes.
    pub fn place_layer(&mut self, nodes: &[usize], config: &LayoutConfig) {
        let natural: Vec<f32> = nodes.iter().map(|&idx| self.natural_height[idx]).collect();
        let packed = pack_column(&natural, config);
        let mut cursor = packed.top;
        for &idx in nodes {
            let height = (f64::from(self.natural_height[idx]) * f64::from(packed.scale)) as f32;
            self.y[idx] = cursor;
            self.height[idx] = height;
            self.center[idx] = cursor + height / 2.0;
            cursor += height + packed.gap;
        }
    }

    pub fn place_all(&mut self, layers: &[Vec<usize>], config: &LayoutConfig) {
        for nodes in layers {
            self.place_layer(nodes, config);
        }
    }
}

/// Clamped to `f32::MAX`, so huge flows still give a finite height.
pub(super) fn node_height(total_flow: f64, config: &LayoutConfig) -> f32 {
    let scaled = total_flow * f64::from(config.link_width_scale) * f64::from(HEIGHT_FACTOR);
    (scaled.min(f64::from(f32::MAX)) as f32).max(config.min_node_height)
}

pub(super) fn column_positions(layer_count: usize, config: &LayoutConfig) -> Vec<f32> {
    if layer_count <= 1 {
        return vec![config.padding; layer_count];
    }
    let inner = (config.width - 2.0 * config.padding - config.node_width).max(0.0);
    let mut step = inner / (layer_count - 1) as f32;
    if config.column_spacing == ColumnSpacing::Capped {
        step = step.min(config.node_width + config.col_gap);
    }
    (0..layer_count)
        .map(|column| config.padding + column as f32 * step)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct ColumnPacking {
    pub top: f32,
    pub gap: f32,
    pub scale: f32,
}

/// Vertical packing for one column of natural heights, in order.
pub(super) fn pack_column(natural: &[f32], config: &LayoutConfig) -> ColumnPacking {
    let count = natural.len();
    let available = (config.height - 2.0 * config.padding).max(0.0);
    if count == 0 {
        return ColumnPacking {
            top: config.padding,
            gap: config.node_gap,
            scale: 1.0,
        };
    }
    let slots = (count - 1) as f32;
    let content: f64 = natural.iter().copied().map(f64::from).sum();
    let required = content + f64::from(slots * config.node_gap);

    if required <= f64::from(available) {
        let leftover = (f64::from(available) - required) as f32;
        return match config.vertical_packing {
            VerticalPacking::Center => ColumnPacking {
                top: config.padding + leftover / 2.0,
                gap: config.node_gap,
                scale: 1.0,
            },
            VerticalPacking::Spread => {
                let extra = leftover / (count + 1) as f32;
                ColumnPacking {
                    top: config.padding + extra,
                    gap: config.node_gap + extra,
                    scale: 1.0,
                }
            }
        };
    }

    let (scale, gap) = overflow_fit(content, slots, available, config.node_gap);
    let used = content * scale + f64::from(slots * gap);
    ColumnPacking {
        top: config.padding + ((f64::from(available) - used) / 2.0).max(0.0) as f32,
        gap,
        scale: scale as f32,
    }
}

/// Shrinks heights first (down to `MIN_OVERFLOW_SCALE`), then the gaps, and
/// only then heights below the floor, so the column always fits.
fn overflow_fit(content: f64, slots: f32, available: f32, node_gap: f32) -> (f64, f32) {
    if content <= 0.0 {
        let gap = if slots > 0.0 { available / slots } else { 0.0 };
        return (1.0, gap.min(node_gap));
    }
    let min_scale = f64::from(MIN_OVERFLOW_SCALE);
    let scale = f64::from(available - slots * node_gap) / content;
    if scale >= min_scale {
        return (scale, node_gap);
    }
    let floor_content = content * min_scale;
    if floor_content <= f64::from(available) {
        let gap = if slots > 0.0 {
            ((f64::from(available) - floor_content) / f64::from(slots)).max(0.0) as f32
        } else {
            0.0
        };
        return (min_scale, gap.min(node_gap));
    }
    (f64::from(available) / content, 0.0)
}

/// Copies every explicit coordinate of `node` over the computed placement.
pub(super) fn apply_pins(node: &SankeyNode, mut placement: Placement) -> Placement {
    if let Some(x) = node.x {
        placement.x = x;
    }
    if let Some(y) = node.y {
        placement.y = y;
    }
    if let Some(width) = node.width {
        placement.width = width;
    }
    if let Some(height) = node.height {
        placement.height = height;
    }
    placement
}
