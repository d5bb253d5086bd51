use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Column the node was assigned to.
    pub layer: usize,
    /// Position inside its column after crossing reduction, top to bottom.
    pub order: usize,
}

impl Placement {
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerViolation {
    pub source: String,
    pub target: String,
    pub source_layer: usize,
    pub target_layer: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SankeyLayout {
    pub width: f32,
    pub height: f32,
    pub layer_count: usize,
    /// Node ids per layer, in final vertical order.
    pub layers: Vec<Vec<String>>,
    pub placements: BTreeMap<String, Placement>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<LayerViolation>,
}

impl SankeyLayout {
    pub fn placement(&self, id: &str) -> Option<&Placement> {
        self.placements.get(id)
    }
}
