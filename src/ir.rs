use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SankeyNode {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Explicit coordinates and size. Any field that is set wins over the
    /// computed placement for that field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
}

impl SankeyNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn is_pinned(&self) -> bool {
        self.x.is_some() || self.y.is_some() || self.width.is_some() || self.height.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SankeyLink {
    pub source: String,
    pub target: String,
    pub value: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Node list plus link list. Node order is significant: it is the initial
/// order inside every layer before crossing reduction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SankeyGraph {
    #[serde(default)]
    pub nodes: Vec<SankeyNode>,
    #[serde(default)]
    pub links: Vec<SankeyLink>,
}

impl SankeyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: &str) -> Option<&SankeyNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut SankeyNode> {
        self.nodes.iter_mut().find(|node| node.id == id)
    }

    /// Returns the existing node with this id, appending a fresh one if absent.
    pub fn ensure_node(&mut self, id: &str) -> &mut SankeyNode {
        let idx = match self.nodes.iter().position(|node| node.id == id) {
            Some(idx) => idx,
            None => {
                self.nodes.push(SankeyNode::new(id));
                self.nodes.len() - 1
            }
        };
        &mut self.nodes[idx]
    }

    pub fn add_node(&mut self, node: SankeyNode) {
        self.nodes.push(node);
    }

    pub fn add_link(&mut self, source: &str, target: &str, value: f32) {
        self.links.push(SankeyLink {
            source: source.to_string(),
            target: target.to_string(),
            value,
            color: None,
        });
    }

    /// Adds a link and creates both endpoints when they are not declared yet.
    pub fn connect(&mut self, source: &str, target: &str, value: f32) {
        self.ensure_node(source);
        self.ensure_node(target);
        self.add_link(source, target, value);
    }
}
