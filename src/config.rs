use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColumnSpacing {
    /// Columns are spread evenly over the whole inner width.
    #[default]
    Uniform,
    /// Like `Uniform`, but the step never exceeds `node_width + col_gap`.
    Capped,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum VerticalPacking {
    /// Stack keeps the minimum gap and is centered vertically.
    #[default]
    Center,
    /// Leftover height is distributed as extra gap around and between nodes.
    Spread,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    pub width: f32,
    pub height: f32,
    pub padding: f32,
    pub node_gap: f32,
    pub col_gap: f32,
    pub link_width_scale: f32,
    pub node_width: f32,
    pub min_node_height: f32,
    pub order_passes: usize,
    pub sink_push: bool,
    pub column_spacing: ColumnSpacing,
    pub vertical_packing: VerticalPacking,
    pub report_cycles: bool,
    #[serde(default)]
    pub fixed_layers: BTreeMap<String, f32>,
    #[serde(default)]
    pub pin_right_ids: Vec<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 540.0,
            padding: 24.0,
            node_gap: 18.0,
            col_gap: 120.0,
            link_width_scale: 2.0,
            node_width: 18.0,
            min_node_height: 6.0,
            order_passes: 4,
            sink_push: true,
            column_spacing: ColumnSpacing::Uniform,
            vertical_packing: VerticalPacking::Center,
            report_cycles: false,
            fixed_layers: BTreeMap::new(),
            pin_right_ids: Vec::new(),
        }
    }
}

impl LayoutConfig {
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn fix_layer(mut self, id: &str, layer: f32) -> Self {
        self.fixed_layers.insert(id.to_string(), layer);
        self
    }

    pub fn pin_right(mut self, id: &str) -> Self {
        self.pin_right_ids.push(id.to_string());
        self
    }

    pub(crate) fn numeric_fields(&self) -> [(&'static str, f32); 8] {
        [
            ("width", self.width),
            ("height", self.height),
            ("padding", self.padding),
            ("nodeGap", self.node_gap),
            ("colGap", self.col_gap),
            ("linkWidthScale", self.link_width_scale),
            ("nodeWidth", self.node_width),
            ("minNodeHeight", self.min_node_height),
        ]
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    width: Option<f32>,
    height: Option<f32>,
    padding: Option<f32>,
    node_gap: Option<f32>,
    col_gap: Option<f32>,
    link_width_scale: Option<f32>,
    node_width: Option<f32>,
    min_node_height: Option<f32>,
    order_passes: Option<usize>,
    sink_push: Option<bool>,
    column_spacing: Option<ColumnSpacing>,
    vertical_packing: Option<VerticalPacking>,
    report_cycles: Option<bool>,
    fixed_layers: Option<BTreeMap<String, f32>>,
    pin_right_ids: Option<Vec<String>>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<LayoutConfig> {
    let Some(path) = path else {
        return Ok(LayoutConfig::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parses a JSON5 config document and merges it over the defaults.
pub fn parse_config(contents: &str) -> anyhow::Result<LayoutConfig> {
    let parsed: ConfigFile = json5::from_str(contents)?;
    Ok(merge_config(LayoutConfig::default(), parsed))
}

fn merge_config(mut config: LayoutConfig, file: ConfigFile) -> LayoutConfig {
    if let Some(v) = file.width {
        config.width = v;
    }
    if let Some(v) = file.height {
        config.height = v;
    }
    if let Some(v) = file.padding {
        config.padding = v;
    }
    if let Some(v) = file.node_gap {
        config.node_gap = v;
    }
    if let Some(v) = file.col_gap {
        config.col_gap = v;
    }
    if let Some(v) = file.link_width_scale {
        config.link_width_scale = v;
    }
    if let Some(v) = file.node_width {
        config.node_width = v;
    }
    if let Some(v) = file.min_node_height {
        config.min_node_height = v;
    }
    if let Some(v) = file.order_passes {
        config.order_passes = v;
    }
    if let Some(v) = file.sink_push {
        config.sink_push = v;
    }
    if let Some(v) = file.column_spacing {
        config.column_spacing = v;
    }
    if let Some(v) = file.vertical_packing {
        config.vertical_packing = v;
    }
    if let Some(v) = file.report_cycles {
        config.report_cycles = v;
    }
    if let Some(v) = file.fixed_layers {
        config.fixed_layers = v;
    }
    if let Some(v) = file.pin_right_ids {
        config.pin_right_ids = v;
    }
    config
}
