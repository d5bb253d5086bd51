use sankey_layout::{SankeyGraph, compute_sankey_layout, parse_config};
use wasm_bindgen::prelude::*;

fn layout_json(graph_json: &str, config_json: Option<&str>) -> Result<String, String> {
    let graph: SankeyGraph = serde_json::from_str(graph_json).map_err(|error| error.to_string())?;
    let config = parse_config(config_json.unwrap_or("{}")).map_err(|error| error.to_string())?;
    let layout = compute_sankey_layout(&graph, &config).map_err(|error| error.to_string())?;
    serde_json::to_string(&layout).map_err(|error| error.to_string())
}

/// Lays out a `{nodes, links}` JSON graph and returns the layout as JSON.
/// `config_json` is a JSON/JSON5 object merged over the default config.
#[wasm_bindgen]
pub fn layout_sankey_json(graph_json: &str, config_json: Option<String>) -> Result<String, JsValue> {
    layout_json(graph_json, config_json.as_deref()).map_err(|error| JsValue::from_str(&error))
}

#[cfg(test)]
mod tests {
    use crate::layout_json;

    const GRAPH: &str = r#"{
        "nodes": [{"id": "A"}, {"id": "B"}, {"id": "C", "x": 300}],
        "links": [
            {"source": "A", "target": "B", "value": 4},
            {"source": "B", "target": "C", "value": 3}
        ]
    }"#;

    #[test]
    fn lays_out_json_graph_with_defaults() {
        let output = layout_json(GRAPH, None).expect("layout should succeed");
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["layerCount"], 3);
        assert_eq!(value["placements"]["C"]["x"], 300.0);
    }

    #[test]
    fn config_json_overrides_size() {
        let output = layout_json(GRAPH, Some(r#"{"width": 400, "height": 200, "padding": 10}"#))
            .expect("layout should succeed");
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["width"], 400.0);
        assert_eq!(value["height"], 200.0);
    }

    #[test]
    fn reports_malformed_graph() {
        let error = layout_json(
            r#"{"nodes": [{"id": "A"}, {"id": "A"}], "links": []}"#,
            None,
        )
        .unwrap_err();
        assert!(error.contains("duplicate node id"));
    }
}
