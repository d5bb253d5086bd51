#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{ColumnSpacing, LayoutConfig, VerticalPacking, load_config, parse_config};
pub use ir::{SankeyGraph, SankeyLink, SankeyNode};
pub use layout::{LayerViolation, LayoutError, Placement, SankeyLayout, compute_sankey_layout};
pub use layout_dump::{LayoutSnapshot, NodeSnapshot, apply_snapshot};
