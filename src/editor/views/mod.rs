//! # Views Module
//!
//! View synchronizers: derived caches that follow the live model through its
//! events and never write back to it.

pub mod graph_view;
pub mod variables_panel;

pub use graph_view::{GraphEdge, GraphNode, GraphView};
pub use variables_panel::{PanelRow, VariablesPanel};
