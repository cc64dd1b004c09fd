pub mod app;
mod direction;
mod graph_ops;
mod line_ops;
mod line_row;
mod network_error;
mod read_ops;
mod render_ops;
mod stop_ops;
mod stop_row;

pub use direction::Direction;
pub use graph_ops::{
    build_line_graph, build_line_graphs, compose_network, LineGraphs, NetworkGraph, RouteLeg,
    UnknownStopPolicy,
};
pub use line_ops::{load_lines, load_stop_sequence};
pub use line_row::LineRow;
pub use network_error::NetworkError;
pub use render_ops::{node_positions, render, RenderFormat, RenderOptions};
pub use stop_ops::{build_code_index, group_stops, load_stops};
pub use stop_row::{GroupedStop, StopRow};
