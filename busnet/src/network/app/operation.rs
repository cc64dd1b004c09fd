//! pipeline operations over a dataset directory containing `stops.csv`,
//! `lines.csv`, and per-line stop sequence files `line_<code>_<d>.csv`
//! where `<d>` is '0' (outbound) or '1' (inbound).
use crate::network::graph_ops::{self, LineGraphs, UnknownStopPolicy};
use crate::network::network_error::NetworkError;
use crate::network::render_ops::{self, RenderFormat, RenderOptions};
use crate::network::stop_ops;
use crate::network::stop_row::GroupedStop;
use crate::network::{line_ops, line_row::LineRow};
use clap::Subcommand;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum NetworkOperation {
    /// summarize the stops, lines, and per-line graphs of a dataset
    Summary {
        /// directory containing the dataset tables
        #[arg(long, default_value_t = String::from("dataset"))]
        directory: String,
        #[arg(value_enum, default_value_t = UnknownStopPolicy::Fail)]
        unknown_stop_policy: UnknownStopPolicy,
    },
    /// build the composed network graph and render it geographically
    Render {
        /// directory containing the dataset tables
        #[arg(long, default_value_t = String::from("dataset"))]
        directory: String,
        /// file to write the rendered network to
        #[arg(long, default_value_t = String::from("network.svg"))]
        output: String,
        #[arg(long, value_enum, default_value_t = RenderFormat::Svg)]
        format: RenderFormat,
        /// include inbound-direction edges in the composed network
        #[arg(long, default_value_t = false)]
        bidirectional: bool,
        #[arg(long, default_value_t = 1200.0)]
        width: f64,
        #[arg(long, default_value_t = 1200.0)]
        height: f64,
        #[arg(long, default_value_t = 2.5)]
        node_radius: f64,
        #[arg(long, default_value_t = 0.5)]
        edge_width: f64,
        #[arg(long, default_value_t = 4.0)]
        arrow_size: f64,
        #[arg(value_enum, default_value_t = UnknownStopPolicy::Fail)]
        unknown_stop_policy: UnknownStopPolicy,
    },
}

impl NetworkOperation {
    pub fn run(&self) {
        match self {
            NetworkOperation::Summary {
                directory,
                unknown_stop_policy,
            } => {
                let directory = Path::new(directory);
                let (grouped, lines, graphs) = load_dataset(directory, unknown_stop_policy)
                    .unwrap_or_else(|e| panic!("failed loading dataset from {directory:?}: {e}"));
                summarize(&grouped, &lines, &graphs)
            }
            NetworkOperation::Render {
                directory,
                output,
                format,
                bidirectional,
                width,
                height,
                node_radius,
                edge_width,
                arrow_size,
                unknown_stop_policy,
            } => {
                let directory = Path::new(directory);
                let (grouped, _, graphs) = load_dataset(directory, unknown_stop_policy)
                    .unwrap_or_else(|e| panic!("failed loading dataset from {directory:?}: {e}"));
                let network = graph_ops::compose_network(&graphs, *bidirectional);
                log::info!(
                    "composed network: {} stops, {} legs",
                    network.node_count(),
                    network.edge_count()
                );
                let positions = render_ops::node_positions(&network, &grouped);
                let options = RenderOptions {
                    width: *width,
                    height: *height,
                    node_radius: *node_radius,
                    edge_width: *edge_width,
                    arrow_size: *arrow_size,
                };
                render_ops::render(&network, &positions, format, Path::new(output), &options)
                    .unwrap_or_else(|e| panic!("failed rendering network to {output}: {e}"));
                log::info!("wrote {output}");
            }
        }
    }
}

/// runs the shared front half of the pipeline: load and group stops,
/// build the code index, load lines, and build all per-line graphs.
fn load_dataset(
    directory: &Path,
    policy: &UnknownStopPolicy,
) -> Result<(Vec<GroupedStop>, Vec<LineRow>, LineGraphs), NetworkError> {
    let stop_rows = stop_ops::load_stops(&directory.join("stops.csv"))?;
    let grouped = stop_ops::group_stops(&stop_rows);
    log::info!(
        "grouped {} stop rows into {} named stops",
        stop_rows.len(),
        grouped.len()
    );
    let code_index = stop_ops::build_code_index(&grouped)?;
    let lines = line_ops::load_lines(&directory.join("lines.csv"))?;
    let graphs = graph_ops::build_line_graphs(directory, &lines, &code_index, policy)?;
    Ok((grouped, lines, graphs))
}

fn summarize(grouped: &[GroupedStop], lines: &[LineRow], graphs: &LineGraphs) {
    let code_total: usize = grouped.iter().map(|g| g.codes.len()).sum();
    println!("{} stop codes across {} named stops", code_total, grouped.len());
    println!("{} lines", lines.len());
    for line in lines.iter().sorted_by_cached_key(|l| l.code.clone()) {
        let outbound = graphs.outbound.get(&line.code);
        let inbound = graphs.inbound.get(&line.code);
        println!(
            "line {} ({}): {} outbound legs, {} inbound legs",
            line.code,
            line.name,
            outbound.map(|g| g.edge_count()).unwrap_or_default(),
            inbound.map(|g| g.edge_count()).unwrap_or_default(),
        );
    }
}
