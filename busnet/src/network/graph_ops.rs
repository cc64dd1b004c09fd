use crate::network::direction::Direction;
use crate::network::line_ops;
use crate::network::line_row::LineRow;
use crate::network::network_error::NetworkError;
use clap::ValueEnum;
use indexmap::IndexMap;
use kdam::tqdm;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// edge attribute tying one leg of travel between two consecutive grouped
/// stops back to the line and direction that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteLeg {
    pub line: String,
    pub direction: Direction,
}

/// enumerates alternative ways to handle a raw stop code that the stops
/// table does not know about.
#[derive(Serialize, Deserialize, Debug, ValueEnum, Clone, Copy, Default)]
pub enum UnknownStopPolicy {
    #[default]
    Fail,
    Skip,
}

/// a directed multigraph over grouped-stop names. nodes are unique by
/// name; parallel edges between the same pair of stops are preserved, one
/// per line and direction that travels the leg.
#[derive(Debug, Default, Clone)]
pub struct NetworkGraph {
    graph: DiGraph<String, RouteLeg>,
    node_lookup: HashMap<String, NodeIndex>,
}

impl NetworkGraph {
    /// inserts a stop node if absent, returning its index either way.
    pub fn add_stop(&mut self, name: &str) -> NodeIndex {
        match self.node_lookup.get(name) {
            Some(index) => *index,
            None => {
                let index = self.graph.add_node(name.to_string());
                self.node_lookup.insert(name.to_string(), index);
                index
            }
        }
    }

    /// appends a leg between two stops, inserting either node as needed.
    /// repeated calls for the same stop pair accumulate parallel edges.
    pub fn add_leg(&mut self, from: &str, to: &str, leg: RouteLeg) {
        let src = self.add_stop(from);
        let dst = self.add_stop(to);
        self.graph.add_edge(src, dst, leg);
    }

    pub fn contains_stop(&self, name: &str) -> bool {
        self.node_lookup.contains_key(name)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// stop names in node insertion order.
    pub fn stop_names(&self) -> impl Iterator<Item = &String> {
        self.graph.node_weights()
    }

    /// all legs as (from, to, attribute) triples.
    pub fn legs(&self) -> impl Iterator<Item = (&String, &String, &RouteLeg)> {
        self.graph.edge_references().map(move |edge| {
            (
                &self.graph[edge.source()],
                &self.graph[edge.target()],
                edge.weight(),
            )
        })
    }

    /// appends every node and edge of `other` into this graph, merging
    /// nodes by stop name and keeping parallel edges.
    pub fn union(&mut self, other: &NetworkGraph) {
        for index in other.graph.node_indices() {
            self.add_stop(&other.graph[index]);
        }
        for edge in other.graph.edge_references() {
            let from = &other.graph[edge.source()];
            let to = &other.graph[edge.target()];
            self.add_leg(from, to, edge.weight().clone());
        }
    }
}

/// per-line graphs for both directions, keyed by line code in the order
/// the lines table lists them.
#[derive(Debug, Default)]
pub struct LineGraphs {
    pub outbound: IndexMap<String, NetworkGraph>,
    pub inbound: IndexMap<String, NetworkGraph>,
}

/// maps a raw stop code sequence to grouped-stop names through the
/// exact-match index. unknown codes either fail the run or are dropped,
/// per policy.
pub fn resolve_sequence(
    sequence: &[String],
    code_index: &HashMap<String, String>,
    policy: &UnknownStopPolicy,
) -> Result<Vec<String>, NetworkError> {
    let mut resolved: Vec<String> = Vec::with_capacity(sequence.len());
    for code in sequence.iter() {
        match code_index.get(code) {
            Some(name) => resolved.push(name.clone()),
            None => match policy {
                UnknownStopPolicy::Fail => {
                    return Err(NetworkError::UnknownStopCodeError(code.clone()))
                }
                UnknownStopPolicy::Skip => {
                    log::warn!("skipping unknown stop code '{code}'");
                }
            },
        }
    }
    Ok(resolved)
}

/// builds the directed multigraph for one line in one direction: one node
/// per resolved stop name, one edge per consecutive pair in sequence
/// order. sequences of length 0 or 1 yield a graph with no edges.
pub fn build_line_graph(
    sequence: &[String],
    code_index: &HashMap<String, String>,
    line_code: &str,
    direction: Direction,
    policy: &UnknownStopPolicy,
) -> Result<NetworkGraph, NetworkError> {
    let resolved = resolve_sequence(sequence, code_index, policy)?;
    let mut graph = NetworkGraph::default();
    for name in resolved.iter() {
        graph.add_stop(name);
    }
    for pair in resolved.windows(2) {
        graph.add_leg(
            &pair[0],
            &pair[1],
            RouteLeg {
                line: line_code.to_string(),
                direction,
            },
        );
    }
    Ok(graph)
}

/// builds outbound and inbound graphs for every line in the table,
/// reading the two sequence files each line names under `directory`.
pub fn build_line_graphs(
    directory: &Path,
    lines: &[LineRow],
    code_index: &HashMap<String, String>,
    policy: &UnknownStopPolicy,
) -> Result<LineGraphs, NetworkError> {
    let mut result = LineGraphs::default();
    for line in tqdm!(lines.iter(), desc = "building line graphs") {
        let outbound_codes = line_ops::load_stop_sequence(directory, &line.code, Direction::Outbound)?;
        let inbound_codes = line_ops::load_stop_sequence(directory, &line.code, Direction::Inbound)?;
        let outbound =
            build_line_graph(&outbound_codes, code_index, &line.code, Direction::Outbound, policy)?;
        let inbound =
            build_line_graph(&inbound_codes, code_index, &line.code, Direction::Inbound, policy)?;
        log::debug!(
            "line {} ({}): {} outbound legs, {} inbound legs",
            line.code,
            line.name,
            outbound.edge_count(),
            inbound.edge_count()
        );
        result.outbound.insert(line.code.clone(), outbound);
        result.inbound.insert(line.code.clone(), inbound);
    }
    Ok(result)
}

/// unions per-line graphs into the full network. nodes merge by stop
/// name; parallel edges from different lines over the same stop pair are
/// preserved. the default view composes outbound graphs only, which
/// avoids double-drawing two-way segments; `bidirectional` adds the
/// inbound graphs as well.
pub fn compose_network(graphs: &LineGraphs, bidirectional: bool) -> NetworkGraph {
    let mut network = NetworkGraph::default();
    for graph in graphs.outbound.values() {
        network.union(graph);
    }
    if bidirectional {
        for graph in graphs.inbound.values() {
            network.union(graph);
        }
    }
    network
}

#[cfg(test)]
mod test {
    use super::{build_line_graph, compose_network, LineGraphs, NetworkGraph, RouteLeg, UnknownStopPolicy};
    use crate::network::direction::Direction;
    use crate::network::stop_ops::{build_code_index, group_stops};
    use crate::network::stop_row::StopRow;
    use std::collections::HashMap;

    fn row(name: &str, code: &str, lat: f64, lon: f64) -> StopRow {
        StopRow {
            name: name.to_string(),
            code: code.to_string(),
            latitude: lat,
            longitude: lon,
        }
    }

    fn central_north_index() -> HashMap<String, String> {
        let rows = vec![
            row("Central", "A1", 10.0, 20.0),
            row("Central", "A2", 10.0, 20.0),
            row("North", "B1", 11.0, 21.0),
        ];
        build_code_index(&group_stops(&rows)).expect("index should build")
    }

    fn codes(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_single_leg_line() {
        let index = central_north_index();
        let graph = build_line_graph(
            &codes(&["A1", "B1"]),
            &index,
            "7",
            Direction::Outbound,
            &UnknownStopPolicy::Fail,
        )
        .expect("graph should build");
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        let legs: Vec<_> = graph.legs().collect();
        let (from, to, leg) = legs[0];
        assert_eq!(from, "Central");
        assert_eq!(to, "North");
        assert_eq!(leg.line, "7");
        assert_eq!(leg.direction, Direction::Outbound);
    }

    #[test]
    fn test_edge_count_is_sequence_length_minus_one() {
        let index = central_north_index();
        let graph = build_line_graph(
            &codes(&["A1", "B1", "A2", "B1"]),
            &index,
            "7",
            Direction::Outbound,
            &UnknownStopPolicy::Fail,
        )
        .expect("graph should build");
        // A2 resolves to Central, so only two distinct nodes appear
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_empty_and_singleton_sequences_have_no_edges() {
        let index = central_north_index();
        for sequence in [vec![], codes(&["A1"])] {
            let graph = build_line_graph(
                &sequence,
                &index,
                "7",
                Direction::Outbound,
                &UnknownStopPolicy::Fail,
            )
            .expect("graph should build");
            assert_eq!(graph.edge_count(), 0);
        }
    }

    #[test]
    fn test_unknown_code_fails_by_default() {
        let index = central_north_index();
        let result = build_line_graph(
            &codes(&["A1", "Z9"]),
            &index,
            "7",
            Direction::Outbound,
            &UnknownStopPolicy::Fail,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_code_skipped_under_skip_policy() {
        let index = central_north_index();
        let graph = build_line_graph(
            &codes(&["A1", "Z9", "B1"]),
            &index,
            "7",
            Direction::Outbound,
            &UnknownStopPolicy::Skip,
        )
        .expect("graph should build");
        // Z9 dropped, Central->North remains a single leg
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_composition_preserves_parallel_edges() {
        let index = central_north_index();
        let mut graphs = LineGraphs::default();
        for line_code in ["7", "12"] {
            let graph = build_line_graph(
                &codes(&["A1", "B1"]),
                &index,
                line_code,
                Direction::Outbound,
                &UnknownStopPolicy::Fail,
            )
            .expect("graph should build");
            graphs.outbound.insert(line_code.to_string(), graph);
        }
        let network = compose_network(&graphs, false);
        assert_eq!(network.node_count(), 2);
        // both lines travel Central->North; the composed graph keeps both
        assert_eq!(network.edge_count(), 2);
        let lines: Vec<&str> = network.legs().map(|(_, _, leg)| leg.line.as_str()).collect();
        assert!(lines.contains(&"7"));
        assert!(lines.contains(&"12"));
    }

    #[test]
    fn test_composed_edge_count_is_sum_of_members() {
        let index = central_north_index();
        let mut graphs = LineGraphs::default();
        let a = build_line_graph(
            &codes(&["A1", "B1", "A2"]),
            &index,
            "7",
            Direction::Outbound,
            &UnknownStopPolicy::Fail,
        )
        .expect("graph should build");
        let b = build_line_graph(
            &codes(&["B1", "A1"]),
            &index,
            "12",
            Direction::Outbound,
            &UnknownStopPolicy::Fail,
        )
        .expect("graph should build");
        let expected = a.edge_count() + b.edge_count();
        graphs.outbound.insert("7".to_string(), a);
        graphs.outbound.insert("12".to_string(), b);
        let network = compose_network(&graphs, false);
        assert_eq!(network.edge_count(), expected);
    }

    #[test]
    fn test_inbound_graphs_excluded_unless_bidirectional() {
        let index = central_north_index();
        let outbound = build_line_graph(
            &codes(&["A1", "B1"]),
            &index,
            "7",
            Direction::Outbound,
            &UnknownStopPolicy::Fail,
        )
        .expect("graph should build");
        let inbound = build_line_graph(
            &codes(&["B1", "A2"]),
            &index,
            "7",
            Direction::Inbound,
            &UnknownStopPolicy::Fail,
        )
        .expect("graph should build");
        let mut graphs = LineGraphs::default();
        graphs.outbound.insert("7".to_string(), outbound);
        graphs.inbound.insert("7".to_string(), inbound);

        let forward_only = compose_network(&graphs, false);
        assert_eq!(forward_only.edge_count(), 1);

        let both = compose_network(&graphs, true);
        assert_eq!(both.edge_count(), 2);
        let directions: Vec<Direction> =
            both.legs().map(|(_, _, leg)| leg.direction).collect();
        assert!(directions.contains(&Direction::Outbound));
        assert!(directions.contains(&Direction::Inbound));
    }

    #[test]
    fn test_union_merges_nodes_by_name() {
        let mut network = NetworkGraph::default();
        let mut a = NetworkGraph::default();
        a.add_leg(
            "Central",
            "North",
            RouteLeg {
                line: "7".to_string(),
                direction: Direction::Outbound,
            },
        );
        let mut b = NetworkGraph::default();
        b.add_leg(
            "North",
            "East",
            RouteLeg {
                line: "12".to_string(),
                direction: Direction::Outbound,
            },
        );
        network.union(&a);
        network.union(&b);
        assert_eq!(network.node_count(), 3);
        assert_eq!(network.edge_count(), 2);
    }
}
