use crate::network::graph_ops::NetworkGraph;
use crate::network::network_error::NetworkError;
use crate::network::stop_row::GroupedStop;
use clap::ValueEnum;
use geo::Point;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, ValueEnum, Clone, Copy, Default)]
#[serde(rename_all = "snake_case")]
pub enum RenderFormat {
    #[default]
    Svg,
    GeoJson,
}

/// visual parameters for SVG output. defaults follow the small-node,
/// thin-edge style suited to a city-scale network.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub width: f64,
    pub height: f64,
    pub node_radius: f64,
    pub edge_width: f64,
    pub arrow_size: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            width: 1200.0,
            height: 1200.0,
            node_radius: 2.5,
            edge_width: 0.5,
            arrow_size: 4.0,
        }
    }
}

/// (longitude, latitude) for every node present in the graph. grouped
/// stops that no line visits are left out.
pub fn node_positions(
    graph: &NetworkGraph,
    grouped_stops: &[GroupedStop],
) -> HashMap<String, Point<f64>> {
    grouped_stops
        .iter()
        .filter(|group| graph.contains_stop(&group.name))
        .map(|group| (group.name.clone(), Point::new(group.longitude, group.latitude)))
        .collect()
}

/// renders the composed network to a file in the requested format.
pub fn render(
    graph: &NetworkGraph,
    positions: &HashMap<String, Point<f64>>,
    format: &RenderFormat,
    output: &Path,
    options: &RenderOptions,
) -> Result<(), NetworkError> {
    match format {
        RenderFormat::Svg => render_svg(graph, positions, output, options),
        RenderFormat::GeoJson => write_geojson(graph, positions, output),
    }
}

/// equirectangular viewport mapping from lon,lat into pixel space, with a
/// uniform scale on both axes and latitude increasing upward.
struct Viewport {
    min_x: f64,
    min_y: f64,
    scale: f64,
    height: f64,
    margin: f64,
}

impl Viewport {
    fn fit(positions: &HashMap<String, Point<f64>>, options: &RenderOptions) -> Option<Viewport> {
        let mut points = positions.values();
        let first = points.next()?;
        let (mut min_x, mut max_x) = (first.x(), first.x());
        let (mut min_y, mut max_y) = (first.y(), first.y());
        for point in points {
            min_x = min_x.min(point.x());
            max_x = max_x.max(point.x());
            min_y = min_y.min(point.y());
            max_y = max_y.max(point.y());
        }
        let margin = 0.05 * options.width.min(options.height);
        let span_x = (max_x - min_x).max(f64::EPSILON);
        let span_y = (max_y - min_y).max(f64::EPSILON);
        let scale = ((options.width - 2.0 * margin) / span_x)
            .min((options.height - 2.0 * margin) / span_y);
        Some(Viewport {
            min_x,
            min_y,
            scale,
            height: options.height,
            margin,
        })
    }

    fn project(&self, point: &Point<f64>) -> (f64, f64) {
        let x = self.margin + (point.x() - self.min_x) * self.scale;
        let y = self.height - self.margin - (point.y() - self.min_y) * self.scale;
        (x, y)
    }
}

fn position_of<'a>(
    positions: &'a HashMap<String, Point<f64>>,
    name: &str,
) -> Result<&'a Point<f64>, NetworkError> {
    positions
        .get(name)
        .ok_or_else(|| NetworkError::MissingNodePositionError(name.to_string()))
}

fn render_svg(
    graph: &NetworkGraph,
    positions: &HashMap<String, Point<f64>>,
    output: &Path,
    options: &RenderOptions,
) -> Result<(), NetworkError> {
    let viewport = Viewport::fit(positions, options).ok_or(NetworkError::EmptyNetworkError)?;
    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{:.0}\" height=\"{:.0}\" viewBox=\"0 0 {:.0} {:.0}\">\n",
        options.width, options.height, options.width, options.height
    ));
    svg.push_str(&format!(
        "<defs><marker id=\"arrow\" viewBox=\"0 0 10 10\" refX=\"10\" refY=\"5\" markerWidth=\"{:.1}\" markerHeight=\"{:.1}\" orient=\"auto\"><path d=\"M 0 0 L 10 5 L 0 10 z\" fill=\"black\"/></marker></defs>\n",
        options.arrow_size, options.arrow_size
    ));
    svg.push_str(&format!(
        "<rect width=\"{:.0}\" height=\"{:.0}\" fill=\"white\"/>\n",
        options.width, options.height
    ));
    for (from, to, leg) in graph.legs() {
        let (x1, y1) = viewport.project(position_of(positions, from)?);
        let (x2, y2) = viewport.project(position_of(positions, to)?);
        svg.push_str(&format!(
            "<line x1=\"{x1:.2}\" y1=\"{y1:.2}\" x2=\"{x2:.2}\" y2=\"{y2:.2}\" stroke=\"black\" stroke-width=\"{:.2}\" marker-end=\"url(#arrow)\"><title>line {} direction {}</title></line>\n",
            options.edge_width, leg.line, leg.direction
        ));
    }
    for name in graph.stop_names() {
        let (cx, cy) = viewport.project(position_of(positions, name)?);
        svg.push_str(&format!(
            "<circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{:.2}\" fill=\"lightblue\"/>\n",
            options.node_radius
        ));
    }
    svg.push_str("</svg>\n");
    let filename = output.to_str().unwrap_or_default().to_string();
    std::fs::write(output, svg)
        .map_err(|e| NetworkError::RenderWriteError(filename, format!("{e}")))
}

/// writes the network as a GeoJSON FeatureCollection: one Point feature
/// per stop and one LineString feature per leg, tagged with its line code
/// and direction.
fn write_geojson(
    graph: &NetworkGraph,
    positions: &HashMap<String, Point<f64>>,
    output: &Path,
) -> Result<(), NetworkError> {
    let mut features: Vec<Feature> = vec![];
    for name in graph.stop_names() {
        let point = position_of(positions, name)?;
        let mut properties = JsonObject::new();
        properties.insert(
            "name".to_string(),
            serde_json::Value::from(name.as_str()),
        );
        features.push(Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Point(vec![point.x(), point.y()]))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        });
    }
    for (from, to, leg) in graph.legs() {
        let src = position_of(positions, from)?;
        let dst = position_of(positions, to)?;
        let mut properties = JsonObject::new();
        properties.insert("line".to_string(), serde_json::Value::from(leg.line.as_str()));
        properties.insert(
            "direction".to_string(),
            serde_json::Value::from(leg.direction.to_string()),
        );
        features.push(Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::LineString(vec![
                vec![src.x(), src.y()],
                vec![dst.x(), dst.y()],
            ]))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        });
    }
    let collection = FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    };
    let json = serde_json::to_string(&collection)
        .map_err(|e| NetworkError::OtherError(format!("failure serializing GeoJSON: {e}")))?;
    let filename = output.to_str().unwrap_or_default().to_string();
    std::fs::write(output, json)
        .map_err(|e| NetworkError::RenderWriteError(filename, format!("{e}")))
}
