//! this tool reads a directory of tabular bus stop and line data, builds the
//! directed multigraph of the network, and renders it geographically using
//! stop coordinates as node positions.
use busnet::network::app::NetworkApp;
use clap::Parser;

fn main() {
    env_logger::init();
    let args = NetworkApp::parse();
    args.op.run()
}
