use super::NetworkOperation;
use clap::Parser;

/// command line tool for building and rendering a bus network multigraph
/// from tabular stop and line data
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct NetworkApp {
    #[command(subcommand)]
    pub op: NetworkOperation,
}
