#[derive(thiserror::Error, Debug)]
pub enum NetworkError {
    #[error("failure reading '{0}': {1}")]
    CsvReadError(String, String),
    #[error("stop code '{0}' does not match any grouped stop")]
    UnknownStopCodeError(String),
    #[error("stop code '{code}' appears under both '{first}' and '{second}'")]
    DuplicateStopCodeError {
        code: String,
        first: String,
        second: String,
    },
    #[error("no coordinate available for network node '{0}'")]
    MissingNodePositionError(String),
    #[error("cannot render a network graph with no positioned nodes")]
    EmptyNetworkError,
    #[error("failure writing render output to '{0}': {1}")]
    RenderWriteError(String, String),
    #[error("{0}")]
    OtherError(String),
}
