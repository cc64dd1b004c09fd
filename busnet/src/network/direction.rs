use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// travel direction of a bus line. the dataset identifies directions by a
/// single character, '0' for outbound and '1' for inbound, both in the
/// per-line sequence file names and in edge attributes.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    #[serde(rename = "0")]
    Outbound,
    #[serde(rename = "1")]
    Inbound,
}

impl Direction {
    /// the single-character wire code used by the dataset.
    pub fn code(&self) -> char {
        match self {
            Direction::Outbound => '0',
            Direction::Inbound => '1',
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
