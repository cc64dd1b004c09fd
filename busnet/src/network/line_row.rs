use serde::{Deserialize, Serialize};

/// a row in the lines CSV file naming one bus route. each line has an
/// outbound and an inbound stop sequence file keyed by its code.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LineRow {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Name")]
    pub name: String,
}
