use serde::{Deserialize, Serialize};

/// a row in the stops CSV file describing one physical stop location.
/// multiple rows may share a display name, one per platform or roadside
/// pole; the loader folds those into a single [GroupedStop].
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StopRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
}

/// a logical stop merging all physical stop codes that share a display
/// name. the coordinate comes from the first row observed for the name.
#[derive(Debug, Clone)]
pub struct GroupedStop {
    pub name: String,
    pub codes: Vec<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl GroupedStop {
    /// the comma-joined code list, matching the layout of the source data.
    pub fn joined_codes(&self) -> String {
        self.codes.join(",")
    }
}
