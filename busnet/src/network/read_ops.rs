use crate::network::network_error::NetworkError;
use serde::de::DeserializeOwned;
use std::path::Path;

/// deserializes all rows of a headered CSV file into a vector.
pub fn from_csv<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, NetworkError> {
    let filename = path.to_str().unwrap_or_default().to_string();
    let reader = csv::ReaderBuilder::new()
        .from_path(path)
        .map_err(|e| NetworkError::CsvReadError(filename.clone(), format!("{e}")))?;
    reader
        .into_deserialize::<T>()
        .map(|r| r.map_err(|e| NetworkError::CsvReadError(filename.clone(), format!("{e}"))))
        .collect::<Result<Vec<T>, NetworkError>>()
}
