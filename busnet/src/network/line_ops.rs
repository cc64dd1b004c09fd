use crate::network::direction::Direction;
use crate::network::line_row::LineRow;
use crate::network::network_error::NetworkError;
use crate::network::read_ops;
use std::path::Path;

/// reads the lines table in file order.
pub fn load_lines(path: &Path) -> Result<Vec<LineRow>, NetworkError> {
    read_ops::from_csv::<LineRow>(path)
}

/// reads one per-line stop sequence file, `line_<code>_<d>.csv`, a single
/// column of raw stop codes with a header row that is discarded. blank
/// rows are skipped.
pub fn load_stop_sequence(
    directory: &Path,
    line_code: &str,
    direction: Direction,
) -> Result<Vec<String>, NetworkError> {
    let filename = format!("line_{}_{}.csv", line_code, direction.code());
    let path = directory.join(&filename);
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(&path)
        .map_err(|e| NetworkError::CsvReadError(filename.clone(), format!("{e}")))?;
    let mut codes: Vec<String> = vec![];
    for record in reader.records() {
        let record =
            record.map_err(|e| NetworkError::CsvReadError(filename.clone(), format!("{e}")))?;
        if let Some(code) = record.get(0) {
            if !code.trim().is_empty() {
                codes.push(code.trim().to_string());
            }
        }
    }
    Ok(codes)
}
