use crate::network::network_error::NetworkError;
use crate::network::read_ops;
use crate::network::stop_row::{GroupedStop, StopRow};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::path::Path;

/// reads the stops table, one row per physical stop code.
pub fn load_stops(path: &Path) -> Result<Vec<StopRow>, NetworkError> {
    read_ops::from_csv::<StopRow>(path)
}

/// folds raw stop rows into one [GroupedStop] per distinct name, in
/// first-occurrence order. codes accumulate in row order and the first row
/// of each group provides the representative coordinate.
pub fn group_stops(rows: &[StopRow]) -> Vec<GroupedStop> {
    let mut groups: IndexMap<String, GroupedStop> = IndexMap::new();
    for row in rows.iter() {
        match groups.get_mut(&row.name) {
            Some(group) => group.codes.push(row.code.clone()),
            None => {
                groups.insert(
                    row.name.clone(),
                    GroupedStop {
                        name: row.name.clone(),
                        codes: vec![row.code.clone()],
                        latitude: row.latitude,
                        longitude: row.longitude,
                    },
                );
            }
        }
    }
    groups.into_values().collect()
}

/// builds the exact-match index from raw stop code to grouped-stop name
/// used to resolve line sequences. the stops table promises each code
/// belongs to exactly one name; a code observed under two names is
/// reported rather than silently resolved to the first match.
pub fn build_code_index(groups: &[GroupedStop]) -> Result<HashMap<String, String>, NetworkError> {
    let mut index: HashMap<String, String> = HashMap::new();
    for group in groups.iter() {
        for code in group.codes.iter() {
            if let Some(existing) = index.insert(code.clone(), group.name.clone()) {
                if existing != group.name {
                    return Err(NetworkError::DuplicateStopCodeError {
                        code: code.clone(),
                        first: existing,
                        second: group.name.clone(),
                    });
                }
            }
        }
    }
    Ok(index)
}
