//! Built-in sample drills and YAML drill files.
//!
//! The sample set is compiled into the binary from `seed/drills.yaml`. The same YAML shape is
//! accepted from operators: a single drill document, or a list of them.

use crate::error::{DrillsError, DrillsResult};
use crate::model::NewDrill;

const BUILTIN_DRILLS_YAML: &str = include_str!("../seed/drills.yaml");

/// The sample drills shipped with the service.
///
/// # Errors
///
/// Returns `DrillsError::YamlDeserialization` if the embedded file is malformed.
pub fn builtin_drills() -> DrillsResult<Vec<NewDrill>> {
    parse_drills_yaml(BUILTIN_DRILLS_YAML)
}

/// Parses a YAML list of drills.
pub fn parse_drills_yaml(input: &str) -> DrillsResult<Vec<NewDrill>> {
    serde_yaml::from_str(input).map_err(DrillsError::YamlDeserialization)
}

/// Parses one drill document.
pub fn parse_drill_yaml(input: &str) -> DrillsResult<NewDrill> {
    serde_yaml::from_str(input).map_err(DrillsError::YamlDeserialization)
}
