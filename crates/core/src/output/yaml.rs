//! YAML output formatter

use super::FormatError;
use serde::Serialize;

/// Serialize any result structure as YAML
pub fn format_yaml<T: Serialize + ?Sized>(data: &T) -> Result<String, FormatError> {
    serde_yaml::to_string(data).map_err(FormatError::from)
}
