//! JSON output formatter

use super::FormatError;
use serde::Serialize;

/// Serialize any result structure as pretty-printed JSON
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, FormatError> {
    serde_json::to_string_pretty(data).map_err(FormatError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::fixtures;

    #[test]
    fn test_format_json() {
        let json = format_json(&fixtures::map()).unwrap();
        assert!(json.contains("\"root\""));
        assert!(json.contains("\"files\""));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let file = &value["files"][0];
        assert_eq!(file["outline"][0]["label"], "fn hello");
        assert_eq!(file["outline"][0]["kind"], "function");
        assert_eq!(file["folds"][0]["group_id"], "elvish-brace-9");
        assert_eq!(file["folds"][0]["context"], "function");
        assert_eq!(file["folds"][1]["delimiter"], "bracket");
        assert!(file["folds"][1].get("context").is_none());
    }
}
