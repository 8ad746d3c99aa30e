//! Schema loading from JSON files.

use anyhow::{Context, Result};
use formulasense_core::Schema;
use std::path::Path;

/// Load a schema document from a JSON file.
pub fn load_schema(path: &Path) -> Result<Schema> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema file: {}", path.display()))?;

    Schema::from_json(&content)
        .with_context(|| format!("Failed to load schema from {}", path.display()))
}

/// Load the schema when a path is given, otherwise start from an empty one.
pub fn load_optional_schema(path: Option<&Path>) -> Result<Schema> {
    match path {
        Some(path) => load_schema(path),
        None => Ok(Schema::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_schema_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"rep": {{"columns": [{{"name": "name", "dataType": "text"}}]}}}}"#
        )
        .unwrap();

        let schema = load_schema(file.path()).unwrap();
        assert_eq!(schema.columns_of("rep").len(), 1);
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = load_schema(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("invalid schema document"));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_schema(Path::new("/nonexistent/schema.json"));
        assert!(result.is_err());
    }

    #[test]
    fn test_no_path_is_empty_schema() {
        let schema = load_optional_schema(None).unwrap();
        assert_eq!(schema.table_names().count(), 0);
    }
}
