//! JSON context file loader

use costwise_domain::{CostSnapshot, QueryContext};
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur while loading a context file
#[derive(Error, Debug)]
pub enum ContextLoadError {
    #[error("Could not read context file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in context file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Context file {0} must contain a JSON object")]
    NotAnObject(PathBuf),
}

/// Reads query context from JSON files
#[derive(Debug, Clone, Default)]
pub struct JsonContextLoader;

impl JsonContextLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load a context object from `path`
    pub fn load(&self, path: &Path) -> Result<QueryContext, ContextLoadError> {
        let text = std::fs::read_to_string(path).map_err(|source| ContextLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let context = self.parse(&text).map_err(|e| match e {
            ParseFailure::Json(source) => ContextLoadError::Parse {
                path: path.to_path_buf(),
                source,
            },
            ParseFailure::NotAnObject => ContextLoadError::NotAnObject(path.to_path_buf()),
        })?;

        let snapshot = CostSnapshot::from_context(&context);
        if snapshot.is_empty() {
            warn!(
                "Context file {} has no recognizable cost data; analyses will be generic",
                path.display()
            );
        } else {
            debug!(
                "Loaded context from {}: {} daily points, {} services, {} resources",
                path.display(),
                snapshot.daily_costs.len(),
                snapshot.top_services.len(),
                snapshot.resources.len()
            );
        }
        Ok(context)
    }

    fn parse(&self, text: &str) -> Result<QueryContext, ParseFailure> {
        match serde_json::from_str::<Value>(text).map_err(ParseFailure::Json)? {
            Value::Object(map) => Ok(map),
            _ => Err(ParseFailure::NotAnObject),
        }
    }
}

enum ParseFailure {
    Json(serde_json::Error),
    NotAnObject,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_object() {
        let file = write_temp(r#"{"total_cost": 1200.5, "daily_costs": [40, 41]}"#);
        let context = JsonContextLoader::new().load(file.path()).unwrap();
        assert_eq!(context["total_cost"], 1200.5);
        assert_eq!(CostSnapshot::from_context(&context).daily_costs.len(), 2);
    }

    #[test]
    fn test_missing_file() {
        let err = JsonContextLoader::new()
            .load(Path::new("/definitely/not/here.json"))
            .unwrap_err();
        assert!(matches!(err, ContextLoadError::Io { .. }));
    }

    #[test]
    fn test_invalid_json() {
        let file = write_temp("{not json");
        let err = JsonContextLoader::new().load(file.path()).unwrap_err();
        assert!(matches!(err, ContextLoadError::Parse { .. }));
    }

    #[test]
    fn test_array_is_rejected() {
        let file = write_temp("[1, 2, 3]");
        let err = JsonContextLoader::new().load(file.path()).unwrap_err();
        assert!(matches!(err, ContextLoadError::NotAnObject(_)));
    }
}
