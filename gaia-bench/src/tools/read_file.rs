use async_trait::async_trait;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

use super::{Tool, ToolError};

/// Largest attachment returned to the model (1MB)
const MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Reads a text attachment from the dataset directory
///
/// Relative paths resolve against the attachment root; paths that escape it
/// are refused.
#[derive(Debug, Clone)]
pub struct ReadFile {
    root: PathBuf,
}

impl ReadFile {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a requested path to a file inside the root
    ///
    /// Relative paths are tried as given (attachment paths from the dataset
    /// already include the data directory) and then under the root.
    fn resolve(&self, requested: &str) -> Result<PathBuf, ToolError> {
        let root = self
            .root
            .canonicalize()
            .map_err(|e| ToolError::NotFound(format!("Attachment directory {}: {}", self.root.display(), e)))?;

        let candidate = Path::new(requested);
        let candidates = if candidate.is_absolute() {
            vec![candidate.to_path_buf()]
        } else {
            vec![candidate.to_path_buf(), root.join(candidate)]
        };

        let mut escaped = false;
        for path in candidates {
            let Ok(resolved) = path.canonicalize() else {
                continue;
            };
            if resolved.starts_with(&root) {
                return Ok(resolved);
            }
            escaped = true;
        }

        if escaped {
            Err(ToolError::InvalidInput(format!(
                "Path is outside the attachment directory: {}",
                requested
            )))
        } else {
            Err(ToolError::NotFound(format!("File not found: {}", requested)))
        }
    }
}

#[async_trait]
impl Tool for ReadFile {
    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> &str {
        "Read the text contents of the file attached to the question. \
         Has a 1MB size limit and only reads UTF-8 text."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Path of the attached file, as given in the question"
                }
            },
            "required": ["path"]
        })
    }

    async fn execute(&self, input: Value) -> Result<String, ToolError> {
        let requested = input
            .get("path")
            .and_then(Value::as_str)
            .ok_or_else(|| ToolError::InvalidInput("Missing 'path' field".into()))?;

        let path = self.resolve(requested)?;
        if !path.is_file() {
            return Err(ToolError::InvalidInput(format!("Path is not a file: {}", requested)));
        }

        let metadata = tokio::fs::metadata(&path)
            .await
            .map_err(|e| ToolError::ExecutionFailed(format!("Failed to get file metadata: {}", e)))?;
        if metadata.len() > MAX_FILE_SIZE {
            return Err(ToolError::InvalidInput(format!(
                "File too large ({} bytes, max {} bytes)",
                metadata.len(),
                MAX_FILE_SIZE
            )));
        }

        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| ToolError::ExecutionFailed(format!("Failed to read file: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|_| ToolError::ExecutionFailed(format!("File is not UTF-8 text: {}", requested)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (tempfile::TempDir, ReadFile) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), "Mercury\nVenus\n").unwrap();
        let tool = ReadFile::new(dir.path());
        (dir, tool)
    }

    #[tokio::test]
    async fn test_read_relative() {
        let (_dir, tool) = setup();
        let out = tool.execute(json!({"path": "notes.txt"})).await.unwrap();
        assert_eq!(out, "Mercury\nVenus\n");
    }

    #[tokio::test]
    async fn test_read_absolute_inside_root() {
        let (dir, tool) = setup();
        let path = dir.path().join("notes.txt");
        let out = tool
            .execute(json!({"path": path.to_str().unwrap()}))
            .await
            .unwrap();
        assert!(out.starts_with("Mercury"));
    }

    #[tokio::test]
    async fn test_escape_refused() {
        let (_dir, tool) = setup();
        for path in ["..", "/"] {
            let err = tool.execute(json!({ "path": path })).await.unwrap_err();
            assert!(matches!(err, ToolError::InvalidInput(_)), "{} was not refused", path);
        }
    }

    #[tokio::test]
    async fn test_missing_file() {
        let (_dir, tool) = setup();
        let err = tool.execute(json!({"path": "absent.txt"})).await.unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_binary_rejected() {
        let (dir, tool) = setup();
        std::fs::write(dir.path().join("blob.bin"), [0xff, 0xfe, 0x00, 0x80]).unwrap();
        let err = tool.execute(json!({"path": "blob.bin"})).await.unwrap_err();
        assert!(matches!(err, ToolError::ExecutionFailed(_)));
    }

    #[tokio::test]
    async fn test_missing_path_field() {
        let (_dir, tool) = setup();
        let err = tool.execute(json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidInput(_)));
    }
}
