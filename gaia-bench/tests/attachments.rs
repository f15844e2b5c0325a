//! Attachment paths from a relative data directory reach the file tool
//!
//! Changes the working directory, so this file holds a single test.

use serde_json::json;
use std::path::Path;

use gaia_bench::dataset::{load_questions, DatasetSplit};
use gaia_bench::tools::{ReadFile, Tool, ToolError};

#[tokio::test]
async fn loaded_attachment_path_is_readable() {
    let tmp = tempfile::tempdir().unwrap();
    let split_dir = tmp.path().join("data").join("validation");
    std::fs::create_dir_all(&split_dir).unwrap();
    std::fs::write(split_dir.join("notes.txt"), "Mercury\nVenus\n").unwrap();
    std::fs::write(
        split_dir.join("metadata.jsonl"),
        r#"{"task_id": "a1", "Question": "First planet?", "Level": 1, "Final answer": "Mercury", "file_name": "notes.txt"}
"#,
    )
    .unwrap();

    std::env::set_current_dir(tmp.path()).unwrap();

    let data_dir = Path::new("data");
    let questions = load_questions(data_dir, DatasetSplit::Validation).unwrap();
    let file_path = questions[0].file_path.clone().unwrap();
    assert_eq!(file_path, Path::new("data/validation/notes.txt"));

    let tool = ReadFile::new(DatasetSplit::Validation.dir(data_dir));

    // As shown to the model
    let out = tool
        .execute(json!({ "path": file_path.to_str().unwrap() }))
        .await
        .unwrap();
    assert_eq!(out, "Mercury\nVenus\n");

    // Bare file name
    let out = tool.execute(json!({"path": "notes.txt"})).await.unwrap();
    assert!(out.starts_with("Mercury"));

    // The metadata's own directory is reachable, its parent is not
    std::fs::write(tmp.path().join("data").join("secret.txt"), "hidden").unwrap();
    let err = tool
        .execute(json!({"path": "data/secret.txt"}))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::InvalidInput(_)));

    let err = tool
        .execute(json!({"path": "data/validation/absent.txt"}))
        .await
        .unwrap_err();
    assert!(matches!(err, ToolError::NotFound(_)));
}
