//! JSON helpers shared by the binaries.
//!
//! - `read_json_file`: parse a JSON document from disk.
//! - `write_json_file`: pretty-print a serializable value to disk.
use crate::error::{LlahError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Deserialize a JSON file into `T`.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = fs::read_to_string(path).map_err(|source| LlahError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&data)?)
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).map_err(|source| LlahError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| LlahError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PointIndex2D;

    #[test]
    fn writes_into_fresh_directory() {
        let dir = std::env::temp_dir().join(format!("llah_io_{}", std::process::id()));
        let path = dir.join("nested").join("matches.json");
        let value = vec![PointIndex2D::new(1.5, -2.0, 3)];
        write_json_file(&path, &value).expect("write");
        let back: serde_json::Value = read_json_file(&path).expect("read");
        assert_eq!(back[0]["index"], 3);
        assert_eq!(back[0]["x"], 1.5);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_file_reports_path() {
        let path = Path::new("/nonexistent/llah/config.json");
        match read_json_file::<serde_json::Value>(path) {
            Err(LlahError::Io { path: p, .. }) => assert_eq!(p, path),
            other => panic!("unexpected {other:?}"),
        }
    }
}
