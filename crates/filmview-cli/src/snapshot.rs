use std::fs::{create_dir_all, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use filmview_core::DatabaseSchema;

use crate::error::{CliError, CliResult};

/// Write the schema snapshot as pretty JSON, replacing `path` atomically.
pub fn write_snapshot(path: &Path, schema: &DatabaseSchema) -> CliResult<()> {
    let mut data = serde_json::to_vec_pretty(schema)?;
    data.push(b'\n');

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }

    let tmp_path = temp_path(path)?;
    let mut file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&tmp_path)?;
    file.write_all(&data)?;
    file.sync_all()?;

    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

fn temp_path(path: &Path) -> CliResult<PathBuf> {
    let file_name = path
        .file_name()
        .ok_or_else(|| CliError::InvalidConfig(format!("invalid output path: {}", path.display())))?;
    let tmp_name = format!("{}.tmp", file_name.to_string_lossy());
    Ok(path.with_file_name(tmp_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use filmview_core::SCHEMA_VERSION;

    #[test]
    fn writes_snapshot_and_leaves_no_temp_file() {
        let dir = std::env::temp_dir().join(format!("filmview-snapshot-{}", std::process::id()));
        let path = dir.join("nested").join("schema.json");
        let schema = DatabaseSchema {
            schema_version: SCHEMA_VERSION.to_string(),
            engine: "mysql".to_string(),
            database: Some("sakila".to_string()),
            tables: Vec::new(),
        };

        write_snapshot(&path, &schema).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"engine\": \"mysql\""));
        assert!(!path.with_file_name("schema.json.tmp").exists());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn rejects_paths_without_file_name() {
        assert!(temp_path(Path::new("/")).is_err());
    }
}
