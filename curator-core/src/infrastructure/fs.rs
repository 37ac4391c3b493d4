// curator-core/src/infrastructure/fs.rs

use crate::infrastructure::error::InfrastructureError;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Writes `content` to `path` through a temporary file in the same directory,
/// so readers see either the previous artifact or the new one, never half of it.
/// Missing parent directories are created.
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
) -> Result<(), InfrastructureError> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
    temp_file.write_all(content.as_ref())?;
    temp_file
        .persist(path)
        .map_err(|e| InfrastructureError::Io(e.error))?;

    Ok(())
}

/// Removes a file or directory tree. Returns false when there was nothing to remove.
pub fn remove_path(path: &Path) -> Result<bool, InfrastructureError> {
    if !path.exists() {
        return Ok(false);
    }
    if path.is_dir() {
        fs::remove_dir_all(path)?;
    } else {
        fs::remove_file(path)?;
    }
    Ok(true)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write_creates_parent_dirs() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("cleansed").join("clean_orders.csv");

        atomic_write(&file_path, "order_id\n1\n")?;

        assert_eq!(fs::read_to_string(file_path)?, "order_id\n1\n");
        Ok(())
    }

    #[test]
    fn test_atomic_write_overwrites_existing() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("run_results.json");

        atomic_write(&file_path, "{}")?;
        atomic_write(&file_path, "{\"ok\":true}")?;

        assert_eq!(fs::read_to_string(file_path)?, "{\"ok\":true}");
        Ok(())
    }

    #[test]
    fn test_remove_path_handles_missing_and_dirs() -> Result<()> {
        let dir = tempdir()?;
        let out = dir.path().join("output");
        assert!(!remove_path(&out)?);

        atomic_write(out.join("errors").join("orders_errors.csv"), "x")?;
        assert!(remove_path(&out)?);
        assert!(!out.exists());
        Ok(())
    }
}
