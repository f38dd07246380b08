//! Where the proposal database lives when no `--db-path` is given.

use crate::error::{Result, StoreError};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "vallink";
pub const DB_FILENAME: &str = "vallink.sqlite3";

/// Platform data directory for the app: `$XDG_DATA_HOME/vallink` or
/// `~/.local/share/vallink` on Linux.
pub fn data_dir() -> Result<PathBuf> {
    let base = dirs::data_dir().ok_or(StoreError::MissingHomeDir)?;
    if base.as_os_str().is_empty() {
        return Err(StoreError::InvalidDataPath(base));
    }
    Ok(base.join(APP_DIR))
}

/// An explicit path wins over the data directory. Either way the parent
/// directory exists on return.
pub fn resolve_db_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    let path = match custom {
        Some(path) if path.as_os_str().is_empty() => {
            return Err(StoreError::InvalidDataPath(path));
        }
        Some(path) => path,
        None => data_dir()?.join(DB_FILENAME),
    };
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        ensure_private_dir(parent)?;
    }
    Ok(path)
}

fn ensure_private_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        return Ok(());
    }
    fs::create_dir_all(dir)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dir, fs::Permissions::from_mode(0o700))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{resolve_db_path, DB_FILENAME};
    use crate::error::StoreError;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn explicit_path_creates_parent() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join(DB_FILENAME);
        let resolved = resolve_db_path(Some(path.clone())).unwrap();
        assert_eq!(resolved, path);
        assert!(temp.path().join("nested").is_dir());
    }

    #[test]
    fn empty_path_is_rejected() {
        assert!(matches!(
            resolve_db_path(Some(PathBuf::new())),
            Err(StoreError::InvalidDataPath(_))
        ));
    }
}
