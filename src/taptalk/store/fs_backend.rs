use super::backend::StorageBackend;
use crate::error::{Result, TaptalkError};
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

/// File-backed key-value storage: each key is a `{key}.json` file under `root`.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(TaptalkError::Store(format!("Invalid storage key: {:?}", key)));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(TaptalkError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(TaptalkError::Io)?;
        Ok(Some(content))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let target = self.key_path(key)?;
        self.ensure_dir()?;

        // Atomic write
        let tmp = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp, value).map_err(TaptalkError::Io)?;
        if let Err(e) = fs::rename(&tmp, &target) {
            let _ = fs::remove_file(&tmp);
            return Err(TaptalkError::Io(e));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FsBackend::new(dir.path());
        assert_eq!(backend.get("profiles").unwrap(), None);
    }

    #[test]
    fn set_creates_directory_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("nested").join("data");
        let backend = FsBackend::new(&root);

        backend.set("profiles", "[]").unwrap();

        assert!(root.join("profiles.json").exists());
        assert_eq!(backend.get("profiles").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn set_overwrites_and_leaves_no_tmp_files() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FsBackend::new(dir.path());

        backend.set("has_seen_intro", "false").unwrap();
        backend.set("has_seen_intro", "true").unwrap();

        assert_eq!(
            backend.get("has_seen_intro").unwrap().as_deref(),
            Some("true")
        );
        let leftovers = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn failed_rename_removes_tmp_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("profiles.json")).unwrap();
        let backend = FsBackend::new(dir.path());

        assert!(backend.set("profiles", "[]").is_err());

        let leftovers = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .count();
        assert_eq!(leftovers, 0);
    }

    #[test]
    fn rejects_keys_that_escape_the_root() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FsBackend::new(dir.path());
        assert!(backend.set("../outside", "x").is_err());
        assert!(backend.get("").is_err());
    }
}
