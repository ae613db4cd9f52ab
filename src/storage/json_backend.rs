use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::errors::{CoreError, Result};

use super::KeyValueStore;

const VALUE_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// File-backed key-value store keeping one document per key inside a
/// single directory. Writes are staged to a temp sibling and renamed so a
/// crash mid-save never leaves a torn value behind.
#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = match root {
            Some(path) => path,
            None => default_base_dir(),
        };
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    fn value_path(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_key(key), VALUE_EXTENSION))
    }
}

impl KeyValueStore for JsonStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.value_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.value_path(key);
        let tmp = tmp_path(&path);
        write_atomic(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.value_path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

fn default_base_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("expense-core")
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    if !path.is_dir() {
        return Err(CoreError::Storage(format!(
            "store path `{}` is not a directory",
            path.display()
        )));
    }
    Ok(())
}

fn canonical_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "value".into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with_temp_dir() -> (JsonStore, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let store = JsonStore::new(Some(temp.path().to_path_buf())).expect("json store");
        (store, temp)
    }

    #[test]
    fn set_get_remove_round_trip() {
        let (store, _guard) = store_with_temp_dir();
        store.set("budget", "5000").unwrap();
        assert_eq!(store.get("budget").unwrap().as_deref(), Some("5000"));
        store.remove("budget").unwrap();
        assert_eq!(store.get("budget").unwrap(), None);
    }

    #[test]
    fn values_survive_a_new_store_over_the_same_directory() {
        let (store, guard) = store_with_temp_dir();
        store.set("expenses", "[]").unwrap();
        drop(store);
        let reopened = JsonStore::new(Some(guard.path().to_path_buf())).unwrap();
        assert_eq!(reopened.get("expenses").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn removing_a_missing_key_is_a_no_op() {
        let (store, _guard) = store_with_temp_dir();
        store.remove("lastTipDate").expect("remove should not fail");
    }

    #[test]
    fn save_failure_preserves_previous_value() {
        let (store, _guard) = store_with_temp_dir();
        store.set("goals", "[]").unwrap();

        // Collide the temp path with a directory to force the staged write
        // to fail, then confirm the original value is untouched.
        let tmp = tmp_path(&store.value_path("goals"));
        fs::create_dir_all(&tmp).unwrap();
        assert!(store.set("goals", "[1]").is_err());
        assert_eq!(store.get("goals").unwrap().as_deref(), Some("[]"));
    }
}
