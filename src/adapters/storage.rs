use crate::core::Storage;
use crate::utils::error::{Result, SiteMetricsError};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Directory-backed storage: key `k` lives in `<base_path>/k`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn full_path(&self, path: &str) -> Result<PathBuf> {
        if path.is_empty() || path.contains("..") || Path::new(path).is_absolute() {
            return Err(SiteMetricsError::StorageError {
                key: path.to_string(),
                message: "keys must be relative names inside the data directory".to_string(),
            });
        }
        Ok(self.base_path.join(path))
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Option<Vec<u8>>> {
        let full_path = self.full_path(path)?;
        match tokio::fs::read(&full_path).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.full_path(path)?;

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&full_path, data).await?;
        tracing::debug!("Wrote {} bytes to {}", data.len(), full_path.display());
        Ok(())
    }

    fn describe(&self, path: &str) -> String {
        self.base_path.join(path).display().to_string()
    }
}

/// In-process storage, used for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, path: &str) -> Option<Vec<u8>> {
        self.files.lock().await.get(path).cloned()
    }

    pub async fn insert(&self, path: &str, data: Vec<u8>) {
        self.files.lock().await.insert(path.to_string(), data);
    }

    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.files.lock().await.keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl Storage for MemoryStorage {
    async fn read_file(&self, path: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.get(path).await)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        self.insert(path, data.to_vec()).await;
        Ok(())
    }

    fn describe(&self, path: &str) -> String {
        format!("memory:{}", path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_local_storage_round_trip() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());

        tokio_test::block_on(async {
            assert_eq!(storage.read_file("sitemetrics-theme").await.unwrap(), None);

            storage.write_file("sitemetrics-theme", b"dark").await.unwrap();
            assert_eq!(
                storage.read_file("sitemetrics-theme").await.unwrap(),
                Some(b"dark".to_vec())
            );
        });
        assert!(dir.path().join("sitemetrics-theme").exists());
    }

    #[test]
    fn test_local_storage_creates_nested_directories() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().join("nested"));

        tokio_test::block_on(storage.write_file("reports/example.com_report.zip", b"zip"))
            .unwrap();
        assert!(dir.path().join("nested/reports/example.com_report.zip").exists());
    }

    #[test]
    fn test_local_storage_rejects_escaping_keys() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());

        let result = tokio_test::block_on(storage.write_file("../outside", b"x"));
        assert!(matches!(result, Err(SiteMetricsError::StorageError { .. })));
        assert!(tokio_test::block_on(storage.read_file("")).is_err());
    }

    #[tokio::test]
    async fn test_memory_storage_is_shared_between_clones() {
        let storage = MemoryStorage::new();
        let clone = storage.clone();
        clone.write_file("b", b"2").await.unwrap();
        clone.write_file("a", b"1").await.unwrap();

        assert_eq!(storage.read_file("a").await.unwrap(), Some(b"1".to_vec()));
        assert_eq!(storage.keys().await, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(storage.describe("a"), "memory:a");
    }
}
