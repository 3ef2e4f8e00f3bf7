use crate::core::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = fs::read(full_path)?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }

    async fn exists(&self, path: &str) -> bool {
        Path::new(&self.base_path).join(path).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().join("data").to_str().unwrap().to_string());

        storage.write_file("users.csv", b"id,name").await.unwrap();

        assert!(storage.exists("users.csv").await);
        assert_eq!(storage.read_file("users.csv").await.unwrap(), b"id,name");
    }

    #[tokio::test]
    async fn test_missing_file_is_distinguishable() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().to_str().unwrap().to_string());

        assert!(!storage.exists("users.csv").await);
        assert!(storage.read_file("users.csv").await.is_err());
    }

    #[tokio::test]
    async fn test_write_fully_overwrites() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path().to_str().unwrap().to_string());

        storage
            .write_file("users.csv", b"id,name\n1,long earlier content")
            .await
            .unwrap();
        storage.write_file("users.csv", b"id,name").await.unwrap();

        assert_eq!(storage.read_file("users.csv").await.unwrap(), b"id,name");
    }
}
