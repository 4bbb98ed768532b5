use crate::core::DurableStore;
use crate::utils::error::Result;
use std::io::ErrorKind;
use std::path::PathBuf;

/// File-per-key store rooted at a base directory.
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

    /// Keys may contain characters that are not valid in file names, e.g. `:`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        self.base_path.join(format!("{}.json", name))
    }
}

impl DurableStore for LocalStorage {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(self.path_for(key)).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, key: &str, data: &[u8]) -> Result<()> {
        let full_path = self.path_for(key);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Rename over the target so readers never observe a partial file.
        let tmp_path = full_path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, data).await?;
        tokio::fs::rename(&tmp_path, &full_path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_key_is_encoded_into_file_name() {
        let storage = LocalStorage::new("/data");
        assert_eq!(
            storage.path_for("@RocketShoes:cart"),
            PathBuf::from("/data/_RocketShoes_cart.json")
        );
    }

    #[tokio::test]
    async fn test_missing_key_reads_none() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        assert_eq!(storage.read("absent").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_write_creates_directories_and_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().join("nested").join("dir"));

        storage.write("cart", b"[1]").await.unwrap();
        storage.write("cart", b"[2]").await.unwrap();

        assert_eq!(storage.read("cart").await.unwrap(), Some(b"[2]".to_vec()));
        assert!(!storage.path_for("cart").with_extension("json.tmp").exists());
    }
}
