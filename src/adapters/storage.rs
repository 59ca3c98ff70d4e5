use crate::core::PersistenceStore;
use crate::utils::error::Result;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use url::form_urlencoded;

/// One file per key under `base_path`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    /// Keys like `@RocketShoes:cart` are not valid file names everywhere, so
    /// the key is percent-encoded. Distinct keys always map to distinct files.
    pub fn file_path(&self, key: &str) -> PathBuf {
        // '*' is the one character byte_serialize leaves alone that Windows rejects
        let name = form_urlencoded::byte_serialize(key.as_bytes())
            .collect::<String>()
            .replace('*', "%2A");
        Path::new(&self.base_path).join(format!("{}.json", name))
    }
}

impl PersistenceStore for LocalStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.file_path(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let path = self.file_path(key);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        // readers never see a half-written cart
        let tmp_path = path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, value).await?;
        tokio::fs::rename(&tmp_path, &path).await?;

        tracing::debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}

/// Process-local store; clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistenceStore for MemoryStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let items = self.items.lock().await;
        Ok(items.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.items.lock().await;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
