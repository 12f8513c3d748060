use std::io::ErrorKind;
use std::path::PathBuf;

use tokio::fs;

use crate::configs::settings::Persistence;
use crate::errors::StorageError;
use crate::models::CachedAccessory;

/// Backing store for cached accessories.
#[derive(Debug, Clone)]
pub struct Storage {
    path: Option<PathBuf>,
}

impl Storage {
    pub fn new(persistence: &Persistence) -> Self {
        Self {
            path: persistence.path.as_ref().map(PathBuf::from),
        }
    }

    pub fn in_memory() -> Self {
        Self { path: None }
    }

    /// A missing file is an empty cache.
    pub async fn load(&self) -> Result<Vec<CachedAccessory>, StorageError> {
        let Some(path) = &self.path else {
            return Ok(Vec::new());
        };

        match fs::read(path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Vec::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn save(&self, accessories: &[CachedAccessory]) -> Result<(), StorageError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let bytes = serde_json::to_vec_pretty(accessories)?;
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, bytes).await?;
        fs::rename(&staging, path).await?;

        Ok(())
    }
}
