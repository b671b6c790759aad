use crate::keyring::{KEY_CLIENT_ID, KEY_CLIENT_SECRET};
use dirs::config_dir;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

pub const DEV_CREDENTIALS_FILE_NAME: &str = "dev_credentials.json";

#[derive(Debug, Error)]
pub enum DevKeyringError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct Credentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    client_secret: Option<String>,
}

impl Credentials {
    fn slot(&mut self, key: &str) -> Option<&mut Option<String>> {
        match key {
            KEY_CLIENT_ID => Some(&mut self.client_id),
            KEY_CLIENT_SECRET => Some(&mut self.client_secret),
            _ => None,
        }
    }
}

/// File backed stand-in for the OS keyring
pub struct DevKeyring {
    file_path: PathBuf,
}

impl Default for DevKeyring {
    fn default() -> DevKeyring {
        let mut file_path = match std::env::var(crate::configuration::CONFIG_DIR_ENV_VAR) {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => {
                let mut dir = config_dir().unwrap_or_else(|| PathBuf::from("."));
                dir.push(crate::configuration::DEFAULT_APPLICATION_ID);
                dir
            }
        };
        file_path.push(DEV_CREDENTIALS_FILE_NAME);

        DevKeyring::new(file_path)
    }
}

impl DevKeyring {
    pub fn new(file_path: PathBuf) -> Self {
        Self { file_path }
    }

    fn load_credentials(&self) -> Result<Credentials, DevKeyringError> {
        if self.file_path.exists() {
            let content = fs::read_to_string(&self.file_path)?;
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(Credentials::default())
        }
    }

    fn save_credentials(&self, credentials: &Credentials) -> Result<(), DevKeyringError> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(credentials)?;
        fs::write(&self.file_path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<Option<String>, DevKeyringError> {
        let mut credentials = self.load_credentials()?;
        Ok(credentials.slot(key).and_then(|slot| slot.clone()))
    }

    pub fn put(&self, key: &str, value: &str) -> Result<(), DevKeyringError> {
        let mut credentials = self.load_credentials()?;
        if let Some(slot) = credentials.slot(key) {
            *slot = Some(value.to_string());
            self.save_credentials(&credentials)?;
        }
        Ok(())
    }

    pub fn delete(&self, key: &str) -> Result<(), DevKeyringError> {
        let mut credentials = self.load_credentials()?;
        if let Some(slot) = credentials.slot(key) {
            *slot = None;
            self.save_credentials(&credentials)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_put_get_delete() {
        let dir = tempdir().unwrap();
        let store = DevKeyring::new(dir.path().join("egtree").join(DEV_CREDENTIALS_FILE_NAME));

        assert_eq!(store.get(KEY_CLIENT_ID).unwrap(), None);

        store.put(KEY_CLIENT_ID, "my-client").unwrap();
        store.put(KEY_CLIENT_SECRET, "my-secret").unwrap();
        assert_eq!(store.get(KEY_CLIENT_ID).unwrap().as_deref(), Some("my-client"));
        assert_eq!(store.get(KEY_CLIENT_SECRET).unwrap().as_deref(), Some("my-secret"));

        store.delete(KEY_CLIENT_SECRET).unwrap();
        assert_eq!(store.get(KEY_CLIENT_SECRET).unwrap(), None);
        assert_eq!(store.get(KEY_CLIENT_ID).unwrap().as_deref(), Some("my-client"));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEV_CREDENTIALS_FILE_NAME);
        let store = DevKeyring::new(path.clone());

        store.put("access-token", "abc").unwrap();
        assert_eq!(store.get("access-token").unwrap(), None);
        assert!(!path.exists());
    }
}
