//! Credential storage.
//!
//! Client credentials live in the operating system keyring under the service
//! name `egtree`. With the `dev-keyring` feature enabled they are kept in a
//! plain JSON file instead, which is handy on machines without a secret
//! service.

use thiserror::Error;
use tracing::trace;

pub const SERVICE_NAME: &str = "egtree";
pub const KEY_CLIENT_ID: &str = "client-id";
pub const KEY_CLIENT_SECRET: &str = "client-secret";

#[derive(Debug, Error)]
pub enum KeyringError {
    #[error("keyring error: {0}")]
    KeyringAccessError(#[from] keyring::Error),
    #[error("credential store error: {0}")]
    DevKeyringError(#[from] crate::dev_keyring::DevKeyringError),
}

#[derive(Default)]
pub struct Keyring {
    #[cfg(feature = "dev-keyring")]
    dev: crate::dev_keyring::DevKeyring,
}

impl Keyring {
    #[cfg(not(feature = "dev-keyring"))]
    pub fn get(&mut self, key: &str) -> Result<Option<String>, KeyringError> {
        trace!("Reading \"{}\" from the keyring...", key);
        let entry = keyring::Entry::new(SERVICE_NAME, key)?;
        match entry.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(KeyringError::from(e)),
        }
    }

    #[cfg(not(feature = "dev-keyring"))]
    pub fn put(&mut self, key: &str, value: &str) -> Result<(), KeyringError> {
        trace!("Writing \"{}\" to the keyring...", key);
        let entry = keyring::Entry::new(SERVICE_NAME, key)?;
        entry.set_password(value)?;
        Ok(())
    }

    #[cfg(not(feature = "dev-keyring"))]
    pub fn delete(&mut self, key: &str) -> Result<(), KeyringError> {
        trace!("Deleting \"{}\" from the keyring...", key);
        let entry = keyring::Entry::new(SERVICE_NAME, key)?;
        match entry.delete_password() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(KeyringError::from(e)),
        }
    }

    #[cfg(feature = "dev-keyring")]
    pub fn get(&mut self, key: &str) -> Result<Option<String>, KeyringError> {
        trace!("Reading \"{}\" from the development credential file...", key);
        Ok(self.dev.get(key)?)
    }

    #[cfg(feature = "dev-keyring")]
    pub fn put(&mut self, key: &str, value: &str) -> Result<(), KeyringError> {
        trace!("Writing \"{}\" to the development credential file...", key);
        Ok(self.dev.put(key, value)?)
    }

    #[cfg(feature = "dev-keyring")]
    pub fn delete(&mut self, key: &str) -> Result<(), KeyringError> {
        trace!("Deleting \"{}\" from the development credential file...", key);
        Ok(self.dev.delete(key)?)
    }
}
