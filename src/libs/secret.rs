//! AES-encrypted secrets kept in the data directory.
//!
//! The key and IV are embedded at build time (see `build.rs`), so this keeps
//! secrets out of plain sight on disk, nothing more.

use super::data_storage::DataStorage;
use aes::Aes256;
use anyhow::Result;
use base64::prelude::*;
use block_modes::block_padding::Pkcs7;
use block_modes::{BlockMode, Cbc};
use dialoguer::{theme::ColorfulTheme, Password};
use std::fs;
use std::path::{Path, PathBuf};

include!(concat!(env!("OUT_DIR"), "/app_metadata.rs"));

type Aes256Cbc = Cbc<Aes256, Pkcs7>;

#[derive(Clone, Debug)]
pub struct Secret {
    prompt: String,
    secret_file_path: PathBuf,
    key: Vec<u8>,
    iv: Vec<u8>,
}

impl Secret {
    pub fn new(secret_name: &str, prompt: &str) -> Self {
        let secret_file_path = DataStorage::new().get_path(secret_name).unwrap_or_else(|_| PathBuf::from(secret_name));
        Self::at(&secret_file_path, prompt)
    }

    pub fn at(path: &Path, prompt: &str) -> Self {
        Self {
            prompt: prompt.to_owned(),
            secret_file_path: path.to_path_buf(),
            key: APP_METADATA_ENCRYPTION_KEY.to_vec(),
            iv: APP_METADATA_ENCRYPTION_IV.to_vec(),
        }
    }

    pub fn exists(&self) -> bool {
        self.secret_file_path.exists()
    }

    /// Decrypted value, or `None` when nothing was stored yet.
    pub fn read(&self) -> Result<Option<String>> {
        if !self.exists() {
            return Ok(None);
        }
        let encoded = fs::read_to_string(&self.secret_file_path)?;
        let ciphertext = BASE64_STANDARD.decode(encoded.trim())?;
        let cipher = Aes256Cbc::new_from_slices(&self.key, &self.iv)?;
        let plaintext = cipher.decrypt_vec(&ciphertext)?;
        Ok(Some(String::from_utf8(plaintext)?))
    }

    pub fn store(&self, value: &str) -> Result<()> {
        let cipher = Aes256Cbc::new_from_slices(&self.key, &self.iv)?;
        let ciphertext = cipher.encrypt_vec(value.as_bytes());
        if let Some(parent) = self.secret_file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.secret_file_path, BASE64_STANDARD.encode(ciphertext))?;
        Ok(())
    }

    /// Asks for a value without echo.
    pub fn ask(&self) -> Result<String> {
        Ok(Password::with_theme(&ColorfulTheme::default()).with_prompt(&self.prompt).interact()?)
    }

    /// Asks for a new value twice and stores it.
    pub fn prompt_new(&self) -> Result<String> {
        let value = Password::with_theme(&ColorfulTheme::default())
            .with_prompt(&self.prompt)
            .with_confirmation("Repeat", "Values do not match")
            .interact()?;
        self.store(&value)?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_value_is_encrypted_and_readable() {
        let dir = tempfile::tempdir().unwrap();
        let secret = Secret::at(&dir.path().join(".admin"), "Passphrase");
        assert_eq!(secret.read().unwrap(), None);

        secret.store("s3nha-forte").unwrap();
        let on_disk = fs::read_to_string(dir.path().join(".admin")).unwrap();
        assert!(!on_disk.contains("s3nha-forte"));
        assert_eq!(secret.read().unwrap(), Some("s3nha-forte".to_string()));
    }
}
