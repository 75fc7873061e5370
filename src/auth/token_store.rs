use std::path::PathBuf;

use anyhow::{Context, Result};

/// Token file name in the config directory
const TOKEN_FILE: &str = "token";

/// Durable storage for the bearer token: a single string key named
/// `token`, read and written only by the session store.
pub struct TokenStore {
    dir: PathBuf,
}

impl TokenStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }

    /// Read the stored token, if any. An empty file counts as absent.
    pub fn load(&self) -> Result<Option<String>> {
        let path = self.token_path();
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path).context("Failed to read token file")?;
        let token = contents.trim().to_string();
        if token.is_empty() {
            Ok(None)
        } else {
            Ok(Some(token))
        }
    }

    pub fn save(&self, token: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir).context("Failed to create token directory")?;
        std::fs::write(self.token_path(), token).context("Failed to write token file")?;
        Ok(())
    }

    /// Remove the stored token. Removing an absent token is not an error.
    pub fn clear(&self) -> Result<()> {
        let path = self.token_path();
        if path.exists() {
            std::fs::remove_file(&path).context("Failed to remove token file")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_absent_token() {
        let dir = tempdir().expect("tempdir");
        let store = TokenStore::new(dir.path().to_path_buf());
        assert!(store.load().expect("load").is_none());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempdir().expect("tempdir");
        let store = TokenStore::new(dir.path().to_path_buf());
        store.save("abc.def").expect("save");
        assert_eq!(store.load().expect("load").as_deref(), Some("abc.def"));
    }

    #[test]
    fn test_clear_removes_token() {
        let dir = tempdir().expect("tempdir");
        let store = TokenStore::new(dir.path().to_path_buf());
        store.save("abc").expect("save");
        store.clear().expect("clear");
        assert!(store.load().expect("load").is_none());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = tempdir().expect("tempdir");
        let store = TokenStore::new(dir.path().to_path_buf());
        store.clear().expect("first clear");
        store.clear().expect("second clear");
    }

    #[test]
    fn test_empty_file_counts_as_absent() {
        let dir = tempdir().expect("tempdir");
        let store = TokenStore::new(dir.path().to_path_buf());
        store.save("").expect("save");
        assert!(store.load().expect("load").is_none());
    }
}
