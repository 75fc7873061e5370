use anyhow::{Context, Result};
use keyring::Entry;

const SERVICE_NAME: &str = "spindeck";

/// OS keychain storage for the last-used password, keyed by email.
///
/// Only used to prefill the login form; the session core never consults
/// it and the durable token lives in `TokenStore` instead.
pub struct CredentialStore;

impl CredentialStore {
    pub fn store(email: &str, password: &str) -> Result<()> {
        let entry = Entry::new(SERVICE_NAME, email).context("Failed to create keyring entry")?;
        entry
            .set_password(password)
            .context("Failed to store password in keychain")?;
        Ok(())
    }

    pub fn get_password(email: &str) -> Result<String> {
        let entry = Entry::new(SERVICE_NAME, email).context("Failed to create keyring entry")?;
        entry
            .get_password()
            .context("Failed to retrieve password from keychain")
    }

}
