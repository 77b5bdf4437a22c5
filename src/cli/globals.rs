use crate::auth::store::CredentialStore;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub api_url: String,
    pub data_dir: PathBuf,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(api_url: String, data_dir: PathBuf) -> Self {
        Self { api_url, data_dir }
    }

    /// The process-wide credential store, rooted at the data directory.
    #[must_use]
    pub fn store(&self) -> CredentialStore {
        CredentialStore::new(&self.data_dir)
    }
}
