use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::{debug, warn};

const TOKEN_FILE: &str = "token";
const SUBJECT_FILE: &str = "subject";

/// Durable slot for the active credential and its subject id.
///
/// Pure storage: no expiry logic lives here. Constructed once at process
/// start and passed by reference to the session evaluator and authorizer, so
/// every consumer observes the same slot and a `clear` is effective
/// everywhere without propagation.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    dir: PathBuf,
}

impl CredentialStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Persist the credential, and the subject id when known.
    ///
    /// The token write is authoritative. The subject write is best-effort:
    /// losing the subject id degrades convenience, not security, so a failure
    /// there is logged and never blocks the credential.
    ///
    /// # Errors
    /// Returns an error if the data directory or the token file cannot be
    /// written.
    pub fn put(&self, token: &str, subject: Option<&str>) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.token_path(), token)?;

        match subject {
            Some(subject) => {
                if let Err(err) = fs::write(self.subject_path(), subject) {
                    warn!("failed to persist subject id: {err}");
                }
            }
            // No subject on this issuance: drop any stale one.
            None => remove_if_present(self.subject_path()),
        }

        Ok(())
    }

    /// The stored credential, if any.
    #[must_use]
    pub fn get(&self) -> Option<String> {
        read_entry(self.token_path())
    }

    /// The stored subject id, if any.
    #[must_use]
    pub fn peek_subject(&self) -> Option<String> {
        read_entry(self.subject_path())
    }

    /// Remove both entries. Idempotent; missing entries are fine.
    pub fn clear(&self) {
        debug!("clearing credential store");
        remove_if_present(self.token_path());
        remove_if_present(self.subject_path());
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }

    fn subject_path(&self) -> PathBuf {
        self.dir.join(SUBJECT_FILE)
    }
}

fn read_entry(path: PathBuf) -> Option<String> {
    let value = fs::read_to_string(path).ok()?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn remove_if_present(path: PathBuf) {
    if let Err(err) = fs::remove_file(&path) {
        if err.kind() != io::ErrorKind::NotFound {
            warn!("failed to remove {}: {err}", path.display());
        }
    }
}
