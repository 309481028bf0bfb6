//! File-backed session storage.

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::warn;

use birdseye_client::Client;
use birdseye_core::{BaseUrl, TokenKey, TokenStore};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Stored session data.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredSession {
    base_url: Option<String>,
    access_token: Option<String>,
    refresh_token: Option<String>,
    csrf_token: Option<String>,
}

impl StoredSession {
    fn slot(&mut self, key: TokenKey) -> &mut Option<String> {
        match key {
            TokenKey::Access => &mut self.access_token,
            TokenKey::Refresh => &mut self.refresh_token,
            TokenKey::Csrf => &mut self.csrf_token,
        }
    }

    fn read_slot(&self, key: TokenKey) -> Option<&String> {
        match key {
            TokenKey::Access => self.access_token.as_ref(),
            TokenKey::Refresh => self.refresh_token.as_ref(),
            TokenKey::Csrf => self.csrf_token.as_ref(),
        }
    }
}

/// Token store persisting the session to a mode-0600 JSON file.
///
/// Persistence failures are logged and do not fail the session
/// operation that triggered the write.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    state: Mutex<StoredSession>,
}

/// Get the default session file path.
fn session_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "birdseye").context("Could not determine config directory")?;

    let data_dir = dirs.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data directory")?;

    Ok(data_dir.join("session.json"))
}

impl FileTokenStore {
    /// Open a store at an explicit path, loading any existing session.
    pub fn open(path: PathBuf) -> Result<Self> {
        let state = if path.exists() {
            let json = fs::read_to_string(&path).context("Failed to read session file")?;
            serde_json::from_str(&json).context("Invalid session file")?
        } else {
            StoredSession::default()
        };

        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    /// Open the store at the default per-user location.
    pub fn open_default() -> Result<Self> {
        Self::open(session_path()?)
    }

    /// The server this session belongs to, when one is stored.
    pub fn base_url(&self) -> Result<Option<BaseUrl>> {
        self.state
            .lock()
            .unwrap()
            .base_url
            .as_deref()
            .map(BaseUrl::new)
            .transpose()
            .context("Invalid base URL in session file")
    }

    /// Record the server this session belongs to.
    pub fn set_base_url(&self, base: &BaseUrl) {
        let mut state = self.state.lock().unwrap();
        state.base_url = Some(base.as_str().to_string());
        self.persist(&state);
    }

    fn persist(&self, state: &StoredSession) {
        let json = match serde_json::to_string_pretty(state) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "failed to serialize session");
                return;
            }
        };

        if let Err(e) = fs::write(&self.path, &json) {
            warn!(error = %e, path = %self.path.display(), "failed to write session file");
            return;
        }

        // Set restrictive permissions (Unix only)
        #[cfg(unix)]
        {
            if let Ok(metadata) = fs::metadata(&self.path) {
                let mut perms = metadata.permissions();
                perms.set_mode(0o600);
                if let Err(e) = fs::set_permissions(&self.path, perms) {
                    warn!(error = %e, "failed to restrict session file permissions");
                }
            }
        }
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, key: TokenKey) -> Option<String> {
        self.state.lock().unwrap().read_slot(key).cloned()
    }

    fn set(&self, key: TokenKey, value: &str) {
        let mut state = self.state.lock().unwrap();
        *state.slot(key) = Some(value.to_string());
        self.persist(&state);
    }

    fn remove(&self, key: TokenKey) {
        let mut state = self.state.lock().unwrap();
        *state.slot(key) = None;
        self.persist(&state);
    }
}

/// Build a client from the stored session.
pub fn open_client() -> Result<Client> {
    let store = FileTokenStore::open_default()?;
    let base = store
        .base_url()?
        .context("No active session. Run 'birdseye login' first.")?;
    Ok(Client::with_store(base, Arc::new(store)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn round_trips_across_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = FileTokenStore::open(path.clone()).unwrap();
        store.set_base_url(&BaseUrl::new("http://localhost:8088").unwrap());
        store.set(TokenKey::Access, "acc");
        store.set(TokenKey::Refresh, "ref");

        let reopened = FileTokenStore::open(path).unwrap();
        assert_eq!(
            reopened.base_url().unwrap().unwrap().as_str(),
            "http://localhost:8088"
        );
        assert_eq!(reopened.get(TokenKey::Access), Some("acc".to_string()));
        assert_eq!(reopened.get(TokenKey::Refresh), Some("ref".to_string()));
        assert_eq!(reopened.get(TokenKey::Csrf), None);
    }

    #[test]
    fn clear_removes_tokens_but_keeps_base_url() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = FileTokenStore::open(path.clone()).unwrap();
        store.set_base_url(&BaseUrl::new("http://localhost:8088").unwrap());
        store.set(TokenKey::Access, "acc");
        store.clear();

        let reopened = FileTokenStore::open(path).unwrap();
        assert_eq!(reopened.get(TokenKey::Access), None);
        assert!(reopened.base_url().unwrap().is_some());
    }

    #[cfg(unix)]
    #[test]
    fn session_file_is_owner_only() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = FileTokenStore::open(path.clone()).unwrap();
        store.set(TokenKey::Access, "acc");

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
