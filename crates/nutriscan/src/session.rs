//! Session boundary.
//!
//! Auth is an external collaborator; the core only needs to know whether a
//! session exists and what bearer token it carries. The provider is passed
//! explicitly to the facade and the migration workflow — there is no global
//! auth state — and exposes a watch channel so callers can react to
//! sign-in/sign-out transitions.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;

use nutriscan_api::TokenSource;
use nutriscan_protocol::paths::default_session_path;

/// The signed-in user as reported by the auth provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// An authenticated session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub user: AuthUser,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session storage unavailable: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode session: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Injected source of the current session.
pub trait SessionProvider: Send + Sync {
    /// Snapshot of the current session, if any.
    fn current(&self) -> Option<Session>;

    /// Watch for sign-in/sign-out transitions.
    fn subscribe(&self) -> watch::Receiver<Option<Session>>;

    /// Install a new session (sign-in or sign-up completed).
    fn sign_in(&self, session: Session) -> Result<(), SessionError>;

    /// Drop the current session.
    fn sign_out(&self);

    fn is_authenticated(&self) -> bool {
        self.current().is_some()
    }
}

/// Session provider backed by a JSON file under the NutriScan home.
///
/// Reads fail open (a corrupt session file means "signed out"); writes fail
/// closed so a login that could not be persisted is reported.
pub struct FileSessionProvider {
    path: PathBuf,
    state: watch::Sender<Option<Session>>,
}

impl FileSessionProvider {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let initial = load_session(&path);
        let (state, _) = watch::channel(initial);
        Self { path, state }
    }

    pub fn open_default() -> Self {
        Self::open(default_session_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionProvider for FileSessionProvider {
    fn current(&self) -> Option<Session> {
        self.state.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.state.subscribe()
    }

    fn sign_in(&self, session: Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_vec_pretty(&session)?;
        std::fs::write(&self.path, payload)?;
        tracing::info!(user = %session.user.id, "session installed");
        self.state.send_replace(Some(session));
        Ok(())
    }

    fn sign_out(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "failed to delete session file");
            }
        }
        self.state.send_replace(None);
    }
}

impl TokenSource for FileSessionProvider {
    fn bearer_token(&self) -> Option<String> {
        self.current().map(|session| session.access_token)
    }

    fn on_unauthorized(&self) {
        tracing::warn!("session rejected by backend, signing out");
        self.sign_out();
    }
}

fn load_session(path: &Path) -> Option<Session> {
    let raw = match std::fs::read(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "failed to read session file");
            return None;
        }
    };
    match serde_json::from_slice(&raw) {
        Ok(session) => Some(session),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "session file corrupt, treating as signed out");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn session_for(user: &str) -> Session {
        Session {
            access_token: format!("token-{user}"),
            refresh_token: None,
            user: AuthUser {
                id: user.to_string(),
                email: Some(format!("{user}@example.com")),
            },
            expires_at: None,
        }
    }

    #[test]
    fn sign_in_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");

        let provider = FileSessionProvider::open(&path);
        assert!(provider.current().is_none());

        provider.sign_in(session_for("u1")).unwrap();
        assert!(provider.is_authenticated());

        let reopened = FileSessionProvider::open(&path);
        assert_eq!(reopened.current().unwrap().user.id, "u1");
    }

    #[test]
    fn sign_out_clears_state_and_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");

        let provider = FileSessionProvider::open(&path);
        provider.sign_in(session_for("u1")).unwrap();
        provider.sign_out();

        assert!(!provider.is_authenticated());
        assert!(!path.exists());
        // Signing out twice is harmless.
        provider.sign_out();
    }

    #[test]
    fn corrupt_session_file_reads_as_signed_out() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, b"]]]").unwrap();

        let provider = FileSessionProvider::open(&path);
        assert!(provider.current().is_none());
    }

    #[test]
    fn subscribers_see_transitions() {
        let dir = TempDir::new().unwrap();
        let provider = FileSessionProvider::open(dir.path().join("session.json"));
        let rx = provider.subscribe();

        provider.sign_in(session_for("u2")).unwrap();
        assert_eq!(rx.borrow().as_ref().unwrap().user.id, "u2");

        provider.sign_out();
        assert!(rx.borrow().is_none());
    }

    #[test]
    fn unauthorized_forces_sign_out() {
        let dir = TempDir::new().unwrap();
        let provider = FileSessionProvider::open(dir.path().join("session.json"));
        provider.sign_in(session_for("u3")).unwrap();

        provider.on_unauthorized();
        assert!(provider.bearer_token().is_none());
    }
}
