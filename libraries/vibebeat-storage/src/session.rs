//! User session, liked songs and recently played
//!
//! Loaded once at startup, mutated during the session, written back on
//! explicit mutation (login, logout, like) and periodically by the autosave
//! task.

use crate::error::{Result, StorageError};
use crate::store::{get_value, set_value, KeyValueStore};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use vibebeat_core::RecentlyPlayed;

/// Key holding the remembered user
pub const KEY_USER: &str = "vibeBeatUser";

/// Key holding liked song filenames
pub const KEY_LIKED_SONGS: &str = "vibeBeatLikedSongs";

/// Key holding recently played filenames, most recent first
pub const KEY_RECENTLY_PLAYED: &str = "vibeBeatRecentlyPlayed";

/// Key of the old locally persisted playlists; removed on load
pub const LEGACY_KEY_PLAYLISTS: &str = "vibeBeatPlaylists";

/// Minimum password length accepted by the login form
pub const MIN_PASSWORD_LEN: usize = 6;

const AVATAR_URL: &str = "https://i.pravatar.cc/40";

/// Logged-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    pub email: String,
    /// Local part of the email
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub logged_in_at: Option<DateTime<Utc>>,
}

/// Validate the login form and build a session.
///
/// The email must be a Gmail address whose local part uses only letters,
/// digits and `._%+-`. Both fields are trimmed first.
pub fn validate_login(email: &str, password: &str) -> Result<UserSession> {
    let email = email.trim();
    let password = password.trim();

    let local = email
        .strip_suffix("@gmail.com")
        .filter(|local| {
            !local.is_empty()
                && local
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c))
        })
        .ok_or_else(|| StorageError::InvalidLogin("Please enter a valid Gmail address".into()))?;

    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(StorageError::InvalidLogin(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }

    Ok(UserSession {
        email: email.to_string(),
        name: local.to_string(),
        avatar: Some(AVATAR_URL.to_string()),
        logged_in_at: Some(Utc::now()),
    })
}

#[derive(Debug)]
struct SessionState {
    user: Option<UserSession>,
    remember: bool,
    liked: BTreeSet<String>,
    recent: RecentlyPlayed,
}

/// Process-wide session state over a [`KeyValueStore`]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
    state: Mutex<SessionState>,
}

impl SessionStore {
    /// Load session state from `store`.
    ///
    /// Unreadable entries are logged and treated as absent. The legacy local
    /// playlists key is deleted: playlists live on the backend only.
    pub fn load(store: Arc<dyn KeyValueStore>, recent_limit: usize) -> Result<Self> {
        let user = read_or_warn::<UserSession>(store.as_ref(), KEY_USER);
        let liked: BTreeSet<String> = read_or_warn::<Vec<String>>(store.as_ref(), KEY_LIKED_SONGS)
            .unwrap_or_default()
            .into_iter()
            .collect();
        let recent = RecentlyPlayed::from_entries(
            read_or_warn::<Vec<String>>(store.as_ref(), KEY_RECENTLY_PLAYED).unwrap_or_default(),
            recent_limit,
        );

        if store.get(LEGACY_KEY_PLAYLISTS)?.is_some() {
            warn!(
                key = LEGACY_KEY_PLAYLISTS,
                "Discarding locally stored playlists; server playlists are authoritative"
            );
            store.remove(LEGACY_KEY_PLAYLISTS)?;
            store.flush()?;
        }

        info!(
            user = ?user.as_ref().map(|u| u.name.as_str()),
            liked = liked.len(),
            recent = recent.len(),
            "Session loaded"
        );

        Ok(Self {
            store,
            state: Mutex::new(SessionState {
                remember: user.is_some(),
                user,
                liked,
                recent,
            }),
        })
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ===== User =====

    /// Validate credentials and start a session; `remember` persists it.
    pub fn login(&self, email: &str, password: &str, remember: bool) -> Result<UserSession> {
        let user = validate_login(email, password)?;

        {
            let mut state = self.lock();
            state.user = Some(user.clone());
            state.remember = remember;
        }

        if remember {
            set_value(self.store.as_ref(), KEY_USER, &user)?;
        } else {
            self.store.remove(KEY_USER)?;
        }
        self.store.flush()?;

        info!(user = %user.name, remember, "Logged in");
        Ok(user)
    }

    pub fn logout(&self) -> Result<()> {
        {
            let mut state = self.lock();
            state.user = None;
            state.remember = false;
        }
        self.store.remove(KEY_USER)?;
        self.store.flush()?;
        info!("Logged out");
        Ok(())
    }

    pub fn current_user(&self) -> Option<UserSession> {
        self.lock().user.clone()
    }

    // ===== Liked songs =====

    /// Flip the liked flag for `filename` and persist; returns the new flag.
    pub fn toggle_like(&self, filename: &str) -> Result<bool> {
        let (liked, snapshot) = {
            let mut state = self.lock();
            let liked = if state.liked.remove(filename) {
                false
            } else {
                state.liked.insert(filename.to_string());
                true
            };
            (liked, state.liked.iter().cloned().collect::<Vec<_>>())
        };

        set_value(self.store.as_ref(), KEY_LIKED_SONGS, &snapshot)?;
        self.store.flush()?;

        debug!(file = %filename, liked, "Toggled like");
        Ok(liked)
    }

    pub fn is_liked(&self, filename: &str) -> bool {
        self.lock().liked.contains(filename)
    }

    /// Liked filenames in sorted order
    pub fn liked_songs(&self) -> Vec<String> {
        self.lock().liked.iter().cloned().collect()
    }

    pub fn liked_count(&self) -> usize {
        self.lock().liked.len()
    }

    /// "1 liked song", "3 liked songs"
    pub fn liked_count_label(&self) -> String {
        let n = self.liked_count();
        format!("{} liked song{}", n, if n == 1 { "" } else { "s" })
    }

    // ===== Recently played =====

    pub fn recently_played(&self) -> RecentlyPlayed {
        self.lock().recent.clone()
    }

    /// Replace the in-memory history; written on the next save
    pub fn set_recently_played(&self, recent: &RecentlyPlayed) {
        self.lock().recent = recent.clone();
    }

    // ===== Persistence =====

    /// Write every key and flush.
    pub fn save(&self) -> Result<()> {
        let (user, liked, recent) = {
            let state = self.lock();
            let user = if state.remember {
                state.user.clone()
            } else {
                None
            };
            (
                user,
                state.liked.iter().cloned().collect::<Vec<_>>(),
                state.recent.to_vec(),
            )
        };

        if let Some(user) = &user {
            set_value(self.store.as_ref(), KEY_USER, user)?;
        }
        set_value(self.store.as_ref(), KEY_LIKED_SONGS, &liked)?;
        set_value(self.store.as_ref(), KEY_RECENTLY_PLAYED, &recent)?;
        self.store.flush()
    }

    /// Save every `interval` until the returned handle is shut down.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_autosave(self: &Arc<Self>, interval: Duration) -> AutosaveHandle {
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
        let session = Arc::clone(self);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(e) = session.save() {
                            error!("Autosave failed: {}", e);
                        }
                    }
                    _ = &mut shutdown_rx => {
                        if let Err(e) = session.save() {
                            error!("Final save failed: {}", e);
                        }
                        break;
                    }
                }
            }
        });

        AutosaveHandle {
            shutdown: Some(shutdown_tx),
            task,
        }
    }
}

/// Running autosave task
pub struct AutosaveHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl AutosaveHandle {
    /// Stop the task after one final save
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Err(e) = (&mut self.task).await {
            warn!("Autosave task ended abnormally: {}", e);
        }
    }
}

impl Drop for AutosaveHandle {
    fn drop(&mut self) {
        if self.shutdown.is_some() {
            self.task.abort();
        }
    }
}

fn read_or_warn<T: serde::de::DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    match get_value(store, key) {
        Ok(value) => value,
        Err(e) => {
            warn!(key, error = %e, "Ignoring unreadable session entry");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_gmail_address() {
        let user = validate_login("  dj.vibe+1@gmail.com ", "secret1").unwrap();
        assert_eq!(user.email, "dj.vibe+1@gmail.com");
        assert_eq!(user.name, "dj.vibe+1");
    }

    #[test]
    fn rejects_other_domains() {
        let err = validate_login("me@example.com", "secret1").unwrap_err();
        assert_eq!(err.to_string(), "Please enter a valid Gmail address");
    }

    #[test]
    fn rejects_bad_local_part() {
        assert!(validate_login("@gmail.com", "secret1").is_err());
        assert!(validate_login("a b@gmail.com", "secret1").is_err());
        assert!(validate_login("x@y@gmail.com", "secret1").is_err());
    }

    #[test]
    fn rejects_short_password() {
        let err = validate_login("me@gmail.com", " 12345 ").unwrap_err();
        assert_eq!(err.to_string(), "Password must be at least 6 characters");
        assert_eq!(err.kind(), vibebeat_core::ErrorKind::ValidationFailure);
    }
}
