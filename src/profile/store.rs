//! Profile store: the single owner of the in-memory `UserProfile`, with
//! broadcast notifications for observers.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{RwLock, broadcast};
use tracing::debug;

use super::model::{ProfileUpdate, UserProfile};

/// Default broadcast channel capacity.
const DEFAULT_BROADCAST_CAPACITY: usize = 64;

/// Change notifications emitted after every mutation.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProfileEvent {
    /// A partial update was merged.
    Updated { profile: UserProfile },
    /// The whole profile was swapped (load / reload).
    Replaced { profile: UserProfile },
    /// The profile went back to its initial state.
    Reset { profile: UserProfile },
}

impl ProfileEvent {
    pub fn profile(&self) -> &UserProfile {
        match self {
            Self::Updated { profile } | Self::Replaced { profile } | Self::Reset { profile } => {
                profile
            }
        }
    }
}

/// Observable container for the user profile.
pub struct ProfileStore {
    profile: RwLock<UserProfile>,
    /// Profile restored by `reset()`.
    initial: UserProfile,
    tx: broadcast::Sender<ProfileEvent>,
}

impl ProfileStore {
    pub fn new(initial: UserProfile) -> Arc<Self> {
        let (tx, _rx) = broadcast::channel(DEFAULT_BROADCAST_CAPACITY);
        Arc::new(Self {
            profile: RwLock::new(initial.clone()),
            initial,
            tx,
        })
    }

    /// Subscribe to profile changes.
    pub fn subscribe(&self) -> broadcast::Receiver<ProfileEvent> {
        self.tx.subscribe()
    }

    /// Current profile, cloned.
    pub async fn snapshot(&self) -> UserProfile {
        self.profile.read().await.clone()
    }

    /// Merge a partial update and return the new profile.
    pub async fn update(&self, update: &ProfileUpdate) -> UserProfile {
        let profile = {
            let mut guard = self.profile.write().await;
            update.apply(&mut guard);
            guard.clone()
        };
        debug!(name = %profile.name, "Profile updated");
        let _ = self.tx.send(ProfileEvent::Updated {
            profile: profile.clone(),
        });
        profile
    }

    /// Swap in a whole profile.
    pub async fn replace(&self, profile: UserProfile) {
        *self.profile.write().await = profile.clone();
        let _ = self.tx.send(ProfileEvent::Replaced { profile });
    }

    /// Restore the initial profile and return it.
    pub async fn reset(&self) -> UserProfile {
        let profile = self.initial.clone();
        *self.profile.write().await = profile.clone();
        let _ = self.tx.send(ProfileEvent::Reset {
            profile: profile.clone(),
        });
        profile
    }
}
