//! PersistenceCoordinator: batches bursty mutations into one flush per idle
//! window and pushes only the dirty categories to the adapter.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::error::StorageError;
use crate::plans::Plans;
use crate::profile::ProfileStore;
use crate::store::FitnessStore;

use super::debounce::Debouncer;
use super::pending::{Category, PendingChanges};

/// User-facing message stored in [`SaveStatus::error`] after a failed flush.
pub const SAVE_ERROR: &str = "Erro ao salvar alguns dados";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SaveStatus {
    pub is_saving: bool,
    pub last_saved_at: Option<DateTime<Utc>>,
    pub error: Option<String>,
}

/// Result of one flush.
#[derive(Debug, Clone, PartialEq)]
pub enum FlushOutcome {
    /// Nothing was dirty, or the initial load has not finished.
    Idle,
    /// Not authenticated. The flags stay set for a later flush.
    LocalOnly,
    /// Every dirty category was written.
    Saved(PendingChanges),
    /// At least one write failed. `failed` went back into the pending set.
    Failed {
        saved: PendingChanges,
        failed: PendingChanges,
    },
}

pub struct PersistenceCoordinator {
    store: Arc<dyn FitnessStore>,
    profiles: Arc<ProfileStore>,
    plans: Arc<RwLock<Plans>>,
    pending: Mutex<PendingChanges>,
    status: RwLock<SaveStatus>,
    loaded: AtomicBool,
    debouncer: Debouncer,
    /// Serializes flushes so an older snapshot never lands after a newer one.
    flush_lock: Mutex<()>,
}

impl PersistenceCoordinator {
    pub fn new(
        store: Arc<dyn FitnessStore>,
        profiles: Arc<ProfileStore>,
        plans: Arc<RwLock<Plans>>,
        delay: Duration,
    ) -> Arc<Self> {
        Arc::new(Self {
            store,
            profiles,
            plans,
            pending: Mutex::new(PendingChanges::default()),
            status: RwLock::new(SaveStatus::default()),
            loaded: AtomicBool::new(false),
            debouncer: Debouncer::new(delay),
            flush_lock: Mutex::new(()),
        })
    }

    /// Enable scheduling. Until this is called every schedule is ignored so
    /// the load itself never triggers writes.
    pub fn mark_loaded(&self) {
        self.loaded.store(true, Ordering::SeqCst);
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::SeqCst)
    }

    /// Mark `category` dirty and restart the idle timer.
    pub async fn schedule(self: &Arc<Self>, category: Category) {
        if !self.is_loaded() {
            debug!(category = %category, "Ignoring save before initial load");
            return;
        }
        self.pending.lock().await.mark(category);

        let this = Arc::clone(self);
        self.debouncer.schedule(async move {
            this.flush().await;
        });
    }

    /// Write every dirty category now, bypassing the timer.
    pub async fn save_now(&self) -> FlushOutcome {
        if !self.is_loaded() {
            debug!("Ignoring save_now before initial load");
            return FlushOutcome::Idle;
        }
        self.debouncer.cancel();
        let has_diet = self.plans.read().await.diet.is_some();
        self.pending.lock().await.merge(PendingChanges::all(has_diet));
        self.flush().await
    }

    /// Take the dirty flags and push them to the adapter.
    pub async fn flush(&self) -> FlushOutcome {
        let _guard = self.flush_lock.lock().await;

        let dirty = self.pending.lock().await.take();
        if dirty.is_empty() {
            return FlushOutcome::Idle;
        }

        if !self.store.is_authenticated() {
            debug!("Not authenticated, keeping changes local");
            self.pending.lock().await.merge(dirty);
            return FlushOutcome::LocalOnly;
        }

        self.status.write().await.is_saving = true;

        let profile = if dirty.personal_info {
            Some(self.profiles.snapshot().await)
        } else {
            None
        };
        let (workouts, diet) = {
            let plans = self.plans.read().await;
            let workouts = dirty.workouts.then(|| plans.workouts.clone());
            let diet = if dirty.diet { plans.diet.clone() } else { None };
            (workouts, diet)
        };

        let store = &self.store;
        let (profile_result, workouts_result, diet_result) = futures::join!(
            async {
                match &profile {
                    Some(profile) => Some(store.save_profile(profile).await),
                    None => None,
                }
            },
            async {
                match &workouts {
                    Some(workouts) => Some(store.replace_workouts(workouts).await),
                    None => None,
                }
            },
            async {
                match &diet {
                    Some(diet) => Some(store.save_diet_plan(diet).await),
                    None => None,
                }
            },
        );

        let mut failed = PendingChanges::default();
        let results = [
            (Category::PersonalInfo, profile_result),
            (Category::Workouts, workouts_result),
            (Category::Diet, diet_result),
        ];
        for (category, result) in results {
            if let Some(Err(e)) = result {
                report_failure(category, &e);
                failed.mark(category);
            }
        }

        let saved = PendingChanges {
            personal_info: dirty.personal_info && !failed.personal_info,
            workouts: dirty.workouts && !failed.workouts,
            diet: dirty.diet && !failed.diet,
        };

        let mut status = self.status.write().await;
        status.is_saving = false;

        if failed.is_empty() {
            status.last_saved_at = Some(Utc::now());
            status.error = None;
            info!(
                personal_info = saved.personal_info,
                workouts = saved.workouts,
                diet = saved.diet,
                "Fitness data saved"
            );
            FlushOutcome::Saved(saved)
        } else {
            status.error = Some(SAVE_ERROR.to_string());
            self.pending.lock().await.merge(failed);
            FlushOutcome::Failed { saved, failed }
        }
    }

    /// Drop the pending timer. Dirty flags stay set.
    pub fn cancel(&self) {
        self.debouncer.cancel();
    }

    /// Forget all dirty flags (after a reload).
    pub async fn clear_pending(&self) {
        self.cancel();
        *self.pending.lock().await = PendingChanges::default();
    }

    pub async fn pending(&self) -> PendingChanges {
        *self.pending.lock().await
    }

    pub fn is_timer_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub async fn status(&self) -> SaveStatus {
        self.status.read().await.clone()
    }
}

fn report_failure(category: Category, error: &StorageError) {
    warn!(category = %category, error = %error, "Failed to save fitness data");
}
