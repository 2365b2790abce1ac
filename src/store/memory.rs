//! In-process `FitnessStore` used by the binary's local mode and by tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::StorageError;
use crate::plans::{DietPlan, Workout};
use crate::profile::UserProfile;

use super::traits::{FitnessStore, StoredData};

/// Per-operation write counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteCounts {
    pub save_profile: usize,
    pub replace_workouts: usize,
    pub save_diet_plan: usize,
}

impl WriteCounts {
    pub fn total(&self) -> usize {
        self.save_profile + self.replace_workouts + self.save_diet_plan
    }
}

pub struct MemoryStore {
    data: RwLock<StoredData>,
    authenticated: AtomicBool,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
    latency: Option<Duration>,
    save_profile_calls: AtomicUsize,
    replace_workouts_calls: AtomicUsize,
    save_diet_plan_calls: AtomicUsize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Empty, authenticated store.
    pub fn new() -> Self {
        Self::with_data(StoredData::default())
    }

    /// Authenticated store pre-filled with `data`.
    pub fn with_data(data: StoredData) -> Self {
        Self {
            data: RwLock::new(data),
            authenticated: AtomicBool::new(true),
            fail_writes: AtomicBool::new(false),
            fail_reads: AtomicBool::new(false),
            latency: None,
            save_profile_calls: AtomicUsize::new(0),
            replace_workouts_calls: AtomicUsize::new(0),
            save_diet_plan_calls: AtomicUsize::new(0),
        }
    }

    /// Delay every call by `latency` to simulate a network round trip.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn set_authenticated(&self, authenticated: bool) {
        self.authenticated.store(authenticated, Ordering::SeqCst);
    }

    /// Make every write fail until switched back.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make every read fail until switched back.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn write_counts(&self) -> WriteCounts {
        WriteCounts {
            save_profile: self.save_profile_calls.load(Ordering::SeqCst),
            replace_workouts: self.replace_workouts_calls.load(Ordering::SeqCst),
            save_diet_plan: self.save_diet_plan_calls.load(Ordering::SeqCst),
        }
    }

    /// Copy of everything stored.
    pub async fn data(&self) -> StoredData {
        self.data.read().await.clone()
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    async fn begin_read(&self, operation: &str) -> Result<(), StorageError> {
        self.simulate_latency().await;
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::request_failed(operation, "simulated failure"));
        }
        Ok(())
    }

    /// Count the call, then check auth and the failure switch.
    async fn begin_write(&self, counter: &AtomicUsize, operation: &str) -> Result<(), StorageError> {
        counter.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;
        if !self.is_authenticated() {
            return Err(StorageError::Unauthenticated);
        }
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::request_failed(operation, "simulated failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl FitnessStore for MemoryStore {
    fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::SeqCst)
    }

    async fn get_profile(&self) -> Result<Option<UserProfile>, StorageError> {
        self.begin_read("get_profile").await?;
        Ok(self.data.read().await.profile.clone())
    }

    async fn save_profile(&self, profile: &UserProfile) -> Result<(), StorageError> {
        self.begin_write(&self.save_profile_calls, "save_profile").await?;
        self.data.write().await.profile = Some(profile.clone());
        debug!(name = %profile.name, "Profile stored");
        Ok(())
    }

    async fn get_workouts(&self) -> Result<Vec<Workout>, StorageError> {
        self.begin_read("get_workouts").await?;
        Ok(self.data.read().await.workouts.clone())
    }

    async fn replace_workouts(&self, workouts: &[Workout]) -> Result<(), StorageError> {
        self.begin_write(&self.replace_workouts_calls, "replace_workouts").await?;
        self.data.write().await.workouts = workouts.to_vec();
        debug!(count = workouts.len(), "Workouts stored");
        Ok(())
    }

    async fn get_diet_plan(&self) -> Result<Option<DietPlan>, StorageError> {
        self.begin_read("get_diet_plan").await?;
        Ok(self.data.read().await.diet.clone())
    }

    async fn save_diet_plan(&self, plan: &DietPlan) -> Result<(), StorageError> {
        self.begin_write(&self.save_diet_plan_calls, "save_diet_plan").await?;
        self.data.write().await.diet = Some(plan.clone());
        debug!(calories = plan.calories, "Diet plan stored");
        Ok(())
    }
}
