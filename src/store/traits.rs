//! `FitnessStore` trait: the async contract every persistence backend
//! implements.

use async_trait::async_trait;

use crate::error::StorageError;
use crate::plans::{DietPlan, Workout};
use crate::profile::UserProfile;

/// Everything persisted for one user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredData {
    pub profile: Option<UserProfile>,
    pub workouts: Vec<Workout>,
    pub diet: Option<DietPlan>,
}

/// Backend-agnostic persistence for profile, workouts and diet plan.
#[async_trait]
pub trait FitnessStore: Send + Sync {
    /// Whether remote writes are possible. When false the session runs in
    /// local-only mode and flushes keep their dirty flags.
    fn is_authenticated(&self) -> bool;

    // ── Profile ─────────────────────────────────────────────────────

    async fn get_profile(&self) -> Result<Option<UserProfile>, StorageError>;

    /// Upsert the profile.
    async fn save_profile(&self, profile: &UserProfile) -> Result<(), StorageError>;

    // ── Workouts ────────────────────────────────────────────────────

    async fn get_workouts(&self) -> Result<Vec<Workout>, StorageError>;

    /// Replace the whole stored workout collection.
    async fn replace_workouts(&self, workouts: &[Workout]) -> Result<(), StorageError>;

    // ── Diet ────────────────────────────────────────────────────────

    async fn get_diet_plan(&self) -> Result<Option<DietPlan>, StorageError>;

    async fn save_diet_plan(&self, plan: &DietPlan) -> Result<(), StorageError>;

    /// Fetch all three collections concurrently.
    async fn load_all(&self) -> Result<StoredData, StorageError> {
        let (profile, workouts, diet) = futures::try_join!(
            self.get_profile(),
            self.get_workouts(),
            self.get_diet_plan()
        )?;
        Ok(StoredData {
            profile,
            workouts,
            diet,
        })
    }
}
