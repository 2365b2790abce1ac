//! FitnessSession: one user's intake conversation and everything derived
//! from it.
//!
//! Owns the profile store, the derived plans, the derivation engine and the
//! persistence coordinator, and applies each chat turn in order: merge the
//! extracted update, derive, then schedule the dirty categories. Turns are
//! serialized on the state machine lock so every turn sees the state the
//! previous one left.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock, broadcast};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::FitnessConfig;
use crate::derivation::{Derivation, DerivationEngine};
use crate::error::{PlanError, ProfileError, StorageError};
use crate::intake::{ConversationStateMachine, IntakeStep, TurnAction, TurnContext, prompts};
use crate::persist::{Category, FlushOutcome, PendingChanges, PersistenceCoordinator, SaveStatus};
use crate::plans::{DietPlan, Plans, Workout, diet, workout};
use crate::profile::{ProfileEvent, ProfileStore, ProfileUpdate, UserProfile};
use crate::store::{FitnessStore, StoredData};

pub const LOAD_ERROR: &str = "Erro ao carregar dados";
pub const RELOAD_ERROR: &str = "Erro ao recarregar dados";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// The assistant's answer to one message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reply {
    pub text: String,
    pub step: IntakeStep,
    pub workouts_regenerated: bool,
    pub diet_regenerated: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionStatus {
    pub step: IntakeStep,
    pub loaded: bool,
    pub load_error: Option<String>,
    pub save: SaveStatus,
    pub pending: PendingChanges,
    pub workouts: usize,
    pub has_diet: bool,
    pub messages: usize,
}

pub struct FitnessSession {
    config: FitnessConfig,
    store: Arc<dyn FitnessStore>,
    profiles: Arc<ProfileStore>,
    plans: Arc<RwLock<Plans>>,
    engine: Mutex<DerivationEngine>,
    machine: Mutex<ConversationStateMachine>,
    messages: RwLock<Vec<ChatMessage>>,
    coordinator: Arc<PersistenceCoordinator>,
    load_error: RwLock<Option<String>>,
}

impl FitnessSession {
    pub fn new(config: FitnessConfig, store: Arc<dyn FitnessStore>) -> Arc<Self> {
        let initial = config
            .user_name
            .clone()
            .map(UserProfile::with_name)
            .unwrap_or_default();
        let greeting = prompts::question(IntakeStep::BasicInfo, &initial.name);

        let profiles = ProfileStore::new(initial);
        let plans = Arc::new(RwLock::new(Plans::default()));
        let coordinator = PersistenceCoordinator::new(
            Arc::clone(&store),
            Arc::clone(&profiles),
            Arc::clone(&plans),
            config.autosave_delay,
        );

        Arc::new(Self {
            config,
            store,
            profiles,
            plans,
            engine: Mutex::new(DerivationEngine::new()),
            machine: Mutex::new(ConversationStateMachine::new()),
            messages: RwLock::new(vec![ChatMessage::new(Role::Assistant, greeting)]),
            coordinator,
            load_error: RwLock::new(None),
        })
    }

    // ── Loading ─────────────────────────────────────────────────────

    /// Initial load. Runs once; later calls are no-ops.
    ///
    /// Without authentication the session runs on local state only. On a
    /// failed fetch the error is recorded and the session stays unloaded, so
    /// nothing is derived or written until a successful `reload`.
    pub async fn load(&self) -> Result<(), StorageError> {
        let _turn = self.machine.lock().await;
        if self.engine.lock().await.is_loaded() {
            return Ok(());
        }

        if !self.store.is_authenticated() {
            debug!("Not authenticated, using local state only");
            self.finish_load().await;
            return Ok(());
        }

        match self.store.load_all().await {
            Ok(data) => {
                let workouts = data.workouts.len();
                let has_diet = data.diet.is_some();
                self.apply_loaded(data).await;
                self.finish_load().await;
                info!(workouts, has_diet, "Fitness data loaded");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to load fitness data");
                *self.load_error.write().await = Some(LOAD_ERROR.to_string());
                Err(e)
            }
        }
    }

    async fn apply_loaded(&self, data: StoredData) {
        if let Some(mut profile) = data.profile {
            if profile.name.is_empty() {
                if let Some(name) = &self.config.user_name {
                    profile.name = name.clone();
                }
            }
            self.profiles.replace(profile).await;
        }

        let mut plans = self.plans.write().await;
        if !data.workouts.is_empty() {
            plans.workouts = data.workouts;
        }
        if let Some(diet) = data.diet {
            plans.diet = Some(diet);
        }
    }

    /// Enable derivation and saving. The engine's first evaluation only
    /// records the loaded profile.
    async fn finish_load(&self) {
        let profile = self.profiles.snapshot().await;
        let mut engine = self.engine.lock().await;
        engine.mark_loaded();
        engine.evaluate(&profile);
        self.coordinator.mark_loaded();
        *self.load_error.write().await = None;
    }

    /// Replace local state with what the store holds and drop pending
    /// changes. Also completes a load that failed earlier.
    pub async fn reload(&self) -> Result<(), StorageError> {
        let _turn = self.machine.lock().await;
        if !self.store.is_authenticated() {
            return Ok(());
        }

        let data = match self.store.load_all().await {
            Ok(data) => data,
            Err(e) => {
                warn!(error = %e, "Failed to reload fitness data");
                *self.load_error.write().await = Some(RELOAD_ERROR.to_string());
                return Err(e);
            }
        };

        let profile = data.profile.unwrap_or_default();
        self.profiles.replace(profile.clone()).await;
        {
            let mut plans = self.plans.write().await;
            plans.workouts = data.workouts;
            plans.diet = data.diet;
        }
        self.coordinator.clear_pending().await;

        let mut engine = self.engine.lock().await;
        if !engine.is_loaded() {
            engine.mark_loaded();
            self.coordinator.mark_loaded();
        }
        engine.seed(&profile);
        *self.load_error.write().await = None;
        info!("Fitness data reloaded");
        Ok(())
    }

    // ── Conversation ────────────────────────────────────────────────

    /// Process one chat message. Blank input is ignored.
    pub async fn handle_message(&self, input: &str) -> Option<Reply> {
        let text = input.trim();
        if text.is_empty() {
            return None;
        }

        let mut machine = self.machine.lock().await;
        self.push_message(Role::User, text).await;

        if !self.config.reply_delay.is_zero() {
            tokio::time::sleep(self.config.reply_delay).await;
        }

        let profile = self.profiles.snapshot().await;
        let (workouts_count, has_diet) = {
            let plans = self.plans.read().await;
            (plans.workouts.len(), plans.diet.is_some())
        };
        let ctx = TurnContext {
            profile: &profile,
            workouts_count,
            has_diet,
        };
        let turn = machine.advance(ctx, text);

        let derivation = match &turn.profile_update {
            Some(update) => self.apply_update(update).await,
            None => Derivation::default(),
        };

        let mut reply = match turn.action {
            Some(TurnAction::Reset) => {
                let profile = self.reset_state().await;
                prompts::question(IntakeStep::BasicInfo, &profile.name)
            }
            Some(TurnAction::GenerateWorkouts) => self.generate_workouts().await,
            Some(TurnAction::GenerateDiet) => self.generate_diet().await,
            None => turn.reply.unwrap_or_default(),
        };

        let workouts_regenerated = derivation.workouts.is_some();
        let diet_regenerated = derivation.diet.is_some();
        if let Some(notice) = prompts::regeneration_notice(workouts_regenerated, diet_regenerated) {
            reply.push_str("\n\n");
            reply.push_str(notice);
        }

        self.push_message(Role::Assistant, reply.clone()).await;
        Some(Reply {
            text: reply,
            step: machine.step(),
            workouts_regenerated,
            diet_regenerated,
        })
    }

    async fn push_message(&self, role: Role, content: impl Into<String>) {
        self.messages.write().await.push(ChatMessage::new(role, content));
    }

    async fn generate_workouts(&self) -> String {
        let profile = self.profiles.snapshot().await;
        let workouts = workout::generate_plan(&profile);
        let reply = prompts::workout_plan_message(&profile, &workouts);
        self.plans.write().await.workouts = workouts;
        self.coordinator.schedule(Category::Workouts).await;
        reply
    }

    async fn generate_diet(&self) -> String {
        let profile = self.profiles.snapshot().await;
        let plan = diet::generate(&profile);
        let reply = prompts::diet_plan_message(&profile, &plan);
        self.plans.write().await.set_diet(plan);
        self.coordinator.schedule(Category::Diet).await;
        reply
    }

    // ── Profile ─────────────────────────────────────────────────────

    /// Merge a partial update from outside the chat (a form edit). The
    /// update is checked against the current profile first and nothing
    /// changes when it is out of range.
    pub async fn update_profile(
        &self,
        update: &ProfileUpdate,
    ) -> Result<(UserProfile, Derivation), ProfileError> {
        let _turn = self.machine.lock().await;
        update.validate(&self.profiles.snapshot().await)?;
        let derivation = self.apply_update(update).await;
        Ok((self.profiles.snapshot().await, derivation))
    }

    /// Merge, derive, then schedule. Caller holds the machine lock.
    async fn apply_update(&self, update: &ProfileUpdate) -> Derivation {
        let profile = self.profiles.update(update).await;
        let derivation = self.derive(&profile).await;
        self.coordinator.schedule(Category::PersonalInfo).await;
        self.schedule_derived(&derivation).await;
        derivation
    }

    async fn derive(&self, profile: &UserProfile) -> Derivation {
        let derivation = self.engine.lock().await.evaluate(profile);
        if derivation.is_empty() {
            return derivation;
        }

        let mut plans = self.plans.write().await;
        if let Some(workouts) = &derivation.workouts {
            plans.workouts = workouts.clone();
        }
        if let Some(diet) = &derivation.diet {
            plans.diet = Some(diet.clone());
        }
        info!(
            workouts = derivation.workouts.is_some(),
            diet = derivation.diet.is_some(),
            "Regenerated plans from profile change"
        );
        derivation
    }

    async fn schedule_derived(&self, derivation: &Derivation) {
        if derivation.workouts.is_some() {
            self.coordinator.schedule(Category::Workouts).await;
        }
        if derivation.diet.is_some() {
            self.coordinator.schedule(Category::Diet).await;
        }
    }

    // ── Hand edits ──────────────────────────────────────────────────

    /// Edit the workout list in place and schedule a save on success.
    pub async fn edit_workouts<T, F>(&self, edit: F) -> Result<T, PlanError>
    where
        F: FnOnce(&mut Plans) -> Result<T, PlanError>,
    {
        let value = edit(&mut *self.plans.write().await)?;
        self.coordinator.schedule(Category::Workouts).await;
        Ok(value)
    }

    /// Edit the diet plan in place and schedule a save on success.
    pub async fn edit_diet<T, F>(&self, edit: F) -> Result<T, PlanError>
    where
        F: FnOnce(&mut Plans) -> Result<T, PlanError>,
    {
        let value = edit(&mut *self.plans.write().await)?;
        self.coordinator.schedule(Category::Diet).await;
        Ok(value)
    }

    // ── Reset / save / shutdown ─────────────────────────────────────

    /// Restart the intake from the first step with a fresh profile.
    pub async fn reset(&self) {
        let mut machine = self.machine.lock().await;
        machine.reset();
        let profile = self.reset_state().await;
        self.push_message(
            Role::Assistant,
            prompts::question(IntakeStep::BasicInfo, &profile.name),
        )
        .await;
    }

    /// Profile back to its initial state, chat history cleared. Plans are
    /// kept. Caller holds the machine lock.
    async fn reset_state(&self) -> UserProfile {
        self.coordinator.cancel();
        self.messages.write().await.clear();
        let profile = self.profiles.reset().await;
        let derivation = self.derive(&profile).await;
        self.coordinator.schedule(Category::PersonalInfo).await;
        self.schedule_derived(&derivation).await;
        info!("Intake reset");
        profile
    }

    /// Flush everything now.
    pub async fn save_now(&self) -> FlushOutcome {
        self.coordinator.save_now().await
    }

    /// Stop the autosave timer. Call `save_now` first to keep changes.
    pub fn shutdown(&self) {
        self.coordinator.cancel();
        debug!("Session shut down");
    }

    // ── Read access ─────────────────────────────────────────────────

    pub async fn step(&self) -> IntakeStep {
        self.machine.lock().await.step()
    }

    pub async fn profile(&self) -> UserProfile {
        self.profiles.snapshot().await
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ProfileEvent> {
        self.profiles.subscribe()
    }

    pub async fn workouts(&self) -> Vec<Workout> {
        self.plans.read().await.workouts.clone()
    }

    pub async fn diet(&self) -> Option<DietPlan> {
        self.plans.read().await.diet.clone()
    }

    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.messages.read().await.clone()
    }

    pub async fn save_status(&self) -> SaveStatus {
        self.coordinator.status().await
    }

    pub async fn status(&self) -> SessionStatus {
        let (workouts, has_diet) = {
            let plans = self.plans.read().await;
            (plans.workouts.len(), plans.diet.is_some())
        };
        SessionStatus {
            step: self.step().await,
            loaded: self.engine.lock().await.is_loaded(),
            load_error: self.load_error.read().await.clone(),
            save: self.coordinator.status().await,
            pending: self.coordinator.pending().await,
            workouts,
            has_diet,
            messages: self.messages.read().await.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    async fn loaded_session() -> (Arc<FitnessSession>, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let session = FitnessSession::new(FitnessConfig::for_tests(), store.clone());
        session.load().await.unwrap();
        (session, store)
    }

    #[tokio::test]
    async fn blank_input_is_ignored() {
        let (session, _) = loaded_session().await;
        assert!(session.handle_message("   ").await.is_none());
        assert_eq!(session.messages().await.len(), 1);
    }

    #[tokio::test]
    async fn turn_updates_profile_and_history() {
        let (session, _) = loaded_session().await;
        let reply = session
            .handle_message("28 anos, masculino, homem cis")
            .await
            .unwrap();

        assert_eq!(reply.step, IntakeStep::Measurements);
        assert_eq!(session.profile().await.age, 28);
        let messages = session.messages().await;
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[2].content, reply.text);
    }

    #[tokio::test]
    async fn form_edit_regenerates_workouts() {
        let (session, _) = loaded_session().await;
        let (profile, derivation) = session
            .update_profile(&ProfileUpdate {
                training_days_per_week: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(profile.training_days_per_week, 2);
        assert_eq!(derivation.workouts.as_ref().map(Vec::len), Some(2));
        assert_eq!(session.workouts().await.len(), 2);
        assert!(session.status().await.pending.workouts);
    }

    #[tokio::test]
    async fn out_of_range_edit_changes_nothing() {
        let (session, _) = loaded_session().await;
        let result = session
            .update_profile(&ProfileUpdate {
                age: Some(500),
                weight_kg: Some(-3.0),
                training_days_per_week: Some(200),
                ..Default::default()
            })
            .await;

        assert_eq!(result.unwrap_err(), ProfileError::Age(500));
        let profile = session.profile().await;
        assert_eq!(profile.age, 0);
        assert_eq!(profile.training_days_per_week, 0);
        assert!(session.workouts().await.is_empty());
        assert!(session.status().await.pending.is_empty());
    }

    #[tokio::test]
    async fn weight_without_height_is_rejected() {
        let (session, _) = loaded_session().await;
        let result = session
            .update_profile(&ProfileUpdate {
                weight_kg: Some(80.0),
                ..Default::default()
            })
            .await;
        assert_eq!(result.unwrap_err(), ProfileError::MeasurementsIncomplete);
        assert!(!session.profile().await.has_measurements());
    }

    #[tokio::test]
    async fn hand_edit_schedules_save() {
        let (session, _) = loaded_session().await;
        session
            .edit_workouts(|plans| {
                plans.add_workout(Workout::new("Extra", "Domingo", vec![]));
                Ok(())
            })
            .await
            .unwrap();

        let pending = session.status().await.pending;
        assert!(pending.workouts);
        assert!(!pending.diet);

        let err = session
            .edit_diet(|plans| plans.remove_meal(0).map(|_| ()))
            .await
            .unwrap_err();
        assert_eq!(err, PlanError::NoDiet);
        assert!(!session.status().await.pending.diet);
    }

    #[tokio::test]
    async fn unauthenticated_load_runs_locally() {
        let store = Arc::new(MemoryStore::new());
        store.set_authenticated(false);
        let session = FitnessSession::new(FitnessConfig::for_tests(), store.clone());
        session.load().await.unwrap();

        let status = session.status().await;
        assert!(status.loaded);
        assert!(status.load_error.is_none());
        assert_eq!(session.save_now().await, FlushOutcome::LocalOnly);
    }

    #[tokio::test]
    async fn failed_load_leaves_session_unloaded() {
        let store = Arc::new(MemoryStore::new());
        store.set_fail_reads(true);
        let session = FitnessSession::new(FitnessConfig::for_tests(), store.clone());
        assert!(session.load().await.is_err());

        let status = session.status().await;
        assert!(!status.loaded);
        assert_eq!(status.load_error.as_deref(), Some(LOAD_ERROR));

        // nothing derives or saves while unloaded
        let (_, derivation) = session
            .update_profile(&ProfileUpdate {
                training_days_per_week: Some(3),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(derivation.is_empty());
        assert!(session.status().await.pending.is_empty());

        store.set_fail_reads(false);
        session.reload().await.unwrap();
        let status = session.status().await;
        assert!(status.loaded);
        assert!(status.load_error.is_none());
    }

    #[tokio::test]
    async fn reset_keeps_plans_and_restarts_intake() {
        let (session, _) = loaded_session().await;
        session.handle_message("30 anos, feminino, mulher cis").await;
        session.handle_message("/reset").await;

        assert_eq!(session.step().await, IntakeStep::BasicInfo);
        assert_eq!(session.profile().await.age, 0);
        let messages = session.messages().await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, Role::Assistant);
    }
}
