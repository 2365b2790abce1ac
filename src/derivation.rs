//! DerivationEngine: decides when profile changes regenerate the workout
//! plan and the diet plan.
//!
//! The engine keeps the last profile it saw and diffs two disjoint sets of
//! trigger fields against it. Only artifacts whose inputs changed (and whose
//! minimum data is present) are rebuilt. Nothing happens before the initial
//! load completes, and the first evaluation after the load only records the
//! snapshot so loaded data never overwrites loaded artifacts.

use tracing::debug;

use crate::plans::{DietPlan, Workout, diet, workout};
use crate::profile::UserProfile;

/// Profile fields that feed a generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerField {
    Injuries,
    Experience,
    TrainingDays,
    SessionMinutes,
    Modality,
    Weight,
    Height,
    Age,
    Sex,
    Objective,
    ActivityLevel,
    DietaryRestrictions,
    FavoriteFoods,
    AvoidedFoods,
    MealsPerDay,
    WorkoutTime,
}

pub const WORKOUT_TRIGGERS: &[TriggerField] = &[
    TriggerField::Injuries,
    TriggerField::Experience,
    TriggerField::TrainingDays,
    TriggerField::SessionMinutes,
    TriggerField::Modality,
];

pub const DIET_TRIGGERS: &[TriggerField] = &[
    TriggerField::Weight,
    TriggerField::Height,
    TriggerField::Age,
    TriggerField::Sex,
    TriggerField::Objective,
    TriggerField::ActivityLevel,
    TriggerField::DietaryRestrictions,
    TriggerField::FavoriteFoods,
    TriggerField::AvoidedFoods,
    TriggerField::MealsPerDay,
    TriggerField::WorkoutTime,
];

impl TriggerField {
    /// Field-wise comparison. Lists compare by length and then in order.
    pub fn changed(&self, a: &UserProfile, b: &UserProfile) -> bool {
        match self {
            Self::Injuries => a.injuries != b.injuries,
            Self::Experience => a.experience != b.experience,
            Self::TrainingDays => a.training_days_per_week != b.training_days_per_week,
            Self::SessionMinutes => a.session_minutes != b.session_minutes,
            Self::Modality => a.modality != b.modality,
            Self::Weight => a.weight_kg != b.weight_kg,
            Self::Height => a.height_cm != b.height_cm,
            Self::Age => a.age != b.age,
            Self::Sex => a.sex != b.sex,
            Self::Objective => a.objective != b.objective,
            Self::ActivityLevel => a.activity_level != b.activity_level,
            Self::DietaryRestrictions => a.dietary_restrictions != b.dietary_restrictions,
            Self::FavoriteFoods => a.favorite_foods != b.favorite_foods,
            Self::AvoidedFoods => a.avoided_foods != b.avoided_foods,
            Self::MealsPerDay => a.meals_per_day != b.meals_per_day,
            Self::WorkoutTime => a.workout_time != b.workout_time,
        }
    }
}

fn any_changed(fields: &[TriggerField], a: &UserProfile, b: &UserProfile) -> bool {
    fields.iter().any(|f| f.changed(a, b))
}

/// Minimum data for a workout plan.
pub fn can_generate_workouts(profile: &UserProfile) -> bool {
    profile.training_days_per_week > 0
}

/// Minimum data for a diet plan.
pub fn can_generate_diet(profile: &UserProfile) -> bool {
    profile.weight_kg > 0.0 && profile.height_cm > 0 && profile.age > 0 && profile.meals_per_day > 0
}

/// Artifacts rebuilt by one evaluation. `None` means untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Derivation {
    pub workouts: Option<Vec<Workout>>,
    pub diet: Option<DietPlan>,
}

impl Derivation {
    pub fn is_empty(&self) -> bool {
        self.workouts.is_none() && self.diet.is_none()
    }
}

#[derive(Debug, Default)]
pub struct DerivationEngine {
    loaded: bool,
    skip_next: bool,
    previous: Option<UserProfile>,
}

impl DerivationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called once the initial load finished. Arms the one-shot skip so
    /// the next evaluation only records the loaded profile.
    pub fn mark_loaded(&mut self) {
        self.loaded = true;
        self.skip_next = true;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Record `profile` as the baseline without regenerating anything.
    /// Used after reload and reset.
    pub fn seed(&mut self, profile: &UserProfile) {
        self.previous = Some(profile.clone());
        self.skip_next = false;
    }

    /// Diff `profile` against the last snapshot and rebuild what changed.
    pub fn evaluate(&mut self, profile: &UserProfile) -> Derivation {
        if !self.loaded {
            debug!("Derivation skipped: initial load not complete");
            return Derivation::default();
        }

        let previous = self.previous.replace(profile.clone());
        if std::mem::take(&mut self.skip_next) {
            debug!("Derivation seeded from loaded profile");
            return Derivation::default();
        }
        let Some(previous) = previous else {
            return Derivation::default();
        };

        let mut derivation = Derivation::default();

        if any_changed(WORKOUT_TRIGGERS, &previous, profile) {
            if can_generate_workouts(profile) {
                derivation.workouts = Some(workout::generate_plan(profile));
            } else {
                debug!("Workout triggers changed but training days are not set");
            }
        }

        if any_changed(DIET_TRIGGERS, &previous, profile) {
            if can_generate_diet(profile) {
                derivation.diet = Some(diet::generate(profile));
            } else {
                debug!("Diet triggers changed but measurements or meals are missing");
            }
        }

        derivation
    }
}
