//! Error types for the fitness intake engine.

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Plan error: {0}")]
    Plan(#[from] PlanError),

    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors reported by a persistence adapter.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StorageError {
    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Request to {operation} failed: {reason}")]
    RequestFailed { operation: String, reason: String },
}

impl StorageError {
    pub fn request_failed(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::RequestFailed {
            operation: operation.into(),
            reason: reason.into(),
        }
    }
}

/// Errors from hand edits of workouts and diet plans.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    #[error("Workout not found: {0}")]
    WorkoutNotFound(uuid::Uuid),

    #[error("No {kind} at index {index}")]
    IndexOutOfRange { kind: &'static str, index: usize },

    #[error("No diet plan yet")]
    NoDiet,
}

/// A profile edit that would break the profile's value ranges.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileError {
    #[error("Age must be between 1 and 119, got {0}")]
    Age(u32),

    #[error("Weight must be between 20 and 300 kg, got {0}")]
    Weight(f64),

    #[error("Height must be between 100 and 250 cm, got {0}")]
    Height(u32),

    #[error("Weight and height must be set together")]
    MeasurementsIncomplete,

    #[error("Training days must be between 1 and 7, got {0}")]
    TrainingDays(u8),

    #[error("Session length must be between 10 and 300 minutes, got {0}")]
    SessionMinutes(u32),

    #[error("Meals per day must be between 3 and 6, got {0}")]
    MealsPerDay(u8),
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
