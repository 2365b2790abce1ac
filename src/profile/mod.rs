//! User profile: the data model and its observable container.

pub mod model;
pub mod store;

pub use model::{
    ActivityLevel, BiologicalSex, ExperienceLevel, GenderIdentity, Modality, ProfileUpdate,
    TimeOfDay, TrainingLocation, UserProfile,
};
pub use store::{ProfileEvent, ProfileStore};
