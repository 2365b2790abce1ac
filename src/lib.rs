//! Fitness intake: conversational anamnesis, plan derivation and debounced
//! persistence.

pub mod config;
pub mod derivation;
pub mod error;
pub mod intake;
pub mod persist;
pub mod plans;
pub mod profile;
pub mod routes;
pub mod session;
pub mod store;
pub mod text;

pub use config::FitnessConfig;
pub use error::{Error, Result};
pub use session::FitnessSession;
