//! Debounced persistence: dirty flags, the restartable timer and the
//! coordinator that flushes to a `FitnessStore`.

pub mod coordinator;
pub mod debounce;
pub mod pending;

pub use coordinator::{FlushOutcome, PersistenceCoordinator, SAVE_ERROR, SaveStatus};
pub use debounce::Debouncer;
pub use pending::{Category, PendingChanges};
