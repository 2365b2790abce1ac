//! Persistence layer: the adapter contract and the in-memory backend.

pub mod memory;
pub mod traits;

pub use memory::{MemoryStore, WriteCounts};
pub use traits::{FitnessStore, StoredData};
