//! In-memory fake backend - implements all four capability ports over
//! tokio-locked maps. Used by tests and offline runs.

mod backend;

pub use backend::MemoryBackend;
