//! Cache implementations backing the query layer.

mod memory;

pub use memory::InMemoryCache;
