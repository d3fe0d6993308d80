//! Persistence collaborator
//!
//! The simulation talks to storage only through the `Store` trait.

pub mod memory;
pub mod traits;

pub use memory::MemoryStore;
pub use traits::Store;
