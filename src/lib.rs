//! Campus Idle - Timetable-driven university career simulation

pub mod actions;
pub mod core;
pub mod engine;
pub mod entity;
pub mod simulation;
pub mod store;
pub mod timetable;

pub use crate::core::config::GameConfig;
pub use crate::core::error::{CampusError, Result};
pub use crate::core::types::UserId;
pub use engine::Engine;
pub use store::{MemoryStore, Store};
