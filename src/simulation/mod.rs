//! Simulation engine
//!
//! A [`Session`] binds one user, the store, the config and an RNG for the
//! duration of a single operation. The submodules extend it with the stat
//! formulas, classes and exams, the semester state machine and the clock.

pub mod classes;
pub mod clock;
pub mod semester;
pub mod session;
pub mod stats;

pub use semester::SemesterOutcome;
pub use session::Session;
pub use stats::summarize;
