pub mod calendar;
pub mod config;
pub mod error;
pub mod time_source;
pub mod types;

pub use calendar::Season;
pub use config::GameConfig;
pub use error::{CampusError, Result};
pub use time_source::{ManualTime, SystemTime, TimeSource};
pub use types::{EntryId, UserId};
