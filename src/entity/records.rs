//! Per-user records kept alongside the profile

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::types::{EntryId, UserId};

/// An action queued to run at `due`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id: EntryId,
    pub user: UserId,
    pub action: String,
    pub due: DateTime<Utc>,
}

/// Classes attended during the running semester
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub user: UserId,
    pub course: String,
    pub times_present: u32,
}

/// A passed exam
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompletedCourse {
    pub user: UserId,
    pub course: String,
}

/// An ability picked up in class
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AbilityRecord {
    pub user: UserId,
    pub ability: String,
}

/// Notification shown to the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub user: UserId,
    pub text: String,
    pub time: DateTime<Utc>,
}
