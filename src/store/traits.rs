//! Persistence contract for per-user simulation state
//!
//! The core never caches entity state between calls. Every read goes through
//! the store, and the store is the only thing that mutates records.

use chrono::{DateTime, Utc};

use crate::core::error::Result;
use crate::core::types::{EntryId, UserId};
use crate::entity::{AbilityRecord, AttendanceRecord, CompletedCourse, Message, ScheduleEntry, UserProfile};

pub trait Store: Send + Sync {
    // === PROFILES ===

    /// Create the profile row; fails with `UserExists` if present
    fn create_profile(&self, user: UserId, profile: UserProfile) -> Result<()>;

    /// Load the profile; fails with `UserNotFound`
    fn profile(&self, user: UserId) -> Result<UserProfile>;

    fn save_profile(&self, user: UserId, profile: &UserProfile) -> Result<()>;

    /// All registered users
    fn users(&self) -> Result<Vec<UserId>>;

    // === SCHEDULE ===

    fn insert_entry(&self, user: UserId, action: &str, due: DateTime<Utc>) -> Result<EntryId>;

    /// Oldest entry due at or before `now`
    fn next_due(&self, user: UserId, now: DateTime<Utc>) -> Result<Option<ScheduleEntry>>;

    /// Pending entries ordered by due time
    fn schedule(&self, user: UserId) -> Result<Vec<ScheduleEntry>>;

    fn delete_entry(&self, user: UserId, id: EntryId) -> Result<()>;

    fn clear_schedule(&self, user: UserId) -> Result<()>;

    // === ATTENDANCE ===

    /// Count one more attendance; returns the new total
    fn record_attendance(&self, user: UserId, course: &str) -> Result<u32>;

    fn attendance(&self, user: UserId) -> Result<Vec<AttendanceRecord>>;

    fn clear_attendance(&self, user: UserId) -> Result<()>;

    // === COMPLETED COURSES ===

    /// Record a passed course; returns false if it was already recorded
    fn complete_course(&self, user: UserId, course: &str) -> Result<bool>;

    fn has_completed(&self, user: UserId, course: &str) -> Result<bool>;

    fn completed_courses(&self, user: UserId) -> Result<Vec<CompletedCourse>>;

    fn clear_completed(&self, user: UserId) -> Result<()>;

    // === ABILITIES ===

    /// Grant an ability; returns false if the user already had it
    fn grant_ability(&self, user: UserId, ability: &str) -> Result<bool>;

    fn has_ability(&self, user: UserId, ability: &str) -> Result<bool>;

    fn abilities(&self, user: UserId) -> Result<Vec<AbilityRecord>>;

    // === MESSAGES ===

    fn push_message(&self, user: UserId, text: String, time: DateTime<Utc>) -> Result<()>;

    fn messages(&self, user: UserId) -> Result<Vec<Message>>;

    fn clear_messages(&self, user: UserId) -> Result<()>;
}
