//! In-memory Store implementation for tests and local runs.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use ahash::AHashMap;
use chrono::{DateTime, Utc};

use crate::core::error::{CampusError, Result};
use crate::core::types::{EntryId, UserId};
use crate::entity::{AbilityRecord, AttendanceRecord, CompletedCourse, Message, ScheduleEntry, UserProfile};
use crate::store::traits::Store;

/// Everything owned by one user
#[derive(Debug, Clone)]
struct UserTables {
    profile: UserProfile,
    schedule: Vec<ScheduleEntry>,
    attendance: Vec<AttendanceRecord>,
    completed: Vec<String>,
    abilities: Vec<String>,
    messages: Vec<Message>,
}

impl UserTables {
    fn new(profile: UserProfile) -> Self {
        Self {
            profile,
            schedule: Vec::new(),
            attendance: Vec::new(),
            completed: Vec::new(),
            abilities: Vec::new(),
            messages: Vec::new(),
        }
    }
}

/// Stores every user's tables behind a single `RwLock`.
///
/// Entry ids come from a store-wide counter so they stay unique across users.
pub struct MemoryStore {
    users: RwLock<AHashMap<UserId, UserTables>>,
    next_entry: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(AHashMap::new()),
            next_entry: AtomicU64::new(1),
        }
    }

    fn read<T>(&self, user: UserId, f: impl FnOnce(&UserTables) -> T) -> Result<T> {
        let users = self.users.read().map_err(|_| CampusError::LockPoisoned)?;
        let tables = users.get(&user).ok_or(CampusError::UserNotFound(user))?;
        Ok(f(tables))
    }

    fn write<T>(&self, user: UserId, f: impl FnOnce(&mut UserTables) -> T) -> Result<T> {
        let mut users = self.users.write().map_err(|_| CampusError::LockPoisoned)?;
        let tables = users.get_mut(&user).ok_or(CampusError::UserNotFound(user))?;
        Ok(f(tables))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for MemoryStore {
    fn create_profile(&self, user: UserId, profile: UserProfile) -> Result<()> {
        let mut users = self.users.write().map_err(|_| CampusError::LockPoisoned)?;
        if users.contains_key(&user) {
            return Err(CampusError::UserExists(user));
        }
        users.insert(user, UserTables::new(profile));
        Ok(())
    }

    fn profile(&self, user: UserId) -> Result<UserProfile> {
        self.read(user, |t| t.profile.clone())
    }

    fn save_profile(&self, user: UserId, profile: &UserProfile) -> Result<()> {
        self.write(user, |t| t.profile = profile.clone())
    }

    fn users(&self) -> Result<Vec<UserId>> {
        let users = self.users.read().map_err(|_| CampusError::LockPoisoned)?;
        let mut ids: Vec<UserId> = users.keys().copied().collect();
        ids.sort_unstable();
        Ok(ids)
    }

    fn insert_entry(&self, user: UserId, action: &str, due: DateTime<Utc>) -> Result<EntryId> {
        let id = EntryId(self.next_entry.fetch_add(1, Ordering::Relaxed));
        self.write(user, |t| {
            t.schedule.push(ScheduleEntry {
                id,
                user,
                action: action.to_string(),
                due,
            });
            id
        })
    }

    fn next_due(&self, user: UserId, now: DateTime<Utc>) -> Result<Option<ScheduleEntry>> {
        self.read(user, |t| {
            t.schedule
                .iter()
                .filter(|entry| entry.due <= now)
                .min_by_key(|entry| (entry.due, entry.id))
                .cloned()
        })
    }

    fn schedule(&self, user: UserId) -> Result<Vec<ScheduleEntry>> {
        self.read(user, |t| {
            let mut entries = t.schedule.clone();
            entries.sort_by_key(|entry| (entry.due, entry.id));
            entries
        })
    }

    fn delete_entry(&self, user: UserId, id: EntryId) -> Result<()> {
        self.write(user, |t| t.schedule.retain(|entry| entry.id != id))
    }

    fn clear_schedule(&self, user: UserId) -> Result<()> {
        self.write(user, |t| t.schedule.clear())
    }

    fn record_attendance(&self, user: UserId, course: &str) -> Result<u32> {
        self.write(user, |t| {
            if let Some(record) = t.attendance.iter_mut().find(|r| r.course == course) {
                record.times_present += 1;
                return record.times_present;
            }
            t.attendance.push(AttendanceRecord {
                user,
                course: course.to_string(),
                times_present: 1,
            });
            1
        })
    }

    fn attendance(&self, user: UserId) -> Result<Vec<AttendanceRecord>> {
        self.read(user, |t| t.attendance.clone())
    }

    fn clear_attendance(&self, user: UserId) -> Result<()> {
        self.write(user, |t| t.attendance.clear())
    }

    fn complete_course(&self, user: UserId, course: &str) -> Result<bool> {
        self.write(user, |t| {
            if t.completed.iter().any(|c| c == course) {
                return false;
            }
            t.completed.push(course.to_string());
            true
        })
    }

    fn has_completed(&self, user: UserId, course: &str) -> Result<bool> {
        self.read(user, |t| t.completed.iter().any(|c| c == course))
    }

    fn completed_courses(&self, user: UserId) -> Result<Vec<CompletedCourse>> {
        self.read(user, |t| {
            t.completed
                .iter()
                .map(|course| CompletedCourse {
                    user,
                    course: course.clone(),
                })
                .collect()
        })
    }

    fn clear_completed(&self, user: UserId) -> Result<()> {
        self.write(user, |t| t.completed.clear())
    }

    fn grant_ability(&self, user: UserId, ability: &str) -> Result<bool> {
        self.write(user, |t| {
            if t.abilities.iter().any(|a| a == ability) {
                return false;
            }
            t.abilities.push(ability.to_string());
            true
        })
    }

    fn has_ability(&self, user: UserId, ability: &str) -> Result<bool> {
        self.read(user, |t| t.abilities.iter().any(|a| a == ability))
    }

    fn abilities(&self, user: UserId) -> Result<Vec<AbilityRecord>> {
        self.read(user, |t| {
            t.abilities
                .iter()
                .map(|ability| AbilityRecord {
                    user,
                    ability: ability.clone(),
                })
                .collect()
        })
    }

    fn push_message(&self, user: UserId, text: String, time: DateTime<Utc>) -> Result<()> {
        self.write(user, |t| t.messages.push(Message { user, text, time }))
    }

    fn messages(&self, user: UserId) -> Result<Vec<Message>> {
        self.read(user, |t| t.messages.clone())
    }

    fn clear_messages(&self, user: UserId) -> Result<()> {
        self.write(user, |t| t.messages.clear())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GameConfig;
    use chrono::{Duration, TimeZone};

    fn store_with_user() -> (MemoryStore, UserId) {
        let store = MemoryStore::new();
        let user = UserId::new();
        store
            .create_profile(user, UserProfile::new(&GameConfig::default()))
            .unwrap();
        (store, user)
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let (store, user) = store_with_user();
        let result = store.create_profile(user, UserProfile::new(&GameConfig::default()));
        assert!(matches!(result, Err(CampusError::UserExists(_))));
    }

    #[test]
    fn test_unknown_user() {
        let store = MemoryStore::new();
        assert!(matches!(store.profile(UserId::new()), Err(CampusError::UserNotFound(_))));
    }

    #[test]
    fn test_next_due_picks_oldest_due_entry() {
        let (store, user) = store_with_user();
        store.insert_entry(user, "Relax", t0() + Duration::seconds(60)).unwrap();
        let first = store.insert_entry(user, "Sleep", t0() + Duration::seconds(30)).unwrap();
        store.insert_entry(user, "Work", t0() + Duration::seconds(90)).unwrap();

        assert!(store.next_due(user, t0()).unwrap().is_none());

        let due = store.next_due(user, t0() + Duration::seconds(100)).unwrap().unwrap();
        assert_eq!(due.id, first);
        assert_eq!(due.action, "Sleep");

        store.delete_entry(user, first).unwrap();
        let due = store.next_due(user, t0() + Duration::seconds(100)).unwrap().unwrap();
        assert_eq!(due.action, "Relax");
    }

    #[test]
    fn test_attendance_increments() {
        let (store, user) = store_with_user();
        assert_eq!(store.record_attendance(user, "Logic").unwrap(), 1);
        assert_eq!(store.record_attendance(user, "Logic").unwrap(), 2);
        assert_eq!(store.record_attendance(user, "Algebra").unwrap(), 1);
        assert_eq!(store.attendance(user).unwrap().len(), 2);
        store.clear_attendance(user).unwrap();
        assert!(store.attendance(user).unwrap().is_empty());
    }

    #[test]
    fn test_completion_and_abilities_are_unique() {
        let (store, user) = store_with_user();
        assert!(store.complete_course(user, "Logic").unwrap());
        assert!(!store.complete_course(user, "Logic").unwrap());
        assert_eq!(store.completed_courses(user).unwrap().len(), 1);

        assert!(store.grant_ability(user, "Logic").unwrap());
        assert!(!store.grant_ability(user, "Logic").unwrap());
        assert!(store.has_ability(user, "Logic").unwrap());
    }

    #[test]
    fn test_entry_ids_unique_across_users() {
        let (store, a) = store_with_user();
        let b = UserId::new();
        store
            .create_profile(b, UserProfile::new(&GameConfig::default()))
            .unwrap();
        let x = store.insert_entry(a, "Sleep", t0()).unwrap();
        let y = store.insert_entry(b, "Sleep", t0()).unwrap();
        assert_ne!(x, y);
    }
}
