//! Caller-facing operations
//!
//! The engine owns the store, the config, the clock source and the seeded
//! RNG. Every operation takes `&self`, runs under the user's lock, and (except
//! for clearing messages) first drains the user's due schedule entries so
//! reads observe an up-to-date profile.

pub mod locks;

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::actions::catalog::lookup;
use crate::core::config::GameConfig;
use crate::core::error::{CampusError, Result};
use crate::core::time_source::{SystemTime, TimeSource};
use crate::core::types::UserId;
use crate::entity::{AbilityRecord, AttendanceRecord, Message, ScheduleEntry, UserProfile};
use crate::simulation::Session;
use crate::store::Store;
use crate::timetable::{HourOptions, Pick, TimetableOutcome};

pub use locks::UserLocks;

/// A passed course with its credit value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseCredit {
    pub course: String,
    pub ects: u32,
}

pub struct Engine<S> {
    store: S,
    config: GameConfig,
    time: Arc<dyn TimeSource>,
    rng: Mutex<ChaCha8Rng>,
    locks: UserLocks,
}

impl<S: Store> Engine<S> {
    /// Engine on the wall clock
    pub fn new(store: S, config: GameConfig) -> Result<Self> {
        Self::with_time_source(store, config, Arc::new(SystemTime))
    }

    pub fn with_time_source(store: S, config: GameConfig, time: Arc<dyn TimeSource>) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Ok(Self {
            store,
            config,
            time,
            rng: Mutex::new(rng),
            locks: UserLocks::new(),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.time.now()
    }

    /// Independent generator for one operation, split off the engine RNG
    fn fork_rng(&self) -> Result<ChaCha8Rng> {
        let mut rng = self.rng.lock().map_err(|_| CampusError::LockPoisoned)?;
        Ok(ChaCha8Rng::seed_from_u64(rng.gen()))
    }

    fn with_session<T>(&self, user: UserId, f: impl FnOnce(&mut Session<'_, S>) -> Result<T>) -> Result<T> {
        self.locks.with_user(user, || {
            let mut rng = self.fork_rng()?;
            let mut session = Session::new(&self.store, &self.config, user, self.now(), &mut rng);
            f(&mut session)
        })
    }

    /// Drain, then read straight from the store
    fn read_fresh<T>(&self, user: UserId, f: impl FnOnce(&S) -> Result<T>) -> Result<T> {
        self.with_session(user, |session| {
            session.drain_due()?;
            f(session.store)
        })
    }

    // === REGISTRATION ===

    /// Register a new student with the starting profile
    pub fn register_user(&self) -> Result<UserId> {
        let user = UserId::new();
        self.register_user_with(user)?;
        Ok(user)
    }

    pub fn register_user_with(&self, user: UserId) -> Result<()> {
        self.locks.with_user(user, || {
            self.store.create_profile(user, UserProfile::new(&self.config))
        })?;
        info!(%user, "Registered user");
        Ok(())
    }

    // === COMMANDS ===

    /// Process every entry due by now; returns how many ran
    pub fn process_due(&self, user: UserId) -> Result<usize> {
        let processed = self.with_session(user, |session| session.drain_due())?;
        if processed > 0 {
            debug!(%user, processed, "Drained schedule");
        }
        Ok(processed)
    }

    /// Replace the user's upcoming plan
    pub fn submit_timetable(&self, user: UserId, picks: &[Pick]) -> Result<TimetableOutcome> {
        self.with_session(user, |session| {
            session.drain_due()?;
            session.submit(picks)
        })
    }

    pub fn list_valid_actions(&self, user: UserId) -> Result<Vec<HourOptions>> {
        self.with_session(user, |session| {
            session.drain_due()?;
            session.valid_options()
        })
    }

    /// Delete every message; pending entries are left alone
    pub fn clear_messages(&self, user: UserId) -> Result<()> {
        self.locks.with_user(user, || self.store.clear_messages(user))
    }

    // === QUERIES ===

    pub fn profile(&self, user: UserId) -> Result<UserProfile> {
        self.read_fresh(user, |store| store.profile(user))
    }

    /// Pending schedule entries, soonest first
    pub fn timetable(&self, user: UserId) -> Result<Vec<ScheduleEntry>> {
        self.read_fresh(user, |store| store.schedule(user))
    }

    pub fn completed_courses(&self, user: UserId) -> Result<Vec<CourseCredit>> {
        self.read_fresh(user, |store| {
            let mut credits = Vec::new();
            for completed in store.completed_courses(user)? {
                let ects = lookup(&completed.course)?.course().map_or(0, |course| course.ects);
                credits.push(CourseCredit {
                    course: completed.course,
                    ects,
                });
            }
            Ok(credits)
        })
    }

    pub fn attendance(&self, user: UserId) -> Result<Vec<AttendanceRecord>> {
        self.read_fresh(user, |store| store.attendance(user))
    }

    pub fn abilities(&self, user: UserId) -> Result<Vec<AbilityRecord>> {
        self.read_fresh(user, |store| store.abilities(user))
    }

    pub fn messages(&self, user: UserId) -> Result<Vec<Message>> {
        self.read_fresh(user, |store| store.messages(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time_source::ManualTime;
    use crate::store::MemoryStore;
    use chrono::{Duration, TimeZone};

    fn engine() -> (Engine<MemoryStore>, Arc<ManualTime>) {
        let time = Arc::new(ManualTime::new(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()));
        let config = GameConfig {
            seed: Some(7),
            ..GameConfig::default()
        };
        let engine = Engine::with_time_source(MemoryStore::new(), config, time.clone()).unwrap();
        (engine, time)
    }

    #[test]
    fn test_register_uses_starting_profile() {
        let (engine, _) = engine();
        let user = engine.register_user().unwrap();
        let profile = engine.profile(user).unwrap();
        assert_eq!(profile.cash, 500.0);
        assert_eq!((profile.day, profile.hour), (0, 0));
    }

    #[test]
    fn test_register_twice_fails() {
        let (engine, _) = engine();
        let user = engine.register_user().unwrap();
        assert!(matches!(engine.register_user_with(user), Err(CampusError::UserExists(_))));
    }

    #[test]
    fn test_unknown_user() {
        let (engine, _) = engine();
        assert!(matches!(engine.profile(UserId::new()), Err(CampusError::UserNotFound(_))));
    }

    #[test]
    fn test_unknown_user_leaves_no_lock_behind() {
        let (engine, _) = engine();
        let user = engine.register_user().unwrap();
        for _ in 0..1000 {
            assert!(matches!(engine.profile(UserId::new()), Err(CampusError::UserNotFound(_))));
        }
        engine.profile(user).unwrap();
        assert!(engine.locks.is_empty());
    }

    #[test]
    fn test_entries_run_once_due() {
        let (engine, time) = engine();
        let user = engine.register_user().unwrap();
        let outcome = engine
            .submit_timetable(user, &[Pick::new(0, "Sleep"), Pick::new(1, "Relax")])
            .unwrap();
        assert!(outcome.success);
        assert_eq!(engine.timetable(user).unwrap().len(), 2);

        time.advance(Duration::seconds(40));
        assert_eq!(engine.process_due(user).unwrap(), 1);
        time.advance(Duration::seconds(60));
        assert_eq!(engine.timetable(user).unwrap().len(), 0);
        assert_eq!(engine.profile(user).unwrap().hour, 2);
    }

    #[test]
    fn test_clear_messages_does_not_drain() {
        let (engine, time) = engine();
        let user = engine.register_user().unwrap();
        engine.submit_timetable(user, &[Pick::new(0, "Sleep")]).unwrap();
        time.advance(Duration::minutes(5));

        engine.clear_messages(user).unwrap();
        assert_eq!(engine.store().schedule(user).unwrap().len(), 1);
        assert_eq!(engine.messages(user).unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GameConfig {
            timetable_window: 0,
            ..GameConfig::default()
        };
        assert!(Engine::new(MemoryStore::new(), config).is_err());
    }
}
