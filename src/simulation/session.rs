//! Per-operation context shared by the simulation subsystems

use chrono::{DateTime, Utc};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::GameConfig;
use crate::core::error::Result;
use crate::core::types::{Semester, UserId};
use crate::entity::UserProfile;
use crate::store::Store;

/// Everything one operation on one user needs
///
/// A session lives for a single engine call. It holds no entity state of its
/// own; each step reads the profile from the store and writes it back.
pub struct Session<'a, S: Store + ?Sized> {
    pub store: &'a S,
    pub config: &'a GameConfig,
    pub user: UserId,
    pub now: DateTime<Utc>,
    pub rng: &'a mut ChaCha8Rng,
}

impl<'a, S: Store + ?Sized> Session<'a, S> {
    pub fn new(
        store: &'a S,
        config: &'a GameConfig,
        user: UserId,
        now: DateTime<Utc>,
        rng: &'a mut ChaCha8Rng,
    ) -> Self {
        Self {
            store,
            config,
            user,
            now,
            rng,
        }
    }

    pub fn profile(&self) -> Result<UserProfile> {
        self.store.profile(self.user)
    }

    pub fn save(&self, profile: &UserProfile) -> Result<()> {
        self.store.save_profile(self.user, profile)
    }

    pub fn semester(&self) -> Result<Semester> {
        Ok(self.profile()?.semester(self.config))
    }

    /// Append a message stamped with the session time
    pub fn message(&self, text: impl Into<String>) -> Result<()> {
        self.store.push_message(self.user, text.into(), self.now)
    }

    /// Uniform draw from `[lo, hi]`
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        if lo >= hi {
            return lo;
        }
        self.rng.gen_range(lo..=hi)
    }

    /// Bernoulli trial with probability `chance`
    pub fn roll(&mut self, chance: f64) -> bool {
        self.rng.gen::<f64>() < chance
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::fixture;
    use super::*;

    #[test]
    fn test_uniform_stays_in_range() {
        let (store, config, user, mut rng) = fixture();
        let mut session = Session::new(&store, &config, user, Utc::now(), &mut rng);
        for _ in 0..1000 {
            let value = session.uniform(-0.1, 1.0);
            assert!((-0.1..=1.0).contains(&value));
        }
        assert_eq!(session.uniform(3.0, 3.0), 3.0);
    }

    #[test]
    fn test_message_is_stored() {
        let (store, config, user, mut rng) = fixture();
        let session = Session::new(&store, &config, user, Utc::now(), &mut rng);
        session.message("hello").unwrap();
        let messages = store.messages(user).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text, "hello");
    }
}
