//! Persistent student profile and its tracked stats

use serde::{Deserialize, Serialize};

use crate::core::calendar::derive_semester;
use crate::core::config::GameConfig;
use crate::core::types::{Day, Hour, Semester};

/// Every stat an action may change, in reporting order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stat {
    Cash,
    Energy,
    Mood,
    Math,
    Programming,
    Algorithms,
    WorkExperience,
}

impl Stat {
    pub const ALL: [Stat; 7] = [
        Stat::Cash,
        Stat::Energy,
        Stat::Mood,
        Stat::Math,
        Stat::Programming,
        Stat::Algorithms,
        Stat::WorkExperience,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stat::Cash => "Cash",
            Stat::Energy => "Energy",
            Stat::Mood => "Mood",
            Stat::Math => "Math",
            Stat::Programming => "Programming",
            Stat::Algorithms => "Algorithms",
            Stat::WorkExperience => "Work Experience",
        }
    }

    /// Inclusive range the stat is clamped to
    pub fn bounds(&self) -> (f64, f64) {
        match self {
            Stat::Cash => (0.0, f64::MAX),
            _ => (0.0, 100.0),
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Stats that course rules train and exams test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Skill {
    Math,
    Programming,
    Algorithms,
    WorkExperience,
}

impl From<Skill> for Stat {
    fn from(skill: Skill) -> Self {
        match skill {
            Skill::Math => Stat::Math,
            Skill::Programming => Stat::Programming,
            Skill::Algorithms => Stat::Algorithms,
            Skill::WorkExperience => Stat::WorkExperience,
        }
    }
}

/// One row per player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub cash: f64,
    /// 0.0 = exhausted, 100.0 = fully rested
    pub energy: f64,
    /// 0.0 = miserable, 100.0 = elated
    pub mood: f64,
    pub math: f64,
    pub programming: f64,
    pub algorithms: f64,
    pub work_experience: f64,
    pub day: Day,
    pub hour: Hour,
    /// Set after a failed semester; the next failure resets the student
    pub failed_current_semester: bool,
}

impl UserProfile {
    /// Fresh profile with the configured starting stats
    pub fn new(config: &GameConfig) -> Self {
        let mut profile = Self {
            cash: config.starting_cash,
            energy: config.starting_energy,
            mood: config.starting_mood,
            math: 0.0,
            programming: 0.0,
            algorithms: 0.0,
            work_experience: 0.0,
            day: 0,
            hour: 0,
            failed_current_semester: false,
        };
        profile.normalize();
        profile
    }

    /// Current semester, derived from the day counter and the failed flag
    pub fn semester(&self, config: &GameConfig) -> Semester {
        derive_semester(
            self.day,
            self.failed_current_semester,
            config.days_per_semester,
            config.last_semester,
        )
    }

    pub fn get(&self, stat: Stat) -> f64 {
        match stat {
            Stat::Cash => self.cash,
            Stat::Energy => self.energy,
            Stat::Mood => self.mood,
            Stat::Math => self.math,
            Stat::Programming => self.programming,
            Stat::Algorithms => self.algorithms,
            Stat::WorkExperience => self.work_experience,
        }
    }

    /// Store a stat, clamped to its bounds and rounded to cents
    pub fn set(&mut self, stat: Stat, value: f64) {
        let (lo, hi) = stat.bounds();
        let value = round_cents(value.clamp(lo, hi));
        match stat {
            Stat::Cash => self.cash = value,
            Stat::Energy => self.energy = value,
            Stat::Mood => self.mood = value,
            Stat::Math => self.math = value,
            Stat::Programming => self.programming = value,
            Stat::Algorithms => self.algorithms = value,
            Stat::WorkExperience => self.work_experience = value,
        }
    }

    pub fn adjust(&mut self, stat: Stat, delta: f64) {
        self.set(stat, self.get(stat) + delta);
    }

    /// Re-apply bounds to every stat
    pub fn normalize(&mut self) {
        for stat in Stat::ALL {
            self.set(stat, self.get(stat));
        }
        self.hour %= crate::core::calendar::HOURS_PER_DAY;
    }

    pub fn snapshot(&self) -> StatSnapshot {
        let mut values = [0.0; 7];
        for stat in Stat::ALL {
            values[stat.index()] = self.get(stat);
        }
        StatSnapshot(values)
    }

    /// True when every bounded stat is inside its range
    pub fn in_bounds(&self) -> bool {
        Stat::ALL.iter().all(|stat| {
            let (lo, hi) = stat.bounds();
            let value = self.get(*stat);
            value >= lo && value <= hi
        }) && self.hour < crate::core::calendar::HOURS_PER_DAY
    }
}

/// Tracked stat values captured before an action
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatSnapshot([f64; 7]);

impl StatSnapshot {
    pub fn get(&self, stat: Stat) -> f64 {
        self.0[stat.index()]
    }

    /// Signed changes from `self` to `after`, skipping unchanged stats
    pub fn changes(&self, after: &StatSnapshot) -> Vec<(Stat, f64)> {
        Stat::ALL
            .iter()
            .filter_map(|stat| {
                let delta = round_cents(after.get(*stat) - self.get(*stat));
                (delta != 0.0).then_some((*stat, delta))
            })
            .collect()
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
