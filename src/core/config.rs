//! Game balance configuration with documented constants
//!
//! All magic numbers of the simulation are collected here. Values can be
//! overridden from a TOML file; missing keys keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{CampusError, Result};
use crate::core::types::Semester;

/// Configuration for the simulation engine
///
/// Defaults give a six-semester degree of fourteen-day semesters.
/// Changing them will affect how fast a student can graduate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === STARTING PROFILE ===
    /// Cash a newly registered student starts with
    pub starting_cash: f64,

    /// Energy a newly registered student starts with (0-100)
    pub starting_energy: f64,

    /// Mood a newly registered student starts with (0-100)
    pub starting_mood: f64,

    // === ECONOMY ===
    /// Base pay for one hour of Work, before experience and mood scaling
    pub wage: f64,

    /// Living cost deducted when a day ends
    ///
    /// A student who cannot pay loses `end_day_penalty` mood and energy instead.
    pub end_day_cost: f64,

    /// Mood and energy lost when the living cost can't be paid
    pub end_day_penalty: f64,

    /// Minimum energy needed for any energy-consuming action
    ///
    /// Below this, Work, learning, partying and classes turn into a
    /// "too tired" message with no stat change.
    pub energy_gate: f64,

    // === ACADEMICS ===
    /// Exam score needed to pass a course
    pub score_to_pass: f64,

    /// ECTS required per completed semester
    ///
    /// The pass threshold at the end of semester `n` is `n * ects_per_semester`
    /// accumulated over all completed courses.
    pub ects_per_semester: u32,

    /// Final semester; no progression is tracked past it
    pub last_semester: Semester,

    /// In-game days per semester
    pub days_per_semester: u32,

    /// Class attendances needed to be admitted to the exam
    pub attendance_for_exam: u32,

    // === TIMETABLE ===
    /// Number of upcoming hours (starting at the current one) a timetable may cover
    pub timetable_window: u8,

    /// Real-time gap between consecutive committed schedule entries (seconds)
    pub schedule_spacing_secs: i64,

    /// Maximum random offset added to each entry's due time (milliseconds)
    ///
    /// Must stay below half of the spacing so entries never reorder.
    pub schedule_jitter_ms: i64,

    // === RANDOMNESS ===
    /// Seed for the engine RNG; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_cash: 500.0,
            starting_energy: 50.0,
            starting_mood: 50.0,

            wage: 40.0,
            end_day_cost: 100.0,
            end_day_penalty: 10.0,
            energy_gate: 10.0,

            score_to_pass: 100.0,
            ects_per_semester: 30,
            last_semester: 6,
            days_per_semester: 14,
            attendance_for_exam: 10,

            timetable_window: 12,
            schedule_spacing_secs: 30,
            schedule_jitter_ms: 5_000,

            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file and validate it
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse a config from a TOML string and validate it
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("starting_energy", self.starting_energy),
            ("starting_mood", self.starting_mood),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(CampusError::InvalidConfig(format!(
                    "{} ({}) must be within 0..=100",
                    name, value
                )));
            }
        }

        if self.starting_cash < 0.0 {
            return Err(CampusError::InvalidConfig("starting_cash must not be negative".into()));
        }

        if self.timetable_window == 0 || self.timetable_window > 24 {
            return Err(CampusError::InvalidConfig(format!(
                "timetable_window ({}) must be within 1..=24",
                self.timetable_window
            )));
        }

        let spacing_ms = match self.schedule_spacing_secs.checked_mul(1000) {
            Some(ms) if ms > 0 => ms,
            _ => {
                return Err(CampusError::InvalidConfig(format!(
                    "schedule_spacing_secs ({}) must be positive and fit in milliseconds",
                    self.schedule_spacing_secs
                )))
            }
        };

        // Jitter on both sides must not close the gap between neighbours
        let jitter_fits = self
            .schedule_jitter_ms
            .checked_mul(2)
            .is_some_and(|span| span < spacing_ms);
        if self.schedule_jitter_ms < 0 || !jitter_fits {
            return Err(CampusError::InvalidConfig(format!(
                "schedule_jitter_ms ({}) must be below half of schedule_spacing_secs ({})",
                self.schedule_jitter_ms, self.schedule_spacing_secs
            )));
        }

        if self.last_semester == 0 || self.days_per_semester == 0 {
            return Err(CampusError::InvalidConfig(
                "last_semester and days_per_semester must be positive".into(),
            ));
        }

        Ok(())
    }
}
