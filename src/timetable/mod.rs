//! Timetable submission and the valid-option listing
//!
//! A timetable is a list of picks, one action per hour, covering the next
//! hours of the user's game day. A valid submission replaces the whole
//! pending schedule; an invalid one changes nothing.

pub mod options;
pub mod validator;

use serde::{Deserialize, Serialize};

pub use options::{ActionOption, HourOptions};
pub use validator::{validate, Rejection, ValidPick};

/// One requested hour slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pick {
    pub hour: u32,
    pub action: String,
}

impl Pick {
    pub fn new(hour: u32, action: impl Into<String>) -> Self {
        Self {
            hour,
            action: action.into(),
        }
    }
}

/// Result of a submission as reported to the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableOutcome {
    pub success: bool,
    pub message: String,
}

impl TimetableOutcome {
    pub const SAVED: &'static str = "Timetable successfully saved";

    pub fn saved() -> Self {
        Self {
            success: true,
            message: Self::SAVED.to_string(),
        }
    }

    pub fn rejected(rejection: &Rejection) -> Self {
        Self {
            success: false,
            message: rejection.to_string(),
        }
    }
}
