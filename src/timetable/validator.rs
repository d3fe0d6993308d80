//! Timetable validation and commit

use chrono::Duration;
use rand::Rng;
use thiserror::Error;
use tracing::{info, warn};

use crate::actions::catalog::{lookup, ActionDescriptor};
use crate::core::calendar::{in_window, window_offset, Season};
use crate::core::error::Result;
use crate::core::types::{Hour, Semester};
use crate::simulation::Session;
use crate::store::Store;
use crate::timetable::{Pick, TimetableOutcome};

/// Why a submitted timetable was refused
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("Invalid timetable. Chosen time: {0} is too far into the future")]
    OutsideWindow(u32),

    #[error("Invalid timetable. Chosen action: {0} cannot be performed at will")]
    NotSchedulable(String),

    #[error("Invalid timetable. Chosen action: {action} cannot be performed at {hour}")]
    WrongHour { action: String, hour: u32 },

    #[error("Invalid timetable. You can't take summer classes in the winter and vice versa")]
    WrongSeason,

    #[error("Invalid timetable. Each hour can only appear once")]
    DuplicateHour,
}

/// A pick that passed every check
#[derive(Debug, Clone, Copy)]
pub struct ValidPick {
    pub hour: Hour,
    /// Position inside the window, 0 = the current hour
    pub offset: u8,
    pub descriptor: &'static ActionDescriptor,
}

pub type Verdict = std::result::Result<Vec<ValidPick>, Rejection>;

/// True when the action may be taken in the given semester's season
pub fn in_season(descriptor: &ActionDescriptor, semester: Semester) -> bool {
    descriptor
        .course()
        .map_or(true, |course| Season::of(course.semester) == Season::of(semester))
}

/// Check picks against the window starting at `current`
///
/// The first failing pick decides the rejection; duplicate hours are checked
/// once every pick is individually valid. An unknown action name is an
/// error, not a rejection.
pub fn validate(picks: &[Pick], current: Hour, semester: Semester, window_len: u8) -> Result<Verdict> {
    let mut valid = Vec::with_capacity(picks.len());
    for pick in picks {
        if !in_window(current, pick.hour, window_len) {
            return Ok(Err(Rejection::OutsideWindow(pick.hour)));
        }
        let hour = pick.hour as Hour;

        let descriptor = lookup(&pick.action)?;
        if !descriptor.schedulable {
            return Ok(Err(Rejection::NotSchedulable(descriptor.name.to_string())));
        }
        if !descriptor.allowed_at(hour) {
            return Ok(Err(Rejection::WrongHour {
                action: descriptor.name.to_string(),
                hour: pick.hour,
            }));
        }
        if !in_season(descriptor, semester) {
            return Ok(Err(Rejection::WrongSeason));
        }

        valid.push(ValidPick {
            hour,
            offset: window_offset(current, hour),
            descriptor,
        });
    }

    let mut seen = [false; 24];
    for pick in &valid {
        if std::mem::replace(&mut seen[pick.hour as usize], true) {
            return Ok(Err(Rejection::DuplicateHour));
        }
    }
    Ok(Ok(valid))
}

impl<S: Store + ?Sized> Session<'_, S> {
    /// Validate picks and, when valid, replace the user's pending schedule
    ///
    /// Committed entries run in window order, one spacing apart with a small
    /// random jitter, starting one spacing after `now`.
    pub fn submit(&mut self, picks: &[Pick]) -> Result<TimetableOutcome> {
        let profile = self.profile()?;
        let semester = profile.semester(self.config);

        let mut valid = match validate(picks, profile.hour, semester, self.config.timetable_window)? {
            Ok(valid) => valid,
            Err(rejection) => {
                warn!(user = %self.user, %rejection, "Timetable rejected");
                return Ok(TimetableOutcome::rejected(&rejection));
            }
        };
        valid.sort_by_key(|pick| pick.offset);

        self.store.clear_schedule(self.user)?;
        let jitter = self.config.schedule_jitter_ms;
        for (k, pick) in valid.iter().enumerate() {
            let spread = if jitter > 0 { self.rng.gen_range(-jitter..=jitter) } else { 0 };
            let due = self.now
                + Duration::seconds(self.config.schedule_spacing_secs * (k as i64 + 1))
                + Duration::milliseconds(spread);
            self.store.insert_entry(self.user, pick.descriptor.name, due)?;
        }

        info!(user = %self.user, entries = valid.len(), "Timetable committed");
        Ok(TimetableOutcome::saved())
    }
}
