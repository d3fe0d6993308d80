//! Per-user game clock and the due-entry drain
//!
//! Each processed action takes one in-game hour. Crossing midnight runs End
//! Day, and the midnight that starts a new semester also runs Finish
//! Semester before the new day is committed.

use tracing::{debug, warn};

use crate::actions::catalog::{lookup, ActionDescriptor, ActionKind};
use crate::core::calendar::{closes_semester, next_hour};
use crate::core::error::{CampusError, Result};
use crate::simulation::semester::SemesterOutcome;
use crate::simulation::session::Session;
use crate::store::Store;

impl<S: Store + ?Sized> Session<'_, S> {
    /// Run one action by name and advance the clock by an hour
    pub fn process(&mut self, name: &str) -> Result<()> {
        let descriptor = lookup(name)?;
        let direct = self.perform(descriptor)?;
        self.advance_clock(direct == Some(SemesterOutcome::Reset))?;
        Ok(())
    }

    /// Apply an action's effect without touching the clock
    pub fn perform(&mut self, descriptor: &ActionDescriptor) -> Result<Option<SemesterOutcome>> {
        match &descriptor.kind {
            ActionKind::Instant(effect) => self.apply_instant(descriptor, *effect),
            ActionKind::Course(course) => {
                self.attend(descriptor, course)?;
                Ok(None)
            }
        }
    }

    /// Move the clock forward one hour, running boundary events on the way
    ///
    /// `rolled_back` forces the day counter to 0, for callers whose own action
    /// already resolved a semester to `Reset`. Returns the outcome of a
    /// semester boundary crossed by this step.
    pub fn advance_clock(&mut self, rolled_back: bool) -> Result<Option<SemesterOutcome>> {
        let profile = self.profile()?;
        let (day_delta, hour) = next_hour(profile.hour);

        let mut outcome = None;
        if day_delta > 0 {
            self.end_day()?;
            if closes_semester(profile.day + day_delta, self.config.days_per_semester) {
                outcome = Some(self.finish_semester()?);
            }
        }

        // End Day and Finish Semester write their own changes; reload first
        let mut profile = self.profile()?;
        profile.hour = hour;
        profile.day = if rolled_back || outcome == Some(SemesterOutcome::Reset) {
            0
        } else {
            profile.day + day_delta
        };
        self.save(&profile)?;
        Ok(outcome)
    }

    /// Process every schedule entry due by `now`, oldest first
    ///
    /// Each entry's cascade completes before the next one is read. An entry
    /// naming no known action is dropped with a message and does not count.
    /// Returns the number of entries processed.
    pub fn drain_due(&mut self) -> Result<usize> {
        let mut processed = 0;
        while let Some(entry) = self.store.next_due(self.user, self.now)? {
            debug!(user = %self.user, action = %entry.action, due = %entry.due, "Processing entry");
            match self.process(&entry.action) {
                Ok(()) => processed += 1,
                Err(CampusError::UnknownAction(name)) => {
                    warn!(user = %self.user, action = %name, "Dropping unknown schedule entry");
                    self.message(format!("Skipped an unknown action in your timetable: {}", name))?;
                }
                Err(err) => return Err(err),
            }
            self.store.delete_entry(self.user, entry.id)?;
        }
        Ok(processed)
    }
}
