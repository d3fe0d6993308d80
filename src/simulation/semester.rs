//! Semester lifecycle
//!
//! At every semester boundary the student sits the exams they qualified for,
//! loses the semester's attendance, and is judged on accumulated credit:
//!
//! - enough ECTS: the flag clears and the student moves on (`Passed`)
//! - short once: the flag is set and the semester repeats (`Retry`)
//! - short twice in a row: every completed course is wiped and the student
//!   starts over from day 0 (`Reset`)
//!
//! The final semester is terminal and only reports that it ended.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::actions::catalog::lookup;
use crate::core::calendar::{derive_semester, Season};
use crate::core::error::Result;
use crate::core::types::{Day, Semester};
use crate::simulation::session::Session;
use crate::store::Store;

/// How a semester boundary resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SemesterOutcome {
    /// The last semester ended; no progression
    Final,
    Passed,
    /// Short on credit for the first time; the semester repeats
    Retry,
    /// Short on credit twice; progress is wiped and the day rolls back to 0
    Reset,
}

impl<S: Store + ?Sized> Session<'_, S> {
    pub fn finish_semester(&mut self) -> Result<SemesterOutcome> {
        let config = self.config;

        for record in self.store.attendance(self.user)? {
            if record.times_present < config.attendance_for_exam
                || self.store.has_completed(self.user, &record.course)?
            {
                continue;
            }
            let descriptor = lookup(&record.course)?;
            if let Some(course) = descriptor.course() {
                self.grade_exam(descriptor.name, course)?;
            }
        }
        self.store.clear_attendance(self.user)?;

        let mut profile = self.profile()?;
        let semester = profile.semester(config);
        if semester == config.last_semester {
            info!(user = %self.user, semester, "Final semester ended");
            self.message("A semester has ended")?;
            return Ok(SemesterOutcome::Final);
        }

        let total = self.earned_ects()?;
        let threshold = config.ects_per_semester * semester as u32;
        let (outcome, text) = if total >= threshold {
            profile.failed_current_semester = false;
            (
                SemesterOutcome::Passed,
                format!("A semester has ended. You have passed semester {} with {} ECTS!", semester, total),
            )
        } else if profile.failed_current_semester {
            self.store.clear_completed(self.user)?;
            profile.failed_current_semester = false;
            (
                SemesterOutcome::Reset,
                format!(
                    "A semester has ended. You have failed semester {} again and have to start over.",
                    semester
                ),
            )
        } else {
            profile.failed_current_semester = true;
            (
                SemesterOutcome::Retry,
                format!(
                    "A semester has ended. You have failed semester {} with {} of {} ECTS and will have to retake it.",
                    semester, total, threshold
                ),
            )
        };
        self.save(&profile)?;

        // The boundary commits the next day, or day 0 after a reset
        let next_day: Day = if outcome == SemesterOutcome::Reset { 0 } else { profile.day + 1 };
        let upcoming = derive_semester(
            next_day,
            profile.failed_current_semester,
            config.days_per_semester,
            config.last_semester,
        );
        let dropped = self.prune_schedule(upcoming)?;

        info!(
            user = %self.user,
            semester,
            ects = total,
            threshold,
            ?outcome,
            dropped,
            "Semester finished"
        );

        self.message(text)?;
        Ok(outcome)
    }

    /// Sum of ECTS over every completed course
    pub fn earned_ects(&self) -> Result<u32> {
        let mut total = 0;
        for completed in self.store.completed_courses(self.user)? {
            if let Some(course) = lookup(&completed.course)?.course() {
                total += course.ects;
            }
        }
        Ok(total)
    }

    /// Drop pending course entries taught in the other season
    ///
    /// Returns how many entries were removed.
    pub fn prune_schedule(&self, semester: Semester) -> Result<usize> {
        let season = Season::of(semester);
        let mut dropped = 0;
        for entry in self.store.schedule(self.user)? {
            let out_of_season = lookup(&entry.action)?
                .course()
                .map_or(false, |course| Season::of(course.semester) != season);
            if out_of_season {
                self.store.delete_entry(self.user, entry.id)?;
                dropped += 1;
            }
        }
        Ok(dropped)
    }
}
