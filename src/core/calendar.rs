//! Calendar arithmetic for the per-user game clock
//!
//! The clock is a (day, hour) pair that moves one hour per processed action.
//! Semesters are not stored; they are derived from the day counter and the
//! failed-semester flag.

use serde::{Deserialize, Serialize};

use crate::core::types::{Day, Hour, Semester};

pub const HOURS_PER_DAY: u8 = 24;

/// Academic season, decided by semester parity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Winter, // odd semesters
    Summer, // even semesters
}

impl Season {
    pub fn of(semester: Semester) -> Self {
        if semester % 2 == 1 {
            Season::Winter
        } else {
            Season::Summer
        }
    }
}

/// Advance an hour by one: returns `(day_delta, next_hour)`
pub fn next_hour(hour: Hour) -> (Day, Hour) {
    let total = hour as u32 + 1;
    (total / HOURS_PER_DAY as u32, (total % HOURS_PER_DAY as u32) as Hour)
}

/// Derive the current semester from the day counter and the failed flag
pub fn derive_semester(day: Day, failed: bool, days_per_semester: u32, last_semester: Semester) -> Semester {
    let base = day / days_per_semester + if failed { 0 } else { 1 };
    base.clamp(1, last_semester as u32) as Semester
}

/// True when moving onto `new_day` closes a semester
pub fn closes_semester(new_day: Day, days_per_semester: u32) -> bool {
    new_day > 0 && new_day % days_per_semester == 0
}

/// Hours a timetable may cover, in order, starting at `current`
pub fn window(current: Hour, len: u8) -> Vec<Hour> {
    (0..len)
        .map(|offset| ((current as u32 + offset as u32) % HOURS_PER_DAY as u32) as Hour)
        .collect()
}

/// Position of `hour` inside the window that starts at `current`
pub fn window_offset(current: Hour, hour: Hour) -> u8 {
    ((hour as u32 + HOURS_PER_DAY as u32 - current as u32) % HOURS_PER_DAY as u32) as u8
}

/// True when `hour` is inside the `len`-hour window starting at `current`
pub fn in_window(current: Hour, hour: u32, len: u8) -> bool {
    hour < HOURS_PER_DAY as u32 && window_offset(current, hour as Hour) < len
}
