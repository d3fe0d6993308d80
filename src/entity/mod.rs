pub mod profile;
pub mod records;

pub use profile::{Skill, Stat, StatSnapshot, UserProfile};
pub use records::{AbilityRecord, AttendanceRecord, CompletedCourse, Message, ScheduleEntry};
