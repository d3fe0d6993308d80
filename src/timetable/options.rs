//! Actions the player may schedule at each upcoming hour

use serde::{Deserialize, Serialize};

use crate::actions::catalog;
use crate::core::calendar::window;
use crate::core::error::Result;
use crate::core::types::{Hour, Semester};
use crate::simulation::Session;
use crate::store::Store;
use crate::timetable::validator::in_season;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOption {
    pub name: String,
    /// Nominal semester for courses, `None` for everyday actions
    pub semester: Option<Semester>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourOptions {
    pub hour: Hour,
    pub actions: Vec<ActionOption>,
}

/// Schedulable actions per window hour, in catalog order
pub fn options_for(current: Hour, semester: Semester, window_len: u8) -> Vec<HourOptions> {
    window(current, window_len)
        .into_iter()
        .map(|hour| HourOptions {
            hour,
            actions: catalog::all()
                .iter()
                .filter(|d| d.schedulable && d.allowed_at(hour) && in_season(d, semester))
                .map(|d| ActionOption {
                    name: d.name.to_string(),
                    semester: d.course().map(|course| course.semester),
                })
                .collect(),
        })
        .collect()
}

impl<S: Store + ?Sized> Session<'_, S> {
    pub fn valid_options(&self) -> Result<Vec<HourOptions>> {
        let profile = self.profile()?;
        Ok(options_for(
            profile.hour,
            profile.semester(self.config),
            self.config.timetable_window,
        ))
    }
}
