pub mod catalog;
pub mod mood;

pub use catalog::{
    lookup, ActionDescriptor, ActionKind, AbilityRule, CourseSpec, InstantEffect, SkillRule, ACTION_CATALOG,
};
pub use mood::mood_factor;
