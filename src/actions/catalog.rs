//! Action definitions and catalog
//!
//! Every schedulable or boundary-triggered action is one row of
//! `ACTION_CATALOG`. Courses carry their credit value, nominal semester,
//! skill-gain rules and ability rules; the algorithms that consume them live
//! in `simulation`.

use crate::core::error::{CampusError, Result};
use crate::core::types::{Hour, Semester};
use crate::entity::profile::Skill;

/// Fixed-formula effect of an instant action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstantEffect {
    Sleep,
    Work,
    Learn(Skill),
    Relax,
    Party,
    EndDay,
    FinishSemester,
}

/// Skill gained by attending a course
#[derive(Debug, Clone, PartialEq)]
pub struct SkillRule {
    pub skill: Skill,
    /// Uniform range of the raw gain per attendance
    pub gain: (f64, f64),
    /// Above this skill value the gain is halved
    pub threshold: f64,
}

/// Ability that a course may grant
#[derive(Debug, Clone, PartialEq)]
pub struct AbilityRule {
    pub ability: &'static str,
    /// Probability of earning the ability per attendance
    pub chance: f64,
    /// Exam score bonus for holding the ability
    pub exam_weight: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CourseSpec {
    pub ects: u32,
    pub semester: Semester,
    pub skills: &'static [SkillRule],
    pub abilities: &'static [AbilityRule],
    pub exam_factor: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActionKind {
    Instant(InstantEffect),
    Course(CourseSpec),
}

/// Definition of an action
#[derive(Debug, Clone, PartialEq)]
pub struct ActionDescriptor {
    pub name: &'static str,
    /// Hours the action may be scheduled at; `None` means any hour
    pub allowed_hours: Option<&'static [Hour]>,
    /// Skipped with a "too tired" message when energy is below the gate
    pub requires_energy: bool,
    /// False for boundary events driven by the clock
    pub schedulable: bool,
    pub kind: ActionKind,
}

impl ActionDescriptor {
    pub fn allowed_at(&self, hour: Hour) -> bool {
        self.allowed_hours.map_or(true, |hours| hours.contains(&hour))
    }

    pub fn course(&self) -> Option<&CourseSpec> {
        match &self.kind {
            ActionKind::Course(spec) => Some(spec),
            ActionKind::Instant(_) => None,
        }
    }

    pub fn is_course(&self) -> bool {
        self.course().is_some()
    }

    /// Past-tense phrase used in the change summary
    pub fn past_tense(&self) -> String {
        match &self.kind {
            ActionKind::Instant(effect) => match effect {
                InstantEffect::Sleep => "Slept".into(),
                InstantEffect::Work => "Worked".into(),
                InstantEffect::Learn(Skill::Math) => "Learned Math".into(),
                InstantEffect::Learn(Skill::Programming) => "Learned Programming".into(),
                InstantEffect::Learn(Skill::Algorithms) => "Learned Algorithms".into(),
                // Only Work trains experience; no catalog row learns it directly
                InstantEffect::Learn(Skill::WorkExperience) => "Learned on the job".into(),
                InstantEffect::Relax => "Relaxed".into(),
                InstantEffect::Party => "Partied".into(),
                InstantEffect::EndDay => "ended the day".into(),
                InstantEffect::FinishSemester => "finished the semester".into(),
            },
            ActionKind::Course(_) => format!("attended {} class", self.name),
        }
    }

    /// Message written when the energy gate stops the action
    pub fn too_tired_message(&self) -> String {
        match &self.kind {
            ActionKind::Course(_) => format!("You were too tired to attend {} class.", self.name),
            ActionKind::Instant(_) => format!("You were too tired to {}.", self.name.to_lowercase()),
        }
    }
}

/// Party hours wrap around midnight
const PARTY_HOURS: &[Hour] = &[20, 21, 22, 23, 0, 1, 2, 3];

const fn instant(
    name: &'static str,
    effect: InstantEffect,
    allowed_hours: Option<&'static [Hour]>,
    requires_energy: bool,
) -> ActionDescriptor {
    ActionDescriptor {
        name,
        allowed_hours,
        requires_energy,
        schedulable: true,
        kind: ActionKind::Instant(effect),
    }
}

const fn boundary(name: &'static str, effect: InstantEffect) -> ActionDescriptor {
    ActionDescriptor {
        name,
        allowed_hours: Some(&[]),
        requires_energy: false,
        schedulable: false,
        kind: ActionKind::Instant(effect),
    }
}

const fn course(
    name: &'static str,
    hours: &'static [Hour],
    ects: u32,
    semester: Semester,
    exam_factor: f64,
    skills: &'static [SkillRule],
    abilities: &'static [AbilityRule],
) -> ActionDescriptor {
    ActionDescriptor {
        name,
        allowed_hours: Some(hours),
        requires_energy: true,
        schedulable: true,
        kind: ActionKind::Course(CourseSpec {
            ects,
            semester,
            skills,
            abilities,
            exam_factor,
        }),
    }
}

// Expands to a struct literal so rule slices promote to 'static
macro_rules! skill {
    ($skill:expr, $lo:expr, $hi:expr, $threshold:expr) => {
        SkillRule {
            skill: $skill,
            gain: ($lo, $hi),
            threshold: $threshold,
        }
    };
}

macro_rules! ability {
    ($ability:expr, $chance:expr, $weight:expr) => {
        AbilityRule {
            ability: $ability,
            chance: $chance,
            exam_weight: $weight,
        }
    };
}

pub const SLEEP: &str = "Sleep";
pub const WORK: &str = "Work";
pub const LEARN_MATH: &str = "Learn Math";
pub const LEARN_PROGRAMMING: &str = "Learn Programming";
pub const LEARN_ALGORITHMS: &str = "Learn Algorithms";
pub const RELAX: &str = "Relax";
pub const PARTY: &str = "Party";
pub const END_DAY: &str = "End Day";
pub const FINISH_SEMESTER: &str = "Finish Semester";

use Skill::{Algorithms, Math, Programming, WorkExperience};

/// Global action catalog - static definitions
pub static ACTION_CATALOG: &[ActionDescriptor] = &[
    instant(SLEEP, InstantEffect::Sleep, None, false),
    instant(WORK, InstantEffect::Work, None, true),
    instant(LEARN_MATH, InstantEffect::Learn(Math), None, true),
    instant(LEARN_PROGRAMMING, InstantEffect::Learn(Programming), None, true),
    instant(LEARN_ALGORITHMS, InstantEffect::Learn(Algorithms), None, true),
    instant(RELAX, InstantEffect::Relax, None, false),
    instant(PARTY, InstantEffect::Party, Some(PARTY_HOURS), true),
    boundary(FINISH_SEMESTER, InstantEffect::FinishSemester),
    boundary(END_DAY, InstantEffect::EndDay),
    // === I SEMESTER ===
    course(
        "Logic", &[8], 8, 1, 5.5,
        &[skill!(Math, 0.3, 0.4, 25.0)],
        &[ability!("Logic", 0.15, 30.0)],
    ),
    course(
        "Calculus I", &[12], 10, 1, 6.5,
        &[skill!(Math, 0.3, 0.4, 20.0)],
        &[ability!("Basic Calculus", 0.15, 20.0), ability!("Intermediate Calculus", 0.01, 50.0)],
    ),
    course(
        "Intro To Programming - Python", &[9], 6, 1, 7.0,
        &[skill!(Programming, 0.3, 0.4, 20.0)],
        &[
            ability!("Structured Programming", 0.15, 15.0),
            ability!("Python Programming", 0.15, 20.0),
            ability!("Object Oriented Programming", 0.05, 15.0),
        ],
    ),
    course(
        "Intro To Programming - C", &[9], 6, 1, 7.0,
        &[skill!(Programming, 0.3, 0.4, 25.0)],
        &[ability!("Structured Programming", 0.20, 15.0), ability!("C Programming", 0.20, 30.0)],
    ),
    course(
        "Introduction To Computer Science", &[13], 6, 1, 4.0,
        &[skill!(Programming, 0.15, 0.25, 20.0), skill!(Math, 0.15, 0.25, 20.0)],
        &[ability!("Basic Algorithms", 0.15, 15.0)],
    ),
    // === II SEMESTER ===
    course(
        "Programming", &[11], 9, 2, 2.5,
        &[skill!(Programming, 0.4, 0.45, 40.0)],
        &[ability!("Functional Programming", 0.15, 25.0)],
    ),
    course(
        "Algebra", &[16], 7, 2, 3.0,
        &[skill!(Math, 0.4, 0.45, 35.0)],
        &[ability!("Algebra", 0.15, 25.0)],
    ),
    course(
        "C++ Programming", &[8], 6, 2, 3.5,
        &[skill!(Programming, 0.4, 0.45, 35.0)],
        &[ability!("C++ Programming", 0.15, 25.0), ability!("Object Oriented Programming", 0.1, 15.0)],
    ),
    course(
        "Object Oriented Programming", &[10], 6, 2, 3.5,
        &[skill!(Programming, 0.4, 0.45, 35.0)],
        &[ability!("Object Oriented Programming", 0.2, 25.0)],
    ),
    course(
        "Computer Systems Architectures", &[15], 6, 2, 3.0,
        &[skill!(Programming, 0.4, 0.45, 35.0)],
        &[ability!("Computer Architecture", 0.2, 25.0)],
    ),
    // === III SEMESTER ===
    course(
        "Numerical Analysis", &[13], 10, 3, 0.7,
        &[skill!(Programming, 0.15, 0.2, 55.0), skill!(Math, 0.15, 0.2, 55.0)],
        &[
            ability!("Basic Numerical Analysis", 0.15, 20.0),
            ability!("Intermediate Numerical Analysis", 0.02, 35.0),
        ],
    ),
    course(
        "Discrete Math", &[16], 8, 3, 1.1,
        &[skill!(Math, 0.3, 0.4, 55.0)],
        &[
            ability!("Basic Discrete Math", 0.15, 20.0),
            ability!("Intermediate Discrete Math", 0.02, 35.0),
            ability!("Graph Algorithms", 0.05, 10.0),
        ],
    ),
    course(
        "Probability", &[12], 6, 3, 1.8,
        &[skill!(Math, 0.3, 0.4, 55.0)],
        &[ability!("Probability", 0.15, 25.0)],
    ),
    course(
        "Java Programming", &[8], 6, 3, 2.0,
        &[skill!(Programming, 0.25, 0.35, 55.0)],
        &[ability!("Java Programming", 0.15, 20.0), ability!("Object Oriented Programming", 0.1, 15.0)],
    ),
    course(
        "Python Programming", &[10], 6, 3, 2.0,
        &[skill!(Programming, 0.25, 0.35, 55.0)],
        &[
            ability!("Python Programming", 0.15, 15.0),
            ability!("Object Oriented Programming", 0.1, 10.0),
            ability!("Structured Programming", 0.1, 10.0),
        ],
    ),
    course(
        "Functional Programming", &[17], 6, 3, 1.0,
        &[skill!(Programming, 0.2, 0.3, 55.0), skill!(Math, 0.05, 0.1, 55.0)],
        &[ability!("Functional Programming", 0.15, 25.0)],
    ),
    // === IV SEMESTER ===
    course(
        "Algorithms And Data Structures", &[14], 10, 4, 0.3,
        &[
            skill!(Programming, 0.2, 0.3, 70.0),
            skill!(Algorithms, 0.5, 1.5, 85.0),
            skill!(Math, 0.1, 0.2, 70.0),
        ],
        &[
            ability!("Basic Algorithms", 0.15, 10.0),
            ability!("Basic Data Structures", 0.15, 10.0),
            ability!("Dynamic Programming", 0.10, 5.0),
            ability!("Greedy Algorithms", 0.10, 5.0),
            ability!("Graph Algorithms", 0.05, 5.0),
            ability!("Intermediate Data Structures", 0.02, 20.0),
            ability!("Intermediate Algorithms", 0.02, 20.0),
        ],
    ),
    course(
        "Linux Administration", &[18], 6, 4, 1.5,
        &[skill!(Programming, 0.2, 0.35, 70.0)],
        &[ability!("Linux Basics", 0.15, 10.0), ability!("Linux Administration", 0.05, 20.0)],
    ),
    course(
        "Scala Programming", &[16], 6, 4, 1.3,
        &[skill!(Programming, 0.2, 0.35, 70.0)],
        &[ability!("Scala Programming", 0.15, 20.0), ability!("Functional Programming", 0.15, 10.0)],
    ),
    course(
        "Lambda Calculus", &[13], 6, 4, 1.4,
        &[skill!(Math, 0.2, 0.35, 70.0)],
        &[ability!("Lambda Calculus", 0.15, 25.0)],
    ),
    course(
        "Calculus II", &[9], 6, 4, 1.2,
        &[skill!(Math, 0.2, 0.35, 70.0)],
        &[ability!("Basic Calculus", 0.5, 10.0), ability!("Intermediate Calculus", 0.15, 20.0)],
    ),
    // === V SEMESTER ===
    course(
        "Operating Systems", &[15], 6, 5, 1.1,
        &[skill!(Programming, 0.2, 0.35, 90.0)],
        &[ability!("Operating Systems", 0.15, 15.0), ability!("Computer Architecture", 0.15, 10.0)],
    ),
    course(
        "Rust Programming", &[14], 6, 5, 1.1,
        &[skill!(Programming, 0.2, 0.35, 90.0)],
        &[
            ability!("Rust Programming", 0.15, 15.0),
            ability!("Structured Programming", 0.15, 5.0),
            ability!("Object Oriented Programming", 0.15, 5.0),
            ability!("Functional Programming", 0.15, 5.0),
        ],
    ),
    course(
        "Software Engineering", &[11], 6, 5, 3.0,
        &[skill!(WorkExperience, 0.2, 0.35, 100.0)],
        &[ability!("Software Engineering", 0.15, 25.0)],
    ),
    course(
        "Machine Learning", &[10], 6, 5, 0.45,
        &[
            skill!(Algorithms, 0.1, 0.15, 90.0),
            skill!(Programming, 0.1, 0.15, 90.0),
            skill!(Math, 0.1, 0.15, 90.0),
        ],
        &[ability!("Machine Learning", 0.15, 25.0)],
    ),
    course(
        "Embedded Systems", &[18], 6, 5, 1.1,
        &[skill!(Programming, 0.2, 0.35, 90.0)],
        &[ability!("Embedded Programming", 0.15, 25.0)],
    ),
    // === VI SEMESTER ===
    course(
        "Databases", &[14], 6, 6, 0.45,
        &[skill!(Programming, 0.2, 0.35, 100.0), skill!(Math, 0.2, 0.35, 100.0)],
        &[ability!("Databases", 0.15, 25.0)],
    ),
    course(
        "Computer Networks", &[12], 6, 6, 0.5,
        &[skill!(Programming, 0.2, 0.35, 100.0), skill!(Math, 0.2, 0.35, 100.0)],
        &[ability!("Computer Networks", 0.15, 25.0)],
    ),
    course(
        "JFIZO", &[7], 12, 6, 0.25,
        &[
            skill!(Programming, 0.2, 0.35, 100.0),
            skill!(Math, 0.2, 0.35, 100.0),
            skill!(Algorithms, 0.2, 0.35, 100.0),
        ],
        &[ability!("JFIZO", 0.1, 25.0)],
    ),
    course(
        "Artificial Intelligence", &[17], 6, 6, 0.45,
        &[skill!(Programming, 0.2, 0.35, 100.0), skill!(Math, 0.2, 0.35, 100.0)],
        &[ability!("Artificial Intelligence", 0.15, 25.0)],
    ),
];

/// Get an action definition by name
pub fn lookup(name: &str) -> Result<&'static ActionDescriptor> {
    ACTION_CATALOG
        .iter()
        .find(|def| def.name == name)
        .ok_or_else(|| CampusError::UnknownAction(name.to_string()))
}

/// Get all actions in catalog order
pub fn all() -> &'static [ActionDescriptor] {
    ACTION_CATALOG
}

/// Get all courses with their specs
pub fn courses() -> impl Iterator<Item = (&'static ActionDescriptor, &'static CourseSpec)> {
    ACTION_CATALOG
        .iter()
        .filter_map(|def| def.course().map(|spec| (def, spec)))
}
