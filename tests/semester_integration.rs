//! Integration tests for the semester lifecycle
//!
//! These tests drive students across semester boundaries through the public
//! engine and check how exams, credit and the failed flag interact:
//! - a first shortfall repeats the semester and keeps passed courses
//! - a second shortfall wipes passed courses and rolls the day back to 0
//! - enough credit moves the student on and prunes off-season classes

use std::sync::Arc;

use campus_idle::core::time_source::ManualTime;
use campus_idle::simulation::{SemesterOutcome, Session};
use campus_idle::store::Store;
use campus_idle::timetable::Pick;
use campus_idle::{Engine, GameConfig, MemoryStore, UserId};
use chrono::{Duration, TimeZone, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn setup() -> (Engine<MemoryStore>, Arc<ManualTime>, UserId) {
    let clock = Arc::new(ManualTime::new(Utc.with_ymd_and_hms(2024, 10, 1, 8, 0, 0).unwrap()));
    let config = GameConfig {
        seed: Some(11),
        ..GameConfig::default()
    };
    let engine = Engine::with_time_source(MemoryStore::new(), config, clock.clone()).unwrap();
    let user = engine.register_user().unwrap();
    (engine, clock, user)
}

/// Put the student on the last hour before a semester boundary
fn park_before_boundary(engine: &Engine<MemoryStore>, user: UserId, day: u32, failed: bool) {
    let mut profile = engine.store().profile(user).unwrap();
    profile.day = day;
    profile.hour = 23;
    profile.failed_current_semester = failed;
    engine.store().save_profile(user, &profile).unwrap();
}

fn run_one_hour(engine: &Engine<MemoryStore>, clock: &ManualTime, user: UserId, action: &str) {
    let outcome = engine.submit_timetable(user, &[Pick::new(23, action)]).unwrap();
    assert!(outcome.success, "{}", outcome.message);
    clock.advance(Duration::minutes(1));
    assert_eq!(engine.process_due(user).unwrap(), 1);
}

// ============================================================================
// Failure path
// ============================================================================

#[test]
fn test_fail_once_then_reset() {
    let (engine, clock, user) = setup();
    let dps = engine.config().days_per_semester;
    engine.store().complete_course(user, "Logic").unwrap();

    // First boundary: 8 ECTS out of 30
    park_before_boundary(&engine, user, dps - 1, false);
    run_one_hour(&engine, &clock, user, "Relax");

    let profile = engine.profile(user).unwrap();
    assert_eq!(profile.day, dps);
    assert!(profile.failed_current_semester);
    assert_eq!(profile.semester(engine.config()), 1);
    assert_eq!(engine.completed_courses(user).unwrap().len(), 1);

    // Second boundary of the repeated semester: still short
    park_before_boundary(&engine, user, 2 * dps - 1, true);
    run_one_hour(&engine, &clock, user, "Relax");

    let profile = engine.profile(user).unwrap();
    assert_eq!((profile.day, profile.hour), (0, 0));
    assert!(!profile.failed_current_semester);
    assert_eq!(profile.semester(engine.config()), 1);
    assert!(engine.completed_courses(user).unwrap().is_empty());

    let texts: Vec<String> = engine.messages(user).unwrap().into_iter().map(|m| m.text).collect();
    assert!(texts.iter().any(|t| t.contains("will have to retake it")));
    assert!(texts.iter().any(|t| t.contains("have to start over")));
}

#[test]
fn test_attendance_dropped_every_semester() {
    let (engine, clock, user) = setup();
    let dps = engine.config().days_per_semester;
    for _ in 0..3 {
        engine.store().record_attendance(user, "Calculus I").unwrap();
    }

    park_before_boundary(&engine, user, dps - 1, false);
    run_one_hour(&engine, &clock, user, "Sleep");

    assert!(engine.attendance(user).unwrap().is_empty());
}

// ============================================================================
// Pass path
// ============================================================================

#[test]
fn test_pass_moves_to_next_semester() {
    let (engine, clock, user) = setup();
    let dps = engine.config().days_per_semester;
    for course in ["Logic", "Calculus I", "Intro To Programming - C", "Introduction To Computer Science"] {
        engine.store().complete_course(user, course).unwrap();
    }

    park_before_boundary(&engine, user, dps - 1, false);
    run_one_hour(&engine, &clock, user, "Relax");

    let profile = engine.profile(user).unwrap();
    assert_eq!(profile.day, dps);
    assert_eq!(profile.semester(engine.config()), 2);
    let ects: u32 = engine.completed_courses(user).unwrap().iter().map(|c| c.ects).sum();
    assert_eq!(ects, 30);
}

#[test]
fn test_boundary_prunes_winter_classes_from_plan() {
    let (engine, clock, user) = setup();
    let dps = engine.config().days_per_semester;
    for course in ["Logic", "Calculus I", "Intro To Programming - C", "Introduction To Computer Science"] {
        engine.store().complete_course(user, course).unwrap();
    }
    park_before_boundary(&engine, user, dps - 1, false);

    // Relax at 23 crosses the boundary; Logic at 8 belongs to the winter term
    let picks = [Pick::new(23, "Relax"), Pick::new(0, "Sleep"), Pick::new(8, "Logic")];
    assert!(engine.submit_timetable(user, &picks).unwrap().success);
    clock.advance(Duration::seconds(40));
    assert_eq!(engine.process_due(user).unwrap(), 1);

    let remaining: Vec<String> = engine.timetable(user).unwrap().into_iter().map(|e| e.action).collect();
    assert_eq!(remaining, vec!["Sleep".to_string()]);
}

// ============================================================================
// Exams
// ============================================================================

#[test]
fn test_exam_is_never_retaken_once_passed() {
    let store = MemoryStore::new();
    let config = GameConfig::default();
    let user = UserId::new();
    store
        .create_profile(user, campus_idle::entity::UserProfile::new(&config))
        .unwrap();
    let mut profile = store.profile(user).unwrap();
    profile.math = 100.0;
    store.save_profile(user, &profile).unwrap();

    store.complete_course(user, "Logic").unwrap();
    for _ in 0..config.attendance_for_exam {
        store.record_attendance(user, "Logic").unwrap();
    }

    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut session = Session::new(&store, &config, user, Utc::now(), &mut rng);
    assert_eq!(session.finish_semester().unwrap(), SemesterOutcome::Retry);

    let texts: Vec<String> = store.messages(user).unwrap().into_iter().map(|m| m.text).collect();
    assert!(!texts.iter().any(|t| t.contains("exam")));
    assert_eq!(store.completed_courses(user).unwrap().len(), 1);
}

#[test]
fn test_last_semester_only_reports_end() {
    let (engine, clock, user) = setup();
    let config = engine.config().clone();
    let last_boundary = config.days_per_semester * config.last_semester as u32 - 1;

    park_before_boundary(&engine, user, last_boundary, false);
    run_one_hour(&engine, &clock, user, "Relax");

    let profile = engine.profile(user).unwrap();
    assert_eq!(profile.semester(&config), config.last_semester);
    assert!(!profile.failed_current_semester);
    let last = engine.messages(user).unwrap().pop().unwrap();
    assert_eq!(last.text, "A semester has ended");
}
