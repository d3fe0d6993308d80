//! Campus Idle - Headless Runner
//!
//! Registers a cohort of students, plans their timetables with a simple
//! heuristic and drains the schedule against a manual clock until the
//! requested number of in-game days has passed.

use std::path::PathBuf;
use std::sync::Arc;

use campus_idle::core::error::Result;
use campus_idle::core::time_source::ManualTime;
use campus_idle::core::types::Semester;
use campus_idle::entity::UserProfile;
use campus_idle::timetable::{HourOptions, Pick};
use campus_idle::{Engine, GameConfig, MemoryStore, UserId};
use chrono::{Duration, Utc};
use clap::Parser;
use rayon::prelude::*;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Headless Campus Idle runner - simulate a cohort of students
#[derive(Parser, Debug)]
#[command(name = "campus-idle")]
#[command(about = "Simulate students scheduling their way through a degree")]
struct Args {
    /// Balance config (TOML); defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of students to simulate
    #[arg(long, default_value_t = 8)]
    students: usize,

    /// In-game days to simulate
    #[arg(long, default_value_t = 28)]
    days: u32,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,

    /// Log every processed entry
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// Per-student result
#[derive(Serialize)]
struct StudentSummary {
    user: UserId,
    day: u32,
    semester: Semester,
    cash: f64,
    energy: f64,
    mood: f64,
    math: f64,
    programming: f64,
    algorithms: f64,
    work_experience: f64,
    ects: u32,
    abilities: usize,
    messages: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "campus_idle=debug" } else { "campus_idle=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .init();

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let seed = args.seed.or(config.seed).unwrap_or_else(|| rand::random());
    config.seed = Some(seed);
    tracing::info!(seed, students = args.students, days = args.days, "Campus Idle starting");

    let clock = Arc::new(ManualTime::new(Utc::now()));
    let engine = Engine::with_time_source(MemoryStore::new(), config, clock.clone())?;
    let users = (0..args.students)
        .map(|_| engine.register_user())
        .collect::<Result<Vec<_>>>()?;

    // Each round commits one window of hours and lets all of it come due
    let window = engine.config().timetable_window as u32;
    let round = Duration::seconds(engine.config().schedule_spacing_secs * (window as i64 + 1));
    let rounds = (args.days * 24).div_ceil(window);
    for _ in 0..rounds {
        users.par_iter().try_for_each(|user| plan(&engine, *user))?;
        clock.advance(round);
        users.par_iter().try_for_each(|user| engine.process_due(*user).map(|_| ()))?;
    }

    let summaries = users
        .iter()
        .map(|user| summarize(&engine, *user))
        .collect::<Result<Vec<_>>>()?;

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        for s in &summaries {
            println!(
                "{}  day {:>3}  sem {}  cash {:>8.2}  energy {:>6.2}  mood {:>6.2}  math {:>6.2}  prog {:>6.2}  algo {:>6.2}  work {:>6.2}  ects {:>3}  abilities {}",
                s.user, s.day, s.semester, s.cash, s.energy, s.mood, s.math, s.programming, s.algorithms,
                s.work_experience, s.ects, s.abilities
            );
        }
    }
    Ok(())
}

/// Fill every hour of the window with one action
fn plan(engine: &Engine<MemoryStore>, user: UserId) -> Result<()> {
    let profile = engine.profile(user)?;
    let semester = profile.semester(engine.config());
    let picks: Vec<Pick> = engine
        .list_valid_actions(user)?
        .iter()
        .map(|options| Pick::new(options.hour as u32, choose(options, &profile, semester)))
        .collect();

    let outcome = engine.submit_timetable(user, &picks)?;
    if !outcome.success {
        tracing::warn!(%user, reason = %outcome.message, "Plan rejected");
    }
    Ok(())
}

fn choose<'a>(options: &'a HourOptions, profile: &UserProfile, semester: Semester) -> &'a str {
    let offered = |name: &str| options.actions.iter().any(|a| a.name == name);

    if options.hour < 7 || profile.energy < 20.0 {
        return "Sleep";
    }
    if let Some(course) = options.actions.iter().find(|a| a.semester == Some(semester)) {
        return &course.name;
    }
    if profile.mood < 40.0 && offered("Party") {
        return "Party";
    }
    if profile.cash < 400.0 {
        return "Work";
    }
    match options.hour % 3 {
        0 => "Learn Math",
        1 => "Learn Programming",
        _ => "Relax",
    }
}

fn summarize(engine: &Engine<MemoryStore>, user: UserId) -> Result<StudentSummary> {
    let profile = engine.profile(user)?;
    Ok(StudentSummary {
        user,
        day: profile.day,
        semester: profile.semester(engine.config()),
        cash: profile.cash,
        energy: profile.energy,
        mood: profile.mood,
        math: profile.math,
        programming: profile.programming,
        algorithms: profile.algorithms,
        work_experience: profile.work_experience,
        ects: engine.completed_courses(user)?.iter().map(|c| c.ects).sum(),
        abilities: engine.abilities(user)?.len(),
        messages: engine.messages(user)?.len(),
    })
}
