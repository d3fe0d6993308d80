//! Instant action effects and the change summary
//!
//! Every formula reads the stats as they were before the action; the mood
//! factor in particular uses the pre-action mood.

use crate::actions::catalog::{ActionDescriptor, InstantEffect};
use crate::actions::mood::mood_factor;
use crate::core::error::Result;
use crate::entity::{Stat, StatSnapshot, UserProfile};
use crate::simulation::semester::SemesterOutcome;
use crate::simulation::session::Session;
use crate::store::Store;

/// Change summary for an action, listing every stat that moved
pub fn summarize(verb: &str, before: &StatSnapshot, after: &StatSnapshot) -> String {
    let changes = before.changes(after);
    if changes.is_empty() {
        return format!("You have {}. None of your stats changed!", verb);
    }
    let listed: Vec<String> = changes
        .iter()
        .map(|(stat, delta)| format!("{}: {:+.2}", stat.name(), delta))
        .collect();
    format!("You have {}. Stats changed - {}.", verb, listed.join(" "))
}

impl<S: Store + ?Sized> Session<'_, S> {
    /// True when the action is energy gated and the student is below the gate
    pub fn too_tired(&self, descriptor: &ActionDescriptor, profile: &UserProfile) -> bool {
        descriptor.requires_energy && profile.energy < self.config.energy_gate
    }

    /// Run an instant action; boundary effects report their semester outcome
    pub fn apply_instant(
        &mut self,
        descriptor: &ActionDescriptor,
        effect: InstantEffect,
    ) -> Result<Option<SemesterOutcome>> {
        match effect {
            InstantEffect::EndDay => {
                self.end_day()?;
                return Ok(None);
            }
            InstantEffect::FinishSemester => return self.finish_semester().map(Some),
            _ => {}
        }

        let mut profile = self.profile()?;
        if self.too_tired(descriptor, &profile) {
            self.message(descriptor.too_tired_message())?;
            return Ok(None);
        }

        let before = profile.snapshot();
        let mf = mood_factor(profile.mood);
        match effect {
            InstantEffect::Sleep => {
                let energy = self.uniform(2.0, 4.0);
                let mood = self.uniform(-0.1, 1.0);
                profile.adjust(Stat::Energy, energy);
                profile.adjust(Stat::Mood, mood);
            }
            InstantEffect::Work => {
                let energy = self.uniform(1.5, 4.5);
                let pay = self.uniform(0.75, 1.25) * self.config.wage * (profile.work_experience + 50.0) / 100.0 * mf;
                let experience = self.uniform(0.25, 0.5) * mf;
                let mood = self.uniform(-2.0, 0.5);
                profile.adjust(Stat::Energy, -energy);
                profile.adjust(Stat::Cash, pay);
                profile.adjust(Stat::WorkExperience, experience);
                profile.adjust(Stat::Mood, mood);
            }
            InstantEffect::Learn(skill) => {
                let energy = self.uniform(0.5, 2.0);
                let gain = self.uniform(0.2, 0.35) * mf;
                let mood = self.uniform(-2.0, 0.5);
                profile.adjust(Stat::Energy, -energy);
                profile.adjust(Stat::from(skill), gain);
                profile.adjust(Stat::Mood, mood);
            }
            InstantEffect::Relax => {
                let mood = self.uniform(1.0, 2.0);
                profile.adjust(Stat::Mood, mood);
            }
            InstantEffect::Party => {
                let energy = self.uniform(-2.0, 1.0);
                let mood = self.uniform(-1.0, 7.0);
                profile.adjust(Stat::Energy, energy);
                profile.adjust(Stat::Mood, mood);
            }
            InstantEffect::EndDay | InstantEffect::FinishSemester => {}
        }
        self.save(&profile)?;

        self.message(summarize(&descriptor.past_tense(), &before, &profile.snapshot()))?;
        Ok(None)
    }

    /// Pay the daily living cost, or lose mood and energy when broke
    pub fn end_day(&mut self) -> Result<()> {
        let mut profile = self.profile()?;
        let before = profile.snapshot();
        let cost = self.config.end_day_cost;

        if profile.cash >= cost {
            profile.adjust(Stat::Cash, -cost);
            self.save(&profile)?;
            return self.message(format!("A day has ended. You have spent: {:.2}", cost));
        }

        let penalty = self.config.end_day_penalty;
        profile.adjust(Stat::Mood, -penalty);
        profile.adjust(Stat::Energy, -penalty);
        self.save(&profile)?;

        let after = profile.snapshot();
        self.message(format!(
            "A day has ended but you didn't have enough funds to support yourself. \
             Your energy changed by: {:.2} and your mood changed by: {:.2}.",
            after.get(Stat::Energy) - before.get(Stat::Energy),
            after.get(Stat::Mood) - before.get(Stat::Mood),
        ))
    }
}
