//! WorkoutGenerator: turns templates into personalised workouts.
//!
//! Pipeline per template: instantiate → injury substitution → injury filter
//! → volume by activity level → reps and rest by experience → session-length
//! trim.

use tracing::debug;

use crate::profile::{ActivityLevel, ExperienceLevel, Modality, UserProfile};
use crate::text::fold;

use super::model::{Exercise, Workout};
use super::templates::{INJURY_RULES, InjuryRule, split, template};

pub const BEGINNER_NOTE: &str = "Foque na execucao correta";
const REPLACEMENT_REPS: &str = "12-15";
const REPLACEMENT_REST: &str = "60s";
const BEGINNER_REPS: &str = "10-15";
const BEGINNER_REST: &str = "90s";
const ADVANCED_REPS: &str = "6-10";
const ADVANCED_REST: &str = "60s";
/// Rough minutes per exercise used to size a session.
const MINUTES_PER_EXERCISE: u32 = 8;
const MIN_EXERCISES: usize = 3;

fn add_beginner_note(exercise: &mut Exercise) {
    if exercise.note.is_none() {
        exercise.note = Some(BEGINNER_NOTE.to_string());
    }
}

/// Rules that apply to at least one of the profile's injuries.
fn matching_rules(injuries: &[String]) -> Vec<&'static InjuryRule> {
    let injuries: Vec<String> = injuries.iter().map(|i| fold(i)).collect();
    INJURY_RULES
        .iter()
        .filter(|rule| injuries.iter().any(|injury| injury.contains(rule.key)))
        .collect()
}

fn hits(rule: &InjuryRule, exercise: &Exercise) -> bool {
    let name = fold(&exercise.name);
    rule.avoid.iter().any(|keyword| name.contains(keyword))
}

/// Swap exercises that stress an injured area for the rule's first
/// alternative, then drop anything still unsafe.
pub fn apply_injury_rules(exercises: Vec<Exercise>, injuries: &[String]) -> Vec<Exercise> {
    let rules = matching_rules(injuries);
    if rules.is_empty() {
        return exercises;
    }

    exercises
        .into_iter()
        .map(|mut exercise| {
            for rule in &rules {
                if hits(rule, &exercise) {
                    if let Some(alternative) = rule.alternatives.first() {
                        debug!(from = %exercise.name, to = %alternative, injury = rule.key, "Replacing exercise");
                        exercise.name = (*alternative).to_string();
                        exercise.reps = REPLACEMENT_REPS.to_string();
                        exercise.rest = REPLACEMENT_REST.to_string();
                    }
                }
            }
            exercise
        })
        .filter(|exercise| !rules.iter().any(|rule| hits(rule, exercise)))
        .collect()
}

/// Scale sets by activity level: sedentary and light lose a set (never
/// below 2), intense gains one. Single timed blocks keep their one set.
pub fn adjust_volume(exercises: &mut [Exercise], activity: ActivityLevel) {
    for exercise in exercises.iter_mut().filter(|e| e.sets > 1) {
        match activity {
            ActivityLevel::Sedentary | ActivityLevel::Light => {
                exercise.sets = (exercise.sets - 1).max(2);
                add_beginner_note(exercise);
            }
            ActivityLevel::Intense => exercise.sets += 1,
            ActivityLevel::Moderate | ActivityLevel::Unset => {}
        }
    }
}

/// Rep ranges and rest by training experience. Sets are left alone.
pub fn adjust_for_experience(exercises: &mut [Exercise], experience: ExperienceLevel) {
    for exercise in exercises.iter_mut().filter(|e| e.sets > 1) {
        match experience {
            ExperienceLevel::Beginner => {
                exercise.reps = BEGINNER_REPS.to_string();
                exercise.rest = BEGINNER_REST.to_string();
                add_beginner_note(exercise);
            }
            ExperienceLevel::Advanced => {
                exercise.reps = ADVANCED_REPS.to_string();
                exercise.rest = ADVANCED_REST.to_string();
            }
            ExperienceLevel::Intermediate | ExperienceLevel::Unset => {}
        }
    }
}

/// Keep at most `max(3, minutes / 8)` exercises. Templates list compound
/// movements first, so the tail is what goes.
pub fn fit_session_length(exercises: &mut Vec<Exercise>, minutes: u32) {
    if minutes == 0 {
        return;
    }
    let max = ((minutes / MINUTES_PER_EXERCISE) as usize).max(MIN_EXERCISES);
    exercises.truncate(max);
}

/// Full personalisation pipeline for one template's exercises.
pub fn process_exercises(exercises: Vec<Exercise>, profile: &UserProfile) -> Vec<Exercise> {
    let mut exercises = apply_injury_rules(exercises, &profile.injuries);
    adjust_volume(&mut exercises, profile.activity_level);
    adjust_for_experience(&mut exercises, profile.experience);
    fit_session_length(&mut exercises, profile.session_minutes);
    exercises
}

/// Build one workout from a template. `None` when the key is unknown for
/// the modality.
pub fn generate(
    modality: Modality,
    key: &str,
    profile: &UserProfile,
    weekday: &str,
) -> Option<Workout> {
    let def = template(modality, key)?;
    let exercises = process_exercises(def.instantiate(), profile);
    Some(Workout::new(def.name, weekday, exercises))
}

/// The weekly plan for the profile's modality and days per week.
pub fn generate_plan(profile: &UserProfile) -> Vec<Workout> {
    let modality = profile.modality.effective();
    let plan: Vec<Workout> = split(modality, profile.training_days_per_week)
        .iter()
        .filter_map(|entry| generate(modality, entry.template, profile, entry.weekday))
        .collect();

    debug!(
        modality = modality.label(),
        days = profile.training_days_per_week,
        workouts = plan.len(),
        "Generated workout plan"
    );
    plan
}
