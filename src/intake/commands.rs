//! Free-form command classification once the intake is complete.

use crate::text::{contains_any, fold};

/// What the user asked for after the linear intake finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start over: profile, plans, conversation.
    Reset,
    /// Enter the training-preferences sub-step.
    TrainingPreferences,
    /// Enter the diet-preferences sub-step.
    DietPreferences,
    /// Generate the weekly workout plan.
    Workout,
    /// Generate the diet plan.
    Diet,
    /// Show the stored data.
    Status,
    /// Anything else.
    Help,
}

const RESET_WORDS: &[&str] = &["reset", "reiniciar", "recomecar", "comecar de novo"];
const PREFERENCE_VERBS: &[&str] = &["personaliz", "preferencia", "ajustar", "configurar"];
const WORKOUT_WORDS: &[&str] = &[
    "treino", "exercicio", "musculacao", "corrida", "crossfit", "caminhada", "funcional",
    "calistenia",
];
const DIET_WORDS: &[&str] = &["dieta", "nutricao", "alimentacao", "comer", "caloria"];
const STATUS_WORDS: &[&str] = &["status", "resumo", "meus dados"];

/// Whether the message is an explicit reset command. Honoured on every step.
pub fn is_reset(input: &str) -> bool {
    let text = fold(input);
    let text = text.trim_start_matches('/');
    RESET_WORDS
        .iter()
        .any(|w| text == *w || text.starts_with(&format!("{w} ")))
}

/// Classify a message. First match wins, in declaration order of [`Command`].
pub fn classify(input: &str) -> Command {
    if is_reset(input) {
        return Command::Reset;
    }
    let text = fold(input);

    if contains_any(&text, PREFERENCE_VERBS) {
        if text.contains("treino") {
            return Command::TrainingPreferences;
        }
        if contains_any(&text, &["dieta", "alimenta", "refeic"]) {
            return Command::DietPreferences;
        }
    }

    if contains_any(&text, WORKOUT_WORDS) {
        Command::Workout
    } else if contains_any(&text, DIET_WORDS) {
        Command::Diet
    } else if contains_any(&text, STATUS_WORDS) {
        Command::Status
    } else {
        Command::Help
    }
}
