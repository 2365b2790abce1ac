//! ConversationStateMachine: routes one chat turn to the right extractor
//! and decides the next step and reply.
//!
//! The machine never touches shared state. It returns a [`Turn`] describing
//! what should happen (merge this update, run this generator, reset) and the
//! session applies it.

use tracing::{debug, info};

use crate::profile::UserProfile;

use super::commands::{Command, classify, is_reset};
use super::extract::extract;
use super::prompts;
use super::state::IntakeStep;

/// Side effect requested by a turn. Applied by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnAction {
    GenerateWorkouts,
    GenerateDiet,
    Reset,
}

/// What the machine decided for one message.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub next_step: IntakeStep,
    /// `None` when the reply depends on the action's outcome (generation).
    pub reply: Option<String>,
    pub profile_update: Option<crate::profile::ProfileUpdate>,
    pub action: Option<TurnAction>,
}

impl Turn {
    fn reply(step: IntakeStep, reply: impl Into<String>) -> Self {
        Self {
            next_step: step,
            reply: Some(reply.into()),
            profile_update: None,
            action: None,
        }
    }

    fn action(step: IntakeStep, action: TurnAction) -> Self {
        Self {
            next_step: step,
            reply: None,
            profile_update: None,
            action: Some(action),
        }
    }
}

/// Read-only view of the session the machine needs to phrase replies.
#[derive(Debug, Clone, Copy)]
pub struct TurnContext<'a> {
    pub profile: &'a UserProfile,
    pub workouts_count: usize,
    pub has_diet: bool,
}

impl<'a> TurnContext<'a> {
    pub fn new(profile: &'a UserProfile) -> Self {
        Self {
            profile,
            workouts_count: 0,
            has_diet: false,
        }
    }
}

/// Decide the outcome of `input` on `step`. Pure.
pub fn advance(step: IntakeStep, ctx: TurnContext<'_>, input: &str) -> Turn {
    if is_reset(input) {
        return Turn {
            next_step: IntakeStep::BasicInfo,
            reply: Some(prompts::question(IntakeStep::BasicInfo, &ctx.profile.name)),
            profile_update: None,
            action: Some(TurnAction::Reset),
        };
    }

    if step.is_terminal() {
        return route_command(ctx, input);
    }

    let Some(update) = extract(step, input).filter(|u| !u.is_empty()) else {
        debug!(step = %step, "Could not parse answer, re-prompting");
        return Turn::reply(step, prompts::error_message(step));
    };

    let merged = update.applied_to(ctx.profile);
    let next_step = step.next().unwrap_or(IntakeStep::Complete);

    let reply = if step.is_preference_step() {
        prompts::preferences_ack(step, &update)
    } else if next_step.is_terminal() {
        prompts::completion_summary(&merged)
    } else {
        prompts::question(next_step, &merged.name)
    };

    Turn {
        next_step,
        reply: Some(reply),
        profile_update: Some(update),
        action: None,
    }
}

fn route_command(ctx: TurnContext<'_>, input: &str) -> Turn {
    let step = IntakeStep::Complete;
    match classify(input) {
        Command::TrainingPreferences => Turn::reply(
            IntakeStep::TrainingPreferences,
            prompts::question(IntakeStep::TrainingPreferences, &ctx.profile.name),
        ),
        Command::DietPreferences => Turn::reply(
            IntakeStep::DietPreferences,
            prompts::question(IntakeStep::DietPreferences, &ctx.profile.name),
        ),
        Command::Workout => Turn::action(step, TurnAction::GenerateWorkouts),
        Command::Diet => Turn::action(step, TurnAction::GenerateDiet),
        Command::Status => Turn::reply(
            step,
            prompts::status_message(ctx.profile, ctx.workouts_count, ctx.has_diet),
        ),
        Command::Help => Turn::reply(step, prompts::help_message(ctx.profile)),
        // is_reset already handled above; kept for exhaustiveness
        Command::Reset => Turn::action(IntakeStep::BasicInfo, TurnAction::Reset),
    }
}

/// Holds the active step and applies transitions from [`advance`].
#[derive(Debug, Default)]
pub struct ConversationStateMachine {
    step: IntakeStep,
}

impl ConversationStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume on a known step (e.g. a restored session).
    pub fn with_step(step: IntakeStep) -> Self {
        Self { step }
    }

    pub fn step(&self) -> IntakeStep {
        self.step
    }

    /// Process one message and move to the next step.
    pub fn advance(&mut self, ctx: TurnContext<'_>, input: &str) -> Turn {
        let turn = advance(self.step, ctx, input);
        if turn.next_step != self.step {
            info!(from = %self.step, to = %turn.next_step, "Intake step changed");
        }
        self.step = turn.next_step;
        turn
    }

    pub fn reset(&mut self) {
        self.step = IntakeStep::BasicInfo;
    }
}
