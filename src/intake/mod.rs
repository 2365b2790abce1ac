//! Conversational intake: a keyword/regex driven questionnaire that fills
//! the `UserProfile` one chat turn at a time.
//!
//! The linear steps collect the basics (age, measurements, objective,
//! activity, health). Once complete, free-form messages are routed to
//! commands, and two preference sub-steps can be entered on demand.

pub mod commands;
pub mod extract;
pub mod machine;
pub mod prompts;
pub mod state;

pub use commands::Command;
pub use machine::{ConversationStateMachine, Turn, TurnAction, TurnContext};
pub use state::IntakeStep;
