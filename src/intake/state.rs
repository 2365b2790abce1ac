//! Intake step model: which question the conversation is on.

use serde::{Deserialize, Serialize};

/// The steps of the intake conversation.
///
/// Linear part: BasicInfo → Measurements → Objective → Activity → Health →
/// Complete. The two preference sub-steps hang off Complete and always return
/// to it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntakeStep {
    #[default]
    #[serde(rename = "info_basica")]
    BasicInfo,
    #[serde(rename = "medidas")]
    Measurements,
    #[serde(rename = "objetivo")]
    Objective,
    #[serde(rename = "atividade")]
    Activity,
    #[serde(rename = "saude")]
    Health,
    #[serde(rename = "complete")]
    Complete,
    #[serde(rename = "treino_preferencias")]
    TrainingPreferences,
    #[serde(rename = "dieta_preferencias")]
    DietPreferences,
}

impl IntakeStep {
    /// The linear steps in order, ending at `Complete`.
    pub const LINEAR: [IntakeStep; 6] = [
        IntakeStep::BasicInfo,
        IntakeStep::Measurements,
        IntakeStep::Objective,
        IntakeStep::Activity,
        IntakeStep::Health,
        IntakeStep::Complete,
    ];

    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: IntakeStep) -> bool {
        use IntakeStep::*;
        matches!(
            (self, target),
            (BasicInfo, Measurements)
                | (Measurements, Objective)
                | (Objective, Activity)
                | (Activity, Health)
                | (Health, Complete)
                | (Complete, TrainingPreferences)
                | (Complete, DietPreferences)
                | (TrainingPreferences, Complete)
                | (DietPreferences, Complete)
        )
    }

    /// Whether the linear intake is done.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete)
    }

    /// Whether this step belongs to the linear questionnaire.
    pub fn is_linear(&self) -> bool {
        !matches!(self, Self::Complete | Self::TrainingPreferences | Self::DietPreferences)
    }

    /// Whether this is one of the on-demand preference sub-steps.
    pub fn is_preference_step(&self) -> bool {
        matches!(self, Self::TrainingPreferences | Self::DietPreferences)
    }

    /// The step reached after a successful answer. `Complete` has no next
    /// step on its own; sub-steps are entered by command.
    pub fn next(&self) -> Option<IntakeStep> {
        use IntakeStep::*;
        match self {
            BasicInfo => Some(Measurements),
            Measurements => Some(Objective),
            Objective => Some(Activity),
            Activity => Some(Health),
            Health => Some(Complete),
            TrainingPreferences | DietPreferences => Some(Complete),
            Complete => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BasicInfo => "info_basica",
            Self::Measurements => "medidas",
            Self::Objective => "objetivo",
            Self::Activity => "atividade",
            Self::Health => "saude",
            Self::Complete => "complete",
            Self::TrainingPreferences => "treino_preferencias",
            Self::DietPreferences => "dieta_preferencias",
        }
    }
}

impl std::fmt::Display for IntakeStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [IntakeStep; 8] = [
        IntakeStep::BasicInfo,
        IntakeStep::Measurements,
        IntakeStep::Objective,
        IntakeStep::Activity,
        IntakeStep::Health,
        IntakeStep::Complete,
        IntakeStep::TrainingPreferences,
        IntakeStep::DietPreferences,
    ];

    #[test]
    fn valid_transitions() {
        for pair in IntakeStep::LINEAR.windows(2) {
            assert!(
                pair[0].can_transition_to(pair[1]),
                "{} should transition to {}",
                pair[0],
                pair[1]
            );
        }
        assert!(IntakeStep::Complete.can_transition_to(IntakeStep::TrainingPreferences));
        assert!(IntakeStep::DietPreferences.can_transition_to(IntakeStep::Complete));
    }

    #[test]
    fn invalid_transitions() {
        use IntakeStep::*;
        // Skip steps
        assert!(!BasicInfo.can_transition_to(Objective));
        // Go backward
        assert!(!Complete.can_transition_to(BasicInfo));
        assert!(!Health.can_transition_to(Activity));
        // Sub-steps only from Complete
        assert!(!Health.can_transition_to(TrainingPreferences));
        assert!(!TrainingPreferences.can_transition_to(DietPreferences));
        // Self-transition
        assert!(!Complete.can_transition_to(Complete));
    }

    #[test]
    fn next_is_consistent_with_transition_table() {
        for step in ALL {
            if let Some(next) = step.next() {
                assert!(step.can_transition_to(next), "{step} -> {next}");
            }
        }
    }

    #[test]
    fn next_walks_linear_steps() {
        let mut current = IntakeStep::default();
        let mut hops = 0;
        while let Some(next) = current.next() {
            current = next;
            hops += 1;
        }
        assert_eq!(current, IntakeStep::Complete);
        assert_eq!(hops, 5);
    }

    #[test]
    fn classification() {
        assert!(IntakeStep::Complete.is_terminal());
        assert!(!IntakeStep::Health.is_terminal());
        assert!(IntakeStep::Activity.is_linear());
        assert!(!IntakeStep::Complete.is_linear());
        assert!(IntakeStep::DietPreferences.is_preference_step());
    }

    #[test]
    fn display_matches_serde() {
        for step in ALL {
            let json = serde_json::to_string(&step).unwrap();
            assert_eq!(format!("\"{step}\""), json, "Display and serde should match for {step:?}");
        }
    }
}
