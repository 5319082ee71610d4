use std::fmt;

use log::debug;

use crate::{
    ProgramState, ProgramStore, validate_athlete_details, validate_muscle_assignment,
    validate_program_info,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    ProgramInfo,
    AthleteDetails,
    MuscleAssignment,
    Exercises,
    Preview,
}

impl Step {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Step::ProgramInfo => "Program Info",
            Step::AthleteDetails => "Athlete Details",
            Step::MuscleAssignment => "Muscle Assignment",
            Step::Exercises => "Exercises",
            Step::Preview => "Preview",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    #[default]
    Standard,
    Compact,
    /// Collects athlete details and submits the program before the preview.
    Coached,
}

impl Flow {
    #[must_use]
    pub fn steps(self) -> &'static [Step] {
        match self {
            Flow::Standard => &[
                Step::ProgramInfo,
                Step::MuscleAssignment,
                Step::Exercises,
                Step::Preview,
            ],
            Flow::Compact => &[Step::ProgramInfo, Step::MuscleAssignment, Step::Preview],
            Flow::Coached => &[
                Step::AthleteDetails,
                Step::MuscleAssignment,
                Step::Exercises,
                Step::Preview,
            ],
        }
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.steps().len()
    }

    #[must_use]
    pub fn step(self, index: usize) -> Option<Step> {
        self.steps().get(index).copied()
    }

    /// Index of the step that can only be left by submitting the program.
    #[must_use]
    pub fn submission_index(self) -> Option<usize> {
        match self {
            Flow::Coached => self.steps().iter().position(|s| *s == Step::Exercises),
            Flow::Standard | Flow::Compact => None,
        }
    }

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Flow::Standard => "standard",
            Flow::Compact => "compact",
            Flow::Coached => "coached",
        }
    }
}

impl From<&str> for Flow {
    fn from(value: &str) -> Self {
        match value {
            "compact" => Flow::Compact,
            "coached" => Flow::Coached,
            _ => Flow::Standard,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WizardState {
    pub current_step: usize,
    pub flow: Flow,
}

impl WizardState {
    #[must_use]
    pub fn step(&self) -> Option<Step> {
        self.flow.step(self.current_step)
    }

    #[must_use]
    pub fn is_last_step(&self) -> bool {
        self.current_step + 1 >= self.flow.len()
    }
}

/// Decides whether the wizard may leave a step in forward direction.
///
/// Validation may suspend, e.g. to consult a server, so callers always await the result.
#[allow(async_fn_in_trait)]
pub trait StepValidator {
    async fn validate(&self, step: Step, state: &ProgramState) -> bool;
}

/// Local validation rules for every step.
#[derive(Debug, Default, Clone, Copy)]
pub struct Rules;

impl Rules {
    #[must_use]
    pub fn is_complete(self, step: Step, state: &ProgramState) -> bool {
        match step {
            Step::ProgramInfo => validate_program_info(&state.program),
            Step::AthleteDetails => match state.wizard.flow {
                Flow::Coached => {
                    validate_athlete_details(&state.athlete)
                        && validate_program_info(&state.program)
                }
                Flow::Standard | Flow::Compact => validate_athlete_details(&state.athlete),
            },
            Step::MuscleAssignment => validate_muscle_assignment(&state.days),
            Step::Exercises | Step::Preview => true,
        }
    }
}

impl StepValidator for Rules {
    async fn validate(&self, step: Step, state: &ProgramState) -> bool {
        self.is_complete(step, state)
    }
}

/// Step state machine on top of the wizard state of a [`ProgramStore`].
pub struct Navigator<V> {
    validator: V,
}

impl<V: StepValidator> Navigator<V> {
    pub fn new(validator: V) -> Self {
        Self { validator }
    }

    /// Whether every step in `from..to` passes validation.
    pub async fn can_advance(&self, state: &ProgramState, from: usize, to: usize) -> bool {
        if to > state.wizard.flow.len() {
            return false;
        }
        self.first_incomplete(state, from, to).await.is_none()
    }

    /// First step in `from..to` that fails validation. Indices beyond the flow are ignored.
    pub async fn first_incomplete(
        &self,
        state: &ProgramState,
        from: usize,
        to: usize,
    ) -> Option<Step> {
        for step in (from..to).map_while(|index| state.wizard.flow.step(index)) {
            if !self.validator.validate(step, state).await {
                debug!("step \"{step}\" is incomplete");
                return Some(step);
            }
        }
        None
    }

    /// Move to `target`. Returns `false` if the transition was rejected.
    ///
    /// Moving backwards or staying is always allowed. Moving forward requires every step between
    /// the current and the target step to be valid.
    pub async fn click_step(&self, store: &mut ProgramStore, target: usize) -> bool {
        if target >= store.state().wizard.flow.len() {
            return false;
        }
        let current = store.current_step();
        if target > current && !self.can_advance(store.state(), current, target).await {
            return false;
        }
        if target != current {
            store.go_to_step(target);
        }
        true
    }

    pub async fn next(&self, store: &mut ProgramStore) -> bool {
        let current = store.current_step();
        self.click_step(store, current + 1).await
    }

    pub async fn back(&self, store: &mut ProgramStore) -> bool {
        match store.current_step().checked_sub(1) {
            Some(previous) => self.click_step(store, previous).await,
            None => false,
        }
    }
}
