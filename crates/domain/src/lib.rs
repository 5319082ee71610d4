#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod catalog;
mod day;
mod error;
mod exercise;
mod muscle;
mod program;
mod service;
mod store;
mod wizard;

use std::slice::Iter;

pub use catalog::{
    GroupError, Movement, MovementField, SetType, SetTypeDescriptor, SetTypeError, describe,
    group_violations, is_group_valid,
};
pub use day::{DayID, DayIDError, DayWorkout, MAX_DAYS_PER_WEEK, parse_day_count, reconcile};
pub use error::{ReadError, StorageError, SubmitError, WriteError};
pub use exercise::{
    ExerciseID, ExerciseMovement, PyramidScheme, Reps, RepsError, SetConfig, Tempo, TempoError,
    Time, TimeError, Weight, WeightError,
};
pub use muscle::{MuscleTag, MuscleTagError, TargetMuscles};
pub use program::{
    AthleteDetails, ExperienceLevel, ExperienceLevelError, ProgramID, ProgramMetadata,
    validate_athlete_details, validate_muscle_assignment, validate_program_info,
};
pub use service::Service;
pub use store::{ProgramState, ProgramStore};
pub use wizard::{Flow, Navigator, Rules, Step, StepValidator, WizardState};

pub trait ProgramStateRepository {
    fn read_program_state(&self) -> Result<Option<ProgramState>, ReadError>;
    fn write_program_state(&self, state: &ProgramState) -> Result<(), WriteError>;
}

#[allow(async_fn_in_trait)]
pub trait SubmissionRepository {
    async fn submit_program(
        &self,
        program: &ProgramMetadata,
        athlete: &AthleteDetails,
        days: &[DayWorkout],
    ) -> Result<ProgramID, SubmitError>;
}

pub trait ProgramStateService {
    /// Persisted state, or the default state if nothing has been stored yet.
    fn get_program_state(&self) -> Result<ProgramState, ReadError>;
    fn set_program_state(&self, state: &ProgramState) -> Result<(), WriteError>;
}

#[allow(async_fn_in_trait)]
pub trait SubmissionService {
    async fn submit_program(&self, state: &ProgramState) -> Result<ProgramID, SubmitError>;
}

pub trait Property: Clone + Copy + Sized {
    fn iter() -> Iter<'static, Self>;
    fn iter_filter() -> Iter<'static, Self> {
        Self::iter()
    }
    fn name(self) -> &'static str;
}
