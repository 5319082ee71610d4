use log::{debug, error, info};

use crate::{
    Navigator, ProgramID, ProgramState, ProgramStateRepository, ProgramStateService,
    ProgramStore, ReadError, StepValidator, SubmissionRepository, SubmissionService, SubmitError,
    WriteError,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($result: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $result;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: ProgramStateRepository> ProgramStateService for Service<R> {
    fn get_program_state(&self) -> Result<ProgramState, ReadError> {
        log_on_error!(
            self.repository
                .read_program_state()
                .map(Option::unwrap_or_default),
            ReadError,
            "get",
            "program state"
        )
    }

    fn set_program_state(&self, state: &ProgramState) -> Result<(), WriteError> {
        log_on_error!(
            self.repository.write_program_state(state),
            WriteError,
            "set",
            "program state"
        )
    }
}

impl<R: SubmissionRepository> SubmissionService for Service<R> {
    async fn submit_program(&self, state: &ProgramState) -> Result<ProgramID, SubmitError> {
        log_on_error!(
            self.repository
                .submit_program(&state.program, &state.athlete, &state.days)
                .await,
            SubmitError,
            "submit",
            "program"
        )
    }
}

impl<R: SubmissionRepository> Service<R> {
    /// Submit the program and leave the current step.
    ///
    /// All steps up to and including the current one must pass the validator of the navigator.
    /// The store is only changed after the submission succeeded: the assigned ID is stored and
    /// the wizard moves to the next step.
    pub async fn submit_and_advance<V: StepValidator>(
        &self,
        store: &mut ProgramStore,
        navigator: &Navigator<V>,
    ) -> Result<ProgramID, SubmitError> {
        let current = store.current_step();
        if let Some(step) = navigator
            .first_incomplete(store.state(), 0, current + 1)
            .await
        {
            return Err(SubmitError::Incomplete(step));
        }

        let id = self.submit_program(store.state()).await?;
        info!("submitted program {id}");
        store.set_program_id(id.clone());
        store.go_to_step(current + 1);
        Ok(id)
    }
}
