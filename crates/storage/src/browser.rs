use liftplan_domain::{self as domain, ProgramStateRepository as _, SubmissionRepository as _};

use crate::{
    local_storage::LocalStorage,
    rest::{GlooNetSendRequest, REST, SendRequest},
};

/// Program state kept in the local storage of the browser, submissions sent to the server.
#[derive(Clone)]
pub struct BrowserStorage<S: SendRequest> {
    pub rest: REST<S>,
}

impl BrowserStorage<GlooNetSendRequest> {
    #[must_use]
    pub const fn new() -> Self {
        Self { rest: REST::new() }
    }
}

impl Default for BrowserStorage<GlooNetSendRequest> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SendRequest> domain::ProgramStateRepository for BrowserStorage<S> {
    fn read_program_state(&self) -> Result<Option<domain::ProgramState>, domain::ReadError> {
        LocalStorage.read_program_state()
    }

    fn write_program_state(&self, state: &domain::ProgramState) -> Result<(), domain::WriteError> {
        LocalStorage.write_program_state(state)
    }
}

impl<S: SendRequest> domain::SubmissionRepository for BrowserStorage<S> {
    async fn submit_program(
        &self,
        program: &domain::ProgramMetadata,
        athlete: &domain::AthleteDetails,
        days: &[domain::DayWorkout],
    ) -> Result<domain::ProgramID, domain::SubmitError> {
        self.rest.submit_program(program, athlete, days).await
    }
}
