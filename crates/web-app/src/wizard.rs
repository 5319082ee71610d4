use std::{
    rc::Rc,
    sync::{Arc, Mutex},
};

use liftplan_domain::{
    ExerciseMovement, GroupError, Navigator, ProgramState, ProgramStateRepository,
    ProgramStateService, ProgramStore, Rules, Service, SubmissionRepository,
};
use log::{debug, warn};

use crate::{Settings, SettingsRepository, SettingsService, preview::Preview};

/// Application side of the program wizard.
///
/// Ties the program store to the step navigator, the persisted state and the program submission.
pub struct Wizard<R> {
    store: ProgramStore,
    navigator: Navigator<Rules>,
    service: Rc<Service<R>>,
    settings: Settings,
    notifications: Vec<String>,
}

impl<R> Wizard<R>
where
    R: ProgramStateRepository + SubmissionRepository + 'static,
{
    /// Set up logging according to the stored settings and restore the persisted program.
    ///
    /// The settings and the log entries are kept in `app_repository`.
    pub async fn start<A>(repository: R, app_repository: A) -> Self
    where
        A: SettingsRepository + crate::log::Repository + Clone,
    {
        let stored = crate::Service::new(app_repository.clone())
            .get_settings()
            .await;
        let settings = stored.as_ref().copied().unwrap_or_default();
        if crate::log::init(Arc::new(Mutex::new(app_repository)), settings.log_level).is_err() {
            crate::log::set_level(settings.log_level);
        }
        if let Err(err) = stored {
            warn!("failed to get settings: {err}");
        }
        Self::load(repository, settings)
    }

    /// Restore the persisted program and keep it persisted on every change.
    ///
    /// Nothing is written before the first change, so an unreadable program state stays in
    /// place until the user starts over.
    pub fn load(repository: R, settings: Settings) -> Self {
        let service = Rc::new(Service::new(repository));
        let state = service.get_program_state().unwrap_or_else(|_| {
            warn!("starting with empty program, stored program state will be replaced");
            ProgramState::default()
        });

        let mut store = ProgramStore::new(state);
        if store.state().wizard.flow != settings.flow {
            debug!("switching to {} flow", settings.flow.key());
            store.set_flow(settings.flow);
        }
        let persistence = Rc::clone(&service);
        store.subscribe(move |state| {
            let _ = persistence.set_program_state(state);
        });

        Self {
            store,
            navigator: Navigator::new(Rules),
            service,
            settings,
            notifications: vec![],
        }
    }

    #[must_use]
    pub fn store(&self) -> &ProgramStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ProgramStore {
        &mut self.store
    }

    #[must_use]
    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
        if self.store.state().wizard.flow != settings.flow {
            self.store.set_flow(settings.flow);
        }
    }

    /// Leave the current step in forward direction.
    ///
    /// On the submission step of a flow the program is submitted first. A failed submission is
    /// reported as notification and the wizard stays on the current step.
    pub async fn next(&mut self) -> bool {
        let flow = self.store.state().wizard.flow;
        if flow.submission_index() != Some(self.store.current_step()) {
            return self.navigator.next(&mut self.store).await;
        }
        match self
            .service
            .submit_and_advance(&mut self.store, &self.navigator)
            .await
        {
            Ok(_) => true,
            Err(err) => {
                self.notifications
                    .push(format!("Failed to submit program: {err}"));
                false
            }
        }
    }

    pub async fn back(&mut self) -> bool {
        self.navigator.back(&mut self.store).await
    }

    /// Jump to a step. Jumps across a submission step are only possible after the program was
    /// submitted. Any change of the program after the submission requires a new submission.
    pub async fn click_step(&mut self, target: usize) -> bool {
        let state = self.store.state();
        if let Some(submission) = state.wizard.flow.submission_index() {
            if state.wizard.current_step <= submission
                && target > submission
                && state.program.program_id.is_none()
            {
                debug!("rejected jump to step {target} of unsubmitted program");
                return false;
            }
        }
        self.navigator.click_step(&mut self.store, target).await
    }

    /// Save an exercise of a day.
    ///
    /// Exercises with related movements always have to form a valid group. Without related
    /// movements the group rules only apply if strict movement groups are enabled.
    pub fn save_exercise(
        &mut self,
        day: u32,
        exercise: ExerciseMovement,
    ) -> Result<(), Vec<GroupError>> {
        if self.settings.strict_movement_groups || !exercise.related_exercises.is_empty() {
            return self.store.save_movement_group(day, exercise).inspect_err(|errors| {
                warn!(
                    "invalid movement group: {}",
                    errors
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join("; ")
                );
            });
        }
        self.store.replace_exercise(day, exercise);
        Ok(())
    }

    #[must_use]
    pub fn notifications(&self) -> &[String] {
        &self.notifications
    }

    pub fn dismiss_notification(&mut self, index: usize) {
        if index < self.notifications.len() {
            self.notifications.remove(index);
        }
    }

    #[must_use]
    pub fn preview(&self) -> Preview {
        Preview::from(self.store.state())
    }
}

#[cfg(test)]
mod tests {
    use std::{
        cell::{Cell, RefCell},
        collections::VecDeque,
    };

    use futures::executor::block_on;
    use liftplan_domain::{
        AthleteDetails, DayWorkout, ExperienceLevel, Flow, MuscleTag, ProgramID, ProgramMetadata,
        ReadError, SetType, StorageError, SubmitError, WriteError,
    };
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[derive(Default)]
    struct MockRepository {
        stored: Rc<RefCell<Option<ProgramState>>>,
        unreadable: bool,
        writes: Rc<Cell<usize>>,
        response: RefCell<Option<Result<ProgramID, SubmitError>>>,
    }

    impl ProgramStateRepository for MockRepository {
        fn read_program_state(&self) -> Result<Option<ProgramState>, ReadError> {
            if self.unreadable {
                return Err(ReadError::Other("invalid muscle tag".into()));
            }
            Ok(self.stored.borrow().clone())
        }

        fn write_program_state(&self, state: &ProgramState) -> Result<(), WriteError> {
            self.writes.set(self.writes.get() + 1);
            *self.stored.borrow_mut() = Some(state.clone());
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct MockAppRepository {
        settings: Option<Settings>,
        entries: Arc<Mutex<VecDeque<crate::log::Entry>>>,
    }

    impl SettingsRepository for MockAppRepository {
        async fn read_settings(&self) -> Result<Settings, String> {
            self.settings.ok_or(String::from("settings are not available"))
        }

        async fn write_settings(&self, _: Settings) -> Result<(), String> {
            Ok(())
        }
    }

    impl crate::log::Repository for MockAppRepository {
        fn read_entries(&self) -> Result<VecDeque<crate::log::Entry>, crate::log::Error> {
            self.entries
                .lock()
                .map(|entries| entries.clone())
                .map_err(|err| crate::log::Error::Unknown(err.to_string()))
        }

        fn write_entry(&self, entry: crate::log::Entry) -> Result<(), crate::log::Error> {
            let mut entries = self
                .entries
                .lock()
                .map_err(|err| crate::log::Error::Unknown(err.to_string()))?;
            crate::log::push_entry(&mut entries, entry);
            Ok(())
        }
    }

    impl SubmissionRepository for MockRepository {
        async fn submit_program(
            &self,
            _: &ProgramMetadata,
            _: &AthleteDetails,
            _: &[DayWorkout],
        ) -> Result<ProgramID, SubmitError> {
            self.response
                .borrow_mut()
                .take()
                .unwrap_or(Err(SubmitError::Storage(StorageError::NoConnection)))
        }
    }

    fn coached() -> Settings {
        Settings {
            flow: Flow::Coached,
            ..Settings::default()
        }
    }

    fn fill_coached_program(wizard: &mut Wizard<MockRepository>) {
        let store = wizard.store_mut();
        store.set_program_name("Hypertrophy");
        store.set_days_per_week("1");
        store.set_athlete_name("Alice");
        store.set_athlete_phone("0123");
        store.set_athlete_age("30");
        store.set_athlete_height("170");
        store.set_athlete_weight("60");
        store.set_athlete_experience(Some(ExperienceLevel::Intermediate));
        store.select_muscle(1, MuscleTag::Chest);
    }

    #[test]
    fn test_load_restores_persisted_state() {
        let stored = Rc::new(RefCell::new(None));
        let repository = MockRepository {
            stored: Rc::clone(&stored),
            ..MockRepository::default()
        };
        let mut wizard = Wizard::load(repository, Settings::default());
        wizard.store_mut().set_program_name("Push Pull Legs");
        wizard.store_mut().set_days_per_week("3");
        let persisted = stored.borrow().clone().unwrap();
        assert_eq!(persisted, *wizard.store().state());

        let repository = MockRepository {
            stored: Rc::clone(&stored),
            ..MockRepository::default()
        };
        let wizard = Wizard::load(repository, Settings::default());
        assert_eq!(*wizard.store().state(), persisted);
    }

    #[test]
    fn test_load_applies_flow_from_settings() {
        let wizard = Wizard::load(MockRepository::default(), coached());
        assert_eq!(wizard.store().state().wizard.flow, Flow::Coached);
    }

    #[test]
    fn test_load_keeps_unreadable_state_until_first_change() {
        let writes = Rc::new(Cell::new(0));
        let repository = MockRepository {
            unreadable: true,
            writes: Rc::clone(&writes),
            ..MockRepository::default()
        };

        let mut wizard = Wizard::load(repository, coached());
        assert_eq!(wizard.store().state().wizard.flow, Flow::Coached);
        assert_eq!(writes.get(), 0);

        wizard.store_mut().set_program_name("Fresh Start");
        assert_eq!(writes.get(), 1);
    }

    #[rstest]
    #[case(
        Some(Settings {
            flow: Flow::Coached,
            strict_movement_groups: true,
            log_level: ::log::LevelFilter::Debug,
        })
    )]
    #[case(None)]
    fn test_start_uses_stored_settings(#[case] settings: Option<Settings>) {
        let app_repository = MockAppRepository {
            settings,
            ..MockAppRepository::default()
        };

        let wizard = block_on(Wizard::start(MockRepository::default(), app_repository));

        let expected = settings.unwrap_or_default();
        assert_eq!(wizard.settings(), expected);
        assert_eq!(wizard.store().state().wizard.flow, expected.flow);
    }

    #[test]
    fn test_next_submits_on_submission_step() {
        let repository = MockRepository {
            response: RefCell::new(Some(Ok(ProgramID::from("42")))),
            ..MockRepository::default()
        };
        let mut wizard = Wizard::load(repository, coached());
        fill_coached_program(&mut wizard);

        assert!(block_on(wizard.next()));
        assert!(block_on(wizard.next()));
        assert_eq!(wizard.store().current_step(), 2);

        assert!(block_on(wizard.next()));
        assert_eq!(wizard.store().current_step(), 3);
        assert_eq!(
            wizard.store().state().program.program_id,
            Some(ProgramID::from("42"))
        );
        assert!(wizard.notifications().is_empty());
    }

    #[test]
    fn test_next_reports_failed_submission() {
        let mut wizard = Wizard::load(MockRepository::default(), coached());
        fill_coached_program(&mut wizard);
        assert!(block_on(wizard.click_step(2)));
        let before = wizard.store().state().clone();

        assert!(!block_on(wizard.next()));
        assert_eq!(*wizard.store().state(), before);
        assert_eq!(
            wizard.notifications(),
            ["Failed to submit program: no connection"]
        );

        wizard.dismiss_notification(0);
        assert!(wizard.notifications().is_empty());
    }

    #[rstest]
    #[case(None, false, 2)]
    #[case(Some(ProgramID::from("7")), true, 3)]
    fn test_click_step_across_submission_step(
        #[case] program_id: Option<ProgramID>,
        #[case] expected: bool,
        #[case] expected_step: usize,
    ) {
        let mut wizard = Wizard::load(MockRepository::default(), coached());
        fill_coached_program(&mut wizard);
        if let Some(program_id) = program_id {
            wizard.store_mut().set_program_id(program_id);
        }
        assert!(block_on(wizard.click_step(2)));

        assert_eq!(block_on(wizard.click_step(3)), expected);
        assert_eq!(wizard.store().current_step(), expected_step);
    }

    #[test]
    fn test_changes_after_submission_require_new_submission() {
        let repository = MockRepository {
            response: RefCell::new(Some(Ok(ProgramID::from("42")))),
            ..MockRepository::default()
        };
        let mut wizard = Wizard::load(repository, coached());
        fill_coached_program(&mut wizard);
        assert!(block_on(wizard.click_step(2)));
        assert!(block_on(wizard.next()));
        assert_eq!(wizard.store().current_step(), 3);

        assert!(block_on(wizard.click_step(1)));
        wizard.store_mut().set_days_per_week("2");
        wizard.store_mut().select_muscle(2, MuscleTag::Rest);

        assert_eq!(wizard.store().state().program.program_id, None);
        assert!(!block_on(wizard.click_step(3)));
        assert_eq!(wizard.store().current_step(), 1);
    }

    #[test]
    fn test_back() {
        let mut wizard = Wizard::load(MockRepository::default(), Settings::default());
        assert!(!block_on(wizard.back()));
        wizard.store_mut().set_program_name("Full Body");
        wizard.store_mut().set_days_per_week("2");
        assert!(block_on(wizard.next()));
        assert!(block_on(wizard.back()));
        assert_eq!(wizard.store().current_step(), 0);
    }

    #[rstest]
    #[case(false, Ok(()), 1)]
    #[case(
        true,
        Err(vec![GroupError::Cardinality { set_type: "Superset", min: 2, max: 2, actual: 0 }]),
        0
    )]
    fn test_save_exercise(
        #[case] strict_movement_groups: bool,
        #[case] expected: Result<(), Vec<GroupError>>,
        #[case] exercise_count: usize,
    ) {
        let mut wizard = Wizard::load(
            MockRepository::default(),
            Settings {
                strict_movement_groups,
                ..Settings::default()
            },
        );
        wizard.store_mut().set_days_per_week("1");
        let exercise = ExerciseMovement::new("Chest Superset", MuscleTag::Chest, SetType::Superset);

        assert_eq!(wizard.save_exercise(1, exercise), expected);
        assert_eq!(wizard.store().exercise_count(), exercise_count);
    }

    #[test]
    fn test_preview() {
        let mut wizard = Wizard::load(MockRepository::default(), Settings::default());
        wizard.store_mut().set_program_name("Full Body");
        wizard.store_mut().set_days_per_week("2");
        let preview = wizard.preview();
        assert_eq!(preview.name, "Full Body");
        assert_eq!(preview.days.len(), 2);
    }
}
