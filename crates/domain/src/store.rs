use log::debug;

use crate::{
    AthleteDetails, DayWorkout, ExerciseID, ExerciseMovement, ExperienceLevel, Flow, GroupError,
    MuscleTag, ProgramID, ProgramMetadata, Step, WizardState, group_violations, reconcile,
};

#[derive(Debug, Clone, PartialEq)]
pub struct ProgramState {
    pub program: ProgramMetadata,
    pub athlete: AthleteDetails,
    pub days: Vec<DayWorkout>,
    pub selected_day: u32,
    pub wizard: WizardState,
}

impl Default for ProgramState {
    fn default() -> Self {
        Self {
            program: ProgramMetadata::default(),
            athlete: AthleteDetails::default(),
            days: vec![],
            selected_day: 1,
            wizard: WizardState::default(),
        }
    }
}

type Listener = Box<dyn FnMut(&ProgramState)>;

/// Single owner of the program state.
///
/// Every mutation runs through one update cycle: apply the change, reconcile the days with the
/// requested number of days, clamp the selected day and notify all subscribers. Subscribers
/// therefore never observe a day collection that is out of sync.
pub struct ProgramStore {
    state: ProgramState,
    listeners: Vec<Listener>,
}

impl Default for ProgramStore {
    fn default() -> Self {
        Self::new(ProgramState::default())
    }
}

impl ProgramStore {
    #[must_use]
    pub fn new(state: ProgramState) -> Self {
        let mut store = Self {
            state,
            listeners: vec![],
        };
        store.synchronize();
        store
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&ProgramState) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    #[must_use]
    pub fn state(&self) -> &ProgramState {
        &self.state
    }

    #[must_use]
    pub fn day(&self, day: u32) -> Option<&DayWorkout> {
        self.state.days.iter().find(|d| d.day == day)
    }

    #[must_use]
    pub fn selected(&self) -> Option<&DayWorkout> {
        self.day(self.state.selected_day)
    }

    #[must_use]
    pub fn current_step(&self) -> usize {
        self.state.wizard.current_step
    }

    #[must_use]
    pub fn step(&self) -> Option<Step> {
        self.state.wizard.step()
    }

    #[must_use]
    pub fn exercise_count(&self) -> usize {
        self.state.days.iter().map(|d| d.exercises.len()).sum()
    }

    #[must_use]
    pub fn rest_days(&self) -> Vec<u32> {
        self.state
            .days
            .iter()
            .filter(|d| d.target_muscles.is_rest())
            .map(|d| d.day)
            .collect()
    }

    /// Apply a change and notify all subscribers.
    ///
    /// A change of the submitted program, athlete or days invalidates the program ID.
    pub fn update(&mut self, change: impl FnOnce(&mut ProgramState)) {
        let submitted = self
            .state
            .program
            .program_id
            .clone()
            .map(|id| (id, submitted_content(&self.state)));
        change(&mut self.state);
        self.synchronize();
        if let Some((id, content)) = submitted {
            if self.state.program.program_id.as_ref() == Some(&id)
                && submitted_content(&self.state) != content
            {
                debug!("program {id} changed after submission");
                self.state.program.program_id = None;
            }
        }
        for listener in &mut self.listeners {
            listener(&self.state);
        }
    }

    /// Replace the whole state, e.g. after restoring it from storage.
    pub fn replace(&mut self, state: ProgramState) {
        self.update(|s| *s = state);
    }

    pub fn reset(&mut self) {
        let flow = self.state.wizard.flow;
        self.update(|s| {
            *s = ProgramState {
                wizard: WizardState {
                    current_step: 0,
                    flow,
                },
                ..ProgramState::default()
            };
        });
    }

    pub fn set_program_name(&mut self, name: &str) {
        self.update(|s| s.program.name = name.to_string());
    }

    pub fn set_program_description(&mut self, description: &str) {
        self.update(|s| s.program.description = description.to_string());
    }

    pub fn set_days_per_week(&mut self, days_per_week: &str) {
        self.update(|s| s.program.days_per_week = days_per_week.to_string());
    }

    pub fn set_program_height(&mut self, height: &str) {
        self.update(|s| s.program.height = height.to_string());
    }

    pub fn set_program_weight(&mut self, weight: &str) {
        self.update(|s| s.program.weight = weight.to_string());
    }

    pub fn set_program_id(&mut self, program_id: ProgramID) {
        self.update(|s| s.program.program_id = Some(program_id));
    }

    pub fn set_athlete_name(&mut self, name: &str) {
        self.update(|s| s.athlete.name = name.to_string());
    }

    pub fn set_athlete_phone(&mut self, phone: &str) {
        self.update(|s| s.athlete.phone = phone.to_string());
    }

    pub fn set_athlete_age(&mut self, age: &str) {
        self.update(|s| s.athlete.age = age.to_string());
    }

    pub fn set_athlete_height(&mut self, height: &str) {
        self.update(|s| s.athlete.height = height.to_string());
    }

    pub fn set_athlete_weight(&mut self, weight: &str) {
        self.update(|s| s.athlete.weight = weight.to_string());
    }

    pub fn set_athlete_experience(&mut self, experience: Option<ExperienceLevel>) {
        self.update(|s| s.athlete.experience = experience);
    }

    pub fn set_flow(&mut self, flow: Flow) {
        self.update(|s| {
            s.wizard.flow = flow;
            s.wizard.current_step = s.wizard.current_step.min(flow.len() - 1);
        });
    }

    /// Jump to a step without validation; see [`crate::Navigator`] for gated navigation.
    pub(crate) fn go_to_step(&mut self, step: usize) {
        self.update(|s| s.wizard.current_step = step.min(s.wizard.flow.len() - 1));
    }

    pub fn select_day(&mut self, day: u32) {
        self.update(|s| s.selected_day = day);
    }

    pub fn select_muscle(&mut self, day: u32, tag: MuscleTag) {
        self.update_day(day, |d| d.target_muscles.select(tag));
    }

    pub fn deselect_muscle(&mut self, day: u32, tag: MuscleTag) {
        self.update_day(day, |d| d.target_muscles.deselect(tag));
    }

    pub fn toggle_muscle(&mut self, day: u32, tag: MuscleTag) {
        self.update_day(day, |d| d.target_muscles.toggle(tag));
    }

    /// Append an exercise without checking the movement group rules.
    pub fn add_exercise(&mut self, day: u32, exercise: ExerciseMovement) {
        self.update_day(day, |d| d.exercises.push(exercise));
    }

    /// Replace the exercise with the same ID or append it if it does not exist yet.
    pub fn replace_exercise(&mut self, day: u32, exercise: ExerciseMovement) {
        self.update_day(day, |d| {
            match d.exercises.iter_mut().find(|e| e.id == exercise.id) {
                Some(existing) => *existing = exercise,
                None => d.exercises.push(exercise),
            }
        });
    }

    pub fn remove_exercise(&mut self, day: u32, id: &ExerciseID) {
        self.update_day(day, |d| d.exercises.retain(|e| e.id != *id));
    }

    /// Move an exercise up (negative offset) or down (positive offset) within its day.
    pub fn move_exercise(&mut self, day: u32, id: &ExerciseID, offset: isize) {
        self.update_day(day, |d| {
            let Some(from) = d.exercises.iter().position(|e| e.id == *id) else {
                return;
            };
            let to = from
                .saturating_add_signed(offset)
                .min(d.exercises.len() - 1);
            let exercise = d.exercises.remove(from);
            d.exercises.insert(to, exercise);
        });
    }

    /// Save an exercise from the movement group editor.
    ///
    /// The related exercises must form a valid group of the exercise's set type, otherwise the
    /// state is left unchanged and the violations are returned.
    pub fn save_movement_group(
        &mut self,
        day: u32,
        exercise: ExerciseMovement,
    ) -> Result<(), Vec<GroupError>> {
        let violations = group_violations(exercise.set_type(), &exercise.related_exercises);
        if !violations.is_empty() {
            debug!(
                "rejected {} group \"{}\": {} violation(s)",
                exercise.set_type(),
                exercise.name,
                violations.len()
            );
            return Err(violations);
        }
        self.replace_exercise(day, exercise);
        Ok(())
    }

    fn update_day(&mut self, day: u32, change: impl FnOnce(&mut DayWorkout)) {
        if self.day(day).is_none() {
            debug!("ignored change of non-existing day {day}");
            return;
        }
        self.update(|s| {
            if let Some(d) = s.days.iter_mut().find(|d| d.day == day) {
                change(d);
            }
        });
    }

    fn synchronize(&mut self) {
        let days_per_week = self.state.program.day_count();
        let days = std::mem::take(&mut self.state.days);
        self.state.days = reconcile(days_per_week, days);
        self.state.selected_day = self.state.selected_day.clamp(1, days_per_week.max(1));
        self.state.wizard.current_step = self
            .state
            .wizard
            .current_step
            .min(self.state.wizard.flow.len() - 1);
    }
}

fn submitted_content(state: &ProgramState) -> (ProgramMetadata, AthleteDetails, Vec<DayWorkout>) {
    (
        ProgramMetadata {
            program_id: None,
            ..state.program.clone()
        },
        state.athlete.clone(),
        state.days.clone(),
    )
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use pretty_assertions::assert_eq;

    use crate::{
        MAX_DAYS_PER_WEEK, Movement, Reps, SetType, Time, Weight, validate_muscle_assignment,
    };

    use super::*;

    fn store_with_days(days_per_week: &str) -> ProgramStore {
        let mut store = ProgramStore::default();
        store.set_program_name("Upper Lower");
        store.set_days_per_week(days_per_week);
        store
    }

    fn movement(name: &str) -> Movement {
        Movement {
            name: name.to_string(),
            set_count: Some(3),
            rep_count: Some(Reps::new(12).unwrap()),
            weight: Some(Weight::new(20.0).unwrap()),
            rest_time: Some(Time::new(60).unwrap()),
            tempo: None,
            duration: None,
        }
    }

    fn day_numbers(store: &ProgramStore) -> Vec<u32> {
        store.state().days.iter().map(|d| d.day).collect()
    }

    #[test]
    fn test_days_follow_days_per_week() {
        let mut store = ProgramStore::default();
        assert_eq!(day_numbers(&store), Vec::<u32>::new());

        store.set_days_per_week("3");
        assert_eq!(day_numbers(&store), vec![1, 2, 3]);

        store.set_days_per_week("5");
        assert_eq!(day_numbers(&store), vec![1, 2, 3, 4, 5]);

        store.set_days_per_week("abc");
        assert_eq!(day_numbers(&store), Vec::<u32>::new());
    }

    #[test]
    fn test_program_id_is_cleared_by_content_changes() {
        let mut store = store_with_days("2");
        store.set_program_id(ProgramID::from("p-1"));
        store.select_day(2);
        store.set_flow(Flow::Coached);
        assert_eq!(store.state().program.program_id, Some(ProgramID::from("p-1")));

        store.select_muscle(1, MuscleTag::Chest);
        assert_eq!(store.state().program.program_id, None);

        store.set_program_id(ProgramID::from("p-2"));
        store.set_athlete_name("Bob");
        assert_eq!(store.state().program.program_id, None);

        store.set_program_id(ProgramID::from("p-3"));
        store.set_days_per_week("3");
        assert_eq!(store.state().program.program_id, None);
    }

    #[test]
    fn test_days_per_week_is_capped() {
        let mut store = store_with_days("4000000000");
        assert_eq!(day_numbers(&store), (1..=MAX_DAYS_PER_WEEK).collect::<Vec<_>>());

        store.set_days_per_week("8");
        assert_eq!(store.state().days.len(), 7);
        assert_eq!(store.state().program.days_per_week, "8");
    }

    #[test]
    fn test_new_reconciles_initial_state() {
        let store = ProgramStore::new(ProgramState {
            program: ProgramMetadata {
                days_per_week: String::from("2"),
                ..ProgramMetadata::default()
            },
            days: vec![DayWorkout::new(2), DayWorkout::new(4)],
            ..ProgramState::default()
        });
        assert_eq!(day_numbers(&store), vec![1, 2]);
    }

    #[test]
    fn test_reduction_keeps_first_days_unchanged() {
        let mut store = store_with_days("4");
        for (day, tag, name) in [
            (1, MuscleTag::Chest, "Bench Press"),
            (2, MuscleTag::Back, "Deadlift"),
            (3, MuscleTag::Legs, "Squat"),
            (4, MuscleTag::Shoulders, "Overhead Press"),
        ] {
            store.select_muscle(day, tag);
            store.add_exercise(day, ExerciseMovement::new(name, tag, SetType::Straight));
        }
        let before = store.state().days.clone();

        store.set_days_per_week("2");
        assert_eq!(store.state().days, before[..2].to_vec());

        store.set_days_per_week("4");
        assert_eq!(store.day(3), Some(&DayWorkout::new(3)));
        assert_eq!(store.day(4), Some(&DayWorkout::new(4)));
    }

    #[test]
    fn test_rest_is_exclusive() {
        let mut store = store_with_days("1");
        store.select_muscle(1, MuscleTag::Chest);
        store.select_muscle(1, MuscleTag::Triceps);
        store.select_muscle(1, MuscleTag::Rest);
        assert_eq!(
            store.day(1).unwrap().target_muscles.iter().collect::<Vec<_>>(),
            vec![MuscleTag::Rest]
        );
        assert_eq!(store.rest_days(), vec![1]);

        store.select_muscle(1, MuscleTag::Back);
        assert_eq!(
            store.day(1).unwrap().target_muscles.iter().collect::<Vec<_>>(),
            vec![MuscleTag::Back]
        );
        assert_eq!(store.rest_days(), Vec::<u32>::new());
    }

    #[test]
    fn test_change_of_non_existing_day_is_ignored() {
        let mut store = store_with_days("2");
        let notifications = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&notifications);
        store.subscribe(move |_| *counter.borrow_mut() += 1);

        store.select_muscle(3, MuscleTag::Chest);
        assert_eq!(*notifications.borrow(), 0);
        assert_eq!(day_numbers(&store), vec![1, 2]);
    }

    #[test]
    fn test_subscribers_observe_synchronized_state() {
        let mut store = ProgramStore::default();
        let observed = Rc::new(RefCell::new(vec![]));
        let sink = Rc::clone(&observed);
        store.subscribe(move |state| sink.borrow_mut().push(state.days.len()));

        store.set_days_per_week("3");
        store.set_days_per_week("1");
        store.set_program_name("Full Body");

        assert_eq!(*observed.borrow(), vec![3, 1, 1]);
    }

    #[test]
    fn test_selected_day_is_clamped() {
        let mut store = store_with_days("5");
        store.select_day(5);
        assert_eq!(store.selected().map(|d| d.day), Some(5));

        store.set_days_per_week("3");
        assert_eq!(store.state().selected_day, 3);

        store.select_day(0);
        assert_eq!(store.state().selected_day, 1);
    }

    #[test]
    fn test_exercise_editing() {
        let mut store = store_with_days("1");
        let squat = ExerciseMovement {
            id: 1.into(),
            ..ExerciseMovement::new("Squat", MuscleTag::Legs, SetType::Straight)
        };
        let lunge = ExerciseMovement {
            id: 2.into(),
            ..ExerciseMovement::new("Lunge", MuscleTag::Legs, SetType::Straight)
        };
        store.add_exercise(1, squat.clone());
        store.add_exercise(1, lunge.clone());
        assert_eq!(store.exercise_count(), 2);

        store.move_exercise(1, &lunge.id, -1);
        assert_eq!(store.day(1).unwrap().exercises, vec![lunge.clone(), squat.clone()]);

        store.move_exercise(1, &lunge.id, 5);
        assert_eq!(store.day(1).unwrap().exercises, vec![squat.clone(), lunge.clone()]);

        let heavy_squat = ExerciseMovement {
            sets: String::from("5"),
            ..squat.clone()
        };
        store.replace_exercise(1, heavy_squat.clone());
        assert_eq!(store.day(1).unwrap().exercises[0], heavy_squat);

        store.remove_exercise(1, &squat.id);
        assert_eq!(store.day(1).unwrap().exercises, vec![lunge]);
    }

    #[test]
    fn test_add_exercise_does_not_check_group_rules() {
        let mut store = store_with_days("1");
        store.add_exercise(
            1,
            ExerciseMovement::new("Bench Press", MuscleTag::Chest, SetType::Superset),
        );
        assert_eq!(store.exercise_count(), 1);
    }

    #[test]
    fn test_save_movement_group() {
        let mut store = store_with_days("1");
        let mut superset =
            ExerciseMovement::new("Chest Superset", MuscleTag::Chest, SetType::Superset);
        superset.related_exercises = vec![movement("Bench Press")];

        assert_eq!(
            store.save_movement_group(1, superset.clone()),
            Err(vec![GroupError::Cardinality {
                set_type: "Superset",
                min: 2,
                max: 2,
                actual: 1
            }])
        );
        assert_eq!(store.exercise_count(), 0);

        superset.related_exercises.push(movement("Cable Fly"));
        assert_eq!(store.save_movement_group(1, superset.clone()), Ok(()));
        assert_eq!(store.day(1).unwrap().exercises, vec![superset]);
    }

    #[test]
    fn test_scenario_from_empty_program_to_muscle_assignment() {
        let mut store = ProgramStore::default();
        store.set_program_name("Push Pull Legs");
        store.set_days_per_week("");
        assert!(store.state().days.is_empty());

        store.set_days_per_week("3");
        assert_eq!(day_numbers(&store), vec![1, 2, 3]);
        assert!(
            store
                .state()
                .days
                .iter()
                .all(|d| d.target_muscles.is_empty() && d.exercises.is_empty())
        );

        store.select_muscle(2, MuscleTag::Rest);
        assert!(!validate_muscle_assignment(&store.state().days));

        store.select_muscle(1, MuscleTag::Chest);
        store.select_muscle(3, MuscleTag::Back);
        store.select_muscle(3, MuscleTag::Shoulders);
        assert!(validate_muscle_assignment(&store.state().days));
    }

    #[test]
    fn test_set_flow_clamps_current_step() {
        let mut store = ProgramStore::default();
        store.go_to_step(3);
        assert_eq!(store.step(), Some(Step::Preview));

        store.set_flow(Flow::Compact);
        assert_eq!(store.current_step(), 2);
        assert_eq!(store.step(), Some(Step::Preview));
    }

    #[test]
    fn test_reset_keeps_flow() {
        let mut store = store_with_days("3");
        store.set_flow(Flow::Coached);
        store.set_athlete_name("Bob");
        store.go_to_step(2);

        store.reset();

        assert_eq!(
            *store.state(),
            ProgramState {
                wizard: WizardState {
                    current_step: 0,
                    flow: Flow::Coached
                },
                ..ProgramState::default()
            }
        );
    }
}
