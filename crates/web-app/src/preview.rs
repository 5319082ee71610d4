//! Read-only snapshot of a finished program.
//!
//! The preview is what the document renderer receives. It contains display strings only, so the
//! renderer needs no knowledge of the domain rules.

use std::fmt;

use liftplan_domain::{
    DayWorkout, ExerciseMovement, Movement, ProgramState, PyramidScheme, SetConfig, describe,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub name: String,
    pub description: String,
    pub days_per_week: u32,
    pub athlete: Option<String>,
    pub days: Vec<DayPreview>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayPreview {
    pub title: String,
    pub muscles: String,
    pub is_rest: bool,
    pub exercises: Vec<ExercisePreview>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExercisePreview {
    pub name: String,
    pub set_type: &'static str,
    pub volume: String,
    pub details: Vec<String>,
    pub movements: Vec<String>,
}

impl From<&ProgramState> for Preview {
    fn from(state: &ProgramState) -> Self {
        let athlete = &state.athlete;
        Self {
            name: state.program.name.trim().to_string(),
            description: state.program.description.trim().to_string(),
            days_per_week: state.program.day_count(),
            athlete: (!athlete.name.trim().is_empty()).then(|| match athlete.experience {
                Some(experience) => format!("{} ({experience})", athlete.name.trim()),
                None => athlete.name.trim().to_string(),
            }),
            days: state.days.iter().map(DayPreview::from).collect(),
        }
    }
}

impl From<&DayWorkout> for DayPreview {
    fn from(day: &DayWorkout) -> Self {
        Self {
            title: format!("Day {}", day.day),
            muscles: day.target_muscles.to_string(),
            is_rest: day.target_muscles.is_rest(),
            exercises: day.exercises.iter().map(ExercisePreview::from).collect(),
        }
    }
}

impl From<&ExerciseMovement> for ExercisePreview {
    fn from(exercise: &ExerciseMovement) -> Self {
        Self {
            name: exercise.name.trim().to_string(),
            set_type: describe(exercise.set_type()).label,
            volume: volume(exercise.sets.trim(), exercise.reps.trim()),
            details: details(&exercise.set_config),
            movements: exercise.related_exercises.iter().map(movement).collect(),
        }
    }
}

fn volume(sets: &str, reps: &str) -> String {
    match (sets.is_empty(), reps.is_empty()) {
        (false, false) => format!("{sets} × {reps}"),
        (false, true) => format!("{sets} sets"),
        (true, false) => format!("{reps} reps"),
        (true, true) => String::new(),
    }
}

fn details(config: &SetConfig) -> Vec<String> {
    let mut details = vec![];
    match config {
        SetConfig::Drop {
            drops: Some(drops), ..
        } => details.push(format!("{drops} drops")),
        SetConfig::RestPause {
            target_reps: Some(target_reps),
            ..
        } => details.push(format!("{target_reps} target reps")),
        SetConfig::Pyramid { scheme, .. } => details.push(
            match scheme {
                PyramidScheme::Ascending => "ascending",
                PyramidScheme::Descending => "descending",
                PyramidScheme::Triangle => "triangle",
            }
            .to_string(),
        ),
        SetConfig::Cluster {
            reps_per_cluster: Some(reps),
            ..
        } => details.push(format!("{reps} reps per cluster")),
        SetConfig::Circuit {
            rounds: Some(rounds),
            ..
        }
        | SetConfig::Hiit {
            rounds: Some(rounds),
            ..
        } => details.push(format!("{rounds} rounds")),
        SetConfig::Powerbuilding {
            target_sets: Some(sets),
            target_reps: Some(reps),
            ..
        } => details.push(format!("{sets} × {reps} target")),
        _ => {}
    }
    if let Some(weight) = config.weight().filter(|w| f32::from(*w) > 0.0) {
        details.push(format!("{weight} kg"));
    }
    if let Some(work_time) = config.work_time().filter(|t| u32::from(*t) > 0) {
        details.push(format!("{work_time} s work"));
    }
    if let Some(rest_time) = config.rest_time().filter(|t| u32::from(*t) > 0) {
        details.push(format!("{rest_time} s rest"));
    }
    if let Some(tempo) = config.tempo().filter(|t| !t.is_unset()) {
        details.push(format!("tempo {tempo}"));
    }
    if !config.notes().trim().is_empty() {
        details.push(config.notes().trim().to_string());
    }
    details
}

fn movement(movement: &Movement) -> String {
    let mut parts = vec![movement.name.trim().to_string()];
    match (movement.set_count, movement.rep_count) {
        (Some(sets), Some(reps)) => parts.push(format!("{sets} × {reps}")),
        (None, Some(reps)) => parts.push(format!("{reps} reps")),
        (Some(sets), None) => parts.push(format!("{sets} sets")),
        (None, None) => {}
    }
    if let Some(weight) = movement.weight {
        parts.push(format!("{weight} kg"));
    }
    if let Some(duration) = movement.duration {
        parts.push(format!("{duration} s"));
    }
    if let Some(rest_time) = movement.rest_time {
        parts.push(format!("{rest_time} s rest"));
    }
    if let Some(tempo) = movement.tempo.filter(|t| !t.is_unset()) {
        parts.push(format!("tempo {tempo}"));
    }
    parts.join(", ")
}

impl fmt::Display for Preview {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        if !self.description.is_empty() {
            writeln!(f, "{}", self.description)?;
        }
        if let Some(athlete) = &self.athlete {
            writeln!(f, "Athlete: {athlete}")?;
        }
        writeln!(f, "{} days per week", self.days_per_week)?;
        for day in &self.days {
            writeln!(f)?;
            write!(f, "{day}")?;
        }
        Ok(())
    }
}

impl fmt::Display for DayPreview {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}: {}", self.title, self.muscles)?;
        for exercise in &self.exercises {
            write!(f, "- {} [{}]", exercise.name, exercise.set_type)?;
            if !exercise.volume.is_empty() {
                write!(f, " {}", exercise.volume)?;
            }
            if !exercise.details.is_empty() {
                write!(f, " ({})", exercise.details.join(", "))?;
            }
            writeln!(f)?;
            for movement in &exercise.movements {
                writeln!(f, "  - {movement}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use liftplan_domain::{
        AthleteDetails, ExperienceLevel, MuscleTag, ProgramMetadata, Reps, SetType, Time, Weight,
    };
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn state() -> ProgramState {
        let mut superset =
            ExerciseMovement::new("Arm Superset", MuscleTag::Arms, SetType::Superset);
        superset.sets = String::from("3");
        superset.reps = String::from("12");
        superset.set_config.set_rest_time(Time::new(90).unwrap());
        superset.related_exercises = vec![
            Movement {
                set_count: Some(3),
                rep_count: Some(Reps::new(12).unwrap()),
                weight: Some(Weight::new(15.0).unwrap()),
                ..Movement::named("Curl")
            },
            Movement {
                set_count: Some(3),
                rep_count: Some(Reps::new(12).unwrap()),
                weight: Some(Weight::new(20.0).unwrap()),
                ..Movement::named("Pushdown")
            },
        ];
        let mut day_1 = DayWorkout::new(1);
        day_1.target_muscles.select(MuscleTag::Biceps);
        day_1.target_muscles.select(MuscleTag::Triceps);
        day_1.exercises.push(superset);
        let mut day_2 = DayWorkout::new(2);
        day_2.target_muscles.select(MuscleTag::Rest);

        ProgramState {
            program: ProgramMetadata {
                name: String::from(" Arm Day "),
                days_per_week: String::from("2"),
                description: String::from("Four weeks"),
                ..ProgramMetadata::default()
            },
            athlete: AthleteDetails {
                name: String::from("Alice"),
                experience: Some(ExperienceLevel::Beginner),
                ..AthleteDetails::default()
            },
            days: vec![day_1, day_2],
            ..ProgramState::default()
        }
    }

    #[test]
    fn test_from_program_state() {
        let preview = Preview::from(&state());
        assert_eq!(preview.name, "Arm Day");
        assert_eq!(preview.athlete, Some(String::from("Alice (beginner)")));
        assert_eq!(preview.days_per_week, 2);
        assert_eq!(preview.days.len(), 2);
        assert!(!preview.days[0].is_rest);
        assert!(preview.days[1].is_rest);
        assert_eq!(
            preview.days[0].exercises,
            vec![ExercisePreview {
                name: String::from("Arm Superset"),
                set_type: "Superset",
                volume: String::from("3 × 12"),
                details: vec![String::from("90 s rest")],
                movements: vec![
                    String::from("Curl, 3 × 12, 15 kg"),
                    String::from("Pushdown, 3 × 12, 20 kg"),
                ],
            }]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Preview::from(&state()).to_string(),
            "Arm Day\n\
             Four weeks\n\
             Athlete: Alice (beginner)\n\
             2 days per week\n\
             \n\
             Day 1: Biceps, Triceps\n\
             - Arm Superset [Superset] 3 × 12 (90 s rest)\n\
             \x20 - Curl, 3 × 12, 15 kg\n\
             \x20 - Pushdown, 3 × 12, 20 kg\n\
             \n\
             Day 2: Rest Day\n"
        );
    }

    #[rstest]
    #[case("3", "10", "3 × 10")]
    #[case("3", "", "3 sets")]
    #[case("", "10", "10 reps")]
    #[case("", "", "")]
    fn test_volume(#[case] sets: &str, #[case] reps: &str, #[case] expected: &str) {
        assert_eq!(volume(sets, reps), expected);
    }
}
