use std::collections::VecDeque;

use gloo_storage::Storage as GlooStorage;
use liftplan_domain as domain;
use liftplan_web_app::{Settings, SettingsRepository, log};
use serde::{Deserialize, Serialize};
use strum::AsRefStr;

#[derive(AsRefStr)]
pub enum Key {
    #[strum(serialize = "program")]
    Program,
    #[strum(serialize = "settings")]
    Settings,
    #[strum(serialize = "log")]
    Log,
}

#[derive(Clone, Copy)]
pub struct LocalStorage;

impl domain::ProgramStateRepository for LocalStorage {
    fn read_program_state(&self) -> Result<Option<domain::ProgramState>, domain::ReadError> {
        match gloo_storage::LocalStorage::get::<ProgramState>(Key::Program.as_ref()) {
            Ok(state) => Ok(Some(
                domain::ProgramState::try_from(state)
                    .map_err(|err| domain::ReadError::Other(Box::new(err)))?,
            )),
            Err(gloo_storage::errors::StorageError::KeyNotFound(_)) => Ok(None),
            Err(err) => Err(domain::ReadError::Other(Box::new(err))),
        }
    }

    fn write_program_state(&self, state: &domain::ProgramState) -> Result<(), domain::WriteError> {
        gloo_storage::LocalStorage::set(Key::Program.as_ref(), ProgramState::from(state))
            .map_err(|err| domain::WriteError::Other(Box::new(err)))
    }
}

impl SettingsRepository for LocalStorage {
    async fn read_settings(&self) -> Result<Settings, String> {
        match gloo_storage::LocalStorage::get(Key::Settings.as_ref()) {
            Ok(settings) => Ok(settings),
            Err(err) => match err {
                gloo_storage::errors::StorageError::KeyNotFound(_) => Ok(Settings::default()),
                err => Err(err),
            },
        }
        .map_err(|err| err.to_string())
    }

    async fn write_settings(&self, settings: Settings) -> Result<(), String> {
        gloo_storage::LocalStorage::set(Key::Settings.as_ref(), settings)
            .map_err(|err| err.to_string())
    }
}

impl log::Repository for LocalStorage {
    fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        match gloo_storage::LocalStorage::get(Key::Log.as_ref()) {
            Ok(entries) => Ok(entries),
            Err(err) => match err {
                gloo_storage::errors::StorageError::KeyNotFound(_) => Ok(VecDeque::new()),
                err => Err(err),
            },
        }
        .map_err(|err| log::Error::Unknown(err.to_string()))
    }

    fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        let mut entries = self.read_entries()?;
        log::push_entry(&mut entries, entry);
        gloo_storage::LocalStorage::set(Key::Log.as_ref(), entries)
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ProgramStateError {
    #[error(transparent)]
    InvalidMuscleTag(#[from] domain::MuscleTagError),
    #[error(transparent)]
    InvalidExperienceLevel(#[from] domain::ExperienceLevelError),
    #[error(transparent)]
    InvalidReps(#[from] domain::RepsError),
    #[error(transparent)]
    InvalidTime(#[from] domain::TimeError),
    #[error(transparent)]
    InvalidWeight(#[from] domain::WeightError),
    #[error(transparent)]
    InvalidTempo(#[from] domain::TempoError),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProgramState {
    pub program: Program,
    pub athlete: Athlete,
    pub days: Vec<Day>,
    pub selected_day: u32,
    pub current_step: usize,
    pub flow: String,
}

impl From<&domain::ProgramState> for ProgramState {
    fn from(value: &domain::ProgramState) -> Self {
        Self {
            program: Program::from(&value.program),
            athlete: Athlete::from(&value.athlete),
            days: value.days.iter().map(Day::from).collect(),
            selected_day: value.selected_day,
            current_step: value.wizard.current_step,
            flow: value.wizard.flow.key().to_string(),
        }
    }
}

impl TryFrom<ProgramState> for domain::ProgramState {
    type Error = ProgramStateError;

    fn try_from(value: ProgramState) -> Result<Self, Self::Error> {
        Ok(Self {
            program: value.program.into(),
            athlete: value.athlete.try_into()?,
            days: value
                .days
                .into_iter()
                .map(domain::DayWorkout::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            selected_day: value.selected_day,
            wizard: domain::WizardState {
                current_step: value.current_step,
                flow: domain::Flow::from(value.flow.as_str()),
            },
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Program {
    pub name: String,
    pub days_per_week: String,
    pub description: String,
    pub height: String,
    pub weight: String,
    pub program_id: Option<String>,
}

impl From<&domain::ProgramMetadata> for Program {
    fn from(value: &domain::ProgramMetadata) -> Self {
        Self {
            name: value.name.clone(),
            days_per_week: value.days_per_week.clone(),
            description: value.description.clone(),
            height: value.height.clone(),
            weight: value.weight.clone(),
            program_id: value.program_id.as_ref().map(ToString::to_string),
        }
    }
}

impl From<Program> for domain::ProgramMetadata {
    fn from(value: Program) -> Self {
        Self {
            name: value.name,
            days_per_week: value.days_per_week,
            description: value.description,
            height: value.height,
            weight: value.weight,
            program_id: value.program_id.map(domain::ProgramID::from),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Athlete {
    pub name: String,
    pub phone: String,
    pub age: String,
    pub height: String,
    pub weight: String,
    pub experience: Option<String>,
}

impl From<&domain::AthleteDetails> for Athlete {
    fn from(value: &domain::AthleteDetails) -> Self {
        Self {
            name: value.name.clone(),
            phone: value.phone.clone(),
            age: value.age.clone(),
            height: value.height.clone(),
            weight: value.weight.clone(),
            experience: value.experience.map(|e| e.key().to_string()),
        }
    }
}

impl TryFrom<Athlete> for domain::AthleteDetails {
    type Error = domain::ExperienceLevelError;

    fn try_from(value: Athlete) -> Result<Self, Self::Error> {
        Ok(Self {
            name: value.name,
            phone: value.phone,
            age: value.age,
            height: value.height,
            weight: value.weight,
            experience: value
                .experience
                .as_deref()
                .map(domain::ExperienceLevel::try_from)
                .transpose()?,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Day {
    pub day: u32,
    pub target_muscles: Vec<String>,
    pub exercises: Vec<Exercise>,
}

impl From<&domain::DayWorkout> for Day {
    fn from(value: &domain::DayWorkout) -> Self {
        Self {
            day: value.day,
            target_muscles: value
                .target_muscles
                .iter()
                .map(|tag| tag.key().to_string())
                .collect(),
            exercises: value.exercises.iter().map(Exercise::from).collect(),
        }
    }
}

impl TryFrom<Day> for domain::DayWorkout {
    type Error = ProgramStateError;

    fn try_from(value: Day) -> Result<Self, Self::Error> {
        Ok(Self {
            day: value.day,
            target_muscles: value
                .target_muscles
                .iter()
                .map(|tag| domain::MuscleTag::try_from(tag.as_str()))
                .collect::<Result<domain::TargetMuscles, _>>()?,
            exercises: value
                .exercises
                .into_iter()
                .map(domain::ExerciseMovement::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub sets: String,
    pub reps: String,
    pub description: String,
    pub muscle_group: String,
    pub set_config: SetConfig,
    pub related_exercises: Vec<Movement>,
}

impl From<&domain::ExerciseMovement> for Exercise {
    fn from(value: &domain::ExerciseMovement) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name.clone(),
            sets: value.sets.clone(),
            reps: value.reps.clone(),
            description: value.description.clone(),
            muscle_group: value.muscle_group.key().to_string(),
            set_config: SetConfig::from(&value.set_config),
            related_exercises: value.related_exercises.iter().map(Movement::from).collect(),
        }
    }
}

impl TryFrom<Exercise> for domain::ExerciseMovement {
    type Error = ProgramStateError;

    fn try_from(value: Exercise) -> Result<Self, Self::Error> {
        Ok(Self {
            id: domain::ExerciseID::from(value.id),
            name: value.name,
            sets: value.sets,
            reps: value.reps,
            description: value.description,
            muscle_group: domain::MuscleTag::try_from(value.muscle_group.as_str())?,
            set_config: value.set_config.try_into()?,
            related_exercises: value
                .related_exercises
                .into_iter()
                .map(domain::Movement::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "set_type", rename_all = "snake_case")]
pub enum SetConfig {
    Straight {
        rest_time: Option<u32>,
    },
    Superset {
        rest_time: Option<u32>,
    },
    Triset {
        rest_time: Option<u32>,
    },
    Giant {
        rest_time: Option<u32>,
    },
    Drop {
        weight: Option<f32>,
        drops: Option<u32>,
        notes: String,
    },
    RestPause {
        rest_time: Option<u32>,
        target_reps: Option<u32>,
    },
    Pyramid {
        scheme: String,
        notes: String,
    },
    Fst7 {
        rest_time: Option<u32>,
    },
    Cluster {
        reps_per_cluster: Option<u32>,
        rest_time: Option<u32>,
    },
    Circuit {
        rounds: Option<u32>,
        rest_time: Option<u32>,
    },
    Hiit {
        work_time: Option<u32>,
        rest_time: Option<u32>,
        rounds: Option<u32>,
    },
    PreExhaust {
        rest_time: Option<u32>,
    },
    PostExhaust {
        rest_time: Option<u32>,
    },
    TimeUnderTension {
        tempo: String,
    },
    Powerbuilding {
        target_sets: Option<u32>,
        target_reps: Option<u32>,
        weight: Option<f32>,
    },
    MindMuscle {
        notes: String,
    },
}

fn seconds(time: Option<domain::Time>) -> Option<u32> {
    time.map(u32::from)
}

fn time(seconds: Option<u32>) -> Result<Option<domain::Time>, domain::TimeError> {
    seconds.map(domain::Time::new).transpose()
}

fn reps(reps: Option<u32>) -> Result<Option<domain::Reps>, domain::RepsError> {
    reps.map(domain::Reps::new).transpose()
}

fn weight(weight: Option<f32>) -> Result<Option<domain::Weight>, domain::WeightError> {
    weight.map(domain::Weight::new).transpose()
}

impl From<&domain::SetConfig> for SetConfig {
    fn from(value: &domain::SetConfig) -> Self {
        match value {
            domain::SetConfig::Straight { rest_time } => SetConfig::Straight {
                rest_time: seconds(*rest_time),
            },
            domain::SetConfig::Superset { rest_time } => SetConfig::Superset {
                rest_time: seconds(*rest_time),
            },
            domain::SetConfig::Triset { rest_time } => SetConfig::Triset {
                rest_time: seconds(*rest_time),
            },
            domain::SetConfig::Giant { rest_time } => SetConfig::Giant {
                rest_time: seconds(*rest_time),
            },
            domain::SetConfig::Drop {
                weight,
                drops,
                notes,
            } => SetConfig::Drop {
                weight: weight.map(f32::from),
                drops: *drops,
                notes: notes.clone(),
            },
            domain::SetConfig::RestPause {
                rest_time,
                target_reps,
            } => SetConfig::RestPause {
                rest_time: seconds(*rest_time),
                target_reps: target_reps.map(u32::from),
            },
            domain::SetConfig::Pyramid { scheme, notes } => SetConfig::Pyramid {
                scheme: scheme.key().to_string(),
                notes: notes.clone(),
            },
            domain::SetConfig::Fst7 { rest_time } => SetConfig::Fst7 {
                rest_time: seconds(*rest_time),
            },
            domain::SetConfig::Cluster {
                reps_per_cluster,
                rest_time,
            } => SetConfig::Cluster {
                reps_per_cluster: reps_per_cluster.map(u32::from),
                rest_time: seconds(*rest_time),
            },
            domain::SetConfig::Circuit { rounds, rest_time } => SetConfig::Circuit {
                rounds: *rounds,
                rest_time: seconds(*rest_time),
            },
            domain::SetConfig::Hiit {
                work_time,
                rest_time,
                rounds,
            } => SetConfig::Hiit {
                work_time: seconds(*work_time),
                rest_time: seconds(*rest_time),
                rounds: *rounds,
            },
            domain::SetConfig::PreExhaust { rest_time } => SetConfig::PreExhaust {
                rest_time: seconds(*rest_time),
            },
            domain::SetConfig::PostExhaust { rest_time } => SetConfig::PostExhaust {
                rest_time: seconds(*rest_time),
            },
            domain::SetConfig::TimeUnderTension { tempo } => SetConfig::TimeUnderTension {
                tempo: tempo.to_string(),
            },
            domain::SetConfig::Powerbuilding {
                target_sets,
                target_reps,
                weight,
            } => SetConfig::Powerbuilding {
                target_sets: *target_sets,
                target_reps: target_reps.map(u32::from),
                weight: weight.map(f32::from),
            },
            domain::SetConfig::MindMuscle { notes } => SetConfig::MindMuscle {
                notes: notes.clone(),
            },
        }
    }
}

impl TryFrom<SetConfig> for domain::SetConfig {
    type Error = ProgramStateError;

    fn try_from(value: SetConfig) -> Result<Self, Self::Error> {
        Ok(match value {
            SetConfig::Straight { rest_time } => domain::SetConfig::Straight {
                rest_time: time(rest_time)?,
            },
            SetConfig::Superset { rest_time } => domain::SetConfig::Superset {
                rest_time: time(rest_time)?,
            },
            SetConfig::Triset { rest_time } => domain::SetConfig::Triset {
                rest_time: time(rest_time)?,
            },
            SetConfig::Giant { rest_time } => domain::SetConfig::Giant {
                rest_time: time(rest_time)?,
            },
            SetConfig::Drop {
                weight: w,
                drops,
                notes,
            } => domain::SetConfig::Drop {
                weight: weight(w)?,
                drops,
                notes,
            },
            SetConfig::RestPause {
                rest_time,
                target_reps,
            } => domain::SetConfig::RestPause {
                rest_time: time(rest_time)?,
                target_reps: reps(target_reps)?,
            },
            SetConfig::Pyramid { scheme, notes } => domain::SetConfig::Pyramid {
                scheme: domain::PyramidScheme::from(scheme.as_str()),
                notes,
            },
            SetConfig::Fst7 { rest_time } => domain::SetConfig::Fst7 {
                rest_time: time(rest_time)?,
            },
            SetConfig::Cluster {
                reps_per_cluster,
                rest_time,
            } => domain::SetConfig::Cluster {
                reps_per_cluster: reps(reps_per_cluster)?,
                rest_time: time(rest_time)?,
            },
            SetConfig::Circuit { rounds, rest_time } => domain::SetConfig::Circuit {
                rounds,
                rest_time: time(rest_time)?,
            },
            SetConfig::Hiit {
                work_time,
                rest_time,
                rounds,
            } => domain::SetConfig::Hiit {
                work_time: time(work_time)?,
                rest_time: time(rest_time)?,
                rounds,
            },
            SetConfig::PreExhaust { rest_time } => domain::SetConfig::PreExhaust {
                rest_time: time(rest_time)?,
            },
            SetConfig::PostExhaust { rest_time } => domain::SetConfig::PostExhaust {
                rest_time: time(rest_time)?,
            },
            SetConfig::TimeUnderTension { tempo } => domain::SetConfig::TimeUnderTension {
                tempo: domain::Tempo::try_from(tempo.as_str())?,
            },
            SetConfig::Powerbuilding {
                target_sets,
                target_reps,
                weight: w,
            } => domain::SetConfig::Powerbuilding {
                target_sets,
                target_reps: reps(target_reps)?,
                weight: weight(w)?,
            },
            SetConfig::MindMuscle { notes } => domain::SetConfig::MindMuscle { notes },
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Movement {
    pub name: String,
    pub set_count: Option<u32>,
    pub rep_count: Option<u32>,
    pub weight: Option<f32>,
    pub rest_time: Option<u32>,
    pub tempo: Option<String>,
    pub duration: Option<u32>,
}

impl From<&domain::Movement> for Movement {
    fn from(value: &domain::Movement) -> Self {
        Self {
            name: value.name.clone(),
            set_count: value.set_count,
            rep_count: value.rep_count.map(u32::from),
            weight: value.weight.map(f32::from),
            rest_time: seconds(value.rest_time),
            tempo: value.tempo.map(|t| t.to_string()),
            duration: seconds(value.duration),
        }
    }
}

impl TryFrom<Movement> for domain::Movement {
    type Error = ProgramStateError;

    fn try_from(value: Movement) -> Result<Self, Self::Error> {
        Ok(Self {
            name: value.name,
            set_count: value.set_count,
            rep_count: reps(value.rep_count)?,
            weight: weight(value.weight)?,
            rest_time: time(value.rest_time)?,
            tempo: value
                .tempo
                .as_deref()
                .map(domain::Tempo::try_from)
                .transpose()?,
            duration: time(value.duration)?,
        })
    }
}
