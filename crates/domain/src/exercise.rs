use std::fmt;

use derive_more::{Display, Into};
use uuid::Uuid;

use crate::{MovementField, MuscleTag, SetType, catalog::Movement};

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseMovement {
    pub id: ExerciseID,
    pub name: String,
    pub sets: String,
    pub reps: String,
    pub description: String,
    pub muscle_group: MuscleTag,
    pub set_config: SetConfig,
    pub related_exercises: Vec<Movement>,
}

impl ExerciseMovement {
    #[must_use]
    pub fn new(name: &str, muscle_group: MuscleTag, set_type: SetType) -> Self {
        Self {
            id: ExerciseID::random(),
            name: name.to_string(),
            sets: String::new(),
            reps: String::new(),
            description: String::new(),
            muscle_group,
            set_config: SetConfig::default_for(set_type),
            related_exercises: vec![],
        }
    }

    #[must_use]
    pub fn set_type(&self) -> SetType {
        self.set_config.set_type()
    }

    /// Number of sets, if the raw input is a valid integer.
    #[must_use]
    pub fn set_count(&self) -> Option<u32> {
        self.sets.trim().parse().ok()
    }

    #[must_use]
    pub fn rep_count(&self) -> Option<u32> {
        self.reps.trim().parse().ok()
    }

    /// Change the set type, keeping the rest time where both set types have one.
    pub fn change_set_type(&mut self, set_type: SetType) {
        if set_type == self.set_type() {
            return;
        }
        let rest_time = self.set_config.rest_time();
        self.set_config = SetConfig::default_for(set_type);
        if let Some(rest_time) = rest_time {
            self.set_config.set_rest_time(rest_time);
        }
        if !set_type.is_group() {
            self.related_exercises.clear();
        }
    }

    /// The exercise itself seen as a movement stub.
    #[must_use]
    pub fn as_movement(&self) -> Movement {
        Movement {
            name: self.name.clone(),
            set_count: self.set_count(),
            rep_count: self.rep_count().and_then(|r| Reps::new(r).ok()),
            weight: self.set_config.weight(),
            rest_time: self.set_config.rest_time(),
            tempo: self.set_config.tempo(),
            duration: self.set_config.work_time(),
        }
    }

    #[must_use]
    pub fn missing_fields(&self) -> Vec<MovementField> {
        let movement = self.as_movement();
        crate::describe(self.set_type())
            .required_fields
            .iter()
            .filter(|field| !movement.has(**field))
            .copied()
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExerciseID(String);

impl ExerciseID {
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ExerciseID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ExerciseID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u128> for ExerciseID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()).to_string())
    }
}

impl fmt::Display for ExerciseID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Set type specific configuration of an exercise.
///
/// The variant determines the set type of the exercise, so a configuration can never carry
/// fields that belong to another set type.
#[derive(Debug, Clone, PartialEq)]
pub enum SetConfig {
    Straight {
        rest_time: Option<Time>,
    },
    Superset {
        rest_time: Option<Time>,
    },
    Triset {
        rest_time: Option<Time>,
    },
    Giant {
        rest_time: Option<Time>,
    },
    Drop {
        weight: Option<Weight>,
        drops: Option<u32>,
        notes: String,
    },
    RestPause {
        rest_time: Option<Time>,
        target_reps: Option<Reps>,
    },
    Pyramid {
        scheme: PyramidScheme,
        notes: String,
    },
    Fst7 {
        rest_time: Option<Time>,
    },
    Cluster {
        reps_per_cluster: Option<Reps>,
        rest_time: Option<Time>,
    },
    Circuit {
        rounds: Option<u32>,
        rest_time: Option<Time>,
    },
    Hiit {
        work_time: Option<Time>,
        rest_time: Option<Time>,
        rounds: Option<u32>,
    },
    PreExhaust {
        rest_time: Option<Time>,
    },
    PostExhaust {
        rest_time: Option<Time>,
    },
    TimeUnderTension {
        tempo: Tempo,
    },
    Powerbuilding {
        target_sets: Option<u32>,
        target_reps: Option<Reps>,
        weight: Option<Weight>,
    },
    MindMuscle {
        notes: String,
    },
}

impl SetConfig {
    #[must_use]
    pub fn default_for(set_type: SetType) -> Self {
        match set_type {
            SetType::Straight => SetConfig::Straight { rest_time: None },
            SetType::Superset => SetConfig::Superset { rest_time: None },
            SetType::Triset => SetConfig::Triset { rest_time: None },
            SetType::Giant => SetConfig::Giant { rest_time: None },
            SetType::Drop => SetConfig::Drop {
                weight: None,
                drops: None,
                notes: String::new(),
            },
            SetType::RestPause => SetConfig::RestPause {
                rest_time: None,
                target_reps: None,
            },
            SetType::Pyramid => SetConfig::Pyramid {
                scheme: PyramidScheme::default(),
                notes: String::new(),
            },
            SetType::Fst7 => SetConfig::Fst7 { rest_time: None },
            SetType::Cluster => SetConfig::Cluster {
                reps_per_cluster: None,
                rest_time: None,
            },
            SetType::Circuit => SetConfig::Circuit {
                rounds: None,
                rest_time: None,
            },
            SetType::Hiit => SetConfig::Hiit {
                work_time: None,
                rest_time: None,
                rounds: None,
            },
            SetType::PreExhaust => SetConfig::PreExhaust { rest_time: None },
            SetType::PostExhaust => SetConfig::PostExhaust { rest_time: None },
            SetType::TimeUnderTension => SetConfig::TimeUnderTension {
                tempo: Tempo::default(),
            },
            SetType::Powerbuilding => SetConfig::Powerbuilding {
                target_sets: None,
                target_reps: None,
                weight: None,
            },
            SetType::MindMuscle => SetConfig::MindMuscle {
                notes: String::new(),
            },
        }
    }

    #[must_use]
    pub fn set_type(&self) -> SetType {
        match self {
            SetConfig::Straight { .. } => SetType::Straight,
            SetConfig::Superset { .. } => SetType::Superset,
            SetConfig::Triset { .. } => SetType::Triset,
            SetConfig::Giant { .. } => SetType::Giant,
            SetConfig::Drop { .. } => SetType::Drop,
            SetConfig::RestPause { .. } => SetType::RestPause,
            SetConfig::Pyramid { .. } => SetType::Pyramid,
            SetConfig::Fst7 { .. } => SetType::Fst7,
            SetConfig::Cluster { .. } => SetType::Cluster,
            SetConfig::Circuit { .. } => SetType::Circuit,
            SetConfig::Hiit { .. } => SetType::Hiit,
            SetConfig::PreExhaust { .. } => SetType::PreExhaust,
            SetConfig::PostExhaust { .. } => SetType::PostExhaust,
            SetConfig::TimeUnderTension { .. } => SetType::TimeUnderTension,
            SetConfig::Powerbuilding { .. } => SetType::Powerbuilding,
            SetConfig::MindMuscle { .. } => SetType::MindMuscle,
        }
    }

    #[must_use]
    pub fn rest_time(&self) -> Option<Time> {
        match self {
            SetConfig::Straight { rest_time }
            | SetConfig::Superset { rest_time }
            | SetConfig::Triset { rest_time }
            | SetConfig::Giant { rest_time }
            | SetConfig::RestPause { rest_time, .. }
            | SetConfig::Fst7 { rest_time }
            | SetConfig::Cluster { rest_time, .. }
            | SetConfig::Circuit { rest_time, .. }
            | SetConfig::Hiit { rest_time, .. }
            | SetConfig::PreExhaust { rest_time }
            | SetConfig::PostExhaust { rest_time } => *rest_time,
            SetConfig::Drop { .. }
            | SetConfig::Pyramid { .. }
            | SetConfig::TimeUnderTension { .. }
            | SetConfig::Powerbuilding { .. }
            | SetConfig::MindMuscle { .. } => None,
        }
    }

    /// Returns `false` if the set type has no rest time.
    pub fn set_rest_time(&mut self, value: Time) -> bool {
        match self {
            SetConfig::Straight { rest_time }
            | SetConfig::Superset { rest_time }
            | SetConfig::Triset { rest_time }
            | SetConfig::Giant { rest_time }
            | SetConfig::RestPause { rest_time, .. }
            | SetConfig::Fst7 { rest_time }
            | SetConfig::Cluster { rest_time, .. }
            | SetConfig::Circuit { rest_time, .. }
            | SetConfig::Hiit { rest_time, .. }
            | SetConfig::PreExhaust { rest_time }
            | SetConfig::PostExhaust { rest_time } => {
                *rest_time = Some(value);
                true
            }
            SetConfig::Drop { .. }
            | SetConfig::Pyramid { .. }
            | SetConfig::TimeUnderTension { .. }
            | SetConfig::Powerbuilding { .. }
            | SetConfig::MindMuscle { .. } => false,
        }
    }

    #[must_use]
    pub fn weight(&self) -> Option<Weight> {
        match self {
            SetConfig::Drop { weight, .. } | SetConfig::Powerbuilding { weight, .. } => *weight,
            _ => None,
        }
    }

    #[must_use]
    pub fn tempo(&self) -> Option<Tempo> {
        match self {
            SetConfig::TimeUnderTension { tempo } => Some(*tempo),
            _ => None,
        }
    }

    #[must_use]
    pub fn work_time(&self) -> Option<Time> {
        match self {
            SetConfig::Hiit { work_time, .. } => *work_time,
            _ => None,
        }
    }

    #[must_use]
    pub fn notes(&self) -> &str {
        match self {
            SetConfig::Drop { notes, .. }
            | SetConfig::Pyramid { notes, .. }
            | SetConfig::MindMuscle { notes } => notes,
            _ => "",
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PyramidScheme {
    #[default]
    Ascending,
    Descending,
    Triangle,
}

impl PyramidScheme {
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            PyramidScheme::Ascending => "ascending",
            PyramidScheme::Descending => "descending",
            PyramidScheme::Triangle => "triangle",
        }
    }
}

impl From<&str> for PyramidScheme {
    fn from(value: &str) -> Self {
        match value {
            "descending" => PyramidScheme::Descending,
            "triangle" => PyramidScheme::Triangle,
            _ => PyramidScheme::Ascending,
        }
    }
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Reps(u32);

impl Reps {
    pub fn new(value: u32) -> Result<Self, RepsError> {
        if !(0..1000).contains(&value) {
            return Err(RepsError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<u32>() {
            Ok(parsed_value) => Reps::new(parsed_value),
            Err(_) => Err(RepsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be in the range 0 to 999")]
    OutOfRange,
    #[error("Reps must be an integer")]
    ParseError,
}

/// Duration in seconds.
#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Time(u32);

impl Time {
    pub fn new(value: u32) -> Result<Self, TimeError> {
        if !(0..1000).contains(&value) {
            return Err(TimeError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Time {
    type Error = TimeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<u32>() {
            Ok(parsed_value) => Time::new(parsed_value),
            Err(_) => Err(TimeError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum TimeError {
    #[error("Time must be in the range 0 to 999 s")]
    OutOfRange,
    #[error("Time must be an integer")]
    ParseError,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Weight(f32);

impl Weight {
    pub fn new(value: f32) -> Result<Self, WeightError> {
        if !(0.0..1000.0).contains(&value) {
            return Err(WeightError::OutOfRange);
        }

        let tenths = value * 10.0;
        if (tenths - tenths.round()).abs() > 1e-3 {
            return Err(WeightError::InvalidResolution);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Weight {
    type Error = WeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.replace(',', ".").trim().parse::<f32>() {
            Ok(parsed_value) => Weight::new(parsed_value),
            Err(_) => Err(WeightError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must be in the range 0.0 to 999.9 kg")]
    OutOfRange,
    #[error("Weight must be a multiple of 0.1 kg")]
    InvalidResolution,
    #[error("Weight must be a decimal")]
    ParseError,
}

/// Repetition tempo in seconds per phase, written as `eccentric-bottom-concentric-top`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tempo {
    pub eccentric: u8,
    pub bottom: u8,
    pub concentric: u8,
    pub top: u8,
}

impl Tempo {
    pub fn new(eccentric: u8, bottom: u8, concentric: u8, top: u8) -> Result<Self, TempoError> {
        if [eccentric, bottom, concentric, top].iter().any(|p| *p > 9) {
            return Err(TempoError::OutOfRange);
        }

        Ok(Self {
            eccentric,
            bottom,
            concentric,
            top,
        })
    }

    #[must_use]
    pub fn is_unset(&self) -> bool {
        *self == Tempo::default()
    }

    /// Seconds under tension for a single repetition.
    #[must_use]
    pub fn duration(&self) -> u32 {
        u32::from(self.eccentric)
            + u32::from(self.bottom)
            + u32::from(self.concentric)
            + u32::from(self.top)
    }
}

impl fmt::Display for Tempo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}-{}",
            self.eccentric, self.bottom, self.concentric, self.top
        )
    }
}

impl TryFrom<&str> for Tempo {
    type Error = TempoError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let phases = value
            .trim()
            .split('-')
            .map(|p| p.trim().parse::<u8>().map_err(|_| TempoError::ParseError))
            .collect::<Result<Vec<_>, _>>()?;
        match phases[..] {
            [eccentric, bottom, concentric, top] => Tempo::new(eccentric, bottom, concentric, top),
            _ => Err(TempoError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum TempoError {
    #[error("Each tempo phase must be in the range 0 to 9 s")]
    OutOfRange,
    #[error("Tempo must consist of four integers separated by dashes")]
    ParseError,
}
