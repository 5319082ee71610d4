//! Set-type catalog
//!
//! Static description of every training technique an exercise can be performed with, including
//! how many movements form one group and which fields each movement must provide.

use std::{fmt, slice::Iter};

use crate::{Property, Reps, Tempo, Time, Weight};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum SetType {
    Straight,
    Superset,
    Triset,
    Giant,
    Drop,
    RestPause,
    Pyramid,
    Fst7,
    Cluster,
    Circuit,
    Hiit,
    PreExhaust,
    PostExhaust,
    TimeUnderTension,
    Powerbuilding,
    MindMuscle,
}

impl Property for SetType {
    fn iter() -> Iter<'static, SetType> {
        static SET_TYPES: [SetType; 16] = [
            SetType::Straight,
            SetType::Superset,
            SetType::Triset,
            SetType::Giant,
            SetType::Drop,
            SetType::RestPause,
            SetType::Pyramid,
            SetType::Fst7,
            SetType::Cluster,
            SetType::Circuit,
            SetType::Hiit,
            SetType::PreExhaust,
            SetType::PostExhaust,
            SetType::TimeUnderTension,
            SetType::Powerbuilding,
            SetType::MindMuscle,
        ];
        SET_TYPES.iter()
    }

    fn name(self) -> &'static str {
        describe(self).label
    }
}

impl SetType {
    #[must_use]
    pub fn key(self) -> &'static str {
        describe(self).key
    }

    /// Whether one instance of this set type combines several movements.
    #[must_use]
    pub fn is_group(self) -> bool {
        describe(self).max_movements > 1
    }
}

impl fmt::Display for SetType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl TryFrom<&str> for SetType {
    type Error = SetTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        SetType::iter()
            .find(|set_type| set_type.key() == value.trim())
            .copied()
            .ok_or(SetTypeError::Invalid(value.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SetTypeError {
    #[error("Invalid set type \"{0}\"")]
    Invalid(String),
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MovementField {
    Name,
    SetCount,
    RepCount,
    Weight,
    RestTime,
    Tempo,
    Duration,
}

impl MovementField {
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            MovementField::Name => "name",
            MovementField::SetCount => "set_count",
            MovementField::RepCount => "rep_count",
            MovementField::Weight => "weight",
            MovementField::RestTime => "rest_time",
            MovementField::Tempo => "tempo",
            MovementField::Duration => "duration",
        }
    }
}

impl fmt::Display for MovementField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct SetTypeDescriptor {
    pub key: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub required_fields: &'static [MovementField],
    pub min_movements: usize,
    pub max_movements: usize,
}

const SINGLE: &[MovementField] = &[
    MovementField::Name,
    MovementField::SetCount,
    MovementField::RepCount,
    MovementField::RestTime,
];

const LOADED: &[MovementField] = &[
    MovementField::Name,
    MovementField::SetCount,
    MovementField::RepCount,
    MovementField::Weight,
    MovementField::RestTime,
];

const LOADED_WITHOUT_REST: &[MovementField] = &[
    MovementField::Name,
    MovementField::SetCount,
    MovementField::RepCount,
    MovementField::Weight,
];

static STRAIGHT: SetTypeDescriptor = SetTypeDescriptor {
    key: "straight",
    label: "Straight Sets",
    description: "All sets of one exercise with a fixed rest between sets.",
    required_fields: SINGLE,
    min_movements: 1,
    max_movements: 1,
};

static SUPERSET: SetTypeDescriptor = SetTypeDescriptor {
    key: "superset",
    label: "Superset",
    description: "Two exercises performed back to back without rest.",
    required_fields: LOADED,
    min_movements: 2,
    max_movements: 2,
};

static TRISET: SetTypeDescriptor = SetTypeDescriptor {
    key: "triset",
    label: "Tri-Set",
    description: "Three exercises performed back to back without rest.",
    required_fields: LOADED,
    min_movements: 3,
    max_movements: 3,
};

static GIANT: SetTypeDescriptor = SetTypeDescriptor {
    key: "giant",
    label: "Giant Set",
    description: "Four to six exercises for the same muscle group performed back to back.",
    required_fields: LOADED,
    min_movements: 4,
    max_movements: 6,
};

static DROP: SetTypeDescriptor = SetTypeDescriptor {
    key: "drop",
    label: "Drop Set",
    description: "Continue past failure by reducing the weight without resting.",
    required_fields: LOADED_WITHOUT_REST,
    min_movements: 1,
    max_movements: 1,
};

static REST_PAUSE: SetTypeDescriptor = SetTypeDescriptor {
    key: "rest_pause",
    label: "Rest-Pause",
    description: "Short pauses of a few seconds to squeeze out additional repetitions.",
    required_fields: &[
        MovementField::Name,
        MovementField::RepCount,
        MovementField::Weight,
        MovementField::RestTime,
    ],
    min_movements: 1,
    max_movements: 1,
};

static PYRAMID: SetTypeDescriptor = SetTypeDescriptor {
    key: "pyramid",
    label: "Pyramid",
    description: "Weight and repetitions change from set to set in a fixed direction.",
    required_fields: LOADED_WITHOUT_REST,
    min_movements: 1,
    max_movements: 1,
};

static FST7: SetTypeDescriptor = SetTypeDescriptor {
    key: "fst7",
    label: "FST-7",
    description: "Seven sets with short rests to maximize the pump of the target muscle.",
    required_fields: SINGLE,
    min_movements: 1,
    max_movements: 1,
};

static CLUSTER: SetTypeDescriptor = SetTypeDescriptor {
    key: "cluster",
    label: "Cluster Set",
    description: "Sets split into small clusters of repetitions with brief intra-set rests.",
    required_fields: SINGLE,
    min_movements: 1,
    max_movements: 1,
};

static CIRCUIT: SetTypeDescriptor = SetTypeDescriptor {
    key: "circuit",
    label: "Circuit",
    description: "A sequence of exercises repeated for several rounds.",
    required_fields: &[
        MovementField::Name,
        MovementField::RepCount,
        MovementField::RestTime,
    ],
    min_movements: 3,
    max_movements: 10,
};

static HIIT: SetTypeDescriptor = SetTypeDescriptor {
    key: "hiit",
    label: "HIIT",
    description: "Intervals of maximal effort alternated with short recovery periods.",
    required_fields: &[
        MovementField::Name,
        MovementField::Duration,
        MovementField::RestTime,
    ],
    min_movements: 1,
    max_movements: 8,
};

static PRE_EXHAUST: SetTypeDescriptor = SetTypeDescriptor {
    key: "pre_exhaust",
    label: "Pre-Exhaust",
    description: "An isolation exercise followed directly by a compound exercise.",
    required_fields: LOADED,
    min_movements: 2,
    max_movements: 2,
};

static POST_EXHAUST: SetTypeDescriptor = SetTypeDescriptor {
    key: "post_exhaust",
    label: "Post-Exhaust",
    description: "A compound exercise followed directly by an isolation exercise.",
    required_fields: LOADED,
    min_movements: 2,
    max_movements: 2,
};

static TIME_UNDER_TENSION: SetTypeDescriptor = SetTypeDescriptor {
    key: "time_under_tension",
    label: "Time Under Tension",
    description: "Repetitions performed with a prescribed tempo.",
    required_fields: &[
        MovementField::Name,
        MovementField::SetCount,
        MovementField::RepCount,
        MovementField::Tempo,
    ],
    min_movements: 1,
    max_movements: 1,
};

static POWERBUILDING: SetTypeDescriptor = SetTypeDescriptor {
    key: "powerbuilding",
    label: "Powerbuilding",
    description: "Heavy low-repetition strength work combined with hypertrophy volume.",
    required_fields: LOADED,
    min_movements: 1,
    max_movements: 1,
};

static MIND_MUSCLE: SetTypeDescriptor = SetTypeDescriptor {
    key: "mind_muscle",
    label: "Mind-Muscle Connection",
    description: "Light, controlled repetitions focusing on the contraction of the target muscle.",
    required_fields: &[
        MovementField::Name,
        MovementField::SetCount,
        MovementField::RepCount,
    ],
    min_movements: 1,
    max_movements: 1,
};

#[must_use]
pub fn describe(set_type: SetType) -> &'static SetTypeDescriptor {
    match set_type {
        SetType::Straight => &STRAIGHT,
        SetType::Superset => &SUPERSET,
        SetType::Triset => &TRISET,
        SetType::Giant => &GIANT,
        SetType::Drop => &DROP,
        SetType::RestPause => &REST_PAUSE,
        SetType::Pyramid => &PYRAMID,
        SetType::Fst7 => &FST7,
        SetType::Cluster => &CLUSTER,
        SetType::Circuit => &CIRCUIT,
        SetType::Hiit => &HIIT,
        SetType::PreExhaust => &PRE_EXHAUST,
        SetType::PostExhaust => &POST_EXHAUST,
        SetType::TimeUnderTension => &TIME_UNDER_TENSION,
        SetType::Powerbuilding => &POWERBUILDING,
        SetType::MindMuscle => &MIND_MUSCLE,
    }
}

/// Lightweight exercise stub that is part of a movement group.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Movement {
    pub name: String,
    pub set_count: Option<u32>,
    pub rep_count: Option<Reps>,
    pub weight: Option<Weight>,
    pub rest_time: Option<Time>,
    pub tempo: Option<Tempo>,
    pub duration: Option<Time>,
}

impl Movement {
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn has(&self, field: MovementField) -> bool {
        match field {
            MovementField::Name => !self.name.trim().is_empty(),
            MovementField::SetCount => self.set_count.is_some(),
            MovementField::RepCount => self.rep_count.is_some(),
            MovementField::Weight => self.weight.is_some(),
            MovementField::RestTime => self.rest_time.is_some(),
            MovementField::Tempo => self.tempo.is_some_and(|t| !t.is_unset()),
            MovementField::Duration => self.duration.is_some(),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GroupError {
    #[error("{set_type} requires between {min} and {max} movements ({actual} given)")]
    Cardinality {
        set_type: &'static str,
        min: usize,
        max: usize,
        actual: usize,
    },
    #[error("movement {position} is missing {field}")]
    MissingField {
        position: usize,
        field: MovementField,
    },
}

/// All reasons why the movements do not form a valid group of the given set type.
///
/// Positions of movements are 1-based.
#[must_use]
pub fn group_violations(set_type: SetType, movements: &[Movement]) -> Vec<GroupError> {
    let descriptor = describe(set_type);
    let mut violations = vec![];

    if !(descriptor.min_movements..=descriptor.max_movements).contains(&movements.len()) {
        violations.push(GroupError::Cardinality {
            set_type: descriptor.label,
            min: descriptor.min_movements,
            max: descriptor.max_movements,
            actual: movements.len(),
        });
    }

    for (idx, movement) in movements.iter().enumerate() {
        if let Some(field) = descriptor
            .required_fields
            .iter()
            .find(|field| !movement.has(**field))
        {
            violations.push(GroupError::MissingField {
                position: idx + 1,
                field: *field,
            });
        }
    }

    violations
}

#[must_use]
pub fn is_group_valid(set_type: SetType, movements: &[Movement]) -> bool {
    group_violations(set_type, movements).is_empty()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn complete_movement(name: &str) -> Movement {
        Movement {
            name: name.to_string(),
            set_count: Some(3),
            rep_count: Some(Reps::new(10).unwrap()),
            weight: Some(Weight::new(40.0).unwrap()),
            rest_time: Some(Time::new(60).unwrap()),
            tempo: None,
            duration: None,
        }
    }

    fn complete_movements(count: usize) -> Vec<Movement> {
        (1..=count)
            .map(|i| complete_movement(&format!("Exercise {i}")))
            .collect()
    }

    #[test]
    fn test_describe_keys_are_unique_and_round_trip() {
        for set_type in SetType::iter() {
            let descriptor = describe(*set_type);
            assert_eq!(SetType::try_from(descriptor.key), Ok(*set_type));
            assert!(descriptor.min_movements >= 1);
            assert!(descriptor.min_movements <= descriptor.max_movements);
            assert!(descriptor.required_fields.contains(&MovementField::Name));
        }
    }

    #[test]
    fn test_set_type_try_from_invalid() {
        assert_eq!(
            SetType::try_from("german_volume"),
            Err(SetTypeError::Invalid("german_volume".to_string()))
        );
    }

    #[rstest]
    #[case(0, false)]
    #[case(1, false)]
    #[case(2, true)]
    #[case(3, false)]
    fn test_is_group_valid_superset_cardinality(#[case] count: usize, #[case] expected: bool) {
        assert_eq!(
            is_group_valid(SetType::Superset, &complete_movements(count)),
            expected
        );
    }

    #[rstest]
    #[case(3, false)]
    #[case(4, true)]
    #[case(5, true)]
    #[case(6, true)]
    #[case(7, false)]
    fn test_is_group_valid_giant_cardinality(#[case] count: usize, #[case] expected: bool) {
        assert_eq!(
            is_group_valid(SetType::Giant, &complete_movements(count)),
            expected
        );
    }

    #[rstest]
    #[case(MovementField::Name)]
    #[case(MovementField::SetCount)]
    #[case(MovementField::RepCount)]
    #[case(MovementField::Weight)]
    #[case(MovementField::RestTime)]
    fn test_is_group_valid_superset_requires_field(#[case] field: MovementField) {
        let mut movements = complete_movements(2);
        match field {
            MovementField::Name => movements[1].name = String::from("  "),
            MovementField::SetCount => movements[1].set_count = None,
            MovementField::RepCount => movements[1].rep_count = None,
            MovementField::Weight => movements[1].weight = None,
            MovementField::RestTime => movements[1].rest_time = None,
            MovementField::Tempo | MovementField::Duration => unreachable!(),
        }
        assert!(!is_group_valid(SetType::Superset, &movements));
        assert_eq!(
            group_violations(SetType::Superset, &movements),
            vec![GroupError::MissingField { position: 2, field }]
        );
    }

    #[test]
    fn test_is_group_valid_time_under_tension_requires_tempo() {
        let mut movement = complete_movement("Squat");
        assert!(!is_group_valid(
            SetType::TimeUnderTension,
            std::slice::from_ref(&movement)
        ));
        movement.tempo = Some(Tempo::default());
        assert!(!is_group_valid(
            SetType::TimeUnderTension,
            std::slice::from_ref(&movement)
        ));
        movement.tempo = Some(Tempo::new(4, 0, 1, 0).unwrap());
        assert!(is_group_valid(SetType::TimeUnderTension, &[movement]));
    }

    #[test]
    fn test_group_violations_reports_cardinality_and_fields() {
        let movements = vec![complete_movement("Bench Press"), Movement::named("Fly")];
        assert_eq!(
            group_violations(SetType::Triset, &movements),
            vec![
                GroupError::Cardinality {
                    set_type: "Tri-Set",
                    min: 3,
                    max: 3,
                    actual: 2
                },
                GroupError::MissingField {
                    position: 2,
                    field: MovementField::SetCount
                }
            ]
        );
        assert_eq!(
            group_violations(SetType::Triset, &movements)[0].to_string(),
            "Tri-Set requires between 3 and 3 movements (2 given)"
        );
    }

    #[rstest]
    #[case(SetType::Straight, false)]
    #[case(SetType::Superset, true)]
    #[case(SetType::Circuit, true)]
    #[case(SetType::Hiit, true)]
    #[case(SetType::Drop, false)]
    fn test_set_type_is_group(#[case] set_type: SetType, #[case] expected: bool) {
        assert_eq!(set_type.is_group(), expected);
    }
}
