use std::{collections::BTreeSet, fmt, slice::Iter};

use crate::Property;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum MuscleTag {
    Chest,
    Back,
    Shoulders,
    Arms,
    Biceps,
    Triceps,
    Legs,
    Abs,
    Rest,
}

impl Property for MuscleTag {
    fn iter() -> Iter<'static, MuscleTag> {
        static MUSCLE_TAGS: [MuscleTag; 9] = [
            MuscleTag::Chest,
            MuscleTag::Back,
            MuscleTag::Shoulders,
            MuscleTag::Arms,
            MuscleTag::Biceps,
            MuscleTag::Triceps,
            MuscleTag::Legs,
            MuscleTag::Abs,
            MuscleTag::Rest,
        ];
        MUSCLE_TAGS.iter()
    }

    fn iter_filter() -> Iter<'static, MuscleTag> {
        static TRAINABLE: [MuscleTag; 8] = [
            MuscleTag::Chest,
            MuscleTag::Back,
            MuscleTag::Shoulders,
            MuscleTag::Arms,
            MuscleTag::Biceps,
            MuscleTag::Triceps,
            MuscleTag::Legs,
            MuscleTag::Abs,
        ];
        TRAINABLE.iter()
    }

    fn name(self) -> &'static str {
        match self {
            MuscleTag::Chest => "Chest",
            MuscleTag::Back => "Back",
            MuscleTag::Shoulders => "Shoulders",
            MuscleTag::Arms => "Arms",
            MuscleTag::Biceps => "Biceps",
            MuscleTag::Triceps => "Triceps",
            MuscleTag::Legs => "Legs",
            MuscleTag::Abs => "Abs",
            MuscleTag::Rest => "Rest Day",
        }
    }
}

impl MuscleTag {
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            MuscleTag::Chest => "chest",
            MuscleTag::Back => "back",
            MuscleTag::Shoulders => "shoulders",
            MuscleTag::Arms => "arms",
            MuscleTag::Biceps => "biceps",
            MuscleTag::Triceps => "triceps",
            MuscleTag::Legs => "legs",
            MuscleTag::Abs => "abs",
            MuscleTag::Rest => "rest",
        }
    }
}

impl fmt::Display for MuscleTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl TryFrom<&str> for MuscleTag {
    type Error = MuscleTagError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        MuscleTag::iter()
            .find(|tag| tag.key() == value.trim())
            .copied()
            .ok_or(MuscleTagError::Invalid(value.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum MuscleTagError {
    #[error("Invalid muscle tag \"{0}\"")]
    Invalid(String),
}

/// Muscle tags assigned to a single day.
///
/// `Rest` never coexists with any other tag.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TargetMuscles(BTreeSet<MuscleTag>);

impl TargetMuscles {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, tag: MuscleTag) {
        if tag == MuscleTag::Rest {
            self.0.clear();
        } else {
            self.0.remove(&MuscleTag::Rest);
        }
        self.0.insert(tag);
    }

    pub fn deselect(&mut self, tag: MuscleTag) {
        self.0.remove(&tag);
    }

    pub fn toggle(&mut self, tag: MuscleTag) {
        if self.contains(tag) {
            self.deselect(tag);
        } else {
            self.select(tag);
        }
    }

    #[must_use]
    pub fn contains(&self, tag: MuscleTag) -> bool {
        self.0.contains(&tag)
    }

    #[must_use]
    pub fn is_rest(&self) -> bool {
        self.contains(MuscleTag::Rest)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = MuscleTag> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<MuscleTag> for TargetMuscles {
    fn from_iter<T: IntoIterator<Item = MuscleTag>>(iter: T) -> Self {
        let mut target_muscles = TargetMuscles::new();
        for tag in iter {
            target_muscles.select(tag);
        }
        target_muscles
    }
}

impl fmt::Display for TargetMuscles {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            self.iter().map(Property::name).collect::<Vec<_>>().join(", ")
        )
    }
}
