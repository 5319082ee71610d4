use std::{fmt, num::IntErrorKind};

use crate::{ExerciseMovement, TargetMuscles};

#[derive(Debug, Clone, PartialEq)]
pub struct DayWorkout {
    pub day: u32,
    pub target_muscles: TargetMuscles,
    pub exercises: Vec<ExerciseMovement>,
}

impl DayWorkout {
    #[must_use]
    pub fn new(day: u32) -> Self {
        Self {
            day,
            target_muscles: TargetMuscles::new(),
            exercises: vec![],
        }
    }

    #[must_use]
    pub fn id(&self) -> DayID {
        DayID::from(self.day)
    }

    #[must_use]
    pub fn is_assigned(&self) -> bool {
        !self.target_muscles.is_empty()
    }
}

/// Identity of a day, always derived from its day number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayID(u32);

impl From<u32> for DayID {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl TryFrom<&str> for DayID {
    type Error = DayIDError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value
            .strip_prefix("day-")
            .and_then(|n| n.parse::<u32>().ok())
            .filter(|n| *n > 0)
            .map(DayID)
            .ok_or(DayIDError::Invalid)
    }
}

impl fmt::Display for DayID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "day-{}", self.0)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum DayIDError {
    #[error("Invalid day ID")]
    Invalid,
}

pub const MAX_DAYS_PER_WEEK: u32 = 7;

/// Interpret the raw "days per week" input.
///
/// Anything that is not a non-negative integer counts as zero days. Larger counts are capped at
/// [`MAX_DAYS_PER_WEEK`].
#[must_use]
pub fn parse_day_count(value: &str) -> u32 {
    match value.trim().parse::<u32>() {
        Ok(count) => count.min(MAX_DAYS_PER_WEEK),
        Err(err) if *err.kind() == IntErrorKind::PosOverflow => MAX_DAYS_PER_WEEK,
        Err(_) => 0,
    }
}

/// Bring the day collection in line with the requested number of days.
///
/// The result contains exactly one entry for every day in `1..=days_per_week`, in ascending
/// order. Existing entries are kept unchanged; on shrink, the days with the highest numbers are
/// discarded.
#[must_use]
pub fn reconcile(days_per_week: u32, existing: Vec<DayWorkout>) -> Vec<DayWorkout> {
    if is_synchronized(days_per_week, &existing) {
        return existing;
    }

    let mut kept = existing
        .into_iter()
        .filter(|d| (1..=days_per_week).contains(&d.day))
        .collect::<Vec<_>>();
    kept.sort_by_key(|d| d.day);
    kept.dedup_by_key(|d| d.day);

    let mut kept = kept.into_iter().peekable();
    let mut result = Vec::with_capacity(kept.len());
    for day in 1..=days_per_week {
        match kept.next_if(|d| d.day == day) {
            Some(existing_day) => result.push(existing_day),
            None => result.push(DayWorkout::new(day)),
        }
    }
    result
}

fn is_synchronized(days_per_week: u32, days: &[DayWorkout]) -> bool {
    days.len() == days_per_week as usize
        && days.iter().zip(1..).all(|(d, day)| d.day == day)
}
