use std::fmt;

use crate::{DayWorkout, parse_day_count};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProgramMetadata {
    pub name: String,
    /// Raw user input, see [`ProgramMetadata::day_count`].
    pub days_per_week: String,
    pub description: String,
    pub height: String,
    pub weight: String,
    pub program_id: Option<ProgramID>,
}

impl ProgramMetadata {
    #[must_use]
    pub fn day_count(&self) -> u32 {
        parse_day_count(&self.days_per_week)
    }
}

/// Identifier assigned by the server after a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramID(String);

impl ProgramID {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProgramID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ProgramID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ProgramID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct AthleteDetails {
    pub name: String,
    pub phone: String,
    pub age: String,
    pub height: String,
    pub weight: String,
    pub experience: Option<ExperienceLevel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl ExperienceLevel {
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            ExperienceLevel::Beginner => "beginner",
            ExperienceLevel::Intermediate => "intermediate",
            ExperienceLevel::Advanced => "advanced",
        }
    }
}

impl TryFrom<&str> for ExperienceLevel {
    type Error = ExperienceLevelError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "beginner" => Ok(ExperienceLevel::Beginner),
            "intermediate" => Ok(ExperienceLevel::Intermediate),
            "advanced" => Ok(ExperienceLevel::Advanced),
            _ => Err(ExperienceLevelError::Invalid),
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ExperienceLevelError {
    #[error("Invalid experience level")]
    Invalid,
}

#[must_use]
pub fn validate_program_info(metadata: &ProgramMetadata) -> bool {
    !metadata.name.trim().is_empty() && metadata.day_count() > 0
}

/// Every day needs at least one muscle tag. A rest day counts as assigned.
#[must_use]
pub fn validate_muscle_assignment(days: &[DayWorkout]) -> bool {
    !days.is_empty() && days.iter().all(DayWorkout::is_assigned)
}

#[must_use]
pub fn validate_athlete_details(details: &AthleteDetails) -> bool {
    !details.name.trim().is_empty()
        && !details.phone.trim().is_empty()
        && is_positive(&details.age)
        && is_positive(&details.height)
        && is_positive(&details.weight)
        && details.experience.is_some()
}

fn is_positive(value: &str) -> bool {
    value
        .replace(',', ".")
        .trim()
        .parse::<f32>()
        .is_ok_and(|v| v.is_finite() && v > 0.0)
}
