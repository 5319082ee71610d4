use gloo_net::http::{Request, Response};
use liftplan_domain as domain;
use log::debug;
use serde_json::{Value, json};

#[allow(async_fn_in_trait)]
pub trait SendRequest {
    async fn send_request(&self, request: Request) -> Result<Response, gloo_net::Error>;
}

#[derive(Clone)]
pub struct GlooNetSendRequest;

impl SendRequest for GlooNetSendRequest {
    async fn send_request(&self, request: Request) -> Result<Response, gloo_net::Error> {
        request.send().await
    }
}

#[derive(Clone)]
pub struct REST<S: SendRequest> {
    pub sender: S,
}

impl REST<GlooNetSendRequest> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sender: GlooNetSendRequest,
        }
    }
}

impl Default for REST<GlooNetSendRequest> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SendRequest> domain::SubmissionRepository for REST<S> {
    async fn submit_program(
        &self,
        program: &domain::ProgramMetadata,
        athlete: &domain::AthleteDetails,
        days: &[domain::DayWorkout],
    ) -> Result<domain::ProgramID, domain::SubmitError> {
        let request = Request::post("api/programs")
            .json(&submission(program, athlete, days))
            .map_err(|err| domain::SubmitError::Other(Box::new(err)))?;
        let response = self.fetch::<SubmissionResponse>(request).await?;
        match response {
            SubmissionResponse {
                success: true,
                id: Some(id),
            } if !id.is_empty() => Ok(domain::ProgramID::from(id)),
            SubmissionResponse { success: true, .. } => Err(domain::SubmitError::Rejected(
                String::from("missing program ID"),
            )),
            SubmissionResponse { success: false, .. } => Err(domain::SubmitError::Rejected(
                String::from("server reported failure"),
            )),
        }
    }
}

impl<S: SendRequest> REST<S> {
    async fn fetch<T>(&self, request: Request) -> Result<T, domain::SubmitError>
    where
        T: 'static + for<'de> serde::Deserialize<'de>,
    {
        debug!("sending request to {}", request.url());
        match self.sender.send_request(request).await {
            Ok(response) => {
                if response.ok() {
                    match response.json::<T>().await {
                        Ok(data) => Ok(data),
                        Err(error) => Err(domain::SubmitError::Storage(
                            domain::StorageError::Other(
                                format!("deserialization failed: {error:?}").into(),
                            ),
                        )),
                    }
                } else {
                    Err(domain::SubmitError::Rejected(format!(
                        "{} {}",
                        response.status(),
                        response.status_text()
                    )))
                }
            }
            Err(_) => Err(domain::SubmitError::Storage(
                domain::StorageError::NoConnection,
            )),
        }
    }
}

#[derive(serde::Deserialize, Debug, PartialEq)]
struct SubmissionResponse {
    success: bool,
    #[serde(default)]
    id: Option<String>,
}

/// Request body of a program submission.
///
/// Numeric inputs are sent as numbers. Input that cannot be interpreted as a number is sent as 0.
fn submission(
    program: &domain::ProgramMetadata,
    athlete: &domain::AthleteDetails,
    days: &[domain::DayWorkout],
) -> Value {
    json!({
        "program": {
            "name": program.name.trim(),
            "days_per_week": program.day_count(),
            "description": program.description.trim(),
            "height": decimal(&program.height),
            "weight": decimal(&program.weight),
        },
        "athlete": {
            "name": athlete.name.trim(),
            "phone": athlete.phone.trim(),
            "age": integer(&athlete.age),
            "height": decimal(&athlete.height),
            "weight": decimal(&athlete.weight),
            "experience": athlete.experience.map(domain::ExperienceLevel::key),
        },
        "days": days.iter().map(day).collect::<Vec<_>>(),
    })
}

fn day(day: &domain::DayWorkout) -> Value {
    json!({
        "id": day.id().to_string(),
        "day": day.day,
        "target_muscles": day.target_muscles.iter().map(domain::MuscleTag::key).collect::<Vec<_>>(),
        "exercises": day.exercises.iter().map(exercise).collect::<Vec<_>>(),
    })
}

fn exercise(exercise: &domain::ExerciseMovement) -> Value {
    json!({
        "id": exercise.id.as_str(),
        "name": exercise.name.trim(),
        "sets": integer(&exercise.sets),
        "reps": integer(&exercise.reps),
        "description": exercise.description.trim(),
        "muscle_group": exercise.muscle_group.key(),
        "set_type": exercise.set_type().key(),
        "set_config": set_config(&exercise.set_config),
        "related_exercises": exercise.related_exercises.iter().map(movement).collect::<Vec<_>>(),
    })
}

fn set_config(config: &domain::SetConfig) -> Value {
    match config {
        domain::SetConfig::Straight { rest_time }
        | domain::SetConfig::Superset { rest_time }
        | domain::SetConfig::Triset { rest_time }
        | domain::SetConfig::Giant { rest_time }
        | domain::SetConfig::Fst7 { rest_time }
        | domain::SetConfig::PreExhaust { rest_time }
        | domain::SetConfig::PostExhaust { rest_time } => json!({
            "rest_time": seconds(*rest_time),
        }),
        domain::SetConfig::Drop {
            weight,
            drops,
            notes,
        } => json!({
            "weight": kilograms(*weight),
            "drops": drops.unwrap_or(0),
            "notes": notes.trim(),
        }),
        domain::SetConfig::RestPause {
            rest_time,
            target_reps,
        } => json!({
            "rest_time": seconds(*rest_time),
            "target_reps": repetitions(*target_reps),
        }),
        domain::SetConfig::Pyramid { scheme, notes } => json!({
            "scheme": scheme.key(),
            "notes": notes.trim(),
        }),
        domain::SetConfig::Cluster {
            reps_per_cluster,
            rest_time,
        } => json!({
            "reps_per_cluster": repetitions(*reps_per_cluster),
            "rest_time": seconds(*rest_time),
        }),
        domain::SetConfig::Circuit { rounds, rest_time } => json!({
            "rounds": rounds.unwrap_or(0),
            "rest_time": seconds(*rest_time),
        }),
        domain::SetConfig::Hiit {
            work_time,
            rest_time,
            rounds,
        } => json!({
            "work_time": seconds(*work_time),
            "rest_time": seconds(*rest_time),
            "rounds": rounds.unwrap_or(0),
        }),
        domain::SetConfig::TimeUnderTension { tempo } => json!({
            "tempo": tempo.to_string(),
            "time_under_tension": tempo.duration(),
        }),
        domain::SetConfig::Powerbuilding {
            target_sets,
            target_reps,
            weight,
        } => json!({
            "target_sets": target_sets.unwrap_or(0),
            "target_reps": repetitions(*target_reps),
            "weight": kilograms(*weight),
        }),
        domain::SetConfig::MindMuscle { notes } => json!({
            "notes": notes.trim(),
        }),
    }
}

fn movement(movement: &domain::Movement) -> Value {
    json!({
        "name": movement.name.trim(),
        "sets": movement.set_count.unwrap_or(0),
        "reps": repetitions(movement.rep_count),
        "weight": kilograms(movement.weight),
        "rest_time": seconds(movement.rest_time),
        "tempo": movement.tempo.map(|t| t.to_string()),
        "duration": seconds(movement.duration),
    })
}

fn integer(value: &str) -> u32 {
    value.trim().parse().unwrap_or(0)
}

fn decimal(value: &str) -> f32 {
    value
        .replace(',', ".")
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

fn seconds(time: Option<domain::Time>) -> u32 {
    time.map_or(0, u32::from)
}

fn repetitions(reps: Option<domain::Reps>) -> u32 {
    reps.map_or(0, u32::from)
}

fn kilograms(weight: Option<domain::Weight>) -> f32 {
    weight.map_or(0.0, f32::from)
}
