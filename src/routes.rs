//! REST endpoints over a `FitnessSession`.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use crate::error::PlanError;
use crate::persist::FlushOutcome;
use crate::plans::nutrition::annotate_food;
use crate::plans::{DietPlan, Exercise, Food, MacroTargets, Meal, Plans, Workout};
use crate::profile::ProfileUpdate;
use crate::session::FitnessSession;

/// Shared state for fitness routes.
#[derive(Clone)]
pub struct FitnessRouteState {
    pub session: Arc<FitnessSession>,
}

#[derive(Debug, Deserialize)]
struct MessageRequest {
    text: String,
}

#[derive(Debug, Deserialize)]
struct WorkoutRequest {
    name: String,
    weekday: String,
    #[serde(default)]
    exercises: Vec<Exercise>,
}

#[derive(Debug, Deserialize)]
struct WorkoutPatch {
    name: Option<String>,
    weekday: Option<String>,
}

/// Foods are sent by name and portion; macros come from the food table.
#[derive(Debug, Deserialize)]
struct FoodRequest {
    name: String,
    grams: u32,
}

impl FoodRequest {
    fn into_food(self) -> Food {
        annotate_food(&self.name, self.grams)
    }
}

#[derive(Debug, Deserialize)]
struct MealRequest {
    name: String,
    time: String,
    #[serde(default)]
    foods: Vec<FoodRequest>,
}

impl MealRequest {
    fn into_meal(self) -> Meal {
        Meal {
            name: self.name,
            time: self.time,
            foods: self.foods.into_iter().map(FoodRequest::into_food).collect(),
        }
    }
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

fn plan_error_response(e: PlanError) -> Response {
    let status = match e {
        PlanError::WorkoutNotFound(_) | PlanError::NoDiet => StatusCode::NOT_FOUND,
        PlanError::IndexOutOfRange { .. } => StatusCode::BAD_REQUEST,
    };
    error_response(status, e.to_string())
}

fn plan_result<T: Serialize>(result: Result<T, PlanError>) -> Response {
    match result {
        Ok(value) => Json(value).into_response(),
        Err(e) => plan_error_response(e),
    }
}

fn workout_after_edit(plans: &Plans, id: Uuid) -> Result<Workout, PlanError> {
    plans.workout(id).cloned().ok_or(PlanError::WorkoutNotFound(id))
}

fn diet_after_edit(plans: &Plans) -> Result<DietPlan, PlanError> {
    plans.diet.clone().ok_or(PlanError::NoDiet)
}

async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "fitness-intake"
    }))
}

/// POST /api/fitness/message
async fn post_message(
    State(state): State<FitnessRouteState>,
    Json(req): Json<MessageRequest>,
) -> impl IntoResponse {
    match state.session.handle_message(&req.text).await {
        Some(reply) => Json(reply).into_response(),
        None => error_response(StatusCode::BAD_REQUEST, "Message text is empty"),
    }
}

/// GET /api/fitness/messages
async fn get_messages(State(state): State<FitnessRouteState>) -> impl IntoResponse {
    Json(state.session.messages().await)
}

/// GET /api/fitness/status
async fn get_status(State(state): State<FitnessRouteState>) -> impl IntoResponse {
    Json(state.session.status().await)
}

/// GET /api/fitness/profile
async fn get_profile(State(state): State<FitnessRouteState>) -> impl IntoResponse {
    Json(state.session.profile().await)
}

/// PATCH /api/fitness/profile
///
/// Merges the given fields. The response says which plans were rebuilt.
async fn patch_profile(
    State(state): State<FitnessRouteState>,
    Json(update): Json<ProfileUpdate>,
) -> impl IntoResponse {
    if update.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "No profile fields given");
    }
    let (profile, derivation) = match state.session.update_profile(&update).await {
        Ok(result) => result,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
    };
    Json(json!({
        "profile": profile,
        "workouts_regenerated": derivation.workouts.is_some(),
        "diet_regenerated": derivation.diet.is_some(),
    }))
    .into_response()
}

/// GET /api/fitness/workouts
async fn get_workouts(State(state): State<FitnessRouteState>) -> impl IntoResponse {
    Json(state.session.workouts().await)
}

/// POST /api/fitness/workouts
async fn add_workout(
    State(state): State<FitnessRouteState>,
    Json(req): Json<WorkoutRequest>,
) -> impl IntoResponse {
    let workout = Workout::new(req.name, req.weekday, req.exercises);
    let created = workout.clone();
    let result = state
        .session
        .edit_workouts(|plans| {
            plans.add_workout(workout);
            Ok(())
        })
        .await;
    match result {
        Ok(()) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(e) => plan_error_response(e),
    }
}

/// PUT /api/fitness/workouts/{id}
async fn replace_workout(
    State(state): State<FitnessRouteState>,
    Path(id): Path<Uuid>,
    Json(req): Json<WorkoutRequest>,
) -> impl IntoResponse {
    let workout = Workout {
        id,
        name: req.name,
        weekday: req.weekday,
        exercises: req.exercises,
    };
    let result = state
        .session
        .edit_workouts(|plans| {
            plans.update_workout(workout)?;
            workout_after_edit(plans, id)
        })
        .await;
    plan_result(result)
}

/// PATCH /api/fitness/workouts/{id}
///
/// Renames the workout and/or moves it to another weekday.
async fn patch_workout(
    State(state): State<FitnessRouteState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<WorkoutPatch>,
) -> impl IntoResponse {
    if patch.name.is_none() && patch.weekday.is_none() {
        return error_response(StatusCode::BAD_REQUEST, "No workout fields given");
    }
    let result = state
        .session
        .edit_workouts(|plans| {
            if let Some(name) = patch.name {
                plans.rename_workout(id, name)?;
            }
            if let Some(weekday) = patch.weekday {
                plans.set_weekday(id, weekday)?;
            }
            workout_after_edit(plans, id)
        })
        .await;
    plan_result(result)
}

/// DELETE /api/fitness/workouts/{id}
async fn delete_workout(
    State(state): State<FitnessRouteState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    plan_result(state.session.edit_workouts(|plans| plans.remove_workout(id)).await)
}

/// POST /api/fitness/workouts/{id}/exercises
async fn add_exercise(
    State(state): State<FitnessRouteState>,
    Path(id): Path<Uuid>,
    Json(exercise): Json<Exercise>,
) -> impl IntoResponse {
    let result = state
        .session
        .edit_workouts(|plans| {
            plans.add_exercise(id, exercise)?;
            workout_after_edit(plans, id)
        })
        .await;
    plan_result(result)
}

/// PUT /api/fitness/workouts/{id}/exercises/{index}
async fn update_exercise(
    State(state): State<FitnessRouteState>,
    Path((id, index)): Path<(Uuid, usize)>,
    Json(exercise): Json<Exercise>,
) -> impl IntoResponse {
    let result = state
        .session
        .edit_workouts(|plans| {
            plans.update_exercise(id, index, exercise)?;
            workout_after_edit(plans, id)
        })
        .await;
    plan_result(result)
}

/// DELETE /api/fitness/workouts/{id}/exercises/{index}
async fn remove_exercise(
    State(state): State<FitnessRouteState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> impl IntoResponse {
    plan_result(
        state
            .session
            .edit_workouts(|plans| plans.remove_exercise(id, index))
            .await,
    )
}

/// GET /api/fitness/diet
async fn get_diet(State(state): State<FitnessRouteState>) -> impl IntoResponse {
    match state.session.diet().await {
        Some(diet) => Json(diet).into_response(),
        None => plan_error_response(PlanError::NoDiet),
    }
}

/// PUT /api/fitness/diet/macros
async fn update_macros(
    State(state): State<FitnessRouteState>,
    Json(targets): Json<MacroTargets>,
) -> impl IntoResponse {
    let result = state
        .session
        .edit_diet(|plans| {
            plans.update_macros(targets)?;
            diet_after_edit(plans)
        })
        .await;
    plan_result(result)
}

/// POST /api/fitness/diet/meals
async fn add_meal(
    State(state): State<FitnessRouteState>,
    Json(req): Json<MealRequest>,
) -> impl IntoResponse {
    let meal = req.into_meal();
    let result = state
        .session
        .edit_diet(|plans| {
            plans.add_meal(meal)?;
            diet_after_edit(plans)
        })
        .await;
    plan_result(result)
}

/// PUT /api/fitness/diet/meals/{meal}
async fn update_meal(
    State(state): State<FitnessRouteState>,
    Path(index): Path<usize>,
    Json(req): Json<MealRequest>,
) -> impl IntoResponse {
    let meal = req.into_meal();
    let result = state
        .session
        .edit_diet(|plans| {
            plans.update_meal(index, meal)?;
            diet_after_edit(plans)
        })
        .await;
    plan_result(result)
}

/// DELETE /api/fitness/diet/meals/{meal}
async fn remove_meal(
    State(state): State<FitnessRouteState>,
    Path(index): Path<usize>,
) -> impl IntoResponse {
    plan_result(state.session.edit_diet(|plans| plans.remove_meal(index)).await)
}

/// POST /api/fitness/diet/meals/{meal}/foods
async fn add_food(
    State(state): State<FitnessRouteState>,
    Path(meal): Path<usize>,
    Json(req): Json<FoodRequest>,
) -> impl IntoResponse {
    let food = req.into_food();
    let result = state
        .session
        .edit_diet(|plans| {
            plans.add_food(meal, food)?;
            diet_after_edit(plans)
        })
        .await;
    plan_result(result)
}

/// PUT /api/fitness/diet/meals/{meal}/foods/{index}
async fn update_food(
    State(state): State<FitnessRouteState>,
    Path((meal, index)): Path<(usize, usize)>,
    Json(req): Json<FoodRequest>,
) -> impl IntoResponse {
    let food = req.into_food();
    let result = state
        .session
        .edit_diet(|plans| {
            plans.update_food(meal, index, food)?;
            diet_after_edit(plans)
        })
        .await;
    plan_result(result)
}

/// DELETE /api/fitness/diet/meals/{meal}/foods/{index}
async fn remove_food(
    State(state): State<FitnessRouteState>,
    Path((meal, index)): Path<(usize, usize)>,
) -> impl IntoResponse {
    plan_result(
        state
            .session
            .edit_diet(|plans| plans.remove_food(meal, index))
            .await,
    )
}

/// POST /api/fitness/save
async fn save(State(state): State<FitnessRouteState>) -> impl IntoResponse {
    let outcome = state.session.save_now().await;
    debug!(?outcome, "Manual save requested");
    let label = match &outcome {
        FlushOutcome::Idle => "idle",
        FlushOutcome::LocalOnly => "local_only",
        FlushOutcome::Saved(_) => "saved",
        FlushOutcome::Failed { .. } => "failed",
    };
    let status = state.session.save_status().await;
    let code = if matches!(outcome, FlushOutcome::Failed { .. }) {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::OK
    };
    (code, Json(json!({ "outcome": label, "status": status })))
}

/// POST /api/fitness/reset
async fn reset(State(state): State<FitnessRouteState>) -> impl IntoResponse {
    state.session.reset().await;
    Json(json!({
        "step": state.session.step().await,
        "messages": state.session.messages().await,
    }))
}

/// Build the fitness REST routes.
pub fn fitness_routes(state: FitnessRouteState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/fitness/message", post(post_message))
        .route("/api/fitness/messages", get(get_messages))
        .route("/api/fitness/status", get(get_status))
        .route("/api/fitness/profile", get(get_profile).patch(patch_profile))
        .route("/api/fitness/workouts", get(get_workouts).post(add_workout))
        .route(
            "/api/fitness/workouts/{id}",
            put(replace_workout).patch(patch_workout).delete(delete_workout),
        )
        .route("/api/fitness/workouts/{id}/exercises", post(add_exercise))
        .route(
            "/api/fitness/workouts/{id}/exercises/{index}",
            put(update_exercise).delete(remove_exercise),
        )
        .route("/api/fitness/diet", get(get_diet))
        .route("/api/fitness/diet/macros", put(update_macros))
        .route("/api/fitness/diet/meals", post(add_meal))
        .route("/api/fitness/diet/meals/{meal}", put(update_meal).delete(remove_meal))
        .route("/api/fitness/diet/meals/{meal}/foods", post(add_food))
        .route(
            "/api/fitness/diet/meals/{meal}/foods/{index}",
            put(update_food).delete(remove_food),
        )
        .route("/api/fitness/save", post(save))
        .route("/api/fitness/reset", post(reset))
        .with_state(state)
}
