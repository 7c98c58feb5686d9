use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{instrument, warn};

use super::{
    dto::{MealEnvelope, MealList, MealPayload, MealView, ResumeResponse},
    repo_types::MealInput,
    services,
    validation::validate_meal,
};
use crate::{
    auth::AuthUser,
    error::{ApiError, ApiResult},
    state::AppState,
};

pub fn meal_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", get(list_meals).post(create_meal))
        .route("/meals/resume", get(get_resume))
        .route(
            "/meals/:id",
            get(get_meal).put(update_meal).delete(delete_meal),
        )
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn list_meals(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<MealList>> {
    let meals = services::list_meals(&state, user.id).await?;
    Ok(Json(MealList {
        meals: meals.into_iter().map(MealView::from).collect(),
    }))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn get_meal(
    State(state): State<AppState>,
    user: AuthUser,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<MealEnvelope>> {
    let meal = services::get_meal(&state, user.id, meal_id(id)?).await?;
    Ok(Json(MealEnvelope { meal: meal.into() }))
}

#[instrument(skip(state, user, payload), fields(user_id = %user.id))]
pub async fn create_meal(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<MealPayload>, JsonRejection>,
) -> ApiResult<(StatusCode, HeaderMap, Json<MealEnvelope>)> {
    let input = checked(payload)?;
    let meal = services::create_meal(&state, user.id, input).await?;

    let mut headers = HeaderMap::new();
    if let Ok(location) = HeaderValue::from_str(&format!("/meals/{}", meal.id)) {
        headers.insert(header::LOCATION, location);
    }

    Ok((
        StatusCode::CREATED,
        headers,
        Json(MealEnvelope { meal: meal.into() }),
    ))
}

#[instrument(skip(state, user, payload), fields(user_id = %user.id))]
pub async fn update_meal(
    State(state): State<AppState>,
    user: AuthUser,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<MealPayload>, JsonRejection>,
) -> ApiResult<Json<MealEnvelope>> {
    let id = meal_id(id)?;
    let input = checked(payload)?;
    let meal = services::update_meal(&state, user.id, id, input).await?;
    Ok(Json(MealEnvelope { meal: meal.into() }))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn delete_meal(
    State(state): State<AppState>,
    user: AuthUser,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Value>> {
    services::delete_meal(&state, user.id, meal_id(id)?).await?;
    Ok(Json(json!({ "message": "Meal deleted successfully" })))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn get_resume(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<ResumeResponse>> {
    Ok(Json(services::resume(&state, user.id).await?))
}

fn checked(payload: Result<Json<MealPayload>, JsonRejection>) -> ApiResult<MealInput> {
    let Json(payload) = payload?;
    validate_meal(payload).map_err(|errors| {
        warn!(fields = errors.len(), "invalid meal payload");
        ApiError::Validation(errors)
    })
}

/// An id that does not parse cannot name one of the caller's meals.
fn meal_id(path: Result<Path<i64>, PathRejection>) -> ApiResult<i64> {
    let Path(id) = path.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "unparsable meal id");
        ApiError::not_found("Meal")
    })?;
    Ok(id)
}
