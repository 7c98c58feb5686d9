use axum::{
    extract::{rejection::JsonRejection, FromRef, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        cookies,
        dto::{normalize_email, LoginRequest, LoginResponse, MeResponse, PublicUser, RegisterRequest},
        extractors::AuthUser,
        jwt::JwtKeys,
        password::{hash_password, verify_password},
        repo_types::NewUser,
    },
    error::{ApiError, ApiResult},
    state::AppState,
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/register", post(register))
        .route("/users/login", post(login))
        .route("/users/logout", delete(logout))
        .route("/users/me", get(get_me))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<PublicUser>)> {
    let Json(mut payload) = payload?;
    payload.validate().map_err(|errors| {
        warn!(fields = errors.len(), "invalid registration payload");
        ApiError::Validation(errors)
    })?;

    let password_hash = hash_password(&payload.password)?;
    let created = state
        .users
        .create(NewUser {
            email: payload.email.clone(),
            password_hash,
            name: payload.name,
        })
        .await?;

    let Some(user) = created else {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::Conflict("User already exists".into()));
    };

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((StatusCode::CREATED, Json(PublicUser::from(user))))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(payload) = payload?;
    let email = normalize_email(&payload.email);

    let invalid = || ApiError::unauthorized("Invalid email or password");

    let Some(user) = state.users.find_by_email(&email).await? else {
        warn!(email = %email, "login unknown email");
        return Err(invalid());
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(email = %email, user_id = %user.id, "login invalid password");
        return Err(invalid());
    }

    let keys = JwtKeys::from_ref(&state);
    let access_token = keys.sign(&user)?;
    let cookie = cookies::session_cookie(&state.config.cookie, &access_token, keys.ttl);

    info!(user_id = %user.id, "user logged in");
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(LoginResponse { access_token }),
    ))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn logout(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    info!("user logged out");
    (
        [(header::SET_COOKIE, cookies::removal_cookie(&state.config.cookie))],
        Json(json!({ "message": "Logout successful" })),
    )
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn get_me(State(state): State<AppState>, user: AuthUser) -> ApiResult<Json<MeResponse>> {
    let found = state.users.find_by_id(user.id).await?;
    let user = found.ok_or_else(|| {
        warn!("token refers to a missing user");
        ApiError::unauthorized("User not found")
    })?;
    Ok(Json(MeResponse::from(user)))
}
