use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;
use uuid::Uuid;

use super::{cookies, jwt::JwtKeys};
use crate::{error::ApiError, state::AppState};

/// The verified caller of an authenticated route. Meal queries are scoped by `id`.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: Uuid,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Session cookie first, bearer header as a fallback for API clients.
        let token = cookies::token_from_cookie(&parts.headers, &state.config.cookie.name)
            .or_else(|| cookies::token_from_bearer(&parts.headers))
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(&token).map_err(|e| {
            warn!(error = %e, "invalid or expired token");
            ApiError::unauthorized("Invalid or expired token")
        })?;

        Ok(AuthUser { id: claims.sub })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repo_types::User;
    use axum::http::{header, Request};
    use time::OffsetDateTime;

    fn parts_with(name: header::HeaderName, value: &str) -> Parts {
        let (parts, _) = Request::builder()
            .header(name, value)
            .body(())
            .unwrap()
            .into_parts();
        parts
    }

    #[tokio::test]
    async fn caller_id_comes_from_the_session_cookie() {
        let state = AppState::fake();
        let user = User {
            id: Uuid::new_v4(),
            email: "test@test.com".into(),
            password_hash: String::new(),
            name: "Test User".into(),
            best_in_diet_meal_sequence: 0,
            created_at: OffsetDateTime::now_utc(),
        };
        let token = JwtKeys::from_ref(&state).sign(&user).unwrap();

        let mut parts = parts_with(header::COOKIE, &format!("access_token={}", token));
        let caller = AuthUser::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(caller.id, user.id);
    }

    #[tokio::test]
    async fn missing_session_is_unauthorized() {
        let state = AppState::fake();
        let mut parts = parts_with(header::COOKIE, "theme=dark");
        let err = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }
}
