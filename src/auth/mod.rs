use crate::state::AppState;
use axum::Router;

mod claims;
pub(crate) mod cookies;
mod dto;
pub(crate) mod extractors;
pub mod handlers;
pub(crate) mod jwt;
mod password;
pub mod repo;
pub mod repo_types;

pub use extractors::AuthUser;

pub fn router() -> Router<AppState> {
    handlers::user_routes()
}
