mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;
mod services;
pub mod streak;
mod validation;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::meal_routes()
}
