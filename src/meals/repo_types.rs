use sqlx::FromRow;
use time::{Date, Time};
use uuid::Uuid;

/// Meal record. `id` is the creation sequence number and defines logged order.
#[derive(Debug, Clone, FromRow)]
pub struct Meal {
    pub id: i64,
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
    pub date: Date,
    pub hour: Time,
    pub is_in_diet: bool,
}

/// Validated meal fields, used for both insert and full update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealInput {
    pub name: String,
    pub description: String,
    pub date: Date,
    pub hour: Time,
    pub is_in_diet: bool,
}
