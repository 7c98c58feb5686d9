use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::repo_types::Meal;

/// Body of `POST /meals` and `PUT /meals/:id`.
///
/// Every field is optional at the JSON level so that missing fields come back
/// as field-level validation errors rather than a bare deserialization failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub hour: Option<String>,
    pub is_in_diet: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealView {
    pub id: i64,
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
    pub date: String, // YYYY-MM-DD
    pub hour: String, // HH:MM
    pub is_in_diet: bool,
}

impl From<Meal> for MealView {
    fn from(m: Meal) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            name: m.name,
            description: m.description,
            date: format!(
                "{:04}-{:02}-{:02}",
                m.date.year(),
                u8::from(m.date.month()),
                m.date.day()
            ),
            hour: format!("{:02}:{:02}", m.hour.hour(), m.hour.minute()),
            is_in_diet: m.is_in_diet,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MealEnvelope {
    pub meal: MealView,
}

#[derive(Debug, Serialize)]
pub struct MealList {
    pub meals: Vec<MealView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeResponse {
    pub all_meals: usize,
    pub in_diet_meals: usize,
    pub not_in_diet_meals: usize,
    pub best_in_diet_meal_sequence: i32,
    pub diet_percentage: f64,
}
