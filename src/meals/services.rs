use tracing::{debug, info};
use uuid::Uuid;

use super::{
    dto::ResumeResponse,
    repo_types::{Meal, MealInput},
    streak::{diet_percentage, scan_best_streak},
};
use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

pub async fn list_meals(st: &AppState, user_id: Uuid) -> ApiResult<Vec<Meal>> {
    Ok(st.meals.list_by_user(user_id).await?)
}

pub async fn get_meal(st: &AppState, user_id: Uuid, meal_id: i64) -> ApiResult<Meal> {
    st.meals
        .get(user_id, meal_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Meal"))
}

/// Appending never lowers the true best, so the stored value is left alone
/// and the next resume picks up any longer run.
pub async fn create_meal(st: &AppState, user_id: Uuid, input: MealInput) -> ApiResult<Meal> {
    let meal = st.meals.create(user_id, input).await?;
    info!(%user_id, meal_id = meal.id, in_diet = meal.is_in_diet, "meal created");
    Ok(meal)
}

pub async fn update_meal(
    st: &AppState,
    user_id: Uuid,
    meal_id: i64,
    input: MealInput,
) -> ApiResult<Meal> {
    let meal = st
        .meals
        .update(user_id, meal_id, input)
        .await?
        .ok_or_else(|| ApiError::not_found("Meal"))?;
    reset_best_streak(st, user_id).await?;
    info!(%user_id, meal_id, "meal updated");
    Ok(meal)
}

pub async fn delete_meal(st: &AppState, user_id: Uuid, meal_id: i64) -> ApiResult<()> {
    if st.meals.delete(user_id, meal_id).await? == 0 {
        return Err(ApiError::not_found("Meal"));
    }
    reset_best_streak(st, user_id).await?;
    info!(%user_id, meal_id, "meal deleted");
    Ok(())
}

/// Counts plus the best streak, recomputed over the full history.
///
/// Not guarded against a concurrent resume or edit for the same user; the
/// last writer of the stored best wins.
pub async fn resume(st: &AppState, user_id: Uuid) -> ApiResult<ResumeResponse> {
    let meals = st.meals.list_by_user(user_id).await?;
    let stored_best = st
        .users
        .best_in_diet_meal_sequence(user_id)
        .await?
        .unwrap_or(0);

    let (resume, improved) = summarize(&meals, stored_best);
    if improved {
        st.users
            .set_best_in_diet_meal_sequence(user_id, resume.best_in_diet_meal_sequence)
            .await?;
        info!(%user_id, best = resume.best_in_diet_meal_sequence, "best streak improved");
    }
    Ok(resume)
}

/// Builds the resume from meals already in id order. The flag tells whether
/// the best streak must be persisted.
pub fn summarize(meals: &[Meal], stored_best: i32) -> (ResumeResponse, bool) {
    let all_meals = meals.len();
    let in_diet_meals = meals.iter().filter(|m| m.is_in_diet).count();
    let scan = scan_best_streak(meals.iter().map(|m| m.is_in_diet), stored_best);

    let resume = ResumeResponse {
        all_meals,
        in_diet_meals,
        not_in_diet_meals: all_meals - in_diet_meals,
        best_in_diet_meal_sequence: scan.best,
        diet_percentage: diet_percentage(in_diet_meals, all_meals),
    };
    (resume, scan.improved)
}

/// Any edit may break the recorded run, so the stored best goes back to 0 and
/// the next resume recomputes it.
async fn reset_best_streak(st: &AppState, user_id: Uuid) -> anyhow::Result<()> {
    st.users.set_best_in_diet_meal_sequence(user_id, 0).await?;
    debug!(%user_id, "best streak reset");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, time};

    fn meals(flags: &[bool]) -> Vec<Meal> {
        flags
            .iter()
            .enumerate()
            .map(|(i, &is_in_diet)| Meal {
                id: i as i64 + 1,
                user_id: Uuid::nil(),
                name: format!("meal {}", i + 1),
                description: String::new(),
                date: date!(2023 - 01 - 01),
                hour: time!(12:00),
                is_in_diet,
            })
            .collect()
    }

    #[test]
    fn summarize_counts_and_streak() {
        let history = meals(&[true, true, false, true, true, true, false]);
        let (resume, improved) = summarize(&history, 0);
        assert!(improved);
        assert_eq!(
            resume,
            ResumeResponse {
                all_meals: 7,
                in_diet_meals: 5,
                not_in_diet_meals: 2,
                best_in_diet_meal_sequence: 3,
                diet_percentage: 71.43,
            }
        );
    }

    #[test]
    fn summarize_with_no_meals() {
        let (resume, improved) = summarize(&[], 0);
        assert!(!improved);
        assert_eq!(resume.all_meals, 0);
        assert_eq!(resume.best_in_diet_meal_sequence, 0);
        assert_eq!(resume.diet_percentage, 0.0);
    }

    #[test]
    fn summarize_keeps_a_higher_stored_best() {
        let (resume, improved) = summarize(&meals(&[true, false]), 4);
        assert!(!improved);
        assert_eq!(resume.best_in_diet_meal_sequence, 4);
    }
}
