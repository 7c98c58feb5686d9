use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::meals::repo_types::{Meal, MealInput};

/// Meal persistence. Every query is scoped to the owning user.
#[async_trait]
pub trait MealRepo: Send + Sync {
    /// All of the user's meals, ordered by id ascending (logged order).
    async fn list_by_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Meal>>;

    async fn get(&self, user_id: Uuid, meal_id: i64) -> anyhow::Result<Option<Meal>>;

    async fn create(&self, user_id: Uuid, input: MealInput) -> anyhow::Result<Meal>;

    /// Full replacement. `None` when no meal matched.
    async fn update(
        &self,
        user_id: Uuid,
        meal_id: i64,
        input: MealInput,
    ) -> anyhow::Result<Option<Meal>>;

    /// Rows deleted (0 or 1).
    async fn delete(&self, user_id: Uuid, meal_id: i64) -> anyhow::Result<u64>;
}

#[async_trait]
impl MealRepo for PgPool {
    async fn list_by_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Meal>> {
        let rows = sqlx::query_as::<_, Meal>(
            r#"
            SELECT id, user_id, name, description, date, hour, is_in_diet
            FROM meals
            WHERE user_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(self)
        .await?;
        Ok(rows)
    }

    async fn get(&self, user_id: Uuid, meal_id: i64) -> anyhow::Result<Option<Meal>> {
        let meal = sqlx::query_as::<_, Meal>(
            r#"
            SELECT id, user_id, name, description, date, hour, is_in_diet
            FROM meals
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(meal_id)
        .bind(user_id)
        .fetch_optional(self)
        .await?;
        Ok(meal)
    }

    async fn create(&self, user_id: Uuid, input: MealInput) -> anyhow::Result<Meal> {
        let meal = sqlx::query_as::<_, Meal>(
            r#"
            INSERT INTO meals (user_id, name, description, date, hour, is_in_diet)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, name, description, date, hour, is_in_diet
            "#,
        )
        .bind(user_id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.date)
        .bind(input.hour)
        .bind(input.is_in_diet)
        .fetch_one(self)
        .await?;
        Ok(meal)
    }

    async fn update(
        &self,
        user_id: Uuid,
        meal_id: i64,
        input: MealInput,
    ) -> anyhow::Result<Option<Meal>> {
        let meal = sqlx::query_as::<_, Meal>(
            r#"
            UPDATE meals
               SET name = $3, description = $4, date = $5, hour = $6, is_in_diet = $7
             WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, name, description, date, hour, is_in_diet
            "#,
        )
        .bind(meal_id)
        .bind(user_id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.date)
        .bind(input.hour)
        .bind(input.is_in_diet)
        .fetch_optional(self)
        .await?;
        Ok(meal)
    }

    async fn delete(&self, user_id: Uuid, meal_id: i64) -> anyhow::Result<u64> {
        let result = sqlx::query(r#"DELETE FROM meals WHERE id = $1 AND user_id = $2"#)
            .bind(meal_id)
            .bind(user_id)
            .execute(self)
            .await?;
        Ok(result.rows_affected())
    }
}
