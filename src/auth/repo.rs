use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::repo_types::{NewUser, User};

/// User persistence, including the stored best in-diet streak.
#[async_trait]
pub trait UserRepo: Send + Sync {
    /// Insert a user. Returns `None` when the email is already taken.
    async fn create(&self, user: NewUser) -> anyhow::Result<Option<User>>;

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;

    /// Stored best streak, `None` if the user does not exist.
    async fn best_in_diet_meal_sequence(&self, id: Uuid) -> anyhow::Result<Option<i32>>;

    async fn set_best_in_diet_meal_sequence(&self, id: Uuid, value: i32) -> anyhow::Result<()>;
}

#[async_trait]
impl UserRepo for PgPool {
    async fn create(&self, user: NewUser) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, name)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO NOTHING
            RETURNING id, email, password_hash, name, best_in_diet_meal_sequence, created_at
            "#,
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.name)
        .fetch_optional(self)
        .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, name, best_in_diet_meal_sequence, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self)
        .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, name, best_in_diet_meal_sequence, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self)
        .await?;
        Ok(user)
    }

    async fn best_in_diet_meal_sequence(&self, id: Uuid) -> anyhow::Result<Option<i32>> {
        let best = sqlx::query_scalar::<_, i32>(
            r#"SELECT best_in_diet_meal_sequence FROM users WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(self)
        .await?;
        Ok(best)
    }

    async fn set_best_in_diet_meal_sequence(&self, id: Uuid, value: i32) -> anyhow::Result<()> {
        sqlx::query(r#"UPDATE users SET best_in_diet_meal_sequence = $2 WHERE id = $1"#)
            .bind(id)
            .bind(value)
            .execute(self)
            .await?;
        Ok(())
    }
}
