//! In-memory repositories backing `AppState::fake`.

use std::sync::Mutex;

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    auth::{
        repo::UserRepo,
        repo_types::{NewUser, User},
    },
    meals::{
        repo::MealRepo,
        repo_types::{Meal, MealInput},
    },
};

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    meals: Vec<Meal>,
    next_meal_id: i64,
}

impl MemoryStore {
    fn with<R>(&self, f: impl FnOnce(&mut Inner) -> R) -> R {
        let mut inner = self.inner.lock().expect("memory store poisoned");
        f(&mut inner)
    }
}

#[async_trait]
impl UserRepo for MemoryStore {
    async fn create(&self, user: NewUser) -> anyhow::Result<Option<User>> {
        Ok(self.with(|s| {
            if s.users.iter().any(|u| u.email == user.email) {
                return None;
            }
            let user = User {
                id: Uuid::new_v4(),
                email: user.email,
                password_hash: user.password_hash,
                name: user.name,
                best_in_diet_meal_sequence: 0,
                created_at: OffsetDateTime::now_utc(),
            };
            s.users.push(user.clone());
            Some(user)
        }))
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        Ok(self.with(|s| s.users.iter().find(|u| u.email == email).cloned()))
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        Ok(self.with(|s| s.users.iter().find(|u| u.id == id).cloned()))
    }

    async fn best_in_diet_meal_sequence(&self, id: Uuid) -> anyhow::Result<Option<i32>> {
        Ok(self.with(|s| {
            s.users
                .iter()
                .find(|u| u.id == id)
                .map(|u| u.best_in_diet_meal_sequence)
        }))
    }

    async fn set_best_in_diet_meal_sequence(&self, id: Uuid, value: i32) -> anyhow::Result<()> {
        self.with(|s| {
            if let Some(u) = s.users.iter_mut().find(|u| u.id == id) {
                u.best_in_diet_meal_sequence = value;
            }
        });
        Ok(())
    }
}

#[async_trait]
impl MealRepo for MemoryStore {
    async fn list_by_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Meal>> {
        Ok(self.with(|s| {
            let mut meals: Vec<Meal> = s
                .meals
                .iter()
                .filter(|m| m.user_id == user_id)
                .cloned()
                .collect();
            meals.sort_by_key(|m| m.id);
            meals
        }))
    }

    async fn get(&self, user_id: Uuid, meal_id: i64) -> anyhow::Result<Option<Meal>> {
        Ok(self.with(|s| {
            s.meals
                .iter()
                .find(|m| m.id == meal_id && m.user_id == user_id)
                .cloned()
        }))
    }

    async fn create(&self, user_id: Uuid, input: MealInput) -> anyhow::Result<Meal> {
        self.with(|s| {
            anyhow::ensure!(
                s.users.iter().any(|u| u.id == user_id),
                "meals.user_id references a missing user"
            );
            s.next_meal_id += 1;
            let meal = Meal {
                id: s.next_meal_id,
                user_id,
                name: input.name,
                description: input.description,
                date: input.date,
                hour: input.hour,
                is_in_diet: input.is_in_diet,
            };
            s.meals.push(meal.clone());
            Ok(meal)
        })
    }

    async fn update(
        &self,
        user_id: Uuid,
        meal_id: i64,
        input: MealInput,
    ) -> anyhow::Result<Option<Meal>> {
        Ok(self.with(|s| {
            let meal = s
                .meals
                .iter_mut()
                .find(|m| m.id == meal_id && m.user_id == user_id)?;
            meal.name = input.name;
            meal.description = input.description;
            meal.date = input.date;
            meal.hour = input.hour;
            meal.is_in_diet = input.is_in_diet;
            Some(meal.clone())
        }))
    }

    async fn delete(&self, user_id: Uuid, meal_id: i64) -> anyhow::Result<u64> {
        Ok(self.with(|s| {
            let before = s.meals.len();
            s.meals.retain(|m| !(m.id == meal_id && m.user_id == user_id));
            (before - s.meals.len()) as u64
        }))
    }
}
