// SPDX-License-Identifier: MIT

//! SQLite client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (attributes and derived nutrition fields)
//! - Credentials (username + bcrypt hash)
//! - Exercise and food log entries
//!
//! Registration and attribute updates run inside a single transaction so
//! both tables change together or not at all.

use crate::error::AppError;
use crate::models::{
    Credential, ExerciseEntry, FoodEntry, NewExercise, NewFood, NutritionFacts, User,
    UserAttributes,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;

/// SQLite database client.
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Open (and create if missing) the database, then run migrations.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::Database(format!("Invalid database URL: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to open database: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Get a reference to the pool for advanced operations (tests, shutdown).
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Create tables if they do not exist yet.
    async fn migrate(&self) -> Result<(), AppError> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                gender TEXT NOT NULL CHECK (gender IN ('male', 'female')),
                age INTEGER NOT NULL,
                height INTEGER NOT NULL,
                weight INTEGER NOT NULL,
                bmi TEXT NOT NULL,
                calories TEXT NOT NULL,
                carbs TEXT NOT NULL,
                fiber TEXT NOT NULL,
                protein TEXT NOT NULL,
                fat TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(migration_error)?;

        // Username uniqueness lives here, not in application code, so two
        // concurrent registrations cannot both slip past a read-then-write
        // check.
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS credentials (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                user_id INTEGER NOT NULL REFERENCES users(id)
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(migration_error)?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS exercises (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                time INTEGER NOT NULL,
                calories INTEGER NOT NULL,
                user_id INTEGER NOT NULL REFERENCES users(id)
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(migration_error)?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS foods (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                calories INTEGER NOT NULL,
                count INTEGER NOT NULL,
                unit TEXT NOT NULL,
                user_id INTEGER NOT NULL REFERENCES users(id)
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(migration_error)?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_exercises_user_id ON exercises(user_id)")
            .execute(&self.pool)
            .await
            .map_err(migration_error)?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_foods_user_id ON foods(user_id)")
            .execute(&self.pool)
            .await
            .map_err(migration_error)?;

        Ok(())
    }

    // ─── Credentials ─────────────────────────────────────────────

    pub async fn find_credential_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Credential>, AppError> {
        sqlx::query_as::<_, Credential>(
            "SELECT id, username, password_hash, user_id FROM credentials WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Credential lookup failed: {e}")))
    }

    /// Create a default user row and its credential as one atomic unit.
    ///
    /// Returns the new user id. Errors are surfaced as raw `sqlx::Error` so
    /// the caller can distinguish a unique-constraint violation (username
    /// race) from other failures.
    pub async fn create_user_with_credential(
        &self,
        attrs: &UserAttributes,
        facts: &NutritionFacts,
        username: &str,
        password_hash: &str,
    ) -> Result<i64, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let user_id = sqlx::query(
            r"
            INSERT INTO users (gender, age, height, weight, bmi, calories, carbs, fiber, protein, fat)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(attrs.gender)
        .bind(attrs.age)
        .bind(attrs.height)
        .bind(attrs.weight)
        .bind(&facts.bmi)
        .bind(&facts.calories)
        .bind(&facts.carbs)
        .bind(&facts.fiber)
        .bind(&facts.protein)
        .bind(&facts.fat)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        sqlx::query("INSERT INTO credentials (username, password_hash, user_id) VALUES (?, ?, ?)")
            .bind(username)
            .bind(password_hash)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(user_id)
    }

    // ─── Users ───────────────────────────────────────────────────

    pub async fn get_user(&self, user_id: i64) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            r"
            SELECT id, gender, age, height, weight, bmi, calories, carbs, fiber, protein, fat
            FROM users WHERE id = ?
            ",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("User lookup failed: {e}")))
    }

    /// Persist new attributes together with the derived nutrition fields.
    /// Both updates commit together or roll back together.
    pub async fn update_user_attributes(
        &self,
        user_id: i64,
        attrs: &UserAttributes,
        facts: &NutritionFacts,
    ) -> Result<(), AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {e}")))?;

        sqlx::query("UPDATE users SET gender = ?, age = ?, height = ?, weight = ? WHERE id = ?")
            .bind(attrs.gender)
            .bind(attrs.age)
            .bind(attrs.height)
            .bind(attrs.weight)
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::Database(format!("Attribute update failed: {e}")))?;

        sqlx::query(
            r"
            UPDATE users SET bmi = ?, calories = ?, carbs = ?, fiber = ?, protein = ?, fat = ?
            WHERE id = ?
            ",
        )
        .bind(&facts.bmi)
        .bind(&facts.calories)
        .bind(&facts.carbs)
        .bind(&facts.fiber)
        .bind(&facts.protein)
        .bind(&facts.fat)
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::Database(format!("Nutrition update failed: {e}")))?;

        tx.commit()
            .await
            .map_err(|e| AppError::Database(format!("Failed to commit attribute update: {e}")))
    }

    // ─── Exercise / food entries ─────────────────────────────────

    pub async fn insert_exercise(
        &self,
        user_id: i64,
        entry: &NewExercise,
    ) -> Result<i64, AppError> {
        let result =
            sqlx::query("INSERT INTO exercises (name, time, calories, user_id) VALUES (?, ?, ?, ?)")
                .bind(&entry.name)
                .bind(entry.time)
                .bind(entry.calories)
                .bind(user_id)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::Database(format!("Exercise insert failed: {e}")))?;
        Ok(result.last_insert_rowid())
    }

    pub async fn insert_food(&self, user_id: i64, entry: &NewFood) -> Result<i64, AppError> {
        let result = sqlx::query(
            "INSERT INTO foods (name, calories, count, unit, user_id) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&entry.name)
        .bind(entry.calories)
        .bind(entry.count)
        .bind(&entry.unit)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Food insert failed: {e}")))?;
        Ok(result.last_insert_rowid())
    }

    pub async fn list_exercises_for_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<ExerciseEntry>, AppError> {
        sqlx::query_as::<_, ExerciseEntry>(
            "SELECT id, name, time, calories, user_id FROM exercises WHERE user_id = ? ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Exercise listing failed: {e}")))
    }

    pub async fn list_foods_for_user(&self, user_id: i64) -> Result<Vec<FoodEntry>, AppError> {
        sqlx::query_as::<_, FoodEntry>(
            "SELECT id, name, calories, count, unit, user_id FROM foods WHERE user_id = ? ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Food listing failed: {e}")))
    }
}

fn migration_error(e: sqlx::Error) -> AppError {
    AppError::Database(format!("Migration failed: {e}"))
}

/// True if the error is a UNIQUE constraint violation.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}
