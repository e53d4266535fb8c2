// SPDX-License-Identifier: MIT

//! Authentication service: login and registration.
//!
//! Login failures always surface the same message whether the username or
//! the password was wrong, so callers cannot enumerate accounts.
//! Registration creates the user row and the credential row inside one
//! transaction; the database-level unique constraint on usernames is the
//! authority on duplicates, the up-front lookup only exists for a
//! friendlier error on the common path.

use crate::db::sqlite::is_unique_violation;
use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::{NutritionFacts, UserAttributes};

const INCORRECT_CREDENTIALS: &str = "Incorrect credentials.";
const USERNAME_TAKEN: &str = "Username already taken.";
const REGISTRATION_FAILED: &str = "Registration failed. Please try again.";

#[derive(Clone)]
pub struct AuthService {
    db: Database,
}

impl AuthService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Verify credentials and return the owning user id.
    pub async fn login(&self, username: &str, password: &str) -> Result<i64> {
        let credential = self
            .db
            .find_credential_by_username(username)
            .await?
            .ok_or(AppError::Unauthorized(INCORRECT_CREDENTIALS))?;

        // bcrypt::verify is constant-time on the hash comparison. A
        // malformed stored hash is treated as a mismatch rather than an
        // internal error so the response stays indistinguishable.
        let matches = bcrypt::verify(password, &credential.password_hash).unwrap_or(false);
        if !matches {
            return Err(AppError::Unauthorized(INCORRECT_CREDENTIALS));
        }

        Ok(credential.user_id)
    }

    /// Create a default user record and its credential atomically,
    /// returning the new user id.
    pub async fn register(&self, username: &str, password: &str) -> Result<i64> {
        if self
            .db
            .find_credential_by_username(username)
            .await?
            .is_some()
        {
            return Err(AppError::BadRequest(USERNAME_TAKEN.to_string()));
        }

        let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(|e| {
            tracing::error!(error = %e, "Password hashing failed during registration");
            AppError::Unavailable(REGISTRATION_FAILED)
        })?;

        let attrs = UserAttributes::registration_default();
        let facts = NutritionFacts::registration_default(&attrs);

        match self
            .db
            .create_user_with_credential(&attrs, &facts, username, &password_hash)
            .await
        {
            Ok(user_id) => {
                tracing::info!(user_id, "User registered");
                Ok(user_id)
            }
            // Concurrent registration lost the race against the unique
            // constraint; report it like the up-front check would have.
            Err(e) if is_unique_violation(&e) => {
                Err(AppError::BadRequest(USERNAME_TAKEN.to_string()))
            }
            Err(e) => {
                tracing::error!(error = %e, "Registration transaction failed");
                Err(AppError::Unavailable(REGISTRATION_FAILED))
            }
        }
    }
}
