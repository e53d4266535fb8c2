//! Stored login credential, linked one-to-one to a user.

/// Credential row. The password is stored as a bcrypt hash and the
/// username is unique at the database level. Deliberately not
/// serializable: the hash must never end up in a response body.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Credential {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub user_id: i64,
}
