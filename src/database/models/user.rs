use serde::Serialize;

/// Full row from the `register` table. Carries the bcrypt hash, so it is
/// never serialized to a client.
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub password: String, // bcrypt hash
    pub created_at: String,
}

/// Client-safe projection of a [`User`]: the password field is deliberately
/// excluded.
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub user_id: i64,
    pub username: String,
    pub email: String,
}

impl From<&User> for PublicUser {
    fn from(u: &User) -> Self {
        PublicUser {
            user_id: u.user_id,
            username: u.username.clone(),
            email: u.email.clone(),
        }
    }
}
