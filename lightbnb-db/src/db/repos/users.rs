//! User repository
//!
//! Lookup by email or id, and signup:
//! - create: INSERT ... RETURNING, duplicate email surfaces as Conflict

use sqlx::PgPool;

use crate::error::{DbError, Result};
use crate::models::{NewUser, User};

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a single user by email.
    pub async fn get_by_email(&self, email: &str) -> Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "user",
            id: email.to_owned(),
        })
    }

    /// Get a single user by id.
    pub async fn get_by_id(&self, id: i32) -> Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "user",
            id: id.to_string(),
        })
    }

    /// Insert a user and return the stored row.
    pub async fn create(&self, user: NewUser) -> Result<User> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password
            "#,
        )
        .bind(&user.name)
        .bind(user.email.as_str())
        .bind(&user.password)
        .fetch_one(self.pool)
        .await?;

        tracing::info!(user_id = created.id, "created user");
        Ok(created)
    }
}
