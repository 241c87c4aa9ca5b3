use serde_json::{Map, Value};
use sqlx::PgPool;

use super::{is_unique_violation, log_query, ServiceError};
use crate::auth::password::{hash_password, verify_password};
use crate::database::models::{NewUser, User, UserRecord};
use crate::database::query_builder::{bind_all_as, sql_for_partial_update, ColumnWhitelist};

pub const USER_COLUMNS: ColumnWhitelist<'static> = ColumnWhitelist::new(&[
    ("firstName", "first_name"),
    ("lastName", "last_name"),
    ("isAdmin", "is_admin"),
]);

const USER_FIELDS: &str = "username, first_name, last_name, email, is_admin";

/// Accounts, credentials and password hashing.
pub struct UserService {
    pool: PgPool,
    bcrypt_cost: u32,
    log_queries: bool,
}

impl UserService {
    pub fn new(pool: PgPool, bcrypt_cost: u32) -> Self {
        Self { pool, bcrypt_cost, log_queries: false }
    }

    pub fn with_query_logging(mut self, enabled: bool) -> Self {
        self.log_queries = enabled;
        self
    }

    /// Check a username/password pair. Unknown users and wrong passwords are
    /// indistinguishable to the caller.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, ServiceError> {
        let record = sqlx::query_as::<_, UserRecord>(
            "SELECT username, password, first_name, last_name, email, is_admin FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        let Some(record) = record else {
            tracing::debug!("Login attempt for unknown user {}", username);
            return Err(ServiceError::InvalidCredentials);
        };

        if verify_password(password.to_string(), record.password.clone()).await? {
            Ok(record.into())
        } else {
            tracing::debug!("Wrong password for {}", username);
            Err(ServiceError::InvalidCredentials)
        }
    }

    /// Create an account with a freshly hashed password.
    pub async fn register(&self, data: &NewUser) -> Result<User, ServiceError> {
        let existing = sqlx::query_scalar::<_, String>("SELECT username FROM users WHERE username = $1")
            .bind(&data.username)
            .fetch_optional(&self.pool)
            .await?;

        if existing.is_some() {
            return Err(ServiceError::Duplicate(format!("Duplicate username: {}", data.username)));
        }

        let hashed = hash_password(data.password.clone(), self.bcrypt_cost).await?;

        let sql = format!(
            "INSERT INTO users (username, password, first_name, last_name, email, is_admin) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            USER_FIELDS
        );

        sqlx::query_as::<_, User>(&sql)
            .bind(&data.username)
            .bind(hashed)
            .bind(&data.first_name)
            .bind(&data.last_name)
            .bind(&data.email)
            .bind(data.is_admin)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    ServiceError::Duplicate(format!("Duplicate username: {}", data.username))
                } else {
                    e.into()
                }
            })
    }

    pub async fn find_all(&self) -> Result<Vec<User>, ServiceError> {
        let sql = format!("SELECT {} FROM users ORDER BY username", USER_FIELDS);
        Ok(sqlx::query_as::<_, User>(&sql).fetch_all(&self.pool).await?)
    }

    pub async fn get(&self, username: &str) -> Result<User, ServiceError> {
        let sql = format!("SELECT {} FROM users WHERE username = $1", USER_FIELDS);
        sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("No user: {}", username)))
    }

    /// Partial update. A `password` entry is replaced by its hash in place, so
    /// the remaining keys keep their order.
    pub async fn update(&self, username: &str, mut data: Map<String, Value>) -> Result<User, ServiceError> {
        if let Some(Value::String(plain)) = data.get("password").cloned() {
            let hashed = hash_password(plain, self.bcrypt_cost).await?;
            data.insert("password".to_string(), Value::String(hashed));
        }

        let set = sql_for_partial_update(&data, &USER_COLUMNS)?;
        let sql = format!(
            "UPDATE users SET {} WHERE username = {} RETURNING {}",
            set.query,
            set.next_placeholder(),
            USER_FIELDS
        );
        // Never log the hash
        log_query(self.log_queries, &sql, &[]);

        bind_all_as(sqlx::query_as::<_, User>(&sql), &set.params)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("No user: {}", username)))
    }

    pub async fn remove(&self, username: &str) -> Result<(), ServiceError> {
        sqlx::query_scalar::<_, String>("DELETE FROM users WHERE username = $1 RETURNING username")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("No user: {}", username)))?;
        Ok(())
    }
}
