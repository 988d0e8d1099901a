//! PostgreSQL user repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::user::{NewUser, User, UserId, UserRepository, UserStatus};
use crate::domain::DomainError;

/// PostgreSQL implementation of UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the users table if it does not exist yet
    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                user_id BIGSERIAL PRIMARY KEY,
                user_name VARCHAR(50) NOT NULL UNIQUE,
                first_name VARCHAR(255) NOT NULL,
                last_name VARCHAR(255) NOT NULL,
                email VARCHAR(255) NOT NULL,
                user_status VARCHAR(1) NOT NULL,
                department VARCHAR(255)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create users table: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT user_id, user_name, first_name, last_name, email, user_status, department
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get user: {}", e)))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT user_id, user_name, first_name, last_name, email, user_status, department
            FROM users
            WHERE user_name = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get user by username: {}", e)))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT user_id, user_name, first_name, last_name, email, user_status, department
            FROM users
            ORDER BY user_id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list users: {}", e)))?;

        rows.iter().map(row_to_user).collect()
    }

    async fn create(&self, user: &NewUser) -> Result<UserId, DomainError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (user_name, first_name, last_name, email, user_status, department)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING user_id
            "#,
        )
        .bind(&user.username)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(user.status.code())
        .bind(user.department.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(&e, WriteKind::Insert, &user.username))?;

        Ok(UserId::new(id))
    }

    async fn update(&self, user: &User) -> Result<UserId, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET user_name = $2, first_name = $3, last_name = $4, email = $5,
                user_status = $6, department = $7
            WHERE user_id = $1
            "#,
        )
        .bind(user.id().value())
        .bind(user.username())
        .bind(user.first_name())
        .bind(user.last_name())
        .bind(user.email())
        .bind(user.status().code())
        .bind(user.department())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(&e, WriteKind::Update, user.username()))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "User '{}' not found",
                user.id()
            )));
        }

        Ok(user.id())
    }

    async fn delete(&self, id: UserId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete user: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Database unreachable: {}", e)))?;

        Ok(())
    }
}

/// SQLSTATE raised by the `user_name` UNIQUE constraint
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriteKind {
    Insert,
    Update,
}

fn sqlstate(err: &sqlx::Error) -> Option<String> {
    err.as_database_error()
        .and_then(|db| db.code())
        .map(|code| code.into_owned())
}

fn map_write_error(err: &sqlx::Error, kind: WriteKind, username: &str) -> DomainError {
    classify_write_error(sqlstate(err).as_deref(), kind, username, &err.to_string())
}

fn classify_write_error(
    sqlstate: Option<&str>,
    kind: WriteKind,
    username: &str,
    detail: &str,
) -> DomainError {
    match (sqlstate, kind) {
        (Some(UNIQUE_VIOLATION), WriteKind::Insert) => DomainError::already_exists(username),
        (Some(UNIQUE_VIOLATION), WriteKind::Update) => DomainError::username_collision(username),
        (_, WriteKind::Insert) => {
            DomainError::storage(format!("Failed to create user: {}", detail))
        }
        (_, WriteKind::Update) => {
            DomainError::storage(format!("Failed to update user: {}", detail))
        }
    }
}

fn decode_status(code: &str, id: i64) -> Result<UserStatus, DomainError> {
    UserStatus::from_code(code).ok_or_else(|| {
        DomainError::storage(format!(
            "Invalid status '{}' in database for user {}",
            code, id
        ))
    })
}

fn row_to_user(row: &sqlx::postgres::PgRow) -> Result<User, DomainError> {
    let column = |e: sqlx::Error| DomainError::storage(format!("Failed to read user row: {}", e));

    let id: i64 = row.try_get("user_id").map_err(column)?;
    let status: String = row.try_get("user_status").map_err(column)?;

    let status = decode_status(&status, id)?;

    let profile = NewUser {
        username: row.try_get("user_name").map_err(column)?,
        first_name: row.try_get("first_name").map_err(column)?,
        last_name: row.try_get("last_name").map_err(column)?,
        email: row.try_get("email").map_err(column)?,
        status,
        department: row.try_get("department").map_err(column)?,
    };

    Ok(User::new(UserId::new(id), profile))
}
