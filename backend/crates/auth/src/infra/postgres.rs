//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::page::{Page, PageParams};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    confirmation_code::ConfirmationCode, email::Email, user_id::UserId, user_role::UserRole,
    username::Username,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const USER_COLUMNS: &str = r#"
    user_id,
    username,
    email,
    role,
    first_name,
    last_name,
    bio,
    confirmation_code,
    code_issued_at,
    created_at,
    updated_at
"#;

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                username,
                email,
                role,
                first_name,
                last_name,
                bio,
                confirmation_code,
                code_issued_at,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(user.role.code())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.bio)
        .bind(user.confirmation_code.as_ref().map(|c| c.secret()))
        .bind(user.confirmation_code.as_ref().map(|c| c.issued_at()))
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_username(&self, username: &Username) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE users SET
                username = $2,
                email = $3,
                role = $4,
                first_name = $5,
                last_name = $6,
                bio = $7,
                confirmation_code = $8,
                code_issued_at = $9,
                updated_at = $10
            WHERE user_id = $1
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(user.role.code())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.bio)
        .bind(user.confirmation_code.as_ref().map(|c| c.secret()))
        .bind(user.confirmation_code.as_ref().map(|c| c.issued_at()))
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_by_username(&self, username: &Username) -> AuthResult<bool> {
        let deleted = sqlx::query("DELETE FROM users WHERE username = $1")
            .bind(username.as_str())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn list(&self, search: Option<&str>, page: &PageParams) -> AuthResult<Page<User>> {
        let pattern = search.map(|s| format!("%{s}%"));

        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM users WHERE ($1::text IS NULL OR username ILIKE $1)",
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            SELECT {USER_COLUMNS} FROM users
            WHERE ($1::text IS NULL OR username ILIKE $1)
            ORDER BY username
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(&pattern)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await?;

        let results = rows
            .into_iter()
            .map(|r| r.into_user())
            .collect::<AuthResult<Vec<_>>>()?;

        Ok(Page {
            count: count as u64,
            results,
        })
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    username: String,
    email: String,
    role: String,
    first_name: Option<String>,
    last_name: Option<String>,
    bio: Option<String>,
    confirmation_code: Option<String>,
    code_issued_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let role = UserRole::from_code(&self.role)
            .ok_or_else(|| AuthError::Internal(format!("Invalid role '{}'", self.role)))?;

        let confirmation_code = match (self.confirmation_code, self.code_issued_at) {
            (Some(secret), Some(issued_at)) => Some(ConfirmationCode::from_db(secret, issued_at)),
            (None, None) => None,
            _ => {
                return Err(AuthError::Internal(
                    "Confirmation code and issued_at must be set together".to_string(),
                ));
            }
        };

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            username: Username::from_db(self.username),
            email: Email::from_db(self.email),
            role,
            first_name: self.first_name,
            last_name: self.last_name,
            bio: self.bio,
            confirmation_code,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
