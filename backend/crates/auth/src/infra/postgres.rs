//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use kernel::role::Role;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::user::{PendingOtp, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    department_set::DepartmentSet, display_name::DisplayName, email::Email, otp_code::OtpCode,
    user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

/// Unique index guarding `users.email`
const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

const USER_COLUMNS: &str = r#"
    user_id,
    name,
    email,
    password_hash,
    role,
    departments,
    is_verified,
    otp,
    otp_expires_at,
    last_otp_sent_at,
    created_at,
    updated_at
"#;

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let (otp, otp_expires_at) = split_otp(user.pending_otp.as_ref());

        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                name,
                email,
                password_hash,
                role,
                departments,
                is_verified,
                otp,
                otp_expires_at,
                last_otp_sent_at,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.name.as_str())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(user.role.code())
        .bind(user.departments.slugs())
        .bind(user.is_verified)
        .bind(otp)
        .bind(otp_expires_at)
        .bind(user.last_otp_sent_at)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let (otp, otp_expires_at) = split_otp(user.pending_otp.as_ref());

        let result = sqlx::query(
            r#"
            UPDATE users SET
                name = $2,
                password_hash = $3,
                departments = $4,
                is_verified = $5,
                otp = $6,
                otp_expires_at = $7,
                last_otp_sent_at = $8,
                updated_at = $9
            WHERE user_id = $1
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.name.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(user.departments.slugs())
        .bind(user.is_verified)
        .bind(otp)
        .bind(otp_expires_at)
        .bind(user.last_otp_sent_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AuthError::UserNotFound);
        }

        Ok(())
    }

    async fn delete(&self, user_id: &UserId) -> AuthResult<()> {
        sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

fn split_otp(pending: Option<&PendingOtp>) -> (Option<&str>, Option<DateTime<Utc>>) {
    match pending {
        Some(otp) => (Some(otp.code.as_str()), Some(otp.expires_at)),
        None => (None, None),
    }
}

fn map_unique_violation(e: sqlx::Error) -> AuthError {
    if let sqlx::Error::Database(db) = &e
        && db.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT)
    {
        return AuthError::EmailTaken;
    }
    AuthError::Database(e)
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    role: String,
    departments: Vec<String>,
    is_verified: bool,
    otp: Option<String>,
    otp_expires_at: Option<DateTime<Utc>>,
    last_otp_sent_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let role: Role = self
            .role
            .parse()
            .map_err(|_| AuthError::Internal(format!("Invalid role: {}", self.role)))?;

        let password_hash = UserPassword::from_phc_string(self.password_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password hash: {}", e)))?;

        let pending_otp = match (self.otp, self.otp_expires_at) {
            (Some(code), Some(expires_at)) => Some(PendingOtp {
                code: OtpCode::from_db(code),
                expires_at,
            }),
            _ => None,
        };

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            name: DisplayName::from_db(self.name),
            email: Email::from_db(self.email),
            password_hash,
            role,
            departments: DepartmentSet::from_slugs(self.departments),
            is_verified: self.is_verified,
            pending_otp,
            last_otp_sent_at: self.last_otp_sent_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
