//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use database::SqlHandle;
use kernel::id::{AdminId, AdminSessionId, UserId, UserSessionId};
use platform::password::HashedPassword;
use uuid::Uuid;

use crate::domain::entity::{
    admin::Admin, admin_session::AdminSession, timestamps::Timestamps, user::User,
    user_session::UserSession,
};
use crate::domain::repository::{
    AdminRepository, AdminSessionRepository, TransactionScope, UserRepository,
    UserSessionRepository,
};
use crate::domain::value_object::{email_address::EmailAddress, session_token::SessionToken};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed repository
///
/// Pool-backed when built with [`PgRepository::new`]; the `Tx` handed out by
/// [`TransactionScope::begin`] is the same type bound to one transaction.
#[derive(Debug, Clone)]
pub struct PgRepository {
    sql: SqlHandle,
}

impl PgRepository {
    pub fn new(sql: SqlHandle) -> Self {
        Self { sql }
    }
}

/// Unique violations become `Conflict`; everything else stays a database error
fn write_error(err: sqlx::Error) -> AuthError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let constraint = db_err.constraint().unwrap_or("unique").to_string();
            return AuthError::Conflict(constraint);
        }
    }
    AuthError::Database(err)
}

fn parse_digest(digest: String) -> AuthResult<HashedPassword> {
    HashedPassword::from_phc_string(digest)
        .map_err(|e| AuthError::Internal(format!("Invalid password digest: {}", e)))
}

// ============================================================================
// Transaction Scope
// ============================================================================

impl TransactionScope for PgRepository {
    type Tx = PgRepository;

    async fn begin(&self) -> AuthResult<PgRepository> {
        Ok(PgRepository {
            sql: self.sql.begin().await?,
        })
    }

    async fn commit(&self, tx: PgRepository) -> AuthResult<()> {
        tx.sql.commit().await?;
        Ok(())
    }

    async fn rollback(&self, tx: PgRepository) -> AuthResult<()> {
        tx.sql.rollback().await?;
        Ok(())
    }
}

// ============================================================================
// Admin Repository Implementation
// ============================================================================

impl AdminRepository for PgRepository {
    async fn find_by_id(&self, id: AdminId) -> AuthResult<Option<Admin>> {
        let mut conn = self.sql.acquire().await?;
        let row = sqlx::query_as::<_, PrincipalRow>(
            r#"
            SELECT id, name, email_address, password_digest, created_at, updated_at
            FROM admins
            WHERE id = $1
            "#,
        )
        .bind(id.into_uuid())
        .fetch_optional(&mut *conn)
        .await?;

        row.map(PrincipalRow::into_admin).transpose()
    }

    async fn find_by_email_address(
        &self,
        email_address: &EmailAddress,
    ) -> AuthResult<Option<Admin>> {
        let mut conn = self.sql.acquire().await?;
        let row = sqlx::query_as::<_, PrincipalRow>(
            r#"
            SELECT id, name, email_address, password_digest, created_at, updated_at
            FROM admins
            WHERE email_address = $1
            "#,
        )
        .bind(email_address.as_str())
        .fetch_optional(&mut *conn)
        .await?;

        row.map(PrincipalRow::into_admin).transpose()
    }

    async fn exists_by_email_address(&self, email_address: &EmailAddress) -> AuthResult<bool> {
        let mut conn = self.sql.acquire().await?;
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM admins WHERE email_address = $1)")
                .bind(email_address.as_str())
                .fetch_one(&mut *conn)
                .await?;

        Ok(exists)
    }

    async fn create(&self, admin: &Admin) -> AuthResult<()> {
        let mut conn = self.sql.acquire().await?;
        sqlx::query(
            r#"
            INSERT INTO admins (id, name, email_address, password_digest, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(admin.id.into_uuid())
        .bind(&admin.name)
        .bind(admin.email_address.as_str())
        .bind(admin.password.as_phc_string())
        .bind(admin.timestamps.created_at)
        .bind(admin.timestamps.updated_at)
        .execute(&mut *conn)
        .await
        .map_err(write_error)?;

        Ok(())
    }

    async fn update(&self, admin: &mut Admin) -> AuthResult<()> {
        admin.timestamps.before_update();

        let mut conn = self.sql.acquire().await?;
        sqlx::query(
            r#"
            UPDATE admins
            SET name = $2, email_address = $3, password_digest = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(admin.id.into_uuid())
        .bind(&admin.name)
        .bind(admin.email_address.as_str())
        .bind(admin.password.as_phc_string())
        .bind(admin.timestamps.updated_at)
        .execute(&mut *conn)
        .await
        .map_err(write_error)?;

        Ok(())
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgRepository {
    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>> {
        let mut conn = self.sql.acquire().await?;
        let row = sqlx::query_as::<_, PrincipalRow>(
            r#"
            SELECT id, name, email_address, password_digest, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.into_uuid())
        .fetch_optional(&mut *conn)
        .await?;

        row.map(PrincipalRow::into_user).transpose()
    }

    async fn find_by_email_address(
        &self,
        email_address: &EmailAddress,
    ) -> AuthResult<Option<User>> {
        let mut conn = self.sql.acquire().await?;
        let row = sqlx::query_as::<_, PrincipalRow>(
            r#"
            SELECT id, name, email_address, password_digest, created_at, updated_at
            FROM users
            WHERE email_address = $1
            "#,
        )
        .bind(email_address.as_str())
        .fetch_optional(&mut *conn)
        .await?;

        row.map(PrincipalRow::into_user).transpose()
    }

    async fn exists_by_email_address(&self, email_address: &EmailAddress) -> AuthResult<bool> {
        let mut conn = self.sql.acquire().await?;
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email_address = $1)")
                .bind(email_address.as_str())
                .fetch_one(&mut *conn)
                .await?;

        Ok(exists)
    }

    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut conn = self.sql.acquire().await?;
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email_address, password_digest, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id.into_uuid())
        .bind(&user.name)
        .bind(user.email_address.as_str())
        .bind(user.password.as_phc_string())
        .bind(user.timestamps.created_at)
        .bind(user.timestamps.updated_at)
        .execute(&mut *conn)
        .await
        .map_err(write_error)?;

        Ok(())
    }

    async fn update(&self, user: &mut User) -> AuthResult<()> {
        user.timestamps.before_update();

        let mut conn = self.sql.acquire().await?;
        sqlx::query(
            r#"
            UPDATE users
            SET name = $2, email_address = $3, password_digest = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(user.id.into_uuid())
        .bind(&user.name)
        .bind(user.email_address.as_str())
        .bind(user.password.as_phc_string())
        .bind(user.timestamps.updated_at)
        .execute(&mut *conn)
        .await
        .map_err(write_error)?;

        Ok(())
    }
}

// ============================================================================
// Session Repository Implementations
// ============================================================================

impl AdminSessionRepository for PgRepository {
    async fn find_by_token(&self, token: &SessionToken) -> AuthResult<Option<AdminSession>> {
        let mut conn = self.sql.acquire().await?;
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT id, admin_id AS owner_id, token, ip_address, user_agent, created_at, updated_at
            FROM admin_sessions
            WHERE token = $1
            "#,
        )
        .bind(token.as_str())
        .fetch_optional(&mut *conn)
        .await?;

        Ok(row.map(SessionRow::into_admin_session))
    }

    async fn create(&self, session: &AdminSession) -> AuthResult<()> {
        let mut conn = self.sql.acquire().await?;
        sqlx::query(
            r#"
            INSERT INTO admin_sessions
                (id, admin_id, token, ip_address, user_agent, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(session.id.into_uuid())
        .bind(session.admin_id.into_uuid())
        .bind(session.token.as_str())
        .bind(&session.ip_address)
        .bind(&session.user_agent)
        .bind(session.timestamps.created_at)
        .bind(session.timestamps.updated_at)
        .execute(&mut *conn)
        .await
        .map_err(write_error)?;

        Ok(())
    }

    async fn delete_by_token(&self, token: &SessionToken) -> AuthResult<bool> {
        let mut conn = self.sql.acquire().await?;
        let deleted = sqlx::query("DELETE FROM admin_sessions WHERE token = $1")
            .bind(token.as_str())
            .execute(&mut *conn)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

impl UserSessionRepository for PgRepository {
    async fn find_by_token(&self, token: &SessionToken) -> AuthResult<Option<UserSession>> {
        let mut conn = self.sql.acquire().await?;
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT id, user_id AS owner_id, token, ip_address, user_agent, created_at, updated_at
            FROM user_sessions
            WHERE token = $1
            "#,
        )
        .bind(token.as_str())
        .fetch_optional(&mut *conn)
        .await?;

        Ok(row.map(SessionRow::into_user_session))
    }

    async fn create(&self, session: &UserSession) -> AuthResult<()> {
        let mut conn = self.sql.acquire().await?;
        sqlx::query(
            r#"
            INSERT INTO user_sessions
                (id, user_id, token, ip_address, user_agent, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(session.id.into_uuid())
        .bind(session.user_id.into_uuid())
        .bind(session.token.as_str())
        .bind(&session.ip_address)
        .bind(&session.user_agent)
        .bind(session.timestamps.created_at)
        .bind(session.timestamps.updated_at)
        .execute(&mut *conn)
        .await
        .map_err(write_error)?;

        Ok(())
    }

    async fn delete_by_token(&self, token: &SessionToken) -> AuthResult<bool> {
        let mut conn = self.sql.acquire().await?;
        let deleted = sqlx::query("DELETE FROM user_sessions WHERE token = $1")
            .bind(token.as_str())
            .execute(&mut *conn)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Row Types
// ============================================================================

/// `admins` and `users` share one shape
#[derive(sqlx::FromRow)]
struct PrincipalRow {
    id: Uuid,
    name: String,
    email_address: String,
    password_digest: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PrincipalRow {
    fn timestamps(&self) -> Timestamps {
        Timestamps {
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    fn into_admin(self) -> AuthResult<Admin> {
        let timestamps = self.timestamps();
        Ok(Admin {
            id: AdminId::from_uuid(self.id),
            name: self.name,
            email_address: EmailAddress::from_db(self.email_address),
            password: parse_digest(self.password_digest)?,
            timestamps,
        })
    }

    fn into_user(self) -> AuthResult<User> {
        let timestamps = self.timestamps();
        Ok(User {
            id: UserId::from_uuid(self.id),
            name: self.name,
            email_address: EmailAddress::from_db(self.email_address),
            password: parse_digest(self.password_digest)?,
            timestamps,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    id: Uuid,
    owner_id: Uuid,
    token: String,
    ip_address: String,
    user_agent: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SessionRow {
    fn timestamps(&self) -> Timestamps {
        Timestamps {
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    fn into_admin_session(self) -> AdminSession {
        let timestamps = self.timestamps();
        AdminSession {
            id: AdminSessionId::from_uuid(self.id),
            admin_id: AdminId::from_uuid(self.owner_id),
            token: SessionToken::from_string(self.token),
            ip_address: self.ip_address,
            user_agent: self.user_agent,
            timestamps,
        }
    }

    fn into_user_session(self) -> UserSession {
        let timestamps = self.timestamps();
        UserSession {
            id: UserSessionId::from_uuid(self.id),
            user_id: UserId::from_uuid(self.owner_id),
            token: SessionToken::from_string(self.token),
            ip_address: self.ip_address,
            user_agent: self.user_agent,
            timestamps,
        }
    }
}
