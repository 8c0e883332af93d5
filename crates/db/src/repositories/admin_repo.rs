//! Repositories for `admin_users` and `password_resets`.

use portfolio_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::admin::{AdminUser, CreateAdminUser, PasswordReset, UpdateProfile};

/// Column list for `admin_users` queries.
const COLUMNS: &str = "\
    id, full_name, email, password_hash, role, profile_image, is_active, \
    last_login, created_at, updated_at";

const RESET_COLUMNS: &str = "id, admin_id, token_hash, expires_at, used, created_at";

// ---------------------------------------------------------------------------
// Admin users
// ---------------------------------------------------------------------------

/// Provides data access for admin accounts.
pub struct AdminRepo;

impl AdminRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<AdminUser>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admin_users WHERE id = $1");
        sqlx::query_as::<_, AdminUser>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Case-insensitive lookup by email.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<AdminUser>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admin_users WHERE LOWER(email) = LOWER($1)");
        sqlx::query_as::<_, AdminUser>(&query)
            .bind(email.trim())
            .fetch_optional(pool)
            .await
    }

    /// Insert an account. Duplicate emails fail with `uq_admin_users_email`.
    pub async fn create(pool: &PgPool, input: &CreateAdminUser) -> Result<AdminUser, sqlx::Error> {
        let query = format!(
            "INSERT INTO admin_users (full_name, email, password_hash, role) \
             VALUES ($1, LOWER($2), $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdminUser>(&query)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    pub async fn record_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE admin_users SET last_login = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    pub async fn update_password(pool: &PgPool, id: DbId, password_hash: &str) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE admin_users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(pool)
            .await?;
        Ok(())
    }

    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<AdminUser>, sqlx::Error> {
        let query = format!(
            "UPDATE admin_users SET \
                 full_name = COALESCE(NULLIF(BTRIM($2), ''), full_name), \
                 profile_image = NULLIF(BTRIM(COALESCE($3, profile_image)), '') \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdminUser>(&query)
            .bind(id)
            .bind(&input.full_name)
            .bind(&input.profile_image)
            .fetch_optional(pool)
            .await
    }
}

// ---------------------------------------------------------------------------
// Password resets
// ---------------------------------------------------------------------------

/// Single-use reset tokens, stored as SHA-256 hex digests.
pub struct PasswordResetRepo;

impl PasswordResetRepo {
    /// Invalidate outstanding tokens and store a new one, atomically.
    pub async fn replace_for_admin(
        pool: &PgPool,
        admin_id: DbId,
        token_hash: &str,
        expires_at: Timestamp,
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("UPDATE password_resets SET used = TRUE WHERE admin_id = $1 AND used = FALSE")
            .bind(admin_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query(
            "INSERT INTO password_resets (admin_id, token_hash, expires_at) VALUES ($1, $2, $3)",
        )
        .bind(admin_id)
        .bind(token_hash)
        .bind(expires_at)
        .execute(&mut *tx)
        .await?;
        tx.commit().await
    }

    /// Find an unused, unexpired token by hash.
    pub async fn find_valid(pool: &PgPool, token_hash: &str) -> Result<Option<PasswordReset>, sqlx::Error> {
        let query = format!(
            "SELECT {RESET_COLUMNS} FROM password_resets \
             WHERE token_hash = $1 AND used = FALSE AND expires_at > NOW()"
        );
        sqlx::query_as::<_, PasswordReset>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }

    /// Set the new password and burn the token in one transaction. Returns
    /// `false` if the token was consumed concurrently.
    pub async fn consume(
        pool: &PgPool,
        reset_id: DbId,
        admin_id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let burned = sqlx::query("UPDATE password_resets SET used = TRUE WHERE id = $1 AND used = FALSE")
            .bind(reset_id)
            .execute(&mut *tx)
            .await?;
        if burned.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }
        sqlx::query("UPDATE admin_users SET password_hash = $2 WHERE id = $1")
            .bind(admin_id)
            .bind(password_hash)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(true)
    }
}
