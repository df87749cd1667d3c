use marquee_domain::{EngineError, User};
use sqlx::PgPool;
use uuid::Uuid;

/// Identity is verified upstream; the engine only resolves userIds.
pub struct UserRepository;

impl UserRepository {
    pub async fn create_user(
        pool: &PgPool,
        username: &str,
        password_hash: &str,
        is_admin: bool,
    ) -> Result<User, EngineError> {
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO users (id, username, password_hash, is_admin) VALUES ($1, $2, $3, $4)",
        )
        .bind(id)
        .bind(username)
        .bind(password_hash)
        .bind(is_admin)
        .execute(pool)
        .await?;

        Self::get_user(pool, id).await
    }

    pub async fn get_user(pool: &PgPool, id: Uuid) -> Result<User, EngineError> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, is_admin, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| EngineError::not_found("user", id))
    }
}
