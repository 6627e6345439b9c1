use async_trait::async_trait;
use sqlx::PgPool;

use tatkal_core::repository::{RepoError, UserRepository};
use tatkal_core::user::{NewUser, Role, User};

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    full_name: String,
    email: String,
    password_hash: String,
    phone_number: String,
    role: String,
}

impl UserRow {
    fn into_user(self) -> Result<User, RepoError> {
        let role: Role = self.role.parse()?;
        Ok(User {
            id: self.id,
            username: self.username,
            full_name: self.full_name,
            email: self.email,
            password_hash: self.password_hash,
            phone_number: self.phone_number,
            role,
        })
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn insert(&self, user: NewUser) -> Result<User, RepoError> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO users (username, full_name, email, password_hash, phone_number, role) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
        )
        .bind(&user.username)
        .bind(&user.full_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.phone_number)
        .bind(user.role.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(User {
            id,
            username: user.username,
            full_name: user.full_name,
            email: user.email,
            password_hash: user.password_hash,
            phone_number: user.phone_number,
            role: user.role,
        })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, username, full_name, email, password_hash, phone_number, role \
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn email_exists(&self, email: &str) -> Result<bool, RepoError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn username_exists(&self, username: &str) -> Result<bool, RepoError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }
}
