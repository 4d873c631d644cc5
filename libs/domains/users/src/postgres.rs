use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, DbErr, FromQueryResult, Statement};
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{Profile, Token, User};
use crate::repository::{TokenRepository, UserRepository};

const USERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id UUID PRIMARY KEY,
        email VARCHAR(254) NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        phone_number VARCHAR(20),
        street_address VARCHAR(255),
        city VARCHAR(100),
        state_province VARCHAR(100),
        postal_code VARCHAR(20),
        country VARCHAR(100),
        date_joined TIMESTAMPTZ NOT NULL
    )
"#;

const TOKENS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS auth_tokens (
        key VARCHAR(40) PRIMARY KEY,
        user_id UUID NOT NULL UNIQUE REFERENCES users (id) ON DELETE CASCADE,
        created TIMESTAMPTZ NOT NULL
    )
"#;

/// Creates the `users` and `auth_tokens` tables when missing.
pub async fn init_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    db.execute_unprepared(USERS_TABLE).await?;
    db.execute_unprepared(TOKENS_TABLE).await?;
    Ok(())
}

fn db_error(e: DbErr) -> UserError {
    UserError::Database(e.to_string())
}

/// PostgreSQL implementation of UserRepository using SeaORM
#[derive(Clone)]
pub struct PostgresUserRepository {
    db: DatabaseConnection,
}

impl PostgresUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    phone_number: Option<String>,
    street_address: Option<String>,
    city: Option<String>,
    state_province: Option<String>,
    postal_code: Option<String>,
    country: Option<String>,
    date_joined: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            profile: Profile {
                phone_number: row.phone_number,
                street_address: row.street_address,
                city: row.city,
                state_province: row.state_province,
                postal_code: row.postal_code,
                country: row.country,
            },
            date_joined: row.date_joined,
        }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> UserResult<User> {
        let sql = r#"
            INSERT INTO users (id, email, password_hash, phone_number, street_address,
                               city, state_province, postal_code, country, date_joined)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
        "#;

        let profile = user.profile.clone();
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                user.id.into(),
                user.email.clone().into(),
                user.password_hash.clone().into(),
                profile.phone_number.into(),
                profile.street_address.into(),
                profile.city.into(),
                profile.state_province.into(),
                profile.postal_code.into(),
                profile.country.into(),
                user.date_joined.into(),
            ],
        );

        let row = UserRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(|e| {
                let err_str = e.to_string();
                if err_str.contains("duplicate key") || err_str.contains("unique constraint") {
                    UserError::DuplicateEmail(user.email.clone())
                } else {
                    db_error(e)
                }
            })?
            .ok_or_else(|| UserError::Internal("Failed to create user".to_string()))?;

        tracing::info!(user_id = %row.id, "Created user");
        Ok(row.into())
    }

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT * FROM users WHERE id = $1",
            [id.into()],
        );

        let row = UserRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(row.map(Into::into))
    }

    async fn get_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT * FROM users WHERE email = $1",
            [email.into()],
        );

        let row = UserRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(row.map(Into::into))
    }
}

/// PostgreSQL implementation of TokenRepository
#[derive(Clone)]
pub struct PostgresTokenRepository {
    db: DatabaseConnection,
}

impl PostgresTokenRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct TokenRow {
    key: String,
    user_id: Uuid,
    created: DateTime<Utc>,
}

impl From<TokenRow> for Token {
    fn from(row: TokenRow) -> Self {
        Token {
            key: row.key,
            user_id: row.user_id,
            created: row.created,
        }
    }
}

#[async_trait]
impl TokenRepository for PostgresTokenRepository {
    async fn get_or_create(&self, user_id: Uuid, candidate_key: String) -> UserResult<Token> {
        // The UNIQUE constraint on user_id settles concurrent first logins;
        // the loser's insert is a no-op and both read the winner's row.
        let insert = Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"
                INSERT INTO auth_tokens (key, user_id, created)
                VALUES ($1, $2, $3)
                ON CONFLICT (user_id) DO NOTHING
            "#,
            [candidate_key.into(), user_id.into(), Utc::now().into()],
        );
        let inserted = self.db.execute_raw(insert).await.map_err(db_error)?;
        if inserted.rows_affected() > 0 {
            tracing::info!(user_id = %user_id, "Issued token");
        }

        let select = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT key, user_id, created FROM auth_tokens WHERE user_id = $1",
            [user_id.into()],
        );

        TokenRow::find_by_statement(select)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .map(Into::into)
            .ok_or_else(|| UserError::Internal("Token vanished after insert".to_string()))
    }

    async fn get_by_key(&self, key: &str) -> UserResult<Option<Token>> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT key, user_id, created FROM auth_tokens WHERE key = $1",
            [key.into()],
        );

        let row = TokenRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        Ok(row.map(Into::into))
    }

    async fn delete_for_user(&self, user_id: Uuid) -> UserResult<bool> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "DELETE FROM auth_tokens WHERE user_id = $1",
            [user_id.into()],
        );

        let result = self.db.execute_raw(stmt).await.map_err(db_error)?;
        let removed = result.rows_affected() > 0;
        if removed {
            tracing::info!(user_id = %user_id, "Revoked token");
        }
        Ok(removed)
    }
}
