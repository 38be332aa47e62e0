//! Profile repository: persistence and lookups for user profiles.
//!
//! Uses SqlitePoolManager and the profile models (ProfileRecord, ProfileUpdate).
//! External: SQLite via sqlx; callers go through the [`ProfileStore`] trait.

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use crate::error::StorageError;
use crate::models::{ProfileRecord, ProfileUpdate};
use crate::repository::ProfileStore;
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct ProfileRepository {
    pool_manager: SqlitePoolManager,
}

impl ProfileRepository {
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), sqlx::Error> {
        info!("Creating database tables if not exist");

        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS profiles (
                chat_id INTEGER PRIMARY KEY,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                email TEXT NOT NULL,
                age INTEGER,
                school TEXT,
                preferences TEXT,
                bio TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl ProfileStore for ProfileRepository {
    async fn find_by_chat_id(&self, chat_id: i64) -> Result<Option<ProfileRecord>, StorageError> {
        let pool = self.pool_manager.pool();

        let profile = sqlx::query_as::<_, ProfileRecord>("SELECT * FROM profiles WHERE chat_id = ?")
            .bind(chat_id)
            .fetch_optional(pool)
            .await
            .map_err(|e| StorageError::Database(e.to_string()))?;

        Ok(profile)
    }

    async fn create(&self, profile: &ProfileRecord) -> Result<(), StorageError> {
        let pool = self.pool_manager.pool();

        let result = sqlx::query(
            r#"
            INSERT INTO profiles (chat_id, first_name, last_name, email, age, school, preferences, bio, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(profile.chat_id)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(&profile.email)
        .bind(profile.age)
        .bind(&profile.school)
        .bind(&profile.preferences)
        .bind(&profile.bio)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(pool)
        .await;

        match result {
            Ok(_) => {
                info!(chat_id = profile.chat_id, "Profile created");
                Ok(())
            }
            Err(e) if e
                .as_database_error()
                .is_some_and(|db| db.is_unique_violation()) =>
            {
                Err(StorageError::AlreadyExists(format!(
                    "profile for chat {}",
                    profile.chat_id
                )))
            }
            Err(e) => Err(StorageError::Database(e.to_string())),
        }
    }

    async fn update_field(&self, chat_id: i64, update: ProfileUpdate) -> Result<(), StorageError> {
        let pool = self.pool_manager.pool();

        // column() values come from a fixed enum, never from user input
        let sql = format!(
            "UPDATE profiles SET {} = ?, updated_at = ? WHERE chat_id = ?",
            update.column()
        );

        let query = sqlx::query(&sql);
        let query = match &update {
            ProfileUpdate::Age(v) => query.bind(*v),
            ProfileUpdate::FirstName(v)
            | ProfileUpdate::LastName(v)
            | ProfileUpdate::Email(v)
            | ProfileUpdate::School(v)
            | ProfileUpdate::Preferences(v)
            | ProfileUpdate::Bio(v) => query.bind(v.as_str()),
        };

        let result = query
            .bind(Utc::now())
            .bind(chat_id)
            .execute(pool)
            .await
            .map_err(|e| StorageError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(format!(
                "no profile for chat {}",
                chat_id
            )));
        }

        info!(chat_id, column = update.column(), "Profile field updated");
        Ok(())
    }
}
