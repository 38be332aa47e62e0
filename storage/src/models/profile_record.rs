//! Profile record model for persistence.
//!
//! Maps to the `profiles` table and is used by ProfileRepository. Keyed by the
//! Telegram chat id; at most one profile per chat.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProfileRecord {
    pub chat_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: Option<i64>,
    pub school: Option<String>,
    pub preferences: Option<String>,
    pub bio: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProfileRecord {
    /// Creates a new record stamped with the current time.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        chat_id: i64,
        first_name: String,
        last_name: String,
        email: String,
        age: Option<i64>,
        school: Option<String>,
        preferences: Option<String>,
        bio: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            chat_id,
            first_name,
            last_name,
            email,
            age,
            school,
            preferences,
            bio,
            created_at: now,
            updated_at: now,
        }
    }
}
