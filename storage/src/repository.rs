use async_trait::async_trait;

use crate::error::StorageError;
use crate::models::{ProfileRecord, ProfileUpdate};

/// Narrow store interface for profiles: lookup, one-time create, one-field update.
///
/// The conversation runtime only ever needs these three operations; no deletion
/// path exists.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn find_by_chat_id(&self, chat_id: i64) -> Result<Option<ProfileRecord>, StorageError>;
    async fn create(&self, profile: &ProfileRecord) -> Result<(), StorageError>;
    async fn update_field(&self, chat_id: i64, update: ProfileUpdate) -> Result<(), StorageError>;
}
