//! Integration tests for the update sub-flow: field choice routing, chained
//! multi-field edits, validation self-loops, the missing-profile notice, and
//! store failures.

use std::sync::Arc;

use conversation::{prompts, ConversationState, Dispatcher};
use storage::{ProfileRecord, ProfileRepository, ProfileStore, ProfileUpdate, StorageError};

async fn setup_with_profile(chat_id: i64) -> (Dispatcher, Arc<ProfileRepository>) {
    let repo = Arc::new(
        ProfileRepository::new("sqlite::memory:")
            .await
            .expect("Failed to create repository"),
    );
    repo.create(&ProfileRecord::new(
        chat_id,
        "Jane".to_string(),
        "Doe".to_string(),
        "jane@example.com".to_string(),
        Some(19),
        Some("Lincoln High".to_string()),
        Some("Affordable mentorship".to_string()),
        "Hi there.".to_string(),
    ))
    .await
    .expect("Failed to seed profile");
    (Dispatcher::new(repo.clone()), repo)
}

/// **Test: `/update` presents the field menu and enters the choice state.**
#[tokio::test]
async fn test_update_entry_shows_menu() {
    let (dispatcher, _repo) = setup_with_profile(1).await;

    let replies = dispatcher.dispatch(1, "/update").await;
    assert_eq!(
        replies,
        vec![prompts::UPDATE_MENU.to_string(), prompts::COMMAND_LIST.to_string()]
    );
    assert_eq!(
        dispatcher.current_state(1).await,
        Some(ConversationState::AwaitingUpdateChoice)
    );
}

/// **Test: several fields can be edited in one session, then "done" ends it.**
///
/// **Setup:** Seeded profile; `/update`.
/// **Action:** Edit email, then age, then type "done".
/// **Expected:** Each edit confirms and returns to the choice state; "done"
/// replies with the goodbye; both new values are persisted.
#[tokio::test]
async fn test_chained_multi_field_edits() {
    let (dispatcher, repo) = setup_with_profile(2).await;

    dispatcher.dispatch(2, "/update").await;

    assert_eq!(
        dispatcher.dispatch(2, "email").await,
        vec![prompts::ask_new_value("email")]
    );
    assert_eq!(
        dispatcher.dispatch(2, "new@mail.org").await,
        vec![prompts::EMAIL_UPDATED.to_string()]
    );
    assert_eq!(
        dispatcher.current_state(2).await,
        Some(ConversationState::AwaitingUpdateChoice)
    );

    assert_eq!(
        dispatcher.dispatch(2, "age").await,
        vec![prompts::ask_new_value("age")]
    );
    assert_eq!(
        dispatcher.dispatch(2, "22").await,
        vec![prompts::AGE_UPDATED.to_string()]
    );

    assert_eq!(
        dispatcher.dispatch(2, "done").await,
        vec![prompts::UPDATE_DONE.to_string()]
    );
    assert_eq!(dispatcher.current_state(2).await, None);

    let profile = repo.find_by_chat_id(2).await.unwrap().unwrap();
    assert_eq!(profile.email, "new@mail.org");
    assert_eq!(profile.age, Some(22));
    // untouched fields stay put
    assert_eq!(profile.first_name, "Jane");
}

/// **Test: updating the first name twice leaves the second value.**
///
/// **Setup:** Seeded profile; `/update`.
/// **Action:** Edit first name to "anna", then again to "maria".
/// **Expected:** After each single update the state is the choice menu; the
/// stored first name equals the second value, title-cased.
#[tokio::test]
async fn test_update_first_name_twice_keeps_last_value() {
    let (dispatcher, repo) = setup_with_profile(3).await;

    dispatcher.dispatch(3, "/update").await;

    dispatcher.dispatch(3, "first name").await;
    assert_eq!(
        dispatcher.dispatch(3, "anna").await,
        vec![prompts::FIRST_NAME_UPDATED.to_string()]
    );
    assert_eq!(
        dispatcher.current_state(3).await,
        Some(ConversationState::AwaitingUpdateChoice)
    );

    dispatcher.dispatch(3, "first name").await;
    assert_eq!(
        dispatcher.dispatch(3, "maria").await,
        vec![prompts::FIRST_NAME_UPDATED.to_string()]
    );
    assert_eq!(
        dispatcher.current_state(3).await,
        Some(ConversationState::AwaitingUpdateChoice)
    );

    let profile = repo.find_by_chat_id(3).await.unwrap().unwrap();
    assert_eq!(profile.first_name, "Maria");
}

/// **Test: the field choice is case-insensitive.**
#[tokio::test]
async fn test_update_choice_is_case_insensitive() {
    let (dispatcher, _repo) = setup_with_profile(4).await;

    dispatcher.dispatch(4, "/update").await;
    assert_eq!(
        dispatcher.dispatch(4, "First Name").await,
        vec![prompts::ask_new_value("first name")]
    );
    assert_eq!(
        dispatcher.current_state(4).await,
        Some(ConversationState::AwaitingUpdateFirstName)
    );
}

/// **Test: an unknown field choice re-prompts and stays in the choice state.**
#[tokio::test]
async fn test_unknown_choice_reprompts() {
    let (dispatcher, _repo) = setup_with_profile(5).await;

    dispatcher.dispatch(5, "/update").await;
    assert_eq!(
        dispatcher.dispatch(5, "shoe size").await,
        vec![prompts::UPDATE_CHOICE_INVALID.to_string()]
    );
    assert_eq!(
        dispatcher.current_state(5).await,
        Some(ConversationState::AwaitingUpdateChoice)
    );
}

/// **Test: an invalid email self-loops in the update-email state.**
#[tokio::test]
async fn test_update_email_validation_self_loops() {
    let (dispatcher, repo) = setup_with_profile(6).await;

    dispatcher.dispatch(6, "/update").await;
    dispatcher.dispatch(6, "email").await;

    assert_eq!(
        dispatcher.dispatch(6, "nope").await,
        vec![prompts::UPDATE_INVALID_EMAIL.to_string()]
    );
    assert_eq!(
        dispatcher.current_state(6).await,
        Some(ConversationState::AwaitingUpdateEmail)
    );

    assert_eq!(
        dispatcher.dispatch(6, "ok@mail.co").await,
        vec![prompts::EMAIL_UPDATED.to_string()]
    );
    let profile = repo.find_by_chat_id(6).await.unwrap().unwrap();
    assert_eq!(profile.email, "ok@mail.co");
}

/// **Test: preference update re-shows the menu and validates the number.**
///
/// **Setup:** Seeded profile; `/update`.
/// **Action:** Choose "preferences", answer "9", then "2".
/// **Expected:** The choice reply includes the re-displayed menu; "9"
/// self-loops; "2" stores "Help with SAT / ACT preparation".
#[tokio::test]
async fn test_update_preferences_menu_and_validation() {
    let (dispatcher, repo) = setup_with_profile(7).await;

    dispatcher.dispatch(7, "/update").await;
    assert_eq!(
        dispatcher.dispatch(7, "preferences").await,
        vec![
            prompts::preference_update_menu(),
            prompts::ask_new_value("preferences")
        ]
    );

    assert_eq!(
        dispatcher.dispatch(7, "9").await,
        vec![prompts::INVALID_PREFERENCE.to_string()]
    );
    assert_eq!(
        dispatcher.current_state(7).await,
        Some(ConversationState::AwaitingUpdatePreferences)
    );

    assert_eq!(
        dispatcher.dispatch(7, "2").await,
        vec![prompts::preferences_updated("Help with SAT / ACT preparation")]
    );

    let profile = repo.find_by_chat_id(7).await.unwrap().unwrap();
    assert_eq!(
        profile.preferences.as_deref(),
        Some("Help with SAT / ACT preparation")
    );
}

/// **Test: updating with no stored profile is a soft notice, not a failure.**
///
/// **Setup:** Empty store (no seeded profile).
/// **Action:** `/update`, choose "bio", send a new bio.
/// **Expected:** The no-user notice, and the session stays in the choice state
/// so the user can keep going.
#[tokio::test]
async fn test_update_without_profile_is_lenient() {
    let repo = Arc::new(
        ProfileRepository::new("sqlite::memory:")
            .await
            .expect("Failed to create repository"),
    );
    let dispatcher = Dispatcher::new(repo.clone());

    dispatcher.dispatch(8, "/update").await;
    dispatcher.dispatch(8, "bio").await;

    assert_eq!(
        dispatcher.dispatch(8, "a new bio").await,
        vec![prompts::NO_PROFILE.to_string()]
    );
    assert_eq!(
        dispatcher.current_state(8).await,
        Some(ConversationState::AwaitingUpdateChoice)
    );
}

/// Store stub whose writes always fail, for exercising the error paths.
struct FailingStore;

#[async_trait::async_trait]
impl ProfileStore for FailingStore {
    async fn find_by_chat_id(&self, _chat_id: i64) -> Result<Option<ProfileRecord>, StorageError> {
        Ok(None)
    }

    async fn create(&self, _profile: &ProfileRecord) -> Result<(), StorageError> {
        Err(StorageError::Database("disk unavailable".to_string()))
    }

    async fn update_field(&self, _chat_id: i64, _update: ProfileUpdate) -> Result<(), StorageError> {
        Err(StorageError::Database("disk unavailable".to_string()))
    }
}

/// **Test: a failing update reports the field-specific error and returns to
/// the choice state.**
#[tokio::test]
async fn test_update_failure_returns_to_choice() {
    let dispatcher = Dispatcher::new(Arc::new(FailingStore));

    dispatcher.dispatch(9, "/update").await;
    dispatcher.dispatch(9, "school").await;

    assert_eq!(
        dispatcher.dispatch(9, "MIT").await,
        vec![prompts::SCHOOL_UPDATE_FAILED.to_string()]
    );
    assert_eq!(
        dispatcher.current_state(9).await,
        Some(ConversationState::AwaitingUpdateChoice)
    );
}

/// **Test: `/cancel` aborts the update session.**
#[tokio::test]
async fn test_cancel_from_update_choice() {
    let (dispatcher, _repo) = setup_with_profile(10).await;

    dispatcher.dispatch(10, "/update").await;
    assert_eq!(
        dispatcher.dispatch(10, "/cancel").await,
        vec![prompts::CANCELLED.to_string(), prompts::COMMAND_LIST.to_string()]
    );
    assert_eq!(dispatcher.current_state(10).await, None);
}
