//! Per-state handlers for the registration and update flows.
//!
//! Each handler consumes one user answer and returns a [`Step`]: the replies to
//! send plus the next state (or terminal). Validation failures self-loop in the
//! same state; store failures are reported to the user and never escape the
//! conversation runtime.

use storage::{ProfileRecord, ProfileStore, ProfileUpdate, StorageError};
use tracing::{error, warn};

use crate::prompts;
use crate::session::{Preference, SessionContext};
use crate::state::{ConversationState, Step};
use crate::text::title_case;
use crate::validators::{is_valid_age, is_valid_email};

/// Entry `/start`: show an existing profile, or begin the collection flow.
pub(crate) async fn start(store: &dyn ProfileStore, chat_id: i64) -> Step {
    match store.find_by_chat_id(chat_id).await {
        Ok(Some(profile)) => Step::end(vec![prompts::welcome_back(&profile)]),
        Ok(None) => Step::to(
            ConversationState::AwaitingFirstName,
            vec![prompts::COMMAND_LIST.to_string(), prompts::WELCOME.to_string()],
        ),
        Err(e) => {
            error!(chat_id, error = %e, "Profile lookup failed on /start");
            Step::end(vec![prompts::STORE_UNAVAILABLE.to_string()])
        }
    }
}

/// Entry `/update`: present the updatable-field menu.
pub(crate) fn update_entry() -> Step {
    Step::to(
        ConversationState::AwaitingUpdateChoice,
        vec![
            prompts::UPDATE_MENU.to_string(),
            prompts::COMMAND_LIST.to_string(),
        ],
    )
}

/// Fallback `/cancel`: abort whatever is in progress.
pub(crate) fn cancel() -> Step {
    Step::end(vec![
        prompts::CANCELLED.to_string(),
        prompts::COMMAND_LIST.to_string(),
    ])
}

pub(crate) fn first_name(ctx: &mut SessionContext, text: &str) -> Step {
    ctx.first_name = Some(title_case(text));
    Step::to(
        ConversationState::AwaitingLastName,
        vec![prompts::ASK_LAST_NAME.to_string()],
    )
}

pub(crate) fn last_name(ctx: &mut SessionContext, text: &str) -> Step {
    ctx.last_name = Some(title_case(text));
    Step::to(
        ConversationState::AwaitingEmail,
        vec![prompts::ASK_EMAIL.to_string()],
    )
}

pub(crate) fn email(ctx: &mut SessionContext, text: &str) -> Step {
    if is_valid_email(text) {
        ctx.email = Some(text.to_string());
        Step::to(
            ConversationState::AwaitingAge,
            vec![prompts::ASK_AGE.to_string()],
        )
    } else {
        Step::to(
            ConversationState::AwaitingEmail,
            vec![prompts::INVALID_EMAIL.to_string()],
        )
    }
}

pub(crate) fn age(ctx: &mut SessionContext, text: &str) -> Step {
    // digit strings beyond i64 range are re-asked like any invalid answer
    if is_valid_age(text) {
        if let Ok(age) = text.parse::<i64>() {
            ctx.age = Some(age);
            return Step::to(
                ConversationState::AwaitingSchool,
                vec![prompts::ASK_SCHOOL.to_string()],
            );
        }
    }
    Step::to(
        ConversationState::AwaitingAge,
        vec![prompts::INVALID_AGE.to_string()],
    )
}

pub(crate) fn school(ctx: &mut SessionContext, text: &str) -> Step {
    ctx.school = Some(text.to_string());
    Step::to(
        ConversationState::AwaitingPreference,
        vec![prompts::PREFERENCE_MENU.to_string()],
    )
}

pub(crate) fn preference(ctx: &mut SessionContext, text: &str) -> Step {
    match Preference::from_choice(text) {
        Some(p) => {
            ctx.preference = Some(p);
            Step::to(
                ConversationState::AwaitingBio,
                vec![prompts::preference_accepted(p.label())],
            )
        }
        None => Step::to(
            ConversationState::AwaitingPreference,
            vec![prompts::INVALID_PREFERENCE.to_string()],
        ),
    }
}

/// Final collection step: the bio answer completes the profile and persists it.
/// Terminal regardless of the persistence outcome.
pub(crate) async fn bio(
    store: &dyn ProfileStore,
    chat_id: i64,
    ctx: &SessionContext,
    text: &str,
) -> Step {
    let profile = ProfileRecord::new(
        chat_id,
        ctx.first_name.clone().unwrap_or_default(),
        ctx.last_name.clone().unwrap_or_default(),
        ctx.email.clone().unwrap_or_default(),
        ctx.age,
        ctx.school.clone(),
        ctx.preference.map(|p| p.label().to_string()),
        text.to_string(),
    );

    match store.create(&profile).await {
        Ok(()) => Step::end(vec![prompts::PROFILE_SAVED.to_string()]),
        Err(e) => {
            error!(chat_id, error = %e, "Failed to save profile");
            Step::end(vec![prompts::PROFILE_SAVE_FAILED.to_string()])
        }
    }
}

/// Field selector for the update sub-flow: routing, prompts, and the texts
/// that differ per field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UpdateField {
    FirstName,
    LastName,
    Email,
    Age,
    School,
    Preferences,
    Bio,
}

impl UpdateField {
    /// Case-insensitive field name as typed in the update menu.
    fn from_choice(choice: &str) -> Option<Self> {
        match choice {
            "first name" => Some(UpdateField::FirstName),
            "last name" => Some(UpdateField::LastName),
            "email" => Some(UpdateField::Email),
            "age" => Some(UpdateField::Age),
            "school" => Some(UpdateField::School),
            "preferences" => Some(UpdateField::Preferences),
            "bio" => Some(UpdateField::Bio),
            _ => None,
        }
    }

    fn state(&self) -> ConversationState {
        match self {
            UpdateField::FirstName => ConversationState::AwaitingUpdateFirstName,
            UpdateField::LastName => ConversationState::AwaitingUpdateLastName,
            UpdateField::Email => ConversationState::AwaitingUpdateEmail,
            UpdateField::Age => ConversationState::AwaitingUpdateAge,
            UpdateField::School => ConversationState::AwaitingUpdateSchool,
            UpdateField::Preferences => ConversationState::AwaitingUpdatePreferences,
            UpdateField::Bio => ConversationState::AwaitingUpdateBio,
        }
    }

    fn display_name(&self) -> &'static str {
        match self {
            UpdateField::FirstName => "first name",
            UpdateField::LastName => "last name",
            UpdateField::Email => "email",
            UpdateField::Age => "age",
            UpdateField::School => "school",
            UpdateField::Preferences => "preferences",
            UpdateField::Bio => "bio",
        }
    }

    fn error_text(&self) -> &'static str {
        match self {
            UpdateField::FirstName => prompts::FIRST_NAME_UPDATE_FAILED,
            UpdateField::LastName => prompts::LAST_NAME_UPDATE_FAILED,
            UpdateField::Email => prompts::EMAIL_UPDATE_FAILED,
            UpdateField::Age => prompts::AGE_UPDATE_FAILED,
            UpdateField::School => prompts::SCHOOL_UPDATE_FAILED,
            UpdateField::Preferences => prompts::PREFERENCES_UPDATE_FAILED,
            UpdateField::Bio => prompts::BIO_UPDATE_FAILED,
        }
    }
}

/// Routes the typed field name (or "done") to the matching per-field state.
pub(crate) fn update_choice(text: &str) -> Step {
    let choice = text.to_lowercase();
    if choice == "done" {
        return Step::end(vec![prompts::UPDATE_DONE.to_string()]);
    }
    match UpdateField::from_choice(&choice) {
        Some(field) => {
            let mut replies = Vec::new();
            if field == UpdateField::Preferences {
                replies.push(prompts::preference_update_menu());
            }
            replies.push(prompts::ask_new_value(field.display_name()));
            Step::to(field.state(), replies)
        }
        None => Step::to(
            ConversationState::AwaitingUpdateChoice,
            vec![prompts::UPDATE_CHOICE_INVALID.to_string()],
        ),
    }
}

pub(crate) async fn update_first_name(store: &dyn ProfileStore, chat_id: i64, text: &str) -> Step {
    commit_update(
        store,
        chat_id,
        UpdateField::FirstName,
        ProfileUpdate::FirstName(title_case(text)),
    )
    .await
}

pub(crate) async fn update_last_name(store: &dyn ProfileStore, chat_id: i64, text: &str) -> Step {
    commit_update(
        store,
        chat_id,
        UpdateField::LastName,
        ProfileUpdate::LastName(title_case(text)),
    )
    .await
}

pub(crate) async fn update_email(store: &dyn ProfileStore, chat_id: i64, text: &str) -> Step {
    if !is_valid_email(text) {
        return Step::to(
            ConversationState::AwaitingUpdateEmail,
            vec![prompts::UPDATE_INVALID_EMAIL.to_string()],
        );
    }
    commit_update(
        store,
        chat_id,
        UpdateField::Email,
        ProfileUpdate::Email(text.to_string()),
    )
    .await
}

pub(crate) async fn update_age(store: &dyn ProfileStore, chat_id: i64, text: &str) -> Step {
    if is_valid_age(text) {
        if let Ok(age) = text.parse::<i64>() {
            return commit_update(store, chat_id, UpdateField::Age, ProfileUpdate::Age(age)).await;
        }
    }
    Step::to(
        ConversationState::AwaitingUpdateAge,
        vec![prompts::INVALID_AGE.to_string()],
    )
}

pub(crate) async fn update_school(store: &dyn ProfileStore, chat_id: i64, text: &str) -> Step {
    commit_update(
        store,
        chat_id,
        UpdateField::School,
        ProfileUpdate::School(text.to_string()),
    )
    .await
}

pub(crate) async fn update_preferences(store: &dyn ProfileStore, chat_id: i64, text: &str) -> Step {
    match Preference::from_choice(text) {
        Some(p) => {
            commit_update(
                store,
                chat_id,
                UpdateField::Preferences,
                ProfileUpdate::Preferences(p.label().to_string()),
            )
            .await
        }
        None => Step::to(
            ConversationState::AwaitingUpdatePreferences,
            vec![prompts::INVALID_PREFERENCE.to_string()],
        ),
    }
}

pub(crate) async fn update_bio(store: &dyn ProfileStore, chat_id: i64, text: &str) -> Step {
    commit_update(
        store,
        chat_id,
        UpdateField::Bio,
        ProfileUpdate::Bio(text.to_string()),
    )
    .await
}

/// Applies exactly one field update, reports the outcome, and always returns
/// to the update-choice menu so edits can be chained in one session.
///
/// A missing profile is a soft notice, not a failure; the user is pointed at
/// /start and kept in the update loop.
async fn commit_update(
    store: &dyn ProfileStore,
    chat_id: i64,
    field: UpdateField,
    update: ProfileUpdate,
) -> Step {
    let confirmation = confirmation_for(&update);

    let reply = match store.update_field(chat_id, update).await {
        Ok(()) => confirmation,
        Err(StorageError::NotFound(_)) => {
            warn!(chat_id, field = field.display_name(), "Update for missing profile");
            prompts::NO_PROFILE.to_string()
        }
        Err(e) => {
            error!(chat_id, field = field.display_name(), error = %e, "Failed to update profile field");
            field.error_text().to_string()
        }
    };

    Step::to(ConversationState::AwaitingUpdateChoice, vec![reply])
}

/// Per-field confirmation text; the preference confirmation echoes the label.
fn confirmation_for(update: &ProfileUpdate) -> String {
    match update {
        ProfileUpdate::FirstName(_) => prompts::FIRST_NAME_UPDATED.to_string(),
        ProfileUpdate::LastName(_) => prompts::LAST_NAME_UPDATED.to_string(),
        ProfileUpdate::Email(_) => prompts::EMAIL_UPDATED.to_string(),
        ProfileUpdate::Age(_) => prompts::AGE_UPDATED.to_string(),
        ProfileUpdate::School(_) => prompts::SCHOOL_UPDATED.to_string(),
        ProfileUpdate::Preferences(label) => prompts::preferences_updated(label),
        ProfileUpdate::Bio(_) => prompts::BIO_UPDATED.to_string(),
    }
}
