//! Conversation states and the step result returned by state handlers.

/// Named states of the registration and update flows. One active state per chat;
/// reaching terminal removes the chat's conversation entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationState {
    AwaitingFirstName,
    AwaitingLastName,
    AwaitingEmail,
    AwaitingAge,
    AwaitingSchool,
    AwaitingPreference,
    AwaitingBio,
    AwaitingUpdateChoice,
    AwaitingUpdateFirstName,
    AwaitingUpdateLastName,
    AwaitingUpdateEmail,
    AwaitingUpdateAge,
    AwaitingUpdateSchool,
    AwaitingUpdatePreferences,
    AwaitingUpdateBio,
}

/// Outcome of one handler turn: the replies to emit plus the next state.
/// `next == None` means terminal; the conversation ends.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub next: Option<ConversationState>,
    pub replies: Vec<String>,
}

impl Step {
    /// Continue in `state` after sending `replies`.
    pub fn to(state: ConversationState, replies: Vec<String>) -> Self {
        Self {
            next: Some(state),
            replies,
        }
    }

    /// End the conversation after sending `replies`.
    pub fn end(replies: Vec<String>) -> Self {
        Self {
            next: None,
            replies,
        }
    }
}
