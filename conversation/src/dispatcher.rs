//! Dispatcher: routes commands and answers to the state machine.
//!
//! Owns the per-chat conversation map. Handler execution is serialized per
//! chat id (one transition at a time per chat); distinct chats run fully in
//! parallel. Entries are inserted on an entry command and removed on terminal.

use std::collections::HashMap;
use std::sync::Arc;

use gbot_core::Command;
use storage::ProfileStore;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument};

use crate::flow;
use crate::session::SessionContext;
use crate::state::{ConversationState, Step};

/// An in-progress conversation for one chat.
#[derive(Debug)]
struct ActiveConversation {
    state: ConversationState,
    ctx: SessionContext,
}

/// Per-chat slot: the lock serializes handler execution for one chat id,
/// `None` inside means no conversation is active.
type Slot = Arc<Mutex<Option<ActiveConversation>>>;

pub struct Dispatcher {
    store: Arc<dyn ProfileStore>,
    sessions: RwLock<HashMap<i64, Slot>>,
}

impl Dispatcher {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self {
            store,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Current conversation state for a chat, if one is active.
    pub async fn current_state(&self, chat_id: i64) -> Option<ConversationState> {
        let slot = self.sessions.read().await.get(&chat_id).cloned()?;
        let active = slot.lock().await;
        active.as_ref().map(|c| c.state)
    }

    /// Handles one inbound message and returns the replies to send, in order.
    ///
    /// Commands are entry points and fallbacks: `/start` and `/update` open
    /// their flow (restarting any conversation in progress), `/cancel` aborts.
    /// Plain text is fed to the current state's handler; with no active
    /// conversation it is ignored.
    #[instrument(skip(self, text))]
    pub async fn dispatch(&self, chat_id: i64, text: &str) -> Vec<String> {
        let slot = self.slot(chat_id).await;
        let mut active = slot.lock().await;

        let command = Command::parse(text);
        let step = match command {
            Some(Command::Start) => flow::start(self.store.as_ref(), chat_id).await,
            Some(Command::Update) => flow::update_entry(),
            Some(Command::Cancel) => flow::cancel(),
            None => match active.as_mut() {
                Some(conversation) => self.handle_answer(chat_id, conversation, text).await,
                None => {
                    debug!(chat_id, "Ignoring text with no active conversation");
                    drop(active);
                    self.drop_idle_slot(chat_id, &slot).await;
                    return Vec::new();
                }
            },
        };

        if command.is_some() {
            // entry commands and /cancel discard any in-progress session
            *active = None;
        }

        match step.next {
            Some(state) => match active.as_mut() {
                Some(conversation) => conversation.state = state,
                None => {
                    *active = Some(ActiveConversation {
                        state,
                        ctx: SessionContext::default(),
                    })
                }
            },
            None => *active = None,
        }

        info!(chat_id, state = ?step.next, replies = step.replies.len(), "Conversation step");

        let ended = active.is_none();
        drop(active);
        if ended {
            self.drop_idle_slot(chat_id, &slot).await;
        }

        step.replies
    }

    /// Feeds one non-command answer to the handler for the current state.
    async fn handle_answer(
        &self,
        chat_id: i64,
        conversation: &mut ActiveConversation,
        text: &str,
    ) -> Step {
        let store = self.store.as_ref();
        let ctx = &mut conversation.ctx;
        match conversation.state {
            ConversationState::AwaitingFirstName => flow::first_name(ctx, text),
            ConversationState::AwaitingLastName => flow::last_name(ctx, text),
            ConversationState::AwaitingEmail => flow::email(ctx, text),
            ConversationState::AwaitingAge => flow::age(ctx, text),
            ConversationState::AwaitingSchool => flow::school(ctx, text),
            ConversationState::AwaitingPreference => flow::preference(ctx, text),
            ConversationState::AwaitingBio => flow::bio(store, chat_id, ctx, text).await,
            ConversationState::AwaitingUpdateChoice => flow::update_choice(text),
            ConversationState::AwaitingUpdateFirstName => {
                flow::update_first_name(store, chat_id, text).await
            }
            ConversationState::AwaitingUpdateLastName => {
                flow::update_last_name(store, chat_id, text).await
            }
            ConversationState::AwaitingUpdateEmail => flow::update_email(store, chat_id, text).await,
            ConversationState::AwaitingUpdateAge => flow::update_age(store, chat_id, text).await,
            ConversationState::AwaitingUpdateSchool => {
                flow::update_school(store, chat_id, text).await
            }
            ConversationState::AwaitingUpdatePreferences => {
                flow::update_preferences(store, chat_id, text).await
            }
            ConversationState::AwaitingUpdateBio => flow::update_bio(store, chat_id, text).await,
        }
    }

    /// Returns the chat's slot, creating it on first contact.
    async fn slot(&self, chat_id: i64) -> Slot {
        if let Some(slot) = self.sessions.read().await.get(&chat_id) {
            return slot.clone();
        }
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(chat_id)
            .or_insert_with(|| Arc::new(Mutex::new(None)))
            .clone()
    }

    /// Removes a chat's slot once no other task holds it. A waiter that has
    /// already cloned the slot keeps using it; the entry then stays until a
    /// later terminal finds no clones outstanding.
    async fn drop_idle_slot(&self, chat_id: i64, slot: &Slot) {
        let mut sessions = self.sessions.write().await;
        if let Some(current) = sessions.get(&chat_id) {
            // two strong refs expected: the map's and our caller's
            if Arc::ptr_eq(current, slot) && Arc::strong_count(current) == 2 {
                sessions.remove(&chat_id);
            }
        }
    }
}
