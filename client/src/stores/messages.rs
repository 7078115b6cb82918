//! Support-chat message store
//!
//! Owns the flat log of messages between users and the admin identity
//! and derives every conversation view from it: per-user summaries with
//! unread counts for the admin inbox, and two-party transcripts for the
//! chat screens. The log itself is the single source of truth; nothing
//! else is persisted.

use crate::error::{ClientError, ClientResult};
use crate::persist::{PersistHandle, SaveTicket};
use chrono::Utc;
use fittrack_shared::models::Message;
use fittrack_shared::validation::validate_message_content;
use std::collections::HashMap;
use tracing::{debug, error};
use uuid::Uuid;

/// Storage key for the serialized message log
pub const STORAGE_KEY: &str = "messages";

/// One conversation as seen from a viewer's inbox
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationSummary {
    /// The non-admin participant the conversation is grouped under
    pub user_id: String,
    /// The most recent message in the conversation
    pub last_message: Message,
    /// Messages the viewer has not read yet
    pub unread_count: usize,
}

/// The support-chat store
#[derive(Debug)]
pub struct MessageStore {
    admin_id: String,
    messages: Vec<Message>,
    persist: PersistHandle,
}

impl MessageStore {
    /// Fresh store with an empty log
    pub(crate) fn new(admin_id: impl Into<String>, persist: PersistHandle) -> Self {
        Self::with_log(admin_id, Vec::new(), persist)
    }

    /// Store rehydrated from a persisted log
    pub(crate) fn with_log(
        admin_id: impl Into<String>,
        messages: Vec<Message>,
        persist: PersistHandle,
    ) -> Self {
        Self {
            admin_id: admin_id.into(),
            messages,
            persist,
        }
    }

    /// The identity on the admin side of every conversation
    pub fn admin_id(&self) -> &str {
        &self.admin_id
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Append a message to the log.
    ///
    /// Content must be non-blank and exactly one side must be the admin
    /// identity; user-to-user and admin-to-admin sends are rejected.
    pub fn send(
        &mut self,
        sender_id: &str,
        receiver_id: &str,
        content: &str,
    ) -> ClientResult<(Message, SaveTicket)> {
        validate_message_content(content).map_err(ClientError::Validation)?;

        let sender_is_admin = sender_id == self.admin_id;
        let receiver_is_admin = receiver_id == self.admin_id;
        if sender_is_admin == receiver_is_admin {
            return Err(ClientError::Validation(
                "Exactly one side of a message must be the support admin".to_string(),
            ));
        }

        let message = Message {
            id: Uuid::new_v4(),
            sender_id: sender_id.to_string(),
            receiver_id: receiver_id.to_string(),
            content: content.trim().to_string(),
            timestamp: Utc::now(),
            is_read: false,
        };
        self.messages.push(message.clone());
        debug!(sender = %sender_id, receiver = %receiver_id, "message sent");

        Ok((message, self.persist_log()))
    }

    /// Mark one message as read.
    ///
    /// Unknown ids and already-read messages are silent no-ops that
    /// enqueue nothing; `Some` is returned only when state changed.
    pub fn mark_read(&mut self, message_id: Uuid) -> Option<SaveTicket> {
        let message = self
            .messages
            .iter_mut()
            .find(|m| m.id == message_id && !m.is_read)?;
        message.is_read = true;
        Some(self.persist_log())
    }

    /// Mark every unread message from `counterpart` to `viewer` as read.
    ///
    /// Called when the viewer opens the chat and sees the whole
    /// transcript; a single snapshot write covers the pass.
    pub fn mark_transcript_read(&mut self, counterpart: &str, viewer: &str) -> Option<SaveTicket> {
        let mut changed = false;
        for message in &mut self.messages {
            if message.sender_id == counterpart && message.receiver_id == viewer && !message.is_read
            {
                message.is_read = true;
                changed = true;
            }
        }
        changed.then(|| self.persist_log())
    }

    /// Drop the entire log
    pub fn clear(&mut self) -> SaveTicket {
        self.messages.clear();
        self.persist_log()
    }

    /// Replace the whole log, e.g. from an imported snapshot
    pub fn restore(&mut self, messages: Vec<Message>) -> SaveTicket {
        self.messages = messages;
        self.persist_log()
    }

    // ========================================================================
    // Derived views
    // ========================================================================

    /// Conversations grouped by non-admin participant, most recently
    /// active first.
    ///
    /// The unread count is from the viewer's perspective: messages the
    /// viewer did not send and has not read. Groups with equal last
    /// activity keep first-contact order.
    pub fn conversations(&self, viewer: &str) -> Vec<ConversationSummary> {
        let mut slots: HashMap<&str, usize> = HashMap::new();
        let mut summaries: Vec<ConversationSummary> = Vec::new();

        for message in &self.messages {
            let user_id = if message.sender_id == self.admin_id {
                message.receiver_id.as_str()
            } else {
                message.sender_id.as_str()
            };

            let slot = *slots.entry(user_id).or_insert_with(|| {
                summaries.push(ConversationSummary {
                    user_id: user_id.to_string(),
                    last_message: message.clone(),
                    unread_count: 0,
                });
                summaries.len() - 1
            });

            let summary = &mut summaries[slot];
            if message.timestamp >= summary.last_message.timestamp {
                summary.last_message = message.clone();
            }
            if !message.is_read && message.sender_id != viewer {
                summary.unread_count += 1;
            }
        }

        summaries.sort_by(|a, b| b.last_message.timestamp.cmp(&a.last_message.timestamp));
        summaries
    }

    /// All messages between two participants, oldest first
    pub fn transcript(&self, participant_a: &str, participant_b: &str) -> Vec<&Message> {
        let mut transcript: Vec<&Message> = self
            .messages
            .iter()
            .filter(|m| {
                (m.sender_id == participant_a && m.receiver_id == participant_b)
                    || (m.sender_id == participant_b && m.receiver_id == participant_a)
            })
            .collect();
        transcript.sort_by_key(|m| m.timestamp);
        transcript
    }

    /// Unread-badge count: messages from `sender` to `viewer` the
    /// viewer has not read
    pub fn unread_from(&self, sender: &str, viewer: &str) -> usize {
        self.messages
            .iter()
            .filter(|m| m.sender_id == sender && m.receiver_id == viewer && !m.is_read)
            .count()
    }

    /// The raw log, e.g. for export
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    fn persist_log(&self) -> SaveTicket {
        match serde_json::to_string(&self.messages) {
            Ok(payload) => self.persist.put(STORAGE_KEY, payload),
            Err(err) => {
                error!(error = %err, "failed to serialize message log");
                SaveTicket::failed(err.into())
            }
        }
    }
}
