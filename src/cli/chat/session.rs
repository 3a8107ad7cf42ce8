use thiserror::Error;
use tracing::debug;

use super::conversation_state::{ConversationState, Sender, Turn};
use crate::responder::Responder;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("message is empty")]
    EmptyInput,

    #[error("still waiting for the previous reply")]
    ReplyPending,

    #[error("reply belongs to a conversation that has been cleared")]
    StaleReply,
}

/// Ticket for the one reply a session is waiting on.
#[derive(Debug)]
#[must_use]
pub struct PendingReply {
    input: String,
    turn_id: u64,
}

impl PendingReply {
    pub fn input(&self) -> &str {
        &self.input
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Awaiting { turn_id: u64 },
}

/// The conversation plus the "reply pending" flag for one chat run.
///
/// Transitions are `Idle -> Awaiting -> Idle`; at most one reply is ever
/// outstanding, and submissions made while awaiting change nothing.
#[derive(Debug)]
pub struct ChatSession {
    conversation: ConversationState,
    phase: Phase,
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            conversation: ConversationState::seeded(),
            phase: Phase::Idle,
        }
    }

    pub fn conversation(&self) -> &ConversationState {
        &self.conversation
    }

    pub fn is_awaiting(&self) -> bool {
        matches!(self.phase, Phase::Awaiting { .. })
    }

    /// Appends the user turn and enters `Awaiting`.
    pub fn begin(&mut self, text: &str) -> Result<PendingReply, SubmitError> {
        if text.trim().is_empty() {
            return Err(SubmitError::EmptyInput);
        }
        if self.is_awaiting() {
            return Err(SubmitError::ReplyPending);
        }

        let turn_id = self.conversation.append(Sender::User, text).id();
        self.phase = Phase::Awaiting { turn_id };
        debug!("Turn {} submitted, awaiting reply", turn_id);

        Ok(PendingReply {
            input: text.to_string(),
            turn_id,
        })
    }

    /// Appends the assistant reply for `pending` and returns to `Idle`.
    pub fn complete(&mut self, pending: PendingReply, reply: &str) -> Result<&Turn, SubmitError> {
        if self.phase != (Phase::Awaiting { turn_id: pending.turn_id }) {
            debug!("Dropping reply to turn {}", pending.turn_id);
            return Err(SubmitError::StaleReply);
        }

        self.phase = Phase::Idle;
        debug!(
            "Reply to turn {} received, {} turns in conversation",
            pending.turn_id,
            self.conversation.len() + 1
        );
        Ok(self.conversation.append(Sender::Assistant, reply))
    }

    /// Submits `text` and waits for `responder` to answer it.
    ///
    /// `on_submitted` sees the user turn before the reply is awaited.
    pub async fn send<F>(
        &mut self,
        text: &str,
        responder: &dyn Responder,
        on_submitted: F,
    ) -> Result<&Turn, SubmitError>
    where
        F: FnOnce(&Turn),
    {
        let pending = self.begin(text)?;
        if let Some(turn) = self.conversation.last() {
            on_submitted(turn);
        }

        let reply = responder.respond(pending.input()).await;
        self.complete(pending, &reply)
    }

    /// Drops the transcript and any pending reply, leaving only the greeting.
    pub fn reset(&mut self) {
        self.conversation = ConversationState::seeded();
        self.phase = Phase::Idle;
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
