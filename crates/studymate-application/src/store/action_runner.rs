//! AsyncActionRunner - per-kind lifecycle of network-backed actions.
//!
//! Each [`ActionKind`] owns one slot. A slot moves
//! `idle -> pending -> succeeded | failed` and keeps its outcome until it is
//! acknowledged or the next action of that kind begins. A second trigger while
//! pending is refused, so at most one call per kind is ever in flight.

use std::collections::HashMap;

use strum::IntoEnumIterator;
use studymate_core::action::{ActionKind, ActionState, AsyncAction, Generation};
use studymate_core::error::{Result, StudyMateError};

/// Issued by [`AsyncActionRunner::begin`]; presented again on completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionTicket {
    pub kind: ActionKind,
    pub issued_at: Generation,
}

impl ActionTicket {
    /// Whether the state this action targeted is still the current one.
    pub fn is_current(&self, now: Generation) -> bool {
        self.issued_at.is_current_for(self.kind, now)
    }
}

#[derive(Debug)]
pub struct AsyncActionRunner {
    slots: HashMap<ActionKind, AsyncAction>,
}

impl Default for AsyncActionRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl AsyncActionRunner {
    pub fn new() -> Self {
        Self {
            slots: ActionKind::iter()
                .map(|kind| (kind, AsyncAction::idle(kind)))
                .collect(),
        }
    }

    pub fn get(&self, kind: ActionKind) -> AsyncAction {
        self.slots
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| AsyncAction::idle(kind))
    }

    pub fn state(&self, kind: ActionKind) -> ActionState {
        self.get(kind).state
    }

    pub fn is_pending(&self, kind: ActionKind) -> bool {
        self.state(kind) == ActionState::Pending
    }

    /// All slots in declaration order.
    pub fn all(&self) -> Vec<AsyncAction> {
        ActionKind::iter().map(|kind| self.get(kind)).collect()
    }

    /// Marks `kind` pending, clearing any previous outcome.
    pub fn begin(&mut self, kind: ActionKind, now: Generation) -> Result<ActionTicket> {
        if self.is_pending(kind) {
            tracing::debug!("[ActionRunner] {} already pending; trigger ignored", kind);
            return Err(StudyMateError::pending(kind.to_string()));
        }
        self.set(kind, ActionState::Pending, None);
        tracing::debug!("[ActionRunner] {} pending", kind);
        Ok(ActionTicket {
            kind,
            issued_at: now,
        })
    }

    pub fn succeed(&mut self, ticket: ActionTicket) {
        self.set(ticket.kind, ActionState::Succeeded, None);
        tracing::debug!("[ActionRunner] {} succeeded", ticket.kind);
    }

    pub fn fail(&mut self, ticket: ActionTicket, error: &StudyMateError) {
        self.set(ticket.kind, ActionState::Failed, Some(error.user_message()));
        tracing::debug!("[ActionRunner] {} failed: {}", ticket.kind, error);
    }

    /// Drops a stale completion: the slot returns to idle with no outcome.
    pub fn discard(&mut self, ticket: ActionTicket) -> StudyMateError {
        self.set(ticket.kind, ActionState::Idle, None);
        tracing::debug!(
            "[ActionRunner] Discarded stale {} completion (issued at {:?})",
            ticket.kind,
            ticket.issued_at
        );
        StudyMateError::stale(ticket.kind.to_string())
    }

    /// Clears a finished outcome. Pending slots are left alone.
    pub fn acknowledge(&mut self, kind: ActionKind) {
        if !self.is_pending(kind) {
            self.set(kind, ActionState::Idle, None);
        }
    }

    fn set(&mut self, kind: ActionKind, state: ActionState, error: Option<String>) {
        self.slots.insert(kind, AsyncAction { kind, state, error });
    }
}
