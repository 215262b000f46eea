//! Selection gate: turns raw "player picked card C" intents into a strictly
//! serialized sequence of session transitions.
//!
//! Each gate owns its session and its own busy token, so independent games
//! never share a lock. An intent that arrives while another is in flight is
//! dropped, not queued. Validation and mutation happen under one session
//! lock; the token is released only after that lock is gone and observers
//! have been told, so no second intent can slip in between.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GateError;
use crate::hand::HandResult;
use crate::logger::{now_rfc3339, SelectionAction, SelectionEvent, SelectionObserver};
use crate::session::{
    GameSummary, LevelSummary, PowerUp, PowerUpOutcome, SessionSnapshot, SessionState,
};

/// Why an intent was dropped. Expected races, not errors.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Another intent or session routine holds the gate
    Busy,
    /// Five cards already held
    HandFull,
    /// Game paused or not running
    NotPlaying,
    /// Card already in the hand
    AlreadySelected,
    /// Card no longer undealt (stale intent)
    NotInDeck,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SelectionOutcome {
    Accepted,
    Rejected(RejectReason),
}

impl SelectionOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SelectionOutcome::Accepted)
    }
}

// Held for the whole intent; dropping it reopens the gate.
struct BusyToken<'a>(&'a AtomicBool);

impl Drop for BusyToken<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct SelectionGate {
    session: Mutex<SessionState>,
    busy: AtomicBool,
    seq: AtomicU64,
    observer: Option<Arc<dyn SelectionObserver>>,
}

impl std::fmt::Debug for SelectionGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionGate")
            .field("busy", &self.busy.load(Ordering::Relaxed))
            .field("seq", &self.seq.load(Ordering::Relaxed))
            .field("observed", &self.observer.is_some())
            .finish()
    }
}

impl SelectionGate {
    pub fn new(session: SessionState) -> Self {
        Self {
            session: Mutex::new(session),
            busy: AtomicBool::new(false),
            seq: AtomicU64::new(0),
            observer: None,
        }
    }

    pub fn with_observer(session: SessionState, observer: Arc<dyn SelectionObserver>) -> Self {
        Self {
            observer: Some(observer),
            ..Self::new(session)
        }
    }

    fn try_acquire(&self) -> Option<BusyToken<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyToken(&self.busy))
    }

    fn lock_session(&self) -> MutexGuard<'_, SessionState> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(
        &self,
        action: SelectionAction,
        card: &Card,
        reason: Option<RejectReason>,
        selected_count: usize,
    ) {
        let Some(observer) = &self.observer else {
            return;
        };
        let event = SelectionEvent {
            seq: self.seq.fetch_add(1, Ordering::Relaxed) + 1,
            action,
            card_id: card.id(),
            reason,
            selected_count,
            ts: now_rfc3339(),
        };
        observer.on_event(&event);
    }

    /// Handles one selection intent. At most one intent is in flight per gate;
    /// a rejected intent leaves the session untouched. Observers are told after
    /// the session lock is released but before the gate reopens, so they may
    /// read the committed state.
    pub fn select(&self, card: Card) -> SelectionOutcome {
        let Some(_token) = self.try_acquire() else {
            tracing::debug!(card = %card.id(), reason = ?RejectReason::Busy, "selection rejected");
            self.emit(SelectionAction::Blocked, &card, Some(RejectReason::Busy), 0);
            return SelectionOutcome::Rejected(RejectReason::Busy);
        };
        let (held, verdict) = {
            let mut session = self.lock_session();
            let held = session.selected_cards().len();
            let verdict = session.validate_selection(&card);
            if verdict.is_ok() {
                session.apply_selection(card);
            }
            (held, verdict)
        };

        self.emit(SelectionAction::Enter, &card, None, held);
        match verdict {
            Err(reason) => {
                tracing::debug!(card = %card.id(), ?reason, selected_count = held, "selection rejected");
                self.emit(SelectionAction::Blocked, &card, Some(reason), held);
                SelectionOutcome::Rejected(reason)
            }
            Ok(()) => {
                tracing::trace!(card = %card.id(), selected_count = held + 1, "selection accepted");
                self.emit(SelectionAction::Accepted, &card, None, held + 1);
                SelectionOutcome::Accepted
            }
        }
    }

    /// Runs a session routine under the same exclusion as selection intents.
    pub fn with_session<T>(&self, f: impl FnOnce(&mut SessionState) -> T) -> Result<T, GateError> {
        let Some(_token) = self.try_acquire() else {
            tracing::debug!("session routine rejected: gate busy");
            return Err(GateError::Busy);
        };
        let mut session = self.lock_session();
        Ok(f(&mut session))
    }

    pub fn submit_hand(&self) -> Result<HandResult, GateError> {
        Ok(self.with_session(|s| s.submit_hand())??)
    }

    pub fn apply_power_up(&self, power_up: PowerUp) -> Result<PowerUpOutcome, GateError> {
        Ok(self.with_session(|s| s.apply_power_up(power_up))??)
    }

    pub fn set_paused(&self, paused: bool) -> Result<(), GateError> {
        self.with_session(|s| s.set_paused(paused))
    }

    pub fn complete_level(&self, elapsed_secs: u32) -> Result<LevelSummary, GateError> {
        Ok(self.with_session(|s| s.complete_level(elapsed_secs))??)
    }

    pub fn advance_level(&self) -> Result<u32, GateError> {
        self.with_session(|s| s.advance_level())
    }

    pub fn end_game(&self) -> Result<GameSummary, GateError> {
        self.with_session(|s| s.end_game())
    }

    /// Consistent read-only view; waits for any in-flight transition to commit.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.lock_session().snapshot()
    }

    pub fn current_hand(&self) -> Option<HandResult> {
        self.lock_session().current_hand()
    }

    pub fn into_session(self) -> SessionState {
        self.session
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
