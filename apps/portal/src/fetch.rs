//! Explicit in-flight state for asynchronous loads, plus a generation guard
//! that keeps a stale response from clobbering a newer fetch.
//!
//! Collections are replaced wholesale per fetch; a view flips its slot to
//! `Loading`, takes a ticket, and settles the result only while that ticket
//! is still current. Rapid refiltering or a view teardown simply invalidates
//! outstanding tickets.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::errors::PortalError;

/// What a view can display about one failed load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub message: String,
    /// Worth a retry banner rather than a dead end.
    pub retryable: bool,
}

impl From<&PortalError> for FetchFailure {
    fn from(err: &PortalError) -> Self {
        FetchFailure {
            message: err.to_string(),
            retryable: err.is_retryable(),
        }
    }
}

/// Lifecycle of one fetched collection as the view sees it.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(FetchFailure),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::Idle
    }
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            FetchState::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// Ticket for one in-flight fetch; compared against the slot's counter when
/// the response lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Monotonic fetch counter for one view slot. Each new request takes a
/// ticket; only the latest ticket may settle the slot.
#[derive(Debug, Default)]
pub struct FetchGuard {
    current: AtomicU64,
}

impl FetchGuard {
    /// Starts a new fetch, making every earlier ticket stale.
    pub fn begin(&self) -> FetchTicket {
        FetchTicket(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.current.load(Ordering::SeqCst) == ticket.0
    }

    /// View teardown: outstanding tickets all become stale.
    pub fn invalidate(&self) {
        self.current.fetch_add(1, Ordering::SeqCst);
    }
}

/// Applies a finished fetch to `state` only while `ticket` is still current.
/// Returns whether the result was applied.
pub fn settle<T>(
    state: &mut FetchState<T>,
    guard: &FetchGuard,
    ticket: FetchTicket,
    result: Result<T, PortalError>,
) -> bool {
    if !guard.is_current(ticket) {
        return false;
    }
    *state = match result {
        Ok(value) => FetchState::Ready(value),
        Err(err) => FetchState::Failed(FetchFailure::from(&err)),
    };
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_ticket_settles_the_slot() {
        let guard = FetchGuard::default();
        let mut state: FetchState<Vec<u32>> = FetchState::Loading;
        let ticket = guard.begin();
        assert!(settle(&mut state, &guard, ticket, Ok(vec![1, 2])));
        assert_eq!(state.value(), Some(&vec![1, 2]));
    }

    #[test]
    fn test_stale_ticket_is_dropped_after_newer_fetch() {
        let guard = FetchGuard::default();
        let mut state: FetchState<&str> = FetchState::Loading;
        let stale = guard.begin();
        let fresh = guard.begin();

        assert!(!settle(&mut state, &guard, stale, Ok("old")));
        assert!(state.is_loading());

        assert!(settle(&mut state, &guard, fresh, Ok("new")));
        assert_eq!(state.value(), Some(&"new"));
    }

    #[test]
    fn test_invalidate_drops_outstanding_tickets() {
        let guard = FetchGuard::default();
        let mut state: FetchState<&str> = FetchState::Loading;
        let ticket = guard.begin();
        guard.invalidate();
        assert!(!settle(&mut state, &guard, ticket, Ok("late")));
        assert!(state.is_loading());
    }

    #[test]
    fn test_failure_is_recorded_with_retryability() {
        let guard = FetchGuard::default();
        let mut state: FetchState<()> = FetchState::Loading;
        let ticket = guard.begin();
        settle(
            &mut state,
            &guard,
            ticket,
            Err(PortalError::NotFound("gone".to_string())),
        );
        match state {
            FetchState::Failed(ref failure) => {
                assert!(!failure.retryable);
                assert!(failure.message.contains("gone"));
            }
            _ => panic!("expected Failed, got {state:?}"),
        }
    }

    #[test]
    fn test_default_slot_is_idle() {
        let state: FetchState<u8> = FetchState::default();
        assert_eq!(state, FetchState::Idle);
        assert!(!state.is_loading());
        assert!(state.value().is_none());
    }
}
