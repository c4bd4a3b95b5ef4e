//! engine::guard
//!
//! The one-way initialization guard.
//!
//! # Invariants
//!
//! - The guard starts `Uninitialized` and moves to `Initialized` exactly once
//! - The transition is never undone, whatever the outcome of the walk
//! - Exactly one caller observes the transition, even across threads
//!
//! The check-and-set is a single atomic swap. No lock is held afterwards,
//! so a dependency that calls back into its importer sees the guard
//! already set and returns instead of looping.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;

/// Lifecycle state of an initializer.
///
/// There is deliberately no `Failed` state: a walk that fails still leaves
/// the guard `Initialized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InitState {
    /// No caller has entered the initializer yet.
    Uninitialized,
    /// The initializer has been entered at least once.
    Initialized,
}

/// Single-assignment flag marking that an initializer has been entered.
#[derive(Debug, Default)]
pub struct InitGuard {
    initialized: AtomicBool,
}

impl InitGuard {
    /// Create a guard in the `Uninitialized` state.
    ///
    /// `const` so a host can place a guard in a `static` if it truly needs
    /// process scope.
    pub const fn new() -> Self {
        Self {
            initialized: AtomicBool::new(false),
        }
    }

    /// Take the one-way transition.
    ///
    /// Returns `true` for the single caller that moved the guard from
    /// `Uninitialized` to `Initialized`, and `false` for everyone else.
    pub fn enter(&self) -> bool {
        !self.initialized.swap(true, Ordering::AcqRel)
    }

    /// Current state of the guard.
    pub fn state(&self) -> InitState {
        if self.is_initialized() {
            InitState::Initialized
        } else {
            InitState::Uninitialized
        }
    }

    /// Whether the guard has been entered.
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn starts_uninitialized() {
        let guard = InitGuard::new();
        assert_eq!(guard.state(), InitState::Uninitialized);
        assert!(!guard.is_initialized());
    }

    #[test]
    fn first_enter_wins() {
        let guard = InitGuard::new();
        assert!(guard.enter());
        assert_eq!(guard.state(), InitState::Initialized);

        assert!(!guard.enter());
        assert!(!guard.enter());
        assert_eq!(guard.state(), InitState::Initialized);
    }

    #[test]
    fn static_guard() {
        static GUARD: InitGuard = InitGuard::new();
        assert!(GUARD.enter());
        assert!(!GUARD.enter());
    }

    #[test]
    fn exactly_one_thread_enters() {
        let guard = Arc::new(InitGuard::new());
        let winners = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let guard = Arc::clone(&guard);
                let winners = Arc::clone(&winners);
                thread::spawn(move || {
                    if guard.enter() {
                        winners.fetch_add(1, Ordering::SeqCst);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(winners.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn state_serializes_snake_case() {
        let json = serde_json::to_string(&InitState::Uninitialized).unwrap();
        assert_eq!(json, "\"uninitialized\"");
    }
}
