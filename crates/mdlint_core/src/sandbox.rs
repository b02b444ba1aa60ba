//! Run-scoped network sandbox.
//!
//! Each lint run owns a `Sandbox`. Network access is switched off for the
//! duration of dispatch through a `NetworkGuard`, and rules receive a
//! `NetworkAccess` handle they must consult before any outbound call. Two
//! runs in the same process never share a switch.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::LinterError;

/// Execution context for a single run.
#[derive(Debug)]
pub struct Sandbox {
    network_allowed: AtomicBool,
}

impl Sandbox {
    /// Creates a sandbox with network access allowed.
    pub fn new() -> Self {
        Self {
            network_allowed: AtomicBool::new(true),
        }
    }

    /// Returns the capability handle passed to rules.
    pub fn network(&self) -> NetworkAccess<'_> {
        NetworkAccess {
            allowed: &self.network_allowed,
        }
    }

    /// Disables network access until the returned guard is dropped.
    ///
    /// The previous state is restored on drop, including during unwinding.
    pub fn disable_network(&self) -> NetworkGuard<'_> {
        let previous = self.network_allowed.swap(false, Ordering::SeqCst);
        debug!("Network access disabled");
        NetworkGuard {
            sandbox: self,
            previous,
        }
    }
}

impl Default for Sandbox {
    fn default() -> Self {
        Self::new()
    }
}

/// Restores the sandbox's network state on drop.
#[must_use = "network access is restored as soon as the guard is dropped"]
pub struct NetworkGuard<'a> {
    sandbox: &'a Sandbox,
    previous: bool,
}

impl Drop for NetworkGuard<'_> {
    fn drop(&mut self) {
        self.sandbox
            .network_allowed
            .store(self.previous, Ordering::SeqCst);
        debug!("Network access restored");
    }
}

/// Capability flag for outbound network calls.
#[derive(Debug, Clone, Copy)]
pub struct NetworkAccess<'a> {
    allowed: &'a AtomicBool,
}

impl NetworkAccess<'_> {
    /// Returns true if outbound calls are currently permitted.
    pub fn is_allowed(&self) -> bool {
        self.allowed.load(Ordering::SeqCst)
    }

    /// Fails with `LinterError::NetworkDisabled` when calls are not permitted.
    pub fn check(&self) -> Result<(), LinterError> {
        if self.is_allowed() {
            Ok(())
        } else {
            Err(LinterError::NetworkDisabled)
        }
    }
}
