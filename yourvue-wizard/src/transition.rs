//! Exit → swap → enter choreography for stage and sub-step hand-offs.
use serde::{Deserialize, Serialize};

use crate::config::TransitionCfg;
use crate::timer::{Millis, Timeout, earliest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPhase {
    #[default]
    Idle,
    Exit,
    Enter,
}

impl TransitionPhase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Exit => "exit",
            Self::Enter => "enter",
        }
    }
}

/// Tracks which content key is on screen while a new key animates in.
///
/// Purely presentational: data changes apply immediately, the orchestrator
/// only decides what the host displays and which phase it animates.
#[derive(Debug, Clone)]
pub struct TransitionOrchestrator<K> {
    displayed: K,
    pending: Option<K>,
    phase: TransitionPhase,
    swap: Timeout,
    settle: Timeout,
    cfg: TransitionCfg,
}

impl<K: Clone + PartialEq> TransitionOrchestrator<K> {
    #[must_use]
    pub fn new(initial: K, cfg: TransitionCfg) -> Self {
        Self {
            displayed: initial,
            pending: None,
            phase: TransitionPhase::Idle,
            swap: Timeout::idle(),
            settle: Timeout::idle(),
            cfg,
        }
    }

    #[must_use]
    pub const fn displayed(&self) -> &K {
        &self.displayed
    }

    #[must_use]
    pub const fn phase(&self) -> TransitionPhase {
        self.phase
    }

    /// The key the orchestrator is heading towards.
    #[must_use]
    pub fn target(&self) -> &K {
        self.pending.as_ref().unwrap_or(&self.displayed)
    }

    /// Announce the key that should be displayed. Re-announcing the current
    /// target is a no-op; anything else restarts the transition.
    pub fn set_key(&mut self, key: K, now: Millis) {
        if *self.target() == key {
            return;
        }
        self.swap.cancel();
        self.settle.cancel();
        self.pending = Some(key);
        self.phase = TransitionPhase::Exit;
        self.swap.arm(now, self.cfg.exit_ms);
        self.settle.arm(now, self.cfg.settle_ms);
    }

    /// Advance timers; returns `true` if the phase or displayed key changed.
    pub fn tick(&mut self, now: Millis) -> bool {
        let mut changed = false;
        if self.swap.fire(now) {
            if let Some(next) = self.pending.take() {
                self.displayed = next;
            }
            self.phase = TransitionPhase::Enter;
            changed = true;
        }
        if self.settle.fire(now) {
            self.phase = TransitionPhase::Idle;
            changed = true;
        }
        changed
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Millis> {
        earliest([self.swap.deadline(), self.settle.deadline()])
    }
}
