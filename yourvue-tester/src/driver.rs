//! Headless host: owns a session and a simulated clock.

use anyhow::{Context, Result, bail};

use yourvue_wizard::{
    AssessmentSession, Command, Millis, Outcome, SessionSnapshot, SharedStorage, StageId,
    WizardConfig,
};

/// Upper bound on timer wake-ups while draining; a wizard that keeps
/// scheduling past this is stuck.
const MAX_WAKEUPS: usize = 10_000;

pub struct WizardDriver {
    session: AssessmentSession,
    storage: SharedStorage,
    clock: Millis,
    applied: usize,
    rejected: usize,
}

impl WizardDriver {
    #[must_use]
    pub fn new(storage: SharedStorage, cfg: WizardConfig, seed: u64) -> Self {
        Self {
            session: AssessmentSession::new(SharedStorage::clone(&storage), cfg, seed),
            storage,
            clock: 0,
            applied: 0,
            rejected: 0,
        }
    }

    #[must_use]
    pub const fn now(&self) -> Millis {
        self.clock
    }

    #[must_use]
    pub fn storage(&self) -> SharedStorage {
        SharedStorage::clone(&self.storage)
    }

    #[must_use]
    pub const fn session(&self) -> &AssessmentSession {
        &self.session
    }

    #[must_use]
    pub fn stage(&self) -> StageId {
        self.session.current_stage()
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    #[must_use]
    pub const fn counts(&self) -> (usize, usize) {
        (self.applied, self.rejected)
    }

    /// Forward a command and return whatever became of it.
    pub fn send(&mut self, command: Command) -> Outcome {
        let outcome = self.session.apply(command, self.clock);
        if outcome.is_rejected() {
            self.rejected += 1;
        } else {
            self.applied += 1;
        }
        outcome
    }

    /// Forward a command that must be accepted.
    pub fn apply(&mut self, command: Command) -> Result<()> {
        let name = command.name();
        match self.send(command) {
            Outcome::Applied | Outcome::Exited => Ok(()),
            Outcome::Rejected(reason) => {
                bail!("{name} rejected at stage {} t={}ms: {reason}", self.stage(), self.clock)
            }
        }
    }

    /// Forward a command that must be refused without side effects on the stage.
    pub fn expect_rejected(&mut self, command: Command) -> Result<()> {
        let name = command.name();
        let stage = self.stage();
        match self.send(command) {
            Outcome::Rejected(_) if self.stage() == stage => Ok(()),
            Outcome::Rejected(_) => bail!("{name} was rejected but still moved the stage"),
            other => bail!("{name} should have been rejected, got {other:?}"),
        }
    }

    /// Move the clock forward, firing every deadline on the way.
    pub fn advance(&mut self, ms: Millis) {
        let target = self.clock.saturating_add(ms);
        for _ in 0..MAX_WAKEUPS {
            let Some(deadline) = self.session.next_deadline().filter(|d| *d <= target) else {
                break;
            };
            self.clock = deadline.max(self.clock);
            self.session.tick(self.clock);
        }
        self.clock = target;
        self.session.tick(self.clock);
    }

    /// Run timers until nothing is scheduled.
    pub fn drain(&mut self) -> Result<()> {
        for _ in 0..MAX_WAKEUPS {
            let Some(deadline) = self.session.next_deadline() else {
                return Ok(());
            };
            self.clock = deadline.max(self.clock);
            self.session.tick(self.clock);
        }
        bail!("timers still pending after {MAX_WAKEUPS} wake-ups")
    }

    /// Snapshot JSON for failure artifacts.
    pub fn snapshot_json(&self) -> Result<String> {
        self.snapshot().to_json().context("serializing snapshot")
    }
}
