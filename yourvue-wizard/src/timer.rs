//! Host-driven timers. Deadlines are absolute host milliseconds and only
//! advance when the owner is ticked.

/// Host clock reading in milliseconds.
pub type Millis = u64;

/// One-shot cancellable deadline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timeout {
    due: Option<Millis>,
}

impl Timeout {
    #[must_use]
    pub const fn idle() -> Self {
        Self { due: None }
    }

    /// Schedule the timeout `delay` ms after `now`, replacing any pending deadline.
    pub const fn arm(&mut self, now: Millis, delay: Millis) {
        self.due = Some(now.saturating_add(delay));
    }

    pub const fn cancel(&mut self) {
        self.due = None;
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    #[must_use]
    pub const fn deadline(&self) -> Option<Millis> {
        self.due
    }

    /// Returns `true` exactly once when `now` reaches the deadline.
    pub const fn fire(&mut self, now: Millis) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}

/// Repeating deadline with a fixed period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Interval {
    period: Millis,
    next: Option<Millis>,
}

impl Interval {
    pub const fn start(&mut self, now: Millis, period: Millis) {
        self.period = if period == 0 { 1 } else { period };
        self.next = Some(now.saturating_add(self.period));
    }

    pub const fn stop(&mut self) {
        self.next = None;
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.next.is_some()
    }

    #[must_use]
    pub const fn deadline(&self) -> Option<Millis> {
        self.next
    }

    /// Number of periods elapsed up to `now`; catches up after long gaps.
    pub fn ticks(&mut self, now: Millis) -> u64 {
        let Some(next) = self.next else {
            return 0;
        };
        if now < next {
            return 0;
        }
        let count = (now - next) / self.period + 1;
        self.next = Some(next + count * self.period);
        count
    }
}

/// Earliest of several optional deadlines.
#[must_use]
pub fn earliest<I>(deadlines: I) -> Option<Millis>
where
    I: IntoIterator<Item = Option<Millis>>,
{
    deadlines.into_iter().flatten().min()
}
