use crate::timer::{Millis, Timeout};

/// One-time congratulatory interstitial with an auto-dismiss timer.
#[derive(Debug, Clone, Default)]
pub struct MotivationPopup {
    open: bool,
    auto_dismiss: Timeout,
}

impl MotivationPopup {
    pub fn open(&mut self, now: Millis, auto_dismiss_ms: Millis) {
        self.open = true;
        self.auto_dismiss.arm(now, auto_dismiss_ms);
    }

    /// Any pointer interaction keeps the popup up until a button is used.
    pub fn interact(&mut self) {
        self.auto_dismiss.cancel();
    }

    pub fn close(&mut self) {
        self.open = false;
        self.auto_dismiss.cancel();
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub const fn auto_dismiss_pending(&self) -> bool {
        self.auto_dismiss.is_pending()
    }

    /// Returns `true` when the popup closes itself.
    pub fn tick(&mut self, now: Millis) -> bool {
        if self.open && self.auto_dismiss.fire(now) {
            self.open = false;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub const fn next_deadline(&self) -> Option<Millis> {
        self.auto_dismiss.deadline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_dismisses_after_delay() {
        let mut popup = MotivationPopup::default();
        popup.open(1_000, 5_000);
        assert!(!popup.tick(5_999));
        assert!(popup.tick(6_000));
        assert!(!popup.is_open());
    }

    #[test]
    fn interaction_cancels_auto_dismiss() {
        let mut popup = MotivationPopup::default();
        popup.open(0, 5_000);
        popup.interact();
        assert!(!popup.tick(60_000));
        assert!(popup.is_open());
        popup.close();
        assert!(!popup.is_open());
    }
}
