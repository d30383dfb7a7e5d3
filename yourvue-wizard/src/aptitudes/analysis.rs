//! Simulated resume analysis: a completion deadline plus two progress clocks.
use crate::config::AnalysisCfg;
use crate::timer::{Interval, Millis, Timeout, earliest};

pub const LOADING_MESSAGES: [&str; 4] = [
    "Analyzing your resume...",
    "Extracting skills...",
    "Identifying experience...",
    "Mapping education...",
];

const SECOND_MS: Millis = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisEvent {
    Idle,
    Progressed,
    Completed,
}

#[derive(Debug, Clone, Default)]
pub struct AnalysisRun {
    running: bool,
    completion: Timeout,
    rotation: Interval,
    seconds: Interval,
    message_index: usize,
    elapsed_secs: u64,
}

impl AnalysisRun {
    pub fn start(&mut self, now: Millis, cfg: &AnalysisCfg) {
        self.running = true;
        self.message_index = 0;
        self.elapsed_secs = 0;
        self.completion.arm(now, cfg.first_run_ms);
        self.rotation.start(now, cfg.message_rotation_ms);
        self.seconds.start(now, SECOND_MS);
        log::debug!("resume analysis started");
    }

    /// Replace the pending completion with the shorter retry deadline.
    /// The message rotation keeps its position.
    pub fn retry(&mut self, now: Millis, cfg: &AnalysisCfg) {
        self.running = true;
        self.elapsed_secs = 0;
        self.completion.arm(now, cfg.retry_ms);
        self.seconds.start(now, SECOND_MS);
        if !self.rotation.is_running() {
            self.rotation.start(now, cfg.message_rotation_ms);
        }
        log::debug!("resume analysis retried");
    }

    pub fn tick(&mut self, now: Millis) -> AnalysisEvent {
        if !self.running {
            return AnalysisEvent::Idle;
        }
        let rotated = self.rotation.ticks(now);
        let seconds = self.seconds.ticks(now);
        self.elapsed_secs += seconds;
        if rotated > 0 {
            let steps = usize::try_from(rotated % LOADING_MESSAGES.len() as u64).unwrap_or(0);
            self.message_index = (self.message_index + steps) % LOADING_MESSAGES.len();
        }
        if self.completion.fire(now) {
            self.stop();
            return AnalysisEvent::Completed;
        }
        if rotated > 0 || seconds > 0 {
            AnalysisEvent::Progressed
        } else {
            AnalysisEvent::Idle
        }
    }

    fn stop(&mut self) {
        self.running = false;
        self.completion.cancel();
        self.rotation.stop();
        self.seconds.stop();
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub const fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    #[must_use]
    pub const fn message(&self) -> &'static str {
        LOADING_MESSAGES[self.message_index % LOADING_MESSAGES.len()]
    }

    /// Retry is offered once the run has taken longer than the threshold.
    #[must_use]
    pub const fn retry_available(&self, cfg: &AnalysisCfg) -> bool {
        self.running && self.elapsed_secs > cfg.retry_threshold_secs
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Millis> {
        earliest([
            self.completion.deadline(),
            self.rotation.deadline(),
            self.seconds.deadline(),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slow_cfg() -> AnalysisCfg {
        AnalysisCfg {
            first_run_ms: 60_000,
            ..AnalysisCfg::default()
        }
    }

    #[test]
    fn completes_after_first_run_duration() {
        let cfg = AnalysisCfg::default();
        let mut run = AnalysisRun::default();
        run.start(0, &cfg);
        assert_eq!(run.next_deadline(), Some(1_000));
        assert_eq!(run.tick(2_000), AnalysisEvent::Progressed);
        assert_eq!(run.message(), "Extracting skills...");
        assert_eq!(run.tick(3_000), AnalysisEvent::Completed);
        assert!(!run.is_running());
        assert_eq!(run.next_deadline(), None);
    }

    #[test]
    fn messages_cycle_through_all_four() {
        let mut run = AnalysisRun::default();
        run.start(0, &slow_cfg());
        run.tick(8_000);
        assert_eq!(run.message(), LOADING_MESSAGES[0]);
        run.tick(10_000);
        assert_eq!(run.message(), LOADING_MESSAGES[1]);
    }

    #[test]
    fn retry_replaces_pending_completion() {
        let cfg = slow_cfg();
        let mut run = AnalysisRun::default();
        run.start(0, &cfg);
        assert!(!run.retry_available(&cfg));
        run.tick(15_000);
        assert!(!run.retry_available(&cfg));
        run.tick(16_000);
        assert!(run.retry_available(&cfg));
        let message_before = run.message();

        run.retry(16_000, &cfg);
        assert_eq!(run.elapsed_secs(), 0);
        assert_eq!(run.message(), message_before);
        assert_eq!(run.tick(17_999), AnalysisEvent::Progressed);
        assert_eq!(run.tick(18_000), AnalysisEvent::Completed);
        assert_eq!(run.tick(60_000), AnalysisEvent::Idle);
    }
}
