use super::{Scenario, random_walk, walkthrough};

const SCENARIOS: [Scenario; 8] = [
    Scenario {
        key: "smoke",
        name: "Smoke",
        description: "Finish orientation and land on the values stage",
        run: walkthrough::smoke,
    },
    Scenario {
        key: "full-assessment",
        name: "Full Assessment",
        description: "Walk all eight stages to the action plan",
        run: walkthrough::full_assessment,
    },
    Scenario {
        key: "returning-user",
        name: "Returning User",
        description: "Re-enter orientation and confirm the popup stays dismissed",
        run: walkthrough::returning_user,
    },
    Scenario {
        key: "popup-timeout",
        name: "Popup Timeout",
        description: "Leave the get-started popup alone until it closes itself",
        run: walkthrough::popup_timeout,
    },
    Scenario {
        key: "analysis-retry",
        name: "Analysis Retry",
        description: "Stall resume analysis past the threshold and retry it",
        run: walkthrough::analysis_retry,
    },
    Scenario {
        key: "exit-keeps-data",
        name: "Exit Keeps Data",
        description: "Open and confirm the exit dialog without losing progress",
        run: walkthrough::exit_keeps_data,
    },
    Scenario {
        key: "reload-resume",
        name: "Reload Resume",
        description: "Persist to a JSON file, reopen it, and resume at resume review",
        run: walkthrough::reload_resume,
    },
    Scenario {
        key: "random-walk",
        name: "Random Walk",
        description: "Seeded random commands with invariant checks after each one",
        run: random_walk::random_walk,
    },
];

#[must_use]
pub fn find_scenario(key: &str) -> Option<&'static Scenario> {
    SCENARIOS.iter().find(|s| s.key.eq_ignore_ascii_case(key))
}

#[must_use]
pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    SCENARIOS.iter().map(|s| (s.key, s.description)).collect()
}

#[must_use]
pub fn all_keys() -> Vec<String> {
    SCENARIOS.iter().map(|s| s.key.to_string()).collect()
}
