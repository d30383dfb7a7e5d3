use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::likert::LikertQuestion;
use crate::orientation::CareerStage;

macro_rules! likert {
    ($id:literal, $group:literal, $text:literal) => {
        LikertQuestion {
            id: $id,
            text: $text,
            group: $group,
        }
    };
}

pub const APTITUDES_LIKERT_QUESTIONS: [LikertQuestion; 18] = [
    likert!("APT_F1_Q1", "f1", "I enjoy mastering new knowledge or learning systematically."),
    likert!("APT_F1_Q2", "f1", "I can simplify complex information into clear points."),
    likert!("APT_F1_Q3", "f1", "Learning itself is enjoyable to me."),
    likert!("APT_F2_Q1", "f2", "I can usually find creative solutions when facing challenges."),
    likert!("APT_F2_Q2", "f2", "I like finding the root cause of problems."),
    likert!("APT_F2_Q3", "f2", "I prefer long-term solutions over quick fixes."),
    likert!("APT_F3_Q1", "f3", "I can explain complex ideas in simple terms."),
    likert!("APT_F3_Q2", "f3", "I enjoy communicating across people or teams."),
    likert!("APT_F3_Q3", "f3", "I express ideas confidently in writing or speech."),
    likert!("APT_F5_Q1", "f5", "I like planning ahead to avoid last-minute stress."),
    likert!("APT_F5_Q2", "f5", "I make task lists and track progress regularly."),
    likert!("APT_F5_Q3", "f5", "I'm organized in managing time and resources."),
    likert!("APT_F8_Q1", "f8", "I care deeply about data and information accuracy."),
    likert!("APT_F8_Q2", "f8", "I verify facts before making decisions."),
    likert!("APT_F8_Q3", "f8", "I take confidentiality and information security seriously."),
    likert!("APT_F9_Q1", "f9", "I plan budgets and resources responsibly."),
    likert!("APT_F9_Q2", "f9", "I can distinguish between essential and optional investments."),
    likert!("APT_F9_Q3", "f9", "I aim to achieve the most with limited resources."),
];

/// Answer letter for a behavioral scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ScenarioAnswer {
    A,
    B,
    C,
}

impl ScenarioAnswer {
    pub const ALL: [Self; 3] = [Self::A, Self::B, Self::C];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
        }
    }
}

impl fmt::Display for ScenarioAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScenarioAnswer {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScenarioQuestion {
    pub id: &'static str,
    pub text: &'static str,
    pub options: [(ScenarioAnswer, &'static str); 3],
}

macro_rules! scenario {
    ($id:literal, $text:literal, [$a:literal, $b:literal, $c:literal]) => {
        ScenarioQuestion {
            id: $id,
            text: $text,
            options: [
                (ScenarioAnswer::A, $a),
                (ScenarioAnswer::B, $b),
                (ScenarioAnswer::C, $c),
            ],
        }
    };
}

const STARTER_SCENARIOS: [ScenarioQuestion; 3] = [
    scenario!(
        "SCN_Q1",
        "When you join a new team, what do you do first?",
        [
            "Observe how others work",
            "Introduce yourself to everyone",
            "Jump in and start helping"
        ]
    ),
    scenario!(
        "SCN_Q2",
        "When a task is beyond your ability, you usually...",
        ["Research and learn", "Ask for help", "Try first and adjust later"]
    ),
    scenario!(
        "SCN_Q3",
        "When your mentor assigns an open-ended task, you feel...",
        [
            "Uncertain",
            "Excited to experiment",
            "Eager to clarify expectations"
        ]
    ),
];

const EXPLORER_SCENARIOS: [ScenarioQuestion; 3] = [
    scenario!(
        "SCN_Q1",
        "If you're working on three projects at once, you...",
        [
            "Switch between them to stay energized",
            "Focus deeply on one",
            "Follow a strict schedule"
        ]
    ),
    scenario!(
        "SCN_Q2",
        "When your tasks get repetitive, you...",
        [
            "Automate or improve the process",
            "Find new ways to make it faster",
            "Finish and move on"
        ]
    ),
    scenario!(
        "SCN_Q3",
        "If a colleague presents a 'crazy' idea, you...",
        [
            "Get excited and want to try",
            "Assess its feasibility",
            "Worry it might slow things down"
        ]
    ),
];

const SHIFTER_SCENARIOS: [ScenarioQuestion; 3] = [
    scenario!(
        "SCN_Q1",
        "When considering a new field, you first...",
        [
            "Research the market",
            "Talk to people in the industry",
            "Take a course and try it"
        ]
    ),
    scenario!(
        "SCN_Q2",
        "If your family, partners, or personal friends worry that starting over is too hard, you...",
        [
            "Explain your plan",
            "Prove it through results",
            "Hesitate but keep going"
        ]
    ),
    scenario!(
        "SCN_Q3",
        "When you face frequent setbacks in a new job, you...",
        [
            "Reflect and analyze",
            "Seek advice",
            "Tell yourself 'it's just a transition'"
        ]
    ),
];

const ADVANCER_SCENARIOS: [ScenarioQuestion; 3] = [
    scenario!(
        "SCN_Q1",
        "If your project is delayed, you...",
        [
            "Hold a team review to fix issues",
            "Report and adjust targets",
            "Quietly work extra to recover"
        ]
    ),
    scenario!(
        "SCN_Q2",
        "When your team has conflict, you...",
        [
            "Facilitate open discussion",
            "Make a firm decision",
            "Encourage them to resolve it themselves"
        ]
    ),
    scenario!(
        "SCN_Q3",
        "If your manager's decision differs from yours, you...",
        [
            "Present data to support your view",
            "Respect but privately give feedback",
            "Follow orders but adapt execution"
        ]
    ),
];

const UNSURE_SCENARIOS: [ScenarioQuestion; 3] = [
    scenario!(
        "SCN_Q1",
        "When you think about choosing a career direction, what describes your current feeling best?",
        [
            "I feel overwhelmed and don't know where to start",
            "I'm curious but easily switch between different ideas",
            "I prefer to explore slowly before making any decisions"
        ]
    ),
    scenario!(
        "SCN_Q2",
        "When you face too many options, you usually...",
        [
            "Look for guidance or structured suggestions",
            "Try a few of them and see what feels right",
            "Analyze pros and cons but still hesitate to decide"
        ]
    ),
    scenario!(
        "SCN_Q3",
        "If someone asks 'What are you good at?', you tend to...",
        [
            "Say 'I'm not sure yet'",
            "Mention a few things but feel uncertain",
            "Prefer others to point out your strengths"
        ]
    ),
];

/// The three behavioral scenarios shown for a career stage.
#[must_use]
pub const fn scenarios_for(stage: CareerStage) -> &'static [ScenarioQuestion; 3] {
    match stage {
        CareerStage::Starter => &STARTER_SCENARIOS,
        CareerStage::Explorer => &EXPLORER_SCENARIOS,
        CareerStage::Shifter => &SHIFTER_SCENARIOS,
        CareerStage::Advancer => &ADVANCER_SCENARIOS,
        CareerStage::Unsure => &UNSURE_SCENARIOS,
    }
}
