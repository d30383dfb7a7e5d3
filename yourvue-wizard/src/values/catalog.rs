use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::likert::LikertQuestion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValueCategory {
    pub id: &'static str,
    pub label: &'static str,
    pub values: &'static [&'static str],
}

impl ValueCategory {
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.values.contains(&value)
    }
}

/// Looks up a category by id.
#[must_use]
pub fn category(id: &str) -> Option<&'static ValueCategory> {
    VALUE_CATEGORIES.iter().find(|cat| cat.id == id)
}

/// Looks up a category by its display label.
#[must_use]
pub fn category_by_label(label: &str) -> Option<&'static ValueCategory> {
    VALUE_CATEGORIES.iter().find(|cat| cat.label == label)
}

pub const VALUE_CATEGORIES: [ValueCategory; 7] = [
    ValueCategory {
        id: "personal_growth",
        label: "Personal Growth & Self-Development",
        values: &[
            "Achievement",
            "Ambition",
            "Authenticity",
            "Confidence",
            "Courage",
            "Curiosity",
            "Growth",
            "Initiative",
            "Integrity",
            "Knowledge",
            "Learning",
            "Perseverance",
            "Resourcefulness",
            "Self-discipline",
            "Self-expression",
            "Self-respect",
            "Vision",
            "Wisdom",
        ],
    },
    ValueCategory {
        id: "relationships",
        label: "Relationships & Community",
        values: &[
            "Belonging",
            "Caring",
            "Collaboration",
            "Commitment",
            "Community",
            "Compassion",
            "Connection",
            "Cooperation",
            "Friendship",
            "Generosity",
            "Giving back",
            "Inclusion",
            "Kindness",
            "Leadership",
            "Loyalty",
            "Parenting",
            "Service",
            "Teamwork",
            "Trust",
        ],
    },
    ValueCategory {
        id: "values_principles",
        label: "Values & Principles",
        values: &[
            "Accountability",
            "Altruism",
            "Contribution",
            "Dignity",
            "Equality",
            "Ethics",
            "Excellence",
            "Fairness",
            "Forgiveness",
            "Grace",
            "Gratitude",
            "Honesty",
            "Humility",
            "Justice",
            "Respect",
            "Responsibility",
            "Stewardship",
            "Truth",
        ],
    },
    ValueCategory {
        id: "wellbeing",
        label: "Well-being & Inner Life",
        values: &[
            "Balance",
            "Beauty",
            "Contentment",
            "Dignity",
            "Faith",
            "Grace",
            "Harmony",
            "Health",
            "Hope",
            "Joy",
            "Love",
            "Optimism",
            "Patience",
            "Peace",
            "Personal fulfillment",
            "Serenity",
            "Simplicity",
            "Spirituality",
            "Vulnerability",
            "Well-being",
            "Wholeheartedness",
        ],
    },
    ValueCategory {
        id: "work_achievement",
        label: "Work & Achievement",
        values: &[
            "Being the best",
            "Career",
            "Competence",
            "Efficiency",
            "Excellence",
            "Job security",
            "Making a difference",
            "Power",
            "Pride",
            "Recognition",
            "Reliability",
            "Security",
            "Success",
            "Usefulness",
        ],
    },
    ValueCategory {
        id: "lifestyle",
        label: "Lifestyle & Experience",
        values: &[
            "Adventure",
            "Balance",
            "Environment",
            "Family",
            "Financial stability",
            "Freedom",
            "Future generations",
            "Home",
            "Independence",
            "Leisure",
            "Legacy",
            "Nature",
            "Order",
            "Safety",
            "Sportsmanship",
            "Thrift",
            "Time",
            "Tradition",
            "Travel",
            "Wealth",
        ],
    },
    ValueCategory {
        id: "enjoyment",
        label: "Enjoyment & Lightness",
        values: &["Fun", "Humor", "Openness", "Uniqueness"],
    },
];

pub const VALUES_LIKERT_QUESTIONS: [LikertQuestion; 9] = [
    LikertQuestion {
        id: "VAL_F7_Q1",
        text: "When teammates disagree, I try to find common ground.",
        group: "people_leadership",
    },
    LikertQuestion {
        id: "VAL_F7_Q2",
        text: "I enjoy mentoring or supporting others to grow.",
        group: "people_leadership",
    },
    LikertQuestion {
        id: "VAL_F7_Q3",
        text: "People tend to look to me for guidance in a team.",
        group: "people_leadership",
    },
    LikertQuestion {
        id: "VAL_F10_Q1",
        text: "I care whether my work truly helps others.",
        group: "service_responsibility",
    },
    LikertQuestion {
        id: "VAL_F10_Q2",
        text: "I naturally offer help when others are struggling.",
        group: "service_responsibility",
    },
    LikertQuestion {
        id: "VAL_F10_Q3",
        text: "I hope my work creates social or emotional value.",
        group: "service_responsibility",
    },
    LikertQuestion {
        id: "VAL_F11_Q1",
        text: "Other people's emotions easily affect me.",
        group: "emotional_awareness",
    },
    LikertQuestion {
        id: "VAL_F11_Q2",
        text: "I try to stay professional even when I'm upset.",
        group: "emotional_awareness",
    },
    LikertQuestion {
        id: "VAL_F11_Q3",
        text: "My performance often reflects my emotional state.",
        group: "emotional_awareness",
    },
];

/// What the user most wants out of the assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CareerMotivation {
    Learning,
    Values,
    Influence,
    Meaning,
}

impl CareerMotivation {
    pub const ALL: [Self; 4] = [Self::Learning, Self::Values, Self::Influence, Self::Meaning];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Learning => "LEARNING",
            Self::Values => "VALUES",
            Self::Influence => "INFLUENCE",
            Self::Meaning => "MEANING",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Learning => "Learning & Discovery",
            Self::Values => "Values Alignment",
            Self::Influence => "Influence & Leadership",
            Self::Meaning => "Meaningful Change",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Learning => "Learning and discovering my strengths",
            Self::Values => "Finding work that fits my values",
            Self::Influence => "Building influence or leading others",
            Self::Meaning => "Changing direction to do something more meaningful",
        }
    }
}

impl fmt::Display for CareerMotivation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CareerMotivation {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LEARNING" => Ok(Self::Learning),
            "VALUES" => Ok(Self::Values),
            "INFLUENCE" => Ok(Self::Influence),
            "MEANING" => Ok(Self::Meaning),
            _ => Err(()),
        }
    }
}
