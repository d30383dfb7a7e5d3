use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where the user places themselves in their career.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CareerStage {
    Starter,
    Explorer,
    Shifter,
    Advancer,
    Unsure,
}

impl CareerStage {
    pub const ALL: [Self; 5] = [
        Self::Starter,
        Self::Explorer,
        Self::Shifter,
        Self::Advancer,
        Self::Unsure,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Starter => "STARTER",
            Self::Explorer => "EXPLORER",
            Self::Shifter => "SHIFTER",
            Self::Advancer => "ADVANCER",
            Self::Unsure => "UNSURE",
        }
    }

    #[must_use]
    pub const fn option(self) -> &'static CareerStageOption {
        match self {
            Self::Starter => &CAREER_STAGE_OPTIONS[0],
            Self::Explorer => &CAREER_STAGE_OPTIONS[1],
            Self::Shifter => &CAREER_STAGE_OPTIONS[2],
            Self::Advancer => &CAREER_STAGE_OPTIONS[3],
            Self::Unsure => &CAREER_STAGE_OPTIONS[4],
        }
    }
}

impl fmt::Display for CareerStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CareerStage {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|stage| stage.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CareerStageOption {
    pub id: CareerStage,
    pub label: &'static str,
    pub description: &'static str,
    pub example: &'static str,
}

pub const CAREER_STAGE_OPTIONS: [CareerStageOption; 5] = [
    CareerStageOption {
        id: CareerStage::Starter,
        label: "Starter",
        description: "Just starting out or entering the workforce for the first time (0–2 years experience)",
        example: "Recent graduate, first job, internship",
    },
    CareerStageOption {
        id: CareerStage::Explorer,
        label: "Explorer",
        description: "Exploring options and figuring out what fits (2–7 years experience)",
        example: "Trying different roles, curious about alternatives",
    },
    CareerStageOption {
        id: CareerStage::Shifter,
        label: "Shifter",
        description: "Ready for a significant career change to a new field",
        example: "Switching industries, retraining, career pivot",
    },
    CareerStageOption {
        id: CareerStage::Advancer,
        label: "Advancer",
        description: "Looking to level up and grow within your domain (7+ years)",
        example: "Seeking promotion, leadership role, specialization",
    },
    CareerStageOption {
        id: CareerStage::Unsure,
        label: "I'm not sure yet",
        description: "Not sure where you stand, and that's perfectly okay",
        example: "Exploring your options, need clarity",
    },
];

/// Assessment dimensions introduced on the overview screen.
pub const OVERVIEW_DIMENSIONS: [(&str, &str); 5] = [
    ("Values", "What matters most to you at work"),
    ("Aptitudes", "Your natural strengths and skills"),
    ("Interests", "Fields and industries that excite you"),
    ("Preferences", "Your ideal working environment"),
    ("Scenarios", "How you handle real work situations"),
];

pub const LOCATION_SUGGESTIONS: [&str; 26] = [
    "London, UK",
    "Manchester, UK",
    "Birmingham, UK",
    "Edinburgh, UK",
    "Dublin, Ireland",
    "New York, US",
    "San Francisco, US",
    "Los Angeles, US",
    "Chicago, US",
    "Toronto, Canada",
    "Vancouver, Canada",
    "Berlin, Germany",
    "Amsterdam, Netherlands",
    "Paris, France",
    "Stockholm, Sweden",
    "Zurich, Switzerland",
    "Singapore",
    "Sydney, Australia",
    "Melbourne, Australia",
    "Dubai, UAE",
    "Tokyo, Japan",
    "Remote / Global",
    "Europe (general)",
    "North America (general)",
    "Asia-Pacific (general)",
    "Global / open to relocation",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn career_stage_wire_names() {
        assert_eq!(
            serde_json::to_string(&CareerStage::Advancer).unwrap(),
            "\"ADVANCER\""
        );
        assert_eq!("unsure".parse(), Ok(CareerStage::Unsure));
        assert!("veteran".parse::<CareerStage>().is_err());
    }

    #[test]
    fn options_line_up_with_variants() {
        for stage in CareerStage::ALL {
            assert_eq!(stage.option().id, stage);
        }
    }
}
