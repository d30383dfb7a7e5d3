//! Likert questionnaires shared by the values and aptitudes stages.
use hmac::{Hmac, Mac};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::collections::BTreeMap;
use std::fmt;

/// A 1..=5 agreement rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct LikertScore(u8);

impl LikertScore {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;
    pub const SCALE: [Self; 5] = [Self(1), Self(2), Self(3), Self(4), Self(5)];

    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= Self::MIN && value <= Self::MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Scale labels, lowest first.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self.0 {
            1 => "Strongly disagree",
            2 => "Disagree",
            3 => "Neutral",
            4 => "Agree",
            _ => "Strongly agree",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreOutOfRange(pub u8);

impl fmt::Display for ScoreOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "likert score {} is outside 1..=5", self.0)
    }
}

impl TryFrom<u8> for LikertScore {
    type Error = ScoreOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(ScoreOutOfRange(value))
    }
}

impl From<LikertScore> for u8 {
    fn from(value: LikertScore) -> Self {
        value.0
    }
}

/// Question id → rating, `None` while unanswered.
pub type LikertResponses = BTreeMap<String, Option<LikertScore>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LikertQuestion {
    pub id: &'static str,
    pub text: &'static str,
    pub group: &'static str,
}

/// Fresh response map with every question unanswered.
#[must_use]
pub fn blank_responses(questions: &[LikertQuestion]) -> LikertResponses {
    questions
        .iter()
        .map(|q| (q.id.to_string(), None))
        .collect()
}

/// Drop answers to unknown questions and add missing ones as unanswered.
pub fn normalize_responses(responses: &mut LikertResponses, questions: &[LikertQuestion]) {
    responses.retain(|id, _| questions.iter().any(|q| q.id == id));
    for q in questions {
        responses.entry(q.id.to_string()).or_insert(None);
    }
}

#[must_use]
pub fn all_answered(responses: &LikertResponses, questions: &[LikertQuestion]) -> bool {
    questions
        .iter()
        .all(|q| matches!(responses.get(q.id), Some(Some(_))))
}

#[must_use]
pub fn answered_count(responses: &LikertResponses, questions: &[LikertQuestion]) -> usize {
    questions
        .iter()
        .filter(|q| matches!(responses.get(q.id), Some(Some(_))))
        .count()
}

/// Shuffle questions inside their groups while keeping group order.
///
/// Groups appear in order of first occurrence; each group is shuffled with
/// Fisher–Yates over `rng`.
pub fn shuffle_within_groups<'a, R: Rng + ?Sized>(
    questions: &'a [LikertQuestion],
    rng: &mut R,
) -> Vec<&'a LikertQuestion> {
    let mut groups: Vec<(&str, Vec<&'a LikertQuestion>)> = Vec::new();
    for question in questions {
        match groups.iter_mut().find(|(name, _)| *name == question.group) {
            Some((_, members)) => members.push(question),
            None => groups.push((question.group, vec![question])),
        }
    }

    let mut ordered = Vec::with_capacity(questions.len());
    for (_, mut members) in groups {
        for i in (1..members.len()).rev() {
            let j = rng.gen_range(0..=i);
            members.swap(i, j);
        }
        ordered.extend(members);
    }
    ordered
}

/// Stable ordering for one mounted controller.
#[must_use]
pub fn seeded_order(
    questions: &'static [LikertQuestion],
    seed: u64,
    domain_tag: &[u8],
) -> Vec<&'static str> {
    let mut rng = SmallRng::seed_from_u64(derive_stream_seed(seed, domain_tag));
    shuffle_within_groups(questions, &mut rng)
        .into_iter()
        .map(|q| q.id)
        .collect()
}

/// Domain-separated sub-seed so stages never share a random stream.
#[must_use]
pub fn derive_stream_seed(seed: u64, domain_tag: &[u8]) -> u64 {
    let Ok(mut mac) = Hmac::<Sha256>::new_from_slice(&seed.to_le_bytes()) else {
        return seed;
    };
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let mut bytes = [0_u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}
