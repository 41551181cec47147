//! Education match scorer (10 % of the overall score).

use serde::{Deserialize, Serialize};

use crate::models::{EducationEntry, Requirement};

const NO_EDUCATION_SCORE: u32 = 50;
const BASE_SCORE: f64 = 70.0;
const HIGH_GPA: f64 = 3.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegreeLevel {
    Bachelor,
    Master,
    Doctorate,
}

impl DegreeLevel {
    const ALL: [DegreeLevel; 3] = [
        DegreeLevel::Bachelor,
        DegreeLevel::Master,
        DegreeLevel::Doctorate,
    ];

    fn markers(self) -> &'static [&'static str] {
        match self {
            DegreeLevel::Bachelor => &["bachelor"],
            DegreeLevel::Master => &["master"],
            DegreeLevel::Doctorate => &["phd", "doctorate"],
        }
    }

    /// Plain substring check on already lower-cased text.
    fn is_mentioned_in(self, lowered: &str) -> bool {
        self.markers().iter().any(|m| lowered.contains(m))
    }
}

/// Which degree levels a piece of text mentions. Levels are independent flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegreeSet {
    pub bachelor: bool,
    pub master: bool,
    pub doctorate: bool,
}

impl DegreeSet {
    pub fn classify(text: &str) -> Self {
        let lowered = text.to_lowercase();
        DegreeLevel::ALL
            .into_iter()
            .filter(|level| level.is_mentioned_in(&lowered))
            .fold(Self::default(), |set, level| set.with(level))
    }

    pub fn contains(&self, level: DegreeLevel) -> bool {
        match level {
            DegreeLevel::Bachelor => self.bachelor,
            DegreeLevel::Master => self.master,
            DegreeLevel::Doctorate => self.doctorate,
        }
    }

    fn with(mut self, level: DegreeLevel) -> Self {
        match level {
            DegreeLevel::Bachelor => self.bachelor = true,
            DegreeLevel::Master => self.master = true,
            DegreeLevel::Doctorate => self.doctorate = true,
        }
        self
    }

    fn union(self, other: Self) -> Self {
        Self {
            bachelor: self.bachelor || other.bachelor,
            master: self.master || other.master,
            doctorate: self.doctorate || other.doctorate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationScore {
    pub score: u32,
    pub required: DegreeSet,
    pub held: DegreeSet,
}

pub fn score_education(education: &[EducationEntry], requirements: &[Requirement]) -> EducationScore {
    let texts: Vec<&str> = requirements.iter().map(|r| r.text.as_str()).collect();
    let required = DegreeSet::classify(&texts.join(" "));

    if education.is_empty() {
        return EducationScore {
            score: NO_EDUCATION_SCORE,
            required,
            held: DegreeSet::default(),
        };
    }

    let held = education
        .iter()
        .map(|e| DegreeSet::classify(&e.degree))
        .fold(DegreeSet::default(), DegreeSet::union);

    let both = |level| required.contains(level) && held.contains(level);
    let mut score = if both(DegreeLevel::Doctorate) {
        100.0
    } else if both(DegreeLevel::Master) {
        95.0
    } else if both(DegreeLevel::Bachelor) {
        90.0
    } else if held.bachelor {
        85.0
    } else {
        BASE_SCORE
    };

    if education.iter().any(|e| e.gpa.is_some_and(|gpa| gpa >= HIGH_GPA)) {
        score = (score + 5.0).min(100.0);
    }
    if education.iter().any(|e| !e.achievements.is_empty()) {
        score = (score + 5.0).min(100.0);
    }

    EducationScore {
        score: score.round() as u32,
        required,
        held,
    }
}
