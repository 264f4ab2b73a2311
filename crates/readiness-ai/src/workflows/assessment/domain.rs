use serde::{Deserialize, Serialize};
use std::fmt;

/// Assessment dimension. Declaration order is the canonical reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Area {
    DataReadiness,
    Infrastructure,
    PeopleAiUse,
    PeopleAiBuild,
    LeadershipStrategy,
}

impl Area {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::DataReadiness,
            Self::Infrastructure,
            Self::PeopleAiUse,
            Self::PeopleAiBuild,
            Self::LeadershipStrategy,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::DataReadiness => "Data Readiness",
            Self::Infrastructure => "Infrastructure",
            Self::PeopleAiUse => "People — AI Use",
            Self::PeopleAiBuild => "People — AI Build",
            Self::LeadershipStrategy => "Leadership & Strategy",
        }
    }

    /// Resolves a display label, including the hyphenated People labels older
    /// exports used.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Data Readiness" => Some(Self::DataReadiness),
            "Infrastructure" => Some(Self::Infrastructure),
            "People — AI Use" | "People - AI Use" | "People - AI Users" => Some(Self::PeopleAiUse),
            "People — AI Build" | "People - AI Build" | "People - AI Builders" => {
                Some(Self::PeopleAiBuild)
            }
            "Leadership & Strategy" => Some(Self::LeadershipStrategy),
            _ => None,
        }
    }

    pub const fn section(self) -> Section {
        match self {
            Self::DataReadiness => Section::DataReadiness,
            Self::Infrastructure => Section::Infrastructure,
            Self::PeopleAiUse | Self::PeopleAiBuild => Section::People,
            Self::LeadershipStrategy => Section::Leadership,
        }
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Survey tab grouping one or more areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    DataReadiness,
    Infrastructure,
    People,
    Leadership,
}

impl Section {
    pub const fn label(self) -> &'static str {
        match self {
            Self::DataReadiness => "Data Readiness",
            Self::Infrastructure => "Infrastructure",
            Self::People => "People",
            Self::Leadership => "Leadership & Strategy",
        }
    }

    /// Prefix used for note field identifiers in exported snapshots.
    pub const fn key(self) -> &'static str {
        match self {
            Self::DataReadiness => "data_readiness",
            Self::Infrastructure => "infrastructure",
            Self::People => "people",
            Self::Leadership => "leadership",
        }
    }
}

/// Single-form questionnaire sections rated once per assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionnaireArea {
    DataReadiness,
    Infrastructure,
}

impl QuestionnaireArea {
    pub const fn area(self) -> Area {
        match self {
            Self::DataReadiness => Area::DataReadiness,
            Self::Infrastructure => Area::Infrastructure,
        }
    }

    pub const fn section(self) -> Section {
        self.area().section()
    }
}

/// Per-respondent survey flavour; decides the question set and the area scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurveyKind {
    #[serde(rename = "AI Use (End Users)")]
    AiUse,
    #[serde(rename = "AI Build (Builders)")]
    AiBuild,
    #[serde(rename = "Leadership")]
    Leadership,
}

impl SurveyKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::AiUse => "AI Use (End Users)",
            Self::AiBuild => "AI Build (Builders)",
            Self::Leadership => "Leadership",
        }
    }

    pub const fn area(self) -> Area {
        match self {
            Self::AiUse => Area::PeopleAiUse,
            Self::AiBuild => Area::PeopleAiBuild,
            Self::Leadership => Area::LeadershipStrategy,
        }
    }

    pub const fn section(self) -> Section {
        self.area().section()
    }
}

/// A rating on the 1–5 agreement scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Score(u8);

impl Score {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;
    pub const NEUTRAL: Score = Score(3);

    pub fn new(value: u8) -> Result<Self, AssessmentError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(AssessmentError::ScoreOutOfRange(value))
        }
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

impl Default for Score {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl TryFrom<u8> for Score {
    type Error = AssessmentError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.0
    }
}

/// Ordinal maturity classification of a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaturityBand {
    Foundational,
    Developing,
    Advanced,
    Optimized,
}

impl MaturityBand {
    /// Lower band boundaries are exclusive: exactly 2.0 is `Developing`.
    pub fn classify(score: f64) -> Self {
        if score < 2.0 {
            Self::Foundational
        } else if score < 3.0 {
            Self::Developing
        } else if score < 4.0 {
            Self::Advanced
        } else {
            Self::Optimized
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Foundational => "Foundational",
            Self::Developing => "Developing",
            Self::Advanced => "Advanced",
            Self::Optimized => "Optimized",
        }
    }

    pub const fn priority(self) -> Priority {
        match self {
            Self::Foundational => Priority::High,
            Self::Developing | Self::Advanced => Priority::Medium,
            Self::Optimized => Priority::Low,
        }
    }
}

impl fmt::Display for MaturityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RespondentId(pub u32);

impl fmt::Display for RespondentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Typed identity of a free-text note field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NoteKey {
    Onboarding,
    Question {
        area: QuestionnaireArea,
        index: usize,
    },
    Respondent {
        section: Section,
        id: RespondentId,
    },
}

impl NoteKey {
    /// Stable field identifier used as the key in exported comment maps.
    pub fn field_id(&self) -> String {
        match self {
            NoteKey::Onboarding => "onboarding_notes".to_string(),
            NoteKey::Question { area, index } => {
                format!("{}_notes_{}", area.section().key(), index)
            }
            NoteKey::Respondent { section, id } => format!("{}_notes_{}", section.key(), id),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sector {
    #[default]
    #[serde(rename = "Banking/Finance")]
    BankingFinance,
    Insurance,
    Retail,
    Manufacturing,
    Healthcare,
    Education,
    #[serde(rename = "Public Sector")]
    PublicSector,
    Technology,
    Other,
}

impl Sector {
    pub const fn label(self) -> &'static str {
        match self {
            Self::BankingFinance => "Banking/Finance",
            Self::Insurance => "Insurance",
            Self::Retail => "Retail",
            Self::Manufacturing => "Manufacturing",
            Self::Healthcare => "Healthcare",
            Self::Education => "Education",
            Self::PublicSector => "Public Sector",
            Self::Technology => "Technology",
            Self::Other => "Other",
        }
    }
}

/// Organization identity captured before the survey starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingProfile {
    #[serde(rename = "Company Name", default)]
    pub company_name: String,
    #[serde(rename = "Sector", default)]
    pub sector: Sector,
    #[serde(rename = "Phone", default)]
    pub phone: String,
    #[serde(rename = "Address", default)]
    pub address: String,
    #[serde(rename = "Email", default)]
    pub email: String,
    #[serde(rename = "Website", default)]
    pub website: String,
    #[serde(rename = "onboarding_notes", default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssessmentError {
    #[error("score {0} is outside the 1-5 rating scale")]
    ScoreOutOfRange(u8),
    #[error("{section} has no question {index}")]
    UnknownQuestion { section: &'static str, index: usize },
    #[error("no pending respondent survey with id {0}")]
    UnknownRespondent(RespondentId),
    #[error("please provide both name and role")]
    MissingRespondentDetails,
    #[error("{kind} surveys belong to the {expected} section")]
    WrongSection {
        kind: &'static str,
        expected: &'static str,
    },
    #[error("{0} has no ratings yet")]
    NotScored(Area),
}
