//! JSON snapshot of a session, written on explicit export and read back on
//! explicit import.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::domain::{
    OnboardingProfile, QuestionnaireArea, RespondentId, Score, Section, SurveyKind,
};
use super::question_bank::QuestionBank;
use super::responses::{Rating, RespondentSurvey};

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to access snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid snapshot: {0}")]
    Invalid(String),
}

/// Saved questionnaire answer as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    #[serde(default)]
    pub question: String,
    pub score: Score,
    #[serde(default)]
    pub notes: String,
}

/// Respondent survey as stored on disk. Leadership records carry no `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RespondentRecord {
    pub name: String,
    pub role: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<SurveyKind>,
    #[serde(default)]
    pub scores: Vec<Score>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub saved: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    #[serde(default)]
    pub timestamp: String,
    pub onboarding: Option<OnboardingProfile>,
    pub data_readiness: Option<Vec<QuestionRecord>>,
    pub infrastructure: Option<Vec<QuestionRecord>>,
    pub people: Option<Vec<RespondentRecord>>,
    pub leadership: Option<Vec<RespondentRecord>>,
    #[serde(default)]
    pub ai_users_score: f64,
    #[serde(default)]
    pub ai_builders_score: f64,
    #[serde(default)]
    pub ai_users_count: usize,
    #[serde(default)]
    pub ai_builders_count: usize,
    #[serde(default)]
    pub comments: BTreeMap<String, String>,
}

/// Validated snapshot sections, ready to install into a session.
#[derive(Debug, Clone, Default)]
pub struct SnapshotImport {
    pub onboarding: Option<OnboardingProfile>,
    pub data_readiness: Option<Vec<Rating>>,
    pub infrastructure: Option<Vec<Rating>>,
    pub people: Option<Vec<RespondentSurvey>>,
    pub leadership: Option<Vec<RespondentSurvey>>,
}

pub fn file_name(at: NaiveDateTime) -> String {
    format!("ai_readiness_data_{}.json", at.format("%Y%m%d_%H%M%S"))
}

impl SessionSnapshot {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, SnapshotError> {
        let file = File::open(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes `ai_readiness_data_<stamp>.json` into `dir` and returns its path.
    pub fn write_to_dir(&self, dir: &Path, at: NaiveDateTime) -> Result<PathBuf, SnapshotError> {
        let path = dir.join(file_name(at));
        let io_error = |source| SnapshotError::Io {
            path: path.clone(),
            source,
        };
        let file = File::create(&path).map_err(io_error)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush().map_err(io_error)?;
        Ok(path)
    }

    /// Checks every present section against the question bank without touching
    /// any session state.
    pub fn validate(&self, bank: &QuestionBank) -> Result<SnapshotImport, SnapshotError> {
        Ok(SnapshotImport {
            onboarding: self.onboarding.clone(),
            data_readiness: self
                .data_readiness
                .as_deref()
                .map(|records| questionnaire(QuestionnaireArea::DataReadiness, records, bank))
                .transpose()?,
            infrastructure: self
                .infrastructure
                .as_deref()
                .map(|records| questionnaire(QuestionnaireArea::Infrastructure, records, bank))
                .transpose()?,
            people: self
                .people
                .as_deref()
                .map(|records| respondents(Section::People, records, bank))
                .transpose()?,
            leadership: self
                .leadership
                .as_deref()
                .map(|records| respondents(Section::Leadership, records, bank))
                .transpose()?,
        })
    }
}

pub(crate) fn question_records(
    ratings: &[Rating],
    bank: &QuestionBank,
    area: QuestionnaireArea,
) -> Vec<QuestionRecord> {
    ratings
        .iter()
        .map(|rating| QuestionRecord {
            question: bank
                .question(area.area(), rating.question_id)
                .map(|question| question.text.to_string())
                .unwrap_or_default(),
            score: rating.score,
            notes: rating.note.clone(),
        })
        .collect()
}

pub(crate) fn respondent_records(surveys: &[RespondentSurvey]) -> Vec<RespondentRecord> {
    surveys
        .iter()
        .map(|survey| RespondentRecord {
            name: survey.name.clone(),
            role: survey.role.clone(),
            kind: (survey.kind != SurveyKind::Leadership).then_some(survey.kind),
            scores: survey.scores.clone(),
            notes: survey.note.clone(),
            saved: survey.saved,
        })
        .collect()
}

fn questionnaire(
    area: QuestionnaireArea,
    records: &[QuestionRecord],
    bank: &QuestionBank,
) -> Result<Vec<Rating>, SnapshotError> {
    let limit = bank.for_questionnaire(area).len();
    if records.len() > limit {
        return Err(SnapshotError::Invalid(format!(
            "{} has {} answers but only {limit} questions",
            area.section().label(),
            records.len()
        )));
    }

    Ok(records
        .iter()
        .enumerate()
        .map(|(question_id, record)| Rating {
            question_id,
            score: record.score,
            note: record.notes.clone(),
        })
        .collect())
}

fn respondents(
    section: Section,
    records: &[RespondentRecord],
    bank: &QuestionBank,
) -> Result<Vec<RespondentSurvey>, SnapshotError> {
    records
        .iter()
        .enumerate()
        .map(|(position, record)| {
            let kind = match section {
                Section::Leadership => SurveyKind::Leadership,
                _ => match record.kind {
                    Some(kind) if kind.section() == section => kind,
                    Some(kind) => {
                        return Err(SnapshotError::Invalid(format!(
                            "people survey {position} has type `{}`",
                            kind.label()
                        )))
                    }
                    None => {
                        return Err(SnapshotError::Invalid(format!(
                            "people survey {position} is missing its type"
                        )))
                    }
                },
            };

            let (name, role) = (record.name.trim(), record.role.trim());
            if name.is_empty() || role.is_empty() {
                return Err(SnapshotError::Invalid(format!(
                    "{} survey {position} needs both name and role",
                    section.label()
                )));
            }

            let question_count = bank.for_survey(kind).len();
            if record.scores.len() > question_count {
                return Err(SnapshotError::Invalid(format!(
                    "{} survey {position} has {} scores but only {question_count} questions",
                    section.label(),
                    record.scores.len()
                )));
            }

            // Any recorded scores mean the survey was entered.
            let entered = !record.scores.is_empty();
            let ratings = if entered {
                let mut ratings = record.scores.clone();
                ratings.resize(question_count, Score::NEUTRAL);
                ratings
            } else {
                vec![Score::NEUTRAL; question_count]
            };

            Ok(RespondentSurvey {
                id: RespondentId(0),
                name: name.to_string(),
                role: role.to_string(),
                kind,
                ratings,
                scores: record.scores.clone(),
                note: record.notes.clone(),
                saved: entered,
            })
        })
        .collect()
}

/// Mean and count of every score across `records` of `kind`.
pub(crate) fn kind_summary(records: &[RespondentRecord], kind: SurveyKind) -> (f64, usize) {
    let scores: Vec<u32> = records
        .iter()
        .filter(|record| record.kind == Some(kind))
        .flat_map(|record| record.scores.iter().map(|score| u32::from(score.value())))
        .collect();
    if scores.is_empty() {
        return (0.0, 0);
    }
    let total: u32 = scores.iter().sum();
    (f64::from(total) / scores.len() as f64, scores.len())
}
