use serde::Serialize;

use super::domain::{AssessmentError, QuestionnaireArea, RespondentId, Score, Section, SurveyKind};

/// One answered statement of a questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rating {
    pub question_id: usize,
    pub score: Score,
    pub note: String,
}

impl Rating {
    pub fn neutral(question_id: usize) -> Self {
        Self {
            question_id,
            score: Score::NEUTRAL,
            note: String::new(),
        }
    }

    pub fn note(&self) -> Option<&str> {
        let trimmed = self.note.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

/// Working form plus the last saved snapshot for a single-form section.
///
/// Only the saved snapshot feeds results; the working form is what the user is
/// currently editing.
#[derive(Debug, Clone)]
pub struct QuestionnaireResponses {
    area: QuestionnaireArea,
    working: Vec<Rating>,
    saved: Vec<Rating>,
}

impl QuestionnaireResponses {
    pub fn new(area: QuestionnaireArea, question_count: usize) -> Self {
        Self {
            area,
            working: (0..question_count).map(Rating::neutral).collect(),
            saved: Vec::new(),
        }
    }

    pub fn area(&self) -> QuestionnaireArea {
        self.area
    }

    pub fn working(&self) -> &[Rating] {
        &self.working
    }

    pub fn saved(&self) -> &[Rating] {
        &self.saved
    }

    pub fn rate(&mut self, index: usize, score: Score) -> Result<(), AssessmentError> {
        self.slot(index)?.score = score;
        Ok(())
    }

    pub fn annotate(&mut self, index: usize, note: impl Into<String>) -> Result<(), AssessmentError> {
        self.slot(index)?.note = note.into();
        Ok(())
    }

    /// Replaces the saved snapshot with the current working form.
    pub fn save(&mut self) {
        self.saved = self.working.clone();
    }

    /// Restores the working form to neutral defaults; the saved snapshot is kept.
    pub fn reset(&mut self) {
        let count = self.working.len();
        self.working = (0..count).map(Rating::neutral).collect();
    }

    pub fn replace_saved(&mut self, ratings: Vec<Rating>) {
        self.saved = ratings;
    }

    pub fn saved_scores(&self) -> Vec<Score> {
        self.saved.iter().map(|rating| rating.score).collect()
    }

    fn slot(&mut self, index: usize) -> Result<&mut Rating, AssessmentError> {
        let section = self.area.section().label();
        self.working
            .get_mut(index)
            .ok_or(AssessmentError::UnknownQuestion { section, index })
    }
}

/// A single person's People or Leadership survey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RespondentSurvey {
    pub id: RespondentId,
    pub name: String,
    pub role: String,
    pub kind: SurveyKind,
    /// Ratings currently on the form.
    pub ratings: Vec<Score>,
    /// Ratings captured by the last save; empty until the survey is entered.
    pub scores: Vec<Score>,
    pub note: String,
    pub saved: bool,
}

impl RespondentSurvey {
    fn counts(&self) -> bool {
        self.saved && !self.scores.is_empty()
    }

    fn enter(&mut self) {
        self.scores = self.ratings.clone();
        self.saved = true;
    }
}

/// Pending and committed respondent surveys of one section.
#[derive(Debug, Clone)]
pub struct RespondentRoster {
    section: Section,
    question_count: usize,
    next_id: u32,
    pending: Vec<RespondentSurvey>,
    saved: Vec<RespondentSurvey>,
}

impl RespondentRoster {
    pub fn new(section: Section, question_count: usize) -> Self {
        Self {
            section,
            question_count,
            next_id: 1,
            pending: Vec::new(),
            saved: Vec::new(),
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn pending(&self) -> &[RespondentSurvey] {
        &self.pending
    }

    pub fn saved(&self) -> &[RespondentSurvey] {
        &self.saved
    }

    pub fn add(
        &mut self,
        name: &str,
        role: &str,
        kind: SurveyKind,
    ) -> Result<RespondentId, AssessmentError> {
        let (name, role) = (name.trim(), role.trim());
        if name.is_empty() || role.is_empty() {
            return Err(AssessmentError::MissingRespondentDetails);
        }
        if kind.section() != self.section {
            return Err(AssessmentError::WrongSection {
                kind: kind.label(),
                expected: kind.section().label(),
            });
        }

        let id = self.allocate_id();
        self.pending.push(RespondentSurvey {
            id,
            name: name.to_string(),
            role: role.to_string(),
            kind,
            ratings: vec![Score::NEUTRAL; self.question_count],
            scores: Vec::new(),
            note: String::new(),
            saved: false,
        });
        Ok(id)
    }

    pub fn rate(
        &mut self,
        id: RespondentId,
        index: usize,
        score: Score,
    ) -> Result<(), AssessmentError> {
        let section = self.section.label();
        let survey = self.pending_mut(id)?;
        let slot = survey
            .ratings
            .get_mut(index)
            .ok_or(AssessmentError::UnknownQuestion { section, index })?;
        *slot = score;
        Ok(())
    }

    pub fn annotate(
        &mut self,
        id: RespondentId,
        note: impl Into<String>,
    ) -> Result<(), AssessmentError> {
        self.pending_mut(id)?.note = note.into();
        Ok(())
    }

    /// Marks a pending survey as entered so it counts towards results.
    pub fn save(&mut self, id: RespondentId) -> Result<(), AssessmentError> {
        self.pending_mut(id)?.enter();
        Ok(())
    }

    pub fn remove(&mut self, id: RespondentId) -> Result<RespondentSurvey, AssessmentError> {
        let position = self
            .pending
            .iter()
            .position(|survey| survey.id == id)
            .ok_or(AssessmentError::UnknownRespondent(id))?;
        Ok(self.pending.remove(position))
    }

    /// Commits every pending survey with its current ratings.
    pub fn save_all(&mut self) -> usize {
        let committed = self.pending.len();
        for mut survey in self.pending.drain(..) {
            survey.enter();
            self.saved.push(survey);
        }
        committed
    }

    /// Discards pending surveys only.
    pub fn reset_all(&mut self) -> usize {
        let discarded = self.pending.len();
        self.pending.clear();
        discarded
    }

    /// Installs imported surveys as the committed set, renumbering them.
    pub fn replace_saved(&mut self, surveys: Vec<RespondentSurvey>) {
        self.saved.clear();
        for mut survey in surveys {
            survey.id = self.allocate_id();
            self.saved.push(survey);
        }
    }

    /// Entered surveys of `kind`, committed first, each counted once.
    pub fn counted(&self, kind: SurveyKind) -> impl Iterator<Item = &RespondentSurvey> {
        self.saved
            .iter()
            .chain(self.pending.iter())
            .filter(move |survey| survey.kind == kind && survey.counts())
    }

    pub fn scores_for(&self, kind: SurveyKind) -> Vec<Score> {
        self.counted(kind)
            .flat_map(|survey| survey.scores.iter().copied())
            .collect()
    }

    /// Every survey of `kind` with a note, committed first.
    pub fn annotated(&self, kind: SurveyKind) -> impl Iterator<Item = &RespondentSurvey> {
        self.saved
            .iter()
            .chain(self.pending.iter())
            .filter(move |survey| survey.kind == kind && !survey.note.trim().is_empty())
    }

    fn pending_mut(&mut self, id: RespondentId) -> Result<&mut RespondentSurvey, AssessmentError> {
        self.pending
            .iter_mut()
            .find(|survey| survey.id == id)
            .ok_or(AssessmentError::UnknownRespondent(id))
    }

    fn allocate_id(&mut self) -> RespondentId {
        let id = RespondentId(self.next_id);
        self.next_id += 1;
        id
    }
}
