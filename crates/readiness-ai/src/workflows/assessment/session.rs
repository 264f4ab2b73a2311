//! Explicit assessment context. Every command mutates the session and hands
//! back a freshly computed [`ResultsView`].

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use super::aggregate::{aggregate_all, AreaAggregate};
use super::domain::{
    Area, AssessmentError, NoteKey, OnboardingProfile, QuestionnaireArea, RespondentId, Score,
    Section, SurveyKind,
};
use super::question_bank::QuestionBank;
use super::recommendations::{RecommendationBundle, RecommendationEngine, RecommendationRequest};
use super::report::views::{AssessmentReport, OverallView, ScoreRow};
use super::report::{overall_view, score_rows, synthesize, ReportInputs};
use super::responses::{QuestionnaireResponses, RespondentRoster, RespondentSurvey};
use super::snapshot::{
    kind_summary, question_records, respondent_records, SessionSnapshot, SnapshotError,
};

/// Which rating slot a score is submitted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingTarget {
    Question {
        area: QuestionnaireArea,
        index: usize,
    },
    Respondent {
        section: Section,
        id: RespondentId,
        index: usize,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionProgress {
    pub section: Section,
    pub section_label: &'static str,
    pub saved: bool,
    pub pending_surveys: usize,
    pub saved_surveys: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultsView {
    pub scores: Vec<ScoreRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall: Option<OverallView>,
    pub recommendations: Vec<RecommendationBundle>,
    pub progress: Vec<SectionProgress>,
}

#[derive(Debug, Clone)]
pub struct AssessmentSession {
    bank: QuestionBank,
    onboarding: OnboardingProfile,
    data_readiness: QuestionnaireResponses,
    infrastructure: QuestionnaireResponses,
    people: RespondentRoster,
    leadership: RespondentRoster,
    bundles: BTreeMap<Area, RecommendationBundle>,
}

impl Default for AssessmentSession {
    fn default() -> Self {
        Self::new(QuestionBank::standard())
    }
}

impl AssessmentSession {
    pub fn new(bank: QuestionBank) -> Self {
        let data_readiness = QuestionnaireResponses::new(
            QuestionnaireArea::DataReadiness,
            bank.for_questionnaire(QuestionnaireArea::DataReadiness).len(),
        );
        let infrastructure = QuestionnaireResponses::new(
            QuestionnaireArea::Infrastructure,
            bank.for_questionnaire(QuestionnaireArea::Infrastructure).len(),
        );
        // Both People kinds share one question count.
        let people = RespondentRoster::new(Section::People, bank.for_survey(SurveyKind::AiUse).len());
        let leadership =
            RespondentRoster::new(Section::Leadership, bank.for_survey(SurveyKind::Leadership).len());

        Self {
            bank,
            onboarding: OnboardingProfile::default(),
            data_readiness,
            infrastructure,
            people,
            leadership,
            bundles: BTreeMap::new(),
        }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn onboarding(&self) -> &OnboardingProfile {
        &self.onboarding
    }

    pub fn questionnaire(&self, area: QuestionnaireArea) -> &QuestionnaireResponses {
        match area {
            QuestionnaireArea::DataReadiness => &self.data_readiness,
            QuestionnaireArea::Infrastructure => &self.infrastructure,
        }
    }

    pub fn roster(&self, section: Section) -> Option<&RespondentRoster> {
        match section {
            Section::People => Some(&self.people),
            Section::Leadership => Some(&self.leadership),
            Section::DataReadiness | Section::Infrastructure => None,
        }
    }

    pub fn bundle(&self, area: Area) -> Option<&RecommendationBundle> {
        self.bundles.get(&area)
    }

    pub fn update_onboarding(&mut self, profile: OnboardingProfile) -> ResultsView {
        self.onboarding = profile;
        self.results()
    }

    pub fn submit_rating(
        &mut self,
        target: RatingTarget,
        score: Score,
    ) -> Result<ResultsView, AssessmentError> {
        match target {
            RatingTarget::Question { area, index } => {
                self.questionnaire_mut(area).rate(index, score)?
            }
            RatingTarget::Respondent { section, id, index } => {
                self.roster_mut(section)?.rate(id, index, score)?
            }
        }
        Ok(self.results())
    }

    pub fn set_note(
        &mut self,
        key: NoteKey,
        note: impl Into<String>,
    ) -> Result<ResultsView, AssessmentError> {
        match key {
            NoteKey::Onboarding => self.onboarding.notes = note.into(),
            NoteKey::Question { area, index } => {
                self.questionnaire_mut(area).annotate(index, note)?
            }
            NoteKey::Respondent { section, id } => self.roster_mut(section)?.annotate(id, note)?,
        }
        Ok(self.results())
    }

    pub fn save_section(&mut self, area: QuestionnaireArea) -> ResultsView {
        self.questionnaire_mut(area).save();
        info!(section = area.section().label(), "questionnaire saved");
        self.results()
    }

    pub fn reset_section(&mut self, area: QuestionnaireArea) -> ResultsView {
        self.questionnaire_mut(area).reset();
        self.results()
    }

    pub fn add_respondent(
        &mut self,
        name: &str,
        role: &str,
        kind: SurveyKind,
    ) -> Result<(RespondentId, ResultsView), AssessmentError> {
        let id = self.roster_mut(kind.section())?.add(name, role, kind)?;
        debug!(%id, kind = kind.label(), "respondent survey added");
        Ok((id, self.results()))
    }

    pub fn remove_respondent(
        &mut self,
        section: Section,
        id: RespondentId,
    ) -> Result<ResultsView, AssessmentError> {
        self.roster_mut(section)?.remove(id)?;
        Ok(self.results())
    }

    pub fn save_respondent(
        &mut self,
        section: Section,
        id: RespondentId,
    ) -> Result<ResultsView, AssessmentError> {
        self.roster_mut(section)?.save(id)?;
        Ok(self.results())
    }

    pub fn save_all_respondents(&mut self, section: Section) -> Result<ResultsView, AssessmentError> {
        let committed = self.roster_mut(section)?.save_all();
        info!(section = section.label(), committed, "respondent surveys committed");
        Ok(self.results())
    }

    pub fn reset_respondents(&mut self, section: Section) -> Result<ResultsView, AssessmentError> {
        self.roster_mut(section)?.reset_all();
        Ok(self.results())
    }

    /// Fills the bundle cache for every scored area that has none yet.
    pub async fn generate_recommendations(&mut self, engine: &RecommendationEngine) -> ResultsView {
        for aggregate in self.aggregates() {
            if self.bundles.contains_key(&aggregate.area) {
                continue;
            }
            let bundle = engine.recommend(&self.recommendation_request(&aggregate)).await;
            self.bundles.insert(aggregate.area, bundle);
        }
        self.results()
    }

    /// Drops the cached bundle for `area` and computes a fresh one.
    pub async fn regenerate_recommendation(
        &mut self,
        area: Area,
        engine: &RecommendationEngine,
    ) -> Result<ResultsView, AssessmentError> {
        let aggregate = self
            .aggregate(area)
            .ok_or(AssessmentError::NotScored(area))?;
        self.bundles.remove(&area);
        let bundle = engine.recommend(&self.recommendation_request(&aggregate)).await;
        self.bundles.insert(area, bundle);
        Ok(self.results())
    }

    pub fn results(&self) -> ResultsView {
        let aggregates = self.aggregates();
        ResultsView {
            scores: score_rows(&aggregates),
            overall: overall_view(&aggregates),
            recommendations: self.bundles.values().cloned().collect(),
            progress: self.progress(),
        }
    }

    pub fn aggregates(&self) -> Vec<AreaAggregate> {
        aggregate_all(|area| self.scores_for(area))
    }

    pub fn aggregate(&self, area: Area) -> Option<AreaAggregate> {
        self.aggregates()
            .into_iter()
            .find(|aggregate| aggregate.area == area)
    }

    /// Every non-empty note keyed by its typed identity.
    pub fn notes(&self) -> BTreeMap<NoteKey, String> {
        self.collect_notes(true)
    }

    /// Notes belonging to onboarding or to committed records. Pending
    /// respondents are left out since they never reach a snapshot.
    pub fn saved_notes(&self) -> BTreeMap<NoteKey, String> {
        self.collect_notes(false)
    }

    fn collect_notes(&self, include_pending: bool) -> BTreeMap<NoteKey, String> {
        let mut notes = BTreeMap::new();
        let mut insert = |key: NoteKey, note: &str| {
            let note = note.trim();
            if !note.is_empty() {
                notes.insert(key, note.to_string());
            }
        };

        insert(NoteKey::Onboarding, &self.onboarding.notes);
        for responses in [&self.data_readiness, &self.infrastructure] {
            for rating in responses.saved() {
                insert(
                    NoteKey::Question {
                        area: responses.area(),
                        index: rating.question_id,
                    },
                    &rating.note,
                );
            }
        }
        for roster in [&self.people, &self.leadership] {
            let pending: &[RespondentSurvey] = if include_pending {
                roster.pending()
            } else {
                &[]
            };
            for survey in roster.saved().iter().chain(pending) {
                insert(
                    NoteKey::Respondent {
                        section: roster.section(),
                        id: survey.id,
                    },
                    &survey.note,
                );
            }
        }
        notes
    }

    /// Comments fed to the recommendation prompt for `area`, joined by " | ".
    pub fn section_comments(&self, area: Area) -> String {
        let comments: Vec<String> = match area {
            Area::DataReadiness | Area::Infrastructure => {
                let responses = if area == Area::DataReadiness {
                    &self.data_readiness
                } else {
                    &self.infrastructure
                };
                responses
                    .saved()
                    .iter()
                    .filter_map(|rating| {
                        rating
                            .note()
                            .map(|note| format!("Question {}: {note}", rating.question_id + 1))
                    })
                    .collect()
            }
            Area::PeopleAiUse => survey_comments(&self.people, SurveyKind::AiUse, |survey| {
                survey.kind.label()
            }),
            Area::PeopleAiBuild => survey_comments(&self.people, SurveyKind::AiBuild, |survey| {
                survey.kind.label()
            }),
            Area::LeadershipStrategy => {
                survey_comments(&self.leadership, SurveyKind::Leadership, |survey| {
                    survey.role.as_str()
                })
            }
        };
        comments.join(" | ")
    }

    pub fn report(&self, generated_at: DateTime<Utc>) -> AssessmentReport {
        let aggregates = self.aggregates();
        let notes: Vec<String> = self.notes().into_values().collect();
        synthesize(ReportInputs {
            aggregates: &aggregates,
            bundles: &self.bundles,
            onboarding: &self.onboarding,
            notes: &notes,
            generated_at,
        })
    }

    pub fn export_snapshot(&self, at: NaiveDateTime) -> SessionSnapshot {
        let people = respondent_records(self.people.saved());
        let (ai_users_score, ai_users_count) = kind_summary(&people, SurveyKind::AiUse);
        let (ai_builders_score, ai_builders_count) = kind_summary(&people, SurveyKind::AiBuild);

        SessionSnapshot {
            timestamp: at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
            onboarding: Some(self.onboarding.clone()),
            data_readiness: Some(question_records(
                self.data_readiness.saved(),
                &self.bank,
                QuestionnaireArea::DataReadiness,
            )),
            infrastructure: Some(question_records(
                self.infrastructure.saved(),
                &self.bank,
                QuestionnaireArea::Infrastructure,
            )),
            people: Some(people),
            leadership: Some(respondent_records(self.leadership.saved())),
            ai_users_score,
            ai_builders_score,
            ai_users_count,
            ai_builders_count,
            comments: self
                .saved_notes()
                .into_iter()
                .map(|(key, note)| (key.field_id(), note))
                .collect(),
        }
    }

    /// Replaces the sections present in `snapshot`. Nothing changes unless the
    /// whole snapshot validates.
    pub fn import_snapshot(
        &mut self,
        snapshot: &SessionSnapshot,
    ) -> Result<ResultsView, SnapshotError> {
        let import = snapshot.validate(&self.bank)?;

        if let Some(profile) = import.onboarding {
            self.onboarding = profile;
        }
        if let Some(ratings) = import.data_readiness {
            self.data_readiness.replace_saved(ratings);
        }
        if let Some(ratings) = import.infrastructure {
            self.infrastructure.replace_saved(ratings);
        }
        if let Some(surveys) = import.people {
            self.people.replace_saved(surveys);
        }
        if let Some(surveys) = import.leadership {
            self.leadership.replace_saved(surveys);
        }
        info!(timestamp = %snapshot.timestamp, "snapshot imported");
        Ok(self.results())
    }

    fn scores_for(&self, area: Area) -> Vec<Score> {
        match area {
            Area::DataReadiness => self.data_readiness.saved_scores(),
            Area::Infrastructure => self.infrastructure.saved_scores(),
            Area::PeopleAiUse => self.people.scores_for(SurveyKind::AiUse),
            Area::PeopleAiBuild => self.people.scores_for(SurveyKind::AiBuild),
            Area::LeadershipStrategy => self.leadership.scores_for(SurveyKind::Leadership),
        }
    }

    fn recommendation_request(&self, aggregate: &AreaAggregate) -> RecommendationRequest {
        let comments = self.section_comments(aggregate.area);
        RecommendationRequest::for_area(aggregate.area, aggregate.mean_score, comments)
    }

    fn progress(&self) -> Vec<SectionProgress> {
        let questionnaire = |responses: &QuestionnaireResponses| SectionProgress {
            section: responses.area().section(),
            section_label: responses.area().section().label(),
            saved: !responses.saved().is_empty(),
            pending_surveys: 0,
            saved_surveys: 0,
        };
        let roster = |roster: &RespondentRoster| SectionProgress {
            section: roster.section(),
            section_label: roster.section().label(),
            saved: !roster.saved().is_empty(),
            pending_surveys: roster.pending().len(),
            saved_surveys: roster.saved().len(),
        };
        vec![
            questionnaire(&self.data_readiness),
            questionnaire(&self.infrastructure),
            roster(&self.people),
            roster(&self.leadership),
        ]
    }

    fn questionnaire_mut(&mut self, area: QuestionnaireArea) -> &mut QuestionnaireResponses {
        match area {
            QuestionnaireArea::DataReadiness => &mut self.data_readiness,
            QuestionnaireArea::Infrastructure => &mut self.infrastructure,
        }
    }

    fn roster_mut(&mut self, section: Section) -> Result<&mut RespondentRoster, AssessmentError> {
        match section {
            Section::People => Ok(&mut self.people),
            Section::Leadership => Ok(&mut self.leadership),
            Section::DataReadiness | Section::Infrastructure => Err(AssessmentError::WrongSection {
                kind: section.label(),
                expected: "People or Leadership & Strategy",
            }),
        }
    }
}

fn survey_comments<'a>(
    roster: &'a RespondentRoster,
    kind: SurveyKind,
    qualifier: impl Fn(&'a RespondentSurvey) -> &'a str,
) -> Vec<String> {
    roster
        .annotated(kind)
        .map(|survey| format!("{} ({}): {}", survey.name, qualifier(survey), survey.note.trim()))
        .collect()
}
