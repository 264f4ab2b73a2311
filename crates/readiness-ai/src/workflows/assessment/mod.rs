pub mod aggregate;
pub mod domain;
mod question_bank;
pub mod recommendations;
pub mod report;
mod responses;
mod session;
pub mod snapshot;

pub use aggregate::{aggregate_scores, overall_score, AreaAggregate};
pub use domain::{
    Area, AssessmentError, MaturityBand, NoteKey, OnboardingProfile, Priority,
    QuestionnaireArea, RespondentId, Score, Section, Sector, SurveyKind,
};
pub use question_bank::{Question, QuestionBank};
pub use recommendations::{
    AdvisorStatus, BundleSource, RecommendationBundle, RecommendationEngine, RecommendationRequest,
};
pub use report::views::AssessmentReport;
pub use responses::{QuestionnaireResponses, Rating, RespondentRoster, RespondentSurvey};
pub use session::{AssessmentSession, RatingTarget, ResultsView, SectionProgress};
pub use snapshot::{SessionSnapshot, SnapshotError};
