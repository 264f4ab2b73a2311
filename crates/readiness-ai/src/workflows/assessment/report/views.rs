use super::super::domain::{Area, MaturityBand, Sector};
use super::super::recommendations::RecommendationBundle;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ReportHeader {
    pub company_name: String,
    pub sector: Sector,
    pub sector_label: &'static str,
    pub email: String,
    pub phone: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreRow {
    pub area: Area,
    pub area_label: &'static str,
    pub mean_score: f64,
    pub sample_count: usize,
    pub band: MaturityBand,
    pub band_label: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct OverallView {
    pub score: f64,
    pub band: MaturityBand,
    pub band_label: &'static str,
    pub readiness_pct: f64,
}

/// Advice for one scored area: the cached bundle when one exists, otherwise
/// the basic table entries.
#[derive(Debug, Clone, Serialize)]
pub struct AreaRecommendationView {
    pub area: Area,
    pub area_label: &'static str,
    pub mean_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle: Option<RecommendationBundle>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub basic_recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssessmentReport {
    pub header: ReportHeader,
    pub scores: Vec<ScoreRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall: Option<OverallView>,
    pub synopsis: String,
    pub recommendations: Vec<AreaRecommendationView>,
}
