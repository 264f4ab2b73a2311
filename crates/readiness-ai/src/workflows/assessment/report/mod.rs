pub mod export;
pub mod markdown;
pub mod views;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::aggregate::{overall_score, readiness_percentage, AreaAggregate};
use super::domain::{Area, MaturityBand, OnboardingProfile};
use super::recommendations::{basic_recommendations, RecommendationBundle};
use views::{AreaRecommendationView, AssessmentReport, OverallView, ReportHeader, ScoreRow};

pub use export::{write_scores_csv, ExportError, ExportFormat};
pub use markdown::render_markdown;

pub const SYNOPSIS_SENTENCES: usize = 8;
const SYNOPSIS_MIN_CHARS: usize = 50;

/// Everything the report is assembled from. Aggregates are expected in
/// canonical area order.
#[derive(Debug, Clone, Copy)]
pub struct ReportInputs<'a> {
    pub aggregates: &'a [AreaAggregate],
    pub bundles: &'a BTreeMap<Area, RecommendationBundle>,
    pub onboarding: &'a OnboardingProfile,
    pub notes: &'a [String],
    pub generated_at: DateTime<Utc>,
}

pub fn synthesize(inputs: ReportInputs<'_>) -> AssessmentReport {
    let scores = score_rows(inputs.aggregates);
    let overall = overall_view(inputs.aggregates);

    let recommendations = scores
        .iter()
        .map(|row| {
            let bundle = inputs.bundles.get(&row.area).cloned();
            let basic_recommendations = if bundle.is_some() {
                Vec::new()
            } else {
                basic_recommendations(row.area_label, row.mean_score)
                    .iter()
                    .map(|item| item.to_string())
                    .collect()
            };
            AreaRecommendationView {
                area: row.area,
                area_label: row.area_label,
                mean_score: row.mean_score,
                bundle,
                basic_recommendations,
            }
        })
        .collect();

    let profile = inputs.onboarding;
    AssessmentReport {
        header: ReportHeader {
            company_name: profile.company_name.clone(),
            sector: profile.sector,
            sector_label: profile.sector.label(),
            email: profile.email.clone(),
            phone: profile.phone.clone(),
            generated_at: inputs.generated_at,
        },
        scores,
        overall,
        synopsis: synopsis(inputs.notes),
        recommendations,
    }
}

/// Score table rows sorted by descending mean.
pub fn score_rows(aggregates: &[AreaAggregate]) -> Vec<ScoreRow> {
    let mut rows: Vec<ScoreRow> = aggregates
        .iter()
        .map(|aggregate| {
            let band = aggregate.band();
            ScoreRow {
                area: aggregate.area,
                area_label: aggregate.area.label(),
                mean_score: aggregate.mean_score,
                sample_count: aggregate.sample_count,
                band,
                band_label: band.label(),
            }
        })
        .collect();
    // `sort_by` is stable, so tied areas keep canonical order.
    rows.sort_by(|a, b| b.mean_score.total_cmp(&a.mean_score));
    rows
}

pub fn overall_view(aggregates: &[AreaAggregate]) -> Option<OverallView> {
    overall_score(aggregates).map(|score| {
        let band = MaturityBand::classify(score);
        OverallView {
            score,
            band,
            band_label: band.label(),
            readiness_pct: readiness_percentage(score),
        }
    })
}

/// Joins every non-empty note with a space and condenses the result.
pub fn synopsis(notes: &[String]) -> String {
    let blob = notes
        .iter()
        .map(|note| note.trim())
        .filter(|note| !note.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    summarize_notes(&blob, SYNOPSIS_SENTENCES)
}

/// Keeps the first `max_sentences` period-delimited pieces of longer text.
/// Text under 50 characters is returned as-is.
pub fn summarize_notes(text: &str, max_sentences: usize) -> String {
    if text.trim().chars().count() < SYNOPSIS_MIN_CHARS {
        return text.to_string();
    }

    let pieces: Vec<&str> = text.split('.').collect();
    let mut summary = pieces
        .iter()
        .take(max_sentences)
        .map(|piece| piece.trim())
        .collect::<Vec<_>>()
        .join(". ");
    if pieces.len() > max_sentences {
        summary.push('.');
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_unchanged() {
        let note = "Data lives in three disconnected CRMs!!!";
        assert_eq!(note.len(), 40);
        assert_eq!(summarize_notes(note, 8), note);
    }

    #[test]
    fn long_text_keeps_first_sentences() {
        let text = (1..=9)
            .map(|i| format!("Sentence number {i} is here."))
            .collect::<Vec<_>>()
            .join(" ");
        let expected = (1..=8)
            .map(|i| format!("Sentence number {i} is here"))
            .collect::<Vec<_>>()
            .join(". ")
            + ".";
        assert_eq!(summarize_notes(&text, 8), expected);
    }

    #[test]
    fn synopsis_skips_blank_notes() {
        let notes = vec!["  ".to_string(), "Short note".to_string(), String::new()];
        assert_eq!(synopsis(&notes), "Short note");
        assert_eq!(synopsis(&[]), "");
    }
}
