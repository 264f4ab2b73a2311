use chrono::{TimeZone, Utc};
use readiness_ai::config::AdvisorConfig;
use readiness_ai::workflows::assessment::report::{render_markdown, ExportFormat};
use readiness_ai::workflows::assessment::{
    AssessmentSession, NoteKey, QuestionnaireArea, RatingTarget, RecommendationEngine, Score,
};

fn scored_session() -> AssessmentSession {
    let mut session = AssessmentSession::default();
    for index in 0..34 {
        session
            .submit_rating(
                RatingTarget::Question {
                    area: QuestionnaireArea::DataReadiness,
                    index,
                },
                Score::new(if index % 2 == 0 { 1 } else { 2 }).expect("valid score"),
            )
            .expect("rating accepted");
    }
    session.save_section(QuestionnaireArea::DataReadiness);
    session.save_section(QuestionnaireArea::Infrastructure);
    session
}

#[test]
fn csv_export_lists_sorted_score_table() {
    let session = scored_session();
    let report = session.report(Utc::now());

    let bytes = ExportFormat::Csv.render(&report).expect("csv rendered");
    let text = String::from_utf8(bytes).expect("utf-8");
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "Area,Avg Score,Count,Maturity");
    assert_eq!(lines[1], "Infrastructure,3.00,15,Advanced");
    assert_eq!(lines[2], "Data Readiness,1.50,34,Foundational");
    assert_eq!(lines.len(), 3);
}

#[test]
fn long_notes_are_condensed_to_eight_sentences() {
    let mut session = scored_session();
    let onboarding_notes = (1..=9)
        .map(|i| format!("Observation {i} from the kickoff workshop."))
        .collect::<Vec<_>>()
        .join(" ");
    session
        .set_note(NoteKey::Onboarding, onboarding_notes)
        .expect("note recorded");

    let report = session.report(Utc::now());
    assert!(report
        .synopsis
        .starts_with("Observation 1 from the kickoff workshop. Observation 2"));
    assert!(report
        .synopsis
        .ends_with("Observation 8 from the kickoff workshop."));
    assert!(!report.synopsis.contains("Observation 9"));
}

#[tokio::test]
async fn markdown_uses_cached_bundles_once_generated() {
    let mut session = scored_session();
    let generated_at = Utc
        .with_ymd_and_hms(2026, 6, 2, 8, 0, 0)
        .single()
        .expect("valid time");

    let before = render_markdown(&session.report(generated_at));
    assert!(before.contains("### Data Readiness (Score: 1.50/5.00)\n**Basic Recommendations:**"));
    assert!(before.contains("- Create enterprise data inventory, digitize critical records"));

    let engine = RecommendationEngine::from_config(&AdvisorConfig::default());
    session.generate_recommendations(&engine).await;

    let after = render_markdown(&session.report(generated_at));
    assert!(after.contains("**Date:** 2026-06-02T08:00:00+00:00"));
    assert!(after.contains("### Data Readiness (Score: 1.50/5.00)\n**Priority:** High"));
    assert!(after.contains("### Infrastructure (Score: 3.00/5.00)\n**Priority:** Medium"));
    assert!(after.contains("**Next Steps:**\n1. Review Infrastructure current state"));
    assert!(!after.contains("**Basic Recommendations:**"));
}
