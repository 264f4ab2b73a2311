use chrono::NaiveDate;
use readiness_ai::workflows::assessment::{
    Area, AssessmentSession, QuestionnaireArea, RatingTarget, Score, SessionSnapshot,
    SnapshotError, SurveyKind,
};

fn stamp() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 5, 14)
        .and_then(|date| date.and_hms_opt(16, 45, 3))
        .expect("valid timestamp")
}

fn seeded_session() -> AssessmentSession {
    let mut session = AssessmentSession::default();
    for index in 0..15 {
        session
            .submit_rating(
                RatingTarget::Question {
                    area: QuestionnaireArea::Infrastructure,
                    index,
                },
                Score::new(5).expect("valid score"),
            )
            .expect("rating accepted");
    }
    session.save_section(QuestionnaireArea::Infrastructure);
    session.save_section(QuestionnaireArea::DataReadiness);
    session
}

#[test]
fn export_writes_timestamped_file_that_round_trips() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut original = seeded_session();
    original
        .add_respondent("Dana", "Analyst", SurveyKind::AiUse)
        .expect("respondent added");
    original
        .save_all_respondents(SurveyKind::AiUse.section())
        .expect("people committed");

    let snapshot = original.export_snapshot(stamp());
    assert_eq!(snapshot.ai_users_count, 6);
    assert_eq!(snapshot.ai_users_score, 3.0);
    assert_eq!(snapshot.ai_builders_count, 0);

    let path = snapshot.write_to_dir(dir.path(), stamp()).expect("written");
    assert_eq!(
        path.file_name().and_then(|name| name.to_str()),
        Some("ai_readiness_data_20260514_164503.json")
    );

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).expect("readable")).expect("json");
    assert_eq!(raw["people"][0]["type"], "AI Use (End Users)");
    assert_eq!(raw["infrastructure"][0]["score"], 5);

    let mut restored = AssessmentSession::default();
    let loaded = SessionSnapshot::from_path(&path).expect("loads");
    let results = restored.import_snapshot(&loaded).expect("imports");

    let original_rows = original.results().scores;
    assert_eq!(results.scores.len(), original_rows.len());
    for (left, right) in results.scores.iter().zip(original_rows.iter()) {
        assert_eq!(left.area, right.area);
        assert_eq!(left.mean_score, right.mean_score);
        assert_eq!(left.sample_count, right.sample_count);
    }
}

#[test]
fn missing_section_leaves_existing_state_untouched() {
    let mut session = seeded_session();
    let snapshot = SessionSnapshot::from_reader(
        r#"{
            "timestamp": "2025-01-01T09:00:00",
            "data_readiness": [{"question": "q1", "score": 1, "notes": ""}],
            "ai_users_score": 4.9
        }"#
        .as_bytes(),
    )
    .expect("parses");

    let results = session.import_snapshot(&snapshot).expect("imports");
    let infrastructure = results
        .scores
        .iter()
        .find(|row| row.area == Area::Infrastructure)
        .expect("infrastructure kept");
    assert_eq!(infrastructure.mean_score, 5.0);
    assert_eq!(infrastructure.sample_count, 15);

    let data = results
        .scores
        .iter()
        .find(|row| row.area == Area::DataReadiness)
        .expect("data readiness replaced");
    assert_eq!(data.sample_count, 1);
    assert_eq!(data.mean_score, 1.0);
}

#[test]
fn failed_import_changes_nothing() {
    let mut session = seeded_session();
    let before = session.export_snapshot(stamp());

    // Valid data readiness section, invalid people section.
    let snapshot = SessionSnapshot::from_reader(
        r#"{
            "data_readiness": [{"question": "q1", "score": 1}],
            "people": [{"name": "Dana", "role": "Analyst", "scores": [4]}]
        }"#
        .as_bytes(),
    )
    .expect("parses");

    let err = session.import_snapshot(&snapshot).expect_err("invalid people");
    assert!(matches!(err, SnapshotError::Invalid(_)));
    assert_eq!(session.export_snapshot(stamp()), before);
}

#[test]
fn unreadable_file_reports_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = SessionSnapshot::from_path(&dir.path().join("missing.json")).expect_err("no file");
    assert!(matches!(err, SnapshotError::Io { .. }));
    assert!(err.to_string().contains("missing.json"));
}

#[test]
fn legacy_people_surveys_without_scores_do_not_count() {
    let mut session = AssessmentSession::default();
    let snapshot = SessionSnapshot::from_reader(
        r#"{
            "people": [
                {"name": "Dana", "role": "Analyst", "type": "AI Use (End Users)", "scores": [], "notes": "", "saved": false},
                {"name": "Lee", "role": "Engineer", "type": "AI Build (Builders)", "scores": [2, 2, 2, 2, 2, 2], "notes": "Wants evals", "saved": true}
            ]
        }"#
        .as_bytes(),
    )
    .expect("parses");

    let results = session.import_snapshot(&snapshot).expect("imports");
    assert_eq!(results.scores.len(), 1);
    assert_eq!(results.scores[0].area, Area::PeopleAiBuild);
    assert_eq!(
        session.section_comments(Area::PeopleAiBuild),
        "Lee (AI Build (Builders)): Wants evals"
    );
}
