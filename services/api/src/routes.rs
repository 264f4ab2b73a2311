use crate::infra::{questionnaire_area, AppState};
use axum::extract::{Path, Query};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post, put};
use axum::{Extension, Json, Router};
use chrono::{Local, Utc};
use readiness_ai::error::AppError;
use readiness_ai::workflows::assessment::report::ExportFormat;
use readiness_ai::workflows::assessment::{
    AdvisorStatus, Area, NoteKey, OnboardingProfile, Question, QuestionBank, QuestionnaireArea,
    RatingTarget, RespondentId, ResultsView, Score, Section, SessionSnapshot, SurveyKind,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Serialize)]
pub(crate) struct SessionResponse {
    pub(crate) session_id: String,
    pub(crate) advisor: AdvisorStatus,
    pub(crate) results: ResultsView,
}

#[derive(Debug, Serialize)]
pub(crate) struct RespondentAdded {
    pub(crate) respondent_id: RespondentId,
    pub(crate) results: ResultsView,
}

#[derive(Debug, Serialize)]
pub(crate) struct QuestionSet {
    pub(crate) area: Area,
    pub(crate) area_label: &'static str,
    pub(crate) questions: Vec<Question>,
}

/// A rating for either a questionnaire item or one respondent's survey item.
#[derive(Debug, Deserialize)]
pub(crate) struct RatingRequest {
    pub(crate) section: Section,
    #[serde(default)]
    pub(crate) respondent_id: Option<RespondentId>,
    pub(crate) index: usize,
    pub(crate) score: u8,
}

/// Omitting `section` addresses the onboarding notes.
#[derive(Debug, Deserialize)]
pub(crate) struct NoteRequest {
    #[serde(default)]
    pub(crate) section: Option<Section>,
    #[serde(default)]
    pub(crate) index: Option<usize>,
    #[serde(default)]
    pub(crate) respondent_id: Option<RespondentId>,
    pub(crate) note: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NewRespondent {
    pub(crate) name: String,
    pub(crate) role: String,
    pub(crate) kind: SurveyKind,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ReportQuery {
    #[serde(default)]
    pub(crate) format: Option<String>,
}

pub(crate) fn router() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/questions", get(questions_endpoint))
        .route("/api/v1/sessions", post(create_session))
        .route("/api/v1/sessions/:session_id", delete(delete_session))
        .route("/api/v1/sessions/:session_id/results", get(session_results))
        .route(
            "/api/v1/sessions/:session_id/onboarding",
            put(update_onboarding),
        )
        .route("/api/v1/sessions/:session_id/ratings", post(submit_rating))
        .route("/api/v1/sessions/:session_id/notes", post(set_note))
        .route(
            "/api/v1/sessions/:session_id/questionnaires/:area/save",
            post(save_questionnaire),
        )
        .route(
            "/api/v1/sessions/:session_id/questionnaires/:area/reset",
            post(reset_questionnaire),
        )
        .route(
            "/api/v1/sessions/:session_id/respondents",
            post(add_respondent),
        )
        .route(
            "/api/v1/sessions/:session_id/respondents/:section/:respondent_id",
            delete(remove_respondent),
        )
        .route(
            "/api/v1/sessions/:session_id/respondents/:section/:respondent_id/save",
            post(save_respondent),
        )
        .route(
            "/api/v1/sessions/:session_id/sections/:section/save-all",
            post(save_all_respondents),
        )
        .route(
            "/api/v1/sessions/:session_id/sections/:section/reset",
            post(reset_respondents),
        )
        .route(
            "/api/v1/sessions/:session_id/recommendations",
            post(generate_recommendations),
        )
        .route(
            "/api/v1/sessions/:session_id/recommendations/:area/regenerate",
            post(regenerate_recommendation),
        )
        .route("/api/v1/sessions/:session_id/report", get(report_endpoint))
        .route(
            "/api/v1/sessions/:session_id/snapshot",
            get(snapshot_endpoint).put(import_snapshot),
        )
        .route(
            "/api/v1/sessions/:session_id/snapshot/export",
            post(export_snapshot),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({
            "status": "ready",
            "sessions": state.sessions.len(),
            "advisor": state.engine.status().label(),
        })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn questions_endpoint() -> Json<Vec<QuestionSet>> {
    let bank = QuestionBank::standard();
    let sets = Area::ordered()
        .into_iter()
        .map(|area| QuestionSet {
            area,
            area_label: area.label(),
            questions: bank.for_area(area).to_vec(),
        })
        .collect();
    Json(sets)
}

pub(crate) async fn create_session(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<SessionResponse>) {
    let (session_id, session) = state.sessions.create();
    let results = session.lock().await.results();
    tracing::info!(%session_id, "assessment session created");
    (
        StatusCode::CREATED,
        Json(SessionResponse {
            session_id,
            advisor: state.engine.status().clone(),
            results,
        }),
    )
}

pub(crate) async fn delete_session(
    Extension(state): Extension<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(&session_id)?;
    tracing::info!(%session_id, "assessment session discarded");
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn session_results(
    Extension(state): Extension<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state.sessions.get(&session_id)?;
    let results = session.lock().await.results();
    Ok(Json(SessionResponse {
        session_id,
        advisor: state.engine.status().clone(),
        results,
    }))
}

pub(crate) async fn update_onboarding(
    Extension(state): Extension<AppState>,
    Path(session_id): Path<String>,
    Json(profile): Json<OnboardingProfile>,
) -> Result<Json<ResultsView>, AppError> {
    let session = state.sessions.get(&session_id)?;
    let mut session = session.lock().await;
    Ok(Json(session.update_onboarding(profile)))
}

pub(crate) async fn submit_rating(
    Extension(state): Extension<AppState>,
    Path(session_id): Path<String>,
    Json(request): Json<RatingRequest>,
) -> Result<Json<ResultsView>, AppError> {
    let score = Score::new(request.score)?;
    let target = rating_target(&request)?;
    let session = state.sessions.get(&session_id)?;
    let mut session = session.lock().await;
    Ok(Json(session.submit_rating(target, score)?))
}

pub(crate) async fn set_note(
    Extension(state): Extension<AppState>,
    Path(session_id): Path<String>,
    Json(request): Json<NoteRequest>,
) -> Result<Json<ResultsView>, AppError> {
    let key = note_key(&request)?;
    let session = state.sessions.get(&session_id)?;
    let mut session = session.lock().await;
    Ok(Json(session.set_note(key, request.note)?))
}

pub(crate) async fn save_questionnaire(
    Extension(state): Extension<AppState>,
    Path((session_id, area)): Path<(String, QuestionnaireArea)>,
) -> Result<Json<ResultsView>, AppError> {
    let session = state.sessions.get(&session_id)?;
    let mut session = session.lock().await;
    Ok(Json(session.save_section(area)))
}

pub(crate) async fn reset_questionnaire(
    Extension(state): Extension<AppState>,
    Path((session_id, area)): Path<(String, QuestionnaireArea)>,
) -> Result<Json<ResultsView>, AppError> {
    let session = state.sessions.get(&session_id)?;
    let mut session = session.lock().await;
    Ok(Json(session.reset_section(area)))
}

pub(crate) async fn add_respondent(
    Extension(state): Extension<AppState>,
    Path(session_id): Path<String>,
    Json(request): Json<NewRespondent>,
) -> Result<(StatusCode, Json<RespondentAdded>), AppError> {
    let session = state.sessions.get(&session_id)?;
    let mut session = session.lock().await;
    let (respondent_id, results) =
        session.add_respondent(&request.name, &request.role, request.kind)?;
    Ok((
        StatusCode::CREATED,
        Json(RespondentAdded {
            respondent_id,
            results,
        }),
    ))
}

pub(crate) async fn remove_respondent(
    Extension(state): Extension<AppState>,
    Path((session_id, section, respondent_id)): Path<(String, Section, RespondentId)>,
) -> Result<Json<ResultsView>, AppError> {
    let session = state.sessions.get(&session_id)?;
    let mut session = session.lock().await;
    Ok(Json(session.remove_respondent(section, respondent_id)?))
}

pub(crate) async fn save_respondent(
    Extension(state): Extension<AppState>,
    Path((session_id, section, respondent_id)): Path<(String, Section, RespondentId)>,
) -> Result<Json<ResultsView>, AppError> {
    let session = state.sessions.get(&session_id)?;
    let mut session = session.lock().await;
    Ok(Json(session.save_respondent(section, respondent_id)?))
}

pub(crate) async fn save_all_respondents(
    Extension(state): Extension<AppState>,
    Path((session_id, section)): Path<(String, Section)>,
) -> Result<Json<ResultsView>, AppError> {
    let session = state.sessions.get(&session_id)?;
    let mut session = session.lock().await;
    Ok(Json(session.save_all_respondents(section)?))
}

pub(crate) async fn reset_respondents(
    Extension(state): Extension<AppState>,
    Path((session_id, section)): Path<(String, Section)>,
) -> Result<Json<ResultsView>, AppError> {
    let session = state.sessions.get(&session_id)?;
    let mut session = session.lock().await;
    Ok(Json(session.reset_respondents(section)?))
}

pub(crate) async fn generate_recommendations(
    Extension(state): Extension<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ResultsView>, AppError> {
    let session = state.sessions.get(&session_id)?;
    let mut session = session.lock().await;
    Ok(Json(session.generate_recommendations(&state.engine).await))
}

pub(crate) async fn regenerate_recommendation(
    Extension(state): Extension<AppState>,
    Path((session_id, area)): Path<(String, Area)>,
) -> Result<Json<ResultsView>, AppError> {
    let session = state.sessions.get(&session_id)?;
    let mut session = session.lock().await;
    Ok(Json(
        session
            .regenerate_recommendation(area, &state.engine)
            .await?,
    ))
}

pub(crate) async fn report_endpoint(
    Extension(state): Extension<AppState>,
    Path(session_id): Path<String>,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let format = match query.format.as_deref() {
        Some(raw) => raw.parse::<ExportFormat>()?,
        None => ExportFormat::Markdown,
    };
    let session = state.sessions.get(&session_id)?;
    let report = session.lock().await.report(Utc::now());
    let body = format.render(&report)?;
    let disposition = format!("attachment; filename=\"{}\"", format.file_name());

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

pub(crate) async fn snapshot_endpoint(
    Extension(state): Extension<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let session = state.sessions.get(&session_id)?;
    let snapshot = session.lock().await.export_snapshot(Local::now().naive_local());
    Ok(Json(snapshot))
}

pub(crate) async fn import_snapshot(
    Extension(state): Extension<AppState>,
    Path(session_id): Path<String>,
    Json(snapshot): Json<SessionSnapshot>,
) -> Result<Json<ResultsView>, AppError> {
    let session = state.sessions.get(&session_id)?;
    let mut session = session.lock().await;
    Ok(Json(session.import_snapshot(&snapshot)?))
}

pub(crate) async fn export_snapshot(
    Extension(state): Extension<AppState>,
    Path(session_id): Path<String>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let session = state.sessions.get(&session_id)?;
    let at = Local::now().naive_local();
    let snapshot = session.lock().await.export_snapshot(at);
    let path = snapshot.write_to_dir(&state.export_dir, at)?;
    tracing::info!(%session_id, path = %path.display(), "snapshot exported");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "path": path.display().to_string() })),
    ))
}

fn rating_target(request: &RatingRequest) -> Result<RatingTarget, AppError> {
    match questionnaire_area(request.section) {
        Some(area) => Ok(RatingTarget::Question {
            area,
            index: request.index,
        }),
        None => {
            let id = request.respondent_id.ok_or_else(|| {
                AppError::BadRequest(format!(
                    "{} ratings need a respondent_id",
                    request.section.label()
                ))
            })?;
            Ok(RatingTarget::Respondent {
                section: request.section,
                id,
                index: request.index,
            })
        }
    }
}

fn note_key(request: &NoteRequest) -> Result<NoteKey, AppError> {
    let Some(section) = request.section else {
        return Ok(NoteKey::Onboarding);
    };
    match questionnaire_area(section) {
        Some(area) => {
            let index = request.index.ok_or_else(|| {
                AppError::BadRequest(format!("{} notes need a question index", section.label()))
            })?;
            Ok(NoteKey::Question { area, index })
        }
        None => {
            let id = request.respondent_id.ok_or_else(|| {
                AppError::BadRequest(format!("{} notes need a respondent_id", section.label()))
            })?;
            Ok(NoteKey::Respondent { section, id })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::InMemorySessionStore;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use readiness_ai::config::AdvisorConfig;
    use readiness_ai::workflows::assessment::RecommendationEngine;
    use std::path::PathBuf;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_state(export_dir: PathBuf) -> AppState {
        let recorder = PrometheusBuilder::new().build_recorder();
        AppState {
            readiness: Arc::new(AtomicBool::new(true)),
            metrics: Arc::new(recorder.handle()),
            sessions: InMemorySessionStore::default(),
            engine: Arc::new(RecommendationEngine::from_config(&AdvisorConfig::default())),
            export_dir,
        }
    }

    fn app(state: &AppState) -> Router {
        router().layer(Extension(state.clone()))
    }

    async fn send(
        state: &AppState,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, Vec<u8>) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request builds");

        let response = app(state).oneshot(request).await.expect("router responds");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        (status, bytes.to_vec())
    }

    fn json_body(bytes: &[u8]) -> serde_json::Value {
        serde_json::from_slice(bytes).expect("json body")
    }

    async fn new_session(state: &AppState) -> String {
        let (status, body) = send(state, "POST", "/api/v1/sessions", None).await;
        assert_eq!(status, StatusCode::CREATED);
        json_body(&body)["session_id"]
            .as_str()
            .expect("session id")
            .to_string()
    }

    #[tokio::test]
    async fn readiness_reports_advisor_state() {
        let state = test_state(PathBuf::from("."));
        let (status, body) = send(&state, "GET", "/ready", None).await;
        assert_eq!(status, StatusCode::OK);
        let body = json_body(&body);
        assert_eq!(body["status"], "ready");
        assert_eq!(
            body["advisor"],
            "not connected (API key not found or placeholder detected)"
        );
    }

    #[tokio::test]
    async fn questions_endpoint_lists_every_area() {
        let Json(sets) = questions_endpoint().await;
        let counts: Vec<usize> = sets.iter().map(|set| set.questions.len()).collect();
        assert_eq!(counts, vec![34, 15, 6, 6, 6]);
    }

    #[tokio::test]
    async fn questionnaire_flow_updates_results() {
        let state = test_state(PathBuf::from("."));
        let id = new_session(&state).await;

        for index in 0..15 {
            let (status, _) = send(
                &state,
                "POST",
                &format!("/api/v1/sessions/{id}/ratings"),
                Some(json!({ "section": "infrastructure", "index": index, "score": 4 })),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }
        let (status, body) = send(
            &state,
            "POST",
            &format!("/api/v1/sessions/{id}/questionnaires/infrastructure/save"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let body = json_body(&body);
        assert_eq!(body["scores"][0]["area"], "infrastructure");
        assert_eq!(body["scores"][0]["mean_score"], 4.0);
        assert_eq!(body["scores"][0]["band_label"], "Optimized");
        assert_eq!(body["overall"]["readiness_pct"], 80.0);
    }

    #[tokio::test]
    async fn deleted_session_is_no_longer_reachable() {
        let state = test_state(PathBuf::from("."));
        let id = new_session(&state).await;
        let kept = new_session(&state).await;

        let (status, body) = send(&state, "DELETE", &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_empty());
        assert_eq!(state.sessions.len(), 1);

        let (status, _) = send(&state, "GET", &format!("/api/v1/sessions/{id}/results"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&state, "DELETE", &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) =
            send(&state, "GET", &format!("/api/v1/sessions/{kept}/results"), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn invalid_inputs_map_to_client_errors() {
        let state = test_state(PathBuf::from("."));
        let id = new_session(&state).await;

        let (status, body) = send(
            &state,
            "POST",
            &format!("/api/v1/sessions/{id}/ratings"),
            Some(json!({ "section": "data_readiness", "index": 0, "score": 7 })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            json_body(&body)["error"],
            "score 7 is outside the 1-5 rating scale"
        );

        let (status, _) = send(
            &state,
            "POST",
            &format!("/api/v1/sessions/{id}/ratings"),
            Some(json!({ "section": "people", "index": 0, "score": 3 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &state,
            "POST",
            &format!("/api/v1/sessions/{id}/respondents"),
            Some(json!({ "name": "Dana", "role": "", "kind": "AI Use (End Users)" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = send(&state, "GET", "/api/v1/sessions/session-99/results", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &state,
            "GET",
            &format!("/api/v1/sessions/{id}/report?format=pdf"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn respondent_surveys_roll_up_into_people_area() {
        let state = test_state(PathBuf::from("."));
        let id = new_session(&state).await;

        let (status, body) = send(
            &state,
            "POST",
            &format!("/api/v1/sessions/{id}/respondents"),
            Some(json!({ "name": "Lee", "role": "Engineer", "kind": "AI Build (Builders)" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let respondent_id = json_body(&body)["respondent_id"]
            .as_u64()
            .expect("respondent id");

        let (status, _) = send(
            &state,
            "POST",
            &format!("/api/v1/sessions/{id}/ratings"),
            Some(json!({
                "section": "people",
                "respondent_id": respondent_id,
                "index": 0,
                "score": 5
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(
            &state,
            "POST",
            &format!("/api/v1/sessions/{id}/sections/people/save-all"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let body = json_body(&body);
        assert_eq!(body["scores"][0]["area"], "people_ai_build");
        assert_eq!(body["scores"][0]["sample_count"], 6);

        let (status, _) = send(
            &state,
            "POST",
            &format!("/api/v1/sessions/{id}/sections/infrastructure/save-all"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn report_downloads_carry_export_content_types() {
        let state = test_state(PathBuf::from("."));
        let id = new_session(&state).await;
        send(
            &state,
            "POST",
            &format!("/api/v1/sessions/{id}/questionnaires/data_readiness/save"),
            None,
        )
        .await;

        let request = Request::builder()
            .uri(format!("/api/v1/sessions/{id}/report?format=csv"))
            .body(Body::empty())
            .expect("request builds");
        let response = app(&state).oneshot(request).await.expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/csv; charset=utf-8"
        );
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        let text = String::from_utf8(bytes.to_vec()).expect("utf-8");
        assert_eq!(
            text,
            "Area,Avg Score,Count,Maturity\nData Readiness,3.00,34,Advanced\n"
        );

        let (status, body) = send(
            &state,
            "GET",
            &format!("/api/v1/sessions/{id}/report"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let markdown = String::from_utf8(body).expect("utf-8");
        assert!(markdown.contains("| Data Readiness | 3.00 | 34 | Advanced |"));
    }

    #[tokio::test]
    async fn generated_recommendations_fall_back_offline() {
        let state = test_state(PathBuf::from("."));
        let id = new_session(&state).await;
        send(
            &state,
            "POST",
            &format!("/api/v1/sessions/{id}/questionnaires/infrastructure/save"),
            None,
        )
        .await;

        let (status, body) = send(
            &state,
            "POST",
            &format!("/api/v1/sessions/{id}/recommendations"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let body = json_body(&body);
        assert_eq!(body["recommendations"][0]["source"], "fallback");
        assert_eq!(body["recommendations"][0]["priority"], "Medium");

        let (status, _) = send(
            &state,
            "POST",
            &format!("/api/v1/sessions/{id}/recommendations/leadership_strategy/regenerate"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn snapshot_export_and_import_between_sessions() {
        let dir = tempfile::tempdir().expect("temp dir");
        let state = test_state(dir.path().to_path_buf());
        let source = new_session(&state).await;
        send(
            &state,
            "POST",
            &format!("/api/v1/sessions/{source}/notes"),
            Some(json!({ "note": "Board wants a pilot by Q3." })),
        )
        .await;
        send(
            &state,
            "POST",
            &format!("/api/v1/sessions/{source}/questionnaires/infrastructure/save"),
            None,
        )
        .await;

        let (status, body) = send(
            &state,
            "POST",
            &format!("/api/v1/sessions/{source}/snapshot/export"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let path = json_body(&body)["path"]
            .as_str()
            .expect("export path")
            .to_string();
        assert!(std::path::Path::new(&path).exists());

        let (_, snapshot) = send(
            &state,
            "GET",
            &format!("/api/v1/sessions/{source}/snapshot"),
            None,
        )
        .await;
        let snapshot = json_body(&snapshot);
        assert_eq!(snapshot["comments"]["onboarding_notes"], "Board wants a pilot by Q3.");

        let target = new_session(&state).await;
        let (status, body) = send(
            &state,
            "PUT",
            &format!("/api/v1/sessions/{target}/snapshot"),
            Some(snapshot),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body(&body)["scores"][0]["sample_count"], 15);

        let (status, _) = send(
            &state,
            "PUT",
            &format!("/api/v1/sessions/{target}/snapshot"),
            Some(json!({ "people": [{ "name": "", "role": "Analyst", "type": "Leadership", "scores": [] }] })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
