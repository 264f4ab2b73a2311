use metrics_exporter_prometheus::PrometheusHandle;
use readiness_ai::error::AppError;
use readiness_ai::workflows::assessment::{
    AssessmentSession, QuestionnaireArea, RecommendationEngine, Section,
};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::Mutex as SessionLock;

pub(crate) type SharedSession = Arc<SessionLock<AssessmentSession>>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) sessions: InMemorySessionStore,
    pub(crate) engine: Arc<RecommendationEngine>,
    pub(crate) export_dir: PathBuf,
}

/// Assessment sessions keyed by id. Each session sits behind its own async
/// lock so recommendation generation can hold it across service calls.
#[derive(Default, Clone)]
pub(crate) struct InMemorySessionStore {
    sessions: Arc<Mutex<HashMap<String, SharedSession>>>,
    next_id: Arc<AtomicU64>,
}

impl InMemorySessionStore {
    pub(crate) fn create(&self) -> (String, SharedSession) {
        let sequence = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let id = format!("session-{sequence}");
        let session = Arc::new(SessionLock::new(AssessmentSession::default()));
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.clone(), session.clone());
        (id, session)
    }

    pub(crate) fn get(&self, id: &str) -> Result<SharedSession, AppError> {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::SessionNotFound(id.to_string()))
    }

    /// Drops the store's handle. Requests already holding the session finish
    /// against their own clone.
    pub(crate) fn remove(&self, id: &str) -> Result<(), AppError> {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AppError::SessionNotFound(id.to_string()))
    }

    pub(crate) fn len(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

pub(crate) fn questionnaire_area(section: Section) -> Option<QuestionnaireArea> {
    match section {
        Section::DataReadiness => Some(QuestionnaireArea::DataReadiness),
        Section::Infrastructure => Some(QuestionnaireArea::Infrastructure),
        Section::People | Section::Leadership => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sessions_are_isolated_by_id() {
        let store = InMemorySessionStore::default();
        let (first, handle) = store.create();
        let (second, _) = store.create();
        assert_ne!(first, second);
        assert_eq!(store.len(), 2);

        handle
            .lock()
            .await
            .save_section(QuestionnaireArea::Infrastructure);

        let other = store.get(&second).expect("second session");
        assert!(other.lock().await.results().scores.is_empty());
        let same = store.get(&first).expect("first session");
        assert_eq!(same.lock().await.results().scores.len(), 1);
    }

    #[test]
    fn removed_sessions_are_forgotten() {
        let store = InMemorySessionStore::default();
        let (id, _) = store.create();
        store.remove(&id).expect("session removed");
        assert_eq!(store.len(), 0);
        assert!(matches!(store.get(&id), Err(AppError::SessionNotFound(_))));
        assert!(matches!(store.remove(&id), Err(AppError::SessionNotFound(_))));

        let (next, _) = store.create();
        assert_ne!(next, id);
    }

    #[test]
    fn unknown_session_is_reported() {
        let store = InMemorySessionStore::default();
        match store.get("session-404") {
            Err(AppError::SessionNotFound(id)) => assert_eq!(id, "session-404"),
            other => panic!("expected missing session, got {:?}", other.map(|_| ())),
        }
    }
}
