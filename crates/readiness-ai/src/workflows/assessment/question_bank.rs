use super::domain::{Area, QuestionnaireArea, SurveyKind};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: usize,
    pub text: &'static str,
    pub area: Area,
}

/// Immutable assessment statements, one ordered list per area.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    data_readiness: Vec<Question>,
    infrastructure: Vec<Question>,
    ai_use: Vec<Question>,
    ai_build: Vec<Question>,
    leadership: Vec<Question>,
}

impl QuestionBank {
    pub fn standard() -> Self {
        Self {
            data_readiness: numbered(Area::DataReadiness, DATA_READINESS),
            infrastructure: numbered(Area::Infrastructure, INFRASTRUCTURE),
            ai_use: numbered(Area::PeopleAiUse, PEOPLE_AI_USE),
            ai_build: numbered(Area::PeopleAiBuild, PEOPLE_AI_BUILD),
            leadership: numbered(Area::LeadershipStrategy, LEADERSHIP),
        }
    }

    pub fn for_area(&self, area: Area) -> &[Question] {
        match area {
            Area::DataReadiness => &self.data_readiness,
            Area::Infrastructure => &self.infrastructure,
            Area::PeopleAiUse => &self.ai_use,
            Area::PeopleAiBuild => &self.ai_build,
            Area::LeadershipStrategy => &self.leadership,
        }
    }

    pub fn for_questionnaire(&self, area: QuestionnaireArea) -> &[Question] {
        self.for_area(area.area())
    }

    pub fn for_survey(&self, kind: SurveyKind) -> &[Question] {
        self.for_area(kind.area())
    }

    pub fn question(&self, area: Area, index: usize) -> Option<&Question> {
        self.for_area(area).get(index)
    }
}

fn numbered(area: Area, texts: &[&'static str]) -> Vec<Question> {
    texts
        .iter()
        .enumerate()
        .map(|(id, text)| Question { id, text, area })
        .collect()
}

const DATA_READINESS: &[&str] = &[
    "An enterprise data catalog exists listing key datasets and owners",
    ">90% of critical data is digitized (vs. paper/PDF only)",
    "Data is centralized or virtually unified (DW/lake, federated catalog)",
    "Key datasets have primary keys/relationships (customer_id, account_id)",
    "Data is timestamped with clear refresh frequencies",
    "Unstructured data (PDFs/emails/audio) is organized/OCR/transcribed",
    "Completeness targets & monitoring exist (missing value thresholds)",
    "Accuracy checks & de-duplication routines run regularly",
    "Consistency rules enforced across systems (types/codes/master data)",
    "Update SLAs are met for intended uses (dashboards/AI)",
    "Validation tests are automated; failures trigger alerts",
    "Modern data platform (warehouse/lakehouse) with scalable storage",
    "Reliable ETL/ELT pipelines (batch/stream) connect source systems",
    "Governed data APIs provide access for apps/AI services",
    "Backups, DR, and versioning are implemented & tested",
    "Cost monitoring for storage/egress/compute guides lifecycle",
    "Business & technical metadata maintained in searchable catalog",
    "Automated lineage shows flow from source to consumption",
    "Semantic layer / data contracts define metrics & schemas",
    "Docs/playbooks exist for dataset usage, refresh, ownership",
    "Data owners/stewards assigned with responsibilities",
    "RBAC/ABAC and audit logs enforced for sensitive data",
    "Sensitive data classified & protected (encryption/key mgmt)",
    "3rd-party & shadow AI data flows inventoried & governed",
    "Incident response & rollback plans exist and are tested",
    "Compliance map (GDPR/CCPA/HIPAA/KYC/AML etc.) exists",
    "Consent mgmt & subject rights implemented",
    "Retention & deletion policies defined & automated where possible",
    "Privacy impact assessments (DPIA) done for new data uses",
    "Regulatory reporting data is accurate, timely, auditable",
    "Vector DB / embeddings layer available for semi/unstructured content",
    "Pipelines for OCR/ASR ingestion, chunking, and enrichment exist",
    "Human feedback loops & labeling used for improvement",
    "Evaluation & observability for drift and model performance exist",
];

const INFRASTRUCTURE: &[&str] = &[
    "Sufficient compute (CPU/GPU) capacity available on-demand",
    "Cloud/hybrid foundations in place with secure networking",
    "Environment isolation & guardrails for AI experimentation",
    "Standardized pipelines for training/eval/deployment (CI/CD)",
    "Model/Prompt registry & versioning",
    "Feature store / vector store operationalized",
    "Secure APIs & connectors to embed AI in workflows",
    "Streaming/batch data pipelines for production use",
    "Eventing/queues for robust orchestration",
    "Monitoring (performance, cost, latency) and alerting exist",
    "SLOs/SLIs for AI services defined and tracked",
    "Incident response runbooks and chaos testing",
    "Secrets mgmt, KMS, egress controls for LLM/RAG patterns",
    "Access controls (RBAC/ABAC) and audit logs enforced",
    "Regular pen-tests and red-teaming for AI systems",
];

const PEOPLE_AI_USE: &[&str] = &[
    "General AI literacy (understanding of capabilities/limits)",
    "Have you used any AI tools at work? (1:No → 5:Daily heavy use)",
    "How many distinct AI tools have you tried? (1:0 → 5:5+)",
    "Average time per week using AI tools (1:<30m → 5:5h+)",
    "Did tools measurably help productivity/quality?",
    "Willingness to learn and adopt more AI at work",
];

const PEOPLE_AI_BUILD: &[&str] = &[
    "Understands key terms (AI, ML, LLMs, embeddings, RAG, evals)",
    "Can build basic prototypes (APIs, Python, notebooks)",
    "Understands what is needed to build/ship an AI feature (data, evals, guardrails)",
    "Familiar with vector DBs, prompt versioning, and evaluation basics",
    "Can integrate AI into an app via secure patterns (auth, logging)",
    "Willingness to upskill with targeted AI training",
];

const LEADERSHIP: &[&str] = &[
    "AI is explicitly included in the 3–5 year corporate strategy",
    "A dedicated senior owner for AI exists (with decision rights)",
    "Annual budget is allocated for AI initiatives",
    "Leadership communicates AI vision and expected outcomes",
    "Use cases are prioritized by ROI/feasibility; KPIs tracked",
    "Long-term plan to improve operations with AI is defined",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_bank_has_expected_question_counts() {
        let bank = QuestionBank::standard();
        assert_eq!(bank.for_area(Area::DataReadiness).len(), 34);
        assert_eq!(bank.for_area(Area::Infrastructure).len(), 15);
        assert_eq!(bank.for_survey(SurveyKind::AiUse).len(), 6);
        assert_eq!(bank.for_survey(SurveyKind::AiBuild).len(), 6);
        assert_eq!(bank.for_survey(SurveyKind::Leadership).len(), 6);
    }

    #[test]
    fn question_ids_are_positional_and_tagged_with_area() {
        let bank = QuestionBank::standard();
        for area in Area::ordered() {
            for (index, question) in bank.for_area(area).iter().enumerate() {
                assert_eq!(question.id, index);
                assert_eq!(question.area, area);
            }
        }
        assert!(bank.question(Area::Infrastructure, 15).is_none());
    }
}
