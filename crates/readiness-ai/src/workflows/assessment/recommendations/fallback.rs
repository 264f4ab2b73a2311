//! Deterministic advice used whenever generated recommendations are unavailable.

use super::{BundleSource, RecommendationBundle};
use crate::workflows::assessment::domain::MaturityBand;

type BandTable = [[&'static str; 5]; 4];

/// Canned advice for `area_label` at `score`.
///
/// Only the five canonical area labels have bespoke tables; any other label
/// (including legacy hyphenated People labels) gets the generic list.
pub fn basic_recommendations(area_label: &str, score: f64) -> [&'static str; 5] {
    let band = MaturityBand::classify(score);
    match table_for(area_label) {
        Some(table) => table[band_row(band)],
        None => GENERIC,
    }
}

/// Full fallback bundle. A pure function of `(area_label, score)`.
pub fn fallback_bundle(area_label: &str, score: f64) -> RecommendationBundle {
    let band = MaturityBand::classify(score);
    RecommendationBundle {
        area: area_label.to_string(),
        priority: band.priority(),
        recommendations: basic_recommendations(area_label, score)
            .iter()
            .map(|item| item.to_string())
            .collect(),
        use_cases: vec![
            format!("Implement {area_label} best practices"),
            format!("Standardize {area_label} processes"),
        ],
        next_steps: vec![
            format!("Review {area_label} current state"),
            "Identify gaps".to_string(),
            "Create action plan".to_string(),
            "Implement improvements".to_string(),
            "Measure results".to_string(),
        ],
        source: BundleSource::Fallback,
    }
}

fn band_row(band: MaturityBand) -> usize {
    match band {
        MaturityBand::Foundational => 0,
        MaturityBand::Developing => 1,
        MaturityBand::Advanced => 2,
        MaturityBand::Optimized => 3,
    }
}

fn table_for(area_label: &str) -> Option<&'static BandTable> {
    match area_label {
        "Data Readiness" => Some(&DATA_READINESS),
        "Infrastructure" => Some(&INFRASTRUCTURE),
        "People — AI Use" => Some(&PEOPLE_AI_USE),
        "People — AI Build" => Some(&PEOPLE_AI_BUILD),
        "Leadership & Strategy" => Some(&LEADERSHIP),
        _ => None,
    }
}

const GENERIC: [&str; 5] = [
    "Prioritize gaps by impact/effort; iterate quarterly",
    "Focus on high-impact, low-effort improvements",
    "Establish baseline measurements and tracking",
    "Create improvement roadmap and timeline",
    "Implement continuous improvement process",
];

const DATA_READINESS: BandTable = [
    [
        "Create enterprise data inventory, digitize critical records",
        "Centralize storage (DW/lake), and assign data stewards",
        "Establish basic data governance framework",
        "Implement data quality monitoring",
        "Set up backup and recovery procedures",
    ],
    [
        "Automate ETL/ELT, define DQ rules & monitoring",
        "Stand up catalog + lineage, and enforce access controls",
        "Implement data validation and testing",
        "Establish data retention policies",
        "Create data documentation standards",
    ],
    [
        "Implement semantic layer, APIs/streaming",
        "Privacy automation, and dataset feedback loops for AI",
        "Advanced data quality and monitoring",
        "Implement data versioning and lineage",
        "Establish data governance committees",
    ],
    [
        "Optimize cost/performance, enable vector/RAG ingestion at scale",
        "Formalize observability & lifecycle management",
        "Advanced analytics and AI-ready data pipelines",
        "Implement data mesh architecture",
        "Continuous data governance optimization",
    ],
];

const INFRASTRUCTURE: BandTable = [
    [
        "Baseline cloud readiness, provision secure environments",
        "Pilot GPU/compute with guardrails",
        "Establish basic security controls",
        "Set up monitoring and alerting",
        "Create disaster recovery plan",
    ],
    [
        "Standardize MLOps/LLMOps pipelines, registry, CI/CD",
        "Implement observability and monitoring",
        "Establish security best practices",
        "Create infrastructure as code templates",
        "Set up cost monitoring and controls",
    ],
    [
        "Scale infra with autoscaling, caching, cost tracking",
        "Enforce SRE practices and advanced monitoring",
        "Implement advanced security controls",
        "Optimize performance and reliability",
        "Establish infrastructure governance",
    ],
    [
        "Optimize footprints, multi-cloud resilience",
        "Advanced eval/monitoring stacks",
        "Implement AI-specific infrastructure patterns",
        "Continuous optimization and automation",
        "Advanced security and compliance features",
    ],
];

const PEOPLE_AI_USE: BandTable = [
    [
        "Launch AI literacy 101, curated tool list",
        "Safe-use policy; run hands-on clinics",
        "Basic AI training for all employees",
        "Create AI usage guidelines",
        "Establish AI champions program",
    ],
    [
        "Role-based training, internal champions",
        "Usage playbooks; measure adoption KPIs",
        "Advanced AI tool training",
        "Create AI best practices repository",
        "Implement AI usage tracking",
    ],
    [
        "Advanced prompts/cookbooks per function",
        "Shared best-practice hub, and office hours",
        "Specialized AI training by department",
        "AI productivity measurement",
        "Cross-functional AI collaboration",
    ],
    [
        "Continuous enablement, certification",
        "Cross-team CoPs driving measurable productivity gains",
        "Advanced AI strategy and planning",
        "AI innovation and experimentation",
        "AI leadership development",
    ],
];

const PEOPLE_AI_BUILD: BandTable = [
    [
        "Upskill builders on Python, APIs, data basics",
        "Pair with mentors; start small POCs",
        "Basic AI/ML training programs",
        "Create learning paths and resources",
        "Establish AI development community",
    ],
    [
        "Train on RAG, evals, vector DBs, and secure patterns",
        "Create shared templates and frameworks",
        "Intermediate AI development training",
        "Implement development best practices",
        "Create AI development standards",
    ],
    [
        "Formal SDLC for AI with guardrails",
        "Model registry, and evaluation frameworks",
        "Advanced AI development training",
        "Implement AI development governance",
        "Create AI development platform",
    ],
    [
        "Advanced architectures, red-teaming, AB tests",
        "Platform productization and optimization",
        "AI development innovation and research",
        "Advanced AI development methodologies",
        "AI development leadership and strategy",
    ],
];

const LEADERSHIP: BandTable = [
    [
        "Define AI north star, appoint accountable leader",
        "Allocate seed budget for pilots",
        "Create basic AI strategy document",
        "Establish AI governance framework",
        "Identify initial AI use cases",
    ],
    [
        "Create 12–18m roadmap tied to business OKRs",
        "Institute steering committee & KPI tracking",
        "Develop AI investment strategy",
        "Create AI risk management framework",
        "Establish AI performance metrics",
    ],
    [
        "Scale portfolio mgmt, fund highest-ROI cases",
        "Embed AI in BU strategies",
        "Advanced AI governance and oversight",
        "Implement AI value measurement",
        "Create AI innovation programs",
    ],
    [
        "Enterprise-wide AI operating model",
        "Continuous value realization and governance audits",
        "AI transformation leadership",
        "Advanced AI strategy and planning",
        "AI ecosystem development",
    ],
];
