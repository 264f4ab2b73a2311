use chrono::{Local, Utc};
use clap::Args;
use readiness_ai::config::AppConfig;
use readiness_ai::error::AppError;
use readiness_ai::workflows::assessment::report::{render_markdown, ExportFormat};
use readiness_ai::workflows::assessment::{
    AssessmentSession, NoteKey, OnboardingProfile, QuestionnaireArea, RatingTarget,
    RecommendationEngine, ResultsView, Score, Sector, SessionSnapshot, SurveyKind,
};
use std::io::Write;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Snapshot file previously exported by the service or the demo
    #[arg(long)]
    pub(crate) snapshot: PathBuf,
    /// Output format: markdown, csv or json
    #[arg(long, default_value = "markdown")]
    pub(crate) format: ExportFormat,
    /// Write the report to this file instead of stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
    /// Request recommendations from the configured text service
    #[arg(long)]
    pub(crate) generate: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Directory to write a snapshot of the demo session into
    #[arg(long)]
    pub(crate) export_dir: Option<PathBuf>,
    /// Request recommendations before rendering the report
    #[arg(long)]
    pub(crate) generate: bool,
}

pub(crate) async fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        snapshot,
        format,
        output,
        generate,
    } = args;

    let loaded = SessionSnapshot::from_path(&snapshot)?;
    let mut session = AssessmentSession::default();
    session.import_snapshot(&loaded)?;

    if generate {
        let config = AppConfig::load()?;
        let engine = RecommendationEngine::from_config(&config.advisor);
        session.generate_recommendations(&engine).await;
    }

    let bytes = format.render(&session.report(Utc::now()))?;
    match output {
        Some(path) => {
            std::fs::write(&path, &bytes)?;
            println!("Wrote {} report to {}", format.file_name(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        export_dir,
        generate,
    } = args;

    println!("AI readiness assessment demo");
    let mut session = demo_session()?;
    render_results(&session.results());

    if generate {
        let config = AppConfig::load()?;
        let engine = RecommendationEngine::from_config(&config.advisor);
        println!("\nAdvisor: {}", engine.status().label());
        let results = session.generate_recommendations(&engine).await;
        for bundle in &results.recommendations {
            println!(
                "- {} -> {} priority ({} recommendations, {:?})",
                bundle.area,
                bundle.priority,
                bundle.recommendations.len(),
                bundle.source
            );
        }
    }

    println!("\n{}", render_markdown(&session.report(Utc::now())));

    if let Some(dir) = export_dir {
        let at = Local::now().naive_local();
        let path = session.export_snapshot(at).write_to_dir(&dir, at)?;
        println!("Snapshot written to {}", path.display());
    }

    Ok(())
}

fn render_results(results: &ResultsView) {
    println!("\nArea scores");
    for row in &results.scores {
        println!(
            "- {}: {:.2} over {} ratings ({})",
            row.area_label, row.mean_score, row.sample_count, row.band_label
        );
    }
    match &results.overall {
        Some(overall) => println!(
            "Overall {:.2}/5.00 | {} | {:.0}% ready",
            overall.score, overall.band_label, overall.readiness_pct
        ),
        None => println!("Overall: not yet scored"),
    }

    println!("Progress:");
    for progress in &results.progress {
        println!(
            "  - {}: saved={} | {} pending surveys | {} saved surveys",
            progress.section_label,
            progress.saved,
            progress.pending_surveys,
            progress.saved_surveys
        );
    }
}

fn demo_session() -> Result<AssessmentSession, AppError> {
    let mut session = AssessmentSession::default();
    session.update_onboarding(OnboardingProfile {
        company_name: "Northwind Credit Union".to_string(),
        sector: Sector::BankingFinance,
        email: "transformation@northwind.example".to_string(),
        notes: "Leadership wants a member-service assistant live within two quarters."
            .to_string(),
        ..OnboardingProfile::default()
    });

    session.set_note(
        NoteKey::Question {
            area: QuestionnaireArea::DataReadiness,
            index: 0,
        },
        "Member data is split across the core banking system and two CRMs.",
    )?;

    for (area, pattern) in [
        (QuestionnaireArea::DataReadiness, [2u8, 3, 1, 2]),
        (QuestionnaireArea::Infrastructure, [3u8, 4, 3, 2]),
    ] {
        let count = session.bank().for_questionnaire(area).len();
        for index in 0..count {
            let score = Score::new(pattern[index % pattern.len()])?;
            session.submit_rating(RatingTarget::Question { area, index }, score)?;
        }
        session.save_section(area);
    }

    let respondents = [
        ("Priya", "Member Services Lead", SurveyKind::AiUse, 4u8),
        ("Tomas", "Data Engineer", SurveyKind::AiBuild, 2),
        ("Grace", "Chief Operating Officer", SurveyKind::Leadership, 3),
    ];
    for (name, role, kind, value) in respondents {
        let (id, _) = session.add_respondent(name, role, kind)?;
        let section = kind.section();
        for index in 0..session.bank().for_survey(kind).len() {
            session.submit_rating(
                RatingTarget::Respondent { section, id, index },
                Score::new(value)?,
            )?;
        }
        session.set_note(
            NoteKey::Respondent { section, id },
            format!("{name} volunteered for the pilot working group."),
        )?;
        session.save_all_respondents(section)?;
    }

    Ok(session)
}
