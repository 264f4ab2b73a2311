use std::fmt::Write;

use super::views::{AreaRecommendationView, AssessmentReport};

const UNSPECIFIED: &str = "(unspecified)";

pub fn render_markdown(report: &AssessmentReport) -> String {
    let mut output = String::new();
    let header = &report.header;

    let _ = writeln!(output, "# IB Analytics — AI Readiness Report");
    let _ = writeln!(output);
    let company = if header.company_name.trim().is_empty() {
        UNSPECIFIED
    } else {
        header.company_name.as_str()
    };
    let _ = writeln!(output, "**Company:** {company}  ");
    let _ = writeln!(output, "**Sector:** {}  ", header.sector_label);
    let _ = writeln!(output, "**Email:** {}  ", header.email);
    let _ = writeln!(output, "**Phone:** {}  ", header.phone);
    let _ = writeln!(output, "**Date:** {}", header.generated_at.to_rfc3339());
    let _ = writeln!(output);

    let _ = writeln!(output, "## Scores");
    if report.scores.is_empty() {
        let _ = writeln!(output, "_No completed assessments yet._");
    } else {
        let _ = writeln!(output, "| Area | Avg Score | Count | Maturity |");
        let _ = writeln!(output, "| --- | ---: | ---: | --- |");
        for row in &report.scores {
            let _ = writeln!(
                output,
                "| {} | {:.2} | {} | {} |",
                row.area_label, row.mean_score, row.sample_count, row.band_label
            );
        }
    }

    if let Some(overall) = &report.overall {
        let _ = writeln!(output);
        let _ = writeln!(output, "**Overall:** {:.2}/5.00  ", overall.score);
        let _ = writeln!(output, "**Maturity:** {}  ", overall.band_label);
        let _ = writeln!(output, "**Readiness:** {:.0}%", overall.readiness_pct);
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## AI Summary of Comments");
    if report.synopsis.trim().is_empty() {
        let _ = writeln!(output, "_No comments provided._");
    } else {
        let _ = writeln!(output, "{}", report.synopsis);
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## AI-Powered Recommendations");
    for section in &report.recommendations {
        render_area(&mut output, section);
    }

    output
}

fn render_area(output: &mut String, section: &AreaRecommendationView) {
    let _ = writeln!(output);
    let _ = writeln!(
        output,
        "### {} (Score: {:.2}/5.00)",
        section.area_label, section.mean_score
    );

    let Some(bundle) = &section.bundle else {
        let _ = writeln!(output, "**Basic Recommendations:**");
        for item in &section.basic_recommendations {
            let _ = writeln!(output, "- {item}");
        }
        return;
    };

    let _ = writeln!(output, "**Priority:** {}", bundle.priority.label());
    let _ = writeln!(output);
    let _ = writeln!(output, "**Key Recommendations:**");
    for item in &bundle.recommendations {
        let _ = writeln!(output, "- {item}");
    }
    let _ = writeln!(output);
    let _ = writeln!(output, "**Concrete Use Cases:**");
    for item in &bundle.use_cases {
        let _ = writeln!(output, "- {item}");
    }
    let _ = writeln!(output);
    let _ = writeln!(output, "**Next Steps:**");
    for (index, step) in bundle.next_steps.iter().enumerate() {
        let _ = writeln!(output, "{}. {step}", index + 1);
    }
}
