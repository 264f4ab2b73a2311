use std::io;
use std::str::FromStr;

use super::markdown::render_markdown;
use super::views::{AssessmentReport, ScoreRow};

pub const CSV_HEADER: [&str; 4] = ["Area", "Avg Score", "Count", "Maturity"];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write CSV export: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to serialise report: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write export: {0}")]
    Io(#[from] io::Error),
    #[error("unsupported export format `{0}` (expected markdown, csv or json)")]
    UnknownFormat(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Markdown,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn content_type(self) -> mime::Mime {
        match self {
            // `mime` has no constant for markdown.
            Self::Markdown => "text/markdown; charset=utf-8"
                .parse()
                .unwrap_or(mime::TEXT_PLAIN_UTF_8),
            Self::Csv => mime::TEXT_CSV_UTF_8,
            Self::Json => mime::APPLICATION_JSON,
        }
    }

    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Markdown => "ai_readiness_report.md",
            Self::Csv => "module_scores.csv",
            Self::Json => "ai_readiness_report.json",
        }
    }

    pub fn render(self, report: &AssessmentReport) -> Result<Vec<u8>, ExportError> {
        match self {
            Self::Markdown => Ok(render_markdown(report).into_bytes()),
            Self::Csv => {
                let mut buffer = Vec::new();
                write_scores_csv(&report.scores, &mut buffer)?;
                Ok(buffer)
            }
            Self::Json => Ok(serde_json::to_vec_pretty(report)?),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

/// Writes the score table only, in report order.
pub fn write_scores_csv<W: io::Write>(rows: &[ScoreRow], writer: W) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(CSV_HEADER)?;
    for row in rows {
        csv.write_record([
            row.area_label.to_string(),
            format!("{:.2}", row.mean_score),
            row.sample_count.to_string(),
            row.band_label.to_string(),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::assessment::domain::{Area, MaturityBand};

    #[test]
    fn csv_has_fixed_header_and_two_decimal_scores() {
        let rows = vec![ScoreRow {
            area: Area::LeadershipStrategy,
            area_label: Area::LeadershipStrategy.label(),
            mean_score: 2.5,
            sample_count: 12,
            band: MaturityBand::Developing,
            band_label: MaturityBand::Developing.label(),
        }];
        let mut buffer = Vec::new();
        write_scores_csv(&rows, &mut buffer).expect("csv written");

        let text = String::from_utf8(buffer).expect("utf-8");
        assert_eq!(
            text,
            "Area,Avg Score,Count,Maturity\nLeadership & Strategy,2.50,12,Developing\n"
        );
    }

    #[test]
    fn formats_parse_case_insensitively() {
        assert_eq!("Markdown".parse::<ExportFormat>().ok(), Some(ExportFormat::Markdown));
        assert_eq!("CSV".parse::<ExportFormat>().ok(), Some(ExportFormat::Csv));
        assert!("pdf".parse::<ExportFormat>().is_err());
        assert_eq!(ExportFormat::Csv.content_type(), mime::TEXT_CSV_UTF_8);
        assert_eq!(ExportFormat::Markdown.content_type().subtype().as_str(), "markdown");
    }
}
