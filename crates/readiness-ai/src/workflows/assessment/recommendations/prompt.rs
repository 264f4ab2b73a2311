use serde::Deserialize;

use super::{BundleSource, RecommendationBundle, RecommendationRequest};
use crate::workflows::assessment::domain::Priority;

pub const MAX_RECOMMENDATIONS: usize = 5;
pub const MAX_USE_CASES: usize = 3;
pub const MAX_NEXT_STEPS: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("response is not a JSON object: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("`{0}` is missing or empty")]
    EmptyList(&'static str),
    #[error("unrecognised priority `{0}`")]
    UnknownPriority(String),
}

impl ParseError {
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::InvalidJson(_) => "invalid_json",
            ParseError::EmptyList(_) => "empty_list",
            ParseError::UnknownPriority(_) => "unknown_priority",
        }
    }
}

pub fn build_prompt(request: &RecommendationRequest) -> String {
    format!(
        "Analyze the following feedback for an AI readiness assessment in the area of {area}.\n\
         \n\
         Current Score: {score:.2}/5.0\n\
         User Comments: {comments}\n\
         Additional Context: {context}\n\
         \n\
         Please provide:\n\
         1. 3-5 specific, actionable recommendations\n\
         2. 2-3 concrete use cases or examples\n\
         3. 5 prioritized next steps to achieve AI readiness maturity\n\
         4. Priority level (High/Medium/Low) based on the score and comments\n\
         \n\
         Format your response as a JSON object with these exact keys:\n\
         {{\n\
         \x20   \"recommendations\": [\"rec1\", \"rec2\", \"rec3\"],\n\
         \x20   \"use_cases\": [\"use case 1\", \"use case 2\"],\n\
         \x20   \"next_steps\": [\"step 1\", \"step 2\", \"step 3\", \"step 4\", \"step 5\"],\n\
         \x20   \"priority\": \"High/Medium/Low\"\n\
         }}\n\
         \n\
         Focus on practical, implementable advice for improving AI readiness, drawing on \
         what the market is currently adopting.",
        area = request.area,
        score = request.score,
        comments = request.comments_or_placeholder(),
        context = request.context,
    )
}

#[derive(Deserialize)]
struct RawBundle {
    #[serde(default)]
    recommendations: Vec<String>,
    #[serde(default)]
    use_cases: Vec<String>,
    #[serde(default)]
    next_steps: Vec<String>,
    #[serde(default)]
    priority: String,
}

/// Parses generated content into a bundle, tolerating a surrounding code fence.
pub fn parse_bundle(area: &str, content: &str) -> Result<RecommendationBundle, ParseError> {
    let raw: RawBundle = serde_json::from_str(strip_code_fence(content))?;

    let priority =
        Priority::parse(&raw.priority).ok_or_else(|| ParseError::UnknownPriority(raw.priority))?;

    Ok(RecommendationBundle {
        area: area.to_string(),
        priority,
        recommendations: bounded("recommendations", raw.recommendations, MAX_RECOMMENDATIONS)?,
        use_cases: bounded("use_cases", raw.use_cases, MAX_USE_CASES)?,
        next_steps: bounded("next_steps", raw.next_steps, MAX_NEXT_STEPS)?,
        source: BundleSource::Generated,
    })
}

fn bounded(
    field: &'static str,
    items: Vec<String>,
    max: usize,
) -> Result<Vec<String>, ParseError> {
    let items: Vec<String> = items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .take(max)
        .collect();
    if items.is_empty() {
        return Err(ParseError::EmptyList(field));
    }
    Ok(items)
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop an optional language tag on the opening fence line.
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end().trim_end_matches("```").trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fenced_json_and_truncates_lists() {
        let content = "```json\n{\"recommendations\":[\"a\",\"b\",\"c\",\"d\",\"e\",\"f\"],\
            \"use_cases\":[\"u1\",\"u2\",\"u3\",\"u4\"],\
            \"next_steps\":[\"s1\",\"s2\",\"s3\",\"s4\",\"s5\",\"s6\"],\
            \"priority\":\"high\"}\n```";

        let bundle = parse_bundle("Infrastructure", content).expect("valid bundle");
        assert_eq!(bundle.recommendations.len(), 5);
        assert_eq!(bundle.use_cases.len(), 3);
        assert_eq!(bundle.next_steps.len(), 5);
        assert_eq!(bundle.priority, Priority::High);
        assert_eq!(bundle.source, BundleSource::Generated);
    }

    #[test]
    fn rejects_missing_lists_and_unknown_priority() {
        let missing = r#"{"recommendations":["a"],"use_cases":[],"next_steps":["s"],"priority":"Low"}"#;
        assert_eq!(
            parse_bundle("Infrastructure", missing)
                .expect_err("empty use cases")
                .code(),
            "empty_list"
        );

        let priority = r#"{"recommendations":["a"],"use_cases":["u"],"next_steps":["s"],"priority":"Urgent"}"#;
        assert_eq!(
            parse_bundle("Infrastructure", priority)
                .expect_err("bad priority")
                .code(),
            "unknown_priority"
        );

        assert_eq!(
            parse_bundle("Infrastructure", "Here are some ideas")
                .expect_err("not json")
                .code(),
            "invalid_json"
        );
    }

    #[test]
    fn prompt_embeds_request_fields() {
        let request = RecommendationRequest::new("Data Readiness", 2.5)
            .with_comments("Question 3: data lives in spreadsheets");
        let prompt = build_prompt(&request);
        assert!(prompt.contains("in the area of Data Readiness."));
        assert!(prompt.contains("Current Score: 2.50/5.0"));
        assert!(prompt.contains("Question 3: data lives in spreadsheets"));
        assert!(prompt.contains("\"next_steps\""));
    }
}
