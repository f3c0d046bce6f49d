//! `/.well-known` endpoints

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use chrono::{NaiveDate, Utc};
use std::sync::Arc;

use super::AppState;
use crate::config::PolicyConfig;

pub const AI_TXT_PATH: &str = "/.well-known/ai.txt";
pub const DEVTOOLS_PATH: &str = "/.well-known/appspecific/com.chrome.devtools.json";

/// Body of ai.txt, stamped with `today`
pub fn ai_txt_body(policy: &PolicyConfig, today: NaiveDate) -> String {
    let mut lines = vec![
        format!("# {}", policy.heading),
        "# AI training is explicitly allowed on this content".to_string(),
        String::new(),
    ];

    for rule in &policy.agents {
        lines.push(format!("User-agent: {}", rule.user_agent));
        lines.push(format!("Allow: {}", rule.allow));
        lines.push(String::new());
    }

    lines.push("# Training data usage permissions".to_string());
    lines.push(format!("Training-data: {}", policy.training_data));
    lines.push(format!("Commercial-use: {}", policy.commercial_use));
    lines.push(format!("Attribution: {}", policy.attribution));
    lines.push(String::new());

    lines.push("# Contact information for AI training inquiries".to_string());
    lines.push(format!("Contact: {}", policy.contact));
    lines.push(format!("Policy: {}", policy.policy_url));
    lines.push(String::new());

    lines.push(format!("Description: {}", policy.description));
    if !policy.keywords.is_empty() {
        lines.push(String::new());
        lines.push(format!("Keywords: {}", policy.keywords.join(", ")));
    }
    lines.push(String::new());

    lines.push("# Last updated".to_string());
    lines.push(format!("Last-modified: {}", today.format("%Y-%m-%d")));

    let mut body = lines.join("\n");
    body.push('\n');
    body
}

/// Body of the Chrome DevTools workspace file
pub fn devtools_body() -> &'static str {
    "{}"
}

pub async fn ai_txt(State(state): State<Arc<AppState>>) -> Response {
    let policy = &state.site.config.policy;
    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CACHE_CONTROL,
                format!("public, max-age={}", policy.max_age),
            ),
        ],
        ai_txt_body(policy, Utc::now().date_naive()),
    )
        .into_response()
}

pub async fn devtools() -> Response {
    ([(header::CONTENT_TYPE, "application/json")], devtools_body()).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_txt_body() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let body = ai_txt_body(&PolicyConfig::default(), today);

        assert!(body.starts_with("# AI Training Policy for Maraikka Documentation\n"));
        assert!(body.contains("User-agent: *\nAllow: /\n"));
        for agent in ["OpenAI-GPT", "Claude-Bot", "CCBot", "anthropic-ai", "Claude-Web"] {
            assert!(body.contains(&format!("User-agent: {}\nAllow: /", agent)));
        }
        assert!(body.contains("Training-data: allowed"));
        assert!(body.contains("Commercial-use: allowed"));
        assert!(body.contains("Attribution: preferred"));
        assert!(body.contains("Policy: https://docs.maraikka.com/.well-known/ai.txt"));
        assert!(body.contains("Keywords: file encryption, data protection, security"));
        assert!(body.ends_with("Last-modified: 2024-03-09\n"));
    }

    #[test]
    fn test_ai_txt_body_without_keywords() {
        let policy = PolicyConfig {
            keywords: Vec::new(),
            ..Default::default()
        };
        let today = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        let body = ai_txt_body(&policy, today);
        assert!(!body.contains("Keywords:"));
        assert!(body.ends_with("Last-modified: 2025-12-31\n"));
    }
}
