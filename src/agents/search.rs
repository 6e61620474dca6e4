//! Web-search/LLM-summarization agent.
//!
//! Talks to a Perplexity-style chat-completions API with a domain-specific
//! research prompt and parses the returned markdown into summary, findings,
//! and insights. Citations become source records.

use std::time::{Duration, Instant};

use serde::Deserialize;

use crate::agents::ResearchAgent;
use crate::types::{AgentResult, AppError, Domain, Result, SourceRecord};
use crate::utils::config::SearchAgentConfig;
use async_trait::async_trait;

const AGENT_NAME: &str = "search";
const COST_PER_KILOTOKEN: f64 = 0.002;
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Agent backed by a web-search/LLM-summarization API.
pub struct SearchAgent {
    client: reqwest::Client,
    config: SearchAgentConfig,
    api_key: Option<String>,
}

impl SearchAgent {
    /// Build an agent with an explicit API key (possibly absent).
    pub fn new(config: SearchAgentConfig, api_key: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();
        Self {
            client,
            config,
            api_key,
        }
    }

    /// Build an agent, resolving the API key from the configured env var.
    pub fn from_env(config: &SearchAgentConfig) -> Self {
        let api_key = std::env::var(&config.api_key_env).ok();
        Self::new(config.clone(), api_key)
    }

    fn build_system_prompt(domain: Domain) -> String {
        format!(
            "You are an expert research assistant performing deep research. \
             Focus on {}\n\n\
             Structure your response EXACTLY as follows:\n\n\
             ## Executive Summary\n[2-3 sentence overview]\n\n\
             ## Key Findings\n1. [Detailed finding with data]\n2. [Detailed finding with data]\n3. [Detailed finding with data]\n\n\
             ## Strategic Insights\n- [Strategic implication]\n- [Strategic implication]\n\n\
             Include specific data, cite sources with inline markers like [1], \
             and maintain professional analysis. Do not fabricate sources.",
            domain_focus(domain)
        )
    }
}

#[async_trait]
impl ResearchAgent for SearchAgent {
    fn name(&self) -> &str {
        AGENT_NAME
    }

    fn description(&self) -> &str {
        "Web search with LLM summarization and citations"
    }

    fn available(&self) -> bool {
        self.api_key.is_some()
    }

    fn default_max_sources(&self) -> usize {
        self.config.max_sources
    }

    async fn research(
        &self,
        query: &str,
        domain: Domain,
        max_sources: usize,
    ) -> Result<AgentResult> {
        let start = Instant::now();

        let Some(api_key) = &self.api_key else {
            tracing::warn!(agent = AGENT_NAME, "API key not configured, skipping");
            return Ok(AgentResult::failure(
                AGENT_NAME,
                format!("{} is not set", self.config.api_key_env),
            ));
        };

        let body = serde_json::json!({
            "model": self.config.model,
            "messages": [
                {"role": "system", "content": Self::build_system_prompt(domain)},
                {"role": "user", "content": format!(
                    "Research query: {query}\n\nProvide comprehensive analysis with an executive summary, key findings, and strategic insights."
                )},
            ],
            "max_tokens": self.config.max_tokens,
            "temperature": 0.2,
            "top_p": 0.9,
            "return_citations": true,
            "search_recency_filter": "month",
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Agent(format!("Search request failed: {e}")))?;

        if !response.status().is_success() {
            return Ok(AgentResult::failure(
                AGENT_NAME,
                format!("API returned {}", response.status()),
            ));
        }

        let payload: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::Agent(format!("Search response was not valid JSON: {e}")))?;

        let content = payload
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .unwrap_or_default();
        let report = parse_markdown_report(content);

        let sources: Vec<SourceRecord> = payload
            .citations
            .iter()
            .take(max_sources)
            .enumerate()
            .map(|(idx, url)| SourceRecord {
                title: format!("Source {}", idx + 1),
                url: Some(url.clone()),
                description: Some("Referenced in analysis".to_string()),
                source_type: Some("Web Search".to_string()),
                agent: Some(AGENT_NAME.to_string()),
            })
            .collect();

        let tokens = payload.usage.total_tokens;

        let mut result = AgentResult::success(AGENT_NAME);
        result.summary = Some(report.summary);
        result.findings = report.findings;
        result.insights = report.insights;
        result.source_count = Some(sources.len());
        result.sources = sources;
        result.tokens = tokens;
        result.cost = tokens as f64 / 1000.0 * COST_PER_KILOTOKEN;
        result.execution_time = start.elapsed().as_secs_f64();

        tracing::info!(
            agent = AGENT_NAME,
            sources = result.sources.len(),
            tokens,
            "search research complete"
        );

        Ok(result)
    }
}

fn domain_focus(domain: Domain) -> &'static str {
    match domain {
        Domain::Stocks => "stock market data, earnings, analyst opinions, and market trends.",
        Domain::Medical => "peer-reviewed studies, clinical trials, and regulatory updates.",
        Domain::Academic => "scholarly articles, research papers, and academic publications.",
        Domain::Technology => "technology developments, product launches, and innovations.",
        Domain::General => "comprehensive research across all relevant sources.",
    }
}

// ============= Response Parsing =============

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    citations: Vec<String>,
    #[serde(default)]
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Debug, Default, Deserialize)]
struct Usage {
    #[serde(default)]
    total_tokens: u64,
}

#[derive(Debug, Default)]
struct ParsedReport {
    summary: String,
    findings: Vec<String>,
    insights: Vec<String>,
}

/// Split a structured markdown answer into summary, findings, and insights.
///
/// Lenient by design: models do not always follow the prompt exactly, so
/// headings are matched by keyword and a missing summary section falls back
/// to the leading text.
fn parse_markdown_report(content: &str) -> ParsedReport {
    let mut report = ParsedReport::default();
    let mut heading = String::new();
    let mut section = Vec::new();

    for line in content.lines() {
        let trimmed = line.trim();
        if let Some(rest) = trimmed.strip_prefix('#') {
            flush_section(&heading, &mut section, &mut report);
            heading = rest.trim_start_matches('#').trim().to_string();
        } else if !trimmed.is_empty() {
            section.push(trimmed);
        }
    }
    flush_section(&heading, &mut section, &mut report);

    if report.summary.is_empty() {
        report.summary = content.chars().take(500).collect::<String>().trim().to_string();
    }

    report
}

fn flush_section(heading: &str, section: &mut Vec<&str>, report: &mut ParsedReport) {
    if section.is_empty() {
        return;
    }
    let lower = heading.to_lowercase();
    if lower.contains("summary") || (heading.is_empty() && report.summary.is_empty()) {
        report.summary = section.join(" ");
    } else if lower.contains("finding") {
        report.findings.extend(list_items(section));
    } else if lower.contains("insight") || lower.contains("implication") {
        report.insights.extend(list_items(section));
    }
    section.clear();
}

/// Extract bullet and numbered list items; non-list lines pass through.
fn list_items(lines: &[&str]) -> Vec<String> {
    lines
        .iter()
        .map(|line| {
            line.trim_start_matches(|c: char| {
                c.is_numeric() || c == '.' || c == ')' || c == '-' || c == '*'
            })
            .trim()
            .to_string()
        })
        .filter(|item| !item.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
## Executive Summary
The sector grew strongly this quarter, led by enterprise demand.

## Key Findings
1. Revenue increased 20 percent year over year [1]
2. Enterprise demand outpaced consumer demand by a wide margin
- Margins expanded on pricing power

## Strategic Insights
- Market sentiment is bullish on the sector
- Competitive pressure remains a medium-term risk
";

    #[test]
    fn test_parse_sections() {
        let report = parse_markdown_report(SAMPLE);
        assert_eq!(
            report.summary,
            "The sector grew strongly this quarter, led by enterprise demand."
        );
        assert_eq!(report.findings.len(), 3);
        assert_eq!(
            report.findings[0],
            "Revenue increased 20 percent year over year [1]"
        );
        assert_eq!(report.insights.len(), 2);
        assert!(report.insights[0].contains("bullish"));
    }

    #[test]
    fn test_parse_unstructured_content_falls_back_to_leading_text() {
        let report = parse_markdown_report("Just a plain paragraph with no headings at all.");
        assert_eq!(
            report.summary,
            "Just a plain paragraph with no headings at all."
        );
        assert!(report.findings.is_empty());
        assert!(report.insights.is_empty());
    }

    #[tokio::test]
    async fn test_missing_key_yields_failed_record() {
        let agent = SearchAgent::new(SearchAgentConfig::default(), None);
        assert!(!agent.available());

        let result = agent.research("q", Domain::General, 5).await.unwrap();
        assert!(!result.is_success());
        assert!(result
            .error
            .as_deref()
            .unwrap_or_default()
            .contains("SEARCH_API_KEY"));
    }

    #[test]
    fn test_domain_focus_covers_all_domains() {
        for domain in [
            Domain::Stocks,
            Domain::Medical,
            Domain::Academic,
            Domain::Technology,
            Domain::General,
        ] {
            assert!(!domain_focus(domain).is_empty());
        }
    }
}
