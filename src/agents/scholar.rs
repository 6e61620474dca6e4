//! Academic/news agent.
//!
//! Routes by domain: academic and medical queries go to the arXiv Atom API
//! (no key required); everything else goes to a news API when a key is
//! configured, falling back to arXiv otherwise. The Atom feed is parsed
//! with lightweight tag extraction rather than a full XML parser; arXiv's
//! feed is machine-generated and regular enough for that to hold.

use std::time::{Duration, Instant};

use serde::Deserialize;

use crate::agents::ResearchAgent;
use crate::types::{AgentResult, AppError, Domain, Result, SourceRecord};
use crate::utils::config::ScholarAgentConfig;
use async_trait::async_trait;

const AGENT_NAME: &str = "scholar";
const REQUEST_TIMEOUT_SECS: u64 = 30;
const DESCRIPTION_PREVIEW_CHARS: usize = 200;

/// Agent backed by academic and news APIs.
pub struct ScholarAgent {
    client: reqwest::Client,
    config: ScholarAgentConfig,
    news_api_key: Option<String>,
}

impl ScholarAgent {
    /// Build an agent with an explicit news API key (possibly absent).
    pub fn new(config: ScholarAgentConfig, news_api_key: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();
        Self {
            client,
            config,
            news_api_key,
        }
    }

    /// Build an agent, resolving the news API key from the configured env var.
    pub fn from_env(config: &ScholarAgentConfig) -> Self {
        let news_api_key = std::env::var(&config.news_api_key_env).ok();
        Self::new(config.clone(), news_api_key)
    }

    async fn fetch_arxiv(&self, query: &str, max_results: usize) -> Result<Vec<SourceRecord>> {
        let search_query = format!("all:{query}");
        let max_results = max_results.to_string();
        let response = self
            .client
            .get(format!("{}/query", self.config.arxiv_base_url))
            .query(&[
                ("search_query", search_query.as_str()),
                ("start", "0"),
                ("max_results", max_results.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Agent(format!("arXiv request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::Agent(format!(
                "arXiv returned {}",
                response.status()
            )));
        }

        let xml = response
            .text()
            .await
            .map_err(|e| AppError::Agent(format!("arXiv response unreadable: {e}")))?;

        Ok(parse_arxiv_feed(&xml))
    }

    async fn fetch_news(
        &self,
        query: &str,
        api_key: &str,
        max_results: usize,
    ) -> Result<Vec<SourceRecord>> {
        let page_size = max_results.to_string();
        let response = self
            .client
            .get(format!("{}/everything", self.config.news_base_url))
            .query(&[
                ("q", query),
                ("pageSize", page_size.as_str()),
                ("sortBy", "relevancy"),
                ("apiKey", api_key),
            ])
            .send()
            .await
            .map_err(|e| AppError::Agent(format!("News request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::Agent(format!(
                "News API returned {}",
                response.status()
            )));
        }

        let payload: NewsResponse = response
            .json()
            .await
            .map_err(|e| AppError::Agent(format!("News response was not valid JSON: {e}")))?;

        Ok(payload
            .articles
            .into_iter()
            .map(|article| SourceRecord {
                title: article.title,
                url: article.url,
                description: article.description,
                source_type: Some("News".to_string()),
                agent: Some(AGENT_NAME.to_string()),
            })
            .collect())
    }
}

#[async_trait]
impl ResearchAgent for ScholarAgent {
    fn name(&self) -> &str {
        AGENT_NAME
    }

    fn description(&self) -> &str {
        "Academic papers and news coverage"
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

        let use_arxiv = matches!(domain, Domain::Academic | Domain::Medical);
        let (sources, kind) = if use_arxiv {
            (self.fetch_arxiv(query, max_sources).await?, "academic papers")
        } else if let Some(api_key) = &self.news_api_key {
            (
                self.fetch_news(query, api_key, max_sources).await?,
                "news articles",
            )
        } else {
            tracing::debug!(
                agent = AGENT_NAME,
                "no news API key, falling back to arXiv"
            );
            (self.fetch_arxiv(query, max_sources).await?, "academic papers")
        };

        let mut result = AgentResult::success(AGENT_NAME);
        result.summary = Some(format!("Retrieved {} {} on '{}'", sources.len(), kind, query));
        if sources.is_empty() {
            result.findings = vec![format!("No {kind} matched the query '{query}'")];
        } else {
            result.findings = vec![
                format!("Found {} {} on {}", sources.len(), kind, query),
                format!("Topic has active coverage across {kind}"),
            ];
            result.insights =
                vec!["Cross-referencing published sources raises reliability of the findings"
                    .to_string()];
        }
        result.source_count = Some(sources.len());
        result.sources = sources;
        result.execution_time = start.elapsed().as_secs_f64();

        tracing::info!(
            agent = AGENT_NAME,
            sources = result.sources.len(),
            kind,
            "scholar research complete"
        );

        Ok(result)
    }
}

// ============= News Wire Types =============

#[derive(Debug, Deserialize)]
struct NewsResponse {
    #[serde(default)]
    articles: Vec<NewsArticle>,
}

#[derive(Debug, Deserialize)]
struct NewsArticle {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

// ============= Atom Feed Parsing =============

/// Extract source records from an arXiv Atom feed.
fn parse_arxiv_feed(xml: &str) -> Vec<SourceRecord> {
    extract_entries(xml)
        .into_iter()
        .filter_map(parse_entry)
        .collect()
}

fn parse_entry(entry: &str) -> Option<SourceRecord> {
    let title = normalize_whitespace(&extract_tag_text(entry, "title")?);
    let url = extract_tag_text(entry, "id");
    let description = extract_tag_text(entry, "summary").map(|summary| {
        normalize_whitespace(&summary)
            .chars()
            .take(DESCRIPTION_PREVIEW_CHARS)
            .collect::<String>()
    });

    Some(SourceRecord {
        title,
        url,
        description,
        source_type: Some("Academic".to_string()),
        agent: Some(AGENT_NAME.to_string()),
    })
}

fn extract_entries(xml: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut rest = xml;
    while let Some(start) = rest.find("<entry>") {
        let Some(end) = rest[start..].find("</entry>") else {
            break;
        };
        entries.push(&rest[start + "<entry>".len()..start + end]);
        rest = &rest[start + end + "</entry>".len()..];
    }
    entries
}

fn extract_tag_text(xml: &str, tag: &str) -> Option<String> {
    let open = format!("<{tag}");
    let close = format!("</{tag}>");
    let start = xml.find(&open)?;
    let body_start = start + xml[start..].find('>')? + 1;
    let body_end = body_start + xml[body_start..].find(&close)?;
    Some(unescape_xml(xml[body_start..body_end].trim()))
}

fn unescape_xml(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>ArXiv Query Results</title>
  <entry>
    <id>http://arxiv.org/abs/2401.00001v1</id>
    <title>Deep Learning for
        Protein Folding</title>
    <summary>We study folding &amp; structure prediction.</summary>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/2401.00002v1</id>
    <title>Transformer Scaling Laws</title>
    <summary>An empirical analysis of scaling.</summary>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_arxiv_feed() {
        let sources = parse_arxiv_feed(SAMPLE_FEED);
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].title, "Deep Learning for Protein Folding");
        assert_eq!(
            sources[0].url.as_deref(),
            Some("http://arxiv.org/abs/2401.00001v1")
        );
        assert_eq!(
            sources[0].description.as_deref(),
            Some("We study folding & structure prediction.")
        );
        assert_eq!(sources[0].source_type.as_deref(), Some("Academic"));
    }

    #[test]
    fn test_empty_feed_yields_no_sources() {
        assert!(parse_arxiv_feed("<feed></feed>").is_empty());
    }

    #[test]
    fn test_truncated_entry_is_skipped() {
        let xml = "<feed><entry><id>x</id><title>No closing entry";
        assert!(parse_arxiv_feed(xml).is_empty());
    }

    #[test]
    fn test_scholar_is_always_available() {
        let agent = ScholarAgent::new(ScholarAgentConfig::default(), None);
        assert!(agent.available());
    }
}
