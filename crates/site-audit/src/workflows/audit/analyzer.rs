use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::business::{extract_business_info, normalize_url};
use super::domain::AuditResult;
use super::fallback::synthetic_result;
use super::markup::MarkupDocument;
use super::scoring::score_document;
use crate::config::AuditConfig;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} timed out")]
    Timeout { url: String },
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuditRequestError {
    #[error("business url must not be empty")]
    EmptyUrl,
}

/// Retrieves the landing page markup for an audit.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Browser-like HTTP fetcher with a hard per-request timeout.
#[derive(Clone)]
pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    pub fn new(config: &AuditConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.fetch_timeout)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let transport = |source: reqwest::Error| {
            if source.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::Transport {
                    url: url.to_string(),
                    source,
                }
            }
        };

        let response = self.client.get(url).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        response.text().await.map_err(transport)
    }
}

/// Fetch, score, and aggregate one business website.
pub struct AuditAnalyzer<F> {
    fetcher: F,
}

impl<F> AuditAnalyzer<F>
where
    F: PageFetcher,
{
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Audits `business_url`, substituting a synthetic result when the page cannot be
    /// fetched. Only an empty input is reported to the caller.
    pub async fn analyze(&self, business_url: &str) -> Result<AuditResult, AuditRequestError> {
        self.analyze_with_rng(business_url, &mut StdRng::from_entropy())
            .await
    }

    pub async fn analyze_with_rng<R>(
        &self,
        business_url: &str,
        rng: &mut R,
    ) -> Result<AuditResult, AuditRequestError>
    where
        R: Rng + Send,
    {
        let input = business_url.trim();
        if input.is_empty() {
            return Err(AuditRequestError::EmptyUrl);
        }

        let url = normalize_url(input);
        info!(url = %url, "starting website audit");

        match self.fetcher.fetch(&url).await {
            Ok(html) => {
                debug!(url = %url, bytes = html.len(), "fetched landing page");
                let result = score_page(&html, &url);
                info!(
                    url = %url,
                    total_score = result.total_score,
                    industry = result.business_info.industry.as_deref().unwrap_or_default(),
                    "website audit complete"
                );
                Ok(result)
            }
            Err(err) => {
                warn!(url = %url, error = %err, "website fetch failed; using synthetic audit");
                Ok(synthetic_result(input, rng))
            }
        }
    }
}

/// Parses and scores already-fetched markup. Kept synchronous: the parsed DOM is not `Send`.
pub fn score_page(html: &str, url: &str) -> AuditResult {
    let document = MarkupDocument::parse(html, url);
    let business_info = extract_business_info(&document);
    let parameters = score_document(&document);
    AuditResult::new(parameters, business_info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::audit::domain::ParameterKind;
    use std::sync::Mutex;

    struct FakeFetcher {
        response: Result<String, u16>,
        requested: Mutex<Vec<String>>,
    }

    impl FakeFetcher {
        fn serving(html: &str) -> Self {
            Self {
                response: Ok(html.to_string()),
                requested: Mutex::new(Vec::new()),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                response: Err(status),
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PageFetcher for FakeFetcher {
        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            self.requested.lock().expect("lock").push(url.to_string());
            self.response.clone().map_err(|status| FetchError::Status {
                url: url.to_string(),
                status,
            })
        }
    }

    const LANDING: &str = r#"<html><head>
        <meta name="viewport" content="width=device-width">
        <title>Acme Analytics | Dashboards</title>
        <meta name="description" content="Self-serve analytics software for lean product teams everywhere.">
      </head><body>
        <nav class="menu"></nav>
        <h1>The only analytics suite you need</h1>
        <a href="/privacy">Privacy</a><a href="/terms">Terms</a>
      </body></html>"#;

    #[tokio::test]
    async fn scores_fetched_page_and_normalizes_url() {
        let analyzer = AuditAnalyzer::new(FakeFetcher::serving(LANDING));
        let mut rng = StdRng::seed_from_u64(1);
        let result = analyzer
            .analyze_with_rng("acme.example", &mut rng)
            .await
            .expect("audit");

        assert_eq!(
            *analyzer.fetcher.requested.lock().expect("lock"),
            vec!["https://acme.example".to_string()]
        );
        assert_eq!(result.business_info.name, "Acme Analytics");
        assert_eq!(result.business_info.url, "https://acme.example");
        assert_eq!(result.business_info.industry.as_deref(), Some("Technology"));
        // viewport 20 + title 15 + description 15 + h1 10 + https 15 + nav 10
        assert_eq!(result.parameters.digital_presence.score, 85);
        assert_eq!(result.total_score, result.parameters.weighted_total());
    }

    #[tokio::test]
    async fn falls_back_to_synthetic_result_on_fetch_failure() {
        let analyzer = AuditAnalyzer::new(FakeFetcher::failing(503));
        let mut rng = StdRng::seed_from_u64(9);
        let result = analyzer
            .analyze_with_rng("http://down.example/path", &mut rng)
            .await
            .expect("fallback audit");

        assert_eq!(result.business_info.name, "down.example");
        assert_eq!(result.business_info.industry.as_deref(), Some("Technology"));
        for kind in ParameterKind::ALL {
            let parameter = result.parameters.get(kind);
            assert!(parameter.score >= 40 && parameter.score <= 89);
        }
        assert!(result.total_score <= 100);
    }

    #[tokio::test]
    async fn rejects_blank_input() {
        let analyzer = AuditAnalyzer::new(FakeFetcher::serving(LANDING));
        let err = analyzer.analyze("   ").await.expect_err("blank url");
        assert_eq!(err, AuditRequestError::EmptyUrl);
        assert!(analyzer.fetcher.requested.lock().expect("lock").is_empty());
    }

    #[test]
    fn http_fetcher_builds_from_default_config() {
        assert!(HttpPageFetcher::new(&AuditConfig::default()).is_ok());
    }
}
