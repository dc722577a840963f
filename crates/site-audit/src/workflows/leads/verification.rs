use async_trait::async_trait;
use rand::Rng;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use super::domain::Lead;
use crate::config::VerificationConfig;

pub const MOCK_NO_KEY_REASON: &str = "Mock verification - no API key";
pub const MOCK_UNAVAILABLE_REASON: &str = "Verification service unavailable";
const MIN_DELIVERABLE_SCORE: u8 = 50;

#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("no verifier api key configured")]
    MissingApiKey,
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("verifier request timed out")]
    Timeout,
    #[error("verifier request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("verifier responded with status {0}")]
    Status(u16),
}

impl From<reqwest::Error> for VerificationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            VerificationError::Timeout
        } else {
            VerificationError::Transport(err.without_url())
        }
    }
}

/// Outcome of a single mailbox deliverability check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliverabilityCheck {
    pub deliverable: bool,
    pub score: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[async_trait]
pub trait DeliverabilityVerifier: Send + Sync {
    async fn verify(&self, email: &str) -> Result<DeliverabilityCheck, VerificationError>;
}

/// Hunter-style `email-verifier` endpoint client.
pub struct HunterVerifier {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HunterVerifier {
    pub fn new(config: &VerificationConfig) -> Result<Self, VerificationError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(VerificationError::Client)?;
        Ok(Self {
            client,
            base_url: config.hunter_base_url.trim_end_matches('/').to_string(),
            api_key: config.hunter_api_key.clone(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct HunterEnvelope {
    data: HunterData,
}

#[derive(Debug, Deserialize)]
struct HunterData {
    result: String,
    #[serde(default)]
    score: Option<f64>,
}

#[async_trait]
impl DeliverabilityVerifier for HunterVerifier {
    async fn verify(&self, email: &str) -> Result<DeliverabilityCheck, VerificationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(VerificationError::MissingApiKey)?;

        let response = self
            .client
            .get(format!("{}/email-verifier", self.base_url))
            .header("X-API-KEY", api_key)
            .query(&[("email", email)])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(VerificationError::Status(status.as_u16()));
        }

        let envelope: HunterEnvelope = response.json().await?;
        let score = envelope
            .data
            .score
            .map(|score| score.round().clamp(0.0, 100.0) as u8)
            .unwrap_or(0);
        debug!(result = %envelope.data.result, score, "verifier responded");
        Ok(DeliverabilityCheck {
            deliverable: envelope.data.result == "deliverable",
            score,
            reason: Some(envelope.data.result),
        })
    }
}

/// Randomized stand-in: score in 60..=99, deliverable nine times in ten.
pub fn mock_check<R>(reason: &str, rng: &mut R) -> DeliverabilityCheck
where
    R: Rng + ?Sized,
{
    DeliverabilityCheck {
        deliverable: rng.gen_bool(0.9),
        score: rng.gen_range(60..=99),
        reason: Some(reason.to_string()),
    }
}

/// Runs the verifier, degrading to [`mock_check`] when it is unconfigured or fails.
pub async fn check_deliverability<V, R>(verifier: &V, email: &str, rng: &mut R) -> DeliverabilityCheck
where
    V: DeliverabilityVerifier + ?Sized,
    R: Rng + Send + ?Sized,
{
    match verifier.verify(email).await {
        Ok(check) => check,
        Err(VerificationError::MissingApiKey) => mock_check(MOCK_NO_KEY_REASON, rng),
        Err(err) => {
            warn!(error = %err, "deliverability check failed; using mock result");
            mock_check(MOCK_UNAVAILABLE_REASON, rng)
        }
    }
}

/// Re-checks every lead's mailbox, rewrites its deliverability facet, and keeps only the
/// deliverable leads scoring above 50.
pub async fn verify_leads_batch<V, R>(verifier: &V, leads: Vec<Lead>, rng: &mut R) -> Vec<Lead>
where
    V: DeliverabilityVerifier + ?Sized,
    R: Rng + Send + ?Sized,
{
    let submitted = leads.len();
    let mut verified = Vec::with_capacity(submitted);
    for mut lead in leads {
        let check = check_deliverability(verifier, &lead.email, rng).await;
        lead.verified_status.deliverability = check.deliverable;
        if check.deliverable && check.score > MIN_DELIVERABLE_SCORE {
            verified.push(lead);
        }
    }
    debug!(submitted, kept = verified.len(), "batch verification complete");
    verified
}


#[cfg(test)]
mod tests {
    use super::fakes::TableVerifier;
    use super::*;
    use crate::workflows::leads::domain::VerifiedStatus;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    fn lead(email: &str) -> Lead {
        Lead {
            company_name: "TechFlow Solutions".to_string(),
            contact_name: "Sarah Lee".to_string(),
            email: email.to_string(),
            phone: None,
            title: None,
            industry: None,
            company_size: None,
            location: None,
            verified_status: VerifiedStatus {
                accuracy: true,
                deliverability: false,
                relevance: true,
                compliance: true,
            },
        }
    }

    #[tokio::test]
    async fn batch_keeps_only_deliverable_leads_above_threshold() {
        let verifier = TableVerifier::new(&[
            ("good@techflow.com", true, 92),
            ("edge@techflow.com", true, 50),
            ("bounce@techflow.com", false, 95),
        ]);
        let leads = vec![
            lead("good@techflow.com"),
            lead("edge@techflow.com"),
            lead("bounce@techflow.com"),
        ];
        let kept = verify_leads_batch(&verifier, leads, &mut StdRng::seed_from_u64(1)).await;
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].email, "good@techflow.com");
        assert!(kept[0].verified_status.deliverability);
    }

    #[tokio::test]
    async fn unconfigured_verifier_degrades_to_mock() {
        let verifier = HunterVerifier::new(&VerificationConfig {
            hunter_api_key: None,
            hunter_base_url: "http://127.0.0.1:9".to_string(),
            ..VerificationConfig::default()
        })
        .expect("client");
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..50 {
            let check = check_deliverability(&verifier, "sarah@techflow.com", &mut rng).await;
            assert!((60..=99).contains(&check.score));
            assert_eq!(check.reason.as_deref(), Some(MOCK_NO_KEY_REASON));
        }
    }

    #[tokio::test]
    async fn transport_errors_never_render_the_api_key() {
        let verifier = HunterVerifier::new(&VerificationConfig {
            hunter_api_key: Some("hunter-secret-key".to_string()),
            hunter_base_url: "http://127.0.0.1:9".to_string(),
            timeout: Duration::from_secs(2),
        })
        .expect("client");
        let err = verifier
            .verify("sarah@techflow.com")
            .await
            .expect_err("nothing listens on the discard port");
        let rendered = format!("{err} {err:?}");
        assert!(!rendered.contains("hunter-secret-key"), "{rendered}");
        assert!(!rendered.contains("sarah%40techflow.com"), "{rendered}");
    }

    #[tokio::test]
    async fn timed_out_verifier_falls_back_to_mock() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("addr");
        let stalled = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.expect("accept");
            tokio::time::sleep(Duration::from_secs(30)).await;
            drop(socket);
        });

        let verifier = HunterVerifier::new(&VerificationConfig {
            hunter_api_key: Some("hunter-secret-key".to_string()),
            hunter_base_url: format!("http://{addr}"),
            timeout: Duration::from_millis(200),
        })
        .expect("client");

        let err = verifier
            .verify("sarah@techflow.com")
            .await
            .expect_err("stalled server");
        assert!(matches!(err, VerificationError::Timeout), "{err:?}");

        let check =
            check_deliverability(&verifier, "sarah@techflow.com", &mut StdRng::seed_from_u64(3))
                .await;
        assert_eq!(check.reason.as_deref(), Some(MOCK_UNAVAILABLE_REASON));
        stalled.abort();
    }

    #[tokio::test]
    async fn failing_verifier_reports_unavailable() {
        let verifier = TableVerifier::new(&[]);
        let check =
            check_deliverability(&verifier, "ghost@nowhere.example", &mut StdRng::seed_from_u64(6))
                .await;
        assert_eq!(check.reason.as_deref(), Some(MOCK_UNAVAILABLE_REASON));
        assert!(check.score >= 60);
    }

    #[test]
    fn decodes_verifier_payload() {
        let envelope: HunterEnvelope = serde_json::from_str(
            r#"{"data":{"status":"valid","result":"deliverable","score":91,"email":"a@b.co"}}"#,
        )
        .expect("payload");
        assert_eq!(envelope.data.result, "deliverable");
        assert_eq!(envelope.data.score, Some(91.0));
    }
}
