use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::workflows::audit::{AuditAnalyzer, FetchError, PageFetcher};
use crate::workflows::enrichment::{
    EnrichmentModels, EnrichmentService, GenerationError, GenerationRequest, TextGenerator,
};
use crate::workflows::leads::fakes::TableVerifier;
use crate::workflows::reports::domain::{AuditId, AuditReport};
use crate::workflows::reports::repository::{AuditRepository, RepositoryError, UsageLedger};
use crate::workflows::reports::service::ReportService;
use crate::workflows::usage::{PlanTier, UsageCharge, UsageSnapshot};

pub(super) const LANDING: &str = r#"<html><head>
    <meta name="viewport" content="width=device-width">
    <title>Acme Analytics | Dashboards</title>
    <meta name="description" content="Self-serve analytics software for lean product teams.">
  </head><body>
    <nav></nav>
    <h1>Analytics for everyone</h1>
    <a href="/privacy">Privacy</a>
  </body></html>"#;

pub(super) struct StaticFetcher {
    pub(super) html: Option<&'static str>,
}

#[async_trait]
impl PageFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.html.map(str::to_string).ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 502,
        })
    }
}

/// Generator whose every call times out.
pub(super) struct OfflineGenerator;

#[async_trait]
impl TextGenerator for OfflineGenerator {
    async fn generate(&self, _request: &GenerationRequest) -> Result<String, GenerationError> {
        Err(GenerationError::Timeout)
    }
}

#[derive(Default)]
pub(super) struct MemoryAudits {
    records: Mutex<HashMap<AuditId, AuditReport>>,
}

impl AuditRepository for MemoryAudits {
    fn insert(&self, report: AuditReport) -> Result<AuditReport, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&report.audit_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(report.audit_id.clone(), report.clone());
        Ok(report)
    }

    fn fetch(&self, id: &AuditId) -> Result<Option<AuditReport>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

#[derive(Default)]
pub(super) struct MemoryUsage {
    snapshots: Mutex<HashMap<PlanTier, UsageSnapshot>>,
}

impl MemoryUsage {
    pub(super) fn with(plan: PlanTier, snapshot: UsageSnapshot) -> Self {
        Self {
            snapshots: Mutex::new(HashMap::from([(plan, snapshot)])),
        }
    }

    pub(super) fn get(&self, plan: PlanTier) -> UsageSnapshot {
        self.snapshots
            .lock()
            .expect("usage mutex poisoned")
            .get(&plan)
            .copied()
            .unwrap_or_default()
    }
}

impl UsageLedger for MemoryUsage {
    fn snapshot(&self, plan: PlanTier) -> Result<UsageSnapshot, RepositoryError> {
        Ok(self.get(plan))
    }

    fn charge(&self, plan: PlanTier, charge: UsageCharge) -> Result<u32, RepositoryError> {
        let mut guard = self.snapshots.lock().expect("usage mutex poisoned");
        Ok(guard.entry(plan).or_default().apply(charge))
    }
}

pub(super) type TestService = ReportService<StaticFetcher, OfflineGenerator, TableVerifier>;

pub(super) fn verifier() -> TableVerifier {
    TableVerifier::new(&[
        ("sarah@acme.com", true, 92),
        ("mike@acme.com", true, 88),
        ("bounce@acme.com", false, 90),
    ])
}

pub(super) fn service_with(
    html: Option<&'static str>,
    enriched: bool,
    usage: Arc<MemoryUsage>,
) -> TestService {
    let enrichment = enriched.then(|| {
        EnrichmentService::new(
            OfflineGenerator,
            EnrichmentModels {
                audit: "gpt-4".to_string(),
                parameter: "gpt-3.5-turbo".to_string(),
            },
        )
    });
    ReportService::new(
        AuditAnalyzer::new(StaticFetcher { html }),
        enrichment,
        verifier(),
        Arc::new(MemoryAudits::default()),
        usage,
    )
}

pub(super) fn service() -> TestService {
    service_with(Some(LANDING), false, Arc::new(MemoryUsage::default()))
}
