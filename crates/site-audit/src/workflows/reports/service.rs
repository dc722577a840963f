use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::info;

use super::domain::{
    resolve_plan, AuditId, AuditReceipt, AuditReport, AuditRequest, BusinessInsights,
    EmailVerificationOutcome, EmailVerificationRequest, LeadBatch, LeadRequest, VerifiedLeads,
};
use super::repository::{AuditRepository, RepositoryError, UsageLedger};
use crate::workflows::audit::{AuditAnalyzer, AuditRequestError, PageFetcher};
use crate::workflows::enrichment::{
    BusinessData, EnrichmentService, TextGenerator, BUSINESS_INSIGHTS_FALLBACK,
};
use crate::workflows::leads::{
    generate_leads, screen_and_generate, verify_leads_batch, DeliverabilityVerifier, Lead,
    LeadRequestError,
};
use crate::workflows::usage::{UsageCharge, UsageLimitError};

/// Service composing the analyzer, optional enrichment, lead tooling, and usage metering.
pub struct ReportService<F, G, V> {
    analyzer: AuditAnalyzer<F>,
    enrichment: Option<EnrichmentService<G>>,
    verifier: V,
    audits: Arc<dyn AuditRepository>,
    usage: Arc<dyn UsageLedger>,
}

static AUDIT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_audit_id() -> AuditId {
    let id = AUDIT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AuditId(format!("audit-{id:06}"))
}

impl<F, G, V> ReportService<F, G, V>
where
    F: PageFetcher,
    G: TextGenerator,
    V: DeliverabilityVerifier,
{
    pub fn new(
        analyzer: AuditAnalyzer<F>,
        enrichment: Option<EnrichmentService<G>>,
        verifier: V,
        audits: Arc<dyn AuditRepository>,
        usage: Arc<dyn UsageLedger>,
    ) -> Self {
        Self {
            analyzer,
            enrichment,
            verifier,
            audits,
            usage,
        }
    }

    /// Audits a website, enriches it when a generator is configured, and stores the report.
    pub async fn create_audit(
        &self,
        request: AuditRequest,
    ) -> Result<AuditReceipt, ReportServiceError> {
        let plan = resolve_plan(request.plan.as_deref())?;
        self.usage.snapshot(plan)?.check_audit(plan)?;

        let mut audit = self.analyzer.analyze(&request.business_url).await?;
        if let Some(name) = request
            .business_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
        {
            audit.business_info.name = name;
        }

        let (audit, narrative) = match &self.enrichment {
            Some(enrichment) => {
                let business = BusinessData::from(&audit.business_info);
                let enhanced = enrichment.enrich(&business, &audit).await;
                (enhanced.audit, Some(enhanced.narrative))
            }
            None => (audit, None),
        };

        let report = self.audits.insert(AuditReport {
            audit_id: next_audit_id(),
            analysis_date: Utc::now(),
            plan_type: plan,
            watermarked: plan.watermarked(),
            audit,
            narrative,
        })?;
        let credits_charged = self.usage.charge(plan, UsageCharge::Audit)?;

        info!(
            audit_id = %report.audit_id,
            plan = %plan,
            total_score = report.audit.total_score,
            enriched = report.narrative.is_some(),
            "audit report stored"
        );
        Ok(AuditReceipt {
            report,
            credits_charged,
        })
    }

    pub fn audit(&self, id: &AuditId) -> Result<AuditReport, ReportServiceError> {
        self.audits
            .fetch(id)?
            .ok_or_else(|| ReportServiceError::NotFound(id.clone()))
    }

    /// Synthesizes leads for a stored audit, billed against the plan the audit ran under.
    pub fn generate_leads(&self, request: LeadRequest) -> Result<LeadBatch, ReportServiceError> {
        let LeadRequest { audit_id, options } = request;
        options.validate()?;

        let report = self.audit(&audit_id)?;
        let plan = report.plan_type;
        self.usage
            .snapshot(plan)?
            .check_leads(plan, options.target_count)?;

        let leads = generate_leads(&report.audit, &options, &mut StdRng::from_entropy())?;
        let credits_charged = self
            .usage
            .charge(plan, UsageCharge::TargetedLeads(leads.len() as u32))?;

        Ok(LeadBatch {
            audit_id,
            leads,
            credits_charged,
        })
    }

    pub async fn verify_leads(&self, leads: Vec<Lead>) -> VerifiedLeads {
        let submitted = leads.len();
        let mut rng = StdRng::from_entropy();
        let leads = verify_leads_batch(&self.verifier, leads, &mut rng).await;
        VerifiedLeads { submitted, leads }
    }

    /// Screens addresses and turns valid ones into leads, up to the plan's remaining allowance.
    pub async fn verify_emails(
        &self,
        request: EmailVerificationRequest,
    ) -> Result<EmailVerificationOutcome, ReportServiceError> {
        let plan = resolve_plan(request.plan.as_deref())?;
        let allowance = self.usage.snapshot(plan)?.remaining_leads(plan);

        let mut rng = StdRng::from_entropy();
        let (results, leads) =
            screen_and_generate(&self.verifier, &request.emails, allowance, &mut rng).await?;

        let credits_charged = if leads.is_empty() {
            0
        } else {
            self.usage
                .charge(plan, UsageCharge::VerifiedLeads(leads.len() as u32))?
        };

        Ok(EmailVerificationOutcome {
            results,
            leads,
            credits_charged,
        })
    }

    pub async fn business_insights(
        &self,
        id: &AuditId,
    ) -> Result<BusinessInsights, ReportServiceError> {
        let report = self.audit(id)?;
        let business = BusinessData::from(&report.audit.business_info);
        let insights = match &self.enrichment {
            Some(enrichment) => enrichment.business_insights(&business.url, &business).await,
            None => BUSINESS_INSIGHTS_FALLBACK.to_string(),
        };
        Ok(BusinessInsights {
            audit_id: report.audit_id,
            insights,
        })
    }
}

/// Error raised by the report service.
#[derive(Debug, thiserror::Error)]
pub enum ReportServiceError {
    #[error(transparent)]
    Audit(#[from] AuditRequestError),
    #[error(transparent)]
    Leads(#[from] LeadRequestError),
    #[error(transparent)]
    Usage(#[from] UsageLimitError),
    #[error("audit {0} not found")]
    NotFound(AuditId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
