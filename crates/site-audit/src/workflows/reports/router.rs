use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use super::domain::{
    AuditId, AuditReceipt, AuditReport, AuditRequest, BusinessInsights,
    EmailVerificationOutcome, EmailVerificationRequest, LeadBatch, LeadRequest,
    LeadVerificationRequest, VerifiedLeads,
};
use super::service::ReportService;
use crate::error::AppError;
use crate::workflows::audit::PageFetcher;
use crate::workflows::enrichment::TextGenerator;
use crate::workflows::leads::DeliverabilityVerifier;

type SharedService<F, G, V> = State<Arc<ReportService<F, G, V>>>;

/// Router builder exposing the audit, lead, and email verification endpoints.
pub fn report_router<F, G, V>(service: Arc<ReportService<F, G, V>>) -> Router
where
    F: PageFetcher + 'static,
    G: TextGenerator + 'static,
    V: DeliverabilityVerifier + 'static,
{
    Router::new()
        .route("/api/v1/audits", post(create_audit_handler::<F, G, V>))
        .route("/api/v1/audits/:audit_id", get(audit_handler::<F, G, V>))
        .route(
            "/api/v1/audits/:audit_id/insights",
            post(insights_handler::<F, G, V>),
        )
        .route("/api/v1/leads", post(leads_handler::<F, G, V>))
        .route("/api/v1/leads/verify", post(verify_leads_handler::<F, G, V>))
        .route(
            "/api/v1/email-verification",
            post(email_verification_handler::<F, G, V>),
        )
        .with_state(service)
}

pub(crate) async fn create_audit_handler<F, G, V>(
    State(service): SharedService<F, G, V>,
    Json(request): Json<AuditRequest>,
) -> Result<(StatusCode, Json<AuditReceipt>), AppError>
where
    F: PageFetcher + 'static,
    G: TextGenerator + 'static,
    V: DeliverabilityVerifier + 'static,
{
    let receipt = service.create_audit(request).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

pub(crate) async fn audit_handler<F, G, V>(
    State(service): SharedService<F, G, V>,
    Path(audit_id): Path<String>,
) -> Result<Json<AuditReport>, AppError>
where
    F: PageFetcher + 'static,
    G: TextGenerator + 'static,
    V: DeliverabilityVerifier + 'static,
{
    Ok(Json(service.audit(&AuditId(audit_id))?))
}

pub(crate) async fn insights_handler<F, G, V>(
    State(service): SharedService<F, G, V>,
    Path(audit_id): Path<String>,
) -> Result<Json<BusinessInsights>, AppError>
where
    F: PageFetcher + 'static,
    G: TextGenerator + 'static,
    V: DeliverabilityVerifier + 'static,
{
    let insights = service.business_insights(&AuditId(audit_id)).await?;
    Ok(Json(insights))
}

pub(crate) async fn leads_handler<F, G, V>(
    State(service): SharedService<F, G, V>,
    Json(request): Json<LeadRequest>,
) -> Result<Json<LeadBatch>, AppError>
where
    F: PageFetcher + 'static,
    G: TextGenerator + 'static,
    V: DeliverabilityVerifier + 'static,
{
    Ok(Json(service.generate_leads(request)?))
}

pub(crate) async fn verify_leads_handler<F, G, V>(
    State(service): SharedService<F, G, V>,
    Json(request): Json<LeadVerificationRequest>,
) -> Json<VerifiedLeads>
where
    F: PageFetcher + 'static,
    G: TextGenerator + 'static,
    V: DeliverabilityVerifier + 'static,
{
    Json(service.verify_leads(request.leads).await)
}

pub(crate) async fn email_verification_handler<F, G, V>(
    State(service): SharedService<F, G, V>,
    Json(request): Json<EmailVerificationRequest>,
) -> Result<Json<EmailVerificationOutcome>, AppError>
where
    F: PageFetcher + 'static,
    G: TextGenerator + 'static,
    V: DeliverabilityVerifier + 'static,
{
    Ok(Json(service.verify_emails(request).await?))
}
