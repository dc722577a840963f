//! Stored audit reports and the HTTP surface over audits, leads, and email screening.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    resolve_plan, AuditId, AuditReceipt, AuditReport, AuditRequest, BusinessInsights,
    EmailVerificationOutcome, EmailVerificationRequest, LeadBatch, LeadRequest,
    LeadVerificationRequest, VerifiedLeads,
};
pub use repository::{AuditRepository, RepositoryError, UsageLedger};
pub use router::report_router;
pub use service::{ReportService, ReportServiceError};
