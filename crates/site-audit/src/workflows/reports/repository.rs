use super::domain::{AuditId, AuditReport};
use crate::workflows::usage::{PlanTier, UsageCharge, UsageSnapshot};

/// Storage for finished audit reports.
pub trait AuditRepository: Send + Sync {
    fn insert(&self, report: AuditReport) -> Result<AuditReport, RepositoryError>;
    fn fetch(&self, id: &AuditId) -> Result<Option<AuditReport>, RepositoryError>;
}

/// Per-plan usage counters. `charge` must apply atomically.
pub trait UsageLedger: Send + Sync {
    fn snapshot(&self, plan: PlanTier) -> Result<UsageSnapshot, RepositoryError>;
    fn charge(&self, plan: PlanTier, charge: UsageCharge) -> Result<u32, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
