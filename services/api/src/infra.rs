use metrics_exporter_prometheus::PrometheusHandle;
use site_audit::workflows::reports::{
    AuditId, AuditReport, AuditRepository, RepositoryError, UsageLedger,
};
use site_audit::workflows::usage::{PlanTier, UsageCharge, UsageSnapshot};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

fn lock<'a, T>(mutex: &'a Mutex<T>, what: &str) -> Result<MutexGuard<'a, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable(format!("{what} mutex poisoned")))
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAuditRepository {
    records: Arc<Mutex<HashMap<AuditId, AuditReport>>>,
}

impl AuditRepository for InMemoryAuditRepository {
    fn insert(&self, report: AuditReport) -> Result<AuditReport, RepositoryError> {
        let mut guard = lock(&self.records, "audit repository")?;
        if guard.contains_key(&report.audit_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(report.audit_id.clone(), report.clone());
        Ok(report)
    }

    fn fetch(&self, id: &AuditId) -> Result<Option<AuditReport>, RepositoryError> {
        let guard = lock(&self.records, "audit repository")?;
        Ok(guard.get(id).cloned())
    }
}

/// One demo account per plan; counters reset with the process.
#[derive(Default, Clone)]
pub(crate) struct InMemoryUsageLedger {
    snapshots: Arc<Mutex<HashMap<PlanTier, UsageSnapshot>>>,
}

impl UsageLedger for InMemoryUsageLedger {
    fn snapshot(&self, plan: PlanTier) -> Result<UsageSnapshot, RepositoryError> {
        let guard = lock(&self.snapshots, "usage ledger")?;
        Ok(guard.get(&plan).copied().unwrap_or_default())
    }

    fn charge(&self, plan: PlanTier, charge: UsageCharge) -> Result<u32, RepositoryError> {
        let mut guard = lock(&self.snapshots, "usage ledger")?;
        Ok(guard.entry(plan).or_default().apply(charge))
    }
}
