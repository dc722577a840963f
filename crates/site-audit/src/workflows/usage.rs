use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Credits charged per completed audit.
pub const AUDIT_CREDITS: u32 = 10;
/// Credits charged per lead from targeted generation.
pub const TARGETED_LEAD_CREDITS: u32 = 2;
/// Credits charged per lead created from a verified email.
pub const VERIFIED_LEAD_CREDITS: u32 = 1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    #[default]
    Free,
    Starter,
    Growth,
    Pro,
}

/// Monthly allowances for one plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlanLimits {
    pub audits: u32,
    pub leads: u32,
    pub credits: u32,
}

impl PlanTier {
    pub const ALL: [PlanTier; 4] = [
        PlanTier::Free,
        PlanTier::Starter,
        PlanTier::Growth,
        PlanTier::Pro,
    ];

    pub const fn limits(self) -> PlanLimits {
        match self {
            PlanTier::Free => PlanLimits {
                audits: 1,
                leads: 10,
                credits: 250,
            },
            PlanTier::Starter => PlanLimits {
                audits: 5,
                leads: 100,
                credits: 2000,
            },
            PlanTier::Growth => PlanLimits {
                audits: 25,
                leads: 1000,
                credits: 10000,
            },
            PlanTier::Pro => PlanLimits {
                audits: 75,
                leads: 5000,
                credits: 50000,
            },
        }
    }

    /// Free-plan reports carry a watermark.
    pub const fn watermarked(self) -> bool {
        matches!(self, PlanTier::Free)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            PlanTier::Free => "free",
            PlanTier::Starter => "starter",
            PlanTier::Growth => "growth",
            PlanTier::Pro => "pro",
        }
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanTier {
    type Err = UsageLimitError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        PlanTier::ALL
            .into_iter()
            .find(|plan| plan.as_str() == normalized)
            .ok_or_else(|| UsageLimitError::UnknownPlan(value.to_string()))
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsageLimitError {
    #[error("Monthly audit limit reached ({limit}). Please upgrade your plan or wait for next month.")]
    AuditLimitReached { limit: u32 },
    #[error("Monthly lead limit exceeded. You have {remaining} leads remaining this month.")]
    LeadLimitExceeded { remaining: u32 },
    #[error("unknown plan `{0}`")]
    UnknownPlan(String),
}

/// A billable event recorded against an account's usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageCharge {
    Audit,
    TargetedLeads(u32),
    VerifiedLeads(u32),
}

/// Usage counters for one account and month. Persisting them is the caller's concern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageSnapshot {
    pub audits_used: u32,
    pub leads_used: u32,
    pub credits_used: u32,
}

impl UsageSnapshot {
    pub fn check_audit(&self, plan: PlanTier) -> Result<(), UsageLimitError> {
        let limit = plan.limits().audits;
        if self.audits_used >= limit {
            return Err(UsageLimitError::AuditLimitReached { limit });
        }
        Ok(())
    }

    pub fn remaining_leads(&self, plan: PlanTier) -> u32 {
        plan.limits().leads.saturating_sub(self.leads_used)
    }

    pub fn check_leads(&self, plan: PlanTier, requested: u32) -> Result<(), UsageLimitError> {
        if self.leads_used.saturating_add(requested) > plan.limits().leads {
            return Err(UsageLimitError::LeadLimitExceeded {
                remaining: self.remaining_leads(plan),
            });
        }
        Ok(())
    }

    /// Records one audit and returns the credits charged.
    pub fn record_audit(&mut self) -> u32 {
        self.audits_used += 1;
        self.credits_used += AUDIT_CREDITS;
        AUDIT_CREDITS
    }

    pub fn record_targeted_leads(&mut self, count: u32) -> u32 {
        let charged = count * TARGETED_LEAD_CREDITS;
        self.leads_used += count;
        self.credits_used += charged;
        charged
    }

    pub fn record_verified_leads(&mut self, count: u32) -> u32 {
        let charged = count * VERIFIED_LEAD_CREDITS;
        self.leads_used += count;
        self.credits_used += charged;
        charged
    }

    /// Applies `charge` and returns the credits it cost.
    pub fn apply(&mut self, charge: UsageCharge) -> u32 {
        match charge {
            UsageCharge::Audit => self.record_audit(),
            UsageCharge::TargetedLeads(count) => self.record_targeted_leads(count),
            UsageCharge::VerifiedLeads(count) => self.record_verified_leads(count),
        }
    }
}
