use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::workflows::audit::AuditResult;
use crate::workflows::enrichment::AuditNarrative;
use crate::workflows::leads::{EmailScreening, Lead, LeadGenerationOptions};
use crate::workflows::usage::{PlanTier, UsageLimitError};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditId(pub String);

impl fmt::Display for AuditId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stored audit: the scored result plus the envelope the report is delivered in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub audit_id: AuditId,
    pub analysis_date: DateTime<Utc>,
    pub plan_type: PlanTier,
    pub watermarked: bool,
    #[serde(flatten)]
    pub audit: AuditResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narrative: Option<AuditNarrative>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRequest {
    pub business_url: String,
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub plan: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReceipt {
    #[serde(flatten)]
    pub report: AuditReport,
    pub credits_charged: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadRequest {
    pub audit_id: AuditId,
    #[serde(flatten)]
    pub options: LeadGenerationOptions,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadBatch {
    pub audit_id: AuditId,
    pub leads: Vec<Lead>,
    pub credits_charged: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeadVerificationRequest {
    pub leads: Vec<Lead>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedLeads {
    pub submitted: usize,
    pub leads: Vec<Lead>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailVerificationRequest {
    pub emails: Vec<String>,
    #[serde(default)]
    pub plan: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailVerificationOutcome {
    pub results: Vec<EmailScreening>,
    pub leads: Vec<Lead>,
    pub credits_charged: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessInsights {
    pub audit_id: AuditId,
    pub insights: String,
}

/// Missing or blank plans bill against the free tier.
pub fn resolve_plan(raw: Option<&str>) -> Result<PlanTier, UsageLimitError> {
    match raw.map(str::trim).filter(|plan| !plan.is_empty()) {
        Some(plan) => plan.parse(),
        None => Ok(PlanTier::Free),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::audit::fixtures::audit_result;
    use chrono::TimeZone;

    #[test]
    fn report_envelope_flattens_audit() {
        let report = AuditReport {
            audit_id: AuditId("audit-000042".to_string()),
            analysis_date: Utc
                .with_ymd_and_hms(2026, 3, 14, 9, 30, 0)
                .single()
                .expect("valid timestamp"),
            plan_type: PlanTier::Free,
            watermarked: true,
            audit: audit_result([50, 60, 70, 80, 90, 100]),
            narrative: None,
        };
        let value = serde_json::to_value(&report).expect("json");
        assert_eq!(value["auditId"], "audit-000042");
        assert_eq!(value["analysisDate"], "2026-03-14T09:30:00Z");
        assert_eq!(value["planType"], "free");
        assert_eq!(value["watermarked"], true);
        assert_eq!(value["totalScore"], 75);
        assert!(value["businessInfo"].is_object());
        assert!(value.get("narrative").is_none());
    }

    #[test]
    fn lead_request_reads_options_inline() {
        let request: LeadRequest = serde_json::from_str(
            r#"{"auditId":"audit-000001","targetCount":25,"companySize":"startup"}"#,
        )
        .expect("request");
        assert_eq!(request.audit_id, AuditId("audit-000001".to_string()));
        assert_eq!(request.options.target_count, 25);
        assert!(request.options.industry.is_none());
    }

    #[test]
    fn plan_defaults_to_free() {
        assert_eq!(resolve_plan(None), Ok(PlanTier::Free));
        assert_eq!(resolve_plan(Some("  ")), Ok(PlanTier::Free));
        assert_eq!(resolve_plan(Some("Pro")), Ok(PlanTier::Pro));
        assert!(resolve_plan(Some("gold")).is_err());
    }
}
