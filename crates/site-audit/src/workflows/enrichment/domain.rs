use serde::{Deserialize, Serialize};

use crate::workflows::audit::{AuditResult, BusinessInfo};

/// Business metadata handed to the text-generation prompts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessData {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&BusinessInfo> for BusinessData {
    fn from(info: &BusinessInfo) -> Self {
        Self {
            url: info.url.clone(),
            name: Some(info.name.clone()),
            industry: info.industry.clone(),
            description: info.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionPlan {
    pub immediate: Vec<String>,
    pub short_term: Vec<String>,
    pub long_term: Vec<String>,
}

/// Consultant-style narrative layered over a scored audit.
///
/// Every field defaults when absent so partially-formed model output still decodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuditNarrative {
    pub executive_summary: String,
    pub key_findings: Vec<String>,
    pub priority_recommendations: Vec<String>,
    pub competitive_analysis: String,
    pub growth_opportunities: Vec<String>,
    pub risk_assessment: String,
    pub action_plan: ActionPlan,
    pub industry_benchmarks: String,
    pub detailed_analysis: String,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

impl AuditNarrative {
    /// Used when the model answered but nothing in the answer decodes.
    pub fn placeholder() -> Self {
        Self {
            executive_summary: "AI analysis completed with basic insights.".to_string(),
            detailed_analysis: "Detailed analysis of business performance across key parameters."
                .to_string(),
            ..Self::generic()
        }
    }

    /// Used when the text-generation service could not be reached at all.
    pub fn unavailable() -> Self {
        Self {
            executive_summary:
                "Business audit completed. Review individual parameters for detailed insights."
                    .to_string(),
            key_findings: strings(&["Audit analysis completed", "Review parameter scores for insights"]),
            detailed_analysis: "Detailed analysis of business performance across key parameters. \
                                Focus on areas with lower scores for maximum impact."
                .to_string(),
            ..Self::generic()
        }
    }

    fn generic() -> Self {
        Self {
            executive_summary: String::new(),
            key_findings: strings(&["Business analysis completed", "Review parameter scores for insights"]),
            priority_recommendations: strings(&[
                "Focus on lowest scoring parameters",
                "Implement recommended improvements",
            ]),
            competitive_analysis: "Competitive analysis requires additional data.".to_string(),
            growth_opportunities: strings(&["Digital optimization", "Process improvement"]),
            risk_assessment: "Risk assessment based on current parameter scores.".to_string(),
            action_plan: ActionPlan {
                immediate: strings(&["Review audit results", "Identify priority areas"]),
                short_term: strings(&["Implement quick wins", "Address critical issues"]),
                long_term: strings(&["Strategic improvements", "Long-term optimization"]),
            },
            industry_benchmarks: "Industry benchmarks vary by sector and business size."
                .to_string(),
            detailed_analysis: String::new(),
        }
    }

    /// Fills a blank executive summary on an otherwise decoded narrative.
    pub(crate) fn with_summary_default(mut self) -> Self {
        if self.executive_summary.trim().is_empty() {
            self.executive_summary = "Analysis completed successfully.".to_string();
        }
        self
    }
}

/// Per-parameter refresh returned by the smaller follow-up request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterGuidance {
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
}

/// An [`AuditResult`] plus narrative. Scores and weights are carried through untouched;
/// only per-parameter insights and recommendations may differ from the source audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhancedAuditResult {
    #[serde(flatten)]
    pub audit: AuditResult,
    #[serde(flatten)]
    pub narrative: AuditNarrative,
}
