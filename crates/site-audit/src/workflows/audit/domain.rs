use serde::{Deserialize, Serialize};

/// The six fixed business-health parameters scored by every audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterKind {
    DigitalPresence,
    MarketVisibility,
    BusinessOperations,
    CompetitivePositioning,
    DataInsight,
    Compliance,
}

impl ParameterKind {
    pub const ALL: [ParameterKind; 6] = [
        ParameterKind::DigitalPresence,
        ParameterKind::MarketVisibility,
        ParameterKind::BusinessOperations,
        ParameterKind::CompetitivePositioning,
        ParameterKind::DataInsight,
        ParameterKind::Compliance,
    ];

    /// Share of the composite score, in percent. The six weights total 110, so the
    /// composite is clamped to 100.
    pub const fn weight(self) -> u8 {
        match self {
            ParameterKind::DigitalPresence => 30,
            ParameterKind::MarketVisibility => 25,
            ParameterKind::BusinessOperations => 20,
            ParameterKind::CompetitivePositioning => 15,
            ParameterKind::DataInsight => 10,
            ParameterKind::Compliance => 10,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ParameterKind::DigitalPresence => "Website & Digital Presence",
            ParameterKind::MarketVisibility => "Market Visibility & Reputation",
            ParameterKind::BusinessOperations => "Business Operations & Scalability",
            ParameterKind::CompetitivePositioning => "Competitive Positioning",
            ParameterKind::DataInsight => "Data & Insight Capability",
            ParameterKind::Compliance => "Compliance & Risk Management",
        }
    }

    /// Serialized key inside `AuditResult.parameters`.
    pub const fn key(self) -> &'static str {
        match self {
            ParameterKind::DigitalPresence => "digitalPresence",
            ParameterKind::MarketVisibility => "marketVisibility",
            ParameterKind::BusinessOperations => "businessOperations",
            ParameterKind::CompetitivePositioning => "competitivePositioning",
            ParameterKind::DataInsight => "dataInsight",
            ParameterKind::Compliance => "compliance",
        }
    }
}

/// One scored parameter with the evidence trail that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditParameter {
    pub name: String,
    pub weight: u8,
    pub score: u8,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
}

impl AuditParameter {
    /// Builds a parameter for `kind`, clamping the raw score into `0..=100`.
    pub fn new(
        kind: ParameterKind,
        raw_score: u32,
        insights: Vec<String>,
        recommendations: Vec<String>,
    ) -> Self {
        Self {
            name: kind.label().to_string(),
            weight: kind.weight(),
            score: raw_score.min(100) as u8,
            insights,
            recommendations,
        }
    }
}

/// Fixed-key parameter table. Field names are the persisted contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditParameters {
    pub digital_presence: AuditParameter,
    pub market_visibility: AuditParameter,
    pub business_operations: AuditParameter,
    pub competitive_positioning: AuditParameter,
    pub data_insight: AuditParameter,
    pub compliance: AuditParameter,
}

impl AuditParameters {
    pub fn get(&self, kind: ParameterKind) -> &AuditParameter {
        match kind {
            ParameterKind::DigitalPresence => &self.digital_presence,
            ParameterKind::MarketVisibility => &self.market_visibility,
            ParameterKind::BusinessOperations => &self.business_operations,
            ParameterKind::CompetitivePositioning => &self.competitive_positioning,
            ParameterKind::DataInsight => &self.data_insight,
            ParameterKind::Compliance => &self.compliance,
        }
    }

    pub fn get_mut(&mut self, kind: ParameterKind) -> &mut AuditParameter {
        match kind {
            ParameterKind::DigitalPresence => &mut self.digital_presence,
            ParameterKind::MarketVisibility => &mut self.market_visibility,
            ParameterKind::BusinessOperations => &mut self.business_operations,
            ParameterKind::CompetitivePositioning => &mut self.competitive_positioning,
            ParameterKind::DataInsight => &mut self.data_insight,
            ParameterKind::Compliance => &mut self.compliance,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParameterKind, &AuditParameter)> {
        ParameterKind::ALL
            .into_iter()
            .map(move |kind| (kind, self.get(kind)))
    }

    /// Weighted composite: `round(Σ score × weight / 100)`.
    pub fn weighted_total(&self) -> u8 {
        let weighted: u32 = self
            .iter()
            .map(|(_, parameter)| u32::from(parameter.score) * u32::from(parameter.weight))
            .sum();
        let total = (f64::from(weighted) / 100.0).round();
        total.clamp(0.0, 100.0) as u8
    }
}

/// Identity of the audited business as inferred from its landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessInfo {
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// System-of-record snapshot for one audit run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResult {
    pub total_score: u8,
    pub parameters: AuditParameters,
    pub business_info: BusinessInfo,
}

impl AuditResult {
    /// Assembles a result, deriving `total_score` from the parameters.
    pub fn new(parameters: AuditParameters, business_info: BusinessInfo) -> Self {
        Self {
            total_score: parameters.weighted_total(),
            parameters,
            business_info,
        }
    }

    /// Parameter with the lowest score, ties broken by the heavier weight.
    pub fn weakest_parameter(&self) -> (ParameterKind, &AuditParameter) {
        self.parameters
            .iter()
            .min_by(|(_, a), (_, b)| a.score.cmp(&b.score).then(b.weight.cmp(&a.weight)))
            .unwrap_or((
                ParameterKind::DigitalPresence,
                &self.parameters.digital_presence,
            ))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub(crate) fn parameter(kind: ParameterKind, score: u32) -> AuditParameter {
        AuditParameter::new(
            kind,
            score,
            vec![format!("{} insight", kind.label())],
            vec![format!("{} recommendation", kind.label())],
        )
    }

    pub(crate) fn audit_result(scores: [u32; 6]) -> AuditResult {
        let [dp, mv, bo, cp, di, co] = scores;
        AuditResult::new(
            AuditParameters {
                digital_presence: parameter(ParameterKind::DigitalPresence, dp),
                market_visibility: parameter(ParameterKind::MarketVisibility, mv),
                business_operations: parameter(ParameterKind::BusinessOperations, bo),
                competitive_positioning: parameter(ParameterKind::CompetitivePositioning, cp),
                data_insight: parameter(ParameterKind::DataInsight, di),
                compliance: parameter(ParameterKind::Compliance, co),
            },
            BusinessInfo {
                name: "Acme Analytics".to_string(),
                url: "https://acme.example".to_string(),
                industry: Some("Technology".to_string()),
                description: Some("Analytics software for small teams".to_string()),
            },
        )
    }
}
