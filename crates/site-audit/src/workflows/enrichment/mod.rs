//! Optional narrative pass over a scored audit. Never touches scores or weights.

mod client;
mod domain;
mod lenient_json;
mod prompts;

use futures::future::join_all;
use tracing::{info, warn};

use crate::config::EnrichmentConfig;
use crate::workflows::audit::{AuditParameter, AuditResult, ParameterKind};

pub use client::{GenerationError, GenerationRequest, OpenAiTextGenerator, TextGenerator};
pub use domain::{ActionPlan, AuditNarrative, BusinessData, EnhancedAuditResult, ParameterGuidance};
pub use lenient_json::{clean_response, decode_lenient, DecodeTier};
pub use prompts::PromptTemplate;

pub const BUSINESS_INSIGHTS_FALLBACK: &str =
    "Business insights analysis completed. Review audit parameters for detailed recommendations.";

const AUDIT_TEMPERATURE: f32 = 0.7;
const AUDIT_MAX_TOKENS: u32 = 2000;
const PARAMETER_TEMPERATURE: f32 = 0.6;
const PARAMETER_MAX_TOKENS: u32 = 500;
const INSIGHTS_TEMPERATURE: f32 = 0.7;
const INSIGHTS_MAX_TOKENS: u32 = 800;

/// Model names for the two request sizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichmentModels {
    pub audit: String,
    pub parameter: String,
}

impl From<&EnrichmentConfig> for EnrichmentModels {
    fn from(config: &EnrichmentConfig) -> Self {
        Self {
            audit: config.model.clone(),
            parameter: config.parameter_model.clone(),
        }
    }
}

pub struct EnrichmentService<G> {
    generator: G,
    models: EnrichmentModels,
}

impl EnrichmentService<OpenAiTextGenerator> {
    pub fn from_config(config: &EnrichmentConfig) -> Result<Self, GenerationError> {
        Ok(Self::new(
            OpenAiTextGenerator::new(config)?,
            EnrichmentModels::from(config),
        ))
    }
}

impl<G> EnrichmentService<G>
where
    G: TextGenerator,
{
    pub fn new(generator: G, models: EnrichmentModels) -> Self {
        Self { generator, models }
    }

    /// Expands `audit` with a narrative and refreshed per-parameter guidance.
    ///
    /// Best-effort: an unreachable service yields the generic narrative over the unchanged
    /// audit, and any parameter whose refresh fails keeps its deterministic guidance.
    pub async fn enrich(&self, business: &BusinessData, audit: &AuditResult) -> EnhancedAuditResult {
        info!(url = %business.url, "starting audit enrichment");

        let request = GenerationRequest {
            model: self.models.audit.clone(),
            system: prompts::AUDIT_SYSTEM_PROMPT.to_string(),
            prompt: PromptTemplate::audit_analysis(business, audit),
            temperature: AUDIT_TEMPERATURE,
            max_tokens: AUDIT_MAX_TOKENS,
        };

        let narrative = match self.generator.generate(&request).await {
            Ok(raw) => decode_narrative(&raw),
            Err(err) => {
                warn!(url = %business.url, error = %err, "enrichment service unavailable");
                return EnhancedAuditResult {
                    audit: audit.clone(),
                    narrative: AuditNarrative::unavailable(),
                };
            }
        };

        let refreshed = join_all(
            audit
                .parameters
                .iter()
                .map(|(kind, parameter)| self.parameter_guidance(kind, parameter, business)),
        )
        .await;

        let mut enriched = audit.clone();
        for (kind, guidance) in refreshed {
            if let Some(guidance) = guidance {
                merge_guidance(enriched.parameters.get_mut(kind), guidance);
            }
        }

        info!(url = %business.url, "audit enrichment complete");
        EnhancedAuditResult {
            audit: enriched,
            narrative,
        }
    }

    async fn parameter_guidance(
        &self,
        kind: ParameterKind,
        parameter: &AuditParameter,
        business: &BusinessData,
    ) -> (ParameterKind, Option<ParameterGuidance>) {
        let request = GenerationRequest {
            model: self.models.parameter.clone(),
            system: prompts::PARAMETER_SYSTEM_PROMPT.to_string(),
            prompt: PromptTemplate::parameter_analysis(parameter, business),
            temperature: PARAMETER_TEMPERATURE,
            max_tokens: PARAMETER_MAX_TOKENS,
        };

        let raw = match self.generator.generate(&request).await {
            Ok(raw) => raw,
            Err(err) => {
                warn!(parameter = kind.key(), error = %err, "parameter enrichment failed");
                return (kind, None);
            }
        };

        match decode_lenient::<ParameterGuidance>(&raw) {
            Some((guidance, tier)) => {
                if tier == DecodeTier::Extracted {
                    warn!(parameter = kind.key(), "parameter guidance recovered from surrounding text");
                }
                (kind, Some(guidance))
            }
            None => {
                warn!(parameter = kind.key(), "parameter guidance unparseable; keeping deterministic text");
                (kind, None)
            }
        }
    }

    /// Free-form strategy narrative. Falls back to a fixed sentence on any failure.
    pub async fn business_insights(&self, business_url: &str, business: &BusinessData) -> String {
        let business_json = match serde_json::to_string_pretty(business) {
            Ok(json) => json,
            Err(err) => {
                warn!(error = %err, "could not serialize business data");
                return BUSINESS_INSIGHTS_FALLBACK.to_string();
            }
        };

        let request = GenerationRequest {
            model: self.models.parameter.clone(),
            system: prompts::INSIGHTS_SYSTEM_PROMPT.to_string(),
            prompt: PromptTemplate::business_insights(business_url, &business_json),
            temperature: INSIGHTS_TEMPERATURE,
            max_tokens: INSIGHTS_MAX_TOKENS,
        };

        match self.generator.generate(&request).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => BUSINESS_INSIGHTS_FALLBACK.to_string(),
            Err(err) => {
                warn!(error = %err, "business insights request failed");
                BUSINESS_INSIGHTS_FALLBACK.to_string()
            }
        }
    }
}

fn decode_narrative(raw: &str) -> AuditNarrative {
    match decode_lenient::<AuditNarrative>(raw) {
        Some((narrative, DecodeTier::Direct)) => narrative.with_summary_default(),
        Some((narrative, DecodeTier::Extracted)) => {
            warn!(chars = raw.len(), "audit narrative recovered from surrounding text");
            narrative.with_summary_default()
        }
        None => {
            warn!(chars = raw.len(), "audit narrative unparseable; using placeholder");
            AuditNarrative::placeholder()
        }
    }
}

/// Replaces insights/recommendations only where the refresh has something to say.
fn merge_guidance(parameter: &mut AuditParameter, guidance: ParameterGuidance) {
    let insights: Vec<String> = clean_lines(guidance.insights);
    let recommendations: Vec<String> = clean_lines(guidance.recommendations);
    if !insights.is_empty() {
        parameter.insights = insights;
    }
    if !recommendations.is_empty() {
        parameter.recommendations = recommendations;
    }
}

fn clean_lines(lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}
