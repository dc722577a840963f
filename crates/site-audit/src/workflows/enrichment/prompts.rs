use super::domain::BusinessData;
use crate::workflows::audit::{AuditParameter, AuditResult};

pub const AUDIT_SYSTEM_PROMPT: &str = "You are a senior business consultant specializing in digital transformation and business optimization. Provide detailed, actionable insights based on business audit data. Always return valid JSON without any markdown formatting or extra text.";

pub const PARAMETER_SYSTEM_PROMPT: &str = "You are a business analyst providing specific, actionable insights for business improvement. Always return valid JSON without markdown formatting.";

pub const INSIGHTS_SYSTEM_PROMPT: &str =
    "You are a business strategist providing insights for business optimization and growth.";

pub struct PromptTemplate;

impl PromptTemplate {
    pub fn audit_analysis(business: &BusinessData, audit: &AuditResult) -> String {
        let scores = audit
            .parameters
            .iter()
            .map(|(_, parameter)| {
                format!(
                    "- {}: {}/100 (Weight: {}%)",
                    parameter.name, parameter.score, parameter.weight
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"You are a senior business consultant conducting a comprehensive digital business audit. Analyze the following business and provide detailed insights.

Business Information:
- URL: {url}
- Name: {name}
- Industry: {industry}
- Description: {description}

Current Audit Scores:
{scores}

Total Score: {total}/100

Please provide a comprehensive analysis in the following JSON format:
{{
  "executiveSummary": "A 3-4 sentence executive summary of the business's digital presence and overall performance",
  "keyFindings": ["Finding 1", "Finding 2", "Finding 3", "Finding 4", "Finding 5"],
  "priorityRecommendations": ["High priority recommendation 1", "High priority recommendation 2", "High priority recommendation 3"],
  "competitiveAnalysis": "Analysis of competitive positioning and market presence (2-3 sentences)",
  "growthOpportunities": ["Opportunity 1", "Opportunity 2", "Opportunity 3", "Opportunity 4"],
  "riskAssessment": "Assessment of potential risks and vulnerabilities (2-3 sentences)",
  "actionPlan": {{
    "immediate": ["Action to take within 1-2 weeks", "Another immediate action"],
    "shortTerm": ["Action for 1-3 months", "Another short-term action", "Third short-term action"],
    "longTerm": ["Strategic action for 6+ months", "Another long-term action"]
  }},
  "industryBenchmarks": "How this business compares to industry standards and benchmarks (2-3 sentences)",
  "detailedAnalysis": "A comprehensive 4-5 paragraph analysis covering digital presence, operational efficiency, market positioning, and strategic recommendations"
}}

Focus on actionable insights, specific recommendations, and strategic guidance. Be professional but accessible in tone."#,
            url = business.url,
            name = business.name.as_deref().unwrap_or("Not provided"),
            industry = business.industry.as_deref().unwrap_or("Not specified"),
            description = business.description.as_deref().unwrap_or("Not provided"),
            scores = scores,
            total = audit.total_score,
        )
    }

    pub fn parameter_analysis(parameter: &AuditParameter, business: &BusinessData) -> String {
        format!(
            r#"Analyze this specific business parameter and provide detailed insights:

Parameter: {name}
Current Score: {score}/100
Business: {url}
Industry: {industry}

Provide 3-4 specific insights about what's working well and 3-4 actionable recommendations for improvement.
Focus on practical, implementable suggestions.

Respond in JSON format:
{{
  "insights": ["Insight 1", "Insight 2", "Insight 3"],
  "recommendations": ["Recommendation 1", "Recommendation 2", "Recommendation 3", "Recommendation 4"]
}}"#,
            name = parameter.name,
            score = parameter.score,
            url = business.url,
            industry = business.industry.as_deref().unwrap_or("General"),
        )
    }

    pub fn business_insights(business_url: &str, business_json: &str) -> String {
        format!(
            r#"Analyze this business and provide strategic insights:

Business URL: {business_url}
Business Data: {business_json}

Provide 3-4 paragraphs of strategic business insights covering:
1. Market positioning and competitive advantages
2. Digital presence and online optimization opportunities
3. Operational efficiency and growth potential
4. Strategic recommendations for business development

Be specific and actionable in your recommendations."#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::audit::fixtures::audit_result;

    #[test]
    fn audit_prompt_lists_every_parameter_and_total() {
        let audit = audit_result([67, 55, 70, 48, 41, 73]);
        let business = BusinessData::from(&audit.business_info);
        let prompt = PromptTemplate::audit_analysis(&business, &audit);

        assert!(prompt.contains("- Name: Acme Analytics"));
        assert!(prompt.contains("- Website & Digital Presence: 67/100 (Weight: 30%)"));
        assert!(prompt.contains("- Compliance & Risk Management: 73/100 (Weight: 10%)"));
        assert!(prompt.contains("Total Score: 66/100"));
        assert!(prompt.contains("\"actionPlan\": {"));
    }

    #[test]
    fn parameter_prompt_defaults_industry() {
        let audit = audit_result([10, 20, 30, 40, 50, 60]);
        let business = BusinessData {
            url: "https://acme.example".to_string(),
            ..BusinessData::default()
        };
        let prompt = PromptTemplate::parameter_analysis(&audit.parameters.data_insight, &business);
        assert!(prompt.contains("Parameter: Data & Insight Capability"));
        assert!(prompt.contains("Current Score: 50/100"));
        assert!(prompt.contains("Industry: General"));
    }
}
