mod lexicon;
mod rules;

use super::domain::{AuditParameter, AuditParameters, ParameterKind};
use super::markup::MarkupDocument;

pub use rules::{
    score_business_operations, score_competitive_positioning, score_compliance,
    score_data_insight, score_digital_presence, score_market_visibility,
};

/// Runs all six scorers against the same document.
pub fn score_document(document: &MarkupDocument) -> AuditParameters {
    AuditParameters {
        digital_presence: score_digital_presence(document),
        market_visibility: score_market_visibility(document),
        business_operations: score_business_operations(document),
        competitive_positioning: score_competitive_positioning(document),
        data_insight: score_data_insight(document),
        compliance: score_compliance(document),
    }
}

/// Additive point tally for one parameter. Checks never subtract; the clamp happens in
/// [`AuditParameter::new`].
pub(crate) struct Scorecard {
    kind: ParameterKind,
    points: u32,
    insights: Vec<String>,
    recommendations: Vec<String>,
}

impl Scorecard {
    pub(crate) fn new(kind: ParameterKind) -> Self {
        Self {
            kind,
            points: 0,
            insights: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    pub(crate) fn award(&mut self, points: u32, insight: impl Into<String>) {
        self.points += points;
        self.insights.push(insight.into());
    }

    pub(crate) fn recommend(&mut self, recommendation: impl Into<String>) {
        self.recommendations.push(recommendation.into());
    }

    /// Awards `points` with `insight` when `passed`, otherwise records `recommendation`.
    pub(crate) fn check(
        &mut self,
        passed: bool,
        points: u32,
        insight: impl Into<String>,
        recommendation: impl Into<String>,
    ) {
        if passed {
            self.award(points, insight);
        } else {
            self.recommend(recommendation);
        }
    }

    pub(crate) fn finish(self) -> AuditParameter {
        AuditParameter::new(self.kind, self.points, self.insights, self.recommendations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scorecard_clamps_overshoot() {
        let mut card = Scorecard::new(ParameterKind::Compliance);
        card.award(70, "first");
        card.award(70, "second");
        card.recommend("third");
        let parameter = card.finish();
        assert_eq!(parameter.score, 100);
        assert_eq!(parameter.insights, vec!["first", "second"]);
        assert_eq!(parameter.recommendations, vec!["third"]);
    }

    #[test]
    fn scoring_is_pure_for_identical_markup() {
        let html = r#"<html><head><title>Northwind Traders | Shop</title></head>
            <body><nav></nav><h1>The only smart pantry</h1>
            <a href="/privacy">Privacy</a><img src="a.png" loading="lazy"></body></html>"#;
        let first = score_document(&MarkupDocument::parse(html, "https://northwind.example"));
        let second = score_document(&MarkupDocument::parse(html, "https://northwind.example"));
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).expect("json"),
            serde_json::to_string(&second).expect("json")
        );
    }
}
