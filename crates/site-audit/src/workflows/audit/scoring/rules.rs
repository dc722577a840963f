use super::lexicon::{has_differentiation_word, innovation_hits, SOCIAL_PLATFORMS};
use super::Scorecard;
use crate::workflows::audit::domain::{AuditParameter, ParameterKind};
use crate::workflows::audit::markup::MarkupDocument;

const CTA_SELECTOR: &str =
    r#"button, .btn, .cta, [href*="contact"], [href*="signup"], [href*="buy"]"#;

/// Website & Digital Presence: mobile readiness, on-page SEO basics, TLS, CTAs, navigation.
pub fn score_digital_presence(document: &MarkupDocument) -> AuditParameter {
    let mut card = Scorecard::new(ParameterKind::DigitalPresence);

    let viewport = document.attr(r#"meta[name="viewport"]"#, "content");
    card.check(
        viewport
            .as_deref()
            .map(|content| content.contains("width=device-width"))
            .unwrap_or(false),
        20,
        "✓ Mobile-responsive viewport detected",
        "Add mobile-responsive viewport meta tag",
    );

    let title_len = document
        .first_text("title")
        .map(|title| title.chars().count())
        .unwrap_or(0);
    card.check(
        title_len > 10 && title_len < 60,
        15,
        "✓ Good title tag length",
        "Optimize title tag (10-60 characters)",
    );

    let description_len = document
        .attr(r#"meta[name="description"]"#, "content")
        .map(|content| content.chars().count())
        .unwrap_or(0);
    card.check(
        description_len > 50 && description_len < 160,
        15,
        "✓ Good meta description length",
        "Add compelling meta description (50-160 characters)",
    );

    card.check(
        document.count("h1") == 1,
        10,
        "✓ Single H1 tag found",
        "Use exactly one H1 tag per page",
    );

    card.check(
        document.is_https(),
        15,
        "✓ SSL certificate installed",
        "Install SSL certificate for security",
    );

    let cta_count = document.count(CTA_SELECTOR);
    card.check(
        cta_count >= 3,
        15,
        format!("✓ {cta_count} call-to-action elements found"),
        "Add more clear call-to-action buttons",
    );

    card.check(
        document.exists("nav, .navigation, .menu"),
        10,
        "✓ Navigation structure present",
        "Improve site navigation structure",
    );

    card.finish()
}

/// Market Visibility & Reputation: social reach, fresh content, social proof, contactability.
pub fn score_market_visibility(document: &MarkupDocument) -> AuditParameter {
    let mut card = Scorecard::new(ParameterKind::MarketVisibility);

    let hrefs: Vec<String> = document
        .attr_values("a[href]", "href")
        .into_iter()
        .map(|href| href.to_ascii_lowercase())
        .collect();
    let platforms = SOCIAL_PLATFORMS
        .iter()
        .filter(|(_, fragment)| hrefs.iter().any(|href| href.contains(fragment)))
        .count();
    match platforms {
        0 => card.recommend("Add social media links and presence"),
        1 | 2 => {
            card.award(15, format!("{platforms} social media platform(s) linked"));
            card.recommend("Expand social media presence to more platforms");
        }
        _ => card.award(25, format!("✓ {platforms} social media platforms linked")),
    }

    card.check(
        document.exists(r#"a[href*="blog"], a[href*="news"], a[href*="article"]"#),
        20,
        "✓ Blog or news section detected",
        "Add blog or news section for fresh content",
    );

    card.check(
        document.exists(r#"[class*="testimonial"], [class*="review"], [class*="feedback"]"#),
        20,
        "✓ Customer testimonials/reviews section found",
        "Add customer testimonials or reviews",
    );

    let contact_methods =
        document.count(r#"[href^="mailto:"], [href^="tel:"], [class*="contact"]"#);
    match contact_methods {
        0 => card.recommend("Add clear contact information"),
        1 => {
            card.points += 10;
            card.recommend("Add more contact methods (phone, email)");
        }
        _ => card.award(15, "✓ Multiple contact methods available"),
    }

    card.check(
        document.exists(r#"a[href*="about"], a[href*="company"]"#),
        20,
        "✓ About/company information available",
        "Add comprehensive about page",
    );

    card.finish()
}

/// Business Operations & Scalability: tooling depth, asset performance, commerce readiness.
pub fn score_business_operations(document: &MarkupDocument) -> AuditParameter {
    let mut card = Scorecard::new(ParameterKind::BusinessOperations);

    card.check(
        document.count("script[src]") >= 5,
        20,
        "✓ Modern technology stack detected",
        "Consider upgrading technology infrastructure",
    );

    let images = document.count("img");
    let optimized = document.count(r#"img[loading="lazy"], img[srcset]"#);
    let ratio = optimized as f64 / images.max(1) as f64;
    card.check(
        ratio > 0.5,
        25,
        "✓ Images appear optimized for performance",
        "Optimize images for better performance",
    );

    card.check(
        document.exists(r#"script[src*="cdn"], link[href*="cdn"], img[src*="cdn"]"#),
        20,
        "✓ CDN usage detected for better performance",
        "Consider using CDN for better global performance",
    );

    card.check(
        document.exists(r#"script[src*="analytics"], script[src*="gtag"], script[src*="gtm"]"#),
        15,
        "✓ Analytics tracking implemented",
        "Implement analytics tracking for data insights",
    );

    // Bonus only, no recommendation when absent.
    if document.exists(
        r#"[class*="cart"], [class*="shop"], [class*="product"], [href*="checkout"]"#,
    ) {
        card.award(20, "✓ E-commerce functionality detected");
    }

    card.finish()
}

/// Competitive Positioning: value proposition, offer breadth, innovation, credibility.
pub fn score_competitive_positioning(document: &MarkupDocument) -> AuditParameter {
    let mut card = Scorecard::new(ParameterKind::CompetitivePositioning);

    let hero_text = document
        .first_text("h1, .hero, .banner")
        .unwrap_or_default()
        .to_lowercase();
    card.check(
        has_differentiation_word(&hero_text),
        25,
        "✓ Unique value proposition messaging detected",
        "Strengthen unique value proposition messaging",
    );

    let feature_sections =
        document.count(r#"[class*="feature"], [class*="service"], [class*="benefit"]"#);
    card.check(
        feature_sections >= 3,
        25,
        format!("✓ {feature_sections} feature/service sections found"),
        "Highlight more features and services",
    );

    let page_text = document.body_text().to_lowercase();
    card.check(
        innovation_hits(&page_text) >= 2,
        20,
        "✓ Innovation and technology focus evident",
        "Emphasize technological innovation and capabilities",
    );

    card.check(
        document.exists(r#"[class*="award"], [class*="certification"], [class*="badge"]"#),
        15,
        "✓ Awards or certifications displayed",
        "Display relevant awards, certifications, or badges",
    );

    card.check(
        document.exists(r#"a[href*="case"], a[href*="portfolio"], a[href*="work"]"#),
        15,
        "✓ Case studies or portfolio available",
        "Add case studies or portfolio examples",
    );

    card.finish()
}

/// Data & Insight Capability: measurement, structured data, event tracking, experimentation.
pub fn score_data_insight(document: &MarkupDocument) -> AuditParameter {
    let mut card = Scorecard::new(ParameterKind::DataInsight);

    card.check(
        document.exists(r#"script[src*="googletagmanager"], script[src*="google-analytics"]"#),
        30,
        "✓ Google Analytics detected",
        "Implement Google Analytics for visitor insights",
    );

    card.check(
        document.exists(r#"script[type="application/ld+json"]"#),
        25,
        "✓ Structured data markup found",
        "Add structured data markup for better SEO",
    );

    card.check(
        document.exists(r#"[onclick], [data-track], [class*="track"]"#),
        20,
        "✓ Event tracking elements detected",
        "Implement conversion and event tracking",
    );

    card.check(
        document.exists(r#"script[src*="optimizely"], script[src*="vwo"], script[src*="hotjar"]"#),
        25,
        "✓ A/B testing or user behavior tools detected",
        "Consider A/B testing tools for optimization",
    );

    card.finish()
}

/// Compliance & Risk Management: legal pages, consent, trust signals.
pub fn score_compliance(document: &MarkupDocument) -> AuditParameter {
    let mut card = Scorecard::new(ParameterKind::Compliance);

    card.check(
        document.exists(r#"a[href*="privacy"], a[href*="policy"]"#),
        30,
        "✓ Privacy policy link found",
        "Add comprehensive privacy policy",
    );

    card.check(
        document.exists(r#"a[href*="terms"], a[href*="conditions"]"#),
        25,
        "✓ Terms of service available",
        "Add terms of service page",
    );

    card.check(
        document.exists(r#"[class*="cookie"], [id*="cookie"]"#),
        20,
        "✓ Cookie consent mechanism detected",
        "Implement cookie consent for GDPR compliance",
    );

    card.check(
        document.exists(r#"[alt*="secure"], [alt*="ssl"], [class*="security"]"#),
        15,
        "✓ Security badges or indicators present",
        "Display security badges to build trust",
    );

    card.check(
        document.exists(r#"[class*="legal"], [href*="contact"]"#),
        10,
        "✓ Legal/contact information available",
        "Ensure legal and contact information is accessible",
    );

    card.finish()
}
