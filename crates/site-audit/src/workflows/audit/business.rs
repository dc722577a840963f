use super::domain::BusinessInfo;
use super::markup::MarkupDocument;

pub const UNKNOWN_BUSINESS: &str = "Unknown Business";
pub const NO_DESCRIPTION: &str = "No description available";
pub const OTHER_INDUSTRY: &str = "Other";
const DESCRIPTION_LIMIT: usize = 200;

/// Ordered industry keyword table. First industry with any substring hit wins.
pub const INDUSTRY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Technology",
        &["software", "tech", "app", "digital", "ai", "saas", "platform"],
    ),
    (
        "E-commerce",
        &["shop", "store", "buy", "sell", "commerce", "retail"],
    ),
    (
        "Healthcare",
        &["health", "medical", "doctor", "clinic", "hospital", "care"],
    ),
    (
        "Finance",
        &["bank", "finance", "investment", "loan", "credit", "money"],
    ),
    (
        "Education",
        &["school", "university", "education", "learn", "course", "training"],
    ),
    (
        "Real Estate",
        &["real estate", "property", "home", "house", "rent"],
    ),
    (
        "Food & Beverage",
        &["restaurant", "food", "cafe", "kitchen", "dining"],
    ),
    (
        "Professional Services",
        &["consulting", "legal", "accounting", "marketing", "agency"],
    ),
];

/// Prefixes `https://` unless the input already names an http(s) scheme.
pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim();
    if has_http_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

fn has_http_scheme(input: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        input
            .get(..scheme.len())
            .map(|prefix| prefix.eq_ignore_ascii_case(scheme))
            .unwrap_or(false)
    })
}

/// Host-ish display name for a URL: scheme and everything from the first `/` removed.
pub fn display_host(input: &str) -> String {
    let trimmed = input.trim();
    let lower = trimmed.to_ascii_lowercase();
    let without_scheme = if lower.starts_with("https://") {
        &trimmed[8..]
    } else if lower.starts_with("http://") {
        &trimmed[7..]
    } else {
        trimmed
    };
    without_scheme
        .split('/')
        .next()
        .unwrap_or(without_scheme)
        .to_string()
}

pub fn extract_business_info(document: &MarkupDocument) -> BusinessInfo {
    let title = document
        .first_text("title")
        .map(|title| title.trim().to_string())
        .unwrap_or_default();

    let description = document
        .attr(r#"meta[name="description"]"#, "content")
        .filter(|content| !content.trim().is_empty())
        .or_else(|| document.attr(r#"meta[property="og:description"]"#, "content"))
        .map(|content| content.trim().chars().take(DESCRIPTION_LIMIT).collect::<String>())
        .unwrap_or_default();

    // Placeholder text must not feed the keyword match ("available" contains "ai").
    let industry = infer_industry(&title, &description);

    BusinessInfo {
        name: business_name(&title),
        url: document.url().to_string(),
        industry: Some(industry.to_string()),
        description: Some(if description.is_empty() {
            NO_DESCRIPTION.to_string()
        } else {
            description
        }),
    }
}

/// Title text before the first `|` separator, e.g. "Acme | Home" -> "Acme".
fn business_name(title: &str) -> String {
    let name = title.split('|').next().unwrap_or(title).trim();
    if name.is_empty() {
        UNKNOWN_BUSINESS.to_string()
    } else {
        name.to_string()
    }
}

pub fn infer_industry(title: &str, description: &str) -> &'static str {
    let text = format!("{title} {description}").to_lowercase();
    INDUSTRY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| text.contains(keyword)))
        .map(|(industry, _)| *industry)
        .unwrap_or(OTHER_INDUSTRY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_scheme_less_input() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
        assert_eq!(normalize_url("  http://example.com "), "http://example.com");
        assert_eq!(normalize_url("https://example.com/x"), "https://example.com/x");
        assert_eq!(normalize_url("HTTPS://Example.com"), "HTTPS://Example.com");
    }

    #[test]
    fn hosts_starting_with_http_still_get_a_scheme() {
        assert_eq!(normalize_url("httpbin.org"), "https://httpbin.org");
        assert_eq!(normalize_url("https-everywhere.io/about"), "https://https-everywhere.io/about");
    }

    #[test]
    fn empty_head_reads_as_other_industry() {
        let document = MarkupDocument::parse(
            "<html><head></head><body><p>hello</p></body></html>",
            "https://blank.example",
        );
        let info = extract_business_info(&document);
        assert_eq!(info.name, UNKNOWN_BUSINESS);
        assert_eq!(info.description.as_deref(), Some(NO_DESCRIPTION));
        assert_eq!(info.industry.as_deref(), Some(OTHER_INDUSTRY));
    }

    #[test]
    fn display_host_strips_scheme_and_path() {
        assert_eq!(display_host("https://shop.example.com/products/1"), "shop.example.com");
        assert_eq!(display_host("http://example.org"), "example.org");
        assert_eq!(display_host("example.net/about"), "example.net");
    }

    #[test]
    fn extracts_name_description_and_industry() {
        let html = r#"<html><head>
            <title>Northwind Clinic | Family Medicine</title>
            <meta property="og:description" content="Same-day visits with a family doctor.">
        </head><body></body></html>"#;
        let info = extract_business_info(&MarkupDocument::parse(html, "https://northwind.example"));
        assert_eq!(info.name, "Northwind Clinic");
        assert_eq!(info.url, "https://northwind.example");
        assert_eq!(
            info.description.as_deref(),
            Some("Same-day visits with a family doctor.")
        );
        assert_eq!(info.industry.as_deref(), Some("Healthcare"));
    }

    #[test]
    fn defaults_when_markup_is_bare() {
        let info = extract_business_info(&MarkupDocument::parse(
            "<html><body></body></html>",
            "https://bare.example",
        ));
        assert_eq!(info.name, UNKNOWN_BUSINESS);
        assert_eq!(info.description.as_deref(), Some(NO_DESCRIPTION));
        assert_eq!(info.industry.as_deref(), Some(OTHER_INDUSTRY));
    }

    #[test]
    fn description_is_truncated_to_two_hundred_chars() {
        let html = format!(
            r#"<html><head><meta name="description" content="{}"></head></html>"#,
            "é".repeat(250)
        );
        let info = extract_business_info(&MarkupDocument::parse(&html, "https://long.example"));
        assert_eq!(info.description.map(|d| d.chars().count()), Some(200));
    }

    #[test]
    fn first_matching_industry_wins() {
        assert_eq!(infer_industry("Cloud software store", ""), "Technology");
        assert_eq!(infer_industry("Corner Bakery", "fresh bread and food"), "Food & Beverage");
        assert_eq!(infer_industry("Zebra", "stripes"), "Other");
    }
}
