use scraper::{ElementRef, Html, Selector};
use tracing::warn;

/// Parsed landing page plus the URL it was fetched from.
///
/// Every query is best-effort: malformed markup still parses, and a selector that matches
/// nothing (or fails to parse) reads as zero / `None` rather than an error.
pub struct MarkupDocument {
    html: Html,
    url: String,
}

impl MarkupDocument {
    pub fn parse(html: &str, url: impl Into<String>) -> Self {
        Self {
            html: Html::parse_document(html),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_https(&self) -> bool {
        self.url
            .get(..8)
            .map(|scheme| scheme.eq_ignore_ascii_case("https://"))
            .unwrap_or(false)
    }

    /// Number of distinct elements matching `css`.
    pub fn count(&self, css: &str) -> usize {
        match selector(css) {
            Some(selector) => self.html.select(&selector).count(),
            None => 0,
        }
    }

    pub fn exists(&self, css: &str) -> bool {
        self.count(css) > 0
    }

    /// Text content of the first matching element in document order.
    pub fn first_text(&self, css: &str) -> Option<String> {
        let selector = selector(css)?;
        self.html.select(&selector).next().map(element_text)
    }

    /// Attribute value of the first matching element that carries it.
    pub fn attr(&self, css: &str, name: &str) -> Option<String> {
        let selector = selector(css)?;
        self.html
            .select(&selector)
            .find_map(|element| element.value().attr(name))
            .map(str::to_string)
    }

    /// Attribute values across every matching element, in document order.
    pub fn attr_values(&self, css: &str, name: &str) -> Vec<String> {
        match selector(css) {
            Some(selector) => self
                .html
                .select(&selector)
                .filter_map(|element| element.value().attr(name))
                .map(str::to_string)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Full text of `<body>`, script and style contents included.
    pub fn body_text(&self) -> String {
        self.first_text("body").unwrap_or_default()
    }
}

fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(err) => {
            warn!(selector = css, error = %err, "ignoring unparseable selector");
            None
        }
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!doctype html>
<html>
  <head>
    <title>Acme Analytics | Home</title>
    <meta name="description" content="Self-serve analytics.">
  </head>
  <body>
    <h1>Dashboards <em>that</em> ship</h1>
    <a href="/about">About</a>
    <a href="https://facebook.com/acme">fb</a>
    <a>no href</a>
  </body>
</html>"#;

    #[test]
    fn queries_existing_elements() {
        let document = MarkupDocument::parse(PAGE, "https://acme.example");
        assert_eq!(document.first_text("title").as_deref(), Some("Acme Analytics | Home"));
        assert_eq!(
            document.attr(r#"meta[name="description"]"#, "content").as_deref(),
            Some("Self-serve analytics.")
        );
        assert_eq!(document.first_text("h1").as_deref(), Some("Dashboards that ship"));
        assert_eq!(document.count("a"), 3);
        assert_eq!(document.attr_values("a", "href").len(), 2);
        assert!(document.body_text().contains("Dashboards"));
    }

    #[test]
    fn absent_or_invalid_selectors_read_as_empty() {
        let document = MarkupDocument::parse(PAGE, "https://acme.example");
        assert_eq!(document.count("nav"), 0);
        assert!(document.first_text("footer").is_none());
        assert!(document.attr(r#"meta[name="viewport"]"#, "content").is_none());
        assert_eq!(document.count("a[href"), 0);
    }

    #[test]
    fn tolerates_broken_markup() {
        let document = MarkupDocument::parse("<div><p>unclosed <b>tags", "http://x.example");
        assert_eq!(document.count("p"), 1);
        assert!(!document.is_https());
    }
}
