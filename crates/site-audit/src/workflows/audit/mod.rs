//! Website audit: markup signals, six parameter scorers, and the aggregating analyzer.

mod analyzer;
mod business;
mod domain;
mod fallback;
mod markup;
mod scoring;

pub use analyzer::{
    score_page, AuditAnalyzer, AuditRequestError, FetchError, HttpPageFetcher, PageFetcher,
};
pub use business::{display_host, extract_business_info, infer_industry, normalize_url};
pub use domain::{AuditParameter, AuditParameters, AuditResult, BusinessInfo, ParameterKind};
pub use fallback::synthetic_result;
pub use markup::MarkupDocument;
pub use scoring::{
    score_business_operations, score_competitive_positioning, score_compliance,
    score_data_insight, score_digital_presence, score_document, score_market_visibility,
};

#[cfg(test)]
pub(crate) use domain::fixtures;
