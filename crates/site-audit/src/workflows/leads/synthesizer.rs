use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

use super::domain::{Lead, LeadGenerationOptions, LeadRequestError, VerifiedStatus};
use super::rosters::{
    companies_for_industry, Company, CITIES, DEFAULT_JOB_TITLES, FIRST_NAMES, LAST_NAMES, OTHER,
};
use crate::workflows::audit::AuditResult;

pub const DEFAULT_TARGET_INDUSTRY: &str = "Technology";

const ACCURACY_RATE: f64 = 0.85;
const DELIVERABILITY_RATE: f64 = 0.90;
const RELEVANCE_RATE: f64 = 0.80;
const COMPLIANCE_RATE: f64 = 0.95;

/// Synthesizes exactly `options.target_count` leads aimed at the audited business's market.
pub fn generate_leads<R>(
    audit: &AuditResult,
    options: &LeadGenerationOptions,
    rng: &mut R,
) -> Result<Vec<Lead>, LeadRequestError>
where
    R: Rng + ?Sized,
{
    options.validate()?;

    let industry = non_blank(options.industry.as_deref())
        .or_else(|| non_blank(audit.business_info.industry.as_deref()))
        .unwrap_or(DEFAULT_TARGET_INDUSTRY)
        .to_string();
    let titles: Vec<&str> = match &options.job_titles {
        Some(titles) => titles
            .iter()
            .map(|title| title.trim())
            .filter(|title| !title.is_empty())
            .collect(),
        None => DEFAULT_JOB_TITLES.to_vec(),
    };
    let location = non_blank(options.location.as_deref());
    let roster = companies_for_industry(&industry);

    let leads: Vec<Lead> = (0..options.target_count)
        .map(|_| {
            let company = roster.choose(rng).unwrap_or(&OTHER[0]);
            synthesize_lead(company, &industry, &titles, location, options, rng)
        })
        .collect();

    info!(
        industry = %industry,
        count = leads.len(),
        "generated synthetic leads"
    );
    Ok(leads)
}

fn synthesize_lead<R>(
    company: &Company,
    industry: &str,
    titles: &[&str],
    location: Option<&str>,
    options: &LeadGenerationOptions,
    rng: &mut R,
) -> Lead
where
    R: Rng + ?Sized,
{
    let title = titles.choose(rng).copied().unwrap_or(DEFAULT_JOB_TITLES[0]);
    let first = FIRST_NAMES.choose(rng).copied().unwrap_or(FIRST_NAMES[0]);
    let last = LAST_NAMES.choose(rng).copied().unwrap_or(LAST_NAMES[0]);
    let email = email_address(first, last, company.domain, rng);
    let phone = phone_number(rng);
    let location = match location {
        Some(location) => location.to_string(),
        None => CITIES.choose(rng).copied().unwrap_or(CITIES[0]).to_string(),
    };

    Lead {
        company_name: company.name.to_string(),
        contact_name: format!("{first} {last}"),
        email,
        phone: Some(phone),
        title: Some(title.to_string()),
        industry: Some(industry.to_string()),
        company_size: Some(options.company_size.unwrap_or(company.size)),
        location: Some(location),
        verified_status: simulated_status(rng),
    }
}

/// One of `first.last@`, `firstlast@`, `flast@`, `first@`, all lowercase.
pub fn email_address<R>(first: &str, last: &str, domain: &str, rng: &mut R) -> String
where
    R: Rng + ?Sized,
{
    let first = first.to_lowercase();
    let last = last.to_lowercase();
    let local = match rng.gen_range(0..4) {
        0 => format!("{first}.{last}"),
        1 => format!("{first}{last}"),
        2 => {
            let initial: String = first.chars().take(1).collect();
            format!("{initial}{last}")
        }
        _ => first,
    };
    format!("{local}@{domain}")
}

/// `+1-AAA-EEE-NNNN` with area and exchange in 100..=999 and line in 1000..=9999.
pub fn phone_number<R>(rng: &mut R) -> String
where
    R: Rng + ?Sized,
{
    let area = rng.gen_range(100..=999);
    let exchange = rng.gen_range(100..=999);
    let line = rng.gen_range(1000..=9999);
    format!("+1-{area}-{exchange}-{line}")
}

/// Independent flips per facet; a lead can be deliverable yet non-compliant.
pub fn simulated_status<R>(rng: &mut R) -> VerifiedStatus
where
    R: Rng + ?Sized,
{
    VerifiedStatus {
        accuracy: rng.gen_bool(ACCURACY_RATE),
        deliverability: rng.gen_bool(DELIVERABILITY_RATE),
        relevance: rng.gen_bool(RELEVANCE_RATE),
        compliance: rng.gen_bool(COMPLIANCE_RATE),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
