use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::info;

use super::domain::{Lead, LeadRequestError, VerifiedStatus};
use super::verification::{check_deliverability, DeliverabilityVerifier};

pub const MAX_EMAILS_PER_REQUEST: usize = 100;
const VALID_SCORE: u8 = 70;

const DISPOSABLE_DOMAINS: &[&str] = &[
    "10minutemail.com",
    "tempmail.org",
    "guerrillamail.com",
    "mailinator.com",
    "yopmail.com",
    "temp-mail.org",
    "throwaway.email",
    "maildrop.cc",
    "sharklasers.com",
    "guerrillamailblock.com",
    "pokemail.net",
    "spam4.me",
];

const ROLE_PREFIXES: &[&str] = &[
    "admin",
    "support",
    "info",
    "contact",
    "sales",
    "marketing",
    "noreply",
    "no-reply",
];

const KNOWN_TLDS: &[&str] = &[
    ".com", ".org", ".net", ".edu", ".gov", ".mil", ".int", ".co", ".io", ".ai", ".app",
];

/// Suffixes dropped when deriving a company name from a mail domain.
const COMMON_TLDS: &[&str] = &[".com", ".org", ".net", ".edu", ".gov"];

static EMAIL_SYNTAX: OnceLock<Option<Regex>> = OnceLock::new();
static SHORT_TLD: OnceLock<Option<Regex>> = OnceLock::new();

/// Which screening checks passed. `disposable` and `role` are true when the address is
/// *not* disposable / *not* role-based.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningDetails {
    pub syntax: bool,
    pub domain: bool,
    pub mailbox: bool,
    pub disposable: bool,
    pub role: bool,
}

impl ScreeningDetails {
    fn score(&self) -> u8 {
        [
            (self.syntax, 20),
            (self.domain, 25),
            (self.mailbox, 35),
            (self.disposable, 15),
            (self.role, 5),
        ]
        .into_iter()
        .filter(|(passed, _)| *passed)
        .map(|(_, points)| points)
        .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailScreening {
    pub email: String,
    pub is_valid: bool,
    pub score: u8,
    pub message: String,
    pub details: ScreeningDetails,
}

fn email_syntax() -> Option<&'static Regex> {
    EMAIL_SYNTAX
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok())
        .as_ref()
}

fn has_plausible_tld(domain: &str) -> bool {
    let short_tld = SHORT_TLD
        .get_or_init(|| Regex::new(r"(?i)\.[a-z]{2,4}$").ok())
        .as_ref();
    KNOWN_TLDS.iter().any(|tld| domain.ends_with(tld))
        || short_tld.map(|re| re.is_match(domain)).unwrap_or(false)
}

/// Screens one address. Disposable domains and malformed addresses never reach the
/// deliverability verifier.
pub async fn screen_email<V, R>(verifier: &V, raw_email: &str, rng: &mut R) -> EmailScreening
where
    V: DeliverabilityVerifier + ?Sized,
    R: Rng + Send + ?Sized,
{
    let email = raw_email.trim().to_lowercase();
    let syntax_ok = email_syntax().map(|re| re.is_match(&email)).unwrap_or(false);
    let parts = if syntax_ok { email.split_once('@') } else { None };
    let Some((local, domain)) = parts else {
        return EmailScreening {
            email: email.clone(),
            is_valid: false,
            score: 0,
            message: "Invalid email format".to_string(),
            details: ScreeningDetails::default(),
        };
    };

    let disposable = DISPOSABLE_DOMAINS.contains(&domain);
    let role = ROLE_PREFIXES.iter().any(|prefix| local.starts_with(prefix));
    let tld_ok = has_plausible_tld(domain);

    let mailbox = if disposable {
        None
    } else {
        Some(check_deliverability(verifier, &email, rng).await)
    };
    let mailbox_ok = mailbox.as_ref().map(|check| check.deliverable).unwrap_or(false);

    let details = ScreeningDetails {
        syntax: true,
        domain: tld_ok,
        mailbox: mailbox_ok,
        disposable: !disposable,
        role: !role,
    };
    let score = details.score();
    let is_valid = score >= VALID_SCORE && !disposable && mailbox_ok;

    let message = if disposable {
        "Disposable email address detected".to_string()
    } else if !mailbox_ok {
        let reason = mailbox
            .and_then(|check| check.reason)
            .unwrap_or_else(|| "mailbox rejected".to_string());
        format!("Email verification failed: {reason}")
    } else if role {
        "Role-based email address (may be valid but not personal)".to_string()
    } else if !tld_ok {
        "Invalid domain format".to_string()
    } else if score < VALID_SCORE {
        "Email may not be deliverable".to_string()
    } else {
        "Valid email address".to_string()
    };

    EmailScreening {
        email,
        is_valid,
        score,
        message,
        details,
    }
}

/// Bounds a bulk screening request: at least one address, at most one hundred.
pub fn validate_email_batch(emails: &[String]) -> Result<(), LeadRequestError> {
    let provided = emails.iter().filter(|email| !email.trim().is_empty()).count();
    if provided == 0 {
        return Err(LeadRequestError::NoEmails);
    }
    if emails.len() > MAX_EMAILS_PER_REQUEST {
        return Err(LeadRequestError::TooManyEmails {
            max: MAX_EMAILS_PER_REQUEST,
            requested: emails.len(),
        });
    }
    Ok(())
}

/// Lead derived from a screened address, e.g. `sarah@acme.com` -> "Sarah" at "acme".
pub fn lead_from_email(email: &str) -> Lead {
    let (local, domain) = email.split_once('@').unwrap_or((email, ""));
    let company = COMMON_TLDS
        .iter()
        .find_map(|tld| domain.strip_suffix(tld))
        .unwrap_or(domain);

    Lead {
        company_name: company.to_string(),
        contact_name: capitalize(local),
        email: email.to_string(),
        phone: None,
        title: None,
        industry: None,
        company_size: None,
        location: None,
        verified_status: VerifiedStatus {
            accuracy: true,
            deliverability: true,
            relevance: true,
            compliance: true,
        },
    }
}

/// Screens each address and turns valid ones into leads, stopping lead creation once
/// `lead_allowance` is used up. Screening results cover every non-blank input.
pub async fn screen_and_generate<V, R>(
    verifier: &V,
    emails: &[String],
    lead_allowance: u32,
    rng: &mut R,
) -> Result<(Vec<EmailScreening>, Vec<Lead>), LeadRequestError>
where
    V: DeliverabilityVerifier + ?Sized,
    R: Rng + Send + ?Sized,
{
    validate_email_batch(emails)?;

    let mut results = Vec::with_capacity(emails.len());
    let mut leads = Vec::new();
    for email in emails.iter().filter(|email| !email.trim().is_empty()) {
        let screening = screen_email(verifier, email, rng).await;
        if screening.is_valid && (leads.len() as u32) < lead_allowance {
            leads.push(lead_from_email(&screening.email));
        }
        results.push(screening);
    }

    info!(
        screened = results.len(),
        valid = results.iter().filter(|r| r.is_valid).count(),
        leads = leads.len(),
        "email screening complete"
    );
    Ok((results, leads))
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
