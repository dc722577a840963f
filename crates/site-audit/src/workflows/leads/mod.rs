//! Synthetic lead generation, deliverability verification, and email screening.

mod domain;
mod rosters;
mod screening;
mod synthesizer;
mod verification;

pub use domain::{
    CompanySize, Lead, LeadGenerationOptions, LeadRequestError, VerifiedStatus, MAX_TARGET_COUNT,
    MIN_TARGET_COUNT,
};
pub use rosters::{companies_for_industry, Company, DEFAULT_JOB_TITLES};
pub use screening::{
    lead_from_email, screen_and_generate, screen_email, validate_email_batch, EmailScreening,
    ScreeningDetails, MAX_EMAILS_PER_REQUEST,
};
pub use synthesizer::{
    email_address, generate_leads, phone_number, simulated_status, DEFAULT_TARGET_INDUSTRY,
};
pub use verification::{
    check_deliverability, mock_check, verify_leads_batch, DeliverabilityCheck,
    DeliverabilityVerifier, HunterVerifier, VerificationError, MOCK_NO_KEY_REASON,
    MOCK_UNAVAILABLE_REASON,
};

#[cfg(test)]
pub(crate) use verification::fakes;
