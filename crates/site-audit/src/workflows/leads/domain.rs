use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const MIN_TARGET_COUNT: u32 = 1;
pub const MAX_TARGET_COUNT: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanySize {
    Startup,
    Small,
    Medium,
    Large,
    Enterprise,
}

impl CompanySize {
    pub const ALL: [CompanySize; 5] = [
        CompanySize::Startup,
        CompanySize::Small,
        CompanySize::Medium,
        CompanySize::Large,
        CompanySize::Enterprise,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            CompanySize::Startup => "startup",
            CompanySize::Small => "small",
            CompanySize::Medium => "medium",
            CompanySize::Large => "large",
            CompanySize::Enterprise => "enterprise",
        }
    }
}

impl fmt::Display for CompanySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompanySize {
    type Err = LeadRequestError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        CompanySize::ALL
            .into_iter()
            .find(|size| size.as_str() == normalized)
            .ok_or_else(|| LeadRequestError::UnknownCompanySize(value.to_string()))
    }
}

/// Four independent pass/fail facets stamped on each lead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedStatus {
    pub accuracy: bool,
    pub deliverability: bool,
    pub relevance: bool,
    pub compliance: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub company_name: String,
    pub contact_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_size: Option<CompanySize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub verified_status: VerifiedStatus,
}

/// Targeting filters for one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadGenerationOptions {
    pub target_count: u32,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub company_size: Option<CompanySize>,
    #[serde(default)]
    pub job_titles: Option<Vec<String>>,
}

impl LeadGenerationOptions {
    pub fn new(target_count: u32) -> Self {
        Self {
            target_count,
            ..Self::default()
        }
    }

    /// Rejects requests the synthesizer must never see.
    pub fn validate(&self) -> Result<(), LeadRequestError> {
        if !(MIN_TARGET_COUNT..=MAX_TARGET_COUNT).contains(&self.target_count) {
            return Err(LeadRequestError::TargetCountOutOfRange {
                requested: self.target_count,
            });
        }
        if let Some(titles) = &self.job_titles {
            if titles.iter().all(|title| title.trim().is_empty()) {
                return Err(LeadRequestError::EmptyJobTitles);
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LeadRequestError {
    #[error("target count must be between 1 and 1000, got {requested}")]
    TargetCountOutOfRange { requested: u32 },
    #[error("job titles, when provided, must contain at least one title")]
    EmptyJobTitles,
    #[error("unknown company size `{0}`")]
    UnknownCompanySize(String),
    #[error("no emails provided")]
    NoEmails,
    #[error("at most {max} emails may be verified per request, got {requested}")]
    TooManyEmails { max: usize, requested: usize },
}
