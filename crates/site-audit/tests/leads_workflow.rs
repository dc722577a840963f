use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use site_audit::workflows::audit::{synthetic_result, AuditResult};
use site_audit::workflows::leads::{
    companies_for_industry, generate_leads, screen_and_generate, verify_leads_batch,
    CompanySize, DeliverabilityCheck, DeliverabilityVerifier, LeadGenerationOptions,
    LeadRequestError, VerificationError,
};
use site_audit::workflows::usage::{PlanTier, UsageCharge, UsageLimitError, UsageSnapshot};

/// Accepts every mailbox on `good.example`, rejects the rest.
struct DomainVerifier;

#[async_trait]
impl DeliverabilityVerifier for DomainVerifier {
    async fn verify(&self, email: &str) -> Result<DeliverabilityCheck, VerificationError> {
        let deliverable = email.ends_with("@good.example");
        Ok(DeliverabilityCheck {
            deliverable,
            score: if deliverable { 91 } else { 12 },
            reason: Some(if deliverable { "deliverable" } else { "undeliverable" }.to_string()),
        })
    }
}

fn finance_audit() -> AuditResult {
    let mut audit = synthetic_result("ledger.example", &mut StdRng::seed_from_u64(5));
    audit.business_info.industry = Some("Finance".to_string());
    audit
}

#[test]
fn same_seed_yields_same_leads() {
    let audit = finance_audit();
    let options = LeadGenerationOptions::new(12);
    let first = generate_leads(&audit, &options, &mut StdRng::seed_from_u64(40)).expect("leads");
    let second = generate_leads(&audit, &options, &mut StdRng::seed_from_u64(40)).expect("leads");
    assert_eq!(first, second);
}

#[test]
fn leads_target_the_audited_industry() {
    let audit = finance_audit();
    let options = LeadGenerationOptions {
        company_size: Some(CompanySize::Small),
        ..LeadGenerationOptions::new(30)
    };
    let leads = generate_leads(&audit, &options, &mut StdRng::seed_from_u64(8)).expect("leads");

    let roster: Vec<&str> = companies_for_industry("Finance")
        .iter()
        .map(|company| company.name)
        .collect();
    assert_eq!(leads.len(), 30);
    for lead in &leads {
        assert!(roster.contains(&lead.company_name.as_str()));
        assert_eq!(lead.company_size, Some(CompanySize::Small));
        assert!(lead.title.is_some());
        assert!(lead.location.is_some());
    }
}

#[test]
fn invalid_requests_never_reach_generation() {
    let audit = finance_audit();
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(
        generate_leads(&audit, &LeadGenerationOptions::new(1001), &mut rng),
        Err(LeadRequestError::TargetCountOutOfRange { requested: 1001 })
    );
    let blank_titles = LeadGenerationOptions {
        job_titles: Some(vec![" ".to_string()]),
        ..LeadGenerationOptions::new(5)
    };
    assert_eq!(
        generate_leads(&audit, &blank_titles, &mut rng),
        Err(LeadRequestError::EmptyJobTitles)
    );
}

#[tokio::test]
async fn verification_keeps_only_deliverable_leads() {
    let audit = finance_audit();
    let mut rng = StdRng::seed_from_u64(14);
    let mut leads = generate_leads(&audit, &LeadGenerationOptions::new(6), &mut rng).expect("leads");
    for (index, lead) in leads.iter_mut().enumerate() {
        let domain = if index % 2 == 0 { "good.example" } else { "bad.example" };
        lead.email = format!("contact{index}@{domain}");
    }

    let kept = verify_leads_batch(&DomainVerifier, leads, &mut rng).await;
    assert_eq!(kept.len(), 3);
    assert!(kept
        .iter()
        .all(|lead| lead.email.ends_with("@good.example") && lead.verified_status.deliverability));
}

#[tokio::test]
async fn screened_emails_become_billable_leads() {
    let emails: Vec<String> = [
        "ana@good.example",
        "ben@bad.example",
        "support@good.example",
        "broken-address",
    ]
    .into_iter()
    .map(String::from)
    .collect();

    let mut usage = UsageSnapshot::default();
    let plan = PlanTier::Starter;
    let allowance = usage.remaining_leads(plan);
    let (results, leads) =
        screen_and_generate(&DomainVerifier, &emails, allowance, &mut StdRng::seed_from_u64(2))
            .await
            .expect("screening");

    assert_eq!(results.len(), 4);
    let valid: Vec<&str> = results
        .iter()
        .filter(|result| result.is_valid)
        .map(|result| result.email.as_str())
        .collect();
    assert_eq!(valid, vec!["ana@good.example", "support@good.example"]);
    assert_eq!(leads.len(), 2);
    assert_eq!(leads[0].contact_name, "Ana");

    let charged = usage.apply(UsageCharge::VerifiedLeads(leads.len() as u32));
    assert_eq!(charged, 2);
    assert_eq!(usage.remaining_leads(plan), 98);
}

#[test]
fn usage_blocks_requests_past_the_plan() {
    let usage = UsageSnapshot {
        audits_used: 5,
        leads_used: 100,
        credits_used: 250,
    };
    assert_eq!(
        usage.check_audit(PlanTier::Starter),
        Err(UsageLimitError::AuditLimitReached { limit: 5 })
    );
    assert!(usage.check_audit(PlanTier::Growth).is_ok());
    assert_eq!(
        usage.check_leads(PlanTier::Starter, 1),
        Err(UsageLimitError::LeadLimitExceeded { remaining: 0 })
    );
}
