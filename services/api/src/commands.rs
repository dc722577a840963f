use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use site_audit::config::AppConfig;
use site_audit::error::AppError;
use site_audit::workflows::audit::{AuditAnalyzer, AuditResult, HttpPageFetcher};
use site_audit::workflows::enrichment::{
    AuditNarrative, BusinessData, EnhancedAuditResult, EnrichmentService,
};
use site_audit::workflows::leads::{
    generate_leads, screen_and_generate, verify_leads_batch, CompanySize, EmailScreening,
    HunterVerifier, Lead, LeadGenerationOptions, MAX_EMAILS_PER_REQUEST,
};

#[derive(Args, Debug)]
pub(crate) struct AuditArgs {
    /// Website to audit; `https://` is assumed when no scheme is given
    pub(crate) url: String,
    /// Override the business name read from the page title
    #[arg(long)]
    pub(crate) name: Option<String>,
    /// Add an AI narrative (requires OPENAI_API_KEY)
    #[arg(long)]
    pub(crate) enrich: bool,
    /// Print the result as JSON instead of a text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct LeadsArgs {
    /// Website whose audit seeds the target industry
    pub(crate) url: String,
    /// Number of leads to generate (1-1000)
    #[arg(long, default_value_t = 10)]
    pub(crate) count: u32,
    /// Target industry; defaults to the audited business's industry
    #[arg(long)]
    pub(crate) industry: Option<String>,
    /// Location stamped on every lead
    #[arg(long)]
    pub(crate) location: Option<String>,
    /// Company size: startup, small, medium, large or enterprise
    #[arg(long)]
    pub(crate) company_size: Option<CompanySize>,
    /// Job title to draw from; repeat for several
    #[arg(long = "job-title")]
    pub(crate) job_titles: Vec<String>,
    /// Re-check deliverability and keep only deliverable leads
    #[arg(long)]
    pub(crate) verify: bool,
    /// Seed for reproducible output
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Print the leads as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct EmailsArgs {
    /// Addresses to screen (at most 100)
    #[arg(required = true)]
    pub(crate) emails: Vec<String>,
    /// Print the screening results as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) async fn run_audit(args: AuditArgs) -> Result<(), AppError> {
    let AuditArgs {
        url,
        name,
        enrich,
        json,
    } = args;
    let config = AppConfig::load()?;
    let analyzer = AuditAnalyzer::new(HttpPageFetcher::new(&config.audit)?);

    let mut audit = analyzer.analyze(&url).await?;
    if let Some(name) = name.filter(|name| !name.trim().is_empty()) {
        audit.business_info.name = name.trim().to_string();
    }

    let narrative = match (enrich, config.enrichment.as_ref()) {
        (false, _) => None,
        (true, None) => {
            eprintln!("OPENAI_API_KEY is not set; skipping enrichment");
            None
        }
        (true, Some(enrichment)) => {
            let service = EnrichmentService::from_config(enrichment)?;
            let business = BusinessData::from(&audit.business_info);
            let enhanced = service.enrich(&business, &audit).await;
            audit = enhanced.audit;
            Some(enhanced.narrative)
        }
    };

    if json {
        return match narrative {
            Some(narrative) => print_json(&EnhancedAuditResult { audit, narrative }),
            None => print_json(&audit),
        };
    }

    render_audit(&audit);
    if let Some(narrative) = &narrative {
        render_narrative(narrative);
    }
    Ok(())
}

pub(crate) async fn run_leads(args: LeadsArgs) -> Result<(), AppError> {
    let options = LeadGenerationOptions {
        target_count: args.count,
        industry: args.industry,
        location: args.location,
        company_size: args.company_size,
        job_titles: (!args.job_titles.is_empty()).then_some(args.job_titles),
    };
    options.validate()?;

    let config = AppConfig::load()?;
    let analyzer = AuditAnalyzer::new(HttpPageFetcher::new(&config.audit)?);
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let audit = analyzer.analyze_with_rng(&args.url, &mut rng).await?;
    let mut leads = generate_leads(&audit, &options, &mut rng)?;
    if args.verify {
        let verifier = HunterVerifier::new(&config.verification)?;
        leads = verify_leads_batch(&verifier, leads, &mut rng).await;
    }

    if args.json {
        return print_json(&leads);
    }

    println!(
        "{} leads for {} ({})",
        leads.len(),
        audit.business_info.name,
        audit
            .business_info
            .industry
            .as_deref()
            .unwrap_or("unknown industry")
    );
    if args.verify {
        println!("Verified: {} of {} kept", leads.len(), options.target_count);
    }
    for lead in &leads {
        render_lead(lead);
    }
    Ok(())
}

pub(crate) async fn run_emails(args: EmailsArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let verifier = HunterVerifier::new(&config.verification)?;
    let allowance = MAX_EMAILS_PER_REQUEST as u32;
    let (results, leads) =
        screen_and_generate(&verifier, &args.emails, allowance, &mut StdRng::from_entropy())
            .await?;

    if args.json {
        return print_json(&serde_json::json!({ "results": results, "leads": leads }));
    }

    for screening in &results {
        render_screening(screening);
    }
    println!(
        "\n{} of {} addresses valid; {} leads created",
        results.iter().filter(|result| result.is_valid).count(),
        results.len(),
        leads.len()
    );
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    println!("{rendered}");
    Ok(())
}

fn render_audit(audit: &AuditResult) {
    let info = &audit.business_info;
    println!("Website audit: {} ({})", info.name, info.url);
    if let Some(industry) = &info.industry {
        println!("Industry: {industry}");
    }
    if let Some(description) = &info.description {
        println!("About: {description}");
    }
    println!("Overall score: {}/100\n", audit.total_score);

    for (kind, parameter) in audit.parameters.iter() {
        println!(
            "{:<24} {:>3}/100  (weight {}%)",
            kind.label(),
            parameter.score,
            parameter.weight
        );
    }

    let (weakest, parameter) = audit.weakest_parameter();
    println!("\nWeakest area: {} ({})", weakest.label(), parameter.score);

    for (kind, parameter) in audit.parameters.iter() {
        println!("\n{}", kind.label());
        for insight in &parameter.insights {
            println!("  + {insight}");
        }
        for recommendation in &parameter.recommendations {
            println!("  - {recommendation}");
        }
    }
}

fn render_narrative(narrative: &AuditNarrative) {
    println!("\nExecutive summary\n  {}", narrative.executive_summary);
    print_list("Key findings", &narrative.key_findings);
    print_list("Priority recommendations", &narrative.priority_recommendations);
    print_list("Growth opportunities", &narrative.growth_opportunities);
    println!("\nCompetitive analysis\n  {}", narrative.competitive_analysis);
    println!("\nRisk assessment\n  {}", narrative.risk_assessment);
    print_list("Immediate actions", &narrative.action_plan.immediate);
    print_list("Short-term actions", &narrative.action_plan.short_term);
    print_list("Long-term actions", &narrative.action_plan.long_term);
}

fn print_list(heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("\n{heading}");
    for item in items {
        println!("  - {item}");
    }
}

fn render_lead(lead: &Lead) {
    let status = &lead.verified_status;
    println!(
        "- {} <{}> | {} | {}{} | {} | checks: accuracy={} deliverability={} relevance={} compliance={}",
        lead.contact_name,
        lead.email,
        lead.title.as_deref().unwrap_or("-"),
        lead.company_name,
        lead.company_size
            .map(|size| format!(" ({size})"))
            .unwrap_or_default(),
        lead.location.as_deref().unwrap_or("-"),
        status.accuracy,
        status.deliverability,
        status.relevance,
        status.compliance
    );
}

fn render_screening(screening: &EmailScreening) {
    println!(
        "{:<36} {:>3}  {:<7} {}",
        screening.email,
        screening.score,
        if screening.is_valid { "valid" } else { "invalid" },
        screening.message
    );
}
