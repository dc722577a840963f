use crate::commands::{run_audit, run_emails, run_leads, AuditArgs, EmailsArgs, LeadsArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use site_audit::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Site Audit",
    about = "Score business websites, enrich the report, and synthesize sales leads",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Audit a website and print the scored report
    Audit(AuditArgs),
    /// Audit a website and generate leads for its market
    Leads(LeadsArgs),
    /// Screen email addresses for deliverability
    Emails(EmailsArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Audit(args) => run_audit(args).await,
        Command::Leads(args) => run_leads(args).await,
        Command::Emails(args) => run_emails(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve() {
        let cli = Cli::try_parse_from(["site-audit"]).expect("parse");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_lead_filters() {
        let cli = Cli::try_parse_from([
            "site-audit",
            "leads",
            "acme.example",
            "--count",
            "25",
            "--company-size",
            "startup",
            "--job-title",
            "CTO",
            "--job-title",
            "CEO",
        ])
        .expect("parse");
        let Some(Command::Leads(args)) = cli.command else {
            panic!("expected leads command");
        };
        assert_eq!(args.count, 25);
        assert_eq!(
            args.company_size,
            Some(site_audit::workflows::leads::CompanySize::Startup)
        );
        assert_eq!(args.job_titles, vec!["CTO", "CEO"]);
    }

    #[test]
    fn rejects_unknown_company_size() {
        assert!(Cli::try_parse_from([
            "site-audit",
            "leads",
            "acme.example",
            "--company-size",
            "huge"
        ])
        .is_err());
    }

    #[test]
    fn emails_need_at_least_one_address() {
        assert!(Cli::try_parse_from(["site-audit", "emails"]).is_err());
    }
}
