use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryAuditRepository, InMemoryUsageLedger};
use crate::routes::with_report_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use site_audit::config::AppConfig;
use site_audit::error::AppError;
use site_audit::telemetry;
use site_audit::workflows::audit::{AuditAnalyzer, HttpPageFetcher};
use site_audit::workflows::enrichment::EnrichmentService;
use site_audit::workflows::leads::HunterVerifier;
use site_audit::workflows::reports::ReportService;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let enrichment = config
        .enrichment
        .as_ref()
        .map(EnrichmentService::from_config)
        .transpose()?;
    if enrichment.is_none() {
        warn!("OPENAI_API_KEY not set; audits will be served without enrichment");
    }
    if config.verification.hunter_api_key.is_none() {
        warn!("HUNTER_API_KEY not set; deliverability checks will be simulated");
    }

    let report_service = Arc::new(ReportService::new(
        AuditAnalyzer::new(HttpPageFetcher::new(&config.audit)?),
        enrichment,
        HunterVerifier::new(&config.verification)?,
        Arc::new(InMemoryAuditRepository::default()),
        Arc::new(InMemoryUsageLedger::default()),
    ));

    let app = with_report_routes(report_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "site audit service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
