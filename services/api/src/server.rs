use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_operational_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use org_realign::algorithms::{validate_weight_tables, AlgorithmSuite};
use org_realign::config::AppConfig;
use org_realign::error::AppError;
use org_realign::scenarios::{InMemoryScenarioRepository, ScenarioService};
use org_realign::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;
    validate_weight_tables()?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryScenarioRepository::default());
    let scenario_service = Arc::new(ScenarioService::new(repository, &config.scenarios));
    let suite = Arc::new(AlgorithmSuite::default());

    let app = with_operational_routes(suite, scenario_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        monte_carlo_iterations = config.scenarios.monte_carlo_iterations,
        "organizational realignment service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
