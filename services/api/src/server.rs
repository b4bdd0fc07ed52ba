use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::eligibility_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use grant_eligibility::config::AppConfig;
use grant_eligibility::eligibility::EligibilityEngine;
use grant_eligibility::error::AppError;
use grant_eligibility::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
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

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        engine: Arc::new(EligibilityEngine::new(config.policy.clone())),
    };

    let app = eligibility_routes()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        veni_lower_bound = config.policy.veni_lower_bound_years,
        msca_deadline = %config.policy.msca_deadline,
        "grant eligibility service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
