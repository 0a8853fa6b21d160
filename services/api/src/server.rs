use crate::infra::{
    AppState, InMemoryVillageRepository, LoggingNotificationGateway, DEMO_REGISTRY_CSV,
};
use crate::routes::with_village_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::io::Cursor;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use gramjal::config::AppConfig;
use gramjal::error::AppError;
use gramjal::surveillance::registry::RegistryImporter;
use gramjal::surveillance::villages::{RiskConfig, SurveillanceService, Village};
use gramjal::telemetry;
use tracing::info;

pub(crate) async fn run() -> Result<(), AppError> {
    let config = AppConfig::load()?;

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryVillageRepository::default());
    let villages = load_registry(&config)?;
    info!(villages = villages.len(), "village registry loaded");
    repository.seed(villages);

    let gateway = Arc::new(LoggingNotificationGateway::default());
    let service = Arc::new(SurveillanceService::new(
        repository,
        gateway,
        RiskConfig::default(),
    ));

    let app = with_village_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "surveillance decision service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn load_registry(config: &AppConfig) -> Result<Vec<Village>, AppError> {
    let villages = match &config.registry.path {
        Some(path) => RegistryImporter::from_path(path)?,
        None => RegistryImporter::from_reader(Cursor::new(DEMO_REGISTRY_CSV))?,
    };
    Ok(villages)
}
