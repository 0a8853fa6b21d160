use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use super::domain::{Actor, MeasurementSet, VillageId, WaterQualityLabel};
use super::repository::{NotificationGateway, RepositoryError, VillageRepository};
use super::service::{NotificationRequest, ServiceError, SurveillanceService};

/// Router builder exposing the surveillance decisions over HTTP. The actor
/// travels in every request body; there is no session state.
pub fn village_router<R, G>(service: Arc<SurveillanceService<R, G>>) -> Router
where
    R: VillageRepository + 'static,
    G: NotificationGateway + 'static,
{
    Router::new()
        .route("/api/v1/villages/overview", post(overview_handler::<R, G>))
        .route(
            "/api/v1/villages/:village_id/assessment",
            post(assessment_handler::<R, G>),
        )
        .route(
            "/api/v1/villages/:village_id/measurements",
            post(measurements_handler::<R, G>),
        )
        .route(
            "/api/v1/villages/:village_id/profile",
            post(profile_handler::<R, G>),
        )
        .route(
            "/api/v1/villages/:village_id/notifications",
            post(notification_handler::<R, G>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ActorEnvelope {
    pub(crate) actor: Actor,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MeasurementsBody {
    pub(crate) actor: Actor,
    pub(crate) measurements: MeasurementSet,
    pub(crate) observed_on: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProfileBody {
    pub(crate) actor: Actor,
    pub(crate) population: u32,
    pub(crate) water_quality: WaterQualityLabel,
    pub(crate) observed_on: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NotificationBody {
    pub(crate) actor: Actor,
    pub(crate) today: NaiveDate,
    #[serde(flatten)]
    pub(crate) request: NotificationRequest,
}

pub(crate) async fn overview_handler<R, G>(
    State(service): State<Arc<SurveillanceService<R, G>>>,
    axum::Json(body): axum::Json<ActorEnvelope>,
) -> Response
where
    R: VillageRepository + 'static,
    G: NotificationGateway + 'static,
{
    match service.overview(&body.actor) {
        Ok(views) => (StatusCode::OK, axum::Json(views)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn assessment_handler<R, G>(
    State(service): State<Arc<SurveillanceService<R, G>>>,
    Path(village_id): Path<String>,
    axum::Json(body): axum::Json<ActorEnvelope>,
) -> Response
where
    R: VillageRepository + 'static,
    G: NotificationGateway + 'static,
{
    let id = VillageId(village_id);
    match service.assessment(&body.actor, &id) {
        Ok(assessment) => (StatusCode::OK, axum::Json(assessment)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn measurements_handler<R, G>(
    State(service): State<Arc<SurveillanceService<R, G>>>,
    Path(village_id): Path<String>,
    axum::Json(body): axum::Json<MeasurementsBody>,
) -> Response
where
    R: VillageRepository + 'static,
    G: NotificationGateway + 'static,
{
    let id = VillageId(village_id);
    match service.record_measurements(&body.actor, &id, body.measurements, body.observed_on) {
        Ok(assessment) => (StatusCode::OK, axum::Json(assessment)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn profile_handler<R, G>(
    State(service): State<Arc<SurveillanceService<R, G>>>,
    Path(village_id): Path<String>,
    axum::Json(body): axum::Json<ProfileBody>,
) -> Response
where
    R: VillageRepository + 'static,
    G: NotificationGateway + 'static,
{
    let id = VillageId(village_id);
    match service.update_profile(
        &body.actor,
        &id,
        body.population,
        body.water_quality,
        body.observed_on,
    ) {
        Ok(village) => (StatusCode::OK, axum::Json(village)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn notification_handler<R, G>(
    State(service): State<Arc<SurveillanceService<R, G>>>,
    Path(village_id): Path<String>,
    axum::Json(body): axum::Json<NotificationBody>,
) -> Response
where
    R: VillageRepository + 'static,
    G: NotificationGateway + 'static,
{
    let id = VillageId(village_id);
    match service.send_notification(&body.actor, &id, body.request, body.today) {
        Ok(receipt) => (StatusCode::ACCEPTED, axum::Json(receipt)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: ServiceError) -> Response {
    let status = match &error {
        ServiceError::Forbidden { .. } => StatusCode::FORBIDDEN,
        ServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ServiceError::Access(_)
        | ServiceError::Measurement(_)
        | ServiceError::Population(_)
        | ServiceError::MessageLength(_)
        | ServiceError::UnknownTemplate(_)
        | ServiceError::EmptyMessage => StatusCode::UNPROCESSABLE_ENTITY,
        ServiceError::Repository(_) | ServiceError::Dispatch(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
