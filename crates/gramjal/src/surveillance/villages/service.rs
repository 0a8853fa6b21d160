use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::access::{self, ConfigurationError};
use super::domain::{
    Actor, AudienceSelector, DeliveryChannel, MeasurementSet, Village, VillageId,
    WaterQualityLabel,
};
use super::notify::{
    self, InvalidPopulationError, LengthExceededError, RenderContext, TemplateCatalog,
};
use super::repository::{
    DispatchError, NotificationDispatch, NotificationGateway, RepositoryError, VillageRepository,
    VillageSummaryView,
};
use super::risk::{InvalidMeasurementError, RiskAssessment, RiskConfig, RiskScorer};

const DEFAULT_NOTIFICATION_LOCATION: &str = "village center";

/// Service composing the access policy, risk scorer, and notification
/// composer over the repository and gateway seams.
pub struct SurveillanceService<R, G> {
    repository: Arc<R>,
    gateway: Arc<G>,
    scorer: RiskScorer,
    catalog: TemplateCatalog,
}

impl<R, G> SurveillanceService<R, G>
where
    R: VillageRepository + 'static,
    G: NotificationGateway + 'static,
{
    pub fn new(repository: Arc<R>, gateway: Arc<G>, config: RiskConfig) -> Self {
        Self {
            repository,
            gateway,
            scorer: RiskScorer::new(config),
            catalog: TemplateCatalog::standard(),
        }
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    /// Villages the actor may see, each with its freshly derived assessment
    /// and the actor's edit capability on it.
    pub fn overview(&self, actor: &Actor) -> Result<Vec<VillageSummaryView>, ServiceError> {
        let villages = self.repository.list()?;
        let ids: Vec<VillageId> = villages.iter().map(|village| village.id.clone()).collect();
        let visible = access::visible_villages(actor, &ids)?;

        let mut views = Vec::new();
        for village in villages {
            if !visible.contains(&village.id) {
                continue;
            }

            let assessment = self.scorer.score(&village.measurements)?;
            let can_edit = access::can_edit(actor, &village.id)?;
            views.push(VillageSummaryView {
                id: village.id,
                name: village.name,
                population: village.population,
                water_quality: village.water_quality.label(),
                risk_score: assessment.score,
                risk_level: assessment.level.label(),
                can_edit,
            });
        }

        Ok(views)
    }

    /// Full risk assessment for one village, recomputed on demand.
    pub fn assessment(
        &self,
        actor: &Actor,
        village_id: &VillageId,
    ) -> Result<RiskAssessment, ServiceError> {
        if !access::can_access(actor, village_id)? {
            return Err(ServiceError::Forbidden {
                village: village_id.clone(),
            });
        }

        let village = self.fetch(village_id)?;
        Ok(self.scorer.score(&village.measurements)?)
    }

    /// Record a new measurement set for a village and return the recomputed
    /// assessment. Validation happens before anything is persisted.
    pub fn record_measurements(
        &self,
        actor: &Actor,
        village_id: &VillageId,
        measurements: MeasurementSet,
        observed_on: NaiveDate,
    ) -> Result<RiskAssessment, ServiceError> {
        self.require_edit(actor, village_id)?;

        let mut village = self.fetch(village_id)?;
        let assessment = self.scorer.score(&measurements)?;

        village.measurements = measurements;
        village.last_updated = observed_on;
        self.repository.update(village)?;

        Ok(assessment)
    }

    /// Update the manually maintained registry fields: population and the
    /// qualitative water quality label.
    pub fn update_profile(
        &self,
        actor: &Actor,
        village_id: &VillageId,
        population: u32,
        water_quality: WaterQualityLabel,
        observed_on: NaiveDate,
    ) -> Result<Village, ServiceError> {
        self.require_edit(actor, village_id)?;

        if population == 0 {
            return Err(ServiceError::Population(InvalidPopulationError));
        }

        let mut village = self.fetch(village_id)?;
        village.population = population;
        village.water_quality = water_quality;
        village.last_updated = observed_on;
        self.repository.update(village.clone())?;

        Ok(village)
    }

    /// Compose a notification for a village and hand it to the gateway.
    /// Template rendering, recipient estimation, and the SMS length check
    /// all happen before dispatch.
    pub fn send_notification(
        &self,
        actor: &Actor,
        village_id: &VillageId,
        request: NotificationRequest,
        today: NaiveDate,
    ) -> Result<NotificationReceipt, ServiceError> {
        self.require_edit(actor, village_id)?;
        let village = self.fetch(village_id)?;

        let message = match (&request.template, &request.message) {
            (Some(template_id), _) => {
                let template = self
                    .catalog
                    .find(template_id)
                    .ok_or_else(|| ServiceError::UnknownTemplate(template_id.clone()))?;
                let context = RenderContext {
                    village: village.name.clone(),
                    date: today.format("%Y-%m-%d").to_string(),
                    asha_worker: village.asha_worker.clone(),
                    location: request
                        .location
                        .clone()
                        .unwrap_or_else(|| DEFAULT_NOTIFICATION_LOCATION.to_string()),
                    disease: request.disease.clone(),
                };
                notify::render(template, &context)
            }
            (None, Some(custom)) if !custom.trim().is_empty() => custom.clone(),
            _ => return Err(ServiceError::EmptyMessage),
        };

        let recipients = notify::estimate_recipients(village.population, request.audience)?;

        let message = if request.channel.is_sms_bound() {
            notify::enforce_length(message, notify::SMS_CHARACTER_LIMIT)?
        } else {
            message
        };

        self.gateway.dispatch(NotificationDispatch {
            village_id: village.id.clone(),
            channel: request.channel,
            audience: request.audience,
            message: message.clone(),
            recipients,
            sent_on: today,
        })?;

        Ok(NotificationReceipt {
            village_id: village.id,
            channel: request.channel,
            audience: request.audience,
            recipients,
            message,
        })
    }

    fn require_edit(&self, actor: &Actor, village_id: &VillageId) -> Result<(), ServiceError> {
        if access::can_edit(actor, village_id)? {
            Ok(())
        } else {
            Err(ServiceError::Forbidden {
                village: village_id.clone(),
            })
        }
    }

    fn fetch(&self, village_id: &VillageId) -> Result<Village, ServiceError> {
        let village = self
            .repository
            .fetch(village_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(village)
    }
}

/// Inbound notification composition request. Either a catalog template id or
/// a custom message must be supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRequest {
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    pub audience: AudienceSelector,
    pub channel: DeliveryChannel,
    #[serde(default)]
    pub disease: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// What the caller gets back once a notification clears the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationReceipt {
    pub village_id: VillageId,
    pub channel: DeliveryChannel,
    pub audience: AudienceSelector,
    pub recipients: u32,
    pub message: String,
}

/// Error raised by the surveillance service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Access(#[from] ConfigurationError),
    #[error("actor may not act on village {}", .village.0)]
    Forbidden { village: VillageId },
    #[error(transparent)]
    Measurement(#[from] InvalidMeasurementError),
    #[error(transparent)]
    Population(#[from] InvalidPopulationError),
    #[error(transparent)]
    MessageLength(#[from] LengthExceededError),
    #[error("unknown notification template '{0}'")]
    UnknownTemplate(String),
    #[error("notification message is empty")]
    EmptyMessage,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}
