//! Village surveillance decisions: who may see or edit a village, how raw
//! measurements become risk assessments, and how advisories are composed
//! before they reach a delivery gateway.

pub mod access;
pub mod domain;
pub mod notify;
pub mod repository;
pub mod risk;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use access::ConfigurationError;
pub use domain::{
    Actor, AudienceSelector, DeliveryChannel, MeasurementSet, RiskLevel, Role, Village, VillageId,
    WaterQualityLabel, WaterReadings,
};
pub use notify::{
    InvalidPopulationError, LengthExceededError, NotificationTemplate, RenderContext,
    TemplateCatalog, TemplateCategory, SMS_CHARACTER_LIMIT,
};
pub use repository::{
    DispatchError, NotificationDispatch, NotificationGateway, RepositoryError, VillageRepository,
    VillageSummaryView,
};
pub use risk::{
    InvalidMeasurementError, RiskAssessment, RiskConfig, RiskFactor, RiskFactorKind, RiskScorer,
};
pub use router::village_router;
pub use service::{NotificationReceipt, NotificationRequest, ServiceError, SurveillanceService};
