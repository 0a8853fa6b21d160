use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{AudienceSelector, DeliveryChannel, Village, VillageId};

/// Storage abstraction so the service module can be exercised in isolation.
pub trait VillageRepository: Send + Sync {
    fn insert(&self, village: Village) -> Result<Village, RepositoryError>;
    fn update(&self, village: Village) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &VillageId) -> Result<Option<Village>, RepositoryError>;
    fn list(&self) -> Result<Vec<Village>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("village already registered")]
    Conflict,
    #[error("village not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Finalized payload handed to the SMS/push boundary. Real delivery lives
/// behind the gateway trait; the core only decides what would be sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationDispatch {
    pub village_id: VillageId,
    pub channel: DeliveryChannel,
    pub audience: AudienceSelector,
    pub message: String,
    pub recipients: u32,
    pub sent_on: NaiveDate,
}

/// Trait describing the outbound notification hook (SMS gateway, push
/// service, or a recording stub in tests).
pub trait NotificationGateway: Send + Sync {
    fn dispatch(&self, dispatch: NotificationDispatch) -> Result<(), DispatchError>;
}

/// Notification dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Listing entry combining registry data with the derived assessment and the
/// caller's capability on that village.
#[derive(Debug, Clone, Serialize)]
pub struct VillageSummaryView {
    pub id: VillageId,
    pub name: String,
    pub population: u32,
    pub water_quality: &'static str,
    pub risk_score: u8,
    pub risk_level: &'static str,
    pub can_edit: bool,
}
