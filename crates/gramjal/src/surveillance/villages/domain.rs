use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for monitored villages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VillageId(pub String);

/// Roles recognized by the access policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Administrator,
    FieldWorker,
    Viewer,
}

impl Role {
    pub const fn label(self) -> &'static str {
        match self {
            Role::Administrator => "administrator",
            Role::FieldWorker => "field_worker",
            Role::Viewer => "viewer",
        }
    }
}

/// An authenticated party making a request. Field workers carry exactly one
/// village assignment; administrators and viewers carry none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_village: Option<VillageId>,
}

impl Actor {
    pub fn administrator() -> Self {
        Self {
            role: Role::Administrator,
            assigned_village: None,
        }
    }

    pub fn field_worker(village: VillageId) -> Self {
        Self {
            role: Role::FieldWorker,
            assigned_village: Some(village),
        }
    }

    pub fn viewer() -> Self {
        Self {
            role: Role::Viewer,
            assigned_village: None,
        }
    }
}

/// Raw water test readings for one village at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterReadings {
    pub ph: f64,
    pub turbidity_ntu: f64,
    pub coliform_cfu: u32,
    pub chlorine_mg_l: f64,
}

/// Water readings plus reported disease case counts, keyed by disease name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementSet {
    pub water: WaterReadings,
    #[serde(default)]
    pub cases: BTreeMap<String, u32>,
}

impl MeasurementSet {
    pub fn total_cases(&self) -> u64 {
        self.cases.values().map(|count| u64::from(*count)).sum()
    }
}

/// Qualitative water quality label maintained by field staff, independent of
/// the numeric assessment derived from raw readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaterQualityLabel {
    Good,
    Fair,
    Poor,
}

impl WaterQualityLabel {
    pub const fn label(self) -> &'static str {
        match self {
            WaterQualityLabel::Good => "Good",
            WaterQualityLabel::Fair => "Fair",
            WaterQualityLabel::Poor => "Poor",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "good" => Some(Self::Good),
            "fair" => Some(Self::Fair),
            "poor" => Some(Self::Poor),
            _ => None,
        }
    }
}

/// Risk band derived from the numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

/// A monitored village with its registry data and latest measurements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Village {
    pub id: VillageId,
    pub name: String,
    pub population: u32,
    pub asha_worker: String,
    pub water_sources: Vec<String>,
    pub water_quality: WaterQualityLabel,
    pub measurements: MeasurementSet,
    pub last_updated: NaiveDate,
}

/// Rule for estimating what fraction of a village a notification reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudienceSelector {
    All,
    AdultsOnly,
    FamilyHeads,
}

impl AudienceSelector {
    pub const fn label(self) -> &'static str {
        match self {
            AudienceSelector::All => "All Villagers",
            AudienceSelector::AdultsOnly => "Adults Only",
            AudienceSelector::FamilyHeads => "Family Heads",
        }
    }
}

/// Outbound channel requested for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryChannel {
    Sms,
    Push,
    Both,
}

impl DeliveryChannel {
    pub const fn label(self) -> &'static str {
        match self {
            DeliveryChannel::Sms => "SMS",
            DeliveryChannel::Push => "app notification",
            DeliveryChannel::Both => "SMS and app notification",
        }
    }

    /// SMS-bound channels are subject to the 160-character limit.
    pub const fn is_sms_bound(self) -> bool {
        matches!(self, DeliveryChannel::Sms | DeliveryChannel::Both)
    }
}
