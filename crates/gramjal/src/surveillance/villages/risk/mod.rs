mod config;
mod rules;

pub use config::RiskConfig;
pub use rules::{RiskFactor, RiskFactorKind};

use super::domain::{MeasurementSet, RiskLevel, WaterQualityLabel};
use serde::{Deserialize, Serialize};

/// Readings rejected before any scoring happens.
#[derive(Debug, thiserror::Error)]
pub enum InvalidMeasurementError {
    #[error("{field} reading is not a finite number")]
    NonFinite { field: &'static str },
    #[error("{field} reading cannot be negative (got {value})")]
    Negative { field: &'static str, value: f64 },
}

/// Derived score/level pair plus the deductions that produced it. Always
/// recomputed from a measurement set, never stored as independent truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub score: u8,
    pub level: RiskLevel,
    pub factors: Vec<RiskFactor>,
}

/// Stateless scorer applying the configured penalty table to raw readings.
#[derive(Debug, Clone)]
pub struct RiskScorer {
    config: RiskConfig,
}

impl RiskScorer {
    pub fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// Scores a measurement set: accumulate deductions from 100, clamp to
    /// [0, 100], band the result.
    pub fn score(
        &self,
        measurements: &MeasurementSet,
    ) -> Result<RiskAssessment, InvalidMeasurementError> {
        validate(measurements)?;

        let (factors, raw) = rules::apply_penalties(measurements, &self.config);
        let score = raw.clamp(0, 100) as u8;

        Ok(RiskAssessment {
            score,
            level: self.level_for(score),
            factors,
        })
    }

    pub fn level_for(&self, score: u8) -> RiskLevel {
        if score >= self.config.low_floor {
            RiskLevel::Low
        } else if score >= self.config.medium_floor {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }
}

impl Default for RiskScorer {
    fn default() -> Self {
        Self::new(RiskConfig::default())
    }
}

/// Rejects non-finite or negative readings. Case counts are unsigned, so
/// negative counts are unrepresentable by construction.
pub fn validate(measurements: &MeasurementSet) -> Result<(), InvalidMeasurementError> {
    let water = &measurements.water;
    let readings = [
        ("ph", water.ph),
        ("turbidity_ntu", water.turbidity_ntu),
        ("chlorine_mg_l", water.chlorine_mg_l),
    ];

    for (field, value) in readings {
        if !value.is_finite() {
            return Err(InvalidMeasurementError::NonFinite { field });
        }
        if value < 0.0 {
            return Err(InvalidMeasurementError::Negative { field, value });
        }
    }

    Ok(())
}

/// Fixed score for a qualitative label, used where only the manually
/// maintained label is available. Not guaranteed consistent with the numeric
/// scorer; the two are reported side by side.
pub const fn label_score(label: WaterQualityLabel) -> u8 {
    match label {
        WaterQualityLabel::Good => 85,
        WaterQualityLabel::Fair => 60,
        WaterQualityLabel::Poor => 30,
    }
}

/// String-keyed variant of [`label_score`]; unrecognized labels score zero.
pub fn qualitative_score(label: &str) -> u8 {
    match WaterQualityLabel::from_label(label) {
        Some(parsed) => label_score(parsed),
        None => 0,
    }
}
