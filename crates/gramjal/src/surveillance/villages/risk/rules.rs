use super::config::RiskConfig;
use crate::surveillance::villages::domain::MeasurementSet;
use serde::{Deserialize, Serialize};

/// Measurement dimensions that can deduct from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskFactorKind {
    Ph,
    Turbidity,
    Coliform,
    Chlorine,
    CaseLoad,
}

/// Discrete deduction applied to an assessment, allowing transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub kind: RiskFactorKind,
    pub delta: i32,
    pub notes: String,
}

pub(crate) fn apply_penalties(
    measurements: &MeasurementSet,
    config: &RiskConfig,
) -> (Vec<RiskFactor>, i64) {
    let mut factors = Vec::new();
    let mut score: i64 = 100;
    let water = &measurements.water;

    if water.ph < config.ph_min || water.ph > config.ph_max {
        factors.push(RiskFactor {
            kind: RiskFactorKind::Ph,
            delta: -config.ph_penalty,
            notes: format!(
                "pH {:.1} outside {:.1}-{:.1}",
                water.ph, config.ph_min, config.ph_max
            ),
        });
        score -= i64::from(config.ph_penalty);
    }

    if water.turbidity_ntu > config.turbidity_limit_ntu {
        factors.push(RiskFactor {
            kind: RiskFactorKind::Turbidity,
            delta: -config.turbidity_penalty,
            notes: format!(
                "turbidity {:.1} NTU above {:.1} NTU",
                water.turbidity_ntu, config.turbidity_limit_ntu
            ),
        });
        score -= i64::from(config.turbidity_penalty);
    }

    if water.coliform_cfu > 0 {
        factors.push(RiskFactor {
            kind: RiskFactorKind::Coliform,
            delta: -config.coliform_penalty,
            notes: format!("coliform detected at {} CFU/100ml", water.coliform_cfu),
        });
        score -= i64::from(config.coliform_penalty);
    }

    if water.chlorine_mg_l < config.chlorine_min_mg_l {
        factors.push(RiskFactor {
            kind: RiskFactorKind::Chlorine,
            delta: -config.chlorine_penalty,
            notes: format!(
                "residual chlorine {:.1} mg/L below {:.1} mg/L",
                water.chlorine_mg_l, config.chlorine_min_mg_l
            ),
        });
        score -= i64::from(config.chlorine_penalty);
    }

    let total_cases = measurements.total_cases();
    if total_cases > 0 {
        let deduction = (total_cases as i64).saturating_mul(i64::from(config.penalty_per_case));
        factors.push(RiskFactor {
            kind: RiskFactorKind::CaseLoad,
            delta: i32::try_from(-deduction).unwrap_or(i32::MIN),
            notes: format!("{total_cases} reported case(s) across tracked diseases"),
        });
        score -= deduction;
    }

    (factors, score)
}
