use serde::{Deserialize, Serialize};

/// Thresholds and penalty weights applied when scoring a measurement set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskConfig {
    pub ph_min: f64,
    pub ph_max: f64,
    pub ph_penalty: i32,
    pub turbidity_limit_ntu: f64,
    pub turbidity_penalty: i32,
    pub coliform_penalty: i32,
    pub chlorine_min_mg_l: f64,
    pub chlorine_penalty: i32,
    pub penalty_per_case: i32,
    pub low_floor: u8,
    pub medium_floor: u8,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            ph_min: 6.5,
            ph_max: 8.5,
            ph_penalty: 15,
            turbidity_limit_ntu: 1.0,
            turbidity_penalty: 20,
            coliform_penalty: 25,
            chlorine_min_mg_l: 0.2,
            chlorine_penalty: 10,
            penalty_per_case: 5,
            low_floor: 80,
            medium_floor: 60,
        }
    }
}
