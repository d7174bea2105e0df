use super::irrigation::IrrigationMethod;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MethodYield {
    pub method: IrrigationMethod,
    /// Tonnes per hectare, rounded to one decimal.
    pub yield_t_ha: f64,
}

/// How the farmer's current method compares with the recommended one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrentMethod {
    pub method: IrrigationMethod,
    pub yield_t_ha: f64,
    /// Whole-percent yield gain from switching to the recommended method.
    pub gain_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrrigationComparison {
    pub crop: String,
    /// Every method, highest yield first. The first entry is always `recommended`.
    pub yields: Vec<MethodYield>,
    pub recommended: IrrigationMethod,
    pub expected_yield_t_ha: f64,
    /// Whole-percent water saved relative to flood irrigation.
    pub water_savings_percent: f64,
    pub current: Option<CurrentMethod>,
    pub recommendation: String,
    pub additional_info: String,
}

impl IrrigationComparison {
    pub fn max_yield(&self) -> f64 {
        self.expected_yield_t_ha
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YieldBand {
    Excellent,
    Good,
    Average,
    BelowAverage,
}

impl YieldBand {
    /// Band for a percent-vs-average value.
    pub fn from_compared_to_average(percent: f64) -> Self {
        if percent > 10.0 {
            YieldBand::Excellent
        } else if percent > 0.0 {
            YieldBand::Good
        } else if percent > -10.0 {
            YieldBand::Average
        } else {
            YieldBand::BelowAverage
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            YieldBand::Excellent => {
                "The predicted yield is excellent, well above the Tunisian average for this crop."
            }
            YieldBand::Good => {
                "The predicted yield is good, slightly above the Tunisian average for this crop."
            }
            YieldBand::Average => "The predicted yield is close to the Tunisian average for this crop.",
            YieldBand::BelowAverage => {
                "The predicted yield is below the Tunisian average for this crop."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldEstimate {
    pub crop: String,
    /// Tonnes per hectare, rounded to one decimal.
    pub predicted_yield_t_ha: f64,
    pub average_yield_t_ha: f64,
    pub optimal_yield_t_ha: f64,
    /// Product of every penalty, bonus and jitter factor.
    pub yield_modifier: f64,
    pub percent_of_optimal: f64,
    pub compared_to_average: f64,
    pub band: YieldBand,
    pub summary: String,
    pub key_factors: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropCandidate {
    pub crop: String,
    pub confidence: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropSuggestion {
    pub recommended: CropCandidate,
    /// Distinct from `recommended`, highest confidence first.
    pub alternatives: Vec<CropCandidate>,
    pub rationale: String,
}
