pub mod climate;
pub mod engine;
pub mod soil;

pub use engine::RulesEngine;

use crate::models::FieldConditions;

/// What a triggered rule contributes to a yield forecast.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Finding {
    /// Entry for the key-factor list.
    pub factor: Option<String>,
    /// Entry for the improvement-advice list.
    pub advice: Option<String>,
}

/// Trait for field-condition threshold checks
pub trait Rule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Evaluate the rule and return a finding if its threshold is crossed
    fn evaluate(&self, conditions: &FieldConditions) -> Option<Finding>;
}

pub const OPTIMAL_TEMPERATURE_C: f64 = 25.0;
pub const OPTIMAL_HUMIDITY_PERCENT: f64 = 65.0;
pub const OPTIMAL_PH: f64 = 6.5;
