use super::{Finding, Rule, OPTIMAL_HUMIDITY_PERCENT, OPTIMAL_TEMPERATURE_C};
use crate::models::FieldConditions;

/// Temperature deviation rule
///
/// Flags temperatures more than 5°C away from the 25°C optimum and suggests
/// shifting the planting calendar.
pub struct TemperatureRule;

impl Rule for TemperatureRule {
    fn id(&self) -> &'static str {
        "temperature_deviation"
    }

    fn name(&self) -> &'static str {
        "Temperature Deviation"
    }

    fn evaluate(&self, c: &FieldConditions) -> Option<Finding> {
        if (c.temperature_c - OPTIMAL_TEMPERATURE_C).abs() <= 5.0 {
            return None;
        }

        Some(Finding {
            factor: Some(format!(
                "Temperature: {}°C (optimal around {}°C)",
                c.temperature_c, OPTIMAL_TEMPERATURE_C
            )),
            advice: Some(
                "Consider adjusting the planting calendar to avoid extreme temperatures".into(),
            ),
        })
    }
}

/// Humidity deviation rule
///
/// Flags relative humidity more than 15 points away from 65%.
pub struct HumidityRule;

impl Rule for HumidityRule {
    fn id(&self) -> &'static str {
        "humidity_deviation"
    }

    fn name(&self) -> &'static str {
        "Humidity Deviation"
    }

    fn evaluate(&self, c: &FieldConditions) -> Option<Finding> {
        if (c.humidity_percent - OPTIMAL_HUMIDITY_PERCENT).abs() <= 15.0 {
            return None;
        }

        Some(Finding {
            factor: Some(format!(
                "Humidity: {}% (optimal around {}%)",
                c.humidity_percent, OPTIMAL_HUMIDITY_PERCENT
            )),
            advice: None,
        })
    }
}

/// Dry spell rule
///
/// Conditions:
/// - Rainfall below 300mm
/// - Humidity below 60%
pub struct DrySpellRule;

impl Rule for DrySpellRule {
    fn id(&self) -> &'static str {
        "dry_spell"
    }

    fn name(&self) -> &'static str {
        "Dry Spell"
    }

    fn evaluate(&self, c: &FieldConditions) -> Option<Finding> {
        if c.rainfall_mm >= 300.0 || c.humidity_percent >= 60.0 {
            return None;
        }

        Some(Finding {
            factor: None,
            advice: Some(
                "Increase irrigation frequency, especially during dry periods".into(),
            ),
        })
    }
}
