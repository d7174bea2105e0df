use super::{
    climate::{DrySpellRule, HumidityRule, TemperatureRule},
    soil::{NutrientRule, SoilPhRule},
    Finding, Rule,
};
use crate::models::FieldConditions;

pub struct RulesEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl RulesEngine {
    pub fn new() -> Self {
        let rules: Vec<Box<dyn Rule>> = vec![
            Box::new(TemperatureRule),
            Box::new(HumidityRule),
            Box::new(SoilPhRule),
            Box::new(NutrientRule::nitrogen()),
            Box::new(NutrientRule::phosphorus()),
            Box::new(NutrientRule::potassium()),
            Box::new(DrySpellRule),
        ];

        Self { rules }
    }

    /// Findings of every triggered rule, in rule order.
    pub fn evaluate(&self, conditions: &FieldConditions) -> Vec<Finding> {
        self.rules
            .iter()
            .filter_map(|rule| rule.evaluate(conditions))
            .collect()
    }

    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules.iter().map(|r| (r.id(), r.name())).collect()
    }
}

impl Default for RulesEngine {
    fn default() -> Self {
        Self::new()
    }
}
