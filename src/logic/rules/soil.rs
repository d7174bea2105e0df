use super::{Finding, Rule, OPTIMAL_PH};
use crate::models::FieldConditions;

/// Soil pH deviation rule
///
/// More than one unit away from 6.5 calls for lime (acidic) or sulfur and
/// compost (alkaline).
pub struct SoilPhRule;

impl Rule for SoilPhRule {
    fn id(&self) -> &'static str {
        "soil_ph"
    }

    fn name(&self) -> &'static str {
        "Soil pH"
    }

    fn evaluate(&self, c: &FieldConditions) -> Option<Finding> {
        if (c.ph - OPTIMAL_PH).abs() <= 1.0 {
            return None;
        }

        let advice = if c.ph < OPTIMAL_PH {
            "Apply lime to raise soil pH"
        } else {
            "Apply sulfur or compost to lower soil pH"
        };

        Some(Finding {
            factor: Some(format!("Soil pH: {} (optimal around {})", c.ph, OPTIMAL_PH)),
            advice: Some(advice.into()),
        })
    }
}

/// Low nutrient rule, one instance per macronutrient.
pub struct NutrientRule {
    id: &'static str,
    name: &'static str,
    nutrient: &'static str,
    fertilizer: &'static str,
    minimum_kg_ha: f64,
    level: fn(&FieldConditions) -> f64,
}

impl NutrientRule {
    pub fn nitrogen() -> Self {
        Self {
            id: "low_nitrogen",
            name: "Low Nitrogen",
            nutrient: "nitrogen",
            fertilizer: "nitrogen",
            minimum_kg_ha: 50.0,
            level: |c| c.soil_n,
        }
    }

    pub fn phosphorus() -> Self {
        Self {
            id: "low_phosphorus",
            name: "Low Phosphorus",
            nutrient: "phosphorus",
            fertilizer: "phosphate",
            minimum_kg_ha: 40.0,
            level: |c| c.soil_p,
        }
    }

    pub fn potassium() -> Self {
        Self {
            id: "low_potassium",
            name: "Low Potassium",
            nutrient: "potassium",
            fertilizer: "potash",
            minimum_kg_ha: 30.0,
            level: |c| c.soil_k,
        }
    }
}

impl Rule for NutrientRule {
    fn id(&self) -> &'static str {
        self.id
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn evaluate(&self, c: &FieldConditions) -> Option<Finding> {
        let level = (self.level)(c);
        if level >= self.minimum_kg_ha {
            return None;
        }

        Some(Finding {
            factor: Some(format!(
                "Relatively low {} level: {} kg/ha",
                self.nutrient, level
            )),
            advice: Some(format!("Increase {} fertilizer applications", self.fertilizer)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ph_direction_picks_amendment() {
        let mut c = FieldConditions::default();
        c.ph = 5.0;
        let acidic = SoilPhRule.evaluate(&c).unwrap();
        assert!(acidic.advice.unwrap().contains("lime"));

        c.ph = 8.0;
        let alkaline = SoilPhRule.evaluate(&c).unwrap();
        assert!(alkaline.advice.unwrap().contains("sulfur"));

        c.ph = 7.5;
        assert!(SoilPhRule.evaluate(&c).is_none());
    }

    #[test]
    fn nutrient_thresholds() {
        let mut c = FieldConditions::default();
        c.soil_n = 49.0;
        c.soil_p = 40.0;
        c.soil_k = 10.0;
        let n = NutrientRule::nitrogen().evaluate(&c).unwrap();
        assert_eq!(
            n.factor.as_deref(),
            Some("Relatively low nitrogen level: 49 kg/ha")
        );
        assert!(NutrientRule::phosphorus().evaluate(&c).is_none());
        let k = NutrientRule::potassium().evaluate(&c).unwrap();
        assert_eq!(k.advice.as_deref(), Some("Increase potash fertilizer applications"));
    }
}
