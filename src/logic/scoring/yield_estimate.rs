use super::{round1, round_half_up, Scorer};
use crate::logic::random::RandomSource;
use crate::logic::rules::{RulesEngine, OPTIMAL_HUMIDITY_PERCENT, OPTIMAL_PH, OPTIMAL_TEMPERATURE_C};
use crate::models::{FieldConditions, YieldBand, YieldEstimate};

/// Tunisian average yields, t/ha.
const AVERAGE_YIELDS: &[(&str, f64)] = &[
    ("tomate", 40.0),
    ("pomme de terre", 25.0),
    ("blé", 3.5),
    ("maïs", 6.0),
    ("raisin", 15.0),
    ("pomme", 20.0),
    ("olive", 3.5),
    ("piment", 18.0),
    ("agrumes", 25.0),
    ("oignon", 30.0),
    ("carotte", 35.0),
    ("pastèque", 45.0),
    ("melon", 30.0),
    ("concombre", 35.0),
    ("aubergine", 30.0),
    ("banana", 35.0),
];

/// Attainable yields under ideal management, t/ha.
const OPTIMAL_YIELDS: &[(&str, f64)] = &[
    ("tomate", 80.0),
    ("pomme de terre", 45.0),
    ("blé", 7.0),
    ("maïs", 12.0),
    ("raisin", 30.0),
    ("pomme", 40.0),
    ("olive", 6.0),
    ("piment", 35.0),
    ("agrumes", 40.0),
    ("oignon", 50.0),
    ("carotte", 60.0),
    ("pastèque", 80.0),
    ("melon", 50.0),
    ("concombre", 60.0),
    ("aubergine", 50.0),
    ("banana", 60.0),
];

const DEFAULT_AVERAGE_YIELD: f64 = 20.0;
const DEFAULT_OPTIMAL_YIELD: f64 = 40.0;

fn lookup(table: &[(&str, f64)], crop: &str, fallback: f64) -> f64 {
    let crop = crop.trim().to_lowercase();
    table
        .iter()
        .find(|(name, _)| *name == crop)
        .map(|(_, v)| *v)
        .unwrap_or(fallback)
}

pub fn average_yield(crop: &str) -> f64 {
    lookup(AVERAGE_YIELDS, crop, DEFAULT_AVERAGE_YIELD)
}

pub fn optimal_yield(crop: &str) -> f64 {
    lookup(OPTIMAL_YIELDS, crop, DEFAULT_OPTIMAL_YIELD)
}

/// Crops with reference yields, in table order.
pub fn known_crops() -> impl Iterator<Item = &'static str> {
    AVERAGE_YIELDS.iter().map(|(name, _)| *name)
}

/// Simulated yield forecast from field conditions.
pub struct YieldScorer {
    source: Box<dyn RandomSource>,
    spread: f64,
    rules: RulesEngine,
}

impl YieldScorer {
    pub fn new(source: Box<dyn RandomSource>, spread: f64) -> Self {
        Self {
            source,
            spread,
            rules: RulesEngine::new(),
        }
    }

    pub fn rules(&self) -> &RulesEngine {
        &self.rules
    }

    /// Product of the condition penalties and bonuses, without jitter.
    pub fn condition_modifier(c: &FieldConditions) -> f64 {
        let temperature = 1.0 - (c.temperature_c - OPTIMAL_TEMPERATURE_C).abs() / 100.0;
        let humidity = 1.0 - (c.humidity_percent - OPTIMAL_HUMIDITY_PERCENT).abs() / 200.0;
        let ph = 1.0 - (c.ph - OPTIMAL_PH).abs() / 14.0;
        let nutrients = 0.7 + (c.soil_n / 100.0 + c.soil_p / 100.0 + c.soil_k / 100.0) / 3.0;
        let irrigation = c.irrigation.map_or(1.0, |m| m.yield_multiplier());

        temperature * humidity * ph * nutrients * irrigation
    }
}

impl Scorer for YieldScorer {
    type Input = FieldConditions;
    type Output = YieldEstimate;

    fn name(&self) -> &'static str {
        "yield-forecast"
    }

    fn score(&mut self, c: &FieldConditions) -> YieldEstimate {
        if !known_crops().any(|known| known == c.crop) {
            tracing::debug!(crop = %c.crop, "No reference yields for crop, using defaults");
        }
        let average = average_yield(&c.crop);
        let optimal = optimal_yield(&c.crop);

        let modifier = Self::condition_modifier(c) * self.source.jitter(self.spread);
        let predicted = round1(average * modifier);
        let percent_of_optimal = round_half_up(predicted / optimal * 100.0);
        let compared_to_average = round_half_up((predicted / average - 1.0) * 100.0);
        let band = YieldBand::from_compared_to_average(compared_to_average);

        let findings = self.rules.evaluate(c);
        let key_factors = findings.iter().filter_map(|f| f.factor.clone()).collect();
        let recommendations = findings.into_iter().filter_map(|f| f.advice).collect();

        tracing::debug!(
            crop = %c.crop,
            modifier,
            predicted,
            "Scored yield forecast"
        );

        YieldEstimate {
            crop: c.crop.clone(),
            predicted_yield_t_ha: predicted,
            average_yield_t_ha: average,
            optimal_yield_t_ha: optimal,
            yield_modifier: modifier,
            percent_of_optimal,
            compared_to_average,
            band,
            summary: band.summary().to_string(),
            key_factors,
            recommendations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::random::{NeutralSource, SeededSource};
    use crate::models::IrrigationMethod;
    use approx::assert_relative_eq;

    fn ideal_tomato() -> FieldConditions {
        FieldConditions {
            crop: "tomate".into(),
            soil_n: 100.0,
            soil_p: 100.0,
            soil_k: 100.0,
            temperature_c: 25.0,
            humidity_percent: 65.0,
            ph: 6.5,
            rainfall_mm: 400.0,
            irrigation: Some(IrrigationMethod::Drip),
        }
    }

    fn neutral() -> YieldScorer {
        YieldScorer::new(Box::new(NeutralSource), 0.05)
    }

    #[test]
    fn ideal_conditions_hit_nutrient_and_drip_bonus() {
        let estimate = neutral().score(&ideal_tomato());
        // 1.0 * 1.0 * 1.0 * (0.7 + 1.0) * 1.1
        assert_relative_eq!(estimate.yield_modifier, 1.87, epsilon = 1e-9);
        assert_relative_eq!(estimate.predicted_yield_t_ha, 74.8, epsilon = 1e-9);
        assert_eq!(estimate.average_yield_t_ha, 40.0);
        assert_eq!(estimate.optimal_yield_t_ha, 80.0);
        assert_eq!(estimate.compared_to_average, 87.0);
        assert_eq!(estimate.band, YieldBand::Excellent);
        assert!(estimate.key_factors.is_empty());
        assert!(estimate.recommendations.is_empty());
    }

    #[test]
    fn unknown_crop_uses_fallback_references() {
        assert_eq!(average_yield("quinoa"), 20.0);
        assert_eq!(optimal_yield("quinoa"), 40.0);
        assert_eq!(average_yield(" Tomate "), 40.0);
        assert_eq!(known_crops().count(), 16);
    }

    #[test]
    fn poor_conditions_list_factors_and_advice() {
        let c = FieldConditions {
            crop: "blé".into(),
            soil_n: 20.0,
            soil_p: 20.0,
            soil_k: 20.0,
            temperature_c: 35.0,
            humidity_percent: 40.0,
            ph: 8.0,
            rainfall_mm: 100.0,
            irrigation: Some(IrrigationMethod::Flood),
        };
        let estimate = neutral().score(&c);
        assert_eq!(estimate.key_factors.len(), 6);
        assert_eq!(estimate.recommendations.len(), 6);
        assert!(estimate.predicted_yield_t_ha < estimate.average_yield_t_ha);
        assert_eq!(estimate.band, YieldBand::BelowAverage);
    }

    #[test]
    fn jitter_stays_within_spread() {
        let mut scorer = YieldScorer::new(Box::new(SeededSource::new(Some(11))), 0.05);
        let base = YieldScorer::condition_modifier(&ideal_tomato());
        for _ in 0..100 {
            let estimate = scorer.score(&ideal_tomato());
            let ratio = estimate.yield_modifier / base;
            assert!((0.95..1.05).contains(&ratio), "ratio {}", ratio);
        }
    }

    #[test]
    fn irrigation_multiplier_defaults_to_one() {
        let mut c = ideal_tomato();
        c.irrigation = None;
        assert_relative_eq!(YieldScorer::condition_modifier(&c), 1.7, epsilon = 1e-9);
        c.irrigation = Some(IrrigationMethod::Subsurface);
        assert_relative_eq!(YieldScorer::condition_modifier(&c), 1.7, epsilon = 1e-9);
    }
}
