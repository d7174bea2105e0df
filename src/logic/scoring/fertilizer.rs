use super::Scorer;
use crate::models::{FertilizerParameters, RecommendationCategory, RecommendationResult};

/// Soil pH correction advised alongside a fertilization plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhAdvice {
    Lime,
    Sulfur,
    Optimal,
}

impl PhAdvice {
    pub const ACIDIC_BELOW: f64 = 6.0;
    pub const ALKALINE_ABOVE: f64 = 7.5;

    /// Both thresholds count as optimal.
    pub fn for_ph(ph: f64) -> Self {
        if ph < Self::ACIDIC_BELOW {
            PhAdvice::Lime
        } else if ph > Self::ALKALINE_ABOVE {
            PhAdvice::Sulfur
        } else {
            PhAdvice::Optimal
        }
    }

    pub fn message(&self, ph: f64) -> String {
        match self {
            PhAdvice::Lime => format!(
                "Soil pH ({}) is acidic. Apply 1.5 t/ha of agricultural lime to raise it.",
                ph
            ),
            PhAdvice::Sulfur => format!(
                "Soil pH ({}) is alkaline. Apply 250 kg/ha of elemental sulfur to lower it.",
                ph
            ),
            PhAdvice::Optimal => format!(
                "Soil pH ({}) is optimal for most crops. No adjustment needed.",
                ph
            ),
        }
    }
}

/// Template-driven fertilization plan. Deterministic.
#[derive(Default)]
pub struct FertilizerScorer;

impl Scorer for FertilizerScorer {
    type Input = FertilizerParameters;
    type Output = RecommendationResult;

    fn name(&self) -> &'static str {
        "fertilizer-template"
    }

    fn score(&mut self, p: &FertilizerParameters) -> RecommendationResult {
        let soil = format!(
            "N:{} kg/ha, P:{} kg/ha, K:{} kg/ha, pH:{}",
            p.nitrogen_kg_ha, p.phosphorus_kg_ha, p.potassium_kg_ha, p.ph
        );

        let body = format!(
            "For {} in {}, use {} as the main fertilizer, combined with an organic \
             amendment to improve soil structure and nutrient retention.",
            p.crop, p.region, p.fertilizer_type
        );

        let advice = PhAdvice::for_ph(p.ph);
        tracing::debug!(ph = p.ph, advice = ?advice, "Selected pH adjustment");

        RecommendationResult::new(
            RecommendationCategory::Fertilizer,
            format!("Recommended fertilization for {} in {}", p.crop, p.region),
            body,
        )
        .with_data_point("District", &p.district)
        .with_data_point("Soil analysis", soil)
        .with_data_point("Application season", p.season)
        .with_dosage("300 kg/ha NPK 15-10-15 + 2 t/ha mature compost")
        .with_schedule(
            "Split into 3 applications: 40% at sowing, 40% during vegetative growth, \
             20% at the start of the reproductive stage",
        )
        .with_caveat("pH adjustment", advice.message(p.ph))
        .with_alternative(
            "Alternative 1: Organic fertilization",
            "4 t/ha of enriched compost (3-2-3) + 500 kg/ha of bone meal + 300 kg/ha of wood ash. \
             Improves soil life over the long term.",
        )
        .with_alternative(
            "Alternative 2: Slow-release fertilizer",
            "400 kg/ha of coated 14-7-14 applied once at planting. \
             Reduces leaching and the number of passes.",
        )
        .with_alternative(
            "Alternative 3: Biostimulants and precision fertilization",
            "250 kg/ha NPK + seaweed extract and humic acids, with foliar \
             applications adjusted to leaf analysis.",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(ph: f64) -> FertilizerParameters {
        let mut p = FertilizerParameters::defaults("Nabeul");
        p.ph = ph;
        p
    }

    #[test]
    fn ph_branches() {
        assert_eq!(PhAdvice::for_ph(5.5), PhAdvice::Lime);
        assert_eq!(PhAdvice::for_ph(8.0), PhAdvice::Sulfur);
        assert_eq!(PhAdvice::for_ph(6.8), PhAdvice::Optimal);
    }

    #[test]
    fn ph_boundaries_are_optimal() {
        assert_eq!(PhAdvice::for_ph(6.0), PhAdvice::Optimal);
        assert_eq!(PhAdvice::for_ph(7.5), PhAdvice::Optimal);
        assert_eq!(PhAdvice::for_ph(5.99), PhAdvice::Lime);
        assert_eq!(PhAdvice::for_ph(7.51), PhAdvice::Sulfur);
    }

    #[test]
    fn caveat_carries_ph_advice() {
        let mut scorer = FertilizerScorer;
        let acidic = scorer.score(&record(5.5));
        assert_eq!(acidic.primary.caveat.label, "pH adjustment");
        assert!(acidic.primary.caveat.value.contains("lime"));

        let alkaline = scorer.score(&record(8.0));
        assert!(alkaline.primary.caveat.value.contains("sulfur"));

        let neutral = scorer.score(&record(6.8));
        assert!(neutral.primary.caveat.value.contains("optimal"));
    }

    #[test]
    fn fills_template_from_record() {
        let result = FertilizerScorer.score(&record(6.5));
        assert_eq!(result.primary.title, "Recommended fertilization for maïs in Nabeul");
        assert_eq!(
            result.data_point("Soil analysis"),
            Some("N:80 kg/ha, P:40 kg/ha, K:20 kg/ha, pH:6.5")
        );
        assert_eq!(result.data_point("Application season"), Some("spring"));
        assert!(result.primary.body.contains("use NPK"));
        assert_eq!(result.alternatives.len(), 3);
    }
}
