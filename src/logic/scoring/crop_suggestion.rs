use super::Scorer;
use crate::logic::random::RandomSource;
use crate::models::{CropCandidate, CropSuggestion, FieldConditions};

pub const SUGGESTION_CROPS: [&str; 10] = [
    "Tomate",
    "Blé",
    "Maïs",
    "Pomme de terre",
    "Oignon",
    "Olivier",
    "Agrumes",
    "Piment",
    "Pastèque",
    "Carotte",
];

const ALTERNATIVE_COUNT: usize = 3;

/// Simulated crop classifier keyed on soil pH and rainfall.
pub struct CropSuggestionScorer {
    source: Box<dyn RandomSource>,
}

impl CropSuggestionScorer {
    pub fn new(source: Box<dyn RandomSource>) -> Self {
        Self { source }
    }

    /// Index of the main crop: whole pH times whole rainfall, modulo the list.
    pub fn main_index(c: &FieldConditions) -> usize {
        let product = (c.ph.trunc() * c.rainfall_mm.trunc()).max(0.0) as u64;
        (product % SUGGESTION_CROPS.len() as u64) as usize
    }

    fn confidence(&mut self, floor: u32, range: u32) -> u32 {
        floor + (self.source.next_unit() * range as f64).floor() as u32
    }
}

impl Scorer for CropSuggestionScorer {
    type Input = FieldConditions;
    type Output = CropSuggestion;

    fn name(&self) -> &'static str {
        "crop-classifier"
    }

    fn score(&mut self, c: &FieldConditions) -> CropSuggestion {
        let main = Self::main_index(c);
        let recommended = CropCandidate {
            crop: SUGGESTION_CROPS[main].to_string(),
            confidence: self.confidence(85, 15),
        };

        let mut remaining: Vec<&str> = SUGGESTION_CROPS
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != main)
            .map(|(_, crop)| *crop)
            .collect();

        let mut alternatives = Vec::with_capacity(ALTERNATIVE_COUNT);
        for _ in 0..ALTERNATIVE_COUNT {
            let crop = remaining.remove(self.source.pick(remaining.len()));
            alternatives.push(CropCandidate {
                crop: crop.to_string(),
                confidence: self.confidence(65, 20),
            });
        }
        alternatives.sort_by(|a, b| b.confidence.cmp(&a.confidence));

        CropSuggestion {
            rationale: format!(
                "With a soil pH of {} and {}mm of rainfall, {} is the best fit for this field.",
                c.ph, c.rainfall_mm, recommended.crop
            ),
            recommended,
            alternatives,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::random::{NeutralSource, SeededSource};
    use std::collections::HashSet;

    fn conditions(ph: f64, rainfall_mm: f64) -> FieldConditions {
        FieldConditions {
            ph,
            rainfall_mm,
            ..FieldConditions::default()
        }
    }

    #[test]
    fn main_crop_from_ph_and_rainfall() {
        // 6 * 103 = 618
        assert_eq!(CropSuggestionScorer::main_index(&conditions(6.9, 103.7)), 8);
        assert_eq!(CropSuggestionScorer::main_index(&conditions(7.0, 100.0)), 0);
        assert_eq!(CropSuggestionScorer::main_index(&conditions(6.5, -3.0)), 0);
    }

    #[test]
    fn alternatives_are_distinct_and_sorted() {
        let mut scorer = CropSuggestionScorer::new(Box::new(SeededSource::new(Some(5))));
        for rain in 0..50 {
            let result = scorer.score(&conditions(6.5, rain as f64 * 17.0));
            assert!((85..=99).contains(&result.recommended.confidence));
            assert_eq!(result.alternatives.len(), 3);

            let mut seen = HashSet::new();
            seen.insert(result.recommended.crop.clone());
            for alt in &result.alternatives {
                assert!((65..=84).contains(&alt.confidence));
                assert!(seen.insert(alt.crop.clone()), "duplicate {}", alt.crop);
            }
            assert!(result
                .alternatives
                .windows(2)
                .all(|w| w[0].confidence >= w[1].confidence));
        }
    }

    #[test]
    fn neutral_source_is_deterministic() {
        let mut scorer = CropSuggestionScorer::new(Box::new(NeutralSource));
        let result = scorer.score(&conditions(7.0, 100.0));
        assert_eq!(result.recommended.crop, "Tomate");
        assert_eq!(result.recommended.confidence, 92);
        assert!(result.alternatives.iter().all(|a| a.confidence == 75));
    }
}
