use super::Scorer;
use crate::models::{PesticideParameters, RecommendationCategory, RecommendationResult};

/// Template-driven treatment advice. Deterministic.
pub struct PesticideScorer {
    issue_separator: String,
}

impl PesticideScorer {
    pub fn new(issue_separator: impl Into<String>) -> Self {
        Self {
            issue_separator: issue_separator.into(),
        }
    }
}

impl Default for PesticideScorer {
    fn default() -> Self {
        Self::new(" and ")
    }
}

impl Scorer for PesticideScorer {
    type Input = PesticideParameters;
    type Output = RecommendationResult;

    fn name(&self) -> &'static str {
        "pesticide-template"
    }

    fn score(&mut self, p: &PesticideParameters) -> RecommendationResult {
        let problem = p.problem_description(&self.issue_separator);

        let conditions = format!(
            "Current season: {}, growing season: {}, {}°C, {}% humidity, {}mm rainfall",
            p.season, p.growing_season, p.temperature_c, p.humidity_percent, p.rainfall_mm
        );

        let body = format!(
            "To control {} on your {}, apply a natural pyrethrin-based insecticide \
             (30ml per 10L of water) combined with black soap (20ml per 10L). \
             Spray early in the morning or in the evening to protect pollinators.",
            problem, p.crop
        );

        RecommendationResult::new(
            RecommendationCategory::Pesticide,
            format!("Recommended treatment for {} in {}", p.crop, p.region),
            body,
        )
        .with_data_point("District", &p.district)
        .with_data_point("Problem", &problem)
        .with_data_point("Conditions", conditions)
        .with_dosage("30ml pyrethrin + 20ml black soap per 10L of water")
        .with_schedule("Apply every 7-10 days, two successive applications")
        .with_caveat(
            "Environmental considerations",
            "This treatment has minimal impact on non-target organisms and breaks down \
             quickly in the environment. It is suitable for use near water sources.",
        )
        .with_alternative(
            "Alternative 1: Biological control",
            "Neem oil (50ml per 10L of water) combined with a garlic infusion. \
             Effective against many pests with a very low environmental impact.",
        )
        .with_alternative(
            "Alternative 2: Mechanical control",
            "Yellow sticky traps and insect-proof nets, plus release of ladybirds \
             (10 per m²) as natural predators.",
        )
        .with_alternative(
            "Alternative 3: Conventional treatment",
            "Lambda-cyhalothrin (15ml per 10L of water) as a last resort only. \
             Respect a 14-day pre-harvest interval.",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Season;

    fn record() -> PesticideParameters {
        let mut p = PesticideParameters::defaults("Jendouba");
        p.district = "Tabarka".into();
        p.issues = vec!["pucerons".into(), "thrips".into()];
        p.season = Season::Spring;
        p.temperature_c = 28.0;
        p.humidity_percent = 55.0;
        p.rainfall_mm = 12.0;
        p
    }

    #[test]
    fn fills_template_from_record() {
        let result = PesticideScorer::default().score(&record());
        assert_eq!(result.category, RecommendationCategory::Pesticide);
        assert_eq!(result.primary.title, "Recommended treatment for tomate in Jendouba");
        assert_eq!(result.data_point("District"), Some("Tabarka"));
        assert_eq!(result.data_point("Problem"), Some("pucerons and thrips"));
        assert_eq!(
            result.data_point("Conditions"),
            Some("Current season: spring, growing season: Unspecified, 28°C, 55% humidity, 12mm rainfall")
        );
        assert!(result.primary.body.contains("pucerons and thrips"));
        assert_eq!(result.primary.caveat.label, "Environmental considerations");
        assert_eq!(result.alternatives.len(), 3);
        assert!(result.alternatives[0].title.contains("Biological"));
        assert!(result.alternatives[1].title.contains("Mechanical"));
        assert!(result.alternatives[2].title.contains("Conventional"));
    }

    #[test]
    fn separator_is_applied_at_render_time() {
        let result = PesticideScorer::new(" et ").score(&record());
        assert_eq!(result.data_point("Problem"), Some("pucerons et thrips"));
    }

    #[test]
    fn same_input_same_output() {
        let mut scorer = PesticideScorer::default();
        assert_eq!(scorer.score(&record()), scorer.score(&record()));
    }
}
