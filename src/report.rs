//! Plain-text rendering for the command line.

use crate::models::{
    CropSuggestion, GeographicReference, IrrigationComparison, ParameterRecord,
    RecommendationResult, YieldEstimate,
};
use std::fmt::Write;

const BAR_WIDTH: usize = 30;

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count()));
}

fn field(out: &mut String, label: &str, value: impl std::fmt::Display) {
    let _ = writeln!(out, "  {:<20} {}", format!("{}:", label), value);
}

pub fn render_record(record: &ParameterRecord, issue_separator: &str) -> String {
    let mut out = String::new();
    heading(&mut out, &format!("Extracted {} parameters", record.domain()));

    match record {
        ParameterRecord::Pesticide(p) => {
            field(&mut out, "Crop", &p.crop);
            field(&mut out, "Region", &p.region);
            field(&mut out, "District", &p.district);
            field(&mut out, "Problem", p.problem_description(issue_separator));
            field(&mut out, "Season", p.season);
            field(&mut out, "Growing season", &p.growing_season);
            field(&mut out, "Temperature", format!("{}°C", p.temperature_c));
            field(&mut out, "Humidity", format!("{}%", p.humidity_percent));
            field(&mut out, "Rainfall", format!("{}mm", p.rainfall_mm));
        }
        ParameterRecord::Fertilizer(f) => {
            field(&mut out, "Crop", &f.crop);
            field(&mut out, "Region", &f.region);
            field(&mut out, "District", &f.district);
            field(&mut out, "Nitrogen", format!("{} kg/ha", f.nitrogen_kg_ha));
            field(&mut out, "Phosphorus", format!("{} kg/ha", f.phosphorus_kg_ha));
            field(&mut out, "Potassium", format!("{} kg/ha", f.potassium_kg_ha));
            field(&mut out, "Soil pH", f.ph);
            field(&mut out, "Fertilizer type", &f.fertilizer_type);
            field(&mut out, "Season", f.season);
        }
    }
    out
}

pub fn render_recommendation(result: &RecommendationResult) -> String {
    let mut out = String::new();
    let primary = &result.primary;
    heading(&mut out, &primary.title);

    for dp in &primary.data_points {
        field(&mut out, &dp.label, &dp.value);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", primary.body);
    let _ = writeln!(out);
    field(&mut out, "Dosage", &primary.dosage);
    field(&mut out, "Schedule", &primary.schedule);
    field(&mut out, &primary.caveat.label, &primary.caveat.value);

    if !result.alternatives.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Alternatives");
        for alt in &result.alternatives {
            let _ = writeln!(out, "  - {}", alt.title);
            let _ = writeln!(out, "    {}", alt.body);
        }
    }
    out
}

fn bar(value: f64, max: f64) -> String {
    let ratio = if max > 0.0 { (value / max).clamp(0.0, 1.0) } else { 0.0 };
    let filled = (ratio * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

pub fn render_irrigation(comparison: &IrrigationComparison) -> String {
    let mut out = String::new();
    heading(
        &mut out,
        &format!(
            "Recommended irrigation: {} ({})",
            comparison.recommended,
            comparison.recommended.local_name()
        ),
    );
    field(&mut out, "Expected yield", format!("{} t/ha", comparison.expected_yield_t_ha));
    field(
        &mut out,
        "Water savings",
        format!("{}% vs flood", comparison.water_savings_percent),
    );
    if let Some(current) = &comparison.current {
        field(
            &mut out,
            "Current method",
            format!(
                "{} at {} t/ha, +{}% by switching",
                current.method, current.yield_t_ha, current.gain_percent
            ),
        );
    }

    let _ = writeln!(out);
    let max = comparison.max_yield();
    for y in &comparison.yields {
        let _ = writeln!(
            out,
            "  {:<16} {} {:>5.1} t/ha",
            y.method.as_str(),
            bar(y.yield_t_ha, max),
            y.yield_t_ha
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", comparison.recommendation);
    let _ = writeln!(out, "{}", comparison.additional_info);
    out
}

fn bullet_list(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", title);
    for item in items {
        let _ = writeln!(out, "  - {}", item);
    }
}

pub fn render_yield(estimate: &YieldEstimate) -> String {
    let mut out = String::new();
    heading(&mut out, &format!("Yield forecast for {}", estimate.crop));
    field(&mut out, "Predicted yield", format!("{} t/ha", estimate.predicted_yield_t_ha));
    field(
        &mut out,
        "Regional average",
        format!("{} t/ha ({:+}%)", estimate.average_yield_t_ha, estimate.compared_to_average),
    );
    field(
        &mut out,
        "Optimal yield",
        format!("{} t/ha ({}% reached)", estimate.optimal_yield_t_ha, estimate.percent_of_optimal),
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", estimate.summary);

    bullet_list(&mut out, "Key factors", &estimate.key_factors);
    bullet_list(&mut out, "How to improve the yield", &estimate.recommendations);
    out
}

pub fn render_suggestion(suggestion: &CropSuggestion) -> String {
    let mut out = String::new();
    heading(
        &mut out,
        &format!(
            "Suggested crop: {} ({}% confidence)",
            suggestion.recommended.crop, suggestion.recommended.confidence
        ),
    );
    let _ = writeln!(out, "{}", suggestion.rationale);
    let _ = writeln!(out);
    let _ = writeln!(out, "Alternatives");
    for alt in &suggestion.alternatives {
        let _ = writeln!(out, "  {:<16} {:>3}%", alt.crop, alt.confidence);
    }
    out
}

pub fn render_regions(geography: &GeographicReference) -> String {
    let mut out = String::new();
    heading(
        &mut out,
        &format!(
            "{} regions, {} districts",
            geography.regions().len(),
            geography.district_count()
        ),
    );
    for region in geography.regions() {
        let _ = writeln!(out, "{}: {}", region.name, region.districts.join(", "));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::random::NeutralSource;
    use crate::logic::scoring::{IrrigationScorer, PesticideScorer, Scorer, YieldScorer};
    use crate::models::{FieldConditions, PesticideParameters};

    #[test]
    fn record_uses_render_time_separator() {
        let record = ParameterRecord::Pesticide(PesticideParameters::defaults("Sfax"));
        let text = render_record(&record, " / ");
        assert!(text.starts_with("Extracted pesticide parameters"));
        assert!(text.contains("pucerons / mildiou"));
        assert!(text.contains("Unspecified"));
    }

    #[test]
    fn recommendation_lists_alternatives() {
        let result = PesticideScorer::default().score(&PesticideParameters::defaults("Sfax"));
        let text = render_recommendation(&result);
        assert!(text.contains("Recommended treatment for tomate in Sfax"));
        assert!(text.contains("Environmental considerations:"));
        assert_eq!(text.matches("  - Alternative").count(), 3);
    }

    #[test]
    fn irrigation_bars_are_full_for_the_winner() {
        let mut scorer = IrrigationScorer::new(Box::new(NeutralSource), 0.05);
        let text = render_irrigation(&scorer.score(&FieldConditions::default()));
        let drip_line = text.lines().find(|l| l.trim_start().starts_with("Drip")).unwrap();
        assert!(drip_line.contains(&"#".repeat(BAR_WIDTH)));
    }

    #[test]
    fn yield_report_omits_empty_lists() {
        let c = FieldConditions {
            soil_n: 100.0,
            soil_p: 100.0,
            soil_k: 100.0,
            humidity_percent: 65.0,
            rainfall_mm: 400.0,
            ..FieldConditions::default()
        };
        let estimate = YieldScorer::new(Box::new(NeutralSource), 0.05).score(&c);
        let text = render_yield(&estimate);
        assert!(!text.contains("Key factors"));
        assert!(text.contains("Yield forecast for tomate"));
    }

    #[test]
    fn region_listing_counts() {
        let text = render_regions(&GeographicReference::tunisia());
        assert!(text.starts_with("24 regions, 171 districts"));
        assert!(text.contains("Jendouba: "));
    }

    #[test]
    fn bar_handles_zero_max() {
        assert_eq!(bar(5.0, 0.0), ".".repeat(BAR_WIDTH));
        assert_eq!(bar(10.0, 10.0), "#".repeat(BAR_WIDTH));
    }
}
