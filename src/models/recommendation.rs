use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendationCategory {
    Pesticide,
    Fertilizer,
    Irrigation,
    Yield,
    CropSelection,
}

impl RecommendationCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationCategory::Pesticide => "Pesticide",
            RecommendationCategory::Fertilizer => "Fertilizer",
            RecommendationCategory::Irrigation => "Irrigation",
            RecommendationCategory::Yield => "Yield",
            RecommendationCategory::CropSelection => "Crop Selection",
        }
    }

    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            RecommendationCategory::Pesticide => Color::Magenta,
            RecommendationCategory::Fertilizer => Color::Green,
            RecommendationCategory::Irrigation => Color::Blue,
            RecommendationCategory::Yield => Color::Yellow,
            RecommendationCategory::CropSelection => Color::Cyan,
        }
    }
}

impl std::fmt::Display for RecommendationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub label: String,
    pub value: String,
}

impl DataPoint {
    pub fn new(label: &str, value: impl std::fmt::Display) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
        }
    }
}

/// The main card of a recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryRecommendation {
    pub title: String,
    /// Echo of the inputs the advice was built from.
    pub data_points: Vec<DataPoint>,
    pub body: String,
    pub dosage: String,
    pub schedule: String,
    /// Closing note: environmental considerations or pH adjustment.
    pub caveat: DataPoint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    pub title: String,
    pub body: String,
}

impl Alternative {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// A primary recommendation plus ranked alternatives. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub category: RecommendationCategory,
    pub primary: PrimaryRecommendation,
    pub alternatives: Vec<Alternative>,
}

impl RecommendationResult {
    pub fn new(
        category: RecommendationCategory,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            category,
            primary: PrimaryRecommendation {
                title: title.into(),
                data_points: Vec::new(),
                body: body.into(),
                dosage: String::new(),
                schedule: String::new(),
                caveat: DataPoint::new("", ""),
            },
            alternatives: Vec::new(),
        }
    }

    pub fn with_data_point(mut self, label: &str, value: impl std::fmt::Display) -> Self {
        self.primary.data_points.push(DataPoint::new(label, value));
        self
    }

    pub fn with_dosage(mut self, dosage: impl Into<String>) -> Self {
        self.primary.dosage = dosage.into();
        self
    }

    pub fn with_schedule(mut self, schedule: impl Into<String>) -> Self {
        self.primary.schedule = schedule.into();
        self
    }

    pub fn with_caveat(mut self, label: &str, text: impl std::fmt::Display) -> Self {
        self.primary.caveat = DataPoint::new(label, text);
        self
    }

    pub fn with_alternative(mut self, title: &str, body: impl Into<String>) -> Self {
        self.alternatives.push(Alternative::new(title, body));
        self
    }

    pub fn data_point(&self, label: &str) -> Option<&str> {
        self.primary
            .data_points
            .iter()
            .find(|dp| dp.label == label)
            .map(|dp| dp.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_cards_in_order() {
        let result = RecommendationResult::new(
            RecommendationCategory::Pesticide,
            "Treatment",
            "Spray at dusk",
        )
        .with_data_point("District", "Tabarka")
        .with_dosage("30ml/10L")
        .with_schedule("Weekly")
        .with_caveat("Environmental considerations", "Low impact")
        .with_alternative("Alternative 1", "Neem")
        .with_alternative("Alternative 2", "Traps");

        assert_eq!(result.data_point("District"), Some("Tabarka"));
        assert_eq!(result.data_point("Missing"), None);
        assert_eq!(result.primary.caveat.value, "Low impact");
        let titles: Vec<_> = result.alternatives.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Alternative 1", "Alternative 2"]);
    }
}
