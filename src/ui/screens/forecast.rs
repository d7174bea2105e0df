use crate::models::{CropSuggestion, FieldConditions, YieldEstimate};
use crate::ui::components::optimal_gauge;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

/// Yield estimate for the current conditions plus crop suggestions.
pub struct ForecastScreen<'a> {
    pub conditions: &'a FieldConditions,
    pub estimate: Option<&'a YieldEstimate>,
    pub suggestion: Option<&'a CropSuggestion>,
    pub error: Option<&'a str>,
}

impl<'a> ForecastScreen<'a> {
    pub fn new(conditions: &'a FieldConditions) -> Self {
        Self {
            conditions,
            estimate: None,
            suggestion: None,
            error: None,
        }
    }

    pub fn with_results(
        mut self,
        estimate: Option<&'a YieldEstimate>,
        suggestion: Option<&'a CropSuggestion>,
    ) -> Self {
        self.estimate = estimate;
        self.suggestion = suggestion;
        self
    }

    pub fn with_error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }
}

impl Widget for ForecastScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(12),   // Content
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled("Yield Forecast", Theme::title()),
            Span::styled(format!(" - {}", self.conditions.crop), Theme::dim()),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        if let Some(error) = self.error {
            Paragraph::new(Span::styled(error, Theme::error()))
                .wrap(Wrap { trim: true })
                .render(chunks[1], buf);
        } else {
            let content = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(chunks[1]);
            self.render_estimate(content[0], buf);
            self.render_suggestion(content[1], buf);
        }

        let nav = Line::from(vec![
            Span::styled("[r]", Theme::nav_key()),
            Span::styled("Re-run ", Theme::nav_label()),
            Span::styled("[3]", Theme::nav_key()),
            Span::styled("Edit conditions ", Theme::nav_label()),
            Span::styled("[Esc]", Theme::nav_key()),
            Span::styled("Back", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(chunks[2], buf);
    }
}

impl ForecastScreen<'_> {
    fn render_estimate(&self, area: Rect, buf: &mut Buffer) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(6)])
            .split(area);

        let estimate = match self.estimate {
            Some(e) => e,
            None => {
                optimal_gauge("Of optimal yield", None).render(rows[0], buf);
                return;
            }
        };

        optimal_gauge("Of optimal yield", Some(estimate.percent_of_optimal)).render(rows[0], buf);

        let block = Block::default()
            .title("Estimate")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(rows[1]);
        block.render(rows[1], buf);

        let band_style = Style::default().fg(Theme::band_color(estimate.band));
        let mut lines = vec![
            Line::from(vec![
                Span::styled("Predicted: ", Theme::dim()),
                Span::styled(
                    format!("{:.1} t/ha", estimate.predicted_yield_t_ha),
                    Theme::highlight(),
                ),
                Span::styled(
                    format!(
                        "  (average {:.1}, optimal {:.1})",
                        estimate.average_yield_t_ha, estimate.optimal_yield_t_ha
                    ),
                    Theme::dim(),
                ),
            ]),
            Line::from(vec![
                Span::styled("Versus average: ", Theme::dim()),
                Span::styled(format!("{:+.0}%", estimate.compared_to_average), band_style),
            ]),
            Line::from(Span::styled(estimate.summary.as_str(), band_style)),
            Line::from(vec![]),
        ];

        if !estimate.key_factors.is_empty() {
            lines.push(Line::from(Span::styled("Key factors:", Theme::dim())));
            for factor in &estimate.key_factors {
                lines.push(Line::from(Span::styled(
                    format!("  • {}", factor),
                    Theme::warning(),
                )));
            }
            lines.push(Line::from(vec![]));
        }

        if !estimate.recommendations.is_empty() {
            lines.push(Line::from(Span::styled("Recommendations:", Theme::dim())));
            for advice in &estimate.recommendations {
                lines.push(Line::from(Span::styled(
                    format!("  • {}", advice),
                    Theme::success(),
                )));
            }
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }

    fn render_suggestion(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Suggested crops")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let suggestion = match self.suggestion {
            Some(s) => s,
            None => {
                Paragraph::new(Span::styled("No suggestion yet", Theme::dim())).render(inner, buf);
                return;
            }
        };

        let mut lines = vec![
            Line::from(vec![
                Span::styled("★ ", Theme::success()),
                Span::styled(suggestion.recommended.crop.as_str(), Theme::header()),
                Span::styled(
                    format!("  {}%", suggestion.recommended.confidence),
                    Theme::highlight(),
                ),
            ]),
            Line::from(vec![]),
        ];

        for alt in &suggestion.alternatives {
            lines.push(Line::from(vec![
                Span::styled("  ", Theme::dim()),
                Span::styled(alt.crop.as_str(), Theme::normal()),
                Span::styled(format!("  {}%", alt.confidence), Theme::dim()),
            ]));
        }

        lines.push(Line::from(vec![]));
        lines.push(Line::from(Span::styled(
            suggestion.rationale.as_str(),
            Theme::dim(),
        )));

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CropCandidate;

    #[test]
    fn lists_recommended_crop_first() {
        let conditions = FieldConditions::default();
        let suggestion = CropSuggestion {
            recommended: CropCandidate {
                crop: "olive".to_string(),
                confidence: 92,
            },
            alternatives: vec![CropCandidate {
                crop: "blé".to_string(),
                confidence: 75,
            }],
            rationale: "Suited to the soil".to_string(),
        };

        let area = Rect::new(0, 0, 100, 24);
        let mut buf = Buffer::empty(area);
        ForecastScreen::new(&conditions)
            .with_results(None, Some(&suggestion))
            .render(area, &mut buf);
        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        let olive = text.find("olive").expect("recommended crop rendered");
        let ble = text.find("blé").expect("alternative rendered");
        assert!(olive < ble);
        assert!(text.contains("92%"));
        assert!(text.contains("75%"));
    }
}
