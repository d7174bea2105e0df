use crate::models::{FieldConditions, IrrigationComparison};
use crate::ui::components::method_gauge;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

pub struct IrrigationScreen<'a> {
    pub conditions: &'a FieldConditions,
    pub comparison: Option<&'a IrrigationComparison>,
    pub error: Option<&'a str>,
}

impl<'a> IrrigationScreen<'a> {
    pub fn new(conditions: &'a FieldConditions) -> Self {
        Self {
            conditions,
            comparison: None,
            error: None,
        }
    }

    pub fn with_comparison(mut self, comparison: Option<&'a IrrigationComparison>) -> Self {
        self.comparison = comparison;
        self
    }

    pub fn with_error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }
}

impl Widget for IrrigationScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(10),   // Content
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled("Irrigation Comparison", Theme::title()),
            Span::styled(format!(" - {}", self.conditions.crop), Theme::dim()),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        match self.comparison {
            Some(comparison) => {
                let content = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .split(chunks[1]);
                render_methods(comparison, content[0], buf);
                render_summary(comparison, content[1], buf);
            }
            None => {
                let message = self.error.unwrap_or("No comparison yet, press [r] to run");
                let style = if self.error.is_some() {
                    Theme::error()
                } else {
                    Theme::dim()
                };
                Paragraph::new(Span::styled(message, style))
                    .wrap(Wrap { trim: true })
                    .render(chunks[1], buf);
            }
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

fn render_methods(comparison: &IrrigationComparison, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .title("Expected yield by method")
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let inner = block.inner(area);
    block.render(area, buf);

    let constraints: Vec<Constraint> = comparison
        .yields
        .iter()
        .map(|_| Constraint::Length(4))
        .collect();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let best = comparison.max_yield();
    for (row, entry) in rows.iter().zip(&comparison.yields) {
        let recommended = entry.method == comparison.recommended;
        method_gauge(entry.method.as_str(), entry.yield_t_ha, best, recommended)
            .render(*row, buf);
    }
}

fn render_summary(comparison: &IrrigationComparison, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .title("Recommendation")
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let inner = block.inner(area);
    block.render(area, buf);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Best method: ", Theme::dim()),
            Span::styled(
                format!(
                    "{} ({})",
                    comparison.recommended.as_str(),
                    comparison.recommended.local_name()
                ),
                Theme::highlight(),
            ),
        ]),
        Line::from(vec![
            Span::styled("Expected yield: ", Theme::dim()),
            Span::styled(
                format!("{:.1} t/ha", comparison.expected_yield_t_ha),
                Theme::success(),
            ),
        ]),
        Line::from(vec![
            Span::styled("Water saved vs flood: ", Theme::dim()),
            Span::styled(
                format!("{:.0}%", comparison.water_savings_percent),
                Theme::success(),
            ),
        ]),
    ];

    if let Some(current) = &comparison.current {
        lines.push(Line::from(vec![
            Span::styled("Current method: ", Theme::dim()),
            Span::styled(
                format!("{} ({:.1} t/ha)", current.method.as_str(), current.yield_t_ha),
                Theme::normal(),
            ),
        ]));
        if current.gain_percent > 0.0 {
            lines.push(Line::from(vec![
                Span::styled("Gain from switching: ", Theme::dim()),
                Span::styled(format!("+{:.0}%", current.gain_percent), Theme::warning()),
            ]));
        }
    }

    lines.push(Line::from(vec![]));
    lines.push(Line::from(Span::styled(
        comparison.recommendation.as_str(),
        Theme::normal(),
    )));
    lines.push(Line::from(vec![]));
    lines.push(Line::from(Span::styled(
        comparison.additional_info.as_str(),
        Theme::dim(),
    )));

    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .render(inner, buf);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shows_error_without_comparison() {
        let conditions = FieldConditions::default();
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        IrrigationScreen::new(&conditions)
            .with_error(Some("Validation failed: humidity out of range"))
            .render(area, &mut buf);
        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Validation failed"));
    }
}
