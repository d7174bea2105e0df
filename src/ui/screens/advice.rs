use crate::models::{Domain, ParameterRecord, RecommendationResult};
use crate::ui::components::InputWidget;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget, Wrap},
};

/// Free-text advisory form for one domain, with the extracted record and
/// the resulting recommendation card.
pub struct AdviceScreen<'a> {
    pub domain: Domain,
    pub input: &'a str,
    pub cursor: usize,
    pub editing: bool,
    pub record: Option<&'a ParameterRecord>,
    pub result: Option<&'a RecommendationResult>,
    /// 0 is the primary card, 1.. are the alternatives.
    pub selected_index: usize,
    pub issue_separator: &'a str,
}

impl<'a> AdviceScreen<'a> {
    pub fn new(domain: Domain, input: &'a str) -> Self {
        Self {
            domain,
            input,
            cursor: input.chars().count(),
            editing: false,
            record: None,
            result: None,
            selected_index: 0,
            issue_separator: " and ",
        }
    }

    pub fn editing(mut self, editing: bool, cursor: usize) -> Self {
        self.editing = editing;
        self.cursor = cursor;
        self
    }

    pub fn with_advice(
        mut self,
        record: Option<&'a ParameterRecord>,
        result: Option<&'a RecommendationResult>,
    ) -> Self {
        self.record = record;
        self.result = result;
        self
    }

    pub fn with_selection(mut self, index: usize) -> Self {
        self.selected_index = index;
        self
    }

    pub fn issue_separator(mut self, separator: &'a str) -> Self {
        self.issue_separator = separator;
        self
    }

    fn placeholder(&self) -> &'static str {
        match self.domain {
            Domain::Pesticide => {
                "e.g. Pucerons sur mes tomates à Nabeul, 28°C et 75% d'humidité"
            }
            Domain::Fertilizer => "e.g. Blé à Béja, azote 30 kg/ha, phosphore 20, pH 5.5, urée",
        }
    }
}

impl Widget for AdviceScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Length(4), // Input
                Constraint::Min(10),   // Content
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let title = match self.domain {
            Domain::Pesticide => "Pesticide Advice",
            Domain::Fertilizer => "Fertilizer Advice",
        };
        let title = Line::from(vec![
            Span::styled(title, Theme::title()),
            Span::styled(" - describe the field in your own words", Theme::dim()),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        InputWidget::new("Describe your situation", self.input)
            .placeholder(self.placeholder())
            .focused(self.editing)
            .cursor(self.cursor)
            .render(chunks[1], buf);

        let content = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(chunks[2]);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(8), Constraint::Length(6)])
            .split(content[0]);

        self.render_record(left[0], buf);
        self.render_cards(left[1], buf);
        self.render_details(content[1], buf);

        let nav = if self.editing {
            Line::from(vec![
                Span::styled("[Enter]", Theme::nav_key()),
                Span::styled("Analyze ", Theme::nav_label()),
                Span::styled("[Esc]", Theme::nav_key()),
                Span::styled("Stop editing", Theme::nav_label()),
            ])
        } else {
            Line::from(vec![
                Span::styled("[e]", Theme::nav_key()),
                Span::styled("Edit ", Theme::nav_label()),
                Span::styled("[↑↓]", Theme::nav_key()),
                Span::styled("Cards ", Theme::nav_label()),
                Span::styled("[c]", Theme::nav_key()),
                Span::styled("Clear ", Theme::nav_label()),
                Span::styled("[Esc]", Theme::nav_key()),
                Span::styled("Back", Theme::nav_label()),
            ])
        };
        Paragraph::new(nav).render(chunks[3], buf);
    }
}

impl AdviceScreen<'_> {
    fn render_record(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Extracted Parameters")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let record = match self.record {
            Some(r) => r,
            None => {
                Paragraph::new(Span::styled("Nothing analyzed yet", Theme::dim()))
                    .render(inner, buf);
                return;
            }
        };

        let row = |label: &str, value: String| {
            Line::from(vec![
                Span::styled(format!("{:<14}", label), Theme::dim()),
                Span::styled(value, Theme::highlight()),
            ])
        };

        let lines = match record {
            ParameterRecord::Pesticide(p) => vec![
                row("Crop", p.crop.clone()),
                row("Region", p.region.clone()),
                row("District", p.district.clone()),
                row("Problem", p.problem_description(self.issue_separator)),
                row("Season", p.season.to_string()),
                row("Temperature", format!("{}°C", p.temperature_c)),
                row("Humidity", format!("{}%", p.humidity_percent)),
                row("Rainfall", format!("{}mm", p.rainfall_mm)),
            ],
            ParameterRecord::Fertilizer(f) => vec![
                row("Crop", f.crop.clone()),
                row("Region", f.region.clone()),
                row("District", f.district.clone()),
                row("N / P / K", format!(
                    "{} / {} / {} kg/ha",
                    f.nitrogen_kg_ha, f.phosphorus_kg_ha, f.potassium_kg_ha
                )),
                row("Soil pH", f.ph.to_string()),
                row("Fertilizer", f.fertilizer_type.clone()),
                row("Season", f.season.to_string()),
            ],
        };

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }

    fn render_cards(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Options")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let result = match self.result {
            Some(r) => r,
            None => return,
        };

        let titles = std::iter::once("Recommended treatment")
            .chain(result.alternatives.iter().map(|a| a.title.as_str()));

        let items: Vec<ListItem> = titles
            .enumerate()
            .map(|(i, title)| {
                let style = if i == self.selected_index {
                    Theme::selected()
                } else {
                    Style::default()
                };
                let marker_style = Style::default().fg(result.category.color());
                ListItem::new(Line::from(vec![
                    Span::styled(if i == 0 { "★ " } else { "• " }, marker_style),
                    Span::raw(title.to_string()),
                ]))
                .style(style)
            })
            .collect();

        List::new(items).render(inner, buf);
    }

    fn render_details(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Recommendation")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        let result = match self.result {
            Some(r) => r,
            None => {
                Paragraph::new(Span::styled(
                    "Press [e], type a description and press Enter",
                    Theme::dim(),
                ))
                .render(inner, buf);
                return;
            }
        };

        let mut lines = Vec::new();

        if self.selected_index > 0 {
            if let Some(alt) = result.alternatives.get(self.selected_index - 1) {
                lines.push(Line::from(Span::styled(alt.title.as_str(), Theme::header())));
                lines.push(Line::from(vec![]));
                lines.push(Line::from(Span::styled(alt.body.as_str(), Theme::normal())));
            }
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .render(inner, buf);
            return;
        }

        let primary = &result.primary;
        lines.push(Line::from(Span::styled(primary.title.as_str(), Theme::header())));
        lines.push(Line::from(vec![]));

        for dp in &primary.data_points {
            lines.push(Line::from(vec![
                Span::styled(format!("{}: ", dp.label), Theme::dim()),
                Span::styled(dp.value.as_str(), Theme::highlight()),
            ]));
        }
        lines.push(Line::from(vec![]));

        lines.push(Line::from(Span::styled(primary.body.as_str(), Theme::normal())));
        lines.push(Line::from(vec![]));

        lines.push(Line::from(vec![
            Span::styled("Dosage: ", Theme::dim()),
            Span::styled(primary.dosage.as_str(), Theme::success()),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Schedule: ", Theme::dim()),
            Span::styled(primary.schedule.as_str(), Theme::success()),
        ]));
        lines.push(Line::from(vec![]));

        lines.push(Line::from(Span::styled(
            format!("{}:", primary.caveat.label),
            Theme::dim(),
        )));
        lines.push(Line::from(Span::styled(
            primary.caveat.value.as_str(),
            Theme::warning(),
        )));

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PesticideParameters, RecommendationCategory};

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn empty_screen_shows_prompt() {
        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        AdviceScreen::new(Domain::Pesticide, "").render(area, &mut buf);
        let text = buffer_text(&buf);
        assert!(text.contains("Pesticide Advice"));
        assert!(text.contains("Nothing analyzed yet"));
    }

    #[test]
    fn selected_alternative_replaces_primary_card() {
        let mut params = PesticideParameters::defaults("Nabeul");
        params.issues = vec!["pucerons".to_string()];
        let record = ParameterRecord::Pesticide(params);
        let result = RecommendationResult::new(RecommendationCategory::Pesticide, "Main", "body")
            .with_alternative("Alternative 1: Biological control", "Neem oil");

        let area = Rect::new(0, 0, 120, 30);
        let mut buf = Buffer::empty(area);
        AdviceScreen::new(Domain::Pesticide, "pucerons")
            .with_advice(Some(&record), Some(&result))
            .with_selection(1)
            .render(area, &mut buf);
        let text = buffer_text(&buf);
        assert!(text.contains("Neem oil"));
        assert!(text.contains("pucerons"));
    }
}
