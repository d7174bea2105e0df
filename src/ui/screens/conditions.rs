use crate::models::FieldConditions;
use crate::ui::components::{humidity_gauge, ph_gauge, temperature_gauge};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionField {
    Crop,
    Nitrogen,
    Phosphorus,
    Potassium,
    Temperature,
    Humidity,
    Ph,
    Rainfall,
    Irrigation,
}

impl ConditionField {
    pub fn all() -> &'static [ConditionField] {
        &[
            ConditionField::Crop,
            ConditionField::Nitrogen,
            ConditionField::Phosphorus,
            ConditionField::Potassium,
            ConditionField::Temperature,
            ConditionField::Humidity,
            ConditionField::Ph,
            ConditionField::Rainfall,
            ConditionField::Irrigation,
        ]
    }

    /// Form key understood by `FieldConditions::apply`.
    pub fn key(&self) -> &'static str {
        match self {
            ConditionField::Crop => "crop",
            ConditionField::Nitrogen => "soil_n",
            ConditionField::Phosphorus => "soil_p",
            ConditionField::Potassium => "soil_k",
            ConditionField::Temperature => "temperature",
            ConditionField::Humidity => "humidity",
            ConditionField::Ph => "ph",
            ConditionField::Rainfall => "rainfall",
            ConditionField::Irrigation => "irrigation",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConditionField::Crop => "Crop",
            ConditionField::Nitrogen => "Soil N (kg/ha)",
            ConditionField::Phosphorus => "Soil P (kg/ha)",
            ConditionField::Potassium => "Soil K (kg/ha)",
            ConditionField::Temperature => "Temperature (°C)",
            ConditionField::Humidity => "Humidity (%)",
            ConditionField::Ph => "Soil pH",
            ConditionField::Rainfall => "Rainfall (mm)",
            ConditionField::Irrigation => "Current irrigation",
        }
    }

    pub fn help(&self) -> &'static str {
        match self {
            ConditionField::Crop => {
                "Crop name, e.g. tomate, blé, olive, pomme de terre, agrumes, piment"
            }
            ConditionField::Nitrogen => "Available nitrogen from the soil analysis",
            ConditionField::Phosphorus => "Available phosphorus from the soil analysis",
            ConditionField::Potassium => "Available potassium from the soil analysis",
            ConditionField::Temperature => "Average air temperature in degrees Celsius",
            ConditionField::Humidity => "Relative humidity, 0 to 100",
            ConditionField::Ph => "Soil pH, 0 to 14 (6.5 is ideal for most crops)",
            ConditionField::Rainfall => "Seasonal rainfall in millimetres",
            ConditionField::Irrigation => {
                "Options: drip, sprinkler, flood, subsurface, center pivot, micro-sprinkler, none"
            }
        }
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        let i = all.iter().position(|f| f == self).unwrap_or(0);
        all[(i + 1) % all.len()]
    }

    pub fn prev(&self) -> Self {
        let all = Self::all();
        let i = all.iter().position(|f| f == self).unwrap_or(0);
        all[(i + all.len() - 1) % all.len()]
    }
}

pub struct ConditionsScreen<'a> {
    pub conditions: &'a FieldConditions,
    pub focused_field: ConditionField,
    pub editing: bool,
    pub edit_buffer: &'a str,
}

impl<'a> ConditionsScreen<'a> {
    pub fn new(conditions: &'a FieldConditions) -> Self {
        Self {
            conditions,
            focused_field: ConditionField::Crop,
            editing: false,
            edit_buffer: "",
        }
    }

    pub fn with_focus(mut self, field: ConditionField) -> Self {
        self.focused_field = field;
        self
    }

    pub fn editing(mut self, editing: bool, buffer: &'a str) -> Self {
        self.editing = editing;
        self.edit_buffer = buffer;
        self
    }

    fn field_value(&self, field: ConditionField) -> String {
        match field {
            ConditionField::Irrigation => self
                .conditions
                .irrigation
                .map(|m| format!("{} ({})", m.as_str(), m.local_name()))
                .unwrap_or_else(|| "Not set".to_string()),
            _ => self.conditions.value_of(field.key()).unwrap_or_default(),
        }
    }
}

impl Widget for ConditionsScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(12),   // Form + gauges
                Constraint::Length(3), // Help
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled("Field Conditions", Theme::title()),
            Span::styled(" - inputs for irrigation and yield models", Theme::dim()),
        ]);
        Paragraph::new(title).render(chunks[0], buf);

        let content = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[1]);

        self.render_form(content[0], buf);
        self.render_gauges(content[1], buf);
        self.render_help(chunks[2], buf);

        let nav = Line::from(vec![
            Span::styled("[↑↓]", Theme::nav_key()),
            Span::styled("Navigate ", Theme::nav_label()),
            Span::styled("[Enter]", Theme::nav_key()),
            Span::styled("Edit/Apply ", Theme::nav_label()),
            Span::styled("[r]", Theme::nav_key()),
            Span::styled("Reset ", Theme::nav_label()),
            Span::styled("[Esc]", Theme::nav_key()),
            Span::styled("Cancel/Back", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(chunks[3], buf);
    }
}

impl ConditionsScreen<'_> {
    fn render_form(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("Field")
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        // One line per field
        let lines: Vec<Line> = ConditionField::all()
            .iter()
            .map(|field| {
                let is_focused = *field == self.focused_field;

                let value = if is_focused && self.editing {
                    format!("{}_", self.edit_buffer)
                } else {
                    self.field_value(*field)
                };

                let value_style = if is_focused && self.editing {
                    Theme::highlight()
                } else if is_focused {
                    Theme::selected()
                } else {
                    Theme::normal()
                };

                let label_style = if is_focused {
                    Theme::border_focused()
                } else {
                    Theme::dim()
                };

                Line::from(vec![
                    Span::styled(format!("{:<20}", field.label()), label_style),
                    Span::styled(value, value_style),
                ])
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }

    fn render_gauges(&self, area: Rect, buf: &mut Buffer) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(4),
                Constraint::Length(4),
                Constraint::Min(0),
            ])
            .split(area);

        temperature_gauge("Temperature", Some(self.conditions.temperature_c))
            .render(rows[0], buf);
        humidity_gauge("Humidity", Some(self.conditions.humidity_percent)).render(rows[1], buf);
        ph_gauge("Soil pH", Some(self.conditions.ph)).render(rows[2], buf);
    }

    fn render_help(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(Span::styled(self.focused_field.help(), Theme::dim()))
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IrrigationMethod;

    #[test]
    fn field_cycle_wraps_both_ways() {
        assert_eq!(ConditionField::Crop.prev(), ConditionField::Irrigation);
        assert_eq!(ConditionField::Irrigation.next(), ConditionField::Crop);
        assert_eq!(ConditionField::Nitrogen.next(), ConditionField::Phosphorus);
    }

    #[test]
    fn every_field_maps_to_a_condition_key() {
        let conditions = FieldConditions::default();
        for field in ConditionField::all() {
            assert!(FieldConditions::FIELDS.contains(&field.key()));
            assert!(conditions.value_of(field.key()).is_some());
        }
    }

    #[test]
    fn irrigation_shows_local_name() {
        let conditions = FieldConditions {
            irrigation: Some(IrrigationMethod::Drip),
            ..FieldConditions::default()
        };
        let screen = ConditionsScreen::new(&conditions);
        let value = screen.field_value(ConditionField::Irrigation);
        assert!(value.starts_with(IrrigationMethod::Drip.as_str()));
        assert!(value.contains(IrrigationMethod::Drip.local_name()));
    }
}
