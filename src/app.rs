use crate::config::Config;
use crate::error::Result;
use crate::logic::AdvisorService;
use crate::models::{
    CropSuggestion, Domain, FieldConditions, IrrigationComparison, ParameterRecord,
    RecommendationResult, YieldEstimate,
};
use crate::ui::components::TextBuffer;
use crate::ui::screens::ConditionField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Pesticide,
    Fertilizer,
    Conditions,
    Irrigation,
    Forecast,
}

impl Screen {
    pub fn from_key(c: char) -> Option<Self> {
        match c {
            '1' => Some(Screen::Pesticide),
            '2' => Some(Screen::Fertilizer),
            '3' => Some(Screen::Conditions),
            '4' => Some(Screen::Irrigation),
            '5' => Some(Screen::Forecast),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Screen::Pesticide => "Pesticide",
            Screen::Fertilizer => "Fertilizer",
            Screen::Conditions => "Conditions",
            Screen::Irrigation => "Irrigation",
            Screen::Forecast => "Yield",
        }
    }

    pub fn all() -> &'static [Screen] {
        &[
            Screen::Pesticide,
            Screen::Fertilizer,
            Screen::Conditions,
            Screen::Irrigation,
            Screen::Forecast,
        ]
    }
}

/// Free-text advisory form state for one domain.
pub struct AdviceState {
    pub domain: Domain,
    pub input: TextBuffer,
    pub editing: bool,
    pub record: Option<ParameterRecord>,
    pub result: Option<RecommendationResult>,
    pub selected_index: usize,
}

impl AdviceState {
    pub fn new(domain: Domain) -> Self {
        Self {
            domain,
            input: TextBuffer::default(),
            editing: false,
            record: None,
            result: None,
            selected_index: 0,
        }
    }

    /// Primary card plus alternatives.
    pub fn card_count(&self) -> usize {
        self.result
            .as_ref()
            .map_or(0, |r| 1 + r.alternatives.len())
    }

    pub fn next(&mut self) {
        let max = self.card_count();
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    pub fn prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.record = None;
        self.result = None;
        self.selected_index = 0;
    }
}

pub struct ConditionsState {
    pub focused_field: ConditionField,
    pub editing: bool,
    pub edit_buffer: TextBuffer,
}

impl ConditionsState {
    pub fn new() -> Self {
        Self {
            focused_field: ConditionField::Crop,
            editing: false,
            edit_buffer: TextBuffer::default(),
        }
    }

    pub fn next_field(&mut self) {
        self.focused_field = self.focused_field.next();
    }

    pub fn prev_field(&mut self) {
        self.focused_field = self.focused_field.prev();
    }

    pub fn start_editing(&mut self, current_value: &str) {
        self.editing = true;
        self.edit_buffer = TextBuffer::from_text(current_value);
    }

    pub fn cancel_editing(&mut self) {
        self.editing = false;
        self.edit_buffer.clear();
    }

    pub fn finish_editing(&mut self) -> String {
        self.editing = false;
        self.edit_buffer.take()
    }
}

impl Default for ConditionsState {
    fn default() -> Self {
        Self::new()
    }
}

pub struct App {
    pub screen: Screen,
    pub should_quit: bool,
    pub advisor: AdvisorService,

    // Inputs
    pub conditions: FieldConditions,

    // Screen states
    pub pesticide_state: AdviceState,
    pub fertilizer_state: AdviceState,
    pub conditions_state: ConditionsState,

    // Model results for the current conditions
    pub irrigation: Option<IrrigationComparison>,
    pub estimate: Option<YieldEstimate>,
    pub suggestion: Option<CropSuggestion>,
    pub model_error: Option<String>,

    // UI state
    pub status_message: Option<String>,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let advisor = AdvisorService::from_config(config)?;
        let mut app = Self {
            screen: Screen::Pesticide,
            should_quit: false,
            advisor,
            conditions: FieldConditions::default(),
            pesticide_state: AdviceState::new(Domain::Pesticide),
            fertilizer_state: AdviceState::new(Domain::Fertilizer),
            conditions_state: ConditionsState::new(),
            irrigation: None,
            estimate: None,
            suggestion: None,
            model_error: None,
            status_message: None,
        };
        app.recompute();
        Ok(app)
    }

    pub fn switch_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: &str) {
        self.status_message = Some(message.to_string());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn advice_state(&self, domain: Domain) -> &AdviceState {
        match domain {
            Domain::Pesticide => &self.pesticide_state,
            Domain::Fertilizer => &self.fertilizer_state,
        }
    }

    pub fn advice_state_mut(&mut self, domain: Domain) -> &mut AdviceState {
        match domain {
            Domain::Pesticide => &mut self.pesticide_state,
            Domain::Fertilizer => &mut self.fertilizer_state,
        }
    }

    /// Extract and score the text typed on an advice screen.
    pub fn submit_advice(&mut self, domain: Domain) {
        let text = self.advice_state(domain).input.as_str().to_string();
        if text.trim().is_empty() {
            self.set_status("Type a description first");
            return;
        }

        match self.advisor.advise_text(&text, domain) {
            Ok((record, result)) => {
                let state = self.advice_state_mut(domain);
                state.record = Some(record);
                state.result = Some(result);
                state.selected_index = 0;
                state.editing = false;
                self.clear_status();
            }
            Err(e) => {
                tracing::warn!(%domain, error = %e, "Advice rejected");
                let record = self.advisor.extract(&text, domain);
                let state = self.advice_state_mut(domain);
                state.record = Some(record);
                state.result = None;
                self.set_status(&e.to_string());
            }
        }
    }

    /// Apply one edited field; on success the models are re-run.
    pub fn apply_condition(&mut self, field: ConditionField, value: &str) {
        let mut updated = self.conditions.clone();
        match updated.apply(field.key(), value) {
            Ok(()) => {
                self.conditions = updated;
                self.recompute();
                if self.model_error.is_none() {
                    self.set_status(&format!("{} updated", field.label()));
                }
            }
            Err(e) => self.set_status(&e.to_string()),
        }
    }

    pub fn reset_conditions(&mut self) {
        self.conditions = FieldConditions::default();
        self.recompute();
        self.set_status("Field conditions reset");
    }

    /// Re-run irrigation, yield and crop models on the current conditions.
    pub fn recompute(&mut self) {
        match self.run_models() {
            Ok((irrigation, estimate, suggestion)) => {
                self.irrigation = Some(irrigation);
                self.estimate = Some(estimate);
                self.suggestion = Some(suggestion);
                self.model_error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Field models rejected the conditions");
                self.irrigation = None;
                self.estimate = None;
                self.suggestion = None;
                self.model_error = Some(e.to_string());
                self.set_status(&e.to_string());
            }
        }
    }

    fn run_models(&mut self) -> Result<(IrrigationComparison, YieldEstimate, CropSuggestion)> {
        let irrigation = self.advisor.compare_irrigation(&self.conditions)?;
        let estimate = self.advisor.estimate_yield(&self.conditions)?;
        let suggestion = self.advisor.suggest_crops(&self.conditions)?;
        Ok((irrigation, estimate, suggestion))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app(strict: bool) -> App {
        let mut config = Config::default();
        config.scoring.jitter = false;
        config.validation.strict = strict;
        App::new(config).expect("built-in geography loads")
    }

    #[test]
    fn starts_with_models_computed() {
        let app = test_app(false);
        assert_eq!(app.screen, Screen::Pesticide);
        assert!(app.irrigation.is_some());
        assert!(app.estimate.is_some());
        assert!(app.suggestion.is_some());
        assert!(app.model_error.is_none());
    }

    #[test]
    fn screen_keys_cover_every_screen() {
        for (i, screen) in Screen::all().iter().enumerate() {
            let key = char::from_digit(i as u32 + 1, 10).unwrap();
            assert_eq!(Screen::from_key(key), Some(*screen));
        }
        assert_eq!(Screen::from_key('9'), None);
    }

    #[test]
    fn submit_advice_fills_record_and_cards() {
        let mut app = test_app(false);
        for c in "pucerons sur tomates à Nabeul".chars() {
            app.pesticide_state.input.insert(c);
        }
        app.submit_advice(Domain::Pesticide);

        let state = &app.pesticide_state;
        let record = state.record.as_ref().expect("record extracted");
        assert_eq!(record.region(), "Nabeul");
        assert_eq!(state.card_count(), 4);
        assert!(app.fertilizer_state.record.is_none());
    }

    #[test]
    fn empty_submission_only_sets_status() {
        let mut app = test_app(false);
        app.submit_advice(Domain::Fertilizer);
        assert!(app.fertilizer_state.result.is_none());
        assert!(app.status_message.is_some());
    }

    #[test]
    fn card_selection_is_bounded() {
        let mut state = AdviceState::new(Domain::Pesticide);
        state.next();
        assert_eq!(state.selected_index, 0);
        state.result = Some(
            RecommendationResult::new(crate::models::RecommendationCategory::Pesticide, "t", "b")
                .with_alternative("a", "b"),
        );
        state.next();
        state.next();
        assert_eq!(state.selected_index, 1);
        state.prev();
        state.prev();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn bad_condition_value_keeps_previous_conditions() {
        let mut app = test_app(false);
        app.apply_condition(ConditionField::Temperature, "warm");
        assert_eq!(app.conditions.temperature_c, 25.0);
        assert!(app.status_message.is_some());

        app.apply_condition(ConditionField::Temperature, "32");
        assert_eq!(app.conditions.temperature_c, 32.0);
    }

    #[test]
    fn strict_mode_reports_out_of_range_conditions() {
        let mut app = test_app(true);
        app.apply_condition(ConditionField::Humidity, "140");
        assert!(app.model_error.is_some());
        assert!(app.irrigation.is_none());

        app.reset_conditions();
        assert!(app.model_error.is_none());
        assert!(app.estimate.is_some());
    }
}
