use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

/// Multi-line free-text box. The cursor is a character index.
pub struct InputWidget<'a> {
    label: &'a str,
    value: &'a str,
    placeholder: &'a str,
    focused: bool,
    cursor_position: usize,
}

impl<'a> InputWidget<'a> {
    pub fn new(label: &'a str, value: &'a str) -> Self {
        Self {
            label,
            value,
            placeholder: "",
            focused: false,
            cursor_position: value.chars().count(),
        }
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn cursor(mut self, position: usize) -> Self {
        self.cursor_position = position;
        self
    }
}

impl Widget for InputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Theme::border_focused()
        } else {
            Theme::border()
        };

        let block = Block::default()
            .title(self.label)
            .borders(Borders::ALL)
            .border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);

        let line = if self.focused {
            // Show cursor
            let before: String = self.value.chars().take(self.cursor_position).collect();
            let mut after = self.value.chars().skip(self.cursor_position);
            let cursor_char = after.next().unwrap_or(' ');
            let rest: String = after.collect();

            Line::from(vec![
                Span::raw(before),
                Span::styled(cursor_char.to_string(), Theme::selected()),
                Span::raw(rest),
            ])
        } else if self.value.is_empty() {
            Line::from(Span::styled(self.placeholder, Theme::dim()))
        } else {
            Line::from(Span::raw(self.value))
        };

        Paragraph::new(line)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

/// Single-line text buffer with a character cursor, for editing widgets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
    cursor: usize,
}

impl TextBuffer {
    pub fn from_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            cursor: text.chars().count(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map_or(self.text.len(), |(i, _)| i)
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.text.chars().count());
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_multibyte_text_by_character() {
        let mut buf = TextBuffer::from_text("blé");
        assert_eq!(buf.cursor(), 3);
        buf.backspace();
        assert_eq!(buf.as_str(), "bl");
        buf.insert('é');
        buf.left();
        buf.left();
        buf.insert('X');
        assert_eq!(buf.as_str(), "bXlé");
        buf.right();
        buf.right();
        buf.right();
        assert_eq!(buf.cursor(), 4);
        assert_eq!(buf.take(), "bXlé");
        assert_eq!(buf.as_str(), "");
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let mut buf = TextBuffer::default();
        buf.backspace();
        assert_eq!(buf.as_str(), "");
        buf.insert('a');
        buf.clear();
        assert_eq!(buf.cursor(), 0);
    }
}
