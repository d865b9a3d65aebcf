//! Common UI components and utilities for the univman TUI

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::manager::NoticeKind;

/// Common UI styles
pub struct Styles;

impl Styles {
    pub fn default() -> Style {
        Style::default()
    }

    pub fn selected() -> Style {
        Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default().fg(Color::Red)
    }

    pub fn success() -> Style {
        Style::default().fg(Color::Green)
    }

    pub fn warning() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn info() -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub fn inactive() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn active_border() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn inactive_border() -> Style {
        Style::default().fg(Color::Gray)
    }

    /// Style for a notice in the status bar, by kind.
    pub fn notice(kind: NoticeKind) -> Style {
        match kind {
            NoticeKind::Info => Self::info(),
            NoticeKind::Success => Self::success(),
            NoticeKind::Warning => Self::warning(),
            NoticeKind::Error => Self::error(),
        }
    }
}

/// Input field widget
#[derive(Debug, Clone)]
pub struct InputField {
    pub label: String,
    pub value: String,
    pub placeholder: String,
    pub is_focused: bool,
    pub cursor_position: usize,
}

impl InputField {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            value: String::new(),
            placeholder: String::new(),
            is_focused: false,
            cursor_position: 0,
        }
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    pub fn set_focus(&mut self, focused: bool) {
        self.is_focused = focused;
    }

    pub fn insert_char(&mut self, c: char) {
        self.value.insert(self.cursor_position, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            self.value.remove(self.cursor_position);
        }
    }

    pub fn delete_char_forward(&mut self) {
        if self.cursor_position < self.value.len() {
            self.value.remove(self.cursor_position);
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.value.len() {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_to_start(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_to_end(&mut self) {
        self.cursor_position = self.value.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor_position = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Render the input field as a widget
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let display_text = if self.value.is_empty() && !self.placeholder.is_empty() {
            &self.placeholder
        } else {
            &self.value
        };

        let style = if self.is_focused {
            Styles::active_border()
        } else {
            Styles::inactive_border()
        };

        let block = Block::default()
            .title(self.label.as_str())
            .borders(Borders::ALL)
            .border_style(style);

        let input_style = if self.value.is_empty() && !self.placeholder.is_empty() {
            Styles::inactive()
        } else {
            Styles::default()
        };

        let paragraph = Paragraph::new(display_text.to_string())
            .style(input_style)
            .block(block);

        f.render_widget(paragraph, area);

        // Render cursor if focused
        if self.is_focused {
            let cursor_x = area.x + 1 + self.cursor_position as u16;
            let cursor_y = area.y + 1;
            if cursor_x < area.x + area.width - 1 {
                f.set_cursor(cursor_x, cursor_y);
            }
        }
    }
}

/// Center a rectangle within another rectangle
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_field_editing() {
        let mut field = InputField::new("Name");
        for c in "MIT".chars() {
            field.insert_char(c);
        }
        assert_eq!(field.value, "MIT");
        assert_eq!(field.cursor_position, 3);

        field.delete_char();
        assert_eq!(field.value, "MI");

        field.move_cursor_to_start();
        field.delete_char_forward();
        assert_eq!(field.value, "I");

        field.clear();
        assert!(field.is_empty());
        assert_eq!(field.cursor_position, 0);
    }
}
