//! Single-choice dropdown over the loaded universities
//!
//! Feeds the chosen university id into the course draft. With zero options
//! the widget stays inert: it renders the placeholder and ignores input.

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::ui::Styles;
use crate::models::University;

const PLACEHOLDER: &str = "Select University";

pub struct Selector {
    options: Vec<University>,
    state: ListState,
    open: bool,
    chosen: Option<i64>,
    pub is_focused: bool,
}

impl Selector {
    pub fn new() -> Self {
        Self {
            options: Vec::new(),
            state: ListState::default(),
            open: false,
            chosen: None,
            is_focused: false,
        }
    }

    /// Replace the option set, keeping the current choice if it still exists.
    pub fn set_options(&mut self, options: Vec<University>) {
        self.options = options;
        if let Some(id) = self.chosen {
            if !self.options.iter().any(|u| u.id == id) {
                self.chosen = None;
            }
        }
        self.state
            .select(if self.options.is_empty() { None } else { Some(0) });
    }

    pub fn options(&self) -> &[University] {
        &self.options
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Toggle dropdown visibility; a widget with no options stays closed.
    pub fn toggle(&mut self) {
        if self.options.is_empty() {
            return;
        }
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn navigate_up(&mut self) {
        if self.options.is_empty() {
            return;
        }
        let selected = self.state.selected().unwrap_or(0);
        let new_selected = if selected == 0 {
            self.options.len() - 1
        } else {
            selected - 1
        };
        self.state.select(Some(new_selected));
    }

    pub fn navigate_down(&mut self) {
        if self.options.is_empty() {
            return;
        }
        let selected = self.state.selected().unwrap_or(0);
        self.state.select(Some((selected + 1) % self.options.len()));
    }

    /// Take the highlighted option as the choice and close the dropdown.
    pub fn choose(&mut self) {
        if let Some(selected) = self.state.selected() {
            if let Some(option) = self.options.get(selected) {
                self.chosen = Some(option.id);
            }
        }
        self.open = false;
    }

    /// The selected university id, if any.
    pub fn chosen(&self) -> Option<i64> {
        self.chosen
    }

    /// Display name of the current choice.
    pub fn chosen_name(&self) -> Option<&str> {
        let id = self.chosen?;
        self.options
            .iter()
            .find(|u| u.id == id)
            .map(|u| u.name.as_str())
    }

    pub fn set_focus(&mut self, focused: bool) {
        self.is_focused = focused;
        if !focused {
            self.open = false;
        }
    }

    pub fn clear(&mut self) {
        self.chosen = None;
        self.open = false;
    }

    /// Render the closed field: chosen name or placeholder.
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let display = self.chosen_name().unwrap_or(PLACEHOLDER);

        let border_style = if self.is_focused {
            Styles::active_border()
        } else {
            Styles::inactive_border()
        };

        let text_style = if self.chosen.is_some() {
            Styles::default()
        } else {
            Styles::inactive()
        };

        let field = Paragraph::new(format!("{} ▼", display))
            .style(text_style)
            .block(
                Block::default()
                    .title("University")
                    .borders(Borders::ALL)
                    .border_style(border_style),
            );

        f.render_widget(field, area);
    }

    /// Render the option list as a popup when open.
    pub fn render_options(&mut self, f: &mut Frame, area: Rect) {
        if !self.open || self.options.is_empty() {
            return;
        }

        let items: Vec<ListItem> = self
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let style = if Some(i) == self.state.selected() {
                    Styles::selected()
                } else {
                    Style::default()
                };
                ListItem::new(option.name.clone()).style(style)
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .title("Options")
                .borders(Borders::ALL)
                .border_style(Styles::active_border()),
        );

        f.render_widget(Clear, area);
        f.render_stateful_widget(list, area, &mut self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn university(id: i64, name: &str) -> University {
        University {
            id,
            name: name.to_string(),
        }
    }

    #[test]
    fn empty_selector_is_inert() {
        let mut sel = Selector::new();
        sel.toggle();
        assert!(!sel.is_open());

        sel.navigate_down();
        sel.navigate_up();
        sel.choose();
        assert_eq!(sel.chosen(), None);
        assert_eq!(sel.chosen_name(), None);
    }

    #[test]
    fn choose_sets_id_and_closes() {
        let mut sel = Selector::new();
        sel.set_options(vec![university(1, "MIT"), university(2, "ETH")]);

        sel.toggle();
        assert!(sel.is_open());

        sel.navigate_down();
        sel.choose();
        assert_eq!(sel.chosen(), Some(2));
        assert_eq!(sel.chosen_name(), Some("ETH"));
        assert!(!sel.is_open());
    }

    #[test]
    fn navigation_wraps_around() {
        let mut sel = Selector::new();
        sel.set_options(vec![university(1, "MIT"), university(2, "ETH")]);

        sel.navigate_up();
        sel.choose();
        assert_eq!(sel.chosen(), Some(2));
    }

    #[test]
    fn replacing_options_drops_a_vanished_choice() {
        let mut sel = Selector::new();
        sel.set_options(vec![university(1, "MIT"), university(2, "ETH")]);
        sel.choose();
        assert_eq!(sel.chosen(), Some(1));

        sel.set_options(vec![university(2, "ETH")]);
        assert_eq!(sel.chosen(), None);

        sel.set_options(Vec::new());
        sel.choose();
        assert_eq!(sel.chosen(), None);
    }
}
