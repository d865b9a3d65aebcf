//! Universities screen: paginated table plus the create form

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::models::{NewUniversity, University};
use crate::tui::manager::Manager;
use crate::tui::ui::{InputField, Styles};

/// Which part of the screen receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Table,
    Form,
}

pub struct UniversitiesScreen {
    pub manager: Manager<University>,
    pub name_input: InputField,
    pub focus: Focus,
    /// Whether the first-activation load has run.
    pub mounted: bool,
}

impl UniversitiesScreen {
    pub fn new() -> Self {
        Self {
            manager: Manager::new("University", "Universities"),
            name_input: InputField::new("University Name")
                .with_placeholder("Enter University Name"),
            focus: Focus::Table,
            mounted: false,
        }
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.name_input.set_focus(focus == Focus::Form);
    }

    /// Validate the draft. A blank name aborts before any network call.
    pub fn parse_draft(&self) -> Result<NewUniversity, String> {
        let name = self.name_input.value.trim();
        if name.is_empty() {
            return Err("University name is required".to_string());
        }
        Ok(NewUniversity {
            name: name.to_string(),
        })
    }

    pub fn clear_draft(&mut self) {
        self.name_input.clear();
    }

    pub fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Create form
                Constraint::Min(0),    // Table
                Constraint::Length(3), // Pagination footer
            ])
            .split(area);

        self.name_input.render(f, chunks[0]);
        self.draw_table(f, chunks[1]);
        draw_pagination(f, chunks[2], &self.manager, "universities");
    }

    fn draw_table(&self, f: &mut Frame, area: Rect) {
        if self.manager.items().is_empty() {
            let empty = Paragraph::new("No universities found").style(Styles::inactive()).block(
                Block::default()
                    .title("Universities")
                    .borders(Borders::ALL)
                    .border_style(Styles::inactive_border()),
            );
            f.render_widget(empty, area);
            return;
        }

        let header = ListItem::new(Line::from(vec![
            Span::styled("ID    ", Styles::title()),
            Span::styled("│ University Name", Styles::title()),
        ]));

        let items: Vec<ListItem> = std::iter::once(header)
            .chain(self.manager.visible().iter().map(|u| {
                let content = format!("{:5} │ {}", u.id, u.name);
                ListItem::new(Line::from(Span::styled(content, Style::default())))
            }))
            .collect();

        let border_style = if self.focus == Focus::Table {
            Styles::active_border()
        } else {
            Styles::inactive_border()
        };

        let list = List::new(items).block(
            Block::default()
                .title("Universities")
                .borders(Borders::ALL)
                .border_style(border_style),
        );

        f.render_widget(list, area);
    }
}

/// Pagination footer shared by both screens: entry counts on the left,
/// page buttons with boundary-aware styling on the right.
pub fn draw_pagination<T>(f: &mut Frame, area: Rect, manager: &Manager<T>, noun: &str) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let showing = Paragraph::new(format!(
        "Showing {} out of {} {}",
        manager.visible().len(),
        manager.items().len(),
        noun
    ))
    .style(Styles::info())
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::inactive_border()),
    );
    f.render_widget(showing, chunks[0]);

    let prev_style = if manager.can_go_prev() {
        Styles::info()
    } else {
        Styles::inactive()
    };
    let next_style = if manager.can_go_next() {
        Styles::info()
    } else {
        Styles::inactive()
    };

    let mut spans = vec![Span::styled("◀ Prev ", prev_style)];
    for page in 1..=manager.page_count() {
        let style = if page == manager.cursor.page {
            Styles::selected()
        } else {
            Style::default()
        };
        spans.push(Span::styled(format!(" {} ", page), style));
    }
    spans.push(Span::styled(" Next ▶", next_style));

    let pages = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::inactive_border()),
    );
    f.render_widget(pages, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_or_whitespace_draft_is_rejected() {
        let mut screen = UniversitiesScreen::new();
        assert!(screen.parse_draft().is_err());

        for c in "   ".chars() {
            screen.name_input.insert_char(c);
        }
        assert!(screen.parse_draft().is_err());
    }

    #[test]
    fn draft_name_is_trimmed() {
        let mut screen = UniversitiesScreen::new();
        for c in "  MIT ".chars() {
            screen.name_input.insert_char(c);
        }
        let draft = screen.parse_draft().unwrap();
        assert_eq!(draft.name, "MIT");
    }

    #[test]
    fn clear_draft_resets_the_input() {
        let mut screen = UniversitiesScreen::new();
        for c in "MIT".chars() {
            screen.name_input.insert_char(c);
        }
        screen.clear_draft();
        assert!(screen.name_input.is_empty());
    }
}
