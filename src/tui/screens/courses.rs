//! Courses screen: paginated table, create form, university selector

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::universities::draw_pagination;
use crate::models::{Course, NewCourse};
use crate::tui::manager::Manager;
use crate::tui::selector::Selector;
use crate::tui::ui::{InputField, Styles};

/// Which part of the screen receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Table,
    Name,
    University,
}

pub struct CoursesScreen {
    pub manager: Manager<Course>,
    pub name_input: InputField,
    pub selector: Selector,
    pub focus: Focus,
    /// Whether the first-activation load has run.
    pub mounted: bool,
}

impl CoursesScreen {
    pub fn new() -> Self {
        Self {
            manager: Manager::new("Course", "Courses"),
            name_input: InputField::new("Course Name").with_placeholder("Enter Course Name"),
            selector: Selector::new(),
            focus: Focus::Table,
            mounted: false,
        }
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.name_input.set_focus(focus == Focus::Name);
        self.selector.set_focus(focus == Focus::University);
    }

    /// Validate the draft: both the name and a university selection are
    /// required before any network call is made.
    pub fn parse_draft(&self) -> Result<NewCourse, String> {
        let name = self.name_input.value.trim();
        let university_id = self.selector.chosen();
        match (name.is_empty(), university_id) {
            (false, Some(university_id)) => Ok(NewCourse {
                name: name.to_string(),
                university_id,
            }),
            _ => Err("Course name and university are required".to_string()),
        }
    }

    pub fn clear_draft(&mut self) {
        self.name_input.clear();
        self.selector.clear();
    }

    pub fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Create form row
                Constraint::Min(0),    // Table
                Constraint::Length(3), // Pagination footer
            ])
            .split(area);

        let form_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[0]);

        self.name_input.render(f, form_chunks[0]);
        self.selector.render(f, form_chunks[1]);

        self.draw_table(f, chunks[1]);
        draw_pagination(f, chunks[2], &self.manager, "courses");

        // Dropdown overlays the table area, anchored under the selector.
        if self.selector.is_open() {
            let height = (self.selector.options().len() as u16 + 2).min(chunks[1].height);
            let dropdown = Rect {
                x: form_chunks[1].x,
                y: chunks[1].y,
                width: form_chunks[1].width,
                height,
            };
            self.selector.render_options(f, dropdown);
        }
    }

    fn draw_table(&self, f: &mut Frame, area: Rect) {
        if self.manager.items().is_empty() {
            let empty = Paragraph::new("No courses found").style(Styles::inactive()).block(
                Block::default()
                    .title("Courses")
                    .borders(Borders::ALL)
                    .border_style(Styles::inactive_border()),
            );
            f.render_widget(empty, area);
            return;
        }

        let header = ListItem::new(Line::from(vec![
            Span::styled("ID    ", Styles::title()),
            Span::styled("│ Course Name          ", Styles::title()),
            Span::styled("│ University Name", Styles::title()),
        ]));

        let items: Vec<ListItem> = std::iter::once(header)
            .chain(self.manager.visible().iter().map(|course| {
                let content = format!(
                    "{:5} │ {} │ {}",
                    course.id,
                    pad_or_truncate(&course.name, 20),
                    course.university_name()
                );
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
                .title("Courses")
                .borders(Borders::ALL)
                .border_style(border_style),
        );

        f.render_widget(list, area);
    }
}

/// Pad or truncate a string to an exact display width (Unicode-aware).
fn pad_or_truncate(s: &str, max_width: usize) -> String {
    let display_width = s.width();
    if display_width <= max_width {
        format!("{}{}", s, " ".repeat(max_width - display_width))
    } else {
        let mut truncated = String::new();
        let mut current_width = 0;
        for ch in s.chars() {
            let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
            if current_width + ch_width > max_width.saturating_sub(1) {
                break;
            }
            truncated.push(ch);
            current_width += ch_width;
        }
        format!("{}…{}", truncated, " ".repeat(max_width - current_width - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::University;

    fn screen_with_universities() -> CoursesScreen {
        let mut screen = CoursesScreen::new();
        screen.selector.set_options(vec![
            University {
                id: 1,
                name: "MIT".to_string(),
            },
            University {
                id: 2,
                name: "ETH".to_string(),
            },
        ]);
        screen
    }

    #[test]
    fn draft_requires_name_and_selection() {
        let mut screen = screen_with_universities();
        assert!(screen.parse_draft().is_err());

        for c in "Compilers".chars() {
            screen.name_input.insert_char(c);
        }
        // Name alone is not enough.
        assert!(screen.parse_draft().is_err());

        screen.selector.toggle();
        screen.selector.navigate_down();
        screen.selector.choose();
        let draft = screen.parse_draft().unwrap();
        assert_eq!(draft.name, "Compilers");
        assert_eq!(draft.university_id, 2);
    }

    #[test]
    fn selection_without_name_is_rejected() {
        let mut screen = screen_with_universities();
        screen.selector.toggle();
        screen.selector.choose();
        assert!(screen.parse_draft().is_err());
    }

    #[test]
    fn clear_draft_resets_both_widgets() {
        let mut screen = screen_with_universities();
        for c in "Compilers".chars() {
            screen.name_input.insert_char(c);
        }
        screen.selector.toggle();
        screen.selector.choose();

        screen.clear_draft();
        assert!(screen.name_input.is_empty());
        assert_eq!(screen.selector.chosen(), None);
    }

    #[test]
    fn pad_or_truncate_keeps_exact_width() {
        assert_eq!(pad_or_truncate("short", 8), "short   ");
        assert_eq!(pad_or_truncate("a longer name", 8), "a longe…");
        assert_eq!(pad_or_truncate("a longer name", 8).width(), 8);
    }
}
