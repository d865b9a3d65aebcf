//! Main TUI application state and logic

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame, Terminal,
};
use tracing::error;

use super::manager::Notice;
use super::screens::courses::{self, CoursesScreen};
use super::screens::universities::{self, UniversitiesScreen};
use super::ui::{centered_rect, Styles};
use crate::api::{ApiClient, CourseApi, UniversityApi};
use crate::config::Config;

/// Application screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Universities,
    Courses,
}

/// Main TUI application state
pub struct App {
    /// Current active screen
    pub current_screen: Screen,
    /// Application configuration
    pub config: Config,
    api: ApiClient,

    // Screen states
    pub universities: UniversitiesScreen,
    pub courses: CoursesScreen,

    // Global application state
    pub should_quit: bool,
    pub show_help_popup: bool,
}

impl App {
    /// Create a new TUI application
    pub fn new(config: Config) -> Result<Self> {
        let api = ApiClient::new(&config)?;
        Ok(Self {
            current_screen: Screen::Universities,
            config,
            api,
            universities: UniversitiesScreen::new(),
            courses: CoursesScreen::new(),
            should_quit: false,
            show_help_popup: false,
        })
    }

    /// Run the main application loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        // Initial load for the starting screen
        self.activate_current_screen().await;

        loop {
            terminal.draw(|f| self.draw(f))?;

            if let Ok(event) = crossterm::event::read() {
                if let crossterm::event::Event::Key(key) = event {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key).await?;
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Switch screens and run the first-activation load if needed
    pub async fn navigate_to_screen(&mut self, screen: Screen) {
        self.current_screen = screen;
        self.activate_current_screen().await;
    }

    /// Run the active screen's mount load on its first activation only
    async fn activate_current_screen(&mut self) {
        match self.current_screen {
            Screen::Universities => {
                if !self.universities.mounted {
                    self.universities.mounted = true;
                    self.reload_universities().await;
                }
            }
            Screen::Courses => {
                if !self.courses.mounted {
                    self.courses.mounted = true;
                    self.reload_courses().await;
                }
            }
        }
    }

    async fn reload_universities(&mut self) {
        let api = self.api.clone();
        self.universities
            .manager
            .load(|| async { api.list_universities().await })
            .await;
    }

    async fn reload_courses(&mut self) {
        let api = self.api.clone();
        self.courses
            .manager
            .load(|| async { api.list_courses().await })
            .await;

        // Selector options come from their own fetch; a failure here is
        // logged without replacing whatever the selector already has.
        match api.list_universities().await {
            Ok(options) => self.courses.selector.set_options(options),
            Err(e) => error!("error fetching universities for selector: {}", e),
        }
    }

    /// Handle keyboard input events
    pub async fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        if self.show_help_popup {
            if matches!(key.code, KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?')) {
                self.show_help_popup = false;
            }
            return Ok(());
        }

        if key.code == KeyCode::F(1) {
            self.show_help_popup = true;
            return Ok(());
        }

        match self.current_screen {
            Screen::Universities => self.handle_universities_event(key).await?,
            Screen::Courses => self.handle_courses_event(key).await?,
        }

        Ok(())
    }

    async fn handle_universities_event(&mut self, key: KeyEvent) -> Result<()> {
        match self.universities.focus {
            universities::Focus::Table => match key.code {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('?') => self.show_help_popup = true,
                KeyCode::Char('2') => self.navigate_to_screen(Screen::Courses).await,
                KeyCode::Char('n') | KeyCode::Tab => {
                    self.universities.set_focus(universities::Focus::Form);
                }
                KeyCode::Char('r') => self.reload_universities().await,
                KeyCode::Left | KeyCode::PageUp => self.universities.manager.prev_page(),
                KeyCode::Right | KeyCode::PageDown => self.universities.manager.next_page(),
                KeyCode::Home => self.universities.manager.go_to_page(1),
                KeyCode::End => {
                    let last = self.universities.manager.page_count().max(1);
                    self.universities.manager.go_to_page(last);
                }
                _ => {}
            },
            universities::Focus::Form => match key.code {
                KeyCode::Esc | KeyCode::Tab => {
                    self.universities.set_focus(universities::Focus::Table);
                }
                KeyCode::Enter => self.submit_university().await,
                KeyCode::Char(c) => self.universities.name_input.insert_char(c),
                KeyCode::Backspace => self.universities.name_input.delete_char(),
                KeyCode::Delete => self.universities.name_input.delete_char_forward(),
                KeyCode::Left => self.universities.name_input.move_cursor_left(),
                KeyCode::Right => self.universities.name_input.move_cursor_right(),
                KeyCode::Home => self.universities.name_input.move_cursor_to_start(),
                KeyCode::End => self.universities.name_input.move_cursor_to_end(),
                _ => {}
            },
        }
        Ok(())
    }

    async fn handle_courses_event(&mut self, key: KeyEvent) -> Result<()> {
        match self.courses.focus {
            courses::Focus::Table => match key.code {
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('?') => self.show_help_popup = true,
                KeyCode::Char('1') => self.navigate_to_screen(Screen::Universities).await,
                KeyCode::Char('n') | KeyCode::Tab => {
                    self.courses.set_focus(courses::Focus::Name);
                }
                KeyCode::Char('r') => self.reload_courses().await,
                KeyCode::Left | KeyCode::PageUp => self.courses.manager.prev_page(),
                KeyCode::Right | KeyCode::PageDown => self.courses.manager.next_page(),
                KeyCode::Home => self.courses.manager.go_to_page(1),
                KeyCode::End => {
                    let last = self.courses.manager.page_count().max(1);
                    self.courses.manager.go_to_page(last);
                }
                _ => {}
            },
            courses::Focus::Name => match key.code {
                KeyCode::Esc => self.courses.set_focus(courses::Focus::Table),
                KeyCode::Tab => self.courses.set_focus(courses::Focus::University),
                KeyCode::Enter => self.submit_course().await,
                KeyCode::Char(c) => self.courses.name_input.insert_char(c),
                KeyCode::Backspace => self.courses.name_input.delete_char(),
                KeyCode::Delete => self.courses.name_input.delete_char_forward(),
                KeyCode::Left => self.courses.name_input.move_cursor_left(),
                KeyCode::Right => self.courses.name_input.move_cursor_right(),
                KeyCode::Home => self.courses.name_input.move_cursor_to_start(),
                KeyCode::End => self.courses.name_input.move_cursor_to_end(),
                _ => {}
            },
            courses::Focus::University => match key.code {
                KeyCode::Enter => {
                    if self.courses.selector.is_open() {
                        self.courses.selector.choose();
                    } else {
                        self.courses.selector.toggle();
                    }
                }
                KeyCode::Up => self.courses.selector.navigate_up(),
                KeyCode::Down => {
                    if self.courses.selector.is_open() {
                        self.courses.selector.navigate_down();
                    } else {
                        self.courses.selector.toggle();
                    }
                }
                KeyCode::Esc => {
                    if self.courses.selector.is_open() {
                        self.courses.selector.close();
                    } else {
                        self.courses.set_focus(courses::Focus::Table);
                    }
                }
                KeyCode::Tab => self.courses.set_focus(courses::Focus::Table),
                _ => {}
            },
        }
        Ok(())
    }

    /// Validate and submit the university draft
    async fn submit_university(&mut self) {
        match self.universities.parse_draft() {
            Err(msg) => self.universities.manager.set_notice(Notice::warning(msg)),
            Ok(draft) => {
                let api = self.api.clone();
                let created = self
                    .universities
                    .manager
                    .submit(
                        || async { api.create_university(&draft).await },
                        || async { api.list_universities().await },
                    )
                    .await;
                if created {
                    self.universities.clear_draft();
                }
            }
        }
    }

    /// Validate and submit the course draft
    async fn submit_course(&mut self) {
        match self.courses.parse_draft() {
            Err(msg) => self.courses.manager.set_notice(Notice::warning(msg)),
            Ok(draft) => {
                let api = self.api.clone();
                let created = self
                    .courses
                    .manager
                    .submit(
                        || async { api.create_course(&draft).await },
                        || async { api.list_courses().await },
                    )
                    .await;
                if created {
                    self.courses.clear_draft();
                }
            }
        }
    }

    /// Draw the UI
    pub fn draw(&mut self, f: &mut Frame) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Screen tabs
                Constraint::Min(0),    // Screen content
                Constraint::Length(3), // Status bar
            ])
            .split(size);

        self.draw_tabs(f, chunks[0]);

        match self.current_screen {
            Screen::Universities => self.universities.draw(f, chunks[1]),
            Screen::Courses => self.courses.draw(f, chunks[1]),
        }

        self.draw_status_bar(f, chunks[2]);

        if self.show_help_popup {
            self.draw_help_popup(f, size);
        }
    }

    fn draw_tabs(&self, f: &mut Frame, area: Rect) {
        let index = match self.current_screen {
            Screen::Universities => 0,
            Screen::Courses => 1,
        };

        let tabs = Tabs::new(vec!["1:Universities", "2:Courses"])
            .select(index)
            .highlight_style(Styles::selected())
            .block(
                Block::default()
                    .title("University Management System")
                    .borders(Borders::ALL),
            );

        f.render_widget(tabs, area);
    }

    /// Status bar shows the active screen's notice, or the key hints
    fn draw_status_bar(&self, f: &mut Frame, area: Rect) {
        let notice = match self.current_screen {
            Screen::Universities => self.universities.manager.notice(),
            Screen::Courses => self.courses.manager.notice(),
        };

        let (text, style) = match notice {
            Some(n) => (n.text.clone(), Styles::notice(n.kind)),
            None => (
                "n: New | Tab: Focus | ←/→: Pages | r: Reload | 1/2: Screens | q: Quit | F1: Help"
                    .to_string(),
                Styles::inactive(),
            ),
        };

        let status_bar = Paragraph::new(text)
            .style(style)
            .block(Block::default().borders(Borders::ALL));

        f.render_widget(status_bar, area);
    }

    /// Draw help popup with context-sensitive shortcuts
    fn draw_help_popup(&self, f: &mut Frame, area: Rect) {
        let popup_area = centered_rect(70, 60, area);

        f.render_widget(Clear, popup_area);

        let help_popup = Paragraph::new(self.get_context_help())
            .block(
                Block::default()
                    .title("Help - Shortcuts")
                    .borders(Borders::ALL)
                    .style(Styles::warning()),
            )
            .style(Styles::default());

        f.render_widget(help_popup, popup_area);
    }

    /// Get context-sensitive help content
    fn get_context_help(&self) -> String {
        let global_help = "Global Shortcuts:\n\
            1 / 2 - Switch screen\n\
            q - Quit (from the table)\n\
            F1 / ? - Toggle this help\n\n";

        let screen_help = match self.current_screen {
            Screen::Universities => {
                "Universities:\n\
                n / Tab - Edit the new-university form\n\
                Enter - Save the form\n\
                ←/→ - Previous/next page\n\
                r - Reload the list\n\
                Esc - Leave the form"
            }
            Screen::Courses => {
                "Courses:\n\
                n - Edit the new-course form\n\
                Tab - Cycle name field, university selector, table\n\
                Enter - Open the selector / choose / save\n\
                ←/→ - Previous/next page\n\
                r - Reload the list\n\
                Esc - Close the selector / leave the form"
            }
        };

        format!("{}{}", global_help, screen_help)
    }
}
