//! Application state and main render loop

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use tui_textarea::TextArea;

use cite_core::CitationStyle;

use crate::clipboard::Clipboard;
use crate::config::Config;
use crate::form::{CitationForm, FormHandles};
use crate::keybindings::{normal_mode_action, Action};
use crate::mode::Mode;
use crate::widgets::{centered_rect, StatusBar, StyleList};

const HELP_TEXT: &str = r#"
cite - Help

Normal mode:
  i / e       - Edit the source record (JSON)
  Tab / s     - Next style
  S-Tab / S   - Previous style
  1-6         - Pick a style
  g / Enter   - Generate citation
  t           - In-text citation dialog
  y / c       - Copy citation to clipboard
  ?           - Toggle this help
  q           - Quit

Editing:
  Esc         - Back to normal mode

In-text dialog:
  Enter       - Generate in-text citation
  Esc         - Close dialog

Source fields: author, title, year (required),
publisher, url (optional)
"#;

/// Main application state
pub struct App<C> {
    /// Current mode (NORMAL, INSERT, DIALOG)
    pub mode: Mode,
    /// Form state and event handling
    pub form: CitationForm<C>,
    /// Source record editor
    editor: TextArea<'static>,
    /// In-text dialog input
    dialog_input: TextArea<'static>,
    /// Last notice (copy outcome, mode hints)
    pub status_message: Option<String>,
    /// Whether to show the help overlay
    pub show_help: bool,
}

impl<C: Clipboard> App<C> {
    /// Create a new application instance
    pub fn new(config: &Config, clipboard: C) -> Self {
        let handles = FormHandles::new(config.source.clone(), config.default_style.clone());
        let form = CitationForm::load(handles, clipboard);

        let mut editor = TextArea::new(config.source.lines().map(str::to_string).collect());
        editor.set_block(Block::default().title("Source (JSON)").borders(Borders::ALL));
        editor.set_cursor_line_style(Style::default());

        Self {
            mode: Mode::Normal,
            form,
            editor,
            dialog_input: new_dialog_input(""),
            status_message: None,
            show_help: false,
        }
    }

    /// Render the application
    pub fn render(&self, frame: &mut Frame) {
        let size = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Status bar
                Constraint::Min(0),    // Main content
                Constraint::Length(1), // Message line
            ])
            .split(size);

        let style = self.form.handles().style.selected();
        frame.render_widget(
            StatusBar::new(
                self.mode,
                self.form.handles().style.value(),
                style.as_ref().map(CitationStyle::display_name),
            ),
            chunks[0],
        );

        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);

        frame.render_widget(&self.editor, content_chunks[0]);

        let side_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(StyleList::HEIGHT), Constraint::Min(0)])
            .split(content_chunks[1]);

        frame.render_widget(StyleList::new(style), side_chunks[0]);
        self.render_result(frame, side_chunks[1]);
        self.render_message_line(frame, chunks[2]);

        if self.form.handles().dialog.is_visible() {
            self.render_dialog(frame, size);
        }

        if self.show_help {
            self.render_help_overlay(frame, size);
        }
    }

    fn render_result(&self, frame: &mut Frame, area: Rect) {
        let handles = self.form.handles();

        let widget = if handles.error.is_visible() {
            let title = match handles.error_field {
                Some(field) => format!("Error: {field}"),
                None => "Error".to_string(),
            };
            Paragraph::new(handles.error.text())
                .style(Style::default().fg(Color::Red))
                .block(Block::default().title(title).borders(Borders::ALL))
        } else if handles.output.is_visible() {
            Paragraph::new(handles.output.text())
                .block(Block::default().title("Citation").borders(Borders::ALL))
        } else {
            Paragraph::new("").block(Block::default().title("Citation").borders(Borders::ALL))
        };

        frame.render_widget(widget.wrap(Wrap { trim: false }), area);
    }

    fn render_message_line(&self, frame: &mut Frame, area: Rect) {
        let content = match (&self.status_message, self.mode) {
            (Some(message), _) => message.clone(),
            (None, Mode::Insert) => "Editing source | Esc to finish".to_string(),
            (None, Mode::Dialog) => "Enter: generate in-text | Esc: close".to_string(),
            (None, Mode::Normal) => {
                "i: edit | Tab: style | g: generate | t: in-text | y: copy | q: quit".to_string()
            }
        };
        frame.render_widget(Paragraph::new(content), area);
    }

    fn render_dialog(&self, frame: &mut Frame, area: Rect) {
        let dialog_area = centered_rect(60, 40, area);
        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .title("In-Text Citation")
            .borders(Borders::ALL)
            .style(Style::default().bg(Color::Black));
        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Input
                Constraint::Min(0),    // Output
                Constraint::Length(1), // Controls
            ])
            .split(inner);

        frame.render_widget(&self.dialog_input, chunks[0]);

        let output = self.form.handles().dialog.output();
        let output_style = if output.starts_with("Error") {
            Style::default().fg(Color::Red)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        frame.render_widget(
            Paragraph::new(output)
                .style(output_style)
                .wrap(Wrap { trim: false }),
            chunks[1],
        );
        frame.render_widget(Paragraph::new("[Enter] Generate   [Esc] Close"), chunks[2]);
    }

    fn render_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title("Help")
            .borders(Borders::ALL)
            .style(Style::default().bg(Color::Black));

        let help_area = centered_rect(60, 80, area);
        frame.render_widget(Clear, help_area);
        frame.render_widget(Paragraph::new(HELP_TEXT).block(block), help_area);
    }

    /// Handle a key press, returns true if app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.mode {
            Mode::Normal => self.handle_normal_key(key.code),
            Mode::Insert => {
                self.handle_insert_key(key);
                false
            }
            Mode::Dialog => {
                self.handle_dialog_key(key);
                false
            }
        }
    }

    fn handle_normal_key(&mut self, code: KeyCode) -> bool {
        let Some(action) = normal_mode_action(code) else {
            return false;
        };

        match action {
            Action::Quit => return true,
            Action::EditSource => {
                self.mode = Mode::Insert;
                self.status_message = None;
            }
            Action::NextStyle => self.form.select_next_style(),
            Action::PrevStyle => self.form.select_prev_style(),
            Action::PickStyle(index) => {
                if let Some(style) = CitationStyle::ALL.get(index) {
                    self.form.style_changed(style.id());
                }
            }
            Action::Generate => self.form.generate_reference(),
            Action::OpenInText => {
                self.form.open_in_text_dialog();
                self.dialog_input = new_dialog_input(self.form.handles().dialog.input());
                self.mode = Mode::Dialog;
                self.status_message = None;
            }
            Action::Copy => {
                let notice = self.form.copy();
                self.status_message = Some(notice.to_string());
            }
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::Cancel => {
                self.show_help = false;
                self.status_message = None;
            }
        }
        false
    }

    fn handle_insert_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.mode = Mode::Normal;
            return;
        }

        if self.editor.input(key) {
            self.form.source_changed(self.editor.lines().join("\n"));
        }
    }

    fn handle_dialog_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.form.close_in_text_dialog();
                self.mode = Mode::Normal;
            }
            KeyCode::Enter => self.form.generate_in_text(),
            _ => {
                if self.dialog_input.input(key) {
                    self.form
                        .dialog_input_changed(self.dialog_input.lines().join("\n"));
                }
            }
        }
    }
}

fn new_dialog_input(text: &str) -> TextArea<'static> {
    let mut input = TextArea::new(text.lines().map(str::to_string).collect());
    input.set_block(Block::default().title("Note").borders(Borders::ALL));
    input.set_cursor_line_style(Style::default());
    input.set_placeholder_text("Optional page or note");
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App<MemoryClipboard> {
        App::new(&Config::default(), MemoryClipboard::default())
    }

    fn screen(app: &App<MemoryClipboard>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_initial_state() {
        let app = app();
        assert_eq!(app.mode, Mode::Normal);
        assert!(app.form.handles().output.is_visible());
        assert!(screen(&app).contains("[NOR]"));
    }

    #[test]
    fn test_error_title_names_field() {
        let config = Config {
            source: r#"{"author":"Smith","year":2020}"#.to_string(),
            ..Config::default()
        };
        let app = App::new(&config, MemoryClipboard::default());
        let text = screen(&app);
        assert!(text.contains("Error: title"));
        assert!(text.contains("Title is required."));
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        assert!(app.handle_key(key(KeyCode::Char('q'))));
    }

    #[test]
    fn test_pick_style() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('5')));
        assert_eq!(app.form.handles().style.value(), "ieee");
        assert!(app.form.handles().output.text().starts_with("[1] "));
    }

    #[test]
    fn test_editing_revalidates() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('i')));
        assert_eq!(app.mode, Mode::Insert);

        // Typing garbage at the cursor breaks the JSON
        app.handle_key(key(KeyCode::Char('x')));
        assert_eq!(app.form.handles().error.text(), "Invalid JSON format.");
        assert!(screen(&app).contains("Invalid JSON format."));

        app.handle_key(key(KeyCode::Backspace));
        assert!(!app.form.handles().error.is_visible());

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn test_in_text_dialog_flow() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('t')));
        assert_eq!(app.mode, Mode::Dialog);
        assert!(app.form.handles().dialog.is_visible());

        // Normal-mode keys are dialog input while the dialog has focus
        app.handle_key(key(KeyCode::Char('q')));
        assert_eq!(app.form.handles().dialog.input(), "q");

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(
            app.form.handles().dialog.output(),
            "In-Text Citation: (Smith, 2020)"
        );
        assert!(screen(&app).contains("In-Text Citation: (Smith, 2020)"));

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.mode, Mode::Normal);
        assert!(!app.form.handles().dialog.is_visible());
        assert!(app
            .form
            .handles()
            .output
            .text()
            .ends_with("\n\nIn-Text: (Smith, 2020)"));
    }

    #[test]
    fn test_copy_sets_status() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('y')));
        assert_eq!(
            app.status_message.as_deref(),
            Some("Citation copied to clipboard!")
        );
        assert_eq!(app.form.clipboard().copied.len(), 1);
    }

    #[test]
    fn test_help_toggle() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('?')));
        assert!(app.show_help);
        app.handle_key(key(KeyCode::Esc));
        assert!(!app.show_help);
    }
}
