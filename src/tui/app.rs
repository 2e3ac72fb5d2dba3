use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::controller::Controller;
use crate::io::config_io;
use crate::io::store::{Store, StoreError};
use crate::model::config::Config;

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Moving the cursor over the list
    Navigate,
    /// Typing a new task into the input line
    Insert,
    /// Clear-completed confirmation; intercepts all keys until answered
    Confirm,
}

/// Main application state
pub struct App {
    pub controller: Controller,
    pub mode: Mode,
    /// Cursor index into the filtered view
    pub cursor: usize,
    /// First visible row of the list area
    pub scroll_offset: usize,
    /// Insert-mode input buffer
    pub input: String,
    /// One-line message for the status row (e.g. a failed save)
    pub status_message: Option<String>,
    pub show_help: bool,
    pub show_key_hints: bool,
    pub theme: Theme,
    pub should_quit: bool,
}

impl App {
    pub fn new(controller: Controller, config: &Config) -> Self {
        App {
            controller,
            mode: Mode::Navigate,
            cursor: 0,
            scroll_offset: 0,
            input: String::new(),
            status_message: None,
            show_help: false,
            show_key_hints: config.ui.show_key_hints,
            theme: Theme::from_config(&config.ui),
            should_quit: false,
        }
    }

    pub fn visible_len(&self) -> usize {
        self.controller.visible().len()
    }

    /// The id of the task under the cursor, if any
    pub fn cursor_task_id(&self) -> Option<i64> {
        self.controller.visible().get(self.cursor).map(|t| t.id)
    }

    /// Keep the cursor inside the filtered view after mutations
    pub fn clamp_cursor(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    /// Surface a failed persist on the status row; the in-memory list
    /// keeps the mutation either way.
    pub fn report(&mut self, result: Result<(), StoreError>) {
        if let Err(e) = result {
            self.status_message = Some(e.to_string());
        }
    }
}

/// Run the TUI application
pub fn run(file_override: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::resolve(file_override);
    let config = config_io::read_config();
    let controller = Controller::new(store);
    let mut app = App::new(controller, &config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        // Each key event runs to completion (mutate → persist → redraw)
        // before the next one is read
        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
