use std::io;
use std::time::Duration;

use chrono::{Duration as ChronoDuration, Local, NaiveDate};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::cli::handlers::load_context;
use crate::model::task::{Priority, Task};
use crate::ops::timeline::TimelineFilter;
use crate::tui::render;

/// Input mode for the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Typing into the name filter
    Filter,
}

/// Read-only timeline viewer state. The viewer re-projects the in-memory
/// task list on every draw; it never writes to the store.
pub struct App {
    pub tasks: Vec<Task>,
    pub filter: TimelineFilter,
    pub today: NaiveDate,
    /// Left edge of the visible date window
    pub origin: NaiveDate,
    /// First visible bar row
    pub scroll: usize,
    pub input_mode: InputMode,
    /// Filter text being edited (applied on Enter)
    pub filter_input: String,
    pub should_quit: bool,
}

impl App {
    pub fn new(tasks: Vec<Task>) -> Self {
        let today = Local::now().date_naive();
        let origin = tasks.iter().map(|t| t.start).min().unwrap_or(today);
        App {
            tasks,
            filter: TimelineFilter::default(),
            today,
            origin,
            scroll: 0,
            input_mode: InputMode::Normal,
            filter_input: String::new(),
            should_quit: false,
        }
    }

    fn toggle_priority(&mut self, p: Priority) {
        if !self.filter.priorities.remove(&p) {
            self.filter.priorities.insert(p);
        }
    }

    fn pan_days(&mut self, days: i64) {
        self.origin = self.origin + ChronoDuration::days(days);
    }
}

/// Launch the timeline viewer against the discovered project.
pub fn run(project_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = load_context(project_dir)?;
    let tasks = ctx.store.load()?;
    let mut app = App::new(tasks);

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

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            handle_key(app, key);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

pub fn handle_key(app: &mut App, key: KeyEvent) {
    match app.input_mode {
        InputMode::Normal => handle_normal_key(app, key),
        InputMode::Filter => handle_filter_key(app, key),
    }
}

fn handle_normal_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('d') => app.filter.show_done = !app.filter.show_done,
        KeyCode::Char(c @ '1'..='4') => {
            let idx = c as usize - '1' as usize;
            app.toggle_priority(Priority::ALL[idx]);
        }
        KeyCode::Char('/') => {
            app.filter_input = app.filter.name_contains.clone().unwrap_or_default();
            app.input_mode = InputMode::Filter;
        }
        KeyCode::Char('h') | KeyCode::Left => app.pan_days(-7),
        KeyCode::Char('l') | KeyCode::Right => app.pan_days(7),
        KeyCode::Char('j') | KeyCode::Down => app.scroll = app.scroll.saturating_add(1),
        KeyCode::Char('k') | KeyCode::Up => app.scroll = app.scroll.saturating_sub(1),
        KeyCode::Char('t') => {
            // Jump the window back to today
            app.origin = app.today;
        }
        _ => {}
    }
}

fn handle_filter_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            let text = app.filter_input.trim().to_string();
            app.filter.name_contains = (!text.is_empty()).then_some(text);
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            app.filter_input.pop();
        }
        KeyCode::Char(c) => app.filter_input.push(c),
        _ => {}
    }
}
