//! TUI roster browser for clientele.
//!
//! Provides a full-screen terminal UI with:
//! - Paginated customer table with ←/→ (or h/l) page navigation
//! - Live slash search over name and email
//! - Zone picker popup on `z`
//! - Key bindings: j/k select row, / search, z zone, r reload, Esc clear, q quit
//!
//! The data file is loaded on a worker thread; the event loop drains the
//! completion channel between input events and hands the outcome to the
//! controller with the matching ticket, so a superseded reload can never
//! clobber a newer one.

use anyhow::Result;
use clientele_core::{
    LoadError, LoadOutcome, LoadTicket, Roster, ViewStatus, ZoneFilter, load_customers,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

// ---------------------------------------------------------------------------
// Application input modes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum InputMode {
    #[default]
    Normal,
    /// User is typing a search query.
    Search,
    /// Zone picker popup is open.
    ZonePicker,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Main application state for the roster browser.
pub struct BrowseView {
    /// Path the worker thread loads from.
    data_path: PathBuf,
    /// The view-state controller; owns the collection and view parameters.
    roster: Roster,
    /// Current input mode.
    input_mode: InputMode,
    /// Buffer for the search query being typed.
    search_buf: String,
    /// Query value before entering Search mode (for Esc cancel).
    search_prev: String,
    /// Highlighted entry in the zone picker (0 = all zones).
    picker_idx: usize,
    /// Row selection within the current page.
    table_state: TableState,
    /// Transient status message with its creation time.
    status_msg: Option<(String, Instant)>,
    /// Whether to quit.
    should_quit: bool,
    /// In-flight load, if any: the ticket plus its completion channel.
    pending: Option<(LoadTicket, mpsc::Receiver<LoadOutcome>)>,
}

impl BrowseView {
    pub fn new(data_path: PathBuf, page_size: NonZeroUsize) -> Self {
        Self {
            data_path,
            roster: Roster::new(page_size),
            input_mode: InputMode::default(),
            search_buf: String::new(),
            search_prev: String::new(),
            picker_idx: 0,
            table_state: TableState::default(),
            status_msg: None,
            should_quit: false,
            pending: None,
        }
    }

    /// Kick off a (re)load on a worker thread. A previous in-flight load is
    /// superseded: its ticket goes stale the moment the new one is issued.
    fn request_reload(&mut self) {
        let ticket = self.roster.begin_load();
        let (tx, rx) = mpsc::channel();
        let path = self.data_path.clone();
        thread::spawn(move || {
            let _ = tx.send(load_customers(&path));
        });
        self.pending = Some((ticket, rx));
        self.clamp_selection();
    }

    /// Drain the load channel without blocking.
    fn poll_load(&mut self) {
        let Some((ticket, rx)) = self.pending.take() else {
            return;
        };
        match rx.try_recv() {
            Ok(outcome) => {
                self.roster.finish_load(ticket, outcome);
                self.clamp_selection();
            }
            Err(mpsc::TryRecvError::Empty) => {
                self.pending = Some((ticket, rx));
            }
            Err(mpsc::TryRecvError::Disconnected) => {
                // Worker died without sending; report rather than hang in the
                // loading state forever.
                self.roster.finish_load(ticket, Err(LoadError::Interrupted));
                self.clamp_selection();
            }
        }
    }

    fn set_status(&mut self, msg: String) {
        self.status_msg = Some((msg, Instant::now()));
    }

    /// Keep the row selection inside the current page.
    fn clamp_selection(&mut self) {
        let len = self.roster.view().page_items.len();
        match self.table_state.selected() {
            Some(_) if len == 0 => self.table_state.select(None),
            Some(i) if i >= len => self.table_state.select(Some(len - 1)),
            None if len > 0 => self.table_state.select(Some(0)),
            _ => {}
        }
    }

    fn select_next(&mut self) {
        let len = self.roster.view().page_items.len();
        if len == 0 {
            return;
        }
        let i = self
            .table_state
            .selected()
            .map_or(0, |i| (i + 1).min(len - 1));
        self.table_state.select(Some(i));
    }

    fn select_prev(&mut self) {
        if self.roster.view().page_items.is_empty() {
            return;
        }
        let i = self.table_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.table_state.select(Some(i));
    }

    /// Entries offered by the zone picker: "all" plus the zone index.
    fn picker_entries(&self) -> Vec<ZoneFilter> {
        std::iter::once(ZoneFilter::All)
            .chain(
                self.roster
                    .view()
                    .zones
                    .iter()
                    .cloned()
                    .map(ZoneFilter::Zone),
            )
            .collect()
    }

    // -----------------------------------------------------------------------
    // Key event handling
    // -----------------------------------------------------------------------

    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.input_mode {
            InputMode::Search => self.handle_search_key(key),
            InputMode::ZonePicker => self.handle_picker_key(key),
            InputMode::Normal => self.handle_normal_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            // Quit
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,

            // Row selection within the page
            KeyCode::Char('j') | KeyCode::Down => self.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.select_prev(),

            // Page navigation
            KeyCode::Char('l') | KeyCode::Right | KeyCode::Char('n') | KeyCode::PageDown => {
                self.roster.next_page();
                self.clamp_selection();
            }
            KeyCode::Char('h') | KeyCode::Left | KeyCode::Char('p') | KeyCode::PageUp => {
                self.roster.prev_page();
                self.clamp_selection();
            }
            KeyCode::Char('g') | KeyCode::Home => {
                self.roster.set_page(1);
                self.clamp_selection();
            }
            KeyCode::Char('G') | KeyCode::End => {
                self.roster.set_page(usize::MAX);
                self.clamp_selection();
            }

            // Search
            KeyCode::Char('/') => {
                self.search_prev = self.roster.filter().search.clone();
                self.search_buf = self.search_prev.clone();
                self.input_mode = InputMode::Search;
            }

            // Zone picker
            KeyCode::Char('z') => {
                self.picker_idx = match &self.roster.filter().zone {
                    ZoneFilter::All => 0,
                    ZoneFilter::Zone(zone) => self
                        .roster
                        .view()
                        .zones
                        .iter()
                        .position(|z| z == zone)
                        .map_or(0, |i| i + 1),
                };
                self.input_mode = InputMode::ZonePicker;
            }

            // Reload from disk
            KeyCode::Char('r') => {
                self.request_reload();
                self.set_status("Reloading…".to_string());
            }

            // Clear filters
            KeyCode::Esc => {
                if !self.roster.filter().is_empty() {
                    self.roster.clear_filters();
                    self.clamp_selection();
                    self.set_status("Filters cleared".to_string());
                }
            }

            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.search_buf = self.search_prev.clone();
                self.roster.set_search(self.search_prev.clone());
                self.clamp_selection();
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => {
                self.roster.set_search(self.search_buf.clone());
                self.clamp_selection();
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Backspace => {
                self.search_buf.pop();
                self.roster.set_search(self.search_buf.clone());
                self.clamp_selection();
            }
            KeyCode::Char(c) => {
                self.search_buf.push(c);
                self.roster.set_search(self.search_buf.clone());
                self.clamp_selection();
            }
            _ => {}
        }
    }

    fn handle_picker_key(&mut self, key: KeyEvent) {
        let entries = self.picker_entries();
        match key.code {
            KeyCode::Esc | KeyCode::Char('z') => {
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.picker_idx = (self.picker_idx + 1).min(entries.len().saturating_sub(1));
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.picker_idx = self.picker_idx.saturating_sub(1);
            }
            KeyCode::Enter => {
                if let Some(zone) = entries.into_iter().nth(self.picker_idx) {
                    self.roster.set_zone(zone);
                    self.clamp_selection();
                }
                self.input_mode = InputMode::Normal;
            }
            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn zone_label(zone: &str) -> &str {
    if zone.is_empty() { "(unspecified)" } else { zone }
}

fn filter_summary(app: &BrowseView) -> String {
    let filter = app.roster.filter();
    let mut parts = Vec::new();
    if let ZoneFilter::Zone(zone) = &filter.zone {
        parts.push(format!("zone: {}", zone_label(zone)));
    }
    if !filter.search.trim().is_empty() {
        parts.push(format!("search: {}", filter.search.trim()));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!("  [{}]", parts.join("  "))
    }
}

/// Render the browser into the full frame area.
fn render(frame: &mut ratatui::Frame<'_>, app: &mut BrowseView) {
    let area = frame.area();

    // Layout: content + status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);
    let content_area = chunks[0];
    let status_area = chunks[1];

    let view = app.roster.view().clone();

    let block_title = match app.input_mode {
        InputMode::Search => format!(" clientele - search: {} ", app.search_buf),
        _ => format!(
            " clientele - {} of {} customers{} ",
            view.page_items.len(),
            view.matches.len(),
            filter_summary(app)
        ),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(Style::default().fg(Color::Green))
        .title(block_title)
        .title_style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );

    match &view.status {
        ViewStatus::Ready => {
            let header = Row::new([
                Cell::from("NAME"),
                Cell::from("EMAIL"),
                Cell::from("PHONE"),
                Cell::from("GROUP"),
                Cell::from("ZONE"),
                Cell::from("SIGNUP"),
            ])
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            );

            let rows: Vec<Row<'_>> = view
                .page_items
                .iter()
                .map(|customer| {
                    Row::new([
                        Cell::from(customer.full_name.clone()),
                        Cell::from(customer.email.clone()),
                        Cell::from(customer.phone.clone()),
                        Cell::from(customer.group.clone()),
                        Cell::from(zone_label(&customer.zone).to_string()),
                        Cell::from(customer.signup.to_string()),
                    ])
                })
                .collect();

            let widths = [
                Constraint::Min(18),
                Constraint::Min(22),
                Constraint::Length(12),
                Constraint::Length(12),
                Constraint::Length(14),
                Constraint::Length(10),
            ];
            let table = Table::new(rows, widths)
                .header(header)
                .block(block)
                .row_highlight_style(
                    Style::default()
                        .bg(Color::DarkGray)
                        .add_modifier(Modifier::BOLD),
                );
            frame.render_stateful_widget(table, content_area, &mut app.table_state);
        }
        status => {
            let (msg, hint) = match status {
                ViewStatus::Loading => ("Loading customers…".to_string(), "please wait"),
                ViewStatus::Failed(reason) => {
                    (format!("Load failed: {reason}"), "r retry  q quit")
                }
                ViewStatus::NoMatches if app.roster.filter().is_empty() => {
                    ("No customers in the data set.".to_string(), "r reload  q quit")
                }
                _ => (
                    "No customers match the current filters.".to_string(),
                    "Esc clear filters",
                ),
            };
            let lines = vec![
                Line::from(""),
                Line::from(Span::styled(msg, Style::default().fg(Color::White))),
                Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))),
            ];
            let paragraph = Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(paragraph, content_area);
        }
    }

    render_status_bar(frame, app, &view, status_area);

    if app.input_mode == InputMode::ZonePicker {
        render_zone_picker(frame, app, area);
    }
}

/// Build and render the one-line status bar.
fn render_status_bar(
    frame: &mut ratatui::Frame<'_>,
    app: &BrowseView,
    view: &clientele_core::ViewSnapshot,
    area: Rect,
) {
    let key_style = Style::default().fg(Color::Cyan);
    let dim_style = Style::default().fg(Color::DarkGray);

    let mut spans: Vec<Span<'static>> = Vec::new();

    if let Some((msg, at)) = &app.status_msg {
        if at.elapsed() < Duration::from_secs(3) {
            spans.push(Span::styled(
                format!("{msg}  "),
                Style::default().fg(Color::Cyan),
            ));
        }
    }

    let hints: &[(&str, &str)] = match app.input_mode {
        InputMode::Search => &[("ESC", "cancel"), ("ENTER", "confirm")],
        InputMode::ZonePicker => &[("j/k", "move"), ("ENTER", "apply"), ("ESC", "close")],
        InputMode::Normal => &[
            ("←/→", "page"),
            ("j/k", "row"),
            ("/", "search"),
            ("z", "zone"),
            ("r", "reload"),
            ("q", "quit"),
        ],
    };
    for (key, desc) in hints {
        spans.push(Span::styled((*key).to_string(), key_style));
        spans.push(Span::styled(format!(" {desc}  "), dim_style));
    }

    let right = format!("page {}/{}", view.page, view.total_pages);
    let left_len: usize = spans.iter().map(|span| span.content.chars().count()).sum();
    let right_len = right.chars().count();
    if (area.width as usize) > left_len + right_len + 1 {
        spans.push(Span::raw(" ".repeat(area.width as usize - left_len - right_len)));
    } else {
        spans.push(Span::raw("  "));
    }
    spans.push(Span::styled(right, dim_style));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the zone picker popup.
fn render_zone_picker(frame: &mut ratatui::Frame<'_>, app: &BrowseView, area: Rect) {
    let entries = app.picker_entries();
    let popup_w: u16 = 36;
    let popup_h: u16 = (entries.len() as u16 + 2).clamp(3, area.height.saturating_sub(2));
    let x = area.x + area.width.saturating_sub(popup_w) / 2;
    let y = area.y + area.height.saturating_sub(popup_h) / 2;
    let popup_area = Rect {
        x,
        y,
        width: popup_w.min(area.width),
        height: popup_h,
    };

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Zone ")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    let lines: Vec<Line<'static>> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let label = match entry {
                ZoneFilter::All => "All zones".to_string(),
                ZoneFilter::Zone(zone) => zone_label(zone).to_string(),
            };
            let style = if i == app.picker_idx {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let prefix = if i == app.picker_idx { "► " } else { "  " };
            Line::from(Span::styled(format!("{prefix}{label}"), style))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), popup_area);
}

// ---------------------------------------------------------------------------
// Terminal lifecycle
// ---------------------------------------------------------------------------

/// Run the roster browser until the user quits.
pub fn run(data_path: PathBuf, page_size: NonZeroUsize) -> Result<()> {
    let mut app = BrowseView::new(data_path, page_size);
    app.request_reload();

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut BrowseView,
) -> Result<()> {
    while !app.should_quit {
        app.poll_load();
        terminal.draw(|frame| render(frame, app))?;
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
    }
    Ok(())
}
