//! Main application state and TUI event loop.
//!
//! [`App`] owns the loaded table, the sidebar selection state and the report
//! currently on screen. Reports are rebuilt on demand when the selection or
//! the month-over-month mode changes.

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use tracing::{debug, info, warn};

use funding_core::error::{DashboardError, Result};
use funding_core::models::{FundingTable, MomMode};
use funding_data::report::{Report, ReportOptions};
use funding_data::view::{View, ViewSelector};

use crate::components::header::Header;
use crate::investor_view::{render_investor_prompt, render_investor_view};
use crate::overall_view::render_overall_view;
use crate::themes::Theme;

pub const SIDEBAR_TITLE: &str = "Startup Funding Analysis";
pub const FIND_INVESTOR_DETAILS: &str = "Find Investor Details";

/// Rows skipped by PgUp / PgDn in a list.
const PAGE_STEP: isize = 10;
const SIDEBAR_WIDTH: u16 = 34;

// ── ViewMode / Focus ──────────────────────────────────────────────────────────

/// The sidebar option currently chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Overall,
    Investor,
}

impl ViewMode {
    /// Sidebar options in display order.
    pub const ALL: [ViewMode; 2] = [ViewMode::Overall, ViewMode::Investor];

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Overall => "Overall Analysis",
            ViewMode::Investor => "Investor",
        }
    }

    fn index(self) -> usize {
        match self {
            ViewMode::Overall => 0,
            ViewMode::Investor => 1,
        }
    }
}

/// Which sidebar list receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Options,
    Investors,
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the dashboard TUI.
pub struct App {
    pub theme: Theme,
    pub view_mode: ViewMode,
    pub focus: Focus,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
    dataset: String,
    table: FundingTable,
    selector: ViewSelector,
    options: ReportOptions,
    option_state: ListState,
    investor_state: ListState,
    /// Report on screen. `None` on the investor option until details are
    /// requested.
    report: Option<Report>,
    /// Last selection error, shown above the report area.
    status: Option<String>,
}

impl App {
    /// Construct the application and build the report for `initial`.
    ///
    /// `selector` must have been built from `table`. An investor view with a
    /// blank name starts on the investor option with no details shown.
    pub fn new(
        theme_name: &str,
        dataset: String,
        table: FundingTable,
        selector: ViewSelector,
        options: ReportOptions,
        initial: View,
    ) -> Self {
        let first_investor = if selector.investors().is_empty() {
            None
        } else {
            Some(0)
        };

        let mut app = Self {
            theme: Theme::from_name(theme_name),
            view_mode: ViewMode::Overall,
            focus: Focus::Options,
            should_quit: false,
            dataset,
            table,
            selector,
            options,
            option_state: ListState::default().with_selected(Some(0)),
            investor_state: ListState::default().with_selected(first_investor),
            report: None,
            status: None,
        };

        match initial {
            View::Overall => app.show(View::Overall),
            View::Investor(name) => {
                app.view_mode = ViewMode::Investor;
                app.option_state.select(Some(ViewMode::Investor.index()));
                if let Some(pos) = app.selector.investors().iter().position(|n| *n == name) {
                    app.investor_state.select(Some(pos));
                }
                if !name.is_empty() {
                    app.focus = Focus::Investors;
                    app.show(View::Investor(name));
                }
            }
        }
        app
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn mom_mode(&self) -> MomMode {
        self.options.mom_mode
    }

    /// Investor name under the cursor in the investor list.
    pub fn selected_investor(&self) -> Option<&str> {
        self.investor_state
            .selected()
            .and_then(|i| self.selector.investors().get(i))
            .map(String::as_str)
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the dashboard until `q` / `Ctrl+C`.
    ///
    /// Uses `crossterm::event::poll` with a 250 ms timeout. The terminal is
    /// restored before returning, also when the loop fails.
    pub fn run(mut self) -> Result<()> {
        enable_raw_mode().map_err(terminal_error("enable raw mode"))?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(terminal_error("enter alternate screen"))?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(terminal_error("create terminal"))?;

        let result = self
            .event_loop(&mut terminal)
            .map_err(terminal_error("event loop"));
        let restored = restore_terminal(&mut terminal);

        result.and(restored)
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
        let tick_rate = Duration::from_millis(250);

        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }
        }
        Ok(())
    }

    /// Apply one key press to the application state.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Tab | KeyCode::BackTab => self.toggle_focus(),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-PAGE_STEP),
            KeyCode::PageDown => self.move_selection(PAGE_STEP),
            KeyCode::Home => self.move_selection(isize::MIN),
            KeyCode::End => self.move_selection(isize::MAX),
            KeyCode::Enter => self.activate(),
            KeyCode::Char('m') | KeyCode::Char('M') => self.toggle_mom_mode(),
            _ => {}
        }
    }

    // ── State transitions ─────────────────────────────────────────────────────

    /// Build the report for `view`, keeping the error for display on failure.
    fn show(&mut self, view: View) {
        match self.selector.build(&view, &self.table, &self.options) {
            Ok(report) => {
                debug!("Showing {}", view.title());
                self.report = Some(report);
                self.status = None;
            }
            Err(e) => {
                warn!("Cannot show {:?}: {}", view, e);
                self.report = None;
                self.status = Some(e.to_string());
            }
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Options
                if self.view_mode == ViewMode::Investor
                    && !self.selector.investors().is_empty() =>
            {
                Focus::Investors
            }
            _ => Focus::Options,
        };
    }

    fn move_selection(&mut self, delta: isize) {
        match self.focus {
            Focus::Options => {
                let next = step(self.view_mode.index(), delta, ViewMode::ALL.len());
                self.set_view_mode(ViewMode::ALL[next]);
            }
            Focus::Investors => {
                let len = self.selector.investors().len();
                if len == 0 {
                    return;
                }
                let current = self.investor_state.selected().unwrap_or(0);
                self.investor_state.select(Some(step(current, delta, len)));
            }
        }
    }

    fn set_view_mode(&mut self, mode: ViewMode) {
        if mode == self.view_mode {
            return;
        }
        self.view_mode = mode;
        self.option_state.select(Some(mode.index()));
        match mode {
            ViewMode::Overall => self.show(View::Overall),
            ViewMode::Investor => {
                self.report = None;
                self.status = None;
            }
        }
    }

    fn activate(&mut self) {
        match (self.focus, self.view_mode) {
            (Focus::Options, ViewMode::Overall) => self.show(View::Overall),
            (Focus::Options, ViewMode::Investor) => self.toggle_focus(),
            (Focus::Investors, _) => {
                if let Some(name) = self.selected_investor().map(str::to_string) {
                    info!("{FIND_INVESTOR_DETAILS}: {name}");
                    self.show(View::Investor(name));
                }
            }
        }
    }

    fn toggle_mom_mode(&mut self) {
        self.options.mom_mode = self.options.mom_mode.toggled();
        debug!("MoM mode switched to {}", self.options.mom_mode);
        if matches!(self.report, Some(Report::Overall(_))) {
            self.show(View::Overall);
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the sidebar and the current report into `frame`.
    pub fn render(&mut self, frame: &mut Frame) {
        let [sidebar_area, main_area] =
            Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
                .areas(frame.area());

        self.render_sidebar(frame, sidebar_area);
        self.render_main(frame, main_area);
    }

    fn render_sidebar(&mut self, frame: &mut Frame, area: Rect) {
        let [title_area, options_area, investors_area, help_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(4),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(SIDEBAR_TITLE, self.theme.sidebar_title))),
            title_area,
        );

        let option_items: Vec<ListItem> = ViewMode::ALL
            .iter()
            .map(|mode| ListItem::new(mode.label()).style(self.theme.sidebar_item))
            .collect();
        let options_list = List::new(option_items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.theme.panel_border(self.focus == Focus::Options))
                    .title(" Select One "),
            )
            .highlight_style(self.theme.sidebar_selected)
            .highlight_symbol("> ");
        frame.render_stateful_widget(options_list, options_area, &mut self.option_state);

        if self.view_mode == ViewMode::Investor {
            let investor_items: Vec<ListItem> = self
                .selector
                .investors()
                .iter()
                .map(|name| ListItem::new(name.as_str()).style(self.theme.sidebar_item))
                .collect();
            let investors_list = List::new(investor_items)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(self.theme.panel_border(self.focus == Focus::Investors))
                        .title(" Select Investor ")
                        .title_bottom(format!(" Enter: {FIND_INVESTOR_DETAILS} ")),
                )
                .highlight_style(self.theme.sidebar_selected)
                .highlight_symbol("> ");
            frame.render_stateful_widget(investors_list, investors_area, &mut self.investor_state);
        }

        let help = Text::from(vec![
            Line::from(Span::styled("Tab focus  ↑/↓ move  Enter select", self.theme.dim)),
            Line::from(Span::styled("m MoM mode  q quit", self.theme.dim)),
        ]);
        frame.render_widget(Paragraph::new(help), help_area);
    }

    fn render_main(&self, frame: &mut Frame, area: Rect) {
        let status_height = if self.status.is_some() { 1 } else { 0 };
        let [header_area, status_area, body_area] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(status_height),
            Constraint::Min(0),
        ])
        .areas(area);

        let header = Header::new(&self.dataset, self.table.len(), &self.theme);
        frame.render_widget(Paragraph::new(Text::from(header.to_lines())), header_area);

        if let Some(status) = &self.status {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(status.as_str(), self.theme.error))),
                status_area,
            );
        }

        match &self.report {
            Some(Report::Overall(report)) => {
                render_overall_view(frame, body_area, report, &self.theme)
            }
            Some(Report::Investor(report)) => {
                render_investor_view(frame, body_area, report, &self.theme)
            }
            None => render_investor_prompt(frame, body_area, &self.theme),
        }
    }
}

/// Leave raw mode and the alternate screen, then show the cursor again.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().map_err(terminal_error("disable raw mode"))?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .map_err(terminal_error("leave alternate screen"))?;
    terminal
        .show_cursor()
        .map_err(terminal_error("show cursor"))
}

/// Wrap a crossterm / backend failure as [`DashboardError::Terminal`].
fn terminal_error(action: &'static str) -> impl Fn(io::Error) -> DashboardError {
    move |e| DashboardError::Terminal(format!("{action}: {e}"))
}

/// Move `current` by `delta` within `0..len`, clamping at both ends.
fn step(current: usize, delta: isize, len: usize) -> usize {
    let last = len.saturating_sub(1);
    if delta >= 0 {
        current.saturating_add(delta as usize).min(last)
    } else {
        current.saturating_sub(delta.unsigned_abs())
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use funding_core::models::FundingRecord;
    use ratatui::backend::TestBackend;

    fn record(month: u32, startup: &str, investors: &str, amount: f64) -> FundingRecord {
        FundingRecord {
            date: NaiveDate::from_ymd_opt(2020, month, 1),
            startup: startup.to_string(),
            vertical: Some("FinTech".to_string()),
            city: Some("Pune".to_string()),
            investors: investors.to_string(),
            round: Some("Seed".to_string()),
            amount: Some(amount),
        }
    }

    fn table() -> FundingTable {
        FundingTable::from_records(vec![
            record(1, "Acme", "Accel,Tiger Global", 100.0),
            record(1, "Beta", "Kalaari", 50.0),
            record(2, "Gamma", "Accel", 30.0),
        ])
    }

    fn app(initial: View) -> App {
        let table = table();
        let selector = ViewSelector::new(&table);
        App::new(
            "dark",
            "startup_cleaned.csv".to_string(),
            table,
            selector,
            ReportOptions::default(),
            initial,
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn screen(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    // ── terminal_error ────────────────────────────────────────────────────────

    #[test]
    fn test_terminal_error_wraps_io_failure() {
        let err = terminal_error("enable raw mode")(io::Error::other("not a tty"));
        assert!(matches!(&err, DashboardError::Terminal(msg) if msg == "enable raw mode: not a tty"));
        assert_eq!(err.to_string(), "Terminal error: enable raw mode: not a tty");
        assert!(!err.is_load_error());
    }

    // ── step ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_step_clamps() {
        assert_eq!(step(0, -1, 3), 0);
        assert_eq!(step(2, 1, 3), 2);
        assert_eq!(step(1, 1, 3), 2);
        assert_eq!(step(5, -10, 20), 0);
        assert_eq!(step(0, isize::MAX, 4), 3);
        assert_eq!(step(3, isize::MIN, 4), 0);
        assert_eq!(step(0, 1, 0), 0);
    }

    // ── App::new ──────────────────────────────────────────────────────────────

    #[test]
    fn test_new_overall_builds_report() {
        let app = app(View::Overall);
        assert_eq!(app.view_mode, ViewMode::Overall);
        assert_eq!(app.focus, Focus::Options);
        assert!(!app.should_quit);
        assert!(matches!(app.report(), Some(Report::Overall(_))));
        assert!(app.status().is_none());
        assert_eq!(app.selected_investor(), Some("Accel"));
    }

    #[test]
    fn test_new_with_investor_selects_it() {
        let app = app(View::Investor("Kalaari".to_string()));
        assert_eq!(app.view_mode, ViewMode::Investor);
        assert_eq!(app.focus, Focus::Investors);
        assert_eq!(app.selected_investor(), Some("Kalaari"));
        match app.report() {
            Some(Report::Investor(r)) => assert_eq!(r.investor, "Kalaari"),
            other => panic!("expected investor report, got {other:?}"),
        }
    }

    #[test]
    fn test_new_lists_investors_from_given_selector() {
        let table = table();
        let selector = ViewSelector::new(&table);
        let names = selector.investors().to_vec();
        let app = App::new(
            "dark",
            "startup_cleaned.csv".to_string(),
            table,
            selector,
            ReportOptions::default(),
            View::Investor("Tiger Global".to_string()),
        );

        assert_eq!(names, vec!["Accel", "Kalaari", "Tiger Global"]);
        assert_eq!(app.investor_state.selected(), Some(2));
        assert_eq!(app.selected_investor(), Some("Tiger Global"));
    }

    #[test]
    fn test_new_with_unknown_investor_reports_status() {
        let app = app(View::Investor("SoftBank".to_string()));
        assert!(app.report().is_none());
        assert_eq!(app.status(), Some("Unknown investor: SoftBank"));
    }

    #[test]
    fn test_new_with_blank_investor_waits_for_selection() {
        let app = app(View::Investor(String::new()));
        assert_eq!(app.view_mode, ViewMode::Investor);
        assert_eq!(app.focus, Focus::Options);
        assert!(app.report().is_none());
        assert!(app.status().is_none());
    }

    // ── Key handling ──────────────────────────────────────────────────────────

    #[test]
    fn test_quit_keys() {
        let mut a = app(View::Overall);
        press(&mut a, KeyCode::Char('q'));
        assert!(a.should_quit);

        let mut b = app(View::Overall);
        b.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(b.should_quit);

        let mut c = app(View::Overall);
        press(&mut c, KeyCode::Char('c'));
        assert!(!c.should_quit);
    }

    #[test]
    fn test_switching_to_investor_clears_report_until_enter() {
        let mut app = app(View::Overall);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.view_mode, ViewMode::Investor);
        assert!(app.report().is_none(), "details only after Enter");

        // Enter on the option moves focus into the investor list.
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.focus, Focus::Investors);

        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.selected_investor(), Some("Kalaari"));
        press(&mut app, KeyCode::Enter);
        match app.report() {
            Some(Report::Investor(r)) => {
                assert_eq!(r.investor, "Kalaari");
                assert_eq!(r.matched_rows, 1);
            }
            other => panic!("expected investor report, got {other:?}"),
        }
    }

    #[test]
    fn test_back_to_overall_rebuilds_report() {
        let mut app = app(View::Investor("Accel".to_string()));
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Options);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.view_mode, ViewMode::Overall);
        assert!(matches!(app.report(), Some(Report::Overall(_))));
    }

    #[test]
    fn test_tab_stays_on_options_in_overall() {
        let mut app = app(View::Overall);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Options);
    }

    #[test]
    fn test_home_end_in_investor_list() {
        let mut app = app(View::Investor("Accel".to_string()));
        press(&mut app, KeyCode::End);
        assert_eq!(app.selected_investor(), Some("Tiger Global"));
        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.selected_investor(), Some("Tiger Global"));
        press(&mut app, KeyCode::Home);
        assert_eq!(app.selected_investor(), Some("Accel"));
    }

    #[test]
    fn test_mom_toggle_rebuilds_overall() {
        let mut app = app(View::Overall);
        assert_eq!(app.mom_mode(), MomMode::Total);

        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.mom_mode(), MomMode::Count);
        match app.report() {
            Some(Report::Overall(r)) => {
                assert_eq!(r.mom_mode, MomMode::Count);
                let values: Vec<f64> = r.month_over_month.points.iter().map(|p| p.value).collect();
                assert_eq!(values, vec![2.0, 1.0]);
            }
            other => panic!("expected overall report, got {other:?}"),
        }
    }

    #[test]
    fn test_mom_toggle_keeps_investor_report() {
        let mut app = app(View::Investor("Accel".to_string()));
        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.mom_mode(), MomMode::Count);
        assert!(matches!(app.report(), Some(Report::Investor(_))));
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    #[test]
    fn test_render_overall_screen() {
        let mut app = app(View::Overall);
        let text = screen(&mut app, 140, 40);
        assert!(text.contains(SIDEBAR_TITLE));
        assert!(text.contains("Overall Analysis"));
        assert!(text.contains("STARTUP FUNDING ANALYSIS"));
        assert!(text.contains("MoM graph"));
        assert!(!text.contains(FIND_INVESTOR_DETAILS));
    }

    #[test]
    fn test_render_investor_screen() {
        let mut app = app(View::Investor("Accel".to_string()));
        let text = screen(&mut app, 140, 40);
        assert!(text.contains(FIND_INVESTOR_DETAILS));
        assert!(text.contains("Tiger Global"));
        assert!(text.contains("Most Recent Investments"));
    }

    #[test]
    fn test_render_prompt_and_status_do_not_panic() {
        let mut prompt = app(View::Investor(String::new()));
        assert!(screen(&mut prompt, 100, 30).contains("Select an investor"));

        let mut failed = app(View::Investor("SoftBank".to_string()));
        assert!(screen(&mut failed, 100, 30).contains("Unknown investor: SoftBank"));
    }

    #[test]
    fn test_render_tiny_terminal_does_not_panic() {
        let mut app = app(View::Investor("Accel".to_string()));
        screen(&mut app, 20, 6);
    }
}
