//! Overall market view: headline metrics and the month-over-month chart.

use funding_core::models::MomMode;
use funding_data::report::OverallReport;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::components::charts::render_line_chart;
use crate::components::metric_card::{overall_cards, render_metric_row};
use crate::themes::Theme;

pub const OVERALL_TITLE: &str = "Overall Analysis";
pub const MOM_PANEL: &str = "MoM graph";

/// `Select Type: [Total] Count   (m to switch)` with the active mode boxed.
pub fn mom_selector_line<'a>(mode: MomMode, theme: &Theme) -> Line<'a> {
    let option = |candidate: MomMode| {
        if candidate == mode {
            Span::styled(format!("[{}]", candidate.label()), theme.sidebar_selected)
        } else {
            Span::styled(format!(" {} ", candidate.label()), theme.dim)
        }
    };
    Line::from(vec![
        Span::styled("Select Type: ", theme.label),
        option(MomMode::Total),
        Span::raw(" "),
        option(MomMode::Count),
        Span::styled("   (m to switch)", theme.dim),
    ])
}

/// Render the overall report into `area`.
pub fn render_overall_view(frame: &mut Frame, area: Rect, report: &OverallReport, theme: &Theme) {
    let [title_area, metrics_area, selector_area, chart_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Length(1),
        Constraint::Min(6),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(OVERALL_TITLE, theme.bold))),
        title_area,
    );

    let cards = overall_cards(report, theme);
    render_metric_row(frame, metrics_area, &cards, theme);

    frame.render_widget(
        Paragraph::new(mom_selector_line(report.mom_mode, theme)),
        selector_area,
    );

    render_line_chart(
        frame,
        chart_area,
        MOM_PANEL,
        &report.month_over_month,
        theme.chart_line,
        theme,
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────
