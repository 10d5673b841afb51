use crate::themes::Theme;
use funding_core::formatting::{format_crore, format_crore_exact, format_number};
use funding_data::report::OverallReport;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Placeholder shown when a metric has no value.
pub const MISSING_VALUE: &str = "-";

/// A single headline figure: a caption above a large value.
pub struct MetricCard<'a> {
    pub label: &'static str,
    pub value: String,
    pub theme: &'a Theme,
}

impl<'a> MetricCard<'a> {
    pub fn new(label: &'static str, value: String, theme: &'a Theme) -> Self {
        Self {
            label,
            value,
            theme,
        }
    }

    /// Two lines: the caption, then the value.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        vec![
            Line::from(Span::styled(self.label, self.theme.metric_label)),
            Line::from(Span::styled(self.value.clone(), self.theme.metric_value)),
        ]
    }
}

/// The four overall headline cards: Total, Max, Avg and Funded Startups.
pub fn overall_cards<'a>(report: &OverallReport, theme: &'a Theme) -> Vec<MetricCard<'a>> {
    let max = report
        .max_funding
        .as_ref()
        .map(|m| format_crore_exact(m.amount))
        .unwrap_or_else(|| MISSING_VALUE.to_string());

    vec![
        MetricCard::new("Total", format_crore(report.total, 0), theme),
        MetricCard::new("Max", max, theme),
        MetricCard::new("Avg", format_crore(report.avg_funding, 0), theme),
        MetricCard::new(
            "Funded Startups",
            format_number(report.startup_count as f64, 0),
            theme,
        ),
    ]
}

/// Lay `cards` out side by side in equal columns.
pub fn render_metric_row(frame: &mut Frame, area: Rect, cards: &[MetricCard], theme: &Theme) {
    if cards.is_empty() {
        return;
    }
    let columns = Layout::horizontal(vec![Constraint::Ratio(1, cards.len() as u32); cards.len()])
        .split(area);

    for (card, column) in cards.iter().zip(columns.iter()) {
        let paragraph = Paragraph::new(Text::from(card.to_lines())).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border),
        );
        frame.render_widget(paragraph, *column);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
