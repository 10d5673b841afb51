//! Chart widgets for report series: line, bar and sector share charts.

use funding_core::formatting::format_number;
use funding_data::report::{ChartSeries, SectorShare, SeriesPoint};
use ratatui::{
    layout::Rect,
    style::Style,
    symbols::Marker,
    text::{Line, Span, Text},
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::themes::Theme;

const ELLIPSIS: char = '…';

/// Shown inside an empty chart panel.
pub const NO_POINTS: &str = "No data to plot";

// ── Label helpers ─────────────────────────────────────────────────────────────

/// Shorten `label` to at most `max_width` display columns, ending in `…`
/// when cut.
pub fn truncate_label(label: &str, max_width: usize) -> String {
    if label.width() <= max_width {
        return label.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in label.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push(ELLIPSIS);
    out
}

/// Left-align `label` in a field of `width` display columns.
pub fn pad_label(label: &str, width: usize) -> String {
    let cut = truncate_label(label, width);
    let fill = width.saturating_sub(cut.width());
    format!("{cut}{}", " ".repeat(fill))
}

/// X axis labels: every point for short series, otherwise first, middle and
/// last.
pub fn x_axis_labels(points: &[SeriesPoint]) -> Vec<String> {
    match points.len() {
        0 => Vec::new(),
        1..=3 => points.iter().map(|p| p.label.clone()).collect(),
        n => vec![
            points[0].label.clone(),
            points[n / 2].label.clone(),
            points[n - 1].label.clone(),
        ],
    }
}

/// Upper Y bound with a little headroom; `1.0` for an all-zero series.
pub fn y_upper_bound(max_value: f64) -> f64 {
    if max_value > 0.0 {
        max_value * 1.1
    } else {
        1.0
    }
}

fn y_axis_labels(upper: f64) -> Vec<String> {
    vec![
        "0".to_string(),
        format_number(upper / 2.0, 0),
        format_number(upper, 0),
    ]
}

fn panel(title: &str, border: Style) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(format!(" {title} "))
}

fn render_empty(frame: &mut Frame, area: Rect, block: Block, style: Style) {
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(NO_POINTS, style))).block(block),
        area,
    );
}

// ── Renderers ─────────────────────────────────────────────────────────────────

/// Draw `series` as a line with point markers inside a panel titled `title`.
pub fn render_line_chart(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    series: &ChartSeries,
    line_style: Style,
    theme: &Theme,
) {
    if area.is_empty() {
        return;
    }
    let block = panel(title, theme.border);
    if series.is_empty() {
        render_empty(frame, area, block, theme.dim);
        return;
    }

    let data: Vec<(f64, f64)> = series
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.value))
        .collect();
    let x_upper = (data.len().saturating_sub(1)).max(1) as f64;
    let y_upper = y_upper_bound(series.max_value());

    let datasets = vec![
        Dataset::default()
            .name(series.title.clone())
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(line_style)
            .data(&data),
        Dataset::default()
            .marker(Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(theme.header_sparkle)
            .data(&data),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title(Span::styled(series.x_label.clone(), theme.chart_axis))
                .style(theme.chart_axis)
                .bounds([0.0, x_upper])
                .labels(x_axis_labels(&series.points)),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(series.y_label.clone(), theme.chart_axis))
                .style(theme.chart_axis)
                .bounds([0.0, y_upper])
                .labels(y_axis_labels(y_upper)),
        );

    frame.render_widget(chart, area);
}

/// Draw `series` as vertical bars, one per point, labelled below.
pub fn render_bar_chart(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    series: &ChartSeries,
    theme: &Theme,
) {
    if area.is_empty() {
        return;
    }
    let block = panel(title, theme.border);
    if series.is_empty() {
        render_empty(frame, area, block, theme.dim);
        return;
    }

    let inner_width = area.width.saturating_sub(2) as usize;
    let bar_width = (inner_width / series.points.len())
        .saturating_sub(1)
        .clamp(3, 20);

    let bars: Vec<Bar> = series
        .points
        .iter()
        .map(|p| {
            Bar::default()
                .value(p.value.max(0.0).round() as u64)
                .text_value(format_number(p.value, 0))
                .label(Line::from(truncate_label(&p.label, bar_width)))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width as u16)
        .bar_gap(1)
        .bar_style(theme.chart_bar)
        .value_style(theme.chart_bar_value)
        .label_style(theme.label);

    frame.render_widget(chart, area);
}

/// Build the horizontal share bars, one line per sector.
///
/// Each line is `label ████ 45.2%`, with the bar length proportional to the
/// share of `bar_space` columns.
pub fn share_lines<'a>(
    shares: &[SectorShare],
    bar_space: usize,
    theme: &Theme,
) -> Vec<Line<'a>> {
    let label_width = shares
        .iter()
        .map(|s| s.vertical.width())
        .max()
        .unwrap_or(0)
        .min(18);

    shares
        .iter()
        .enumerate()
        .map(|(i, share)| {
            let filled = ((share.percentage / 100.0) * bar_space as f64).round() as usize;
            Line::from(vec![
                Span::styled(pad_label(&share.vertical, label_width), theme.label),
                Span::raw(" "),
                Span::styled("█".repeat(filled), theme.sector_style(i)),
                Span::styled(format!(" {:.1}%", share.percentage), theme.value),
            ])
        })
        .collect()
}

/// Draw sector shares as horizontal bars inside a panel titled `title`.
pub fn render_share_chart(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    shares: &[SectorShare],
    theme: &Theme,
) {
    if area.is_empty() {
        return;
    }
    let block = panel(title, theme.border);
    if shares.is_empty() {
        render_empty(frame, area, block, theme.dim);
        return;
    }

    // Borders, label column, gap and the " 100.0%" suffix.
    let label_width = shares
        .iter()
        .map(|s| s.vertical.width())
        .max()
        .unwrap_or(0)
        .min(18);
    let bar_space = (area.width as usize).saturating_sub(2 + label_width + 1 + 7);

    let lines = share_lines(shares, bar_space, theme);
    frame.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
