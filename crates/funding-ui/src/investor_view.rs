//! Investor drill-down view.
//!
//! Renders the recent investments table above the biggest investments and
//! sector share charts, with the year-over-year line at the bottom.

use funding_core::formatting::format_crore_exact;
use funding_core::models::FundingRecord;
use funding_data::report::{InvestorReport, SectorDistribution};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::components::charts::{render_bar_chart, render_line_chart, render_share_chart};
use crate::themes::Theme;

pub const RECENT_PANEL: &str = "Most Recent Investments";
pub const BIGGEST_PANEL: &str = "Biggest Investments";
pub const SECTORS_PANEL: &str = "Sectors Invested In";
pub const YOY_PANEL: &str = "YoY Investment";
pub const NO_SECTOR_DATA: &str = "No valid investment data available for this investor.";

/// Cell text for an absent value.
const BLANK: &str = "-";

const RECENT_HEADERS: [&str; 6] = ["Date", "Startup", "Vertical", "City", "Round", "Amount"];

/// Display cells for one recent-investment row, in header order.
pub fn recent_row_cells(record: &FundingRecord) -> [String; 6] {
    let text = |value: &Option<String>| value.clone().unwrap_or_else(|| BLANK.to_string());
    [
        record
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| BLANK.to_string()),
        record.startup.clone(),
        text(&record.vertical),
        text(&record.city),
        text(&record.round),
        record
            .amount
            .map(format_crore_exact)
            .unwrap_or_else(|| BLANK.to_string()),
    ]
}

/// Render the recent investments as a bordered table.
pub fn render_recent_investments(
    frame: &mut Frame,
    area: Rect,
    records: &[FundingRecord],
    theme: &Theme,
) {
    let header = Row::new(
        RECENT_HEADERS
            .iter()
            .map(|h| Cell::from(*h).style(theme.table_header)),
    )
    .height(1);

    let rows: Vec<Row> = records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            Row::new(recent_row_cells(record).map(Cell::from)).style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(10),
        Constraint::Min(16),
        Constraint::Length(18),
        Constraint::Length(12),
        Constraint::Length(18),
        Constraint::Length(12),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(format!(" {RECENT_PANEL} ")),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Render the placeholder shown when no row has both a vertical and an
/// amount.
pub fn render_no_sector_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(NO_SECTOR_DATA, theme.warning)),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border),
        ),
        area,
    );
}

/// Render the prompt shown before investor details are requested.
pub fn render_investor_prompt(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("Select an investor from the sidebar", theme.info)),
        Line::from(""),
        Line::from(Span::styled(
            "Press Tab to focus the list, Enter to find investor details.",
            theme.dim,
        )),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border)
                .title(" Investor "),
        ),
        area,
    );
}

/// Render the full investor report into `area`.
pub fn render_investor_view(
    frame: &mut Frame,
    area: Rect,
    report: &InvestorReport,
    theme: &Theme,
) {
    let table_height = report.recent_investments.len() as u16 + 3;
    let [title_area, table_area, charts_area, yoy_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(table_height),
        Constraint::Fill(1),
        Constraint::Fill(1),
    ])
    .areas(area);

    let noun = if report.matched_rows == 1 { "row" } else { "rows" };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(report.investor.clone(), theme.bold),
            Span::styled(
                format!("  ({} matching {noun})", report.matched_rows),
                theme.dim,
            ),
        ])),
        title_area,
    );

    render_recent_investments(frame, table_area, &report.recent_investments, theme);

    let [biggest_area, sectors_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .areas(charts_area);
    render_bar_chart(
        frame,
        biggest_area,
        BIGGEST_PANEL,
        &report.top_investments,
        theme,
    );
    match &report.sector_distribution {
        SectorDistribution::NoData => render_no_sector_data(frame, sectors_area, theme),
        SectorDistribution::Shares(shares) => {
            render_share_chart(frame, sectors_area, SECTORS_PANEL, shares, theme)
        }
    }

    render_line_chart(
        frame,
        yoy_area,
        YOY_PANEL,
        &report.year_over_year,
        theme.chart_trend,
        theme,
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────
