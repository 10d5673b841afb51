use funding_core::formatting::format_number;
use ratatui::text::{Line, Span};

use crate::themes::Theme;

pub const SPARKLES: &str = "✦ ✧ ✦ ✧";
pub const APP_TITLE: &str = "STARTUP FUNDING ANALYSIS";
const RULE_WIDTH: usize = 60;

/// Title, rule and `[ dataset | N rows ]` banner above the main panel.
pub struct Header<'a> {
    pub dataset: &'a str,
    pub rows: usize,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(dataset: &'a str, rows: usize, theme: &'a Theme) -> Self {
        Self {
            dataset,
            rows,
            theme,
        }
    }

    /// Four lines; the last one is blank padding.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let rows = format_number(self.rows as f64, 0);

        vec![
            Line::from(vec![
                Span::styled(SPARKLES, self.theme.header_sparkle),
                Span::styled(format!(" {APP_TITLE} "), self.theme.header),
                Span::styled(SPARKLES, self.theme.header_sparkle),
            ]),
            Line::from(Span::styled("=".repeat(RULE_WIDTH), self.theme.separator)),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(self.dataset, self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(format!("{rows} rows"), self.theme.value),
                Span::styled(" ]", self.theme.label),
            ]),
            Line::from(""),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
