use ratatui::style::{Color, Modifier, Style};

/// Whether the terminal draws on a dark or a light background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
}

/// Read the background from `COLORFGBG` (`"fg;bg"`), assuming dark when the
/// variable is absent or malformed.
pub fn detect_background() -> BackgroundType {
    std::env::var("COLORFGBG")
        .ok()
        .and_then(|value| parse_colorfgbg(&value))
        .unwrap_or(BackgroundType::Dark)
}

/// ANSI background colours 0-6 are dark, 7 and up are light.
fn parse_colorfgbg(value: &str) -> Option<BackgroundType> {
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    Some(if bg <= 6 {
        BackgroundType::Dark
    } else {
        BackgroundType::Light
    })
}

const PURPLE: Color = Color::Rgb(0x80, 0x00, 0x80);
const AMETHYST: Color = Color::Rgb(0x9B, 0x59, 0xB6);
const LAVENDER: Color = Color::Rgb(0xBC, 0xA0, 0xDC);
const THISTLE: Color = Color::Rgb(0xD7, 0xBD, 0xE2);
const MAUVE: Color = Color::Rgb(0xE6, 0xB0, 0xFA);
const ORANGE: Color = Color::Rgb(0xFF, 0xA5, 0x00);

/// Every style the dashboard components draw with.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub header_sparkle: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub bold: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub info: Style,
    pub warning: Style,
    pub error: Style,

    // ── Sidebar ──────────────────────────────────────────────────────────────
    pub sidebar_title: Style,
    pub sidebar_item: Style,
    /// Highlighted entry of the focused list.
    pub sidebar_selected: Style,
    pub border: Style,
    pub border_focused: Style,

    // ── Metric cards ─────────────────────────────────────────────────────────
    pub metric_label: Style,
    pub metric_value: Style,

    // ── Charts ───────────────────────────────────────────────────────────────
    /// Month-over-month line.
    pub chart_line: Style,
    /// Year-over-year line.
    pub chart_trend: Style,
    pub chart_bar: Style,
    pub chart_bar_value: Style,
    pub chart_axis: Style,
    /// Slice colours of the sector share chart, cycled in order.
    pub sector_palette: [Color; 5],

    // ── Table ────────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_border: Style,
    pub table_row: Style,
    pub table_row_alt: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            header_sparkle: Style::default().fg(Color::Yellow),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Cyan),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            sidebar_title: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            sidebar_item: Style::default().fg(Color::Gray),
            sidebar_selected: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            border: Style::default().fg(Color::DarkGray),
            border_focused: Style::default().fg(Color::Cyan),

            metric_label: Style::default().fg(Color::Gray),
            metric_value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            chart_line: Style::default().fg(Color::Magenta),
            chart_trend: Style::default().fg(Color::Cyan),
            chart_bar: Style::default().fg(Color::Magenta),
            chart_bar_value: Style::default()
                .fg(Color::Black)
                .bg(Color::Magenta),
            chart_axis: Style::default().fg(Color::Gray),
            sector_palette: [
                Color::Magenta,
                Color::Cyan,
                Color::Green,
                Color::Yellow,
                Color::Blue,
            ],

            table_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
        }
    }

    /// Light-background terminal theme.
    ///
    /// Dark text and saturated accents so charts stay legible on a white
    /// canvas.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            header_sparkle: Style::default().fg(Color::Magenta),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            bold: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Blue),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            sidebar_title: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            sidebar_item: Style::default().fg(Color::DarkGray),
            sidebar_selected: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            border: Style::default().fg(Color::Gray),
            border_focused: Style::default().fg(Color::Blue),

            metric_label: Style::default().fg(Color::DarkGray),
            metric_value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            chart_line: Style::default().fg(Color::Magenta),
            chart_trend: Style::default().fg(Color::Blue),
            chart_bar: Style::default().fg(Color::Blue),
            chart_bar_value: Style::default().fg(Color::White).bg(Color::Blue),
            chart_axis: Style::default().fg(Color::DarkGray),
            sector_palette: [
                Color::Magenta,
                Color::Blue,
                Color::Green,
                Color::Red,
                Color::DarkGray,
            ],

            table_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::Gray),
            table_row: Style::default().fg(Color::Black),
            table_row_alt: Style::default().fg(Color::DarkGray),
        }
    }

    /// Classic theme restricted to the basic ANSI palette, without bold.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            header_sparkle: Style::default().fg(Color::White),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default().fg(Color::White),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),

            info: Style::default().fg(Color::Cyan),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            sidebar_title: Style::default().fg(Color::Cyan),
            sidebar_item: Style::default().fg(Color::White),
            sidebar_selected: Style::default().fg(Color::Black).bg(Color::White),
            border: Style::default().fg(Color::DarkGray),
            border_focused: Style::default().fg(Color::White),

            metric_label: Style::default().fg(Color::Gray),
            metric_value: Style::default().fg(Color::White),

            chart_line: Style::default().fg(Color::Green),
            chart_trend: Style::default().fg(Color::Cyan),
            chart_bar: Style::default().fg(Color::Green),
            chart_bar_value: Style::default().fg(Color::Black).bg(Color::Green),
            chart_axis: Style::default().fg(Color::White),
            sector_palette: [
                Color::Green,
                Color::Cyan,
                Color::Yellow,
                Color::Magenta,
                Color::Red,
            ],

            table_header: Style::default().fg(Color::Cyan),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
        }
    }

    /// Purple palette with an orange accent for markers and bar values.
    pub fn purple() -> Self {
        Self {
            header: Style::default().fg(PURPLE).add_modifier(Modifier::BOLD),
            header_sparkle: Style::default().fg(ORANGE),
            separator: Style::default().fg(THISTLE),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(LAVENDER),
            bold: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(THISTLE),
            value: Style::default().fg(ORANGE).add_modifier(Modifier::BOLD),

            info: Style::default().fg(LAVENDER),
            warning: Style::default().fg(ORANGE),
            error: Style::default().fg(Color::Red),

            sidebar_title: Style::default().fg(MAUVE).add_modifier(Modifier::BOLD),
            sidebar_item: Style::default().fg(THISTLE),
            sidebar_selected: Style::default()
                .fg(Color::White)
                .bg(PURPLE)
                .add_modifier(Modifier::BOLD),
            border: Style::default().fg(AMETHYST),
            border_focused: Style::default().fg(ORANGE),

            metric_label: Style::default().fg(LAVENDER),
            metric_value: Style::default().fg(ORANGE).add_modifier(Modifier::BOLD),

            chart_line: Style::default().fg(AMETHYST),
            chart_trend: Style::default().fg(LAVENDER),
            chart_bar: Style::default().fg(AMETHYST),
            chart_bar_value: Style::default().fg(Color::Black).bg(ORANGE),
            chart_axis: Style::default().fg(THISTLE),
            sector_palette: [PURPLE, AMETHYST, LAVENDER, THISTLE, MAUVE],

            table_header: Style::default().fg(MAUVE).add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(AMETHYST),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(THISTLE),
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            BackgroundType::Dark => Self::dark(),
        }
    }

    /// Construct a theme by name. Falls back to `auto_detect` for unknown
    /// names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            "purple" => Self::purple(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Foreground style for the `index`-th sector slice.
    pub fn sector_style(&self, index: usize) -> Style {
        let color = self.sector_palette[index % self.sector_palette.len()];
        Style::default().fg(color)
    }

    /// Border style of a panel, brighter when it has keyboard focus.
    pub fn panel_border(&self, focused: bool) -> Style {
        if focused {
            self.border_focused
        } else {
            self.border
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_colorfgbg() {
        assert_eq!(parse_colorfgbg("15;0"), Some(BackgroundType::Dark));
        assert_eq!(parse_colorfgbg("0;15"), Some(BackgroundType::Light));
        assert_eq!(parse_colorfgbg("0;default;7"), Some(BackgroundType::Light));
        assert_eq!(parse_colorfgbg("garbage"), None);
        assert_eq!(parse_colorfgbg(""), None);
    }

    #[test]
    fn test_dark_theme_creation() {
        let t = Theme::dark();
        assert_eq!(t.header.fg, Some(Color::Cyan));
        assert_eq!(t.error.fg, Some(Color::Red));
        assert_eq!(t.chart_line.fg, Some(Color::Magenta));
        assert_eq!(t.sidebar_selected.bg, Some(Color::Cyan));
    }

    #[test]
    fn test_light_theme_creation() {
        let t = Theme::light();
        assert_eq!(t.header.fg, Some(Color::Blue));
        assert_eq!(t.text.fg, Some(Color::Black));
        assert_eq!(t.table_row.fg, Some(Color::Black));
    }

    #[test]
    fn test_classic_theme_has_no_bold() {
        let t = Theme::classic();
        assert!(!t.bold.add_modifier.contains(Modifier::BOLD));
        assert!(!t.header.add_modifier.contains(Modifier::BOLD));
        assert!(!t.metric_value.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_purple_theme_palette() {
        let t = Theme::purple();
        assert_eq!(t.sector_palette[0], Color::Rgb(0x80, 0x00, 0x80));
        assert_eq!(t.sector_palette[4], Color::Rgb(0xE6, 0xB0, 0xFA));
        // Orange accent on bar values and metric values.
        assert_eq!(t.chart_bar_value.bg, Some(Color::Rgb(0xFF, 0xA5, 0x00)));
        assert_eq!(t.metric_value.fg, Some(Color::Rgb(0xFF, 0xA5, 0x00)));
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Theme::from_name("dark").header.fg, Some(Color::Cyan));
        assert_eq!(Theme::from_name("light").header.fg, Some(Color::Blue));
        assert_eq!(
            Theme::from_name("purple").header.fg,
            Some(Color::Rgb(0x80, 0x00, 0x80))
        );
        let classic = Theme::from_name("classic");
        assert!(!classic.header.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_from_name_unknown_falls_back() {
        let t = Theme::from_name("neon");
        assert!(t.header.fg.is_some());
    }

    #[test]
    fn test_sector_style_cycles_palette() {
        let t = Theme::dark();
        assert_eq!(t.sector_style(0).fg, Some(Color::Magenta));
        assert_eq!(t.sector_style(5).fg, Some(Color::Magenta));
        assert_eq!(t.sector_style(6).fg, Some(Color::Cyan));
    }

    #[test]
    fn test_panel_border() {
        let t = Theme::dark();
        assert_eq!(t.panel_border(true).fg, Some(Color::Cyan));
        assert_eq!(t.panel_border(false).fg, Some(Color::DarkGray));
    }
}
