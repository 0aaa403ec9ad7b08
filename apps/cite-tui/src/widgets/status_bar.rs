//! Status bar widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::mode::Mode;

/// One-line bar showing the mode and the selected style
pub struct StatusBar<'a> {
    mode: Mode,
    style_id: &'a str,
    style_label: Option<&'a str>,
}

impl<'a> StatusBar<'a> {
    pub fn new(mode: Mode, style_id: &'a str, style_label: Option<&'a str>) -> Self {
        Self {
            mode,
            style_id,
            style_label,
        }
    }

    /// Get the display color for a mode.
    pub fn mode_color(mode: Mode) -> Color {
        match mode {
            Mode::Normal => Color::Blue,
            Mode::Insert => Color::Green,
            Mode::Dialog => Color::Magenta,
        }
    }

    fn line(&self) -> Line<'a> {
        let style = match self.style_label {
            Some(label) => Span::styled(
                format!(" {label} "),
                Style::default().fg(Color::Cyan),
            ),
            None => Span::styled(
                format!(" {} (unsupported) ", self.style_id),
                Style::default().fg(Color::Red),
            ),
        };

        Line::from(vec![
            Span::styled(
                format!("[{}]", self.mode.short_code()),
                Style::default()
                    .fg(Color::White)
                    .bg(Self::mode_color(self.mode))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" cite |"),
            style,
            Span::raw("| Press ? for help "),
        ])
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.line())
            .style(Style::default().bg(Color::DarkGray))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(bar: &StatusBar) -> String {
        bar.line().spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_mode_colors() {
        assert_eq!(StatusBar::mode_color(Mode::Normal), Color::Blue);
        assert_eq!(StatusBar::mode_color(Mode::Insert), Color::Green);
        assert_eq!(StatusBar::mode_color(Mode::Dialog), Color::Magenta);
    }

    #[test]
    fn test_supported_style_label() {
        let bar = StatusBar::new(Mode::Insert, "mla", Some("MLA"));
        assert_eq!(text(&bar), "[INS] cite | MLA | Press ? for help ");
    }

    #[test]
    fn test_unsupported_style_label() {
        let bar = StatusBar::new(Mode::Normal, "turabian", None);
        assert!(text(&bar).contains("turabian (unsupported)"));
    }
}
