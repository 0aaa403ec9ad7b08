//! Style selector widget

use cite_core::CitationStyle;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, List, ListItem, Widget},
};

/// The six styles, with the selected one highlighted
pub struct StyleList {
    selected: Option<CitationStyle>,
}

impl StyleList {
    pub fn new(selected: Option<CitationStyle>) -> Self {
        Self { selected }
    }

    /// Height needed to show every style inside a border.
    pub const HEIGHT: u16 = CitationStyle::ALL.len() as u16 + 2;
}

impl Widget for StyleList {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let items: Vec<ListItem> = CitationStyle::ALL
            .iter()
            .enumerate()
            .map(|(i, style)| {
                let item_style = if Some(*style) == self.selected {
                    Style::default().bg(Color::Blue).fg(Color::White)
                } else {
                    Style::default()
                };
                ListItem::new(format!("{} {}", i + 1, style.display_name())).style(item_style)
            })
            .collect();

        List::new(items)
            .block(Block::default().title("Style").borders(Borders::ALL))
            .render(area, buf);
    }
}
