//! Answer input field.

use ratatui::{
    Frame,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};

use crate::ui::app::App;

impl App {
    pub(in crate::ui) fn draw_input(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let border_color = if self.input.is_empty() || self.input == "-" {
            Color::Gray
        } else {
            Color::Green
        };

        let text = format!("{}▌", self.input);

        f.render_widget(
            Paragraph::new(text).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border_color))
                    .title("Answer | Enter = submit | Esc = leave round"),
            ),
            area,
        );
    }
}
