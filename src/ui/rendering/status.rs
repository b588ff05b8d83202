use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    routes::View,
    ui::{app::App, types::NoticeKind},
};

impl App {
    pub(in crate::ui) fn draw_status(&self, f: &mut Frame, area: Rect) {
        let page = match &self.view {
            View::Home { .. } => "Pick a difficulty",
            View::Game { .. } => "Round in progress",
            View::End { .. } => "Round over",
            View::History { .. } => "History",
        };

        let (text, color) = match &self.notice {
            Some(notice) => {
                let color = match notice.kind {
                    NoticeKind::Info => Color::Green,
                    NoticeKind::Error => Color::Red,
                };
                (format!("{page} | {}", notice.text), color)
            }
            None => (
                format!("{page} | Esc: Home | Ctrl+R: History | Ctrl+Q: Quit"),
                Color::White,
            ),
        };

        f.render_widget(
            Paragraph::new(text)
                .style(Style::default().fg(color))
                .block(Block::default().borders(Borders::ALL).title("Arith Sprint")),
            area,
        );
    }
}
