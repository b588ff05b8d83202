use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{progress::ProgressTotals, ui::app::App};

impl App {
    pub(in crate::ui) fn draw_end(
        &self,
        f: &mut Frame,
        area: Rect,
        progress: &ProgressTotals,
        message: &str,
    ) {
        let mut text = vec![
            Line::from(""),
            Line::from(Span::styled(
                message.to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!(
                "Correct answers: {} of {} ({:.1}%)",
                progress.correct_answers,
                progress.total_attempts,
                progress.accuracy()
            )),
            Line::from(""),
        ];

        if let Some(ref difficulty) = self.last_difficulty {
            text.push(Line::from(format!("r: play {difficulty} again | Enter: home")));
        } else {
            text.push(Line::from("Enter: home"));
        }

        f.render_widget(
            Paragraph::new(text).block(Block::default().borders(Borders::ALL).title("Time's up")),
            area,
        );
    }
}
