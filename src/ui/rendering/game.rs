use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};

use crate::{routes::View, ui::app::App};

impl App {
    pub(in crate::ui) fn draw_game(&self, f: &mut Frame, area: Rect) {
        let View::Game {
            difficulty,
            question,
            progress,
            ..
        } = &self.view
        else {
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Countdown
                Constraint::Min(5),    // Question and score
                Constraint::Length(3), // Input
            ])
            .split(area);

        let remaining = self.time_remaining().unwrap_or(0.0);
        let limit = self
            .router
            .tracker()
            .catalog()
            .lookup(difficulty)
            .map(|p| f64::from(p.time_limit_secs))
            .unwrap_or(remaining.max(1.0));
        let ratio = (remaining / limit).clamp(0.0, 1.0);
        let color = if remaining < 10.0 { Color::Red } else { Color::Green };

        f.render_widget(
            Gauge::default()
                .block(Block::default().borders(Borders::ALL).title("Time left"))
                .gauge_style(Style::default().fg(color))
                .ratio(ratio)
                .label(format!("{remaining:.1}s")),
            chunks[0],
        );

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("{question} = ?"),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!(
                "Correct: {} / {} ({:.0}%)",
                progress.correct_answers,
                progress.total_attempts,
                progress.accuracy()
            )),
        ];

        f.render_widget(
            Paragraph::new(text).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Round: {difficulty}")),
            ),
            chunks[1],
        );

        self.draw_input(f, chunks[2]);
    }
}
