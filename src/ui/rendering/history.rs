//! Round history table.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
};

use crate::{
    db::HistoryRecord,
    ui::{app::App, handlers::PAGE_SIZE},
};

impl App {
    pub(in crate::ui) fn draw_history(&self, f: &mut Frame, area: Rect, records: &[HistoryRecord]) {
        if records.is_empty() {
            let text = vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No rounds recorded yet",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from("Finish a round and it will show up here."),
            ];

            let paragraph = Paragraph::new(text)
                .block(Block::default().borders(Borders::ALL).title("Round History"));

            f.render_widget(paragraph, area);
            return;
        }

        let total_pages = records.len().div_ceil(PAGE_SIZE);
        let page = self.history_page.min(total_pages.saturating_sub(1));
        let start_index = page * PAGE_SIZE;
        let page_records = &records[start_index..(start_index + PAGE_SIZE).min(records.len())];

        let rows: Vec<Row> = page_records
            .iter()
            .map(|record| {
                let date = record
                    .recorded_at
                    .with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M")
                    .to_string();
                let accuracy = record.totals().accuracy();

                let style = if record.total_attempts == 0 {
                    Style::default().fg(Color::Gray)
                } else if accuracy >= 80.0 {
                    Style::default().fg(Color::Green)
                } else if accuracy < 50.0 {
                    Style::default().fg(Color::Red)
                } else {
                    Style::default()
                };

                Row::new(vec![
                    record.id.to_string(),
                    date,
                    record.difficulty.clone(),
                    record.correct_answers.to_string(),
                    record.total_attempts.to_string(),
                    format!("{accuracy:.0}%"),
                ])
                .style(style)
            })
            .collect();

        let title = format!(
            "Round History - Page {}/{} (Showing {}-{} of {}) | PgUp/PgDn: Page | Enter/Esc: Home",
            page + 1,
            total_pages,
            start_index + 1,
            start_index + page_records.len(),
            records.len()
        );

        let table = Table::new(
            rows,
            [
                Constraint::Length(6),  // Id
                Constraint::Length(16), // Date
                Constraint::Length(10), // Difficulty
                Constraint::Length(8),  // Correct
                Constraint::Length(9),  // Attempts
                Constraint::Length(9),  // Accuracy
            ],
        )
        .header(
            Row::new(vec!["#", "Date", "Level", "Correct", "Attempts", "Accuracy"])
                .style(Style::default().add_modifier(Modifier::BOLD))
                .bottom_margin(1),
        )
        .block(Block::default().borders(Borders::ALL).title(title));

        f.render_widget(table, area);
    }
}
