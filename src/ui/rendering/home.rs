//! Difficulty picker.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem},
};

use crate::ui::app::App;

impl App {
    pub(in crate::ui) fn draw_home(&self, f: &mut Frame, area: Rect, difficulties: &[String]) {
        let catalog = self.router.tracker().catalog();

        let items: Vec<ListItem> = difficulties
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let detail = catalog
                    .lookup(name)
                    .map(|p| {
                        let ops: Vec<String> =
                            p.operations.iter().map(ToString::to_string).collect();
                        format!(
                            "{}s, {}, operands {}..={}",
                            p.time_limit_secs,
                            ops.join(" + "),
                            p.min,
                            p.max
                        )
                    })
                    .unwrap_or_default();

                let marker = if i == self.selected { ">" } else { " " };
                let style = if i == self.selected {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };

                ListItem::new(format!("{marker} {}. {name:<8} {detail}", i + 1)).style(style)
            })
            .collect();

        f.render_widget(
            List::new(items).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Difficulty | Up/Down + Enter or 1-9 to start"),
            ),
            area,
        );
    }
}
