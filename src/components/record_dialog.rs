//! Record detail dialog
//!
//! Shows every field of one record, including fields that have no column.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::table::{FieldValue, Row};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Scrollable field listing for a record
#[derive(Default)]
pub struct RecordDetailDialog {
    pub scroll_offset: usize,
}

impl RecordDetailDialog {
    pub fn draw_with_row(&mut self, frame: &mut Frame, area: Rect, row: &Row) -> Result<()> {
        let popup_area = centered_popup(area, 70, area.height.saturating_sub(6));
        frame.render_widget(Clear, popup_area);

        let lines = field_lines(row);
        let visible_height = popup_area.height.saturating_sub(2) as usize;
        let max_scroll = lines.len().saturating_sub(visible_height);
        self.scroll_offset = self.scroll_offset.min(max_scroll);

        let title = match row.id() {
            Some(id) => format!(" Record {} ", id),
            None => " Record ".to_string(),
        };

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
                    .title(title)
                    .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            )
            .wrap(Wrap { trim: false })
            .scroll((self.scroll_offset as u16, 0));

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}

impl Component for RecordDetailDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => Some(Action::CloseModal),
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll_offset = self.scroll_offset.saturating_add(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawn through draw_with_row, which needs the record
        Ok(())
    }
}

fn field_lines(row: &Row) -> Vec<Line<'static>> {
    let width = row.fields().map(|(k, _)| k.chars().count()).max().unwrap_or(0);

    row.fields()
        .map(|(key, value)| {
            let (text, style) = match value {
                FieldValue::Null => ("—".to_string(), Style::default().fg(Color::DarkGray)),
                other => (other.to_string(), Style::default().fg(Color::White)),
            };
            Line::from(vec![
                Span::styled(
                    format!(" {:width$}  ", key, width = width),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::styled(text, style),
            ])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_lines_pad_keys() {
        let row = Row::new()
            .with("id", FieldValue::Number(3.0))
            .with("payee", FieldValue::Text("Acme".to_string()))
            .with("memo", FieldValue::Null);

        let text: Vec<String> = field_lines(&row)
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert_eq!(text, vec![" id     3", " memo   —", " payee  Acme"]);
    }
}
