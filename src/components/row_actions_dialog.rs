//! Row actions dialog component
//!
//! Lists the actions resolved for the highlighted row. Selection lives
//! in `Modal::RowActions`; this component mirrors it for rendering.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::table::RowAction;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

/// One menu entry, copied out of a resolved `RowAction`
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub icon: String,
    pub title: String,
    pub danger: bool,
}

impl<A> From<&RowAction<A>> for MenuItem {
    fn from(action: &RowAction<A>) -> Self {
        Self {
            icon: action.icon.clone(),
            title: action.title.clone(),
            danger: action.class_name.as_deref() == Some("danger"),
        }
    }
}

/// Action menu for one row
#[derive(Default)]
pub struct RowActionsDialog {
    pub record_label: String,
    pub items: Vec<MenuItem>,
    pub list_state: ListState,
}

impl RowActionsDialog {
    /// Load the menu for a row, selecting the first entry
    pub fn set_items(&mut self, record_label: String, items: Vec<MenuItem>) {
        self.record_label = record_label;
        self.items = items;
        self.list_state.select(Some(0));
    }

    pub fn select(&mut self, index: usize) {
        self.list_state.select(Some(index));
    }
}

impl Component for RowActionsDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('a') => Some(Action::CloseModal),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::ModalDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::ModalUp),
            KeyCode::Enter => Some(Action::ConfirmModal),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let height = self.items.len() as u16 + 2;
        let popup_area = centered_popup(area, 36, height);

        frame.render_widget(Clear, popup_area);

        let items: Vec<ListItem> = self
            .items
            .iter()
            .map(|item| {
                let color = if item.danger { Color::Red } else { Color::White };
                ListItem::new(Line::from(vec![
                    Span::styled(format!(" {} ", item.icon), Style::default().fg(Color::Yellow)),
                    Span::styled(item.title.clone(), Style::default().fg(color)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Green))
                    .title(format!(" {} ", self.record_label))
                    .title_style(
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    ),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶");

        frame.render_stateful_widget(list, popup_area, &mut self.list_state);
        Ok(())
    }
}
