//! Table component for module datasets
//!
//! Wraps one `TableEngine` and its row cursor. Renders the current page
//! with sort indicators in the header and a "Showing x–y of n" footer.

use crate::action::Action;
use crate::component::Component;
use crate::model::navigation::Module;
use crate::table::{Activation, Column, DerivedView, TableEngine, TableView};
use anyhow::Result;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row as TableRow, Table, TableState},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Widest a column may grow before cells are truncated
const MAX_COLUMN_WIDTH: usize = 40;

/// A module's table: engine plus cursor position on the current page
pub struct TableComponent {
    pub module: Module,
    pub engine: TableEngine<Action>,
    /// Highlighted row, as an index into the current page
    pub cursor: usize,
}

impl TableComponent {
    pub fn new(module: Module, engine: TableEngine<Action>) -> Self {
        Self {
            module,
            engine,
            cursor: 0,
        }
    }

    /// Rows on the current page
    pub fn page_len(&self) -> usize {
        self.engine.derive().page_rows.len()
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.page_len().saturating_sub(1));
    }

    /// Move to the next larger (`grow`) or smaller page size
    fn step_page_size(&mut self, grow: bool) {
        let mut sizes = self.engine.page_sizes().to_vec();
        sizes.sort_unstable();
        let current = self.engine.rows_per_page();
        let next = if grow {
            sizes.iter().copied().find(|&s| s > current)
        } else {
            sizes.iter().copied().rev().find(|&s| s < current)
        };
        if let Some(size) = next {
            self.engine.set_rows_per_page(size);
            self.cursor = 0;
        }
    }

    fn set_search_term(&mut self, term: &str) {
        self.engine.set_search_term(term);
        self.cursor = 0;
    }
}

impl Component for TableComponent {
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::NextRow => {
                let last = self.page_len().saturating_sub(1);
                self.cursor = (self.cursor + 1).min(last);
            }
            Action::PrevRow => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            Action::NextPage => {
                self.engine.next_page();
                self.cursor = 0;
            }
            Action::PrevPage => {
                self.engine.prev_page();
                self.cursor = 0;
            }
            Action::FirstPage => {
                self.engine.set_page(1);
                self.cursor = 0;
            }
            Action::LastPage => {
                self.engine.set_page(self.engine.total_pages() as i64);
                self.cursor = 0;
            }
            Action::GrowPageSize => self.step_page_size(true),
            Action::ShrinkPageSize => self.step_page_size(false),
            Action::SortColumn(index) => {
                if let Some(key) = self.engine.columns().get(index).map(|c| c.key.clone()) {
                    self.engine.request_sort(&key);
                    self.clamp_cursor();
                }
            }
            Action::SearchInput(c) => {
                let mut term = self.engine.search_term().to_string();
                term.push(c);
                self.set_search_term(&term);
            }
            Action::SearchBackspace => {
                let mut term = self.engine.search_term().to_string();
                term.pop();
                self.set_search_term(&term);
            }
            Action::ClearSearch => self.set_search_term(""),
            Action::ActivateRow => {
                return Ok(self.engine.activate(Activation::Row {
                    page_index: self.cursor,
                }));
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        self.clamp_cursor();

        let title = format!(" {} ", self.module.name());
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .border_style(Style::default().fg(Color::DarkGray));

        match self.engine.view() {
            TableView::Loading => {
                let placeholder = Paragraph::new(vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        "Loading records...",
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    )),
                ])
                .alignment(Alignment::Center)
                .block(block);
                frame.render_widget(placeholder, area);
            }
            TableView::Empty { message } => {
                let empty = Paragraph::new(vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        message.to_string(),
                        Style::default().fg(Color::DarkGray),
                    )),
                ])
                .alignment(Alignment::Center)
                .block(block);
                frame.render_widget(empty, area);
            }
            TableView::Rows(view) => {
                let inner = block.inner(area);
                frame.render_widget(block, area);

                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(1), Constraint::Length(1)])
                    .split(inner);

                if view.page_rows.is_empty() {
                    let no_match = Paragraph::new(Line::from(Span::styled(
                        format!("No records match \"{}\"", self.engine.search_term()),
                        Style::default().fg(Color::Yellow),
                    )))
                    .alignment(Alignment::Center);
                    frame.render_widget(no_match, chunks[0]);
                } else {
                    let table = build_table(&self.engine, &view);
                    let mut state = TableState::default().with_selected(Some(self.cursor));
                    frame.render_stateful_widget(table, chunks[0], &mut state);
                }

                let footer = Paragraph::new(Line::from(Span::styled(
                    summary_text(&view),
                    Style::default().fg(Color::Yellow),
                )))
                .alignment(Alignment::Right);
                frame.render_widget(footer, chunks[1]);
            }
        }

        Ok(())
    }
}

/// Header label with its sort shortcut and current sort arrow
pub fn header_label<A>(engine: &TableEngine<A>, index: usize, column: &Column) -> String {
    let shortcut = if index < 9 && column.sortable {
        format!("{}:", index + 1)
    } else {
        String::new()
    };
    let sort = engine.sort();
    let arrow = if sort.is_sorted_by(&column.key) {
        format!(" {}", sort.direction.arrow())
    } else {
        String::new()
    };
    format!("{}{}{}", shortcut, column.header, arrow)
}

/// Footer text, e.g. "Showing 11–20 of 47 · Page 2/5 · 10 per page"
pub fn summary_text(view: &DerivedView) -> String {
    if view.total_filtered == 0 {
        return "No matching records".to_string();
    }
    match view.rows_per_page {
        Some(per_page) => format!(
            "Showing {}–{} of {} · Page {}/{} · {} per page ",
            view.range_start,
            view.range_end,
            view.total_filtered,
            view.current_page,
            view.total_pages,
            per_page
        ),
        None => format!("Showing all {} ", view.total_filtered),
    }
}

/// Cut `text` to `width` display columns, marking the cut with "…"
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Style for a cell given its column's class name and text
fn cell_style(class_name: Option<&str>, text: &str) -> Style {
    match class_name {
        Some("amount") => Style::default().fg(Color::Cyan),
        Some("status") => match text {
            "Draft" | "Pending" => Style::default().fg(Color::Yellow),
            "Posted" | "Approved" | "Released" => Style::default().fg(Color::Green),
            "Rejected" | "Cancelled" => Style::default().fg(Color::Red),
            _ => Style::default().fg(Color::White),
        },
        _ => Style::default().fg(Color::White),
    }
}

fn build_table<'a>(engine: &TableEngine<Action>, view: &DerivedView) -> Table<'a> {
    let columns = engine.columns();
    let headers: Vec<String> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| header_label(engine, i, c))
        .collect();

    let cells: Vec<Vec<String>> = view
        .page_rows
        .iter()
        .map(|page_row| {
            columns
                .iter()
                .map(|c| c.display(page_row.row.get(&c.key)))
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.width());
        }
    }
    for width in &mut widths {
        *width = (*width).min(MAX_COLUMN_WIDTH);
    }

    let header = TableRow::new(headers.into_iter().map(|h| {
        Cell::from(h).style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    }))
    .height(1);

    let rows: Vec<TableRow> = cells
        .into_iter()
        .map(|row| {
            TableRow::new(row.into_iter().enumerate().map(|(i, text)| {
                let column = &columns[i];
                let style = cell_style(column.class_name.as_deref(), &text);
                let text = truncate(&text, widths[i]);
                let line = if column.class_name.as_deref() == Some("amount") {
                    Line::from(text).alignment(Alignment::Right)
                } else {
                    Line::from(text)
                };
                Cell::from(line).style(style)
            }))
        })
        .collect();

    let constraints: Vec<Constraint> = widths
        .iter()
        .map(|w| Constraint::Length(*w as u16))
        .collect();

    Table::new(rows, constraints)
        .header(header)
        .column_spacing(2)
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ")
}
