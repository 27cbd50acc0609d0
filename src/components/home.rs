//! Home component - Main application screen
//!
//! Displays one tab per permitted module, the search line, the active
//! module's table, a status line and the key help bar.

use crate::action::Action;
use crate::component::Component;
use crate::components::{calculate_main_layout, TableComponent};
use crate::model::domain::DatasetStatus;
use crate::model::navigation::{Module, Role};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

// ═══════════════════════════════════════════════════════════════════════════════
// Home Component
// ═══════════════════════════════════════════════════════════════════════════════

/// Home component for the main application view
/// Owns one table per module and routes table actions to the active one
pub struct HomeComponent {
    /// Module tables in tab order
    pub tables: Vec<TableComponent>,

    /// Index of the active tab
    pub active: usize,

    /// Whether search mode is active
    pub search_mode: bool,
}

impl HomeComponent {
    pub fn new(tables: Vec<TableComponent>) -> Self {
        Self {
            tables,
            active: 0,
            search_mode: false,
        }
    }

    pub fn active_table(&self) -> Option<&TableComponent> {
        self.tables.get(self.active)
    }

    pub fn active_table_mut(&mut self) -> Option<&mut TableComponent> {
        self.tables.get_mut(self.active)
    }

    pub fn active_module(&self) -> Option<Module> {
        self.active_table().map(|t| t.module)
    }

    pub fn table_mut(&mut self, module: Module) -> Option<&mut TableComponent> {
        self.tables.iter_mut().find(|t| t.module == module)
    }

    pub fn next_tab(&mut self) {
        if !self.tables.is_empty() {
            self.active = (self.active + 1) % self.tables.len();
        }
    }

    pub fn previous_tab(&mut self) {
        if !self.tables.is_empty() {
            self.active = (self.active + self.tables.len() - 1) % self.tables.len();
        }
    }

    fn handle_search_key_event(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => Some(Action::ExitSearchMode),
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Char(c) => Some(Action::SearchInput(c)),
            _ => None,
        }
    }

    fn has_search_term(&self) -> bool {
        self.active_table()
            .is_some_and(|t| !t.engine.search_term().is_empty())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for HomeComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.search_mode {
            return Ok(self.handle_search_key_event(key));
        }

        let action = match key.code {
            // Navigation
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextRow),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevRow),
            KeyCode::Tab => Some(Action::NextTab),
            KeyCode::BackTab => Some(Action::PrevTab),

            // Pagination
            KeyCode::Char('n') | KeyCode::Right | KeyCode::PageDown => Some(Action::NextPage),
            KeyCode::Char('p') | KeyCode::Left | KeyCode::PageUp => Some(Action::PrevPage),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstPage),
            KeyCode::Char('G') | KeyCode::End => Some(Action::LastPage),
            KeyCode::Char('+') | KeyCode::Char('=') => Some(Action::GrowPageSize),
            KeyCode::Char('-') => Some(Action::ShrinkPageSize),

            // Sorting: 1-9 act as header clicks
            KeyCode::Char(c @ '1'..='9') => {
                Some(Action::SortColumn(c as usize - '1' as usize))
            }

            // Search
            KeyCode::Char('/') => Some(Action::EnterSearchMode),
            KeyCode::Esc if self.has_search_term() => Some(Action::ClearSearch),

            // Rows
            KeyCode::Enter => Some(Action::ActivateRow),
            KeyCode::Char('a') => Some(Action::OpenRowActions),
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::ReloadDataset)
            }
            KeyCode::Char('R') => Some(Action::ReloadDataset),

            // Modals
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            KeyCode::Char('?') => Some(Action::OpenHelp),

            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::NextTab => self.next_tab(),
            Action::PrevTab => self.previous_tab(),
            Action::EnterSearchMode => self.search_mode = true,
            Action::ExitSearchMode => self.search_mode = false,
            _ => {
                if let Some(table) = self.active_table_mut() {
                    return table.update(action);
                }
            }
        }
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing is done through draw_home_screen which takes full context
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering Functions
// ═══════════════════════════════════════════════════════════════════════════════

/// Context needed for rendering the home screen
pub struct HomeRenderContext<'a> {
    pub role: Role,
    pub dataset_status: Option<&'a DatasetStatus>,
    pub error: Option<&'a str>,
    pub status_message: Option<&'a str>,
}

/// Draw the home screen
pub fn draw_home_screen(
    frame: &mut Frame,
    area: Rect,
    home: &mut HomeComponent,
    ctx: &HomeRenderContext,
) -> Result<()> {
    let layout = calculate_main_layout(area);

    render_tabs(frame, layout.tabs, home);
    render_search_line(frame, layout.search, home);

    match home.active_table_mut() {
        Some(table) => table.draw(frame, layout.table)?,
        None => {
            let paragraph = Paragraph::new(Line::from(Span::styled(
                format!("No modules are available to the {:?} role", ctx.role),
                Style::default().fg(Color::Yellow),
            )))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
            frame.render_widget(paragraph, layout.table);
        }
    }

    render_status_bar(frame, layout.status, ctx);
    render_help_bar(frame, layout.help, home);

    Ok(())
}

fn render_tabs(frame: &mut Frame, area: Rect, home: &HomeComponent) {
    let titles: Vec<String> = home
        .tables
        .iter()
        .map(|t| {
            if t.engine.is_loading() {
                format!("{} (…)", t.module.name())
            } else {
                format!("{} ({})", t.module.name(), t.engine.rows().len())
            }
        })
        .collect();

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::BOTTOM))
        .select(home.active)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

fn render_search_line(frame: &mut Frame, area: Rect, home: &HomeComponent) {
    let term = home
        .active_table()
        .map(|t| t.engine.search_term())
        .unwrap_or_default();

    let line = if home.search_mode {
        Line::from(vec![
            Span::styled(" Search: ", Style::default().fg(Color::Cyan)),
            Span::styled(
                format!("{}_", term),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ])
    } else if !term.is_empty() {
        Line::from(vec![
            Span::styled(" Filter: ", Style::default().fg(Color::Cyan)),
            Span::styled(term.to_string(), Style::default().fg(Color::White)),
            Span::styled("  (Esc clears)", Style::default().fg(Color::DarkGray)),
        ])
    } else {
        Line::from(Span::styled(
            " Press / to search",
            Style::default().fg(Color::DarkGray),
        ))
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, ctx: &HomeRenderContext) {
    let mut spans = vec![
        Span::styled(
            format!(" {:?} ", ctx.role),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
    ];

    if let Some(status) = ctx.dataset_status {
        let color = match status {
            DatasetStatus::Loading => Color::Yellow,
            DatasetStatus::Loaded { .. } => Color::DarkGray,
            DatasetStatus::Failed(_) => Color::Red,
        };
        spans.push(Span::styled(status.describe(), Style::default().fg(color)));
    }

    if let Some(error) = ctx.error {
        spans.push(Span::styled(
            format!("  Error: {} ", error),
            Style::default().fg(Color::Red),
        ));
    }

    if let Some(status) = ctx.status_message {
        spans.push(Span::styled(
            format!("  {} ", status),
            Style::default().fg(Color::Yellow),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn key_span(key: &str, color: Color) -> Span<'static> {
    Span::styled(
        format!(" {} ", key),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

fn render_help_bar(frame: &mut Frame, area: Rect, home: &HomeComponent) {
    let help_spans = if home.search_mode {
        vec![
            key_span("Esc/Enter", Color::Yellow),
            Span::raw("Done  "),
            key_span("Backspace", Color::Cyan),
            Span::raw("Delete"),
        ]
    } else {
        vec![
            key_span("q", Color::Yellow),
            Span::raw("Quit "),
            key_span("Tab", Color::Cyan),
            Span::raw("Module "),
            key_span("n/p", Color::Cyan),
            Span::raw("Page "),
            key_span("1-9", Color::Cyan),
            Span::raw("Sort "),
            key_span("+/-", Color::Cyan),
            Span::raw("Page size "),
            key_span("/", Color::Cyan),
            Span::raw("Search "),
            key_span("Enter", Color::Green),
            Span::raw("Open "),
            key_span("a", Color::Green),
            Span::raw("Actions "),
            key_span("R", Color::Magenta),
            Span::raw("Reload "),
            key_span("?", Color::White),
            Span::raw("Help"),
        ]
    };

    let paragraph = Paragraph::new(Line::from(help_spans))
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::TOP).border_style(Style::default().fg(Color::DarkGray)));
    frame.render_widget(paragraph, area);
}
