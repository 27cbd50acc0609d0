//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that delegates event handling and rendering to child components.
//! It owns the dataset fetcher and applies record changes that row actions
//! ask for; table behaviour itself lives in the engines.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    draw_home_screen, ConfirmDialog, HelpDialog, HomeComponent, HomeRenderContext, MenuItem,
    RecordDetailDialog, RowActionsDialog, TableComponent,
};
use crate::config::Config;
use crate::model::domain::{DatasetStatus, DomainState};
use crate::model::modal::{Modal, ModalStack};
use crate::model::navigation::{permitted_modules, Module};
use crate::model::records::{
    actions_for, columns_for, empty_message_for, remove_record, set_record_status,
};
use crate::services::{DatasetFetcher, FetchResult};
use crate::table::{Activation, TableEngine, TableOptions};
use anyhow::Result;
use chrono::Local;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};
use std::path::PathBuf;

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    /// Domain state (dataset locations and load status)
    pub domain: DomainState,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Background dataset loads
    pub fetcher: DatasetFetcher,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Error message to display
    pub error: Option<String>,

    /// Status message to display
    pub status_message: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub home: HomeComponent,
    pub confirm_dialog: ConfirmDialog,
    pub row_actions_dialog: RowActionsDialog,
    pub record_dialog: RecordDetailDialog,
    pub help_dialog: HelpDialog,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    /// Build one table per module the configured role may open
    pub fn new(config: &Config, data_dir: PathBuf) -> Result<App> {
        let options = config.table_options();
        let domain = DomainState::new(data_dir, config.role);

        let mut tables = Vec::new();
        for module in permitted_modules(config.role) {
            tables.push(TableComponent::new(module, build_engine(module, &options)?));
        }
        log::info!(
            "starting as {:?} with modules {:?}",
            config.role,
            tables.iter().map(|t| t.module).collect::<Vec<_>>()
        );

        Ok(App {
            domain,
            modals: ModalStack::new(),
            fetcher: DatasetFetcher::new(),
            should_quit: false,
            error: None,
            status_message: None,
            home: HomeComponent::new(tables),
            confirm_dialog: ConfirmDialog::default(),
            row_actions_dialog: RowActionsDialog::default(),
            record_dialog: RecordDetailDialog::default(),
            help_dialog: HelpDialog::default(),
        })
    }

    /// Start loading every module's dataset
    pub fn load_all(&mut self) {
        let modules: Vec<Module> = self.home.tables.iter().map(|t| t.module).collect();
        for module in modules {
            self.load_dataset(module);
        }
    }

    /// Mark a module as loading and fetch its dataset in the background
    pub fn load_dataset(&mut self, module: Module) {
        if let Some(table) = self.home.table_mut(module) {
            table.engine.set_loading(true);
        }
        self.domain.datasets.insert(module, DatasetStatus::Loading);
        let path = self.domain.dataset_path(module);
        self.fetcher.spawn(module, path);
    }

    /// Hand finished fetches to their tables
    pub fn apply_fetch_results(&mut self, results: Vec<FetchResult>) {
        for result in results {
            let module = result.module;
            let Some(table) = self.home.table_mut(module) else {
                continue;
            };
            table.engine.set_loading(false);

            match result.rows {
                Ok(rows) => {
                    log::info!(
                        "loaded {} {} records in {}ms",
                        rows.len(),
                        module,
                        result.elapsed_ms
                    );
                    let count = rows.len();
                    table.engine.set_rows(rows);
                    self.domain.datasets.insert(
                        module,
                        DatasetStatus::Loaded {
                            at: Local::now(),
                            count,
                        },
                    );
                }
                Err(e) => {
                    log::error!("failed to load {}: {}", module, e);
                    self.domain
                        .datasets
                        .insert(module, DatasetStatus::Failed(e.clone()));
                    self.error = Some(format!("{}: {}", module, e));
                }
            }
        }
    }

    /// Apply an edit to a module's rows and hand the result back to its
    /// engine. Returns whether the edit found its record.
    fn edit_rows<F>(&mut self, module: Module, edit: F) -> bool
    where
        F: FnOnce(&mut Vec<crate::table::Row>) -> bool,
    {
        let Some(table) = self.home.table_mut(module) else {
            return false;
        };
        let mut rows = table.engine.rows().to_vec();
        if !edit(&mut rows) {
            return false;
        }
        let count = rows.len();
        table.engine.set_rows(rows);
        if let Some(DatasetStatus::Loaded { count: c, .. }) = self.domain.datasets.get_mut(&module)
        {
            *c = count;
        }
        true
    }

    /// Open the action menu for the highlighted row
    fn open_row_actions(&mut self) {
        let Some(table) = self.home.active_table() else {
            return;
        };
        let page_index = table.cursor;
        let actions = table.engine.actions_for(page_index);
        if actions.is_empty() {
            self.status_message = Some("No actions available for this record".to_string());
            return;
        }

        let label = table
            .engine
            .derive()
            .page_rows
            .get(page_index)
            .map(|r| format!("{} {}", table.module.name(), r.key))
            .unwrap_or_else(|| table.module.name().to_string());
        let items = actions.iter().map(MenuItem::from).collect();

        self.row_actions_dialog.set_items(label, items);
        self.modals.push(Modal::RowActions {
            page_index,
            selected_index: 0,
        });
    }

    fn move_row_action_selection(&mut self, down: bool) {
        let count = self.row_actions_dialog.items.len();
        if let Some(Modal::RowActions { selected_index, .. }) = self.modals.top_mut() {
            if down && *selected_index + 1 < count {
                *selected_index += 1;
            } else if !down && *selected_index > 0 {
                *selected_index -= 1;
            }
            self.row_actions_dialog.select(*selected_index);
        }
    }
}

/// Engine for one module's table
fn build_engine(module: Module, options: &TableOptions) -> Result<TableEngine<Action>> {
    let options = TableOptions {
        empty_message: empty_message_for(module),
        ..options.clone()
    };
    let engine = TableEngine::new(columns_for(module), options)?
        .with_actions(actions_for(module))
        .on_row_click(|row| Some(Action::OpenRecordDetail(row.clone())));
    Ok(engine)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match self.modals.top() {
            Some(Modal::Confirm { .. }) => self.confirm_dialog.handle_key_event(key),
            Some(Modal::RowActions { .. }) => self.row_actions_dialog.handle_key_event(key),
            Some(Modal::RecordDetail { .. }) => self.record_dialog.handle_key_event(key),
            Some(Modal::Help { .. }) => self.help_dialog.handle_key_event(key),
            None => self.home.handle_key_event(key),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => {
                let results = self.fetcher.poll();
                if !results.is_empty() {
                    self.apply_fetch_results(results);
                }
            }
            Action::ForceQuit => {
                self.should_quit = true;
            }
            Action::Resize(_, _) => {}

            // ─────────────────────────────────────────────────────────────────
            // Tables (delegate to HomeComponent)
            // ─────────────────────────────────────────────────────────────────
            Action::NextTab
            | Action::PrevTab
            | Action::NextRow
            | Action::PrevRow
            | Action::NextPage
            | Action::PrevPage
            | Action::FirstPage
            | Action::LastPage
            | Action::GrowPageSize
            | Action::ShrinkPageSize
            | Action::SortColumn(_)
            | Action::EnterSearchMode
            | Action::ExitSearchMode
            | Action::SearchInput(_)
            | Action::SearchBackspace
            | Action::ClearSearch
            | Action::ActivateRow => {
                self.status_message = None;
                return self.home.update(action);
            }

            Action::ReloadDataset => {
                if let Some(module) = self.home.active_module() {
                    self.error = None;
                    self.load_dataset(module);
                    self.status_message = Some(format!("Reloading {}...", module));
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Records
            // ─────────────────────────────────────────────────────────────────
            Action::OpenRowActions => self.open_row_actions(),
            Action::OpenRecordDetail(row) => {
                self.record_dialog.scroll_offset = 0;
                self.modals.push(Modal::RecordDetail {
                    row,
                    scroll_offset: 0,
                });
            }
            Action::SetRecordStatus { module, id, status } => {
                if self.edit_rows(module, |rows| set_record_status(rows, &id, &status)) {
                    log::info!("{} record {} set to {}", module, id, status);
                    self.status_message = Some(format!("{} record {} is now {}", module, id, status));
                } else {
                    log::warn!("{} record {} not found for status change", module, id);
                    self.error = Some(format!("{} record {} no longer exists", module, id));
                }
            }
            Action::ConfirmDeleteRecord { module, id } => {
                self.modals.push(Modal::Confirm {
                    title: " Delete? ".to_string(),
                    message: format!("Delete {} record {}?", module, id),
                    on_confirm: Box::new(Action::DeleteRecord { module, id }),
                });
            }
            Action::DeleteRecord { module, id } => {
                if self.edit_rows(module, |rows| remove_record(rows, &id)) {
                    log::info!("{} record {} deleted", module, id);
                    self.status_message = Some(format!("Deleted {} record {}", module, id));
                } else {
                    self.error = Some(format!("{} record {} no longer exists", module, id));
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.modals.push(Modal::quit_confirm());
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help { scroll_offset: 0 });
            }
            Action::CloseModal => {
                self.modals.pop();
            }
            Action::ConfirmModal => match self.modals.pop() {
                Some(Modal::Confirm { on_confirm, .. }) => return Ok(Some(*on_confirm)),
                Some(Modal::RowActions {
                    page_index,
                    selected_index,
                }) => {
                    let activation = Activation::Action {
                        page_index,
                        action_index: selected_index,
                    };
                    return Ok(self
                        .home
                        .active_table()
                        .and_then(|t| t.engine.activate(activation)));
                }
                Some(other) => self.modals.push(other),
                None => {}
            },
            Action::ModalUp => self.move_row_action_selection(false),
            Action::ModalDown => self.move_row_action_selection(true),
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let ctx = HomeRenderContext {
            role: self.domain.role,
            dataset_status: self
                .home
                .active_module()
                .and_then(|m| self.domain.status(m)),
            error: self.error.as_deref(),
            status_message: self.status_message.as_deref(),
        };

        draw_home_screen(frame, area, &mut self.home, &ctx)?;

        // Draw modal overlay if active
        if let Some(modal) = self.modals.top().cloned() {
            self.draw_modal(frame, area, &modal)?;
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::Confirm { title, message, .. } => {
                self.confirm_dialog.set_content(title, message);
                self.confirm_dialog.draw(frame, area)?;
            }
            Modal::RowActions { .. } => self.row_actions_dialog.draw(frame, area)?,
            Modal::RecordDetail { row, .. } => {
                self.record_dialog.draw_with_row(frame, area, row)?;
            }
            Modal::Help { .. } => self.help_dialog.draw(frame, area)?,
        }
        Ok(())
    }
}
