//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components emit Actions in response to events, row-action handlers
//! return them, and the App processes them to update state.

use crate::model::navigation::Module;
use crate::table::Row;
use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for polling background loads
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Move to next module tab
    NextTab,
    /// Move to previous module tab
    PrevTab,
    /// Move the row cursor down within the page
    NextRow,
    /// Move the row cursor up within the page
    PrevRow,

    // ─────────────────────────────────────────────────────────────────────────
    // Pagination
    // ─────────────────────────────────────────────────────────────────────────
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    /// Switch to the next larger page size
    GrowPageSize,
    /// Switch to the next smaller page size
    ShrinkPageSize,

    // ─────────────────────────────────────────────────────────────────────────
    // Sorting
    // ─────────────────────────────────────────────────────────────────────────
    /// Header click on the column at this index
    SortColumn(usize),

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────
    /// Enter search mode
    EnterSearchMode,
    /// Exit search mode
    ExitSearchMode,
    /// Add character to search term
    SearchInput(char),
    /// Remove last character from search term
    SearchBackspace,
    /// Clear the search term
    ClearSearch,

    // ─────────────────────────────────────────────────────────────────────────
    // Rows
    // ─────────────────────────────────────────────────────────────────────────
    /// Activate the highlighted row
    ActivateRow,
    /// Open the action menu of the highlighted row
    OpenRowActions,
    /// Show every field of a record
    OpenRecordDetail(Row),
    /// Change the status field of a record
    SetRecordStatus {
        module: Module,
        id: String,
        status: String,
    },
    /// Ask before deleting a record
    ConfirmDeleteRecord { module: Module, id: String },
    /// Remove a record from its dataset
    DeleteRecord { module: Module, id: String },
    /// Fetch the active module's dataset again
    ReloadDataset,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open quit confirmation dialog
    OpenQuitDialog,
    /// Open help dialog showing all keyboard shortcuts
    OpenHelp,
    /// Close the current modal
    CloseModal,
    /// Confirm the current modal action
    ConfirmModal,
    /// Navigate up in modal
    ModalUp,
    /// Navigate down in modal
    ModalDown,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::NextTab => write!(f, "NextTab"),
            Action::PrevTab => write!(f, "PrevTab"),
            Action::NextRow => write!(f, "NextRow"),
            Action::PrevRow => write!(f, "PrevRow"),
            Action::NextPage => write!(f, "NextPage"),
            Action::PrevPage => write!(f, "PrevPage"),
            Action::FirstPage => write!(f, "FirstPage"),
            Action::LastPage => write!(f, "LastPage"),
            Action::GrowPageSize => write!(f, "GrowPageSize"),
            Action::ShrinkPageSize => write!(f, "ShrinkPageSize"),
            Action::SortColumn(i) => write!(f, "SortColumn({})", i),
            Action::EnterSearchMode => write!(f, "EnterSearchMode"),
            Action::ExitSearchMode => write!(f, "ExitSearchMode"),
            Action::SearchInput(c) => write!(f, "SearchInput('{}')", c),
            Action::SearchBackspace => write!(f, "SearchBackspace"),
            Action::ClearSearch => write!(f, "ClearSearch"),
            Action::ActivateRow => write!(f, "ActivateRow"),
            Action::OpenRowActions => write!(f, "OpenRowActions"),
            Action::OpenRecordDetail(row) => {
                write!(f, "OpenRecordDetail({})", row.id().unwrap_or_default())
            }
            Action::SetRecordStatus { module, id, status } => {
                write!(f, "SetRecordStatus({}, {}, {})", module, id, status)
            }
            Action::ConfirmDeleteRecord { module, id } => {
                write!(f, "ConfirmDeleteRecord({}, {})", module, id)
            }
            Action::DeleteRecord { module, id } => write!(f, "DeleteRecord({}, {})", module, id),
            Action::ReloadDataset => write!(f, "ReloadDataset"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ConfirmModal => write!(f, "ConfirmModal"),
            Action::ModalUp => write!(f, "ModalUp"),
            Action::ModalDown => write!(f, "ModalDown"),
        }
    }
}
