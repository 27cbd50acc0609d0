//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod confirm_dialog;
pub mod help_dialog;
pub mod home;
pub mod layout;
pub mod record_dialog;
pub mod row_actions_dialog;
pub mod table;

pub use confirm_dialog::ConfirmDialog;
pub use help_dialog::HelpDialog;
pub use home::{draw_home_screen, HomeComponent, HomeRenderContext};
pub use layout::{calculate_main_layout, centered_popup};
pub use record_dialog::RecordDetailDialog;
pub use row_actions_dialog::{MenuItem, RowActionsDialog};
pub use table::TableComponent;
