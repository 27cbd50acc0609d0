//! Modal stack for managing overlays
//!
//! Dialogs are an enum-based stack; only the top modal receives input.

use crate::action::Action;
use crate::table::Row;

/// Represents a modal overlay that can be displayed on top of the main UI
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    /// Yes/no confirmation that dispatches `on_confirm` when accepted
    Confirm {
        title: String,
        message: String,
        on_confirm: Box<Action>,
    },
    /// Action menu for the row at `page_index` of the active table
    RowActions {
        page_index: usize,
        selected_index: usize,
    },
    /// Every field of one record
    RecordDetail { row: Row, scroll_offset: usize },
    /// Help dialog showing all keyboard shortcuts
    Help { scroll_offset: usize },
}

impl Modal {
    pub fn quit_confirm() -> Self {
        Modal::Confirm {
            title: " Quit? ".to_string(),
            message: "Leave the treasury console?".to_string(),
            on_confirm: Box::new(Action::ForceQuit),
        }
    }
}

/// A stack of modal overlays
///
/// Modals are rendered from bottom to top, with only the top modal
/// receiving input events.
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push(&mut self, modal: Modal) {
        self.stack.push(modal);
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut Modal> {
        self.stack.last_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Drop every open modal
    pub fn clear(&mut self) {
        self.stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_stack_push_pop() {
        let mut stack = ModalStack::new();
        assert!(stack.top().is_none());

        stack.push(Modal::Help { scroll_offset: 0 });
        stack.push(Modal::quit_confirm());

        assert_eq!(stack.pop(), Some(Modal::quit_confirm()));
        assert_eq!(stack.pop(), Some(Modal::Help { scroll_offset: 0 }));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_modal_stack_top_mut() {
        let mut stack = ModalStack::new();
        stack.push(Modal::RowActions {
            page_index: 3,
            selected_index: 0,
        });

        if let Some(Modal::RowActions { selected_index, .. }) = stack.top_mut() {
            *selected_index = 1;
        }

        assert_eq!(
            stack.top(),
            Some(&Modal::RowActions {
                page_index: 3,
                selected_index: 1
            })
        );
    }

    #[test]
    fn test_quit_confirm_dispatches_force_quit() {
        match Modal::quit_confirm() {
            Modal::Confirm { on_confirm, .. } => assert_eq!(*on_confirm, Action::ForceQuit),
            other => panic!("unexpected modal {:?}", other),
        }
    }

    #[test]
    fn test_clear_closes_everything() {
        let mut stack = ModalStack::new();
        stack.push(Modal::Help { scroll_offset: 2 });
        stack.push(Modal::quit_confirm());
        stack.clear();
        assert!(stack.is_empty());
    }
}
