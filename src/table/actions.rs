//! Per-row actions
//!
//! Actions come either as one list shared by every row or as a function of
//! the row. Both shapes resolve through `ActionSource::resolve`, which is
//! called fresh each time so eligibility tracks the row's current fields.
//!
//! `on_click` is opaque to the engine: it returns whatever the caller's
//! event loop wants back (`A`), typically a follow-up application action.

use super::row::Row;
use std::fmt;
use std::rc::Rc;

/// Click handler for a row action
pub type ActionHandler<A> = Rc<dyn Fn(&Row) -> Option<A>>;

/// Row-producing action list
pub type ActionResolver<A> = Rc<dyn Fn(&Row) -> Vec<RowAction<A>>>;

/// One user-triggered operation on a row
pub struct RowAction<A> {
    pub icon: String,
    pub title: String,
    pub class_name: Option<String>,
    pub on_click: ActionHandler<A>,
}

impl<A> RowAction<A> {
    pub fn new<F>(icon: &str, title: &str, on_click: F) -> Self
    where
        F: Fn(&Row) -> Option<A> + 'static,
    {
        Self {
            icon: icon.to_string(),
            title: title.to_string(),
            class_name: None,
            on_click: Rc::new(on_click),
        }
    }

    pub fn class_name(mut self, class_name: &str) -> Self {
        self.class_name = Some(class_name.to_string());
        self
    }

    /// Invoke the click handler for `row`
    pub fn click(&self, row: &Row) -> Option<A> {
        (self.on_click)(row)
    }
}

impl<A> Clone for RowAction<A> {
    fn clone(&self) -> Self {
        Self {
            icon: self.icon.clone(),
            title: self.title.clone(),
            class_name: self.class_name.clone(),
            on_click: Rc::clone(&self.on_click),
        }
    }
}

impl<A> fmt::Debug for RowAction<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowAction")
            .field("icon", &self.icon)
            .field("title", &self.title)
            .field("class_name", &self.class_name)
            .finish_non_exhaustive()
    }
}

/// Where a table's row actions come from
pub enum ActionSource<A> {
    /// The same actions for every row
    Static(Vec<RowAction<A>>),
    /// Actions computed from each row
    Computed(ActionResolver<A>),
}

impl<A> ActionSource<A> {
    pub fn computed<F>(resolver: F) -> Self
    where
        F: Fn(&Row) -> Vec<RowAction<A>> + 'static,
    {
        ActionSource::Computed(Rc::new(resolver))
    }

    /// Actions available for `row`, in display order
    pub fn resolve(&self, row: &Row) -> Vec<RowAction<A>> {
        match self {
            ActionSource::Static(actions) => actions.clone(),
            ActionSource::Computed(resolver) => resolver(row),
        }
    }
}

impl<A> Clone for ActionSource<A> {
    fn clone(&self) -> Self {
        match self {
            ActionSource::Static(actions) => ActionSource::Static(actions.clone()),
            ActionSource::Computed(resolver) => ActionSource::Computed(Rc::clone(resolver)),
        }
    }
}

impl<A> fmt::Debug for ActionSource<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionSource::Static(actions) => f.debug_tuple("Static").field(actions).finish(),
            ActionSource::Computed(_) => f.write_str("Computed(<fn>)"),
        }
    }
}

/// A user activation inside a rendered table, addressed by position in the
/// current page slice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// The row itself, outside of any action control
    Row { page_index: usize },
    /// One of the row's resolved actions
    Action {
        page_index: usize,
        action_index: usize,
    },
}
