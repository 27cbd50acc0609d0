//! Tabular data engine
//!
//! Client-side search, sort, pagination, and row-action resolution shared
//! by every list view in the console:
//! - `value` / `row` - the record model and comparison rules
//! - `column` - column descriptors
//! - `state` - sort and pagination state
//! - `derive` - the pure filter → sort → paginate steps
//! - `actions` - static or row-computed action lists
//! - `engine` - `TableEngine`, which owns the state and derives views

pub mod actions;
pub mod column;
pub mod derive;
pub mod engine;
pub mod error;
pub mod row;
pub mod state;
pub mod value;

pub use actions::{ActionSource, Activation, RowAction};
pub use column::Column;
pub use engine::{DerivedView, TableEngine, TableOptions, TableView};
pub use row::{rows_from_json, Row};
pub use state::SortDirection;
pub use value::FieldValue;
