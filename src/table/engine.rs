//! The tabular data engine
//!
//! Owns search, sort, and pagination state for one rendered table and
//! derives the filtered → sorted → paged view of its rows on every change.

use super::actions::{ActionHandler, ActionSource, Activation, RowAction};
use super::column::Column;
use super::derive::{filter_indices, paginate, sort_indices};
use super::error::ConstructionError;
use super::row::{Row, RowKey};
use super::state::{
    nearest_page_size, total_pages, Pagination, SortState, DEFAULT_PAGE_SIZES,
    DEFAULT_ROWS_PER_PAGE,
};
use std::rc::Rc;

/// Caller-facing switches for a table
#[derive(Debug, Clone, PartialEq)]
pub struct TableOptions {
    /// Paginate rows. When off, one unbounded page holds everything.
    pub pagination: bool,
    /// Filter by the search term. When off, filtering is skipped.
    pub search: bool,
    /// Upstream data is still loading; no view is derived
    pub loading: bool,
    /// Shown when the dataset itself has no rows
    pub empty_message: String,
    /// Allowed page sizes
    pub page_sizes: Vec<usize>,
    /// Initial page size, must be one of `page_sizes`
    pub rows_per_page: usize,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            pagination: true,
            search: true,
            loading: false,
            empty_message: "No records found".to_string(),
            page_sizes: DEFAULT_PAGE_SIZES.to_vec(),
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
        }
    }
}

/// A row on the current page
#[derive(Debug, Clone, PartialEq)]
pub struct PageRow<'a> {
    pub key: RowKey,
    /// Index into the engine's rows
    pub source_index: usize,
    pub row: &'a Row,
}

/// Render-ready projection of the rows
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedView<'a> {
    pub page_rows: Vec<PageRow<'a>>,
    pub total_filtered: usize,
    pub total_pages: usize,
    pub current_page: usize,
    /// `None` when pagination is disabled
    pub rows_per_page: Option<usize>,
    /// 1-based inclusive bounds of the page, 0 when nothing matched
    pub range_start: usize,
    pub range_end: usize,
}

/// What a table should show right now
#[derive(Debug, Clone, PartialEq)]
pub enum TableView<'a> {
    Loading,
    Empty { message: &'a str },
    Rows(DerivedView<'a>),
}

/// Search, sort, paginate, and action resolution over an in-memory dataset
pub struct TableEngine<A> {
    columns: Vec<Column>,
    rows: Vec<Row>,
    options: TableOptions,
    search_term: String,
    sort: SortState,
    pagination: Pagination,
    actions: Option<ActionSource<A>>,
    on_row_click: Option<ActionHandler<A>>,
    /// Filtered then sorted indices into `rows`
    visible: Vec<usize>,
}

impl<A> TableEngine<A> {
    /// Build an engine for `columns`.
    ///
    /// Fails when there are no columns, a column key is blank, or the page
    /// size settings are inconsistent.
    pub fn new(columns: Vec<Column>, options: TableOptions) -> Result<Self, ConstructionError> {
        if columns.is_empty() {
            return Err(ConstructionError::NoColumns);
        }
        if let Some(index) = columns.iter().position(|c| c.key.trim().is_empty()) {
            return Err(ConstructionError::EmptyColumnKey { index });
        }
        if options.page_sizes.is_empty() {
            return Err(ConstructionError::NoPageSizes);
        }
        if options.page_sizes.contains(&0) {
            return Err(ConstructionError::ZeroPageSize);
        }
        if !options.page_sizes.contains(&options.rows_per_page) {
            return Err(ConstructionError::PageSizeNotAllowed {
                size: options.rows_per_page,
            });
        }

        let pagination = Pagination::new(options.rows_per_page);
        Ok(Self {
            columns,
            rows: Vec::new(),
            options,
            search_term: String::new(),
            sort: SortState::default(),
            pagination,
            actions: None,
            on_row_click: None,
            visible: Vec::new(),
        })
    }

    pub fn with_actions(mut self, actions: ActionSource<A>) -> Self {
        self.actions = Some(actions);
        self
    }

    pub fn with_rows(mut self, rows: Vec<Row>) -> Self {
        self.set_rows(rows);
        self
    }

    /// Callback for activating a row outside of its action controls
    pub fn on_row_click<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Row) -> Option<A> + 'static,
    {
        self.on_row_click = Some(Rc::new(handler));
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn current_page(&self) -> usize {
        self.pagination.current_page
    }

    pub fn rows_per_page(&self) -> usize {
        self.pagination.rows_per_page
    }

    pub fn page_sizes(&self) -> &[usize] {
        &self.options.page_sizes
    }

    pub fn is_loading(&self) -> bool {
        self.options.loading
    }

    /// Number of rows left after filtering
    pub fn filtered_count(&self) -> usize {
        self.visible.len()
    }

    pub fn total_pages(&self) -> usize {
        match self.effective_rows_per_page() {
            Some(per_page) => total_pages(self.visible.len(), per_page),
            None => 1,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // State transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the dataset, e.g. after an upstream refetch.
    ///
    /// The current page is kept unless it no longer exists.
    pub fn set_rows(&mut self, rows: Vec<Row>) {
        log::debug!("table received {} rows", rows.len());
        self.rows = rows;
        self.refresh();
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.options.loading = loading;
    }

    /// Replace the search term and go back to the first page
    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = term.to_string();
        self.pagination.current_page = 1;
        self.refresh();
    }

    /// Header click on `column_key`. Unknown and unsortable columns are
    /// ignored.
    pub fn request_sort(&mut self, column_key: &str) {
        let sortable = self
            .columns
            .iter()
            .any(|c| c.key == column_key && c.sortable);
        if !sortable {
            log::debug!("ignoring sort request for column '{}'", column_key);
            return;
        }

        self.sort.toggle(column_key);
        self.refresh();
    }

    /// Jump to `page`, clamped into the valid range
    pub fn set_page(&mut self, page: i64) {
        let requested = usize::try_from(page.max(1)).unwrap_or(usize::MAX);
        self.pagination.current_page = requested;
        self.pagination.clamp(self.total_pages());
    }

    pub fn next_page(&mut self) {
        self.set_page(self.current_page() as i64 + 1);
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.current_page() as i64 - 1);
    }

    /// Change the page size and go back to the first page. Sizes outside the
    /// declared set snap to the nearest allowed size below them.
    pub fn set_rows_per_page(&mut self, size: usize) {
        let Some(size) = nearest_page_size(&self.options.page_sizes, size) else {
            return;
        };

        self.pagination.rows_per_page = size;
        self.pagination.current_page = 1;
        self.pagination.clamp(self.total_pages());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Derivation
    // ─────────────────────────────────────────────────────────────────────────

    fn effective_rows_per_page(&self) -> Option<usize> {
        self.options
            .pagination
            .then_some(self.pagination.rows_per_page)
    }

    /// Recompute the filtered, sorted order and re-clamp the page
    fn refresh(&mut self) {
        let mut visible = if self.options.search {
            filter_indices(&self.rows, &self.search_term)
        } else {
            (0..self.rows.len()).collect()
        };
        sort_indices(&self.rows, &mut visible, &self.sort);
        self.visible = visible;
        self.pagination.clamp(self.total_pages());
    }

    /// The current page and its summary, regardless of loading state
    pub fn derive(&self) -> DerivedView<'_> {
        let rows_per_page = self.effective_rows_per_page();
        let bounds = paginate(
            self.visible.len(),
            self.pagination.current_page,
            rows_per_page,
        );

        let page_rows = self.visible[bounds.slice.clone()]
            .iter()
            .enumerate()
            .map(|(position, &source_index)| {
                let row = &self.rows[source_index];
                PageRow {
                    key: RowKey::for_row(row, position),
                    source_index,
                    row,
                }
            })
            .collect();

        DerivedView {
            page_rows,
            total_filtered: self.visible.len(),
            total_pages: bounds.total_pages,
            current_page: bounds.current_page,
            rows_per_page,
            range_start: bounds.range_start,
            range_end: bounds.range_end,
        }
    }

    /// What to render: a loading placeholder, the empty message, or rows
    pub fn view(&self) -> TableView<'_> {
        if self.options.loading {
            TableView::Loading
        } else if self.rows.is_empty() {
            TableView::Empty {
                message: &self.options.empty_message,
            }
        } else {
            TableView::Rows(self.derive())
        }
    }

    fn page_row(&self, page_index: usize) -> Option<&Row> {
        let bounds = paginate(
            self.visible.len(),
            self.pagination.current_page,
            self.effective_rows_per_page(),
        );
        let source_index = self.visible[bounds.slice].get(page_index)?;
        self.rows.get(*source_index)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Actions
    // ─────────────────────────────────────────────────────────────────────────

    /// Resolve actions for a row of the current page
    pub fn actions_for(&self, page_index: usize) -> Vec<RowAction<A>> {
        match (&self.actions, self.page_row(page_index)) {
            (Some(source), Some(row)) => source.resolve(row),
            _ => Vec::new(),
        }
    }

    /// Dispatch an activation.
    ///
    /// An action activation only runs that action's handler; the row
    /// callback never sees it.
    pub fn activate(&self, activation: Activation) -> Option<A> {
        match activation {
            Activation::Row { page_index } => {
                let row = self.page_row(page_index)?;
                let handler = self.on_row_click.as_ref()?;
                handler(row)
            }
            Activation::Action {
                page_index,
                action_index,
            } => {
                let row = self.page_row(page_index)?;
                let actions = self.actions.as_ref()?.resolve(row);
                actions.get(action_index)?.click(row)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::state::SortDirection;
    use crate::table::value::FieldValue;
    use std::cell::RefCell;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("id", "ID"),
            Column::new("name", "Name"),
            Column::new("amt", "Amount"),
            Column::new("memo", "Memo").unsortable(),
        ]
    }

    fn scenario_rows() -> Vec<Row> {
        vec![
            Row::new()
                .with("id", FieldValue::Number(1.0))
                .with("name", FieldValue::Text("Beta".to_string()))
                .with("amt", FieldValue::Number(50.0)),
            Row::new()
                .with("id", FieldValue::Number(2.0))
                .with("name", FieldValue::Text("Alpha".to_string()))
                .with("amt", FieldValue::Null),
            Row::new()
                .with("id", FieldValue::Number(3.0))
                .with("name", FieldValue::Text("Gamma".to_string()))
                .with("amt", FieldValue::Number(10.0)),
        ]
    }

    fn numbered_rows(count: usize) -> Vec<Row> {
        (1..=count)
            .map(|i| {
                Row::new()
                    .with("id", FieldValue::Number(i as f64))
                    .with("name", FieldValue::Text(format!("Record {}", i)))
            })
            .collect()
    }

    fn engine(rows: Vec<Row>) -> TableEngine<String> {
        TableEngine::new(columns(), TableOptions::default())
            .unwrap()
            .with_rows(rows)
    }

    fn page_ids(engine: &TableEngine<String>) -> Vec<String> {
        engine
            .derive()
            .page_rows
            .iter()
            .map(|r| r.key.to_string())
            .collect()
    }

    #[test]
    fn test_construction_requires_columns() {
        let result = TableEngine::<()>::new(Vec::new(), TableOptions::default());
        assert_eq!(result.err(), Some(ConstructionError::NoColumns));
    }

    #[test]
    fn test_construction_rejects_blank_key() {
        let result = TableEngine::<()>::new(
            vec![Column::new("id", "ID"), Column::new(" ", "Blank")],
            TableOptions::default(),
        );
        assert_eq!(
            result.err(),
            Some(ConstructionError::EmptyColumnKey { index: 1 })
        );
    }

    #[test]
    fn test_construction_checks_page_sizes() {
        let options = TableOptions {
            page_sizes: Vec::new(),
            ..TableOptions::default()
        };
        assert_eq!(
            TableEngine::<()>::new(columns(), options).err(),
            Some(ConstructionError::NoPageSizes)
        );

        let options = TableOptions {
            page_sizes: vec![0, 10],
            ..TableOptions::default()
        };
        assert_eq!(
            TableEngine::<()>::new(columns(), options).err(),
            Some(ConstructionError::ZeroPageSize)
        );

        let options = TableOptions {
            rows_per_page: 7,
            ..TableOptions::default()
        };
        assert_eq!(
            TableEngine::<()>::new(columns(), options).err(),
            Some(ConstructionError::PageSizeNotAllowed { size: 7 })
        );
    }

    #[test]
    fn test_scenario_sort_by_amount() {
        let mut engine = engine(scenario_rows());
        engine.request_sort("amt");
        assert_eq!(page_ids(&engine), vec!["3", "1", "2"]);
    }

    #[test]
    fn test_scenario_page_clamping() {
        let mut engine = engine(numbered_rows(23));
        let view = engine.derive();
        assert_eq!(view.total_pages, 3);

        engine.set_page(5);
        let view = engine.derive();
        assert_eq!(view.current_page, 3);
        assert_eq!((view.range_start, view.range_end), (21, 23));
        assert_eq!(view.page_rows.len(), 3);
    }

    #[test]
    fn test_scenario_search_resets_page() {
        let mut engine = engine(scenario_rows());
        engine.set_rows_per_page(5);
        engine.set_rows(numbered_rows(12).into_iter().chain(scenario_rows()).collect());
        engine.set_page(3);
        assert_eq!(engine.current_page(), 3);

        engine.set_search_term("gamma");
        let view = engine.derive();
        assert_eq!(view.current_page, 1);
        assert_eq!(view.total_filtered, 1);
        assert_eq!(view.page_rows[0].row.get("name"), &FieldValue::Text("Gamma".to_string()));
    }

    #[test]
    fn test_scenario_page_size_change_resets_page() {
        let mut engine = engine(numbered_rows(23));
        engine.set_page(3);
        assert_eq!(engine.current_page(), 3);

        engine.set_rows_per_page(25);
        let view = engine.derive();
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.current_page, 1);
        assert_eq!(view.rows_per_page, Some(25));
    }

    #[test]
    fn test_unlisted_page_size_snaps_to_allowed() {
        let mut engine = engine(numbered_rows(23));
        engine.set_rows_per_page(30);
        assert_eq!(engine.rows_per_page(), 25);
        engine.set_rows_per_page(1);
        assert_eq!(engine.rows_per_page(), 5);
    }

    #[test]
    fn test_set_page_clamps_any_integer() {
        let mut engine = engine(numbered_rows(23));
        for page in [i64::MIN, -4, 0, 1, 2, 3, 4, 99, i64::MAX] {
            engine.set_page(page);
            let current = engine.current_page();
            assert!((1..=3).contains(&current), "page {} gave {}", page, current);
        }
        engine.set_page(-4);
        assert_eq!(engine.current_page(), 1);
    }

    #[test]
    fn test_sort_toggle_via_engine() {
        let mut engine = engine(scenario_rows());
        engine.request_sort("name");
        engine.request_sort("name");
        assert_eq!(engine.sort().direction, SortDirection::Desc);
        assert_eq!(engine.sort().key.as_deref(), Some("name"));

        engine.request_sort("amt");
        assert_eq!(engine.sort().direction, SortDirection::Asc);
        assert_eq!(engine.sort().key.as_deref(), Some("amt"));
    }

    #[test]
    fn test_sort_request_on_unsortable_or_unknown_column_is_ignored() {
        let mut engine = engine(scenario_rows());
        engine.request_sort("memo");
        assert_eq!(engine.sort(), &SortState::default());
        engine.request_sort("nope");
        assert_eq!(engine.sort(), &SortState::default());
        assert_eq!(page_ids(&engine), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_sort_keeps_page() {
        let mut engine = engine(numbered_rows(23));
        engine.set_page(2);
        engine.request_sort("id");
        engine.request_sort("id");
        assert_eq!(engine.current_page(), 2);
        assert_eq!(page_ids(&engine)[0], "13");
    }

    #[test]
    fn test_rederive_is_idempotent() {
        let mut engine = engine(scenario_rows());
        engine.request_sort("amt");
        engine.set_search_term("a");
        let before = engine.rows().to_vec();

        let first = engine.derive();
        let second = engine.derive();
        assert_eq!(first, second);
        assert_eq!(engine.rows(), before.as_slice());
    }

    #[test]
    fn test_new_rows_clamp_without_resetting_page() {
        let mut engine = engine(numbered_rows(23));
        engine.set_page(3);

        // Background refresh that still has three pages keeps the position
        engine.set_rows(numbered_rows(25));
        assert_eq!(engine.current_page(), 3);

        // A shrunk dataset pulls the page back into range
        engine.set_rows(numbered_rows(14));
        assert_eq!(engine.current_page(), 2);
    }

    #[test]
    fn test_loading_and_empty_views() {
        let mut engine = engine(Vec::new());
        assert_eq!(
            engine.view(),
            TableView::Empty {
                message: "No records found"
            }
        );

        engine.set_loading(true);
        assert_eq!(engine.view(), TableView::Loading);

        engine.set_loading(false);
        engine.set_rows(scenario_rows());
        engine.set_search_term("zzz");
        match engine.view() {
            TableView::Rows(view) => {
                assert!(view.page_rows.is_empty());
                assert_eq!((view.range_start, view.range_end), (0, 0));
                assert_eq!(view.total_pages, 1);
            }
            other => panic!("expected rows view, got {:?}", other),
        }
    }

    #[test]
    fn test_disabled_search_skips_filtering() {
        let options = TableOptions {
            search: false,
            ..TableOptions::default()
        };
        let mut engine: TableEngine<()> = TableEngine::new(columns(), options)
            .unwrap()
            .with_rows(scenario_rows());
        engine.set_search_term("gamma");
        assert_eq!(engine.filtered_count(), 3);
    }

    #[test]
    fn test_disabled_pagination_shows_everything() {
        let options = TableOptions {
            pagination: false,
            ..TableOptions::default()
        };
        let mut engine: TableEngine<()> = TableEngine::new(columns(), options)
            .unwrap()
            .with_rows(numbered_rows(47));
        engine.set_page(3);
        let view = engine.derive();
        assert_eq!(view.page_rows.len(), 47);
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.rows_per_page, None);
        assert_eq!((view.range_start, view.range_end), (1, 47));
    }

    #[test]
    fn test_rows_without_id_use_page_position() {
        let rows = vec![
            Row::new().with("name", FieldValue::Text("a".to_string())),
            Row::new().with("name", FieldValue::Text("b".to_string())),
        ];
        let engine = engine(rows);
        let keys: Vec<RowKey> = engine.derive().page_rows.into_iter().map(|r| r.key).collect();
        assert_eq!(keys, vec![RowKey::Position(0), RowKey::Position(1)]);
    }

    fn status_rows() -> Vec<Row> {
        vec![
            Row::new()
                .with("id", FieldValue::Number(1.0))
                .with("status", FieldValue::Text("Posted".to_string())),
            Row::new()
                .with("id", FieldValue::Number(2.0))
                .with("status", FieldValue::Text("Draft".to_string())),
        ]
    }

    fn draft_actions() -> ActionSource<String> {
        ActionSource::computed(|row| match row.get("status") {
            FieldValue::Text(s) if s == "Draft" => vec![
                RowAction::new("✎", "Edit", |row| row.id().map(|id| format!("edit {}", id))),
                RowAction::new("✗", "Delete", |row| {
                    row.id().map(|id| format!("delete {}", id))
                }),
            ],
            _ => Vec::new(),
        })
    }

    #[test]
    fn test_actions_follow_current_status() {
        let mut engine = engine(status_rows()).with_actions(draft_actions());
        assert_eq!(engine.actions_for(0).len(), 0);
        assert_eq!(engine.actions_for(1).len(), 2);

        // Posting the draft upstream removes its actions on the next render
        let mut rows = engine.rows().to_vec();
        rows[1].set("status", FieldValue::Text("Posted".to_string()));
        engine.set_rows(rows);
        assert_eq!(engine.actions_for(1).len(), 0);
    }

    #[test]
    fn test_action_activation_does_not_fire_row_click() {
        let clicks = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&clicks);
        let engine = engine(status_rows())
            .with_actions(draft_actions())
            .on_row_click(move |row| {
                log.borrow_mut().push(row.id().unwrap_or_default());
                Some("row".to_string())
            });

        let result = engine.activate(Activation::Action {
            page_index: 1,
            action_index: 1,
        });
        assert_eq!(result.as_deref(), Some("delete 2"));
        assert!(clicks.borrow().is_empty());

        let result = engine.activate(Activation::Row { page_index: 0 });
        assert_eq!(result.as_deref(), Some("row"));
        assert_eq!(clicks.borrow().as_slice(), ["1".to_string()]);
    }

    #[test]
    fn test_out_of_range_activation_is_ignored() {
        let engine = engine(status_rows()).with_actions(draft_actions());
        assert_eq!(engine.activate(Activation::Row { page_index: 9 }), None);
        assert_eq!(
            engine.activate(Activation::Action {
                page_index: 0,
                action_index: 0
            }),
            None
        );
        assert!(engine.actions_for(5).is_empty());
    }
}
