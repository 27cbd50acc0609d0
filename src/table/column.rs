//! Column descriptors

use super::value::FieldValue;
use std::fmt;
use std::rc::Rc;

/// Presentation-only formatter for a cell
pub type CellRenderer = Rc<dyn Fn(&FieldValue) -> String>;

/// Describes how to read, sort, and display one field of each row
#[derive(Clone)]
pub struct Column {
    /// Field name to read and sort by
    pub key: String,
    /// Display label
    pub header: String,
    /// Whether the column takes part in sort requests
    pub sortable: bool,
    /// Optional display formatter. Never used for filtering or sorting.
    pub render: Option<CellRenderer>,
    /// Optional style hint for the renderer
    pub class_name: Option<String>,
}

impl Column {
    pub fn new(key: &str, header: &str) -> Self {
        Self {
            key: key.to_string(),
            header: header.to_string(),
            sortable: true,
            render: None,
            class_name: None,
        }
    }

    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    pub fn render<F>(mut self, render: F) -> Self
    where
        F: Fn(&FieldValue) -> String + 'static,
    {
        self.render = Some(Rc::new(render));
        self
    }

    pub fn class_name(mut self, class_name: &str) -> Self {
        self.class_name = Some(class_name.to_string());
        self
    }

    /// Display text for a cell of this column
    pub fn display(&self, value: &FieldValue) -> String {
        match &self.render {
            Some(render) => render(value),
            None => value.to_string(),
        }
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("render", &self.render.as_ref().map(|_| "<fn>"))
            .field("class_name", &self.class_name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_defaults() {
        let column = Column::new("amount", "Amount");
        assert!(column.sortable);
        assert!(column.render.is_none());
        assert_eq!(column.display(&FieldValue::Number(12.5)), "12.5");
        assert_eq!(column.display(&FieldValue::Null), "");
    }

    #[test]
    fn test_custom_render_only_affects_display() {
        let column = Column::new("amount", "Amount").render(|v| match v {
            FieldValue::Number(n) => format!("${:.2}", n),
            other => other.to_string(),
        });
        assert_eq!(column.display(&FieldValue::Number(3.0)), "$3.00");
    }
}
