//! The query draft: the mutable structure a UI assembles step by step.
//!
//! Every edit operation is total — out-of-range indices and repeated
//! selections are silent no-ops, never errors. The draft knows nothing
//! about text rendering or execution.

use serde::{Deserialize, Serialize};

/// A join slot. The condition is free text, echoed verbatim into the
/// generated SQL and never validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Join {
    pub table: String,
    pub condition: String,
}

/// Sort order direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Flip ASC to DESC and back.
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// An ORDER BY selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBy {
    pub column: String,
    pub direction: SortOrder,
}

/// The query draft being assembled.
///
/// An empty `selected_columns` means "all columns" (`*`). Columns are not
/// validated against the selected table and survive a table switch, so a
/// user can explore across tables before committing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryBuilder {
    pub selected_table: Option<String>,
    pub selected_columns: Vec<String>,
    pub joins: Vec<Join>,
    pub group_by: Vec<String>,
    pub having: Option<String>,
    pub order_by: Option<OrderBy>,
}

impl QueryBuilder {
    /// Create an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick the FROM table. Does not clear columns, joins or grouping.
    pub fn select_table(&mut self, name: &str) {
        self.selected_table = Some(name.to_string());
    }

    /// Add a column to the SELECT list. Set semantics: already-present
    /// columns are left alone, new ones are appended.
    pub fn add_column(&mut self, name: &str) {
        if !self.selected_columns.iter().any(|c| c == name) {
            self.selected_columns.push(name.to_string());
        }
    }

    /// Remove a column from the SELECT list if present.
    pub fn remove_column(&mut self, name: &str) {
        self.selected_columns.retain(|c| c != name);
    }

    /// Append an empty join slot for the UI to fill in.
    pub fn add_join(&mut self) {
        self.joins.push(Join::default());
    }

    /// Set the target table of the join at `index`. No-op out of bounds.
    pub fn set_join_table(&mut self, index: usize, table: &str) {
        if let Some(join) = self.joins.get_mut(index) {
            join.table = table.to_string();
        }
    }

    /// Set the ON condition of the join at `index`. No-op out of bounds.
    pub fn set_join_condition(&mut self, index: usize, condition: &str) {
        if let Some(join) = self.joins.get_mut(index) {
            join.condition = condition.to_string();
        }
    }

    /// Remove the join at `index`. No-op out of bounds.
    pub fn remove_join(&mut self, index: usize) {
        if index < self.joins.len() {
            self.joins.remove(index);
        }
    }

    /// Replace the GROUP BY column set wholesale. The UI's multi-select
    /// always submits the full new set.
    pub fn set_group_by<I, S>(&mut self, columns: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group_by = columns.into_iter().map(Into::into).collect();
    }

    /// Set the HAVING predicate text. Empty text clears it.
    pub fn set_having(&mut self, text: &str) {
        self.having = if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        };
    }

    /// Set the ORDER BY column, keeping the current direction. An empty
    /// name clears the ordering.
    pub fn set_order_by_column(&mut self, name: &str) {
        if name.is_empty() {
            self.order_by = None;
            return;
        }
        let direction = self
            .order_by
            .as_ref()
            .map(|o| o.direction)
            .unwrap_or(SortOrder::Asc);
        self.order_by = Some(OrderBy {
            column: name.to_string(),
            direction,
        });
    }

    /// Flip the sort direction. No-op when no column is set.
    pub fn toggle_order_direction(&mut self) {
        if let Some(order) = self.order_by.as_mut() {
            order.direction = order.direction.toggled();
        }
    }

    /// Return the draft to the empty initial state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_set_semantics() {
        let mut draft = QueryBuilder::new();
        draft.add_column("name");
        draft.add_column("price");
        draft.add_column("name");
        assert_eq!(draft.selected_columns, vec!["name", "price"]);

        draft.remove_column("name");
        assert_eq!(draft.selected_columns, vec!["price"]);
        draft.remove_column("missing");
        assert_eq!(draft.selected_columns, vec!["price"]);
    }

    #[test]
    fn test_join_slots() {
        let mut draft = QueryBuilder::new();
        draft.add_join();
        draft.set_join_table(0, "orders");
        draft.set_join_condition(0, "users.id = orders.userId");
        assert_eq!(draft.joins[0].table, "orders");
        assert_eq!(draft.joins[0].condition, "users.id = orders.userId");

        // Out-of-bounds edits never panic and change nothing.
        draft.set_join_table(5, "products");
        draft.set_join_condition(5, "x = y");
        draft.remove_join(5);
        assert_eq!(draft.joins.len(), 1);

        draft.remove_join(0);
        assert!(draft.joins.is_empty());
    }

    #[test]
    fn test_remove_join_on_empty_list_is_noop() {
        let mut draft = QueryBuilder::new();
        let before = draft.clone();
        draft.remove_join(0);
        assert_eq!(draft, before);
    }

    #[test]
    fn test_order_direction_toggle() {
        let mut draft = QueryBuilder::new();

        // No column set: toggling is a no-op.
        draft.toggle_order_direction();
        assert!(draft.order_by.is_none());

        draft.set_order_by_column("price");
        assert_eq!(draft.order_by.as_ref().map(|o| o.direction), Some(SortOrder::Asc));
        draft.toggle_order_direction();
        assert_eq!(draft.order_by.as_ref().map(|o| o.direction), Some(SortOrder::Desc));

        // Switching column keeps the direction.
        draft.set_order_by_column("name");
        let order = draft.order_by.as_ref().unwrap();
        assert_eq!(order.column, "name");
        assert_eq!(order.direction, SortOrder::Desc);

        draft.set_order_by_column("");
        assert!(draft.order_by.is_none());
    }

    #[test]
    fn test_table_switch_keeps_columns() {
        let mut draft = QueryBuilder::new();
        draft.select_table("users");
        draft.add_column("name");
        draft.select_table("products");
        assert_eq!(draft.selected_table.as_deref(), Some("products"));
        assert_eq!(draft.selected_columns, vec!["name"]);
    }

    #[test]
    fn test_reset() {
        let mut draft = QueryBuilder::new();
        draft.select_table("products");
        draft.add_column("price");
        draft.add_join();
        draft.set_group_by(["category"]);
        draft.set_having("COUNT(*) > 1");
        draft.set_order_by_column("price");

        draft.reset();
        assert_eq!(draft, QueryBuilder::default());
    }
}
