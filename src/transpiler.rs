//! SQL text generation for the query draft.
//!
//! Rendering is a pure function of the draft. Clauses appear in a fixed
//! order, one per line, with a terminal `;`. Join conditions and HAVING
//! predicates are echoed verbatim — even while half-typed — so the text
//! can be regenerated live as the user edits.

use crate::builder::{Join, OrderBy, QueryBuilder, SortOrder};

/// Trait for rendering a clause node as SQL text.
pub trait ToSql {
    /// Convert this node to a SQL string.
    fn to_sql(&self) -> String;
}

impl ToSql for Join {
    fn to_sql(&self) -> String {
        format!("JOIN {} ON {}", self.table, self.condition)
    }
}

impl ToSql for OrderBy {
    fn to_sql(&self) -> String {
        match self.direction {
            // ASC is the SQL default and is never printed.
            SortOrder::Asc => format!("ORDER BY {}", self.column),
            SortOrder::Desc => format!("ORDER BY {} DESC", self.column),
        }
    }
}

impl QueryBuilder {
    /// Render the draft as SQL text.
    ///
    /// Returns `None` until a table has been picked — there is no query to
    /// speak of before that, and callers show their own placeholder.
    pub fn to_sql(&self) -> Option<String> {
        let table = self.selected_table.as_deref()?;

        let mut sql = String::from("SELECT ");
        if self.selected_columns.is_empty() {
            sql.push('*');
        } else {
            sql.push_str(&self.selected_columns.join(", "));
        }

        sql.push_str("\nFROM ");
        sql.push_str(table);

        for join in &self.joins {
            sql.push('\n');
            sql.push_str(&join.to_sql());
        }

        if !self.group_by.is_empty() {
            sql.push_str("\nGROUP BY ");
            sql.push_str(&self.group_by.join(", "));
            // HAVING only makes sense under a GROUP BY; stale predicate
            // text is kept in the draft but suppressed here.
            if let Some(having) = self.having.as_deref() {
                sql.push_str("\nHAVING ");
                sql.push_str(having);
            }
        }

        if let Some(order) = &self.order_by {
            sql.push('\n');
            sql.push_str(&order.to_sql());
        }

        sql.push(';');
        Some(sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_no_table_not_generatable() {
        let mut draft = QueryBuilder::new();
        draft.add_column("name");
        assert_eq!(draft.to_sql(), None);
    }

    #[test]
    fn test_select_star() {
        let mut draft = QueryBuilder::new();
        draft.select_table("users");
        assert_eq!(draft.to_sql().unwrap(), "SELECT *\nFROM users;");
    }

    #[test]
    fn test_select_columns_in_insertion_order() {
        let mut draft = QueryBuilder::new();
        draft.select_table("products");
        draft.add_column("name");
        draft.add_column("price");
        assert_eq!(draft.to_sql().unwrap(), "SELECT name, price\nFROM products;");
    }

    #[test]
    fn test_join_clause() {
        let mut draft = QueryBuilder::new();
        draft.select_table("users");
        draft.add_join();
        draft.set_join_table(0, "orders");
        draft.set_join_condition(0, "users.id = orders.userId");
        assert_eq!(
            draft.to_sql().unwrap(),
            "SELECT *\nFROM users\nJOIN orders ON users.id = orders.userId;"
        );
    }

    #[test]
    fn test_half_typed_join_still_renders() {
        let mut draft = QueryBuilder::new();
        draft.select_table("users");
        draft.add_join();
        assert_eq!(draft.to_sql().unwrap(), "SELECT *\nFROM users\nJOIN  ON ;");
    }

    #[test]
    fn test_group_by_with_having() {
        let mut draft = QueryBuilder::new();
        draft.select_table("products");
        draft.set_group_by(["category"]);
        draft.set_having("COUNT(*) > 1");
        assert_eq!(
            draft.to_sql().unwrap(),
            "SELECT *\nFROM products\nGROUP BY category\nHAVING COUNT(*) > 1;"
        );
    }

    #[test]
    fn test_having_suppressed_without_group_by() {
        let mut draft = QueryBuilder::new();
        draft.select_table("products");
        draft.set_group_by(["category"]);
        draft.set_having("COUNT(*) > 1");
        draft.set_group_by(Vec::<String>::new());
        assert_eq!(draft.to_sql().unwrap(), "SELECT *\nFROM products;");
    }

    #[test]
    fn test_order_by_asc_is_implicit() {
        let mut draft = QueryBuilder::new();
        draft.select_table("products");
        draft.set_order_by_column("price");
        assert_eq!(draft.to_sql().unwrap(), "SELECT *\nFROM products\nORDER BY price;");

        draft.toggle_order_direction();
        assert_eq!(
            draft.to_sql().unwrap(),
            "SELECT *\nFROM products\nORDER BY price DESC;"
        );
    }

    #[test]
    fn test_full_clause_order() {
        let mut draft = QueryBuilder::new();
        draft.select_table("products");
        draft.add_column("category");
        draft.add_join();
        draft.set_join_table(0, "orders");
        draft.set_join_condition(0, "products.id = orders.productId");
        draft.set_group_by(["category"]);
        draft.set_having("COUNT(*) > 1");
        draft.set_order_by_column("category");
        draft.toggle_order_direction();

        assert_eq!(
            draft.to_sql().unwrap(),
            "SELECT category\n\
             FROM products\n\
             JOIN orders ON products.id = orders.productId\n\
             GROUP BY category\n\
             HAVING COUNT(*) > 1\n\
             ORDER BY category DESC;"
        );
    }

    #[test]
    fn test_generation_is_idempotent() {
        let mut draft = QueryBuilder::new();
        draft.select_table("users");
        draft.add_column("name");
        assert_eq!(draft.to_sql(), draft.to_sql());
    }
}
