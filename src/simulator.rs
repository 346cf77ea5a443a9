//! Execution simulator: recognize a query's shape, transform sample data.
//!
//! This is deliberately not a SQL engine. A query is classified into one of
//! a fixed set of shapes — from the structured draft when available, or by
//! ordered case-insensitive marker matching over raw text — and each shape
//! maps to one transformation over the registry's sample rows. First match
//! wins, and the match order is part of the contract. Anything else yields
//! an empty result; execution never fails.

use serde::Serialize;
use std::cmp::Ordering;

use crate::builder::{QueryBuilder, SortOrder};
use crate::schema::{Row, Schema, Value};

/// The simulator's output: ordered column names plus ordered rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultTable {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl ResultTable {
    /// The "query not recognized" result: no columns, no rows.
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The recognized query shapes, in match priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryShape {
    /// Every row of `users`, verbatim.
    AllUsers,
    /// `products` priced over 500.
    ExpensiveProducts,
    /// `products` in the Electronics category (case-sensitive value).
    ElectronicsProducts,
    /// `products` sorted by price, highest first.
    ProductsByPriceDesc,
    /// One row per category: count and mean price.
    ProductsByCategory,
    /// Every product plus its price rank within its own category.
    PriceRankInCategory,
    /// Every row of `products`, verbatim.
    AllProducts,
    /// The fixed users⋈products-via-orders composition.
    OrderDetails,
}

impl QueryShape {
    /// Classify raw query text by its markers. Matching is case-insensitive
    /// and ordered; the first hit wins.
    pub fn of_sql(sql: &str) -> Option<Self> {
        let q = sql.to_lowercase();

        if q.contains("from users") {
            Some(QueryShape::AllUsers)
        } else if q.contains("from products") {
            if q.contains("where price > 500") {
                Some(QueryShape::ExpensiveProducts)
            } else if q.contains("where category = \"electronics\"") {
                Some(QueryShape::ElectronicsProducts)
            } else if q.contains("order by price desc") {
                Some(QueryShape::ProductsByPriceDesc)
            } else if q.contains("group by category") {
                Some(QueryShape::ProductsByCategory)
            } else if q.contains("partition by") {
                Some(QueryShape::PriceRankInCategory)
            } else {
                Some(QueryShape::AllProducts)
            }
        } else if q.contains("join") {
            Some(QueryShape::OrderDetails)
        } else {
            None
        }
    }

    /// Classify a structured draft directly, mirroring the marker priority.
    ///
    /// The WHERE and PARTITION shapes have no counterpart here: the builder
    /// exposes no filter or window controls, so those shapes are reachable
    /// only through raw text.
    pub fn of_draft(draft: &QueryBuilder) -> Option<Self> {
        match draft.selected_table.as_deref() {
            Some("users") => Some(QueryShape::AllUsers),
            Some("products") => {
                let by_price_desc = draft
                    .order_by
                    .as_ref()
                    .is_some_and(|o| o.column == "price" && o.direction == SortOrder::Desc);
                if by_price_desc {
                    Some(QueryShape::ProductsByPriceDesc)
                } else if draft.group_by.iter().any(|c| c == "category") {
                    Some(QueryShape::ProductsByCategory)
                } else {
                    Some(QueryShape::AllProducts)
                }
            }
            Some(_) if !draft.joins.is_empty() => Some(QueryShape::OrderDetails),
            _ => None,
        }
    }

    /// Run this shape's transformation over the registry's sample data.
    pub fn apply(&self, schema: &Schema) -> ResultTable {
        match self {
            QueryShape::AllUsers => select_all(schema, "users"),
            QueryShape::ExpensiveProducts => {
                filter_table(schema, "products", |row| {
                    row.get("price").and_then(Value::as_f64).is_some_and(|p| p > 500.0)
                })
            }
            QueryShape::ElectronicsProducts => {
                filter_table(schema, "products", |row| {
                    row.get("category") == Some(&Value::Str("Electronics".to_string()))
                })
            }
            QueryShape::ProductsByPriceDesc => sort_products_by_price_desc(schema),
            QueryShape::ProductsByCategory => group_products_by_category(schema),
            QueryShape::PriceRankInCategory => rank_products_within_category(schema),
            QueryShape::AllProducts => select_all(schema, "products"),
            QueryShape::OrderDetails => join_order_details(schema),
        }
    }
}

/// Execute a structured draft against the registry.
pub fn execute(draft: &QueryBuilder, schema: &Schema) -> ResultTable {
    QueryShape::of_draft(draft)
        .map(|shape| shape.apply(schema))
        .unwrap_or_else(ResultTable::empty)
}

/// Execute raw query text against the registry.
pub fn execute_sql(sql: &str, schema: &Schema) -> ResultTable {
    QueryShape::of_sql(sql)
        .map(|shape| shape.apply(schema))
        .unwrap_or_else(ResultTable::empty)
}

fn select_all(schema: &Schema, table: &str) -> ResultTable {
    match schema.table(table) {
        Some(t) => ResultTable {
            columns: t.column_names(),
            rows: t.sample_rows.clone(),
        },
        None => ResultTable::empty(),
    }
}

fn filter_table(schema: &Schema, table: &str, keep: impl Fn(&Row) -> bool) -> ResultTable {
    match schema.table(table) {
        Some(t) => ResultTable {
            columns: t.column_names(),
            rows: t.sample_rows.iter().filter(|r| keep(r)).cloned().collect(),
        },
        None => ResultTable::empty(),
    }
}

fn price_of(row: &Row) -> f64 {
    row.get("price").and_then(Value::as_f64).unwrap_or(0.0)
}

fn sort_products_by_price_desc(schema: &Schema) -> ResultTable {
    let mut result = select_all(schema, "products");
    // Vec::sort_by is stable, so equal prices keep source order.
    result
        .rows
        .sort_by(|a, b| price_of(b).partial_cmp(&price_of(a)).unwrap_or(Ordering::Equal));
    result
}

fn group_products_by_category(schema: &Schema) -> ResultTable {
    let Some(table) = schema.table("products") else {
        return ResultTable::empty();
    };

    // Groups keep first-encounter order.
    let mut groups: Vec<(String, i64, f64)> = Vec::new();
    for row in &table.sample_rows {
        let Some(Value::Str(category)) = row.get("category") else {
            continue;
        };
        let price = price_of(row);
        match groups.iter().position(|(c, _, _)| c == category) {
            Some(i) => {
                groups[i].1 += 1;
                groups[i].2 += price;
            }
            None => groups.push((category.clone(), 1, price)),
        }
    }

    ResultTable {
        columns: vec![
            "category".to_string(),
            "product_count".to_string(),
            "avg_price".to_string(),
        ],
        rows: groups
            .into_iter()
            .map(|(category, count, total)| {
                Row::from([
                    ("category".to_string(), Value::Str(category)),
                    ("product_count".to_string(), Value::Int(count)),
                    // Two decimals, as text: this matches what the result
                    // grid displays.
                    (
                        "avg_price".to_string(),
                        Value::Str(format!("{:.2}", total / count as f64)),
                    ),
                ])
            })
            .collect(),
    }
}

fn rank_products_within_category(schema: &Schema) -> ResultTable {
    let Some(table) = schema.table("products") else {
        return ResultTable::empty();
    };

    let mut columns = table.column_names();
    columns.push("price_rank".to_string());

    let rows = table
        .sample_rows
        .iter()
        .map(|product| {
            let mut peers: Vec<&Row> = table
                .sample_rows
                .iter()
                .filter(|p| p.get("category") == product.get("category"))
                .collect();
            // Stable sort: ties rank by source order, not dense/competition
            // semantics.
            peers.sort_by(|a, b| price_of(b).partial_cmp(&price_of(a)).unwrap_or(Ordering::Equal));
            let rank = peers
                .iter()
                .position(|p| p.get("id") == product.get("id"))
                .map(|i| i as i64 + 1)
                .unwrap_or(0);

            let mut row = product.clone();
            row.insert("price_rank".to_string(), Value::Int(rank));
            row
        })
        .collect();

    ResultTable { columns, rows }
}

fn join_order_details(schema: &Schema) -> ResultTable {
    let Some(orders) = schema.table("orders") else {
        return ResultTable::empty();
    };

    let rows = orders
        .sample_rows
        .iter()
        .map(|order| {
            Row::from([
                (
                    "id".to_string(),
                    order.get("id").cloned().unwrap_or(Value::Null),
                ),
                (
                    "user_name".to_string(),
                    parent_field(schema, "users", "orders", order, "name"),
                ),
                (
                    "product_name".to_string(),
                    parent_field(schema, "products", "orders", order, "name"),
                ),
                (
                    "quantity".to_string(),
                    order.get("quantity").cloned().unwrap_or(Value::Null),
                ),
            ])
        })
        .collect();

    ResultTable {
        columns: vec![
            "id".to_string(),
            "user_name".to_string(),
            "product_name".to_string(),
            "quantity".to_string(),
        ],
        rows,
    }
}

/// Follow the declared relationship from `child`'s row back to its parent
/// and read `field` there. A missing relationship, parent or key yields
/// `Null`, which the result grid renders as an empty cell.
fn parent_field(schema: &Schema, parent: &str, child: &str, child_row: &Row, field: &str) -> Value {
    let Some(rel) = schema.relationship(parent, child) else {
        return Value::Null;
    };
    let Some(parent_table) = schema.table(parent) else {
        return Value::Null;
    };
    let Some(key) = child_row.get(&rel.to_column) else {
        return Value::Null;
    };

    parent_table
        .sample_rows
        .iter()
        .find(|r| r.get(&rel.from_column) == Some(key))
        .and_then(|r| r.get(field))
        .cloned()
        .unwrap_or(Value::Null)
}
