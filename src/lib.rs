//! # sqlsketch — visual SQL builder core
//!
//! > Sketch a query, read its SQL, preview the result.
//!
//! sqlsketch backs an interactive query-builder UI: a mutable draft is
//! assembled through discrete selection steps, rendered as canonical SQL
//! text, and "executed" by recognizing the query's shape and transforming
//! an embedded sample dataset. It is a teaching simulator, not a SQL
//! engine.
//!
//! ## Quick Example
//!
//! ```
//! use sqlsketch::prelude::*;
//!
//! let schema = Schema::sample();
//!
//! let mut draft = QueryBuilder::new();
//! draft.select_table("products");
//! draft.add_column("name");
//! draft.add_column("price");
//! draft.set_order_by_column("price");
//! draft.toggle_order_direction();
//!
//! assert_eq!(
//!     draft.to_sql().as_deref(),
//!     Some("SELECT name, price\nFROM products\nORDER BY price DESC;")
//! );
//!
//! let result = execute(&draft, &schema);
//! assert_eq!(result.rows.len(), 4);
//! ```

pub mod builder;
pub mod catalog;
pub mod config;
pub mod error;
pub mod schema;
pub mod simulator;
pub mod transpiler;

pub mod prelude {
    pub use crate::builder::{Join, OrderBy, QueryBuilder, SortOrder};
    pub use crate::error::*;
    pub use crate::schema::{Column, ColumnType, Relationship, Row, Schema, Table, Value};
    pub use crate::simulator::{execute, execute_sql, QueryShape, ResultTable};
    pub use crate::transpiler::ToSql;
}
