//! Schema registry: tables, columns, relationships, sample rows.
//!
//! The registry is pure data. It is constructed once — either from the
//! embedded sample dataset or from JSON — and never mutated afterwards.
//!
//! # Example
//! ```
//! use sqlsketch::schema::Schema;
//!
//! let schema = Schema::sample();
//! let products = schema.table("products").unwrap();
//! assert_eq!(products.sample_rows.len(), 4);
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{SketchError, SketchResult};

/// Declared type of a schema column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Number,
    #[serde(rename = "string")]
    Text,
    Date,
}

/// A single cell value, in sample rows and result rows alike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    Date(NaiveDate),
    Str(String),
}

impl Value {
    /// Numeric view of the value, for filters, sorts and aggregates.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Whether this value is admissible under the declared column type.
    /// `Null` is always admissible.
    pub fn matches(&self, typ: ColumnType) -> bool {
        matches!(
            (self, typ),
            (Value::Null, _)
                | (Value::Int(_), ColumnType::Number)
                | (Value::Float(_), ColumnType::Number)
                | (Value::Str(_), ColumnType::Text)
                | (Value::Date(_), ColumnType::Date)
        )
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::Str(s) => write!(f, "{}", s),
        }
    }
}

/// A row is a mapping from column name to a typed value.
pub type Row = HashMap<String, Value>;

/// A column definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type", alias = "typ")]
    pub typ: ColumnType,
}

/// A table: ordered columns plus the sample rows the simulator runs on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
    #[serde(default)]
    pub sample_rows: Vec<Row>,
}

impl Table {
    /// Create a new table definition.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            columns: Vec::new(),
            sample_rows: Vec::new(),
        }
    }

    /// Builder: add a column.
    pub fn column(mut self, name: &str, typ: ColumnType) -> Self {
        self.columns.push(Column {
            name: name.to_string(),
            typ,
        });
        self
    }

    /// Builder: add a sample row from (column, value) pairs.
    pub fn row(mut self, cells: &[(&str, Value)]) -> Self {
        self.sample_rows
            .push(cells.iter().map(|(k, v)| (k.to_string(), v.clone())).collect());
        self
    }

    /// Column names in declaration order.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }
}

/// Direction of a relationship between two tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipKind {
    OneToMany,
    ManyToOne,
}

/// A declared relationship. Descriptive: the simulator consults it to
/// resolve foreign-key lookups but does not enforce it on edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub from_table: String,
    pub to_table: String,
    pub kind: RelationshipKind,
    pub from_column: String,
    pub to_column: String,
}

/// The schema registry: every table plus the declared relationships.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schema {
    pub tables: Vec<Table>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

impl Schema {
    /// Look up a table by name.
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Table names in registry order.
    pub fn table_names(&self) -> Vec<String> {
        self.tables.iter().map(|t| t.name.clone()).collect()
    }

    /// Find the relationship linking `from` to `to`, if declared.
    pub fn relationship(&self, from: &str, to: &str) -> Option<&Relationship> {
        self.relationships
            .iter()
            .find(|r| r.from_table == from && r.to_table == to)
    }

    /// Load a schema from JSON and validate the registry invariant.
    pub fn from_json(json: &str) -> SketchResult<Self> {
        let schema: Schema =
            serde_json::from_str(json).map_err(|e| SketchError::Schema(e.to_string()))?;
        schema.validate()?;
        Ok(schema)
    }

    /// Check that every relationship endpoint exists and that every sample
    /// row is consistent with its table's declared columns.
    pub fn validate(&self) -> SketchResult<()> {
        for rel in &self.relationships {
            for (table, column) in [
                (&rel.from_table, &rel.from_column),
                (&rel.to_table, &rel.to_column),
            ] {
                let t = self
                    .table(table)
                    .ok_or_else(|| SketchError::UnknownTable(table.clone()))?;
                if !t.columns.iter().any(|c| &c.name == column) {
                    return Err(SketchError::unknown_column(table.clone(), column.clone()));
                }
            }
        }

        for table in &self.tables {
            for row in &table.sample_rows {
                for (name, value) in row {
                    let col = table
                        .columns
                        .iter()
                        .find(|c| &c.name == name)
                        .ok_or_else(|| SketchError::unknown_column(&table.name, name))?;
                    if !value.matches(col.typ) {
                        return Err(SketchError::type_mismatch(
                            &table.name,
                            name,
                            format!("{:?} is not {:?}", value, col.typ),
                        ));
                    }
                }
            }
        }

        Ok(())
    }

    /// The embedded demo dataset: three users, four products, three orders.
    pub fn sample() -> Self {
        Self {
            tables: vec![
                Table::new("users")
                    .column("id", ColumnType::Number)
                    .column("name", ColumnType::Text)
                    .column("email", ColumnType::Text)
                    .column("joinDate", ColumnType::Date)
                    .row(&[
                        ("id", Value::Int(1)),
                        ("name", "John Doe".into()),
                        ("email", "john@example.com".into()),
                        ("joinDate", date(2024, 1, 15)),
                    ])
                    .row(&[
                        ("id", Value::Int(2)),
                        ("name", "Jane Smith".into()),
                        ("email", "jane@example.com".into()),
                        ("joinDate", date(2024, 2, 1)),
                    ])
                    .row(&[
                        ("id", Value::Int(3)),
                        ("name", "Bob Wilson".into()),
                        ("email", "bob@example.com".into()),
                        ("joinDate", date(2024, 2, 15)),
                    ]),
                Table::new("products")
                    .column("id", ColumnType::Number)
                    .column("name", ColumnType::Text)
                    .column("price", ColumnType::Number)
                    .column("category", ColumnType::Text)
                    .column("stock", ColumnType::Number)
                    .row(&[
                        ("id", Value::Int(1)),
                        ("name", "Laptop".into()),
                        ("price", Value::Float(999.99)),
                        ("category", "Electronics".into()),
                        ("stock", Value::Int(50)),
                    ])
                    .row(&[
                        ("id", Value::Int(2)),
                        ("name", "Headphones".into()),
                        ("price", Value::Float(99.99)),
                        ("category", "Electronics".into()),
                        ("stock", Value::Int(100)),
                    ])
                    .row(&[
                        ("id", Value::Int(3)),
                        ("name", "Coffee Maker".into()),
                        ("price", Value::Float(79.99)),
                        ("category", "Appliances".into()),
                        ("stock", Value::Int(30)),
                    ])
                    .row(&[
                        ("id", Value::Int(4)),
                        ("name", "Smartphone".into()),
                        ("price", Value::Float(699.99)),
                        ("category", "Electronics".into()),
                        ("stock", Value::Int(75)),
                    ]),
                Table::new("orders")
                    .column("id", ColumnType::Number)
                    .column("userId", ColumnType::Number)
                    .column("productId", ColumnType::Number)
                    .column("quantity", ColumnType::Number)
                    .column("orderDate", ColumnType::Date)
                    .column("status", ColumnType::Text)
                    .row(&[
                        ("id", Value::Int(1)),
                        ("userId", Value::Int(1)),
                        ("productId", Value::Int(1)),
                        ("quantity", Value::Int(1)),
                        ("orderDate", date(2024, 2, 1)),
                        ("status", "completed".into()),
                    ])
                    .row(&[
                        ("id", Value::Int(2)),
                        ("userId", Value::Int(2)),
                        ("productId", Value::Int(2)),
                        ("quantity", Value::Int(1)),
                        ("orderDate", date(2024, 2, 15)),
                        ("status", "completed".into()),
                    ])
                    .row(&[
                        ("id", Value::Int(3)),
                        ("userId", Value::Int(1)),
                        ("productId", Value::Int(3)),
                        ("quantity", Value::Int(2)),
                        ("orderDate", date(2024, 3, 1)),
                        ("status", "pending".into()),
                    ]),
            ],
            relationships: vec![
                Relationship {
                    from_table: "users".to_string(),
                    to_table: "orders".to_string(),
                    kind: RelationshipKind::OneToMany,
                    from_column: "id".to_string(),
                    to_column: "userId".to_string(),
                },
                Relationship {
                    from_table: "products".to_string(),
                    to_table: "orders".to_string(),
                    kind: RelationshipKind::OneToMany,
                    from_column: "id".to_string(),
                    to_column: "productId".to_string(),
                },
            ],
        }
    }
}

/// Total date constructor; an out-of-range date degrades to `Null`.
fn date(year: i32, month: u32, day: u32) -> Value {
    NaiveDate::from_ymd_opt(year, month, day)
        .map(Value::Date)
        .unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_schema_is_valid() {
        let schema = Schema::sample();
        assert!(schema.validate().is_ok());
        assert_eq!(schema.table_names(), vec!["users", "products", "orders"]);
    }

    #[test]
    fn test_schema_from_json() {
        let json = r#"{
            "tables": [{
                "name": "users",
                "columns": [
                    { "name": "id", "type": "number" },
                    { "name": "email", "type": "string" }
                ],
                "sample_rows": [{ "id": 1, "email": "a@b.c" }]
            }]
        }"#;

        let schema = Schema::from_json(json).unwrap();
        assert_eq!(schema.tables.len(), 1);
        assert_eq!(schema.tables[0].columns.len(), 2);
        assert_eq!(
            schema.tables[0].sample_rows[0]["email"],
            Value::Str("a@b.c".to_string())
        );
    }

    #[test]
    fn test_dangling_relationship_rejected() {
        let json = r#"{
            "tables": [{
                "name": "users",
                "columns": [{ "name": "id", "type": "number" }]
            }],
            "relationships": [{
                "from_table": "users",
                "to_table": "orders",
                "kind": "ONE_TO_MANY",
                "from_column": "id",
                "to_column": "userId"
            }]
        }"#;

        let err = Schema::from_json(json).unwrap_err();
        assert!(err.to_string().contains("orders"));
    }

    #[test]
    fn test_row_value_type_checked() {
        let schema = Schema {
            tables: vec![
                Table::new("t")
                    .column("id", ColumnType::Number)
                    .row(&[("id", "oops".into())]),
            ],
            relationships: vec![],
        };
        assert!(schema.validate().is_err());
    }

    #[test]
    fn test_relationship_lookup() {
        let schema = Schema::sample();
        let rel = schema.relationship("users", "orders").unwrap();
        assert_eq!(rel.from_column, "id");
        assert_eq!(rel.to_column, "userId");
        assert_eq!(rel.kind, RelationshipKind::OneToMany);
        assert!(schema.relationship("orders", "users").is_none());
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Float(999.99).to_string(), "999.99");
        assert_eq!(date(2024, 1, 15).to_string(), "2024-01-15");
        assert_eq!(Value::Null.to_string(), "NULL");
    }
}
