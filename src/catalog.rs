//! The built-in example queries, one per learning topic.
//!
//! Each entry carries the query text plus the prose shown next to it in
//! the demo UI. The texts double as fixtures for shape recognition.

use serde::Serialize;

/// Topic grouping for the example list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Basic,
    Joins,
    Aggregate,
    Advanced,
}

impl Category {
    /// Display name for tabs and headers.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Basic => "Basic Queries",
            Category::Joins => "JOINs",
            Category::Aggregate => "Aggregations",
            Category::Advanced => "Advanced",
        }
    }

    pub fn all() -> &'static [Category] {
        &[
            Category::Basic,
            Category::Joins,
            Category::Aggregate,
            Category::Advanced,
        ]
    }
}

/// A ready-made example query with its teaching text.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct QueryExample {
    pub category: Category,
    pub name: &'static str,
    pub query: &'static str,
    pub description: &'static str,
    pub explanation: &'static str,
}

/// Every example, in display order.
pub fn examples() -> &'static [QueryExample] {
    EXAMPLES
}

/// The examples belonging to one category, in display order.
pub fn in_category(category: Category) -> impl Iterator<Item = &'static QueryExample> {
    EXAMPLES.iter().filter(move |e| e.category == category)
}

const EXAMPLES: &[QueryExample] = &[
    QueryExample {
        category: Category::Basic,
        name: "Select All Users",
        query: "SELECT * FROM users",
        description: "Retrieves all user records",
        explanation: "The simplest query: every column of every row in the users table.",
    },
    QueryExample {
        category: Category::Basic,
        name: "Select Expensive Products",
        query: "SELECT * FROM products WHERE price > 500",
        description: "Finds products with price over $500",
        explanation: "A numeric WHERE condition keeps only rows whose price exceeds the \
                      threshold.",
    },
    QueryExample {
        category: Category::Basic,
        name: "Select with Where Clause",
        query: "SELECT name, price FROM products WHERE category = \"Electronics\";",
        description: "Find all electronic products",
        explanation: "The WHERE clause filters rows based on specific conditions. This query \
                      returns only products in the Electronics category.",
    },
    QueryExample {
        category: Category::Basic,
        name: "Order By",
        query: "SELECT name, price FROM products ORDER BY price DESC;",
        description: "List products by price (highest first)",
        explanation: "ORDER BY sorts the results. DESC means descending order (highest to \
                      lowest).",
    },
    QueryExample {
        category: Category::Joins,
        name: "Inner Join",
        query: "SELECT orders.id, users.name, products.name as product_name, orders.quantity\n\
                FROM orders\n\
                INNER JOIN users ON orders.userId = users.id\n\
                INNER JOIN products ON orders.productId = products.id;",
        description: "Show order details with user and product information",
        explanation: "INNER JOIN combines matching rows from multiple tables. This query \
                      connects orders with their corresponding user and product details.",
    },
    QueryExample {
        category: Category::Aggregate,
        name: "Group By with Having",
        query: "SELECT category, COUNT(*) as product_count, AVG(price) as avg_price\n\
                FROM products\n\
                GROUP BY category\n\
                HAVING COUNT(*) > 1;",
        description: "Calculate category statistics",
        explanation: "GROUP BY groups rows by a column, while HAVING filters these groups. \
                      Aggregate functions like COUNT and AVG compute values for each group.",
    },
    QueryExample {
        category: Category::Advanced,
        name: "Subquery in WHERE",
        query: "SELECT name, price\n\
                FROM products\n\
                WHERE price > (SELECT AVG(price) FROM products);",
        description: "Find above-average priced products",
        explanation: "A subquery is a query within another query. This example finds products \
                      priced higher than the average product price.",
    },
    QueryExample {
        category: Category::Advanced,
        name: "Window Function",
        query: "SELECT category, name, price,\n\
                RANK() OVER (PARTITION BY category ORDER BY price DESC) as price_rank\n\
                FROM products;",
        description: "Rank products by price within categories",
        explanation: "Window functions perform calculations across a set of rows. This ranks \
                      products by price within each category.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::QueryShape;

    #[test]
    fn test_category_filter() {
        assert_eq!(in_category(Category::Basic).count(), 4);
        assert_eq!(in_category(Category::Joins).count(), 1);
        assert_eq!(examples().len(), 8);
    }

    #[test]
    fn test_example_queries_resolve_to_shapes() {
        let shapes: Vec<Option<QueryShape>> = examples()
            .iter()
            .map(|e| QueryShape::of_sql(e.query))
            .collect();

        assert_eq!(
            shapes,
            vec![
                Some(QueryShape::AllUsers),
                Some(QueryShape::ExpensiveProducts),
                Some(QueryShape::ElectronicsProducts),
                Some(QueryShape::ProductsByPriceDesc),
                Some(QueryShape::OrderDetails),
                Some(QueryShape::ProductsByCategory),
                Some(QueryShape::AllProducts),
                // The window example embeds "ORDER BY price DESC" inside its
                // OVER clause, and the sort marker outranks the partition
                // marker. First match wins.
                Some(QueryShape::ProductsByPriceDesc),
            ]
        );
    }
}
