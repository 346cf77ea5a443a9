//! sqlsketch — preview SQL queries against the built-in sample schema.
//!
//! # Usage
//!
//! ```bash
//! # Execute a query
//! sqlsketch 'SELECT * FROM products ORDER BY price DESC;'
//!
//! # Classify only (show the recognized shape, skip the rows)
//! sqlsketch 'SELECT * FROM users' --classify
//!
//! # Browse the example catalog / the schema
//! sqlsketch examples
//! sqlsketch schema
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;

use sqlsketch::catalog::{self, Category};
use sqlsketch::config::Config;
use sqlsketch::prelude::*;

#[derive(Parser)]
#[command(name = "sqlsketch")]
#[command(version)]
#[command(about = "Preview SQL queries against a built-in sample schema", long_about = None)]
#[command(after_help = "EXAMPLES:
    sqlsketch 'SELECT * FROM users'
    sqlsketch 'SELECT name, price FROM products ORDER BY price DESC;' --format json
    sqlsketch examples --category aggregate")]
struct Cli {
    /// The SQL query text to execute
    query: Option<String>,

    /// Don't execute, just show the recognized query shape
    #[arg(short, long)]
    classify: bool,

    /// Output format
    #[arg(short, long, value_enum, env = "SQLSKETCH_FORMAT")]
    format: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// List the example queries
    Examples {
        /// Restrict to one category
        #[arg(short, long, value_enum)]
        category: Option<CategoryArg>,
    },
    /// Print the sample schema: tables, columns, relationships
    Schema,
}

#[derive(Clone, Copy, ValueEnum)]
enum CategoryArg {
    Basic,
    Joins,
    Aggregate,
    Advanced,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Basic => Category::Basic,
            CategoryArg::Joins => Category::Joins,
            CategoryArg::Aggregate => Category::Aggregate,
            CategoryArg::Advanced => Category::Advanced,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "Warning:".yellow().bold(), e);
            Config::default()
        }
    };

    if cli.no_color || config.color == Some(false) {
        colored::control::set_override(false);
    }

    let schema = Schema::sample();

    match &cli.command {
        Some(Commands::Examples { category }) => show_examples((*category).map(Into::into)),
        Some(Commands::Schema) => show_schema(&schema),
        None => {
            if let Some(query) = &cli.query {
                if let Err(e) = run_query(query, &cli, &config, &schema) {
                    eprintln!("{} {}", "Error:".red().bold(), e);
                    std::process::exit(1);
                }
            } else {
                println!("{}", "sqlsketch — SQL query preview".cyan().bold());
                println!();
                println!("Usage: sqlsketch <QUERY> [OPTIONS]");
                println!();
                println!("Try: sqlsketch --help");
            }
        }
    }
}

fn run_query(query: &str, cli: &Cli, config: &Config, schema: &Schema) -> Result<()> {
    if cli.verbose {
        println!("{} {}", "Input:".dimmed(), query.yellow());
    }

    let shape = QueryShape::of_sql(query);

    if cli.classify || cli.verbose {
        match shape {
            Some(shape) => println!("{} {:?}", "Shape:".green().bold(), shape),
            None => println!("{} {}", "Shape:".green().bold(), "(unrecognized)".dimmed()),
        }
        if cli.classify {
            return Ok(());
        }
    }

    let result = execute_sql(query, schema);
    if result.columns.is_empty() {
        println!("{}", "Query not supported in demo".yellow());
        return Ok(());
    }

    format_output(&result, &output_format(cli, config))?;
    Ok(())
}

fn output_format(cli: &Cli, config: &Config) -> OutputFormat {
    if let Some(format) = cli.format {
        return format;
    }
    match config.format.as_deref() {
        Some("json") => OutputFormat::Json,
        _ => OutputFormat::Table,
    }
}

fn format_output(result: &ResultTable, format: &OutputFormat) -> Result<()> {
    if result.rows.is_empty() {
        println!("{}", "(no results)".dimmed());
        return Ok(());
    }

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result.rows)?);
        }
        OutputFormat::Table => {
            // Column widths from header and cell text.
            let widths: Vec<usize> = result
                .columns
                .iter()
                .map(|col| {
                    result
                        .rows
                        .iter()
                        .map(|row| cell_text(row, col).len())
                        .chain(std::iter::once(col.len()))
                        .max()
                        .unwrap_or(0)
                })
                .collect();

            let header: Vec<String> = result
                .columns
                .iter()
                .zip(&widths)
                .map(|(col, w)| format!("{:width$}", col, width = w))
                .collect();
            println!("{}", header.join(" │ ").white().bold());

            let sep: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
            println!("{}", sep.join("─┼─").dimmed());

            for row in &result.rows {
                let cells: Vec<String> = result
                    .columns
                    .iter()
                    .zip(&widths)
                    .map(|(col, w)| format!("{:width$}", cell_text(row, col), width = w))
                    .collect();
                println!("{}", cells.join(" │ "));
            }

            println!();
            println!("{} row(s) returned", result.rows.len().to_string().cyan());
        }
    }
    Ok(())
}

fn cell_text(row: &Row, column: &str) -> String {
    row.get(column).map(Value::to_string).unwrap_or_default()
}

fn show_examples(category: Option<Category>) {
    let categories: Vec<Category> = match category {
        Some(c) => vec![c],
        None => Category::all().to_vec(),
    };

    for category in categories {
        println!("{}", category.label().cyan().bold());
        for example in catalog::in_category(category) {
            println!();
            println!("  {}", example.name.white().bold());
            println!("  {}", example.description.dimmed());
            for line in example.query.lines() {
                println!("    {}", line.yellow());
            }
        }
        println!();
    }
}

fn show_schema(schema: &Schema) {
    for table in &schema.tables {
        println!(
            "{} {}",
            table.name.white().bold(),
            format!("({} sample rows)", table.sample_rows.len()).dimmed()
        );
        for column in &table.columns {
            println!("  {} {}", column.name, format!("{:?}", column.typ).to_lowercase().dimmed());
        }
        println!();
    }

    if !schema.relationships.is_empty() {
        println!("{}", "Relationships".cyan().bold());
        for rel in &schema.relationships {
            println!(
                "  {}.{} {} {}.{} {}",
                rel.from_table,
                rel.from_column,
                "→".dimmed(),
                rel.to_table,
                rel.to_column,
                format!("({:?})", rel.kind).dimmed()
            );
        }
    }
}
