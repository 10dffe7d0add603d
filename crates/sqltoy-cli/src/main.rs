//! sqltoy CLI: run the canned relational-algebra queries over sample data.

mod demo;
mod formatter;
mod seed;

use clap::{Parser, Subcommand};
use sqltoy_core::config::{EngineConfig, NullOrdering, PaddingPolicy};
use tracing_subscriber::EnvFilter;

use crate::formatter::{format_table, OutputFormat};

#[derive(Parser)]
#[command(name = "sqltoy")]
#[command(about = "In-memory relational algebra over tables of rows", long_about = None)]
struct Cli {
    /// Log operator and stage events
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the demo queries over the sample tables
    Demo {
        /// Run only this query (see `sqltoy list`)
        #[arg(short, long)]
        query: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        output: OutputFormat,

        /// Outer-join padding when the other side is empty (overrides env)
        #[arg(long)]
        padding: Option<PaddingPolicy>,

        /// Null placement for column sorts (overrides env)
        #[arg(long)]
        nulls: Option<NullOrdering>,
    },

    /// List the demo queries
    List,

    /// Show the pipeline stages of the staged demo query (EXPLAIN)
    Explain,

    /// Print the sample database as JSON
    Dump,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Demo {
            query,
            output,
            padding,
            nulls,
        } => run_demo(query.as_deref(), output, padding, nulls),
        Commands::List => {
            for q in demo::QUERIES {
                println!("{:<10} {}", q.name, q.sql);
            }
            Ok(())
        }
        Commands::Explain => explain(),
        Commands::Dump => dump(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("sqltoy_cli=debug,sqltoy_catalog=debug,sqltoy_operators=trace,sqltoy_exec=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

fn run_demo(
    only: Option<&str>,
    output: OutputFormat,
    padding: Option<PaddingPolicy>,
    nulls: Option<NullOrdering>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = EngineConfig::from_env();
    if let Some(p) = padding {
        config.outer_join_padding = p;
    }
    if let Some(n) = nulls {
        config.null_ordering = n;
    }
    tracing::debug!(?config, "engine config");

    let queries: Vec<&demo::Query> = match only {
        Some(name) => vec![demo::find(name).ok_or_else(|| format!("unknown query '{name}'"))?],
        None => demo::QUERIES.iter().collect(),
    };

    let db = seed::sample_database()?;
    for q in queries {
        let table = (q.run)(&db, &config)?;
        if output == OutputFormat::Table {
            println!("-- {}", q.sql);
        }
        print!("{}", format_table(&table, output)?);
        if output != OutputFormat::Jsonl {
            println!();
        }
    }
    Ok(())
}

fn explain() -> Result<(), Box<dyn std::error::Error>> {
    let db = seed::sample_database()?;
    let (pipeline, _) = demo::headcount_pipeline(&db, &EngineConfig::from_env())?;
    println!("{}", serde_json::to_string_pretty(&pipeline.explain())?);
    Ok(())
}

fn dump() -> Result<(), Box<dyn std::error::Error>> {
    let db = seed::sample_database()?;
    println!("{}", serde_json::to_string_pretty(&db.to_json()?)?);
    Ok(())
}
