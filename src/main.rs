use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use avl_treesort::{audit, avl_height_bound, BalancedTree, SortConfig, Traversal, TreeSorter};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "treesort", about = "Sort integers through an arena-backed AVL tree")]
struct Cli {
    /// Log filter (e.g. `debug`, `avl_treesort=trace`).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sort whitespace-separated integers and print them on one line.
    Sort {
        /// Input file (reads stdin when omitted).
        input: Option<PathBuf>,
        /// Print rotation and arena statistics to stderr.
        #[arg(long)]
        stats: bool,
        /// Audit tree invariants before writing output.
        #[arg(long)]
        verify: bool,
        /// Flatten with the explicit-stack walk instead of recursion.
        #[arg(long)]
        iterative: bool,
    },
    /// Build the tree, audit it, and print its shape.
    Check {
        /// Input file (reads stdin when omitted).
        input: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    match cli.command {
        Commands::Sort {
            input,
            stats,
            verify,
            iterative,
        } => run_sort(input, stats, verify, iterative)?,
        Commands::Check { input } => run_check(input)?,
    }

    Ok(())
}

fn init_logging(level: &str) -> Result<()> {
    let filter =
        EnvFilter::try_new(level).with_context(|| format!("invalid log level '{}'", level))?;
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {}", e))
}

fn run_sort(input: Option<PathBuf>, stats: bool, verify: bool, iterative: bool) -> Result<()> {
    let mut values = read_input(input.as_ref())?;

    let config = SortConfig {
        verify_invariants: verify,
        traversal: if iterative {
            Traversal::Iterative
        } else {
            Traversal::Recursive
        },
        ..SortConfig::default()
    };
    let report = TreeSorter::new(config)
        .sort(&mut values)
        .context("tree sort failed")?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for (idx, value) in values.iter().enumerate() {
        if idx > 0 {
            write!(out, " ")?;
        }
        write!(out, "{}", value)?;
    }
    writeln!(out)?;
    out.flush()?;

    if stats {
        eprintln!("{}", report.report());
    }

    Ok(())
}

fn run_check(input: Option<PathBuf>) -> Result<()> {
    let values = read_input(input.as_ref())?;
    if values.is_empty() {
        println!("empty input, nothing to check");
        return Ok(());
    }

    let mut tree = BalancedTree::with_capacity(values.len())
        .context("failed to reserve node arena")?;
    for &value in &values {
        tree.insert(value);
    }

    let summary = audit::check(&tree).context("tree audit failed")?;
    let rotations = tree.rotations();
    println!(
        "nodes={}\theight={}\tbound={}\trotations={}",
        summary.nodes,
        summary.height,
        avl_height_bound(summary.nodes),
        rotations.events()
    );

    let usage = tree.release();
    println!("arena={}/{}", usage.allocated, usage.capacity);

    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> Result<Vec<i64>> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open input file {}", path.display()))?;
            parse_integers(BufReader::new(file))
                .with_context(|| format!("failed to read integers from {}", path.display()))
        }
        None => parse_integers(io::stdin().lock()).context("failed to read integers from stdin"),
    }
}

fn parse_integers<R: BufRead>(reader: R) -> Result<Vec<i64>> {
    let mut values = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        for token in line.split_whitespace() {
            let value: i64 = token.parse().with_context(|| {
                format!("invalid integer '{}' on line {}", token, line_no + 1)
            })?;
            values.push(value);
        }
    }

    Ok(values)
}
