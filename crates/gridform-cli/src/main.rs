//! Gridform CLI - edit, show and export the grid

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use gridform::prelude::*;
use gridform::{COLS, ROWS};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gridform")]
#[command(author, version, about = "Edit a 10x5 grid of text cells and export it to XLSX")]
struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory the grid is saved in
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Directory exports are written to
    #[arg(long, global = true)]
    download_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the grid with row and column labels
    Show,

    /// Print the value of one cell
    Get {
        /// Cell address (A1 through E10)
        cell: String,
    },

    /// Set the value of one cell
    Set {
        /// Cell address (A1 through E10)
        cell: String,

        /// New value
        value: String,
    },

    /// Empty one cell
    Clear {
        /// Cell address (A1 through E10)
        cell: String,
    },

    /// Export the grid to a timestamped XLSX file
    Export {
        /// Destination directory (default: downloads directory)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// Print the first sheet of an exported XLSX file
    Inspect {
        /// Exported XLSX file
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load config")?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(dir) = cli.download_dir {
        config.download_dir = dir;
    }
    tracing::debug!(?config, "resolved configuration");

    match cli.command {
        Commands::Show => show(&config).await,
        Commands::Get { cell } => get(&config, &cell).await,
        Commands::Set { cell, value } => set(&config, &cell, value).await,
        Commands::Clear { cell } => set(&config, &cell, String::new()).await,
        Commands::Export { dir } => export(config, dir).await,
        Commands::Inspect { input } => inspect(&input),
    }
}

async fn show(config: &Config) -> Result<()> {
    let session = Session::from_config(config).await;
    print_matrix(&session.matrix());
    Ok(())
}

async fn get(config: &Config, cell: &str) -> Result<()> {
    let index = CellIndex::parse(cell).with_context(|| format!("Bad cell '{}'", cell))?;
    let session = Session::from_config(config).await;
    println!("{}", session.get(index.get())?);
    Ok(())
}

async fn set(config: &Config, cell: &str, value: String) -> Result<()> {
    let index = CellIndex::parse(cell).with_context(|| format!("Bad cell '{}'", cell))?;
    let mut session = Session::from_config(config).await;

    // The process exits right after, so wait for the save to land
    session.set(index.get(), value)?.wait().await;
    tracing::info!(cell = %index, "cell updated");
    Ok(())
}

async fn export(mut config: Config, dir: Option<PathBuf>) -> Result<()> {
    if let Some(dir) = dir {
        config.download_dir = dir;
    }
    let session = Session::from_config(&config).await;

    let notification = session.export().await;
    println!("{}", notification);
    match notification.path() {
        Some(path) => {
            eprintln!("Wrote '{}'", path.display());
            Ok(())
        }
        None => bail!(
            "export to '{}' failed",
            session.download_dir().display()
        ),
    }
}

fn inspect(input: &Path) -> Result<()> {
    let matrix = XlsxReader::read_file(input)
        .with_context(|| format!("Failed to open '{}'", input.display()))?;
    if matrix.row_count() != ROWS || matrix.col_count() != COLS {
        eprintln!(
            "Warning: sheet is {}x{}, expected {}x{}",
            matrix.row_count(),
            matrix.col_count(),
            ROWS,
            COLS
        );
    }
    print_matrix(&matrix);
    Ok(())
}

/// Print a matrix as a tab-separated table with header labels
fn print_matrix(matrix: &Matrix) {
    let mut header = String::from("Index");
    for col in 0..matrix.col_count() {
        header.push('\t');
        header.push_str(&column_label(col));
    }
    println!("{}", header);

    for (row, values) in matrix.rows().iter().enumerate() {
        let mut line = row_label(row);
        for value in values {
            line.push('\t');
            line.push_str(&value.escape_debug().to_string());
        }
        println!("{}", line);
    }
}
