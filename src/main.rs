use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use csvscope::analyze::{analyze_csv, AnalyzeOptions, DEFAULT_SAMPLE_ROWS};
use csvscope::report;
use csvscope::session::AnalysisSession;
use csvscope::summary::DataSummary;

#[derive(Parser, Debug)]
#[command(name = "csvscope")]
#[command(about = "Summarize CSV data and project chart-ready series", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a CSV file into a statistical summary (JSON on stdout)
    Analyze {
        /// CSV file to read; stdin when omitted
        file: Option<PathBuf>,
        /// Keep every row in the summary, not just the sample
        #[arg(long)]
        full_data: bool,
        /// Number of sample rows kept in the summary
        #[arg(long, default_value_t = DEFAULT_SAMPLE_ROWS)]
        sample_rows: usize,
    },
    /// Project a summary into chart-ready series (JSON on stdout)
    Chart {
        /// Summary JSON file to read; stdin when omitted
        file: Option<PathBuf>,
        /// Keep only rows with a value in this column
        #[arg(long)]
        filter_column: Option<String>,
        /// Column for the x axis
        #[arg(long)]
        x_axis: Option<String>,
        /// Column for the y axis
        #[arg(long)]
        y_axis: Option<String>,
        /// Column counted for the pie chart
        #[arg(long)]
        pie_column: Option<String>,
    },
    /// Print a plain-text overview of a summary
    Summary {
        /// Summary JSON file to read; stdin when omitted
        file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Analyze {
            file,
            full_data,
            sample_rows,
        } => run_analyze(&file, full_data, sample_rows),
        Command::Chart {
            file,
            filter_column,
            x_axis,
            y_axis,
            pie_column,
        } => run_chart(&file, filter_column, x_axis, y_axis, pie_column),
        Command::Summary { file } => run_summary(&file),
    }
}

fn run_analyze(file: &Option<PathBuf>, full_data: bool, sample_rows: usize) -> Result<()> {
    let input = read_input(file)?;
    let options = AnalyzeOptions {
        include_full_data: full_data,
        sample_rows,
    };
    let summary = analyze_csv(input.as_bytes(), &options)?;
    print_json(&summary)
}

fn run_chart(
    file: &Option<PathBuf>,
    filter_column: Option<String>,
    x_axis: Option<String>,
    y_axis: Option<String>,
    pie_column: Option<String>,
) -> Result<()> {
    let summary = read_summary(file)?;

    let mut session = AnalysisSession::new();
    session.load_summary(summary);
    if let Some(column) = filter_column {
        session.set_filter_column(&column);
    }
    if let Some(column) = x_axis {
        session.set_x_axis(&column);
    }
    if let Some(column) = y_axis {
        session.set_y_axis(&column);
    }
    if let Some(column) = pie_column {
        session.set_pie_column(&column);
    }

    let dashboard = session
        .dashboard()
        .ok_or_else(|| anyhow!("No summary loaded"))?;
    if dashboard.large_dataset {
        eprintln!(
            "Warning: charting {} rows; rendering may be slow",
            dashboard.filtered_rows
        );
    }
    print_json(&dashboard)
}

fn run_summary(file: &Option<PathBuf>) -> Result<()> {
    let summary = read_summary(file)?;
    print!("{}", report::render_overview(&summary));
    Ok(())
}

/// Read a file, or stdin when no path is given.
fn read_input(file: &Option<PathBuf>) -> Result<String> {
    match file {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
        }
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            Ok(buffer)
        }
    }
}

fn read_summary(file: &Option<PathBuf>) -> Result<DataSummary> {
    let input = read_input(file)?;
    let summary: DataSummary =
        serde_json::from_str(&input).context("Failed to parse summary JSON")?;
    summary.validate()?;
    Ok(summary)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to encode JSON")?;
    println!("{}", json);
    Ok(())
}
