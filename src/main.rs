//! BNM Reporting CLI
//!
//! Command-line interface for running the consolidation batch.
//! Every `run` option can also come from a BNM_* environment variable.

use anyhow::{Context, Result};
use bnm_reporting::config::{
    DEFAULT_BANK_NAME, DEFAULT_DATASET_PATH, DEFAULT_REPORT_ID, DEFAULT_REPORT_PATH, DEFAULT_TITLE,
};
use bnm_reporting::report::DEFAULT_PAGE_LENGTH;
use bnm_reporting::{AmountIndicator, BalanceRecord, Classifier, MappingTables, ReportRunner, RunConfig};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use log::info;
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "bnm-report", version)]
#[command(about = "Consolidate account extracts into BNM regulatory line items", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load extracts, consolidate, write the dataset and the ASA report
    Run(RunArgs),
    /// Show the codes a single record would be reported under
    Classify(ClassifyArgs),
    /// Write the effective mapping tables as CSV files
    ExportTables(ExportArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Account extract CSV files
    #[arg(required = true, env = "BNM_INPUTS", value_delimiter = ',')]
    inputs: Vec<PathBuf>,
    /// Directory of mapping CSVs (built-in tables when omitted)
    #[arg(long, env = "BNM_MAPPING_DIR")]
    mapping_dir: Option<PathBuf>,
    #[arg(long, env = "BNM_DATASET", default_value = DEFAULT_DATASET_PATH)]
    dataset: PathBuf,
    #[arg(long, env = "BNM_REPORT", default_value = DEFAULT_REPORT_PATH)]
    report: PathBuf,
    /// Reporting date, YYYY-MM-DD (defaults to today)
    #[arg(long, env = "BNM_REPORT_DATE")]
    date: Option<NaiveDate>,
    #[arg(long, env = "BNM_PAGE_LENGTH", default_value_t = DEFAULT_PAGE_LENGTH)]
    page_length: usize,
    #[arg(long, env = "BNM_BANK_NAME", default_value = DEFAULT_BANK_NAME)]
    bank_name: String,
    #[arg(long, env = "BNM_REPORT_ID", default_value = DEFAULT_REPORT_ID)]
    report_id: String,
    #[arg(long, env = "BNM_TITLE", default_value = DEFAULT_TITLE)]
    title: String,
    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ClassifyArgs {
    #[arg(long)]
    product: u16,
    #[arg(long)]
    custcd: String,
    #[arg(long, default_value = "")]
    statecd: String,
    #[arg(long, default_value = "D")]
    amtind: AmountIndicator,
    #[arg(long, default_value = "1")]
    balance: Decimal,
    #[arg(long)]
    npl: bool,
    #[arg(long, env = "BNM_MAPPING_DIR")]
    mapping_dir: Option<PathBuf>,
}

#[derive(Args)]
struct ExportArgs {
    /// Destination directory
    dir: PathBuf,
    /// Export these tables instead of the built-in ones
    #[arg(long, env = "BNM_MAPPING_DIR")]
    mapping_dir: Option<PathBuf>,
}

fn load_tables(mapping_dir: Option<&Path>) -> Result<MappingTables> {
    match mapping_dir {
        Some(dir) => MappingTables::from_csv_path(dir)
            .with_context(|| format!("failed to load mapping tables from {}", dir.display())),
        None => Ok(MappingTables::default_tables()),
    }
}

fn run(args: RunArgs) -> Result<()> {
    let report_date = args
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let config = RunConfig {
        inputs: args.inputs,
        mapping_dir: args.mapping_dir,
        dataset_path: args.dataset,
        report_path: args.report,
        report_date,
        page_length: args.page_length,
        bank_name: args.bank_name,
        report_id: args.report_id,
        title: args.title,
    };

    let runner = ReportRunner::for_config(&config).context("failed to prepare mapping tables")?;
    let summary = runner.run(&config).context("reporting run failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let stats = summary.consolidation.stats;
    println!("BNM consolidation as at {}", summary.report_date.format("%d/%m/%Y"));
    println!("  Records read:   {}", stats.records_read);
    println!("  Mapped:         {}", stats.mapped);
    println!("  Ineligible:     {}", stats.ineligible);
    println!("  Unmapped:       {}", stats.unmapped);
    println!("  No state code:  {}", stats.state_unmapped);
    println!("  Report lines:   {}", summary.consolidation.line_count);
    for (amtind, total) in &summary.consolidation.totals {
        println!("  Total {}:        {}", amtind, bnm_reporting::report::fmt_comma(*total, 2));
    }
    println!(
        "  Reconciliation: {}",
        if summary.consolidation.balanced { "balanced" } else { "BREAK" }
    );
    println!("Dataset written to: {}", summary.dataset_path.display());
    println!("Report written to:  {} ({} pages)", summary.report_path.display(), summary.pages);
    Ok(())
}

fn classify(args: ClassifyArgs) -> Result<()> {
    let tables = load_tables(args.mapping_dir.as_deref())?;
    let record = BalanceRecord::new(0, args.product, &args.custcd, &args.statecd, args.amtind, args.balance)
        .with_npl(args.npl);

    let classification = Classifier::new(&tables).classify(&record);
    let codes = classification.codes();
    if codes.is_empty() {
        println!("no codes ({:?})", classification);
    }
    for classified in codes {
        println!("{}  {}  {}", classified.code, record.amtind, classified.kind);
    }
    Ok(())
}

fn export_tables(args: ExportArgs) -> Result<()> {
    let tables = load_tables(args.mapping_dir.as_deref())?;
    tables
        .export_csv(&args.dir)
        .with_context(|| format!("failed to export tables to {}", args.dir.display()))?;
    info!("mapping tables exported to {}", args.dir.display());
    println!("Mapping tables written to: {}", args.dir.display());
    Ok(())
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Command::Run(args) => run(args),
        Command::Classify(args) => classify(args),
        Command::ExportTables(args) => export_tables(args),
    };

    if let Err(err) = outcome {
        eprintln!("error: {:#}", err);
        process::exit(1);
    }
}
