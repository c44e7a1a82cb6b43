use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use indicatif::ProgressBar;

mod output;

use output::ColorMode;

/// Mortgage document income scanner - extract structured income data from
/// PDFs and scanned images
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan documents, extract income fields, and print aggregated totals
    Scan {
        /// Paths to the PDF or image files to scan
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// OCR language model (default: eng)
        #[arg(long)]
        lang: Option<String>,

        /// Warn when extraction confidence falls below this value (0-1)
        #[arg(long)]
        low_confidence_warn: Option<f64>,

        /// Render as json, csv, text, or markdown instead of the default
        /// per-document report
        #[arg(short, long)]
        format: Option<String>,

        /// Write the rendered report to this path instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the full extracted text of each document
        #[arg(long)]
        show_text: bool,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Scan {
            files,
            no_color,
            lang,
            low_confidence_warn,
            format,
            output,
            show_text,
        } => scan(
            files,
            no_color,
            lang,
            low_confidence_warn,
            format,
            output,
            show_text,
        ),
    }
}

fn scan(
    files: Vec<PathBuf>,
    no_color: bool,
    lang: Option<String>,
    low_confidence_warn: Option<f64>,
    format: Option<String>,
    output: Option<PathBuf>,
    show_text: bool,
) -> anyhow::Result<()> {
    // Resolve configuration: CLI flags > env vars > config file > defaults
    let config_file = incomescan_core::config_file::load_config();
    let mut config = config_file.scan_config();
    if let Some(lang) = lang.or_else(|| std::env::var("INCOMESCAN_OCR_LANG").ok()) {
        config.ocr_language = lang;
    }
    if let Some(threshold) = low_confidence_warn {
        config.low_confidence_warn = threshold;
    }

    let format = format
        .as_deref()
        .map(incomescan_reporting::ExportFormat::from_str)
        .transpose()
        .map_err(|e| anyhow::anyhow!(e))?;

    let color = ColorMode(!no_color);

    // Process the batch, driving the progress bar from the per-document
    // callback. The batch itself never fails; unreadable documents come
    // back as Error sentinels.
    let progress = ProgressBar::new(files.len() as u64);
    let results = incomescan_ingest::process_batch_with_progress(&files, &config, |_, _| {
        progress.inc(1);
    });
    progress.finish_and_clear();

    let file_names: Vec<String> = files
        .iter()
        .map(|path| {
            path.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string())
        })
        .collect();
    let report = incomescan_reporting::ScanReport::new(&file_names, &results);

    match (format, output) {
        // Default: human-readable per-document report on stdout.
        (None, None) => {
            let mut stdout = std::io::stdout();
            output::print_documents(&mut stdout, &report, &results, show_text, color)?;
            output::print_summary(&mut stdout, &report.summary, color)?;
        }
        // Explicit format, no file: render to stdout.
        (Some(format), None) => {
            let rendered = incomescan_reporting::render(&report, format)
                .map_err(|e| anyhow::anyhow!(e))?;
            let mut stdout = std::io::stdout();
            stdout.write_all(rendered.as_bytes())?;
        }
        // File output: write the export, keep the human summary on stdout.
        (format, Some(path)) => {
            let format = format.unwrap_or(incomescan_reporting::ExportFormat::Json);
            incomescan_reporting::export_results(&report, format, &path)
                .map_err(|e| anyhow::anyhow!(e))?;

            let mut stdout = std::io::stdout();
            output::print_documents(&mut stdout, &report, &results, show_text, color)?;
            output::print_summary(&mut stdout, &report.summary, color)?;
            writeln!(stdout, "\nReport written to {}", path.display())?;
        }
    }

    Ok(())
}
