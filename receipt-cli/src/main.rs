use std::path::PathBuf;

use anyhow::Context;
use chrono::Datelike;
use clap::Parser;
use tracing::{debug, info, warn};

use receipt_cli::{
    app,
    config::AppConfig,
    exporter::TextFileExporter,
    form_file::FormDocument,
    logging,
};
use receipt_core::ExportOutcome;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Fee receipt generator for the music school.
///
/// Reads a filled-in payment form, validates it and prints the receipt.
/// With `--out-dir` the receipt is also saved to disk.
#[derive(Debug, Parser)]
struct Cli {
    /// Payment form to submit (TOML).
    form: PathBuf,

    /// Configuration file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory to save the receipt in.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Year shown by the month picker. Defaults to the current year.
    #[arg(long)]
    year: Option<i32>,

    /// Log level or filter directive, e.g. `debug`. `RUST_LOG` wins.
    #[arg(long)]
    log_level: Option<String>,
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => AppConfig::default(),
    };
    logging::init_logging(&config.logging, cli.log_level.as_deref())?;

    let year = cli.year.unwrap_or_else(|| chrono::Local::now().year());
    debug!(form = %cli.form.display(), year, "loading form");
    let document = FormDocument::load(&cli.form)
        .with_context(|| format!("loading form from {}", cli.form.display()))?;

    let mut session = app::prepare_session(config, document, year);
    if let Err(errors) = session.submit() {
        eprintln!("The form has {} error(s):", errors.len());
        eprint!("{}", app::render_errors(errors));
        anyhow::bail!("form validation failed");
    }

    let receipt = session
        .receipt()
        .context("submitted invoice has no receipt")?;
    println!("{receipt}");

    if let Some(out_dir) = cli.out_dir {
        let exporter = TextFileExporter::new(out_dir);
        match session.export(&exporter).await? {
            ExportOutcome::Exported { file_name } => {
                info!(
                    path = %exporter.output_path(&file_name).display(),
                    "receipt saved"
                );
            }
            other => warn!(?other, "receipt not saved"),
        }
    }

    Ok(())
}
