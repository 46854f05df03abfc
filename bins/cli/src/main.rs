//! `gst-invoice` command-line tool.
//!
//! Drafts are JSON files holding one invoice. `new` writes a prefilled
//! draft, `show` prints the rendered invoice, `totals` prints the computed
//! figures as JSON.

use std::path::PathBuf;

use anyhow::{Context, bail};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gst_invoice_core::invoice::{Invoice, render_invoice};
use gst_invoice_core::words::number_to_words;
use gst_invoice_shared::AppConfig;
use gst_invoice_store::DraftStore;

#[derive(Parser)]
#[command(
    name = "gst-invoice",
    about = "Draft export and RCM self-invoices and check their totals",
    version = env!("CARGO_PKG_VERSION")
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, short, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a prefilled draft
    New {
        /// Invoice variant
        #[arg(long, value_enum)]
        kind: DraftKind,
        /// Draft file to create
        #[arg(long)]
        out: PathBuf,
        /// Invoice date [default: today]
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the rendered invoice for a draft
    Show {
        /// Draft file
        file: PathBuf,
    },
    /// Print totals and amount in words as JSON
    Totals {
        /// Draft file
        file: PathBuf,
    },
    /// Print a whole number in words (Indian grouping)
    Words {
        /// Non-negative integer below 10^15
        number: u64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DraftKind {
    /// Export of services under LUT
    Export,
    /// RCM self-invoice for import of service
    Rcm,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays parseable
    let level = if cli.debug { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("gst_invoice={level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::New {
            kind,
            out,
            date,
            force,
        } => {
            let config = AppConfig::load().context("Failed to load configuration")?;
            let date = date.unwrap_or_else(|| Utc::now().date_naive());
            let invoice = match kind {
                DraftKind::Export => Invoice::sample_export(&config.invoice, date),
                DraftKind::Rcm => Invoice::sample_rcm(&config.invoice, date),
            };

            let drafts = DraftStore::new(out);
            let exists = tokio::fs::try_exists(drafts.path())
                .await
                .with_context(|| format!("Failed to check {}", drafts.path().display()))?;
            if exists && !force {
                bail!(
                    "{} already exists; pass --force to replace it",
                    drafts.path().display()
                );
            }
            drafts.save(&invoice).await?;
            println!("Wrote {}", drafts.path().display());
        }
        Commands::Show { file } => {
            let invoice = load_draft(file).await?;
            let computed = invoice.compute()?;
            println!("{}", render_invoice(&invoice, &computed));
        }
        Commands::Totals { file } => {
            let invoice = load_draft(file).await?;
            let computed = invoice.compute()?;
            let output = json!({
                "invoice_number": invoice.invoice_number,
                "totals": computed.totals.rounded(),
                "exact_totals": computed.totals,
                "amount_in_words": computed.amount_in_words,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Words { number } => {
            println!("{}", number_to_words(number)?);
        }
    }

    Ok(())
}

async fn load_draft(file: PathBuf) -> anyhow::Result<Invoice> {
    let drafts = DraftStore::new(file);
    let invoice = drafts
        .load()
        .await?
        .with_context(|| format!("{} does not exist", drafts.path().display()))?;
    debug!(path = %drafts.path().display(), "Loaded draft");
    Ok(invoice)
}
