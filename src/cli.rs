// src/cli.rs
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{eyre, WrapErr};

use crate::attributes::{FieldKind, Registry};
use crate::config::{consts::CONFIG_FILE, AppOptions};
use crate::progress::Progress;

/// Refresh property listing sheets from their listing pages.
#[derive(Debug, Parser)]
#[command(name = "listing_updater", version, about)]
pub struct Args {
    /// TOML config file. Missing file = built-in defaults.
    #[arg(short, long, default_value = CONFIG_FILE)]
    pub config: PathBuf,

    /// Only update this sheet (repeatable). Matches the sheet name, case-insensitive.
    #[arg(short, long = "sheet", value_name = "NAME")]
    pub sheets: Vec<String>,

    /// Parallel listing fetches.
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Log filter, e.g. `debug` or `listing_updater=trace`.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Fetch and merge but do not write any sheet.
    #[arg(long)]
    pub dry_run: bool,

    /// Print the column layout (name, rank, kind) and exit.
    #[arg(long)]
    pub list_fields: bool,
}

pub fn run() -> color_eyre::Result<()> {
    run_with(Args::parse())
}

pub fn run_with(args: Args) -> color_eyre::Result<()> {
    if args.list_fields {
        let registry = Registry::standard()?;
        for def in registry.ranked() {
            let kind = match def.kind() {
                FieldKind::Static => "static",
                FieldKind::Derived(_) => "derived",
            };
            println!("{},{},{}", def.name(), def.rank(), kind);
        }
        return Ok(());
    }

    let mut opts = AppOptions::load(&args.config)
        .wrap_err_with(|| format!("loading {}", args.config.display()))?;
    if let Some(level) = args.log_level { opts.log.level = level; }
    if let Some(w) = args.workers { opts.fetch.workers = w.max(1); }
    opts.retain_sheets(&args.sheets);
    if opts.sheets.is_empty() {
        return Err(eyre!("no sheet matches {:?}", args.sheets));
    }

    crate::log::init(&opts.log)?;
    tracing::info!(sheets = opts.sheets.len(), workers = opts.fetch.workers, "starting");

    let mut progress = ConsoleProgress::default();
    let summary = crate::updater::run(&opts, args.dry_run, Some(&mut progress))?;

    for sheet in &summary.sheets {
        eprintln!(
            "{}: {} rows, {} refreshed, {} failed, {} without id{}",
            sheet.name,
            sheet.rows,
            sheet.refreshed,
            sheet.failed.len(),
            sheet.without_id,
            if sheet.written { "" } else { " (not written)" },
        );
    }
    Ok(())
}

/// Progress on stderr: one line per sheet, a counter while fetching.
#[derive(Default)]
struct ConsoleProgress {
    total: usize,
    done: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
    }

    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }

    fn item_done(&mut self, listing_id: &str) {
        self.done += 1;
        eprintln!("  [{}/{}] {listing_id}", self.done, self.total);
    }

    fn item_failed(&mut self, listing_id: &str, reason: &str) {
        self.done += 1;
        eprintln!("  [{}/{}] {listing_id} FAILED: {reason}", self.done, self.total);
    }
}
