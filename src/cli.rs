// src/cli.rs
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Result, WrapErr};

use crate::config::options::{
    AppOptions, BlankEntrantPolicy, DuplicatePolicy, ExportFormat, ExportName, FolderKeyPolicy,
    UnmatchedVisaPolicy,
};
use crate::progress::Progress;
use crate::runner;

/// Extract applicant records from an archive of saved DV pages.
#[derive(Debug, Parser)]
#[command(name = "dv_records", version, about)]
pub struct Args {
    /// Extracted archive root
    pub root: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = crate::config::consts::DEFAULT_OUT_DIR)]
    pub out: PathBuf,

    #[arg(long, value_enum, default_value_t = Format::Csv)]
    pub format: Format,

    /// Export date (YYYY-MM-DD or RFC 3339); names the file together with --category
    #[arg(long, requires = "category")]
    pub date: Option<String>,

    /// Export category, e.g. the batch or month name
    #[arg(long, requires = "date")]
    pub category: Option<String>,

    /// Text written for values that were not found
    #[arg(long, default_value = crate::config::consts::MISSING)]
    pub sentinel: String,

    #[arg(long, value_enum, default_value_t = KeyArg::Relative)]
    pub folder_key: KeyArg,

    /// Extra resource-folder suffix to skip (repeatable)
    #[arg(long = "resource-suffix", value_name = "SUFFIX")]
    pub resource_suffixes: Vec<String>,

    /// Emit a placeholder record for folders that produced nothing
    #[arg(long)]
    pub keep_empty_folders: bool,

    /// Keep only the last record of each folder
    #[arg(long)]
    pub last_per_folder: bool,

    /// Do not emit records for application forms no entrant claims
    #[arg(long)]
    pub drop_unmatched_visas: bool,

    /// Confirmation pages without any entrant field yield an empty record
    #[arg(long)]
    pub discard_blank_entrants: bool,

    #[arg(long)]
    pub no_headers: bool,

    #[arg(short, long, default_value_t = crate::config::consts::WORKERS)]
    pub workers: usize,

    /// Print records to stdout instead of writing a file
    #[arg(long)]
    pub dry_run: bool,

    /// List the documents that would be read, then exit
    #[arg(long)]
    pub list: bool,

    /// More output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Csv,
    Tsv,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum KeyArg {
    Relative,
    Basename,
}

impl Args {
    pub fn to_options(&self) -> AppOptions {
        let mut opts = AppOptions::default();

        opts.walk.folder_key = match self.folder_key {
            KeyArg::Relative => FolderKeyPolicy::Relative,
            KeyArg::Basename => FolderKeyPolicy::Basename,
        };
        opts.walk.resource_suffixes.extend(self.resource_suffixes.iter().cloned());

        if self.keep_empty_folders {
            opts.reconcile.keep_empty_folders = true;
        }
        if self.last_per_folder {
            opts.reconcile.duplicates = DuplicatePolicy::LastPerFolder;
        }
        if self.drop_unmatched_visas {
            opts.reconcile.unmatched_visas = UnmatchedVisaPolicy::Drop;
        }
        if self.discard_blank_entrants {
            opts.reconcile.blank_entrants = BlankEntrantPolicy::Discard;
        }

        opts.export.format = match self.format {
            Format::Csv  => ExportFormat::Csv,
            Format::Tsv  => ExportFormat::Tsv,
            Format::Json => ExportFormat::Json,
        };
        opts.export.out_dir = self.out.clone();
        opts.export.include_headers = !self.no_headers;
        opts.export.sentinel = self.sentinel.clone();
        if let (Some(date), Some(category)) = (&self.date, &self.category) {
            opts.export.name = Some(ExportName { date: date.clone(), category: category.clone() });
        }
        opts.workers = self.workers.max(1);
        opts
    }
}

/// Prints per-folder progress on stderr.
struct CliProgress {
    total: usize,
    done: usize,
    failed: usize,
}

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        eprintln!("Reading {total} folders...");
    }
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn item_done(&mut self, folder: &str) {
        self.done += 1;
        logf!("[{}/{}] {folder}", self.done, self.total);
    }
    fn item_failed(&mut self, path: &Path, reason: &str) {
        self.failed += 1;
        eprintln!("Skipped {}: {reason}", path.display());
    }
    fn finish(&mut self) {
        if self.failed > 0 {
            eprintln!("{} documents could not be read", self.failed);
        }
    }
}

pub fn run(args: Args) -> Result<()> {
    let opts = args.to_options();
    let mut progress = CliProgress { total: 0, done: 0, failed: 0 };

    if args.list {
        let docs = runner::list_documents(&args.root, &opts.walk)
            .wrap_err_with(|| format!("Cannot walk {}", args.root.display()))?;
        for d in docs {
            println!("{}\t{}", d.folder_key, d.path.display());
        }
        return Ok(());
    }

    if args.dry_run {
        let summary = runner::extract(&args.root, &opts, Some(&mut progress))
            .wrap_err_with(|| format!("Extraction failed for {}", args.root.display()))?;
        let stdout = std::io::stdout();
        crate::file::write_records(stdout.lock(), &opts.export, &summary.records)?;
        return Ok(());
    }

    let summary = runner::run(&args.root, &opts, Some(&mut progress))
        .wrap_err_with(|| format!("Export failed for {}", args.root.display()))?;

    println!(
        "{} records from {} documents in {} folders",
        summary.records.len(),
        summary.documents,
        summary.folders
    );
    for path in &summary.files_written {
        println!("Wrote {}", path.display());
    }
    Ok(())
}
