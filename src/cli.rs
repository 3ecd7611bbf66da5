// src/cli.rs
use std::path::PathBuf;

use clap::Parser;

use crate::config::{AppOptions, ExportFormat};
use crate::file::resolve_out_path;

/// Scrape marathon results into a local dataset file.
#[derive(Debug, Default, Parser)]
#[command(name = "parser", version, long_about = None)]
pub struct ParserArgs {
    /// Race years to scrape, comma-separated (e.g. 2019,2022,2023)
    #[arg(short, long, value_delimiter = ',')]
    pub years: Vec<i32>,

    /// Output file or directory (a trailing `/` means directory)
    #[arg(short, long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Output format; a `.csv`/`.tsv` extension on --out also sets it
    #[arg(short, long, value_enum)]
    pub format: Option<ExportFormat>,

    /// Also write a SQLite copy of the dataset
    #[arg(long, value_name = "DB")]
    pub sqlite: Option<PathBuf>,

    /// Results provider base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Letter pages to visit per year
    #[arg(long)]
    pub letters: Option<String>,
}

impl ParserArgs {
    /// Flags win over config file and environment.
    pub fn apply(self, opts: &mut AppOptions) {
        if !self.years.is_empty() {
            opts.scrape.years = self.years;
        }
        if let Some(url) = self.base_url {
            opts.scrape.base_url = url;
        }
        if let Some(letters) = self.letters {
            opts.scrape.letters = letters;
        }
        if let Some(fmt) = self.format {
            opts.export.format = fmt;
        }
        if let Some(out) = self.out {
            let default_name = format!("{}.{}", opts.export.file_stem, opts.export.format.ext());
            let path = resolve_out_path(&out, &default_name);
            opts.export.set_path(&path);
            // An explicit --format beats the extension
            if let Some(fmt) = self.format {
                opts.export.format = fmt;
            }
        }
        if let Some(db) = self.sqlite {
            opts.export.sqlite = Some(db);
        }
    }
}

/// Serve the results dashboard.
#[derive(Debug, Default, Parser)]
#[command(name = "app", version, long_about = None)]
pub struct AppArgs {
    /// Dataset written by `parser` (.csv, .tsv or .db)
    #[arg(short, long, value_name = "FILE")]
    pub dataset: Option<PathBuf>,

    /// Host to bind to
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl AppArgs {
    pub fn apply(self, opts: &mut AppOptions) {
        if let Some(ds) = self.dataset {
            opts.dashboard.dataset = ds;
        }
        if let Some(h) = self.host {
            opts.dashboard.host = h;
        }
        if let Some(p) = self.port {
            opts.dashboard.port = p;
        }
    }
}
