//! Command line front end.
//!
//! Every invocation is stateless: it builds an [`Explorer`] from the config
//! file plus the global overrides, runs one command, and renders the outcome
//! as pretty JSON for stdout.

use crate::explorer::Explorer;
use anyhow::Context;
use clap::{Parser, Subcommand};
use keyscout_core::config::Config;
use keyscout_core::export::Export;
use keyscout_core::search::{ColumnFilter, SearchMode};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "keyscout", about = "Search, shortlist and export keyword datasets")]
pub struct Cli {
    /// Config file (defaults to ~/.config/keyscout/config.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Dataset file to open instead of the configured one.
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Saved-list file to use instead of the configured one.
    #[arg(long, global = true)]
    pub lists: Option<PathBuf>,

    /// Sheet to switch to after the dataset loads.
    #[arg(long, global = true)]
    pub sheet: Option<String>,

    /// Log at debug level to stderr.
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the current sheet and the sheets available.
    Sheets,
    /// List the sheets inside any dataset file without loading it.
    Partitions { path: PathBuf },
    /// Search, filter, sort and page the dataset.
    Query(QueryArgs),
    /// List saved lists with their sizes.
    Lists,
    /// Show a saved list resolved against the dataset.
    List { name: String },
    /// Create or overwrite a saved list.
    Save {
        name: String,
        #[arg(required = true)]
        keywords: Vec<String>,
    },
    /// Delete a saved list.
    Delete { name: String },
    /// Write the selected keywords (or a saved list) to CSV.
    Export {
        /// Export a saved list instead of explicit keywords.
        #[arg(long, conflicts_with = "keywords")]
        list: Option<String>,
        /// Output path (defaults to the suggested file name).
        #[arg(long)]
        out: Option<PathBuf>,
        keywords: Vec<String>,
    },
}

#[derive(Debug, clap::Args)]
pub struct QueryArgs {
    #[arg(long)]
    pub search: Option<String>,
    /// `partial`, anything else is exact.
    #[arg(long)]
    pub mode: Option<SearchMode>,
    #[arg(long)]
    pub threshold: Option<f64>,
    /// `blank`, `10K-100K`, `100K-1M` or `1M-10M`.
    #[arg(long)]
    pub filter: Option<ColumnFilter>,
    #[arg(long)]
    pub sort: Option<String>,
    #[arg(long)]
    pub desc: bool,
    #[arg(long)]
    pub page: Option<usize>,
    #[arg(long)]
    pub page_size: Option<usize>,
}

#[derive(Serialize)]
struct ExportReport<'a> {
    #[serde(flatten)]
    export: &'a Export,
    path: &'a Path,
}

#[derive(Serialize)]
struct Deleted<'a> {
    deleted: &'a str,
}

pub fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::load()?,
    };
    if let Some(data) = &cli.data {
        config.data.dataset_path = data.clone();
    }
    if let Some(lists) = &cli.lists {
        config.data.saved_lists_path = lists.clone();
    }
    Ok(config)
}

/// Run one command and return its JSON rendering.
pub fn run(cli: Cli) -> anyhow::Result<String> {
    let config = load_config(&cli)?;
    let mut explorer = Explorer::open(config)?;

    if let (Some(path), Some(err)) = (&cli.data, explorer.startup_error()) {
        return Err(err.clone()).with_context(|| format!("failed to open {}", path.display()));
    }
    if let Some(sheet) = &cli.sheet {
        explorer.switch_sheet(sheet)?;
    }

    let json = match cli.command {
        Command::Sheets => serde_json::to_string_pretty(&explorer.sheet_info())?,
        Command::Partitions { path } => {
            serde_json::to_string_pretty(&explorer.detect_partitions(&path))?
        }
        Command::Query(args) => {
            let mut params = explorer.default_params();
            if let Some(term) = args.search {
                params.search_term = term;
            }
            if let Some(mode) = args.mode {
                params.search_mode = mode;
            }
            if let Some(threshold) = args.threshold {
                params.threshold = threshold;
            }
            if let Some(filter) = args.filter {
                params.column_filter = filter;
            }
            if let Some(sort) = args.sort {
                params.sort_column = sort;
            }
            if args.desc {
                params.sort_ascending = false;
            }
            if let Some(page) = args.page {
                params.page = page;
            }
            if let Some(page_size) = args.page_size {
                params.page_size = page_size;
            }
            serde_json::to_string_pretty(&explorer.query(&params))?
        }
        Command::Lists => serde_json::to_string_pretty(&explorer.saved_lists())?,
        Command::List { name } => serde_json::to_string_pretty(&explorer.saved_list(&name)?)?,
        Command::Save { name, keywords } => {
            serde_json::to_string_pretty(&explorer.save_list(&name, &keywords)?)?
        }
        Command::Delete { name } => {
            explorer.delete_list(&name)?;
            serde_json::to_string_pretty(&Deleted { deleted: &name })?
        }
        Command::Export {
            list,
            out,
            keywords,
        } => {
            let export = match list {
                Some(name) => explorer.export_saved(&name)?,
                None => explorer.export(&keywords)?,
            };
            let path = out.unwrap_or_else(|| PathBuf::from(&export.filename));
            std::fs::write(&path, &export.content)
                .with_context(|| format!("failed to write {}", path.display()))?;
            serde_json::to_string_pretty(&ExportReport {
                export: &export,
                path: &path,
            })?
        }
    };
    Ok(json)
}
