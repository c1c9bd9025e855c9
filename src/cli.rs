//! Command-line surface of the `favedit` binary.
//!
//! Without a subcommand `favedit [FILE]` opens the editor. `convert` and
//! `show` run once and exit, for use in scripts.

use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Args, Parser, Subcommand};

use crate::config::{AppConfig, ExportConfig, GeneralConfig};
use crate::error::Result;
use crate::favorites::{codec, ExportModel, Platform};
use crate::handler::{read_document, write_document};

/// Edit browser managed-favorites trees and convert them between the
/// Windows Intune policy and macOS configuration profile formats.
#[derive(Parser, Debug)]
#[command(name = "favedit", version, about, args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Path to a config file, taking precedence over the default locations
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory exported documents are written to
    #[arg(long, global = true, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Root label of a new, empty tree
    #[arg(long, global = true)]
    pub root_label: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub edit: EditArgs,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the interactive editor (the default)
    Edit(EditArgs),
    /// Import a document and write it out in the other (or the same) format
    Convert(ConvertArgs),
    /// Print the export model of a document as pretty JSON
    Show(ShowArgs),
}

#[derive(Args, Debug, Default, Clone)]
pub struct EditArgs {
    /// Document to import on startup
    pub file: Option<PathBuf>,

    /// Format of FILE; detected from its content when omitted
    #[arg(long, value_enum)]
    pub from: Option<Platform>,
}

#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Document to read
    pub input: PathBuf,

    /// Format to write
    #[arg(long, value_enum)]
    pub to: Platform,

    /// Format of INPUT; detected from its content when omitted
    #[arg(long, value_enum)]
    pub from: Option<Platform>,

    /// Output file; defaults to a timestamped name in the export directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    /// Document to read
    pub input: PathBuf,

    /// Format of INPUT; detected from its content when omitted
    #[arg(long, value_enum)]
    pub from: Option<Platform>,
}

impl Cli {
    /// Editor arguments, whether given through `edit` or bare.
    pub fn editor_args(&self) -> Option<EditArgs> {
        match &self.command {
            None => Some(self.edit.clone()),
            Some(Commands::Edit(args)) => Some(args.clone()),
            Some(_) => None,
        }
    }

    /// Partial config built from the global flags, merged over every file.
    pub fn config_overrides(&self) -> AppConfig {
        AppConfig {
            general: GeneralConfig {
                root_label: self.root_label.clone(),
                ..Default::default()
            },
            export: ExportConfig {
                output_dir: self
                    .output_dir
                    .as_ref()
                    .map(|dir| dir.to_string_lossy().into_owned()),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

/// Convert `args.input` and return the path written.
pub async fn run_convert(args: &ConvertArgs, config: &AppConfig) -> Result<PathBuf> {
    let tree = read_document(&args.input, args.from).await?;
    let document = codec::export(args.to, &tree, &config.export_settings())?;
    let output = output_path(args, config);
    write_document(&output, &document).await?;
    log::info!(
        "converted {} ({} entries) to {} document {}",
        args.input.display(),
        tree.node_count(),
        args.to,
        output.display()
    );
    Ok(output)
}

fn output_path(args: &ConvertArgs, config: &AppConfig) -> PathBuf {
    match &args.output {
        Some(path) => path.clone(),
        None => config.output_dir().join(codec::default_file_name(
            args.to,
            Utc::now().timestamp_millis(),
        )),
    }
}

/// Pretty export model JSON of `input`.
pub async fn run_show(input: &Path, from: Option<Platform>) -> Result<String> {
    let tree = read_document(input, from).await?;
    ExportModel::from_tree(&tree).to_json_pretty()
}
