use std::fmt;

use clap::ValueEnum;

use super::model::ExportModel;
use super::store::FavoritesTree;
use super::{macos, windows};
use crate::error::Result;

/// Target management platform of an exported document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Platform {
    /// Intune configuration policy (JSON).
    Windows,
    /// Configuration profile (XML plist).
    #[value(name = "macos")]
    MacOs,
}

impl Platform {
    /// Guess the platform of a document from its first significant character.
    pub fn detect(text: &str) -> Self {
        if text.trim_start().starts_with('<') {
            Platform::MacOs
        } else {
            Platform::Windows
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Platform::Windows => "json",
            Platform::MacOs => "mobileconfig",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Windows => write!(f, "Windows"),
            Platform::MacOs => write!(f, "macOS"),
        }
    }
}

/// Identifiers written into exported envelopes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSettings {
    pub policy_name: String,
    pub profile_identifier: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            policy_name: windows::DEFAULT_POLICY_NAME.to_string(),
            profile_identifier: macos::DEFAULT_PROFILE_IDENTIFIER.to_string(),
        }
    }
}

/// Render `tree` as a document for `platform`.
pub fn export(
    platform: Platform,
    tree: &FavoritesTree,
    settings: &ExportSettings,
) -> Result<String> {
    let model = ExportModel::from_tree(tree);
    log::info!("exporting {} nodes for {}", tree.node_count(), platform);
    match platform {
        Platform::Windows => windows::export_document(&model, &settings.policy_name),
        Platform::MacOs => macos::export_document(&model, &settings.profile_identifier),
    }
}

/// Parse a `platform` document into a fresh tree.
pub fn import(platform: Platform, text: &str) -> Result<FavoritesTree> {
    log::info!("importing {} document ({} bytes)", platform, text.len());
    match platform {
        Platform::Windows => windows::import_document(text),
        Platform::MacOs => macos::import_document(text),
    }
}

/// Suggested output file name, stamped with milliseconds since the epoch.
pub fn default_file_name(platform: Platform, millis: i64) -> String {
    match platform {
        Platform::Windows => format!("edge-favorites-windows-{}.{}", millis, platform.extension()),
        Platform::MacOs => format!("edge-favorites-macos-{}.{}", millis, platform.extension()),
    }
}
