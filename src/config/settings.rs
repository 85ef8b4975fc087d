//! User settings persisted as JSON next to the executable's working directory
//!
//! Loading is forgiving: a missing file yields the documented defaults, a file
//! that cannot be parsed leaves the in-memory settings untouched, and a partial
//! file is merged field by field over the defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use super::lenient;
use super::panel::{PanelLayout, PanelPatch};
use crate::constants::panels;

/// Everything the user can configure
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Executable started by the Launch button, empty when unset
    pub target_path: String,
    pub overlay_always_on_top: bool,
    pub overlay_click_through: bool,
    /// Panel identity → layout; always contains the whole catalog
    pub panels: BTreeMap<String, PanelLayout>,
}

/// The settings document as stored on disk, every field optional
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SettingsPatch {
    #[serde(deserialize_with = "lenient")]
    target_path: Option<String>,
    /// What older files called the target; `targetPath` wins when both exist
    #[serde(deserialize_with = "lenient")]
    minecraft_path: Option<String>,
    #[serde(deserialize_with = "lenient")]
    overlay_always_on_top: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    overlay_click_through: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    panels: Option<Map<String, Value>>,
}

/// What happened during [`Settings::reload`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No file on disk; defaults are in effect
    Missing,
    /// File parsed and merged
    Loaded,
    /// File could not be read or parsed; previous values kept
    Rejected,
}

impl Default for Settings {
    fn default() -> Self {
        let mut settings = Self {
            target_path: String::new(),
            overlay_always_on_top: true,
            overlay_click_through: false,
            panels: BTreeMap::new(),
        };
        settings.backfill_catalog();
        settings
    }
}

impl Settings {
    /// Defaults overlaid with whatever `path` contains
    pub fn load_or_default(path: &Path) -> (Self, LoadOutcome) {
        let mut settings = Self::default();
        let outcome = settings.reload(path);
        (settings, outcome)
    }

    /// Replace the current values with the file contents, if it can be parsed
    pub fn reload(&mut self, path: &Path) -> LoadOutcome {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "No settings file found, using defaults");
                self.backfill_catalog();
                return LoadOutcome::Missing;
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed to read settings file, keeping current settings");
                return LoadOutcome::Rejected;
            }
        };

        match Self::from_json(&contents) {
            Ok(loaded) => {
                *self = loaded;
                info!(path = %path.display(), panels = self.panels.len(), "Loaded settings");
                LoadOutcome::Loaded
            }
            Err(e) => {
                error!(path = %path.display(), error = ?e, "Failed to parse settings file, keeping current settings");
                LoadOutcome::Rejected
            }
        }
    }

    /// Parse a settings document, filling every gap with defaults
    pub fn from_json(contents: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(contents).context("Settings file is not valid JSON")?;
        anyhow::ensure!(root.is_object(), "Settings file must contain a JSON object");
        let patch: SettingsPatch =
            serde_json::from_value(root).context("Failed to read settings fields")?;

        let mut settings = Self::default();
        settings.merge(patch);
        Ok(settings)
    }

    fn merge(&mut self, patch: SettingsPatch) {
        if let Some(path) = patch.target_path.or(patch.minecraft_path) {
            self.target_path = path;
        }
        if let Some(v) = patch.overlay_always_on_top {
            self.overlay_always_on_top = v;
        }
        if let Some(v) = patch.overlay_click_through {
            self.overlay_click_through = v;
        }

        for (identity, entry) in patch.panels.unwrap_or_default() {
            if !entry.is_object() {
                warn!(panel = %identity, "Panel entry is not an object, keeping default");
                continue;
            }
            let panel_patch: PanelPatch = match serde_json::from_value(entry) {
                Ok(panel_patch) => panel_patch,
                Err(e) => {
                    warn!(panel = %identity, error = %e, "Failed to read panel entry, keeping default");
                    continue;
                }
            };
            self.panels
                .entry(identity.clone())
                .or_insert_with(|| PanelLayout::default_for(&identity))
                .merge(panel_patch);
        }

        let added = self.backfill_catalog();
        if !added.is_empty() {
            info!(count = added.len(), panels = ?added, "Added default layouts for missing panels");
        }
    }

    /// Give every catalog identity a layout; returns the identities that were added
    pub fn backfill_catalog(&mut self) -> Vec<String> {
        let mut added = Vec::new();
        for (index, identity) in panels::CATALOG.iter().enumerate() {
            if !self.panels.contains_key(*identity) {
                self.panels
                    .insert(identity.to_string(), PanelLayout::default_at(index));
                added.push(identity.to_string());
            }
        }
        added
    }

    pub fn panel(&self, identity: &str) -> Option<&PanelLayout> {
        self.panels.get(identity)
    }

    pub fn panel_mut(&mut self, identity: &str) -> Option<&mut PanelLayout> {
        self.panels.get_mut(identity)
    }

    /// Serialize to the canonical 4-space indented document
    pub fn to_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)
            .context("Failed to serialize settings to JSON")?;
        String::from_utf8(buf).context("Serialized settings are not valid UTF-8")
    }

    /// Write the settings to `path`
    ///
    /// The document goes to a sibling temp file first and is renamed into
    /// place, so readers see either the old or the new file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create settings directory {}", parent.display()))?;
        }

        let contents = self.to_json()?;
        let tmp = temp_path(path);
        fs::write(&tmp, contents)
            .with_context(|| format!("Failed to write settings to {}", tmp.display()))?;
        fs::rename(&tmp, path)
            .with_context(|| format!("Failed to move settings into place at {}", path.display()))?;

        info!(path = %path.display(), "Saved settings");
        Ok(())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
