use crate::config::ReportFormat;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// User choices remembered between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Folder reports are written to when no `--out` is given.
    pub output_dir: Option<PathBuf>,
    pub formats: Vec<ReportFormat>,
    /// Alignment picked in the last interactive run.
    pub last_alignment: Option<String>,
    pub include_vertical: bool,
    pub project_name: Option<String>,
    pub prepared_by: Option<String>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            output_dir: None,
            formats: ReportFormat::ALL.to_vec(),
            last_alignment: None,
            include_vertical: true,
            project_name: None,
            prepared_by: None,
        }
    }
}

impl Preferences {
    /// Load preferences from the provided path. Missing files yield defaults.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::debug!(path = %path.display(), "no preference file, using defaults");
            return Ok(Self::default());
        }

        let data =
            fs::read(path).with_context(|| format!("read preferences {}", path.display()))?;
        let preferences: Preferences =
            serde_json::from_slice(&data).context("deserialize preferences")?;
        Ok(preferences)
    }

    /// Persist preferences to the provided path, ensuring the directory exists.
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create preferences directory {}", parent.display()))?;
        }

        let data = serde_json::to_vec_pretty(self).context("serialize preferences to JSON")?;
        fs::write(path, data).with_context(|| format!("write preferences {}", path.display()))
    }

    /// Resolve the default preference path (`<config dir>/ralign/preferences.json`).
    pub fn default_path() -> Result<PathBuf> {
        let base = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| anyhow!("could not determine a per-user settings directory"))?;
        Ok(base.join("ralign").join("preferences.json"))
    }
}
