use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::{Alignment, Drawing, LinearUnit};

/// Host API generation the snapshot was extracted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostApiVersion {
    /// Entity-level data only.
    Legacy,
    /// Entity data plus sub-entity points (curve PI/center, spiral SPI).
    #[default]
    SubEntity,
}

/// What the generator may rely on from the host, resolved once per drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostCapabilities {
    pub sub_entities: bool,
}

impl HostApiVersion {
    pub fn capabilities(self) -> HostCapabilities {
        match self {
            HostApiVersion::Legacy => HostCapabilities {
                sub_entities: false,
            },
            HostApiVersion::SubEntity => HostCapabilities { sub_entities: true },
        }
    }
}

/// Read-only access to the alignments of one host drawing.
pub trait DrawingSource {
    /// Display name of the drawing, used in report headers.
    fn drawing_name(&self) -> String;
    fn capabilities(&self) -> HostCapabilities;
    fn units(&self) -> LinearUnit;
    fn alignment_names(&self) -> Vec<String>;
    fn alignment(&self, name: &str) -> Result<&Alignment>;
}

/// A drawing snapshot stored as JSON.
#[derive(Debug, Clone)]
pub struct JsonDrawing {
    path: Option<PathBuf>,
    drawing: Drawing,
}

impl JsonDrawing {
    /// Wrap an in-memory snapshot.
    pub fn from_drawing(drawing: Drawing) -> Self {
        Self {
            path: None,
            drawing,
        }
    }

    /// Load a snapshot from disk.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes =
            fs::read(path).with_context(|| format!("read drawing snapshot {}", path.display()))?;
        let drawing: Drawing =
            serde_json::from_slice(&bytes).context("deserialize drawing snapshot")?;
        tracing::debug!(
            path = %path.display(),
            alignments = drawing.alignments.len(),
            host_api = ?drawing.host_api,
            "loaded drawing snapshot"
        );
        Ok(Self {
            path: Some(path.to_path_buf()),
            drawing,
        })
    }

    pub fn drawing(&self) -> &Drawing {
        &self.drawing
    }
}

impl DrawingSource for JsonDrawing {
    fn drawing_name(&self) -> String {
        if let Some(name) = &self.drawing.name {
            return name.clone();
        }
        self.path
            .as_deref()
            .and_then(|p| p.file_stem())
            .and_then(|stem| stem.to_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| "Untitled".to_string())
    }

    fn capabilities(&self) -> HostCapabilities {
        self.drawing.host_api.capabilities()
    }

    fn units(&self) -> LinearUnit {
        self.drawing.units
    }

    fn alignment_names(&self) -> Vec<String> {
        self.drawing
            .alignment_names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    fn alignment(&self, name: &str) -> Result<&Alignment> {
        self.drawing
            .alignment(name)
            .ok_or_else(|| anyhow!("alignment '{name}' not found in drawing"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drawing(json: &str) -> JsonDrawing {
        JsonDrawing::from_drawing(serde_json::from_str(json).expect("deserialize"))
    }

    #[test]
    fn test_defaults_to_sub_entity_api() {
        let source = drawing(r#"{ "alignments": [] }"#);
        assert!(source.capabilities().sub_entities);
        assert_eq!(source.units(), LinearUnit::Feet);
        assert_eq!(source.drawing_name(), "Untitled");
    }

    #[test]
    fn test_legacy_api_disables_sub_entities() {
        let source = drawing(r#"{ "host_api": "legacy", "units": "meters", "alignments": [] }"#);
        assert!(!source.capabilities().sub_entities);
        assert_eq!(source.units(), LinearUnit::Meters);
    }

    #[test]
    fn test_missing_alignment_is_error() {
        let source = drawing(
            r#"{ "name": "Site", "alignments": [ { "name": "CL", "elements": [] } ] }"#,
        );
        assert_eq!(source.alignment_names(), vec!["CL".to_string()]);
        assert!(source.alignment("CL").is_ok());
        let err = source.alignment("Ramp A").unwrap_err();
        assert!(err.to_string().contains("Ramp A"));
        assert_eq!(source.drawing_name(), "Site");
    }
}
