use crate::constants;
use crate::generator::GenerationReport;
use crate::icon_set::{self, ManifestEntry, ManifestInfo};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The `Contents.json` descriptor of an asset catalog icon set
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub images: Vec<ManifestEntry>,
    #[serde(default)]
    pub info: ManifestInfo,
}

impl Default for Manifest {
    fn default() -> Self {
        Manifest::ios_app_icon()
    }
}

impl Manifest {
    pub fn new(images: Vec<ManifestEntry>, info: ManifestInfo) -> Self {
        Manifest { images, info }
    }

    pub fn ios_app_icon() -> Self {
        Manifest::new(icon_set::ios_manifest_entries(), ManifestInfo::default())
    }

    /// Copy keeping only rows whose file the report says was written
    pub fn retain_produced(&self, report: &GenerationReport) -> Self {
        let produced = report.produced_file_names();
        let images = self
            .images
            .iter()
            .filter(|entry| produced.iter().any(|name| *name == entry.filename))
            .cloned()
            .collect();

        Manifest::new(images, self.info.clone())
    }

    /// Pretty JSON with two-space indentation
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize Contents.json")
    }
}

pub fn manifest_path(output_dir: &Path) -> PathBuf {
    output_dir.join(constants::manifest::FILE_NAME)
}

/// Writes `Contents.json` into `output_dir`. Does not look at which images exist.
pub fn write_manifest(output_dir: &Path, manifest: &Manifest) -> Result<PathBuf> {
    let path = manifest_path(output_dir);
    let json = manifest.to_json()?;

    fs::write(&path, json)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    log::info!("Wrote {} ({} images)", path.display(), manifest.images.len());
    Ok(path)
}
