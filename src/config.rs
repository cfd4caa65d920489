use crate::constants;
use crate::icon_set::{self, IconSpec, ManifestEntry, ManifestInfo};
use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// How `Contents.json` relates to the images that were actually written
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ManifestMode {
    /// Every row of the table, whether or not its image was produced
    #[default]
    Static,
    /// Only rows whose image was produced in this run
    Produced,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_source")]
    pub source: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub manifest_mode: ManifestMode,
    #[serde(default = "icon_set::ios_icons")]
    pub icons: Vec<IconSpec>,
    #[serde(default = "icon_set::ios_manifest_entries")]
    pub images: Vec<ManifestEntry>,
    #[serde(default)]
    pub info: ManifestInfo,
}

fn default_source() -> PathBuf {
    PathBuf::from(constants::paths::DEFAULT_SOURCE_IMAGE)
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(constants::paths::DEFAULT_OUTPUT_DIR)
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source: default_source(),
            output_dir: default_output_dir(),
            manifest_mode: ManifestMode::default(),
            icons: icon_set::ios_icons(),
            images: icon_set::ios_manifest_entries(),
            info: ManifestInfo::default(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&contents)
            .context("Failed to parse config file")?;

        // Validate configuration after loading
        config.validate()?;

        Ok(config)
    }

    /// Default configuration, or the file at `path` when one is given
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Config::default()),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.icons.is_empty() {
            bail!("icons must list at least one image");
        }

        for icon in &self.icons {
            if icon.name.is_empty() {
                bail!("icon name cannot be empty");
            }
            if icon.name.contains(['/', '\\']) {
                bail!("icon name '{}' must not contain a path separator", icon.name);
            }
            if icon.pixels == 0 {
                bail!("icon '{}' must be larger than 0 pixels", icon.name);
            }
        }

        for entry in &self.images {
            if !entry.filename.ends_with(".png") {
                bail!("descriptor filename '{}' must end in .png", entry.filename);
            }
            if entry.size.is_empty() || entry.scale.is_empty() {
                bail!("descriptor row '{}' needs both size and scale", entry.filename);
            }
        }

        if self.info.author.is_empty() {
            bail!("info.author cannot be empty");
        }

        Ok(())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .context("Failed to create config directory")?;
        }

        let yaml = serde_yaml::to_string(self)
            .context("Failed to serialize config")?;

        fs::write(path, yaml)
            .context("Failed to write config file")?;

        Ok(())
    }
}
