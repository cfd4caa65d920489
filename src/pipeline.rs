use crate::config::{Config, ManifestMode};
use crate::generator::{self, GenerationReport, IconWriter, PngIconWriter};
use crate::manifest::{self, Manifest};
use anyhow::Result;
use std::path::PathBuf;

#[derive(Debug)]
pub struct RunOutcome {
    pub report: GenerationReport,
    pub manifest: Manifest,
    pub manifest_path: PathBuf,
}

/// Generate every icon in `config`, then write `Contents.json`.
///
/// Source errors come back as a [`generator::GenerateError`] inside the
/// `anyhow::Error`; per-icon failures are only recorded in the report.
pub fn run(config: &Config) -> Result<RunOutcome> {
    run_with(config, &PngIconWriter)
}

pub fn run_with<W: IconWriter + ?Sized>(config: &Config, writer: &W) -> Result<RunOutcome> {
    let report = generator::generate_icons_with(
        &config.source,
        &config.output_dir,
        &config.icons,
        writer,
    )?;

    let full = Manifest::new(config.images.clone(), config.info.clone());
    let manifest = match config.manifest_mode {
        ManifestMode::Static => full,
        ManifestMode::Produced => full.retain_produced(&report),
    };

    if config.manifest_mode == ManifestMode::Static && !report.is_complete() {
        log::warn!(
            "{} icon(s) failed but are still listed in {}",
            report.failed.len(),
            manifest::manifest_path(&config.output_dir).display()
        );
    }

    let manifest_path = manifest::write_manifest(&config.output_dir, &manifest)?;

    Ok(RunOutcome {
        report,
        manifest,
        manifest_path,
    })
}
