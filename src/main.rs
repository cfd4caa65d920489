use anyhow::{Context, Result};
use appiconset::config::{Config, ManifestMode};
use appiconset::generator::GenerateError;
use appiconset::manifest::{self, Manifest};
use appiconset::pipeline::{self, RunOutcome};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "appiconset")]
#[command(about = "Generate an iOS AppIcon.appiconset from a single source image", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Source image (defaults to Resources/original_icon.png)
    #[arg(short, long, global = true)]
    source: Option<PathBuf>,

    /// Output directory (defaults to Resources/AppIcon.appiconset)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// YAML file describing the icon table and Contents.json rows
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Whether Contents.json lists every row or only images that were written
    #[arg(long = "manifest", value_enum)]
    manifest_mode: Option<ManifestMode>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the built-in configuration as YAML, as a starting point for edits
    InitConfig {
        /// Where to write the config file
        path: PathBuf,
    },
    /// Write only Contents.json, without generating any images
    Manifest {
        /// Directory to write Contents.json into
        dir: PathBuf,
    },
}

fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::InitConfig { path }) => {
            init_config_command(path)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Manifest { dir }) => {
            let config = build_config(&cli)?;
            manifest_command(&config, dir)?;
            Ok(ExitCode::SUCCESS)
        }
        None => {
            let config = build_config(&cli)?;
            generate_command(&config)
        }
    }
}

/// Config file (if any) with command line overrides applied on top
fn build_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load_or_default(cli.config.as_deref())?;

    if let Some(source) = &cli.source {
        config.source = source.clone();
    }
    if let Some(output) = &cli.output {
        config.output_dir = output.clone();
    }
    if let Some(mode) = cli.manifest_mode {
        config.manifest_mode = mode;
    }

    Ok(config)
}

fn generate_command(config: &Config) -> Result<ExitCode> {
    let outcome = match pipeline::run(config) {
        Ok(outcome) => outcome,
        Err(e) => {
            return match e.downcast_ref::<GenerateError>() {
                Some(GenerateError::SourceMissing(path)) => {
                    println!("❌ Source image not found: {}", path.display());
                    println!("   Copy the original icon to that location or pass --source");
                    Ok(ExitCode::FAILURE)
                }
                Some(GenerateError::Read { .. } | GenerateError::Decode { .. }) => {
                    // Reported but not fatal for the exit status; nothing was written
                    println!("❌ Could not load image: {:#}", e);
                    Ok(ExitCode::SUCCESS)
                }
                _ => Err(e),
            };
        }
    };

    print_summary(config, &outcome);
    Ok(ExitCode::SUCCESS)
}

fn print_summary(config: &Config, outcome: &RunOutcome) {
    let report = &outcome.report;
    let (width, height) = report.source_size;

    println!("✅ Loaded source image: {}", config.source.display());
    println!("   Original size: {}x{}", width, height);
    if report.cropped {
        let side = width.min(height);
        println!("⚠️  Source is not square, cropped to top-left {}x{}", side, side);
    }

    println!("\nGenerating icons...");
    for icon in &report.produced {
        println!("✅ {}.png ({}x{})", icon.name, icon.pixels, icon.pixels);
    }
    for failed in &report.failed {
        println!("❌ Failed to generate {}.png: {:#}", failed.name, failed.error);
    }

    println!("\n✨ Done: {} written, {} failed", report.produced.len(), report.failed.len());
    println!("📁 Output directory: {}", config.output_dir.display());
    println!(
        "\n✅ Created {} ({} images)",
        outcome.manifest_path.display(),
        outcome.manifest.images.len()
    );

    println!("\n📝 Next steps:");
    println!("1. Drag the output folder into Assets.xcassets in Xcode");
    println!("2. Rename the folder to 'AppIcon'");
    println!("3. Make sure the project settings select this App Icon");
}

fn init_config_command(path: &Path) -> Result<()> {
    Config::default().save(path)?;
    println!("✓ Wrote default config to {}", path.display());
    Ok(())
}

fn manifest_command(config: &Config, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let manifest = Manifest::new(config.images.clone(), config.info.clone());
    let path = manifest::write_manifest(dir, &manifest)?;

    println!("✅ Created {} ({} images)", path.display(), manifest.images.len());
    Ok(())
}
