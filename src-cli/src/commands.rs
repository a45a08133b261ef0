//! Command line surface
//!
//! Each subcommand maps onto one action of the preview: an export, a
//! settings or page setup form submission, or a session toggle.

use crate::state::{default_data_dir, AppState, DEFAULT_INPUT};
use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use doc_model::{Orientation, PageMargins, PageSetup, PageSizePreset, ThemePreset};
use export::{Artifact, CmarkRenderer, ExportPipeline, PageTarget, PrerenderedRasterizer};
use image::RgbaImage;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(version, about = "Export markdown previews as PNG, PDF and DOCX", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding preferences and saved session state
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Directory exported files are written to
    #[arg(long, global = true)]
    pub out: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Export the styled preview as a PNG image
    Image {
        /// Markdown file to export
        input: PathBuf,
        /// PNG rendering of the preview
        #[arg(long)]
        raster: PathBuf,
    },
    /// Export the preview as a paginated PDF
    Pdf {
        /// Markdown file to export
        input: PathBuf,
        /// PNG rendering of the preview
        #[arg(long)]
        raster: PathBuf,
    },
    /// Export the text as a DOCX document
    Docx {
        /// Markdown file to export. Defaults to the last saved text.
        input: Option<PathBuf>,
    },
    /// Print the resolved page geometry of an export target
    Geometry {
        #[arg(long, default_value = "raster")]
        target: PageTarget,
    },
    /// Show, select or reset the visual theme
    Theme {
        /// Preset to apply
        name: Option<String>,
        /// List the available presets
        #[arg(long, conflicts_with_all = ["name", "reset"])]
        list: bool,
        /// Restore the default settings
        #[arg(long, conflicts_with = "name")]
        reset: bool,
    },
    /// Show or change the page setup of an export target
    PageSetup(PageSetupArgs),
    /// Show or change whether editor and preview scroll together
    SyncScroll { state: Option<Toggle> },
    /// Replace the saved text with the default document
    Reset,
}

#[derive(Args)]
pub struct PageSetupArgs {
    #[arg(long, default_value = "raster")]
    pub target: PageTarget,
    #[arg(long)]
    pub size: Option<PageSizePreset>,
    #[arg(long)]
    pub orientation: Option<Orientation>,
    /// Margins in mm: one value for all sides, or top,bottom,left,right
    #[arg(long, value_parser = parse_margins)]
    pub margins: Option<PageMargins>,
    #[arg(long)]
    pub page_numbers: Option<bool>,
    #[arg(long)]
    pub font_family: Option<String>,
    /// Body font size in points
    #[arg(long)]
    pub font_size: Option<f64>,
    #[arg(long)]
    pub line_height: Option<f64>,
    #[arg(long)]
    pub toc: Option<bool>,
    /// Start from the default setup
    #[arg(long)]
    pub reset: bool,
}

impl PageSetupArgs {
    fn has_changes(&self) -> bool {
        self.reset
            || self.size.is_some()
            || self.orientation.is_some()
            || self.margins.is_some()
            || self.page_numbers.is_some()
            || self.font_family.is_some()
            || self.font_size.is_some()
            || self.line_height.is_some()
            || self.toc.is_some()
    }

    fn apply_to(&self, current: &PageSetup) -> PageSetup {
        let mut setup = if self.reset {
            PageSetup::default()
        } else {
            current.clone()
        };
        if let Some(size) = self.size {
            setup.page_size = size;
        }
        if let Some(orientation) = self.orientation {
            setup.orientation = orientation;
        }
        if let Some(margins) = self.margins {
            setup.margins = margins;
        }
        if let Some(page_numbers) = self.page_numbers {
            setup.page_numbers = page_numbers;
        }
        if let Some(font_family) = &self.font_family {
            setup.font_family = font_family.clone();
        }
        if let Some(font_size) = self.font_size {
            setup.font_size = font_size;
        }
        if let Some(line_height) = self.line_height {
            setup.line_height = line_height;
        }
        if let Some(toc) = self.toc {
            setup.table_of_contents = toc;
        }
        setup
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

pub fn parse_margins(value: &str) -> Result<PageMargins, String> {
    let parts = value
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid margin: {}", e))?;

    match parts.as_slice() {
        [all] => Ok(PageMargins::uniform(*all)),
        [top, bottom, left, right] => Ok(PageMargins::new(*top, *bottom, *left, *right)),
        _ => Err(format!(
            "expected 1 or 4 comma separated values, got {}",
            parts.len()
        )),
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let data_dir = cli.data_dir.unwrap_or_else(default_data_dir);
    let out_dir = cli.out.unwrap_or_else(|| PathBuf::from("."));
    let mut state = AppState::open(data_dir)?;

    match cli.command {
        Command::Image { input, raster } => {
            let (pipeline, text) = raster_export(&mut state, &input, &raster).await?;
            let preview = pipeline.preview(&text)?;
            let artifact = pipeline.export_image(&preview, &state.session.snapshot()).await?;
            save(&artifact, &out_dir).await
        }
        Command::Pdf { input, raster } => {
            let (pipeline, text) = raster_export(&mut state, &input, &raster).await?;
            let preview = pipeline.preview(&text)?;
            let artifact = pipeline.export_pdf(&preview, &state.session.snapshot()).await?;
            save(&artifact, &out_dir).await
        }
        Command::Docx { input } => {
            let text = state.source_text(input.as_deref())?;
            if input.is_some() {
                state.remember_text(&text)?;
            }
            // Document exports never rasterize
            let rasterizer = PrerenderedRasterizer::new(RgbaImage::new(0, 0));
            let pipeline = ExportPipeline::new(rasterizer, CmarkRenderer::new());
            let artifact = pipeline.export_document(&text, &state.session.snapshot()).await?;
            save(&artifact, &out_dir).await
        }
        Command::Geometry { target } => {
            let geometry = state.session.page_setup(target).geometry()?;
            println!("{}", serde_json::to_string_pretty(&geometry)?);
            Ok(())
        }
        Command::Theme { name, list, reset } => theme(&mut state, name.as_deref(), list, reset),
        Command::PageSetup(args) => page_setup(&mut state, &args),
        Command::SyncScroll { state: toggle } => {
            if let Some(toggle) = toggle {
                state.kv.save_scroll_sync(toggle == Toggle::On)?;
            }
            println!("sync-scroll: {}", if state.kv.scroll_sync() { "on" } else { "off" });
            Ok(())
        }
        Command::Reset => {
            state.remember_text(DEFAULT_INPUT)?;
            println!("Saved text replaced with the default document");
            Ok(())
        }
    }
}

async fn raster_export(
    state: &mut AppState,
    input: &Path,
    raster: &Path,
) -> anyhow::Result<(ExportPipeline<PrerenderedRasterizer, CmarkRenderer>, String)> {
    let text = state.source_text(Some(input))?;
    state.remember_text(&text)?;

    let png = tokio::fs::read(raster)
        .await
        .with_context(|| format!("Failed to read {}", raster.display()))?;
    let bitmap = store::decode_png(&png)?;
    let pipeline = ExportPipeline::new(PrerenderedRasterizer::new(bitmap), CmarkRenderer::new());
    Ok((pipeline, text))
}

async fn save(artifact: &Artifact, out_dir: &Path) -> anyhow::Result<()> {
    let path = artifact.save_into(out_dir).await?;
    println!("{}", path.display());
    Ok(())
}

fn theme(state: &mut AppState, name: Option<&str>, list: bool, reset: bool) -> anyhow::Result<()> {
    if list {
        for preset in ThemePreset::ALL {
            let marker = if state.session.settings() == &preset.settings() { "*" } else { " " };
            println!("{} {}", marker, preset.name());
        }
        return Ok(());
    }

    if reset {
        state.session.reset_settings();
        state.save_session()?;
        println!("Settings reset to defaults");
        return Ok(());
    }

    match name {
        Some(name) => {
            if !state.session.apply_preset(name) {
                tracing::warn!(preset = name, "Unknown theme preset");
                eprintln!("Unknown theme '{}', settings unchanged", name);
                return Ok(());
            }
            state.save_session()?;
            println!("Applied theme {}", name);
        }
        None => println!("{}", serde_json::to_string_pretty(state.session.settings())?),
    }
    Ok(())
}

fn page_setup(state: &mut AppState, args: &PageSetupArgs) -> anyhow::Result<()> {
    let current = state.session.page_setup(args.target);
    if !args.has_changes() {
        println!("{}", serde_json::to_string_pretty(current)?);
        return Ok(());
    }

    let setup = args.apply_to(current);
    if let Err(e) = setup.geometry() {
        bail!("Page setup for {} rejected: {}", args.target, e);
    }

    state.session.update_page_setup(args.target, setup);
    state.save_session()?;
    println!("{}", serde_json::to_string_pretty(state.session.page_setup(args.target))?);
    Ok(())
}
