//! Export Pipeline
//!
//! Orchestrates the three export targets:
//!
//! - **Image**: restyle a copy of the preview, rasterize it, encode as PNG.
//! - **PDF**: rasterize the unstyled preview on white, paginate the bitmap
//!   over the raster page setup, write one page per slice.
//! - **Document**: re-render the source, build the block/run model,
//!   assemble it against the document page setup, package as DOCX.
//!
//! Page geometry is resolved before anything is rasterized, so a bad page
//! setup fails fast. Each export reads only the snapshot it was given.

use crate::artifact::Artifact;
use crate::rasterizer::{RasterOptions, Rasterizer};
use crate::render::MarkdownRenderer;
use crate::session::ExportSnapshot;
use crate::{ExportError, Result};
use doc_model::{DocumentModelBuilder, MarkupNode, Pixels, StyleEngine};
use image::RgbaImage;
use layout_engine::RasterPaginator;
use store::{DocumentAssembler, FileFormat, PdfExportOptions};

pub struct ExportPipeline<R, M> {
    rasterizer: R,
    renderer: M,
    style_engine: StyleEngine,
    builder: DocumentModelBuilder,
    assembler: DocumentAssembler,
    pdf_options: PdfExportOptions,
}

impl<R: Rasterizer, M: MarkdownRenderer> ExportPipeline<R, M> {
    pub fn new(rasterizer: R, renderer: M) -> Self {
        Self {
            rasterizer,
            renderer,
            style_engine: StyleEngine::new(),
            builder: DocumentModelBuilder::new(),
            assembler: DocumentAssembler::new(),
            pdf_options: PdfExportOptions::default(),
        }
    }

    pub fn with_pdf_options(mut self, options: PdfExportOptions) -> Self {
        self.pdf_options = options;
        self
    }

    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    /// Render source text into the unstyled preview tree
    pub fn preview(&self, source: &str) -> Result<MarkupNode> {
        Ok(self.renderer.render_tree(source)?)
    }

    /// Export the styled preview as a PNG image
    pub async fn export_image(&self, preview: &MarkupNode, snapshot: &ExportSnapshot) -> Result<Artifact> {
        tracing::info!("Exporting image");
        let styled = self.style_engine.styled_copy(preview, &snapshot.settings);
        let options = RasterOptions::with_background(snapshot.settings.background1.as_str());
        let bitmap = self.rasterize(&styled, &options).await?;

        let bytes = store::encode_png(&bitmap)?;
        Ok(Artifact::new(FileFormat::Png, bytes))
    }

    /// Export the preview as a paginated PDF
    pub async fn export_pdf(&self, preview: &MarkupNode, snapshot: &ExportSnapshot) -> Result<Artifact> {
        let setup = &snapshot.raster_setup;
        let geometry = setup.geometry()?;
        tracing::info!(
            page_size = %setup.page_size,
            orientation = setup.orientation.name(),
            "Exporting PDF"
        );

        let bitmap = self.rasterize(preview, &RasterOptions::default()).await?;
        let layout = RasterPaginator::new(setup.page_numbers).paginate(
            Pixels(bitmap.width()),
            Pixels(bitmap.height()),
            &geometry,
        )?;

        let bytes = store::export_raster_pdf_bytes(&layout, &bitmap, &self.pdf_options)?;
        tracing::debug!(pages = layout.page_count(), bytes = bytes.len(), "PDF written");
        Ok(Artifact::new(FileFormat::Pdf, bytes))
    }

    /// Export the source text as a DOCX document
    pub async fn export_document(&self, source: &str, snapshot: &ExportSnapshot) -> Result<Artifact> {
        let setup = &snapshot.document_setup;
        let geometry = setup.geometry()?;
        tracing::info!(
            page_size = %setup.page_size,
            orientation = setup.orientation.name(),
            "Exporting document"
        );

        let tree = self.preview(source)?;
        let blocks = self.builder.build_document(&tree);
        let document = self.assembler.assemble(&blocks, &geometry, setup);

        let bytes = tokio::task::spawn_blocking(move || store::export_docx_bytes(&document))
            .await
            .map_err(|e| ExportError::PackagingFailure(format!("packaging task failed: {}", e)))??;
        tracing::debug!(blocks = blocks.len(), bytes = bytes.len(), "DOCX packaged");
        Ok(Artifact::new(FileFormat::Docx, bytes))
    }

    async fn rasterize(&self, tree: &MarkupNode, options: &RasterOptions) -> Result<RgbaImage> {
        let bitmap = self
            .rasterizer
            .rasterize(tree, options)
            .await
            .map_err(ExportError::RasterizationFailure)?;

        if bitmap.width() == 0 || bitmap.height() == 0 {
            return Err(ExportError::RasterizationFailure(format!(
                "rasterizer returned an empty {}x{} bitmap",
                bitmap.width(),
                bitmap.height()
            )));
        }
        Ok(bitmap)
    }
}
