//! Document Compositor
//!
//! Layout records marks on a [`Canvas`] in millimetres; [`render`] turns a
//! canvas into PDF bytes. Layout never fails, only emission does.

pub mod canvas;
pub mod fonts;
pub mod furniture;
pub mod guide;
pub mod inspect;
pub mod pack;
pub mod render;

use serde::Serialize;

pub use canvas::{Canvas, Page, RegionKind};
pub use inspect::{inspect_pdf, InspectedPage, GEOMETRY_TOLERANCE_MM};
pub use pack::PackSpec;
pub use render::{render_pdf, RenderError};

use crate::project::{PrintGuide, Project};

pub const DEFAULT_STUDIO_NAME: &str = "Signature Sewing Studio";

/// PDF bytes with the name they are saved under.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedDocument {
    pub filename: String,
    pub page_count: usize,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

/// Lowercase, whitespace runs collapsed to a single "-".
pub fn slug(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

pub fn pack_filename(garment_type: &str, size: &str) -> String {
    format!("{}-{}-pattern-pack.pdf", slug(garment_type), slug(size))
}

pub fn guide_filename(title: &str) -> String {
    format!("{}-print-guide.pdf", slug(title))
}

#[derive(Debug, Clone)]
pub struct Compositor {
    studio_name: String,
}

impl Compositor {
    pub fn new(studio_name: impl Into<String>) -> Self {
        Self {
            studio_name: studio_name.into(),
        }
    }

    pub fn studio_name(&self) -> &str {
        &self.studio_name
    }

    pub fn layout_pack(&self, spec: &PackSpec<'_>) -> Canvas {
        pack::layout_pack(spec, &self.studio_name)
    }

    pub fn compose_pack(&self, spec: &PackSpec<'_>) -> Result<RenderedDocument, RenderError> {
        let canvas = self.layout_pack(spec);
        let title = format!("{} Pattern Pack", spec.garment_type);
        let bytes = render_pdf(&canvas, &title)?;
        tracing::debug!(pages = canvas.page_count(), bytes = bytes.len(), "pattern pack rendered");

        Ok(RenderedDocument {
            filename: pack_filename(spec.garment_type, spec.size),
            page_count: canvas.page_count(),
            bytes,
        })
    }

    pub fn layout_guide(&self, project: &Project, guide: &PrintGuide) -> Canvas {
        guide::layout_guide(project, guide, &self.studio_name)
    }

    pub fn compose_guide(
        &self,
        project: &Project,
        guide: &PrintGuide,
    ) -> Result<RenderedDocument, RenderError> {
        let canvas = self.layout_guide(project, guide);
        let title = format!("{} Print Guide", project.title);
        let bytes = render_pdf(&canvas, &title)?;
        tracing::debug!(pages = canvas.page_count(), bytes = bytes.len(), "print guide rendered");

        Ok(RenderedDocument {
            filename: guide_filename(&project.title),
            page_count: canvas.page_count(),
            bytes,
        })
    }
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new(DEFAULT_STUDIO_NAME)
    }
}
