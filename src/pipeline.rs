//! Pattern Pack Pipeline - Single Entry Point
//!
//! request → resolve → infer → instructions → compose → manifest.
//! `compile_pack` always resolves the request itself; there is no way to
//! compose a pack from an unchecked request.

use std::path::{Path, PathBuf};

use base64::Engine;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::catalog::SizeSystem;
use crate::config::StudioConfig;
use crate::document::{Compositor, PackSpec, RenderError, RenderedDocument};
use crate::hashing::{document_hash, record_hash};
use crate::inference::{generate_instructions, infer, GarmentInference, InstructionStep};
use crate::project::{SessionError, Session};
use crate::service::{InferenceRequest, ResolvedRequest, ServiceError};
use crate::ENGINE_VERSION;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Request(#[from] ServiceError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A composed pattern pack and everything needed to reproduce it.
#[derive(Debug, Clone, Serialize)]
pub struct PatternPack {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub engine_version: String,
    pub garment_type: String,
    pub size_system: SizeSystem,
    pub size: String,
    pub recommendations: GarmentInference,
    pub instructions: Vec<InstructionStep>,
    #[serde(flatten)]
    pub document: RenderedDocument,
    pub record_hash: String,
    pub document_hash: String,
    pub data_base64: String,
}

impl PatternPack {
    pub fn bytes(&self) -> &[u8] {
        &self.document.bytes
    }
}

/// Write `document` into `dir` under its own filename.
pub fn write_document(dir: &Path, document: &RenderedDocument) -> Result<PathBuf, PipelineError> {
    let path = dir.join(&document.filename);
    std::fs::create_dir_all(dir)
        .and_then(|_| std::fs::write(&path, &document.bytes))
        .map_err(|source| PipelineError::Write {
            path: path.clone(),
            source,
        })?;
    tracing::info!(path = %path.display(), bytes = document.bytes.len(), "document written");
    Ok(path)
}

pub struct PackPipeline {
    compositor: Compositor,
}

impl PackPipeline {
    pub fn new(compositor: Compositor) -> Self {
        Self { compositor }
    }

    pub fn from_config(config: &StudioConfig) -> Self {
        Self::new(Compositor::new(config.studio_name.clone()))
    }

    /// Compile a pattern pack from a raw request.
    pub fn compile_pack(&self, request: &InferenceRequest) -> Result<PatternPack, PipelineError> {
        let resolved = request.resolve()?;
        self.compile_resolved(&resolved)
    }

    pub fn compile_resolved(&self, request: &ResolvedRequest) -> Result<PatternPack, PipelineError> {
        let recommendations = infer(&request.garment_type, request.size_system, &request.size);
        let instructions = generate_instructions(&recommendations);

        let spec = PackSpec {
            garment_type: &request.garment_type,
            size_system: request.size_system,
            size: &request.size,
            recommendations: &recommendations,
            instructions: &instructions,
        };
        let document = self.compositor.compose_pack(&spec)?;

        let pack = PatternPack {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            engine_version: ENGINE_VERSION.to_string(),
            garment_type: request.garment_type.clone(),
            size_system: request.size_system,
            size: request.size.clone(),
            record_hash: record_hash(&recommendations)?,
            document_hash: document_hash(&document.bytes),
            data_base64: base64::engine::general_purpose::STANDARD.encode(&document.bytes),
            recommendations,
            instructions,
            document,
        };

        tracing::info!(
            garment = %pack.garment_type,
            pages = pack.document.page_count,
            filename = %pack.document.filename,
            "pattern pack compiled"
        );
        Ok(pack)
    }

    /// Compose the print guide for the session's current project.
    pub fn compile_guide(&self, session: &Session) -> Result<RenderedDocument, PipelineError> {
        let (project, guide) = session.output()?;
        let document = self.compositor.compose_guide(project, guide)?;
        tracing::info!(pages = document.page_count, filename = %document.filename, "print guide compiled");
        Ok(document)
    }
}

impl Default for PackPipeline {
    fn default() -> Self {
        Self::new(Compositor::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use crate::project::{ProjectDraft, StudioParameters};

    fn request(garment: &str, system: &str, size: &str) -> InferenceRequest {
        InferenceRequest {
            size_system: Some(system.to_string()),
            size: Some(size.to_string()),
            garment_type_override: Some(garment.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_compile_pack_manifest() {
        let pipeline = PackPipeline::default();
        let pack = pipeline.compile_pack(&request("Tank Top", "au_women", "12")).unwrap();

        assert_eq!(pack.document.filename, "tank-top-12-pattern-pack.pdf");
        assert!(pack.document.page_count >= 7);
        assert_eq!(pack.document_hash, document_hash(pack.bytes()));
        assert_eq!(pack.record_hash, record_hash(&pack.recommendations).unwrap());
        assert_eq!(pack.instructions.len(), 7);

        let decoded = base64::engine::general_purpose::STANDARD
            .decode(&pack.data_base64)
            .unwrap();
        assert_eq!(decoded, pack.bytes());
    }

    #[test]
    fn test_manifest_json_flattens_document() {
        let pack = PackPipeline::default()
            .compile_pack(&request("Skirt", "au_kids", "8"))
            .unwrap();
        let json = serde_json::to_value(&pack).unwrap();
        assert_eq!(json["filename"], "skirt-8-pattern-pack.pdf");
        assert_eq!(json["size_system"], "au_kids");
        assert!(json.get("bytes").is_none());
    }

    #[test]
    fn test_rejects_unresolved_request() {
        let err = PackPipeline::default()
            .compile_pack(&InferenceRequest::default())
            .unwrap_err();
        assert!(matches!(err, PipelineError::Request(ServiceError::MissingField)));
    }

    #[test]
    fn test_same_request_same_document() {
        let pipeline = PackPipeline::default();
        let a = pipeline.compile_pack(&request("Coat", "au_men", "M")).unwrap();
        let b = pipeline.compile_pack(&request("Coat", "au_men", "M")).unwrap();
        assert_eq!(a.document_hash, b.document_hash);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_guide_requires_session_state() {
        let pipeline = PackPipeline::default();
        let mut session = Session::new();
        assert!(matches!(
            pipeline.compile_guide(&session),
            Err(PipelineError::Session(SessionError::MissingState(_)))
        ));

        session
            .create_project(ProjectDraft {
                title: Some("Weekend Romper".to_string()),
                category: Some(Category::Kids),
                size: Some(8),
                garment_type: Some("Romper".to_string()),
                notes: None,
            })
            .unwrap();
        session.apply_parameters(StudioParameters::default()).unwrap();

        let document = pipeline.compile_guide(&session).unwrap();
        assert_eq!(document.filename, "weekend-romper-print-guide.pdf");
        assert!(document.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_write_document() {
        let dir = tempfile::tempdir().unwrap();
        let pack = PackPipeline::default()
            .compile_pack(&request("Vest", "au_men", "S"))
            .unwrap();
        let path = write_document(&dir.path().join("out"), &pack.document).unwrap();
        assert_eq!(std::fs::read(path).unwrap(), pack.bytes());
    }
}
