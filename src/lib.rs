//! SewStudio Core - Garment Inference and Pattern Pack Compositor
//!
//! # Ground Rules
//! 1. Inference Is Pure: identical inputs give identical records
//! 2. Rules Are Ordered: the last matching rule wins for scalar fields
//! 3. Steps Never Split Across Pages
//! 4. The Calibration Square Is Exactly 50mm
//! 5. Session State Is Explicit

pub mod catalog;
pub mod config;
pub mod document;
pub mod hashing;
pub mod inference;
pub mod pipeline;
pub mod print;
pub mod project;
pub mod service;
pub mod templates;
pub mod validation;

pub use catalog::{Category, SizeSystem};
pub use config::StudioConfig;
pub use document::{Compositor, RenderedDocument};
pub use inference::{generate_instructions, infer, infer_type, GarmentInference, InstructionStep};
pub use pipeline::{PackPipeline, PatternPack, PipelineError};
pub use project::{generate_print_guide, PrintGuide, Project, Session, SessionError};
pub use service::{handle_generate, InferenceRequest, InferenceResponse, ServiceError};
pub use validation::{ValidationResult, ValidationRule, ValidationViolation, ViolationSeverity};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
