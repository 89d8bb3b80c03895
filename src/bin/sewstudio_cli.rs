//! SewStudio CLI - Bridge interface
//!
//! Commands: catalog, describe, infer, instructions, generate, pack, guide
//! Outputs JSON to stdout, logs to stderr
//! Returns 2 on rejected input, 1 on other failures

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::process::ExitCode;

use sewstudio_core::{
    catalog::{Category, SizeSystem, GARMENT_TYPES},
    config::StudioConfig,
    generate_instructions, handle_generate, infer, infer_type,
    pipeline::{write_document, PackPipeline},
    project::{ProjectDraft, Session, StudioParameters},
    InferenceRequest,
};

#[derive(Parser)]
#[command(name = "sewstudio-cli")]
#[command(about = "SewStudio CLI - Garment inference and pattern packs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the studio config file (falls back to SEWSTUDIO_CONFIG)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List size systems, size options, garment types and categories
    Catalog,

    /// Infer a garment type from a free-text description
    Describe {
        #[arg(short, long)]
        text: String,
    },

    /// Derive sewing recommendations
    Infer {
        #[arg(short, long)]
        garment: String,

        /// au_women, au_men, au_kids or dogs
        #[arg(short, long)]
        size_system: SizeSystem,

        #[arg(long)]
        size: String,
    },

    /// Derive construction steps
    Instructions {
        #[arg(short, long)]
        garment: String,

        #[arg(short, long)]
        size_system: SizeSystem,

        #[arg(long)]
        size: String,
    },

    /// Answer an inference request body
    Generate {
        /// JSON payload (InferenceRequest)
        #[arg(short, long)]
        payload: String,
    },

    /// Compose and write a pattern pack
    Pack {
        /// JSON payload (InferenceRequest)
        #[arg(short, long)]
        payload: String,

        /// Overrides the configured output directory
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Embed the PDF as base64 in the printed manifest
        #[arg(long)]
        embed: bool,
    },

    /// Create a project, apply parameters and write its print guide
    Guide {
        /// JSON payload (project draft and studio parameters)
        #[arg(short, long)]
        payload: String,

        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },
}

#[derive(Deserialize)]
struct GuideRequest {
    #[serde(flatten)]
    draft: ProjectDraft,
    #[serde(flatten)]
    parameters: StudioParameters,
}

fn emit<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!(r#"{{"error": "Failed to serialize output: {}"}}"#, e);
            ExitCode::FAILURE
        }
    }
}

fn fail(error: impl std::fmt::Display, code: u8) -> ExitCode {
    println!("{}", serde_json::json!({ "success": false, "error": error.to_string() }));
    ExitCode::from(code)
}

fn catalog() -> serde_json::Value {
    let systems: Vec<_> = SizeSystem::ALL
        .iter()
        .map(|s| {
            serde_json::json!({
                "value": s,
                "label": s.label(),
                "sizes": s.size_options(),
            })
        })
        .collect();
    let categories: Vec<_> = [Category::Womens, Category::Mens, Category::Kids, Category::Animal]
        .iter()
        .map(|c| serde_json::json!({ "value": c, "garments": c.garment_options() }))
        .collect();

    serde_json::json!({
        "size_systems": systems,
        "garment_types": GARMENT_TYPES,
        "categories": categories,
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config_path = StudioConfig::resolve_path(cli.config.as_deref());
    let config = match StudioConfig::load(&config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!(r#"{{"error": "{}"}}"#, e);
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .init();

    let pipeline = PackPipeline::from_config(&config);

    match cli.command {
        Commands::Catalog => emit(&catalog()),

        Commands::Describe { text } => emit(&serde_json::json!({ "garmentType": infer_type(&text) })),

        Commands::Infer { garment, size_system, size } => emit(&infer(&garment, size_system, &size)),

        Commands::Instructions { garment, size_system, size } => {
            let recommendations = infer(&garment, size_system, &size);
            emit(&generate_instructions(&recommendations))
        }

        Commands::Generate { payload } => match handle_generate(&payload) {
            Ok(response) => emit(&response),
            Err(e) => fail(e, 2),
        },

        Commands::Pack { payload, out_dir, embed } => {
            let request = match InferenceRequest::parse(&payload) {
                Ok(r) => r,
                Err(e) => return fail(e, 2),
            };

            let pack = match pipeline.compile_pack(&request) {
                Ok(p) => p,
                Err(e) => return fail(e, 2),
            };

            let dir = out_dir.unwrap_or_else(|| config.output_dir.clone());
            let path = match write_document(&dir, &pack.document) {
                Ok(p) => p,
                Err(e) => return fail(e, 1),
            };

            let mut manifest = match serde_json::to_value(&pack) {
                Ok(v) => v,
                Err(e) => return fail(e, 1),
            };
            if !embed {
                if let Some(obj) = manifest.as_object_mut() {
                    obj.remove("data_base64");
                }
            }
            emit(&serde_json::json!({
                "success": true,
                "path": path,
                "pack": manifest,
            }))
        }

        Commands::Guide { payload, out_dir } => {
            let request: GuideRequest = match serde_json::from_str(&payload) {
                Ok(r) => r,
                Err(e) => return fail(format!("Invalid payload: {}", e), 2),
            };

            let mut session = Session::new();
            if let Err(e) = session.create_project(request.draft) {
                return fail(e, 2);
            }
            if let Err(e) = session.apply_parameters(request.parameters) {
                return fail(e, 2);
            }

            let document = match pipeline.compile_guide(&session) {
                Ok(d) => d,
                Err(e) => return fail(e, 1),
            };
            let dir = out_dir.unwrap_or_else(|| config.output_dir.clone());
            match write_document(&dir, &document) {
                Ok(path) => emit(&serde_json::json!({
                    "success": true,
                    "path": path,
                    "document": document,
                    "project": session.project().ok(),
                })),
                Err(e) => fail(e, 1),
            }
        }
    }
}
