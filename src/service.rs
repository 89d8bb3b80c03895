//! Inference Service Boundary
//!
//! Parses request bodies, resolves the garment type and answers with the
//! recommendation record. Every failure here is a client error.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::catalog::{SizeSystem, UnknownSizeSystem};
use crate::inference::{infer, infer_type, GarmentInference};

pub const BAD_REQUEST: u16 = 400;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("size_system and size are required")]
    MissingField,

    #[error("Invalid request")]
    InvalidRequest(#[source] serde_json::Error),

    #[error(transparent)]
    UnknownSizeSystem(#[from] UnknownSizeSystem),
}

impl ServiceError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingField | Self::InvalidRequest(_) | Self::UnknownSizeSystem(_) => BAD_REQUEST,
        }
    }

    /// JSON error body sent back to the caller.
    pub fn body(&self) -> serde_json::Value {
        serde_json::json!({ "error": self.to_string() })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InferenceRequest {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub size_system: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub garment_type_override: Option<String>,
}

/// A request with its garment type decided and its size system parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRequest {
    pub garment_type: String,
    pub size_system: SizeSystem,
    pub size: String,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl InferenceRequest {
    pub fn parse(body: &str) -> Result<Self, ServiceError> {
        serde_json::from_str(body).map_err(ServiceError::InvalidRequest)
    }

    /// Override first, then description keywords, then the default garment.
    pub fn garment_type(&self) -> String {
        if let Some(garment) = present(&self.garment_type_override) {
            return garment.to_string();
        }
        infer_type(present(&self.description).unwrap_or_default()).to_string()
    }

    pub fn resolve(&self) -> Result<ResolvedRequest, ServiceError> {
        let (system, size) = match (present(&self.size_system), present(&self.size)) {
            (Some(system), Some(size)) => (system, size),
            _ => return Err(ServiceError::MissingField),
        };

        Ok(ResolvedRequest {
            garment_type: self.garment_type(),
            size_system: system.parse()?,
            size: size.to_string(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InferenceResponse {
    pub project_id: Uuid,
    pub garment_type: String,
    pub recommendations: GarmentInference,
    /// Always null; documents are composed on a separate call.
    pub pdf_pack_url: Option<String>,
}

pub fn handle_request(request: &InferenceRequest) -> Result<InferenceResponse, ServiceError> {
    let resolved = request.resolve()?;
    let recommendations = infer(&resolved.garment_type, resolved.size_system, &resolved.size);

    Ok(InferenceResponse {
        project_id: Uuid::new_v4(),
        garment_type: resolved.garment_type,
        recommendations,
        pdf_pack_url: None,
    })
}

/// Parse `body` and answer it, logging the outcome.
pub fn handle_generate(body: &str) -> Result<InferenceResponse, ServiceError> {
    let result = InferenceRequest::parse(body).and_then(|request| handle_request(&request));
    match &result {
        Ok(response) => tracing::info!(
            project_id = %response.project_id,
            garment = %response.garment_type,
            "inference request served"
        ),
        Err(e) => tracing::warn!(error = %e, "inference request rejected"),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_with_override() {
        let body = r#"{"size_system":"au_women","size":"12","garment_type_override":"Jacket","description":"a summer dress"}"#;
        let response = handle_generate(body).unwrap();
        assert_eq!(response.garment_type, "Jacket");
        assert_eq!(response.recommendations.fabric_type, "Wool Blend Suiting");
        assert!(response.pdf_pack_url.is_none());
    }

    #[test]
    fn test_generate_from_description() {
        let body = r#"{"size_system":"au_men","size":"L","description":"a cozy pullover for winter"}"#;
        let response = handle_generate(body).unwrap();
        assert_eq!(response.garment_type, "Hoodie");
    }

    #[test]
    fn test_generate_defaults_to_dress() {
        let body = r#"{"size_system":"dogs","size":"M","garment_type_override":"  "}"#;
        let response = handle_generate(body).unwrap();
        assert_eq!(response.garment_type, "Dress");
        assert_eq!(response.recommendations.seam_allowance_mm, 8);
    }

    #[test]
    fn test_missing_fields() {
        for body in [r#"{"size":"12"}"#, r#"{"size_system":"au_women"}"#, r#"{"size_system":"au_women","size":""}"#] {
            let err = handle_generate(body).unwrap_err();
            assert!(matches!(err, ServiceError::MissingField));
            assert_eq!(err.status_code(), 400);
            assert_eq!(err.body()["error"], "size_system and size are required");
        }
    }

    #[test]
    fn test_malformed_and_unknown() {
        let err = handle_generate("{not json").unwrap_err();
        assert!(matches!(err, ServiceError::InvalidRequest(_)));
        assert_eq!(err.to_string(), "Invalid request");

        let err = handle_generate(r#"{"size_system":"us_women","size":"8"}"#).unwrap_err();
        assert!(matches!(err, ServiceError::UnknownSizeSystem(_)));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_response_uses_camel_case() {
        let body = r#"{"size_system":"au_kids","size":"6","garment_type_override":"T-Shirt"}"#;
        let json = serde_json::to_value(handle_generate(body).unwrap()).unwrap();
        assert!(json.get("projectId").is_some());
        assert!(json["pdfPackUrl"].is_null());
        assert_eq!(json["recommendations"]["fabricQuantityM"], 0.9);
    }
}
