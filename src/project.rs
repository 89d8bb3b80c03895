//! Projects, Print Guides and the Wizard Session
//!
//! A [`Session`] owns the active project and its print guide. Every wizard
//! step takes the session explicitly; state is replaced wholesale, never
//! patched field by field.

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;
use uuid::Uuid;

use crate::catalog::Category;
use crate::validation::{ValidationResult, Validator};

pub const DEFAULT_FABRIC_STRETCH_PCT: u32 = 0;
pub const DEFAULT_SEAM_ALLOWANCE_MM: u32 = 10;
/// Seam allowances above this call for interfacing in the print guide.
pub const INTERFACING_THRESHOLD_MM: u32 = 10;

pub const NO_PROJECT_MESSAGE: &str = "No project found. Please start from the beginning.";
pub const NO_GUIDE_MESSAGE: &str = "No generated pattern found. Please set your parameters first.";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("{0}")]
    MissingState(&'static str),

    #[error("Validation failed: {}", .0.summary())]
    Invalid(ValidationResult),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub category: Category,
    pub size: u32,
    pub garment_type: String,
    pub fabric_stretch_pct: u32,
    pub seam_allowance_mm: u32,
    pub notes: String,
    #[serde(default)]
    pub reference_image_url: Option<String>,
    pub include_notches: bool,
    pub include_grainline: bool,
    pub created_at: DateTime<Utc>,
}

/// Wizard step one input. Absent and empty values are treated alike.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectDraft {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub size: Option<u32>,
    #[serde(default)]
    pub garment_type: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Wizard step two input. Unset fields keep the project's current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudioParameters {
    #[serde(default)]
    pub fabric_stretch_pct: Option<u32>,
    #[serde(default)]
    pub seam_allowance_mm: Option<u32>,
    #[serde(default)]
    pub include_notches: Option<bool>,
    #[serde(default)]
    pub include_grainline: Option<bool>,
}

impl Project {
    /// Build a project from a draft that already passed validation.
    fn from_draft(draft: ProjectDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: draft.title.unwrap_or_default().trim().to_string(),
            category: draft.category.unwrap_or(Category::Womens),
            size: draft.size.unwrap_or_default(),
            garment_type: draft.garment_type.unwrap_or_default(),
            fabric_stretch_pct: DEFAULT_FABRIC_STRETCH_PCT,
            seam_allowance_mm: DEFAULT_SEAM_ALLOWANCE_MM,
            notes: draft.notes.unwrap_or_default(),
            reference_image_url: None,
            include_notches: true,
            include_grainline: true,
            created_at: Utc::now(),
        }
    }

    /// New project value with `params` applied over the current settings.
    pub fn with_parameters(&self, params: &StudioParameters) -> Self {
        Self {
            fabric_stretch_pct: params.fabric_stretch_pct.unwrap_or(self.fabric_stretch_pct),
            seam_allowance_mm: params.seam_allowance_mm.unwrap_or(self.seam_allowance_mm),
            include_notches: params.include_notches.unwrap_or(self.include_notches),
            include_grainline: params.include_grainline.unwrap_or(self.include_grainline),
            ..self.clone()
        }
    }
}

/// Ordered key/value settings. Serializes as a JSON object in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings(Vec<(String, String)>);

impl Settings {
    pub fn push(&mut self, key: &str, value: impl Into<String>) {
        self.0.push((key.to_string(), value.into()));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Settings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PrintGuide {
    pub materials: Vec<String>,
    pub steps: Vec<String>,
    pub settings: Settings,
}

fn included(flag: bool) -> &'static str {
    if flag { "Included" } else { "Not included" }
}

/// Derive the print guide for `project`. Independent of garment inference.
pub fn generate_print_guide(project: &Project) -> PrintGuide {
    let mut materials = vec![
        format!(
            "Primary fabric: 2.5m ({}, {})",
            project.garment_type, project.category
        ),
        "Matching thread: 1 spool".to_string(),
    ];
    if project.seam_allowance_mm > INTERFACING_THRESHOLD_MM {
        materials.push("Interfacing: 0.5m".to_string());
    }
    materials.push("Pins, scissors, marking chalk".to_string());
    if project.include_notches {
        materials.push("Notch cutter or snips".to_string());
    }

    let mut steps = vec![
        "Print all pattern pages and verify 5cm calibration square.".to_string(),
        format!(
            "Cut along solid lines with {}mm seam allowance included.",
            project.seam_allowance_mm
        ),
    ];
    if project.include_notches {
        steps.push("Transfer all notch markings to fabric.".to_string());
    }
    if project.include_grainline {
        steps.push("Align grainline arrows with fabric selvedge.".to_string());
    }
    steps.extend([
        format!(
            "Pin pattern pieces to fabric ({}% stretch considered).",
            project.fabric_stretch_pct
        ),
        format!("Cut fabric pieces for size {}.", project.size),
        "Assemble following numbered sequence.".to_string(),
        "Press seams and finish edges.".to_string(),
        "Final fitting and adjustments.".to_string(),
    ]);

    let mut settings = Settings::default();
    settings.push("Project", project.title.clone());
    settings.push("Garment", project.garment_type.clone());
    settings.push("Category", project.category.to_string());
    settings.push("Size", format!("{} (metric)", project.size));
    settings.push("Fabric Stretch", format!("{}%", project.fabric_stretch_pct));
    settings.push("Seam Allowance", format!("{}mm", project.seam_allowance_mm));
    settings.push("Notches", included(project.include_notches));
    settings.push("Grainline", included(project.include_grainline));

    PrintGuide {
        materials,
        steps,
        settings,
    }
}

/// Wizard state for one user session.
#[derive(Debug, Default)]
pub struct Session {
    project: Option<Project>,
    print_guide: Option<PrintGuide>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Step one: validate the draft and start a new project. Any guide from a
    /// previous project is discarded.
    pub fn create_project(&mut self, draft: ProjectDraft) -> Result<&Project, SessionError> {
        let result = Validator::for_project().validate(&draft);
        if !result.valid {
            return Err(SessionError::Invalid(result));
        }

        let project = Project::from_draft(draft);
        tracing::info!(project_id = %project.id, garment = %project.garment_type, "project created");
        self.print_guide = None;
        Ok(self.project.insert(project))
    }

    pub fn project(&self) -> Result<&Project, SessionError> {
        self.project
            .as_ref()
            .ok_or(SessionError::MissingState(NO_PROJECT_MESSAGE))
    }

    /// Step two: apply parameters, replacing the project and regenerating the
    /// print guide.
    pub fn apply_parameters(&mut self, params: StudioParameters) -> Result<&PrintGuide, SessionError> {
        let current = self.project()?;

        let result = Validator::for_parameters().validate(&params);
        if !result.valid {
            return Err(SessionError::Invalid(result));
        }
        for warning in result.warnings() {
            tracing::warn!(field = %warning.field, "{}", warning.message);
        }

        let updated = current.with_parameters(&params);
        let guide = generate_print_guide(&updated);
        tracing::debug!(steps = guide.steps.len(), "print guide generated");

        self.project = Some(updated);
        Ok(self.print_guide.insert(guide))
    }

    /// Step three: everything the output page needs.
    pub fn output(&self) -> Result<(&Project, &PrintGuide), SessionError> {
        let project = self.project()?;
        let guide = self
            .print_guide
            .as_ref()
            .ok_or(SessionError::MissingState(NO_GUIDE_MESSAGE))?;
        Ok((project, guide))
    }

    pub fn reset(&mut self) {
        self.project = None;
        self.print_guide = None;
    }
}
