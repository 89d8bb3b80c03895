//! Validation System - Rule/Policy Separation
//!
//! Rules produce structured violations.
//! Policy: any `Error` violation rejects the input; warnings are recorded.

use serde::{Deserialize, Serialize};

use crate::project::{ProjectDraft, StudioParameters};

pub const TITLE_MAX_CHARS: usize = 100;
pub const NOTES_MAX_CHARS: usize = 500;
pub const SIZE_RANGE: (u32, u32) = (1, 200);
pub const STRETCH_RANGE_PCT: (u32, u32) = (0, 100);
/// Above this, stretch is outside the usual knit range.
pub const TYPICAL_STRETCH_MAX_PCT: u32 = 25;
pub const SEAM_ALLOWANCE_RANGE_MM: (u32, u32) = (3, 30);

pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields.";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ViolationSeverity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationViolation {
    pub rule: String,
    pub severity: ViolationSeverity,
    pub field: String,
    pub message: String,
    pub expected: Option<String>,
    pub actual: Option<String>,
}

impl ValidationViolation {
    fn error(rule: &str, field: &str, message: impl Into<String>) -> Self {
        Self {
            rule: rule.to_string(),
            severity: ViolationSeverity::Error,
            field: field.to_string(),
            message: message.into(),
            expected: None,
            actual: None,
        }
    }

    fn with_range(mut self, expected: String, actual: String) -> Self {
        self.expected = Some(expected);
        self.actual = Some(actual);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub violations: Vec<ValidationViolation>,
}

impl ValidationResult {
    pub fn has_errors(&self) -> bool {
        self.violations.iter().any(|v| v.severity == ViolationSeverity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationViolation> {
        self.violations
            .iter()
            .filter(|v| v.severity == ViolationSeverity::Warning)
    }

    /// One-line summary of the blocking violations.
    pub fn summary(&self) -> String {
        let messages: Vec<_> = self
            .violations
            .iter()
            .filter(|v| v.severity == ViolationSeverity::Error)
            .map(|v| format!("{}: {}", v.field, v.message))
            .collect();
        messages.join("; ")
    }
}

/// Validation rule trait - produces violations
pub trait ValidationRule<I> {
    fn name(&self) -> &'static str;
    fn validate(&self, input: &I) -> Vec<ValidationViolation>;
}

fn range_check(
    rule: &str,
    field: &str,
    value: Option<u32>,
    (min, max): (u32, u32),
    unit: &str,
) -> Option<ValidationViolation> {
    let value = value?;
    if value < min || value > max {
        Some(
            ValidationViolation::error(rule, field, format!("Must be between {} and {}{}", min, max, unit))
                .with_range(format!("{}–{}{}", min, max, unit), format!("{}{}", value, unit)),
        )
    } else {
        None
    }
}

// --- Project draft rules ---

pub struct RequiredFieldsRule;

impl ValidationRule<ProjectDraft> for RequiredFieldsRule {
    fn name(&self) -> &'static str { "required_fields" }

    fn validate(&self, input: &ProjectDraft) -> Vec<ValidationViolation> {
        let blank = |s: &Option<String>| s.as_deref().map_or(true, |v| v.trim().is_empty());

        let mut missing = vec![];
        if blank(&input.title) {
            missing.push("title");
        }
        if input.category.is_none() {
            missing.push("category");
        }
        if input.size.is_none() {
            missing.push("size");
        }
        if blank(&input.garment_type) {
            missing.push("garment_type");
        }

        missing
            .into_iter()
            .map(|field| ValidationViolation::error(self.name(), field, REQUIRED_FIELDS_MESSAGE))
            .collect()
    }
}

pub struct TextLengthRule;

impl ValidationRule<ProjectDraft> for TextLengthRule {
    fn name(&self) -> &'static str { "text_length" }

    fn validate(&self, input: &ProjectDraft) -> Vec<ValidationViolation> {
        let checks = [
            ("title", input.title.as_deref().map(str::trim), TITLE_MAX_CHARS),
            ("notes", input.notes.as_deref(), NOTES_MAX_CHARS),
        ];

        checks
            .iter()
            .filter_map(|(field, value, max)| {
                let len = (*value)?.chars().count();
                (len > *max).then(|| {
                    ValidationViolation::error(self.name(), field, format!("At most {} characters", max))
                        .with_range(format!("<= {}", max), len.to_string())
                })
            })
            .collect()
    }
}

pub struct SizeRangeRule;

impl ValidationRule<ProjectDraft> for SizeRangeRule {
    fn name(&self) -> &'static str { "size_range" }

    fn validate(&self, input: &ProjectDraft) -> Vec<ValidationViolation> {
        range_check(self.name(), "size", input.size, SIZE_RANGE, "")
            .into_iter()
            .collect()
    }
}

// --- Studio parameter rules ---

pub struct StretchRule;

impl ValidationRule<StudioParameters> for StretchRule {
    fn name(&self) -> &'static str { "fabric_stretch" }

    fn validate(&self, input: &StudioParameters) -> Vec<ValidationViolation> {
        if let Some(v) = range_check(
            self.name(),
            "fabric_stretch_pct",
            input.fabric_stretch_pct,
            STRETCH_RANGE_PCT,
            "%",
        ) {
            return vec![v];
        }

        match input.fabric_stretch_pct {
            Some(pct) if pct > TYPICAL_STRETCH_MAX_PCT => vec![ValidationViolation {
                rule: self.name().to_string(),
                severity: ViolationSeverity::Warning,
                field: "fabric_stretch_pct".to_string(),
                message: "Unusually high stretch: 0% for woven, 5-25% for knits".to_string(),
                expected: Some(format!("<= {}%", TYPICAL_STRETCH_MAX_PCT)),
                actual: Some(format!("{}%", pct)),
            }],
            _ => vec![],
        }
    }
}

pub struct SeamAllowanceRule;

impl ValidationRule<StudioParameters> for SeamAllowanceRule {
    fn name(&self) -> &'static str { "seam_allowance" }

    fn validate(&self, input: &StudioParameters) -> Vec<ValidationViolation> {
        range_check(
            self.name(),
            "seam_allowance_mm",
            input.seam_allowance_mm,
            SEAM_ALLOWANCE_RANGE_MM,
            "mm",
        )
        .into_iter()
        .collect()
    }
}

/// Validator orchestrates rules and applies policy
pub struct Validator<I> {
    rules: Vec<Box<dyn ValidationRule<I>>>,
}

impl<I> Validator<I> {
    pub fn new(rules: Vec<Box<dyn ValidationRule<I>>>) -> Self {
        Self { rules }
    }

    pub fn validate(&self, input: &I) -> ValidationResult {
        let mut violations = vec![];
        for rule in &self.rules {
            violations.extend(rule.validate(input));
        }

        let has_errors = violations
            .iter()
            .any(|v| v.severity == ViolationSeverity::Error);

        if has_errors {
            tracing::debug!(count = violations.len(), "validation rejected input");
        }

        ValidationResult {
            valid: !has_errors,
            violations,
        }
    }
}

impl Validator<ProjectDraft> {
    pub fn for_project() -> Self {
        Self::new(vec![
            Box::new(RequiredFieldsRule),
            Box::new(TextLengthRule),
            Box::new(SizeRangeRule),
        ])
    }
}

impl Validator<StudioParameters> {
    pub fn for_parameters() -> Self {
        Self::new(vec![Box::new(StretchRule), Box::new(SeamAllowanceRule)])
    }
}
