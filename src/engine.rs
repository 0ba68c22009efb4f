//! External simulation engine seam.
//!
//! The engine itself runs out of process. This module only defines the
//! call contract and turns its severity-tagged log back into
//! `ValidationIssue`s the repair loop can act on.

use crate::document::Document;
use crate::validate::graph::EntityKind;
use crate::validate::{IssueCategory, ValidationIssue};
use anyhow::Result;
use std::path::Path;

/// Result of one engine run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EngineOutcome {
    pub success: bool,
    /// Raw diagnostic log, one message per line.
    pub diagnostics: String,
}

impl EngineOutcome {
    pub fn success() -> Self {
        Self {
            success: true,
            diagnostics: String::new(),
        }
    }

    pub fn failure(diagnostics: &str) -> Self {
        Self {
            success: false,
            diagnostics: diagnostics.to_string(),
        }
    }
}

/// Anything able to simulate a document against a weather file.
///
/// Implementations block until the run finishes.
pub trait SimulationEngine {
    fn run(&self, doc: &Document, weather: &Path) -> Result<EngineOutcome>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Severe,
    Fatal,
}

/// Splits `** Severe  ** message` into its severity and message.
pub fn parse_line(line: &str) -> Option<(Severity, &str)> {
    let rest = line.trim_start().strip_prefix("**")?;
    let (tag, message) = rest.split_once("**")?;
    let severity = match tag.trim() {
        "Warning" => Severity::Warning,
        "Severe" => Severity::Severe,
        "Fatal" => Severity::Fatal,
        _ => return None,
    };
    Some((severity, message.trim()))
}

fn quoted_name(message: &str) -> Option<String> {
    let start = message.find("=\"")? + 2;
    let len = message[start..].find('"')?;
    Some(message[start..start + len].to_string())
}

fn referenced_kind(lower: &str) -> Option<EntityKind> {
    const KEYWORDS: [(&str, EntityKind); 7] = [
        ("construction", EntityKind::Construction),
        ("material", EntityKind::Material),
        ("scheduletypelimits", EntityKind::ScheduleTypeLimits),
        ("schedule", EntityKind::Schedule),
        ("thermostat", EntityKind::Thermostat),
        ("zone", EntityKind::Zone),
        ("surface", EntityKind::Surface),
    ];
    KEYWORDS
        .iter()
        .find(|(k, _)| lower.contains(k))
        .map(|(_, kind)| *kind)
}

/// Maps one severe or fatal message to an issue category by keyword.
pub fn classify(message: &str) -> IssueCategory {
    let lower = message.to_lowercase();
    let has = |k: &str| lower.contains(k);
    if has("degenerate") || has("coincident") || has("collinear") {
        IssueCategory::DegenerateVertex
    } else if has("enclos") || has("not closed") {
        IssueCategory::UnclosedGeometry
    } else if has("reciprocal") || has("outside boundary condition object") {
        IssueCategory::UnpairedSurface
    } else if has("schedule") && (has("through") || has("until")) {
        IssueCategory::ScheduleFormat
    } else if has("out of range") || has("must be") {
        IssueCategory::RangeConstraint
    } else if has("not found") {
        IssueCategory::DanglingReference
    } else {
        IssueCategory::EngineFailure
    }
}

/// Turns an engine log into issues, one per severe or fatal line.
///
/// Warnings are ignored. Dangling references carry the kind and name of
/// the missing entity when the message spells them out.
pub fn diagnostic_issues(log: &str) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    for (severity, message) in log.lines().filter_map(parse_line) {
        if severity == Severity::Warning {
            continue;
        }
        let category = classify(message);
        let name = quoted_name(message);
        let kind = match category {
            IssueCategory::DanglingReference => referenced_kind(&message.to_lowercase()),
            _ => None,
        };
        issues.push(ValidationIssue::new(
            category,
            kind,
            name.into_iter().collect(),
            format!("engine: {message}"),
        ));
    }
    issues
}
