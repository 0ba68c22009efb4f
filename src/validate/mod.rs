//! Document integrity validation.
//!
//! Four independent checks run over the assembled document: reference
//! integrity, volumetric closure, vertex degeneracy and field ranges
//! (including schedule structure). All issues are aggregated; nothing
//! short-circuits on the first failure.

pub mod closure;
pub mod degeneracy;
pub mod graph;
pub mod ranges;
pub mod references;
pub mod schedules;

use crate::document::Document;
use graph::EntityKind;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IssueCategory {
    DanglingReference,
    UnclosedGeometry,
    DegenerateVertex,
    RangeConstraint,
    ScheduleFormat,
    /// Surface-paired boundary with a missing or asymmetric reciprocal.
    UnpairedSurface,
    /// Zone without an ideal loads binding.
    UncontrolledZone,
    DuplicateName,
    /// Engine diagnostic that matches no other category.
    EngineFailure,
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub category: IssueCategory,
    /// Kind of the first entry of `entities`, when known.
    pub kind: Option<EntityKind>,
    /// Offending entity names. The subject comes first.
    pub entities: Vec<String>,
    pub detail: String,
}

impl ValidationIssue {
    pub fn new(
        category: IssueCategory,
        kind: Option<EntityKind>,
        entities: Vec<String>,
        detail: String,
    ) -> Self {
        Self {
            category,
            kind,
            entities,
            detail,
        }
    }

    /// Primary entity the issue is about.
    pub fn subject(&self) -> Option<&str> {
        self.entities.first().map(|s| s.as_str())
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.category, self.detail)
    }
}

/// Runs every check, with the checks executed concurrently.
pub fn validate(doc: &Document) -> Vec<ValidationIssue> {
    validate_with(doc, true)
}

/// Runs every check; issues are ordered by check, then by document order.
pub fn validate_with(doc: &Document, parallel: bool) -> Vec<ValidationIssue> {
    let (refs, (closed, (degenerate, fields))) = if parallel {
        rayon::join(
            || references::check_references(doc),
            || {
                rayon::join(
                    || closure::check_closure(doc),
                    || {
                        rayon::join(
                            || degeneracy::check_degeneracy(doc),
                            || field_checks(doc),
                        )
                    },
                )
            },
        )
    } else {
        (
            references::check_references(doc),
            (
                closure::check_closure(doc),
                (degeneracy::check_degeneracy(doc), field_checks(doc)),
            ),
        )
    };

    let mut issues = refs;
    issues.extend(closed);
    issues.extend(degenerate);
    issues.extend(fields);
    issues
}

fn field_checks(doc: &Document) -> Vec<ValidationIssue> {
    let mut issues = ranges::check_ranges(doc);
    issues.extend(schedules::check_schedules(doc));
    issues
}

pub fn is_valid(doc: &Document) -> bool {
    validate(doc).is_empty()
}
