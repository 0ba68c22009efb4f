//! Bounded validate-and-repair loop.
//!
//! The loop is an explicit state machine:
//!
//! ```text
//! Generated -> Validated -> Accepted
//!                  |
//!                  +-> Repairing -> Generated (next generation)
//!                  |
//!                  +-> Failed (budget exhausted or no mapped repair)
//! ```
//!
//! Every pass re-runs the full validator on the repaired document. The loop
//! only promises to stop after `budget` repairs; it does not promise to
//! succeed.

pub mod actions;

use crate::document::Document;
use crate::engine::{SimulationEngine, diagnostic_issues};
use crate::error::RepairError;
use crate::validate::{IssueCategory, ValidationIssue, validate_with};
use actions::{DefaultRepairs, Repair};
use std::path::Path;

/// Number of repairs attempted before giving up.
pub const DEFAULT_BUDGET: u32 = 3;

#[derive(Debug, Clone, PartialEq)]
pub enum FailureReason {
    BudgetExhausted,
    /// At least one issue has no mapped repair.
    Unrepairable,
    /// The engine itself could not be run.
    Engine(String),
}

/// Loop state. `repairs` counts the repairs applied so far.
#[derive(Debug, Clone, PartialEq)]
pub enum LoopState {
    Generated {
        repairs: u32,
    },
    Validated {
        repairs: u32,
        issues: Vec<ValidationIssue>,
    },
    Repairing {
        repairs: u32,
        issues: Vec<ValidationIssue>,
    },
    Accepted {
        repairs: u32,
    },
    Failed {
        repairs: u32,
        reason: FailureReason,
        issues: Vec<ValidationIssue>,
    },
}

impl LoopState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, LoopState::Accepted { .. } | LoopState::Failed { .. })
    }

    pub fn repairs(&self) -> u32 {
        match self {
            LoopState::Generated { repairs }
            | LoopState::Validated { repairs, .. }
            | LoopState::Repairing { repairs, .. }
            | LoopState::Accepted { repairs }
            | LoopState::Failed { repairs, .. } => *repairs,
        }
    }
}

/// One validation pass and the repair that followed it, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Attempt {
    /// Document generation that was validated.
    pub generation: u32,
    pub issues: Vec<ValidationIssue>,
    pub changes: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct RepairReport {
    /// Terminal state.
    pub state: LoopState,
    pub document: Document,
    pub history: Vec<Attempt>,
}

impl RepairReport {
    pub fn is_accepted(&self) -> bool {
        matches!(self.state, LoopState::Accepted { .. })
    }

    /// Issues of the last validation pass.
    pub fn issues(&self) -> &[ValidationIssue] {
        match &self.state {
            LoopState::Failed { issues, .. } => issues,
            _ => &[],
        }
    }

    pub fn into_result(self) -> Result<Document, RepairError> {
        match self.state {
            LoopState::Failed {
                reason: FailureReason::BudgetExhausted,
                issues,
                repairs,
            } => Err(RepairError::BudgetExhausted {
                budget: repairs,
                issues,
            }),
            LoopState::Failed {
                reason: FailureReason::Unrepairable,
                issues,
                ..
            } => Err(RepairError::Unrepairable { issues }),
            LoopState::Failed {
                reason: FailureReason::Engine(msg),
                ..
            } => Err(RepairError::Engine(msg)),
            _ => Ok(self.document),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RepairLoop<R: Repair = DefaultRepairs> {
    pub budget: u32,
    /// Run the validator checks concurrently.
    pub parallel: bool,
    repairs: R,
}

impl RepairLoop<DefaultRepairs> {
    pub fn new() -> Self {
        Self::with_repairs(DefaultRepairs)
    }
}

impl Default for RepairLoop<DefaultRepairs> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Repair> RepairLoop<R> {
    pub fn with_repairs(repairs: R) -> Self {
        Self {
            budget: DEFAULT_BUDGET,
            parallel: true,
            repairs,
        }
    }

    pub fn budget(mut self, budget: u32) -> Self {
        self.budget = budget;
        self
    }

    /// Validates and repairs `doc` until it is accepted or the loop fails.
    pub fn run(&self, doc: Document) -> RepairReport {
        let parallel = self.parallel;
        self.drive(doc, |d| Ok(validate_with(d, parallel)))
    }

    /// Like `run`, but a document that passes validation is also submitted
    /// to the engine. Engine diagnostics are fed back into the same loop.
    pub fn run_with_engine(
        &self,
        doc: Document,
        engine: &dyn SimulationEngine,
        weather: &Path,
    ) -> RepairReport {
        let parallel = self.parallel;
        self.drive(doc, |d| {
            let issues = validate_with(d, parallel);
            if !issues.is_empty() {
                return Ok(issues);
            }
            let outcome = engine.run(d, weather).map_err(|e| format!("{e:#}"))?;
            if outcome.success {
                return Ok(Vec::new());
            }
            let mut issues = diagnostic_issues(&outcome.diagnostics);
            if issues.is_empty() {
                issues.push(ValidationIssue::new(
                    IssueCategory::EngineFailure,
                    None,
                    Vec::new(),
                    "engine reported failure without severe diagnostics".to_string(),
                ));
            }
            Ok(issues)
        })
    }

    /// Performs a single transition.
    pub fn step(
        &self,
        state: LoopState,
        doc: &mut Document,
        check: &mut dyn FnMut(&Document) -> Result<Vec<ValidationIssue>, String>,
        history: &mut Vec<Attempt>,
    ) -> LoopState {
        match state {
            LoopState::Generated { repairs } => match check(doc) {
                Ok(issues) => {
                    history.push(Attempt {
                        generation: doc.generation,
                        issues: issues.clone(),
                        changes: Vec::new(),
                    });
                    LoopState::Validated { repairs, issues }
                }
                Err(msg) => {
                    log::warn!("Engine run failed: {msg}");
                    LoopState::Failed {
                        repairs,
                        reason: FailureReason::Engine(msg),
                        issues: Vec::new(),
                    }
                }
            },
            LoopState::Validated { repairs, issues } => {
                if issues.is_empty() {
                    LoopState::Accepted { repairs }
                } else if issues.iter().any(|i| !self.repairs.handles(i)) {
                    for i in issues.iter().filter(|i| !self.repairs.handles(i)) {
                        log::warn!("No repair for {i}");
                    }
                    LoopState::Failed {
                        repairs,
                        reason: FailureReason::Unrepairable,
                        issues,
                    }
                } else if repairs >= self.budget {
                    LoopState::Failed {
                        repairs,
                        reason: FailureReason::BudgetExhausted,
                        issues,
                    }
                } else {
                    LoopState::Repairing { repairs, issues }
                }
            }
            LoopState::Repairing { repairs, issues } => {
                let mut changes = Vec::new();
                for issue in &issues {
                    changes.extend(self.repairs.apply(doc, issue));
                }
                doc.generation += 1;
                log::debug!(
                    "Repair {} of {}: {} issues, {} changes",
                    repairs + 1,
                    self.budget,
                    issues.len(),
                    changes.len()
                );
                if let Some(last) = history.last_mut() {
                    last.changes = changes;
                }
                LoopState::Generated {
                    repairs: repairs + 1,
                }
            }
            terminal => terminal,
        }
    }

    fn drive(
        &self,
        mut doc: Document,
        mut check: impl FnMut(&Document) -> Result<Vec<ValidationIssue>, String>,
    ) -> RepairReport {
        let mut history = Vec::new();
        let mut state = LoopState::Generated { repairs: 0 };
        while !state.is_terminal() {
            state = self.step(state, &mut doc, &mut check, &mut history);
        }
        match &state {
            LoopState::Accepted { repairs } => {
                log::info!("Document {} accepted after {repairs} repairs", doc.building.name)
            }
            LoopState::Failed {
                reason, issues, ..
            } => log::warn!(
                "Document {} failed ({reason:?}) with {} outstanding issues",
                doc.building.name,
                issues.len()
            ),
            _ => {}
        }
        RepairReport {
            state,
            document: doc,
            history,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EngineOutcome;
    use crate::generate::descriptor::BuildingDescriptor;
    use crate::generate::{GenerationOptions, generate_document};
    use std::cell::Cell;

    fn doc() -> Document {
        let desc = BuildingDescriptor::with_footprint("b", 1, 10., 10.);
        generate_document(&desc, &GenerationOptions::default()).unwrap()
    }

    struct NoOp;

    impl Repair for NoOp {
        fn handles(&self, _issue: &ValidationIssue) -> bool {
            true
        }

        fn apply(&self, _doc: &mut Document, _issue: &ValidationIssue) -> Vec<String> {
            Vec::new()
        }
    }

    #[test]
    fn test_valid_document_accepted_immediately() {
        let report = RepairLoop::new().run(doc());
        assert!(report.is_accepted());
        assert_eq!(report.state, LoopState::Accepted { repairs: 0 });
        assert_eq!(report.history.len(), 1);
        assert_eq!(report.document.generation, 0);
    }

    #[test]
    fn test_repairs_increment_generation() {
        let mut d = doc();
        d.site.latitude = 100.0;
        d.building.north_axis = -90.0;
        let report = RepairLoop::new().run(d);
        assert_eq!(report.state, LoopState::Accepted { repairs: 1 });
        assert_eq!(report.document.generation, 1);
        assert!((report.document.building.north_axis - 270.0).abs() < 1e-9);
        assert_eq!(report.history[0].issues.len(), 2);
        assert!(!report.history[0].changes.is_empty());
        assert!(report.history[1].issues.is_empty());
    }

    #[test]
    fn test_budget_exhausted() {
        let mut d = doc();
        d.site.latitude = 100.0;
        let report = RepairLoop::with_repairs(NoOp).run(d);
        assert!(!report.is_accepted());
        assert_eq!(report.history.len(), 4);
        assert_eq!(report.document.generation, 3);
        assert_eq!(report.issues().len(), 1);
        match report.into_result() {
            Err(RepairError::BudgetExhausted { budget, issues }) => {
                assert_eq!(budget, 3);
                assert_eq!(issues[0].category, IssueCategory::RangeConstraint);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_unmapped_issue_fails_early() {
        let mut d = doc();
        d.surfaces[0].zone = "Ghost".to_string();
        let report = RepairLoop::new().run(d);
        assert!(matches!(
            report.state,
            LoopState::Failed {
                repairs: 0,
                reason: FailureReason::Unrepairable,
                ..
            }
        ));
        assert!(matches!(
            report.into_result(),
            Err(RepairError::Unrepairable { .. })
        ));
    }

    struct ScriptedEngine {
        calls: Cell<u32>,
    }

    impl SimulationEngine for ScriptedEngine {
        fn run(&self, _doc: &Document, _weather: &Path) -> anyhow::Result<EngineOutcome> {
            let n = self.calls.get();
            self.calls.set(n + 1);
            if n == 0 {
                Ok(EngineOutcome::failure(
                    "** Severe  ** Site latitude out of range\n",
                ))
            } else {
                Ok(EngineOutcome::success())
            }
        }
    }

    struct BrokenEngine;

    impl SimulationEngine for BrokenEngine {
        fn run(&self, _doc: &Document, _weather: &Path) -> anyhow::Result<EngineOutcome> {
            anyhow::bail!("executable not found")
        }
    }

    #[test]
    fn test_engine_diagnostics_feed_back() {
        let engine = ScriptedEngine {
            calls: Cell::new(0),
        };
        let report = RepairLoop::new().run_with_engine(doc(), &engine, Path::new("w.epw"));
        assert!(report.is_accepted());
        assert_eq!(engine.calls.get(), 2);
        assert_eq!(report.state.repairs(), 1);
        assert_eq!(
            report.history[0].issues[0].category,
            IssueCategory::RangeConstraint
        );
    }

    #[test]
    fn test_engine_error() {
        let report = RepairLoop::new().run_with_engine(doc(), &BrokenEngine, Path::new("w.epw"));
        match report.into_result() {
            Err(RepairError::Engine(msg)) => assert!(msg.contains("executable not found")),
            other => panic!("unexpected {other:?}"),
        }
    }
}
