//! Structural checks for compact schedules.

use crate::document::Document;
use crate::sim::schedule::{
    CompactSchedule, DayBlock, DayDate, DayType, SchedulePeriod, TimeOfDay, Until,
};
use crate::validate::graph::EntityKind;
use crate::validate::{IssueCategory, ValidationIssue};

/// Structural problems of one schedule, as human readable messages.
pub fn schedule_problems(s: &CompactSchedule) -> Vec<String> {
    let mut problems = Vec::new();
    let Some(last) = s.periods.last() else {
        problems.push("has no Through periods".to_string());
        return problems;
    };
    if last.through != DayDate::YEAR_END {
        problems.push(format!(
            "last period ends {} instead of {}",
            last.through,
            DayDate::YEAR_END
        ));
    }
    for period in &s.periods {
        if period.days.is_empty() {
            problems.push(format!("period through {} has no day blocks", period.through));
        }
        for block in &period.days {
            if block.days.is_empty() {
                problems.push(format!(
                    "a block in period through {} names no day types",
                    period.through
                ));
            }
            match block.until.last() {
                None => problems.push(format!(
                    "a block in period through {} has no Until entries",
                    period.through
                )),
                Some(u) if u.time != TimeOfDay::END_OF_DAY => problems.push(format!(
                    "a block in period through {} ends at {} instead of {}",
                    period.through,
                    u.time,
                    TimeOfDay::END_OF_DAY
                )),
                Some(_) => {}
            }
        }
    }
    problems
}

pub fn check_schedules(doc: &Document) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    for s in &doc.schedules.compact {
        for p in schedule_problems(s) {
            issues.push(ValidationIssue::new(
                IssueCategory::ScheduleFormat,
                Some(EntityKind::Schedule),
                vec![s.name.clone()],
                format!("Schedule {} {}", s.name, p),
            ));
        }
    }
    issues
}

/// Completes a malformed schedule with the missing sentinels.
///
/// Existing values are kept; only what is needed to reach `12/31` and
/// `24:00` is appended. Returns a description of each change.
pub fn fix_schedule(s: &mut CompactSchedule) -> Vec<String> {
    let mut changes = Vec::new();

    if s.periods.is_empty() {
        let constant = CompactSchedule::constant(&s.name, &s.type_limits, 0.0);
        s.periods = constant.periods;
        changes.push(format!("{}: added a constant period with value 0", s.name));
        return changes;
    }

    for period in s.periods.iter_mut() {
        if period.days.is_empty() {
            period.days.push(DayBlock {
                days: vec![DayType::AllDays],
                until: Vec::new(),
            });
            changes.push(format!("{}: added an AllDays block through {}", s.name, period.through));
        }
        for block in period.days.iter_mut() {
            if block.days.is_empty() {
                block.days.push(DayType::AllDays);
                changes.push(format!("{}: block set to AllDays", s.name));
            }
            match block.until.last().copied() {
                None => {
                    block.until.push(Until {
                        time: TimeOfDay::END_OF_DAY,
                        value: 0.0,
                    });
                    changes.push(format!("{}: added Until 24:00, 0", s.name));
                }
                Some(u) if u.time != TimeOfDay::END_OF_DAY => {
                    block.until.push(Until {
                        time: TimeOfDay::END_OF_DAY,
                        value: u.value,
                    });
                    changes.push(format!("{}: added Until 24:00, {}", s.name, u.value));
                }
                Some(_) => {}
            }
        }
    }

    if let Some(last) = s.periods.last().cloned()
        && last.through != DayDate::YEAR_END
    {
        s.periods.push(SchedulePeriod {
            through: DayDate::YEAR_END,
            days: last.days,
        });
        changes.push(format!(
            "{}: extended from {} to {}",
            s.name,
            last.through,
            DayDate::YEAR_END
        ));
    }
    changes
}
