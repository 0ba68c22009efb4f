//! Schedule type limits and compact time-series schedules.
//!
//! A compact schedule is a list of `Through` periods. Each period holds
//! day blocks (`For` a set of day types) made of `Until` entries. The last
//! period must end on the year-end sentinel `12/31` and every day block
//! must end on the end-of-day sentinel `24:00`.

use crate::HasName;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumericType {
    Continuous,
    Discrete,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleTypeLimits {
    pub name: String,
    pub lower: Option<f64>,
    pub upper: Option<f64>,
    pub numeric_type: NumericType,
    pub unit_type: String,
}

impl HasName for ScheduleTypeLimits {
    fn name(&self) -> &str {
        &self.name
    }
}

impl ScheduleTypeLimits {
    pub fn new(name: &str, lower: Option<f64>, upper: Option<f64>, unit_type: &str) -> Self {
        Self {
            name: name.to_string(),
            lower,
            upper,
            numeric_type: NumericType::Continuous,
            unit_type: unit_type.to_string(),
        }
    }

    /// Limits without bounds, used when a dangling reference has to be filled in.
    pub fn unbounded(name: &str) -> Self {
        Self::new(name, None, None, "Dimensionless")
    }
}

/// Calendar date without year, `MM/DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DayDate {
    pub month: u32,
    pub day: u32,
}

impl DayDate {
    pub const YEAR_END: DayDate = DayDate { month: 12, day: 31 };

    pub fn new(month: u32, day: u32) -> Self {
        Self { month, day }
    }
}

impl fmt::Display for DayDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.month, self.day)
    }
}

/// Time of day, `HH:MM`. `24:00` is a valid value (end of day).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeOfDay {
    pub hour: u32,
    pub minute: u32,
}

impl TimeOfDay {
    pub const END_OF_DAY: TimeOfDay = TimeOfDay {
        hour: 24,
        minute: 0,
    };

    pub fn new(hour: u32, minute: u32) -> Self {
        Self { hour, minute }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayType {
    Weekdays,
    Weekends,
    Holidays,
    AllDays,
    SummerDesignDay,
    WinterDesignDay,
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    CustomDay1,
    CustomDay2,
    AllOtherDays,
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Debug names are exactly the keywords the engine expects
        write!(f, "{self:?}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Until {
    pub time: TimeOfDay,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayBlock {
    pub days: Vec<DayType>,
    pub until: Vec<Until>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulePeriod {
    pub through: DayDate,
    pub days: Vec<DayBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompactSchedule {
    pub name: String,
    pub type_limits: String,
    pub periods: Vec<SchedulePeriod>,
}

impl HasName for CompactSchedule {
    fn name(&self) -> &str {
        &self.name
    }
}

impl CompactSchedule {
    /// Schedule with a single value for every hour of the year.
    pub fn constant(name: &str, type_limits: &str, value: f64) -> Self {
        Self {
            name: name.to_string(),
            type_limits: type_limits.to_string(),
            periods: vec![SchedulePeriod {
                through: DayDate::YEAR_END,
                days: vec![DayBlock {
                    days: vec![DayType::AllDays],
                    until: vec![Until {
                        time: TimeOfDay::END_OF_DAY,
                        value,
                    }],
                }],
            }],
        }
    }

    /// Weekday schedule switching between `off` and `on` at the given hours;
    /// all other days stay at `off`.
    pub fn workday(name: &str, type_limits: &str, on_hours: (u32, u32), off: f64, on: f64) -> Self {
        let weekdays = DayBlock {
            days: vec![DayType::Weekdays],
            until: vec![
                Until {
                    time: TimeOfDay::new(on_hours.0, 0),
                    value: off,
                },
                Until {
                    time: TimeOfDay::new(on_hours.1, 0),
                    value: on,
                },
                Until {
                    time: TimeOfDay::END_OF_DAY,
                    value: off,
                },
            ],
        };
        let other = DayBlock {
            days: vec![DayType::AllOtherDays],
            until: vec![Until {
                time: TimeOfDay::END_OF_DAY,
                value: off,
            }],
        };
        Self {
            name: name.to_string(),
            type_limits: type_limits.to_string(),
            periods: vec![SchedulePeriod {
                through: DayDate::YEAR_END,
                days: vec![weekdays, other],
            }],
        }
    }

    /// Flattens the schedule into the engine's field list,
    /// e.g. `["Through: 12/31", "For: AllDays", "Until: 24:00, 1"]`.
    pub fn to_fields(&self) -> Vec<String> {
        let mut fields = Vec::new();
        for period in &self.periods {
            fields.push(format!("Through: {}", period.through));
            for block in &period.days {
                let days: Vec<String> = block.days.iter().map(|d| d.to_string()).collect();
                fields.push(format!("For: {}", days.join(" ")));
                for u in &block.until {
                    fields.push(format!("Until: {}, {}", u.time, u.value));
                }
            }
        }
        fields
    }

    /// Every value the schedule can take, in order of appearance.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.periods
            .iter()
            .flat_map(|p| p.days.iter())
            .flat_map(|b| b.until.iter())
            .map(|u| u.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_fields() {
        let s = CompactSchedule::constant("Always_On", "Fraction", 1.0);
        assert_eq!(
            s.to_fields(),
            vec!["Through: 12/31", "For: AllDays", "Until: 24:00, 1"]
        );
    }

    #[test]
    fn test_workday_fields() {
        let s = CompactSchedule::workday("Office", "Fraction", (8, 18), 0.0, 1.0);
        let fields = s.to_fields();
        assert_eq!(fields[0], "Through: 12/31");
        assert_eq!(fields[1], "For: Weekdays");
        assert_eq!(fields[2], "Until: 08:00, 0");
        assert_eq!(fields[3], "Until: 18:00, 1");
        assert_eq!(fields[4], "Until: 24:00, 0");
        assert_eq!(fields[5], "For: AllOtherDays");
        assert_eq!(s.values().count(), 4);
    }

    #[test]
    fn test_date_and_time_display() {
        assert_eq!(DayDate::new(3, 7).to_string(), "03/07");
        assert_eq!(TimeOfDay::END_OF_DAY.to_string(), "24:00");
        assert!(DayDate::new(6, 30) < DayDate::YEAR_END);
    }
}
