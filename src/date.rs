//! Immutable date value type and the plain interchange structs exchanged
//! with form-binding machinery.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calendar::Calendar;

/// An immutable (year, month, day) triple.
///
/// `month` and `day` are 1-based. Ordering is lexicographic on
/// (year, month, day), which matches calendar order in every calendar system
/// that numbers months and days incrementally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Date {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl Date {
    /// Construct without validation, for internally-computed values.
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Date { year, month, day }
    }

    /// Build a validated date from possibly-partial input.
    ///
    /// Missing month and day default to 1. Returns `None` when the fields do
    /// not name a real day under the given calendar strategy.
    pub fn from_partial(calendar: &dyn Calendar, input: &PartialDate) -> Option<Self> {
        let date = Date::new(input.year, input.month.unwrap_or(1), input.day.unwrap_or(1));
        calendar.is_valid(&date).then_some(date)
    }

    pub fn before(&self, other: &Date) -> bool {
        self < other
    }

    pub fn after(&self, other: &Date) -> bool {
        self > other
    }

    pub fn equals(&self, other: &Date) -> bool {
        self == other
    }
}

/// Identity key form, `"Y-M-D"` without zero padding. Not a display format.
impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.year, self.month, self.day)
    }
}

/// Raw date input where month and day may be omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialDate {
    pub year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
}

/// Plain (year, month, day) struct carried by value-change notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateStruct {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl From<Date> for DateStruct {
    fn from(date: Date) -> Self {
        DateStruct { year: date.year, month: date.month, day: date.day }
    }
}

impl From<DateStruct> for PartialDate {
    fn from(s: DateStruct) -> Self {
        PartialDate { year: s.year, month: Some(s.month), day: Some(s.day) }
    }
}

impl From<Date> for PartialDate {
    fn from(date: Date) -> Self {
        PartialDate { year: date.year, month: Some(date.month), day: Some(date.day) }
    }
}
