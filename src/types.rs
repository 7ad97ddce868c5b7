//! Configuration types and constants for the datepicker.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::calendar::{Calendar, IslamicCivilCalendar, IsoCalendar, JulianCalendar};
use crate::date::DateStruct;

/// Calendar system used for all date arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum CalendarKind {
    /// ISO 8601 proleptic Gregorian calendar (default).
    Iso,
    /// Julian calendar (leap every 4 years).
    Julian,
    /// Tabular Islamic calendar with the civil epoch.
    IslamicCivil,
}

impl CalendarKind {
    /// Instantiate the strategy for this calendar system.
    pub fn create(self) -> Box<dyn Calendar> {
        match self {
            CalendarKind::Iso => Box::new(IsoCalendar),
            CalendarKind::Julian => Box::new(JulianCalendar),
            CalendarKind::IslamicCivil => Box::new(IslamicCivilCalendar),
        }
    }
}

/// Navigation header style.
#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum NavigationMode {
    /// Month/year picker plus arrows (default).
    Select,
    /// Navigation arrows only.
    Arrows,
    /// No navigation header at all.
    None,
}

/// How days outside the displayed month are shown.
#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutsideDays {
    /// Render leading/trailing days of adjacent months (default).
    Visible,
    /// Drop week rows that contain no day of the displayed month.
    Collapsed,
    /// Keep the cells but leave them blank.
    Hidden,
}

/// Identity of a displayed month; cache key and navigation-event payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.month)
    }
}

/// Recognized datepicker options.
///
/// Absent bounds default to 10 years before and 11 years (minus a day) after
/// the start date; an absent start date opens on the current month.
#[derive(Debug, Clone)]
pub struct DatepickerConfig {
    pub min_date: Option<DateStruct>,
    pub max_date: Option<DateStruct>,
    /// First day of the week in calendar weekday numbering (1 = Monday).
    pub first_day_of_week: u32,
    /// Number of months in the visible window.
    pub display_months: u32,
    pub navigation: NavigationMode,
    pub outside_days: OutsideDays,
    pub show_week_numbers: bool,
    pub show_weekdays: bool,
    /// Month to open the calendar with.
    pub start_date: Option<MonthKey>,
}

impl Default for DatepickerConfig {
    fn default() -> Self {
        DatepickerConfig {
            min_date: None,
            max_date: None,
            first_day_of_week: 1,
            display_months: 1,
            navigation: NavigationMode::Select,
            outside_days: OutsideDays::Visible,
            show_week_numbers: false,
            show_weekdays: true,
            start_date: None,
        }
    }
}

/// Column display mode for multi-month layouts.
#[derive(Debug, Clone, Copy)]
pub enum ColumnsMode {
    /// Fixed number of columns.
    Fixed(u32),
    /// Auto-detect from terminal width.
    Auto,
}

// Constants for grid formatting
pub const GUTTER_WIDTH_REGULAR: usize = 2;

// Color is enabled by default for better user experience
pub const COLOR_ENABLED_BY_DEFAULT: bool = true;

// ANSI color codes
pub const COLOR_RESET: &str = "\x1b[0m";
pub const COLOR_REVERSE: &str = "\x1b[7m";
pub const COLOR_DIM: &str = "\x1b[2m";
pub const COLOR_RED: &str = "\x1b[91m";
pub const COLOR_TEAL: &str = "\x1b[96m";
pub const COLOR_SAND_YELLOW: &str = "\x1b[93m";
