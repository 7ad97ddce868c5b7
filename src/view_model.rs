//! Month view-model generation.
//!
//! A [`MonthViewModel`] is a render-ready snapshot of one month's day grid.
//! It is regenerated from state, never mutated; the navigation state machine
//! decides when a previously generated month can be reused.

use crate::calendar::{Calendar, Period};
use crate::date::Date;
use crate::types::MonthKey;

/// Disabled-day predicate: the candidate date plus the month being displayed.
pub type MarkDisabled = dyn Fn(&Date, MonthKey) -> bool;

/// One day cell of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayViewModel {
    pub date: Date,
    /// Weekday number in calendar numbering (1..=days per week).
    pub weekday: u32,
    /// Whether the day belongs to the month being displayed.
    pub current_month: bool,
    /// Outside the min/max bounds, or masked by the disabled-day predicate.
    pub disabled: bool,
}

impl DayViewModel {
    /// A day can take keyboard focus iff it is not disabled.
    pub fn focusable(&self) -> bool {
        !self.disabled
    }
}

/// One rendered week row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekViewModel {
    pub number: u32,
    pub days: Vec<DayViewModel>,
}

/// Render-ready snapshot of a month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthViewModel {
    /// First day of the month.
    pub first_date: Date,
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<WeekViewModel>,
}

impl MonthViewModel {
    pub fn key(&self) -> MonthKey {
        MonthKey { year: self.year, month: self.month }
    }
}

/// Build the day grid for the month containing `first_date`.
///
/// The grid starts on the nearest `first_day_of_week` at or before the 1st
/// and runs in whole weeks until the month's last day is covered. A day is
/// disabled when it falls outside `[min_date, max_date]` or the predicate
/// says so; a panicking predicate propagates to the caller.
pub fn generate_month_view_model(
    calendar: &dyn Calendar,
    first_date: &Date,
    min_date: &Date,
    max_date: &Date,
    first_day_of_week: u32,
    mark_disabled: Option<&MarkDisabled>,
) -> MonthViewModel {
    debug_assert!(
        !min_date.after(max_date),
        "min_date {min_date} exceeds max_date {max_date}"
    );

    let year = first_date.year;
    let month = first_date.month;
    let key = MonthKey { year, month };
    let days_per_week = calendar.get_days_per_week();
    // normalize so the walk below always terminates
    let first_day_of_week =
        (first_day_of_week as i64 - 1).rem_euclid(days_per_week as i64) as u32 + 1;

    // Leading partial week: walk back from the 1st to the week start.
    let mut date = Date::new(year, month, 1);
    while calendar.get_weekday(&date) != first_day_of_week {
        date = calendar.get_prev(&date, Period::Day, 1);
    }

    let mut weeks = Vec::new();
    loop {
        let mut days = Vec::with_capacity(days_per_week as usize);
        for _ in 0..days_per_week {
            let current_month = date.year == year && date.month == month;
            let disabled = date.before(min_date)
                || date.after(max_date)
                || mark_disabled.is_some_and(|f| f(&date, key));
            days.push(DayViewModel {
                date,
                weekday: calendar.get_weekday(&date),
                current_month,
                disabled,
            });
            date = calendar.get_next(&date, Period::Day, 1);
        }

        let dates: Vec<Date> = days.iter().map(|d| d.date).collect();
        let number = calendar.get_week_number(&dates, first_day_of_week);
        weeks.push(WeekViewModel { number, days });

        // `date` is now the first cell of the next row; once it leaves the
        // month the final week has been completed.
        if date.year != year || date.month != month {
            break;
        }
    }

    MonthViewModel { first_date: Date::new(year, month, 1), year, month, weeks }
}
