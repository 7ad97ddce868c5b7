//! Datepicker navigation and focus state machine.
//!
//! A [`Datepicker`] owns the min/max bounds, the visible month window, the
//! selection and the focused date. Every operation runs to completion,
//! mutates the state first and only then reports what happened as a list of
//! [`PickerEvent`]s, coalesced to at most one navigation event per
//! operation.

use std::collections::HashMap;

use thiserror::Error;

use crate::calendar::{Calendar, Period};
use crate::date::{Date, DateStruct, PartialDate};
use crate::types::{DatepickerConfig, MonthKey, NavigationMode, OutsideDays};
use crate::view_model::{MarkDisabled, MonthViewModel, generate_month_view_model};

/// Callback invoked with the new value on every user-driven selection.
pub type OnChange = Box<dyn FnMut(DateStruct)>;
/// Callback invoked when a user-driven operation touches the picker.
pub type OnTouched = Box<dyn FnMut()>;
/// Owned disabled-day predicate.
pub type MarkDisabledFn = Box<MarkDisabled>;

/// Fatal configuration errors, raised when bounds are established.
#[derive(Debug, Error)]
pub enum DatepickerError {
    #[error("'max_date' {max} should be greater than 'min_date' {min}")]
    InvalidBounds { min: Date, max: Date },
    #[error("'display_months' must be at least 1")]
    InvalidDisplayMonths,
}

/// Events emitted by state-machine operations, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEvent {
    /// The first visible month changed. `current` is `None` on the very
    /// first navigation after construction.
    Navigated { current: Option<MonthKey>, next: MonthKey },
    /// A user-driven operation touched the picker.
    Touched,
    /// A date was selected.
    ValueChanged(DateStruct),
}

/// Keyboard intents understood by [`Datepicker::process_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    PageUp,
    PageDown,
    Home,
    End,
    Enter,
    Space,
}

/// Focus jump targets for [`Datepicker::jump_to_edge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    WindowStart,
    WindowEnd,
    MinDate,
    MaxDate,
}

/// The navigation/focus state machine.
pub struct Datepicker {
    calendar: Box<dyn Calendar>,
    min_date: Date,
    max_date: Date,
    first_day_of_week: u32,
    display_months: u32,
    navigation: NavigationMode,
    outside_days: OutsideDays,
    show_week_numbers: bool,
    show_weekdays: bool,
    mark_disabled: Option<MarkDisabledFn>,

    /// First day of the first visible month.
    view_date: Date,
    months: Vec<MonthViewModel>,
    cache: HashMap<MonthKey, MonthViewModel>,
    selected: Option<Date>,
    focused: Option<Date>,

    on_change: Option<OnChange>,
    on_touched: Option<OnTouched>,
}

impl std::fmt::Debug for Datepicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Datepicker")
            .field("min_date", &self.min_date)
            .field("max_date", &self.max_date)
            .field("first_day_of_week", &self.first_day_of_week)
            .field("display_months", &self.display_months)
            .field("navigation", &self.navigation)
            .field("outside_days", &self.outside_days)
            .field("show_week_numbers", &self.show_week_numbers)
            .field("show_weekdays", &self.show_weekdays)
            .field("view_date", &self.view_date)
            .field("months", &self.months)
            .field("selected", &self.selected)
            .field("focused", &self.focused)
            .finish_non_exhaustive()
    }
}

impl Datepicker {
    /// Build a picker from its configuration and calendar strategy.
    ///
    /// Bounds missing from the configuration default to 10 years before and
    /// 11 years minus a day after the start date. Establishing `min > max`
    /// is a fatal configuration error.
    pub fn new(
        calendar: Box<dyn Calendar>,
        config: DatepickerConfig,
    ) -> Result<Self, DatepickerError> {
        if config.display_months == 0 {
            return Err(DatepickerError::InvalidDisplayMonths);
        }

        let start = config
            .start_date
            .and_then(|k| {
                Date::from_partial(
                    calendar.as_ref(),
                    &PartialDate { year: k.year, month: Some(k.month), day: None },
                )
            })
            .unwrap_or_else(|| calendar.get_today());

        let min_date = config
            .min_date
            .and_then(|s| Date::from_partial(calendar.as_ref(), &PartialDate::from(s)))
            .unwrap_or_else(|| calendar.get_prev(&start, Period::Year, 10));
        let max_date = config
            .max_date
            .and_then(|s| Date::from_partial(calendar.as_ref(), &PartialDate::from(s)))
            .unwrap_or_else(|| {
                let next = calendar.get_next(&start, Period::Year, 11);
                calendar.get_prev(&next, Period::Day, 1)
            });
        if max_date.before(&min_date) {
            return Err(DatepickerError::InvalidBounds { min: min_date, max: max_date });
        }

        let mut picker = Datepicker {
            calendar,
            min_date,
            max_date,
            first_day_of_week: config.first_day_of_week,
            display_months: config.display_months,
            navigation: config.navigation,
            outside_days: config.outside_days,
            show_week_numbers: config.show_week_numbers,
            show_weekdays: config.show_weekdays,
            mark_disabled: None,
            view_date: Date::new(start.year, start.month, 1),
            months: Vec::new(),
            cache: HashMap::new(),
            selected: None,
            focused: None,
            on_change: None,
            on_touched: None,
        };
        picker.set_view_within_limits(&start);
        let mut events = Vec::new();
        picker.update_data(true, &mut events);
        Ok(picker)
    }

    // -- accessors ----------------------------------------------------------

    pub fn months(&self) -> &[MonthViewModel] {
        &self.months
    }

    pub fn selected_date(&self) -> Option<Date> {
        self.selected
    }

    pub fn focused_date(&self) -> Option<Date> {
        self.focused
    }

    pub fn min_date(&self) -> Date {
        self.min_date
    }

    pub fn max_date(&self) -> Date {
        self.max_date
    }

    pub fn first_day_of_week(&self) -> u32 {
        self.first_day_of_week
    }

    pub fn display_months(&self) -> u32 {
        self.display_months
    }

    pub fn navigation(&self) -> NavigationMode {
        self.navigation
    }

    pub fn outside_days(&self) -> OutsideDays {
        self.outside_days
    }

    pub fn show_week_numbers(&self) -> bool {
        self.show_week_numbers
    }

    pub fn show_weekdays(&self) -> bool {
        self.show_weekdays
    }

    pub fn calendar(&self) -> &dyn Calendar {
        self.calendar.as_ref()
    }

    /// First date of the visible window.
    pub fn first_displayed(&self) -> Date {
        self.view_date
    }

    /// Last date of the visible window.
    pub fn last_displayed(&self) -> Date {
        let last_first = self
            .months
            .last()
            .map(|m| m.first_date)
            .unwrap_or(self.view_date);
        let next_month = self.calendar.get_next(&last_first, Period::Month, 1);
        self.calendar.get_prev(&next_month, Period::Day, 1)
    }

    // -- operations ---------------------------------------------------------

    /// Navigate the visible window to the month containing `target`.
    ///
    /// An invalid or absent target falls back to today per the calendar
    /// strategy; the window is clamped so its first month stays within the
    /// configured bounds.
    pub fn navigate_to(&mut self, target: Option<&PartialDate>) -> Vec<PickerEvent> {
        let date = self
            .to_valid_date(target)
            .unwrap_or_else(|| self.calendar.get_today());
        let mut events = Vec::new();
        self.set_view_within_limits(&date);
        self.update_data(false, &mut events);
        self.dispatch(&events);
        events
    }

    /// Select a date: sets the selection, moves focus to the clamped date
    /// and raises a value-changed notification.
    pub fn select(&mut self, date: &Date) -> Vec<PickerEvent> {
        let mut events = Vec::new();
        self.set_focused_within_limits(date, &mut events);
        self.selected = self.calendar.is_valid(date).then_some(*date);
        events.push(PickerEvent::Touched);
        if let Some(selected) = self.selected {
            events.push(PickerEvent::ValueChanged(DateStruct::from(selected)));
        }
        self.dispatch(&events);
        events
    }

    /// Move the focused date by `delta` units, clamped into the bounds.
    ///
    /// When the result leaves the visible window, the window shifts by whole
    /// months so the focused date becomes visible.
    pub fn move_focus(&mut self, period: Period, delta: i32) -> Vec<PickerEvent> {
        let base = self.focused.unwrap_or(self.view_date);
        let target = self.calendar.get_next(&base, period, delta);
        let mut events = Vec::new();
        self.set_focused_within_limits(&target, &mut events);
        self.dispatch(&events);
        events
    }

    /// Set focus directly to a window or bounds edge.
    pub fn jump_to_edge(&mut self, edge: Edge) -> Vec<PickerEvent> {
        let target = match edge {
            Edge::WindowStart => self.first_displayed(),
            Edge::WindowEnd => self.last_displayed(),
            Edge::MinDate => self.min_date,
            Edge::MaxDate => self.max_date,
        };
        let mut events = Vec::new();
        self.set_focused_within_limits(&target, &mut events);
        self.dispatch(&events);
        events
    }

    /// Select the focused date if it is focusable in the current view
    /// models; otherwise a no-op.
    pub fn activate_focused(&mut self) -> Vec<PickerEvent> {
        match self.focused {
            Some(date) if self.is_displayed_selectable(&date) => self.select(&date),
            _ => Vec::new(),
        }
    }

    /// Focus lands on the retained date if it is still visible, otherwise on
    /// the window's first date.
    pub fn gain_focus(&mut self) {
        let first = self.first_displayed();
        let last = self.last_displayed();
        self.focused = match self.focused {
            Some(f) if !f.before(&first) && !f.after(&last) => Some(f),
            _ => Some(first),
        };
    }

    pub fn blur(&mut self) {
        self.focused = None;
    }

    /// Map a keyboard intent onto a state-machine operation.
    ///
    /// Returns `None` when nothing is focused or the key is not handled, so
    /// the integration layer can let the event through.
    pub fn process_key(&mut self, key: Key, shift: bool) -> Option<Vec<PickerEvent>> {
        self.focused?;
        let events = match key {
            Key::PageUp if shift => self.move_focus(Period::Year, -1),
            Key::PageUp => self.move_focus(Period::Month, -1),
            Key::PageDown if shift => self.move_focus(Period::Year, 1),
            Key::PageDown => self.move_focus(Period::Month, 1),
            Key::Home if shift => self.jump_to_edge(Edge::MinDate),
            Key::Home => self.jump_to_edge(Edge::WindowStart),
            Key::End if shift => self.jump_to_edge(Edge::MaxDate),
            Key::End => self.jump_to_edge(Edge::WindowEnd),
            Key::ArrowLeft => self.move_focus(Period::Day, -1),
            Key::ArrowRight => self.move_focus(Period::Day, 1),
            Key::ArrowUp => self.move_focus(Period::Week, -1),
            Key::ArrowDown => self.move_focus(Period::Week, 1),
            Key::Enter | Key::Space => self.activate_focused(),
        };
        Some(events)
    }

    // -- value accessor surface --------------------------------------------

    /// Normalize a raw value into the current selection.
    ///
    /// Structurally invalid input clears the selection; programmatic writes
    /// emit no events.
    pub fn write_value(&mut self, value: Option<&PartialDate>) {
        self.selected = self.to_valid_date(value);
    }

    pub fn register_on_change(&mut self, callback: OnChange) {
        self.on_change = Some(callback);
    }

    pub fn register_on_touched(&mut self, callback: OnTouched) {
        self.on_touched = Some(callback);
    }

    // -- reconfiguration ----------------------------------------------------

    /// Re-establish the bounds, defaulting absent ones around the current
    /// window. Invalidates the month cache and rebuilds the window.
    pub fn set_limits(
        &mut self,
        min: Option<DateStruct>,
        max: Option<DateStruct>,
    ) -> Result<Vec<PickerEvent>, DatepickerError> {
        let anchor = self.view_date;
        let min_date = min
            .and_then(|s| Date::from_partial(self.calendar.as_ref(), &PartialDate::from(s)))
            .unwrap_or_else(|| self.calendar.get_prev(&anchor, Period::Year, 10));
        let max_date = max
            .and_then(|s| Date::from_partial(self.calendar.as_ref(), &PartialDate::from(s)))
            .unwrap_or_else(|| {
                let next = self.calendar.get_next(&anchor, Period::Year, 11);
                self.calendar.get_prev(&next, Period::Day, 1)
            });
        if max_date.before(&min_date) {
            return Err(DatepickerError::InvalidBounds { min: min_date, max: max_date });
        }
        self.min_date = min_date;
        self.max_date = max_date;
        Ok(self.refresh())
    }

    /// Replace the disabled-day predicate and rebuild the window.
    pub fn set_mark_disabled(&mut self, predicate: Option<MarkDisabledFn>) -> Vec<PickerEvent> {
        self.mark_disabled = predicate;
        self.refresh()
    }

    /// Change the weekday the rendered weeks start on and rebuild.
    pub fn set_first_day_of_week(&mut self, first_day_of_week: u32) -> Vec<PickerEvent> {
        self.first_day_of_week = first_day_of_week;
        self.refresh()
    }

    /// Resize the visible window and rebuild.
    pub fn set_display_months(
        &mut self,
        display_months: u32,
    ) -> Result<Vec<PickerEvent>, DatepickerError> {
        if display_months == 0 {
            return Err(DatepickerError::InvalidDisplayMonths);
        }
        self.display_months = display_months;
        Ok(self.refresh())
    }

    // -- internals ----------------------------------------------------------

    fn to_valid_date(&self, input: Option<&PartialDate>) -> Option<Date> {
        input.and_then(|p| Date::from_partial(self.calendar.as_ref(), p))
    }

    fn set_view_within_limits(&mut self, date: &Date) {
        let target = (*date).clamp(self.min_date, self.max_date);
        self.view_date = Date::new(target.year, target.month, 1);
    }

    /// Move focus to `date` clamped into the bounds, shifting the window by
    /// whole months when the result is not visible.
    fn set_focused_within_limits(&mut self, date: &Date, events: &mut Vec<PickerEvent>) {
        let date = (*date).clamp(self.min_date, self.max_date);
        let first = self.first_displayed();
        let last = self.last_displayed();

        let new_view = if date.before(&first) {
            Some(date)
        } else if date.after(&last) {
            Some(self.calendar.get_prev(&date, Period::Month, self.display_months as i32 - 1))
        } else {
            None
        };

        self.focused = Some(date);
        if let Some(view) = new_view {
            self.set_view_within_limits(&view);
            self.update_data(false, events);
        }
    }

    /// Rebuild the visible window from `view_date`, reusing cached months
    /// unless `force` is set. Emits a navigation event when the first
    /// visible month changed.
    fn update_data(&mut self, force: bool, events: &mut Vec<PickerEvent>) {
        let mut new_months = Vec::with_capacity(self.display_months as usize);
        for i in 0..self.display_months {
            let first = self.calendar.get_next(&self.view_date, Period::Month, i as i32);
            let key = MonthKey { year: first.year, month: first.month };
            let cached = if force { None } else { self.cache.remove(&key) };
            let month = cached.unwrap_or_else(|| {
                generate_month_view_model(
                    self.calendar.as_ref(),
                    &first,
                    &self.min_date,
                    &self.max_date,
                    self.first_day_of_week,
                    self.mark_disabled.as_deref(),
                )
            });
            new_months.push(month);
        }

        let old_first = self.months.first().map(MonthViewModel::key);
        let new_first = new_months[0].key();

        // the cache holds exactly the visible months
        self.cache.clear();
        for month in &new_months {
            self.cache.insert(month.key(), month.clone());
        }
        self.months = new_months;

        if old_first != Some(new_first) {
            events.push(PickerEvent::Navigated { current: old_first, next: new_first });
        }
    }

    fn is_displayed_selectable(&self, date: &Date) -> bool {
        self.months
            .iter()
            .filter(|m| m.year == date.year && m.month == date.month)
            .flat_map(|m| m.weeks.iter())
            .flat_map(|w| w.days.iter())
            .any(|d| d.date == *date && d.focusable())
    }

    fn refresh(&mut self) -> Vec<PickerEvent> {
        self.cache.clear();
        let anchor = self.view_date;
        let mut events = Vec::new();
        self.set_view_within_limits(&anchor);
        self.update_data(true, &mut events);
        self.dispatch(&events);
        events
    }

    fn dispatch(&mut self, events: &[PickerEvent]) {
        for event in events {
            match event {
                PickerEvent::ValueChanged(value) => {
                    if let Some(callback) = self.on_change.as_mut() {
                        callback(*value);
                    }
                }
                PickerEvent::Touched => {
                    if let Some(callback) = self.on_touched.as_mut() {
                        callback();
                    }
                }
                PickerEvent::Navigated { .. } => {}
            }
        }
    }
}
