//! Month grid rendering with localization and color support.
//!
//! This is the rendering boundary: it consumes view models and picker state
//! read-only and never feeds anything back into the state machine.

use chrono::{Duration, Locale, NaiveDate};
use unicode_width::UnicodeWidthStr;

use crate::date::Date;
use crate::picker::Datepicker;
use crate::types::{
    COLOR_DIM, COLOR_RED, COLOR_RESET, COLOR_REVERSE, COLOR_SAND_YELLOW, COLOR_TEAL, CalendarKind,
    ColumnsMode, NavigationMode, OutsideDays,
};
use crate::view_model::{DayViewModel, MonthViewModel};

/// Transliterated month names for the Islamic calendars.
const ISLAMIC_MONTH_NAMES: [&str; 12] = [
    "Muharram",
    "Safar",
    "Rabi I",
    "Rabi II",
    "Jumada I",
    "Jumada II",
    "Rajab",
    "Shaban",
    "Ramadan",
    "Shawwal",
    "Dhu al-Qidah",
    "Dhu al-Hijjah",
];

/// Output options that do not influence the picker state.
#[derive(Debug, Clone, Copy)]
pub struct DisplayOptions {
    pub kind: CalendarKind,
    pub color: bool,
    pub gutter_width: usize,
    pub columns: ColumnsMode,
}

/// Get system locale from environment (LC_ALL > LC_TIME > LANG > en_US).
pub fn get_system_locale() -> Locale {
    std::env::var("LC_ALL")
        .or_else(|_| std::env::var("LC_TIME"))
        .or_else(|_| std::env::var("LANG"))
        .unwrap_or_else(|_| "en_US.UTF-8".to_string())
        .split('.')
        .next()
        .unwrap_or("en_US")
        .split('@')
        .next()
        .unwrap_or("en_US")
        .parse()
        .unwrap_or(Locale::en_US)
}

/// Full month name for the given calendar system.
pub fn month_name(kind: CalendarKind, month: u32) -> String {
    match kind {
        // Julian months carry the same names as Gregorian ones
        CalendarKind::Iso | CalendarKind::Julian => {
            match NaiveDate::from_ymd_opt(2000, month, 1) {
                Some(date) => date.format_localized("%B", get_system_locale()).to_string(),
                None => month.to_string(),
            }
        }
        CalendarKind::IslamicCivil => month
            .checked_sub(1)
            .and_then(|i| ISLAMIC_MONTH_NAMES.get(i as usize))
            .map_or_else(|| month.to_string(), |name| (*name).to_string()),
    }
}

/// Get 2-character weekday abbreviation for the current locale.
///
/// Weekday numbering is 1=Monday .. 7=Sunday in every shipped calendar, so
/// the Gregorian names apply across calendar systems.
pub fn weekday_short_name(weekday: u32, locale: Locale) -> String {
    // 2000-01-03 is a Monday
    let base_date = NaiveDate::from_ymd_opt(2000, 1, 3);
    match base_date {
        Some(base) => {
            let date = base + Duration::days(weekday as i64 - 1);
            let day_name = date.format_localized("%a", locale).to_string();
            day_name.chars().take(2).collect()
        }
        None => weekday.to_string(),
    }
}

/// Center text within a specified width, accounting for Unicode widths.
fn center_text(text: &str, width: usize) -> String {
    let text_width = text.width();
    if text_width >= width {
        return text.to_string();
    }
    let total_padding = width - text_width;
    let left_padding = total_padding.div_ceil(2);
    let right_padding = total_padding - left_padding;
    format!(
        "{}{}{}",
        " ".repeat(left_padding),
        text,
        " ".repeat(right_padding)
    )
}

/// Width of one rendered month grid.
pub fn month_width(show_week_numbers: bool) -> usize {
    if show_week_numbers { 23 } else { 20 }
}

/// Format month header with year and optional color.
pub fn format_month_header(
    kind: CalendarKind,
    year: i32,
    month: u32,
    width: usize,
    color: bool,
) -> String {
    let header = format!("{} {}", month_name(kind, month), year);
    let centered = center_text(&header, width);
    if color {
        format!("{}{}{}", COLOR_TEAL, centered, COLOR_RESET)
    } else {
        centered
    }
}

/// Format weekday header row, aligned with the optional week-number column.
pub fn format_weekday_headers(picker: &Datepicker, color: bool) -> String {
    let locale = get_system_locale();
    let mut result = String::new();

    if picker.show_week_numbers() {
        result.push_str("   ");
    }

    if color {
        result.push_str(COLOR_SAND_YELLOW);
    }

    let days_per_week = picker.calendar().get_days_per_week();
    for i in 0..days_per_week {
        let weekday = (picker.first_day_of_week() - 1 + i) % days_per_week + 1;
        let short_name = weekday_short_name(weekday, locale);
        if i + 1 < days_per_week {
            result.push_str(&format!("{} ", short_name));
        } else {
            result.push_str(&short_name);
        }
    }

    if color {
        result.push_str(COLOR_RESET);
    }

    result
}

/// Format a day cell with color highlighting.
///
/// Color priority: selected > today > disabled > outside month
fn format_day(
    day: &DayViewModel,
    selected: Option<Date>,
    today: &Date,
    outside_days: OutsideDays,
    color: bool,
    is_last: bool,
) -> String {
    if !day.current_month && !matches!(outside_days, OutsideDays::Visible) {
        return if is_last { "  ".to_string() } else { "   ".to_string() };
    }

    let is_selected = color && selected.is_some_and(|s| s == day.date);
    let is_today = color && day.date == *today;
    let day_str = format!("{:>2}", day.date.day);

    let formatted = if is_selected {
        format!("{}{}{}", COLOR_REVERSE, day_str, COLOR_RESET)
    } else if is_today {
        format!("{}{}{}", COLOR_TEAL, day_str, COLOR_RESET)
    } else if color && day.disabled {
        format!("{}{}{}", COLOR_RED, day_str, COLOR_RESET)
    } else if color && !day.current_month {
        format!("{}{}{}", COLOR_DIM, day_str, COLOR_RESET)
    } else {
        day_str
    };

    if is_last {
        formatted
    } else {
        format!("{} ", formatted)
    }
}

/// Format one month as grid of lines.
pub fn format_month_grid(
    picker: &Datepicker,
    month: &MonthViewModel,
    opts: &DisplayOptions,
) -> Vec<String> {
    let mut lines = Vec::with_capacity(8);
    let width = month_width(picker.show_week_numbers());

    lines.push(format_month_header(
        opts.kind,
        month.year,
        month.month,
        width,
        opts.color,
    ));

    if picker.show_weekdays() {
        lines.push(format_weekday_headers(picker, opts.color));
    }

    let selected = picker.selected_date();
    let today = picker.calendar().get_today();
    let outside_days = picker.outside_days();

    for week in &month.weeks {
        if matches!(outside_days, OutsideDays::Collapsed)
            && week.days.iter().all(|d| !d.current_month)
        {
            continue;
        }

        let mut line = String::new();
        if picker.show_week_numbers() {
            line.push_str(&format!("{:>2} ", week.number));
        }
        for (i, day) in week.days.iter().enumerate() {
            let is_last = i + 1 == week.days.len();
            line.push_str(&format_day(day, selected, &today, outside_days, opts.color, is_last));
        }
        lines.push(line);
    }

    lines
}

/// Number of month columns that fit the output.
pub fn months_per_row(columns: ColumnsMode, month_width: usize, gutter_width: usize) -> u32 {
    match columns {
        ColumnsMode::Fixed(n) => n,
        ColumnsMode::Auto => {
            let width = month_width + gutter_width;
            if let Some(term_width) = get_terminal_width() {
                (term_width / width as u32).clamp(1, 3)
            } else {
                3
            }
        }
    }
}

/// Print multiple month grids side by side.
pub fn print_months_side_by_side(grids: &[Vec<String>], month_width: usize, gutter_width: usize) {
    let max_height = grids.iter().map(|g| g.len()).max().unwrap_or(0);

    for row in 0..max_height {
        let mut line = String::new();
        for (i, grid) in grids.iter().enumerate() {
            if row < grid.len() {
                let text = &grid[row];
                let text_width = text.width();
                line.push_str(text);
                let padding = month_width.saturating_sub(text_width);
                for _ in 0..padding {
                    line.push(' ');
                }
                if i < grids.len() - 1 {
                    for _ in 0..gutter_width {
                        line.push(' ');
                    }
                }
            } else {
                let width = if i < grids.len() - 1 {
                    month_width + gutter_width
                } else {
                    month_width
                };
                for _ in 0..width {
                    line.push(' ');
                }
            }
        }
        println!("{}", line.trim_end());
    }
}

/// Print the picker's visible window.
pub fn print_picker(picker: &Datepicker, opts: &DisplayOptions) {
    let width = month_width(picker.show_week_numbers());
    let grids: Vec<Vec<String>> = picker
        .months()
        .iter()
        .map(|month| format_month_grid(picker, month, opts))
        .collect();
    let per_row = months_per_row(opts.columns, width, opts.gutter_width).max(1) as usize;

    if !matches!(picker.navigation(), NavigationMode::None)
        && let Some(first) = picker.months().first()
    {
        let row_months = grids.len().min(per_row);
        let total = row_months * width + (row_months - 1) * opts.gutter_width;
        let label = format!("{} {}", month_name(opts.kind, first.month), first.year);
        let line = format!("<{}>", center_text(&label, total.saturating_sub(2)));
        if opts.color {
            println!("{}{}{}", COLOR_SAND_YELLOW, line, COLOR_RESET);
        } else {
            println!("{}", line);
        }
    }

    for chunk in grids.chunks(per_row) {
        print_months_side_by_side(chunk, width, opts.gutter_width);
    }
}

/// Get terminal width using terminal_size crate.
fn get_terminal_width() -> Option<u32> {
    terminal_size::terminal_size().map(|(w, _)| w.0 as u32)
}
