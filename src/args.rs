//! Command-line argument parsing using clap.
//!
//! The positional arguments follow cal convention: `[month] [year]`, where a
//! single 4-digit argument is read as a year.

use clap::{Parser, ValueHint};
use std::io::IsTerminal;

use crate::calendar::Calendar;
use crate::date::DateStruct;
use crate::formatter::DisplayOptions;
use crate::types::{
    COLOR_ENABLED_BY_DEFAULT, CalendarKind, ColumnsMode, DatepickerConfig, GUTTER_WIDTH_REGULAR,
    MonthKey, NavigationMode, OutsideDays,
};

#[derive(Parser, Debug)]
#[command(name = "datepick")]
#[command(about = "Displays a date-picker month grid for a given month", long_about = None)]
#[command(version)]
#[command(after_help = HELP_MESSAGE)]
pub struct Args {
    /// Month (1-12 or name) to open with - optional, used with year.
    #[arg(index = 1, default_value = None, value_name = "month", value_hint = ValueHint::Other)]
    pub month_arg: Option<String>,

    /// Year to open with.
    #[arg(index = 2, default_value = None, value_name = "year", value_hint = ValueHint::Other)]
    pub year_arg: Option<String>,

    /// Calendar system (iso, julian or islamic-civil).
    #[arg(
        long,
        default_value = "iso",
        help_heading = "Calendar options",
        value_name = "system"
    )]
    pub calendar: CalendarKind,

    /// Week starts on Sunday (default is Monday).
    #[arg(short = 's', long, help_heading = "Calendar options")]
    pub sunday: bool,

    /// First day of the week (1=Monday .. 7=Sunday), overrides -s.
    #[arg(long = "first-day", help_heading = "Calendar options", value_name = "weekday")]
    pub first_day: Option<u32>,

    /// Display week numbers.
    #[arg(short = 'w', long, help_heading = "Calendar options")]
    pub week_numbers: bool,

    /// Earliest navigable date (Y-M-D).
    #[arg(long, help_heading = "Selection options", value_name = "date")]
    pub min: Option<String>,

    /// Latest navigable date (Y-M-D).
    #[arg(long, help_heading = "Selection options", value_name = "date")]
    pub max: Option<String>,

    /// Pre-selected date (Y-M-D).
    #[arg(long, help_heading = "Selection options", value_name = "date")]
    pub select: Option<String>,

    /// Mark Saturdays and Sundays as disabled.
    #[arg(long = "disable-weekends", help_heading = "Selection options")]
    pub disable_weekends: bool,

    /// Number of months to display.
    #[arg(
        short = 'n',
        long = "months",
        default_value_t = 1,
        help_heading = "Display options",
        value_name = "num"
    )]
    pub display_months: u32,

    /// How days outside the displayed month are shown.
    #[arg(
        long = "outside-days",
        default_value = "visible",
        help_heading = "Display options",
        value_name = "mode"
    )]
    pub outside_days: OutsideDays,

    /// Navigation header style.
    #[arg(
        long,
        default_value = "select",
        help_heading = "Display options",
        value_name = "mode"
    )]
    pub navigation: NavigationMode,

    /// Hide the weekday name row.
    #[arg(long = "no-weekdays", help_heading = "Display options")]
    pub no_weekdays: bool,

    /// Number of columns for multiple months (or "auto" for terminal width).
    #[arg(
        short = 'c',
        long = "columns",
        help_heading = "Output options",
        value_name = "width"
    )]
    pub columns: Option<String>,

    /// Disable colorized output.
    #[arg(long, help_heading = "Output options")]
    pub color: bool,
}

/// Help message displayed with --help.
const HELP_MESSAGE: &str = "Display a date-picker month grid.

Without any arguments, display the current month.

Examples:
  datepick                         Display current month
  datepick 2 2026                  Display February 2026
  datepick -n 3 2 2026             Display three months from February 2026
  datepick --select 2026-2-18      Display current month with a selection
  datepick --min 2026-1-1 --max 2026-12-31
                                   Clamp navigation to 2026
  datepick --calendar islamic-civil
                                   Use the tabular Islamic calendar
  datepick --disable-weekends      Mark weekends as disabled
  datepick --color                 Disable colorized output";

impl Args {
    pub fn parse() -> Self {
        Parser::parse()
    }
}

/// Parse a `Y-M-D` date argument.
pub fn parse_date(s: &str) -> Result<DateStruct, String> {
    let parts: Vec<&str> = s.split('-').collect();
    if parts.len() != 3 {
        return Err(format!("Invalid date: {} (expected Y-M-D)", s));
    }
    let year = parts[0]
        .parse::<i32>()
        .map_err(|_| format!("Invalid year in date: {}", s))?;
    let month = parts[1]
        .parse::<u32>()
        .map_err(|_| format!("Invalid month in date: {}", s))?;
    let day = parts[2]
        .parse::<u32>()
        .map_err(|_| format!("Invalid day in date: {}", s))?;
    Ok(DateStruct { year, month, day })
}

/// Parse month from string (numeric 1-12 or English name).
pub fn parse_month(s: &str) -> Option<u32> {
    if let Ok(n) = s.parse::<u32>()
        && (1..=12).contains(&n)
    {
        return Some(n);
    }

    let s_lower = s.to_lowercase();
    let month_names: [(&str, u32); 23] = [
        ("january", 1),
        ("february", 2),
        ("march", 3),
        ("april", 4),
        ("may", 5),
        ("june", 6),
        ("july", 7),
        ("august", 8),
        ("september", 9),
        ("october", 10),
        ("november", 11),
        ("december", 12),
        // short forms
        ("jan", 1),
        ("feb", 2),
        ("mar", 3),
        ("apr", 4),
        ("jun", 6),
        ("jul", 7),
        ("aug", 8),
        ("sep", 9),
        ("oct", 10),
        ("nov", 11),
        ("dec", 12),
    ];
    month_names
        .iter()
        .find(|(name, _)| *name == s_lower)
        .map(|(_, num)| *num)
}

/// Resolve the month to open with from positional arguments.
///
/// Argument patterns:
/// - no args: current month
/// - 1 arg: year (4 digits) or month (1-2 digits or name)
/// - 2 args: month year
fn start_month(args: &Args, calendar: &dyn Calendar) -> Result<Option<MonthKey>, String> {
    let today = calendar.get_today();

    match (&args.month_arg, &args.year_arg) {
        (None, None) => Ok(None),
        (Some(val), None) => {
            if let Ok(num) = val.parse::<i32>() {
                // 4 digits = year
                if (1000..=9999).contains(&num) {
                    return Ok(Some(MonthKey { year: num, month: today.month }));
                }
                if (1..=12).contains(&num) {
                    return Ok(Some(MonthKey { year: today.year, month: num as u32 }));
                }
            }
            if let Some(month) = parse_month(val) {
                return Ok(Some(MonthKey { year: today.year, month }));
            }
            Err(format!("Invalid argument: {}", val))
        }
        (Some(month_val), Some(year_val)) => {
            let month =
                parse_month(month_val).ok_or_else(|| format!("Invalid month: {}", month_val))?;
            let year = year_val
                .parse::<i32>()
                .map_err(|_| format!("Invalid year: {}", year_val))?;
            if !(1..=9999).contains(&year) {
                return Err(format!("Invalid year: {} (must be 1-9999)", year));
            }
            Ok(Some(MonthKey { year, month }))
        }
        _ => Err("Invalid argument combination".to_string()),
    }
}

/// Build the picker configuration from the command line.
pub fn build_config(args: &Args, calendar: &dyn Calendar) -> Result<DatepickerConfig, String> {
    if args.display_months == 0 {
        return Err("Months count must be positive".to_string());
    }

    let first_day_of_week = match args.first_day {
        Some(day) if (1..=calendar.get_days_per_week()).contains(&day) => day,
        Some(day) => return Err(format!("Invalid first day of week: {}", day)),
        None if args.sunday => calendar.get_days_per_week(),
        None => 1,
    };

    let min_date = args.min.as_deref().map(parse_date).transpose()?;
    let max_date = args.max.as_deref().map(parse_date).transpose()?;
    let start_date = start_month(args, calendar)?;

    Ok(DatepickerConfig {
        min_date,
        max_date,
        first_day_of_week,
        display_months: args.display_months,
        navigation: args.navigation,
        outside_days: args.outside_days,
        show_week_numbers: args.week_numbers,
        show_weekdays: !args.no_weekdays,
        start_date,
    })
}

/// Build the display options from the command line.
pub fn build_display(args: &Args) -> Result<DisplayOptions, String> {
    let color = !args.color && COLOR_ENABLED_BY_DEFAULT && std::io::stdout().is_terminal();

    let columns = match args.columns.as_deref() {
        Some("auto") | None => ColumnsMode::Auto,
        Some(s) => {
            let n = s
                .parse::<u32>()
                .map_err(|_| format!("Invalid columns value: {}", s))?;
            if n == 0 {
                return Err("Columns must be positive".to_string());
            }
            ColumnsMode::Fixed(n)
        }
    };

    Ok(DisplayOptions {
        kind: args.calendar,
        color,
        gutter_width: GUTTER_WIDTH_REGULAR,
        columns,
    })
}
