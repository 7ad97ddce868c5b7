//! Datepicker CLI application.
//!
//! # Usage
//! ```ignore
//! datepick                      // Current month
//! datepick 2 2026               // February 2026
//! datepick -n 3 2 2026          // Three months from February 2026
//! datepick --select 2026-2-18   // Current month with a selection
//! ```

use datepick::args::{Args, build_config, build_display, parse_date};
use datepick::date::{Date, PartialDate};
use datepick::formatter::print_picker;
use datepick::picker::Datepicker;

fn main() {
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("datepick: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), String> {
    let calendar = args.calendar.create();
    let config = build_config(args, calendar.as_ref())?;
    let opts = build_display(args)?;

    let mut picker = Datepicker::new(calendar, config).map_err(|e| e.to_string())?;

    if args.disable_weekends {
        let weekday_source = args.calendar.create();
        picker.set_mark_disabled(Some(Box::new(move |date, _| {
            weekday_source.get_weekday(date) >= 6
        })));
    }

    if let Some(raw) = &args.select {
        let value = parse_date(raw)?;
        let partial = PartialDate::from(value);
        if Date::from_partial(picker.calendar(), &partial).is_none() {
            return Err(format!("Invalid date: {}", raw));
        }
        picker.write_value(Some(&partial));
    }

    print_picker(&picker, &opts);
    Ok(())
}
