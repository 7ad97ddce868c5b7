//! Calendar strategies: ISO 8601 (Gregorian), Julian and Islamic civil.
//!
//! All arithmetic is pure and total. Month arithmetic rolls over years
//! (month 13 becomes next January) and clamps the day to the target month's
//! length; weekday numbering is 1=Monday .. 7=Sunday for every shipped
//! strategy.

use chrono::{Datelike, Duration, NaiveDate};

use crate::date::Date;

pub const MONTHS_PER_YEAR: u32 = 12;

/// JDN of 0001-01-01 in the proleptic Gregorian calendar is 1721426,
/// which chrono counts as day 1 from CE.
const JDN_CE_OFFSET: i64 = 1721425;

/// Units understood by calendar navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Day,
    Week,
    Month,
    Year,
}

/// A pluggable calendar system.
///
/// Implementations convert between (year, month, day) triples and calendar
/// navigation; they carry no state and no side effects.
pub trait Calendar {
    fn get_days_per_week(&self) -> u32 {
        7
    }

    fn get_today(&self) -> Date;

    /// Weekday of a date, 1..=`get_days_per_week()`.
    fn get_weekday(&self, date: &Date) -> u32;

    fn days_in_month(&self, year: i32, month: u32) -> u32;

    /// Shift a date by whole days (negative counts go backward).
    fn add_days(&self, date: &Date, count: i32) -> Date;

    /// Week number for a rendered week, given the weekday the week starts on.
    fn get_week_number(&self, week: &[Date], first_day_of_week: u32) -> u32;

    fn get_next(&self, date: &Date, period: Period, count: i32) -> Date {
        match period {
            Period::Day => self.add_days(date, count),
            Period::Week => {
                self.add_days(date, count.saturating_mul(self.get_days_per_week() as i32))
            }
            Period::Month => {
                let (year, month) = rolled_month(date.year, date.month, count);
                Date::new(year, month, date.day.min(self.days_in_month(year, month)))
            }
            Period::Year => self.get_next(date, Period::Month, count.saturating_mul(12)),
        }
    }

    fn get_prev(&self, date: &Date, period: Period, count: i32) -> Date {
        self.get_next(date, period, count.saturating_neg())
    }

    fn is_valid(&self, date: &Date) -> bool {
        (1..=MONTHS_PER_YEAR).contains(&date.month)
            && (1..=self.days_in_month(date.year, date.month)).contains(&date.day)
    }
}

/// Roll (year, month) forward or backward by a month count.
fn rolled_month(year: i32, month: u32, count: i32) -> (i32, u32) {
    let total = year as i64 * 12 + (month as i64 - 1) + count as i64;
    (total.div_euclid(12) as i32, (total.rem_euclid(12) + 1) as u32)
}

/// Index of the Thursday slot in a week starting on `first_day_of_week`.
fn thursday_index(first_day_of_week: u32) -> usize {
    (4 - first_day_of_week as i64).rem_euclid(7) as usize
}

/// Calculate weekday using Zeller's congruence algorithm.
///
/// Returns 1=Monday .. 7=Sunday.
fn zeller_weekday(date: &Date, julian: bool) -> u32 {
    let m = if date.month < 3 { date.month + 12 } else { date.month };
    let q = date.day as i32;
    let year = if date.month < 3 { date.year - 1 } else { date.year };
    let k: i32 = year % 100;
    let j: i32 = year / 100;

    let h = if julian {
        // Julian variant: 6J century term instead of J/4 - 2J
        (q + (13 * (m as i32 + 1)) / 5 + k + k / 4 + 5 + 6 * j).rem_euclid(7)
    } else {
        (q + (13 * (m as i32 + 1)) / 5 + k + k / 4 + j / 4 - 2 * j).rem_euclid(7)
    };
    // h: 0=Sat, 1=Sun, 2=Mon, ... 6=Fri
    ((h + 5).rem_euclid(7) + 1) as u32
}

/// Today from the system clock, respecting DATEPICK_TEST_TIME for testing.
fn today_naive() -> NaiveDate {
    if let Ok(test_time) = std::env::var("DATEPICK_TEST_TIME")
        && let Ok(date) = NaiveDate::parse_from_str(&test_time, "%Y-%m-%d")
    {
        return date;
    }
    chrono::Local::now().date_naive()
}

fn naive_to_jdn(date: NaiveDate) -> i64 {
    date.num_days_from_ce() as i64 + JDN_CE_OFFSET
}

fn jdn_to_naive(jdn: i64) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt((jdn - JDN_CE_OFFSET) as i32)
}

// ---------------------------------------------------------------------------
// ISO 8601 (proleptic Gregorian)
// ---------------------------------------------------------------------------

/// The default strategy: proleptic Gregorian with ISO 8601 week rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsoCalendar;

fn to_naive(date: &Date) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(date.year, date.month, date.day)
}

fn from_naive(date: NaiveDate) -> Date {
    Date::new(date.year(), date.month(), date.day())
}

impl IsoCalendar {
    fn is_leap_year(&self, year: i32) -> bool {
        // Gregorian: divisible by 4, except centuries unless divisible by 400
        (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
    }
}

impl Calendar for IsoCalendar {
    fn get_today(&self) -> Date {
        from_naive(today_naive())
    }

    fn get_weekday(&self, date: &Date) -> u32 {
        zeller_weekday(date, false)
    }

    fn days_in_month(&self, year: i32, month: u32) -> u32 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if self.is_leap_year(year) => 29,
            2 => 28,
            _ => 30,
        }
    }

    fn add_days(&self, date: &Date, count: i32) -> Date {
        match to_naive(date) {
            Some(d) => from_naive(d + Duration::days(count as i64)),
            None => *date,
        }
    }

    fn get_week_number(&self, week: &[Date], first_day_of_week: u32) -> u32 {
        // ISO 8601: the week number is the ISO week of the week's Thursday
        week.get(thursday_index(first_day_of_week))
            .and_then(to_naive)
            .map_or(0, |d| d.iso_week().week())
    }

    fn is_valid(&self, date: &Date) -> bool {
        to_naive(date).is_some()
    }
}

// ---------------------------------------------------------------------------
// Julian
// ---------------------------------------------------------------------------

/// Pure Julian calendar: leap every 4 years, no century correction.
#[derive(Debug, Clone, Copy, Default)]
pub struct JulianCalendar;

fn julian_to_jdn(date: &Date) -> i64 {
    let a = (14 - date.month as i64) / 12;
    let y = date.year as i64 + 4800 - a;
    let m = date.month as i64 + 12 * a - 3;
    date.day as i64 + (153 * m + 2) / 5 + 365 * y + y / 4 - 32083
}

fn jdn_to_julian(jdn: i64) -> Date {
    let c = jdn + 32082;
    let d = (4 * c + 3) / 1461;
    let e = c - (1461 * d) / 4;
    let m = (5 * e + 2) / 153;
    let day = e - (153 * m + 2) / 5 + 1;
    let month = m + 3 - 12 * (m / 10);
    let year = d - 4800 + m / 10;
    Date::new(year as i32, month as u32, day as u32)
}

impl JulianCalendar {
    fn is_leap_year(&self, year: i32) -> bool {
        // Julian: every 4 years
        year % 4 == 0
    }

    fn day_of_year(&self, date: &Date) -> u32 {
        const DAYS_BEFORE_MONTH: [u32; 12] =
            [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];
        let mut doy = DAYS_BEFORE_MONTH[(date.month - 1) as usize] + date.day;
        if date.month > 2 && self.is_leap_year(date.year) {
            doy += 1;
        }
        doy
    }
}

impl Calendar for JulianCalendar {
    fn get_today(&self) -> Date {
        jdn_to_julian(naive_to_jdn(today_naive()))
    }

    fn get_weekday(&self, date: &Date) -> u32 {
        zeller_weekday(date, true)
    }

    fn days_in_month(&self, year: i32, month: u32) -> u32 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if self.is_leap_year(year) => 29,
            2 => 28,
            _ => 30,
        }
    }

    fn add_days(&self, date: &Date, count: i32) -> Date {
        jdn_to_julian(julian_to_jdn(date) + count as i64)
    }

    fn get_week_number(&self, week: &[Date], first_day_of_week: u32) -> u32 {
        // Thursday-anchored like ISO, within the Julian year reckoning
        week.get(thursday_index(first_day_of_week))
            .map_or(0, |d| (self.day_of_year(d) - 1) / 7 + 1)
    }
}

// ---------------------------------------------------------------------------
// Islamic civil (tabular)
// ---------------------------------------------------------------------------

/// Tabular Islamic calendar with the civil epoch.
///
/// Years follow the 30-year arithmetic cycle; odd months have 30 days, even
/// months 29, and the 12th month gains a day in leap years.
#[derive(Debug, Clone, Copy, Default)]
pub struct IslamicCivilCalendar;

/// JDN of 1 Muharram 1 AH (16 July 622 in the Julian calendar).
const ISLAMIC_EPOCH: i64 = 1948440;

fn islamic_leap_year(year: i32) -> bool {
    (11 * year as i64 + 14).rem_euclid(30) < 11
}

fn days_in_islamic_month(year: i32, month: u32) -> u32 {
    if month == 12 && islamic_leap_year(year) {
        30
    } else if month % 2 == 1 {
        30
    } else {
        29
    }
}

fn islamic_to_jdn(year: i32, month: u32, day: u32) -> i64 {
    let y = year as i64;
    let m = month as i64;
    ISLAMIC_EPOCH - 1
        + day as i64
        + 29 * (m - 1)
        + m / 2
        + 354 * (y - 1)
        + (3 + 11 * y).div_euclid(30)
}

fn jdn_to_islamic(jdn: i64) -> Date {
    let mut year = (30 * (jdn - ISLAMIC_EPOCH) + 10646).div_euclid(10631) as i32;
    while jdn < islamic_to_jdn(year, 1, 1) {
        year -= 1;
    }
    while jdn >= islamic_to_jdn(year + 1, 1, 1) {
        year += 1;
    }
    let mut month = 1;
    let mut rem = jdn - islamic_to_jdn(year, 1, 1);
    while rem >= days_in_islamic_month(year, month) as i64 {
        rem -= days_in_islamic_month(year, month) as i64;
        month += 1;
    }
    Date::new(year, month, rem as u32 + 1)
}

impl IslamicCivilCalendar {
    /// Convert a Gregorian date into this calendar.
    pub fn from_gregorian(&self, date: NaiveDate) -> Date {
        jdn_to_islamic(naive_to_jdn(date))
    }

    /// Convert a date of this calendar into the Gregorian calendar.
    pub fn to_gregorian(&self, date: &Date) -> Option<NaiveDate> {
        jdn_to_naive(islamic_to_jdn(date.year, date.month, date.day))
    }

    fn day_of_year(&self, date: &Date) -> u32 {
        29 * (date.month - 1) + date.month / 2 + date.day
    }
}

impl Calendar for IslamicCivilCalendar {
    fn get_today(&self) -> Date {
        self.from_gregorian(today_naive())
    }

    fn get_weekday(&self, date: &Date) -> u32 {
        (islamic_to_jdn(date.year, date.month, date.day).rem_euclid(7) + 1) as u32
    }

    fn days_in_month(&self, year: i32, month: u32) -> u32 {
        days_in_islamic_month(year, month)
    }

    fn add_days(&self, date: &Date, count: i32) -> Date {
        jdn_to_islamic(islamic_to_jdn(date.year, date.month, date.day) + count as i64)
    }

    fn get_week_number(&self, week: &[Date], first_day_of_week: u32) -> u32 {
        week.get(thursday_index(first_day_of_week))
            .map_or(0, |d| (self.day_of_year(d) - 1) / 7 + 1)
    }
}
