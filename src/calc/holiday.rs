use crate::calc::month_grid::days_in_month;
use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Fixed-date holidays by (month, day). MLK Day is pinned to Jan 20 rather than
/// the third Monday of January.
const FIXED_HOLIDAYS: [(u32, u32, &str); 12] = [
    (1, 1, "New Year's Day"),
    (1, 20, "MLK Day"),
    (2, 17, "Presidents Day"),
    (3, 17, "St. Patrick's Day"),
    (5, 26, "Memorial Day"),
    (7, 4, "Independence Day"),
    (9, 1, "Labor Day"),
    (10, 13, "Columbus Day"),
    (11, 11, "Veterans Day"),
    (11, 24, "Thanksgiving"),
    (11, 25, "Day After Thanksgiving"),
    (12, 25, "Christmas"),
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Holiday {
    pub name: &'static str,
    pub date: NaiveDate,
}

/// First `weekday` on or after `from_day` of the month.
fn first_weekday_from(year: i32, month: u32, from_day: u32, weekday: Weekday) -> Option<NaiveDate> {
    let start = NaiveDate::from_ymd_opt(year, month, from_day)?;
    let offset = (7 + weekday.num_days_from_sunday() - start.weekday().num_days_from_sunday()) % 7;
    start.checked_add_signed(Duration::days(i64::from(offset)))
}

/// Last Monday of May.
pub fn memorial_day(year: i32) -> Option<NaiveDate> {
    let mut day = NaiveDate::from_ymd_opt(year, 5, days_in_month(year, 5))?;
    while day.weekday() != Weekday::Mon {
        day = day.pred_opt()?;
    }
    Some(day)
}

/// First Monday of September.
pub fn labor_day(year: i32) -> Option<NaiveDate> {
    first_weekday_from(year, 9, 1, Weekday::Mon)
}

/// Second Monday of October: the first Monday on or after the 8th.
pub fn columbus_day(year: i32) -> Option<NaiveDate> {
    first_weekday_from(year, 10, 8, Weekday::Mon)
}

/// Fourth Thursday of November: the first Thursday plus three weeks.
pub fn thanksgiving(year: i32) -> Option<NaiveDate> {
    first_weekday_from(year, 11, 1, Weekday::Thu)?.checked_add_signed(Duration::days(21))
}

/// Holiday lookup for one month, with the moveable dates computed once.
#[derive(Clone, Debug)]
pub struct MonthHolidays {
    month: u32,
    moveable: Vec<(u32, &'static str)>,
}

impl MonthHolidays {
    pub fn new(year: i32, month: u32) -> Self {
        let mut moveable = Vec::new();
        match month {
            5 => {
                if let Some(d) = memorial_day(year) {
                    moveable.push((d.day(), "Memorial Day"));
                }
            }
            9 => {
                if let Some(d) = labor_day(year) {
                    moveable.push((d.day(), "Labor Day"));
                }
            }
            10 => {
                if let Some(d) = columbus_day(year) {
                    moveable.push((d.day(), "Columbus Day"));
                }
            }
            11 => {
                if let Some(d) = thanksgiving(year) {
                    moveable.push((d.day(), "Thanksgiving"));
                    moveable.push((d.day() + 1, "Day After Thanksgiving"));
                }
            }
            _ => {}
        }
        MonthHolidays { month, moveable }
    }

    /// Moveable holidays take precedence; the fixed table is the fallback.
    pub fn name_for(&self, day: u32) -> Option<&'static str> {
        self.moveable
            .iter()
            .find(|(d, _)| *d == day)
            .map(|(_, name)| *name)
            .or_else(|| {
                FIXED_HOLIDAYS
                    .iter()
                    .find(|(m, d, _)| *m == self.month && *d == day)
                    .map(|(_, _, name)| *name)
            })
    }
}

/// Holiday name for a date, or `None`.
pub fn holiday_for(year: i32, month: u32, day: u32) -> Option<&'static str> {
    MonthHolidays::new(year, month).name_for(day)
}

pub fn holidays_in_month(year: i32, month: u32) -> Vec<Holiday> {
    let lookup = MonthHolidays::new(year, month);
    (1..=days_in_month(year, month))
        .filter_map(|day| {
            let name = lookup.name_for(day)?;
            let date = NaiveDate::from_ymd_opt(year, month, day)?;
            Some(Holiday { name, date })
        })
        .collect()
}

pub fn holidays_in_year(year: i32) -> Vec<Holiday> {
    (1..=12).flat_map(|month| holidays_in_month(year, month)).collect()
}
