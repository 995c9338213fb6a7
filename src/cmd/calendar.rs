use crate::api::TaskBackend;
use crate::calc::{build_month_grid, grid_rows, holidays_in_month, month_name, GridCell, MonthHolidays};
use crate::data::task::tasks_on;
use crate::data::{LocalStore, Session, Task};
use crate::error::ValidationError;
use chrono::{Datelike, NaiveDate};
use std::io::Write;
use tracing::warn;

/// Parses `YYYY-MM` into the first day of that month.
pub fn parse_month(raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(&format!("{}-01", raw.trim()), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(raw.to_string()))
}

/// Tasks for the calendar. The calendar stays usable without them, so failures
/// come back as a reason string instead of an error.
pub(crate) fn fetch_tasks<B: TaskBackend>(store: &LocalStore, backend: &B) -> (Vec<Task>, Option<String>) {
    let session = match Session::require(store) {
        Ok(s) => s,
        Err(err) => return (Vec::new(), Some(err.to_string())),
    };
    match backend.list_tasks(&session.token) {
        Ok(tasks) => (tasks, None),
        Err(err) => {
            warn!(error = %err, "calendar opened without tasks");
            (Vec::new(), Some(err.to_string()))
        }
    }
}

pub fn print<B: TaskBackend, W: Write>(
    store: &LocalStore,
    backend: &B,
    month: NaiveDate,
    today: NaiveDate,
    out: &mut W,
) -> anyhow::Result<()> {
    let (tasks, offline) = fetch_tasks(store, backend);
    write_month(month, &tasks, today, out)?;
    if let Some(reason) = offline {
        writeln!(out, "(tasks unavailable: {})", reason)?;
    }
    Ok(())
}

/// Month grid with `*` after holidays and `+` after days with tasks, followed
/// by the month's holidays and tasks.
pub(crate) fn write_month<W: Write>(
    month: NaiveDate,
    tasks: &[Task],
    today: NaiveDate,
    out: &mut W,
) -> anyhow::Result<()> {
    let (year, m) = (month.year(), month.month());
    let holidays = MonthHolidays::new(year, m);

    writeln!(out, "{:^28}", format!("{} {}", month_name(m), year))?;
    writeln!(out, " Su  Mo  Tu  We  Th  Fr  Sa")?;
    let cells = build_month_grid(month);
    for row in grid_rows(&cells) {
        let mut line = String::new();
        for cell in row {
            match cell {
                GridCell::Blank => line.push_str("    "),
                GridCell::Day(day) => {
                    let date = NaiveDate::from_ymd_opt(year, m, *day);
                    let marker = if holidays.name_for(*day).is_some() {
                        '*'
                    } else if date.is_some_and(|d| !tasks_on(tasks, d).is_empty()) {
                        '+'
                    } else if date == Some(today) {
                        '<'
                    } else {
                        ' '
                    };
                    line.push_str(&format!(" {:>2}{}", day, marker));
                }
            }
        }
        writeln!(out, "{}", line.trim_end())?;
    }

    writeln!(out, "---")?;
    for h in holidays_in_month(year, m) {
        writeln!(out, "  {:<14} {}", h.date.format("%Y-%m-%d").to_string(), h.name)?;
    }
    let mut in_month: Vec<(NaiveDate, &Task)> = tasks
        .iter()
        .filter_map(|t| t.deadline_date().map(|d| (d, t)))
        .filter(|(d, _)| d.year() == year && d.month() == m)
        .collect();
    in_month.sort_by_key(|(d, _)| *d);
    for (date, t) in &in_month {
        let mark = if t.completed { "[x]" } else { "[ ]" };
        writeln!(out, "  {:<14} {} {}", date.format("%Y-%m-%d").to_string(), mark, t.title)?;
    }
    writeln!(out, "---")?;
    writeln!(out, "Total: {} task(s) this month", in_month.len())?;
    Ok(())
}
