use chrono::{Datelike, NaiveDate};

/// One slot of a Sunday-first, seven-column month grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridCell {
    /// Placeholder before day 1.
    Blank,
    Day(u32),
}

impl GridCell {
    pub fn day(&self) -> Option<u32> {
        match self {
            GridCell::Blank => None,
            GridCell::Day(d) => Some(*d),
        }
    }
}

/// Cells for the month containing `date`: leading blanks up to the weekday of
/// day 1, then every day of the month. The last week is not padded.
pub fn build_month_grid(date: NaiveDate) -> Vec<GridCell> {
    let (year, month) = (date.year(), date.month());
    let leading = first_weekday_index(year, month);
    let days = days_in_month(year, month);
    let mut cells = Vec::with_capacity(leading as usize + days as usize);
    cells.extend(std::iter::repeat_n(GridCell::Blank, leading as usize));
    cells.extend((1..=days).map(GridCell::Day));
    cells
}

/// Splits a grid into weeks of seven; the final week may be shorter.
pub fn grid_rows(cells: &[GridCell]) -> Vec<&[GridCell]> {
    cells.chunks(7).collect()
}

/// 0 = Sunday .. 6 = Saturday for the first of the month.
pub fn first_weekday_index(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.weekday().num_days_from_sunday())
        .unwrap_or(0)
}

/// Last valid day of the month: the day before the first of the next month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

/// Shifts by whole months, clamping the day to the target month's length.
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let total = date.month0() as i32 + months;
    let new_year = date.year() + total.div_euclid(12);
    let new_month = total.rem_euclid(12) as u32 + 1;
    let new_day = date.day().min(days_in_month(new_year, new_month));
    NaiveDate::from_ymd_opt(new_year, new_month, new_day).unwrap_or(date)
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_grid_size_and_leading_blanks_for_every_month() {
        for year in [2023, 2024, 2025, 2100] {
            for month in 1..=12 {
                let grid = build_month_grid(d(year, month, 15));
                let first = d(year, month, 1).weekday().num_days_from_sunday() as usize;
                let blanks = grid.iter().take_while(|c| **c == GridCell::Blank).count();
                assert_eq!(blanks, first, "{year}-{month}");
                assert_eq!(grid.len(), first + days_in_month(year, month) as usize);
                assert_eq!(grid.last(), Some(&GridCell::Day(days_in_month(year, month))));
            }
        }
    }

    #[test]
    fn test_grid_is_independent_of_reference_day() {
        assert_eq!(build_month_grid(d(2025, 3, 1)), build_month_grid(d(2025, 3, 31)));
    }

    #[test]
    fn test_march_2025_starts_on_saturday() {
        let grid = build_month_grid(d(2025, 3, 10));
        assert_eq!(grid[..6], [GridCell::Blank; 6]);
        assert_eq!(grid[6], GridCell::Day(1));
        let rows = grid_rows(&grid);
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[5], &[GridCell::Day(30), GridCell::Day(31)]);
    }

    #[test]
    fn test_february_2015_fills_exactly_four_rows() {
        // Feb 1 2015 was a Sunday.
        let grid = build_month_grid(d(2015, 2, 1));
        assert_eq!(grid.len(), 28);
        assert_eq!(grid_rows(&grid).len(), 4);
        assert_eq!(grid[0].day(), Some(1));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2025, 1), 31);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2025, 4), 30);
        assert_eq!(days_in_month(2025, 12), 31);
    }

    #[test]
    fn test_add_months() {
        assert_eq!(add_months(d(2025, 1, 15), 1), d(2025, 2, 15));
        assert_eq!(add_months(d(2025, 12, 15), 1), d(2026, 1, 15));
        assert_eq!(add_months(d(2025, 1, 15), -1), d(2024, 12, 15));
        assert_eq!(add_months(d(2025, 1, 31), 1), d(2025, 2, 28));
        assert_eq!(add_months(d(2025, 3, 31), -13), d(2024, 2, 29));
    }

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(13), "Unknown");
    }
}
