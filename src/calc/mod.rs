pub mod holiday;
pub mod month_grid;
pub mod task_filter;

pub use holiday::{holiday_for, holidays_in_month, holidays_in_year, Holiday, MonthHolidays};
pub use month_grid::{add_months, build_month_grid, grid_rows, month_name, GridCell};
pub use task_filter::TaskFilter;
