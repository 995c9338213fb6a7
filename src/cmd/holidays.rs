use crate::calc::{holidays_in_year, Holiday};
use anyhow::Result;

pub fn run<W: std::io::Write>(year: i32, out: &mut W) -> Result<()> {
    write_holidays(year, &holidays_in_year(year), out)
}

pub(crate) fn write_holidays<W: std::io::Write>(
    year: i32,
    holidays: &[Holiday],
    out: &mut W,
) -> Result<()> {
    writeln!(out, "Holidays {}", year)?;
    writeln!(out, "---")?;
    writeln!(out, "  {:<14} {:<5} {}", "Date", "Day", "Name")?;
    for h in holidays {
        writeln!(
            out,
            "  {:<14} {:<5} {}",
            h.date.format("%Y-%m-%d").to_string(),
            h.date.format("%a").to_string(),
            h.name
        )?;
    }
    writeln!(out, "---")?;
    writeln!(out, "Total: {} holiday(s)", holidays.len())?;
    Ok(())
}
