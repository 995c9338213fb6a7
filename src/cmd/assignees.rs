use crate::data::{Assignee, AssigneeData, LocalStore};
use anyhow::Result;
use std::io::Write;

/// Lists the roster, narrowed by `query` when given. An empty stored roster is reseeded.
pub fn run<W: Write>(store: &LocalStore, query: Option<&str>, out: &mut W) -> Result<()> {
    let stored = store.load::<AssigneeData>();
    let data = if stored.assignees.is_empty() {
        let roster = AssigneeData::roster();
        store.save(&roster)?;
        roster
    } else {
        stored
    };
    let shown = match query {
        Some(q) => data.search(q),
        None => data.assignees.iter().collect(),
    };
    write_assignees(&shown, out)
}

pub(crate) fn write_assignees<W: Write>(assignees: &[&Assignee], out: &mut W) -> Result<()> {
    writeln!(out, "Assignees")?;
    writeln!(out, "---")?;
    writeln!(out, "  {:<6} {:<8} {}", "ID", "Initial", "Name")?;
    for a in assignees {
        writeln!(out, "  {:<6} {:<8} {}", a.id, a.initials(), a.name)?;
    }
    writeln!(out, "---")?;
    writeln!(out, "Total: {} assignee(s)", assignees.len())?;
    Ok(())
}
