use crate::data::goal::PROGRESS_STEP;
use crate::data::{AppSettings, GoalData, GoalInput, LocalStore};
use crate::ui::celebration::{write_celebration, Celebration};
use anyhow::{anyhow, bail, Result};
use std::io::Write;
use tracing::info;

pub fn list<W: Write>(store: &LocalStore, out: &mut W) -> Result<()> {
    write_goals(&store.load::<GoalData>(), out)
}

/// Ten-segment text bar, e.g. `[####------]`.
fn progress_bar(progress: u8) -> String {
    let filled = usize::from(progress / 10);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(10 - filled))
}

pub(crate) fn write_goals<W: Write>(data: &GoalData, out: &mut W) -> Result<()> {
    writeln!(out, "Goals")?;
    writeln!(out, "---")?;
    writeln!(
        out,
        "  {:<36} {:<28} {:<10} {}",
        "ID", "Title", "Category", "Progress"
    )?;
    for g in &data.goals {
        writeln!(
            out,
            "  {:<36} {:<28} {:<10} {} {:>3}%",
            g.id,
            g.title,
            g.category,
            progress_bar(g.progress),
            g.progress
        )?;
    }
    writeln!(out, "---")?;
    let done = data.goals.iter().filter(|g| g.is_complete()).count();
    writeln!(out, "Total: {} goal(s), {} complete", data.goals.len(), done)?;
    Ok(())
}

pub fn add<W: Write>(store: &LocalStore, input: GoalInput, out: &mut W) -> Result<()> {
    let goal = input.validate()?;
    let mut data = store.load::<GoalData>();
    writeln!(out, "Added {} goal '{}' ({}).", goal.category, goal.title, goal.id)?;
    data.add(goal);
    store.save(&data)
}

/// Moves progress up one step, or sets it outright with `to`.
pub fn bump<W: Write>(store: &LocalStore, id: &str, to: Option<u32>, out: &mut W) -> Result<()> {
    let mut data = store.load::<GoalData>();
    let change = match to {
        Some(progress) => data.set_progress(id, progress)?,
        None => data.increment(id, PROGRESS_STEP),
    }
    .ok_or_else(|| anyhow!("no goal with id '{}'", id))?;
    store.save(&data)?;

    let title = data.get(id).map(|g| g.title.clone()).unwrap_or_default();
    info!(goal = id, progress = change.progress, "goal progress");
    writeln!(out, "'{}' is now at {}%.", title, change.progress)?;
    if change.celebrate {
        let settings = store.load::<AppSettings>();
        write_celebration(Celebration::Confetti, &title, settings.sound_enabled, out)?;
    }
    Ok(())
}

pub fn delete<W: Write>(store: &LocalStore, id: &str, out: &mut W) -> Result<()> {
    let mut data = store.load::<GoalData>();
    if !data.remove(id) {
        bail!("no goal with id '{}'", id);
    }
    store.save(&data)?;
    writeln!(out, "Deleted goal {}.", id)?;
    Ok(())
}
