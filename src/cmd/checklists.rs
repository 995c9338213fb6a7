use crate::data::{Checklist, ChecklistData, LocalStore};
use anyhow::{anyhow, bail, Result};
use std::io::Write;

pub fn list<W: Write>(store: &LocalStore, out: &mut W) -> Result<()> {
    write_checklists(&store.load::<ChecklistData>(), out)
}

pub(crate) fn write_checklists<W: Write>(data: &ChecklistData, out: &mut W) -> Result<()> {
    writeln!(out, "Checklists")?;
    writeln!(out, "---")?;
    for c in &data.checklists {
        writeln!(out, "  {} ({}%)  [{}]", c.title, c.progress(), c.id)?;
        if !c.description.is_empty() {
            writeln!(out, "      {}", c.description)?;
        }
        for item in &c.items {
            let mark = if item.completed { "[x]" } else { "[ ]" };
            writeln!(out, "      {} {}  ({})", mark, item.text, item.id)?;
        }
    }
    writeln!(out, "---")?;
    writeln!(out, "Total: {} checklist(s)", data.checklists.len())?;
    Ok(())
}

pub fn add<W: Write>(store: &LocalStore, title: &str, description: &str, out: &mut W) -> Result<()> {
    let checklist = Checklist::new(title, description)?;
    let mut data = store.load::<ChecklistData>();
    writeln!(out, "Created checklist '{}' ({}).", checklist.title, checklist.id)?;
    data.add(checklist);
    store.save(&data)
}

pub fn add_item<W: Write>(store: &LocalStore, checklist_id: &str, text: &str, out: &mut W) -> Result<()> {
    let mut data = store.load::<ChecklistData>();
    let item_id = data
        .add_item(checklist_id, text)?
        .ok_or_else(|| anyhow!("no checklist with id '{}'", checklist_id))?;
    store.save(&data)?;
    writeln!(out, "Added item {}.", item_id)?;
    Ok(())
}

pub fn toggle_item<W: Write>(
    store: &LocalStore,
    checklist_id: &str,
    item_id: &str,
    out: &mut W,
) -> Result<()> {
    let mut data = store.load::<ChecklistData>();
    let done = data
        .toggle_item(checklist_id, item_id)
        .ok_or_else(|| anyhow!("no item '{}' in checklist '{}'", item_id, checklist_id))?;
    store.save(&data)?;
    let progress = data.get(checklist_id).map(Checklist::progress).unwrap_or(0);
    let state = if done { "done" } else { "not done" };
    writeln!(out, "Item {} marked {} ({}% complete).", item_id, state, progress)?;
    Ok(())
}

pub fn delete_item<W: Write>(
    store: &LocalStore,
    checklist_id: &str,
    item_id: &str,
    out: &mut W,
) -> Result<()> {
    let mut data = store.load::<ChecklistData>();
    if !data.delete_item(checklist_id, item_id) {
        bail!("no item '{}' in checklist '{}'", item_id, checklist_id);
    }
    store.save(&data)?;
    writeln!(out, "Deleted item {}.", item_id)?;
    Ok(())
}

pub fn delete<W: Write>(store: &LocalStore, checklist_id: &str, out: &mut W) -> Result<()> {
    let mut data = store.load::<ChecklistData>();
    if !data.remove(checklist_id) {
        bail!("no checklist with id '{}'", checklist_id);
    }
    store.save(&data)?;
    writeln!(out, "Deleted checklist {}.", checklist_id)?;
    Ok(())
}
