use crate::api::TaskBackend;
use crate::data::label::label_color;
use crate::data::{Label, LocalStore, NewLabel, Session};
use anyhow::{Context, Result};
use std::io::Write;

pub fn list<B: TaskBackend, W: Write>(store: &LocalStore, backend: &B, out: &mut W) -> Result<()> {
    let session = Session::require(store)?;
    let labels = backend
        .list_labels(&session.token)
        .context("Failed to fetch labels")?;
    write_labels(&labels, out)
}

pub(crate) fn write_labels<W: Write>(labels: &[Label], out: &mut W) -> Result<()> {
    writeln!(out, "Labels")?;
    writeln!(out, "---")?;
    writeln!(out, "  {:<26} {:<24} {}", "ID", "Name", "Color")?;
    for l in labels {
        writeln!(out, "  {:<26} {:<24} {}", l.id, l.name, label_color(&l.name))?;
    }
    writeln!(out, "---")?;
    writeln!(out, "Total: {} label(s)", labels.len())?;
    Ok(())
}

pub fn add<B: TaskBackend, W: Write>(
    store: &LocalStore,
    backend: &B,
    name: &str,
    out: &mut W,
) -> Result<()> {
    let label = NewLabel::validate(name)?;
    let session = Session::require(store)?;
    backend
        .create_label(&session.token, &label)
        .context("Failed to create label")?;
    writeln!(out, "Created label '{}'.", label.name)?;
    Ok(())
}
