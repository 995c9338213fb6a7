use crate::data::{AppSettings, AssigneeData, ClientConfig, LocalStore, Persistable, UserProfile};
use anyhow::Result;
use std::io::Write;
use tracing::info;

pub fn run<W: Write>(store: &LocalStore, out: &mut W) -> Result<()> {
    let written = run_in_dir(store)?;
    if written.is_empty() {
        writeln!(out, "Data files already present in {}.", store.dir().display())?;
    } else {
        writeln!(out, "Data files initialized successfully: {}", written.join(", "))?;
    }
    Ok(())
}

/// Writes defaults for every key that is not stored yet and returns the file
/// names written. Existing files are left alone, except an empty assignee
/// roster which is reseeded.
pub(crate) fn run_in_dir(store: &LocalStore) -> Result<Vec<String>> {
    let mut written = Vec::new();
    if write_default::<ClientConfig>(store)? {
        written.push(ClientConfig::filename());
    }
    if write_default::<AppSettings>(store)? {
        written.push(AppSettings::filename());
    }
    if write_default::<UserProfile>(store)? {
        written.push(UserProfile::filename());
    }
    if store.load::<AssigneeData>().assignees.is_empty() {
        store.save(&AssigneeData::roster())?;
        written.push(AssigneeData::filename());
    }
    info!(dir = %store.dir().display(), count = written.len(), "init");
    Ok(written)
}

fn write_default<T: Persistable>(store: &LocalStore) -> Result<bool> {
    if store.path_of::<T>().exists() {
        return Ok(false);
    }
    store.save(&T::default())?;
    Ok(true)
}
