use crate::data::{LocalStore, NoteData, NoteInput};
use anyhow::{bail, Result};
use std::io::Write;

pub fn list<W: Write>(store: &LocalStore, out: &mut W) -> Result<()> {
    write_notes(&store.load::<NoteData>(), out)
}

pub(crate) fn write_notes<W: Write>(data: &NoteData, out: &mut W) -> Result<()> {
    writeln!(out, "Notes")?;
    writeln!(out, "---")?;
    for n in &data.notes {
        let created = n.created_at.get(..10).unwrap_or(&n.created_at);
        writeln!(out, "  {}  {}  ({})", created, n.title, n.id)?;
        for line in n.content.lines() {
            writeln!(out, "      {}", line)?;
        }
    }
    writeln!(out, "---")?;
    writeln!(out, "Total: {} note(s)", data.notes.len())?;
    Ok(())
}

pub fn add<W: Write>(store: &LocalStore, input: NoteInput, out: &mut W) -> Result<()> {
    let note = input.validate()?;
    let mut data = store.load::<NoteData>();
    writeln!(out, "Saved note '{}' ({}).", note.title, note.id)?;
    data.add(note);
    store.save(&data)
}

pub fn delete<W: Write>(store: &LocalStore, id: &str, out: &mut W) -> Result<()> {
    let mut data = store.load::<NoteData>();
    if !data.remove(id) {
        bail!("no note with id '{}'", id);
    }
    store.save(&data)?;
    writeln!(out, "Deleted note {}.", id)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use tempfile::TempDir;

    fn input(title: &str, content: &str) -> NoteInput {
        NoteInput {
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_add_prepends_and_lists_newest_first() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path());
        add(&store, input("First", "one"), &mut Vec::new()).unwrap();
        add(&store, input("Second", "two\nlines"), &mut Vec::new()).unwrap();

        let mut buf = Vec::new();
        list(&store, &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        let second = out.find("Second").unwrap();
        let first = out.find("First").unwrap();
        assert!(second < first);
        assert!(out.contains("      lines"));
        assert!(out.contains("Total: 2 note(s)"));
    }

    #[test]
    fn test_add_requires_title() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path());
        let err = add(&store, input("  ", "body"), &mut Vec::new()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::MissingField("title"))
        );
        assert!(!store.path_of::<NoteData>().exists());
    }

    #[test]
    fn test_delete_by_id() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path());
        add(&store, input("Keep", ""), &mut Vec::new()).unwrap();
        add(&store, input("Drop", ""), &mut Vec::new()).unwrap();
        let id = store.load::<NoteData>().notes[0].id.clone();

        delete(&store, &id, &mut Vec::new()).unwrap();
        let data = store.load::<NoteData>();
        assert_eq!(data.notes.len(), 1);
        assert_eq!(data.notes[0].title, "Keep");

        let err = delete(&store, &id, &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("no note with id"));
    }

    #[test]
    fn test_list_malformed_store_degrades_to_empty() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path());
        std::fs::write(store.path_of::<NoteData>(), "{not json").unwrap();
        let mut buf = Vec::new();
        list(&store, &mut buf).unwrap();
        assert!(String::from_utf8(buf).unwrap().contains("Total: 0 note(s)"));
    }
}
