use crate::data::{AppSettings, LocalStore, SettingsEdit};
use anyhow::{bail, Result};
use std::io::Write;
use tracing::info;

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

pub fn show<W: Write>(store: &LocalStore, out: &mut W) -> Result<()> {
    write_settings(&store.load::<AppSettings>(), out)
}

pub(crate) fn write_settings<W: Write>(s: &AppSettings, out: &mut W) -> Result<()> {
    writeln!(out, "Settings")?;
    writeln!(out, "---")?;
    writeln!(out, "  {:<22} {}", "Theme", s.theme.as_str())?;
    writeln!(out, "  {:<22} {}", "Email notifications", on_off(s.email_notifications))?;
    writeln!(out, "  {:<22} {}", "Task reminders", on_off(s.task_reminders))?;
    writeln!(out, "  {:<22} {}", "Compact view", on_off(s.compact_view))?;
    writeln!(out, "  {:<22} {}", "Sound", on_off(s.sound_enabled))?;
    Ok(())
}

pub fn set<W: Write>(store: &LocalStore, edit: SettingsEdit, out: &mut W) -> Result<()> {
    if edit.is_empty() {
        bail!("nothing to change, pass at least one setting (see `perspectives settings set --help`)");
    }
    let current = store.load::<AppSettings>();
    let next = edit.apply(&current)?;
    store.save(&next)?;
    info!("settings saved");
    writeln!(out, "Settings saved.")?;
    write_settings(&next, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use tempfile::TempDir;

    #[test]
    fn test_show_defaults() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path());
        let mut buf = Vec::new();
        show(&store, &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("light"));
        assert!(out.contains(&format!("{:<22} off", "Compact view")));
        assert!(out.contains(&format!("{:<22} on", "Sound")));
    }

    #[test]
    fn test_set_then_show_round_trip() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path());
        let edit = SettingsEdit {
            theme: Some("dark".to_string()),
            sound_enabled: Some(false),
            compact_view: Some(true),
            ..Default::default()
        };
        set(&store, edit, &mut Vec::new()).unwrap();

        let reloaded = LocalStore::new(tmp.path()).load::<AppSettings>();
        assert_eq!(reloaded.theme.as_str(), "dark");
        assert!(!reloaded.sound_enabled);
        assert!(reloaded.compact_view);
        assert!(reloaded.email_notifications);
    }

    #[test]
    fn test_set_empty_edit_rejected() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path());
        let err = set(&store, SettingsEdit::default(), &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("nothing to change"));
    }

    #[test]
    fn test_set_bad_theme() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path());
        let edit = SettingsEdit {
            theme: Some("blue".to_string()),
            ..Default::default()
        };
        let err = set(&store, edit, &mut Vec::new()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::InvalidTheme("blue".to_string()))
        );
    }
}
