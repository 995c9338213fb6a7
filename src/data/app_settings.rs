use crate::data::persistence::Persistable;
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl FromStr for Theme {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ValidationError::InvalidTheme(other.to_string())),
        }
    }
}

/// Stored under `appSettings`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub theme: Theme,
    pub email_notifications: bool,
    pub task_reminders: bool,
    pub compact_view: bool,
    pub sound_enabled: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            theme: Theme::Light,
            email_notifications: true,
            task_reminders: true,
            compact_view: false,
            sound_enabled: true,
        }
    }
}

impl Persistable for AppSettings {
    fn key() -> &'static str {
        "appSettings"
    }
}

/// Requested changes from `settings set`; `None` leaves the field alone.
#[derive(Clone, Debug, Default)]
pub struct SettingsEdit {
    pub theme: Option<String>,
    pub email_notifications: Option<bool>,
    pub task_reminders: Option<bool>,
    pub compact_view: Option<bool>,
    pub sound_enabled: Option<bool>,
}

impl SettingsEdit {
    pub fn is_empty(&self) -> bool {
        self.theme.is_none()
            && self.email_notifications.is_none()
            && self.task_reminders.is_none()
            && self.compact_view.is_none()
            && self.sound_enabled.is_none()
    }

    pub fn apply(self, current: &AppSettings) -> Result<AppSettings, ValidationError> {
        let mut next = current.clone();
        if let Some(theme) = self.theme {
            next.theme = theme.parse()?;
        }
        if let Some(v) = self.email_notifications {
            next.email_notifications = v;
        }
        if let Some(v) = self.task_reminders {
            next.task_reminders = v;
        }
        if let Some(v) = self.compact_view {
            next.compact_view = v;
        }
        if let Some(v) = self.sound_enabled {
            next.sound_enabled = v;
        }
        Ok(next)
    }
}
