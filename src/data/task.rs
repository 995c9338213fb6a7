use crate::error::ValidationError;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Exact, case-sensitive match on the wire spelling.
impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidPriority(s.to_string()))
    }
}

/// A task as returned by `GET /api/tasks`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Task {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub priority: Priority,
    pub deadline: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub labels: Option<Vec<String>>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub assignee: Option<String>,
}

impl Task {
    /// Calendar date of the deadline, or `None` when the backend sent something unparseable.
    pub fn deadline_date(&self) -> Option<NaiveDate> {
        parse_deadline(&self.deadline)
    }

    pub fn has_label(&self, name: &str) -> bool {
        self.labels
            .as_ref()
            .is_some_and(|labels| labels.iter().any(|l| l == name))
    }

    /// "09:00-10:30", "09:00", or empty when no time slot is set.
    pub fn time_slot(&self) -> String {
        match (&self.start_time, &self.end_time) {
            (Some(s), Some(e)) => format!("{s}-{e}"),
            (Some(s), None) => s.clone(),
            (None, Some(e)) => format!("-{e}"),
            (None, None) => String::new(),
        }
    }
}

/// Body of `POST /api/tasks`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub deadline: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub labels: Vec<String>,
    pub completed: bool,
    pub assignee: String,
}

/// Body of `PUT /api/tasks/{id}`; unset fields are left out of the JSON.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
}

impl TaskUpdate {
    pub fn completed(completed: bool) -> Self {
        TaskUpdate {
            completed: Some(completed),
            ..Default::default()
        }
    }

    pub fn assignee(assignee_id: &str) -> Self {
        TaskUpdate {
            assignee: Some(assignee_id.to_string()),
            ..Default::default()
        }
    }
}

/// Raw task form fields, validated into a [`NewTask`].
#[derive(Clone, Debug, Default)]
pub struct TaskInput {
    pub title: String,
    pub description: Option<String>,
    pub priority: String,
    pub deadline: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub assignee: Option<String>,
}

impl TaskInput {
    /// `default_assignee` is used when the form leaves the assignee blank.
    pub fn validate(self, default_assignee: &str) -> Result<NewTask, ValidationError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(ValidationError::MissingField("title"));
        }
        if self.priority.trim().is_empty() {
            return Err(ValidationError::MissingField("priority"));
        }
        let priority: Priority = self.priority.trim().parse()?;
        let deadline = normalize_deadline(self.deadline.trim())?;
        let start_time = non_blank(self.start_time).map(check_time).transpose()?;
        let end_time = non_blank(self.end_time).map(check_time).transpose()?;
        let assignee = non_blank(self.assignee).unwrap_or_else(|| default_assignee.to_string());

        Ok(NewTask {
            title,
            description: non_blank(self.description),
            priority,
            deadline,
            start_time,
            end_time,
            labels: Vec::new(),
            completed: false,
            assignee,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn check_time(value: String) -> Result<String, ValidationError> {
    match NaiveTime::parse_from_str(&value, "%H:%M") {
        Ok(_) => Ok(value),
        Err(_) => Err(ValidationError::InvalidTime(value)),
    }
}

/// Date-only deadlines become UTC midnight datetimes; full datetimes pass through.
fn normalize_deadline(raw: &str) -> Result<String, ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::MissingField("deadline"));
    }
    if raw.contains('T') {
        return match parse_deadline(raw) {
            Some(_) => Ok(raw.to_string()),
            None => Err(ValidationError::InvalidDate(raw.to_string())),
        };
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(raw.to_string()))?;
    Ok(format!("{}T00:00:00.000Z", date.format("%Y-%m-%d")))
}

/// Accepts RFC 3339, naive ISO datetimes (as the backend emits them) and bare dates.
pub fn parse_deadline(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Tasks whose deadline falls on `date`.
pub fn tasks_on(tasks: &[Task], date: NaiveDate) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|t| t.deadline_date() == Some(date))
        .collect()
}

/// "Due Today", "Due Tomorrow", otherwise "Due {month} {day:02}".
pub fn due_label(deadline: NaiveDate, today: NaiveDate) -> String {
    if deadline == today {
        "Due Today".to_string()
    } else if today.succ_opt() == Some(deadline) {
        "Due Tomorrow".to_string()
    } else {
        format!("Due {} {:02}", deadline.month(), deadline.day())
    }
}
