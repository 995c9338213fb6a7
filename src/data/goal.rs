use crate::data::ids::{new_id, now_timestamp};
use crate::data::persistence::Persistable;
use crate::error::ValidationError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MAX_PROGRESS: u8 = 100;
/// Step applied by one "+10%" press.
pub const PROGRESS_STEP: u8 = 10;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GoalCategory {
    Health,
    Finance,
    Career,
    Education,
    Personal,
}

impl GoalCategory {
    pub const ALL: [GoalCategory; 5] = [
        GoalCategory::Health,
        GoalCategory::Finance,
        GoalCategory::Career,
        GoalCategory::Education,
        GoalCategory::Personal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GoalCategory::Health => "Health",
            GoalCategory::Finance => "Finance",
            GoalCategory::Career => "Career",
            GoalCategory::Education => "Education",
            GoalCategory::Personal => "Personal",
        }
    }
}

impl fmt::Display for GoalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for GoalCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GoalCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ValidationError::InvalidCategory(s.to_string()))
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Goal {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: GoalCategory,
    #[serde(default, deserialize_with = "clamped_progress")]
    pub progress: u8,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

/// Out-of-range stored progress is clamped into 0..=100 rather than
/// failing the whole goals file.
fn clamped_progress<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let raw = f64::deserialize(deserializer)?;
    if raw.is_nan() {
        return Ok(0);
    }
    Ok(raw.clamp(0.0, f64::from(MAX_PROGRESS)) as u8)
}

impl Goal {
    pub fn is_complete(&self) -> bool {
        self.progress >= MAX_PROGRESS
    }
}

#[derive(Clone, Debug, Default)]
pub struct GoalInput {
    pub title: String,
    pub description: String,
    pub category: String,
}

impl GoalInput {
    pub fn validate(self) -> Result<Goal, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingField("title"));
        }
        if self.category.trim().is_empty() {
            return Err(ValidationError::MissingField("category"));
        }
        let category: GoalCategory = self.category.parse()?;
        Ok(Goal {
            id: new_id(),
            title: title.to_string(),
            description: self.description.trim().to_string(),
            category,
            progress: 0,
            created_at: now_timestamp(),
        })
    }
}

/// Result of moving a goal's progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgressChange {
    pub progress: u8,
    /// True only on the transition from below 100 to 100.
    pub celebrate: bool,
}

/// Stored under `goals`, newest first.
#[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
#[serde(transparent)]
pub struct GoalData {
    pub goals: Vec<Goal>,
}

impl Persistable for GoalData {
    fn key() -> &'static str {
        "goals"
    }
}

impl GoalData {
    pub fn add(&mut self, goal: Goal) {
        self.goals.insert(0, goal);
    }

    pub fn get(&self, id: &str) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == id)
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.goals.len();
        self.goals.retain(|g| g.id != id);
        self.goals.len() != before
    }

    /// Adds `step` to the goal's progress, clamped to 100. `None` when the id is unknown.
    pub fn increment(&mut self, id: &str, step: u8) -> Option<ProgressChange> {
        let goal = self.goals.iter_mut().find(|g| g.id == id)?;
        let previous = goal.progress;
        goal.progress = previous.saturating_add(step).min(MAX_PROGRESS);
        Some(ProgressChange {
            progress: goal.progress,
            celebrate: previous < MAX_PROGRESS && goal.progress == MAX_PROGRESS,
        })
    }

    pub fn set_progress(&mut self, id: &str, progress: u32) -> Result<Option<ProgressChange>, ValidationError> {
        if progress > u32::from(MAX_PROGRESS) {
            return Err(ValidationError::ProgressOutOfRange(progress));
        }
        let Some(goal) = self.goals.iter_mut().find(|g| g.id == id) else {
            return Ok(None);
        };
        let previous = goal.progress;
        goal.progress = progress as u8;
        Ok(Some(ProgressChange {
            progress: goal.progress,
            celebrate: previous < MAX_PROGRESS && goal.progress == MAX_PROGRESS,
        }))
    }
}
