use crate::data::ids::{new_id, now_timestamp};
use crate::data::persistence::Persistable;
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ChecklistItem {
    pub id: String,
    pub text: String,
    pub completed: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Checklist {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub items: Vec<ChecklistItem>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl Checklist {
    pub fn new(title: &str, description: &str) -> Result<Self, ValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingField("title"));
        }
        Ok(Checklist {
            id: new_id(),
            title: title.to_string(),
            description: description.trim().to_string(),
            items: Vec::new(),
            created_at: now_timestamp(),
        })
    }

    /// Percentage of completed items, rounded; 0 for an empty list.
    pub fn progress(&self) -> u8 {
        if self.items.is_empty() {
            return 0;
        }
        let done = self.items.iter().filter(|i| i.completed).count();
        ((done as f64 / self.items.len() as f64) * 100.0).round() as u8
    }
}

/// Stored under `checklists`, in creation order.
#[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
#[serde(transparent)]
pub struct ChecklistData {
    pub checklists: Vec<Checklist>,
}

impl Persistable for ChecklistData {
    fn key() -> &'static str {
        "checklists"
    }
}

impl ChecklistData {
    pub fn add(&mut self, checklist: Checklist) {
        self.checklists.push(checklist);
    }

    pub fn get(&self, id: &str) -> Option<&Checklist> {
        self.checklists.iter().find(|c| c.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Checklist> {
        self.checklists.iter_mut().find(|c| c.id == id)
    }

    /// Appends an item and returns its id. `Ok(None)` when the checklist does not exist.
    pub fn add_item(&mut self, checklist_id: &str, text: &str) -> Result<Option<String>, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::MissingField("item text"));
        }
        let Some(checklist) = self.get_mut(checklist_id) else {
            return Ok(None);
        };
        let id = new_id();
        checklist.items.push(ChecklistItem {
            id: id.clone(),
            text: text.to_string(),
            completed: false,
        });
        Ok(Some(id))
    }

    /// Flips an item's completion. Returns the new state, or `None` if not found.
    pub fn toggle_item(&mut self, checklist_id: &str, item_id: &str) -> Option<bool> {
        let item = self
            .get_mut(checklist_id)?
            .items
            .iter_mut()
            .find(|i| i.id == item_id)?;
        item.completed = !item.completed;
        Some(item.completed)
    }

    /// Removes one item from one checklist; siblings and other checklists are untouched.
    pub fn delete_item(&mut self, checklist_id: &str, item_id: &str) -> bool {
        let Some(checklist) = self.get_mut(checklist_id) else {
            return false;
        };
        let before = checklist.items.len();
        checklist.items.retain(|i| i.id != item_id);
        checklist.items.len() != before
    }

    pub fn remove(&mut self, checklist_id: &str) -> bool {
        let before = self.checklists.len();
        self.checklists.retain(|c| c.id != checklist_id);
        self.checklists.len() != before
    }
}
