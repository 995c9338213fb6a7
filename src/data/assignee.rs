use crate::data::persistence::Persistable;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Assignee {
    pub id: String,
    pub name: String,
}

impl Assignee {
    pub fn new(id: &str, name: &str) -> Self {
        Assignee {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    /// First letter of each word, uppercased, at most two letters.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }
}

/// Stored under `assignees`.
#[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
#[serde(transparent)]
pub struct AssigneeData {
    pub assignees: Vec<Assignee>,
}

impl Persistable for AssigneeData {
    fn key() -> &'static str {
        "assignees"
    }
}

impl AssigneeData {
    pub fn roster() -> Self {
        AssigneeData {
            assignees: vec![
                Assignee::new("1", "Queen"),
                Assignee::new("2", "King"),
                Assignee::new("3", "Princess"),
                Assignee::new("4", "Prince"),
            ],
        }
    }

    /// The default roster when nothing usable is stored.
    pub fn or_roster(self) -> Self {
        if self.assignees.is_empty() {
            Self::roster()
        } else {
            self
        }
    }

    /// Id used for new tasks when the form leaves the assignee blank.
    pub fn default_id(&self) -> &str {
        self.assignees.first().map(|a| a.id.as_str()).unwrap_or("1")
    }

    pub fn name_of(&self, id: &str) -> Option<&str> {
        self.assignees
            .iter()
            .find(|a| a.id == id)
            .map(|a| a.name.as_str())
    }

    /// Case-insensitive substring search on the name.
    pub fn search(&self, query: &str) -> Vec<&Assignee> {
        let q = query.to_lowercase();
        self.assignees
            .iter()
            .filter(|a| a.name.to_lowercase().contains(&q))
            .collect()
    }
}
