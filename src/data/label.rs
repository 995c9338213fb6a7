use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Label {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

/// Body of `POST /api/labels`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NewLabel {
    pub name: String,
}

impl NewLabel {
    pub fn validate(name: &str) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingField("label name"));
        }
        Ok(NewLabel {
            name: name.to_string(),
        })
    }
}

/// Display class for a label chip, keyed off well-known words in its name.
pub fn label_color(label: &str) -> &'static str {
    let lower = label.to_lowercase();
    ["design", "development", "delivery", "high", "normal", "medium", "low"]
        .into_iter()
        .find(|class| lower.contains(class))
        .unwrap_or("medium")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_label_trims_name() {
        assert_eq!(NewLabel::validate("  work ").unwrap().name, "work");
    }

    #[test]
    fn test_new_label_rejects_blank() {
        assert_eq!(
            NewLabel::validate("   "),
            Err(ValidationError::MissingField("label name"))
        );
    }

    #[test]
    fn test_label_deserializes_backend_id() {
        let label: Label = serde_json::from_str(r#"{"_id":"abc","name":"errand","user_id":"u"}"#).unwrap();
        assert_eq!(label.id, "abc");
        assert_eq!(label.name, "errand");
    }

    #[test]
    fn test_label_color_first_keyword_wins() {
        assert_eq!(label_color("UI Design"), "design");
        assert_eq!(label_color("Low-hanging"), "low");
        assert_eq!(label_color("errand"), "medium");
    }
}
