use crate::data::persistence::Persistable;
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

pub const AVATAR_OPTIONS: [&str; 10] = ["👤", "😀", "🧑", "👨", "👩", "🐱", "🐶", "⭐", "🎯", "🚀"];

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct UserProfile {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default = "default_avatar")]
    pub avatar: String,
    #[serde(default)]
    pub bio: String,
}

fn default_avatar() -> String {
    AVATAR_OPTIONS[0].to_string()
}

impl Default for UserProfile {
    fn default() -> Self {
        UserProfile {
            username: String::new(),
            email: String::new(),
            avatar: default_avatar(),
            bio: String::new(),
        }
    }
}

impl Persistable for UserProfile {
    fn key() -> &'static str {
        "userProfile"
    }
}

/// Edits to a profile; `None` keeps the current value.
#[derive(Clone, Debug, Default)]
pub struct ProfileEdit {
    pub username: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
}

impl ProfileEdit {
    pub fn apply(self, current: &UserProfile) -> Result<UserProfile, ValidationError> {
        let mut next = current.clone();
        if let Some(avatar) = self.avatar {
            if !AVATAR_OPTIONS.contains(&avatar.as_str()) {
                return Err(ValidationError::UnknownAvatar(avatar));
            }
            next.avatar = avatar;
        }
        if let Some(email) = self.email {
            let email = email.trim().to_string();
            if !email.is_empty() && !email.contains('@') {
                return Err(ValidationError::InvalidEmail);
            }
            next.email = email;
        }
        if let Some(username) = self.username {
            next.username = username.trim().to_string();
        }
        if let Some(bio) = self.bio {
            next.bio = bio;
        }
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::persistence::LocalStore;
    use tempfile::TempDir;

    #[test]
    fn test_apply_keeps_untouched_fields() {
        let current = UserProfile {
            username: "ana".to_string(),
            email: "ana@example.com".to_string(),
            avatar: "🚀".to_string(),
            bio: "hi".to_string(),
        };
        let next = ProfileEdit {
            bio: Some("new bio".to_string()),
            ..Default::default()
        }
        .apply(&current)
        .unwrap();
        assert_eq!(next.username, "ana");
        assert_eq!(next.avatar, "🚀");
        assert_eq!(next.bio, "new bio");
    }

    #[test]
    fn test_apply_rejects_unknown_avatar() {
        let edit = ProfileEdit {
            avatar: Some("🦄".to_string()),
            ..Default::default()
        };
        assert_eq!(
            edit.apply(&UserProfile::default()),
            Err(ValidationError::UnknownAvatar("🦄".to_string()))
        );
    }

    #[test]
    fn test_apply_rejects_email_without_at() {
        let edit = ProfileEdit {
            email: Some("nobody".to_string()),
            ..Default::default()
        };
        assert_eq!(edit.apply(&UserProfile::default()), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn test_profile_store_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path());
        let profile = UserProfile {
            username: "ana".to_string(),
            email: "ana@example.com".to_string(),
            avatar: "⭐".to_string(),
            bio: String::new(),
        };
        store.save(&profile).unwrap();
        assert!(tmp.path().join("userProfile.json").exists());
        assert_eq!(store.load::<UserProfile>(), profile);
    }
}
