use crate::data::app_settings::AppSettings;
use crate::data::persistence::LocalStore;
use crate::data::profile::UserProfile;
use crate::error::ApiError;
use anyhow::Result;

pub const TOKEN_KEY: &str = "token";
pub const USER_ID_KEY: &str = "user_id";

/// Credentials kept after a successful login.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub token: String,
    pub user_id: Option<String>,
}

impl Session {
    pub fn load(store: &LocalStore) -> Option<Self> {
        let token = store.load_scalar(TOKEN_KEY)?;
        Some(Session {
            token,
            user_id: store.load_scalar(USER_ID_KEY),
        })
    }

    /// Like [`Session::load`] but a missing token is an error.
    pub fn require(store: &LocalStore) -> std::result::Result<Self, ApiError> {
        Self::load(store).ok_or(ApiError::NotLoggedIn)
    }

    pub fn save(&self, store: &LocalStore) -> Result<()> {
        store.save_scalar(TOKEN_KEY, &self.token)?;
        match &self.user_id {
            Some(user_id) => store.save_scalar(USER_ID_KEY, user_id)?,
            None => store.remove_scalar(USER_ID_KEY)?,
        }
        Ok(())
    }

    /// Drops the token. With `forget_preferences` the profile and settings go too.
    pub fn clear(store: &LocalStore, forget_preferences: bool) -> Result<()> {
        store.remove_scalar(TOKEN_KEY)?;
        store.remove_scalar(USER_ID_KEY)?;
        if forget_preferences {
            store.remove::<AppSettings>()?;
            store.remove::<UserProfile>()?;
        }
        Ok(())
    }
}
