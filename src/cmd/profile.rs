use crate::data::profile::AVATAR_OPTIONS;
use crate::data::{LocalStore, ProfileEdit, UserProfile};
use anyhow::Result;
use std::io::Write;

pub fn show<W: Write>(store: &LocalStore, out: &mut W) -> Result<()> {
    write_profile(&store.load::<UserProfile>(), out)
}

fn or_unset(value: &str) -> &str {
    if value.is_empty() { "(not set)" } else { value }
}

pub(crate) fn write_profile<W: Write>(profile: &UserProfile, out: &mut W) -> Result<()> {
    writeln!(out, "Profile")?;
    writeln!(out, "---")?;
    writeln!(out, "  {:<14} {}", "Avatar", profile.avatar)?;
    writeln!(out, "  {:<14} {}", "Username", or_unset(&profile.username))?;
    writeln!(out, "  {:<14} {}", "Email", or_unset(&profile.email))?;
    writeln!(out, "  {:<14} {}", "Bio", or_unset(&profile.bio))?;
    writeln!(out, "---")?;
    writeln!(out, "Avatars: {}", AVATAR_OPTIONS.join(" "))?;
    Ok(())
}

pub fn set<W: Write>(store: &LocalStore, edit: ProfileEdit, out: &mut W) -> Result<()> {
    let current = store.load::<UserProfile>();
    let next = edit.apply(&current)?;
    store.save(&next)?;
    writeln!(out, "Profile updated.")?;
    write_profile(&next, out)
}
