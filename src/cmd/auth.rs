use crate::api::{LoginRequest, SignupRequest, TaskBackend};
use crate::data::{LocalStore, Session};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::info;

/// Uses `password` when given, otherwise reads one line from `input`.
pub(crate) fn password_or_prompt<R: BufRead, W: Write>(
    password: Option<String>,
    input: &mut R,
    prompt_out: &mut W,
) -> Result<String> {
    if let Some(p) = password {
        return Ok(p);
    }
    write!(prompt_out, "Password: ")?;
    prompt_out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line).context("failed to read password")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub fn signup<B: TaskBackend, W: Write>(
    backend: &B,
    username: &str,
    email: &str,
    password: &str,
    out: &mut W,
) -> Result<()> {
    let request = SignupRequest::validate(username, email, password)?;
    let response = backend.signup(&request).context("Signup failed")?;
    info!(user_id = %response.user_id, "account created");
    writeln!(out, "Account created for {} (user id {}).", request.username, response.user_id)?;
    writeln!(out, "Run `perspectives login` to sign in.")?;
    Ok(())
}

pub fn login<B: TaskBackend, W: Write>(
    store: &LocalStore,
    backend: &B,
    email: &str,
    password: &str,
    out: &mut W,
) -> Result<()> {
    let request = LoginRequest::validate(email, password)?;
    let response = backend.login(&request).context("Login failed")?;
    let session = Session {
        token: response.access_token,
        user_id: response.user_id,
    };
    session.save(store)?;
    info!(email = %request.email, "logged in");
    writeln!(out, "Logged in as {}.", request.email)?;
    Ok(())
}

/// `all` also forgets the stored profile and settings.
pub fn logout<W: Write>(store: &LocalStore, all: bool, out: &mut W) -> Result<()> {
    Session::clear(store, all)?;
    if all {
        writeln!(out, "Logged out. Profile and settings cleared.")?;
    } else {
        writeln!(out, "Logged out.")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{FakeBackend, FAKE_TOKEN};
    use crate::data::{AppSettings, Persistable, UserProfile};
    use crate::error::{ApiError, ValidationError};
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn test_login_persists_token_and_user_id() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path());
        let mut buf = Vec::new();
        login(&store, &FakeBackend::default(), "ana@example.com", "secret1", &mut buf).unwrap();
        let session = Session::load(&store).unwrap();
        assert_eq!(session.token, FAKE_TOKEN);
        assert_eq!(session.user_id.as_deref(), Some("u1"));
        assert!(String::from_utf8(buf).unwrap().contains("Logged in as ana@example.com"));
    }

    #[test]
    fn test_login_validation_blocks_request() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path());
        let backend = FakeBackend::failing(500, "should not be called");
        let err = login(&store, &backend, "not-an-email", "pw", &mut Vec::new()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::InvalidEmail)
        );
        assert!(Session::load(&store).is_none());
    }

    #[test]
    fn test_login_failure_surfaces_backend_detail() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path());
        let backend = FakeBackend::failing(401, "Invalid credentials");
        let err = login(&store, &backend, "ana@example.com", "pw", &mut Vec::new()).unwrap_err();
        assert!(format!("{err:#}").contains("Invalid credentials"));
        assert!(matches!(
            err.downcast_ref::<ApiError>(),
            Some(ApiError::Http { status: 401, .. })
        ));
        assert!(Session::load(&store).is_none());
    }

    #[test]
    fn test_signup_prints_next_step() {
        let mut buf = Vec::new();
        signup(&FakeBackend::default(), "ana", "ana@example.com", "secret1", &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("Account created for ana (user id u1)"));
        assert!(out.contains("perspectives login"));
    }

    #[test]
    fn test_signup_short_password_rejected() {
        let err = signup(&FakeBackend::default(), "ana", "ana@example.com", "123", &mut Vec::new())
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::PasswordTooShort)
        );
    }

    #[test]
    fn test_logout_all_clears_preferences() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path());
        login(&store, &FakeBackend::default(), "ana@example.com", "pw", &mut Vec::new()).unwrap();
        store.save(&AppSettings::default()).unwrap();
        store.save(&UserProfile::default()).unwrap();

        logout(&store, false, &mut Vec::new()).unwrap();
        assert!(Session::load(&store).is_none());
        assert!(store.path_of::<AppSettings>().exists());

        let mut buf = Vec::new();
        logout(&store, true, &mut buf).unwrap();
        assert!(!store.path_of::<AppSettings>().exists());
        assert!(!tmp.path().join(UserProfile::filename()).exists());
        assert!(String::from_utf8(buf).unwrap().contains("Profile and settings cleared"));
    }

    #[test]
    fn test_password_prompt_reads_line() {
        let mut input = Cursor::new("hunter22\n");
        let mut prompt = Vec::new();
        let pw = password_or_prompt(None, &mut input, &mut prompt).unwrap();
        assert_eq!(pw, "hunter22");
        assert_eq!(String::from_utf8(prompt).unwrap(), "Password: ");

        let given = password_or_prompt(Some("x".to_string()), &mut Cursor::new(""), &mut Vec::new());
        assert_eq!(given.unwrap(), "x");
    }
}
