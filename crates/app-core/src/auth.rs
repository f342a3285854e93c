//! Authentication flows
//!
//! Credential validation and the mock sign-in/sign-up backend. Validation
//! failures are inline errors that never leave the screen and never trigger
//! a navigation reset; only a successful sign-in or sign-out drives the auth
//! gate.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::time::Duration;
use tokio::sync::RwLock;

use app_state::{ErrorInfo, ErrorKind};

/// Errors that can occur during auth operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Local input validation failure; surfaced inline
    #[error("{0}")]
    Validation(String),

    /// The backend rejected the credentials
    #[error("Invalid email or password. Please try again.")]
    InvalidCredentials,

    /// Sign-up with an email that already has an account
    #[error("This email address is already registered.")]
    EmailTaken,

    /// An operation that requires a session was called without one
    #[error("No active session")]
    NoSession,
}

impl AuthError {
    /// Displayable form with the right handling classification
    pub fn to_error_info(&self) -> ErrorInfo {
        ErrorInfo::new(ErrorKind::Validation, self.to_string())
    }
}

/// Result type for auth operations
pub type Result<T> = std::result::Result<T, AuthError>;

/// Sign-in form input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
}

/// Sign-up form input
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignupForm {
    /// Display name
    pub full_name: String,
    /// Account email
    pub email: String,
    /// Chosen password
    pub password: String,
    /// Password confirmation field
    pub confirm_password: String,
    /// Terms of service checkbox
    pub agreed_to_terms: bool,
}

/// An authenticated session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Stable user id
    pub user_id: String,
    /// Account email
    pub email: String,
    /// Display name
    pub display_name: String,
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static pattern"))
}

/// Validate sign-in input
///
/// Both fields must be present; email shape is checked by the backend, not
/// here, matching the login screen's looser rules.
pub fn validate_login(credentials: &Credentials) -> Result<()> {
    if credentials.email.is_empty() || credentials.password.is_empty() {
        return Err(AuthError::Validation(
            "Please enter both email and password.".to_string(),
        ));
    }
    Ok(())
}

/// Validate sign-up input
pub fn validate_signup(form: &SignupForm) -> Result<()> {
    if form.full_name.trim().is_empty()
        || form.email.is_empty()
        || form.password.is_empty()
        || form.confirm_password.is_empty()
    {
        return Err(AuthError::Validation(
            "Please fill in all fields.".to_string(),
        ));
    }
    if !email_regex().is_match(&form.email) {
        return Err(AuthError::Validation(
            "Please enter a valid email address.".to_string(),
        ));
    }
    if form.password.len() < 8 {
        return Err(AuthError::Validation(
            "Password must be at least 8 characters long.".to_string(),
        ));
    }
    if form.password != form.confirm_password {
        return Err(AuthError::Validation("Passwords do not match.".to_string()));
    }
    if !form.agreed_to_terms {
        return Err(AuthError::Validation(
            "Please agree to the Terms of Service and Privacy Policy.".to_string(),
        ));
    }
    Ok(())
}

#[derive(Debug, Clone)]
struct StoredAccount {
    user_id: String,
    email: String,
    password: String,
    display_name: String,
}

/// Mock authentication backend
///
/// Holds a seeded account list and the current session. Sign-in and sign-up
/// complete after a short simulated delay; a real backend slots in behind
/// the same surface.
pub struct AuthService {
    accounts: RwLock<Vec<StoredAccount>>,
    session: RwLock<Option<Session>>,
    delay: Duration,
}

impl AuthService {
    /// Service seeded with the demo account (`test@smartvazi.com` /
    /// `password`)
    pub fn new() -> Self {
        Self::with_delay(Duration::from_secs(2))
    }

    /// Service with an explicit simulated backend delay
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            accounts: RwLock::new(vec![StoredAccount {
                user_id: "user_1".to_string(),
                email: "test@smartvazi.com".to_string(),
                password: "password".to_string(),
                display_name: "Vazi Tester".to_string(),
            }]),
            session: RwLock::new(None),
            delay,
        }
    }

    /// Attempt sign-in
    ///
    /// Validation failures return before the simulated round trip; bad
    /// credentials fail after it, like the real backend would.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<Session> {
        validate_login(credentials)?;
        tracing::debug!(email = %credentials.email, "sign-in attempt");
        tokio::time::sleep(self.delay).await;

        let accounts = self.accounts.read().await;
        let account = accounts
            .iter()
            .find(|a| a.email == credentials.email && a.password == credentials.password)
            .ok_or(AuthError::InvalidCredentials)?;

        let session = Session {
            user_id: account.user_id.clone(),
            email: account.email.clone(),
            display_name: account.display_name.clone(),
        };
        drop(accounts);

        *self.session.write().await = Some(session.clone());
        tracing::info!(user_id = %session.user_id, "signed in");
        Ok(session)
    }

    /// Attempt sign-up
    pub async fn sign_up(&self, form: &SignupForm) -> Result<Session> {
        validate_signup(form)?;
        tracing::debug!(email = %form.email, "sign-up attempt");
        tokio::time::sleep(self.delay).await;

        let mut accounts = self.accounts.write().await;
        if accounts.iter().any(|a| a.email == form.email) {
            return Err(AuthError::EmailTaken);
        }

        let user_id = format!("user_{}", accounts.len() + 1);
        accounts.push(StoredAccount {
            user_id: user_id.clone(),
            email: form.email.clone(),
            password: form.password.clone(),
            display_name: form.full_name.clone(),
        });
        drop(accounts);

        let session = Session {
            user_id,
            email: form.email.clone(),
            display_name: form.full_name.clone(),
        };
        *self.session.write().await = Some(session.clone());
        tracing::info!(user_id = %session.user_id, "signed up");
        Ok(session)
    }

    /// The active session, if signed in
    pub async fn current_session(&self) -> Option<Session> {
        self.session.read().await.clone()
    }

    /// Drop the active session
    pub async fn sign_out(&self) {
        let mut session = self.session.write().await;
        if let Some(old) = session.take() {
            tracing::info!(user_id = %old.user_id, "signed out");
        }
    }
}

impl Default for AuthService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        AuthService::with_delay(Duration::from_millis(0))
    }

    fn valid_signup() -> SignupForm {
        SignupForm {
            full_name: "Amina W".to_string(),
            email: "amina@example.com".to_string(),
            password: "longenough".to_string(),
            confirm_password: "longenough".to_string(),
            agreed_to_terms: true,
        }
    }

    #[test]
    fn test_login_requires_both_fields() {
        let err = validate_login(&Credentials {
            email: "test@smartvazi.com".to_string(),
            password: String::new(),
        })
        .unwrap_err();
        assert_eq!(
            err,
            AuthError::Validation("Please enter both email and password.".to_string())
        );
    }

    #[test]
    fn test_signup_validation_order() {
        let mut form = SignupForm::default();
        assert!(matches!(
            validate_signup(&form).unwrap_err(),
            AuthError::Validation(msg) if msg == "Please fill in all fields."
        ));

        form = valid_signup();
        form.email = "not-an-email".to_string();
        assert!(matches!(
            validate_signup(&form).unwrap_err(),
            AuthError::Validation(msg) if msg == "Please enter a valid email address."
        ));

        form = valid_signup();
        form.password = "short".to_string();
        form.confirm_password = "short".to_string();
        assert!(matches!(
            validate_signup(&form).unwrap_err(),
            AuthError::Validation(msg) if msg.starts_with("Password must be")
        ));

        form = valid_signup();
        form.confirm_password = "different1".to_string();
        assert!(matches!(
            validate_signup(&form).unwrap_err(),
            AuthError::Validation(msg) if msg == "Passwords do not match."
        ));

        form = valid_signup();
        form.agreed_to_terms = false;
        assert!(matches!(
            validate_signup(&form).unwrap_err(),
            AuthError::Validation(msg) if msg.starts_with("Please agree")
        ));
    }

    #[tokio::test]
    async fn test_sign_in_with_seeded_account() {
        let auth = service();
        let session = auth
            .sign_in(&Credentials {
                email: "test@smartvazi.com".to_string(),
                password: "password".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(session.email, "test@smartvazi.com");
        assert_eq!(auth.current_session().await, Some(session));
    }

    #[tokio::test]
    async fn test_sign_in_rejects_bad_credentials() {
        let auth = service();
        let err = auth
            .sign_in(&Credentials {
                email: "test@smartvazi.com".to_string(),
                password: "wrong".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, AuthError::InvalidCredentials);
        assert!(auth.current_session().await.is_none());
    }

    #[tokio::test]
    async fn test_sign_up_then_duplicate_email_fails() {
        let auth = service();
        auth.sign_up(&valid_signup()).await.unwrap();
        auth.sign_out().await;

        let err = auth.sign_up(&valid_signup()).await.unwrap_err();
        assert_eq!(err, AuthError::EmailTaken);
    }

    #[tokio::test]
    async fn test_sign_out_clears_session() {
        let auth = service();
        auth.sign_in(&Credentials {
            email: "test@smartvazi.com".to_string(),
            password: "password".to_string(),
        })
        .await
        .unwrap();

        auth.sign_out().await;
        assert!(auth.current_session().await.is_none());
    }
}
