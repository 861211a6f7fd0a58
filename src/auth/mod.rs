use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

mod password;
mod store;


pub use password::{hash_password, verify_password};
pub use store::{AuthEvent, AuthStore, DEMO_EMAIL, DEMO_PASSWORD};

/// Avatar assigned when registration supplies none
pub const DEFAULT_AVATAR: &str = "https://via.placeholder.com/150";

/// Minimum accepted password length (characters)
pub const MIN_PASSWORD_LEN: usize = 6;

/// Signed-in user profile
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// UUID v4
    pub id: String,
    pub email: String,
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub interests: Vec<String>,
    pub avatar: String,
    pub join_date: DateTime<Utc>,
    /// Number of recorded sightings shown on the profile
    #[serde(default)]
    pub sightings: u32,
    #[serde(default)]
    pub favorite_species: Vec<String>,
}

/// Sign-up form input
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub name: String,
    pub location: String,
    pub interests: Vec<String>,
    pub avatar: Option<String>,
}

/// Split a comma-separated interests field, trimming and dropping blanks
pub fn parse_interests(raw: &str) -> Vec<String> {
    clean_interests(raw.split(','))
}

/// Trim each interest and drop the blank ones
pub(crate) fn clean_interests<I, S>(interests: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    interests
        .into_iter()
        .filter_map(|i| {
            let trimmed = i.as_ref().trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .collect()
}

/// Validate sign-in credentials
///
/// Rules: both fields present, email shaped like `local@domain.tld`,
/// password at least 6 characters.
pub fn validate_credentials(email: &str, password: &str) -> Result<(), CredentialError> {
    if email.is_empty() || password.is_empty() {
        return Err(CredentialError::MissingFields);
    }
    if !is_valid_email(email) {
        return Err(CredentialError::InvalidEmail);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(CredentialError::PasswordTooShort);
    }
    Ok(())
}

/// Validate a sign-up form (credentials plus name and location)
pub fn validate_registration(registration: &Registration) -> Result<(), CredentialError> {
    if registration.email.is_empty()
        || registration.password.is_empty()
        || registration.name.trim().is_empty()
        || registration.location.trim().is_empty()
    {
        return Err(CredentialError::MissingFields);
    }
    validate_credentials(&registration.email, &registration.password)
}

/// No whitespace, exactly one '@', non-empty local part, and a domain with a
/// dot that has characters on both sides.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Form validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum CredentialError {
    MissingFields,
    InvalidEmail,
    PasswordTooShort,
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialError::MissingFields => write!(f, "Please fill in all required fields"),
            CredentialError::InvalidEmail => write!(f, "Please enter a valid email address"),
            CredentialError::PasswordTooShort => write!(
                f,
                "Password must be at least {} characters long",
                MIN_PASSWORD_LEN
            ),
        }
    }
}

impl std::error::Error for CredentialError {}

/// Sign-in / sign-up errors
#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    Invalid(CredentialError),
    AccountNotFound,
    InvalidCredentials,
    EmailAlreadyRegistered,
    /// Persisting the session or account registry failed
    Storage(String),
}

impl From<CredentialError> for AuthError {
    fn from(e: CredentialError) -> Self {
        AuthError::Invalid(e)
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Invalid(e) => write!(f, "{}", e),
            AuthError::AccountNotFound => write!(f, "No account found for this email"),
            AuthError::InvalidCredentials => write!(f, "Invalid email or password"),
            AuthError::EmailAlreadyRegistered => {
                write!(f, "An account with this email already exists")
            }
            AuthError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for AuthError {}
