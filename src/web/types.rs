//! The sign-up input as it arrives from the client and its validated counterpart.
//! Email format is checked by the browser (`type="email"`), the server only requires presence.

use serde::Deserialize;

// ###################################
// ->   STRUCTS
// ###################################
/// Deserializable sign-up.
/// Both fields may be missing so that an absent email reaches validation
/// instead of being rejected by the extractor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl SignupForm {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            name: Some(name.into()),
        }
    }
}

/// Validated sign-up, ready to be sent to the waitlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signup {
    pub email: SignupEmail,
    pub name: Option<SignupName>,
}

impl Signup {
    pub fn parse(email: &str, name: &str) -> Result<Self, DataParsingError> {
        Ok(Signup {
            email: SignupEmail::parse(email)?,
            name: SignupName::parse(name),
        })
    }
}

/// A non-empty, trimmed email address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupEmail(String);

impl AsRef<str> for SignupEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl SignupEmail {
    pub fn parse<S>(value: S) -> Result<Self, DataParsingError>
    where
        S: AsRef<str>,
    {
        let value = value.as_ref().trim();
        if value.is_empty() {
            return Err(DataParsingError::EmailEmpty);
        }

        Ok(SignupEmail(value.to_owned()))
    }
}

/// A non-empty, trimmed name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupName(String);

impl AsRef<str> for SignupName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl SignupName {
    /// The name is optional: a blank one is simply absent.
    pub fn parse<S>(value: S) -> Option<Self>
    where
        S: AsRef<str>,
    {
        let value = value.as_ref().trim();
        (!value.is_empty()).then(|| SignupName(value.to_owned()))
    }
}

// ###################################
// ->   ERROR
// ###################################
#[derive(Debug, thiserror::Error)]
pub enum DataParsingError {
    #[error("missing email address")]
    EmailEmpty,
}
