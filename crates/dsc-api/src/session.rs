//! Source of the bearer token attached to every datasource request.
//!
//! The client asks its [`SessionProvider`] for a token right before each
//! request and never keeps the answer, so a login or logout between two
//! calls is picked up immediately.

use std::fmt;

use secrecy::SecretString;

/// Failure to read the current session.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SessionError {
    /// The session store could not be consulted.
    #[error("session unavailable: {0}")]
    Unavailable(String),
}

/// Supplies the current user's bearer token.
///
/// `Ok(None)` means there is no session. The client still sends the
/// request, with an empty credential.
pub trait SessionProvider: Send + Sync + fmt::Debug {
    /// Read the token for the current user.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if the session store cannot be read.
    fn user_token(&self) -> Result<Option<SecretString>, SessionError>;
}

/// A provider that always returns the same token.
#[derive(Clone, Default)]
pub struct StaticToken(Option<SecretString>);

impl StaticToken {
    /// Provider for a fixed token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(SecretString::from(token.into())))
    }

    /// Provider with no session at all.
    pub fn none() -> Self {
        Self(None)
    }
}

impl fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StaticToken")
            .field(&self.0.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl SessionProvider for StaticToken {
    fn user_token(&self) -> Result<Option<SecretString>, SessionError> {
        Ok(self.0.clone())
    }
}

/// A provider backed by a closure, called once per request.
pub struct FnSession<F>(F);

impl<F> FnSession<F>
where
    F: Fn() -> Result<Option<SecretString>, SessionError> + Send + Sync,
{
    /// Wrap an accessor closure.
    pub fn new(accessor: F) -> Self {
        Self(accessor)
    }
}

impl<F> fmt::Debug for FnSession<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSession").finish_non_exhaustive()
    }
}

impl<F> SessionProvider for FnSession<F>
where
    F: Fn() -> Result<Option<SecretString>, SessionError> + Send + Sync,
{
    fn user_token(&self) -> Result<Option<SecretString>, SessionError> {
        (self.0)()
    }
}
