//! Command utility types and helpers.

/// Error indicating user cancelled an operation.
#[derive(Debug, thiserror::Error)]
#[error("user cancelled")]
pub struct CancelError;

/// Error indicating a flag parsing issue.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct FlagError(pub String);

/// Silent error - triggers exit 1 without message.
#[derive(Debug, thiserror::Error)]
#[error("")]
pub struct SilentError;

/// Auth error - triggers exit 4.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct AuthError(pub String);

/// Check if an error represents a user cancellation.
pub fn is_user_cancellation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<CancelError>().is_some()
}
