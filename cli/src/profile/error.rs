//! Profile-specific error types.

use thiserror::Error;

/// Errors specific to credential profile operations.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// Profile with the given name already exists.
    #[error("Profile '{0}' already exists. Use 'tecli configure update' to change it.")]
    AlreadyExists(String),

    /// Profile with the given name was not found.
    #[error("Profile '{0}' not found. Run 'tecli configure list' to see available profiles.")]
    NotFound(String),

    /// Invalid profile name.
    #[error("Invalid profile name '{0}': {1}")]
    InvalidName(String, String),

    /// The profile has no token of the kind an operation needs.
    #[error("Profile '{profile}' has no {kind} token. Set one with 'tecli configure update --{kind}-token'.")]
    MissingToken {
        /// Profile name.
        profile: String,
        /// Token kind (`user`, `team` or `organization`).
        kind: &'static str,
    },
}

impl ProfileError {
    /// Checks if this is a "not found" error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
