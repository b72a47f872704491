//! Credential profile data types.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A named bundle of API tokens and metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialProfile {
    /// Unique profile name.
    pub name: String,

    /// Optional description from user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether the profile is enabled.
    #[serde(default)]
    pub enabled: bool,

    /// Token tied to a user account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_token: Option<String>,

    /// Token tied to a team.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_token: Option<String>,

    /// Token tied to an organization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_token: Option<String>,

    /// When the profile was last changed.
    #[serde(default)]
    pub updated_at: String,
}

/// Fields to change on a profile. `Some` means the field was explicitly
/// supplied, including `Some(false)` for `enabled`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDelta {
    pub name: Option<String>,
    pub description: Option<String>,
    pub enabled: Option<bool>,
    pub user_token: Option<String>,
    pub team_token: Option<String>,
    pub organization_token: Option<String>,
}

/// On-disk shape of the credentials document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialsFile {
    #[serde(default)]
    pub profiles: Vec<CredentialProfile>,
}

impl CredentialProfile {
    /// Creates an empty, disabled profile stamped with the current time.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            updated_at: timestamp(),
            ..Self::default()
        }
    }

    /// Refreshes `updated_at`.
    pub fn touch(&mut self) {
        self.updated_at = timestamp();
    }

    /// Copy of this profile with every token masked for display.
    #[must_use]
    pub fn masked(&self) -> Self {
        let mask = |token: &Option<String>| token.as_deref().map(crate::input::mask);
        Self {
            user_token: mask(&self.user_token),
            team_token: mask(&self.team_token),
            organization_token: mask(&self.organization_token),
            ..self.clone()
        }
    }
}

impl ProfileDelta {
    /// Returns `true` if no field was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Current time in RFC 3339.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339()
}
