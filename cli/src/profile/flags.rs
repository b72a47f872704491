//! Mapping `configure` flags onto a [`ProfileDelta`].

use clap::Args;

use crate::profile::types::ProfileDelta;

/// Profile fields accepted on the command line.
#[derive(Args, Debug, Clone, Default)]
pub struct ProfileFlags {
    /// The new name of your profile.
    #[arg(long)]
    pub new_name: Option<String>,

    /// A short description.
    #[arg(long)]
    pub description: Option<String>,

    /// Enable or disable the entire profile.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    pub enabled: Option<bool>,

    /// API token belonging to a user; inherits that user's permissions.
    #[arg(long)]
    pub user_token: Option<String>,

    /// API token belonging to a team; grants access to that team's workspaces.
    #[arg(long)]
    pub team_token: Option<String>,

    /// API token belonging to an organization; grants access to organization-level settings.
    #[arg(long)]
    pub organization_token: Option<String>,
}

impl ProfileFlags {
    /// Builds the delta these flags describe for the selected `profile`.
    ///
    /// Empty strings count as "not supplied". `--new-name` takes precedence
    /// over the profile name. `--enabled` is supplied whenever the flag was
    /// present, so `--enabled=false` is honoured.
    #[must_use]
    pub fn to_delta(&self, profile: &str) -> ProfileDelta {
        ProfileDelta {
            name: non_empty(self.new_name.as_deref()).or_else(|| non_empty(Some(profile))),
            description: non_empty(self.description.as_deref()),
            enabled: self.enabled,
            user_token: non_empty(self.user_token.as_deref()),
            team_token: non_empty(self.team_token.as_deref()),
            organization_token: non_empty(self.organization_token.as_deref()),
        }
    }
}

/// `Some` only for a non-empty string.
pub fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}
