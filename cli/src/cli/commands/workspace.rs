//! Workspace command handlers.

use std::io::{self, Write};

use crate::cli::args::WorkspaceArgs;
use crate::client::{TfeClient, WorkspaceApi, WorkspaceOperation, WorkspaceParams};
use crate::config::{load_config, AppInfo};
use crate::error::Result;
use crate::profile::{ProfileError, ProfileStore};

/// Handle `tecli workspace <operation>`.
///
/// # Arguments
///
/// * `app` - Resolved configuration locations
/// * `profile` - Profile whose team token authenticates the request
/// * `operation` - Operation to forward
/// * `args` - Workspace flags
///
/// # Errors
///
/// Returns an error if a required flag is missing, the profile has no team
/// token, or the API call fails.
pub async fn handle_workspace(
    app: &AppInfo,
    profile: &str,
    operation: WorkspaceOperation,
    args: &WorkspaceArgs,
) -> Result<()> {
    let params = args.to_params()?;
    operation.validate(&params)?;

    let token = team_token(app, profile)?;
    let config = load_config(app)?;
    let client = TfeClient::new(&config.api, &token)?;
    tracing::debug!(%operation, profile, base_url = %client.base_url(), "running workspace operation");

    run_operation(&client, operation, &params, &mut io::stdout().lock()).await
}

/// Forwards `operation` to `api` and writes the outcome to `out`.
pub async fn run_operation<A: WorkspaceApi + ?Sized>(
    api: &A,
    operation: WorkspaceOperation,
    params: &WorkspaceParams,
    out: &mut impl Write,
) -> Result<()> {
    match api.invoke(operation, params).await? {
        Some(value) => writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?,
        None => writeln!(out, "Workspace {} deleted successfully.", subject(params))?,
    }
    Ok(())
}

/// The selected profile's team token.
fn team_token(app: &AppInfo, profile: &str) -> Result<String> {
    let store = ProfileStore::load(app)?;
    let (_, found) = store
        .find_by_name(profile)
        .ok_or_else(|| ProfileError::NotFound(profile.to_string()))?;

    match found.team_token.as_deref() {
        Some(token) if !token.is_empty() => Ok(token.to_string()),
        _ => Err(ProfileError::MissingToken {
            profile: profile.to_string(),
            kind: "team",
        }
        .into()),
    }
}

fn subject(params: &WorkspaceParams) -> &str {
    params
        .id
        .as_deref()
        .or(params.name.as_deref())
        .unwrap_or_default()
}
