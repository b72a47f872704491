//! Workspace operations against the Terraform Cloud API.
//!
//! Each [`WorkspaceOperation`] knows which flags it needs and how it maps onto
//! an HTTP request. The remote semantics (locking, VCS connections, SSH keys)
//! are the server's business; this module only forwards.

use std::fmt;

use clap::ValueEnum;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::error::{Result, TecliError};

/// Operations the `workspace` command can forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WorkspaceOperation {
    List,
    Create,
    Read,
    ReadById,
    Update,
    UpdateById,
    Delete,
    DeleteById,
    RemoveVcsConnection,
    RemoveVcsConnectionById,
    Lock,
    Unlock,
    ForceUnlock,
    AssignSshKey,
    UnassignSshKey,
}

/// HTTP methods used by workspace operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

/// Options that only some operations read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WorkspaceOptions {
    pub new_name: Option<String>,
    pub description: Option<String>,
    pub terraform_version: Option<String>,
    pub working_directory: Option<String>,
    pub auto_apply: Option<bool>,
    pub reason: Option<String>,
    pub ssh_key_id: Option<String>,
}

/// Identifiers and options for one workspace operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkspaceParams {
    pub organization: Option<String>,
    pub name: Option<String>,
    pub id: Option<String>,
    pub options: WorkspaceOptions,
}

/// A fully resolved request, relative to the API root.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

/// Which identifiers an operation addresses a workspace by.
enum Target {
    Organization,
    ByName,
    ById,
}

impl WorkspaceOperation {
    const fn target(self) -> Target {
        match self {
            Self::List | Self::Create => Target::Organization,
            Self::Read | Self::Update | Self::Delete | Self::RemoveVcsConnection => {
                Target::ByName
            }
            Self::ReadById
            | Self::UpdateById
            | Self::DeleteById
            | Self::RemoveVcsConnectionById
            | Self::Lock
            | Self::Unlock
            | Self::ForceUnlock
            | Self::AssignSshKey
            | Self::UnassignSshKey => Target::ById,
        }
    }

    /// Returns `true` if a successful response carries no entity.
    #[must_use]
    pub const fn returns_nothing(self) -> bool {
        matches!(self, Self::Delete | Self::DeleteById)
    }

    /// Checks that `params` carries every flag this operation needs.
    pub fn validate(self, params: &WorkspaceParams) -> Result<()> {
        match self.target() {
            Target::Organization => {
                self.require(params.organization.as_deref(), "organization")?;
                if self == Self::Create {
                    self.require(params.name.as_deref(), "name")?;
                }
            }
            Target::ByName => {
                self.require(params.organization.as_deref(), "organization")?;
                self.require(params.name.as_deref(), "name")?;
            }
            Target::ById => {
                self.require(params.id.as_deref(), "id")?;
            }
        }

        if self == Self::AssignSshKey {
            self.require(params.options.ssh_key_id.as_deref(), "ssh-key-id")?;
        }

        Ok(())
    }

    /// Builds the HTTP request for this operation.
    pub fn request(self, params: &WorkspaceParams) -> Result<ApiRequest> {
        self.validate(params)?;

        let org = || segment(params.organization.as_deref());
        let name = || segment(params.name.as_deref());
        let id = || segment(params.id.as_deref());
        let by_name = || format!("organizations/{}/workspaces/{}", org(), name());
        let by_id = || format!("workspaces/{}", id());

        let (method, path, body) = match self {
            Self::List => (Method::Get, format!("organizations/{}/workspaces", org()), None),
            Self::Create => (
                Method::Post,
                format!("organizations/{}/workspaces", org()),
                Some(workspace_body(params, true)),
            ),
            Self::Read => (Method::Get, by_name(), None),
            Self::ReadById => (Method::Get, by_id(), None),
            Self::Update => (Method::Patch, by_name(), Some(workspace_body(params, false))),
            Self::UpdateById => (Method::Patch, by_id(), Some(workspace_body(params, false))),
            Self::Delete => (Method::Delete, by_name(), None),
            Self::DeleteById => (Method::Delete, by_id(), None),
            Self::RemoveVcsConnection => (Method::Patch, by_name(), Some(remove_vcs_body())),
            Self::RemoveVcsConnectionById => (Method::Patch, by_id(), Some(remove_vcs_body())),
            Self::Lock => (
                Method::Post,
                format!("{}/actions/lock", by_id()),
                Some(json!({ "reason": params.options.reason.clone().unwrap_or_default() })),
            ),
            Self::Unlock => (Method::Post, format!("{}/actions/unlock", by_id()), None),
            Self::ForceUnlock => (
                Method::Post,
                format!("{}/actions/force-unlock", by_id()),
                None,
            ),
            Self::AssignSshKey => (
                Method::Patch,
                format!("{}/relationships/ssh-key", by_id()),
                Some(ssh_key_body(params.options.ssh_key_id.as_deref())),
            ),
            Self::UnassignSshKey => (
                Method::Patch,
                format!("{}/relationships/ssh-key", by_id()),
                Some(ssh_key_body(None)),
            ),
        };

        Ok(ApiRequest { method, path, body })
    }

    fn require(self, value: Option<&str>, flag: &'static str) -> Result<()> {
        match value {
            Some(v) if !v.is_empty() => Ok(()),
            _ => Err(TecliError::MissingArgument {
                operation: self.to_string(),
                flag,
            }),
        }
    }
}

impl fmt::Display for WorkspaceOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_possible_value()
            .map_or(Ok(()), |v| write!(f, "{}", v.get_name()))
    }
}

/// Percent-encodes a path segment. Validation has already ensured presence.
fn segment(value: Option<&str>) -> String {
    let mut url = url::Url::parse("http://x/").expect("static URL");
    url.path_segments_mut()
        .expect("http URL has path segments")
        .push(value.unwrap_or_default());
    url.path().trim_start_matches('/').to_string()
}

fn workspace_body(params: &WorkspaceParams, creating: bool) -> Value {
    let options = &params.options;
    let mut attributes = Map::new();

    let name = if creating {
        params.name.clone()
    } else {
        options.new_name.clone()
    };
    if let Some(name) = name {
        attributes.insert("name".to_string(), Value::String(name));
    }
    if let Some(description) = &options.description {
        attributes.insert("description".to_string(), json!(description));
    }
    if let Some(version) = &options.terraform_version {
        attributes.insert("terraform-version".to_string(), json!(version));
    }
    if let Some(dir) = &options.working_directory {
        attributes.insert("working-directory".to_string(), json!(dir));
    }
    if let Some(auto_apply) = options.auto_apply {
        attributes.insert("auto-apply".to_string(), json!(auto_apply));
    }

    json!({
        "data": {
            "type": "workspaces",
            "attributes": attributes,
        }
    })
}

fn remove_vcs_body() -> Value {
    json!({
        "data": {
            "type": "workspaces",
            "attributes": { "vcs-repo": null },
        }
    })
}

fn ssh_key_body(ssh_key_id: Option<&str>) -> Value {
    json!({
        "data": {
            "type": "workspaces",
            "attributes": { "id": ssh_key_id },
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn by_name() -> WorkspaceParams {
        WorkspaceParams {
            organization: Some("acme".to_string()),
            name: Some("network".to_string()),
            ..WorkspaceParams::default()
        }
    }

    fn by_id() -> WorkspaceParams {
        WorkspaceParams {
            id: Some("ws-123".to_string()),
            ..WorkspaceParams::default()
        }
    }

    #[test]
    fn display_uses_kebab_case() {
        assert_eq!(WorkspaceOperation::ReadById.to_string(), "read-by-id");
        assert_eq!(
            WorkspaceOperation::RemoveVcsConnection.to_string(),
            "remove-vcs-connection"
        );
        assert_eq!(WorkspaceOperation::AssignSshKey.to_string(), "assign-ssh-key");
    }

    #[test]
    fn list_requires_organization() {
        let err = WorkspaceOperation::List
            .validate(&WorkspaceParams::default())
            .unwrap_err();
        assert!(matches!(
            err,
            TecliError::MissingArgument { flag: "organization", .. }
        ));
    }

    #[test]
    fn by_name_operations_require_organization_and_name() {
        let only_org = WorkspaceParams {
            organization: Some("acme".to_string()),
            ..WorkspaceParams::default()
        };
        for op in [
            WorkspaceOperation::Create,
            WorkspaceOperation::Read,
            WorkspaceOperation::Update,
            WorkspaceOperation::Delete,
            WorkspaceOperation::RemoveVcsConnection,
        ] {
            let err = op.validate(&only_org).unwrap_err();
            assert!(matches!(err, TecliError::MissingArgument { flag: "name", .. }));
            assert!(op.validate(&by_name()).is_ok());
        }
    }

    #[test]
    fn by_id_operations_require_id() {
        for op in [
            WorkspaceOperation::ReadById,
            WorkspaceOperation::UpdateById,
            WorkspaceOperation::DeleteById,
            WorkspaceOperation::RemoveVcsConnectionById,
            WorkspaceOperation::Lock,
            WorkspaceOperation::Unlock,
            WorkspaceOperation::ForceUnlock,
            WorkspaceOperation::UnassignSshKey,
        ] {
            let err = op.validate(&by_name()).unwrap_err();
            assert!(matches!(err, TecliError::MissingArgument { flag: "id", .. }));
            assert!(op.validate(&by_id()).is_ok());
        }
    }

    #[test]
    fn empty_flag_counts_as_missing() {
        let params = WorkspaceParams {
            id: Some(String::new()),
            ..WorkspaceParams::default()
        };
        assert!(WorkspaceOperation::ReadById.validate(&params).is_err());
    }

    #[test]
    fn assign_ssh_key_requires_key_id() {
        let err = WorkspaceOperation::AssignSshKey
            .validate(&by_id())
            .unwrap_err();
        assert!(matches!(
            err,
            TecliError::MissingArgument { flag: "ssh-key-id", .. }
        ));
    }

    #[test]
    fn list_request() {
        let req = WorkspaceOperation::List.request(&by_name()).unwrap();
        assert_eq!(req.method, Method::Get);
        assert_eq!(req.path, "organizations/acme/workspaces");
        assert!(req.body.is_none());
    }

    #[test]
    fn create_request_carries_attributes() {
        let mut params = by_name();
        params.options.terraform_version = Some("1.5.0".to_string());
        params.options.auto_apply = Some(false);

        let req = WorkspaceOperation::Create.request(&params).unwrap();
        assert_eq!(req.method, Method::Post);
        assert_eq!(req.path, "organizations/acme/workspaces");

        let body = req.body.unwrap();
        assert_eq!(body["data"]["type"], "workspaces");
        assert_eq!(body["data"]["attributes"]["name"], "network");
        assert_eq!(body["data"]["attributes"]["terraform-version"], "1.5.0");
        assert_eq!(body["data"]["attributes"]["auto-apply"], false);
        assert!(body["data"]["attributes"].get("description").is_none());
    }

    #[test]
    fn update_renames_only_with_new_name() {
        let req = WorkspaceOperation::Update.request(&by_name()).unwrap();
        assert_eq!(req.method, Method::Patch);
        assert_eq!(req.path, "organizations/acme/workspaces/network");
        assert!(req.body.unwrap()["data"]["attributes"].get("name").is_none());

        let mut params = by_id();
        params.options.new_name = Some("renamed".to_string());
        let req = WorkspaceOperation::UpdateById.request(&params).unwrap();
        assert_eq!(req.path, "workspaces/ws-123");
        assert_eq!(req.body.unwrap()["data"]["attributes"]["name"], "renamed");
    }

    #[test]
    fn delete_requests() {
        let req = WorkspaceOperation::Delete.request(&by_name()).unwrap();
        assert_eq!(req.method, Method::Delete);
        assert_eq!(req.path, "organizations/acme/workspaces/network");

        let req = WorkspaceOperation::DeleteById.request(&by_id()).unwrap();
        assert_eq!(req.method, Method::Delete);
        assert_eq!(req.path, "workspaces/ws-123");

        assert!(WorkspaceOperation::Delete.returns_nothing());
        assert!(!WorkspaceOperation::Lock.returns_nothing());
    }

    #[test]
    fn remove_vcs_connection_nulls_repo() {
        let req = WorkspaceOperation::RemoveVcsConnectionById
            .request(&by_id())
            .unwrap();
        assert_eq!(req.method, Method::Patch);
        assert!(req.body.unwrap()["data"]["attributes"]["vcs-repo"].is_null());
    }

    #[test]
    fn lock_actions() {
        let mut params = by_id();
        params.options.reason = Some("maintenance".to_string());

        let lock = WorkspaceOperation::Lock.request(&params).unwrap();
        assert_eq!(lock.method, Method::Post);
        assert_eq!(lock.path, "workspaces/ws-123/actions/lock");
        assert_eq!(lock.body.unwrap()["reason"], "maintenance");

        let unlock = WorkspaceOperation::Unlock.request(&params).unwrap();
        assert_eq!(unlock.path, "workspaces/ws-123/actions/unlock");

        let force = WorkspaceOperation::ForceUnlock.request(&params).unwrap();
        assert_eq!(force.path, "workspaces/ws-123/actions/force-unlock");
    }

    #[test]
    fn ssh_key_relationship() {
        let mut params = by_id();
        params.options.ssh_key_id = Some("sshkey-1".to_string());

        let assign = WorkspaceOperation::AssignSshKey.request(&params).unwrap();
        assert_eq!(assign.path, "workspaces/ws-123/relationships/ssh-key");
        assert_eq!(assign.body.unwrap()["data"]["attributes"]["id"], "sshkey-1");

        let unassign = WorkspaceOperation::UnassignSshKey.request(&by_id()).unwrap();
        assert!(unassign.body.unwrap()["data"]["attributes"]["id"].is_null());
    }

    #[test]
    fn path_segments_are_encoded() {
        let params = WorkspaceParams {
            organization: Some("acme corp".to_string()),
            name: Some("a/b".to_string()),
            ..WorkspaceParams::default()
        };
        let req = WorkspaceOperation::Read.request(&params).unwrap();
        assert_eq!(req.path, "organizations/acme%20corp/workspaces/a%2Fb");
    }
}
