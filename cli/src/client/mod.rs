//! Remote workspace API for tecli.
//!
//! - [`WorkspaceApi`] - the capability the `workspace` command calls
//! - [`TfeClient`] - implementation over the Terraform Cloud HTTP API
//! - [`WorkspaceOperation`] - the operations that can be forwarded

pub mod api;
pub mod middleware;
pub mod workspace;

pub use api::{TfeClient, WorkspaceApi};
pub use workspace::{WorkspaceOperation, WorkspaceOptions, WorkspaceParams};

#[cfg(test)]
pub use api::MockWorkspaceApi;
