//! Credential profile management for tecli.
//!
//! This module provides profile persistence:
//! - Load and save the credentials document
//! - Add, update, and remove named profiles
//! - Translate command-line flags into partial updates

pub mod error;
pub mod flags;
pub mod store;
pub mod types;

pub use error::ProfileError;
pub use flags::ProfileFlags;
pub use store::{apply_update, ProfileStore};
pub use types::{CredentialProfile, ProfileDelta};
