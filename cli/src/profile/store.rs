//! Credential profile storage.
//!
//! [`ProfileStore`] holds every profile from the credentials document for the
//! duration of one command and writes the whole collection back on
//! [`persist`](ProfileStore::persist). There is no file locking: two
//! concurrent invocations race and the last writer wins.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::config::{write_yaml, AppInfo, ConfigError, ConfigFormat, ConfigLoader};
use crate::error::Result;
use crate::profile::error::ProfileError;
use crate::profile::types::{CredentialProfile, CredentialsFile, ProfileDelta};

/// In-memory view of the credentials document.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
    profiles: Vec<CredentialProfile>,
}

impl ProfileStore {
    /// Loads the credentials document described by `app`.
    ///
    /// The store persists back to the file it was read from, so a
    /// `credentials.yml` stays a `.yml`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] when the credentials file is missing;
    /// callers bootstrap and retry. A document with an unknown format, a shape
    /// that isn't a profile list, or duplicate or empty profile names is
    /// reported as [`ConfigError::Parse`].
    pub fn load(app: &AppInfo) -> Result<Self> {
        let format = ConfigFormat::try_from(app.credentials_type.as_str()).map_err(|cause| {
            ConfigError::Parse {
                name: app.credentials_name.clone(),
                path: app.credentials_path.clone(),
                cause,
            }
        })?;
        let document = ConfigLoader::load_from(
            &app.configurations_dir,
            &app.credentials_name,
            format,
        )?;
        let path = document
            .path()
            .map_or_else(|| app.credentials_path.clone(), Path::to_path_buf);
        let file: CredentialsFile = document.deserialize()?;

        check_names(&file.profiles).map_err(|cause| ConfigError::Parse {
            name: app.credentials_name.clone(),
            path: path.clone(),
            cause,
        })?;

        tracing::debug!(count = file.profiles.len(), path = %path.display(), "loaded credential profiles");

        Ok(Self {
            path,
            profiles: file.profiles,
        })
    }

    /// File this store persists to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates an empty store that persists to `path`.
    #[must_use]
    pub const fn empty(path: PathBuf) -> Self {
        Self {
            path,
            profiles: Vec::new(),
        }
    }

    /// All profiles in document order.
    #[must_use]
    pub fn list(&self) -> &[CredentialProfile] {
        &self.profiles
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Finds a profile and its position by name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<(usize, &CredentialProfile)> {
        self.profiles
            .iter()
            .enumerate()
            .find(|(_, profile)| profile.name == name)
    }

    /// Appends a new profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or already taken.
    pub fn add(&mut self, mut profile: CredentialProfile) -> Result<()> {
        validate_name(&profile.name)?;

        if self.find_by_name(&profile.name).is_some() {
            return Err(ProfileError::AlreadyExists(profile.name).into());
        }

        profile.touch();
        tracing::debug!(profile = %profile.name, "adding profile");
        self.profiles.push(profile);
        Ok(())
    }

    /// Applies `delta` to the profile called `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile doesn't exist, or if the delta renames
    /// it onto another profile's name.
    pub fn update(&mut self, name: &str, delta: &ProfileDelta) -> Result<&CredentialProfile> {
        let (index, existing) = self
            .find_by_name(name)
            .ok_or_else(|| ProfileError::NotFound(name.to_string()))?;

        if let Some(new_name) = delta.name.as_deref() {
            validate_name(new_name)?;
            if new_name != existing.name && self.find_by_name(new_name).is_some() {
                return Err(ProfileError::AlreadyExists(new_name.to_string()).into());
            }
        }

        let updated = apply_update(existing.clone(), delta);
        tracing::debug!(profile = %name, renamed_to = %updated.name, "updating profile");
        self.profiles[index] = updated;
        Ok(&self.profiles[index])
    }

    /// Removes and returns the profile at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`; passing a stale index is a bug in the
    /// caller.
    pub fn remove(&mut self, index: usize) -> CredentialProfile {
        self.profiles.remove(index)
    }

    /// Removes and returns the profile called `name`.
    pub fn remove_by_name(&mut self, name: &str) -> Result<CredentialProfile> {
        let (index, _) = self
            .find_by_name(name)
            .ok_or_else(|| ProfileError::NotFound(name.to_string()))?;
        Ok(self.remove(index))
    }

    /// Rewrites the credentials document with the current collection.
    ///
    /// The file is replaced in place, not via a temporary file and rename.
    pub fn persist(&self) -> Result<()> {
        let file = CredentialsFile {
            profiles: self.profiles.clone(),
        };
        write_yaml(&file, &self.path)?;
        tracing::debug!(count = self.profiles.len(), path = %self.path.display(), "persisted credential profiles");
        Ok(())
    }
}

/// Overlays the supplied fields of `delta` onto `existing`.
///
/// `updated_at` is refreshed even when nothing else changes.
#[must_use]
pub fn apply_update(mut existing: CredentialProfile, delta: &ProfileDelta) -> CredentialProfile {
    if let Some(name) = &delta.name {
        existing.name.clone_from(name);
    }
    if let Some(description) = &delta.description {
        existing.description = Some(description.clone());
    }
    if let Some(enabled) = delta.enabled {
        existing.enabled = enabled;
    }
    if let Some(token) = &delta.user_token {
        existing.user_token = Some(token.clone());
    }
    if let Some(token) = &delta.team_token {
        existing.team_token = Some(token.clone());
    }
    if let Some(token) = &delta.organization_token {
        existing.organization_token = Some(token.clone());
    }

    existing.touch();
    existing
}

/// Names read from disk must be non-empty and unique.
fn check_names(profiles: &[CredentialProfile]) -> std::result::Result<(), String> {
    let mut seen = HashSet::new();
    for profile in profiles {
        if profile.name.trim().is_empty() {
            return Err("profile name cannot be empty".to_string());
        }
        if !seen.insert(profile.name.as_str()) {
            return Err(format!("duplicate profile name '{}'", profile.name));
        }
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ProfileError::InvalidName(
            name.to_string(),
            "name cannot be empty".to_string(),
        )
        .into());
    }
    Ok(())
}
