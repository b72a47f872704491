//! Profile command handlers.

use std::io::{self, BufRead, Write};

use crate::cli::args::{ConfigureAction, Mode};
use crate::config::{self, AppInfo};
use crate::error::Result;
use crate::input::Prompter;
use crate::profile::flags::non_empty;
use crate::profile::{
    apply_update, CredentialProfile, ProfileDelta, ProfileError, ProfileFlags, ProfileStore,
};

/// Handle `tecli configure <action>`.
///
/// # Arguments
///
/// * `app` - Resolved configuration locations
/// * `profile` - Name of the selected profile
/// * `action` - What to do
/// * `mode` - Whether to prompt for fields or read them from `flags`
/// * `flags` - Profile fields supplied on the command line
///
/// # Errors
///
/// Returns an error if the credentials file cannot be read or written, the
/// profile is missing (or already exists on create), or the terminal input
/// ends before all prompts were answered.
pub fn handle_configure(
    app: &AppInfo,
    profile: &str,
    action: ConfigureAction,
    mode: Mode,
    flags: &ProfileFlags,
) -> Result<()> {
    match action {
        ConfigureAction::List => {
            let store = open_store(app)?;
            print!("{}", render_list(&store, profile));
        }
        ConfigureAction::Create => {
            let created = create_profile(app, profile, mode, flags, &mut Prompter::stdio())?;
            println!("Profile '{}' created.", created.name);
        }
        ConfigureAction::Read => {
            let store = open_store(app)?;
            println!("{}", read_profile(&store, profile)?);
        }
        ConfigureAction::Update => {
            let updated = update_profile(app, profile, mode, flags, &mut Prompter::stdio())?;
            println!("Profile '{}' updated.", updated.name);
        }
        ConfigureAction::Delete => {
            let removed = delete_profile(app, profile)?;
            println!("Profile '{}' deleted.", removed.name);
        }
        ConfigureAction::Purge => {
            let dir = app.configurations_dir.display();
            if !config::purge(app)? {
                println!("Nothing to purge.");
            } else if app.configurations_dir.exists() {
                println!("Deleted tecli files from {dir}; other files were left in place.");
            } else {
                println!("Deleted configuration directory {dir}");
            }
        }
    }

    Ok(())
}

/// Loads the profile store, bootstrapping the configuration directory first
/// when the credentials file doesn't exist yet.
pub fn open_store(app: &AppInfo) -> Result<ProfileStore> {
    open_store_with_notice(app, &mut io::stderr())
}

/// Like [`open_store`], telling `notice` when the directory had to be created.
fn open_store_with_notice(app: &AppInfo, notice: &mut impl Write) -> Result<ProfileStore> {
    match ProfileStore::load(app) {
        Err(e) if e.is_config_not_found() => {
            let existed = app.configurations_dir.is_dir();
            config::bootstrap(app)?;
            if !existed {
                writeln!(
                    notice,
                    "tecli configuration directory created at {}",
                    app.configurations_dir.display()
                )?;
            }
            ProfileStore::load(app)
        }
        other => other,
    }
}

/// Creates the selected profile and persists it.
///
/// In interactive mode the prompts are pre-filled with whatever the flags
/// supplied.
pub fn create_profile<R: BufRead, W: Write>(
    app: &AppInfo,
    profile: &str,
    mode: Mode,
    flags: &ProfileFlags,
    prompter: &mut Prompter<R, W>,
) -> Result<CredentialProfile> {
    let mut store = open_store(app)?;

    let delta = flags.to_delta(profile);
    let seed = CredentialProfile::new(delta.name.clone().unwrap_or_default());
    let mut created = apply_update(seed, &delta);
    if mode == Mode::Interactive {
        let answers = prompt_fields(prompter, &created)?;
        created = apply_update(created, &answers);
    }

    store.add(created.clone())?;
    store.persist()?;
    Ok(created)
}

/// Updates the selected profile and persists the store.
pub fn update_profile<R: BufRead, W: Write>(
    app: &AppInfo,
    profile: &str,
    mode: Mode,
    flags: &ProfileFlags,
    prompter: &mut Prompter<R, W>,
) -> Result<CredentialProfile> {
    let mut store = open_store(app)?;

    let delta = match mode {
        Mode::NonInteractive => flags.to_delta(profile),
        Mode::Interactive => {
            let current = store
                .find_by_name(profile)
                .map(|(_, p)| p.clone())
                .ok_or_else(|| ProfileError::NotFound(profile.to_string()))?;
            let prefilled = apply_update(current, &flags.to_delta(profile));
            let answers = prompt_fields(prompter, &prefilled)?;
            merge(flags.to_delta(profile), answers)
        }
    };

    let updated = store.update(profile, &delta)?.clone();
    store.persist()?;
    Ok(updated)
}

/// Removes the selected profile and persists the store.
pub fn delete_profile(app: &AppInfo, profile: &str) -> Result<CredentialProfile> {
    let mut store = open_store(app)?;
    let removed = store.remove_by_name(profile)?;
    store.persist()?;
    Ok(removed)
}

/// The selected profile as pretty JSON with masked tokens.
pub fn read_profile(store: &ProfileStore, profile: &str) -> Result<String> {
    let (_, found) = store
        .find_by_name(profile)
        .ok_or_else(|| ProfileError::NotFound(profile.to_string()))?;
    Ok(serde_json::to_string_pretty(&found.masked())?)
}

/// One line per profile; the selected one is starred.
pub fn render_list(store: &ProfileStore, selected: &str) -> String {
    if store.is_empty() {
        return "No profiles configured. Run 'tecli configure create' to add one.\n".to_string();
    }

    let mut out = String::new();
    for profile in store.list() {
        let marker = if profile.name == selected { "*" } else { " " };
        let state = if profile.enabled { "enabled" } else { "disabled" };
        out.push_str(&format!("{marker} {} ({state})", profile.name));
        if let Some(description) = &profile.description {
            out.push_str(&format!(" - {description}"));
        }
        out.push('\n');
    }
    out
}

fn prompt_fields<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    current: &CredentialProfile,
) -> Result<ProfileDelta> {
    let token = |t: &Option<String>| t.clone().unwrap_or_default();

    let name = prompter.ask_string("Name", &current.name)?;
    let description = prompter.ask_string(
        "Description",
        current.description.as_deref().unwrap_or_default(),
    )?;
    let enabled = prompter.ask_bool("Enabled", current.enabled)?;
    let user_token = prompter.ask_masked("User token", &token(&current.user_token))?;
    let team_token = prompter.ask_masked("Team token", &token(&current.team_token))?;
    let organization_token =
        prompter.ask_masked("Organization token", &token(&current.organization_token))?;

    Ok(ProfileDelta {
        name: non_empty(Some(&name)),
        description: non_empty(Some(&description)),
        enabled: Some(enabled),
        user_token: non_empty(Some(&user_token)),
        team_token: non_empty(Some(&team_token)),
        organization_token: non_empty(Some(&organization_token)),
    })
}

/// Prompt answers win over flags.
fn merge(flags: ProfileDelta, answers: ProfileDelta) -> ProfileDelta {
    ProfileDelta {
        name: answers.name.or(flags.name),
        description: answers.description.or(flags.description),
        enabled: answers.enabled.or(flags.enabled),
        user_token: answers.user_token.or(flags.user_token),
        team_token: answers.team_token.or(flags.team_token),
        organization_token: answers.organization_token.or(flags.organization_token),
    }
}
