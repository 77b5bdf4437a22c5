use crate::cli::actions::Action;
use crate::cli::globals::GlobalArgs;
use crate::client::gateway::{LoginCredentials, RegistrationProfile};
use anyhow::{anyhow, Context, Result};
use secrecy::SecretString;
use std::path::PathBuf;

/// Turn parsed arguments into global settings plus an action to run.
///
/// # Errors
/// Returns an error on a missing subcommand or an unusable argument.
pub fn handler(matches: &clap::ArgMatches) -> Result<(GlobalArgs, Action)> {
    let api_url = matches
        .get_one::<String>("api-url")
        .map(String::to_string)
        .ok_or_else(|| anyhow!("missing required argument: --api-url"))?;

    let data_dir = matches
        .get_one::<String>("data-dir")
        .map_or_else(default_data_dir, PathBuf::from);

    let globals = GlobalArgs::new(api_url, data_dir);

    let arg = |m: &clap::ArgMatches, name: &str| -> Result<String> {
        m.get_one::<String>(name)
            .map(String::to_string)
            .with_context(|| format!("missing required argument: --{name}"))
    };

    let action = match matches.subcommand() {
        Some(("register", m)) => Action::Register {
            profile: RegistrationProfile {
                first_name: arg(m, "first-name")?,
                last_name: arg(m, "last-name")?,
                phone: arg(m, "phone")?,
                email: arg(m, "email")?,
                password: SecretString::from(arg(m, "password")?),
                role: arg(m, "role")?.parse()?,
                organization: m.get_one::<String>("organization").map(String::to_string),
            },
        },
        Some(("login", m)) => Action::Login {
            credentials: LoginCredentials {
                email: arg(m, "email")?,
                password: SecretString::from(arg(m, "password")?),
            },
        },
        Some(("logout", _)) => Action::Logout,
        Some(("events", m)) => Action::Events {
            manage: m.get_flag("manage"),
        },
        Some(("status", _)) => Action::Status,
        _ => return Err(anyhow!("missing subcommand")),
    };

    Ok((globals, action))
}

fn default_data_dir() -> PathBuf {
    std::env::var_os("HOME").map_or_else(
        || PathBuf::from(".biglietto"),
        |home| PathBuf::from(home).join(".biglietto"),
    )
}
