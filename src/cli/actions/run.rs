use crate::auth::authorizer::{AccessAuthorizer, MANAGE_EVENTS};
use crate::auth::session::SessionEvaluator;
use crate::cli::actions::Action;
use crate::cli::globals::GlobalArgs;
use crate::client::catalog::{self, CatalogEntry};
use crate::client::{gateway, service_present};
use anyhow::Result;

/// Execute the provided action.
// This is the single dispatch point for all CLI actions.
// To add a new action, add a new `Action::*` variant and a corresponding arm here.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action, globals: &GlobalArgs) -> Result<()> {
    let store = globals.store();

    match action {
        Action::Register { profile } => {
            let confirmation = gateway::register(&globals.api_url, &profile).await?;
            println!("{confirmation}");
        }

        Action::Login { credentials } => {
            let issued = gateway::login(&globals.api_url, &credentials).await?;
            store.put(&issued.token, issued.subject.as_deref())?;
            match issued.role {
                Some(role) => println!("Logged in as {role}"),
                None => println!("Logged in"),
            }
        }

        Action::Logout => {
            store.clear();
            println!("Logged out");
        }

        Action::Events { manage: false } => {
            // Degradation is silent: stand-in data renders with no error banner.
            let entries = catalog::fetch_catalog(&globals.api_url, &store).await?;
            print_entries(&entries);
        }

        Action::Events { manage: true } => {
            let authorizer = AccessAuthorizer::new(&store);
            if !authorizer.authorize(&MANAGE_EVENTS) {
                // Denial is a redirect, not an error.
                println!("Not authorized to manage events. Please log in.");
                return Ok(());
            }
            match catalog::fetch_catalog_gated(&globals.api_url, &store).await? {
                Some(entries) => print_entries(&entries),
                None => println!("Session ended. Please log in."),
            }
        }

        Action::Status => {
            let session = SessionEvaluator::new(&store);
            if session.is_live() {
                let role = session
                    .current_role()
                    .map_or_else(|| "unknown".to_string(), |role| role.to_string());
                let subject = store.peek_subject().unwrap_or_else(|| "-".to_string());
                println!("Session: live, role {role}, subject {subject}");
            } else {
                println!("Session: none");
            }

            let present = service_present(&globals.api_url, &store).await;
            println!("Service: {}", if present { "present" } else { "absent" });
        }
    }

    Ok(())
}

fn print_entries(entries: &[CatalogEntry]) {
    if entries.is_empty() {
        println!("No events.");
        return;
    }
    for entry in entries {
        println!(
            "#{} {} [{}] {} @ {} - ${:.2}",
            entry.id, entry.name, entry.category, entry.date, entry.location, entry.price
        );
    }
}
