// Internal "interpreter" for `Action`.
// We keep the match in a separate module so `mod.rs` stays small as more actions are added.
mod run;

use crate::cli::globals::GlobalArgs;
use crate::client::gateway::{LoginCredentials, RegistrationProfile};

#[derive(Debug)]
pub enum Action {
    Register { profile: RegistrationProfile },
    Login { credentials: LoginCredentials },
    Logout,
    Events { manage: bool },
    Status,
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self, globals: &GlobalArgs) -> anyhow::Result<()> {
        run::execute(self, globals).await
    }
}
