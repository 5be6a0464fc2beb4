//! Token cache command handlers.

use crate::auth::{FileTokenStore, TokenStore};
use crate::config::QuickstartConfig;
use crate::error::Result;

/// Handle the `classroom-quickstart logout` command.
pub fn handle_logout(config: &QuickstartConfig) -> Result<()> {
    let store = FileTokenStore::new(config.auth.token_path()?);

    if store.delete()? {
        println!("Removed cached token {}.", store.path().display());
    } else {
        println!("No cached token to remove.");
    }

    Ok(())
}

/// Handle the `classroom-quickstart status` command.
pub fn handle_status(config: &QuickstartConfig) -> Result<()> {
    let store = FileTokenStore::new(config.auth.token_path()?);

    match store.load()? {
        Some(token) => {
            println!("Authorized");
            println!();
            println!("  Token file: {}", store.path().display());
            match token.expiry {
                Some(expiry) => println!("  Expires:    {expiry}"),
                None => println!("  Expires:    unknown"),
            }
            println!("  Refreshable: {}", token.refresh_token.is_some());

            if token.is_expired() {
                println!();
                println!("  Warning: the access token has expired. Run 'classroom-quickstart logout' and authorize again.");
            }
        }
        None => {
            println!("Not authorized");
            println!();
            println!("Run 'classroom-quickstart' to authorize.");
        }
    }

    Ok(())
}
