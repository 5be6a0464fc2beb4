//! Authorization module for classroom-quickstart.
//!
//! This module loads the OAuth client descriptor, caches the authorization
//! token on disk and runs the interactive authorization-code flow when no
//! token is cached.

pub mod credentials;
pub mod flow;
pub mod store;
pub mod tokens;

pub use credentials::load_client_credentials;
pub use flow::{AuthorizedClient, Authorizer, TerminalPrompt};
pub use store::{FileTokenStore, TokenStore};
pub use tokens::Token;
