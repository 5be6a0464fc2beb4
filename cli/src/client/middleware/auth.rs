//! Authentication middleware for injecting Bearer tokens.

use std::sync::Arc;

use async_trait::async_trait;
use http::Extensions;
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next, Result};

use crate::auth::Token;

/// Middleware that injects the authorized token into requests.
pub struct AuthMiddleware {
    token: Arc<Token>,
}

impl AuthMiddleware {
    /// Create a new authentication middleware.
    #[must_use]
    pub const fn new(token: Arc<Token>) -> Self {
        Self { token }
    }
}

#[async_trait]
impl Middleware for AuthMiddleware {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> Result<Response> {
        let value = format!("{} {}", self.token.token_type, self.token.access_token);
        match value.parse() {
            Ok(value) => {
                req.headers_mut().insert(http::header::AUTHORIZATION, value);
            }
            Err(_) => tracing::warn!("Cached access token is not a valid header value"),
        }

        let response = next.run(req, extensions).await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            tracing::warn!("Received 401 Unauthorized - cached token may be stale");
        }

        Ok(response)
    }
}
