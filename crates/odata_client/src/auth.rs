//! Authentication plug-point for outgoing requests.

use async_trait::async_trait;

/// Decorates an outgoing request with credentials before send.
///
/// Implementations may acquire tokens asynchronously; a no-op implementation
/// is valid for unauthenticated services.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Attach or modify headers on the outgoing request.
    async fn authenticate(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder;
}

/// Unauthenticated mode: requests pass through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

#[async_trait]
impl Authenticator for Anonymous {
    async fn authenticate(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
    }
}

/// Static bearer-token authentication.
#[derive(Clone)]
pub struct BearerAuth {
    token: String,
}

impl BearerAuth {
    /// Create a bearer authenticator from a token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl std::fmt::Debug for BearerAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the token.
        f.debug_struct("BearerAuth").finish_non_exhaustive()
    }
}

#[async_trait]
impl Authenticator for BearerAuth {
    async fn authenticate(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.bearer_auth(&self.token)
    }
}
