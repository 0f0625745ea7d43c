//! HTTP client owning the service base URL, transport, and grammar.

use crate::{Anonymous, Authenticator, Builder, ODataRequest, ODataResponse};
use odata_core::{Grammar, ODataV4Grammar};
use odata_error::{ApiError, HttpError, ODataResult};
use std::sync::Arc;
use tracing::{debug, error, instrument};

/// Client for one OData service root.
///
/// Cloning is cheap: the transport, authenticator, and grammar are shared.
/// Builders minted from a client borrow nothing; each owns its own state.
#[derive(Clone, derive_builder::Builder)]
#[builder(setter(into), pattern = "owned")]
pub struct ODataClient {
    /// Service root URL, e.g. `https://services.odata.org/V4/TripPinService`
    base_url: String,
    /// Underlying HTTP transport
    #[builder(default)]
    http: reqwest::Client,
    /// Credential decorator applied before each send
    #[builder(default = "Arc::new(Anonymous)", setter(custom))]
    authenticator: Arc<dyn Authenticator>,
    /// Dialect used to compile query state
    #[builder(default = "Arc::new(ODataV4Grammar::new())", setter(custom))]
    grammar: Arc<dyn Grammar>,
}

impl ODataClientBuilder {
    /// Set the authenticator.
    pub fn authenticator(mut self, authenticator: impl Authenticator + 'static) -> Self {
        self.authenticator = Some(Arc::new(authenticator));
        self
    }

    /// Substitute a different grammar dialect.
    pub fn grammar(mut self, grammar: impl Grammar + 'static) -> Self {
        self.grammar = Some(Arc::new(grammar));
        self
    }
}

impl std::fmt::Debug for ODataClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ODataClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ODataClient {
    /// Create an anonymous client for the given service root with the
    /// default OData v4 grammar.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
            authenticator: Arc::new(Anonymous),
            grammar: Arc::new(ODataV4Grammar::new()),
        }
    }

    /// Creates a builder for `ODataClient`.
    pub fn builder() -> ODataClientBuilder {
        ODataClientBuilder::default()
    }

    /// The service root URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The grammar shared by builders minted from this client.
    pub fn grammar(&self) -> Arc<dyn Grammar> {
        Arc::clone(&self.grammar)
    }

    /// Start a query with no entity set; `from` must be called before any
    /// terminal operation.
    pub fn query(&self) -> Builder {
        Builder::attached(self.clone())
    }

    /// Start a query against the given entity set.
    pub fn from(&self, entity_set: impl Into<String>) -> Builder {
        self.query().from(entity_set)
    }

    /// Send a compiled request and wrap the raw result.
    ///
    /// Non-success statuses become [`ApiError`]; transport failures become
    /// [`HttpError`]. Status semantics beyond success are left to the
    /// caller.
    #[instrument(skip(self, request), fields(verb = %request.verb(), url = %request.url()))]
    pub async fn send(&self, request: &ODataRequest) -> ODataResult<ODataResponse> {
        let url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            request.url()
        );

        debug!(verb = %request.verb(), url = %url, "Sending OData request");

        let mut outgoing = self.http.request((*request.verb()).into(), &url);
        if let Some(body) = request.body() {
            outgoing = outgoing.json(body);
        }
        outgoing = self.authenticator.authenticate(outgoing).await;

        let response = outgoing.send().await.map_err(|e| {
            error!(error = ?e, "HTTP request failed");
            HttpError::new(format!("request failed: {e}"))
        })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to read response body");
                HttpError::new(format!("failed to read body: {e}"))
            })?
            .to_vec();

        if !status.is_success() {
            error!(status = %status, "Service returned an error status");
            return Err(ApiError::new(
                status.as_u16(),
                String::from_utf8_lossy(&body).into_owned(),
            )
            .into());
        }

        debug!(status = %status, bytes = body.len(), "Received response");

        Ok(ODataResponse::new(status.as_u16(), body))
    }
}
