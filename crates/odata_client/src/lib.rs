//! Fluent OData v4 query builder and HTTP client.
//!
//! The [`ODataClient`] owns the service base URL, transport, and grammar;
//! [`Builder`] accumulates query state through chained calls and compiles it
//! through the grammar into a spec-compliant URL, which terminal operations
//! execute over HTTP.
//!
//! ```no_run
//! use odata_client::ODataClient;
//!
//! # async fn run() -> odata_error::ODataResult<()> {
//! let client = ODataClient::new("https://services.odata.org/V4/TripPinService");
//! let people = client
//!     .from("People")
//!     .select(["FirstName", "LastName"])
//!     .where_eq("FirstName", "Russell")
//!     .take(5)
//!     .get()
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod auth;
mod builder;
mod client;
mod request;
mod response;

pub use auth::{Anonymous, Authenticator, BearerAuth};
pub use builder::Builder;
pub use client::{ODataClient, ODataClientBuilder};
pub use request::{ODataRequest, Verb};
pub use response::ODataResponse;

// Re-export the query model so callers rarely need odata_core directly.
pub use odata_core::{
    BindingCategory, Bindings, Boolean, Clause, Grammar, ODataV4Grammar, Operator, Order,
    OrderDirection, QueryState, Reference, Value,
};
pub use odata_error::{ODataError, ODataErrorKind, ODataResult};
