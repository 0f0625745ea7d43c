//! Error types for the odata-fluent query client.
//!
//! This crate provides the foundation error types used throughout the
//! odata-fluent workspace. Builder and grammar errors indicate programmer
//! mistakes and fail at construction time; transport and response errors
//! surface from the execution path.

mod construction;
mod http;
mod response;

pub use construction::{
    IllegalOperatorCombination, InvalidBindingCategory, InvalidOperatorValue, MissingEntitySet,
    MissingRequestTarget,
};
pub use http::{ApiError, HttpError};
pub use response::{EmptyCountResponse, ResponseParseError};

/// Crate-level error variants.
///
/// Construction variants abort fluent building synchronously; transport and
/// response variants propagate from terminal operations.
#[derive(Debug, derive_more::From)]
pub enum ODataErrorKind {
    /// No entity set was supplied before compilation.
    MissingEntitySet(MissingEntitySet),
    /// A terminal operation ran on a builder with no attached client.
    MissingRequestTarget(MissingRequestTarget),
    /// A null value was paired with a non-equality comparison operator.
    InvalidOperatorValue(InvalidOperatorValue),
    /// An operator token outside the grammar's operator and function sets.
    IllegalOperatorCombination(IllegalOperatorCombination),
    /// A binding category outside the fixed select/where/order set.
    InvalidBindingCategory(InvalidBindingCategory),
    /// Transport-level failure before a response was produced.
    Http(HttpError),
    /// Non-success status returned by the service.
    Api(ApiError),
    /// Response body could not be interpreted as structured data.
    ResponseParse(ResponseParseError),
    /// A count request returned an empty body.
    EmptyCountResponse(EmptyCountResponse),
}

impl std::fmt::Display for ODataErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ODataErrorKind::MissingEntitySet(e) => write!(f, "{}", e),
            ODataErrorKind::MissingRequestTarget(e) => write!(f, "{}", e),
            ODataErrorKind::InvalidOperatorValue(e) => write!(f, "{}", e),
            ODataErrorKind::IllegalOperatorCombination(e) => write!(f, "{}", e),
            ODataErrorKind::InvalidBindingCategory(e) => write!(f, "{}", e),
            ODataErrorKind::Http(e) => write!(f, "{}", e),
            ODataErrorKind::Api(e) => write!(f, "{}", e),
            ODataErrorKind::ResponseParse(e) => write!(f, "{}", e),
            ODataErrorKind::EmptyCountResponse(e) => write!(f, "{}", e),
        }
    }
}

/// OData error with kind discrimination.
#[derive(Debug)]
pub struct ODataError(Box<ODataErrorKind>);

impl ODataError {
    /// Create a new error from a kind.
    pub fn new(kind: ODataErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ODataErrorKind {
        &self.0
    }
}

impl std::fmt::Display for ODataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OData Error: {}", self.0)
    }
}

impl std::error::Error for ODataError {}

// Generic From implementation for any type that converts to ODataErrorKind
impl<T> From<T> for ODataError
where
    T: Into<ODataErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for OData operations.
pub type ODataResult<T> = std::result::Result<T, ODataError>;
