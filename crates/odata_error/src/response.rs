//! Response interpretation error types.

/// Response body could not be interpreted as structured data.
#[derive(Debug, Clone)]
pub struct ResponseParseError {
    /// The underlying error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ResponseParseError {
    /// Create a new ResponseParseError with the given message at the current location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for ResponseParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Response Parse Error: {} at line {} in {}",
            self.message, self.line, self.file
        )
    }
}

impl std::error::Error for ResponseParseError {}

/// A count request returned an empty body.
///
/// Raised instead of guessing zero: an empty `/$count` body is
/// indistinguishable from a transport fault.
#[derive(Debug, Clone)]
pub struct EmptyCountResponse {
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl EmptyCountResponse {
    /// Create a new EmptyCountResponse at the current location.
    #[track_caller]
    pub fn new() -> Self {
        let location = std::panic::Location::caller();
        Self {
            line: location.line(),
            file: location.file(),
        }
    }
}

impl Default for EmptyCountResponse {
    #[track_caller]
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EmptyCountResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Empty Count Response: count request returned no body at line {} in {}",
            self.line, self.file
        )
    }
}

impl std::error::Error for EmptyCountResponse {}
